use std::fs;

use crate::domain::{ActivityEntry, PaymentRow};

/// File exports backing the portal's download actions: receipts as
/// JSON, payment history as CSV.
pub struct ExportService;

impl ExportService {
    pub fn export_receipt_json(entry: &ActivityEntry, filename: &str) -> Result<String, String> {
        match serde_json::to_string_pretty(entry) {
            Ok(json) => match fs::write(filename, &json) {
                Ok(_) => Ok(filename.to_string()),
                Err(e) => Err(e.to_string()),
            },
            Err(e) => Err(format!("Serialization failed: {}", e)),
        }
    }

    pub fn export_history_csv(rows: &[PaymentRow], filename: &str) -> Result<String, String> {
        let mut writer = csv::Writer::from_path(filename).map_err(|e| e.to_string())?;
        writer
            .write_record(["date", "total", "principal", "interest", "fees"])
            .map_err(|e| e.to_string())?;
        for row in rows {
            writer
                .write_record([
                    row.date.to_string(),
                    format!("{:.2}", row.total),
                    format!("{:.2}", row.principal),
                    format!("{:.2}", row.interest),
                    format!("{:.2}", row.fees),
                ])
                .map_err(|e| e.to_string())?;
        }
        writer.flush().map_err(|e| e.to_string())?;
        Ok(filename.to_string())
    }
}

/// Receipt file name derived from the entry, mirroring the portal's
/// download naming.
pub fn receipt_filename(entry: &ActivityEntry) -> String {
    if entry.is_payment() {
        format!("payment-receipt-{}.json", entry.reference)
    } else {
        format!("draw-details-{}.json", entry.reference)
    }
}

pub fn history_filename() -> &'static str {
    "payment-history.csv"
}
