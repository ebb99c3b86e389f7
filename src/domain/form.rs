//! The application form accumulated across the wizard.
//!
//! Each step writes its result into this record and passes it forward;
//! screens never share state any other way. The completed form is what
//! gets serialized for the (simulated) submission.

use chrono::NaiveDate;
use serde::Serialize;

use super::models::FundingMethod;
use super::schedule::{PayFrequency, PayScheduleSelection};

/// Pre-approved maximum for the Mini Line of Credit, in whole dollars.
pub const PREAPPROVED_MAX: u32 = 1000;
/// Smallest amount the customization screen accepts.
pub const MIN_LOAN_AMOUNT: u32 = 100;
/// Annual percentage rate quoted on the customization screen.
pub const APR: f64 = 47.42;
/// Money Bundle price per pay period.
pub const BUNDLE_PRICE: f64 = 23.99;

/// Whether payroll arrives by direct deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DirectDeposit {
    #[serde(rename = "yes")]
    Yes,
    #[serde(rename = "no")]
    No,
}

impl DirectDeposit {
    pub const ALL: [DirectDeposit; 2] = [DirectDeposit::Yes, DirectDeposit::No];

    pub fn label(self) -> &'static str {
        match self {
            DirectDeposit::Yes => "Yes",
            DirectDeposit::No => "No",
        }
    }
}

/// Where the applicant's payroll is deposited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Bank {
    #[serde(rename = "RBC")]
    Rbc,
    #[serde(rename = "TD")]
    Td,
    Scotiabank,
    #[serde(rename = "BMO")]
    Bmo,
    #[serde(rename = "CIBC")]
    Cibc,
    #[serde(rename = "National Bank")]
    NationalBank,
    Other,
}

impl Bank {
    pub const ALL: [Bank; 7] = [
        Bank::Rbc,
        Bank::Td,
        Bank::Scotiabank,
        Bank::Bmo,
        Bank::Cibc,
        Bank::NationalBank,
        Bank::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Bank::Rbc => "RBC",
            Bank::Td => "TD",
            Bank::Scotiabank => "Scotiabank",
            Bank::Bmo => "BMO",
            Bank::Cibc => "CIBC",
            Bank::NationalBank => "National Bank",
            Bank::Other => "Other",
        }
    }
}

/// Data accumulated across the application wizard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationForm {
    pub employer_name: String,
    pub employer_phone: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub extension: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direct_deposit: Option<DirectDeposit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank: Option<Bank>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<PayFrequency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<PayScheduleSelection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_paid: Option<NaiveDate>,
    pub amount: u32,
    pub loan_protection: bool,
    pub preapproved_max: u32,
    pub apr: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub funding: Option<FundingMethod>,
    pub bundle: bool,
    pub consent: bool,
}

impl Default for ApplicationForm {
    fn default() -> Self {
        Self {
            employer_name: String::new(),
            employer_phone: String::new(),
            extension: String::new(),
            direct_deposit: None,
            bank: None,
            frequency: None,
            schedule: None,
            last_paid: None,
            amount: 0,
            loan_protection: false,
            preapproved_max: PREAPPROVED_MAX,
            apr: APR,
            funding: None,
            bundle: false,
            consent: false,
        }
    }
}

impl ApplicationForm {
    /// Serializes the accumulated form for the submission screen.
    pub fn to_payload(&self) -> Result<String, String> {
        serde_json::to_string_pretty(self).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::schedule::{DayOfMonth, PayWeekday};

    #[test]
    fn test_bank_labels() {
        let labels: Vec<&str> = Bank::ALL.iter().map(|b| b.label()).collect();
        assert_eq!(
            labels,
            vec!["RBC", "TD", "Scotiabank", "BMO", "CIBC", "National Bank", "Other"]
        );
    }

    #[test]
    fn test_default_form_carries_preapproval_terms() {
        let form = ApplicationForm::default();
        assert_eq!(form.preapproved_max, 1000);
        assert_eq!(form.apr, 47.42);
        assert_eq!(form.amount, 0);
        assert!(form.frequency.is_none());
    }

    #[test]
    fn test_payload_serialization() {
        let today = NaiveDate::from_ymd_opt(2025, 10, 15).unwrap();
        let anchor = NaiveDate::from_ymd_opt(2025, 10, 13).unwrap();
        let form = ApplicationForm {
            employer_name: "Acme Widgets".to_string(),
            employer_phone: "(555) 123-4567".to_string(),
            extension: String::new(),
            direct_deposit: Some(DirectDeposit::Yes),
            bank: Some(Bank::Bmo),
            frequency: Some(PayFrequency::Biweekly),
            schedule: Some(
                PayScheduleSelection::biweekly(PayWeekday::Monday, anchor, today).unwrap(),
            ),
            last_paid: Some(anchor),
            amount: 300,
            loan_protection: true,
            funding: Some(FundingMethod::ETransfer),
            bundle: true,
            consent: true,
            ..ApplicationForm::default()
        };

        let payload = form.to_payload().unwrap();
        let value: serde_json::Value = serde_json::from_str(&payload).unwrap();

        assert_eq!(value["employerName"], "Acme Widgets");
        assert_eq!(value["directDeposit"], "yes");
        assert_eq!(value["bank"], "BMO");
        assert_eq!(value["frequency"], "Bi-weekly");
        assert_eq!(value["schedule"]["biweekly"]["anchor"], "2025-10-13");
        assert_eq!(value["lastPaid"], "2025-10-13");
        assert_eq!(value["amount"], 300);
        assert_eq!(value["loanProtection"], true);
        assert_eq!(value["preapprovedMax"], 1000);
        assert_eq!(value["apr"], 47.42);
        assert_eq!(value["funding"], "etransfer");
        // Empty extension is omitted from the payload entirely.
        assert!(value.get("extension").is_none());
    }

    #[test]
    fn test_payload_semi_monthly_shape() {
        let form = ApplicationForm {
            frequency: Some(PayFrequency::SemiMonthly),
            schedule: Some(
                PayScheduleSelection::semi_monthly(
                    DayOfMonth::new(15).unwrap(),
                    DayOfMonth::LAST,
                )
                .unwrap(),
            ),
            ..ApplicationForm::default()
        };

        let value: serde_json::Value =
            serde_json::from_str(&form.to_payload().unwrap()).unwrap();
        assert_eq!(value["frequency"], "Semi-monthly");
        assert_eq!(value["schedule"]["semiMonthly"]["days"][0], 15);
        assert_eq!(value["schedule"]["semiMonthly"]["days"][1], 31);
        assert!(value.get("lastPaid").is_none());
    }
}
