//! Core account, activity, and document models for the customer portal.
//!
//! All figures are the product's sample values; there is no ledger or
//! servicing engine behind them.

use chrono::{Days, NaiveDate};
use serde::Serialize;

use super::errors::{DomainError, DomainResult};

/// Minimum payment shown while the upcoming payment is available.
pub const MINIMUM_PAYMENT: f64 = 125.50;
/// Full payoff estimate used by the pay-in-full flow.
pub const ESTIMATED_PAYOFF: f64 = 2340.50;
pub const NEXT_STATEMENT_DATE: &str = "Oct 13, 2025";
pub const NEXT_MINIMUM_DATE: &str = "Oct 20, 2025";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountStatus {
    Active,
    Frozen,
}

/// The member's line-of-credit position.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub principal_balance: f64,
    pub credit_limit: f64,
    /// Available credit before this session's pending draws are deducted.
    pub base_available: f64,
    /// Excludes principal payments made within the last 7 days.
    pub pending_balance: f64,
    /// Per-draw ceiling, in whole dollars.
    pub draw_ceiling: u32,
    pub status: AccountStatus,
}

impl Default for Account {
    fn default() -> Self {
        Self {
            principal_balance: 2000.0,
            credit_limit: 5000.0,
            base_available: 3000.0,
            pending_balance: 200.0,
            draw_ceiling: 2800,
            status: AccountStatus::Active,
        }
    }
}

impl Account {
    /// Available credit after deducting draws submitted this session.
    pub fn available_credit(&self, total_drawn: u32) -> f64 {
        self.base_available - total_drawn as f64
    }

    /// Checks a requested draw against the account state. The range is
    /// $1 up to the draw ceiling.
    pub fn validate_draw(&self, amount: u32) -> DomainResult<()> {
        if self.status == AccountStatus::Frozen {
            return Err(DomainError::AccountFrozen);
        }
        if amount < 1 || amount > self.draw_ceiling {
            return Err(DomainError::AmountOutOfRange {
                amount,
                min: 1,
                max: self.draw_ceiling,
            });
        }
        Ok(())
    }
}

/// State of the next scheduled payment. Replaces the string states of
/// the source mockups with an exhaustive union; `Adjusted` carries the
/// extra principal that was added.
#[derive(Debug, Clone, PartialEq)]
pub enum UpcomingPayment {
    Pending,
    Available,
    Adjusted { extra: f64 },
    PayoffScheduled,
}

impl UpcomingPayment {
    /// Amount due, if a statement has been issued.
    pub fn total(&self) -> Option<f64> {
        match self {
            UpcomingPayment::Pending => None,
            UpcomingPayment::Available => Some(MINIMUM_PAYMENT),
            UpcomingPayment::Adjusted { extra } => Some(MINIMUM_PAYMENT + extra),
            UpcomingPayment::PayoffScheduled => Some(ESTIMATED_PAYOFF),
        }
    }

    /// Label on the payment call-to-action.
    pub fn action_label(&self) -> Option<&'static str> {
        match self {
            UpcomingPayment::Pending => None,
            UpcomingPayment::Available => Some("Make a Payment"),
            UpcomingPayment::Adjusted { .. } => Some("Make Payment"),
            UpcomingPayment::PayoffScheduled => Some("Make Full Payment"),
        }
    }

    /// Dev-only control cycling through the four states, standing in for
    /// the state the servicing backend would report.
    pub fn cycled(&self) -> Self {
        match self {
            UpcomingPayment::Pending => UpcomingPayment::Available,
            UpcomingPayment::Available => UpcomingPayment::Adjusted { extra: 50.0 },
            UpcomingPayment::Adjusted { .. } => UpcomingPayment::PayoffScheduled,
            UpcomingPayment::PayoffScheduled => UpcomingPayment::Pending,
        }
    }
}

/// How funds move for a draw or loan disbursement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FundingMethod {
    #[serde(rename = "etransfer")]
    ETransfer,
    #[serde(rename = "deposit")]
    DirectDeposit,
}

impl FundingMethod {
    pub fn label(self) -> &'static str {
        match self {
            FundingMethod::ETransfer => "Interac e-Transfer",
            FundingMethod::DirectDeposit => "Direct Deposit",
        }
    }

    pub fn delivery(self) -> &'static str {
        match self {
            FundingMethod::ETransfer => "Same day",
            FundingMethod::DirectDeposit => "1-3 business days",
        }
    }

    /// Estimated arrival for funds requested today: e-Transfers land the
    /// same day, deposits at the outside of the 1-3 business-day window.
    pub fn estimated_arrival(self, today: NaiveDate) -> NaiveDate {
        match self {
            FundingMethod::ETransfer => today,
            FundingMethod::DirectDeposit => {
                today.checked_add_days(Days::new(3)).unwrap_or(today)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ActivityKind {
    Payment { principal: f64, interest: f64, fees: f64 },
    Draw,
    PendingDraw,
}

/// One row of the recent-activity ledger. Payments carry positive
/// amounts, draws negative.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    pub date: NaiveDate,
    pub amount: f64,
    pub method: String,
    pub reference: String,
    pub kind: ActivityKind,
}

impl ActivityEntry {
    pub fn type_label(&self) -> &'static str {
        match self.kind {
            ActivityKind::Payment { .. } => "Payment",
            ActivityKind::Draw => "Draw",
            ActivityKind::PendingDraw => "Pending draw",
        }
    }

    pub fn is_payment(&self) -> bool {
        matches!(self.kind, ActivityKind::Payment { .. })
    }
}

fn payment(date: NaiveDate, principal: f64, interest: f64, reference: &str) -> ActivityEntry {
    ActivityEntry {
        date,
        amount: 420.0,
        method: "PAD".to_string(),
        reference: reference.to_string(),
        kind: ActivityKind::Payment {
            principal,
            interest,
            fees: 20.0,
        },
    }
}

/// The sample recent-activity ledger: three PAD payments and one
/// e-Transfer draw.
pub fn sample_activity() -> Vec<ActivityEntry> {
    let mut entries = Vec::new();
    if let Some(date) = NaiveDate::from_ymd_opt(2025, 9, 20) {
        entries.push(payment(date, 140.0, 260.0, "9F2-K7T"));
    }
    if let Some(date) = NaiveDate::from_ymd_opt(2025, 8, 20) {
        entries.push(payment(date, 135.0, 265.0, "2HJ-43Q"));
    }
    if let Some(date) = NaiveDate::from_ymd_opt(2025, 7, 20) {
        entries.push(payment(date, 130.0, 270.0, "8PL-99A"));
    }
    if let Some(date) = NaiveDate::from_ymd_opt(2025, 7, 20) {
        entries.push(ActivityEntry {
            date,
            amount: -420.0,
            method: "Interac e-Transfer".to_string(),
            reference: "ETR-771".to_string(),
            kind: ActivityKind::Draw,
        });
    }
    entries
}

/// One row of the full payment-history table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentRow {
    pub date: NaiveDate,
    pub total: f64,
    pub principal: f64,
    pub interest: f64,
    pub fees: f64,
}

/// Twelve months of sample history, one payment on the 20th of each
/// month of 2025.
pub fn payment_history() -> Vec<PaymentRow> {
    (0..12u32)
        .filter_map(|i| {
            let date = NaiveDate::from_ymd_opt(2025, i + 1, 20)?;
            Some(PaymentRow {
                date,
                total: 120.0 + i as f64,
                principal: 35.0 + i as f64,
                interest: 75.25,
                fees: 15.00,
            })
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementStatus {
    Current,
    Available,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub month: &'static str,
    pub issued: &'static str,
    pub amount: f64,
    pub status: StatementStatus,
}

pub fn sample_statements() -> Vec<Statement> {
    vec![
        Statement { month: "Sep 2025", issued: "Sep 20, 2025", amount: 420.0, status: StatementStatus::Current },
        Statement { month: "Aug 2025", issued: "Aug 20, 2025", amount: 420.0, status: StatementStatus::Available },
        Statement { month: "Jul 2025", issued: "Jul 20, 2025", amount: 420.0, status: StatementStatus::Available },
        Statement { month: "Jun 2025", issued: "Jun 20, 2025", amount: 420.0, status: StatementStatus::Available },
    ]
}

#[derive(Debug, Clone, PartialEq)]
pub struct Agreement {
    pub name: &'static str,
    pub signed: &'static str,
}

pub fn sample_agreements() -> Vec<Agreement> {
    vec![
        Agreement { name: "Line of Credit Agreement", signed: "Jan 15, 2025" },
        Agreement { name: "Loan Protection Agreement", signed: "Jan 15, 2025" },
    ]
}

/// Formats a CAD amount with cents, e.g. `-420.0` as `-$420.00`.
pub fn format_cad(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let formatted = format!("${}.{:02}", group_thousands(cents / 100), cents % 100);
    if amount < 0.0 {
        format!("-{}", formatted)
    } else {
        formatted
    }
}

/// Formats a whole-dollar CAD amount, e.g. `2800` as `$2,800`.
pub fn format_cad_whole(amount: u32) -> String {
    format!("${}", group_thousands(amount as u64))
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// "Sep 20, 2025" style date used by lists and receipts.
pub fn medium_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// "Wednesday, October 15" style date used for arrival estimates.
pub fn long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_formatting() {
        assert_eq!(format_cad(2000.0), "$2,000.00");
        assert_eq!(format_cad(125.5), "$125.50");
        assert_eq!(format_cad(-420.0), "-$420.00");
        assert_eq!(format_cad(2340.50), "$2,340.50");
        assert_eq!(format_cad(0.0), "$0.00");
        assert_eq!(format_cad(1234567.89), "$1,234,567.89");

        assert_eq!(format_cad_whole(2800), "$2,800");
        assert_eq!(format_cad_whole(5), "$5");
        assert_eq!(format_cad_whole(1000000), "$1,000,000");
    }

    #[test]
    fn test_date_formatting() {
        let date = NaiveDate::from_ymd_opt(2025, 9, 20).unwrap();
        assert_eq!(medium_date(date), "Sep 20, 2025");

        let date = NaiveDate::from_ymd_opt(2025, 10, 15).unwrap();
        assert_eq!(long_date(date), "Wednesday, October 15");
    }

    #[test]
    fn test_available_credit_deducts_session_draws() {
        let account = Account::default();
        assert_eq!(account.available_credit(0), 3000.0);
        assert_eq!(account.available_credit(500), 2500.0);
    }

    #[test]
    fn test_validate_draw_range() {
        let account = Account::default();
        assert!(account.validate_draw(1).is_ok());
        assert!(account.validate_draw(2800).is_ok());
        assert_eq!(
            account.validate_draw(0),
            Err(DomainError::AmountOutOfRange { amount: 0, min: 1, max: 2800 })
        );
        assert_eq!(
            account.validate_draw(2801),
            Err(DomainError::AmountOutOfRange { amount: 2801, min: 1, max: 2800 })
        );
    }

    #[test]
    fn test_validate_draw_frozen_account() {
        let mut account = Account::default();
        account.status = AccountStatus::Frozen;
        assert_eq!(account.validate_draw(100), Err(DomainError::AccountFrozen));
    }

    #[test]
    fn test_upcoming_payment_totals() {
        assert_eq!(UpcomingPayment::Pending.total(), None);
        assert_eq!(UpcomingPayment::Available.total(), Some(125.50));
        assert_eq!(
            UpcomingPayment::Adjusted { extra: 50.0 }.total(),
            Some(175.50)
        );
        assert_eq!(UpcomingPayment::PayoffScheduled.total(), Some(2340.50));
    }

    #[test]
    fn test_upcoming_payment_cycle_visits_all_states() {
        let mut state = UpcomingPayment::Pending;
        let mut seen = Vec::new();
        for _ in 0..4 {
            state = state.cycled();
            seen.push(state.clone());
        }
        assert_eq!(seen.last(), Some(&UpcomingPayment::Pending));
        assert!(seen.contains(&UpcomingPayment::Available));
        assert!(seen.contains(&UpcomingPayment::Adjusted { extra: 50.0 }));
        assert!(seen.contains(&UpcomingPayment::PayoffScheduled));
    }

    #[test]
    fn test_funding_method_arrival_estimates() {
        let today = NaiveDate::from_ymd_opt(2025, 10, 15).unwrap();
        assert_eq!(FundingMethod::ETransfer.estimated_arrival(today), today);
        assert_eq!(
            FundingMethod::DirectDeposit.estimated_arrival(today),
            NaiveDate::from_ymd_opt(2025, 10, 18).unwrap()
        );
    }

    #[test]
    fn test_sample_activity_shape() {
        let activity = sample_activity();
        assert_eq!(activity.len(), 4);
        assert!(activity[0].is_payment());
        assert_eq!(activity[0].amount, 420.0);
        assert_eq!(activity[3].amount, -420.0);
        assert_eq!(activity[3].type_label(), "Draw");
    }

    #[test]
    fn test_payment_history_shape() {
        let history = payment_history();
        assert_eq!(history.len(), 12);
        assert_eq!(history[0].total, 120.0);
        assert_eq!(history[11].total, 131.0);
        assert_eq!(history[0].principal, 35.0);
        for (i, row) in history.iter().enumerate() {
            assert_eq!(row.date.to_string(), format!("2025-{:02}-20", i + 1));
            assert_eq!(row.interest, 75.25);
            assert_eq!(row.fees, 15.00);
        }
    }
}
