//! Application-wizard state: the step sequencer and per-step selections.
//!
//! The wizard threads an [`ApplicationForm`] accumulator from screen to
//! screen. Step order is a pure lookup over the current step and the
//! chosen pay frequency; the only branch is that semi-monthly and
//! monthly earners skip the last-payday screen.

use chrono::NaiveDate;

use crate::domain::{
    recent_paydays_from, ApplicationForm, Bank, DayOfMonth, DirectDeposit, FundingMethod,
    PayFrequency, PayScheduleSelection, PayWeekday, MIN_LOAN_AMOUNT,
};

/// Screens of the application wizard, in base order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    EmployerInfo,
    DirectDeposit,
    BankSelection,
    IncomeFrequency,
    PaySchedule,
    LastPaid,
    LoanCustomization,
    FundingOptions,
    BankLinking,
    Checkout,
}

const ORDER: [WizardStep; 10] = [
    WizardStep::EmployerInfo,
    WizardStep::DirectDeposit,
    WizardStep::BankSelection,
    WizardStep::IncomeFrequency,
    WizardStep::PaySchedule,
    WizardStep::LastPaid,
    WizardStep::LoanCustomization,
    WizardStep::FundingOptions,
    WizardStep::BankLinking,
    WizardStep::Checkout,
];

fn skips_last_paid(frequency: Option<PayFrequency>) -> bool {
    matches!(
        frequency,
        Some(PayFrequency::SemiMonthly) | Some(PayFrequency::Monthly)
    )
}

/// The step sequence for a given frequency selection.
pub fn sequence(frequency: Option<PayFrequency>) -> Vec<WizardStep> {
    ORDER
        .iter()
        .copied()
        .filter(|step| !(*step == WizardStep::LastPaid && skips_last_paid(frequency)))
        .collect()
}

impl WizardStep {
    /// The step after this one, or `None` past checkout.
    pub fn next(self, frequency: Option<PayFrequency>) -> Option<WizardStep> {
        let seq = sequence(frequency);
        let index = seq.iter().position(|s| *s == self)?;
        seq.get(index + 1).copied()
    }

    /// The step before this one, or `None` back at the first screen.
    pub fn prev(self, frequency: Option<PayFrequency>) -> Option<WizardStep> {
        let seq = sequence(frequency);
        let index = seq.iter().position(|s| *s == self)?;
        index.checked_sub(1).and_then(|i| seq.get(i).copied())
    }

    /// One-based position for the "STEP n OF m" header.
    pub fn position(self, frequency: Option<PayFrequency>) -> usize {
        sequence(frequency)
            .iter()
            .position(|s| *s == self)
            .map(|i| i + 1)
            .unwrap_or(1)
    }

    pub fn total(frequency: Option<PayFrequency>) -> usize {
        sequence(frequency).len()
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::EmployerInfo => "EMPLOYER INFORMATION",
            WizardStep::DirectDeposit => "PAYMENT METHOD",
            WizardStep::BankSelection => "BANK INFORMATION",
            WizardStep::IncomeFrequency => "INCOME FREQUENCY",
            WizardStep::PaySchedule => "PAY SCHEDULE",
            WizardStep::LastPaid => "LAST PAYDAY",
            WizardStep::LoanCustomization => "CUSTOMIZE LINE OF CREDIT",
            WizardStep::FundingOptions => "FUNDING OPTIONS",
            WizardStep::BankLinking => "BANK ACCOUNT INFO",
            WizardStep::Checkout => "CHECK OUT",
        }
    }
}

/// A single-line text input with cursor editing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextField {
    pub value: String,
    pub cursor: usize,
}

impl TextField {
    pub fn insert(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.value.remove(self.cursor - 1);
            self.cursor -= 1;
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.value.len() {
            self.value.remove(self.cursor);
        }
    }

    pub fn left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    pub fn right(&mut self) {
        if self.cursor < self.value.len() {
            self.cursor += 1;
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.value.len();
    }

    pub fn is_empty(&self) -> bool {
        self.value.trim().is_empty()
    }
}

/// FAQ entries on the bank-linking screen.
pub const BANK_LINKING_FAQS: [(&str, &str); 3] = [
    (
        "Is Flinks secure?",
        "Yes, Flinks uses bank-level encryption and security standards. Your data is \
         protected with the same 256-bit encryption that Canadian banks use.",
    ),
    (
        "Is my data private?",
        "Absolutely. Flinks never stores or shares your banking credentials. We only \
         receive read-only access to verify your account and transactions. Your login \
         details remain completely private.",
    ),
    (
        "How does it work?",
        "Flinks securely connects to your bank using your credentials. It retrieves the \
         information we need to verify your account and income, then the connection is \
         closed. The entire process takes just a few minutes.",
    ),
];

/// Sample first-payment terms shown on the checkout screen.
pub const FIRST_PAYMENT_DATE: &str = "Apr 03";
pub const FIRST_PAYMENT_AMOUNT: f64 = 30.16;

/// Mutable state of the in-flight application.
#[derive(Debug, Clone, PartialEq)]
pub struct WizardState {
    pub step: WizardStep,
    pub form: ApplicationForm,
    /// Serialized payload once the application has been submitted.
    pub done: Option<String>,
    /// List/grid cursor for the current step.
    pub cursor: usize,
    pub employer_name: TextField,
    pub employer_phone: TextField,
    pub extension: TextField,
    pub employer_focus: usize,
    pub weekday: Option<PayWeekday>,
    pub semi_days: Vec<DayOfMonth>,
    pub monthly_day: Option<DayOfMonth>,
    pub recent_dates: Vec<NaiveDate>,
    pub last_paid: Option<NaiveDate>,
    pub amount: u32,
    pub loan_protection: bool,
    pub funding_error: bool,
    pub faq_open: Option<usize>,
    pub consent: bool,
}

impl Default for WizardState {
    fn default() -> Self {
        Self {
            step: WizardStep::EmployerInfo,
            form: ApplicationForm::default(),
            done: None,
            cursor: 0,
            employer_name: TextField::default(),
            employer_phone: TextField::default(),
            extension: TextField::default(),
            employer_focus: 0,
            weekday: None,
            semi_days: Vec::new(),
            monthly_day: None,
            recent_dates: Vec::new(),
            last_paid: None,
            amount: 0,
            loan_protection: false,
            funding_error: false,
            faq_open: None,
            consent: false,
        }
    }
}

impl WizardState {
    /// Number of selectable items on the current step, for cursor
    /// clamping.
    pub fn cursor_limit(&self) -> usize {
        match self.step {
            WizardStep::EmployerInfo => 3,
            WizardStep::DirectDeposit => DirectDeposit::ALL.len(),
            WizardStep::BankSelection => Bank::ALL.len(),
            WizardStep::IncomeFrequency => PayFrequency::ALL.len(),
            WizardStep::PaySchedule => match self.form.frequency {
                Some(f) if f.uses_weekday() => PayWeekday::ALL.len(),
                _ => 31,
            },
            WizardStep::LastPaid => self.recent_dates.len(),
            WizardStep::LoanCustomization => 1,
            WizardStep::FundingOptions => 2,
            WizardStep::BankLinking => BANK_LINKING_FAQS.len(),
            WizardStep::Checkout => 1,
        }
    }

    /// Moves the step cursor by `delta`, clamping at the edges.
    pub fn move_cursor(&mut self, delta: isize) {
        let limit = self.cursor_limit();
        if limit == 0 {
            return;
        }
        let moved = self.cursor as isize + delta;
        self.cursor = moved.clamp(0, limit as isize - 1) as usize;
    }

    pub fn active_field(&mut self) -> &mut TextField {
        match self.employer_focus {
            0 => &mut self.employer_name,
            1 => &mut self.employer_phone,
            _ => &mut self.extension,
        }
    }

    /// Acts on the item under the cursor for the current step.
    pub fn select(&mut self) {
        match self.step {
            WizardStep::EmployerInfo => {}
            WizardStep::DirectDeposit => {
                self.form.direct_deposit = DirectDeposit::ALL.get(self.cursor).copied();
            }
            WizardStep::BankSelection => {
                self.form.bank = Bank::ALL.get(self.cursor).copied();
            }
            WizardStep::IncomeFrequency => {
                if let Some(frequency) = PayFrequency::ALL.get(self.cursor).copied() {
                    self.set_frequency(frequency);
                }
            }
            WizardStep::PaySchedule => match self.form.frequency {
                Some(f) if f.uses_weekday() => {
                    self.weekday = PayWeekday::ALL.get(self.cursor).copied();
                    // A new weekday invalidates a previously chosen payday.
                    self.last_paid = None;
                }
                Some(PayFrequency::SemiMonthly) => {
                    if let Some(day) = day_at(self.cursor) {
                        self.toggle_semi_day(day);
                    }
                }
                Some(PayFrequency::Monthly) => {
                    self.monthly_day = day_at(self.cursor);
                }
                _ => {}
            },
            WizardStep::LastPaid => {
                self.last_paid = self.recent_dates.get(self.cursor).copied();
            }
            WizardStep::LoanCustomization => {
                self.loan_protection = !self.loan_protection;
            }
            WizardStep::FundingOptions => {
                match self.cursor {
                    0 => {
                        self.form.funding = Some(FundingMethod::ETransfer);
                        // Same-day funding is a bundle feature.
                        self.form.bundle = true;
                    }
                    _ => self.form.funding = Some(FundingMethod::DirectDeposit),
                }
                self.funding_error = false;
            }
            WizardStep::BankLinking => {
                self.faq_open = if self.faq_open == Some(self.cursor) {
                    None
                } else {
                    Some(self.cursor)
                };
            }
            WizardStep::Checkout => {
                self.consent = !self.consent;
            }
        }
    }

    /// Switching frequency resets every schedule-dependent selection.
    pub fn set_frequency(&mut self, frequency: PayFrequency) {
        if self.form.frequency == Some(frequency) {
            return;
        }
        self.form.frequency = Some(frequency);
        self.form.schedule = None;
        self.form.last_paid = None;
        self.weekday = None;
        self.semi_days.clear();
        self.monthly_day = None;
        self.last_paid = None;
        self.recent_dates.clear();
    }

    /// Toggles a semi-monthly day tile: deselects an already-chosen day,
    /// otherwise adds it unless two are already chosen.
    pub fn toggle_semi_day(&mut self, day: DayOfMonth) {
        if let Some(index) = self.semi_days.iter().position(|d| *d == day) {
            self.semi_days.remove(index);
        } else if self.semi_days.len() < 2 {
            self.semi_days.push(day);
        }
    }

    /// Clearing the bundle also clears an e-Transfer funding choice,
    /// since same-day funding requires the bundle.
    pub fn toggle_bundle(&mut self) {
        self.form.bundle = !self.form.bundle;
        if !self.form.bundle {
            self.form.funding = None;
        }
    }

    /// Whether the current step's required selections are complete.
    pub fn step_complete(&self) -> bool {
        match self.step {
            WizardStep::EmployerInfo => {
                !self.employer_name.is_empty() && !self.employer_phone.is_empty()
            }
            WizardStep::DirectDeposit => self.form.direct_deposit.is_some(),
            WizardStep::BankSelection => self.form.bank.is_some(),
            WizardStep::IncomeFrequency => self.form.frequency.is_some(),
            WizardStep::PaySchedule => match self.form.frequency {
                Some(PayFrequency::Weekly) | Some(PayFrequency::Biweekly) => {
                    self.weekday.is_some()
                }
                Some(PayFrequency::SemiMonthly) => self.semi_days.len() == 2,
                Some(PayFrequency::Monthly) => self.monthly_day.is_some(),
                None => false,
            },
            WizardStep::LastPaid => self.last_paid.is_some(),
            WizardStep::LoanCustomization => {
                self.amount >= MIN_LOAN_AMOUNT && self.amount <= self.form.preapproved_max
            }
            WizardStep::FundingOptions => self.form.funding.is_some(),
            WizardStep::BankLinking => true,
            WizardStep::Checkout => self.consent,
        }
    }

    /// Commits the current step into the form and advances. Returns
    /// `true` when the wizard moved (or finished).
    pub fn continue_step(&mut self, today: NaiveDate) -> bool {
        if !self.step_complete() {
            if self.step == WizardStep::FundingOptions {
                self.funding_error = true;
            }
            return false;
        }

        match self.step {
            WizardStep::EmployerInfo => {
                self.form.employer_name = self.employer_name.value.trim().to_string();
                self.form.employer_phone = self.employer_phone.value.trim().to_string();
                self.form.extension = self.extension.value.trim().to_string();
            }
            WizardStep::PaySchedule => match self.form.frequency {
                Some(PayFrequency::SemiMonthly) => {
                    if let (Some(first), Some(second)) =
                        (self.semi_days.first().copied(), self.semi_days.get(1).copied())
                    {
                        match PayScheduleSelection::semi_monthly(first, second) {
                            Ok(schedule) => self.form.schedule = Some(schedule),
                            Err(_) => return false,
                        }
                    }
                }
                Some(PayFrequency::Monthly) => {
                    if let Some(day) = self.monthly_day {
                        self.form.schedule = Some(PayScheduleSelection::monthly(day));
                    }
                }
                _ => {}
            },
            WizardStep::LastPaid => {
                if let (Some(weekday), Some(anchor), Some(frequency)) =
                    (self.weekday, self.last_paid, self.form.frequency)
                {
                    let schedule = match frequency {
                        PayFrequency::Weekly => {
                            PayScheduleSelection::weekly(weekday, anchor, today)
                        }
                        _ => PayScheduleSelection::biweekly(weekday, anchor, today),
                    };
                    match schedule {
                        Ok(schedule) => {
                            self.form.schedule = Some(schedule);
                            self.form.last_paid = Some(anchor);
                        }
                        Err(_) => return false,
                    }
                }
            }
            WizardStep::LoanCustomization => {
                self.form.amount = self.amount;
                self.form.loan_protection = self.loan_protection;
            }
            WizardStep::Checkout => {
                self.form.consent = true;
                self.done = self.form.to_payload().ok();
                return true;
            }
            _ => {}
        }

        match self.step.next(self.form.frequency) {
            Some(next) => {
                self.enter(next, today);
                true
            }
            None => false,
        }
    }

    /// Steps back one screen. Returns `false` from the first screen,
    /// meaning the wizard should exit to the landing page.
    pub fn back(&mut self, today: NaiveDate) -> bool {
        self.funding_error = false;
        match self.step.prev(self.form.frequency) {
            Some(prev) => {
                self.enter(prev, today);
                true
            }
            None => false,
        }
    }

    fn enter(&mut self, step: WizardStep, today: NaiveDate) {
        self.step = step;
        self.cursor = 0;
        match step {
            WizardStep::LastPaid => {
                if let Some(weekday) = self.weekday {
                    self.recent_dates = recent_paydays_from(today, weekday, 2);
                }
            }
            WizardStep::LoanCustomization => {
                if self.amount == 0 {
                    self.amount = self.form.preapproved_max;
                }
            }
            _ => {}
        }
    }
}

fn day_at(cursor: usize) -> Option<DayOfMonth> {
    if cursor == 30 {
        Some(DayOfMonth::LAST)
    } else {
        DayOfMonth::new(cursor as u8 + 1).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        // A Wednesday.
        NaiveDate::from_ymd_opt(2025, 10, 15).unwrap()
    }

    #[test]
    fn test_sequence_includes_last_paid_for_weekday_frequencies() {
        for frequency in [None, Some(PayFrequency::Weekly), Some(PayFrequency::Biweekly)] {
            let seq = sequence(frequency);
            assert_eq!(seq.len(), 10);
            assert!(seq.contains(&WizardStep::LastPaid));
        }
    }

    #[test]
    fn test_sequence_skips_last_paid_for_date_frequencies() {
        for frequency in [Some(PayFrequency::SemiMonthly), Some(PayFrequency::Monthly)] {
            let seq = sequence(frequency);
            assert_eq!(seq.len(), 9);
            assert!(!seq.contains(&WizardStep::LastPaid));
        }
    }

    #[test]
    fn test_next_branches_on_frequency() {
        assert_eq!(
            WizardStep::PaySchedule.next(Some(PayFrequency::Biweekly)),
            Some(WizardStep::LastPaid)
        );
        assert_eq!(
            WizardStep::PaySchedule.next(Some(PayFrequency::SemiMonthly)),
            Some(WizardStep::LoanCustomization)
        );
        assert_eq!(
            WizardStep::PaySchedule.next(Some(PayFrequency::Monthly)),
            Some(WizardStep::LoanCustomization)
        );
    }

    #[test]
    fn test_prev_branches_on_frequency() {
        assert_eq!(
            WizardStep::LoanCustomization.prev(Some(PayFrequency::Weekly)),
            Some(WizardStep::LastPaid)
        );
        assert_eq!(
            WizardStep::LoanCustomization.prev(Some(PayFrequency::Monthly)),
            Some(WizardStep::PaySchedule)
        );
        assert_eq!(WizardStep::EmployerInfo.prev(None), None);
        assert_eq!(WizardStep::Checkout.next(Some(PayFrequency::Weekly)), None);
    }

    #[test]
    fn test_position_and_total_reflect_skip() {
        assert_eq!(WizardStep::Checkout.position(Some(PayFrequency::Biweekly)), 10);
        assert_eq!(WizardStep::total(Some(PayFrequency::Biweekly)), 10);
        assert_eq!(WizardStep::Checkout.position(Some(PayFrequency::Monthly)), 9);
        assert_eq!(WizardStep::total(Some(PayFrequency::Monthly)), 9);
        assert_eq!(WizardStep::EmployerInfo.position(None), 1);
    }

    #[test]
    fn test_text_field_editing() {
        let mut field = TextField::default();
        for c in "Acme".chars() {
            field.insert(c);
        }
        assert_eq!(field.value, "Acme");
        assert_eq!(field.cursor, 4);

        field.left();
        field.left();
        field.insert('m');
        assert_eq!(field.value, "Acmme");

        field.backspace();
        assert_eq!(field.value, "Acme");
        field.home();
        field.delete();
        assert_eq!(field.value, "cme");
        field.end();
        assert_eq!(field.cursor, 3);
    }

    #[test]
    fn test_employer_step_requires_name_and_phone() {
        let mut wizard = WizardState::default();
        assert!(!wizard.step_complete());
        assert!(!wizard.continue_step(today()));

        for c in "Acme Widgets".chars() {
            wizard.employer_name.insert(c);
        }
        assert!(!wizard.step_complete());

        wizard.employer_focus = 1;
        for c in "(555) 123-4567".chars() {
            wizard.active_field().insert(c);
        }
        assert!(wizard.step_complete());
        assert!(wizard.continue_step(today()));
        assert_eq!(wizard.step, WizardStep::DirectDeposit);
        assert_eq!(wizard.form.employer_name, "Acme Widgets");
        assert_eq!(wizard.form.employer_phone, "(555) 123-4567");
    }

    #[test]
    fn test_whitespace_only_name_is_incomplete() {
        let mut wizard = WizardState::default();
        wizard.employer_name.insert(' ');
        wizard.employer_phone.insert('5');
        assert!(!wizard.step_complete());
    }

    fn wizard_at_frequency_step() -> WizardState {
        let mut wizard = WizardState::default();
        for c in "Acme".chars() {
            wizard.employer_name.insert(c);
        }
        wizard.employer_focus = 1;
        for c in "555".chars() {
            wizard.active_field().insert(c);
        }
        assert!(wizard.continue_step(today()));
        wizard.select(); // direct deposit: Yes
        assert!(wizard.continue_step(today()));
        wizard.cursor = 3; // BMO
        wizard.select();
        assert!(wizard.continue_step(today()));
        assert_eq!(wizard.step, WizardStep::IncomeFrequency);
        wizard
    }

    #[test]
    fn test_biweekly_flow_builds_anchored_schedule() {
        let mut wizard = wizard_at_frequency_step();
        wizard.cursor = 1; // Bi-weekly
        wizard.select();
        assert!(wizard.continue_step(today()));
        assert_eq!(wizard.step, WizardStep::PaySchedule);

        wizard.cursor = 0; // Monday
        wizard.select();
        assert!(wizard.continue_step(today()));
        assert_eq!(wizard.step, WizardStep::LastPaid);
        assert_eq!(
            wizard.recent_dates,
            vec![
                NaiveDate::from_ymd_opt(2025, 10, 13).unwrap(),
                NaiveDate::from_ymd_opt(2025, 10, 6).unwrap(),
            ]
        );

        wizard.cursor = 1;
        wizard.select();
        assert!(wizard.continue_step(today()));
        assert_eq!(wizard.step, WizardStep::LoanCustomization);
        assert_eq!(
            wizard.form.schedule,
            Some(PayScheduleSelection::Biweekly {
                anchor: NaiveDate::from_ymd_opt(2025, 10, 6).unwrap(),
            })
        );
        assert_eq!(
            wizard.form.last_paid,
            Some(NaiveDate::from_ymd_opt(2025, 10, 6).unwrap())
        );
        // Amount defaults to the pre-approved maximum on entry.
        assert_eq!(wizard.amount, 1000);
    }

    #[test]
    fn test_semi_monthly_flow_skips_last_paid() {
        let mut wizard = wizard_at_frequency_step();
        wizard.cursor = 2; // Semi-monthly
        wizard.select();
        assert!(wizard.continue_step(today()));
        assert_eq!(wizard.step, WizardStep::PaySchedule);

        wizard.cursor = 14; // day 15
        wizard.select();
        assert!(!wizard.step_complete());
        wizard.cursor = 30; // 31 / Last day
        wizard.select();
        assert!(wizard.step_complete());
        assert!(wizard.continue_step(today()));
        assert_eq!(wizard.step, WizardStep::LoanCustomization);
        assert_eq!(
            wizard.form.schedule,
            Some(PayScheduleSelection::SemiMonthly {
                days: [DayOfMonth::new(15).unwrap(), DayOfMonth::LAST],
            })
        );
    }

    #[test]
    fn test_semi_day_toggle_limits_to_two() {
        let mut wizard = WizardState::default();
        let d1 = DayOfMonth::new(1).unwrap();
        let d15 = DayOfMonth::new(15).unwrap();
        let d20 = DayOfMonth::new(20).unwrap();

        wizard.toggle_semi_day(d1);
        wizard.toggle_semi_day(d15);
        wizard.toggle_semi_day(d20); // ignored, two already chosen
        assert_eq!(wizard.semi_days, vec![d1, d15]);

        wizard.toggle_semi_day(d1); // deselect
        assert_eq!(wizard.semi_days, vec![d15]);
        wizard.toggle_semi_day(d20);
        assert_eq!(wizard.semi_days, vec![d15, d20]);
    }

    #[test]
    fn test_changing_frequency_resets_schedule_state() {
        let mut wizard = wizard_at_frequency_step();
        wizard.cursor = 1; // Bi-weekly
        wizard.select();
        assert!(wizard.continue_step(today()));
        wizard.cursor = 2; // Wednesday
        wizard.select();
        assert!(wizard.weekday.is_some());

        // Go back and switch to monthly.
        assert!(wizard.back(today()));
        assert_eq!(wizard.step, WizardStep::IncomeFrequency);
        wizard.cursor = 3;
        wizard.select();
        assert!(wizard.weekday.is_none());
        assert!(wizard.form.schedule.is_none());
        assert_eq!(wizard.form.frequency, Some(PayFrequency::Monthly));
    }

    #[test]
    fn test_reselecting_same_frequency_keeps_state() {
        let mut wizard = wizard_at_frequency_step();
        wizard.cursor = 1;
        wizard.select();
        assert!(wizard.continue_step(today()));
        wizard.cursor = 2;
        wizard.select();

        assert!(wizard.back(today()));
        wizard.cursor = 1;
        wizard.select();
        assert_eq!(wizard.weekday, Some(PayWeekday::Wednesday));
    }

    #[test]
    fn test_funding_requires_method_and_couples_bundle() {
        let mut wizard = WizardState::default();
        wizard.step = WizardStep::FundingOptions;

        assert!(!wizard.continue_step(today()));
        assert!(wizard.funding_error);

        wizard.cursor = 0;
        wizard.select();
        assert_eq!(wizard.form.funding, Some(FundingMethod::ETransfer));
        assert!(wizard.form.bundle);
        assert!(!wizard.funding_error);

        // Removing the bundle clears the same-day method.
        wizard.toggle_bundle();
        assert!(!wizard.form.bundle);
        assert!(wizard.form.funding.is_none());

        wizard.cursor = 1;
        wizard.select();
        assert_eq!(wizard.form.funding, Some(FundingMethod::DirectDeposit));
        assert!(!wizard.form.bundle);
        assert!(wizard.continue_step(today()));
        assert_eq!(wizard.step, WizardStep::BankLinking);
    }

    #[test]
    fn test_faq_toggle() {
        let mut wizard = WizardState::default();
        wizard.step = WizardStep::BankLinking;
        wizard.cursor = 1;
        wizard.select();
        assert_eq!(wizard.faq_open, Some(1));
        wizard.select();
        assert_eq!(wizard.faq_open, None);
    }

    #[test]
    fn test_checkout_requires_consent_and_produces_payload() {
        let mut wizard = WizardState::default();
        wizard.step = WizardStep::Checkout;
        wizard.form.amount = 300;
        wizard.form.funding = Some(FundingMethod::ETransfer);

        assert!(!wizard.continue_step(today()));
        assert!(wizard.done.is_none());

        wizard.select(); // consent
        assert!(wizard.continue_step(today()));
        let payload = wizard.done.clone().unwrap();
        let value: serde_json::Value = serde_json::from_str(&payload).unwrap();
        assert_eq!(value["amount"], 300);
        assert_eq!(value["consent"], true);
    }

    #[test]
    fn test_back_from_first_step_exits() {
        let mut wizard = WizardState::default();
        assert!(!wizard.back(today()));
    }

    #[test]
    fn test_cursor_clamps_to_step_limit() {
        let mut wizard = WizardState::default();
        wizard.step = WizardStep::BankSelection;
        wizard.move_cursor(100);
        assert_eq!(wizard.cursor, Bank::ALL.len() - 1);
        wizard.move_cursor(-100);
        assert_eq!(wizard.cursor, 0);
    }
}
