//! Application state for the terminal line-of-credit client.
//!
//! Holds the top-level view, the customer-portal state (balances, draw
//! flow, documents), and the wizard state, plus the simulated draw
//! gateway. All transitions happen synchronously in response to key
//! events; the only time-driven behavior is the draw submission delay,
//! checked on each tick.

use std::time::{Duration, Instant};

use chrono::{Local, NaiveDate};

use crate::domain::{
    format_cad, format_cad_whole, payment_history, sample_activity, sample_agreements,
    sample_statements, Account, ActivityEntry, ActivityKind, Agreement, DomainError,
    FundingMethod, PaymentRow, Statement, UpcomingPayment, MIN_LOAN_AMOUNT,
};
use crate::infrastructure::{history_filename, receipt_filename, ExportService};

use super::wizard::WizardState;

pub const MAILING_ADDRESS: &str = "123 Main St, Toronto, ON M1A 1A1";

/// Which top-level surface is mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Landing,
    Portal,
    Wizard,
}

/// Pages of the customer portal. The first four are tab-bar entries;
/// payment history is reached from the home page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortalPage {
    Home,
    Draw,
    Docs,
    More,
    Payments,
}

/// State of the extra-principal popup.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtraPrincipalState {
    pub amount: u32,
    pub statement_issued: bool,
}

/// State of the pay-in-full popup.
#[derive(Debug, Clone, PartialEq)]
pub struct PayInFullState {
    pub statement_issued: bool,
    pub confirm: bool,
}

/// State of the statement-delivery settings popup.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryState {
    pub mail_enabled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PortalModal {
    Receipt(ActivityEntry),
    ExtraPrincipal(ExtraPrincipalState),
    PayInFull(PayInFullState),
    Delivery(DeliveryState),
}

/// Copy explaining when a scheduled change takes effect, depending on
/// whether the statement for the cycle has already gone out.
pub fn applies_text(statement_issued: bool, next_minimum_date: &str) -> String {
    if statement_issued {
        "Statement already delivered — this will be applied to the following cycle."
            .to_string()
    } else {
        format!(
            "This will be applied to your next scheduled payment on {}.",
            next_minimum_date
        )
    }
}

/// Phases of the three-step draw flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawPhase {
    Amount,
    Method,
    Review,
    Processing,
    Success,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawState {
    pub phase: DrawPhase,
    /// Requested amount in whole dollars; 0 means nothing entered yet.
    pub amount: u32,
    pub method: FundingMethod,
    pub interac_eligible: bool,
    pub receipt: Option<DrawReceipt>,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            phase: DrawPhase::Amount,
            amount: 0,
            method: FundingMethod::DirectDeposit,
            interac_eligible: true,
            receipt: None,
        }
    }
}

/// The quick-select chips on the draw amount screen.
pub fn quick_amounts(ceiling: u32) -> [(&'static str, u32); 4] {
    [
        ("25%", (ceiling as f64 * 0.25).round() as u32),
        ("50%", (ceiling as f64 * 0.50).round() as u32),
        ("75%", (ceiling as f64 * 0.75).round() as u32),
        ("Max", ceiling),
    ]
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawRequest {
    pub amount: u32,
    pub method: FundingMethod,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawReceipt {
    pub reference: String,
    pub amount: u32,
    pub method: FundingMethod,
    pub submitted_at: Instant,
}

/// The draw submission backend. The production implementation fakes a
/// fixed network delay; tests swap in an instant one.
pub trait DrawGateway: std::fmt::Debug {
    fn submit(&mut self, request: &DrawRequest) -> DrawReceipt;
    fn is_settled(&self, receipt: &DrawReceipt) -> bool;
}

/// Simulated backend: accepts every request and settles it after a
/// fixed latency. No retry or cancellation semantics.
#[derive(Debug)]
pub struct SimulatedGateway {
    latency: Duration,
    sequence: u32,
}

impl SimulatedGateway {
    pub fn new() -> Self {
        Self {
            latency: Duration::from_secs(2),
            sequence: 0,
        }
    }

    /// Zero-latency variant for tests.
    pub fn instant() -> Self {
        Self {
            latency: Duration::ZERO,
            sequence: 0,
        }
    }
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawGateway for SimulatedGateway {
    fn submit(&mut self, request: &DrawRequest) -> DrawReceipt {
        self.sequence += 1;
        DrawReceipt {
            reference: format!("DRAW-{:06}", self.sequence),
            amount: request.amount,
            method: request.method,
            submitted_at: Instant::now(),
        }
    }

    fn is_settled(&self, receipt: &DrawReceipt) -> bool {
        receipt.submitted_at.elapsed() >= self.latency
    }
}

/// Customer-portal state: the member's position plus everything the
/// portal pages render.
#[derive(Debug)]
pub struct PortalState {
    pub account: Account,
    pub page: PortalPage,
    pub modal: Option<PortalModal>,
    pub upcoming: UpcomingPayment,
    pub show_notice: bool,
    pub activity: Vec<ActivityEntry>,
    pub activity_cursor: usize,
    /// Whole dollars drawn this session, deducted from available credit.
    pub total_drawn: u32,
    pub draw: DrawState,
    pub history: Vec<PaymentRow>,
    pub payments_scroll: usize,
    pub statements: Vec<Statement>,
    pub agreements: Vec<Agreement>,
    pub docs_cursor: usize,
    pub mail_delivery: bool,
}

impl Default for PortalState {
    fn default() -> Self {
        Self {
            account: Account::default(),
            page: PortalPage::Home,
            modal: None,
            upcoming: UpcomingPayment::Available,
            show_notice: true,
            activity: sample_activity(),
            activity_cursor: 0,
            total_drawn: 0,
            draw: DrawState::default(),
            history: payment_history(),
            payments_scroll: 0,
            statements: sample_statements(),
            agreements: sample_agreements(),
            docs_cursor: 0,
            mail_delivery: false,
        }
    }
}

impl PortalState {
    /// Home-page activity preview: pending draws first, capped at four.
    pub fn recent_activity(&self) -> Vec<&ActivityEntry> {
        self.activity.iter().take(4).collect()
    }

    pub fn available_credit(&self) -> f64 {
        self.account.available_credit(self.total_drawn)
    }
}

/// Where a committed number-pad value lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadTarget {
    DrawAmount,
    ExtraPrincipal,
    LoanAmount,
}

/// The bottom-sheet number pad: digit entry in whole dollars, clamped
/// to `[min, max]` on commit.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberPad {
    pub target: PadTarget,
    pub title: &'static str,
    pub buffer: String,
    pub min: u32,
    pub max: u32,
}

impl NumberPad {
    pub fn new(target: PadTarget, title: &'static str, value: u32, min: u32, max: u32) -> Self {
        Self {
            target,
            title,
            buffer: value.to_string(),
            min,
            max,
        }
    }

    /// Appends a digit, normalizing a bare leading zero. Entry is capped
    /// at six digits.
    pub fn push(&mut self, digit: char) {
        if !digit.is_ascii_digit() || self.buffer.len() >= 6 {
            return;
        }
        if self.buffer == "0" {
            self.buffer = digit.to_string();
        } else {
            self.buffer.push(digit);
        }
    }

    pub fn backspace(&mut self) {
        self.buffer.pop();
        if self.buffer.is_empty() {
            self.buffer.push('0');
        }
    }

    pub fn clear(&mut self) {
        self.buffer = "0".to_string();
    }

    pub fn fill_max(&mut self) {
        self.buffer = self.max.to_string();
    }

    pub fn value(&self) -> u32 {
        self.buffer.parse().unwrap_or(0)
    }

    /// The entered value clamped into the pad's range.
    pub fn commit(&self) -> u32 {
        self.value().clamp(self.min, self.max)
    }
}

/// Top-level application state.
#[derive(Debug)]
pub struct App {
    pub view: View,
    pub landing_cursor: usize,
    pub portal: PortalState,
    pub wizard: WizardState,
    pub pad: Option<NumberPad>,
    /// Temporary status message shown in the status bar.
    pub status_message: Option<String>,
    pub gateway: Box<dyn DrawGateway>,
}

impl Default for App {
    fn default() -> Self {
        Self::new(Box::new(SimulatedGateway::new()))
    }
}

impl App {
    pub fn new(gateway: Box<dyn DrawGateway>) -> Self {
        Self {
            view: View::Landing,
            landing_cursor: 0,
            portal: PortalState::default(),
            wizard: WizardState::default(),
            pad: None,
            status_message: None,
            gateway,
        }
    }

    pub fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    /// Whether a bare `q` key should quit. Text-entry surfaces and open
    /// popups must keep the key for themselves.
    pub fn quit_allowed(&self) -> bool {
        match self.view {
            View::Landing => true,
            View::Portal => {
                self.pad.is_none()
                    && self.portal.modal.is_none()
                    && self.portal.draw.phase != DrawPhase::Processing
            }
            View::Wizard => false,
        }
    }

    // ---- top-level navigation ----

    pub fn enter_portal(&mut self) {
        self.view = View::Portal;
        self.status_message = None;
    }

    /// Starts a fresh application; any prior wizard state is discarded.
    pub fn start_application(&mut self) {
        self.wizard = WizardState::default();
        self.view = View::Wizard;
        self.status_message = None;
    }

    pub fn exit_to_landing(&mut self) {
        self.view = View::Landing;
        self.landing_cursor = 0;
    }

    // ---- portal: home ----

    pub fn set_portal_page(&mut self, page: PortalPage) {
        self.portal.page = page;
        self.portal.modal = None;
        self.status_message = None;
    }

    pub fn dismiss_notice(&mut self) {
        self.portal.show_notice = false;
    }

    /// Dev control standing in for backend payment state, as in the
    /// source mockups.
    pub fn cycle_upcoming(&mut self) {
        self.portal.upcoming = self.portal.upcoming.cycled();
    }

    pub fn move_activity_cursor(&mut self, delta: isize) {
        let len = self.portal.recent_activity().len();
        if len == 0 {
            return;
        }
        let moved = self.portal.activity_cursor as isize + delta;
        self.portal.activity_cursor = moved.clamp(0, len as isize - 1) as usize;
    }

    pub fn open_receipt_at_cursor(&mut self) {
        let entry = self
            .portal
            .recent_activity()
            .get(self.portal.activity_cursor)
            .cloned()
            .cloned();
        if let Some(entry) = entry {
            self.portal.modal = Some(PortalModal::Receipt(entry));
        }
    }

    /// "View receipt" on the payment-received notice opens the most
    /// recent payment.
    pub fn open_notice_receipt(&mut self) {
        if let Some(entry) = self.portal.activity.iter().find(|e| e.is_payment()).cloned() {
            self.portal.modal = Some(PortalModal::Receipt(entry));
        }
    }

    pub fn close_modal(&mut self) {
        self.portal.modal = None;
    }

    /// Writes the open receipt to disk as JSON, the terminal stand-in
    /// for the portal's PDF download.
    pub fn download_receipt(&mut self) {
        if let Some(PortalModal::Receipt(entry)) = &self.portal.modal {
            let filename = receipt_filename(entry);
            let result = ExportService::export_receipt_json(entry, &filename);
            self.status_message = Some(match result {
                Ok(filename) => format!("Saved receipt to {}", filename),
                Err(error) => format!("Receipt export failed: {}", error),
            });
        }
    }

    pub fn open_extra_principal(&mut self) {
        // Hidden entirely once a payoff is scheduled.
        if self.portal.upcoming == UpcomingPayment::PayoffScheduled {
            return;
        }
        self.portal.modal = Some(PortalModal::ExtraPrincipal(ExtraPrincipalState {
            amount: 0,
            statement_issued: false,
        }));
    }

    pub fn extra_principal_set(&mut self, amount: u32) {
        if let Some(PortalModal::ExtraPrincipal(state)) = &mut self.portal.modal {
            state.amount = amount;
        }
    }

    pub fn extra_principal_max(&self) -> u32 {
        self.portal.account.principal_balance.round() as u32
    }

    /// Toggles the demo statement-issued flag on whichever popup is
    /// open.
    pub fn toggle_statement_issued(&mut self) {
        match &mut self.portal.modal {
            Some(PortalModal::ExtraPrincipal(state)) => {
                state.statement_issued = !state.statement_issued;
            }
            Some(PortalModal::PayInFull(state)) => {
                state.statement_issued = !state.statement_issued;
            }
            _ => {}
        }
    }

    pub fn submit_extra_principal(&mut self) {
        let max = self.extra_principal_max();
        if let Some(PortalModal::ExtraPrincipal(state)) = &self.portal.modal {
            let amount = state.amount;
            if amount < 1 || amount > max {
                return;
            }
            self.portal.upcoming = UpcomingPayment::Adjusted {
                extra: amount as f64,
            };
            self.portal.modal = None;
            self.status_message = Some(format!(
                "Extra principal of {} scheduled.",
                format_cad(amount as f64)
            ));
        }
    }

    pub fn open_pay_in_full(&mut self) {
        self.portal.modal = Some(PortalModal::PayInFull(PayInFullState {
            statement_issued: false,
            confirm: false,
        }));
    }

    pub fn toggle_payoff_confirm(&mut self) {
        if let Some(PortalModal::PayInFull(state)) = &mut self.portal.modal {
            state.confirm = !state.confirm;
        }
    }

    pub fn schedule_payoff(&mut self) {
        if let Some(PortalModal::PayInFull(state)) = &self.portal.modal {
            if !state.confirm {
                return;
            }
            self.portal.upcoming = UpcomingPayment::PayoffScheduled;
            self.portal.modal = None;
            self.status_message = Some("Payoff scheduled for your next payment date.".to_string());
        }
    }

    // ---- portal: payments / docs / more ----

    pub fn open_payments(&mut self) {
        self.portal.page = PortalPage::Payments;
        self.portal.payments_scroll = 0;
    }

    pub fn scroll_payments(&mut self, delta: isize) {
        let len = self.portal.history.len();
        if len == 0 {
            return;
        }
        let moved = self.portal.payments_scroll as isize + delta;
        self.portal.payments_scroll = moved.clamp(0, len as isize - 1) as usize;
    }

    /// Exports the full payment history as CSV into the working
    /// directory.
    pub fn export_history(&mut self) {
        let result = ExportService::export_history_csv(&self.portal.history, history_filename());
        self.status_message = Some(match result {
            Ok(filename) => format!("Exported payment history to {}", filename),
            Err(error) => format!("Export failed: {}", error),
        });
    }

    pub fn move_docs_cursor(&mut self, delta: isize) {
        let len = self.portal.statements.len() + self.portal.agreements.len();
        if len == 0 {
            return;
        }
        let moved = self.portal.docs_cursor as isize + delta;
        self.portal.docs_cursor = moved.clamp(0, len as isize - 1) as usize;
    }

    /// Simulated document download, as in the source: no file is
    /// produced, the action just reports what it would fetch.
    pub fn download_document(&mut self) {
        let cursor = self.portal.docs_cursor;
        let filename = if cursor < self.portal.statements.len() {
            self.portal.statements.get(cursor).map(|s| {
                format!("statement-{}.pdf", s.month.to_lowercase().replace(' ', "-"))
            })
        } else {
            self.portal
                .agreements
                .get(cursor - self.portal.statements.len())
                .map(|a| format!("{}.pdf", a.name.to_lowercase().replace(' ', "-")))
        };
        if let Some(filename) = filename {
            self.status_message = Some(format!(
                "Downloading {} (simulated; no transfer in this build)",
                filename
            ));
        }
    }

    pub fn open_delivery_settings(&mut self) {
        self.portal.modal = Some(PortalModal::Delivery(DeliveryState {
            mail_enabled: self.portal.mail_delivery,
        }));
    }

    pub fn toggle_mail_delivery(&mut self) {
        if let Some(PortalModal::Delivery(state)) = &mut self.portal.modal {
            state.mail_enabled = !state.mail_enabled;
        }
    }

    pub fn save_delivery_settings(&mut self) {
        if let Some(PortalModal::Delivery(state)) = &self.portal.modal {
            self.portal.mail_delivery = state.mail_enabled;
            self.portal.modal = None;
            self.status_message = Some("Statement delivery settings saved.".to_string());
        }
    }

    // ---- portal: draw flow ----

    pub fn draw_quick_select(&mut self, index: usize) {
        if self.portal.draw.phase != DrawPhase::Amount {
            return;
        }
        let options = quick_amounts(self.portal.account.draw_ceiling);
        if let Some((_, amount)) = options.get(index) {
            self.portal.draw.amount = *amount;
        }
    }

    /// The inline warning under the amount field, mirroring the source's
    /// validation copy.
    pub fn draw_amount_error(&self) -> Option<String> {
        let amount = self.portal.draw.amount;
        if amount == 0 {
            return None;
        }
        match self.portal.account.validate_draw(amount) {
            Ok(()) => None,
            Err(DomainError::AccountFrozen) => {
                Some("Your line of credit is frozen.".to_string())
            }
            Err(_) => Some(format!(
                "Exceeds available draw limit of {}",
                format_cad_whole(self.portal.account.draw_ceiling)
            )),
        }
    }

    pub fn draw_select_method(&mut self, method: FundingMethod) {
        if method == FundingMethod::ETransfer && !self.portal.draw.interac_eligible {
            self.status_message =
                Some("You're not enrolled in the Money Bundle.".to_string());
            return;
        }
        self.portal.draw.method = method;
    }

    /// Advances the draw flow one phase; from review this submits.
    pub fn draw_continue(&mut self) {
        match self.portal.draw.phase {
            DrawPhase::Amount => {
                if self.portal.account.validate_draw(self.portal.draw.amount).is_ok() {
                    self.portal.draw.phase = DrawPhase::Method;
                }
            }
            DrawPhase::Method => {
                self.portal.draw.phase = DrawPhase::Review;
            }
            DrawPhase::Review => self.confirm_draw(),
            DrawPhase::Processing | DrawPhase::Success => {}
        }
    }

    pub fn draw_back(&mut self) {
        match self.portal.draw.phase {
            DrawPhase::Amount => self.portal.page = PortalPage::Home,
            DrawPhase::Method => self.portal.draw.phase = DrawPhase::Amount,
            DrawPhase::Review => self.portal.draw.phase = DrawPhase::Method,
            DrawPhase::Processing | DrawPhase::Success => {}
        }
    }

    fn confirm_draw(&mut self) {
        let request = DrawRequest {
            amount: self.portal.draw.amount,
            method: self.portal.draw.method,
        };
        if self.portal.account.validate_draw(request.amount).is_err() {
            return;
        }
        let receipt = self.gateway.submit(&request);
        self.portal.draw.receipt = Some(receipt);
        self.portal.draw.phase = DrawPhase::Processing;
    }

    /// Completes the simulated submission once its delay has elapsed.
    /// Called from the main loop on every tick.
    pub fn on_tick(&mut self) {
        if self.portal.draw.phase != DrawPhase::Processing {
            return;
        }
        let settled = self
            .portal
            .draw
            .receipt
            .as_ref()
            .is_some_and(|receipt| self.gateway.is_settled(receipt));
        if settled {
            self.complete_draw();
        }
    }

    fn complete_draw(&mut self) {
        let today = self.today();
        if let Some(receipt) = &self.portal.draw.receipt {
            self.portal.activity.insert(
                0,
                ActivityEntry {
                    date: today,
                    amount: -(receipt.amount as f64),
                    method: receipt.method.label().to_string(),
                    reference: receipt.reference.clone(),
                    kind: ActivityKind::PendingDraw,
                },
            );
            self.portal.total_drawn += receipt.amount;
        }
        self.portal.draw.phase = DrawPhase::Success;
    }

    /// "Make another draw" on the success screen.
    pub fn reset_draw(&mut self) {
        self.portal.draw = DrawState::default();
    }

    // ---- number pad ----

    pub fn open_draw_pad(&mut self) {
        let draw = &self.portal.draw;
        self.pad = Some(NumberPad::new(
            PadTarget::DrawAmount,
            "Enter Draw Amount",
            draw.amount,
            1,
            self.portal.account.draw_ceiling,
        ));
    }

    pub fn open_extra_principal_pad(&mut self) {
        let amount = match &self.portal.modal {
            Some(PortalModal::ExtraPrincipal(state)) => state.amount,
            _ => return,
        };
        self.pad = Some(NumberPad::new(
            PadTarget::ExtraPrincipal,
            "Enter Extra Principal Amount",
            amount,
            1,
            self.extra_principal_max(),
        ));
    }

    pub fn open_loan_pad(&mut self) {
        self.pad = Some(NumberPad::new(
            PadTarget::LoanAmount,
            "Enter amount",
            self.wizard.amount,
            MIN_LOAN_AMOUNT,
            self.wizard.form.preapproved_max,
        ));
    }

    /// Commits the open pad into its target field.
    pub fn commit_pad(&mut self) {
        if let Some(pad) = self.pad.take() {
            let value = pad.commit();
            match pad.target {
                PadTarget::DrawAmount => self.portal.draw.amount = value,
                PadTarget::ExtraPrincipal => self.extra_principal_set(value),
                PadTarget::LoanAmount => self.wizard.amount = value,
            }
        }
    }

    pub fn cancel_pad(&mut self) {
        self.pad = None;
    }

    // ---- wizard ----

    pub fn wizard_continue(&mut self) {
        let today = self.today();
        self.wizard.continue_step(today);
    }

    pub fn wizard_back(&mut self) {
        let today = self.today();
        if !self.wizard.back(today) {
            self.exit_to_landing();
        }
    }

    /// Leaves the completion screen after a submitted application.
    pub fn finish_wizard(&mut self) {
        self.wizard = WizardState::default();
        self.exit_to_landing();
        self.status_message = Some(
            "Application complete! Your Mini Line of Credit has been approved and will be \
             available shortly."
                .to_string(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AccountStatus;

    fn test_app() -> App {
        App::new(Box::new(SimulatedGateway::instant()))
    }

    #[test]
    fn test_app_default_state() {
        let app = test_app();
        assert_eq!(app.view, View::Landing);
        assert_eq!(app.portal.page, PortalPage::Home);
        assert_eq!(app.portal.upcoming, UpcomingPayment::Available);
        assert!(app.portal.show_notice);
        assert_eq!(app.portal.activity.len(), 4);
        assert_eq!(app.portal.available_credit(), 3000.0);
        assert!(app.status_message.is_none());
    }

    #[test]
    fn test_number_pad_entry() {
        let mut pad = NumberPad::new(PadTarget::DrawAmount, "Enter Draw Amount", 0, 1, 2800);
        assert_eq!(pad.buffer, "0");

        pad.push('5');
        assert_eq!(pad.buffer, "5");
        pad.push('0');
        pad.push('0');
        assert_eq!(pad.value(), 500);

        pad.backspace();
        assert_eq!(pad.value(), 50);
        pad.clear();
        assert_eq!(pad.buffer, "0");
        pad.backspace();
        assert_eq!(pad.buffer, "0");

        pad.push('x');
        assert_eq!(pad.buffer, "0");
    }

    #[test]
    fn test_number_pad_caps_entry_length() {
        let mut pad = NumberPad::new(PadTarget::DrawAmount, "Enter Draw Amount", 0, 1, 2800);
        for _ in 0..10 {
            pad.push('9');
        }
        assert_eq!(pad.buffer.len(), 6);
    }

    #[test]
    fn test_number_pad_commit_clamps() {
        let mut pad = NumberPad::new(PadTarget::DrawAmount, "Enter Draw Amount", 0, 100, 1000);
        assert_eq!(pad.commit(), 100); // empty entry clamps up to min

        pad.clear();
        pad.push('5');
        assert_eq!(pad.commit(), 100);

        pad.fill_max();
        assert_eq!(pad.commit(), 1000);

        pad.clear();
        for c in "999999".chars() {
            pad.push(c);
        }
        assert_eq!(pad.commit(), 1000);
    }

    #[test]
    fn test_quick_amounts() {
        let options = quick_amounts(2800);
        assert_eq!(options[0], ("25%", 700));
        assert_eq!(options[1], ("50%", 1400));
        assert_eq!(options[2], ("75%", 2100));
        assert_eq!(options[3], ("Max", 2800));
    }

    #[test]
    fn test_draw_flow_end_to_end() {
        let mut app = test_app();
        app.enter_portal();
        app.set_portal_page(PortalPage::Draw);

        // Cannot continue without an amount.
        app.draw_continue();
        assert_eq!(app.portal.draw.phase, DrawPhase::Amount);

        app.draw_quick_select(1);
        assert_eq!(app.portal.draw.amount, 1400);
        assert!(app.draw_amount_error().is_none());

        app.draw_continue();
        assert_eq!(app.portal.draw.phase, DrawPhase::Method);
        app.draw_select_method(FundingMethod::ETransfer);
        app.draw_continue();
        assert_eq!(app.portal.draw.phase, DrawPhase::Review);

        app.draw_continue();
        assert_eq!(app.portal.draw.phase, DrawPhase::Processing);
        let reference = app.portal.draw.receipt.as_ref().unwrap().reference.clone();
        assert_eq!(reference, "DRAW-000001");

        // Instant gateway settles on the next tick.
        app.on_tick();
        assert_eq!(app.portal.draw.phase, DrawPhase::Success);
        assert_eq!(app.portal.total_drawn, 1400);
        assert_eq!(app.portal.available_credit(), 1600.0);

        let entry = &app.portal.activity[0];
        assert_eq!(entry.amount, -1400.0);
        assert_eq!(entry.kind, ActivityKind::PendingDraw);
        assert_eq!(entry.method, "Interac e-Transfer");
        assert_eq!(entry.reference, reference);

        app.reset_draw();
        assert_eq!(app.portal.draw.phase, DrawPhase::Amount);
        assert_eq!(app.portal.draw.amount, 0);
    }

    #[test]
    fn test_draw_amount_error_copy() {
        let mut app = test_app();
        assert!(app.draw_amount_error().is_none()); // nothing entered

        app.portal.draw.amount = 3000;
        assert_eq!(
            app.draw_amount_error(),
            Some("Exceeds available draw limit of $2,800".to_string())
        );

        app.portal.draw.amount = 2800;
        assert!(app.draw_amount_error().is_none());
    }

    #[test]
    fn test_frozen_account_blocks_draw() {
        let mut app = test_app();
        app.portal.account.status = AccountStatus::Frozen;
        app.portal.draw.amount = 500;

        assert_eq!(
            app.draw_amount_error(),
            Some("Your line of credit is frozen.".to_string())
        );
        app.draw_continue();
        assert_eq!(app.portal.draw.phase, DrawPhase::Amount);
    }

    #[test]
    fn test_ineligible_interac_cannot_be_selected() {
        let mut app = test_app();
        app.portal.draw.interac_eligible = false;
        app.draw_select_method(FundingMethod::ETransfer);
        assert_eq!(app.portal.draw.method, FundingMethod::DirectDeposit);
        assert!(app.status_message.is_some());
    }

    #[test]
    fn test_pad_commit_routes_to_draw_amount() {
        let mut app = test_app();
        app.open_draw_pad();
        let pad = app.pad.as_mut().unwrap();
        pad.push('7');
        pad.push('5');
        pad.push('0');
        app.commit_pad();
        assert!(app.pad.is_none());
        assert_eq!(app.portal.draw.amount, 750);
    }

    #[test]
    fn test_pad_cancel_keeps_previous_value() {
        let mut app = test_app();
        app.portal.draw.amount = 300;
        app.open_draw_pad();
        app.pad.as_mut().unwrap().push('9');
        app.cancel_pad();
        assert_eq!(app.portal.draw.amount, 300);
    }

    #[test]
    fn test_extra_principal_adjusts_upcoming_payment() {
        let mut app = test_app();
        app.open_extra_principal();
        assert!(matches!(
            app.portal.modal,
            Some(PortalModal::ExtraPrincipal(_))
        ));

        // Zero amount cannot be submitted.
        app.submit_extra_principal();
        assert!(app.portal.modal.is_some());

        app.extra_principal_set(50);
        app.submit_extra_principal();
        assert_eq!(app.portal.upcoming, UpcomingPayment::Adjusted { extra: 50.0 });
        assert!(app.portal.modal.is_none());
        assert_eq!(
            app.status_message.as_deref(),
            Some("Extra principal of $50.00 scheduled.")
        );
    }

    #[test]
    fn test_extra_principal_hidden_once_payoff_scheduled() {
        let mut app = test_app();
        app.portal.upcoming = UpcomingPayment::PayoffScheduled;
        app.open_extra_principal();
        assert!(app.portal.modal.is_none());
    }

    #[test]
    fn test_pay_in_full_requires_authorization() {
        let mut app = test_app();
        app.open_pay_in_full();

        app.schedule_payoff();
        assert_ne!(app.portal.upcoming, UpcomingPayment::PayoffScheduled);

        app.toggle_payoff_confirm();
        app.schedule_payoff();
        assert_eq!(app.portal.upcoming, UpcomingPayment::PayoffScheduled);
        assert!(app.portal.modal.is_none());
    }

    #[test]
    fn test_notice_receipt_opens_latest_payment() {
        let mut app = test_app();
        app.open_notice_receipt();
        match &app.portal.modal {
            Some(PortalModal::Receipt(entry)) => {
                assert_eq!(entry.reference, "9F2-K7T");
                assert!(entry.is_payment());
            }
            other => panic!("expected receipt modal, got {:?}", other),
        }
    }

    #[test]
    fn test_delivery_settings_round_trip() {
        let mut app = test_app();
        assert!(!app.portal.mail_delivery);

        app.open_delivery_settings();
        app.toggle_mail_delivery();
        app.save_delivery_settings();
        assert!(app.portal.mail_delivery);
        assert!(app.portal.modal.is_none());

        // Cancelling (closing) does not persist the toggle.
        app.open_delivery_settings();
        app.toggle_mail_delivery();
        app.close_modal();
        assert!(app.portal.mail_delivery);
    }

    #[test]
    fn test_document_download_is_simulated() {
        let mut app = test_app();
        app.download_document();
        assert_eq!(
            app.status_message.as_deref(),
            Some("Downloading statement-sep-2025.pdf (simulated; no transfer in this build)")
        );

        app.portal.docs_cursor = app.portal.statements.len();
        app.download_document();
        assert!(app
            .status_message
            .as_deref()
            .unwrap()
            .contains("line-of-credit-agreement.pdf"));
    }

    #[test]
    fn test_quit_allowed_contexts() {
        let mut app = test_app();
        assert!(app.quit_allowed());

        app.enter_portal();
        assert!(app.quit_allowed());

        app.open_pay_in_full();
        assert!(!app.quit_allowed());
        app.close_modal();

        app.open_draw_pad();
        assert!(!app.quit_allowed());
        app.cancel_pad();

        app.start_application();
        assert!(!app.quit_allowed());
    }

    #[test]
    fn test_wizard_back_from_first_step_returns_to_landing() {
        let mut app = test_app();
        app.start_application();
        assert_eq!(app.view, View::Wizard);
        app.wizard_back();
        assert_eq!(app.view, View::Landing);
    }

    #[test]
    fn test_finish_wizard_resets_and_reports() {
        let mut app = test_app();
        app.start_application();
        app.finish_wizard();
        assert_eq!(app.view, View::Landing);
        assert!(app.wizard.done.is_none());
        assert!(app
            .status_message
            .as_deref()
            .unwrap()
            .starts_with("Application complete!"));
    }

    #[test]
    fn test_upcoming_cycle_dev_control() {
        let mut app = test_app();
        app.cycle_upcoming();
        assert_eq!(app.portal.upcoming, UpcomingPayment::Adjusted { extra: 50.0 });
    }
}
