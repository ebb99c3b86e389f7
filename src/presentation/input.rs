use crate::application::{App, DrawPhase, PortalModal, PortalPage, View, WizardStep};
use crate::domain::FundingMethod;
use crossterm::event::{KeyCode, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, _modifiers: KeyModifiers) {
        if app.pad.is_some() {
            Self::handle_pad(app, key);
            return;
        }
        match app.view {
            View::Landing => Self::handle_landing(app, key),
            View::Portal => {
                if app.portal.modal.is_some() {
                    Self::handle_modal(app, key);
                } else {
                    Self::handle_portal(app, key);
                }
            }
            View::Wizard => Self::handle_wizard(app, key),
        }
    }

    fn handle_landing(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::Char('k') => app.landing_cursor = 0,
            KeyCode::Down | KeyCode::Char('j') => app.landing_cursor = 1,
            KeyCode::Enter => {
                if app.landing_cursor == 0 {
                    app.enter_portal();
                } else {
                    app.start_application();
                }
            }
            _ => {}
        }
    }

    fn handle_portal(app: &mut App, key: KeyCode) {
        // Keep freshly set status messages only until the next key.
        app.status_message = None;

        match app.portal.page {
            PortalPage::Home => Self::handle_home(app, key),
            PortalPage::Draw => Self::handle_draw(app, key),
            PortalPage::Docs => Self::handle_docs(app, key),
            PortalPage::More => Self::handle_more(app, key),
            PortalPage::Payments => Self::handle_payments(app, key),
        }
    }

    /// Tab-bar shortcuts shared by the portal pages that don't use the
    /// number keys themselves.
    fn handle_tab_key(app: &mut App, key: KeyCode) -> bool {
        match key {
            KeyCode::Char('1') => app.set_portal_page(PortalPage::Home),
            KeyCode::Char('2') => app.set_portal_page(PortalPage::Draw),
            KeyCode::Char('3') => app.set_portal_page(PortalPage::Docs),
            KeyCode::Char('4') => app.set_portal_page(PortalPage::More),
            _ => return false,
        }
        true
    }

    fn handle_home(app: &mut App, key: KeyCode) {
        if Self::handle_tab_key(app, key) {
            return;
        }
        match key {
            KeyCode::Up | KeyCode::Char('k') => app.move_activity_cursor(-1),
            KeyCode::Down | KeyCode::Char('j') => app.move_activity_cursor(1),
            KeyCode::Enter => app.open_receipt_at_cursor(),
            KeyCode::Char('r') => app.open_notice_receipt(),
            KeyCode::Char('n') => app.dismiss_notice(),
            KeyCode::Char('v') => app.open_payments(),
            KeyCode::Char('a') => app.open_extra_principal(),
            KeyCode::Char('f') => app.open_pay_in_full(),
            KeyCode::Char('p') => app.cycle_upcoming(),
            _ => {}
        }
    }

    fn handle_draw(app: &mut App, key: KeyCode) {
        match app.portal.draw.phase {
            DrawPhase::Amount => match key {
                KeyCode::Char('e') => app.open_draw_pad(),
                KeyCode::Char('1') => app.draw_quick_select(0),
                KeyCode::Char('2') => app.draw_quick_select(1),
                KeyCode::Char('3') => app.draw_quick_select(2),
                KeyCode::Char('4') => app.draw_quick_select(3),
                KeyCode::Enter => app.draw_continue(),
                KeyCode::Esc => app.draw_back(),
                _ => {}
            },
            DrawPhase::Method => match key {
                KeyCode::Char('d') => app.draw_select_method(FundingMethod::DirectDeposit),
                KeyCode::Char('i') => app.draw_select_method(FundingMethod::ETransfer),
                KeyCode::Enter => app.draw_continue(),
                KeyCode::Esc => app.draw_back(),
                _ => {}
            },
            DrawPhase::Review => match key {
                KeyCode::Enter => app.draw_continue(),
                KeyCode::Esc => app.draw_back(),
                _ => {}
            },
            // The simulated submission cannot be cancelled once sent.
            DrawPhase::Processing => {}
            DrawPhase::Success => match key {
                KeyCode::Char('n') => app.reset_draw(),
                KeyCode::Esc | KeyCode::Char('h') => {
                    app.set_portal_page(PortalPage::Home);
                }
                _ => {}
            },
        }
    }

    fn handle_docs(app: &mut App, key: KeyCode) {
        if Self::handle_tab_key(app, key) {
            return;
        }
        match key {
            KeyCode::Up | KeyCode::Char('k') => app.move_docs_cursor(-1),
            KeyCode::Down | KeyCode::Char('j') => app.move_docs_cursor(1),
            KeyCode::Enter | KeyCode::Char('d') => app.download_document(),
            _ => {}
        }
    }

    fn handle_more(app: &mut App, key: KeyCode) {
        if Self::handle_tab_key(app, key) {
            return;
        }
        if key == KeyCode::Char('m') {
            app.open_delivery_settings();
        }
    }

    fn handle_payments(app: &mut App, key: KeyCode) {
        if Self::handle_tab_key(app, key) {
            return;
        }
        match key {
            KeyCode::Up | KeyCode::Char('k') => app.scroll_payments(-1),
            KeyCode::Down | KeyCode::Char('j') => app.scroll_payments(1),
            KeyCode::Char('e') => app.export_history(),
            KeyCode::Esc | KeyCode::Backspace => app.set_portal_page(PortalPage::Home),
            _ => {}
        }
    }

    fn handle_modal(app: &mut App, key: KeyCode) {
        if key == KeyCode::Esc {
            app.close_modal();
            return;
        }
        match &app.portal.modal {
            Some(PortalModal::Receipt(_)) => {
                if key == KeyCode::Char('d') {
                    app.download_receipt();
                }
            }
            Some(PortalModal::ExtraPrincipal(_)) => match key {
                KeyCode::Char('e') => app.open_extra_principal_pad(),
                KeyCode::Char('1') => app.extra_principal_set(25),
                KeyCode::Char('2') => app.extra_principal_set(50),
                KeyCode::Char('3') => app.extra_principal_set(100),
                KeyCode::Char('m') => {
                    let max = app.extra_principal_max();
                    app.extra_principal_set(max);
                }
                KeyCode::Char('t') => app.toggle_statement_issued(),
                KeyCode::Enter => app.submit_extra_principal(),
                _ => {}
            },
            Some(PortalModal::PayInFull(_)) => match key {
                KeyCode::Char(' ') => app.toggle_payoff_confirm(),
                KeyCode::Char('t') => app.toggle_statement_issued(),
                KeyCode::Enter => app.schedule_payoff(),
                _ => {}
            },
            Some(PortalModal::Delivery(_)) => match key {
                KeyCode::Char(' ') => app.toggle_mail_delivery(),
                KeyCode::Enter => app.save_delivery_settings(),
                _ => {}
            },
            None => {}
        }
    }

    fn handle_pad(app: &mut App, key: KeyCode) {
        let Some(pad) = app.pad.as_mut() else {
            return;
        };
        match key {
            KeyCode::Char(c) if c.is_ascii_digit() => pad.push(c),
            KeyCode::Backspace => pad.backspace(),
            KeyCode::Char('c') => pad.clear(),
            KeyCode::Char('m') => pad.fill_max(),
            KeyCode::Enter => app.commit_pad(),
            KeyCode::Esc => app.cancel_pad(),
            _ => {}
        }
    }

    fn handle_wizard(app: &mut App, key: KeyCode) {
        app.status_message = None;
        if app.wizard.done.is_some() {
            if key == KeyCode::Enter {
                app.finish_wizard();
            }
            return;
        }

        match app.wizard.step {
            WizardStep::EmployerInfo => Self::handle_employer_step(app, key),
            WizardStep::LoanCustomization => match key {
                KeyCode::Char('e') => app.open_loan_pad(),
                KeyCode::Char(' ') => app.wizard.select(),
                KeyCode::Enter => app.wizard_continue(),
                KeyCode::Esc => app.wizard_back(),
                _ => {}
            },
            WizardStep::FundingOptions => match key {
                KeyCode::Up | KeyCode::Char('k') => app.wizard.move_cursor(-1),
                KeyCode::Down | KeyCode::Char('j') => app.wizard.move_cursor(1),
                KeyCode::Char(' ') => app.wizard.select(),
                KeyCode::Char('b') => app.wizard.toggle_bundle(),
                KeyCode::Enter => app.wizard_continue(),
                KeyCode::Esc => app.wizard_back(),
                _ => {}
            },
            WizardStep::PaySchedule => {
                // Day tiles lay out in rows of five; weekday chips in one
                // row.
                let grid = app
                    .wizard
                    .form
                    .frequency
                    .map(|f| !f.uses_weekday())
                    .unwrap_or(false);
                match key {
                    KeyCode::Left => app.wizard.move_cursor(-1),
                    KeyCode::Right => app.wizard.move_cursor(1),
                    KeyCode::Up => app.wizard.move_cursor(if grid { -5 } else { -1 }),
                    KeyCode::Down => app.wizard.move_cursor(if grid { 5 } else { 1 }),
                    KeyCode::Char(' ') => app.wizard.select(),
                    KeyCode::Enter => app.wizard_continue(),
                    KeyCode::Esc => app.wizard_back(),
                    _ => {}
                }
            }
            _ => match key {
                KeyCode::Up | KeyCode::Char('k') => app.wizard.move_cursor(-1),
                KeyCode::Down | KeyCode::Char('j') => app.wizard.move_cursor(1),
                KeyCode::Char(' ') => app.wizard.select(),
                KeyCode::Enter => app.wizard_continue(),
                KeyCode::Esc => app.wizard_back(),
                _ => {}
            },
        }
    }

    fn handle_employer_step(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Tab | KeyCode::Down => {
                app.wizard.employer_focus = (app.wizard.employer_focus + 1) % 3;
            }
            KeyCode::BackTab | KeyCode::Up => {
                app.wizard.employer_focus = (app.wizard.employer_focus + 2) % 3;
            }
            KeyCode::Enter => app.wizard_continue(),
            KeyCode::Esc => app.wizard_back(),
            KeyCode::Backspace => app.wizard.active_field().backspace(),
            KeyCode::Delete => app.wizard.active_field().delete(),
            KeyCode::Left => app.wizard.active_field().left(),
            KeyCode::Right => app.wizard.active_field().right(),
            KeyCode::Home => app.wizard.active_field().home(),
            KeyCode::End => app.wizard.active_field().end(),
            KeyCode::Char(c) => app.wizard.active_field().insert(c),
            _ => {}
        }
    }
}
