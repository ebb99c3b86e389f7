use crate::application::{
    applies_text, quick_amounts, App, DeliveryState, DrawPhase, ExtraPrincipalState, NumberPad,
    PayInFullState, PortalModal, PortalPage, View, WizardState, WizardStep, BANK_LINKING_FAQS,
    FIRST_PAYMENT_AMOUNT, FIRST_PAYMENT_DATE, MAILING_ADDRESS,
};
use crate::domain::{
    format_cad, format_cad_whole, long_date, medium_date, ActivityKind, Bank, DayOfMonth,
    DirectDeposit, FundingMethod, PayFrequency, PayWeekday, StatementStatus, UpcomingPayment,
    BUNDLE_PRICE, ESTIMATED_PAYOFF, MINIMUM_PAYMENT, NEXT_MINIMUM_DATE, NEXT_STATEMENT_DATE,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, List, ListItem, Paragraph, Row, Table, Wrap},
    Frame,
};

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    match app.view {
        View::Landing => render_landing(f, app, chunks[1]),
        View::Portal => render_portal(f, app, chunks[1]),
        View::Wizard => render_wizard(f, &app.wizard, chunks[1]),
    }
    render_status_bar(f, app, chunks[2]);

    if app.view == View::Portal {
        if let Some(modal) = &app.portal.modal {
            render_modal(f, app, modal);
        }
    }
    if let Some(pad) = &app.pad {
        render_number_pad(f, pad);
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let context = match app.view {
        View::Landing => "Welcome".to_string(),
        View::Portal => match app.portal.page {
            PortalPage::Home => "Line of Credit".to_string(),
            PortalPage::Draw => "Draw Funds".to_string(),
            PortalPage::Docs => "Documents".to_string(),
            PortalPage::More => "More".to_string(),
            PortalPage::Payments => "Payment History".to_string(),
        },
        View::Wizard => format!("Application — {}", app.wizard.step.title()),
    };
    let header = Paragraph::new(format!("mloc — Mini Line of Credit | {}", context))
        .style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn render_landing(f: &mut Frame, app: &App, area: Rect) {
    let options = [
        (
            "Customer portal",
            "Access your loan dashboard and manage your account",
        ),
        ("Start application", "Start your Mini Line of Credit application"),
    ];
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Welcome to Mogo",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from("  Choose your portal to get started"),
        Line::from(""),
    ];
    for (i, (label, description)) in options.iter().enumerate() {
        let marker = if i == app.landing_cursor { "> " } else { "  " };
        let style = if i == app.landing_cursor {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(format!("{}{}", marker, label), style)));
        lines.push(Line::from(Span::styled(
            format!("    {}", description),
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        "  Need help? Contact our support team",
        Style::default().fg(Color::DarkGray),
    )));
    let widget = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    f.render_widget(widget, area);
}

fn render_portal(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    match app.portal.page {
        PortalPage::Home => render_home(f, app, chunks[0]),
        PortalPage::Draw => render_draw(f, app, chunks[0]),
        PortalPage::Docs => render_docs(f, app, chunks[0]),
        PortalPage::More => render_more(f, app, chunks[0]),
        PortalPage::Payments => render_payments(f, app, chunks[0]),
    }
    render_tab_bar(f, app, chunks[1]);
}

fn render_tab_bar(f: &mut Frame, app: &App, area: Rect) {
    let tabs = [
        ("1", "Home", PortalPage::Home),
        ("2", "Draw", PortalPage::Draw),
        ("3", "Docs", PortalPage::Docs),
        ("4", "More", PortalPage::More),
    ];
    let mut spans = Vec::new();
    for (key, label, page) in tabs {
        let active = app.portal.page == page
            || (page == PortalPage::Home && app.portal.page == PortalPage::Payments);
        let style = if active {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!(" {}:{} ", key, label), style));
        spans.push(Span::raw(" "));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_home(f: &mut Frame, app: &App, area: Rect) {
    let notice_height = if app.portal.show_notice { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(notice_height),
            Constraint::Length(6),
            Constraint::Length(7),
            Constraint::Min(6),
            Constraint::Length(2),
        ])
        .split(area);

    if app.portal.show_notice {
        let notice = Paragraph::new(
            "Payment received on Sep 20, 2025. Total $420.00.  [r] view receipt  [n] dismiss",
        )
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::Green));
        f.render_widget(notice, chunks[0]);
    }

    let balances = Paragraph::new(vec![
        Line::from(vec![
            Span::raw("Principal Balance   "),
            Span::styled(
                format_cad(app.portal.account.principal_balance),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(format!(
            "Available Credit    {}   Credit limit {} — sum of principal + available",
            format_cad(app.portal.available_credit()),
            format_cad(app.portal.account.credit_limit),
        )),
        Line::from(format!(
            "Pending Balance     {}   Excludes principal payments made within the last 7 days",
            format_cad(app.portal.account.pending_balance),
        )),
        Line::from(Span::styled(
            "Need funds? Draw instantly via Interac e-Transfer or in 1-3 business days by direct deposit.  [2] Draw Funds",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .block(Block::default().borders(Borders::ALL).title("Balances"));
    f.render_widget(balances, chunks[1]);

    render_upcoming_payment(f, &app.portal.upcoming, chunks[2]);
    render_recent_activity(f, app, chunks[3]);

    let mut actions = Vec::new();
    if app.portal.upcoming != UpcomingPayment::PayoffScheduled {
        actions.push(Span::raw("[a] Make additional principal payment   "));
    }
    actions.push(Span::raw("[f] Request Pay In Full"));
    f.render_widget(Paragraph::new(Line::from(actions)), chunks[4]);
}

fn render_upcoming_payment(f: &mut Frame, upcoming: &UpcomingPayment, area: Rect) {
    let lines = match upcoming {
        UpcomingPayment::Pending => vec![
            Line::from(Span::styled(
                "Your next Line of Credit statement will be available on Oct 13.",
                Style::default().fg(Color::Yellow),
            )),
            Line::from(Span::styled(
                "Details for your next payment will appear then.",
                Style::default().fg(Color::Yellow),
            )),
        ],
        UpcomingPayment::Available => vec![
            Line::from(format!(
                "Next statement: Oct 13 · Payment due Oct 20 · Amount: {}",
                format_cad(MINIMUM_PAYMENT)
            )),
            Line::from(Span::styled(
                "Amount includes standard minimum principal, interest, and fees.",
                Style::default().fg(Color::DarkGray),
            )),
        ],
        UpcomingPayment::Adjusted { extra } => vec![
            Line::from(format!(
                "Next statement: Oct 13 · Payment due Oct 20 · Total: {}",
                format_cad(MINIMUM_PAYMENT + extra)
            )),
            Line::from(format!(
                "Includes your additional principal payment of {}.",
                format_cad(*extra)
            )),
        ],
        UpcomingPayment::PayoffScheduled => vec![
            Line::from(format!(
                "Next statement: Oct 13 · Payment due Oct 20 · Total: {}",
                format_cad(ESTIMATED_PAYOFF)
            )),
            Line::from(Span::styled(
                "Your Line of Credit will be paid in full on your next scheduled payment date.",
                Style::default().fg(Color::Green),
            )),
            Line::from(Span::styled(
                "This includes the full principal balance plus accrued interest and fees.",
                Style::default().fg(Color::Green),
            )),
        ],
    };
    let mut lines = lines;
    if let Some(action) = upcoming.action_label() {
        lines.push(Line::from(Span::styled(
            format!("[{}]", action),
            Style::default().add_modifier(Modifier::BOLD),
        )));
    }
    let widget = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Upcoming Payment ([p] simulate state)"),
    );
    f.render_widget(widget, area);
}

fn render_recent_activity(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .portal
        .recent_activity()
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let processing = if matches!(entry.kind, ActivityKind::PendingDraw) {
                "  [Processing]"
            } else {
                ""
            };
            let line = format!(
                "{}  {:<13}{}  {}",
                medium_date(entry.date),
                entry.type_label(),
                processing,
                format_cad(entry.amount),
            );
            let style = if i == app.portal.activity_cursor {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else {
                Style::default()
            };
            ListItem::new(line).style(style)
        })
        .collect();
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Recent Activity ([enter] receipt, [v] view all)"),
    );
    f.render_widget(list, area);
}

fn render_payments(f: &mut Frame, app: &App, area: Rect) {
    let header = Row::new(vec!["Date", "Total", "Principal", "Interest", "Fees"])
        .style(Style::default().fg(Color::Yellow))
        .height(1);
    let rows: Vec<Row> = app
        .portal
        .history
        .iter()
        .enumerate()
        .skip(app.portal.payments_scroll)
        .map(|(i, row)| {
            let style = if i == app.portal.payments_scroll {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(row.date.to_string()),
                Cell::from(format_cad(row.total)),
                Cell::from(format_cad(row.principal)),
                Cell::from(format_cad(row.interest)),
                Cell::from(format_cad(row.fees)),
            ])
            .style(style)
        })
        .collect();
    let widths = [
        Constraint::Length(12),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(10),
    ];
    let table = Table::new(std::iter::once(header).chain(rows), widths)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Payment History ([e] export CSV, [esc] back)"),
        )
        .column_spacing(1);
    f.render_widget(table, area);
}

fn render_draw(f: &mut Frame, app: &App, area: Rect) {
    let draw = &app.portal.draw;
    let mut lines = Vec::new();

    if draw.phase == DrawPhase::Success {
        let receipt = draw.receipt.as_ref();
        lines.push(Line::from(Span::styled(
            "Draw Request Submitted",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )));
        if let Some(receipt) = receipt {
            lines.push(Line::from(format!(
                "Your draw request for {} is processing.",
                format_cad_whole(receipt.amount)
            )));
            lines.push(Line::from(""));
            lines.push(Line::from("Next Steps"));
            lines.push(Line::from(format!(
                "  • Funds will arrive via {}",
                receipt.method.label()
            )));
            lines.push(Line::from(format!(
                "  • Expected arrival: {}",
                long_date(receipt.method.estimated_arrival(app.today()))
            )));
            lines.push(Line::from("  • Your available credit will update once processed"));
            lines.push(Line::from(format!("  • Reference: {}", receipt.reference)));
        }
        lines.push(Line::from(""));
        lines.push(Line::from("[n] Make Another Draw   [esc] Back to Home"));
        let widget = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Draw Funds"));
        f.render_widget(widget, area);
        return;
    }

    let step_number = match draw.phase {
        DrawPhase::Amount => 1,
        DrawPhase::Method => 2,
        _ => 3,
    };
    let mut progress = Vec::new();
    for step in 1..=3 {
        progress.push(if step <= step_number { "●" } else { "○" });
    }
    lines.push(Line::from(format!(
        "Step {} of 3   {}",
        step_number,
        progress.join(" ")
    )));
    lines.push(Line::from(""));

    match draw.phase {
        DrawPhase::Amount => {
            lines.push(Line::from(Span::styled(
                "How much would you like to draw?",
                Style::default().add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(format!(
                "Available to draw: {}",
                format_cad_whole(app.portal.account.draw_ceiling)
            )));
            lines.push(Line::from(""));
            let amount_text = if draw.amount > 0 {
                format_cad_whole(draw.amount)
            } else {
                "$0.00".to_string()
            };
            lines.push(Line::from(vec![
                Span::raw("Amount (CAD): "),
                Span::styled(amount_text, Style::default().add_modifier(Modifier::BOLD)),
                Span::raw("   [e] keypad"),
            ]));
            if let Some(error) = app.draw_amount_error() {
                lines.push(Line::from(Span::styled(
                    error,
                    Style::default().fg(Color::Red),
                )));
            }
            lines.push(Line::from(""));
            lines.push(Line::from("Quick select"));
            for (i, (label, amount)) in quick_amounts(app.portal.account.draw_ceiling)
                .iter()
                .enumerate()
            {
                lines.push(Line::from(format!(
                    "  [{}] {} ({})",
                    i + 1,
                    label,
                    format_cad_whole(*amount)
                )));
            }
        }
        DrawPhase::Method => {
            lines.push(Line::from(Span::styled(
                "Choose funding method",
                Style::default().add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from("Select how you'd like to receive your funds"));
            lines.push(Line::from(""));
            let methods = [
                (
                    FundingMethod::DirectDeposit,
                    "d",
                    "Funds will arrive in 1-3 business days · No fees · Deposited to your linked bank account",
                ),
                (
                    FundingMethod::ETransfer,
                    "i",
                    "Instant / within minutes · No fees · Sent to your email",
                ),
            ];
            for (method, key, detail) in methods {
                let selected = draw.method == method;
                let marker = if selected { "(•)" } else { "( )" };
                let mut label = format!("{} [{}] {}", marker, key, method.label());
                if method == FundingMethod::ETransfer && !draw.interac_eligible {
                    label.push_str("  [Not enrolled]");
                }
                let style = if selected {
                    Style::default().add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                lines.push(Line::from(Span::styled(label, style)));
                lines.push(Line::from(Span::styled(
                    format!("      {}", detail),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            if !draw.interac_eligible {
                lines.push(Line::from(Span::styled(
                    "To use Interac e-Transfer, you need to be enrolled in the Money Bundle.",
                    Style::default().fg(Color::Yellow),
                )));
            }
        }
        DrawPhase::Review | DrawPhase::Processing => {
            lines.push(Line::from(Span::styled(
                "Review your draw request",
                Style::default().add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from("Please confirm the details before submitting"));
            lines.push(Line::from(""));
            lines.push(Line::from(format!(
                "  Draw amount        {}",
                format_cad_whole(draw.amount)
            )));
            lines.push(Line::from(format!(
                "  Funding method     {}",
                draw.method.label()
            )));
            lines.push(Line::from(format!(
                "  Estimated arrival  {}",
                long_date(draw.method.estimated_arrival(app.today()))
            )));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!(
                    "Note: Your available credit will be reduced by {} once this draw is processed.",
                    format_cad_whole(draw.amount)
                ),
                Style::default().fg(Color::Blue),
            )));
            lines.push(Line::from(""));
            if draw.phase == DrawPhase::Processing {
                lines.push(Line::from(Span::styled(
                    "Processing...",
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                )));
            } else {
                lines.push(Line::from("[enter] Confirm Draw   [esc] Back"));
            }
        }
        DrawPhase::Success => {}
    }

    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Draw Funds"));
    f.render_widget(widget, area);
}

fn render_docs(f: &mut Frame, app: &App, area: Rect) {
    let mut items: Vec<ListItem> = Vec::new();
    items.push(ListItem::new(Span::styled(
        "Statements",
        Style::default().fg(Color::Yellow),
    )));
    let mut index = 0;
    for statement in &app.portal.statements {
        let badge = if statement.status == StatementStatus::Current {
            "  [Current]"
        } else {
            ""
        };
        let line = format!(
            "  {}  {} · {}{}",
            statement.month,
            statement.issued,
            format_cad(statement.amount),
            badge
        );
        let style = if index == app.portal.docs_cursor {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default()
        };
        items.push(ListItem::new(line).style(style));
        index += 1;
    }
    items.push(ListItem::new(Span::styled(
        "Agreements",
        Style::default().fg(Color::Yellow),
    )));
    for agreement in &app.portal.agreements {
        let line = format!("  {}  Signed {}", agreement.name, agreement.signed);
        let style = if index == app.portal.docs_cursor {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default()
        };
        items.push(ListItem::new(line).style(style));
        index += 1;
    }
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Documents ([d] download)"),
    );
    f.render_widget(list, area);
}

fn render_more(f: &mut Frame, app: &App, area: Rect) {
    let delivery = if app.portal.mail_delivery {
        "Email + Mail"
    } else {
        "Email only"
    };
    let lines = vec![
        Line::from(Span::styled(
            "Profile & Settings",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from("Update contact, mailing prefs, bundle enrollment."),
        Line::from(format!("Current statement delivery: {}", delivery)),
        Line::from("[m] Manage Statement Delivery"),
        Line::from(""),
        Line::from(Span::styled(
            "Support",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from("Chat with us or visit Help Center."),
    ];
    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("More"));
    f.render_widget(widget, area);
}

fn render_wizard(f: &mut Frame, wizard: &WizardState, area: Rect) {
    if let Some(payload) = &wizard.done {
        let mut lines = vec![
            Line::from(Span::styled(
                "Application complete!",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )),
            Line::from("Your Mini Line of Credit has been approved and will be available shortly."),
            Line::from(""),
            Line::from("Submitted application:"),
        ];
        for payload_line in payload.lines() {
            lines.push(Line::from(Span::styled(
                payload_line.to_string(),
                Style::default().fg(Color::DarkGray),
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::from("[enter] Return to start"));
        let widget = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Check Out"));
        f.render_widget(widget, area);
        return;
    }

    let frequency = wizard.form.frequency;
    let position = wizard.step.position(frequency);
    let total = WizardStep::total(frequency);
    let filled = "■".repeat(position);
    let empty = "□".repeat(total.saturating_sub(position));
    let mut lines = vec![
        Line::from(Span::styled(
            format!("STEP {} OF {} – {}   {}{}", position, total, wizard.step.title(), filled, empty),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ];

    match wizard.step {
        WizardStep::EmployerInfo => render_employer_step(wizard, &mut lines),
        WizardStep::DirectDeposit => {
            lines.push(heading("DO YOU GET PAID VIA DIRECT DEPOSIT?"));
            for (i, option) in DirectDeposit::ALL.iter().enumerate() {
                let selected = wizard.form.direct_deposit == Some(*option);
                lines.push(choice_line(i == wizard.cursor, selected, option.label(), None));
            }
        }
        WizardStep::BankSelection => {
            lines.push(heading("WHERE IS YOUR PAYROLL/INCOME DEPOSITED?"));
            for (i, bank) in Bank::ALL.iter().enumerate() {
                let selected = wizard.form.bank == Some(*bank);
                lines.push(choice_line(i == wizard.cursor, selected, bank.label(), None));
            }
        }
        WizardStep::IncomeFrequency => {
            lines.push(heading("What's your income frequency?"));
            lines.push(Line::from(
                "To set your payment schedule, tell us how you get paid.",
            ));
            lines.push(Line::from(""));
            for (i, frequency) in PayFrequency::ALL.iter().enumerate() {
                let selected = wizard.form.frequency == Some(*frequency);
                lines.push(choice_line(
                    i == wizard.cursor,
                    selected,
                    frequency.label(),
                    Some(frequency.description()),
                ));
            }
        }
        WizardStep::PaySchedule => render_pay_schedule_step(wizard, &mut lines),
        WizardStep::LastPaid => render_last_paid_step(wizard, &mut lines),
        WizardStep::LoanCustomization => render_loan_step(wizard, &mut lines),
        WizardStep::FundingOptions => render_funding_step(wizard, &mut lines),
        WizardStep::BankLinking => render_bank_linking_step(wizard, &mut lines),
        WizardStep::Checkout => render_checkout_step(wizard, &mut lines),
    }

    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Application"));
    f.render_widget(widget, area);
}

fn heading(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    ))
}

fn choice_line(
    at_cursor: bool,
    selected: bool,
    label: &str,
    description: Option<&str>,
) -> Line<'static> {
    let cursor = if at_cursor { "> " } else { "  " };
    let marker = if selected { "(•)" } else { "( )" };
    let mut style = Style::default();
    if selected {
        style = style.add_modifier(Modifier::BOLD);
    }
    if at_cursor {
        style = style.fg(Color::Yellow);
    }
    let mut spans = vec![Span::styled(format!("{}{} {}", cursor, marker, label), style)];
    if let Some(description) = description {
        spans.push(Span::styled(
            format!("  {}", description),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

fn render_employer_step(wizard: &WizardState, lines: &mut Vec<Line<'static>>) {
    lines.push(heading("EMPLOYMENT INFO / SOURCE OF INCOME"));
    lines.push(Line::from(""));
    let fields = [
        ("EMPLOYER NAME", &wizard.employer_name, "Type here..."),
        ("EMPLOYER PHONE", &wizard.employer_phone, "e.g. (555) 123-4567"),
        ("EXTENSION (OPTIONAL)", &wizard.extension, "e.g. 101"),
    ];
    for (i, (label, field, placeholder)) in fields.iter().enumerate() {
        let focused = i == wizard.employer_focus;
        let marker = if focused { "> " } else { "  " };
        lines.push(Line::from(Span::styled(
            format!("{}{}", marker, label),
            if focused {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            },
        )));
        let content = if field.value.is_empty() {
            Span::styled(
                format!("    {}", placeholder),
                Style::default().fg(Color::DarkGray),
            )
        } else if focused {
            let (before, after) = field.value.split_at(field.cursor.min(field.value.len()));
            field_with_cursor(before, after)
        } else {
            Span::raw(format!("    {}", field.value))
        };
        lines.push(Line::from(content));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        "[tab] next field",
        Style::default().fg(Color::DarkGray),
    )));
}

fn field_with_cursor(before: &str, after: &str) -> Span<'static> {
    // Render the cursor as a block character inside the field.
    Span::styled(
        format!("    {}▏{}", before, after),
        Style::default().fg(Color::Green),
    )
}

fn render_pay_schedule_step(wizard: &WizardState, lines: &mut Vec<Line<'static>>) {
    lines.push(Line::from(Span::styled(
        "If a payday falls on a weekend or holiday, we'll set your payment to the last \
         business day before your payday.",
        Style::default().fg(Color::Blue),
    )));
    lines.push(Line::from(""));
    match wizard.form.frequency {
        Some(f) if f.uses_weekday() => {
            lines.push(heading("Which weekday do you get paid?"));
            let mut spans = Vec::new();
            for (i, weekday) in PayWeekday::ALL.iter().enumerate() {
                let selected = wizard.weekday == Some(*weekday);
                let at_cursor = i == wizard.cursor;
                spans.push(tile_span(weekday.label(), selected, at_cursor));
                spans.push(Span::raw(" "));
            }
            lines.push(Line::from(spans));
        }
        Some(PayFrequency::SemiMonthly) => {
            lines.push(heading("Select the two days you're paid every month"));
            render_day_grid(wizard, lines, |day| wizard.semi_days.contains(&day));
            let selected: Vec<String> = wizard.semi_days.iter().map(|d| d.label()).collect();
            let text = if selected.is_empty() {
                "—".to_string()
            } else {
                selected.join(" • ")
            };
            lines.push(Line::from(format!("Selected: {}", text)));
        }
        Some(PayFrequency::Monthly) => {
            lines.push(heading("Select the day you're paid every month"));
            render_day_grid(wizard, lines, |day| wizard.monthly_day == Some(day));
            let text = wizard
                .monthly_day
                .map(|d| d.label())
                .unwrap_or_else(|| "—".to_string());
            lines.push(Line::from(format!("Selected: {}", text)));
        }
        _ => {}
    }
}

fn render_day_grid<F>(wizard: &WizardState, lines: &mut Vec<Line<'static>>, is_selected: F)
where
    F: Fn(DayOfMonth) -> bool,
{
    for row in 0..6 {
        let mut spans = Vec::new();
        for col in 0..5 {
            let index = row * 5 + col;
            if index >= 30 {
                break;
            }
            if let Ok(day) = DayOfMonth::new(index as u8 + 1) {
                let label = format!("{:>2}", day.get());
                spans.push(tile_span(&label, is_selected(day), index == wizard.cursor));
                spans.push(Span::raw(" "));
            }
        }
        lines.push(Line::from(spans));
    }
    lines.push(Line::from(vec![tile_span(
        "31 / Last day",
        is_selected(DayOfMonth::LAST),
        wizard.cursor == 30,
    )]));
}

fn tile_span(label: &str, selected: bool, at_cursor: bool) -> Span<'static> {
    let mut style = Style::default();
    if selected {
        style = style.fg(Color::Black).bg(Color::White);
    }
    if at_cursor {
        style = style.fg(Color::Black).bg(Color::Yellow);
    }
    Span::styled(format!("[{}]", label), style)
}

fn render_last_paid_step(wizard: &WizardState, lines: &mut Vec<Line<'static>>) {
    let weekly = wizard.form.frequency == Some(PayFrequency::Weekly);
    let title = if weekly {
        "Choose your pay cycle for repayments"
    } else {
        "Which date were you last paid?"
    };
    lines.push(heading(title));
    lines.push(Line::from("Select the most recent date you received payment."));
    lines.push(Line::from(""));
    for (i, date) in wizard.recent_dates.iter().enumerate() {
        let selected = wizard.last_paid == Some(*date);
        lines.push(choice_line(i == wizard.cursor, selected, &date.to_string(), None));
    }
    if weekly {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Your repayments will be scheduled every two weeks from the date you choose.",
            Style::default().fg(Color::Blue),
        )));
    }
}

fn render_loan_step(wizard: &WizardState, lines: &mut Vec<Line<'static>>) {
    lines.push(Line::from("You're pre-approved for up to"));
    lines.push(Line::from(Span::styled(
        format_cad_whole(wizard.form.preapproved_max),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from("Your loan amount:"));
    lines.push(Line::from(vec![
        Span::styled(
            format_cad_whole(wizard.amount),
            Style::default().add_modifier(Modifier::BOLD).fg(Color::Green),
        ),
        Span::raw("   [e] edit amount"),
    ]));
    lines.push(Line::from(Span::styled(
        "You can edit this later.",
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(Span::styled(
        format!(
            "Based on bi-weekly payments, APR of {}% not including optional services and fees.",
            wizard.form.apr
        ),
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(""));
    lines.push(heading("YOUR REPAYMENT PAYMENTS"));
    lines.push(Line::from(
        "Mini Money is recommended for short-term use but you have the flexibility to pay \
         it back whenever you like. After it's paid back you can re-access it on demand.",
    ));
    lines.push(Line::from(""));
    lines.push(heading("LOAN PROTECTION"));
    let marker = if wizard.loan_protection { "[x]" } else { "[ ]" };
    lines.push(Line::from(format!(
        "{} I want to participate in the loan balance protection plan.  [space] toggle",
        marker
    )));
    lines.push(Line::from(Span::styled(
        "Protect yourself and your loved ones from damaged credit in the event that you \
         are laid off, injured, critically ill or pass away and can't repay your loan.",
        Style::default().fg(Color::DarkGray),
    )));
}

fn render_funding_step(wizard: &WizardState, lines: &mut Vec<Line<'static>>) {
    lines.push(Line::from(
        "Your line of credit advance won't be funded until your agreements are signed.",
    ));
    lines.push(Line::from(""));
    if wizard.funding_error {
        lines.push(Line::from(Span::styled(
            "Please select a funding method to continue.",
            Style::default().fg(Color::Red),
        )));
        lines.push(Line::from(""));
    }
    lines.push(heading("SELECT A FUNDING OPTION BELOW"));
    let etransfer_selected = wizard.form.funding == Some(FundingMethod::ETransfer);
    let deposit_selected = wizard.form.funding == Some(FundingMethod::DirectDeposit);
    lines.push(Line::from(Span::styled(
        "GET YOUR MONEY TODAY",
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(choice_line(
        wizard.cursor == 0,
        etransfer_selected,
        "INTERAC E-TRANSFER",
        Some("Delivery: Same day"),
    ));
    lines.push(choice_line(
        wizard.cursor == 1,
        deposit_selected,
        "DIRECT DEPOSIT",
        Some("to your bank account · Delivery: 1-3 business days"),
    ));
    lines.push(Line::from(""));
    let bundle_marker = if wizard.form.bundle { "[x]" } else { "[ ]" };
    lines.push(Line::from(format!(
        "{} Add Money Bundle (Optional) — {} per pay period  [b] toggle",
        bundle_marker,
        format_cad(BUNDLE_PRICE)
    )));
    lines.push(Line::from(Span::styled(
        "Includes same-day funding on all advances, the ability to skip a Mini Line of \
         Credit payment, and access to Intelligent Investing.",
        Style::default().fg(Color::DarkGray),
    )));
}

fn render_bank_linking_step(wizard: &WizardState, lines: &mut Vec<Line<'static>>) {
    lines.push(heading("SECURELY LINK YOUR BANK"));
    lines.push(Line::from(
        "To finalize your line of credit, securely link your bank to confirm your income \
         and account details. Select the account where your payroll/income is deposited.",
    ));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Bank linking powered by Flinks",
        Style::default().fg(Color::Blue),
    )));
    for point in [
        "Temporary, read-only access — only what's needed to verify your account",
        "No transactions possible — nobody can move or change money in your account",
        "Bank-level encryption — 256-bit, the same standard Canadian banks use",
        "Your credentials are never stored or shared",
        "This just takes a few quick minutes.",
    ] {
        lines.push(Line::from(format!("  • {}", point)));
    }
    lines.push(Line::from(""));
    for (i, (question, answer)) in BANK_LINKING_FAQS.iter().enumerate() {
        let expanded = wizard.faq_open == Some(i);
        let marker = if expanded { "−" } else { "+" };
        lines.push(choice_line(
            i == wizard.cursor,
            expanded,
            &format!("{} {}", marker, question),
            None,
        ));
        if expanded {
            lines.push(Line::from(Span::styled(
                format!("    {}", answer),
                Style::default().fg(Color::DarkGray),
            )));
        }
    }
}

fn render_checkout_step(wizard: &WizardState, lines: &mut Vec<Line<'static>>) {
    lines.push(Line::from(Span::styled(
        "You're approved! Bank account verified.",
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from("Please review your line of credit details below."));
    lines.push(Line::from(""));
    lines.push(heading("MINI LINE OF CREDIT"));
    lines.push(Line::from(vec![
        Span::raw("Your line of credit amount: "),
        Span::styled(
            format_cad_whole(wizard.form.amount),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ]));
    lines.push(Line::from(format!(
        "First minimum payment: {} · {}",
        FIRST_PAYMENT_DATE,
        format_cad(FIRST_PAYMENT_AMOUNT)
    )));
    if let Some(funding) = wizard.form.funding {
        lines.push(Line::from(format!(
            "Payment type: {} · {}",
            funding.label().to_uppercase(),
            funding.delivery()
        )));
    }
    lines.push(Line::from(""));
    lines.push(heading("STATEMENTS & MINIMUM PAYMENTS"));
    lines.push(Line::from(
        "  • You'll get your Mini Line of Credit statement about one week before your due date.",
    ));
    lines.push(Line::from(
        "  • Minimum payments are automatically withdrawn from your bank account, no action needed.",
    ));
    lines.push(Line::from(""));
    let marker = if wizard.consent { "[x]" } else { "[ ]" };
    lines.push(Line::from(format!(
        "{} I CONSENT to using my personal information to obtain a credit score or report \
         from a credit reporting agency for this credit application.  [space] toggle",
        marker
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "IMPORTANT: Previously, a soft credit check was performed. At this stage, we will \
         perform a hard credit check. This hard credit check will not change your \
         pre-approval amount.",
        Style::default().fg(Color::DarkGray),
    )));
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let text = if let Some(status) = &app.status_message {
        status.clone()
    } else if app.pad.is_some() {
        "0-9: digits | Backspace: delete | c: clear | m: max | Enter: done | Esc: cancel"
            .to_string()
    } else {
        match app.view {
            View::Landing => "↑↓: select | Enter: open | q: quit".to_string(),
            View::Portal => match (&app.portal.modal, app.portal.page) {
                (Some(PortalModal::Receipt(_)), _) => {
                    "d: download | Esc: close".to_string()
                }
                (Some(PortalModal::ExtraPrincipal(_)), _) => {
                    "e: keypad | 1/2/3: presets | m: max | t: statement toggle | Enter: add | Esc: close"
                        .to_string()
                }
                (Some(PortalModal::PayInFull(_)), _) => {
                    "Space: authorize | t: statement toggle | Enter: schedule payoff | Esc: close"
                        .to_string()
                }
                (Some(PortalModal::Delivery(_)), _) => {
                    "Space: toggle mail delivery | Enter: save | Esc: cancel".to_string()
                }
                (None, PortalPage::Home) => {
                    "1-4: tabs | ↑↓: activity | Enter: receipt | v: history | a: extra principal | f: pay in full | p: payment state | q: quit"
                        .to_string()
                }
                (None, PortalPage::Draw) => match app.portal.draw.phase {
                    DrawPhase::Amount => {
                        "e: keypad | 1-4: quick select | Enter: continue | Esc: home".to_string()
                    }
                    DrawPhase::Method => {
                        "d/i: method | Enter: continue | Esc: back".to_string()
                    }
                    DrawPhase::Review => "Enter: confirm draw | Esc: back".to_string(),
                    DrawPhase::Processing => "Submitting your draw request...".to_string(),
                    DrawPhase::Success => "n: make another draw | Esc: home".to_string(),
                },
                (None, PortalPage::Docs) => {
                    "↑↓: select | d/Enter: download | 1-4: tabs | q: quit".to_string()
                }
                (None, PortalPage::More) => {
                    "m: statement delivery | 1-4: tabs | q: quit".to_string()
                }
                (None, PortalPage::Payments) => {
                    "↑↓: scroll | e: export CSV | Esc: back | q: quit".to_string()
                }
            },
            View::Wizard => {
                if app.wizard.done.is_some() {
                    "Enter: return to start".to_string()
                } else {
                    match app.wizard.step {
                        WizardStep::EmployerInfo => {
                            "Tab: next field | Enter: continue | Esc: back".to_string()
                        }
                        WizardStep::LoanCustomization => {
                            "e: edit amount | Space: protection | Enter: continue | Esc: back"
                                .to_string()
                        }
                        WizardStep::FundingOptions => {
                            "↑↓: options | Space: select | b: bundle | Enter: continue | Esc: back"
                                .to_string()
                        }
                        WizardStep::PaySchedule => {
                            "Arrows: move | Space: select | Enter: continue | Esc: back".to_string()
                        }
                        _ => "↑↓: move | Space: select | Enter: continue | Esc: back".to_string(),
                    }
                }
            }
        }
    };

    let style = match app.view {
        View::Landing => Style::default(),
        View::Portal => {
            if app.portal.draw.phase == DrawPhase::Processing {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            }
        }
        View::Wizard => Style::default().fg(Color::Green),
    };
    let widget = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(style);
    f.render_widget(widget, area);
}

fn render_modal(f: &mut Frame, app: &App, modal: &PortalModal) {
    match modal {
        PortalModal::Receipt(entry) => {
            let title = if entry.is_payment() {
                "Payment receipt"
            } else {
                "Draw details"
            };
            let mut lines = vec![
                Line::from(format!("Date       {}", medium_date(entry.date))),
                Line::from(format!("Type       {}", entry.type_label())),
                Line::from(format!("Amount     {}", format_cad(entry.amount))),
            ];
            if let ActivityKind::Payment { principal, interest, fees } = &entry.kind {
                lines.push(Line::from(format!("Principal  {}", format_cad(*principal))));
                lines.push(Line::from(format!("Interest   {}", format_cad(*interest))));
                lines.push(Line::from(format!("Fees       {}", format_cad(*fees))));
            }
            lines.push(Line::from(format!("Method     {}", entry.method)));
            lines.push(Line::from(format!("Reference  {}", entry.reference)));
            render_popup(f, title, lines, 50, 40);
        }
        PortalModal::ExtraPrincipal(state) => render_extra_principal(f, app, state),
        PortalModal::PayInFull(state) => render_pay_in_full(f, state),
        PortalModal::Delivery(state) => render_delivery(f, state),
    }
}

fn render_extra_principal(f: &mut Frame, app: &App, state: &ExtraPrincipalState) {
    let max = app.extra_principal_max();
    let amount = if state.amount > 0 {
        format_cad_whole(state.amount)
    } else {
        "$0.00".to_string()
    };
    let lines = vec![
        Line::from(vec![
            Span::raw("Amount (CAD): "),
            Span::styled(amount, Style::default().add_modifier(Modifier::BOLD)),
        ]),
        Line::from("Presets: [1] $25  [2] $50  [3] $100  [m] Max"),
        Line::from(format!(
            "You can add between $1 and {} (up to current principal balance).",
            format_cad_whole(max)
        )),
        Line::from(format!(
            "Next statement date: {} · Next minimum payment date: {}",
            NEXT_STATEMENT_DATE, NEXT_MINIMUM_DATE
        )),
        Line::from(applies_text(state.statement_issued, NEXT_MINIMUM_DATE)),
        Line::from(Span::styled(
            if state.statement_issued {
                "[t] Simulate: statement issued"
            } else {
                "[t] Simulate: statement not issued"
            },
            Style::default().fg(Color::DarkGray),
        )),
    ];
    render_popup(f, "Add extra principal", lines, 64, 40);
}

fn render_pay_in_full(f: &mut Frame, state: &PayInFullState) {
    let marker = if state.confirm { "[x]" } else { "[ ]" };
    let lines = vec![
        Line::from(format!("Estimated payoff   {}", format_cad(ESTIMATED_PAYOFF))),
        Line::from(format!(
            "Next statement date: {} · Next minimum payment date: {}",
            NEXT_STATEMENT_DATE, NEXT_MINIMUM_DATE
        )),
        Line::from(applies_text(state.statement_issued, NEXT_MINIMUM_DATE)),
        Line::from(""),
        Line::from(format!(
            "{} I authorize the financial institution to debit the full payoff amount. \
             I understand interest may continue to accrue until the payoff date.",
            marker
        )),
        Line::from(Span::styled(
            if state.statement_issued {
                "[t] Simulate: statement issued"
            } else {
                "[t] Simulate: statement not issued"
            },
            Style::default().fg(Color::DarkGray),
        )),
    ];
    render_popup(f, "Pay my Line of Credit in full", lines, 64, 40);
}

fn render_delivery(f: &mut Frame, state: &DeliveryState) {
    let marker = if state.mail_enabled { "[x]" } else { "[ ]" };
    let mut lines = vec![
        Line::from(format!(
            "Current delivery method: {}",
            if state.mail_enabled { "Email + Mail" } else { "Email only" }
        )),
        Line::from(""),
        Line::from(format!("{} Receive statements by mail", marker)),
        Line::from(Span::styled(
            "Get a physical copy of your monthly statements delivered to your registered address",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    if state.mail_enabled {
        lines.push(Line::from(format!("Mailing address: {}", MAILING_ADDRESS)));
        lines.push(Line::from(Span::styled(
            "Mail delivery takes 5-7 business days after statement generation",
            Style::default().fg(Color::DarkGray),
        )));
    }
    render_popup(f, "Statement Delivery Settings", lines, 64, 40);
}

fn render_number_pad(f: &mut Frame, pad: &NumberPad) {
    let value = format_cad_whole(pad.value());
    let lines = vec![
        Line::from(Span::styled(
            value,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!(
            "Range: {} - {}",
            format_cad_whole(pad.min),
            format_cad_whole(pad.max)
        )),
        Line::from(""),
        Line::from("Type digits · [Backspace] delete · [c] clear · [m] max"),
        Line::from("[Enter] Done · [Esc] Cancel"),
    ];
    render_popup(f, pad.title, lines, 44, 30);
}

fn render_popup(f: &mut Frame, title: &str, lines: Vec<Line>, percent_x: u16, percent_y: u16) {
    let area = centered_rect(f.area(), percent_x, percent_y);
    f.render_widget(Clear, area);
    let widget = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title.to_string())
            .style(Style::default().fg(Color::White)),
    );
    f.render_widget(widget, area);
}

fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let width = area.width * percent_x / 100;
    let height = area.height * percent_y / 100;
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}
