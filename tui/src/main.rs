//! Aethelgard Hospital ERP: interactive Ratatui dashboard
//!
//! Layout:
//!   ┌─── header ──────────────────────────────────────────────────────────┐
//!   │  ☰ Executive Dashboard        ⌕ search             ◉ 1 notification │
//!   ├─── sidebar ──────┬─── active view ──────────────────────────────────┤
//!   │  ▦ Dashboard     │                                                  │
//!   │  ⚕ Patient EHR   │   dashboard / EHR / finance / inventory          │
//!   │  ≡ Core Finance  │                                                  │
//!   │  ℞ Inventory     │                                                  │
//!   ├──────────────────┴──────────────────────────────────────────────────┤
//!   │  footer (key bindings, status)                                      │
//!   └─────────────────────────────────────────────────────────────────────┘
//!
//! The sidebar is always shown on wide terminals; below `WIDE_LAYOUT_COLS`
//! it is hidden until toggled with [m].
//!
//! Set `API_KEY` to enable advisory actions. Set `AETHELGARD_LOG_FILE` to a
//! path to capture tracing output (stdout belongs to the terminal UI).

use std::{
    fs::File,
    io,
    path::PathBuf,
    sync::{mpsc::Receiver, Arc, Mutex},
    time::Duration,
};

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{BarChart, Block, Borders, Cell, List, ListItem, Paragraph, Row, Table, Wrap},
    Frame, Terminal,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use aethelgard_advisory::{AdvisoryClient, AdvisoryConfig};
use aethelgard_contracts::{
    advisory::AdvisoryResponse,
    finance::{TransactionKind, TransactionStatus},
    insight::InsightSeverity,
    patient::PatientStatus,
};
use aethelgard_ref_hospital::{
    icon::Icon,
    mock_data,
    shell::{sidebar_items, Route, Shell},
    views::RequestState,
    AdvisoryDispatcher,
};

/// Terminals at least this wide keep the sidebar pinned open.
const WIDE_LAYOUT_COLS: u16 = 100;

const LOG_FILE_ENV: &str = "AETHELGARD_LOG_FILE";

const EXPORT_PATH: &str = "ledger.json";

// ── App state ─────────────────────────────────────────────────────────────────

struct App {
    shell: Shell,
    dispatcher: AdvisoryDispatcher,
    completions: Receiver<AdvisoryResponse>,

    // While true, printable keys edit the current view's search query.
    searching: bool,

    // One-line message shown in the footer (export result, ignored keys).
    status: Option<String>,
}

impl App {
    fn new(client: AdvisoryClient) -> Self {
        let (dispatcher, completions) = AdvisoryDispatcher::new(Arc::new(client));
        Self {
            shell: Shell::new(),
            dispatcher,
            completions,
            searching: false,
            status: None,
        }
    }

    fn navigate(&mut self, route: Route) {
        self.searching = false;
        self.status = None;
        self.shell.navigate(route);
        self.shell.close_sidebar();
    }

    /// Fire the current view's advisory action.
    fn trigger(&mut self) {
        match self.shell.trigger_current() {
            Some(ticket) => {
                // Detached: the completion arrives on `completions`.
                let _ = self.dispatcher.dispatch(ticket);
                self.status = None;
            }
            None if self.shell.route() == Route::Ehr && self.shell.ehr.selected().is_none() => {
                self.status = Some("Open a patient chart first.".to_string());
            }
            None => {}
        }
    }

    /// Drain finished advisory requests into the shell.
    fn poll_completions(&mut self) {
        while let Ok(response) = self.completions.try_recv() {
            if !self.shell.apply(&response) {
                info!(request_id = %response.request_id, "stale advisory completion dropped");
            }
        }
    }

    fn export_ledger(&mut self) {
        let path = PathBuf::from(EXPORT_PATH);
        self.status = Some(match self.shell.finance.export_ledger(&path) {
            Ok(n) => format!("Exported {} entries to {}", n, path.display()),
            Err(e) => {
                warn!(error = %e, "ledger export failed");
                e.to_string()
            }
        });
    }

    fn search_query(&self) -> Option<&str> {
        match self.shell.route() {
            Route::Ehr => Some(self.shell.ehr.query()),
            Route::Finance => Some(self.shell.finance.query()),
            Route::Dashboard | Route::Inventory => None,
        }
    }

    fn edit_query(&mut self, edit: impl FnOnce(&mut String)) {
        let Some(current) = self.search_query() else {
            return;
        };
        let mut query = current.to_string();
        edit(&mut query);
        match self.shell.route() {
            Route::Ehr => self.shell.ehr.set_query(query),
            Route::Finance => self.shell.finance.set_query(query),
            Route::Dashboard | Route::Inventory => {}
        }
    }

    /// Handle one key press. Returns false when the app should exit.
    fn on_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            return false;
        }

        if self.searching {
            match code {
                KeyCode::Esc | KeyCode::Enter => self.searching = false,
                KeyCode::Backspace => self.edit_query(|q| {
                    q.pop();
                }),
                KeyCode::Char(c) => self.edit_query(|q| q.push(c)),
                _ => {}
            }
            return true;
        }

        match code {
            KeyCode::Char('q') | KeyCode::Char('Q') => return false,

            KeyCode::Char('1') => self.navigate(Route::Dashboard),
            KeyCode::Char('2') => self.navigate(Route::Ehr),
            KeyCode::Char('3') => self.navigate(Route::Finance),
            KeyCode::Char('4') => self.navigate(Route::Inventory),
            KeyCode::Tab => self.navigate(self.shell.route().next()),

            KeyCode::Char('m') => self.shell.toggle_sidebar(),
            KeyCode::Char('a') => self.trigger(),

            KeyCode::Char('/') if self.search_query().is_some() => {
                self.searching = true;
                self.status = None;
            }
            KeyCode::Char('e') if self.shell.route() == Route::Finance => self.export_ledger(),
            KeyCode::Char('x') if self.shell.route() == Route::Finance => {
                self.shell.finance.dismiss_audit();
            }

            // EHR list navigation.
            KeyCode::Char('j') | KeyCode::Down if self.shell.route() == Route::Ehr => {
                self.shell.ehr.move_cursor(1)
            }
            KeyCode::Char('k') | KeyCode::Up if self.shell.route() == Route::Ehr => {
                self.shell.ehr.move_cursor(-1)
            }
            KeyCode::Enter if self.shell.route() == Route::Ehr => {
                self.shell.ehr.select_at_cursor();
            }
            KeyCode::Esc => {
                if self.shell.route() == Route::Ehr && self.shell.ehr.selected().is_some() {
                    self.shell.ehr.clear_selection();
                } else {
                    self.shell.close_sidebar();
                }
            }

            _ => {}
        }
        true
    }
}

// ── Rendering ─────────────────────────────────────────────────────────────────

fn ui(f: &mut Frame, app: &App) {
    let full = f.area();

    let outer_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Min(10),   // sidebar + view
            Constraint::Length(3), // footer
        ])
        .split(full);

    render_header(f, outer_chunks[0], app);

    let show_sidebar = full.width >= WIDE_LAYOUT_COLS || app.shell.sidebar_open();
    let view_area = if show_sidebar {
        let mid_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(26), Constraint::Min(40)])
            .split(outer_chunks[1]);
        render_sidebar(f, mid_chunks[0], app);
        mid_chunks[1]
    } else {
        outer_chunks[1]
    };

    match app.shell.route() {
        Route::Dashboard => render_dashboard(f, view_area, app),
        Route::Ehr => render_ehr(f, view_area, app),
        Route::Finance => render_finance(f, view_area, app),
        Route::Inventory => render_inventory(f, view_area, app),
    }

    render_footer(f, outer_chunks[2], app);
}

fn panel(title: &str) -> Block<'static> {
    Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
}

fn label(s: &str) -> Span<'_> {
    Span::styled(s, Style::default().fg(Color::Gray))
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let title_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);

    let route = app.shell.route();
    let mut spans: Vec<Span> = vec![
        Span::styled(format!("{} ", Icon::Menu.glyph()), Style::default().fg(Color::DarkGray)),
        Span::styled(format!("{}    ", route.label()), title_style),
    ];

    if let Some(query) = app.search_query() {
        let style = if app.searching {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        };
        let shown = if query.is_empty() && !app.searching {
            "[/] search".to_string()
        } else {
            format!("{}_", query)
        };
        spans.push(Span::styled(format!("{} {}  ", Icon::Search.glyph(), shown), style));
    }

    let notifications = app.shell.notifications();
    let bell_color = if notifications.is_empty() {
        Color::DarkGray
    } else {
        Color::Yellow
    };
    spans.push(Span::styled(
        format!("  {} {}", Icon::Bell.glyph(), notifications.len()),
        Style::default().fg(bell_color).add_modifier(Modifier::BOLD),
    ));
    if let Some(latest) = notifications.last() {
        spans.push(Span::styled(
            format!(
                "  {} at {}",
                latest.title,
                latest.timestamp.with_timezone(&chrono::Local).format("%H:%M")
            ),
            Style::default().fg(severity_color(latest.severity)),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(header, area);
}

fn render_sidebar(f: &mut Frame, area: Rect, app: &App) {
    let (main, system) = sidebar_items();
    let mut items: Vec<ListItem> = Vec::new();

    items.push(ListItem::new(Line::from(Span::styled(
        " AETHELGARD",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ))));
    items.push(ListItem::new(""));

    for (i, item) in main.iter().enumerate() {
        let active = item.route == Some(app.shell.route());
        let style = if active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        items.push(ListItem::new(Line::from(Span::styled(
            format!(" {} {} {}", i + 1, item.icon.glyph(), item.label),
            style,
        ))));
    }

    items.push(ListItem::new(""));
    items.push(ListItem::new(Span::styled(
        " SYSTEM",
        Style::default().fg(Color::DarkGray),
    )));
    for item in &system {
        items.push(ListItem::new(Span::styled(
            format!("   {} {}", item.icon.glyph(), item.label),
            Style::default().fg(Color::DarkGray),
        )));
    }

    f.render_widget(List::new(items).block(panel("Navigation")), area);
}

/// Advisory panel body shared by the three views that have one.
fn advisory_lines<'a>(state: &'a RequestState, idle_hint: &'a str, pending: &'a str) -> Vec<Line<'a>> {
    match state {
        RequestState::Idle => vec![Line::from(Span::styled(
            idle_hint,
            Style::default().fg(Color::DarkGray),
        ))],
        RequestState::Pending { .. } => vec![Line::from(Span::styled(
            pending,
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ))],
        RequestState::Succeeded(text) => text
            .lines()
            .map(|l| Line::from(Span::styled(l, Style::default().fg(Color::White))))
            .collect(),
        RequestState::Failed(text) => vec![Line::from(Span::styled(
            text.as_str(),
            Style::default().fg(Color::Red),
        ))],
    }
}

// ── Executive dashboard ───────────────────────────────────────────────────────

fn render_dashboard(f: &mut Frame, area: Rect, app: &App) {
    let view = &app.shell.dashboard;

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(8)])
        .split(area);

    let card_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(rows[0]);

    for (card, chunk) in view.stat_cards().iter().zip(card_chunks.iter()) {
        let mut lines = vec![Line::from(Span::styled(
            card.value,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ))];
        let mut sub = vec![Span::styled(card.sub, Style::default().fg(Color::Gray))];
        if card.trend != 0 {
            let (arrow, color) = if card.trend > 0 {
                (Icon::TrendingUp.glyph(), Color::Green)
            } else {
                ("↘", Color::Red)
            };
            sub.push(Span::styled(
                format!("  {}{}%", arrow, card.trend.abs()),
                Style::default().fg(color),
            ));
        }
        lines.push(Line::from(sub));
        let title = format!("{} {}", card.icon.glyph(), card.title);
        f.render_widget(Paragraph::new(lines).block(panel(&title)), *chunk);
    }

    let mid = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rows[1]);

    let chart_rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(1)])
        .split(mid[0]);

    let data: Vec<(&str, u64)> = view.occupancy().iter().map(|p| (p.day, p.occupancy)).collect();
    let chart = BarChart::default()
        .block(panel("Weekly Bed Occupancy (%)"))
        .data(data.as_slice())
        .bar_width(5)
        .bar_gap(1)
        .max(100)
        .bar_style(Style::default().fg(Color::Cyan))
        .value_style(Style::default().fg(Color::Black).bg(Color::Cyan));
    f.render_widget(chart, chart_rows[0]);

    let staff: Vec<String> = view
        .occupancy()
        .iter()
        .map(|p| format!("{} {}", p.day, p.staff))
        .collect();
    f.render_widget(
        Paragraph::new(Line::from(vec![label(" Staff on duty: "), Span::raw(staff.join("  "))])),
        chart_rows[1],
    );

    let lines = advisory_lines(
        view.forecast_state(),
        "Press [a] to generate an AI forecast of occupancy trends.",
        "Generating forecast...",
    );
    let title = format!("{} AI Occupancy Forecast", Icon::Sparkles.glyph());
    f.render_widget(
        Paragraph::new(lines).block(panel(&title)).wrap(Wrap { trim: false }),
        mid[1],
    );
}

// ── Patient EHR ───────────────────────────────────────────────────────────────

fn status_color(status: PatientStatus) -> Color {
    match status {
        PatientStatus::Critical => Color::Red,
        PatientStatus::Inpatient => Color::Cyan,
        PatientStatus::Outpatient => Color::Green,
        PatientStatus::Discharged => Color::DarkGray,
    }
}

fn render_ehr(f: &mut Frame, area: Rect, app: &App) {
    let view = &app.shell.ehr;

    let Some(patient) = view.selected() else {
        let mut items: Vec<ListItem> = Vec::new();
        let filtered = view.filtered();
        if filtered.is_empty() {
            items.push(ListItem::new(Span::styled(
                "  No patients match the search.",
                Style::default().fg(Color::DarkGray),
            )));
        }
        for (i, p) in filtered.iter().enumerate() {
            let marker = if i == view.cursor() { "▸" } else { " " };
            let line = Line::from(vec![
                Span::styled(format!(" {} ", marker), Style::default().fg(Color::Cyan)),
                Span::styled(format!("{:<8}", p.id), Style::default().fg(Color::DarkGray)),
                Span::styled(
                    format!("{:<20}", truncate(&p.name, 19)),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!("{:>3}  {:<7}", p.age, format!("{:?}", p.gender))),
                Span::styled(
                    format!("{:<11}", p.status.label()),
                    Style::default().fg(status_color(p.status)),
                ),
                Span::styled(truncate(&p.diagnosis, 40), Style::default().fg(Color::Gray)),
            ]);
            items.push(ListItem::new(line));
        }
        let title = format!("{} Patient Records", Icon::Stethoscope.glyph());
        f.render_widget(List::new(items).block(panel(&title)), area);
        return;
    };

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let mut lines: Vec<Line> = vec![
        Line::from(vec![
            Span::styled(
                patient.name.as_str(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                patient.status.label(),
                Style::default().fg(status_color(patient.status)).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            label("  MRN:         "),
            Span::raw(patient.id.as_str()),
        ]),
        Line::from(vec![
            label("  Age/Gender:  "),
            Span::raw(format!("{} / {:?}", patient.age, patient.gender)),
        ]),
        Line::from(vec![
            label("  Room:        "),
            Span::raw(patient.room_number.as_deref().unwrap_or("-")),
        ]),
        Line::from(vec![
            label("  Admitted:    "),
            Span::raw(patient.admission_date.format("%Y-%m-%d").to_string()),
        ]),
        Line::from(vec![
            label("  Diagnosis:   "),
            Span::raw(patient.diagnosis.as_str()),
        ]),
        Line::from(""),
    ];

    match &patient.last_vitals {
        Some(v) => {
            lines.push(Line::from(Span::styled(
                format!("  {} Vitals", Icon::Activity.glyph()),
                Style::default().fg(Color::Cyan),
            )));
            lines.push(Line::from(vec![
                label("    BP "),
                Span::raw(format!("{:<9}", v.bp)),
                label("HR "),
                Span::raw(format!("{:<6}", v.hr)),
                label("Temp "),
                Span::raw(format!("{:.1}°C", v.temp)),
            ]));
        }
        None => lines.push(Line::from(Span::styled(
            "  No vitals recorded.",
            Style::default().fg(Color::DarkGray),
        ))),
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("  {} Clinical Notes", Icon::FileText.glyph()),
        Style::default().fg(Color::Cyan),
    )));
    for note in mock_data::clinical_notes() {
        lines.push(Line::from(Span::styled(
            format!("    {}", note),
            Style::default().fg(Color::Gray),
        )));
    }

    f.render_widget(
        Paragraph::new(lines)
            .block(panel("Patient Chart  [Esc] back"))
            .wrap(Wrap { trim: false }),
        cols[0],
    );

    let lines = advisory_lines(
        view.analysis_state(),
        "Press [a] to analyze this patient's chart for insights.",
        "Analyzing patient context...",
    );
    let title = format!("{} Clinical Assistant", Icon::Sparkles.glyph());
    f.render_widget(
        Paragraph::new(lines).block(panel(&title)).wrap(Wrap { trim: false }),
        cols[1],
    );
}

// ── Core finance ──────────────────────────────────────────────────────────────

fn render_finance(f: &mut Frame, area: Rect, app: &App) {
    let view = &app.shell.finance;

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(7), Constraint::Length(8)])
        .split(area);

    let net = view.net();
    let summary = Line::from(vec![
        label(" Credits: "),
        Span::styled(
            format!("${:.2}", view.total(TransactionKind::Credit)),
            Style::default().fg(Color::Green),
        ),
        label("   Debits: "),
        Span::styled(
            format!("${:.2}", view.total(TransactionKind::Debit)),
            Style::default().fg(Color::Red),
        ),
        label("   Net: "),
        Span::styled(
            format!("{}${:.2}", if net < 0.0 { "-" } else { "+" }, net.abs()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ]);
    f.render_widget(Paragraph::new(summary).block(panel("Cash Flow")), rows[0]);

    let table_rows: Vec<Row> = view
        .filtered()
        .into_iter()
        .map(|t| {
            let amount_color = match t.kind {
                TransactionKind::Credit => Color::Green,
                TransactionKind::Debit => Color::White,
            };
            let status_color = match t.status {
                TransactionStatus::Cleared => Color::Green,
                TransactionStatus::Pending => Color::Yellow,
                TransactionStatus::Flagged => Color::Red,
            };
            Row::new(vec![
                Cell::from(t.id.clone()),
                Cell::from(t.date.format("%Y-%m-%d").to_string()),
                Cell::from(truncate(&t.description, 34)),
                Cell::from(t.category.to_string()),
                Cell::from(t.reference_id.clone()),
                Cell::from(Span::styled(t.display_amount(), Style::default().fg(amount_color))),
                Cell::from(Span::styled(t.status.to_string(), Style::default().fg(status_color))),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(9),
        Constraint::Length(11),
        Constraint::Min(20),
        Constraint::Length(12),
        Constraint::Length(14),
        Constraint::Length(14),
        Constraint::Length(8),
    ];
    let header = Row::new(vec!["ID", "Date", "Description", "Category", "Reference", "Amount", "Status"])
        .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD));
    let table = Table::new(table_rows, widths)
        .header(header)
        .block(panel("General Ledger  [e] export"));
    f.render_widget(table, rows[1]);

    let lines = advisory_lines(
        view.audit_state(),
        "Press [a] to run the AI fraud audit over the ledger.",
        "Auditing...",
    );
    let title = format!("{} AI Fraud Audit", Icon::AlertCircle.glyph());
    f.render_widget(
        Paragraph::new(lines).block(panel(&title)).wrap(Wrap { trim: false }),
        rows[2],
    );
}

// ── Pharmacy inventory ────────────────────────────────────────────────────────

fn render_inventory(f: &mut Frame, area: Rect, app: &App) {
    let view = &app.shell.inventory;
    let mut items: Vec<ListItem> = Vec::new();

    items.push(ListItem::new(Line::from(vec![
        label(" Low stock: "),
        Span::styled(
            view.low_stock().len().to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        label("   Predicted shortages: "),
        Span::styled(
            view.predicted_shortages().len().to_string(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
    ])));
    items.push(ListItem::new(""));

    for item in view.items() {
        let stock_color = if item.is_low_stock() { Color::Red } else { Color::Green };
        items.push(ListItem::new(Line::from(vec![
            Span::styled(
                format!(" {} ", Icon::Pill.glyph()),
                Style::default().fg(Color::Cyan),
            ),
            Span::styled(
                format!("{:<22}", item.name),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("{:<12}", item.sku), Style::default().fg(Color::DarkGray)),
            Span::styled(format!("{:<15}", item.category.to_string()), Style::default().fg(Color::Gray)),
        ])));

        let demand = item
            .predicted_demand
            .map(|d| format!("{} {}", d, item.unit))
            .unwrap_or_else(|| "-".to_string());
        items.push(ListItem::new(Line::from(vec![
            label("     Stock "),
            Span::styled(
                format!("{} {}", item.stock_level, item.unit),
                Style::default().fg(stock_color),
            ),
            Span::styled(
                format!("   Min {}", item.min_threshold),
                Style::default().fg(Color::Gray),
            ),
            label("   Forecast demand "),
            Span::raw(demand),
            label("   Expires "),
            Span::raw(item.expiry_label()),
        ])));

        if let Some(alert) = item.alert() {
            let (glyph, color) = if item.is_low_stock() {
                (Icon::AlertTriangle.glyph(), Color::Red)
            } else {
                (Icon::Sparkles.glyph(), Color::Yellow)
            };
            items.push(ListItem::new(Span::styled(
                format!("     {} {}", glyph, alert),
                Style::default().fg(color),
            )));
        }
        items.push(ListItem::new(""));
    }

    let title = format!("{} Pharmacy Inventory", Icon::Pill.glyph());
    f.render_widget(List::new(items).block(panel(&title)), area);
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Cyan));

    let mut spans: Vec<Span> = if app.searching {
        vec![
            Span::styled(" SEARCH ", Style::default().fg(Color::Black).bg(Color::Cyan)),
            Span::raw("  type to filter  "),
            key("[Enter/Esc] "),
            Span::raw("Done"),
        ]
    } else {
        vec![
            key(" [1-4] "),
            Span::raw("View  "),
            key("[Tab] "),
            Span::raw("Next  "),
            key("[m] "),
            Span::raw("Menu  "),
        ]
    };

    if !app.searching {
        match app.shell.route() {
            Route::Dashboard => {
                spans.push(key("[a] "));
                spans.push(Span::raw("Forecast  "));
            }
            Route::Ehr => {
                spans.push(key("[j/k] "));
                spans.push(Span::raw("Move  "));
                spans.push(key("[Enter] "));
                spans.push(Span::raw("Open  "));
                spans.push(key("[a] "));
                spans.push(Span::raw("Analyze  "));
                spans.push(key("[/] "));
                spans.push(Span::raw("Search  "));
            }
            Route::Finance => {
                spans.push(key("[a] "));
                spans.push(Span::raw("Audit  "));
                spans.push(key("[x] "));
                spans.push(Span::raw("Dismiss  "));
                spans.push(key("[e] "));
                spans.push(Span::raw("Export  "));
                spans.push(key("[/] "));
                spans.push(Span::raw("Search  "));
            }
            Route::Inventory => {}
        }
        spans.push(key("[q] "));
        spans.push(Span::raw("Quit"));
    }

    if let Some(status) = &app.status {
        spans.push(Span::styled(
            format!("   {}", status),
            Style::default().fg(Color::Yellow),
        ));
    }

    let footer = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(footer, area);
}

// ── Utility helpers ───────────────────────────────────────────────────────────

/// Truncate a string to at most `max` chars, appending "…" if truncated.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

fn severity_color(severity: InsightSeverity) -> Color {
    match severity {
        InsightSeverity::Low => Color::DarkGray,
        InsightSeverity::Medium => Color::Yellow,
        InsightSeverity::High => Color::Red,
    }
}

// ── Logging ───────────────────────────────────────────────────────────────────

/// Log to the file named by `AETHELGARD_LOG_FILE`, or not at all.
fn init_logging() -> io::Result<()> {
    let Ok(path) = std::env::var(LOG_FILE_ENV) else {
        return Ok(());
    };
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .compact()
        .init();
    Ok(())
}

// ── Terminal setup / teardown ─────────────────────────────────────────────────

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

// ── Main event loop ───────────────────────────────────────────────────────────

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    // Short poll so completions from worker threads show up promptly.
    const POLL_MS: u64 = 100;

    loop {
        app.poll_completions();
        terminal.draw(|f| ui(f, app))?;

        if event::poll(Duration::from_millis(POLL_MS))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if !app.on_key(key.code, key.modifiers) {
                    return Ok(());
                }
            }
        }
    }
}

fn main() -> io::Result<()> {
    init_logging()?;

    let client = match AdvisoryClient::gemini(AdvisoryConfig::from_env()) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Failed to start advisory client: {}", e);
            std::process::exit(1);
        }
    };
    if client.config().credential().is_none() {
        warn!("API_KEY not set; advisory panels will show the unavailable message");
    }

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        // Best-effort terminal restore on panic.
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let mut terminal = setup_terminal()?;
    let mut app = App::new(client);

    let result = run(&mut terminal, &mut app);

    restore_terminal(&mut terminal)?;
    result
}
