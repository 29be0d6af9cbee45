// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use gwadmin_app::{
    AppCommand, AppEvent, AppState, InputMode, LogRecord, PageControl, ReservationRecord,
    ResourceKind, TableCell, TableProjection, TicketRecord, Tone,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Tabs};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

const STATUS_CLEAR_DELAY: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceSnapshot {
    Reservations(Vec<ReservationRecord>),
    Tickets(Vec<TicketRecord>),
    Logs(Vec<LogRecord>),
}

impl ResourceSnapshot {
    pub const fn kind(&self) -> ResourceKind {
        match self {
            Self::Reservations(_) => ResourceKind::Reservations,
            Self::Tickets(_) => ResourceKind::Tickets,
            Self::Logs(_) => ResourceKind::Logs,
        }
    }

    pub fn row_count(&self) -> usize {
        match self {
            Self::Reservations(rows) => rows.len(),
            Self::Tickets(rows) => rows.len(),
            Self::Logs(rows) => rows.len(),
        }
    }

    /// Runs the list-view pipeline for this snapshot under `state`'s view.
    pub fn project(&self, state: &AppState) -> TableProjection {
        let view = state.view(self.kind());
        match self {
            Self::Reservations(rows) => TableProjection::project(&view.recompute(rows)),
            Self::Tickets(rows) => TableProjection::project(&view.recompute(rows)),
            Self::Logs(rows) => TableProjection::project(&view.recompute(rows)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResourceCounts {
    pub reservations: usize,
    pub tickets: usize,
    pub logs: usize,
}

impl ResourceCounts {
    pub const fn get(&self, kind: ResourceKind) -> usize {
        match kind {
            ResourceKind::Reservations => self.reservations,
            ResourceKind::Tickets => self.tickets,
            ResourceKind::Logs => self.logs,
        }
    }
}

pub trait AppRuntime {
    fn load_counts(&mut self) -> Result<ResourceCounts>;
    fn load_snapshot(&mut self, kind: ResourceKind) -> Result<ResourceSnapshot>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InternalEvent {
    ClearStatus { token: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct ViewData {
    counts: ResourceCounts,
    snapshot: Option<ResourceSnapshot>,
    selected_row: usize,
    detail_visible: bool,
    help_visible: bool,
    status_token: u64,
}

impl ViewData {
    fn projection(&self, state: &AppState) -> Option<TableProjection> {
        self.snapshot
            .as_ref()
            .filter(|snapshot| snapshot.kind() == state.active_tab)
            .map(|snapshot| snapshot.project(state))
    }
}

pub fn run_app<R: AppRuntime>(state: &mut AppState, runtime: &mut R) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData::default();
    let (internal_tx, internal_rx) = mpsc::channel();

    if let Err(error) = refresh_view_data(state, runtime, &mut view_data) {
        warn!(error = %format!("{error:#}"), "initial load failed");
        state.dispatch(AppCommand::SetStatus(format!("load failed: {error}")));
    }

    let mut result = Ok(());
    loop {
        process_internal_events(state, &mut view_data, &internal_rx);

        if let Err(error) = terminal.draw(|frame| render(frame, state, &view_data)) {
            result = Err(error).context("draw frame");
            break;
        }

        let has_event = match event::poll(Duration::from_millis(120)).context("poll event") {
            Ok(has_event) => has_event,
            Err(error) => {
                result = Err(error);
                break;
            }
        };
        if has_event {
            match event::read().context("read event") {
                Ok(Event::Key(key)) => {
                    if handle_key_event(state, runtime, &mut view_data, &internal_tx, key) {
                        break;
                    }
                }
                Ok(_) => {}
                Err(error) => {
                    result = Err(error);
                    break;
                }
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

fn process_internal_events(
    state: &mut AppState,
    view_data: &mut ViewData,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                state.dispatch(AppCommand::ClearStatus);
            }
            InternalEvent::ClearStatus { .. } => {}
        }
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(STATUS_CLEAR_DELAY);
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn emit_status(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    state.dispatch(AppCommand::SetStatus(message.into()));
    view_data.status_token = view_data.status_token.saturating_add(1);
    schedule_status_clear(internal_tx, view_data.status_token);
}

/// Returns true when the console should exit.
fn handle_key_event<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if view_data.help_visible {
        if key.code == KeyCode::Esc || key.code == KeyCode::Char('?') {
            view_data.help_visible = false;
        }
        return false;
    }

    if view_data.detail_visible {
        if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
            view_data.detail_visible = false;
        }
        return false;
    }

    if state.mode == InputMode::Search {
        handle_search_key(state, runtime, view_data, internal_tx, key);
        return false;
    }

    let total_pages = current_total_pages(state, view_data);
    let command = match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) => return true,
        (KeyCode::Tab, _) => AppCommand::NextTab,
        (KeyCode::BackTab, _) => AppCommand::PrevTab,
        (KeyCode::Right | KeyCode::Char('l'), _) => AppCommand::CycleFilter(1),
        (KeyCode::Left | KeyCode::Char('h'), _) => AppCommand::CycleFilter(-1),
        (KeyCode::Char('/'), _) => AppCommand::EnterSearch,
        (KeyCode::Char('n') | KeyCode::PageDown, _) => AppCommand::NextPage { total_pages },
        (KeyCode::Char('p') | KeyCode::PageUp, _) => AppCommand::PrevPage { total_pages },
        (KeyCode::Char('g') | KeyCode::Home, _) => AppCommand::FirstPage,
        (KeyCode::Char('G') | KeyCode::End, _) => AppCommand::LastPage { total_pages },
        (KeyCode::Char(digit @ '1'..='9'), _) => AppCommand::GoToPage {
            page: usize::from(digit as u8 - b'0'),
            total_pages,
        },
        (KeyCode::Char('j') | KeyCode::Down, _) => {
            move_row(state, view_data, 1);
            return false;
        }
        (KeyCode::Char('k') | KeyCode::Up, _) => {
            move_row(state, view_data, -1);
            return false;
        }
        (KeyCode::Enter, _) => {
            open_detail(state, view_data, internal_tx);
            return false;
        }
        (KeyCode::Char('?'), _) => {
            view_data.help_visible = true;
            return false;
        }
        (KeyCode::Char('r'), _) => {
            match refresh_view_data(state, runtime, view_data) {
                Ok(()) => emit_status(state, view_data, internal_tx, "reloaded"),
                Err(error) => emit_status(
                    state,
                    view_data,
                    internal_tx,
                    format!("load failed: {error}"),
                ),
            }
            return false;
        }
        (KeyCode::Esc, _) if !state.active_view().query().is_empty() => {
            AppCommand::SetQuery(String::new())
        }
        _ => return false,
    };

    dispatch_and_refresh(state, runtime, view_data, command, internal_tx);
    false
}

fn handle_search_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    match key.code {
        KeyCode::Enter => {
            dispatch_and_refresh(state, runtime, view_data, AppCommand::ExitSearch, internal_tx);
        }
        KeyCode::Esc => {
            dispatch_and_refresh(
                state,
                runtime,
                view_data,
                AppCommand::SetQuery(String::new()),
                internal_tx,
            );
            dispatch_and_refresh(state, runtime, view_data, AppCommand::ExitSearch, internal_tx);
        }
        KeyCode::Backspace => {
            dispatch_and_refresh(state, runtime, view_data, AppCommand::PopQueryChar, internal_tx);
        }
        KeyCode::Char(value) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            dispatch_and_refresh(
                state,
                runtime,
                view_data,
                AppCommand::PushQueryChar(value),
                internal_tx,
            );
        }
        _ => {}
    }
}

fn dispatch_and_refresh<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    command: AppCommand,
    internal_tx: &Sender<InternalEvent>,
) {
    debug!(?command, "dispatch");
    let events = state.dispatch(command);
    if should_refresh_view(&events)
        && let Err(error) = refresh_view_data(state, runtime, view_data)
    {
        emit_status(
            state,
            view_data,
            internal_tx,
            format!("load failed: {error}"),
        );
    }
    if should_reset_selection(&events) {
        view_data.selected_row = 0;
    }
    if events
        .iter()
        .any(|event| matches!(event, AppEvent::StatusUpdated(_)))
    {
        view_data.status_token = view_data.status_token.saturating_add(1);
        schedule_status_clear(internal_tx, view_data.status_token);
    }
}

fn should_refresh_view(events: &[AppEvent]) -> bool {
    events
        .iter()
        .any(|event| matches!(event, AppEvent::TabChanged(_)))
}

fn should_reset_selection(events: &[AppEvent]) -> bool {
    events.iter().any(|event| {
        matches!(
            event,
            AppEvent::TabChanged(_)
                | AppEvent::FilterChanged { .. }
                | AppEvent::QueryChanged { .. }
                | AppEvent::PageChanged { .. }
        )
    })
}

fn refresh_view_data<R: AppRuntime>(
    state: &AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
) -> Result<()> {
    view_data.counts = runtime.load_counts()?;
    let snapshot = runtime.load_snapshot(state.active_tab)?;
    debug!(
        resource = state.active_tab.label(),
        rows = snapshot.row_count(),
        "loaded snapshot"
    );
    view_data.snapshot = Some(snapshot);
    clamp_selection(state, view_data);
    Ok(())
}

fn current_total_pages(state: &AppState, view_data: &ViewData) -> usize {
    view_data
        .projection(state)
        .map_or(0, |projection| projection.total_pages)
}

fn visible_row_count(state: &AppState, view_data: &ViewData) -> usize {
    view_data
        .projection(state)
        .map_or(0, |projection| projection.rows.len())
}

fn clamp_selection(state: &AppState, view_data: &mut ViewData) {
    let rows = visible_row_count(state, view_data);
    view_data.selected_row = view_data.selected_row.min(rows.saturating_sub(1));
}

fn move_row(state: &AppState, view_data: &mut ViewData, delta: isize) {
    let rows = visible_row_count(state, view_data);
    if rows == 0 {
        view_data.selected_row = 0;
        return;
    }
    let next = view_data.selected_row as isize + delta;
    view_data.selected_row = next.clamp(0, rows as isize - 1) as usize;
}

fn open_detail(state: &mut AppState, view_data: &mut ViewData, internal_tx: &Sender<InternalEvent>) {
    if visible_row_count(state, view_data) == 0 {
        emit_status(state, view_data, internal_tx, "nothing to show");
        return;
    }
    view_data.detail_visible = true;
}

fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Gray => Color::Gray,
        Tone::Yellow => Color::Yellow,
        Tone::Green => Color::Green,
        Tone::Blue => Color::Blue,
        Tone::Red => Color::Red,
        Tone::Cyan => Color::Cyan,
        Tone::Indigo => Color::LightBlue,
        Tone::Purple => Color::Magenta,
    }
}

fn tab_title(kind: ResourceKind, counts: &ResourceCounts) -> String {
    format!(" {} ({}) ", kind.title(), counts.get(kind))
}

fn filter_bar_line(state: &AppState) -> Line<'static> {
    let active = state.active_filter_index();
    let mut spans = Vec::new();
    for (index, label) in state.active_tab.filter_tabs().iter().enumerate() {
        if index > 0 {
            spans.push(Span::raw("  "));
        }
        if index == active {
            spans.push(Span::styled(
                format!("[{label}]"),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled(
                format!(" {label} "),
                Style::default().fg(Color::Gray),
            ));
        }
    }
    Line::from(spans)
}

fn search_text(state: &AppState) -> String {
    let query = state.active_view().query();
    match state.mode {
        InputMode::Search => format!("search: {query}_"),
        InputMode::Nav if query.is_empty() => "search: (press / to search by name)".to_owned(),
        InputMode::Nav => format!("search: {query}"),
    }
}

fn pagination_line(controls: &[PageControl]) -> Line<'static> {
    let mut spans = Vec::with_capacity(controls.len() * 2);
    for (index, control) in controls.iter().enumerate() {
        if index > 0 {
            spans.push(Span::raw(" "));
        }
        let style = if !control.enabled {
            Style::default().fg(Color::DarkGray)
        } else if control.current {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(control.display_label(), style));
    }
    Line::from(spans)
}

fn range_text(projection: &TableProjection, page_size: usize) -> String {
    if projection.rows.is_empty() {
        return format!("0 of {}", projection.filtered_count);
    }
    let start = (projection.page - 1) * page_size + 1;
    let end = start + projection.rows.len() - 1;
    format!("{start}-{end} of {}", projection.filtered_count)
}

fn mode_label(mode: InputMode) -> &'static str {
    match mode {
        InputMode::Nav => "NAV",
        InputMode::Search => "SEARCH",
    }
}

fn status_text(state: &AppState, view_data: &ViewData) -> String {
    if view_data.help_visible || view_data.detail_visible {
        return String::new();
    }

    let mode = mode_label(state.mode);
    let default = match state.mode {
        InputMode::Nav => {
            "tab resource | h/l filter | / search | n/p page | j/k row | enter details | ? help | q quit"
        }
        InputMode::Search => "type to search | backspace delete | enter keep | esc clear",
    };
    match &state.status_line {
        Some(status) => format!("{mode} | {status} | {default}"),
        None => format!("{mode} | {default}"),
    }
}

fn detail_overlay_text(projection: &TableProjection, selected_row: usize) -> String {
    let Some(row) = projection.rows.get(selected_row) else {
        return String::new();
    };
    row.details
        .iter()
        .map(|(label, value)| format!("{label}: {value}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn help_overlay_text() -> &'static str {
    "global: ctrl+q quit | ? help\n\
nav: tab/shift+tab resource | h/l or left/right filter tab | / search\n\
nav: n/p or pgdn/pgup page | 1-9 go to page | g/G first/last page\n\
nav: j/k row | enter details | r reload | esc clear search | q quit\n\
search: type to filter by name | backspace delete | enter keep | esc clear\n\
details: esc/enter close"
}

fn render(frame: &mut ratatui::Frame<'_>, state: &AppState, view_data: &ViewData) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(2),
        ])
        .split(frame.area());

    let tab_titles = ResourceKind::ALL
        .iter()
        .map(|kind| tab_title(*kind, &view_data.counts))
        .collect::<Vec<String>>();
    let tabs = Tabs::new(tab_titles)
        .block(Block::default().title("gwadmin").borders(Borders::ALL))
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .select(state.active_tab.index());
    frame.render_widget(tabs, layout[0]);

    let search_style = if state.mode == InputMode::Search {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    };
    let controls = Paragraph::new(Text::from(vec![
        filter_bar_line(state),
        Line::from(Span::styled(search_text(state), search_style)),
    ]))
    .block(Block::default().borders(Borders::ALL).title("filter"));
    frame.render_widget(controls, layout[1]);

    let projection = view_data.projection(state);
    render_table(frame, layout[2], state, view_data, projection.as_ref());

    if let Some(projection) = &projection {
        let mut line = pagination_line(&projection.controls());
        line.spans.push(Span::styled(
            format!("   {}", range_text(projection, state.active_view().page_size())),
            Style::default().fg(Color::Gray),
        ));
        frame.render_widget(Paragraph::new(line), layout[3]);
    }

    let status_widget = Paragraph::new(status_text(state, view_data))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(status_widget, layout[4]);

    if view_data.detail_visible
        && let Some(projection) = &projection
    {
        let area = centered_rect(60, 60, frame.area());
        frame.render_widget(Clear, area);
        let detail = Paragraph::new(detail_overlay_text(projection, view_data.selected_row))
            .block(
                Block::default()
                    .title(format!("{} details", state.active_tab.label()))
                    .borders(Borders::ALL)
                    .style(Style::default().fg(Color::Cyan)),
            );
        frame.render_widget(detail, area);
    }

    if view_data.help_visible {
        let area = centered_rect(80, 50, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .block(Block::default().title("help").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

fn render_table(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    state: &AppState,
    view_data: &ViewData,
    projection: Option<&TableProjection>,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(state.active_tab.label());

    let Some(projection) = projection else {
        frame.render_widget(Paragraph::new(String::new()).block(block), area);
        return;
    };

    if let Some(message) = projection.empty_message() {
        let empty = Paragraph::new(message)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let header = Row::new(projection.headers.iter().map(|label| {
        Cell::from(*label).style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
    }));

    let rows = projection.rows.iter().enumerate().map(|(row_index, row)| {
        let height = if row.cells.iter().any(|cell| cell.detail.is_some()) {
            2
        } else {
            1
        };
        let mut style = Style::default();
        if row_index == view_data.selected_row {
            style = style.bg(Color::DarkGray);
        }
        Row::new(row.cells.iter().map(table_cell)).height(height).style(style)
    });

    let widths = vec![Constraint::Min(8); projection.headers.len().max(1)];
    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .block(block);
    frame.render_widget(table, area);
}

fn table_cell(cell: &TableCell) -> Cell<'static> {
    let main = match cell.badge {
        Some(badge) => Span::styled(
            cell.text.clone(),
            Style::default()
                .fg(tone_color(badge.tone))
                .add_modifier(Modifier::BOLD),
        ),
        None => Span::raw(cell.text.clone()),
    };
    let mut lines = vec![Line::from(main)];
    if let Some(detail) = &cell.detail {
        lines.push(Line::from(Span::styled(
            detail.clone(),
            Style::default().fg(Color::DarkGray),
        )));
    }
    Cell::from(Text::from(lines))
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
