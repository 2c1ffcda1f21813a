// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow};
use bookdesk_app::{
    AddOn, AppCommand, AppEvent, AppState, BACK_LABEL, BandColor, BookingDraft, BookingForm,
    BookingResponse, FieldInput, FieldKey, HUMAN_CONFIRMATION_NOTICE, NO_MATCHES, NO_STAFF_BODY,
    NO_STAFF_FOLLOW_UP, NO_STAFF_TITLE, PLACEHOLDER_BODY, PLACEHOLDER_ETA, PLACEHOLDER_TITLE,
    RANKED_TITLE, RAW_TOGGLE_LABEL, RESULTS_TITLE, ResultsBody, ResultsView, SEARCH_PLACEHOLDER,
    SELECT_LABEL, SUBMITTING_MESSAGE, SUMMARY_TITLE, SearchableSelect, ServiceKind,
    SubmissionErrorKind, sub_districts_for,
};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

const STATUS_CLEAR_AFTER: Duration = Duration::from_secs(4);
const NO_MORE_HISTORY: &str = "沒有更多瀏覽記錄";
const RESULTS_OPEN_HINT: &str = "請先返回預約表單";

/// Backend the UI hands validated drafts to.
pub trait BookingRuntime {
    fn submit_booking(&mut self, draft: &BookingDraft) -> BookingResponse;

    /// Runs the submission and reports back over `tx`. The default runs
    /// inline; real runtimes move the call onto a worker thread.
    fn spawn_submission(
        &mut self,
        request_id: u64,
        draft: BookingDraft,
        tx: Sender<InternalEvent>,
    ) -> Result<()> {
        let response = self.submit_booking(&draft);
        tx.send(InternalEvent::SubmissionFinished {
            request_id,
            response,
        })
        .map_err(|_| anyhow!("submission event channel closed"))?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InternalEvent {
    ClearStatus {
        token: u64,
    },
    SubmissionFinished {
        request_id: u64,
        response: BookingResponse,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormRow {
    Field(FieldKey),
    AddOn(AddOn),
}

#[derive(Debug, Clone, PartialEq, Default)]
struct ViewData {
    field_cursor: usize,
    picker: SearchableSelect,
    alert: Option<String>,
    results: Option<ResultsView>,
    results_cursor: usize,
    raw_visible: bool,
    status_token: u64,
}

pub fn run_app<R: BookingRuntime>(state: &mut AppState, runtime: &mut R) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData::default();
    info!(
        service = state.active_service.as_str(),
        url = %state.history.current(),
        "booking desk started"
    );

    let result = event_loop(state, runtime, &mut terminal, &mut view_data);

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

fn event_loop<R: BookingRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    view_data: &mut ViewData,
) -> Result<()> {
    let (internal_tx, internal_rx) = mpsc::channel();
    loop {
        process_internal_events(state, runtime, view_data, &internal_tx, &internal_rx);

        terminal
            .draw(|frame| render(frame, state, view_data))
            .context("draw frame")?;

        if !event::poll(Duration::from_millis(120)).context("poll event")? {
            continue;
        }
        match event::read().context("read event")? {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                if handle_key_event(state, runtime, view_data, &internal_tx, key) {
                    return Ok(());
                }
            }
            _ => {}
        }
    }
}

fn process_internal_events<R: BookingRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                state.dispatch(AppCommand::ClearStatus);
            }
            InternalEvent::ClearStatus { .. } => {}
            InternalEvent::SubmissionFinished {
                request_id,
                response,
            } => {
                let events = state.dispatch(AppCommand::CompleteSubmission {
                    request_id,
                    response,
                });
                apply_events(state, runtime, view_data, tx, events);
            }
        }
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(STATUS_CLEAR_AFTER);
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

/// Reacts to state transitions that need UI-side work.
fn apply_events<R: BookingRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    events: Vec<AppEvent>,
) {
    for event in events {
        match event {
            AppEvent::StatusUpdated(_) => {
                view_data.status_token = view_data.status_token.saturating_add(1);
                schedule_status_clear(internal_tx, view_data.status_token);
            }
            AppEvent::ServiceChanged(service) => {
                info!(service = service.as_str(), "switched booking form");
                view_data.field_cursor = 0;
                view_data.picker.close();
            }
            AppEvent::HistoryPushed(url) => debug!(%url, "history entry pushed"),
            AppEvent::HistoryMoved(url) => debug!(%url, "history moved"),
            AppEvent::ValidationFailed(error) => {
                if let Some(index) = form_rows(&state.form)
                    .iter()
                    .position(|row| *row == FormRow::Field(error.field()))
                {
                    view_data.field_cursor = index;
                }
                view_data.alert = Some(error.to_string());
            }
            AppEvent::SubmissionStarted { request_id, draft } => {
                info!(
                    request_id,
                    service = draft.service_kind().as_str(),
                    "submission started"
                );
                if let Err(error) =
                    runtime.spawn_submission(request_id, draft, internal_tx.clone())
                {
                    let message = format!("{error:#}");
                    warn!(request_id, error = %message, "submission could not start");
                    let events = state.dispatch(AppCommand::CompleteSubmission {
                        request_id,
                        response: BookingResponse::failed(SubmissionErrorKind::Submission, message),
                    });
                    apply_events(state, runtime, view_data, internal_tx, events);
                }
            }
            AppEvent::SubmitRejected(reason) => debug!(?reason, "submit rejected"),
            AppEvent::SubmissionSucceeded {
                request_id,
                has_results,
            } => {
                info!(request_id, has_results, "submission succeeded");
                view_data.results = state
                    .showing_results()
                    .map(|(service, data)| ResultsView::build(service, data));
                view_data.results_cursor = 0;
                view_data.raw_visible = false;
            }
            AppEvent::SubmissionFailed { kind, message } => {
                warn!(kind = kind.as_str(), %message, "submission failed");
            }
            AppEvent::StaleCompletionIgnored { request_id } => {
                debug!(request_id, "ignored stale submission result");
            }
            AppEvent::ResetToForm => {
                view_data.results = None;
                view_data.results_cursor = 0;
                view_data.raw_visible = false;
                view_data.field_cursor = 0;
            }
            AppEvent::ErrorDismissed | AppEvent::StatusCleared => {}
        }
    }
}

fn handle_key_event<R: BookingRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if view_data.alert.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            view_data.alert = None;
        }
        return false;
    }

    // Only the rejected resubmit gets through while a request is in flight.
    let resubmit =
        key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL);
    if state.is_submitting() && !resubmit {
        return false;
    }

    let events = if view_data.picker.is_open() {
        handle_picker_key(state, view_data, key);
        Vec::new()
    } else if key.modifiers.contains(KeyModifiers::ALT) {
        handle_history_key(state, key)
    } else if state.showing_results().is_some() {
        handle_results_key(state, view_data, key)
    } else {
        handle_form_key(state, view_data, key)
    };
    apply_events(state, runtime, view_data, internal_tx, events);
    false
}

fn handle_history_key(state: &mut AppState, key: KeyEvent) -> Vec<AppEvent> {
    let command = match key.code {
        KeyCode::Left => AppCommand::HistoryBack,
        KeyCode::Right => AppCommand::HistoryForward,
        _ => return Vec::new(),
    };
    let events = state.dispatch(command);
    if events.is_empty() {
        return state.dispatch(AppCommand::SetStatus(NO_MORE_HISTORY.to_owned()));
    }
    events
}

fn handle_form_key(state: &mut AppState, view_data: &mut ViewData, key: KeyEvent) -> Vec<AppEvent> {
    let rows = form_rows(&state.form);
    view_data.field_cursor = view_data.field_cursor.min(rows.len().saturating_sub(1));
    let current = rows.get(view_data.field_cursor).copied();

    match (key.code, key.modifiers) {
        (KeyCode::F(1), _) => return state.dispatch(AppCommand::SwitchService(ServiceKind::Pest)),
        (KeyCode::F(2), _) => {
            return state.dispatch(AppCommand::SwitchService(ServiceKind::Cleaning));
        }
        (KeyCode::Char('s'), modifiers) if modifiers.contains(KeyModifiers::CONTROL) => {
            return state.dispatch(AppCommand::Submit);
        }
        (KeyCode::Esc, _) => return state.dispatch(AppCommand::DismissError),
        (KeyCode::Up, _) | (KeyCode::BackTab, _) => {
            view_data.field_cursor = view_data.field_cursor.saturating_sub(1);
        }
        (KeyCode::Down, _) | (KeyCode::Tab, _) => {
            if view_data.field_cursor + 1 < rows.len() {
                view_data.field_cursor += 1;
            }
        }
        (KeyCode::Left, _) => cycle_row(state, current, -1),
        (KeyCode::Right, _) => cycle_row(state, current, 1),
        (KeyCode::Enter, _) => match current {
            Some(FormRow::Field(FieldKey::SubDistrict)) => {
                let options = sub_districts_for(&state.form.contact().region);
                view_data.picker = SearchableSelect::new(options.iter().copied());
                view_data.picker.open(&state.form.contact().sub_district);
            }
            Some(FormRow::AddOn(add_on)) => toggle_add_on(state, add_on),
            Some(FormRow::Field(field)) if field.input() == FieldInput::Choice => {
                state.form.cycle_choice(field, 1);
            }
            _ => {
                if view_data.field_cursor + 1 < rows.len() {
                    view_data.field_cursor += 1;
                }
            }
        },
        (KeyCode::Char(' '), _) if matches!(current, Some(FormRow::AddOn(_))) => {
            if let Some(FormRow::AddOn(add_on)) = current {
                toggle_add_on(state, add_on);
            }
        }
        (KeyCode::Backspace, _) => {
            if let Some(FormRow::Field(field)) = current {
                state.form.pop_char(field);
            }
        }
        (KeyCode::Char(ch), modifiers)
            if !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            if let Some(FormRow::Field(field)) = current
                && field.is_editable_text()
            {
                state.form.push_char(field, ch);
            }
        }
        _ => {}
    }
    Vec::new()
}

fn cycle_row(state: &mut AppState, row: Option<FormRow>, delta: isize) {
    match row {
        Some(FormRow::Field(field))
            if matches!(field.input(), FieldInput::Choice | FieldInput::Picker) =>
        {
            state.form.cycle_choice(field, delta);
        }
        Some(FormRow::AddOn(add_on)) => toggle_add_on(state, add_on),
        _ => {}
    }
}

fn toggle_add_on(state: &mut AppState, add_on: AddOn) {
    let selected = state.form.toggle_add_on(add_on);
    debug!(add_on = add_on.id(), selected, "add-on toggled");
}

fn handle_picker_key(state: &mut AppState, view_data: &mut ViewData, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => view_data.picker.close(),
        KeyCode::Up => view_data.picker.move_highlight(-1),
        KeyCode::Down => view_data.picker.move_highlight(1),
        KeyCode::Backspace => view_data.picker.backspace(),
        KeyCode::Enter => {
            if let Some(choice) = view_data.picker.choose() {
                state.form.select_sub_district(&choice);
            }
        }
        KeyCode::Char(ch) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            view_data.picker.push_char(ch);
        }
        _ => {}
    }
}

fn handle_results_key(
    state: &mut AppState,
    view_data: &mut ViewData,
    key: KeyEvent,
) -> Vec<AppEvent> {
    let card_count = view_data
        .results
        .as_ref()
        .map_or(0, ResultsView::card_count);

    match key.code {
        KeyCode::Up => view_data.results_cursor = view_data.results_cursor.saturating_sub(1),
        KeyCode::Down => {
            if view_data.results_cursor + 1 < card_count {
                view_data.results_cursor += 1;
            }
        }
        KeyCode::Char('r') => view_data.raw_visible = !view_data.raw_visible,
        KeyCode::Enter => {
            let selection = match (&view_data.results, state.showing_results()) {
                (Some(view), Some((_, data))) => view
                    .select(data, view_data.results_cursor)
                    .map(|(message, picked)| (message, picked.staff.clone(), picked.rank)),
                _ => None,
            };
            if let Some((message, staff, rank)) = selection {
                info!(%staff, rank, "slot selected");
                view_data.alert = Some(message);
            }
        }
        KeyCode::Esc | KeyCode::Char('b') => {
            if view_data.raw_visible {
                view_data.raw_visible = false;
            } else {
                return state.dispatch(AppCommand::Reset);
            }
        }
        KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return state.dispatch(AppCommand::Submit);
        }
        KeyCode::F(1) | KeyCode::F(2) => {
            return state.dispatch(AppCommand::SetStatus(RESULTS_OPEN_HINT.to_owned()));
        }
        _ => {}
    }
    Vec::new()
}

fn form_rows(form: &BookingForm) -> Vec<FormRow> {
    let mut rows = Vec::new();
    for field in form.visible_fields() {
        if field == FieldKey::AddServices {
            rows.extend(form.available_add_ons().into_iter().map(FormRow::AddOn));
        } else {
            rows.push(FormRow::Field(field));
        }
    }
    rows
}

fn render(frame: &mut ratatui::Frame<'_>, state: &AppState, view_data: &ViewData) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let selected = ServiceKind::ALL
        .iter()
        .position(|service| *service == state.active_service)
        .unwrap_or(0);
    let tabs = Tabs::new(ServiceKind::ALL.iter().map(|service| service.tab_label()))
        .block(
            Block::default()
                .title(state.active_service.brand())
                .borders(Borders::ALL),
        )
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .select(selected);
    frame.render_widget(tabs, layout[0]);

    if let Some((service, data)) = state.showing_results() {
        let built;
        let view = match &view_data.results {
            Some(view) => view,
            None => {
                built = ResultsView::build(service, data);
                &built
            }
        };
        let (lines, card_starts) = results_lines(view, view_data.results_cursor);
        let focus = card_starts
            .get(view_data.results_cursor)
            .copied()
            .unwrap_or(0);
        let scroll = focus.saturating_sub(usize::from(layout[1].height / 3));
        let body = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0))
            .block(Block::default().borders(Borders::ALL).title(RESULTS_TITLE));
        frame.render_widget(body, layout[1]);

        if view_data.raw_visible {
            let area = centered_rect(80, 80, frame.area());
            frame.render_widget(Clear, area);
            let raw = Paragraph::new(view.raw_json.as_str())
                .wrap(Wrap { trim: false })
                .block(Block::default().title(RAW_TOGGLE_LABEL).borders(Borders::ALL));
            frame.render_widget(raw, area);
        }
    } else {
        let (lines, cursor_line) = form_lines(state, view_data);
        let scroll = cursor_line.saturating_sub(usize::from(layout[1].height / 2));
        let body = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(state.active_service.headline()),
            );
        frame.render_widget(body, layout[1]);
    }

    let status_widget = Paragraph::new(status_text(state, view_data))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status_widget, layout[2]);

    if state.is_submitting() {
        let area = centered_rect(40, 20, frame.area());
        frame.render_widget(Clear, area);
        let loading = Paragraph::new(SUBMITTING_MESSAGE)
            .style(Style::default().fg(Color::Cyan))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(loading, area);
    }

    if view_data.picker.is_open() {
        let area = centered_rect(50, 60, frame.area());
        frame.render_widget(Clear, area);
        let picker = Paragraph::new(picker_lines(&view_data.picker)).block(
            Block::default()
                .title(FieldKey::SubDistrict.label())
                .borders(Borders::ALL),
        );
        frame.render_widget(picker, area);
    }

    if let Some(alert) = &view_data.alert {
        let area = centered_rect(50, 30, frame.area());
        frame.render_widget(Clear, area);
        let text = format!("{alert}\n\n[Enter] 確定");
        let alert = Paragraph::new(text)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .style(Style::default().fg(Color::White)),
            );
        frame.render_widget(alert, area);
    }
}

/// Form body lines plus the index of the line holding the cursor.
fn form_lines(state: &AppState, view_data: &ViewData) -> (Vec<Line<'static>>, usize) {
    let form = &state.form;
    let mut lines = vec![
        Line::styled(
            state.active_service.headline(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::styled(
            state.active_service.tagline(),
            Style::default().fg(Color::DarkGray),
        ),
        Line::default(),
    ];

    if let Some((title, message)) = state.error_banner() {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{title}: "),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(message.to_owned(), Style::default().fg(Color::Red)),
            Span::styled("  (Esc 關閉)", Style::default().fg(Color::DarkGray)),
        ]));
        lines.push(Line::default());
    }

    let mut cursor_line = 0;
    let mut add_on_header_done = false;
    for (index, row) in form_rows(form).into_iter().enumerate() {
        let selected = index == view_data.field_cursor;
        let marker = if selected { "› " } else { "  " };
        let row_style = if selected {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };

        match row {
            FormRow::Field(field) => {
                if selected {
                    cursor_line = lines.len();
                }
                let value = display_value(form, field, selected);
                lines.push(Line::from(vec![
                    Span::styled(marker, row_style),
                    Span::styled(
                        format!("{}: ", form.field_label(field)),
                        row_style.add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(value, row_style),
                ]));
                if let Some(error) = form.field_error(field) {
                    lines.push(Line::styled(
                        format!("    ⚠ {error}"),
                        Style::default().fg(Color::Red),
                    ));
                }
            }
            FormRow::AddOn(add_on) => {
                if !add_on_header_done {
                    lines.push(Line::styled(
                        format!("  {}:", FieldKey::AddServices.label()),
                        Style::default().add_modifier(Modifier::BOLD),
                    ));
                    add_on_header_done = true;
                }
                if selected {
                    cursor_line = lines.len();
                }
                let check = if form.has_add_on(add_on) { "[x]" } else { "[ ]" };
                lines.push(Line::from(vec![
                    Span::styled(format!("  {marker}{check} "), row_style),
                    Span::styled(add_on.name(), row_style.add_modifier(Modifier::BOLD)),
                    Span::styled(
                        format!("  {}", add_on.description()),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]));
            }
        }
    }
    (lines, cursor_line)
}

fn display_value(form: &BookingForm, field: FieldKey, selected: bool) -> String {
    let value = form.field_value(field);
    match field.input() {
        FieldInput::Text | FieldInput::Phone if selected => format!("{value}▏"),
        FieldInput::Choice if selected => format!("◀ {value} ▶"),
        FieldInput::Picker => {
            let shown = SearchableSelect::display_value(&value, None).to_owned();
            if selected {
                format!("{shown}  (Enter 搜尋)")
            } else {
                shown
            }
        }
        _ => value,
    }
}

fn picker_lines(picker: &SearchableSelect) -> Vec<Line<'static>> {
    let query = if picker.query().is_empty() {
        Span::styled(SEARCH_PLACEHOLDER, Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(picker.query().to_owned())
    };
    let mut lines = vec![Line::from(vec![Span::raw("🔍 "), query]), Line::default()];

    let filtered = picker.filtered();
    if filtered.is_empty() {
        lines.push(Line::styled(NO_MATCHES, Style::default().fg(Color::DarkGray)));
        return lines;
    }
    for (index, option) in filtered.into_iter().enumerate() {
        let line = if index == picker.highlighted() {
            Line::styled(
                format!("› {option}"),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )
        } else {
            Line::raw(format!("  {option}"))
        };
        lines.push(line);
    }
    lines
}

const fn band_color(color: BandColor) -> Color {
    match color {
        BandColor::Green => Color::Green,
        BandColor::Blue => Color::Blue,
        BandColor::Amber => Color::Yellow,
        BandColor::Gray => Color::Gray,
        BandColor::Red => Color::Red,
    }
}

/// Results body lines plus the first line of every ranked card.
fn results_lines(view: &ResultsView, cursor: usize) -> (Vec<Line<'static>>, Vec<usize>) {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let dim = Style::default().fg(Color::DarkGray);
    let mut lines = vec![
        Line::styled(view.brand(), dim),
        Line::styled(view.headline.clone(), bold),
        Line::default(),
    ];

    if !view.summary.is_empty() {
        lines.push(Line::styled(SUMMARY_TITLE, bold));
        for item in &view.summary {
            lines.push(Line::from(vec![
                Span::styled(format!("  {}: ", item.label), dim),
                Span::raw(item.value.clone()),
            ]));
        }
        lines.push(Line::default());
    }

    let mut card_starts = Vec::new();
    match &view.body {
        ResultsBody::Ranked { subtitle, cards } => {
            lines.push(Line::styled(RANKED_TITLE, bold));
            if !subtitle.is_empty() {
                lines.push(Line::styled(subtitle.clone(), dim));
            }
            lines.push(Line::default());
            for (index, card) in cards.iter().enumerate() {
                card_starts.push(lines.len());
                let selected = index == cursor;
                let marker = if selected { "› " } else { "  " };
                let color = band_color(card.band.color());
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("{marker}{} ", card.badge),
                        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(card.staff.clone(), bold),
                    Span::raw("  "),
                    Span::styled(card.score_label.clone(), Style::default().fg(color)),
                ]));
                lines.push(Line::raw(format!(
                    "    {}  {}",
                    card.date, card.time_window
                )));
                for reason in &card.reasons {
                    lines.push(Line::styled(format!("    • {reason}"), dim));
                }
                if selected {
                    lines.push(Line::styled(
                        format!("    [Enter] {SELECT_LABEL}"),
                        Style::default().fg(Color::Cyan),
                    ));
                }
                lines.push(Line::default());
            }
        }
        ResultsBody::NoQualifiedStaff {
            filtered_count,
            staff,
            remaining,
        } => {
            let warn_style = Style::default().fg(Color::Yellow);
            lines.push(Line::styled(NO_STAFF_TITLE, warn_style.add_modifier(Modifier::BOLD)));
            lines.push(Line::raw(NO_STAFF_BODY));
            lines.push(Line::raw(NO_STAFF_FOLLOW_UP));
            lines.push(Line::default());
            lines.push(Line::styled(
                ResultsBody::filtered_heading(*filtered_count),
                dim,
            ));
            for name in staff {
                lines.push(Line::styled(
                    format!("  • {}", ResultsBody::mismatch_line(name)),
                    dim,
                ));
            }
            if *remaining > 0 {
                lines.push(Line::styled(
                    format!("  {}", ResultsBody::remaining_line(*remaining)),
                    dim,
                ));
            }
            lines.push(Line::default());
        }
        ResultsBody::Placeholder => {
            lines.push(Line::styled(PLACEHOLDER_TITLE, bold));
            lines.push(Line::raw(PLACEHOLDER_BODY));
            lines.push(Line::styled(PLACEHOLDER_ETA, dim));
            lines.push(Line::default());
        }
    }

    for notice in &view.notices {
        let style = if notice == HUMAN_CONFIRMATION_NOTICE {
            Style::default().fg(Color::Yellow)
        } else {
            dim
        };
        lines.push(Line::styled(format!("ⓘ {notice}"), style));
    }
    if let Some(disclaimer) = &view.disclaimer {
        lines.push(Line::styled(format!("ⓘ {disclaimer}"), dim));
    }
    lines.push(Line::default());
    lines.push(Line::styled(format!("[Esc/b] {BACK_LABEL}"), dim));
    (lines, card_starts)
}

fn status_text(state: &AppState, view_data: &ViewData) -> String {
    let hints = if view_data.alert.is_some() {
        "enter/esc 關閉"
    } else if view_data.picker.is_open() {
        "輸入篩選 | ↑/↓ 移動 | enter 選擇 | esc 關閉"
    } else if state.showing_results().is_some() {
        "↑/↓ 時段 | enter 選擇此時段 | r 回應數據 | esc/b 返回 | alt+←/→ 上/下一頁 | ctrl+q"
    } else {
        "↑/↓ 欄位 | ←/→ 選項 | space 追加服務 | enter 地區搜尋 | ctrl+s 提交 | F1/F2 服務 | alt+←/→ 上/下一頁 | ctrl+q"
    };
    match &state.status_line {
        Some(status) => format!("{status} | {hints}"),
        None => hints.to_owned(),
    }
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
