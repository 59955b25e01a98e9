// src/tui.rs
use crate::config::Config;
use crate::error::{AppResult, TuiError};
use crate::models::{CredentialDraft, DraftField};
use crate::store::CredentialStore;
use crate::validator::{self, ValidationReport};

use arboard; // For clipboard
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};
use std::io::{stdout, Stdout};
use std::time::Duration;

const NUM_EDIT_FIELDS: usize = DraftField::ALL.len();

#[derive(PartialEq, Debug, Clone, Copy)]
pub enum InputMode {
    Normal,
    Editing,
}

pub struct App {
    should_quit: bool,
    store: CredentialStore,
    selected_index: Option<usize>,
    list_state: ListState,
    app_status: String,
    input_mode: InputMode,
    draft: CredentialDraft,
    report: ValidationReport,
    current_input_value: String,
    editing_field_index: usize,
}

impl App {
    pub fn new(config: &Config) -> Self {
        let draft = CredentialDraft::new();
        let report = validator::validate(&draft);
        App {
            should_quit: false,
            store: CredentialStore::new(config.start_hidden),
            selected_index: None,
            list_state: ListState::default(),
            app_status: "Press 'a' to add, 'd' to delete, 'h' to show/hide, 'q' to quit.".to_string(),
            input_mode: InputMode::Normal,
            draft,
            report,
            current_input_value: String::new(),
            editing_field_index: 0,
        }
    }

    fn copy_to_clipboard(&mut self, content: String, field_name: &str) {
        match arboard::Clipboard::new() {
            Ok(mut clipboard) => match clipboard.set_text(content) {
                Ok(_) => {
                    self.app_status = format!("{} copied to clipboard!", field_name);
                    log::info!("Copied {} to clipboard.", field_name);
                }
                Err(err) => {
                    self.app_status = format!("Error copying {}: {}", field_name, err);
                    log::error!("Error setting clipboard text for {}: {}", field_name, err);
                }
            },
            Err(err) => {
                self.app_status = format!("Error initializing clipboard: {}", err);
                log::error!("Error initializing clipboard: {}", err);
            }
        }
    }

    pub fn on_key(&mut self, key_event: KeyEvent) {
        log::debug!("Key event received: {:?}", key_event);
        let key_code = key_event.code;

        match self.input_mode {
            InputMode::Normal => match key_code {
                KeyCode::Char('q') => {
                    self.should_quit = true;
                }
                KeyCode::Char('j') | KeyCode::Down => {
                    self.move_selection(1);
                }
                KeyCode::Char('k') | KeyCode::Up => {
                    self.move_selection(-1);
                }
                KeyCode::Char('a') => {
                    self.input_mode = InputMode::Editing;
                    log::info!("Switched to InputMode::Editing");
                    self.reset_editing_state();
                    self.app_status = "Adding new credential... (Esc to cancel)".to_string();
                }
                KeyCode::Char('d') => {
                    if let Some(selected_idx) = self.selected_index {
                        if let Some(record) = self.store.list().get(selected_idx) {
                            let removed_id = record.id;
                            let removed_service = record.service_name.clone();
                            self.store.remove(removed_id);
                            self.app_status = format!("Credential '{}' deleted.", removed_service);
                            self.clamp_selection(selected_idx);
                        }
                    } else {
                        self.app_status = "No credential selected to delete.".to_string();
                    }
                }
                KeyCode::Char('h') => {
                    self.store.toggle_hidden();
                    self.app_status = if self.store.is_hidden() {
                        "Passwords hidden.".to_string()
                    } else {
                        "Passwords shown.".to_string()
                    };
                }
                KeyCode::Char('c') => {
                    if let Some(record) = self.selected_record() {
                        let login = record.login.clone();
                        self.copy_to_clipboard(login, "Login");
                    } else {
                        self.app_status = "No credential selected to copy login.".to_string();
                    }
                }
                KeyCode::Char('x') => {
                    if let Some(record) = self.selected_record() {
                        let password = record.password.clone();
                        self.copy_to_clipboard(password, "Password");
                    } else {
                        self.app_status = "No credential selected to copy password.".to_string();
                    }
                }
                _ => {}
            },
            InputMode::Editing => match key_code {
                KeyCode::Char(c) => {
                    self.current_input_value.push(c);
                    self.sync_field_and_revalidate();
                }
                KeyCode::Backspace => {
                    self.current_input_value.pop();
                    self.sync_field_and_revalidate();
                }
                KeyCode::Tab => {
                    self.editing_field_index = (self.editing_field_index + 1) % NUM_EDIT_FIELDS;
                    self.load_current_input_from_field();
                }
                KeyCode::Enter => {
                    if self.editing_field_index == NUM_EDIT_FIELDS - 1 {
                        self.try_confirm();
                    } else {
                        self.editing_field_index += 1;
                        self.load_current_input_from_field();
                    }
                }
                KeyCode::Esc => {
                    self.input_mode = InputMode::Normal;
                    log::info!("Switched to InputMode::Normal via Esc, draft discarded.");
                    self.reset_editing_state();
                    self.app_status = "Add new credential cancelled. | (c) Copy Login | (x) Copy Pass".to_string();
                }
                _ => {}
            },
        }
    }

    /// Attempts confirmation of the current draft. Gated on the validation
    /// report; the store rejects an invalid draft regardless.
    fn try_confirm(&mut self) {
        if !self.report.overall_valid() {
            self.app_status =
                "Cannot confirm: fix the failing rules first. (Tab to edit, Esc to cancel)".to_string();
            log::debug!("Confirm attempted on invalid draft, staying in editing mode.");
            return;
        }

        match self.store.confirm(&self.draft) {
            Ok(record) => {
                log::info!("Confirmed credential for service: {}", record.service_name);
                self.app_status = format!(
                    "Credential for '{}' added. | (c) Copy Login | (x) Copy Pass",
                    record.service_name
                );
                // One reset of the draft per successful confirmation.
                self.reset_editing_state();
                self.input_mode = InputMode::Normal;
                let last = self.store.list().len() - 1;
                self.selected_index = Some(last);
                self.list_state.select(self.selected_index);
            }
            Err(e) => {
                self.app_status = format!("Could not store credential: {}", e);
                log::error!("Store rejected draft despite valid report: {}", e);
            }
        }
    }

    /// Writes the input buffer into the focused draft field, then recomputes
    /// the validation report. Revalidation is an explicit step of every
    /// mutation, not a hidden trigger.
    fn sync_field_and_revalidate(&mut self) {
        let field = DraftField::ALL[self.editing_field_index];
        self.draft.set_field(field, self.current_input_value.clone());
        self.report = validator::validate(&self.draft);
    }

    fn load_current_input_from_field(&mut self) {
        let field = DraftField::ALL[self.editing_field_index];
        self.current_input_value = self.draft.field(field).to_string();
    }

    fn reset_editing_state(&mut self) {
        self.draft.reset();
        self.report = validator::validate(&self.draft);
        self.current_input_value = String::new();
        self.editing_field_index = 0;
    }

    fn selected_record(&self) -> Option<&crate::models::CredentialRecord> {
        self.selected_index.and_then(|idx| self.store.list().get(idx))
    }

    fn clamp_selection(&mut self, removed_idx: usize) {
        let len = self.store.list().len();
        if len == 0 {
            self.selected_index = None;
        } else if removed_idx >= len {
            self.selected_index = Some(len - 1);
        } else {
            self.selected_index = Some(removed_idx);
        }
        self.list_state.select(self.selected_index);
    }

    fn move_selection(&mut self, delta: i32) {
        if self.input_mode != InputMode::Normal {
            return;
        }
        let num_records = self.store.list().len();
        if num_records == 0 {
            self.selected_index = None;
            self.list_state.select(None);
            return;
        }

        let current_index = self.selected_index.unwrap_or(0);
        let new_index = (current_index as i32 + delta).clamp(0, num_records as i32 - 1);
        self.selected_index = Some(new_index as usize);
        self.list_state.select(self.selected_index);
    }
}

pub fn run_tui(config: &Config) -> AppResult<()> {
    log::info!("Initializing TUI...");
    enable_raw_mode().map_err(|e| { log::error!("Failed to enable raw mode: {}", e); TuiError::Io(e) })?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .map_err(|e| { log::error!("Failed to setup terminal screen: {}", e); TuiError::Io(e) })?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| { log::error!("Failed to create terminal: {}", e); TuiError::Io(e) })?;

    let mut app = App::new(config);

    log::info!("Starting TUI application loop.");
    let res = run_app_loop(&mut terminal, &mut app);
    log::info!("TUI application loop finished.");

    disable_raw_mode().map_err(|e| { log::error!("Failed to disable raw mode: {}", e); TuiError::Io(e) })?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .map_err(|e| { log::error!("Failed to restore terminal screen: {}", e); TuiError::Io(e) })?;

    if let Err(err) = res {
        return Err(err.into());
    }

    log::info!("TUI shutdown complete.");
    Ok(())
}

fn run_app_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<(), TuiError> {
    while !app.should_quit {
        terminal.draw(|f| ui(f, app)).map_err(|e| { log::error!("Terminal draw error: {}", e); TuiError::Io(e) })?;

        if event::poll(Duration::from_millis(100)).map_err(|e| { log::error!("Event poll error: {}", e); TuiError::Io(e) })? {
            if let Event::Key(key_event) = event::read().map_err(|e| { log::error!("Event read error: {}", e); TuiError::Io(e) })? {
                if key_event.kind == KeyEventKind::Press {
                    app.on_key(key_event);
                }
            }
        }
    }
    Ok(())
}

fn draw_main_ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)].as_ref())
        .split(f.size());

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)].as_ref())
        .split(chunks[0]);

    let list_area = main_chunks[0];
    let detail_area = main_chunks[1];
    let status_bar_area = chunks[1];

    // Record List Area
    let records_block_title = format!("Credentials ({})", app.store.list().len());
    let records_block = Block::default().borders(Borders::ALL).title(records_block_title);

    if !app.store.list().is_empty() {
        let list_items: Vec<ListItem> = app
            .store
            .list()
            .iter()
            .map(|record| ListItem::new(Span::raw(format!("{} - {}", record.service_name, record.login))))
            .collect();
        let list = List::new(list_items)
            .block(records_block)
            .highlight_style(Style::default().add_modifier(Modifier::BOLD).bg(Color::Gray))
            .highlight_symbol("> ");
        f.render_stateful_widget(list, list_area, &mut app.list_state);
    } else {
        let no_records_text = Paragraph::new("No credentials registered.")
            .block(records_block.clone())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(no_records_text, list_area);
    }

    // Detail View Area
    let details_block = Block::default().borders(Borders::ALL).title("Details");
    if let Some(selected_idx) = app.selected_index {
        if let Some(record) = app.store.list().get(selected_idx) {
            let detail_text = vec![
                Line::from(vec![Span::styled("Service: ", Style::default().bold()), Span::raw(&record.service_name)]),
                Line::from(vec![Span::styled("Login: ", Style::default().bold()), Span::raw(&record.login)]),
                Line::from(vec![Span::styled("Password: ", Style::default().bold()), Span::raw(app.store.presented_password(record))]),
                Line::from(vec![Span::styled("URL: ", Style::default().bold()), Span::raw(&record.url)]),
            ];
            let details_paragraph = Paragraph::new(detail_text).block(details_block).wrap(Wrap { trim: true });
            f.render_widget(details_paragraph, detail_area);
        } else {
            let text = Paragraph::new("Selected record out of bounds.").block(details_block).alignment(Alignment::Center);
            f.render_widget(text, detail_area);
        }
    } else {
        let text = Paragraph::new("Select a credential to see details.").block(details_block).alignment(Alignment::Center);
        f.render_widget(text, detail_area);
    }

    // Status Bar
    let status_text = if app.input_mode == InputMode::Normal {
        let base_keys = "(q) Quit | (j/k) Nav | (a) Add | (d) Del | (h) Show/Hide";
        if app.selected_index.is_some() {
            format!("{} | {} | (c) Copy Login | (x) Copy Pass", app.app_status, base_keys)
        } else {
            format!("{} | {}", app.app_status, base_keys)
        }
    } else {
        app.app_status.clone()
    };
    let status_paragraph = Paragraph::new(status_text).block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(status_paragraph, status_bar_area);
}

fn draw_editing_form(f: &mut Frame, app: &App) {
    let form_area = centered_rect(60, 60, f.size());
    f.render_widget(Clear, form_area);

    let form_block = Block::default().title("Register New Credential").borders(Borders::ALL);
    f.render_widget(form_block, form_area);

    let form_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(3), // Service
            Constraint::Length(3), // Login
            Constraint::Length(3), // Password
            Constraint::Length(3), // URL
            Constraint::Length(4), // Password rule feedback
            Constraint::Min(1),
            Constraint::Length(1), // Help line
        ].as_ref())
        .split(form_area);

    for (i, field) in DraftField::ALL.iter().enumerate() {
        let current_text_to_display = if app.editing_field_index == i {
            format!("{}▋", app.current_input_value)
        } else {
            app.draft.field(*field).to_string()
        };

        let field_ok = match field {
            DraftField::ServiceName => app.report.service_name_ok,
            DraftField::Login => app.report.login_ok,
            DraftField::Password => app.report.password_ok(),
            DraftField::Url => true, // free text, never validated
        };
        let style = if app.editing_field_index == i {
            Style::default().fg(Color::Yellow)
        } else if field_ok {
            Style::default()
        } else {
            Style::default().fg(Color::Red)
        };

        let paragraph = Paragraph::new(current_text_to_display)
            .block(Block::default().borders(Borders::ALL).title(field.label()))
            .style(style);
        f.render_widget(paragraph, form_chunks[i]);
    }

    // One feedback line per password rule, recomputed after every edit.
    let check_lines: Vec<Line> = app
        .report
        .password
        .lines()
        .iter()
        .map(|(rule, ok)| {
            let (marker, color) = if *ok { ("✓", Color::Green) } else { ("✗", Color::Red) };
            Line::from(Span::styled(format!("{} {}", marker, rule), Style::default().fg(color)))
        })
        .collect();
    let checks_paragraph = Paragraph::new(check_lines);
    f.render_widget(checks_paragraph, form_chunks[NUM_EDIT_FIELDS]);

    let help_text = if app.report.overall_valid() {
        "(Tab) Next | (Enter on URL) Confirm | (Esc) Cancel"
    } else {
        "(Tab) Next | Confirm disabled until all rules pass | (Esc) Cancel"
    };
    let help_paragraph = Paragraph::new(help_text).alignment(Alignment::Center);
    f.render_widget(help_paragraph, form_chunks[NUM_EDIT_FIELDS + 2]);
}

/// Renders the UI widgets based on the application mode.
fn ui(f: &mut Frame, app: &mut App) {
    match app.input_mode {
        InputMode::Normal => {
            draw_main_ui(f, app);
        }
        InputMode::Editing => {
            draw_main_ui(f, app);
            draw_editing_form(f, app);
        }
    }
}

/// Helper to create a centered rect for popups.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app() -> App {
        App::new(&Config::default())
    }

    fn press(app: &mut App, code: KeyCode) {
        app.on_key(KeyEvent::from(code));
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    /// Opens the form and fills all four fields, leaving focus on URL.
    fn fill_draft(app: &mut App, service: &str, login: &str, password: &str, url: &str) {
        press(app, KeyCode::Char('a'));
        type_str(app, service);
        press(app, KeyCode::Tab);
        type_str(app, login);
        press(app, KeyCode::Tab);
        type_str(app, password);
        press(app, KeyCode::Tab);
        type_str(app, url);
    }

    #[test]
    fn test_add_key_opens_editing_mode() {
        let mut app = test_app();
        assert_eq!(app.input_mode, InputMode::Normal);
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.input_mode, InputMode::Editing);
        assert_eq!(app.draft, CredentialDraft::default());
    }

    #[test]
    fn test_escape_cancels_draft_without_touching_store() {
        let mut app = test_app();
        fill_draft(&mut app, "GitHub", "bob", "abc123!@", "https://github.com");
        press(&mut app, KeyCode::Esc);

        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.draft, CredentialDraft::default());
        assert!(app.store.list().is_empty());
    }

    #[test]
    fn test_confirm_valid_draft_appends_and_resets_once() {
        let mut app = test_app();
        fill_draft(&mut app, "GitHub", "bob", "abc123!@", "https://github.com");
        assert!(app.report.overall_valid());
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.store.list().len(), 1);
        let record = &app.store.list()[0];
        assert_eq!(record.service_name, "GitHub");
        assert_eq!(record.login, "bob");
        assert_eq!(record.password, "abc123!@");
        assert_eq!(record.url, "https://github.com");
        assert_eq!(app.draft, CredentialDraft::default());
        assert_eq!(app.selected_index, Some(0));
    }

    #[test]
    fn test_confirm_is_gated_on_validity() {
        let mut app = test_app();
        fill_draft(&mut app, "GitHub", "bob", "short", "");
        assert!(!app.report.overall_valid());
        press(&mut app, KeyCode::Enter);

        // Still editing, store untouched, draft intact.
        assert_eq!(app.input_mode, InputMode::Editing);
        assert!(app.store.list().is_empty());
        assert_eq!(app.draft.password, "short");
    }

    #[test]
    fn test_enter_advances_through_earlier_fields() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "GitHub");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.input_mode, InputMode::Editing);
        assert_eq!(app.editing_field_index, 1);
        assert_eq!(app.draft.service_name, "GitHub");
    }

    #[test]
    fn test_report_recomputed_on_every_keystroke() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Tab); // Login
        press(&mut app, KeyCode::Tab); // Password
        type_str(&mut app, "abc12345");
        assert!(!app.report.password.special_char);
        type_str(&mut app, "!");
        assert!(app.report.password.special_char);
        press(&mut app, KeyCode::Backspace);
        assert!(!app.report.password.special_char);
    }

    #[test]
    fn test_hide_toggle_key_round_trips() {
        let mut app = test_app();
        assert!(app.store.is_hidden());
        press(&mut app, KeyCode::Char('h'));
        assert!(!app.store.is_hidden());
        press(&mut app, KeyCode::Char('h'));
        assert!(app.store.is_hidden());
    }

    #[test]
    fn test_delete_key_removes_selected_record() {
        let mut app = test_app();
        fill_draft(&mut app, "A", "bob", "abc123!@", "");
        press(&mut app, KeyCode::Enter);
        fill_draft(&mut app, "B", "bob", "abc123!@", "");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.store.list().len(), 2);

        press(&mut app, KeyCode::Char('k')); // select first record
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.store.list().len(), 1);
        assert_eq!(app.store.list()[0].service_name, "B");
        assert_eq!(app.selected_index, Some(0));
    }

    #[test]
    fn test_delete_with_no_selection_is_harmless() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('d'));
        assert!(app.store.list().is_empty());
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_quit_key() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
