//! Ratatui-based terminal page.
//!
//! The page stacks the header, hero, calculator and catalogue side by side,
//! the application form, and the footer. Focus moves between sections with
//! Tab; the key map lives in `App::handle_key`, drawing in `draw`.

use std::io;
use std::sync::Arc;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::backend::worker::SubmitOutcome;
use crate::backend::{LeadBackend, SupabaseClient, spawn_submission};
use crate::cli::TuiArgs;
use crate::config::BackendConfig;
use crate::error::AppError;
use crate::page::{FormField, FormUpdate, PageShell};

mod draw;

/// Header entries. None of them lead anywhere yet.
pub const NAV_ITEMS: [&str; 6] = [
    "Épargne",
    "Hypothèques",
    "Prêts entreprise",
    "À propos",
    "Aide",
    "Obtenir l'app",
];

/// Index of the submit button in the form rows (after the five fields).
const SUBMIT_ROW: usize = FormField::ALL.len();

/// Start the page.
pub fn run(args: TuiArgs) -> Result<(), AppError> {
    let config = BackendConfig::from_env(args.env_file.as_deref())?;
    tracing::info!(url = %config.url, "backend configured");
    let lead_backend: Arc<dyn LeadBackend> = Arc::new(SupabaseClient::new(config));

    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::runtime(format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(lead_backend);
    let result = app.event_loop(&mut terminal);
    tracing::info!("page closed");
    result
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::runtime(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::runtime(format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Header,
    Calculator,
    Catalog,
    Form,
}

impl Section {
    const ORDER: [Section; 4] = [
        Section::Header,
        Section::Calculator,
        Section::Catalog,
        Section::Form,
    ];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|s| *s == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    fn prev(self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

struct App {
    shell: PageShell,
    lead_backend: Arc<dyn LeadBackend>,
    focus: Section,
    nav_cursor: usize,
    form_row: usize,
    pending: Option<Receiver<SubmitOutcome>>,
}

impl App {
    fn new(lead_backend: Arc<dyn LeadBackend>) -> Self {
        Self {
            shell: PageShell::new(),
            lead_backend,
            focus: Section::Calculator,
            nav_cursor: 0,
            form_row: 0,
            pending: None,
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::runtime(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::runtime(format!("Event poll error: {e}")))?
            {
                needs_redraw |= self.tick(Instant::now());
                continue;
            }

            match event::read().map_err(|e| AppError::runtime(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key) {
                        break;
                    }
                    self.tick(Instant::now());
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Drain signals, collect a finished submission, expire toasts.
    ///
    /// Returns true when the screen needs redrawing.
    fn tick(&mut self, now: Instant) -> bool {
        let mut changed = self.shell.pump() > 0;

        if self.shell.take_scroll_request() {
            self.focus = Section::Form;
            changed = true;
        }

        let polled = self.pending.as_ref().map(|rx| rx.try_recv());
        match polled {
            Some(Ok(outcome)) => {
                self.pending = None;
                self.shell.complete_submit(Some(outcome));
                changed = true;
            }
            Some(Err(TryRecvError::Disconnected)) => {
                self.pending = None;
                self.shell.complete_submit(None);
                changed = true;
            }
            Some(Err(TryRecvError::Empty)) | None => {}
        }

        changed |= self.shell.toaster.prune(now);
        changed
    }

    /// Returns true when the page should close.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return true;
        }

        match key.code {
            KeyCode::Esc => return true,
            KeyCode::Tab => {
                self.focus = self.focus.next();
                return false;
            }
            KeyCode::BackTab => {
                self.focus = self.focus.prev();
                return false;
            }
            KeyCode::Char('q') if self.focus != Section::Form => return true,
            _ => {}
        }

        match self.focus {
            Section::Header => self.handle_header_key(key.code),
            Section::Calculator => self.handle_calculator_key(key.code),
            Section::Catalog => self.handle_catalog_key(key.code),
            Section::Form => self.handle_form_key(key.code),
        }
        false
    }

    fn handle_header_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Left => {
                self.nav_cursor = (self.nav_cursor + NAV_ITEMS.len() - 1) % NAV_ITEMS.len();
            }
            KeyCode::Right => {
                self.nav_cursor = (self.nav_cursor + 1) % NAV_ITEMS.len();
            }
            KeyCode::Enter => self.shell.navigation_stub(NAV_ITEMS[self.nav_cursor]),
            _ => {}
        }
    }

    fn handle_calculator_key(&mut self, code: KeyCode) {
        let calc = &mut self.shell.calculator;
        match code {
            KeyCode::Up | KeyCode::Down => calc.toggle_focus(),
            KeyCode::Left => calc.nudge(-1),
            KeyCode::Right => calc.nudge(1),
            KeyCode::PageDown => calc.nudge(-5),
            KeyCode::PageUp => calc.nudge(5),
            KeyCode::Enter | KeyCode::Char('a') => {
                calc.apply_to_form();
            }
            _ => {}
        }
    }

    fn handle_catalog_key(&mut self, code: KeyCode) {
        let catalog = &mut self.shell.catalog;
        match code {
            KeyCode::Up | KeyCode::Left => catalog.prev(),
            KeyCode::Down | KeyCode::Right => catalog.next(),
            KeyCode::Enter => catalog.select_highlighted(),
            _ => {}
        }
    }

    fn handle_form_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up => {
                self.form_row = self.form_row.saturating_sub(1);
                return;
            }
            KeyCode::Down => {
                self.form_row = (self.form_row + 1).min(SUBMIT_ROW);
                return;
            }
            _ => {}
        }

        if self.form_row == SUBMIT_ROW {
            if code == KeyCode::Enter {
                self.submit();
            }
            return;
        }

        let field = FormField::ALL[self.form_row];
        let form = &mut self.shell.form;
        match code {
            KeyCode::Enter => self.form_row += 1,
            KeyCode::Char(c) => form.push_char(field, c),
            KeyCode::Backspace if field.accepts_text() => form.pop_char(field),
            KeyCode::Backspace => form.reduce(FormUpdate::Edit(field, String::new())),
            KeyCode::Left => form.cycle(field, false),
            KeyCode::Right => form.cycle(field, true),
            _ => {}
        }
    }

    /// The submit button is inert while a submission is in flight.
    fn submit(&mut self) {
        if self.pending.is_some() || self.shell.form.is_submitting() {
            return;
        }
        if let Some(submission) = self.shell.request_submit() {
            self.pending = Some(spawn_submission(Arc::clone(&self.lead_backend), submission));
        }
    }
}
