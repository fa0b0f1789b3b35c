// TUI: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` holding the current control values and the last
// table it was sent. The app task pushes `UiUpdate` messages over an mpsc
// channel; the TUI applies them to `ViewState` and re-renders at ~30 fps.

pub mod input;
pub mod layout;
pub mod widgets;

use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use rosterboard_core::model::PlayerRecord;
use rosterboard_core::order::TableOrder;
use rosterboard_core::session::{FileSelection, TableRequest, Validation};
use rosterboard_core::source::discovery::display_name;
use rosterboard_core::source::NO_FILES_MESSAGE;
use rosterboard_core::table::TeamFilter;
use tokio::sync::mpsc;
use tracing::info;

use crate::protocol::{UiUpdate, UserCommand};

use layout::{build_layout, AppLayout};

// ---------------------------------------------------------------------------
// Focus
// ---------------------------------------------------------------------------

/// Control that receives Left/Right and `d` key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Roster,
    Pool,
    Team,
    Sort,
    Group,
}

impl Focus {
    /// Tab order, left to right on screen.
    pub const ORDER: [Focus; 5] = [
        Focus::Roster,
        Focus::Pool,
        Focus::Team,
        Focus::Sort,
        Focus::Group,
    ];

    pub fn next(self) -> Self {
        let i = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(i + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        let i = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(i + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            Focus::Roster => "League CSV",
            Focus::Pool => "Pro CSV",
            Focus::Team => "Team",
            Focus::Sort => "Sort",
            Focus::Group => "Group",
        }
    }
}

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// TUI-local state: control values plus the last table received.
#[derive(Debug, Default)]
pub struct ViewState {
    /// CSV files found in the data directory, sorted by name.
    pub files: Vec<PathBuf>,
    /// Index into `files` of the roster selector.
    pub roster_idx: usize,
    /// Index into `files` of the pool selector.
    pub pool_idx: usize,
    /// File pair of the last completed load.
    pub loaded: Option<FileSelection>,
    /// Validation results of the last load; `None` before the first load.
    pub validation: Option<Validation>,
    /// Team selector options from the last load.
    pub teams: Vec<String>,
    pub team_idx: usize,
    /// Sort and group control values.
    pub order: TableOrder,
    pub focus: Focus,
    pub rows: Vec<PlayerRecord>,
    /// First visible table row.
    pub scroll_offset: usize,
    /// Status line text; empty when there is nothing to report.
    pub status: String,
}

impl ViewState {
    /// State for a directory listing. The pool selector starts on the second
    /// file when there is one.
    pub fn new(files: Vec<PathBuf>, order: TableOrder) -> Self {
        let pool_idx = if files.len() > 1 { 1 } else { 0 };
        ViewState {
            files,
            pool_idx,
            order,
            ..ViewState::default()
        }
    }

    /// State for an empty data directory. Nothing can be loaded.
    pub fn no_files(order: TableOrder) -> Self {
        ViewState {
            validation: Some(Validation::no_files()),
            status: NO_FILES_MESSAGE.to_string(),
            order,
            ..ViewState::default()
        }
    }

    /// Move the file selectors onto the named files, if present.
    pub fn preselect(&mut self, roster: Option<&str>, pool: Option<&str>) {
        if let Some(i) = roster.and_then(|name| self.file_index(name)) {
            self.roster_idx = i;
        }
        if let Some(i) = pool.and_then(|name| self.file_index(name)) {
            self.pool_idx = i;
        }
    }

    fn file_index(&self, name: &str) -> Option<usize> {
        self.files.iter().position(|p| display_name(p) == name)
    }

    /// The roster/pool pair currently chosen in the selectors.
    pub fn selection(&self) -> Option<FileSelection> {
        Some(FileSelection {
            roster: self.files.get(self.roster_idx)?.clone(),
            pool: self.files.get(self.pool_idx)?.clone(),
        })
    }

    /// Rebuilds and direction toggles need a loaded, valid pool file.
    pub fn can_apply(&self) -> bool {
        self.loaded.is_some() && self.validation.is_some_and(|v| v.can_build())
    }

    pub fn team_filter(&self) -> Option<TeamFilter> {
        self.teams
            .get(self.team_idx)
            .map(|label| TeamFilter::from_label(label))
    }

    /// Request for the loaded files under the current team selection.
    pub fn table_request(&self, order: Option<TableOrder>) -> Option<TableRequest> {
        let files = self.loaded.clone()?;
        let validation = self.validation?;
        Some(TableRequest {
            files,
            roster_valid: validation.roster_valid(),
            team_filter: self.team_filter()?,
            order,
        })
    }

    pub fn unmatched_count(&self) -> usize {
        self.rows.iter().filter(|r| r.is_unmatched()).count()
    }
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

/// Apply a single UiUpdate to the ViewState.
pub fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::Loaded { files, outcome } => {
            state.loaded = Some(files);
            state.validation = Some(outcome.validation);
            state.teams = outcome.teams;
            state.team_idx = 0;
            state.rows = outcome.rows;
            state.scroll_offset = 0;
            state.status.clear();
        }
        UiUpdate::Table(rows) => {
            state.rows = rows;
            state.scroll_offset = 0;
            state.status.clear();
        }
        UiUpdate::Status(message) => {
            state.status = message;
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete frame.
pub fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());

    widgets::status_bar::render(frame, layout.status_bar, state);
    widgets::controls::render(frame, layout.controls, state);
    widgets::players::render(frame, layout.table, state);
    render_help_bar(frame, &layout);
}

fn render_help_bar(frame: &mut Frame, layout: &AppLayout) {
    let text = " q:Quit | Tab:Focus | \u{2190}/\u{2192}:Change | Enter:Load | t:Apply Team | a:Apply Sort | d:Direction | j/k:Scroll";
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        text,
        Style::default().fg(Color::White).add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, layout.help_bar);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// 1. Initializes the terminal (raw mode, alternate screen).
/// 2. Installs a panic hook that restores the terminal.
/// 3. Selects over UI updates, keyboard input and render ticks.
/// 4. Restores the terminal on exit.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
    mut view_state: ViewState,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = ratatui::restore();
        original_hook(panic_info);
    }));

    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => apply_ui_update(&mut view_state, ui_update),
                    // App task is gone
                    None => break,
                }
            }

            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(cmd) = input::handle_key(key_event, &mut view_state) {
                            let quit = cmd == UserCommand::Quit;
                            let _ = cmd_tx.send(cmd).await;
                            if quit {
                                info!("Quit requested from keyboard");
                                break;
                            }
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(_)) | None => break,
                }
            }

            _ = render_tick.tick() => {
                terminal.draw(|frame| render_frame(frame, &view_state))?;
            }
        }
    }

    ratatui::restore();

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
