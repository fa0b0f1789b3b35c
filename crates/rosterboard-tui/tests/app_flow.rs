// End-to-end tests for the front end: key presses produce commands, the app
// loop answers them from the fixture CSV files, and the updates land in the
// view state.

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use rosterboard_core::order::{SortKey, TableOrder};
use rosterboard_core::session::Session;
use rosterboard_core::source::discovery::discover_csv_files;
use rosterboard_tui::app;
use rosterboard_tui::protocol::{UiUpdate, UserCommand};
use rosterboard_tui::tui::input::handle_key;
use rosterboard_tui::tui::{apply_ui_update, Focus, ViewState};
use tokio::sync::mpsc;

// ===========================================================================
// Test helpers
// ===========================================================================

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("rosterboard-core")
        .join("tests")
        .join("fixtures")
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent {
        code,
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    }
}

struct Harness {
    state: ViewState,
    cmd_tx: mpsc::Sender<UserCommand>,
    ui_rx: mpsc::Receiver<UiUpdate>,
    handle: tokio::task::JoinHandle<anyhow::Result<()>>,
}

impl Harness {
    fn start(roster: &str, pool: &str) -> Self {
        let files = discover_csv_files(&fixtures_dir()).unwrap();
        let mut state = ViewState::new(files, TableOrder::default());
        state.preselect(Some(roster), Some(pool));

        let (cmd_tx, cmd_rx) = mpsc::channel(16);
        let (ui_tx, ui_rx) = mpsc::channel(16);
        let handle = tokio::spawn(app::run(cmd_rx, ui_tx, Session::default()));
        Harness {
            state,
            cmd_tx,
            ui_rx,
            handle,
        }
    }

    /// Press a key; forward any command and apply the one reply it produces.
    async fn press(&mut self, code: KeyCode) -> bool {
        match handle_key(key(code), &mut self.state) {
            Some(cmd) => {
                self.cmd_tx.send(cmd).await.unwrap();
                let update = self.ui_rx.recv().await.unwrap();
                apply_ui_update(&mut self.state, update);
                true
            }
            None => false,
        }
    }

    async fn quit(self) {
        self.cmd_tx.send(UserCommand::Quit).await.unwrap();
        self.handle.await.unwrap().unwrap();
    }

    fn names(&self) -> Vec<&str> {
        self.state.rows.iter().map(|r| r.name.as_str()).collect()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[tokio::test]
async fn load_then_switch_team() {
    let mut h = Harness::start("roster.csv", "pool.csv");

    assert!(h.press(KeyCode::Enter).await);
    assert!(h.state.can_apply());
    assert_eq!(h.state.teams.len(), 5);
    assert_eq!(h.names(), vec!["John Smith"]);

    h.state.focus = Focus::Team;
    assert!(!h.press(KeyCode::Right).await);
    assert!(h.press(KeyCode::Char('t')).await);
    assert_eq!(h.names(), vec!["Sam Runner", "Green Bay Packers"]);

    h.quit().await;
}

#[tokio::test]
async fn sort_all_players_by_rank_descending() {
    let mut h = Harness::start("roster.csv", "pool.csv");
    assert!(h.press(KeyCode::Enter).await);

    // Team selector: Gridiron Gang, Blitz Bunch, All Rostered, All Unrostered, All Players
    h.state.focus = Focus::Team;
    h.press(KeyCode::Left).await;
    h.state.focus = Focus::Sort;
    h.press(KeyCode::Right).await;
    h.press(KeyCode::Right).await;
    assert_eq!(h.state.order.sort_key, SortKey::Rank);
    h.press(KeyCode::Char('d')).await;

    assert!(h.press(KeyCode::Char('a')).await);
    let ranks: Vec<u32> = h.state.rows.iter().map(|r| r.rank).collect();
    assert_eq!(ranks, vec![5, 4, 3, 2, 1, 0]);

    h.quit().await;
}

#[tokio::test]
async fn invalid_roster_offers_pool_only() {
    let mut h = Harness::start("bad_header.csv", "pool.csv");
    assert!(h.press(KeyCode::Enter).await);

    let validation = h.state.validation.unwrap();
    assert!(validation.can_build());
    assert_eq!(
        validation.roster.message(),
        "Invalid League CSV File: Continuing with Pro CSV File"
    );
    assert_eq!(h.state.teams, vec!["All Players"]);
    assert_eq!(h.state.rows.len(), 5);

    h.quit().await;
}

#[tokio::test]
async fn invalid_pool_disables_apply() {
    let mut h = Harness::start("roster.csv", "bad_header.csv");
    assert!(h.press(KeyCode::Enter).await);

    assert!(!h.state.can_apply());
    assert_eq!(
        h.state.validation.unwrap().pool.message(),
        "Invalid Pro CSV File"
    );
    assert!(h.state.rows.is_empty());
    assert!(!h.press(KeyCode::Char('t')).await);
    assert!(!h.press(KeyCode::Char('a')).await);

    h.quit().await;
}
