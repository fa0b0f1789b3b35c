// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into UserCommand messages for the app
// task, or into local ViewState changes (focus, selector values, scroll).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use rosterboard_core::order::{GroupKey, SortKey};

use super::{Focus, ViewState};
use crate::protocol::UserCommand;

/// Rows moved by PageUp/PageDown.
const PAGE_SIZE: usize = 20;

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should be forwarded to the
/// app task (load, apply, quit). Returns `None` when it was handled locally.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // Some terminals report Release and Repeat as well as Press.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    match key_event.code {
        KeyCode::Char('q') => Some(UserCommand::Quit),

        // Focus
        KeyCode::Tab => {
            view_state.focus = view_state.focus.next();
            None
        }
        KeyCode::BackTab => {
            view_state.focus = view_state.focus.prev();
            None
        }

        // Selector values
        KeyCode::Left => {
            cycle_focused(view_state, false);
            None
        }
        KeyCode::Right => {
            cycle_focused(view_state, true);
            None
        }
        KeyCode::Char('d') => {
            toggle_direction(view_state);
            None
        }

        // Commands
        KeyCode::Enter => view_state.selection().map(UserCommand::Load),
        KeyCode::Char('t') => {
            if !view_state.can_apply() {
                return None;
            }
            view_state.table_request(None).map(UserCommand::ApplyTeam)
        }
        KeyCode::Char('a') => {
            if !view_state.can_apply() {
                return None;
            }
            let order = view_state.order;
            view_state
                .table_request(Some(order))
                .map(UserCommand::ApplySort)
        }

        // Scrolling
        KeyCode::Up | KeyCode::Char('k') => {
            scroll_up(view_state, 1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            scroll_down(view_state, 1);
            None
        }
        KeyCode::PageUp => {
            scroll_up(view_state, PAGE_SIZE);
            None
        }
        KeyCode::PageDown => {
            scroll_down(view_state, PAGE_SIZE);
            None
        }

        _ => None,
    }
}

/// Step `current` through `len` options, wrapping at both ends.
fn step(current: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if forward {
        (current + 1) % len
    } else {
        (current + len - 1) % len
    }
}

fn cycle_focused(view_state: &mut ViewState, forward: bool) {
    match view_state.focus {
        Focus::Roster => {
            view_state.roster_idx = step(view_state.roster_idx, view_state.files.len(), forward);
        }
        Focus::Pool => {
            view_state.pool_idx = step(view_state.pool_idx, view_state.files.len(), forward);
        }
        Focus::Team => {
            view_state.team_idx = step(view_state.team_idx, view_state.teams.len(), forward);
        }
        Focus::Sort => {
            let i = SortKey::ALL
                .iter()
                .position(|k| *k == view_state.order.sort_key)
                .unwrap_or(0);
            view_state.order.sort_key = SortKey::ALL[step(i, SortKey::ALL.len(), forward)];
        }
        Focus::Group => {
            let i = GroupKey::ALL
                .iter()
                .position(|k| *k == view_state.order.group_key)
                .unwrap_or(0);
            view_state.order.group_key = GroupKey::ALL[step(i, GroupKey::ALL.len(), forward)];
        }
    }
}

/// Flip the direction of the focused sort or group control. Ignored until a
/// valid pool file is loaded.
fn toggle_direction(view_state: &mut ViewState) {
    if !view_state.can_apply() {
        return;
    }
    let order = &mut view_state.order;
    match view_state.focus {
        Focus::Sort => order.sort_direction = order.sort_direction.toggled(),
        Focus::Group => order.group_direction = order.group_direction.toggled(),
        Focus::Roster | Focus::Pool | Focus::Team => {}
    }
}

fn scroll_up(view_state: &mut ViewState, lines: usize) {
    view_state.scroll_offset = view_state.scroll_offset.saturating_sub(lines);
}

fn scroll_down(view_state: &mut ViewState, lines: usize) {
    let max = view_state.rows.len().saturating_sub(1);
    view_state.scroll_offset = view_state.scroll_offset.saturating_add(lines).min(max);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
