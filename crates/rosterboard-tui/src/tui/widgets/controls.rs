// Controls row: roster file, pool file, team filter, sort and group boxes.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use rosterboard_core::source::discovery::display_name;

use crate::tui::layout::control_cells;
use crate::tui::{Focus, ViewState};

/// Render one bordered box per control; the focused one is highlighted.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let cells = control_cells(area, Focus::ORDER.len());
    for (focus, cell) in Focus::ORDER.iter().zip(cells) {
        let border_style = if *focus == state.focus {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let paragraph = Paragraph::new(control_text(state, *focus)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(focus.label()),
        );
        frame.render_widget(paragraph, cell);
    }
}

/// Current value shown in a control box.
pub fn control_text(state: &ViewState, focus: Focus) -> String {
    match focus {
        Focus::Roster => file_text(state, state.roster_idx),
        Focus::Pool => file_text(state, state.pool_idx),
        Focus::Team => state
            .teams
            .get(state.team_idx)
            .cloned()
            .unwrap_or_else(|| "--".to_string()),
        Focus::Sort => format!(
            "{} {}",
            state.order.sort_key,
            state.order.sort_direction.arrow()
        ),
        Focus::Group => format!(
            "{} {}",
            state.order.group_key,
            state.order.group_direction.arrow()
        ),
    }
}

fn file_text(state: &ViewState, idx: usize) -> String {
    state
        .files
        .get(idx)
        .map(|p| display_name(p))
        .unwrap_or_else(|| "--".to_string())
}
