// Player table widget: the merged roster/pool rows, scrollable.
//
// Columns follow `TABLE_COLUMNS`. Rows with no pool match are dimmed.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;
use rosterboard_core::model::TABLE_COLUMNS;

use crate::tui::ViewState;

/// Render the player table into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let header = Row::new(TABLE_COLUMNS.iter().map(|c| Cell::from(*c)))
        .style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .bottom_margin(0);

    let offset = visible_offset(state.scroll_offset, state.rows.len());
    let rows: Vec<Row> = state
        .rows
        .iter()
        .skip(offset)
        .map(|record| {
            let style = if record.is_unmatched() {
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC)
            } else {
                Style::default()
            };
            Row::new(record.cells().map(Cell::from)).style(style)
        })
        .collect();

    let widths = [
        Constraint::Min(20),
        Constraint::Length(8),
        Constraint::Length(5),
        Constraint::Length(6),
        Constraint::Length(5),
        Constraint::Length(6),
        Constraint::Length(8),
        Constraint::Length(8),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(build_title(state)),
        );

    frame.render_widget(table, area);
}

/// Clamp a scroll offset so at least the last row stays visible.
pub fn visible_offset(offset: usize, row_count: usize) -> usize {
    offset.min(row_count.saturating_sub(1))
}

/// Title with the team filter, row count and unmatched count.
fn build_title(state: &ViewState) -> Line<'static> {
    let mut title = String::from("Players");
    if let Some(team) = state.teams.get(state.team_idx) {
        title.push_str(&format!(" [{}]", team));
    }
    title.push_str(&format!(" ({})", state.rows.len()));
    let unmatched = state.unmatched_count();
    if unmatched > 0 {
        title.push_str(&format!(" {} unmatched", unmatched));
    }
    Line::from(title)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rosterboard_core::model::PlayerRecord;

    use crate::tui::tests::record;

    fn buffer_text(terminal: &ratatui::Terminal<ratatui::backend::TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn visible_offset_is_clamped() {
        assert_eq!(visible_offset(0, 0), 0);
        assert_eq!(visible_offset(5, 0), 0);
        assert_eq!(visible_offset(5, 3), 2);
        assert_eq!(visible_offset(1, 3), 1);
    }

    #[test]
    fn title_counts_rows_and_unmatched() {
        let mut state = ViewState::default();
        state.teams = vec!["All Players".into()];
        state.rows = vec![
            record("Adam Jones", 2, "KC"),
            PlayerRecord::unmatched("Green Bay Packers", "DEF"),
        ];
        let title = build_title(&state).to_string();
        assert_eq!(title, "Players [All Players] (2) 1 unmatched");
    }

    #[test]
    fn title_without_teams() {
        let state = ViewState::default();
        assert_eq!(build_title(&state).to_string(), "Players (0)");
    }

    #[test]
    fn render_does_not_panic_with_defaults() {
        let backend = ratatui::backend::TestBackend::new(100, 20);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let state = ViewState::default();
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
    }

    #[test]
    fn render_shows_header_and_rows() {
        let backend = ratatui::backend::TestBackend::new(100, 20);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut state = ViewState::default();
        state.rows = vec![record("Adam Jones", 2, "KC"), record("John Smith", 1, "NE")];
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("ECR/ADP"));
        assert!(text.contains("Adam Jones"));
        assert!(text.contains("John Smith"));
    }

    #[test]
    fn render_skips_scrolled_rows() {
        let backend = ratatui::backend::TestBackend::new(100, 20);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut state = ViewState::default();
        state.rows = vec![record("Adam Jones", 2, "KC"), record("John Smith", 1, "NE")];
        state.scroll_offset = 1;
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(!text.contains("Adam Jones"));
        assert!(text.contains("John Smith"));
    }
}
