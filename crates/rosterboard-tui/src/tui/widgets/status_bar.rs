// Status bar widget: per-file validation results and the last status text.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use rosterboard_core::session::{FileStatus, Validation};
use rosterboard_core::source::ROSTER_FALLBACK_MESSAGE;

use crate::tui::ViewState;

/// Render the status bar into the given area.
///
/// Layout: [Pro CSV status] [League CSV status] [status text]
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut spans = validation_spans(state.validation.as_ref());

    // The no-files message is already shown on both file labels.
    let repeats_validation = state.validation.is_some_and(|v| {
        v.pool.message() == state.status || v.roster.message() == state.status
    });
    if !state.status.is_empty() && !repeats_validation {
        spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));
        spans.push(Span::styled(
            state.status.clone(),
            Style::default().fg(Color::Red),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// Spans for the two file labels. Before the first load both read "--".
pub fn validation_spans(validation: Option<&Validation>) -> Vec<Span<'static>> {
    let (pool, roster) = match validation {
        Some(v) => (file_span(v.pool), file_span(v.roster)),
        None => (pending_span(), pending_span()),
    };
    vec![
        Span::styled(" Pro: ", Style::default().fg(Color::White)),
        pool,
        Span::styled(" | ", Style::default().fg(Color::Gray)),
        Span::styled("League: ", Style::default().fg(Color::White)),
        roster,
    ]
}

/// Green "OK" for a valid file; the message in red (or yellow for the
/// pool-only fallback) otherwise.
pub fn file_span(status: FileStatus) -> Span<'static> {
    match status {
        FileStatus::Valid => Span::styled("OK", Style::default().fg(Color::Green)),
        FileStatus::Invalid(message) => {
            let color = if message == ROSTER_FALLBACK_MESSAGE {
                Color::Yellow
            } else {
                Color::Red
            };
            Span::styled(message, Style::default().fg(color))
        }
    }
}

fn pending_span() -> Span<'static> {
    Span::styled("--", Style::default().fg(Color::Gray))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
