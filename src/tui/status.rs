use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::Frame;

use crate::tui::theme::Theme;

/// One-line status bar: name and version on the left, the latest
/// retained-water total on the right. `None` means the last submission
/// failed and there is no current result.
pub fn render_status_bar(frame: &mut Frame, area: Rect, last_total: Option<u64>) {
    let version = env!("CARGO_PKG_VERSION");
    let left_text = format!(" pluvia v{}", version);
    let right_text = match last_total {
        Some(total) => format!("retained: {} units ", total),
        None => "retained: \u{2014} ".to_string(),
    };

    let left = Span::styled(left_text.clone(), Theme::status_bar());
    let right = Span::styled(right_text.clone(), Theme::status_bar());

    let width = area.width as usize;
    let padding = width.saturating_sub(left_text.len() + right_text.chars().count());

    let line = Line::from(vec![
        left,
        Span::styled(" ".repeat(padding), Theme::status_bar()),
        right,
    ]);

    frame.render_widget(line, area);
}
