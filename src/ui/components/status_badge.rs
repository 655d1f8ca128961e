use tui::{
    style::{Color, Modifier, Style},
    text::Span,
};

use crate::models::ProjectStatus;

pub fn status_color(status: &ProjectStatus) -> Color {
    match status {
        ProjectStatus::Active => Color::Green,
        ProjectStatus::Completed => Color::Blue,
        ProjectStatus::OnHold => Color::Yellow,
        ProjectStatus::Cancelled => Color::Red,
        ProjectStatus::Other(_) => Color::Gray,
    }
}

/// The raw status value in its color, e.g. `[on-hold]`.
pub fn status_badge(status: &ProjectStatus) -> Span<'static> {
    Span::styled(
        format!("[{}]", status.as_str()),
        Style::default()
            .fg(status_color(status))
            .add_modifier(Modifier::BOLD),
    )
}
