use anyhow::Error;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::catalog::{excerpt, CARD_EXCERPT_CHARS};
use crate::models::{FacetCode, ListingRecord};

/// Pad or cut `text` so it occupies exactly `width` terminal cells.
pub(crate) fn fit_width(text: &str, width: usize) -> String {
    let mut fitted: String = text.chars().take(width).collect();
    let len = fitted.chars().count();
    if len < width {
        fitted.push_str(&" ".repeat(width - len));
    }
    fitted
}

/// Tag chips shown under a card: tech label then category label.
pub(crate) fn tag_line(record: &ListingRecord) -> String {
    let mut tags = Vec::new();
    if let Some(tech) = &record.tech {
        tags.push(format!("[{}]", tech.label()));
    }
    if let Some(project) = &record.project {
        tags.push(format!("[{}]", project.label()));
    }
    tags.join(" ")
}

/// Body of a grid card. The selected card gets a bold title.
pub(crate) fn build_card_lines(
    record: &ListingRecord,
    inner_width: u16,
    inner_height: u16,
    selected: bool,
) -> Vec<Line<'static>> {
    let width = inner_width as usize;
    let height = inner_height as usize;
    if width == 0 || height == 0 {
        return vec![Line::from("")];
    }

    let title_style = if selected {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let muted = Style::default().fg(Color::DarkGray);

    let price = if record.price.trim().is_empty() {
        "-".to_string()
    } else {
        record.price.clone()
    };

    let mut lines = vec![
        Line::from(Span::styled(fit_width(&record.title, width), title_style)),
        Line::from(Span::styled(
            fit_width(&excerpt(&record.description, CARD_EXCERPT_CHARS), width),
            muted,
        )),
        Line::from(Span::styled(
            fit_width(&price, width),
            Style::default().fg(Color::Green),
        )),
        Line::from(Span::styled(
            fit_width(&tag_line(record), width),
            Style::default().fg(Color::Cyan),
        )),
    ];

    if !record.features.is_empty() {
        lines.push(Line::from(Span::styled(
            fit_width(&format!("• {}", record.features.join(" • ")), width),
            muted,
        )));
    }

    lines.truncate(height);
    lines
}

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for modal dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Extract the most relevant error message from a chained error.
pub(crate) fn surface_error(err: &Error) -> String {
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}

#[cfg(test)]
mod tests {
    use anyhow::Context;

    use super::*;
    use crate::catalog::default_catalog;

    #[test]
    fn fit_width_pads_and_cuts() {
        assert_eq!(fit_width("abc", 5), "abc  ");
        assert_eq!(fit_width("abcdef", 3), "abc");
        assert_eq!(fit_width("₹99/-", 2), "₹9");
    }

    #[test]
    fn tags_use_labels() {
        let record = &default_catalog()[2];
        assert_eq!(tag_line(record), "[GSAP] [UI/UX]");
    }

    #[test]
    fn card_shows_dash_for_missing_price() {
        let record = &default_catalog()[4];
        let lines = build_card_lines(record, 20, 10, false);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[2].to_string().trim_end(), "-");
    }

    #[test]
    fn card_respects_height() {
        let record = &default_catalog()[0];
        assert_eq!(build_card_lines(record, 20, 2, true).len(), 2);
    }

    #[test]
    fn surface_error_prefers_root_cause() {
        let err = std::fs::read("/definitely/missing")
            .context("failed to read image")
            .unwrap_err();
        assert!(!surface_error(&err).contains("failed to read image"));
    }
}
