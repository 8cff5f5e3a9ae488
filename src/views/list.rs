//! Shared list widgets: search bar, card column, pagination bar, and the
//! loading / empty / error banners.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::app::UiTheme;
use crate::models::PageInfo;

pub const SEARCH_BAR_HEIGHT: u16 = 3;
pub const PAGINATION_HEIGHT: u16 = 1;

/// Bordered single-line text input with a label. Returns the cursor position
/// for a focused input, clamped to the inner width.
pub fn render_input_bar(
    frame: &mut Frame,
    area: Rect,
    theme: &UiTheme,
    label: &str,
    text: &str,
    hint: &str,
    focused: bool,
) -> Option<(u16, u16)> {
    let border = if focused {
        theme.focus_border
    } else {
        theme.inactive_border
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(Span::styled(label.to_string(), Style::default().fg(theme.header_fg)));

    let inner = block.inner(area);
    let mut spans = vec![Span::styled(
        text.to_string(),
        Style::default().fg(theme.card_fg),
    )];
    if !focused && !hint.is_empty() {
        spans.push(Span::styled(
            format!("  {}", hint),
            Style::default().fg(theme.card_muted_fg),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);

    if !focused || inner.width == 0 || inner.height == 0 {
        return None;
    }
    let text_width = UnicodeWidthStr::width(text) as u16;
    let x = inner.x + text_width.min(inner.width.saturating_sub(1));
    Some((x, inner.y))
}

/// Vertical column of fixed-height cards, windowed so the selected card is
/// always visible. `card_lines` yields the content of card `index`.
pub fn render_cards<F>(
    frame: &mut Frame,
    area: Rect,
    count: usize,
    selected: usize,
    card_height: u16,
    theme: &UiTheme,
    mut card_lines: F,
) where
    F: FnMut(usize, bool) -> Vec<Line<'static>>,
{
    if count == 0 || area.height == 0 {
        return;
    }

    let visible = (area.height / card_height).max(1) as usize;
    let offset = scroll_offset(selected, count, visible);

    let mut y = area.y;
    for index in offset..(offset + visible).min(count) {
        if y + card_height > area.y + area.height {
            break;
        }
        let card_area = Rect::new(area.x, y, area.width, card_height);
        let is_selected = index == selected;

        let border = if is_selected {
            Style::default().fg(theme.focus_border)
        } else {
            Style::default().fg(theme.inactive_border)
        };
        let block = Block::default().borders(Borders::ALL).border_style(border);
        let lines = card_lines(index, is_selected);
        frame.render_widget(Paragraph::new(lines).block(block), card_area);

        y += card_height;
    }
}

/// First visible card index keeping `selected` inside the window.
pub fn scroll_offset(selected: usize, count: usize, visible: usize) -> usize {
    if count <= visible {
        return 0;
    }
    let max_offset = count - visible;
    selected.saturating_sub(visible.saturating_sub(1)).min(max_offset)
}

pub fn render_loading(frame: &mut Frame, area: Rect, theme: &UiTheme, what: &str) {
    let line = Line::from(Span::styled(
        format!("Loading {}...", what),
        Style::default().fg(theme.card_muted_fg),
    ));
    centered_line(frame, area, line);
}

pub fn render_empty(frame: &mut Frame, area: Rect, theme: &UiTheme, what: &str) {
    let lines = vec![
        Line::from(Span::styled(
            format!("No {} found", what),
            Style::default().fg(theme.card_fg).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Try adjusting your search or filters.".to_string(),
            Style::default().fg(theme.card_muted_fg),
        )),
        Line::from(Span::styled(
            "Press c to clear all filters".to_string(),
            Style::default().fg(theme.accent_fg),
        )),
    ];
    centered_lines(frame, area, lines);
}

pub fn render_error_banner(frame: &mut Frame, area: Rect, theme: &UiTheme, message: &str) {
    let line = Line::from(vec![
        Span::styled("Error: ".to_string(), Style::default().fg(theme.error_fg)),
        Span::styled(message.to_string(), Style::default().fg(theme.error_fg)),
        Span::styled("  (r to retry)".to_string(), Style::default().fg(theme.card_muted_fg)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// "‹ Prev  Page 1 of 42 (826 total)  Next ›" with the unavailable side
/// dimmed out.
pub fn render_pagination(
    frame: &mut Frame,
    area: Rect,
    theme: &UiTheme,
    page: u32,
    info: Option<&PageInfo>,
    fetching: bool,
) {
    let Some(info) = info else {
        return;
    };

    let enabled = Style::default().fg(theme.accent_fg);
    let disabled = Style::default().fg(theme.card_muted_fg);

    let prev_style = if info.has_prev() { enabled } else { disabled };
    let next_style = if info.has_next() { enabled } else { disabled };

    let middle = if fetching {
        format!("  Page {} of {} (loading)  ", page, info.pages)
    } else {
        format!("  Page {} of {} ({} total)  ", page, info.pages, info.count)
    };

    let line = Line::from(vec![
        Span::styled("‹ Prev".to_string(), prev_style),
        Span::styled(middle, Style::default().fg(theme.card_fg)),
        Span::styled("Next ›".to_string(), next_style),
    ]);
    centered_line(frame, area, line);
}

fn centered_line(frame: &mut Frame, area: Rect, line: Line<'static>) {
    centered_lines(frame, area, vec![line]);
}

fn centered_lines(frame: &mut Frame, area: Rect, lines: Vec<Line<'static>>) {
    let height = lines.len() as u16;
    let top = area.y + area.height.saturating_sub(height) / 2;
    let centered = Rect::new(area.x, top, area.width, height.min(area.height));
    frame.render_widget(
        Paragraph::new(lines).alignment(ratatui::layout::Alignment::Center),
        centered,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
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
    fn test_empty_state_always_offers_clear() {
        // The clear-filters action stays visible even with nothing set: a
        // zero-result page with default filters is reachable.
        let theme = UiTheme::default();
        let mut terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();
        terminal
            .draw(|frame| render_empty(frame, frame.area(), &theme, "characters"))
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("No characters found"));
        assert!(text.contains("Press c to clear all filters"));
    }

    #[test]
    fn test_scroll_offset_fits() {
        assert_eq!(scroll_offset(0, 3, 5), 0);
        assert_eq!(scroll_offset(2, 3, 5), 0);
    }

    #[test]
    fn test_scroll_offset_follows_selection() {
        // 20 cards, window of 5: selection 10 puts it at the window bottom.
        assert_eq!(scroll_offset(10, 20, 5), 6);
        assert_eq!(scroll_offset(19, 20, 5), 15);
        assert_eq!(scroll_offset(0, 20, 5), 0);
    }
}
