//! Detail overlay: a centered popup with one full entity and its
//! related-entity references.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::app::UiTheme;
use crate::services::{Detail, DetailRequest};

#[derive(Debug)]
pub enum DetailState {
    Hidden,
    Loading(DetailRequest),
    Loaded(Detail),
    Failed { request: DetailRequest, error: String },
}

pub struct DetailOverlay {
    state: DetailState,
    scroll: u16,
    theme: UiTheme,
}

impl DetailOverlay {
    pub fn new(theme: UiTheme) -> Self {
        Self {
            state: DetailState::Hidden,
            scroll: 0,
            theme,
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.state, DetailState::Hidden)
    }

    pub fn open(&mut self, request: DetailRequest) {
        self.scroll = 0;
        self.state = DetailState::Loading(request);
    }

    pub fn close(&mut self) {
        self.state = DetailState::Hidden;
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    /// Apply a detail fetch result. A reply for anything but the currently
    /// open request is stale and dropped.
    pub fn apply(&mut self, request: &DetailRequest, result: Result<Detail, String>) {
        let current = match &self.state {
            DetailState::Loading(r) => r,
            DetailState::Failed { request: r, .. } => r,
            _ => return,
        };
        if current != request {
            return;
        }
        self.state = match result {
            Ok(detail) => DetailState::Loaded(detail),
            Err(error) => DetailState::Failed {
                request: request.clone(),
                error,
            },
        };
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let theme = &self.theme;
        let label = |text: &str| Span::styled(format!("{}: ", text), Style::default().fg(theme.card_muted_fg));
        let value = |text: String| Span::styled(text, Style::default().fg(theme.card_fg));

        match &self.state {
            DetailState::Hidden => Vec::new(),
            DetailState::Loading(request) => vec![Line::from(Span::styled(
                format!("Loading {} {}...", request.kind.label(), request.id),
                Style::default().fg(theme.card_muted_fg),
            ))],
            DetailState::Failed { error, .. } => vec![
                Line::from(Span::styled(
                    format!("Error: {}", error),
                    Style::default().fg(theme.error_fg),
                )),
                Line::from(Span::styled(
                    "Press Esc to close".to_string(),
                    Style::default().fg(theme.card_muted_fg),
                )),
            ],
            DetailState::Loaded(Detail::Character(c)) => {
                let mut lines = vec![
                    Line::from(vec![
                        Span::styled(
                            "● ".to_string(),
                            Style::default().fg(theme.status_color(&c.status)),
                        ),
                        Span::styled(
                            c.name.clone(),
                            Style::default().fg(theme.card_fg).add_modifier(Modifier::BOLD),
                        ),
                    ]),
                    Line::from(vec![label("Status"), value(c.status.clone())]),
                    Line::from(vec![label("Species"), value(c.species.clone())]),
                    Line::from(vec![label("Gender"), value(c.gender.clone())]),
                ];
                if !c.kind.is_empty() {
                    lines.push(Line::from(vec![label("Type"), value(c.kind.clone())]));
                }
                lines.push(Line::from(vec![label("Origin"), value(c.origin.name.clone())]));
                lines.push(Line::from(vec![
                    label("Last seen"),
                    value(c.location.name.clone()),
                ]));
                if !c.episode.is_empty() {
                    lines.push(Line::default());
                    lines.push(Line::from(Span::styled(
                        format!("Episodes ({})", c.episode.len()),
                        Style::default().fg(theme.accent_fg),
                    )));
                    for episode in &c.episode {
                        lines.push(Line::from(value(format!(
                            "  {}  {}",
                            episode.code.as_deref().unwrap_or("???"),
                            episode.name
                        ))));
                    }
                }
                lines
            }
            DetailState::Loaded(Detail::Episode(e)) => {
                let mut lines = vec![
                    Line::from(Span::styled(
                        e.name.clone(),
                        Style::default().fg(theme.card_fg).add_modifier(Modifier::BOLD),
                    )),
                    Line::from(vec![
                        label("Code"),
                        value(e.code.clone().unwrap_or_else(|| "???".into())),
                    ]),
                    Line::from(vec![
                        label("Aired"),
                        value(e.air_date.clone().unwrap_or_else(|| "unknown".into())),
                    ]),
                ];
                if !e.characters.is_empty() {
                    lines.push(Line::default());
                    lines.push(Line::from(Span::styled(
                        format!("Characters ({})", e.characters.len()),
                        Style::default().fg(theme.accent_fg),
                    )));
                    for character in &e.characters {
                        lines.push(Line::from(value(format!("  {}", character.name))));
                    }
                }
                lines
            }
            DetailState::Loaded(Detail::Location(l)) => {
                let mut lines = vec![
                    Line::from(Span::styled(
                        l.name.clone(),
                        Style::default().fg(theme.card_fg).add_modifier(Modifier::BOLD),
                    )),
                    Line::from(vec![
                        label("Type"),
                        value(l.kind.clone().unwrap_or_else(|| "unknown".into())),
                    ]),
                    Line::from(vec![
                        label("Dimension"),
                        value(l.dimension.clone().unwrap_or_else(|| "unknown".into())),
                    ]),
                ];
                if !l.residents.is_empty() {
                    lines.push(Line::default());
                    lines.push(Line::from(Span::styled(
                        format!("Residents ({})", l.residents.len()),
                        Style::default().fg(theme.accent_fg),
                    )));
                    for character in &l.residents {
                        lines.push(Line::from(value(format!("  {}", character.name))));
                    }
                }
                lines
            }
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        if !self.is_open() {
            return;
        }

        let popup = centered_rect(area, 70, 80);
        frame.render_widget(Clear, popup);

        let title = match &self.state {
            DetailState::Loaded(detail) => detail.name().to_string(),
            DetailState::Loading(request) | DetailState::Failed { request, .. } => {
                format!("{} {}", request.kind.label(), request.id)
            }
            DetailState::Hidden => String::new(),
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.focus_border))
            .title(Span::styled(title, Style::default().fg(self.theme.header_fg)))
            .title_bottom(Span::styled(
                " Esc: close · j/k: scroll ".to_string(),
                Style::default().fg(self.theme.card_muted_fg),
            ));

        let inner_height = block.inner(popup).height;
        let lines = self.lines();
        let max_scroll = (lines.len() as u16).saturating_sub(inner_height);
        self.scroll = self.scroll.min(max_scroll);

        frame.render_widget(
            Paragraph::new(lines).block(block).scroll((self.scroll, 0)),
            popup,
        );
    }
}

/// A rect centered in `area` taking the given percentages of each dimension.
fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    // Widened multiply: width * percent does not fit in u16 on wide terminals.
    let width = (u32::from(area.width) * u32::from(percent_x) / 100) as u16;
    let height = (u32::from(area.height) * u32::from(percent_y) / 100) as u16;
    Rect::new(
        area.x + (area.width.saturating_sub(width)) / 2,
        area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Location;
    use crate::services::EntityKind;

    fn request(id: &str) -> DetailRequest {
        DetailRequest {
            kind: EntityKind::Location,
            id: id.to_string(),
        }
    }

    fn citadel() -> Detail {
        Detail::Location(Location {
            id: "3".into(),
            name: "Citadel of Ricks".into(),
            kind: Some("Space station".into()),
            dimension: Some("unknown".into()),
            residents: Vec::new(),
            created: None,
        })
    }

    #[test]
    fn test_open_apply_close() {
        let mut overlay = DetailOverlay::new(UiTheme::default());
        assert!(!overlay.is_open());

        overlay.open(request("3"));
        assert!(overlay.is_open());

        overlay.apply(&request("3"), Ok(citadel()));
        assert!(matches!(overlay.state, DetailState::Loaded(_)));

        overlay.close();
        assert!(!overlay.is_open());
    }

    #[test]
    fn test_stale_detail_reply_is_dropped() {
        let mut overlay = DetailOverlay::new(UiTheme::default());
        overlay.open(request("3"));
        overlay.open(request("7"));

        overlay.apply(&request("3"), Ok(citadel()));
        assert!(matches!(overlay.state, DetailState::Loading(_)));
    }

    #[test]
    fn test_reply_after_close_is_dropped() {
        let mut overlay = DetailOverlay::new(UiTheme::default());
        overlay.open(request("3"));
        overlay.close();

        overlay.apply(&request("3"), Ok(citadel()));
        assert!(!overlay.is_open());
    }

    #[test]
    fn test_centered_rect_on_wide_terminal() {
        let popup = centered_rect(Rect::new(0, 0, 1000, 50), 70, 80);
        assert_eq!(popup, Rect::new(150, 5, 700, 40));

        let popup = centered_rect(Rect::new(0, 0, u16::MAX, 50), 70, 80);
        assert_eq!(popup.width, 45874);
    }

    #[test]
    fn test_failed_detail_shows_error() {
        let mut overlay = DetailOverlay::new(UiTheme::default());
        overlay.open(request("3"));
        overlay.apply(&request("3"), Err("query failed".into()));

        assert!(matches!(overlay.state, DetailState::Failed { .. }));
        let text: String = overlay
            .lines()
            .iter()
            .flat_map(|l| l.spans.iter().map(|s| s.content.to_string()))
            .collect();
        assert!(text.contains("query failed"));
    }
}
