//! Locations tab.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::Frame;

use crate::app::{BodyKind, ListPane, UiTheme};
use crate::core::{EventResult, InputEvent, View};
use crate::models::{Location, LocationFilter, Paged};

use super::list;

const CARD_HEIGHT: u16 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputMode {
    Normal,
    Search,
    /// Type filter ("Planet", "Space station", ...); commits on Enter.
    Kind,
    /// Dimension filter; commits on Enter.
    Dimension,
}

pub struct LocationsView {
    pane: ListPane<Location, LocationFilter>,
    theme: UiTheme,
    mode: InputMode,
    edit: String,
    fetch_due: bool,
    cursor: Option<(u16, u16)>,
}

impl LocationsView {
    pub fn new(search_debounce: Duration, theme: UiTheme) -> Self {
        Self {
            pane: ListPane::new(search_debounce),
            theme,
            mode: InputMode::Normal,
            edit: String::new(),
            fetch_due: false,
            cursor: None,
        }
    }

    pub fn pane(&self) -> &ListPane<Location, LocationFilter> {
        &self.pane
    }

    pub fn tick(&mut self, now: Instant) {
        if self.pane.tick(now) {
            self.fetch_due = true;
        }
    }

    pub fn request_fetch(&mut self) {
        self.fetch_due = true;
    }

    pub fn take_fetch(&mut self) -> Option<(u64, u32, LocationFilter)> {
        if !self.fetch_due {
            return None;
        }
        self.fetch_due = false;
        let generation = self.pane.begin_fetch();
        Some((generation, self.pane.page(), self.pane.filter().clone()))
    }

    pub fn apply(&mut self, generation: u64, result: Result<Paged<Location>, String>) {
        self.pane.apply(generation, result);
    }

    fn commit_edit(&mut self) {
        let value = if self.edit.is_empty() {
            None
        } else {
            Some(self.edit.clone())
        };
        let due = match self.mode {
            InputMode::Kind => self.pane.set_filter(|f| f.kind = value),
            InputMode::Dimension => self.pane.set_filter(|f| f.dimension = value),
            _ => false,
        };
        if due {
            self.fetch_due = true;
        }
    }

    fn handle_normal_key(&mut self, key: &KeyEvent) -> EventResult {
        match key.code {
            KeyCode::Char('/') => {
                self.mode = InputMode::Search;
                EventResult::Consumed
            }
            KeyCode::Char('t') => {
                self.edit = self.pane.filter().kind.clone().unwrap_or_default();
                self.mode = InputMode::Kind;
                EventResult::Consumed
            }
            KeyCode::Char('d') => {
                self.edit = self.pane.filter().dimension.clone().unwrap_or_default();
                self.mode = InputMode::Dimension;
                EventResult::Consumed
            }
            KeyCode::Char('c') => {
                self.pane.clear_all();
                self.fetch_due = true;
                EventResult::Consumed
            }
            KeyCode::Char('r') => {
                self.fetch_due = true;
                EventResult::Consumed
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.pane.select_next();
                EventResult::Consumed
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.pane.select_prev();
                EventResult::Consumed
            }
            KeyCode::Right | KeyCode::Char('n') => {
                if self.pane.next_page() {
                    self.fetch_due = true;
                }
                EventResult::Consumed
            }
            KeyCode::Left | KeyCode::Char('p') => {
                if self.pane.prev_page() {
                    self.fetch_due = true;
                }
                EventResult::Consumed
            }
            KeyCode::Enter => match self.pane.selected_item() {
                Some(location) => EventResult::OpenDetail(location.id.clone()),
                None => EventResult::Ignored,
            },
            _ => EventResult::Ignored,
        }
    }

    fn handle_text_key(&mut self, key: &KeyEvent) -> EventResult {
        let now = Instant::now();
        match (self.mode, key.code) {
            (_, KeyCode::Esc) => {
                self.mode = InputMode::Normal;
                EventResult::Consumed
            }
            (InputMode::Search, KeyCode::Enter) => {
                self.mode = InputMode::Normal;
                EventResult::Consumed
            }
            (InputMode::Search, KeyCode::Backspace) => {
                self.pane.search_pop(now);
                EventResult::Consumed
            }
            (InputMode::Search, KeyCode::Char(ch)) => {
                self.pane.search_push(ch, now);
                EventResult::Consumed
            }
            (_, KeyCode::Enter) => {
                self.commit_edit();
                self.mode = InputMode::Normal;
                EventResult::Consumed
            }
            (_, KeyCode::Backspace) => {
                self.edit.pop();
                EventResult::Consumed
            }
            (_, KeyCode::Char(ch)) => {
                self.edit.push(ch);
                EventResult::Consumed
            }
            _ => EventResult::Ignored,
        }
    }

    fn hint(&self) -> String {
        let filter = self.pane.filter();
        let mut parts = Vec::new();
        if let Some(kind) = &filter.kind {
            parts.push(format!("type={}", kind));
        }
        if let Some(dimension) = &filter.dimension {
            parts.push(format!("dimension={}", dimension));
        }
        if parts.is_empty() {
            "t:type d:dimension /:search".to_string()
        } else {
            parts.join(" ")
        }
    }

    fn card_lines(&self, location: &Location, selected: bool) -> Vec<Line<'static>> {
        let theme = &self.theme;
        let name_style = if selected {
            Style::default().fg(theme.selected_fg).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.card_fg).add_modifier(Modifier::BOLD)
        };

        vec![
            Line::from(Span::styled(location.name.clone(), name_style)),
            Line::from(Span::styled(
                format!(
                    "{} · {}",
                    location.kind.as_deref().unwrap_or("unknown"),
                    location.dimension.as_deref().unwrap_or("unknown")
                ),
                Style::default().fg(theme.card_muted_fg),
            )),
        ]
    }
}

impl View for LocationsView {
    fn handle_input(&mut self, event: &InputEvent) -> EventResult {
        match event {
            InputEvent::Key(key) if key.kind != KeyEventKind::Release => match self.mode {
                InputMode::Normal => self.handle_normal_key(key),
                _ => self.handle_text_key(key),
            },
            InputEvent::Paste(text) if self.mode == InputMode::Search => {
                self.pane.search_paste(text, Instant::now());
                EventResult::Consumed
            }
            InputEvent::Paste(text)
                if matches!(self.mode, InputMode::Kind | InputMode::Dimension) =>
            {
                self.edit.push_str(text);
                EventResult::Consumed
            }
            _ => EventResult::Ignored,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let error_height = if self.pane.error().is_some() { 1 } else { 0 };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(list::SEARCH_BAR_HEIGHT),
                Constraint::Length(error_height),
                Constraint::Min(0),
                Constraint::Length(list::PAGINATION_HEIGHT),
            ])
            .split(area);

        self.cursor = match self.mode {
            InputMode::Kind => {
                list::render_input_bar(frame, chunks[0], &self.theme, "Type filter", &self.edit, "", true)
            }
            InputMode::Dimension => list::render_input_bar(
                frame,
                chunks[0],
                &self.theme,
                "Dimension filter",
                &self.edit,
                "",
                true,
            ),
            mode => list::render_input_bar(
                frame,
                chunks[0],
                &self.theme,
                "Search locations",
                self.pane.search_input(),
                &self.hint(),
                mode == InputMode::Search,
            ),
        };

        if let Some(message) = self.pane.error() {
            list::render_error_banner(frame, chunks[1], &self.theme, message);
        }

        match self.pane.body() {
            BodyKind::Loading => list::render_loading(frame, chunks[2], &self.theme, "locations"),
            BodyKind::Empty => list::render_empty(frame, chunks[2], &self.theme, "locations"),
            BodyKind::Cards => {
                let cards: Vec<Vec<Line<'static>>> = self
                    .pane
                    .items()
                    .iter()
                    .enumerate()
                    .map(|(i, l)| self.card_lines(l, i == self.pane.selected()))
                    .collect();
                list::render_cards(
                    frame,
                    chunks[2],
                    cards.len(),
                    self.pane.selected(),
                    CARD_HEIGHT,
                    &self.theme,
                    |index, _| cards[index].clone(),
                );
            }
        }

        list::render_pagination(
            frame,
            chunks[3],
            &self.theme,
            self.pane.page(),
            self.pane.info(),
            self.pane.is_fetching(),
        );
    }

    fn cursor_position(&self) -> Option<(u16, u16)> {
        match self.mode {
            InputMode::Normal => None,
            _ => self.cursor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, KeyModifiers};

    fn key(code: KeyCode) -> InputEvent {
        InputEvent::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn test_dimension_filter_commit() {
        let mut view = LocationsView::new(Duration::from_millis(500), UiTheme::default());
        view.handle_input(&key(KeyCode::Char('d')));
        for ch in "C-137".chars() {
            view.handle_input(&key(KeyCode::Char(ch)));
        }
        view.handle_input(&key(KeyCode::Enter));

        assert_eq!(view.pane().filter().dimension.as_deref(), Some("C-137"));
        assert!(view.take_fetch().is_some());
    }

    #[test]
    fn test_type_edit_seeds_from_filter() {
        let mut view = LocationsView::new(Duration::from_millis(500), UiTheme::default());
        view.pane.set_filter(|f| f.kind = Some("Planet".into()));

        view.handle_input(&key(KeyCode::Char('t')));
        assert_eq!(view.edit, "Planet");
    }
}
