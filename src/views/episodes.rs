//! Episodes tab.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::Frame;

use crate::app::{BodyKind, ListPane, UiTheme};
use crate::core::{EventResult, InputEvent, View};
use crate::models::{Episode, EpisodeFilter, Paged};

use super::list;

const CARD_HEIGHT: u16 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputMode {
    Normal,
    Search,
    /// Episode code filter (e.g. "S01E05"); commits on Enter.
    Code,
}

pub struct EpisodesView {
    pane: ListPane<Episode, EpisodeFilter>,
    theme: UiTheme,
    mode: InputMode,
    code_edit: String,
    fetch_due: bool,
    cursor: Option<(u16, u16)>,
}

impl EpisodesView {
    pub fn new(search_debounce: Duration, theme: UiTheme) -> Self {
        Self {
            pane: ListPane::new(search_debounce),
            theme,
            mode: InputMode::Normal,
            code_edit: String::new(),
            fetch_due: false,
            cursor: None,
        }
    }

    pub fn pane(&self) -> &ListPane<Episode, EpisodeFilter> {
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

    pub fn take_fetch(&mut self) -> Option<(u64, u32, EpisodeFilter)> {
        if !self.fetch_due {
            return None;
        }
        self.fetch_due = false;
        let generation = self.pane.begin_fetch();
        Some((generation, self.pane.page(), self.pane.filter().clone()))
    }

    pub fn apply(&mut self, generation: u64, result: Result<Paged<Episode>, String>) {
        self.pane.apply(generation, result);
    }

    fn commit_code(&mut self) {
        let value = if self.code_edit.is_empty() {
            None
        } else {
            Some(self.code_edit.clone())
        };
        if self.pane.set_filter(|f| f.code = value) {
            self.fetch_due = true;
        }
    }

    fn handle_normal_key(&mut self, key: &KeyEvent) -> EventResult {
        match key.code {
            KeyCode::Char('/') => {
                self.mode = InputMode::Search;
                EventResult::Consumed
            }
            KeyCode::Char('e') => {
                self.code_edit = self.pane.filter().code.clone().unwrap_or_default();
                self.mode = InputMode::Code;
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
                Some(episode) => EventResult::OpenDetail(episode.id.clone()),
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
            (InputMode::Code, KeyCode::Enter) => {
                self.commit_code();
                self.mode = InputMode::Normal;
                EventResult::Consumed
            }
            (InputMode::Code, KeyCode::Backspace) => {
                self.code_edit.pop();
                EventResult::Consumed
            }
            (InputMode::Code, KeyCode::Char(ch)) => {
                self.code_edit.push(ch);
                EventResult::Consumed
            }
            _ => EventResult::Ignored,
        }
    }

    fn hint(&self) -> String {
        match &self.pane.filter().code {
            Some(code) => format!("episode={}", code),
            None => "e:episode code /:search".to_string(),
        }
    }

    fn card_lines(&self, episode: &Episode, selected: bool) -> Vec<Line<'static>> {
        let theme = &self.theme;
        let name_style = if selected {
            Style::default().fg(theme.selected_fg).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.card_fg).add_modifier(Modifier::BOLD)
        };

        vec![
            Line::from(vec![
                Span::styled(
                    format!("{}  ", episode.code.as_deref().unwrap_or("???")),
                    Style::default().fg(theme.accent_fg),
                ),
                Span::styled(episode.name.clone(), name_style),
            ]),
            Line::from(Span::styled(
                format!("Aired: {}", episode.air_date.as_deref().unwrap_or("unknown")),
                Style::default().fg(theme.card_muted_fg),
            )),
        ]
    }
}

impl View for EpisodesView {
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
            InputEvent::Paste(text) if self.mode == InputMode::Code => {
                self.code_edit.push_str(text);
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
            InputMode::Code => list::render_input_bar(
                frame,
                chunks[0],
                &self.theme,
                "Episode code",
                &self.code_edit,
                "",
                true,
            ),
            mode => list::render_input_bar(
                frame,
                chunks[0],
                &self.theme,
                "Search episodes",
                self.pane.search_input(),
                &self.hint(),
                mode == InputMode::Search,
            ),
        };

        if let Some(message) = self.pane.error() {
            list::render_error_banner(frame, chunks[1], &self.theme, message);
        }

        match self.pane.body() {
            BodyKind::Loading => list::render_loading(frame, chunks[2], &self.theme, "episodes"),
            BodyKind::Empty => list::render_empty(frame, chunks[2], &self.theme, "episodes"),
            BodyKind::Cards => {
                let cards: Vec<Vec<Line<'static>>> = self
                    .pane
                    .items()
                    .iter()
                    .enumerate()
                    .map(|(i, e)| self.card_lines(e, i == self.pane.selected()))
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
    fn test_code_filter_commit() {
        let mut view = EpisodesView::new(Duration::from_millis(500), UiTheme::default());
        view.handle_input(&key(KeyCode::Char('e')));
        for ch in "S01E05".chars() {
            view.handle_input(&key(KeyCode::Char(ch)));
        }
        view.handle_input(&key(KeyCode::Enter));

        assert_eq!(view.pane().filter().code.as_deref(), Some("S01E05"));
        assert!(view.take_fetch().is_some());
    }

    #[test]
    fn test_esc_cancels_code_edit() {
        let mut view = EpisodesView::new(Duration::from_millis(500), UiTheme::default());
        view.handle_input(&key(KeyCode::Char('e')));
        view.handle_input(&key(KeyCode::Char('x')));
        view.handle_input(&key(KeyCode::Esc));

        assert_eq!(view.pane().filter().code, None);
        assert!(view.take_fetch().is_none());
    }
}
