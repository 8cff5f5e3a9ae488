//! Characters tab: searchable, filterable card list.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::Frame;

use crate::app::{BodyKind, ListPane, UiTheme};
use crate::core::{EventResult, InputEvent, View};
use crate::models::{Character, CharacterFilter, Paged};

use super::list;

/// Discrete status values cycled by the `s` key. `None` is "any".
const STATUS_CYCLE: [Option<&str>; 4] = [None, Some("alive"), Some("dead"), Some("unknown")];
/// Discrete gender values cycled by the `g` key.
const GENDER_CYCLE: [Option<&str>; 5] = [
    None,
    Some("female"),
    Some("male"),
    Some("genderless"),
    Some("unknown"),
];

const CARD_HEIGHT: u16 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputMode {
    Normal,
    /// Name search; commits through the debouncer.
    Search,
    /// Species text filter; commits on Enter.
    Species,
}

pub struct CharactersView {
    pane: ListPane<Character, CharacterFilter>,
    theme: UiTheme,
    mode: InputMode,
    species_edit: String,
    fetch_due: bool,
    cursor: Option<(u16, u16)>,
}

impl CharactersView {
    pub fn new(search_debounce: Duration, theme: UiTheme) -> Self {
        Self {
            pane: ListPane::new(search_debounce),
            theme,
            mode: InputMode::Normal,
            species_edit: String::new(),
            fetch_due: false,
            cursor: None,
        }
    }

    pub fn pane(&self) -> &ListPane<Character, CharacterFilter> {
        &self.pane
    }

    /// Poll the search debounce deadline.
    pub fn tick(&mut self, now: Instant) {
        if self.pane.tick(now) {
            self.fetch_due = true;
        }
    }

    pub fn request_fetch(&mut self) {
        self.fetch_due = true;
    }

    /// Consume the pending fetch request, stamping a new generation.
    pub fn take_fetch(&mut self) -> Option<(u64, u32, CharacterFilter)> {
        if !self.fetch_due {
            return None;
        }
        self.fetch_due = false;
        let generation = self.pane.begin_fetch();
        Some((generation, self.pane.page(), self.pane.filter().clone()))
    }

    pub fn apply(&mut self, generation: u64, result: Result<Paged<Character>, String>) {
        self.pane.apply(generation, result);
    }

    fn cycle_status(&mut self) {
        let filter = self.pane.filter();
        let current = STATUS_CYCLE
            .iter()
            .position(|v| *v == filter.status.as_deref())
            .unwrap_or(0);
        let next = STATUS_CYCLE[(current + 1) % STATUS_CYCLE.len()].map(str::to_owned);
        if self.pane.set_filter(|f| f.status = next) {
            self.fetch_due = true;
        }
    }

    fn cycle_gender(&mut self) {
        let filter = self.pane.filter();
        let current = GENDER_CYCLE
            .iter()
            .position(|v| *v == filter.gender.as_deref())
            .unwrap_or(0);
        let next = GENDER_CYCLE[(current + 1) % GENDER_CYCLE.len()].map(str::to_owned);
        if self.pane.set_filter(|f| f.gender = next) {
            self.fetch_due = true;
        }
    }

    fn commit_species(&mut self) {
        // Empty text clears the predicate, same as the name search.
        let value = if self.species_edit.is_empty() {
            None
        } else {
            Some(self.species_edit.clone())
        };
        if self.pane.set_filter(|f| f.species = value) {
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
                self.species_edit = self.pane.filter().species.clone().unwrap_or_default();
                self.mode = InputMode::Species;
                EventResult::Consumed
            }
            KeyCode::Char('s') => {
                self.cycle_status();
                EventResult::Consumed
            }
            KeyCode::Char('g') => {
                self.cycle_gender();
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
                Some(character) => EventResult::OpenDetail(character.id.clone()),
                None => EventResult::Ignored,
            },
            _ => EventResult::Ignored,
        }
    }

    fn handle_search_key(&mut self, key: &KeyEvent) -> EventResult {
        let now = Instant::now();
        match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                self.mode = InputMode::Normal;
                EventResult::Consumed
            }
            KeyCode::Backspace => {
                self.pane.search_pop(now);
                EventResult::Consumed
            }
            KeyCode::Char(ch) => {
                self.pane.search_push(ch, now);
                EventResult::Consumed
            }
            _ => EventResult::Ignored,
        }
    }

    fn handle_species_key(&mut self, key: &KeyEvent) -> EventResult {
        match key.code {
            KeyCode::Enter => {
                self.commit_species();
                self.mode = InputMode::Normal;
                EventResult::Consumed
            }
            KeyCode::Esc => {
                self.mode = InputMode::Normal;
                EventResult::Consumed
            }
            KeyCode::Backspace => {
                self.species_edit.pop();
                EventResult::Consumed
            }
            KeyCode::Char(ch) => {
                self.species_edit.push(ch);
                EventResult::Consumed
            }
            _ => EventResult::Ignored,
        }
    }

    fn filter_summary(&self) -> String {
        let filter = self.pane.filter();
        let mut parts = Vec::new();
        if let Some(status) = &filter.status {
            parts.push(format!("status={}", status));
        }
        if let Some(gender) = &filter.gender {
            parts.push(format!("gender={}", gender));
        }
        if let Some(species) = &filter.species {
            parts.push(format!("species={}", species));
        }
        if parts.is_empty() {
            "s:status g:gender e:species /:search".to_string()
        } else {
            parts.join(" ")
        }
    }

    fn card_lines(&self, character: &Character, selected: bool) -> Vec<Line<'static>> {
        let theme = &self.theme;
        let name_style = if selected {
            Style::default().fg(theme.selected_fg).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.card_fg).add_modifier(Modifier::BOLD)
        };

        let mut species_line = format!("{} · {}", character.species, character.gender);
        if !character.kind.is_empty() {
            species_line.push_str(&format!(" · {}", character.kind));
        }

        vec![
            Line::from(vec![
                Span::styled(
                    "● ".to_string(),
                    Style::default().fg(theme.status_color(&character.status)),
                ),
                Span::styled(character.name.clone(), name_style),
                Span::styled(
                    format!("  ({})", character.status),
                    Style::default().fg(theme.card_muted_fg),
                ),
            ]),
            Line::from(Span::styled(
                species_line,
                Style::default().fg(theme.card_fg),
            )),
            Line::from(Span::styled(
                format!(
                    "Origin: {} · Last seen: {}",
                    character.origin.name, character.location.name
                ),
                Style::default().fg(theme.card_muted_fg),
            )),
        ]
    }
}

impl View for CharactersView {
    fn handle_input(&mut self, event: &InputEvent) -> EventResult {
        match event {
            InputEvent::Key(key) if key.kind != KeyEventKind::Release => match self.mode {
                InputMode::Normal => self.handle_normal_key(key),
                InputMode::Search => self.handle_search_key(key),
                InputMode::Species => self.handle_species_key(key),
            },
            InputEvent::Paste(text) if self.mode == InputMode::Search => {
                self.pane.search_paste(text, Instant::now());
                EventResult::Consumed
            }
            InputEvent::Paste(text) if self.mode == InputMode::Species => {
                self.species_edit.push_str(text);
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
            InputMode::Species => list::render_input_bar(
                frame,
                chunks[0],
                &self.theme,
                "Species filter",
                &self.species_edit,
                "",
                true,
            ),
            mode => list::render_input_bar(
                frame,
                chunks[0],
                &self.theme,
                "Search characters",
                self.pane.search_input(),
                &self.filter_summary(),
                mode == InputMode::Search,
            ),
        };

        if let Some(message) = self.pane.error() {
            list::render_error_banner(frame, chunks[1], &self.theme, message);
        }

        match self.pane.body() {
            BodyKind::Loading => list::render_loading(frame, chunks[2], &self.theme, "characters"),
            BodyKind::Empty => list::render_empty(frame, chunks[2], &self.theme, "characters"),
            BodyKind::Cards => {
                let cards: Vec<Vec<Line<'static>>> = self
                    .pane
                    .items()
                    .iter()
                    .enumerate()
                    .map(|(i, c)| self.card_lines(c, i == self.pane.selected()))
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
    use crate::models::PageInfo;
    use crossterm::event::{KeyEventState, KeyModifiers};

    fn key(code: KeyCode) -> InputEvent {
        InputEvent::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    fn view() -> CharactersView {
        CharactersView::new(Duration::from_millis(500), UiTheme::default())
    }

    fn rick() -> Character {
        serde_json::from_value(serde_json::json!({
            "id": "1",
            "name": "Rick Sanchez",
            "status": "Alive",
            "species": "Human",
            "type": "",
            "gender": "Male",
            "origin": {"id": "1", "name": "Earth (C-137)"},
            "location": {"id": "3", "name": "Citadel of Ricks"}
        }))
        .unwrap()
    }

    fn load(view: &mut CharactersView, results: Vec<Character>) {
        view.request_fetch();
        let (generation, _, _) = view.take_fetch().unwrap();
        let count = results.len() as u32;
        view.apply(
            generation,
            Ok(Paged {
                info: PageInfo {
                    count,
                    pages: 1,
                    next: None,
                    prev: None,
                },
                results,
            }),
        );
    }

    #[test]
    fn test_status_cycle_marks_fetch_due() {
        let mut view = view();
        view.handle_input(&key(KeyCode::Char('s')));
        assert_eq!(view.pane().filter().status.as_deref(), Some("alive"));
        assert!(view.take_fetch().is_some());

        view.handle_input(&key(KeyCode::Char('s')));
        view.handle_input(&key(KeyCode::Char('s')));
        view.handle_input(&key(KeyCode::Char('s')));
        assert_eq!(view.pane().filter().status, None);
    }

    #[test]
    fn test_species_commit_on_enter() {
        let mut view = view();
        view.handle_input(&key(KeyCode::Char('e')));
        view.handle_input(&key(KeyCode::Char('d')));
        view.handle_input(&key(KeyCode::Char('o')));
        view.handle_input(&key(KeyCode::Char('g')));
        assert_eq!(view.pane().filter().species, None);

        view.handle_input(&key(KeyCode::Enter));
        assert_eq!(view.pane().filter().species.as_deref(), Some("dog"));
        assert!(view.take_fetch().is_some());
    }

    #[test]
    fn test_empty_species_clears_predicate() {
        let mut view = view();
        view.pane.set_filter(|f| f.species = Some("dog".into()));

        view.handle_input(&key(KeyCode::Char('e')));
        for _ in 0..3 {
            view.handle_input(&key(KeyCode::Backspace));
        }
        view.handle_input(&key(KeyCode::Enter));
        assert_eq!(view.pane().filter().species, None);
    }

    #[test]
    fn test_search_mode_routes_chars_to_debouncer() {
        let mut view = view();
        view.handle_input(&key(KeyCode::Char('/')));
        view.handle_input(&key(KeyCode::Char('r')));
        // 'r' goes to the search input, not the refresh key.
        assert_eq!(view.pane().search_input(), "r");
        assert!(view.take_fetch().is_none());
    }

    #[test]
    fn test_enter_opens_detail() {
        let mut view = view();
        load(&mut view, vec![rick()]);

        let result = view.handle_input(&key(KeyCode::Enter));
        assert_eq!(result, EventResult::OpenDetail("1".to_string()));
    }

    #[test]
    fn test_enter_without_items_is_ignored() {
        let mut view = view();
        assert_eq!(view.handle_input(&key(KeyCode::Enter)), EventResult::Ignored);
    }

    #[test]
    fn test_clear_key_resets_everything() {
        let mut view = view();
        view.handle_input(&key(KeyCode::Char('s')));
        view.take_fetch();

        view.handle_input(&key(KeyCode::Char('c')));
        assert_eq!(view.pane().filter(), &CharacterFilter::default());
        assert!(view.take_fetch().is_some());
    }
}
