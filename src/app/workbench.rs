//! Workbench: tab routing, global keys, fetch dispatch and layout.
//!
//! Owns the three list views, the detail overlay and both ends of the fetch
//! pipeline: due fetches are spawned onto the async runtime and their results
//! drained from the message channel on every tick.

use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::core::{ActiveTab, EventResult, InputEvent, View};
use crate::runtime::{AppMessage, AsyncRuntime};
use crate::services::{AppConfig, CatalogService, DetailRequest, EntityKind};
use crate::views::{CharactersView, DetailOverlay, EpisodesView, LocationsView};

use super::pane::Phase;
use super::theme::UiTheme;

const HEADER_HEIGHT: u16 = 2;
const STATUS_HEIGHT: u16 = 1;

pub struct Workbench {
    characters: CharactersView,
    episodes: EpisodesView,
    locations: LocationsView,
    detail: DetailOverlay,
    active_tab: ActiveTab,
    theme: UiTheme,
    catalog: CatalogService,
    runtime: AsyncRuntime,
    tx: Sender<AppMessage>,
    rx: Receiver<AppMessage>,
    endpoint: String,
}

impl Workbench {
    pub fn new(config: &AppConfig, catalog: CatalogService, runtime: AsyncRuntime) -> Self {
        let theme = UiTheme::default();
        let (tx, rx) = std::sync::mpsc::channel();

        let mut characters = CharactersView::new(config.search_debounce, theme.clone());
        characters.request_fetch();

        let mut workbench = Self {
            characters,
            episodes: EpisodesView::new(config.search_debounce, theme.clone()),
            locations: LocationsView::new(config.search_debounce, theme.clone()),
            detail: DetailOverlay::new(theme.clone()),
            active_tab: ActiveTab::default(),
            theme,
            catalog,
            runtime,
            tx,
            rx,
            endpoint: config.endpoint.clone(),
        };
        workbench.dispatch_fetches();
        workbench
    }

    pub fn active_tab(&self) -> ActiveTab {
        self.active_tab
    }

    /// Drive time-based work: debounce deadlines and fetch results.
    pub fn on_tick(&mut self, now: Instant) {
        self.characters.tick(now);
        self.episodes.tick(now);
        self.locations.tick(now);
        self.drain_messages();
        self.dispatch_fetches();
    }

    fn switch_tab(&mut self, tab: ActiveTab) {
        self.active_tab = tab;
        // First activation of a tab triggers its initial fetch.
        let idle = match tab {
            ActiveTab::Characters => self.characters.pane().phase() == Phase::Idle,
            ActiveTab::Episodes => self.episodes.pane().phase() == Phase::Idle,
            ActiveTab::Locations => self.locations.pane().phase() == Phase::Idle,
        };
        if idle {
            match tab {
                ActiveTab::Characters => self.characters.request_fetch(),
                ActiveTab::Episodes => self.episodes.request_fetch(),
                ActiveTab::Locations => self.locations.request_fetch(),
            }
        }
        self.dispatch_fetches();
    }

    fn open_detail(&mut self, id: String) {
        let kind = match self.active_tab {
            ActiveTab::Characters => EntityKind::Character,
            ActiveTab::Episodes => EntityKind::Episode,
            ActiveTab::Locations => EntityKind::Location,
        };
        let request = DetailRequest { kind, id };
        self.detail.open(request.clone());

        let catalog = self.catalog.clone();
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let result = catalog.detail(&request).await;
            if let Err(error) = &result {
                tracing::warn!(kind = request.kind.label(), id = %request.id, %error, "detail fetch failed");
            }
            let _ = tx.send(AppMessage::DetailLoaded {
                request,
                result: result.map_err(|e| e.to_string()),
            });
        });
    }

    /// Spawn a task for every view with a pending fetch request.
    fn dispatch_fetches(&mut self) {
        if let Some((generation, page, filter)) = self.characters.take_fetch() {
            tracing::debug!(generation, page, "fetching characters");
            let catalog = self.catalog.clone();
            let tx = self.tx.clone();
            self.runtime.spawn(async move {
                let result = catalog.characters(page, &filter).await;
                if let Err(error) = &result {
                    tracing::warn!(page, %error, "characters fetch failed");
                }
                let _ = tx.send(AppMessage::CharactersLoaded {
                    generation,
                    result: result.map_err(|e| e.to_string()),
                });
            });
        }

        if let Some((generation, page, filter)) = self.episodes.take_fetch() {
            tracing::debug!(generation, page, "fetching episodes");
            let catalog = self.catalog.clone();
            let tx = self.tx.clone();
            self.runtime.spawn(async move {
                let result = catalog.episodes(page, &filter).await;
                if let Err(error) = &result {
                    tracing::warn!(page, %error, "episodes fetch failed");
                }
                let _ = tx.send(AppMessage::EpisodesLoaded {
                    generation,
                    result: result.map_err(|e| e.to_string()),
                });
            });
        }

        if let Some((generation, page, filter)) = self.locations.take_fetch() {
            tracing::debug!(generation, page, "fetching locations");
            let catalog = self.catalog.clone();
            let tx = self.tx.clone();
            self.runtime.spawn(async move {
                let result = catalog.locations(page, &filter).await;
                if let Err(error) = &result {
                    tracing::warn!(page, %error, "locations fetch failed");
                }
                let _ = tx.send(AppMessage::LocationsLoaded {
                    generation,
                    result: result.map_err(|e| e.to_string()),
                });
            });
        }
    }

    fn drain_messages(&mut self) {
        loop {
            match self.rx.try_recv() {
                Ok(AppMessage::CharactersLoaded { generation, result }) => {
                    self.characters.apply(generation, result);
                }
                Ok(AppMessage::EpisodesLoaded { generation, result }) => {
                    self.episodes.apply(generation, result);
                }
                Ok(AppMessage::LocationsLoaded { generation, result }) => {
                    self.locations.apply(generation, result);
                }
                Ok(AppMessage::DetailLoaded { request, result }) => {
                    self.detail.apply(&request, result);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
    }

    fn handle_detail_key(&mut self, key: &KeyEvent) -> EventResult {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.detail.close();
                EventResult::Consumed
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.detail.scroll_down();
                EventResult::Consumed
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.detail.scroll_up();
                EventResult::Consumed
            }
            _ => EventResult::Consumed,
        }
    }

    fn handle_global_key(&mut self, key: &KeyEvent) -> EventResult {
        match key.code {
            KeyCode::Char('q') => EventResult::Quit,
            KeyCode::Tab => {
                self.switch_tab(self.active_tab.next());
                EventResult::Consumed
            }
            KeyCode::BackTab => {
                self.switch_tab(self.active_tab.prev());
                EventResult::Consumed
            }
            KeyCode::Char('1') => {
                self.switch_tab(ActiveTab::Characters);
                EventResult::Consumed
            }
            KeyCode::Char('2') => {
                self.switch_tab(ActiveTab::Episodes);
                EventResult::Consumed
            }
            KeyCode::Char('3') => {
                self.switch_tab(ActiveTab::Locations);
                EventResult::Consumed
            }
            _ => EventResult::Ignored,
        }
    }

    fn active_view_mut(&mut self) -> &mut dyn View {
        match self.active_tab {
            ActiveTab::Characters => &mut self.characters,
            ActiveTab::Episodes => &mut self.episodes,
            ActiveTab::Locations => &mut self.locations,
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled(
            "citadel ".to_string(),
            Style::default()
                .fg(self.theme.header_fg)
                .add_modifier(Modifier::BOLD),
        )];
        for tab in ActiveTab::ALL {
            let style = if tab == self.active_tab {
                Style::default()
                    .fg(self.theme.tab_active_fg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.theme.tab_inactive_fg)
            };
            spans.push(Span::styled(
                format!("  [{}] {}", tab.index() + 1, tab.title()),
                style,
            ));
        }

        let header = Paragraph::new(Line::from(spans))
            .block(Block::default().borders(Borders::BOTTOM));
        frame.render_widget(header, area);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let (phase, page, pages, count, filtered) = match self.active_tab {
            ActiveTab::Characters => {
                let pane = self.characters.pane();
                (
                    pane.phase(),
                    pane.page(),
                    pane.info().map(|i| i.pages),
                    pane.info().map(|i| i.count),
                    pane.has_active_filters(),
                )
            }
            ActiveTab::Episodes => {
                let pane = self.episodes.pane();
                (
                    pane.phase(),
                    pane.page(),
                    pane.info().map(|i| i.pages),
                    pane.info().map(|i| i.count),
                    pane.has_active_filters(),
                )
            }
            ActiveTab::Locations => {
                let pane = self.locations.pane();
                (
                    pane.phase(),
                    pane.page(),
                    pane.info().map(|i| i.pages),
                    pane.info().map(|i| i.count),
                    pane.has_active_filters(),
                )
            }
        };

        let phase_label = match phase {
            Phase::Idle => "idle",
            Phase::Loading | Phase::Refetching => "loading",
            Phase::Loaded => "ready",
            Phase::Failed => "error",
        };

        let mut summary = match (pages, count) {
            (Some(pages), Some(count)) => {
                format!("{} · page {}/{} · {} total", phase_label, page, pages, count)
            }
            _ => phase_label.to_string(),
        };
        if filtered {
            summary.push_str(" · filtered");
        }

        let status = Line::from(vec![
            Span::styled(summary, Style::default().fg(self.theme.card_fg)),
            Span::styled(
                format!("  |  {}  |  q:quit Tab:switch Enter:detail", self.endpoint),
                Style::default().fg(self.theme.card_muted_fg),
            ),
        ]);
        frame.render_widget(Paragraph::new(status), area);
    }
}

impl View for Workbench {
    fn handle_input(&mut self, event: &InputEvent) -> EventResult {
        let result = match event {
            InputEvent::Key(key) if key.kind != KeyEventKind::Release => {
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    return EventResult::Quit;
                }
                if self.detail.is_open() {
                    return self.handle_detail_key(key);
                }

                // The active view gets first refusal; globals only see what
                // it ignored, so text inputs keep their characters.
                let result = self.active_view_mut().handle_input(event);
                if result.is_ignored() {
                    self.handle_global_key(key)
                } else {
                    result
                }
            }
            InputEvent::Paste(_) => self.active_view_mut().handle_input(event),
            InputEvent::Resize(_, _) => EventResult::Consumed,
            _ => EventResult::Ignored,
        };

        match result {
            EventResult::OpenDetail(id) => {
                self.open_detail(id);
                EventResult::Consumed
            }
            other => {
                self.dispatch_fetches();
                other
            }
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(STATUS_HEIGHT),
            ])
            .split(area);

        self.render_header(frame, chunks[0]);

        match self.active_tab {
            ActiveTab::Characters => self.characters.render(frame, chunks[1]),
            ActiveTab::Episodes => self.episodes.render(frame, chunks[1]),
            ActiveTab::Locations => self.locations.render(frame, chunks[1]),
        }

        self.render_status(frame, chunks[2]);
        self.detail.render(frame, area);

        if !self.detail.is_open() {
            if let Some((x, y)) = self.cursor_position() {
                frame.set_cursor_position((x, y));
            }
        }
    }

    fn cursor_position(&self) -> Option<(u16, u16)> {
        match self.active_tab {
            ActiveTab::Characters => self.characters.cursor_position(),
            ActiveTab::Episodes => self.episodes.cursor_position(),
            ActiveTab::Locations => self.locations.cursor_position(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphql::GraphqlClient;
    use crossterm::event::KeyEventState;
    use std::time::Duration;

    fn key(code: KeyCode) -> InputEvent {
        InputEvent::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    fn workbench() -> Workbench {
        // Points at an unroutable endpoint; these tests never wait on fetches.
        let client = GraphqlClient::builder("http://127.0.0.1:9")
            .request_timeout(Duration::from_millis(50))
            .build()
            .unwrap();
        Workbench::new(
            &AppConfig::default(),
            CatalogService::new(client),
            AsyncRuntime::new().unwrap(),
        )
    }

    #[test]
    fn test_tab_switching() {
        let mut workbench = workbench();
        assert_eq!(workbench.active_tab(), ActiveTab::Characters);

        workbench.handle_input(&key(KeyCode::Tab));
        assert_eq!(workbench.active_tab(), ActiveTab::Episodes);

        workbench.handle_input(&key(KeyCode::Char('3')));
        assert_eq!(workbench.active_tab(), ActiveTab::Locations);

        workbench.handle_input(&key(KeyCode::BackTab));
        assert_eq!(workbench.active_tab(), ActiveTab::Episodes);
    }

    #[test]
    fn test_quit_keys() {
        let mut workbench = workbench();
        assert!(workbench.handle_input(&key(KeyCode::Char('q'))).is_quit());

        let ctrl_c = InputEvent::Key(KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        });
        assert!(workbench.handle_input(&ctrl_c).is_quit());
    }

    #[test]
    fn test_search_mode_swallows_global_keys() {
        let mut workbench = workbench();
        workbench.handle_input(&key(KeyCode::Char('/')));
        // 'q' is now search text, not quit.
        let result = workbench.handle_input(&key(KeyCode::Char('q')));
        assert!(!result.is_quit());
        assert_eq!(workbench.characters.pane().search_input(), "q");
    }
}
