//! View trait implemented by every renderable, interactive panel.

use super::event::InputEvent;
use ratatui::layout::Rect;
use ratatui::Frame;

pub trait View {
    fn handle_input(&mut self, event: &InputEvent) -> EventResult;

    fn render(&mut self, frame: &mut Frame, area: Rect);

    /// Terminal cursor position while this view owns a text input.
    fn cursor_position(&self) -> Option<(u16, u16)> {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult {
    Consumed,
    Ignored,
    Quit,
    /// Request a detail fetch for the selected entity.
    OpenDetail(String),
}

impl EventResult {
    pub fn is_consumed(&self) -> bool {
        matches!(self, EventResult::Consumed)
    }

    pub fn is_ignored(&self) -> bool {
        matches!(self, EventResult::Ignored)
    }

    pub fn is_quit(&self) -> bool {
        matches!(self, EventResult::Quit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveTab {
    Characters,
    Episodes,
    Locations,
}

impl ActiveTab {
    pub const ALL: [ActiveTab; 3] = [
        ActiveTab::Characters,
        ActiveTab::Episodes,
        ActiveTab::Locations,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ActiveTab::Characters => "Characters",
            ActiveTab::Episodes => "Episodes",
            ActiveTab::Locations => "Locations",
        }
    }

    pub fn index(self) -> usize {
        match self {
            ActiveTab::Characters => 0,
            ActiveTab::Episodes => 1,
            ActiveTab::Locations => 2,
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl Default for ActiveTab {
    fn default() -> Self {
        ActiveTab::Characters
    }
}
