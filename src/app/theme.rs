//! UI theme: the handful of color slots this UI has, kept in one place so
//! they don't scatter through the render code.

use ratatui::style::Color;

#[derive(Debug, Clone)]
pub struct UiTheme {
    pub header_fg: Color,
    pub tab_active_fg: Color,
    pub tab_inactive_fg: Color,
    pub focus_border: Color,
    pub inactive_border: Color,
    pub card_fg: Color,
    pub card_muted_fg: Color,
    pub selected_fg: Color,
    pub accent_fg: Color,
    pub error_fg: Color,
    pub status_alive_fg: Color,
    pub status_dead_fg: Color,
    pub status_unknown_fg: Color,
}

impl Default for UiTheme {
    fn default() -> Self {
        Self {
            header_fg: Color::Cyan,
            tab_active_fg: Color::Cyan,
            tab_inactive_fg: Color::DarkGray,
            focus_border: Color::Cyan,
            inactive_border: Color::DarkGray,
            card_fg: Color::Gray,
            card_muted_fg: Color::DarkGray,
            selected_fg: Color::White,
            accent_fg: Color::Yellow,
            error_fg: Color::Red,
            status_alive_fg: Color::Green,
            status_dead_fg: Color::Red,
            status_unknown_fg: Color::DarkGray,
        }
    }
}

impl UiTheme {
    /// Color for a character's life status string.
    pub fn status_color(&self, status: &str) -> Color {
        match status {
            "Alive" | "alive" => self.status_alive_fg,
            "Dead" | "dead" => self.status_dead_fg,
            _ => self.status_unknown_fg,
        }
    }
}
