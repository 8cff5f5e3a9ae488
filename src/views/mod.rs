//! View layer: per-tab card lists and the detail overlay.

pub mod characters;
pub mod detail;
pub mod episodes;
pub mod list;
pub mod locations;

pub use characters::CharactersView;
pub use detail::DetailOverlay;
pub use episodes::EpisodesView;
pub use locations::LocationsView;
