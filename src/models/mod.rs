//! Remotely-sourced read-only records and their request-side filters.

pub mod character;
pub mod episode;
pub mod filter;
pub mod location;
pub mod page;

pub use character::{Character, CharacterRef};
pub use episode::{Episode, EpisodeRef};
pub use filter::{CharacterFilter, EpisodeFilter, Filter, LocationFilter};
pub use location::{Location, LocationRef};
pub use page::{PageInfo, Paged};
