//! Messages delivered from fetch tasks back to the event loop.
//!
//! Errors travel as display strings; the UI has exactly one "query failed"
//! error kind and the typed error has already been logged at the fetch site.

use crate::models::{Character, Episode, Location, Paged};
use crate::services::{Detail, DetailRequest};

pub enum AppMessage {
    CharactersLoaded {
        generation: u64,
        result: Result<Paged<Character>, String>,
    },
    EpisodesLoaded {
        generation: u64,
        result: Result<Paged<Episode>, String>,
    },
    LocationsLoaded {
        generation: u64,
        result: Result<Paged<Location>, String>,
    },
    DetailLoaded {
        request: DetailRequest,
        result: Result<Detail, String>,
    },
}
