//! Pagination envelope shared by every list query.

use serde::Deserialize;

/// `{count, pages, next, prev}` metadata wrapping one page of results.
///
/// `next`/`prev` are `None` at the respective boundary.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PageInfo {
    pub count: u32,
    pub pages: u32,
    pub next: Option<u32>,
    pub prev: Option<u32>,
}

impl PageInfo {
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    pub fn has_prev(&self) -> bool {
        self.prev.is_some()
    }
}

/// One page of results plus its envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct Paged<T> {
    pub info: PageInfo,
    pub results: Vec<T>,
}
