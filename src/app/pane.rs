//! Per-tab list state machine.
//!
//! Owns everything one tab needs between fetches: the filter record, the
//! current page, the debounced search input, the last envelope and results,
//! and the error banner. Fetch results are matched against a generation
//! counter so a superseded request's late reply is dropped.

use std::time::{Duration, Instant};

use crate::models::{Filter, PageInfo, Paged};

use super::debounce::SearchDebouncer;

/// Lifecycle of a pane. There is no terminal state; the pane cycles for as
/// long as the view is mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Never fetched.
    Idle,
    /// First fetch in flight, nothing to show yet.
    Loading,
    /// Data present (possibly an empty result set).
    Loaded,
    /// Fetch failed; prior data, if any, stays visible.
    Failed,
    /// Parameter change or manual refresh with prior data on screen.
    Refetching,
}

/// What the body area should render right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// No data yet: show the loading indicator.
    Loading,
    /// Result cards (stale ones during a refetch or after an error).
    Cards,
    /// Zero results and no error: show the empty state with a
    /// clear-filters hint.
    Empty,
}

#[derive(Debug)]
pub struct ListPane<T, F: Filter> {
    phase: Phase,
    page: u32,
    filter: F,
    search_input: String,
    debouncer: SearchDebouncer,
    items: Vec<T>,
    info: Option<PageInfo>,
    error: Option<String>,
    selected: usize,
    generation: u64,
}

impl<T, F: Filter> ListPane<T, F> {
    pub fn new(search_debounce: Duration) -> Self {
        Self {
            phase: Phase::Idle,
            page: 1,
            filter: F::default(),
            search_input: String::new(),
            debouncer: SearchDebouncer::new(search_debounce),
            items: Vec::new(),
            info: None,
            error: None,
            selected: 0,
            generation: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn filter(&self) -> &F {
        &self.filter
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn info(&self) -> Option<&PageInfo> {
        self.info.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_item(&self) -> Option<&T> {
        self.items.get(self.selected)
    }

    pub fn has_active_filters(&self) -> bool {
        !self.filter.is_empty() || !self.search_input.is_empty()
    }

    // --- search input -----------------------------------------------------

    pub fn search_push(&mut self, ch: char, now: Instant) {
        self.search_input.push(ch);
        self.debouncer.input(&self.search_input, now);
    }

    pub fn search_pop(&mut self, now: Instant) {
        if self.search_input.pop().is_some() {
            self.debouncer.input(&self.search_input, now);
        }
    }

    pub fn search_paste(&mut self, text: &str, now: Instant) {
        self.search_input.push_str(text);
        self.debouncer.input(&self.search_input, now);
    }

    /// Poll the debounce deadline. Returns true when a commit landed in the
    /// filter and a fetch is due.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(commit) = self.debouncer.poll(now) else {
            return false;
        };
        if self.filter.name().map(str::to_owned) == commit.name {
            return false;
        }
        self.filter.set_name(commit.name);
        self.page = 1;
        true
    }

    // --- filter / pagination operations -----------------------------------

    /// Mutate one predicate. Resets the page to 1 when the filter actually
    /// changed; returns whether a fetch is due.
    pub fn set_filter(&mut self, mutate: impl FnOnce(&mut F)) -> bool {
        let before = self.filter.clone();
        mutate(&mut self.filter);
        if self.filter == before {
            return false;
        }
        self.page = 1;
        true
    }

    /// Reset all predicates, the search text and the page. Always due for a
    /// fetch afterwards.
    pub fn clear_all(&mut self) {
        self.filter = F::default();
        self.search_input.clear();
        self.debouncer.reset();
        self.page = 1;
    }

    pub fn can_next(&self) -> bool {
        self.info.as_ref().is_some_and(PageInfo::has_next)
    }

    pub fn can_prev(&self) -> bool {
        self.info.as_ref().is_some_and(PageInfo::has_prev)
    }

    /// Advance to the envelope's `next` page. No-op, not an error, at the
    /// boundary. Returns whether a fetch is due.
    pub fn next_page(&mut self) -> bool {
        match self.info.as_ref().and_then(|info| info.next) {
            Some(next) => {
                self.page = next.max(1);
                true
            }
            None => false,
        }
    }

    /// Step back to the envelope's `prev` page. No-op at the boundary.
    pub fn prev_page(&mut self) -> bool {
        match self.info.as_ref().and_then(|info| info.prev) {
            Some(prev) => {
                self.page = prev.max(1);
                true
            }
            None => false,
        }
    }

    // --- selection --------------------------------------------------------

    pub fn select_next(&mut self) {
        if !self.items.is_empty() {
            self.selected = (self.selected + 1).min(self.items.len() - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    // --- fetch lifecycle --------------------------------------------------

    /// Stamp a new fetch. Every earlier in-flight request becomes stale.
    pub fn begin_fetch(&mut self) -> u64 {
        self.generation += 1;
        self.phase = match self.phase {
            Phase::Idle | Phase::Loading => Phase::Loading,
            _ => Phase::Refetching,
        };
        self.generation
    }

    /// Apply a fetch result. Stale generations are dropped; a failure keeps
    /// the previously loaded results visible. Returns whether the pane
    /// changed.
    pub fn apply(&mut self, generation: u64, result: Result<Paged<T>, String>) -> bool {
        if generation != self.generation {
            return false;
        }

        match result {
            Ok(paged) => {
                self.items = paged.results;
                self.info = Some(paged.info);
                self.error = None;
                self.phase = Phase::Loaded;
                if self.selected >= self.items.len() {
                    self.selected = self.items.len().saturating_sub(1);
                }
            }
            Err(message) => {
                self.error = Some(message);
                self.phase = Phase::Failed;
            }
        }
        true
    }

    /// Classify the body area. Empty results are never confused with an
    /// initial load.
    pub fn body(&self) -> BodyKind {
        if !self.items.is_empty() {
            return BodyKind::Cards;
        }
        match self.phase {
            Phase::Loaded => BodyKind::Empty,
            Phase::Failed => BodyKind::Empty,
            _ => BodyKind::Loading,
        }
    }

    pub fn is_fetching(&self) -> bool {
        matches!(self.phase, Phase::Loading | Phase::Refetching)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CharacterFilter;

    type Pane = ListPane<&'static str, CharacterFilter>;

    fn pane() -> Pane {
        ListPane::new(Duration::from_millis(500))
    }

    fn page_one() -> Paged<&'static str> {
        Paged {
            info: PageInfo {
                count: 826,
                pages: 42,
                next: Some(2),
                prev: None,
            },
            results: vec!["Rick Sanchez", "Morty Smith"],
        }
    }

    fn loaded() -> Pane {
        let mut pane = pane();
        let generation = pane.begin_fetch();
        pane.apply(generation, Ok(page_one()));
        pane
    }

    #[test]
    fn test_filter_change_resets_page() {
        let mut pane = loaded();
        pane.next_page();
        assert_eq!(pane.page(), 2);

        let due = pane.set_filter(|f| f.status = Some("alive".into()));
        assert!(due);
        assert_eq!(pane.page(), 1);
    }

    #[test]
    fn test_page_change_preserves_filter() {
        let mut pane = loaded();
        pane.set_filter(|f| f.gender = Some("female".into()));
        pane.begin_fetch();
        pane.apply(pane.generation, Ok(page_one()));

        pane.next_page();
        assert_eq!(pane.page(), 2);
        assert_eq!(pane.filter().gender.as_deref(), Some("female"));
    }

    #[test]
    fn test_unchanged_filter_is_not_due() {
        let mut pane = loaded();
        pane.next_page();

        let due = pane.set_filter(|f| f.name = None);
        assert!(!due);
        assert_eq!(pane.page(), 2);
    }

    #[test]
    fn test_clear_all() {
        let mut pane = loaded();
        let now = Instant::now();
        pane.set_filter(|f| f.species = Some("human".into()));
        pane.search_push('r', now);
        pane.next_page();

        pane.clear_all();
        assert_eq!(pane.filter(), &CharacterFilter::default());
        assert_eq!(pane.search_input(), "");
        assert_eq!(pane.page(), 1);
        assert!(!pane.has_active_filters());
    }

    #[test]
    fn test_pagination_boundaries() {
        let mut pane = loaded();
        // prev is None at page 1: no-op.
        assert!(!pane.can_prev());
        assert!(pane.can_next());
        assert!(!pane.prev_page());
        assert_eq!(pane.page(), 1);

        assert!(pane.next_page());
        assert_eq!(pane.page(), 2);

        // Last page: next is None.
        let generation = pane.begin_fetch();
        pane.apply(
            generation,
            Ok(Paged {
                info: PageInfo {
                    count: 826,
                    pages: 42,
                    next: None,
                    prev: Some(41),
                },
                results: vec!["Butter Robot"],
            }),
        );
        assert!(!pane.next_page());
    }

    #[test]
    fn test_debounced_search_resets_page() {
        let mut pane = loaded();
        pane.next_page();
        let now = Instant::now();

        pane.search_push('r', now);
        assert!(!pane.tick(now + Duration::from_millis(100)));

        assert!(pane.tick(now + Duration::from_millis(600)));
        assert_eq!(pane.filter().name.as_deref(), Some("r"));
        assert_eq!(pane.page(), 1);
    }

    #[test]
    fn test_stale_generation_is_dropped() {
        let mut pane = pane();
        let stale = pane.begin_fetch();
        let current = pane.begin_fetch();

        assert!(!pane.apply(stale, Ok(page_one())));
        assert!(pane.items().is_empty());

        assert!(pane.apply(current, Ok(page_one())));
        assert_eq!(pane.items().len(), 2);
    }

    #[test]
    fn test_failure_keeps_stale_data() {
        let mut pane = loaded();
        let generation = pane.begin_fetch();
        assert_eq!(pane.phase(), Phase::Refetching);

        pane.apply(generation, Err("query failed".into()));
        assert_eq!(pane.phase(), Phase::Failed);
        assert_eq!(pane.error(), Some("query failed"));
        assert_eq!(pane.items().len(), 2);
        assert_eq!(pane.body(), BodyKind::Cards);
    }

    #[test]
    fn test_empty_result_is_not_loading() {
        let mut pane = pane();
        assert_eq!(pane.body(), BodyKind::Loading);

        let generation = pane.begin_fetch();
        pane.apply(
            generation,
            Ok(Paged {
                info: PageInfo {
                    count: 0,
                    pages: 0,
                    next: None,
                    prev: None,
                },
                results: vec![],
            }),
        );
        assert_eq!(pane.body(), BodyKind::Empty);
    }

    #[test]
    fn test_success_clears_error() {
        let mut pane = loaded();
        let generation = pane.begin_fetch();
        pane.apply(generation, Err("boom".into()));

        let generation = pane.begin_fetch();
        pane.apply(generation, Ok(page_one()));
        assert_eq!(pane.error(), None);
        assert_eq!(pane.phase(), Phase::Loaded);
    }

    #[test]
    fn test_selection_clamps() {
        let mut pane = loaded();
        pane.select_next();
        pane.select_next();
        pane.select_next();
        assert_eq!(pane.selected(), 1);

        let generation = pane.begin_fetch();
        pane.apply(
            generation,
            Ok(Paged {
                info: PageInfo {
                    count: 1,
                    pages: 1,
                    next: None,
                    prev: None,
                },
                results: vec!["Squanchy"],
            }),
        );
        assert_eq!(pane.selected(), 0);
        assert_eq!(pane.selected_item(), Some(&"Squanchy"));
    }
}
