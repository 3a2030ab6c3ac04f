//! Incremental fetch controller for one category listing.
//!
//! The controller is a plain state machine. [`PaginationController::load`],
//! [`PaginationController::load_more`] and
//! [`PaginationController::dispatch`] mutate state and hand back a
//! [`FetchTicket`] describing the request to make; the caller performs it and
//! feeds the outcome to [`PaginationController::resolve`]. Each ticket
//! carries the generation and filter snapshot it was issued for, and results
//! for anything but the current generation are dropped.
//!
//! ```text
//! Idle ──load──▶ Loading ──ok──▶ Loaded ──load_more──▶ LoadingMore ──ok──▶ Loaded
//!                   │                                       │
//!                   └──err──▶ Error            Error(partial) ◀──err──┘
//! ```

use std::fmt::Display;

use placepick_core::{DocumentsPage, FilterAction, FilterState, PlaceResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Idle,
    Loading,
    Loaded,
    LoadingMore,
    Error,
}

/// A request the controller wants made.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchTicket {
    pub generation: u64,
    pub filter: FilterState,
    pub page: u32,
    /// `true` for "load more", whose items are appended.
    pub append: bool,
}

/// What a fetch produced, independent of the route that served it.
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult {
    pub items: Vec<PlaceResult>,
    pub total: u32,
    pub is_end: bool,
}

impl From<DocumentsPage> for PageResult {
    fn from(page: DocumentsPage) -> Self {
        Self {
            items: page.documents,
            total: page.meta.total_count,
            is_end: page.meta.is_end,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PaginationController {
    phase: LoadPhase,
    filter: Option<FilterState>,
    items: Vec<PlaceResult>,
    page: u32,
    total: u32,
    is_end: bool,
    error: Option<String>,
    generation: u64,
}

impl Default for PaginationController {
    fn default() -> Self {
        Self::new()
    }
}

impl PaginationController {
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: LoadPhase::Idle,
            filter: None,
            items: Vec::new(),
            page: 0,
            total: 0,
            is_end: false,
            error: None,
            generation: 0,
        }
    }

    #[must_use]
    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    #[must_use]
    pub fn items(&self) -> &[PlaceResult] {
        &self.items
    }

    #[must_use]
    pub fn filter(&self) -> Option<&FilterState> {
        self.filter.as_ref()
    }

    /// Last page merged into `items`; 0 before the first successful load.
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn is_end(&self) -> bool {
        self.is_end
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// An error after at least one page was shown.
    #[must_use]
    pub fn is_partial_error(&self) -> bool {
        self.phase == LoadPhase::Error && !self.items.is_empty()
    }

    #[must_use]
    pub fn can_load_more(&self) -> bool {
        self.phase == LoadPhase::Loaded && !self.is_end
    }

    /// Starts a fresh listing for `filter`: clears items and supersedes any
    /// request in flight.
    pub fn load(&mut self, filter: FilterState) -> FetchTicket {
        let filter = FilterState { page: 1, ..filter };
        self.generation += 1;
        self.phase = LoadPhase::Loading;
        self.items.clear();
        self.page = 0;
        self.total = 0;
        self.is_end = false;
        self.error = None;
        self.filter = Some(filter.clone());

        tracing::debug!(generation = self.generation, category = %filter.category, "listing load");
        FetchTicket {
            generation: self.generation,
            filter,
            page: 1,
            append: false,
        }
    }

    /// Requests the next page. A no-op unless the listing is `Loaded` and
    /// not at its end, so a second call while one is in flight does nothing.
    pub fn load_more(&mut self) -> Option<FetchTicket> {
        if !self.can_load_more() {
            return None;
        }
        let filter = self.filter.clone()?;
        self.phase = LoadPhase::LoadingMore;
        let page = self.page.saturating_add(1);

        tracing::debug!(generation = self.generation, page, "listing load more");
        Some(FetchTicket {
            generation: self.generation,
            filter: FilterState { page, ..filter },
            page,
            append: true,
        })
    }

    /// Applies a user interaction. `NextPage` maps to [`Self::load_more`];
    /// every other action reloads from page 1 when the search changed.
    pub fn dispatch(&mut self, action: FilterAction) -> Option<FetchTicket> {
        if action == FilterAction::NextPage {
            return self.load_more();
        }
        let current = self.filter.clone()?;
        let next = current.apply(action);
        if next.same_search(&current) && self.phase != LoadPhase::Error {
            return None;
        }
        Some(self.load(next))
    }

    /// Re-issues the request that failed: a fresh load when nothing was
    /// shown yet, the missing page otherwise.
    pub fn retry(&mut self) -> Option<FetchTicket> {
        if self.phase != LoadPhase::Error {
            return None;
        }
        let filter = self.filter.clone()?;
        if self.items.is_empty() {
            return Some(self.load(filter));
        }
        self.phase = LoadPhase::Loaded;
        self.error = None;
        self.load_more()
    }

    /// Merges the outcome of `ticket`. Returns `false` when the ticket was
    /// stale (superseded by a later load) and the result was discarded.
    pub fn resolve<E: Display>(&mut self, ticket: &FetchTicket, result: Result<PageResult, E>) -> bool {
        let current = match &self.filter {
            Some(filter) => filter,
            None => return false,
        };
        let expected_phase = if ticket.append {
            LoadPhase::LoadingMore
        } else {
            LoadPhase::Loading
        };
        if ticket.generation != self.generation
            || !ticket.filter.same_search(current)
            || self.phase != expected_phase
        {
            tracing::debug!(
                ticket_generation = ticket.generation,
                generation = self.generation,
                "discarding stale listing result"
            );
            return false;
        }

        match result {
            Ok(page) => {
                if ticket.append {
                    self.items.extend(page.items);
                } else {
                    self.items = page.items;
                }
                self.page = ticket.page;
                self.total = page.total;
                self.is_end = page.is_end;
                self.error = None;
                self.phase = LoadPhase::Loaded;
            }
            Err(e) => {
                tracing::warn!(page = ticket.page, error = %e, "listing fetch failed");
                self.error = Some(e.to_string());
                self.phase = LoadPhase::Error;
            }
        }
        true
    }
}
