//! Paging
//!
//! A [`PageAccumulator`] builds one ordered list out of successive pages of a
//! remote collection. Every request is issued as a [`PageTicket`] stamped
//! with the accumulator's generation; changing the filter context bumps the
//! generation so a response that was in flight for the old context can never
//! be merged into the new list.

use std::{fmt::Debug, hash::Hash};

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

mod links;

pub use links::{PageLink, page_links};

/// Items that carry a stable identity across pages.
pub trait Keyed {
    /// Identity type.
    type Key: Eq + Hash + Clone + Debug;

    /// The item's identity.
    fn key(&self) -> Self::Key;
}

/// One page of a remote collection, as delivered by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page.
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,

    /// Total number of pages in the collection.
    #[serde(default)]
    pub total_pages: u32,

    /// Total number of items in the collection.
    #[serde(default)]
    pub total_elements: u64,

    /// Requested page size.
    #[serde(default)]
    pub size: u32,

    /// Zero-based page index.
    #[serde(default)]
    pub number: u32,

    /// Whether this is the first page.
    #[serde(default)]
    pub first: bool,

    /// Whether this is the last page.
    #[serde(default)]
    pub last: bool,

    /// Whether another page follows.
    #[serde(default)]
    pub has_next: bool,

    /// Page number as requested.
    #[serde(default)]
    pub current_page: u32,
}

impl<T> Page<T> {
    /// A page with the given items and no pagination metadata.
    pub fn of(content: Vec<T>) -> Self {
        Self {
            content,
            total_pages: 0,
            total_elements: 0,
            size: 0,
            number: 0,
            first: false,
            last: false,
            has_next: false,
            current_page: 0,
        }
    }

    /// Convert every item, keeping the pagination metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        let Self {
            content,
            total_pages,
            total_elements,
            size,
            number,
            first,
            last,
            has_next,
            current_page,
        } = self;

        Page {
            content: content.into_iter().map(f).collect(),
            total_pages,
            total_elements,
            size,
            number,
            first,
            last,
            has_next,
            current_page,
        }
    }

    /// Convert every item, failing on the first conversion error.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `f`.
    pub fn try_map<U, E>(self, f: impl FnMut(T) -> Result<U, E>) -> Result<Page<U>, E> {
        let Self {
            content,
            total_pages,
            total_elements,
            size,
            number,
            first,
            last,
            has_next,
            current_page,
        } = self;

        Ok(Page {
            content: content.into_iter().map(f).collect::<Result<_, _>>()?,
            total_pages,
            total_elements,
            size,
            number,
            first,
            last,
            has_next,
            current_page,
        })
    }

    /// Whether pages follow `requested`, the page number this page was fetched as.
    ///
    /// An explicit `last` wins, then `hasNext`, then the page count.
    pub fn has_more(&self, requested: u32, first_page: u32) -> bool {
        if self.last {
            return false;
        }

        if self.has_next {
            return true;
        }

        let pages_seen = requested.saturating_sub(first_page).saturating_add(1);

        pages_seen < self.total_pages
    }
}

/// How a fetched page is merged into the accumulated list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MergeMode {
    /// Pages after the first are appended (load more, infinite scroll).
    #[default]
    Append,

    /// Every page replaces the list (numbered pagination).
    Replace,
}

/// Errors raised by [`PageAccumulator`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PagingError {
    /// A fetch for this page is already in flight.
    #[error("page {0} is already being fetched")]
    AlreadyLoading(u32),

    /// The requested page precedes the first page.
    #[error("page {page} precedes the first page {first}")]
    BeforeFirstPage {
        /// Requested page.
        page: u32,
        /// First page number.
        first: u32,
    },

    /// The collection has no further pages.
    #[error("no more pages")]
    Exhausted,

    /// The ticket was issued for a context that has since been replaced.
    #[error("response for page {0} belongs to a superseded context")]
    Stale(u32),
}

/// Permission to fetch one page for one filter context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTicket<C> {
    page: u32,
    generation: u64,
    context: C,
}

impl<C> PageTicket<C> {
    /// Page number to request.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Filter context to request the page with.
    pub fn context(&self) -> &C {
        &self.context
    }
}

/// Result of merging one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Items added to the list.
    pub appended: usize,

    /// Items dropped because their key was already present.
    pub duplicates: usize,
}

/// Client-side list built by concatenating successive page responses.
#[derive(Debug)]
pub struct PageAccumulator<T: Keyed, C> {
    context: C,
    first_page: u32,
    mode: MergeMode,
    items: Vec<T>,
    keys: FxHashSet<T::Key>,
    current_page: Option<u32>,
    has_more: bool,
    total_pages: u32,
    total_elements: u64,
    generation: u64,
    in_flight: Option<u32>,
    error: Option<String>,
}

impl<T: Keyed, C: Clone + PartialEq + Debug> PageAccumulator<T, C> {
    /// Create an empty accumulator for `context` whose pages start at `first_page`.
    pub fn new(context: C, first_page: u32) -> Self {
        Self {
            context,
            first_page,
            mode: MergeMode::Append,
            items: Vec::new(),
            keys: FxHashSet::default(),
            current_page: None,
            has_more: true,
            total_pages: 0,
            total_elements: 0,
            generation: 0,
            in_flight: None,
            error: None,
        }
    }

    /// Use the given merge mode.
    #[must_use]
    pub fn with_mode(mut self, mode: MergeMode) -> Self {
        self.mode = mode;
        self
    }

    /// Current filter context.
    pub fn context(&self) -> &C {
        &self.context
    }

    /// Current merge mode.
    pub fn mode(&self) -> MergeMode {
        self.mode
    }

    /// Accumulated items, in merge order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Find an accumulated item by key.
    pub fn find(&self, key: &T::Key) -> Option<&T> {
        self.items.iter().find(|item| item.key() == *key)
    }

    /// Find an accumulated item by key, mutably.
    ///
    /// Callers must not change the item's key.
    pub fn find_mut(&mut self, key: &T::Key) -> Option<&mut T> {
        self.items.iter_mut().find(|item| item.key() == *key)
    }

    /// Remove an accumulated item, e.g. after it was deleted remotely.
    pub fn remove(&mut self, key: &T::Key) -> Option<T> {
        let index = self.items.iter().position(|item| item.key() == *key)?;

        self.keys.remove(key);

        Some(self.items.remove(index))
    }

    /// Number of accumulated items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing has been accumulated.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// First page number of this collection.
    pub fn first_page(&self) -> u32 {
        self.first_page
    }

    /// Last merged page, if any.
    pub fn current_page(&self) -> Option<u32> {
        self.current_page
    }

    /// Whether further pages can be requested.
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Total pages reported by the last merged page.
    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Total items reported by the last merged page.
    pub fn total_elements(&self) -> u64 {
        self.total_elements
    }

    /// Whether a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Error left by the last failed fetch.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Switch to `context`, resetting to the first page if it differs.
    ///
    /// Returns `true` when the context changed.
    pub fn set_context(&mut self, context: C) -> bool {
        if context == self.context {
            return false;
        }

        debug!(from = ?self.context, to = ?context, "paging context changed");

        self.context = context;
        self.reset();

        true
    }

    /// Switch merge mode, resetting to the first page if it differs.
    pub fn set_mode(&mut self, mode: MergeMode) -> bool {
        if mode == self.mode {
            return false;
        }

        self.mode = mode;
        self.reset();

        true
    }

    /// Drop every accumulated item and invalidate outstanding tickets.
    pub fn reset(&mut self) {
        self.items.clear();
        self.keys.clear();
        self.current_page = None;
        self.has_more = true;
        self.total_pages = 0;
        self.total_elements = 0;
        self.in_flight = None;
        self.error = None;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Request page `page` in the current context.
    ///
    /// A request for a different page than the one in flight supersedes it.
    ///
    /// # Errors
    ///
    /// - [`PagingError::AlreadyLoading`]: the same page is already in flight.
    /// - [`PagingError::BeforeFirstPage`]: `page` precedes the first page.
    pub fn begin_fetch(&mut self, page: u32) -> Result<PageTicket<C>, PagingError> {
        if page < self.first_page {
            return Err(PagingError::BeforeFirstPage {
                page,
                first: self.first_page,
            });
        }

        match self.in_flight {
            Some(loading) if loading == page => return Err(PagingError::AlreadyLoading(page)),
            Some(loading) => {
                debug!(superseded = loading, page, "superseding in-flight page fetch");
                self.generation = self.generation.wrapping_add(1);
            }
            None => {}
        }

        self.in_flight = Some(page);

        Ok(PageTicket {
            page,
            generation: self.generation,
            context: self.context.clone(),
        })
    }

    /// Request the first page.
    ///
    /// # Errors
    ///
    /// Returns [`PagingError::AlreadyLoading`] if the first page is in flight.
    pub fn first_request(&mut self) -> Result<PageTicket<C>, PagingError> {
        self.begin_fetch(self.first_page)
    }

    /// Request the page after the last merged one ("load more").
    ///
    /// # Errors
    ///
    /// - [`PagingError::Exhausted`]: the last merged page was the final one.
    /// - [`PagingError::AlreadyLoading`]: that page is already in flight.
    pub fn next_request(&mut self) -> Result<PageTicket<C>, PagingError> {
        if !self.has_more {
            return Err(PagingError::Exhausted);
        }

        let page = self
            .current_page
            .map_or(self.first_page, |page| page.saturating_add(1));

        self.begin_fetch(page)
    }

    /// Merge a fetched page.
    ///
    /// The first page, or any page in [`MergeMode::Replace`], replaces the
    /// list; later pages append, skipping keys already present.
    ///
    /// # Errors
    ///
    /// Returns [`PagingError::Stale`] if the ticket predates the current context.
    pub fn complete(
        &mut self,
        ticket: &PageTicket<C>,
        page: Page<T>,
    ) -> Result<MergeOutcome, PagingError> {
        self.check_current(ticket)?;

        self.in_flight = None;
        self.error = None;

        if ticket.page == self.first_page || self.mode == MergeMode::Replace {
            self.items.clear();
            self.keys.clear();
        }

        self.has_more = page.has_more(ticket.page, self.first_page);
        self.total_pages = page.total_pages;
        self.total_elements = page.total_elements;
        self.current_page = Some(ticket.page);

        let mut outcome = MergeOutcome {
            appended: 0,
            duplicates: 0,
        };

        for item in page.content {
            if self.keys.insert(item.key()) {
                self.items.push(item);
                outcome.appended += 1;
            } else {
                outcome.duplicates += 1;
            }
        }

        if outcome.duplicates > 0 {
            debug!(
                page = ticket.page,
                duplicates = outcome.duplicates,
                "dropped items already present"
            );
        }

        Ok(outcome)
    }

    /// Record a failed fetch. The accumulated list is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`PagingError::Stale`] if the ticket predates the current context.
    pub fn fail(
        &mut self,
        ticket: &PageTicket<C>,
        message: impl Into<String>,
    ) -> Result<(), PagingError> {
        self.check_current(ticket)?;

        self.in_flight = None;
        self.error = Some(message.into());

        Ok(())
    }

    fn check_current(&self, ticket: &PageTicket<C>) -> Result<(), PagingError> {
        if ticket.generation == self.generation && ticket.context == self.context {
            Ok(())
        } else {
            debug!(page = ticket.page, "discarding stale page response");

            Err(PagingError::Stale(ticket.page))
        }
    }
}
