//! Result-page sources: the paginated external API boundary.
//!
//! The collector core consumes plain sequences of result objects; these
//! types describe where those sequences come from. An implementation
//! typically wraps an HTTP client; [`StaticSource`] serves canned pages
//! for tests and offline replay.

pub mod pager;

use std::cell::Cell;
use std::collections::HashMap;
use std::convert::Infallible;
use std::future::{ready, Future};

use crate::model::{Award, Event, ResultPage, TeamNumber};

/// Errors from a page source or the pager.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Request(String),
    #[error("malformed page body: {0}")]
    MalformedPage(#[from] serde_json::Error),
    #[error("no page {page} of {endpoint} for {team}")]
    MissingPage {
        endpoint: &'static str,
        team: TeamNumber,
        page: u32,
    },
}

impl From<Infallible> for SourceError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

/// A paginated source of result pages, one endpoint per result-object kind.
///
/// Futures are awaited serially by the pager and the collector; they need
/// not be `Send`.
pub trait PageSource {
    fn events_page(
        &self,
        team: &TeamNumber,
        page: u32,
    ) -> impl Future<Output = Result<ResultPage<Event>, SourceError>>;

    fn awards_page(
        &self,
        team: &TeamNumber,
        page: u32,
    ) -> impl Future<Output = Result<ResultPage<Award>, SourceError>>;

    /// Single-event lookup by SKU, used by cross-collector classification
    /// when the sibling collector has not seen the event yet.
    fn event_by_sku(
        &self,
        sku: &str,
    ) -> impl Future<Output = Result<Option<Event>, SourceError>>;
}

// ---------------------------------------------------------------------------
// StaticSource — canned pages
// ---------------------------------------------------------------------------

/// In-memory source serving pre-loaded pages, for tests and offline replay.
///
/// Pages must be pushed in page order; requests for pages that were never
/// pushed return [`SourceError::MissingPage`]. A fetch counter records how
/// often the source was actually consulted, so cache behavior is testable.
#[derive(Debug, Default)]
pub struct StaticSource {
    events: HashMap<TeamNumber, Vec<ResultPage<Event>>>,
    awards: HashMap<TeamNumber, Vec<ResultPage<Award>>>,
    by_sku: HashMap<String, Event>,
    fetches: Cell<usize>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_events_page(&mut self, team: &TeamNumber, page: ResultPage<Event>) {
        self.events.entry(team.clone()).or_default().push(page);
    }

    pub fn push_awards_page(&mut self, team: &TeamNumber, page: ResultPage<Award>) {
        self.awards.entry(team.clone()).or_default().push(page);
    }

    /// Register an event for [`PageSource::event_by_sku`] lookups.
    pub fn add_event(&mut self, event: Event) {
        self.by_sku.insert(event.sku.clone(), event);
    }

    /// How many page or lookup requests reached this source.
    pub fn fetches(&self) -> usize {
        self.fetches.get()
    }

    fn page_of<T: Clone>(
        pages: &HashMap<TeamNumber, Vec<ResultPage<T>>>,
        endpoint: &'static str,
        team: &TeamNumber,
        page: u32,
    ) -> Result<ResultPage<T>, SourceError> {
        (page as usize)
            .checked_sub(1)
            .and_then(|index| pages.get(team)?.get(index))
            .cloned()
            .ok_or_else(|| SourceError::MissingPage {
                endpoint,
                team: team.clone(),
                page,
            })
    }
}

impl PageSource for StaticSource {
    fn events_page(
        &self,
        team: &TeamNumber,
        page: u32,
    ) -> impl Future<Output = Result<ResultPage<Event>, SourceError>> {
        self.fetches.set(self.fetches.get() + 1);
        ready(Self::page_of(&self.events, "events", team, page))
    }

    fn awards_page(
        &self,
        team: &TeamNumber,
        page: u32,
    ) -> impl Future<Output = Result<ResultPage<Award>, SourceError>> {
        self.fetches.set(self.fetches.get() + 1);
        ready(Self::page_of(&self.awards, "awards", team, page))
    }

    fn event_by_sku(
        &self,
        sku: &str,
    ) -> impl Future<Output = Result<Option<Event>, SourceError>> {
        self.fetches.set(self.fetches.get() + 1);
        ready(Ok(self.by_sku.get(sku).cloned()))
    }
}
