//! Stock classifiers for the result-object shapes the site pages use.

use std::convert::Infallible;

use chrono::{DateTime, Utc};

use crate::collector::record::Record;
use crate::domain::{normalize_award_title, AwardGrouping, EventScope};
use crate::model::{Award, Event};

use super::Classify;

// ---------------------------------------------------------------------------
// Unclassified — the all-defaults configuration
// ---------------------------------------------------------------------------

/// Accepts every object into a single catch-all record with empty summary.
#[derive(Debug, Default, Clone, Copy)]
pub struct Unclassified;

impl<T> Classify<T> for Unclassified {
    type Data = ();
    type Error = Infallible;

    fn to_data(&self, _object: &T) -> Result<(), Infallible> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// EventsByScope
// ---------------------------------------------------------------------------

/// Groups events by tournament tier guessed from the event name.
///
/// Future events are rejected: appearance counts only make sense for
/// events that have already started.
#[derive(Debug, Clone)]
pub struct EventsByScope {
    /// Admission cutoff; events starting at or after this instant are
    /// rejected.
    pub since: DateTime<Utc>,
}

impl EventsByScope {
    pub fn new(since: DateTime<Utc>) -> Self {
        Self { since }
    }
}

impl Classify<Event> for EventsByScope {
    type Data = EventScope;
    type Error = Infallible;

    fn will_accept(&self, event: &Event) -> Result<bool, Infallible> {
        Ok(event.start < self.since)
    }

    fn encompasses(
        &self,
        record: &Record<Event, EventScope>,
        event: &Event,
    ) -> Result<bool, Infallible> {
        Ok(*record.data() == EventScope::of(&event.name))
    }

    fn to_data(&self, event: &Event) -> Result<EventScope, Infallible> {
        Ok(EventScope::of(&event.name))
    }
}

// ---------------------------------------------------------------------------
// AwardsByTitle
// ---------------------------------------------------------------------------

/// Summary data for an award record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwardData {
    /// Groomed title shared by every instance in the record.
    pub title: String,
    /// Display-ordering hint taken from the first instance.
    pub order: u32,
    /// Owning event SKU; set only under per-event grouping.
    pub sku: Option<String>,
}

/// Groups awards by groomed title, optionally split per event.
#[derive(Debug, Clone, Copy, Default)]
pub struct AwardsByTitle {
    pub grouping: AwardGrouping,
}

impl AwardsByTitle {
    pub fn new(grouping: AwardGrouping) -> Self {
        Self { grouping }
    }

    /// Equivalence test shared with async wrappers.
    pub fn matches(&self, data: &AwardData, award: &Award) -> bool {
        if data.title != normalize_award_title(&award.title) {
            return false;
        }
        match self.grouping {
            AwardGrouping::ByTitle => true,
            AwardGrouping::ByTitleAndEvent => data.sku.as_deref() == Some(award.sku.as_str()),
        }
    }

    /// Summary derivation shared with async wrappers.
    pub fn data_of(&self, award: &Award) -> AwardData {
        AwardData {
            title: normalize_award_title(&award.title),
            order: award.order,
            sku: match self.grouping {
                AwardGrouping::ByTitle => None,
                AwardGrouping::ByTitleAndEvent => Some(award.sku.clone()),
            },
        }
    }
}

impl Classify<Award> for AwardsByTitle {
    type Data = AwardData;
    type Error = Infallible;

    fn encompasses(
        &self,
        record: &Record<Award, AwardData>,
        award: &Award,
    ) -> Result<bool, Infallible> {
        Ok(self.matches(record.data(), award))
    }

    fn to_data(&self, award: &Award) -> Result<AwardData, Infallible> {
        Ok(self.data_of(award))
    }
}

// ---------------------------------------------------------------------------
// UpcomingEvents
// ---------------------------------------------------------------------------

/// Admission-only classifier for a team page's upcoming-event list: keeps
/// events that have not yet ended, all in one record.
#[derive(Debug, Clone)]
pub struct UpcomingEvents {
    pub now: DateTime<Utc>,
}

impl UpcomingEvents {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }
}

impl Classify<Event> for UpcomingEvents {
    type Data = ();
    type Error = Infallible;

    fn will_accept(&self, event: &Event) -> Result<bool, Infallible> {
        Ok(self.now < event.end)
    }

    fn to_data(&self, _event: &Event) -> Result<(), Infallible> {
        Ok(())
    }
}
