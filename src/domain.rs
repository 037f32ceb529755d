//! Copy enums and naming policies shared across the crate.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Tournament tier of an event, guessed from its name.
///
/// The results API exposes no scope field; the tier can usually be
/// recovered from the event name. Declaration order is display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum EventScope {
    WorldChampionship,
    StateChampionship,
    Qualifier,
    Other,
}

/// Name fragments probed by [`EventScope::of`], in match-priority order.
const SCOPE_FRAGMENTS: &[(EventScope, &str)] = &[
    (EventScope::WorldChampionship, "WORLD CHAMPIONSHIP"),
    (EventScope::StateChampionship, "STATE CHAMPIONSHIP"),
    (EventScope::Qualifier, "QUALIFIER"),
];

impl EventScope {
    /// Guess the scope of an event from its name.
    ///
    /// Case-insensitive substring match against the known fragments; the
    /// first hit wins, anything unrecognized is [`EventScope::Other`].
    pub fn of(event_name: &str) -> EventScope {
        let upper = event_name.to_uppercase();
        for (scope, fragment) in SCOPE_FRAGMENTS {
            if upper.contains(fragment) {
                return *scope;
            }
        }
        EventScope::Other
    }

    /// Human-readable label for count blocks.
    pub fn label(&self) -> &'static str {
        match self {
            EventScope::WorldChampionship => "World Championship",
            EventScope::StateChampionship => "State Championship",
            EventScope::Qualifier => "Qualifier",
            EventScope::Other => "Qualifier/other",
        }
    }
}

impl fmt::Display for EventScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How award result objects collapse into records.
///
/// Site revisions disagreed on whether same-titled awards from different
/// events share a record; here the choice is an explicit policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum AwardGrouping {
    /// Same-titled awards share one record regardless of event.
    ByTitle,
    /// Awards are distinct per (title, event) pair.
    ByTitleAndEvent,
}

impl Default for AwardGrouping {
    fn default() -> Self {
        Self::ByTitle
    }
}

static TRAILING_QUALIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\([^)]*\)\s*$").expect("literal pattern"));

/// Groom an award title for grouping and display.
///
/// Trims surrounding whitespace and a trailing parenthetical program
/// qualifier, e.g. `"Design Award (VRC/VEXU)"` becomes `"Design Award"`.
pub fn normalize_award_title(title: &str) -> String {
    TRAILING_QUALIFIER.replace(title.trim(), "").into_owned()
}
