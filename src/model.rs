use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// Identifies a team program number (e.g., "6121A").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TeamNumber(pub String);

impl TeamNumber {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TeamNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Result objects
// ---------------------------------------------------------------------------

/// An event result object as returned by the results API.
///
/// Only the fields the site's classifiers touch are modeled; anything else
/// in the wire object is ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub id: Option<u64>,
    /// Stable event code, shared between both API generations.
    pub sku: String,
    pub name: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Attached by per-team fetches so batched pages stay attributable.
    #[serde(default)]
    pub team: Option<TeamNumber>,
}

/// An award result object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Award {
    #[serde(default)]
    pub id: Option<u64>,
    pub title: String,
    /// Display-ordering hint supplied by the API.
    #[serde(default)]
    pub order: u32,
    /// SKU of the event the award was won at.
    pub sku: String,
    #[serde(default)]
    pub team: Option<TeamNumber>,
}

// ---------------------------------------------------------------------------
// Page envelopes
// ---------------------------------------------------------------------------

/// Pagination metadata (second-generation API).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub current_page: u32,
    pub last_page: u32,
    #[serde(default)]
    pub total: Option<u64>,
}

/// One page of results (second-generation API): a result array plus the
/// page-count metadata the pager walks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultPage<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

impl<T> ResultPage<T> {
    /// Single unpaginated page wrapping `data`.
    pub fn single(data: Vec<T>) -> Self {
        Self {
            data,
            meta: PageMeta {
                current_page: 1,
                last_page: 1,
                total: None,
            },
        }
    }
}

/// Unpaginated list envelope (first-generation API).
///
/// A source wrapping a v1 endpoint converts each body into a single
/// [`ResultPage`] so the pager sees one uniform envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyResults<T> {
    pub result: Vec<T>,
}

impl<T> From<LegacyResults<T>> for ResultPage<T> {
    fn from(legacy: LegacyResults<T>) -> Self {
        ResultPage::single(legacy.result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // Wire-format deserialization
    // -----------------------------------------------------------------------

    #[test]
    fn event_page_parses_wire_json() {
        let body = r#"{
            "data": [
                {
                    "id": 31337,
                    "sku": "RE-VRC-19-1234",
                    "name": "Kansas State Championship",
                    "start": "2020-02-01T08:00:00Z",
                    "end": "2020-02-01T18:00:00Z"
                }
            ],
            "meta": { "current_page": 1, "last_page": 3, "total": 55 }
        }"#;

        let page: ResultPage<Event> = serde_json::from_str(body).unwrap();
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.meta.last_page, 3);
        assert_eq!(page.meta.total, Some(55));

        let event = &page.data[0];
        assert_eq!(event.sku, "RE-VRC-19-1234");
        assert_eq!(event.name, "Kansas State Championship");
        assert!(event.team.is_none());
    }

    #[test]
    fn event_ignores_extra_wire_fields() {
        let body = r#"{
            "sku": "RE-VRC-19-0001",
            "name": "Spring Qualifier",
            "start": "2019-03-01T08:00:00Z",
            "end": "2019-03-01T18:00:00Z",
            "season": { "id": 125, "name": "Tower Takeover" },
            "divisions": []
        }"#;

        let event: Event = serde_json::from_str(body).unwrap();
        assert_eq!(event.id, None);
        assert_eq!(event.name, "Spring Qualifier");
    }

    #[test]
    fn award_defaults_optional_fields() {
        let body = r#"{ "title": "Excellence Award", "sku": "RE-VRC-19-1234" }"#;
        let award: Award = serde_json::from_str(body).unwrap();
        assert_eq!(award.order, 0);
        assert!(award.id.is_none());
        assert!(award.team.is_none());
    }

    #[test]
    fn legacy_envelope_parses() {
        let body = r#"{ "result": [ { "title": "Design Award", "order": 3, "sku": "RE-VRC-18-7777" } ] }"#;
        let legacy: LegacyResults<Award> = serde_json::from_str(body).unwrap();
        assert_eq!(legacy.result.len(), 1);
        assert_eq!(legacy.result[0].order, 3);
    }

    #[test]
    fn legacy_envelope_converts_to_a_single_page() {
        let body = r#"{ "result": [ { "title": "Design Award", "order": 3, "sku": "RE-VRC-18-7777" } ] }"#;
        let legacy: LegacyResults<Award> = serde_json::from_str(body).unwrap();

        let page = ResultPage::from(legacy);
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.meta.current_page, 1);
        // One page total, so the pager never walks further.
        assert_eq!(page.meta.last_page, 1);
    }

    #[test]
    fn page_round_trips_through_cache_body() {
        let page = ResultPage::single(vec![Award {
            id: Some(9),
            title: "Judges Award".into(),
            order: 7,
            sku: "RE-VRC-20-0042".into(),
            team: Some(TeamNumber("6121A".into())),
        }]);

        let body = serde_json::to_string(&page).unwrap();
        let back: ResultPage<Award> = serde_json::from_str(&body).unwrap();
        assert_eq!(back, page);
    }

    // -----------------------------------------------------------------------
    // Identifiers
    // -----------------------------------------------------------------------

    #[test]
    fn team_number_equality_and_hashing() {
        use std::collections::HashMap;

        let a = TeamNumber("6121A".into());
        let b = TeamNumber("6121A".into());
        let c = TeamNumber("6121B".into());

        assert_eq!(a, b);
        assert_ne!(a, c);

        let mut map = HashMap::new();
        map.insert(a.clone(), 1);
        assert_eq!(map.get(&b), Some(&1));
        assert_eq!(map.get(&c), None);
    }

    #[test]
    fn single_page_meta() {
        let page = ResultPage::<Event>::single(vec![]);
        assert_eq!(page.meta.current_page, 1);
        assert_eq!(page.meta.last_page, 1);
    }
}
