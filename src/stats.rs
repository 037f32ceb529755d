//! Team statistics assembly: pagers feeding a pair of collectors, plus the
//! headline numbers shown at the top of the site.
//!
//! The award collector classifies against the event collector's contents:
//! an award counts only once its owning event has finished. The owning
//! event is looked up among the events already collected first, falling
//! back to a single-event fetch for events the event pages never listed.

use chrono::{DateTime, Utc};

use crate::cache::PageCache;
use crate::classify::common::{AwardData, AwardsByTitle, EventsByScope};
use crate::classify::ClassifyAsync;
use crate::collector::core::RecordCollector;
use crate::collector::record::Record;
use crate::domain::EventScope;
use crate::model::{Award, Event, TeamNumber};
use crate::source::pager::{fetch_all_awards, fetch_all_events};
use crate::source::{PageSource, SourceError};

// ---------------------------------------------------------------------------
// FinishedEventAwards
// ---------------------------------------------------------------------------

/// Award classifier that admits an award only when its owning event has
/// finished, resolving the event through the sibling event collector
/// before falling back to `source`.
///
/// Events the source cannot resolve are treated as finished: an award was
/// handed out, so the ceremony evidently happened.
pub struct FinishedEventAwards<'a, S> {
    events: &'a RecordCollector<Event, EventScope, EventsByScope>,
    source: &'a S,
    grouping: AwardsByTitle,
    now: DateTime<Utc>,
}

impl<'a, S: PageSource> FinishedEventAwards<'a, S> {
    pub fn new(
        events: &'a RecordCollector<Event, EventScope, EventsByScope>,
        source: &'a S,
        grouping: AwardsByTitle,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            events,
            source,
            grouping,
            now,
        }
    }

    /// Resolve an event by SKU, cheapest path first.
    async fn find_event(&self, sku: &str) -> Result<Option<Event>, SourceError> {
        for event in self.events.all_instances() {
            if event.sku == sku {
                return Ok(Some(Event::clone(event)));
            }
        }
        self.source.event_by_sku(sku).await
    }
}

impl<S: PageSource> ClassifyAsync<Award> for FinishedEventAwards<'_, S> {
    type Data = AwardData;
    type Error = SourceError;

    async fn will_accept(&self, award: &Award) -> Result<bool, SourceError> {
        Ok(match self.find_event(&award.sku).await? {
            Some(event) => event.end < self.now,
            None => true,
        })
    }

    async fn encompasses(
        &self,
        record: &Record<Award, AwardData>,
        award: &Award,
    ) -> Result<bool, SourceError> {
        Ok(self.grouping.matches(record.data(), award))
    }

    async fn to_data(&self, award: &Award) -> Result<AwardData, SourceError> {
        Ok(self.grouping.data_of(award))
    }
}

// ---------------------------------------------------------------------------
// Headline totals and report
// ---------------------------------------------------------------------------

/// The four counters shown on the About banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeadlineTotals {
    /// Finished events whose name marks a World Championship.
    pub worlds_appearances: usize,
    /// All finished event appearances across the roster.
    pub event_appearances: usize,
    /// Awards whose groomed title contains "Champion".
    pub tournament_championships: usize,
    /// All awards from finished events.
    pub total_awards: usize,
}

/// Everything a stats page needs, assembled by [`collect_team_stats`].
#[derive(Debug)]
pub struct TeamStatsReport {
    pub event_records: Vec<Record<Event, EventScope>>,
    pub award_records: Vec<Record<Award, AwardData>>,
    pub totals: HeadlineTotals,
}

fn headline_totals<S: PageSource>(
    events: &RecordCollector<Event, EventScope, EventsByScope>,
    awards: &RecordCollector<Award, AwardData, FinishedEventAwards<'_, S>>,
) -> HeadlineTotals {
    let worlds_appearances = events
        .records()
        .iter()
        .filter(|record| *record.data() == EventScope::WorldChampionship)
        .map(Record::count)
        .sum();
    let tournament_championships = awards
        .records()
        .iter()
        .filter(|record| record.data().title.contains("Champion"))
        .map(Record::count)
        .sum();

    HeadlineTotals {
        worlds_appearances,
        event_appearances: events.total_instance_count(),
        tournament_championships,
        total_awards: awards.total_instance_count(),
    }
}

/// Fetch every event and award page for `roster` and fold them into the
/// site's two collectors, computing the headline totals.
///
/// Pages are fetched through `cache`; a warm cache replays a previous run
/// without touching the source. Fails fast on the first source error,
/// matching ingestion semantics.
pub async fn collect_team_stats<S, C>(
    source: &S,
    cache: &mut C,
    roster: &[TeamNumber],
    now: DateTime<Utc>,
) -> Result<TeamStatsReport, SourceError>
where
    S: PageSource,
    C: PageCache,
{
    let mut events = Vec::new();
    let mut awards = Vec::new();
    for team in roster {
        events.extend(fetch_all_events(source, cache, team).await?);
        awards.extend(fetch_all_awards(source, cache, team).await?);
    }

    let mut event_collector = RecordCollector::new(EventsByScope::new(now));
    event_collector.ingest(events)?;

    let mut award_collector = RecordCollector::new(FinishedEventAwards::new(
        &event_collector,
        source,
        AwardsByTitle::default(),
        now,
    ));
    award_collector.ingest_async(awards).await?;

    let totals = headline_totals(&event_collector, &award_collector);
    let award_records = award_collector.into_records();
    let event_records = event_collector.into_records();

    Ok(TeamStatsReport {
        event_records,
        award_records,
        totals,
    })
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use crate::cache::MemoryCache;
    use crate::model::{PageMeta, ResultPage};
    use crate::source::StaticSource;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2020, 6, 1, 0, 0, 0).unwrap()
    }

    fn team() -> TeamNumber {
        TeamNumber("6121A".into())
    }

    fn event(sku: &str, name: &str, start: &str, end: &str) -> Event {
        Event {
            id: None,
            sku: sku.into(),
            name: name.into(),
            start: start.parse().unwrap(),
            end: end.parse().unwrap(),
            team: None,
        }
    }

    fn award(title: &str, order: u32, sku: &str) -> Award {
        Award {
            id: None,
            title: title.into(),
            order,
            sku: sku.into(),
            team: None,
        }
    }

    fn page<T>(data: Vec<T>, current: u32, last: u32) -> ResultPage<T> {
        ResultPage {
            data,
            meta: PageMeta {
                current_page: current,
                last_page: last,
                total: None,
            },
        }
    }

    fn seeded_source() -> StaticSource {
        let mut source = StaticSource::new();
        source.push_events_page(
            &team(),
            page(
                vec![
                    event("RE-1", "VEX Worlds Championship", "2020-04-22T00:00:00Z", "2020-04-25T00:00:00Z"),
                    event("RE-2", "State Championship", "2020-03-01T00:00:00Z", "2020-03-02T00:00:00Z"),
                    event("RE-3", "Fall Classic", "2020-10-01T00:00:00Z", "2020-10-02T00:00:00Z"),
                ],
                1,
                1,
            ),
        );
        source.push_awards_page(
            &team(),
            page(
                vec![
                    award("Tournament Champions (VRC/VEXU)", 1, "RE-2"),
                    award("Design Award", 4, "RE-2"),
                ],
                1,
                1,
            ),
        );
        source
    }

    #[tokio::test]
    async fn assembles_records_and_totals() {
        let source = seeded_source();
        let mut cache = MemoryCache::new();

        let report = collect_team_stats(&source, &mut cache, &[team()], now())
            .await
            .unwrap();

        // RE-3 has not started yet, so only two event appearances.
        assert_eq!(report.totals.event_appearances, 2);
        assert_eq!(report.totals.worlds_appearances, 1);
        assert_eq!(report.totals.total_awards, 2);
        assert_eq!(report.totals.tournament_championships, 1);

        assert_eq!(report.award_records.len(), 2);
        assert_eq!(report.award_records[0].data().title, "Tournament Champions");
    }

    #[tokio::test]
    async fn award_from_unfinished_event_is_dropped() {
        let mut source = StaticSource::new();
        source.push_events_page(&team(), page::<Event>(vec![], 1, 1));
        source.push_awards_page(
            &team(),
            page(vec![award("Excellence Award", 0, "RE-3")], 1, 1),
        );
        // The owning event resolves through the lookup endpoint and has
        // not finished yet.
        source.add_event(event(
            "RE-3",
            "Fall Classic",
            "2020-10-01T00:00:00Z",
            "2020-10-02T00:00:00Z",
        ));

        let mut cache = MemoryCache::new();
        let report = collect_team_stats(&source, &mut cache, &[team()], now())
            .await
            .unwrap();

        assert_eq!(report.totals.total_awards, 0);
        assert!(report.award_records.is_empty());
    }

    #[tokio::test]
    async fn award_for_unlisted_event_falls_back_to_lookup() {
        let mut source = StaticSource::new();
        source.push_events_page(&team(), page::<Event>(vec![], 1, 1));
        // The event pages never list RE-9; only the single-event endpoint
        // knows it, and it finished last season.
        source.push_awards_page(
            &team(),
            page(vec![award("Judges Award", 7, "RE-9")], 1, 1),
        );
        source.add_event(event(
            "RE-9",
            "Signature Event",
            "2019-11-01T00:00:00Z",
            "2019-11-02T00:00:00Z",
        ));

        let mut cache = MemoryCache::new();
        let report = collect_team_stats(&source, &mut cache, &[team()], now())
            .await
            .unwrap();

        assert_eq!(report.totals.total_awards, 1);
        // Two page fetches plus one SKU lookup.
        assert_eq!(source.fetches(), 3);
    }

    #[tokio::test]
    async fn unknown_owning_event_still_counts_the_award() {
        let mut source = StaticSource::new();
        source.push_events_page(&team(), page::<Event>(vec![], 1, 1));
        source.push_awards_page(
            &team(),
            page(vec![award("Sportsmanship Award", 12, "RE-404")], 1, 1),
        );

        let mut cache = MemoryCache::new();
        let report = collect_team_stats(&source, &mut cache, &[team()], now())
            .await
            .unwrap();

        assert_eq!(report.totals.total_awards, 1);
    }

    #[tokio::test]
    async fn sibling_collector_resolves_without_a_fetch() {
        let source = seeded_source();
        let mut cache = MemoryCache::new();

        collect_team_stats(&source, &mut cache, &[team()], now())
            .await
            .unwrap();

        // Two page fetches; every award SKU resolved against the sibling
        // collector, so no event_by_sku traffic.
        assert_eq!(source.fetches(), 2);
    }

    #[tokio::test]
    async fn warm_cache_replays_without_the_source() {
        let source = seeded_source();
        let mut cache = MemoryCache::new();

        let first = collect_team_stats(&source, &mut cache, &[team()], now())
            .await
            .unwrap();
        let fetches_after_first = source.fetches();

        let second = collect_team_stats(&source, &mut cache, &[team()], now())
            .await
            .unwrap();

        assert_eq!(source.fetches(), fetches_after_first);
        assert_eq!(second.totals, first.totals);
    }
}
