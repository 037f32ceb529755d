//! Page-walking orchestration over a [`PageSource`] with an injected cache.
//!
//! Fetches page 1, reads `meta.last_page`, then walks the remaining pages
//! in order, concatenating each page's result array. Raw page bodies are
//! cached as serialized JSON under `"{endpoint}/{team}/{page}"` keys so a
//! later run (or a sibling page of the site) can skip the fetch entirely.

use std::future::Future;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::cache::PageCache;
use crate::model::{Award, Event, ResultPage, TeamNumber};

use super::{PageSource, SourceError};

fn cache_key(endpoint: &str, team: &TeamNumber, page: u32) -> String {
    format!("{endpoint}/{}/{page}", team.0)
}

async fn load_page<T, C, F, Fut>(
    endpoint: &str,
    team: &TeamNumber,
    page: u32,
    cache: &mut C,
    fetch: &F,
) -> Result<ResultPage<T>, SourceError>
where
    T: Serialize + DeserializeOwned,
    C: PageCache,
    F: Fn(u32) -> Fut,
    Fut: Future<Output = Result<ResultPage<T>, SourceError>>,
{
    let key = cache_key(endpoint, team, page);
    if let Some(body) = cache.get(&key) {
        return Ok(serde_json::from_str(&body)?);
    }

    let fetched = fetch(page).await?;
    cache.put(&key, serde_json::to_string(&fetched)?);
    Ok(fetched)
}

/// Walk every page of one endpoint for one team, tagging each result
/// object before it is shared.
async fn fetch_all<T, C, F, Fut>(
    endpoint: &str,
    team: &TeamNumber,
    cache: &mut C,
    fetch: F,
    tag: impl Fn(&mut T),
) -> Result<Vec<Arc<T>>, SourceError>
where
    T: Serialize + DeserializeOwned,
    C: PageCache,
    F: Fn(u32) -> Fut,
    Fut: Future<Output = Result<ResultPage<T>, SourceError>>,
{
    let first = load_page(endpoint, team, 1, cache, &fetch).await?;
    let last_page = first.meta.last_page.max(1);

    let mut collected = Vec::with_capacity(first.data.len());
    let mut fold = |page: ResultPage<T>| {
        for mut object in page.data {
            tag(&mut object);
            collected.push(Arc::new(object));
        }
    };

    fold(first);
    for page in 2..=last_page {
        fold(load_page(endpoint, team, page, cache, &fetch).await?);
    }

    Ok(collected)
}

/// Fetch every event page for `team`, attaching the team number to each
/// result object so batched pages stay attributable.
pub async fn fetch_all_events<S, C>(
    source: &S,
    cache: &mut C,
    team: &TeamNumber,
) -> Result<Vec<Arc<Event>>, SourceError>
where
    S: PageSource,
    C: PageCache,
{
    fetch_all(
        "events",
        team,
        cache,
        |page| source.events_page(team, page),
        |event: &mut Event| {
            event.team.get_or_insert_with(|| team.clone());
        },
    )
    .await
}

/// Fetch every award page for `team`.
pub async fn fetch_all_awards<S, C>(
    source: &S,
    cache: &mut C,
    team: &TeamNumber,
) -> Result<Vec<Arc<Award>>, SourceError>
where
    S: PageSource,
    C: PageCache,
{
    fetch_all(
        "awards",
        team,
        cache,
        |page| source.awards_page(team, page),
        |award: &mut Award| {
            award.team.get_or_insert_with(|| team.clone());
        },
    )
    .await
}
