//! vexstats-cli — offline stats run over a directory of canned API pages.
//!
//! Loads result pages from fixture files, feeds them through the collectors
//! and prints the per-record breakdown and headline totals a team page
//! would show.
//!
//! Fixture files are named `<endpoint>_<team>_<page>.json` (for example
//! `events_6121A_1.json`) and contain one serialized result page each.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process;

use chrono::{DateTime, Utc};
use clap::Parser;

use vexstats::cache::MemoryCache;
use vexstats::model::{Award, Event, ResultPage, TeamNumber};
use vexstats::source::StaticSource;
use vexstats::stats::collect_team_stats;

// ---------------------------------------------------------------------------
// CLI argument definitions
// ---------------------------------------------------------------------------

#[derive(Parser)]
#[command(name = "vexstats-cli", about = "Team stats aggregator over canned result pages")]
struct Cli {
    /// Directory of fixture page files.
    pages_dir: PathBuf,

    /// Team number to report on; repeatable. Defaults to every team found
    /// in the fixture directory.
    #[arg(short, long)]
    team: Vec<String>,

    /// Reference instant for past/upcoming decisions (RFC 3339).
    /// Defaults to the current time.
    #[arg(long)]
    now: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// Fixture loading
// ---------------------------------------------------------------------------

struct PageFile {
    endpoint: String,
    team: TeamNumber,
    page: u32,
    path: PathBuf,
}

/// Parse `<endpoint>_<team>_<page>.json` into its parts.
fn parse_page_filename(path: &Path) -> Option<PageFile> {
    let stem = path.file_stem()?.to_str()?;
    if path.extension()?.to_str()? != "json" {
        return None;
    }

    let mut parts = stem.splitn(3, '_');
    let endpoint = parts.next()?;
    let team = parts.next()?;
    let page: u32 = parts.next()?.parse().ok()?;

    match endpoint {
        "events" | "awards" => Some(PageFile {
            endpoint: endpoint.to_owned(),
            team: TeamNumber(team.to_owned()),
            page,
            path: path.to_owned(),
        }),
        _ => None,
    }
}

fn read_page<T: serde::de::DeserializeOwned>(path: &Path) -> ResultPage<T> {
    let body = match std::fs::read_to_string(path) {
        Ok(body) => body,
        Err(e) => {
            eprintln!("error: cannot read {}: {e}", path.display());
            process::exit(1);
        }
    };
    match serde_json::from_str(&body) {
        Ok(page) => page,
        Err(e) => {
            eprintln!("error: invalid page JSON in {}: {e}", path.display());
            process::exit(1);
        }
    }
}

/// Load every fixture page into a [`StaticSource`], registering each event
/// for SKU lookups, and report the teams seen.
fn load_source(dir: &Path) -> (StaticSource, Vec<TeamNumber>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("error: cannot read directory {}: {e}", dir.display());
            process::exit(1);
        }
    };

    // Pages must be pushed in page order per team.
    let mut files: BTreeMap<(String, TeamNumber, u32), PathBuf> = BTreeMap::new();
    for entry in entries.flatten() {
        if let Some(file) = parse_page_filename(&entry.path()) {
            files.insert((file.endpoint, file.team, file.page), file.path);
        }
    }

    if files.is_empty() {
        eprintln!("error: no fixture pages found in {}", dir.display());
        eprintln!("       expected files named <endpoint>_<team>_<page>.json");
        process::exit(1);
    }

    let mut source = StaticSource::new();
    let mut teams = Vec::new();
    for ((endpoint, team, _page), path) in &files {
        if !teams.contains(team) {
            teams.push(team.clone());
        }
        match endpoint.as_str() {
            "events" => {
                let page: ResultPage<Event> = read_page(path);
                for event in &page.data {
                    source.add_event(event.clone());
                }
                source.push_events_page(team, page);
            }
            "awards" => {
                let page: ResultPage<Award> = read_page(path);
                source.push_awards_page(team, page);
            }
            _ => unreachable!("filtered by parse_page_filename"),
        }
    }

    (source, teams)
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    let (source, discovered) = load_source(&cli.pages_dir);
    let roster: Vec<TeamNumber> = if cli.team.is_empty() {
        discovered
    } else {
        cli.team.iter().cloned().map(TeamNumber).collect()
    };
    let now = cli.now.unwrap_or_else(Utc::now);

    let mut cache = MemoryCache::new();
    let report = match collect_team_stats(&source, &mut cache, &roster, now).await {
        Ok(report) => report,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    let roster_line: Vec<&str> = roster.iter().map(TeamNumber::as_str).collect();
    println!("teams: {}", roster_line.join(", "));
    println!();

    println!("events:");
    for record in &report.event_records {
        println!("  {:<24} {:>4}", record.data().label(), record.count());
    }

    println!();
    println!("awards:");
    for record in &report.award_records {
        println!("  {:<32} {:>4}", record.data().title, record.count());
    }

    println!();
    let totals = &report.totals;
    println!("worlds appearances:       {}", totals.worlds_appearances);
    println!("event appearances:        {}", totals.event_appearances);
    println!("tournament championships: {}", totals.tournament_championships);
    println!("total awards:             {}", totals.total_awards);
}
