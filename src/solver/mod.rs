mod expander;
mod feasibility;
mod grid;
mod ilp;
mod lab_rooms;
mod materializer;

pub use expander::*;
pub use feasibility::*;
pub use grid::*;
pub use ilp::*;
pub use lab_rooms::*;
pub use materializer::*;

use crate::catalog::CatalogStore;
use crate::config::SolverConfig;
use crate::error::Result;
use crate::types::{SolveMetadata, SolveOutcome};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use std::time::Instant;

/// Main entry point: create a version, run a solve and commit its events.
///
/// The whole solve runs against one snapshot of the catalog; the only write
/// preceding variable creation is virtual lab room synthesis. On failure no
/// partial events are committed.
pub fn generate(
    store: &mut dyn CatalogStore,
    version_name: &str,
    config: &SolverConfig,
    quiet: bool,
) -> Result<SolveOutcome> {
    let start_time = Instant::now();

    let progress = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(100);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}% {msg}")
                .unwrap()
                .progress_chars("#>-"),
        );
        pb
    };

    let version = store.create_version(version_name)?;
    let mut catalog = store.snapshot()?;

    // Phase 1: expand curriculum into atomic sessions
    progress.set_message("Expanding sessions...");
    progress.set_position(10);
    let sessions = expand_sessions(&catalog.courses, &catalog.groups, config);

    // Phase 2: synthesize per-group lab venues, then re-read rooms so the
    // enumeration sees them
    progress.set_message("Preparing lab venues...");
    progress.set_position(20);
    let created = ensure_lab_rooms(store, &sessions, &catalog.groups)?;
    if created > 0 {
        catalog.rooms = store.snapshot()?.rooms;
    }

    // Phase 3: weekly grid
    progress.set_message("Building time grid...");
    progress.set_position(30);
    let grid = TimeGrid::build(config);
    info!(
        "Solving version '{}': {} sessions, {} rooms, {} slots",
        version_name,
        sessions.len(),
        catalog.rooms.len(),
        grid.len()
    );

    let (events, candidate_count) = if sessions.is_empty() {
        // Nothing schedulable (e.g. only project courses); commit an empty version
        (Vec::new(), 0)
    } else {
        // Phase 4: feasible placement candidates
        progress.set_message("Filtering placements...");
        progress.set_position(40);
        let candidates = enumerate_candidates(
            &sessions,
            &catalog.rooms,
            &catalog.groups,
            &catalog.lecturers,
            &grid,
            config,
        );

        // Phase 5: discharge the constraint model
        progress.set_message("Solving placement model...");
        progress.set_position(60);
        let solution = solve_placements(&sessions, &candidates, config.time_limit_secs)?;

        // Phase 6: materialize chosen placements
        progress.set_message("Materializing events...");
        progress.set_position(90);
        let events = materialize_events(
            &sessions,
            &candidates,
            &solution,
            &catalog.rooms,
            &grid,
            version.id,
        );
        (events, candidates.len())
    };

    store.commit_events(events.clone())?;

    progress.set_position(100);
    progress.finish_with_message("Timetable generated");

    let elapsed = start_time.elapsed();
    let same_day_penalty = same_day_pairs(&events);
    Ok(SolveOutcome {
        version,
        events,
        metadata: SolveMetadata {
            generated_at: chrono::Utc::now().to_rfc3339(),
            algorithm_version: env!("CARGO_PKG_VERSION").to_string(),
            same_day_penalty,
            solve_time_ms: elapsed.as_millis() as u64,
            session_count: sessions.len(),
            candidate_count,
        },
    })
}

/// Count of same-day pairs among events sharing a course and group;
/// matches the solver objective over the committed events
fn same_day_pairs(events: &[crate::types::TimetableEvent]) -> u32 {
    let mut pairs = 0;
    for (i, a) in events.iter().enumerate() {
        for b in &events[i + 1..] {
            if a.course_id == b.course_id && a.group_id == b.group_id && a.day == b.day {
                pairs += 1;
            }
        }
    }
    pairs
}
