use crate::error::{Result, TimetableError};
use crate::solver::feasibility::CandidateSet;
use crate::types::{CourseId, GroupId, Session};
use good_lp::{constraint, variable, variables, Expression, ResolutionError, Solution, SolverModel};
use itertools::Itertools;
use log::{debug, info};
use std::collections::HashMap;
use std::time::Instant;

/// Outcome of the placement model: one chosen candidate per session and the
/// number of same-day penalties incurred
#[derive(Debug)]
pub struct PlacementSolution {
    /// Candidate index per session, aligned with the sessions slice
    pub chosen: Vec<usize>,
    pub same_day_penalty: u32,
}

/// Build and discharge the placement model.
///
/// One binary variable per feasible candidate; exactly-one placement per
/// session (a session with no candidates contributes an empty sum and makes
/// the model infeasible, so impossibility is reported through the solver);
/// at-most-one occupancy per room, group and lecturer (lectures only) per
/// base slot; minimized count of same-day placements for sessions sharing a
/// course and group, under a wall-clock cap.
pub fn solve_placements(
    sessions: &[Session],
    candidates: &CandidateSet,
    time_limit_secs: f64,
) -> Result<PlacementSolution> {
    let started = Instant::now();
    let mut vars = variables!();
    let x = vars.add_vector(variable().binary(), candidates.len());

    // Same-day penalty pairs: sessions sharing (course, group), candidate
    // placements on the same day. Indicator p <=> (x_i AND x_j).
    let session_buckets: HashMap<(CourseId, GroupId), Vec<usize>> = sessions
        .iter()
        .enumerate()
        .map(|(si, s)| ((s.course_id, s.group_id), si))
        .into_group_map();

    let mut penalty_links = Vec::new();
    for bucket in session_buckets.values() {
        for (&si, &sj) in bucket.iter().tuple_combinations() {
            for &ci in &candidates.by_session[si] {
                for &cj in &candidates.by_session[sj] {
                    if candidates.candidates[ci].day == candidates.candidates[cj].day {
                        penalty_links.push((ci, cj, vars.add(variable().binary())));
                    }
                }
            }
        }
    }

    let objective: Expression = penalty_links.iter().map(|&(_, _, p)| p).sum();
    info!(
        "Placement model: {} variables, {} penalty indicators",
        candidates.len(),
        penalty_links.len()
    );

    let mut problem = vars
        .minimise(objective)
        .using(good_lp::solvers::highs::highs)
        .set_option("time_limit", time_limit_secs)
        .set_option("output_flag", false);

    // Exactly-one placement per session; an empty candidate list yields the
    // unsatisfiable constraint 0 == 1
    for session_candidates in &candidates.by_session {
        let sum: Expression = session_candidates.iter().map(|&ci| x[ci]).sum();
        problem = problem.with(constraint!(sum == 1));
    }

    // Room mutex per base slot
    for cands in candidates.by_room_slot.values() {
        if cands.len() > 1 {
            let sum: Expression = cands.iter().map(|&ci| x[ci]).sum();
            problem = problem.with(constraint!(sum <= 1));
        }
    }

    // Group mutex per base slot
    for cands in candidates.by_group_slot.values() {
        if cands.len() > 1 {
            let sum: Expression = cands.iter().map(|&ci| x[ci]).sum();
            problem = problem.with(constraint!(sum <= 1));
        }
    }

    // Lecturer mutex per base slot; lab candidates were never indexed here
    for cands in candidates.by_lecturer_slot.values() {
        if cands.len() > 1 {
            let sum: Expression = cands.iter().map(|&ci| x[ci]).sum();
            problem = problem.with(constraint!(sum <= 1));
        }
    }

    // Penalty equivalence: p <=> (x_i AND x_j)
    for &(ci, cj, p) in &penalty_links {
        problem = problem.with(constraint!(p >= x[ci] + x[cj] - 1));
        problem = problem.with(constraint!(p <= x[ci]));
        problem = problem.with(constraint!(p <= x[cj]));
    }

    let solution = problem.solve().map_err(|e| match e {
        ResolutionError::Infeasible => TimetableError::Infeasible,
        other => TimetableError::SolverFailed(format!("{:?}", other)),
    })?;

    let mut chosen = Vec::with_capacity(sessions.len());
    for (si, session_candidates) in candidates.by_session.iter().enumerate() {
        let picked = session_candidates
            .iter()
            .find(|&&ci| solution.value(x[ci]) > 0.5)
            .copied()
            .ok_or_else(|| {
                TimetableError::SolverFailed(format!("session {} left unplaced", si))
            })?;
        chosen.push(picked);
    }

    let same_day_penalty = penalty_links
        .iter()
        .filter(|&&(_, _, p)| solution.value(p) > 0.5)
        .count() as u32;

    debug!(
        "Solved placement model in {:.2?}, penalty {}",
        started.elapsed(),
        same_day_penalty
    );

    Ok(PlacementSolution {
        chosen,
        same_day_penalty,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SolverConfig;
    use crate::solver::feasibility::enumerate_candidates;
    use crate::solver::grid::TimeGrid;
    use crate::types::{
        Availability, Lecturer, LecturerId, Requirements, Room, RoomId, SessionKind, StudentGroup,
        TimeOfDay,
    };
    use std::collections::BTreeMap;

    fn tiny_config() -> SolverConfig {
        let mut config = SolverConfig::default();
        config.week_days = vec!["Mon".to_string(), "Tue".to_string()];
        config.day_start = TimeOfDay::new(8, 0).unwrap();
        config.day_end = TimeOfDay::new(12, 0).unwrap();
        config.lunch_start = TimeOfDay::new(12, 0).unwrap();
        config.lunch_end = TimeOfDay::new(13, 0).unwrap();
        config
    }

    fn room(id: u32, name: &str) -> Room {
        Room {
            id: RoomId(id),
            name: name.to_string(),
            capacity: 100,
            building: None,
            furniture_type: None,
            equipment: vec![],
            availability: None,
        }
    }

    fn group(id: u32) -> StudentGroup {
        StudentGroup {
            id: GroupId(id),
            name: format!("G{}", id),
            size: 40,
            year: None,
            department: None,
            lecture_group: None,
            subgroup: None,
            track: None,
        }
    }

    fn lecturer(id: u32) -> Lecturer {
        Lecturer {
            id: LecturerId(id),
            name: format!("L{}", id),
            email: None,
            department: None,
            max_daily_load: None,
            availability: None,
        }
    }

    fn lecture(course: u32, group: u32, lecturer: u32) -> Session {
        Session {
            course_id: CourseId(course),
            group_id: GroupId(group),
            lecturer_id: LecturerId(lecturer),
            minutes: 60,
            requirements: Requirements::default(),
            kind: SessionKind::Lecture,
        }
    }

    fn solve(
        sessions: &[Session],
        rooms: &[Room],
        groups: &[StudentGroup],
        lecturers: &[Lecturer],
        config: &SolverConfig,
    ) -> Result<(PlacementSolution, CandidateSet)> {
        let grid = TimeGrid::build(config);
        let cands = enumerate_candidates(sessions, rooms, groups, lecturers, &grid, config);
        let solution = solve_placements(sessions, &cands, 20.0)?;
        Ok((solution, cands))
    }

    #[test]
    fn test_places_every_session_without_group_overlap() {
        let config = tiny_config();
        let sessions = vec![lecture(1, 1, 1), lecture(2, 1, 2), lecture(3, 1, 3)];
        let (solution, cands) = solve(
            &sessions,
            &[room(1, "R1"), room(2, "R2")],
            &[group(1)],
            &[lecturer(1), lecturer(2), lecturer(3)],
            &config,
        )
        .unwrap();

        assert_eq!(solution.chosen.len(), 3);
        // All three share a group, so their covered slots must be disjoint
        let mut seen = std::collections::HashSet::new();
        for &ci in &solution.chosen {
            for &b in &cands.candidates[ci].cover {
                assert!(seen.insert(b));
            }
        }
    }

    #[test]
    fn test_session_without_candidates_is_infeasible() {
        let config = tiny_config();
        // 90 minutes is not a multiple of the 60-minute base slot
        let mut odd = lecture(1, 1, 1);
        odd.minutes = 90;
        let result = solve(&[odd], &[room(1, "R1")], &[group(1)], &[lecturer(1)], &config);
        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TimetableError>(),
            Some(TimetableError::Infeasible)
        ));
    }

    #[test]
    fn test_room_mutex_forces_infeasibility_when_slots_run_out() {
        let config = tiny_config();
        // One room open a single hour; two sessions cannot both start there
        let mut cramped = room(1, "R1");
        let mut windows = BTreeMap::new();
        windows.insert(
            "Mon".to_string(),
            vec![(TimeOfDay::new(8, 0).unwrap(), TimeOfDay::new(9, 0).unwrap())],
        );
        cramped.availability = Some(Availability(windows));

        let sessions = vec![lecture(1, 1, 1), lecture(2, 2, 2)];
        let result = solve(
            &sessions,
            &[cramped],
            &[group(1), group(2)],
            &[lecturer(1), lecturer(2)],
            &config,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_same_course_sessions_spread_across_days() {
        let config = tiny_config();
        // Two sessions of one course and group, two days available
        let sessions = vec![lecture(1, 1, 1), lecture(1, 1, 1)];
        let (solution, cands) = solve(
            &sessions,
            &[room(1, "R1")],
            &[group(1)],
            &[lecturer(1)],
            &config,
        )
        .unwrap();

        assert_eq!(solution.same_day_penalty, 0);
        let days: Vec<usize> = solution
            .chosen
            .iter()
            .map(|&ci| cands.candidates[ci].day)
            .collect();
        assert_ne!(days[0], days[1]);
    }

    #[test]
    fn test_penalty_counted_when_same_day_is_forced() {
        let mut config = tiny_config();
        // Single working day: both sessions of the course must share it
        config.week_days = vec!["Mon".to_string()];
        let sessions = vec![lecture(1, 1, 1), lecture(1, 1, 1)];
        let (solution, _) = solve(
            &sessions,
            &[room(1, "R1")],
            &[group(1)],
            &[lecturer(1)],
            &config,
        )
        .unwrap();
        assert_eq!(solution.same_day_penalty, 1);
    }
}
