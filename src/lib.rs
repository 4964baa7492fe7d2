//! Timetable Solver - Constraint-based university timetable generator
//!
//! This library expands a curriculum catalog into atomic teaching sessions
//! and discharges an Integer Linear Programming (ILP) model whose solution
//! is a conflict-free weekly schedule committed under an immutable version.
//!
//! # Algorithm Overview
//!
//! A solve runs in 6 phases:
//! 1. **Session Expansion**: courses become lecture/lab sessions per group
//! 2. **Lab Venue Synthesis**: a virtual `LAB-G<gid>` room per lab group
//! 3. **Time Grid**: working days expand into uniform atomic slots
//! 4. **Feasibility Filter**: enumerate allowed (session, room, slot) placements
//! 5. **Constraint Model**: exactly-one placement, room/group/lecturer mutexes,
//!    minimized same-day penalties
//! 6. **Materialization**: chosen placements become committed events
//!
//! # Example
//!
//! ```no_run
//! use timetable_solver::catalog::InMemoryCatalog;
//! use timetable_solver::config::SolverConfig;
//! use timetable_solver::parser::load_catalog_from_dir;
//! use timetable_solver::solver::generate;
//! use timetable_solver::validator::validate_events;
//! use std::path::Path;
//!
//! let catalog = load_catalog_from_dir(Path::new("./data/demo")).unwrap();
//! let config = SolverConfig::from_env().unwrap();
//! let mut store = InMemoryCatalog::new(catalog.clone());
//! let outcome = generate(&mut store, "sem1-draft", &config, false).unwrap();
//! let validation = validate_events(&outcome.events, &catalog, &config);
//! println!("Score: {:.1}", validation.total_score);
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod parser;
pub mod reporter;
pub mod solver;
pub mod types;
pub mod validator;

pub use error::{Result, TimetableError};
