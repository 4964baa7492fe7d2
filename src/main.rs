use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use timetable_solver::catalog::{Catalog, InMemoryCatalog};
use timetable_solver::config::SolverConfig;
use timetable_solver::parser::{load_catalog_from_dir, load_config_from_dir, validate_catalog};
use timetable_solver::reporter::{
    generate_group_schedule, generate_json_summary, generate_lecturer_schedule, generate_reports,
    print_summary, OutputFormat,
};
use timetable_solver::solver::{ensure_lab_rooms, expand_sessions, generate};
use timetable_solver::types::{GroupId, LecturerId, SolveOutcome};
use timetable_solver::validator::validate_events;

#[derive(Parser)]
#[command(name = "timetable-solver")]
#[command(about = "Constraint-based university timetable generator")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run demo with sample data
    Demo,

    /// Generate a timetable from catalog data
    Generate {
        /// Directory containing catalog JSON files
        #[arg(short, long)]
        data: PathBuf,

        /// Output directory for timetable files
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,

        /// Name recorded on the new version
        #[arg(short = 'n', long, default_value = "generated")]
        version_name: String,

        /// Output format(s): json, markdown, text, or all
        #[arg(short, long, default_value = "all")]
        format: String,

        /// Suppress progress output, print JSON summary only
        #[arg(short, long)]
        quiet: bool,
    },

    /// Validate an existing timetable
    Validate {
        /// Path to timetable.json file
        #[arg(short, long)]
        schedule: PathBuf,

        /// Directory containing catalog data for validation
        #[arg(short, long)]
        data: PathBuf,

        /// Show detailed validation results
        #[arg(short, long)]
        verbose: bool,
    },

    /// Generate reports from a timetable
    Report {
        /// Path to timetable.json file
        #[arg(short, long)]
        schedule: PathBuf,

        /// Directory containing catalog data
        #[arg(short, long)]
        data: PathBuf,

        /// Generate schedule for a specific group ID
        #[arg(long)]
        group: Option<u32>,

        /// Generate schedule for a specific lecturer ID
        #[arg(long)]
        lecturer: Option<u32>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Demo => run_demo(),
        Commands::Generate {
            data,
            output,
            version_name,
            format,
            quiet,
        } => run_generate(&data, &output, &version_name, &format, quiet),
        Commands::Validate {
            schedule,
            data,
            verbose,
        } => run_validate(&schedule, &data, verbose),
        Commands::Report {
            schedule,
            data,
            group,
            lecturer,
        } => run_report(&schedule, &data, group, lecturer),
    }
}

fn run_demo() -> Result<()> {
    println!("{}", "Timetable Solver Demo".bold().cyan());
    println!("{}", "─".repeat(40));

    let demo_path = PathBuf::from("data/demo");
    let output_path = PathBuf::from("output");

    if !demo_path.join("courses.json").exists() {
        println!("{}", "Demo data not found. Creating sample data...".yellow());
        create_demo_data(&demo_path)?;
    }

    println!("Loading demo data from: {}", demo_path.display());
    run_generate(&demo_path, &output_path, "demo", "all", false)
}

fn run_generate(
    data: &PathBuf,
    output: &PathBuf,
    version_name: &str,
    format: &str,
    quiet: bool,
) -> Result<()> {
    let catalog = load_catalog_from_dir(data).context("Failed to load catalog data")?;
    let config = load_config_from_dir(data)?;

    let validation_result = validate_catalog(&catalog, &config)?;
    if !quiet {
        for warning in &validation_result.warnings {
            println!("{} {}", "Warning:".yellow(), warning);
        }
        println!(
            "Loaded {} rooms, {} courses, {} groups, {} lecturers",
            catalog.rooms.len(),
            catalog.courses.len(),
            catalog.groups.len(),
            catalog.lecturers.len()
        );
        println!("\nGenerating timetable...\n");
    }

    let mut store = InMemoryCatalog::new(catalog);
    let outcome = generate(&mut store, version_name, &config, quiet)?;

    // Validate against the post-solve catalog so synthetic lab venues resolve
    let solved_catalog = store.snapshot()?;
    let validation = validate_events(&outcome.events, &solved_catalog, &config);

    let formats = parse_formats(format);
    generate_reports(
        &outcome,
        &solved_catalog,
        &validation,
        &config,
        output,
        &formats,
    )?;

    if quiet {
        let summary = generate_json_summary(&outcome, validation.total_score)?;
        println!("{}", summary);
    } else {
        print_summary(&outcome, &validation);
        println!(
            "Reports written to: {}",
            output.display().to_string().green()
        );
    }

    Ok(())
}

/// Catalog from a data directory plus the synthetic lab venues a solve over
/// it would persist, so committed lab events resolve
fn load_solved_catalog(data: &PathBuf, config: &SolverConfig) -> Result<Catalog> {
    let catalog = load_catalog_from_dir(data)?;
    let sessions = expand_sessions(&catalog.courses, &catalog.groups, config);
    let groups = catalog.groups.clone();
    let mut store = InMemoryCatalog::new(catalog);
    ensure_lab_rooms(&mut store, &sessions, &groups)?;
    store.snapshot()
}

fn run_validate(schedule_path: &PathBuf, data: &PathBuf, verbose: bool) -> Result<()> {
    let config = load_config_from_dir(data)?;
    let catalog = load_solved_catalog(data, &config)?;

    let schedule_json = std::fs::read_to_string(schedule_path)?;
    let outcome: SolveOutcome = serde_json::from_str(&schedule_json)?;

    let validation = validate_events(&outcome.events, &catalog, &config);

    if validation.is_valid {
        println!("{}", "✓ Timetable is valid".green().bold());
    } else {
        println!("{}", "✗ Timetable has violations".red().bold());
        for v in &validation.hard_violations {
            println!("  - {}: {}", v.constraint.red(), v.message);
        }
    }

    if verbose {
        println!("\n{}", "Soft Constraint Scores:".bold());
        for score in &validation.soft_scores {
            let pct = if score.max_score > 0.0 {
                (score.score / score.max_score) * 100.0
            } else {
                100.0
            };
            println!("  {}: {:.1}%", score.constraint, pct);
        }

        println!("\n{}", "Statistics:".bold());
        println!("  Events:    {}", validation.statistics.total_events);
        println!("  Labs:      {}", validation.statistics.lab_events);
        println!("  Groups:    {}", validation.statistics.groups_scheduled);
        println!("  Rooms:     {}", validation.statistics.rooms_used);
        println!("  Same-day:  {} pairs", validation.statistics.same_day_pairs);
    }

    println!("\nOverall Score: {:.1}/100", validation.total_score);

    Ok(())
}

fn run_report(
    schedule_path: &PathBuf,
    data: &PathBuf,
    group: Option<u32>,
    lecturer: Option<u32>,
) -> Result<()> {
    let config = load_config_from_dir(data)?;
    let catalog = load_solved_catalog(data, &config)?;

    let schedule_json = std::fs::read_to_string(schedule_path)?;
    let outcome: SolveOutcome = serde_json::from_str(&schedule_json)?;

    if let Some(group_id) = group {
        match generate_group_schedule(&outcome, &catalog, &config, GroupId(group_id)) {
            Some(report) => println!("{}", report),
            None => println!("Group not found"),
        }
    } else if let Some(lecturer_id) = lecturer {
        match generate_lecturer_schedule(&outcome, &catalog, &config, LecturerId(lecturer_id)) {
            Some(report) => println!("{}", report),
            None => println!("Lecturer not found"),
        }
    } else {
        let validation = validate_events(&outcome.events, &catalog, &config);
        print_summary(&outcome, &validation);
    }

    Ok(())
}

fn parse_formats(format: &str) -> Vec<OutputFormat> {
    if format == "all" {
        return vec![OutputFormat::Json, OutputFormat::Markdown, OutputFormat::Text];
    }

    format
        .split(',')
        .filter_map(|f| match f.trim().to_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "markdown" | "md" => Some(OutputFormat::Markdown),
            "text" | "txt" => Some(OutputFormat::Text),
            _ => None,
        })
        .collect()
}

fn create_demo_data(path: &PathBuf) -> Result<()> {
    std::fs::create_dir_all(path)?;

    // Rooms
    let rooms = serde_json::json!([
        {"id": 1, "name": "LT-1", "capacity": 120, "furniture_type": "LECTURE", "equipment": ["PROJECTOR"]},
        {"id": 2, "name": "LT-2", "capacity": 200, "furniture_type": "LECTURE", "equipment": ["PROJECTOR", "AC"]},
        {"id": 3, "name": "SR-1", "capacity": 60, "furniture_type": "LECTURE", "equipment": []},
        {"id": 4, "name": "SR-2", "capacity": 40, "furniture_type": "LECTURE", "equipment": ["PROJECTOR"],
         "availability": {"Mon": [["08:00", "17:00"]], "Tue": [["08:00", "13:00"]],
                          "Wed": [["08:00", "17:00"]], "Thu": [["08:00", "17:00"]], "Fri": [["08:00", "12:00"]]}}
    ]);
    std::fs::write(path.join("rooms.json"), serde_json::to_string_pretty(&rooms)?)?;

    // Student groups
    let groups = serde_json::json!([
        {"id": 1, "name": "3EEE", "size": 55, "year": 3, "department": "EEE"},
        {"id": 2, "name": "4EEE-MP", "size": 32, "year": 4, "department": "EEE", "track": "MP"},
        {"id": 3, "name": "5AEN", "size": 18, "year": 5, "department": "AEN"}
    ]);
    std::fs::write(path.join("groups.json"), serde_json::to_string_pretty(&groups)?)?;

    // Lecturers
    let lecturers = serde_json::json!([
        {"id": 1, "name": "Dr. Banda", "department": "EEE"},
        {"id": 2, "name": "Prof. Mwale", "department": "EEE",
         "availability": {"Mon": [["08:00", "13:00"]], "Tue": [["08:00", "17:00"]],
                          "Wed": [["08:00", "17:00"]], "Thu": [["14:00", "17:00"]]}},
        {"id": 3, "name": "Dr. Phiri", "department": "AEN"},
        {"id": 4, "name": "Ms. Zulu", "department": "AEN"}
    ]);
    std::fs::write(path.join("lecturers.json"), serde_json::to_string_pretty(&lecturers)?)?;

    // Courses
    let courses = serde_json::json!([
        {"id": 1, "code": "EEE 3001", "name": "Circuit Analysis", "department": "EEE",
         "weekly_hours": 3, "session_minutes": 60,
         "requirements": {"furniture_type": "LECTURE", "equipment": ["PROJECTOR"]},
         "groups": [1], "lecturers": [1]},
        {"id": 2, "code": "EEE 3002", "name": "Digital Electronics", "department": "EEE",
         "weekly_hours": 2, "session_minutes": 60,
         "has_lab": true, "lab_weekly_sessions": 1, "lab_session_minutes": 180,
         "groups": [1], "lecturers": [2]},
        {"id": 3, "code": "EEE 4010", "name": "Power Systems", "department": "EEE",
         "weekly_hours": 3, "session_minutes": 60,
         "requirements": {"furniture_type": "LECTURE"},
         "groups": [2], "lecturers": [2, 1]},
        {"id": 4, "code": "AEN 5001", "name": "Final Year Project", "department": "AEN",
         "weekly_hours": 0, "is_project": true, "groups": [3], "lecturers": [3]},
        {"id": 5, "code": "AEN 5002", "name": "Engineering Management", "department": "AEN",
         "weekly_hours": 2, "session_minutes": 60, "groups": [3], "lecturers": [4]}
    ]);
    std::fs::write(path.join("courses.json"), serde_json::to_string_pretty(&courses)?)?;

    println!("{}", "Demo data created successfully!".green());
    Ok(())
}
