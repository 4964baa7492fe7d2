use thiserror::Error;

/// Domain-specific errors for the timetable solver
#[derive(Error, Debug)]
pub enum TimetableError {
    // Input/Parse errors
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON in '{file}': {message}")]
    JsonParse { file: String, message: String },

    #[error("Invalid time '{0}': expected HH:MM")]
    InvalidTime(String),

    // Data validation errors
    #[error("Course '{course}' references unknown group {group}")]
    UnknownGroup { course: String, group: u32 },

    #[error("Course '{course}' references unknown lecturer {lecturer}")]
    UnknownLecturer { course: String, lecturer: u32 },

    #[error("Duplicate ID found: {id_type} {id}")]
    DuplicateId { id_type: String, id: u32 },

    #[error("Unknown version {0}")]
    UnknownVersion(u32),

    // Solver errors
    #[error("ILP solver failed: {0}")]
    SolverFailed(String),

    #[error("No feasible timetable could be generated with current data and constraints")]
    Infeasible,

    // Commit errors
    #[error("Event collision on {index} at {day} {start}: another event already holds that slot")]
    EventCollision {
        index: &'static str,
        day: String,
        start: String,
    },
}

/// Use anyhow::Result at application boundaries
pub type Result<T> = anyhow::Result<T>;
