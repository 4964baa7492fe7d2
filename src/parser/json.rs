use crate::catalog::Catalog;
use crate::config::SolverConfig;
use crate::error::{Result, TimetableError};
use crate::types::{Course, Lecturer, Room, StudentGroup};
use std::fs;
use std::path::Path;

/// Load all catalog data from a directory
pub fn load_catalog_from_dir(dir: &Path) -> Result<Catalog> {
    let rooms = load_rooms(&dir.join("rooms.json"))?;
    let courses = load_courses(&dir.join("courses.json"))?;
    let groups = load_groups(&dir.join("groups.json"))?;
    let lecturers = load_lecturers(&dir.join("lecturers.json"))?;

    Ok(Catalog {
        rooms,
        courses,
        groups,
        lecturers,
    })
}

/// Load the solver configuration: `config.toml` when present (defaults
/// otherwise), then environment overrides
pub fn load_config_from_dir(dir: &Path) -> Result<SolverConfig> {
    let path = dir.join("config.toml");
    let mut config = if path.exists() {
        match fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).unwrap_or_default(),
            Err(_) => SolverConfig::default(),
        }
    } else {
        SolverConfig::default()
    };
    config.apply_env()?;
    Ok(config)
}

/// Load rooms from JSON file
pub fn load_rooms(path: &Path) -> Result<Vec<Room>> {
    load_json_file(path)
}

/// Load courses from JSON file
pub fn load_courses(path: &Path) -> Result<Vec<Course>> {
    load_json_file(path)
}

/// Load student groups from JSON file
pub fn load_groups(path: &Path) -> Result<Vec<StudentGroup>> {
    load_json_file(path)
}

/// Load lecturers from JSON file
pub fn load_lecturers(path: &Path) -> Result<Vec<Lecturer>> {
    load_json_file(path)
}

/// Generic JSON file loader
fn load_json_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let path_str = path.display().to_string();
    let content = fs::read_to_string(path).map_err(|e| TimetableError::FileRead {
        path: path_str.clone(),
        source: e,
    })?;

    serde_json::from_str(&content).map_err(|e| {
        TimetableError::JsonParse {
            file: path_str,
            message: e.to_string(),
        }
        .into()
    })
}
