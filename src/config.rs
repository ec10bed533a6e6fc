use std::collections::HashSet;
use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::Path;

use tracing::info;

use crate::error::AppError;
use crate::models::Instructor;
use crate::models::instructor::default_instructors;

const DEFAULT_ADDR: &str = "127.0.0.1:3000";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub addr: SocketAddr,
    pub instructors: Vec<Instructor>,
}

impl AppConfig {
    /// Reads `SCHEDULER_ADDR` and `INSTRUCTORS_FILE`. Call `dotenvy::dotenv()`
    /// first if a `.env` file should be honoured.
    pub fn new_from_env() -> Result<Self, AppError> {
        let addr = env::var("SCHEDULER_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
        let instructors_file = env::var("INSTRUCTORS_FILE").ok();
        Self::from_parts(&addr, instructors_file.as_deref())
    }

    fn from_parts(addr: &str, instructors_file: Option<&str>) -> Result<Self, AppError> {
        let addr = addr
            .parse::<SocketAddr>()
            .map_err(|e| AppError::Config(format!("invalid SCHEDULER_ADDR {:?}: {}", addr, e)))?;

        let instructors = match instructors_file {
            Some(path) => load_instructors(Path::new(path))?,
            None => default_instructors(),
        };

        Ok(Self { addr, instructors })
    }
}

/// Loads the instructor seed from a JSON array of `{ id, name, email }`.
pub fn load_instructors(path: &Path) -> Result<Vec<Instructor>, AppError> {
    let raw = fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("cannot read {}: {}", path.display(), e)))?;
    let instructors = parse_instructors(&raw)
        .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;

    info!("Loaded {} instructors from {}", instructors.len(), path.display());
    Ok(instructors)
}

fn parse_instructors(raw: &str) -> Result<Vec<Instructor>, String> {
    let instructors: Vec<Instructor> = serde_json::from_str(raw).map_err(|e| e.to_string())?;

    let mut seen = HashSet::new();
    for instructor in &instructors {
        if !seen.insert(instructor.id) {
            return Err(format!("duplicate instructor id {}", instructor.id));
        }
    }
    Ok(instructors)
}
