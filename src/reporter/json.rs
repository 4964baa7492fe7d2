use crate::error::Result;
use crate::types::SolveOutcome;

/// Generate JSON report of the solve outcome
pub fn generate_json_report(outcome: &SolveOutcome) -> Result<String> {
    Ok(serde_json::to_string_pretty(outcome)?)
}

/// Summary statistics as JSON
#[derive(serde::Serialize)]
pub struct JsonSummary {
    pub version: String,
    pub total_events: usize,
    pub same_day_penalty: u32,
    pub solve_time_ms: u64,
    pub score: f64,
}

pub fn generate_json_summary(outcome: &SolveOutcome, score: f64) -> Result<String> {
    let summary = JsonSummary {
        version: outcome.version.name.clone(),
        total_events: outcome.events.len(),
        same_day_penalty: outcome.metadata.same_day_penalty,
        solve_time_ms: outcome.metadata.solve_time_ms,
        score,
    };

    Ok(serde_json::to_string_pretty(&summary)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{SolveMetadata, Version, VersionId};

    #[test]
    fn test_json_report_round_trips() {
        let outcome = SolveOutcome {
            version: Version {
                id: VersionId(1),
                name: "v1".to_string(),
                created_at: chrono::Utc::now(),
            },
            events: vec![],
            metadata: SolveMetadata::default(),
        };
        let json = generate_json_report(&outcome).unwrap();
        let back: SolveOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(back.version.name, "v1");
        assert!(back.events.is_empty());
    }
}
