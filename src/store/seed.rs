use crate::error::{AppError, Result};
use crate::models::{Failure, Solution};
use serde::Deserialize;
use std::collections::HashSet;

/// The embedded record collections
#[derive(Debug, Deserialize)]
pub struct SeedData {
    pub failures: Vec<Failure>,
    pub solutions: Vec<Solution>,
}

/// Load and validate the embedded seed dataset.
///
/// Solutions must reference an existing failure; a dangling
/// `related_failure_id` is a data-integrity error and the record is excluded
/// with a warning rather than shipped inconsistent.
pub fn load_seed() -> Result<SeedData> {
    let seed: SeedData = serde_json::from_str(include_str!("../../data/seed.json"))
        .map_err(|e| AppError::DataIntegrity(format!("Seed dataset is malformed: {}", e)))?;

    Ok(validate(seed))
}

fn validate(mut seed: SeedData) -> SeedData {
    let failure_ids: HashSet<u32> = seed.failures.iter().map(|f| f.id).collect();

    seed.solutions.retain(|solution| {
        let resolves = failure_ids.contains(&solution.related_failure_id);
        if !resolves {
            tracing::warn!(
                solution_id = solution.id,
                related_failure_id = solution.related_failure_id,
                title = %solution.title,
                "Dropping solution with dangling failure reference"
            );
        }
        resolves
    });

    seed
}
