use crate::error::Result;
use crate::models::{Failure, Solution};
use crate::store::RecordStore;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

/// In-memory record store seeded once at startup.
///
/// Seed order is preserved separately from the id maps so listings come back
/// in a deterministic order regardless of map iteration.
#[derive(Clone)]
pub struct InMemoryStore {
    failures: Arc<DashMap<u32, Failure>>,
    solutions: Arc<DashMap<u32, Solution>>,
    failure_order: Arc<Vec<u32>>,
    solution_order: Arc<Vec<u32>>,
    solution_index: Arc<DashMap<u32, Vec<u32>>>,
}

impl InMemoryStore {
    pub fn new(failures: Vec<Failure>, solutions: Vec<Solution>) -> Self {
        let failure_order: Vec<u32> = failures.iter().map(|f| f.id).collect();
        let solution_order: Vec<u32> = solutions.iter().map(|s| s.id).collect();

        let failure_map = DashMap::new();
        for failure in failures {
            failure_map.insert(failure.id, failure);
        }

        let solution_index: DashMap<u32, Vec<u32>> = DashMap::new();
        let solution_map = DashMap::new();
        for solution in solutions {
            solution_index
                .entry(solution.related_failure_id)
                .or_default()
                .push(solution.id);
            solution_map.insert(solution.id, solution);
        }

        Self {
            failures: Arc::new(failure_map),
            solutions: Arc::new(solution_map),
            failure_order: Arc::new(failure_order),
            solution_order: Arc::new(solution_order),
            solution_index: Arc::new(solution_index),
        }
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn failure(&self, id: u32) -> Result<Option<Failure>> {
        Ok(self.failures.get(&id).map(|entry| entry.clone()))
    }

    async fn solution(&self, id: u32) -> Result<Option<Solution>> {
        Ok(self.solutions.get(&id).map(|entry| entry.clone()))
    }

    async fn failures(&self) -> Result<Vec<Failure>> {
        Ok(self
            .failure_order
            .iter()
            .filter_map(|id| self.failures.get(id).map(|entry| entry.clone()))
            .collect())
    }

    async fn solutions(&self) -> Result<Vec<Solution>> {
        Ok(self
            .solution_order
            .iter()
            .filter_map(|id| self.solutions.get(id).map(|entry| entry.clone()))
            .collect())
    }

    async fn solutions_for_failure(&self, failure_id: u32) -> Result<Vec<Solution>> {
        let ids = match self.solution_index.get(&failure_id) {
            Some(entry) => entry.clone(),
            None => return Ok(Vec::new()),
        };

        Ok(ids
            .iter()
            .filter_map(|id| self.solutions.get(id).map(|entry| entry.clone()))
            .collect())
    }

    async fn failure_count(&self) -> Result<u64> {
        Ok(self.failures.len() as u64)
    }

    async fn solution_count(&self) -> Result<u64> {
        Ok(self.solutions.len() as u64)
    }
}
