pub mod memory;
pub mod seed;

pub use memory::InMemoryStore;
pub use seed::{load_seed, SeedData};

use crate::error::Result;
use crate::models::{Failure, Solution};
use async_trait::async_trait;

/// Trait for record catalog access.
///
/// The collections are fixed at startup; there is no create/update/delete
/// path, so the trait only exposes lookups and full listings.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Get a failure by id
    async fn failure(&self, id: u32) -> Result<Option<Failure>>;

    /// Get a solution by id
    async fn solution(&self, id: u32) -> Result<Option<Solution>>;

    /// All failures in seed order
    async fn failures(&self) -> Result<Vec<Failure>>;

    /// All solutions in seed order
    async fn solutions(&self) -> Result<Vec<Solution>>;

    /// Solutions whose related-failure id matches
    async fn solutions_for_failure(&self, failure_id: u32) -> Result<Vec<Solution>>;

    /// Number of seeded failures
    async fn failure_count(&self) -> Result<u64>;

    /// Number of seeded solutions
    async fn solution_count(&self) -> Result<u64>;
}
