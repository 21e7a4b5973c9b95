pub mod failure;
pub mod solution;

pub use failure::*;
pub use solution::*;
