pub mod loader;
pub mod normalize;

pub use loader::{SeedSummary, seed_from_csv};
