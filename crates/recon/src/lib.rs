//! `rosterdiff-recon` — Two-source roster reconciliation engine.
//!
//! Pure engine crate: receives pre-loaded roster CSV text plus a column
//! mapping, returns classified result tables. No CLI or filesystem
//! dependencies.

pub mod compare;
pub mod config;
pub mod engine;
pub mod error;
pub mod matcher;
pub mod model;
pub mod normalize;
pub mod report;
pub mod similarity;

pub use config::{MatcherConfig, ReconConfig, Scorer};
pub use engine::run;
pub use error::ReconError;
pub use model::{ReconInput, ReconResult, ResultTable, Roster};
pub use normalize::load_roster;
