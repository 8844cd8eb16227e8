//! Recommendation: fixed-weight scoring of catalog graphs against user intent.
//!
//! The scorer is a pure function over one record; the recommender applies it
//! to a catalog snapshot, ranks, and truncates.

pub mod recommender;
pub mod scorer;
pub mod types;

pub use recommender::Recommender;
pub use scorer::score;
pub use types::*;
