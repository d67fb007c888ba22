//! Core domain types shared across the crate.

pub mod ids;

pub use ids::{DeliveryId, InstallationId, PrNumber, RepoId, Sha};
