//! Shared output models.

pub mod deployment;

pub use deployment::{DeploymentManifest, DeploymentRecord};
