//! Terraform plan ingestion.
//!
//! This module defines the in-memory model of a Terraform plan document
//! and the loader that materializes it from `terraform show -json` output.

mod loader;
mod model;

pub use loader::PlanLoader;
pub use model::{Action, ActionKey, Change, Plan, ResourceChange, ROOT_MODULE};
