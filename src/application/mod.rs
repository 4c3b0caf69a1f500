//! Application layer services implementing the lookup pipeline.
//!
//! Services orchestrate domain types and infrastructure components and offer
//! a small API to HTTP handlers and the CLI.
//!
//! # Available Services
//!
//! - [`services::lookup_service::LookupService`] - Normalize, resolve, project

pub mod services;
