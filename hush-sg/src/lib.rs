//! # Hush Story Generator (hush-sg)
//!
//! Generation-orchestration pipeline for bedtime story experiences.
//!
//! **Purpose:** Accept a story request, drive a sequential text-generation
//! stage followed by a concurrent image+audio stage, apply a multi-tier
//! fallback policy at every stage (remote service → local inference →
//! deterministic synthetic fallback), and persist the resulting assets under
//! collision-free identifiers, behind an HTTP/SSE control interface.
//!
//! **Architecture:** tokio pipeline with per-stage fallback chains; axum
//! façade; flat-file asset store.

pub mod api;
pub mod assets;
pub mod config;
pub mod error;
pub mod generate;
pub mod providers;
pub mod state;

pub use error::{Error, Result};
