//! Library crate for tucugol-back, exposing modules for binaries and integration tests.

/// Runtime configuration (match fixture).
pub mod config;
/// In-memory play storage.
pub mod dao;
/// HTTP request and response types.
pub mod dto;
/// Service and HTTP error types.
pub mod error;
/// Route trees.
pub mod routes;
/// Workflow orchestration and collaborator boundaries.
pub mod services;
/// Shared state, form state machine, gate and clock.
pub mod state;
