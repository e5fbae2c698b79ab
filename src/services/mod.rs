/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// Receipt notification boundary.
pub mod notifier;
/// Core play-submission workflow orchestration.
pub mod play_service;
/// Session lifecycle (login, registration, logout).
pub mod session_service;
/// External serial registry boundary.
pub mod verifier;
