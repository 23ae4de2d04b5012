//! # SalonBook Client
//!
//! Talks to the salon-booking REST backend and drives the client-side
//! workflows on top of it.
//!
//! ## Architecture
//!
//! - **Session**: the explicit bearer-token holder passed into the client
//! - **Http**: the `reqwest` collaborator that issues authenticated JSON requests
//! - **Api**: the [`api::SalonApi`] trait naming every endpoint the workflows use
//! - **Workflows**: booking, time-block management, appointment changes and
//!   the vendor service catalog, written against `SalonApi` so they can run
//!   against mocks
//! - **Config**: environment-driven settings for the CLI

/// Endpoint trait and its HTTP implementation
pub mod api;
/// Configuration loaded from the environment
pub mod config;
/// Authenticated JSON transport
pub mod http;
/// `mockall` doubles for the endpoint trait
pub mod mock;
/// Explicit authentication state
pub mod session;
/// Multi-step client workflows
pub mod workflows;

pub use api::SalonApi;
pub use config::ClientConfig;
pub use http::HttpClient;
pub use session::Session;
