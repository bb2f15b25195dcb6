//! # repo-admin-test
//!
//! Testing utilities for repo-admin. Provides a test client for sending
//! simulated requests through an administration router, and fixtures for
//! host applications and resources.

pub mod client;
pub mod fixtures;

pub use client::{TestClient, TestResponse};
pub use fixtures::FixtureResource;
