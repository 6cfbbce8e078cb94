//! Survex web front-end.
//!
//! Browser client for the Survex paid-survey rewards service: sign-up and
//! login, survey walls, balance redemptions, support tickets and the staff
//! admin panel. The same crate builds the WASM client and the SSR server.

// =============================================================================
// Lints - Enforce code quality and consistency
// =============================================================================

// Deny truly dangerous patterns (these will fail the build)
#![deny(unsafe_code)]
#![deny(unused_must_use)]

// Shared core (compiles for both server and WASM)
pub mod auth;
pub mod base_url;
pub mod client;
pub mod config;
pub mod device;
pub mod error;
pub mod format;
pub mod session;
pub mod storage;
pub mod views;

// Dioxus UI app (shared between server SSR and WASM client)
pub mod app;

// Server-only modules (excluded from WASM build)
#[cfg(feature = "server")]
pub mod api;
