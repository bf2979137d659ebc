//! Size Grid Core - Shared types library.
//!
//! This crate provides common types used across all Size Grid components:
//! - `engine` - Pricing and order-composition engine
//! - `integration-tests` - Cross-module scenario tests
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no host-platform access,
//! no HTTP clients. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, slugs, group
//!   identifiers, and the logo method enum

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
