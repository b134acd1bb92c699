//! Core types and trait definitions for the Wolf Cuts survey intake.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; storage backends implement
//! [`store::SurveyStore`] and the operations in [`intake`] run against it.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod coupon;
pub mod error;
pub mod intake;
pub mod memory;
pub mod segment;
pub mod store;
pub mod survey;
pub mod wizard;

pub use error::{Error, Result};
