//! Marquee-Common: Shared types, constants, and utilities.
//!
//! This crate provides common functionality used across marquee:
//!
//! - **Error Handling**: The error taxonomy shared by fetchers, mappers and pipelines
//! - **Ticks**: Conversion from upstream 100ns ticks to milliseconds and progress ratios
//! - **Core Types**: Enums for upstream providers, image kinds and card themes
//!
//! # Examples
//!
//! ```
//! use marquee_common::ticks::{progress_percent, ticks_to_ms};
//! use serde_json::json;
//!
//! let runtime = ticks_to_ms(Some(&json!(600_000_000)));
//! let position = ticks_to_ms(Some(&json!("300000000")));
//! assert_eq!(runtime, Some(60_000));
//! assert_eq!(progress_percent(runtime, position), 50);
//! ```

pub mod error;
pub mod ticks;
pub mod types;

pub use error::{Error, Result};
pub use types::*;
