//! Seed and check `.env` files against a template.
//!
//! This library compares a template env file (the "source", e.g.
//! `.env.example`) with a local one (the "destination", e.g. `.env`),
//! reports every key that differs, and creates or overwrites the
//! destination when asked to.
//!
//! # Features
//!
//! - **Strict line parser**: blank and `#` lines are skipped, everything else
//!   must be `key=value`; the value may itself contain `=`
//! - **Key-wise diff**: equal, changed, missing from destination, missing from source
//! - **Safe replacement**: the destination is replaced through a temporary file
//! - **Tracing**: decision and per-key warnings are logged when the `tracing`
//!   feature is enabled (the default)
//!
//! # Example
//!
//! ```rust,no_run
//! use make_env_file::sync::{EnvSync, EnvSyncOptions};
//!
//! let options = EnvSyncOptions {
//!     overwrite: true,
//!     ..EnvSyncOptions::default()
//! };
//!
//! EnvSync::sync_with_options(&options).unwrap();
//! ```

pub mod copy;
pub mod diff;
pub mod parse;
pub mod sync;
