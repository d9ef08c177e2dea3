//! hashlist - a task list persisted in a URL fragment
//!
//! The whole list (order, text and completion flags) lives in the fragment
//! of a page URL, so there is no server and no storage beyond the address
//! bar.
//!
//! # Core Concepts
//!
//! - **Fragment codec**: `?s=<bitmask>&0=<text>&1=<text>...`, with every
//!   checked flag packed into one integer
//! - **Drag reorder**: a pointer-driven state machine that moves one task a
//!   slot at a time and re-encodes the list when the gesture ends
//! - **Board**: the application state tying the list, its fragment and the
//!   drag controller together
//!
//! # Module Organization
//!
//! - `cli`: Command-line interface using clap
//! - `codec`: Fragment encode/decode
//! - `reorder`: Drag-to-reorder controller
//! - `input`: Mouse/touch normalization
//! - `board`: Application state
//! - `task`: Task records and the ordered list
//! - `progress`: Completion percentage
//! - `config`: Configuration loading from `.hashlist.toml`
//! - `output`: Human and JSON output
//! - `error`: Error types and result aliases
//! - `ui`: Terminal list view

pub mod board;
pub mod cli;
pub mod codec;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod progress;
pub mod reorder;
pub mod task;
pub mod ui;

pub use error::{Error, Result};
