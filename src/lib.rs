//! # tasklist
//!
//! A minimal task list manager: add, toggle and delete short text tasks. The
//! list is persisted to a local key-value store after every change, falling
//! back to session-only storage when the durable store is unusable, and is
//! re-rendered sorted with incomplete tasks first, newest first.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tasklist::commands::Cli;
//!
//! fn main() -> anyhow::Result<()> {
//!     Cli::menu()
//! }
//! ```

pub mod commands;
pub mod libs;
