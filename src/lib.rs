//! Library crate for user-manager.
//!
//! This crate exposes the building blocks of the TUI:
//! - User records and drafts (`model`)
//! - The in-memory collection (`store`)
//! - Name search and status filtering (`search`)
//! - Application state, reducer, keymap and event loop (`app`)
//! - UI rendering and widgets (`ui`)
//! - Error and result types (`error`)
//!
//! It is used by the `user-manager` binary and by tests.
#![doc = include_str!("../README.md")]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod app;
pub mod error;
pub mod model;
pub mod search;
pub mod store;
pub mod ui;

/// Convenient error and result types shared across the crate.
pub use error::{DynError, Result};
