//! # seren-core
//!
//! Core library for seren - a local-first personal wellness journal.
//!
//! This library provides:
//! - Domain types for mood entries, chat messages, and the user profile
//! - The entry store and conversation session (the only state owners)
//! - A pure statistics engine (averages, trend, streak, chart series,
//!   distribution, trigger extraction)
//! - Reply resolution with a hosted strategy and a rule-based fallback
//! - SQLite-backed blob persistence, configuration, logging, and exports
//!
//! ## Architecture
//!
//! State lives in two owners: [`store::EntryStore`] (mood entries) and
//! [`ai::ChatSession`] (chat history). The statistics engine and the
//! export surface only read snapshots. Persistence is a key→string blob
//! store read once at startup and rewritten best-effort after every
//! change; the in-memory stores stay authoritative for the process
//! lifetime.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use seren_core::{BlobStore, Config, EntryStore};
//!
//! let config = Config::load().expect("failed to load config");
//! let blobs = Arc::new(BlobStore::open(&Config::database_path()).expect("failed to open store"));
//! blobs.migrate().expect("failed to run migrations");
//!
//! let mut entries = EntryStore::load(blobs);
//! entries.add(4, Some("slept well".into()), None).expect("valid mood");
//! ```

// Re-export commonly used items at the crate root
pub use ai::{ChatSession, Reply, ReplyEngine, ReplySource};
pub use config::Config;
pub use error::{Error, Result};
pub use store::{BlobStore, EntryStore, ProfileStore};
pub use types::*;

// Public modules
pub mod ai;
pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod stats;
pub mod store;
pub mod types;
