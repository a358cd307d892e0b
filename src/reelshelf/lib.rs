//! # Reelshelf Architecture
//!
//! Reelshelf is a **UI-agnostic media-catalog library**. The shipped CLI is one
//! client of it; the same core could sit behind a desktop GUI or a web UI.
//!
//! ## The Three-Layer Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs + args.rs)                              │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade owning catalog, CSV store, backups, guard    │
//! │  - Orchestrates the save path (guard → backup → write)      │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Pure business logic over the in-memory catalog           │
//! │  - Operates on Rust types, returns Rust types               │
//! │  - No I/O assumptions whatsoever                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Catalog: ordered in-memory collection, identity keys     │
//! │  - CsvStore: one CSV file, per-row skip-and-log on load     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes regular Rust arguments, returns regular
//! Rust types, never writes to stdout/stderr, and never assumes a terminal.
//! The logging that does happen goes through `tracing`; the binary decides
//! where it lands (an append-only log file by default).
//!
//! ## Entry Identity
//!
//! Entries are addressed by `(title, year, kind)` — there are no synthetic
//! ids. Duplicate keys are rejected at the store boundary, and the catalog
//! preserves insertion/load order; any sorting is done on copies by the list
//! command.
//!
//! ## The Save Path
//!
//! Every write to disk follows the same sequence: claim the [`autosave::SaveGuard`],
//! let the [`backup::BackupManager`] snapshot the current file, then rewrite
//! through [`store::csv::CsvStore`]. Manual saves and autosave ticks share the
//! guard, so at most one save runs at a time; a losing tick is skipped, not
//! queued. A backup failure blocks the save — data safety over availability.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade — entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`store`]: In-memory catalog and CSV persistence
//! - [`model`]: Core data types (`Entry`, `ContentScores`, `EntryKey`)
//! - [`validate`]: Draft validation and normalization
//! - [`backup`]: Timestamped pre-save snapshots
//! - [`autosave`]: Periodic save scheduling and the save guard
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod autosave;
pub mod backup;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod store;
pub mod validate;
