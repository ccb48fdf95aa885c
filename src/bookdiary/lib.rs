//! # Bookdiary Architecture
//!
//! Bookdiary keeps a catalogue of books and, per book, a dated reading diary. The
//! library is UI-agnostic: the bundled terminal client is one front-end, and any other
//! front-end would drive the same [`api::BookManager`].
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, validates input, prints tables         │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - BookManager: the repository facade                       │
//! │  - Dispatches to commands, saves after every mutation       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs) over Library (library.rs)    │
//! │  - Referential integrity, search, ordering                  │
//! │  - No storage, no I/O                                       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - DataStore trait over one JSON document                   │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes plain Rust values and returns `Result`s. It never
//! prints and never exits. Diagnostics go through `tracing`; the binary decides where
//! they end up.
//!
//! ## Module Overview
//!
//! - [`api`]: `BookManager`, entry point for all operations
//! - [`commands`]: Repository rules for books and diary entries
//! - [`library`]: In-memory aggregate with insertion order and the diary index
//! - [`model`]: `Book`, `Diary` and their on-disk records
//! - [`store`]: Persistence abstraction and implementations
//! - [`config`]: Configuration and data file resolution
//! - [`validation`]: Input checks for front-ends
//! - [`rows`]: Table-view records for front-ends
//! - [`error`]: Error types
//! - `cli`: Argument parsing and printing for the binary (not part of the lib API)

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod library;
pub mod model;
pub mod rows;
pub mod store;
pub mod validation;
