#![warn(clippy::all, missing_docs)]

//! Core domain logic for PlayLedger.
//!
//! This crate hosts the scoring rubric configuration, the evaluation
//! engine, the game ledger with its mutation commands, the two view
//! rankings, and the persistence/export layers used by the terminal UI
//! and any future frontends.

pub mod collate;
pub mod config;
pub mod dates;
pub mod engine;
pub mod export;
pub mod ledger;
pub mod models;
pub mod rank;
pub mod rubric;
pub mod storage;

pub use config::AppConfig;
pub use engine::{compute_total, verdict, ScoreSheet};
pub use ledger::{Ledger, LedgerError, PendingEvaluation};
pub use models::{Evaluation, Game, Status};
pub use rubric::{Criterion, Rubric, RubricVariant};
pub use storage::GameStore;
