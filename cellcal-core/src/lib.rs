//! Core types and orchestration for the cellcal ecosystem.
//!
//! This crate provides everything needed to attach reminders and tasks to
//! spreadsheet cells and keep them in sync with a calendar:
//! - `Record` and related types for cell-bound reminders/tasks
//! - `RecordStore` for document-scoped persistence via a property bag
//! - `Reminders` orchestrator coordinating calendar events and records
//! - `protocol` module for the provider subprocess protocol

pub mod calendar;
pub mod cell;
pub mod config;
pub mod error;
pub mod format;
pub mod notification;
pub mod protocol;
pub mod provider;
pub mod record;
pub mod recurrence;
pub mod reminders;
pub mod spreadsheet;
pub mod store;

pub use error::{CellCalError, CellCalResult};
