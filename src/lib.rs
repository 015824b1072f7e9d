//! CRM maintenance library
//!
//! Scheduled jobs that keep the CRM data store tidy: the inactive customer
//! sweeper, the weekly order reminder log and the heartbeat probe.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod activity_log;
pub mod commands;
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod jobs;
pub mod migrator;

pub use activity_log::ActivityLog;
pub use errors::{AppError, ServiceError};
