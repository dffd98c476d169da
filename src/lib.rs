//! DROS Contest Scoring Engine
//!
//! This crate scores firearm-dealer sales staff for the DROS (Dealer Record
//! of Sale) sales contest. Each employee's DROS volume and audit findings
//! become a severity-weighted error rate and a qualification status, and
//! employees are ranked on a leaderboard.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod store;
pub mod telemetry;
