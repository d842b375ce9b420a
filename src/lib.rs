//! Childcare Benefit Engine
//!
//! This crate computes Japanese childcare leave benefit amounts: the
//! standard 67%/50% benefit with its per-month caps, and the optional 13%
//! postpartum top-up grant, from an average salary, a leave date range and
//! two eligibility flags.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod intake;
pub mod models;
