//! medcalc-cli library root.
//!
//! The `medcalc` binary is a thin shell over these modules so integration
//! tests can drive commands against an in-memory writer.

pub mod cli;
pub mod commands;
pub mod config;
pub mod input;
