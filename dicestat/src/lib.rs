// dicestat/src/lib.rs
//! # dicestat CLI Application
//!
//! This crate provides the terminal interface for the dicestat core library:
//! argument parsing, the interactive prompt loop, and console rendering of
//! simulation results.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;
