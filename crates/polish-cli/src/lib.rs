//! Command-line front ends for Polish.
//!
//! - `polish` runs a bytecode file on the VM
//! - `polishc` assembles source into a bytecode file

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod cli;
pub mod commands;
