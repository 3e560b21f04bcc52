//! The tools module provides the helpers around the huffzip codec.
//!
//! The tools are:
//! - cli: Command line interface and run options.
//! - freq_count: Frequency count of the input bytes.
//!
pub mod cli;
pub mod freq_count;
