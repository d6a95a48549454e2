//! Fitsim CLI library.
//!
//! Catalog resolution, output format selection, and terminal styling used by
//! the `fitsim` binary.

pub mod config;
pub mod output;
pub mod terminal;
