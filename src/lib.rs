//! datasnap library
//!
//! Downloads Kaggle datasets into a local data layout and previews the
//! leading rows of CSV files. Backs the `datasnap` CLI.

pub mod commands;
pub mod core;
pub mod error;
pub mod logging;
pub mod utils;
