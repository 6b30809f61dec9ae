//! Report generation for ranking results
//!
//! Three generators turn a [`RankedResult`](crate::ranking::RankedResult) into output,
//! each accessed through a `generate` function:
//! - **Console**: a ranked table for the chosen window, colored by trend and fitted to the terminal
//! - **CSV**: one row per package with every window's statistics
//! - **JSON**: structured data, optionally with each package's daily series
//!
//! Number formatting and window labels shared by the generators live in `common`.

mod common;
mod console;
mod csv;
mod json;

pub use console::generate as generate_console;
pub use csv::generate as generate_csv;
pub use json::generate as generate_json;
