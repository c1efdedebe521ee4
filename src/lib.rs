//! Formula-aware spreadsheet range copy service.
//!
//! The core copies a rectangular block of cells from a source workbook into a
//! destination workbook at a row resolved by text-based anchor search,
//! rewriting relative cell references inside copied formulas so they stay
//! correct at the paste location. Everything around it (Graph transport,
//! HTTP surface, CLI) is thin glue.

pub mod anchor;
pub mod cli;
pub mod config;
pub mod copy;
pub mod errors;
pub mod formula;
pub mod graph;
pub mod server;
pub mod state;
