//! Helper functions shared by the content repository and the CLI

pub mod date;

pub use date::{format_date, parse_date_string};
