//! Formatting helpers and loan calculators for the Home Loan Toolkit.
//!
//! `format_currency` renders whole rupees with en-IN grouping
//! (`Rs 12,34,567`), `format_number` renders fixed precision with Western
//! grouping (`1,234,567.89`). The two conventions are deliberately kept apart.

pub mod cli;
pub mod helper;
pub mod loan;
pub mod logger;
pub mod ready;

pub use helper::{
    format_currency, format_number, format_number_default, group_digits, DecimalExt, Grouping,
};
pub use ready::{on_ready, ReadyHook};
