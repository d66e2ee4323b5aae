//! Dates module - raw due-date representations and their normalization.

mod date_normalizer;
mod dates_model;

pub use date_normalizer::{days_between, normalize_date, normalize_text};
pub use dates_model::{NormalizedDate, RawDate};
