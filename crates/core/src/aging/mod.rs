//! Aging module - bucket schemes and days-overdue classification.

mod aging_classifier;
mod aging_model;
mod scheme_registry;

#[cfg(test)]
mod aging_model_tests;

pub use aging_classifier::{classify, classify_receivable};
pub use aging_model::{AgingBucket, AgingClassification, BucketScheme, SchemeDefinition};
pub use scheme_registry::SchemeRegistry;
