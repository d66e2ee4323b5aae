//! Registry of named bucket schemes, built-ins plus schemes loaded from JSON.

use std::path::Path;

use log::{debug, info};

use super::aging_model::BucketScheme;
use crate::errors::ValidationError;
use crate::{Error, Result};

/// Named lookup of bucket schemes.
///
/// Starts with the built-in `standard` and `escalation` schemes; extra
/// schemes registered under an existing name replace it.
#[derive(Debug, Clone)]
pub struct SchemeRegistry {
    schemes: Vec<BucketScheme>,
}

impl Default for SchemeRegistry {
    fn default() -> Self {
        Self {
            schemes: vec![BucketScheme::standard(), BucketScheme::escalation()],
        }
    }
}

impl SchemeRegistry {
    /// Builds a registry from the built-ins plus the schemes in a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::ConfigIO(format!("cannot read {}: {}", path.display(), e))
        })?;
        let mut registry = Self::default();
        let added = registry.load_json(&contents)?;
        info!("Loaded {} bucket scheme(s) from {}", added, path.display());
        Ok(registry)
    }

    /// Registers every scheme of a JSON array. Returns how many were read.
    pub fn load_json(&mut self, json: &str) -> Result<usize> {
        let schemes: Vec<BucketScheme> = serde_json::from_str(json)
            .map_err(|e| Error::InvalidScheme(e.to_string()))?;
        let count = schemes.len();
        for scheme in schemes {
            self.register(scheme);
        }
        Ok(count)
    }

    pub fn register(&mut self, scheme: BucketScheme) {
        debug!("Registering bucket scheme '{}'", scheme.name());
        match self.schemes.iter_mut().find(|s| s.name() == scheme.name()) {
            Some(existing) => *existing = scheme,
            None => self.schemes.push(scheme),
        }
    }

    pub fn get(&self, name: &str) -> Result<&BucketScheme> {
        self.schemes
            .iter()
            .find(|s| s.name() == name)
            .ok_or_else(|| Error::Validation(ValidationError::UnknownScheme(name.to_string())))
    }

    pub fn list(&self) -> &[BucketScheme] {
        &self.schemes
    }
}
