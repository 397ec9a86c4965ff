// File: src/overrides.rs
// Purpose: Path-keyed custom mapping that replaces default traversal

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use anyhow::{bail, Result};

use crate::form::FormValue;
use crate::validation::ErrorLookup;
use crate::value::DomainValue;

/// Custom mapping for one field path.
///
/// Receives the domain value, the form value, the path and the error lookup.
/// It is responsible for writing the form value; the walker does not descend
/// below a path that has an override.
pub type Override =
    Arc<dyn Fn(&dyn DomainValue, &mut dyn FormValue, &str, &dyn ErrorLookup) -> Result<()> + Send + Sync>;

/// Value-only conversion for one field path; errors are still resolved by path
pub type FieldConverter = Arc<dyn Fn(&dyn DomainValue) -> String + Send + Sync>;

/// Wrap a field converter into an override that writes the converted value
/// and the message the error lookup has for the path.
///
/// Fails when the form value at the path is not an [`InputField`](crate::InputField).
pub fn value_override(converter: FieldConverter) -> Override {
    Arc::new(
        move |domain: &dyn DomainValue,
              form: &mut dyn FormValue,
              path: &str,
              errors: &dyn ErrorLookup|
              -> Result<()> {
            let Some(input) = form.as_input_mut() else {
                bail!("form field at {} is not an input field", path);
            };
            input.set(converter(domain), errors.message_for(path));
            Ok(())
        },
    )
}

/// Overrides keyed by exact field path (no wildcards, no prefixes)
#[derive(Clone, Default)]
pub struct OverrideRegistry {
    overrides: HashMap<String, Override>,
}

impl OverrideRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `f` for `path`, replacing any previous override there
    pub fn register<F>(&mut self, path: impl Into<String>, f: F)
    where
        F: Fn(&dyn DomainValue, &mut dyn FormValue, &str, &dyn ErrorLookup) -> Result<()>
            + Send
            + Sync
            + 'static,
    {
        self.insert(path, Arc::new(f));
    }

    pub fn insert(&mut self, path: impl Into<String>, f: Override) {
        let path = path.into();
        tracing::debug!(path = %path, "registered field override");
        self.overrides.insert(path, f);
    }

    pub fn get(&self, path: &str) -> Option<&Override> {
        self.overrides.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.overrides.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }
}

impl fmt::Debug for OverrideRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut paths: Vec<&String> = self.overrides.keys().collect();
        paths.sort();
        f.debug_struct("OverrideRegistry").field("paths", &paths).finish()
    }
}
