// File: src/mapper.rs
// Purpose: Walk a domain value and a form value in lockstep, filling inputs and errors

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use anyhow::Result as AnyResult;

use crate::config::MapperConfig;
use crate::convert::ConverterRegistry;
use crate::error::{MapError, Result};
use crate::form::{FormNode, FormRecord, FormSeq, FormValue, InputField};
use crate::overrides::{value_override, FieldConverter, Override, OverrideRegistry};
use crate::path;
use crate::validation::ErrorLookup;
use crate::value::{DomainNode, DomainRecord, DomainSeq, DomainValue};

/// Field name that excludes a domain field from mapping
const EXCLUDED: &str = "-";

/// Maps domain values onto forms.
///
/// Holds the converter registry (by type) and the override registry (by field
/// path). Populate both at setup; `map` only reads them, so a configured
/// mapper can be shared across threads.
///
/// # Example
///
/// ```ignore
/// let mut mapper = Mapper::new();
/// mapper.register_field_converter("price", |v| {
///     v.downcast_ref::<f64>().map(|p| format!("${:.2}", p)).unwrap_or_default()
/// });
///
/// let errors = rusty_formmap::validation::garde::validate(&product);
/// let mut form = ProductForm::default();
/// mapper.map(&product, &errors, &mut form)?;
/// ```
#[derive(Debug, Clone)]
pub struct Mapper {
    converters: ConverterRegistry,
    overrides: OverrideRegistry,
    config: MapperConfig,
}

impl Default for Mapper {
    fn default() -> Self {
        Self::new()
    }
}

impl Mapper {
    /// Mapper with the default configuration and built-in converters
    pub fn new() -> Self {
        Self::with_config(MapperConfig::default())
    }

    pub fn with_config(config: MapperConfig) -> Self {
        Self {
            converters: ConverterRegistry::with_builtins(&config.temporal),
            overrides: OverrideRegistry::new(),
            config,
        }
    }

    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    pub fn converters(&self) -> &ConverterRegistry {
        &self.converters
    }

    pub fn overrides(&self) -> &OverrideRegistry {
        &self.overrides
    }

    /// Render every `T` with `converter`, replacing the built-in rendering for that exact type
    pub fn register_converter<T, F>(&mut self, converter: F)
    where
        T: DomainValue,
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        self.converters.register::<T, F>(converter);
    }

    /// Take over mapping of the field at `path` (and everything below it)
    pub fn register_override<F>(&mut self, path: impl Into<String>, f: F)
    where
        F: Fn(&dyn DomainValue, &mut dyn FormValue, &str, &dyn ErrorLookup) -> AnyResult<()>
            + Send
            + Sync
            + 'static,
    {
        self.overrides.register(path, f);
    }

    /// Render the field at `path` with `converter`; its error is still looked up by path
    pub fn register_field_converter<F>(&mut self, path: impl Into<String>, converter: F)
    where
        F: Fn(&dyn DomainValue) -> String + Send + Sync + 'static,
    {
        self.overrides.insert(path, value_override(Arc::new(converter)));
    }

    /// Display string for a single value, as the mapper would write it
    pub fn convert(&self, value: &dyn DomainValue) -> String {
        self.converters.convert(value)
    }

    /// Fill `form` from `domain`, attaching the messages `errors` has for each path.
    ///
    /// Both sides must be records, optionally behind one `Option`. Fields
    /// without a same-named counterpart, or whose shapes differ, are left as
    /// they are. Stops at the first failing override.
    pub fn map(
        &self,
        domain: &dyn DomainValue,
        errors: &dyn ErrorLookup,
        form: &mut dyn FormValue,
    ) -> Result<()> {
        self.map_with_options(domain, errors, form, &MapOptions::default())
    }

    /// Like [`map`](Self::map), with per-call field converters and exclusions
    pub fn map_with_options(
        &self,
        domain: &dyn DomainValue,
        errors: &dyn ErrorLookup,
        form: &mut dyn FormValue,
        options: &MapOptions,
    ) -> Result<()> {
        let domain = root_domain(domain)?;
        let form = root_form(form)?;

        let walk = Walk {
            mapper: self,
            errors,
            options,
            call_overrides: options
                .field_converters
                .iter()
                .map(|(path, converter)| (path.as_str(), value_override(Arc::clone(converter))))
                .collect(),
        };

        tracing::trace!(
            overrides = self.overrides.len(),
            field_converters = walk.call_overrides.len(),
            "mapping record"
        );
        walk.record(domain, form, "")
    }
}

/// Per-call additions to a [`Mapper`]
#[derive(Clone, Default)]
pub struct MapOptions {
    /// Converters by exact field path; these win over registered overrides
    pub field_converters: HashMap<String, FieldConverter>,
    /// Field paths left untouched (exact match)
    pub skip_fields: HashSet<String>,
}

impl MapOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field_converter<F>(mut self, path: impl Into<String>, converter: F) -> Self
    where
        F: Fn(&dyn DomainValue) -> String + Send + Sync + 'static,
    {
        self.field_converters.insert(path.into(), Arc::new(converter));
        self
    }

    pub fn skip(mut self, path: impl Into<String>) -> Self {
        self.skip_fields.insert(path.into());
        self
    }
}

impl std::fmt::Debug for MapOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut converters: Vec<&String> = self.field_converters.keys().collect();
        converters.sort();
        f.debug_struct("MapOptions")
            .field("field_converters", &converters)
            .field("skip_fields", &self.skip_fields)
            .finish()
    }
}

fn root_domain(domain: &dyn DomainValue) -> Result<&dyn DomainRecord> {
    let domain = match domain.node() {
        DomainNode::Ref(Some(inner)) => inner,
        DomainNode::Ref(None) => {
            return Err(MapError::InvalidArgument("domain cannot be None".to_string()));
        }
        _ => domain,
    };

    match domain.node() {
        DomainNode::Record(record) => Ok(record),
        _ => Err(MapError::InvalidArgument("domain must be a record".to_string())),
    }
}

fn root_form(form: &mut dyn FormValue) -> Result<&mut dyn FormRecord> {
    match form.node_mut() {
        FormNode::Record(record) => Ok(record),
        FormNode::Ref(slot) => match slot.get_mut().map(|target| target.node_mut()) {
            Some(FormNode::Record(record)) => Ok(record),
            Some(_) => Err(MapError::InvalidArgument("form must be a record".to_string())),
            None => Err(MapError::InvalidArgument("form cannot be None".to_string())),
        },
        _ => Err(MapError::InvalidArgument("form must be a record".to_string())),
    }
}

/// State for one `map` call
struct Walk<'a> {
    mapper: &'a Mapper,
    errors: &'a dyn ErrorLookup,
    options: &'a MapOptions,
    call_overrides: HashMap<&'a str, Override>,
}

impl Walk<'_> {
    fn record(&self, domain: &dyn DomainRecord, form: &mut dyn FormRecord, parent: &str) -> Result<()> {
        for (name, value) in domain.fields() {
            if name == EXCLUDED {
                continue;
            }

            let path = path::field(parent, name);
            if self.is_skipped(&path) {
                tracing::trace!(path = %path, "field excluded");
                continue;
            }

            let Some(target) = form.field_mut(name) else {
                tracing::trace!(path = %path, "no form field");
                continue;
            };

            if self.apply_override(value, target, &path)? {
                continue;
            }
            self.field(value, target, &path)?;
        }
        Ok(())
    }

    /// Run the override for `path`, if any. Per-call converters are checked first.
    fn apply_override(&self, domain: &dyn DomainValue, form: &mut dyn FormValue, path: &str) -> Result<bool> {
        let custom = self
            .call_overrides
            .get(path)
            .or_else(|| self.mapper.overrides.get(path));

        let Some(custom) = custom else {
            return Ok(false);
        };

        tracing::trace!(path, "applying override");
        custom(domain, form, path, self.errors).map_err(|source| MapError::OverrideFailed {
            path: path.to_string(),
            source,
        })?;
        Ok(true)
    }

    /// Dispatch on the form field's shape
    fn field(&self, domain: &dyn DomainValue, form: &mut dyn FormValue, path: &str) -> Result<()> {
        match form.node_mut() {
            FormNode::Input(input) => {
                self.input(domain, input, path);
                Ok(())
            }
            FormNode::Seq(items) => match domain.node() {
                DomainNode::Seq(values) => self.seq(values, items, path),
                _ => {
                    tracing::trace!(path, "shape mismatch, expected a sequence");
                    Ok(())
                }
            },
            FormNode::Record(record) => match domain.node() {
                DomainNode::Record(fields) => self.record(fields, record, path),
                _ => {
                    tracing::trace!(path, "shape mismatch, expected a record");
                    Ok(())
                }
            },
            FormNode::Ref(slot) => match domain.node() {
                DomainNode::Ref(None) => {
                    slot.clear();
                    Ok(())
                }
                DomainNode::Ref(Some(inner)) => {
                    if slot.is_absent() {
                        tracing::trace!(path, "allocating form value");
                    }
                    // Indirection does not extend the path
                    self.field(inner, slot.get_or_insert_default(), path)
                }
                _ => {
                    tracing::trace!(path, "shape mismatch, expected an optional value");
                    Ok(())
                }
            },
        }
    }

    fn seq(&self, domain: &dyn DomainSeq, form: &mut dyn FormSeq, path: &str) -> Result<()> {
        let len = domain.len();
        if form.len() != len {
            tracing::debug!(path, from = form.len(), to = len, "resizing form sequence");
            form.reset(len);
        }

        for i in 0..len {
            let (Some(value), Some(target)) = (domain.get(i), form.get_mut(i)) else {
                continue;
            };
            let path = path::index(path, i);
            if self.is_skipped(&path) {
                tracing::trace!(path = %path, "element excluded");
                continue;
            }

            if self.apply_override(value, target, &path)? {
                continue;
            }

            match target.node_mut() {
                FormNode::Input(input) => self.input(value, input, &path),
                FormNode::Record(record) => match value.node() {
                    DomainNode::Record(fields) => self.record(fields, record, &path)?,
                    _ => {
                        tracing::trace!(path = %path, "shape mismatch, expected a record");
                    }
                },
                _ => {
                    tracing::trace!(path = %path, "unsupported sequence element");
                }
            }
        }
        Ok(())
    }

    /// Write value and error together
    fn input(&self, domain: &dyn DomainValue, input: &mut InputField, path: &str) {
        input.set(self.mapper.convert(domain), self.errors.message_for(path));
    }

    fn is_skipped(&self, path: &str) -> bool {
        self.options.skip_fields.contains(path)
            || self.mapper.config.mapping.skip_fields.iter().any(|p| p == path)
    }
}
