// File: src/convert.rs
// Purpose: Type-keyed conversion of leaf values to display strings

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt::{self, Write};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, FixedOffset, SecondsFormat, TimeDelta, TimeZone, Utc};

use crate::config::TemporalConfig;
use crate::value::{DomainNode, DomainValue};

/// Type-erased conversion function stored in the registry
pub type Converter = Arc<dyn Fn(&dyn DomainValue) -> String + Send + Sync>;

/// Display-string conversion with per-type overrides.
///
/// Resolution for a value:
/// 1. an absent `Option` renders `""`; a present one is unwrapped
/// 2. zero values render `""`, except `false`
/// 3. a converter registered for the exact type wins
/// 4. otherwise the built-in rendering for the value's kind
#[derive(Clone, Default)]
pub struct ConverterRegistry {
    converters: HashMap<TypeId, Converter>,
}

impl ConverterRegistry {
    /// Empty registry, built-in kind rendering only
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the duration and instant converters installed
    pub fn with_builtins(config: &TemporalConfig) -> Self {
        let mut registry = Self::new();

        let unit = config.duration_unit;
        registry.register::<Duration, _>(move |d| {
            let seconds = i64::try_from(d.as_secs()).unwrap_or(i64::MAX);
            unit.whole_units(seconds).to_string()
        });
        registry.register::<TimeDelta, _>(move |d| unit.whole_units(d.num_seconds()).to_string());

        let format = config.time_format.clone();
        registry.register::<DateTime<Utc>, _>({
            let format = format.clone();
            move |t| format_instant(t, format.as_deref())
        });
        registry.register::<DateTime<FixedOffset>, _>(move |t| format_instant(t, format.as_deref()));

        registry
    }

    /// Register `converter` for values of exactly type `T`, replacing any previous one
    pub fn register<T, F>(&mut self, converter: F)
    where
        T: DomainValue,
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        let erased: Converter = Arc::new(move |value: &dyn DomainValue| {
            value.downcast_ref::<T>().map(&converter).unwrap_or_default()
        });
        self.converters.insert(TypeId::of::<T>(), erased);
        tracing::debug!(ty = std::any::type_name::<T>(), "registered value converter");
    }

    pub fn contains<T: Any>(&self) -> bool {
        self.converters.contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.converters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }

    /// Display string for `value`. Never fails; unrenderable input yields `""`.
    pub fn convert(&self, value: &dyn DomainValue) -> String {
        let value = match value.node() {
            DomainNode::Ref(None) => return String::new(),
            DomainNode::Ref(Some(inner)) => inner,
            _ => value,
        };

        let node = value.node();
        let is_bool = matches!(&node, DomainNode::Scalar(scalar) if scalar.is_bool());
        if !is_bool && value.is_zero() {
            return String::new();
        }

        if let Some(converter) = self.converters.get(&value.as_any().type_id()) {
            return converter(value);
        }

        match node {
            DomainNode::Scalar(scalar) => scalar.render(),
            DomainNode::Ref(inner) => inner.map(|v| self.convert(v)).unwrap_or_default(),
            DomainNode::Seq(seq) => {
                let items: Vec<String> = (0..seq.len())
                    .filter_map(|i| seq.get(i))
                    .map(|v| self.convert(v))
                    .collect();
                format!("[{}]", items.join(" "))
            }
            DomainNode::Record(record) => {
                let fields: Vec<String> = record
                    .fields()
                    .into_iter()
                    .map(|(_, v)| self.convert(v))
                    .collect();
                format!("{{{}}}", fields.join(" "))
            }
        }
    }
}

impl fmt::Debug for ConverterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConverterRegistry")
            .field("converters", &self.converters.len())
            .finish()
    }
}

/// RFC 3339 (or `format`) rendering of an instant; the epoch renders as `""`
fn format_instant<Tz>(instant: &DateTime<Tz>, format: Option<&str>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    if instant.timestamp() == 0 && instant.timestamp_subsec_nanos() == 0 {
        return String::new();
    }

    match format {
        None => instant.to_rfc3339_opts(SecondsFormat::Secs, true),
        Some(format) => {
            let mut out = String::new();
            if write!(out, "{}", instant.format(format)).is_err() {
                return String::new();
            }
            out
        }
    }
}
