//! Caller-supplied correspondence between source columns and input ports.
//!
//! A [`PortMapping`] is an ordered list of [`PortBinding`]s; each binding
//! names a column of the caller's dataset and the method input port its data
//! should be copied into. Mappings are validated against the method's input
//! schema before any data moves (see `Dataset::validate_mapping`).

use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PortBinding {
    pub source_column: String,
    pub input_port: String,
}

impl PortBinding {
    pub fn new(source_column: impl Into<String>, input_port: impl Into<String>) -> Self {
        Self {
            source_column: source_column.into(),
            input_port: input_port.into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PortMapping {
    entries: Vec<PortBinding>,
}

impl PortMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a binding and returns the mapping for chained construction.
    pub fn bind(
        mut self,
        source_column: impl Into<String>,
        input_port: impl Into<String>,
    ) -> Self {
        self.entries.push(PortBinding::new(source_column, input_port));
        self
    }

    pub fn push(&mut self, binding: PortBinding) {
        self.entries.push(binding);
    }

    pub fn entries(&self) -> &[PortBinding] {
        &self.entries
    }

    pub fn covers_port(&self, input_port: &str) -> bool {
        self.entries.iter().any(|b| b.input_port == input_port)
    }

    /// Source column bound to `input_port`, if any. Later bindings win,
    /// matching the bind order applied during initialization.
    pub fn source_for(&self, input_port: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|b| b.input_port == input_port)
            .map(|b| b.source_column.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for PortMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.entries
                .iter()
                .map(|b| format!("{} -> {}", b.source_column, b.input_port))
                .join(", ")
        )
    }
}

/// Outcome of checking a mapping against a method's input schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    valid: bool,
    message: String,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            valid: true,
            message: "Mapping covers all mandatory input ports".to_string(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: message.into(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn into_message(self) -> String {
        self.message
    }
}
