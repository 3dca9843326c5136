//! Parameter declaration and override resolution.
//!
//! A method optionally declares named, typed parameters with default values.
//! At initialization the caller may supply raw-text overrides; [`resolve()`]
//! parses each override against its declared type or falls back to the
//! default when the override is absent. Override keys without a matching
//! declaration are ignored: overrides are a sparse patch, not a full
//! replacement.

use std::collections::BTreeMap;

use anyhow::{Result, ensure};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    data::{Value, parse_typed_value},
    error::MethodError,
    schema::ColumnType,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParameterDeclaration {
    pub id: String,
    pub datatype: ColumnType,
    pub default: Value,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ParameterDeclarations {
    declarations: Vec<ParameterDeclaration>,
}

impl ParameterDeclarations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare(
        &mut self,
        id: impl Into<String>,
        datatype: ColumnType,
        default: Value,
    ) -> Result<()> {
        let id = id.into();
        ensure!(self.get(&id).is_none(), "Parameter '{id}' is already declared");
        ensure!(
            default.datatype() == datatype,
            "Default for parameter '{id}' must be of type {datatype}, got {}",
            default.datatype()
        );
        self.declarations.push(ParameterDeclaration {
            id,
            datatype,
            default,
        });
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&ParameterDeclaration> {
        self.declarations.iter().find(|d| d.id == id)
    }

    /// Declarations in the order they were made; resolution preserves it.
    pub fn declarations(&self) -> &[ParameterDeclaration] {
        &self.declarations
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParameterValue {
    pub id: String,
    pub value: Value,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterValues {
    values: Vec<ParameterValue>,
}

impl ParameterValues {
    pub fn get(&self, id: &str) -> Option<&Value> {
        self.values.iter().find(|v| v.id == id).map(|v| &v.value)
    }

    pub fn text(&self, id: &str) -> Option<&str> {
        match self.get(id) {
            Some(Value::String(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn integer(&self, id: &str) -> Option<i64> {
        match self.get(id) {
            Some(Value::Integer(i)) => Some(*i),
            _ => None,
        }
    }

    pub fn float(&self, id: &str) -> Option<f64> {
        match self.get(id) {
            Some(Value::Float(f)) => Some(*f),
            _ => None,
        }
    }

    pub fn boolean(&self, id: &str) -> Option<bool> {
        match self.get(id) {
            Some(Value::Boolean(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn values(&self) -> &[ParameterValue] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Resolves every declared parameter to a typed value.
///
/// Overrides are parsed against the declared type; a parse failure is fatal
/// and nothing is resolved. Absent overrides take the declared default. The
/// returned set is complete or the call fails, so callers never observe a
/// partially resolved state.
pub fn resolve(
    declarations: &ParameterDeclarations,
    overrides: &BTreeMap<String, String>,
) -> Result<ParameterValues, MethodError> {
    let ignored = overrides
        .keys()
        .filter(|key| declarations.get(key).is_none())
        .count();
    if ignored > 0 {
        debug!("Ignoring {ignored} override(s) without a matching declaration");
    }

    let mut values = Vec::with_capacity(declarations.len());
    for declaration in declarations.declarations() {
        let value = match overrides.get(&declaration.id) {
            Some(raw) => parse_typed_value(raw, &declaration.datatype).map_err(|_| {
                MethodError::ParameterParse {
                    id: declaration.id.clone(),
                    raw: raw.clone(),
                    datatype: declaration.datatype.clone(),
                }
            })?,
            None => declaration.default.clone(),
        };
        values.push(ParameterValue {
            id: declaration.id.clone(),
            value,
        });
    }
    Ok(ParameterValues { values })
}
