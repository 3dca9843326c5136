//! Ordered tabular container binding column schemas to column data.
//!
//! A [`Dataset`] holds uniquely named [`Column`]s in declaration order. The
//! method lifecycle uses one dataset for declared input ports and one for
//! output ports; callers supply a third as the data source. Row-count
//! consistency across columns is the data producer's responsibility.

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    data::Value,
    error::MethodError,
    mapping::{PortMapping, ValidationResult},
    schema::ColumnSchema,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Column {
    schema: ColumnSchema,
    #[serde(default)]
    data: Vec<Value>,
}

impl Column {
    pub fn new(schema: ColumnSchema) -> Self {
        Self {
            schema,
            data: Vec::new(),
        }
    }

    pub fn schema(&self) -> &ColumnSchema {
        &self.schema
    }

    pub fn data(&self) -> &[Value] {
        &self.data
    }

    pub fn set_data(&mut self, data: Vec<Value>) {
        self.data = data;
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Dataset {
    columns: Vec<Column>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a dataset declaring one empty column per schema.
    pub fn from_schemas(
        schemas: impl IntoIterator<Item = ColumnSchema>,
    ) -> Result<Self, MethodError> {
        let mut dataset = Self::new();
        for schema in schemas {
            dataset.add_column(schema)?;
        }
        Ok(dataset)
    }

    pub fn add_column(&mut self, schema: ColumnSchema) -> Result<(), MethodError> {
        if self.column_index(&schema.id).is_some() {
            return Err(MethodError::DuplicateColumn(schema.id));
        }
        self.columns.push(Column::new(schema));
        Ok(())
    }

    pub fn column_index(&self, id: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.schema.id == id)
    }

    pub fn column(&self, id: &str) -> Result<&Column, MethodError> {
        self.column_index(id)
            .map(|idx| &self.columns[idx])
            .ok_or_else(|| MethodError::UnknownColumn(id.to_string()))
    }

    pub fn set_column_data(&mut self, id: &str, data: Vec<Value>) -> Result<(), MethodError> {
        let idx = self
            .column_index(id)
            .ok_or_else(|| MethodError::UnknownColumn(id.to_string()))?;
        self.columns[idx].set_data(data);
        Ok(())
    }

    /// Schema descriptors of every column, in declaration order.
    pub fn column_schemas(&self) -> Vec<&ColumnSchema> {
        self.columns.iter().map(|c| &c.schema).collect()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Checks a caller mapping against this dataset's declared ports.
    ///
    /// Fails on the first unknown input port or uncovered mandatory port;
    /// whether the mapped source columns exist is re-checked during binding.
    pub fn validate_mapping(&self, mapping: &PortMapping) -> ValidationResult {
        for binding in mapping.entries() {
            if self.column_index(&binding.input_port).is_none() {
                return ValidationResult::invalid(format!(
                    "Mapping references unknown input port '{}'. Declared ports: {}",
                    binding.input_port,
                    self.columns.iter().map(|c| c.schema.id.as_str()).join(", ")
                ));
            }
        }
        for column in &self.columns {
            if column.schema.required && !mapping.covers_port(&column.schema.id) {
                return ValidationResult::invalid(format!(
                    "Mandatory input port '{}' is not covered by the mapping",
                    column.schema.id
                ));
            }
        }
        ValidationResult::ok()
    }
}
