use thiserror::Error;

use crate::schema::ColumnType;

/// Failures surfaced by the method lifecycle.
///
/// Initialization reports `Validation`, `UnknownColumn`, or `ParameterParse`;
/// `execute` reports `NotInitialized` or passes an algorithm failure through
/// as `Execution`. Nothing is retried at this layer.
#[derive(Debug, Error)]
pub enum MethodError {
    #[error("invalid port mapping: {0}")]
    Validation(String),

    #[error("column '{0}' does not exist in the dataset")]
    UnknownColumn(String),

    #[error("column '{0}' is already declared")]
    DuplicateColumn(String),

    #[error("parameter '{id}': failed to parse '{raw}' as {datatype}")]
    ParameterParse {
        id: String,
        raw: String,
        datatype: ColumnType,
    },

    #[error("execute() requires a successfully initialized method")]
    NotInitialized,

    #[error(transparent)]
    Execution(#[from] anyhow::Error),
}
