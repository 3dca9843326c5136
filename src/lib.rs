//! Contract and lifecycle for pluggable analytics methods: given a tabular
//! dataset, a port mapping, and optional parameter overrides, validate, bind,
//! resolve, and execute, producing a tabular output dataset.

pub mod data;
pub mod dataset;
pub mod error;
pub mod mapping;
pub mod method;
pub mod params;
pub mod schema;
