#![allow(dead_code)]

use std::io::{Cursor, Read};
use std::sync::OnceLock;

use analytics_methods::data::Value;
use analytics_methods::dataset::Dataset;
use analytics_methods::mapping::PortMapping;
use analytics_methods::method::{Algorithm, AnalyticsMethod};
use analytics_methods::params::{ParameterDeclarations, ParameterValues};
use analytics_methods::schema::{ColumnSchema, ColumnType};

static LOGGER: OnceLock<()> = OnceLock::new();

/// Installs the test logger once for the whole test binary.
pub fn init_logging() {
    LOGGER.get_or_init(|| {
        let _ = env_logger::Builder::from_env(env_logger::Env::default())
            .is_test(true)
            .try_init();
    });
}

pub const MODEL_XML: &[u8] =
    b"<PMML version=\"4.2\"><Header/><ClusteringModel modelName=\"audit\"/></PMML>";

/// Writes the length of every string bound to the `text` input port into the
/// `length` output port. Ships an in-memory PMML descriptor.
pub struct WordLength;

impl Algorithm for WordLength {
    fn run(
        &mut self,
        input: &Dataset,
        _parameters: &ParameterValues,
        output: &mut Dataset,
    ) -> anyhow::Result<()> {
        let lengths = input
            .column("text")?
            .data()
            .iter()
            .map(|value| Value::Integer(value.as_display().len() as i64))
            .collect();
        output.set_column_data("length", lengths)?;
        Ok(())
    }

    fn has_pmml(&self) -> bool {
        true
    }

    fn pmml_stream(&self) -> Option<Box<dyn Read + '_>> {
        Some(Box::new(Cursor::new(MODEL_XML)))
    }
}

/// Multiplies the `amount` input column by the `factor` parameter. Declares
/// no predictive model.
pub struct ScaleAmounts;

impl Algorithm for ScaleAmounts {
    fn run(
        &mut self,
        input: &Dataset,
        parameters: &ParameterValues,
        output: &mut Dataset,
    ) -> anyhow::Result<()> {
        let factor = parameters.integer("factor").unwrap_or(1);
        let scaled = input
            .column("amount")?
            .data()
            .iter()
            .map(|value| match value {
                Value::Integer(i) => Ok(Value::Integer(i * factor)),
                other => anyhow::bail!("expected integer amount, got {other}"),
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        output.set_column_data("scaled", scaled)?;
        Ok(())
    }
}

pub fn word_length_method() -> AnalyticsMethod<WordLength> {
    let input = Dataset::from_schemas([ColumnSchema::new("text", ColumnType::String, true)])
        .expect("input schema");
    let output = Dataset::from_schemas([ColumnSchema::new("length", ColumnType::Integer, false)])
        .expect("output schema");
    AnalyticsMethod::new(WordLength, input, output)
}

pub fn scale_method() -> AnalyticsMethod<ScaleAmounts> {
    let input = Dataset::from_schemas([ColumnSchema::new("amount", ColumnType::Integer, true)])
        .expect("input schema");
    let output = Dataset::from_schemas([ColumnSchema::new("scaled", ColumnType::Integer, false)])
        .expect("output schema");
    let mut declarations = ParameterDeclarations::new();
    declarations
        .declare("factor", ColumnType::Integer, Value::Integer(2))
        .expect("declare factor");
    declarations
        .declare("label", ColumnType::String, Value::String("scaled".into()))
        .expect("declare label");
    AnalyticsMethod::with_parameters(ScaleAmounts, input, output, declarations)
}

/// Source dataset with a `words` column holding `["bananito", "abc"]`.
pub fn word_source() -> Dataset {
    let mut dataset = Dataset::from_schemas([ColumnSchema::new("words", ColumnType::String, false)])
        .expect("source schema");
    dataset
        .set_column_data(
            "words",
            vec![
                Value::String("bananito".to_string()),
                Value::String("abc".to_string()),
            ],
        )
        .expect("source data");
    dataset
}

pub fn word_mapping() -> PortMapping {
    PortMapping::new().bind("words", "text")
}

pub fn amount_source(amounts: &[i64]) -> Dataset {
    let mut dataset =
        Dataset::from_schemas([ColumnSchema::new("raw_amount", ColumnType::Integer, false)])
            .expect("source schema");
    dataset
        .set_column_data(
            "raw_amount",
            amounts.iter().map(|a| Value::Integer(*a)).collect(),
        )
        .expect("source data");
    dataset
}

pub fn amount_mapping() -> PortMapping {
    PortMapping::new().bind("raw_amount", "amount")
}
