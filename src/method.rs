//! Initialize/execute lifecycle driving a pluggable analytics algorithm.
//!
//! [`AnalyticsMethod`] owns one input and one output [`Dataset`] whose
//! schemas are fixed at construction. `initialize` validates a caller
//! mapping against the input schema, copies the mapped source columns into
//! the input dataset, and resolves parameter overrides against declared
//! defaults. `execute` then runs the algorithm over the bound state, writing
//! into the output dataset. The lifecycle itself is fixed; concrete methods
//! only implement the [`Algorithm`] capability surface.

use std::{collections::BTreeMap, io::Read};

use log::debug;

use crate::{
    dataset::Dataset,
    error::MethodError,
    mapping::PortMapping,
    params::{self, ParameterDeclarations, ParameterValues},
    schema::ColumnSchema,
};

/// Capability surface a concrete analytics method implements.
pub trait Algorithm {
    /// Runs the computation, reading bound input columns and writing output
    /// column data. Invoked by [`AnalyticsMethod::execute`] once per call;
    /// failures propagate to the caller untouched.
    fn run(
        &mut self,
        input: &Dataset,
        parameters: &ParameterValues,
        output: &mut Dataset,
    ) -> anyhow::Result<()>;

    /// Whether this method ships a predictive-model (PMML) descriptor.
    fn has_pmml(&self) -> bool {
        false
    }

    /// Opaque byte stream of the PMML descriptor, or `None` when absent.
    /// The lifecycle never parses the stream's contents.
    fn pmml_stream(&self) -> Option<Box<dyn Read + '_>> {
        None
    }
}

impl<T: Algorithm + ?Sized> Algorithm for Box<T> {
    fn run(
        &mut self,
        input: &Dataset,
        parameters: &ParameterValues,
        output: &mut Dataset,
    ) -> anyhow::Result<()> {
        (**self).run(input, parameters, output)
    }

    fn has_pmml(&self) -> bool {
        (**self).has_pmml()
    }

    fn pmml_stream(&self) -> Option<Box<dyn Read + '_>> {
        (**self).pmml_stream()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Constructed,
    Initialized,
    Executed,
}

/// Lifecycle orchestrator around one [`Algorithm`].
///
/// Not thread-safe: the bound input, output, and parameter state is
/// unsynchronized, so a single instance must not be initialized or executed
/// from two threads at once. Distinct instances are independent and may run
/// concurrently.
pub struct AnalyticsMethod<A> {
    algorithm: A,
    input: Dataset,
    output: Dataset,
    declarations: ParameterDeclarations,
    parameters: ParameterValues,
    state: LifecycleState,
}

impl<A: Algorithm> AnalyticsMethod<A> {
    /// Constructs a method with fixed input/output schemas and no declared
    /// parameters.
    pub fn new(algorithm: A, input: Dataset, output: Dataset) -> Self {
        Self::with_parameters(algorithm, input, output, ParameterDeclarations::new())
    }

    pub fn with_parameters(
        algorithm: A,
        input: Dataset,
        output: Dataset,
        declarations: ParameterDeclarations,
    ) -> Self {
        Self {
            algorithm,
            input,
            output,
            declarations,
            parameters: ParameterValues::default(),
            state: LifecycleState::Constructed,
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn input(&self) -> &Dataset {
        &self.input
    }

    pub fn output(&self) -> &Dataset {
        &self.output
    }

    /// Declared input ports, in schema order.
    pub fn input_ports(&self) -> Vec<&ColumnSchema> {
        self.input.column_schemas()
    }

    /// Declared output ports, in schema order.
    pub fn output_ports(&self) -> Vec<&ColumnSchema> {
        self.output.column_schemas()
    }

    /// Parameter values resolved by the last successful initialization.
    pub fn parameters(&self) -> &ParameterValues {
        &self.parameters
    }

    /// Initializes with every declared parameter at its default value.
    pub fn initialize(
        &mut self,
        data: &Dataset,
        mapping: &PortMapping,
    ) -> Result<(), MethodError> {
        self.initialize_with(data, mapping, &BTreeMap::new())
    }

    /// Validates the mapping, binds the mapped source columns into the input
    /// dataset, and resolves parameters, in that order. Any failure aborts
    /// the transition and leaves the lifecycle state at its prior value;
    /// binding makes no rollback guarantee for data already copied.
    pub fn initialize_with(
        &mut self,
        data: &Dataset,
        mapping: &PortMapping,
        overrides: &BTreeMap<String, String>,
    ) -> Result<(), MethodError> {
        let verdict = self.input.validate_mapping(mapping);
        if !verdict.is_valid() {
            return Err(MethodError::Validation(verdict.into_message()));
        }
        for binding in mapping.entries() {
            let column = data.column(&binding.source_column)?;
            self.input
                .set_column_data(&binding.input_port, column.data().to_vec())?;
        }
        self.parameters = params::resolve(&self.declarations, overrides)?;
        self.state = LifecycleState::Initialized;
        debug!(
            "Initialized with mapping [{mapping}] and {} resolved parameter(s)",
            self.parameters.len()
        );
        Ok(())
    }

    /// Runs the algorithm over the bound state and returns the output
    /// dataset by shared reference. Re-running without re-initializing
    /// repeats the same deterministic computation; calling before a
    /// successful initialization fails.
    pub fn execute(&mut self) -> Result<&Dataset, MethodError> {
        if self.state == LifecycleState::Constructed {
            return Err(MethodError::NotInitialized);
        }
        self.algorithm
            .run(&self.input, &self.parameters, &mut self.output)?;
        self.state = LifecycleState::Executed;
        debug!(
            "Execution finished; output holds {} column(s)",
            self.output.len()
        );
        Ok(&self.output)
    }

    pub fn has_pmml(&self) -> bool {
        self.algorithm.has_pmml()
    }

    pub fn pmml_stream(&self) -> Option<Box<dyn Read + '_>> {
        self.algorithm.pmml_stream()
    }
}
