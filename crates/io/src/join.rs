//! Joining results tables with the parameter sets that produced them.

use std::collections::{BTreeMap, HashSet};

use lumpr_model::{ModelConfig, ParamValue};
use serde::Serialize;

use crate::error::IoError;
use crate::results::ResultTable;

/// One model's parameters alongside its results table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelResults {
    name: String,
    parameters: BTreeMap<String, ParamValue>,
    columns: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl ModelResults {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameters(&self) -> &BTreeMap<String, ParamValue> {
        &self.parameters
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Wide records: every result row merged with every parameter.
    ///
    /// A results column that shares a name with a parameter wins.
    pub fn records(&self) -> Vec<BTreeMap<String, ParamValue>> {
        self.rows
            .iter()
            .map(|row| {
                let mut record = self.parameters.clone();
                for (col, v) in self.columns.iter().zip(row) {
                    record.insert(col.clone(), ParamValue::Number(*v));
                }
                record
            })
            .collect()
    }
}

/// Results for a batch of models, one group per model in input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CombinedResults {
    models: Vec<ModelResults>,
}

impl CombinedResults {
    pub fn models(&self) -> &[ModelResults] {
        &self.models
    }

    /// The group for model `name`.
    pub fn get(&self, name: &str) -> Option<&ModelResults> {
        self.models.iter().find(|m| m.name == name)
    }

    /// Wide records of every model, concatenated.
    pub fn records(&self) -> Vec<BTreeMap<String, ParamValue>> {
        self.models.iter().flat_map(ModelResults::records).collect()
    }
}

/// Joins each results table with its model's full parameter set on the
/// model name.
///
/// # Errors
///
/// Returns [`IoError::DuplicateModel`] if two entries share a model name.
pub fn join_results<'a, I>(inputs: I) -> Result<CombinedResults, IoError>
where
    I: IntoIterator<Item = (&'a ModelConfig, ResultTable)>,
{
    let mut seen = HashSet::new();
    let mut models = Vec::new();
    for (config, table) in inputs {
        if !seen.insert(config.name().to_string()) {
            return Err(IoError::DuplicateModel {
                name: config.name().to_string(),
            });
        }
        let parameters = config
            .parameters()
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        let (columns, rows) = table.into_parts();
        models.push(ModelResults {
            name: config.name().to_string(),
            parameters,
            columns,
            rows,
        });
    }
    Ok(CombinedResults { models })
}
