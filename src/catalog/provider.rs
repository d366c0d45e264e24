use super::filter::TemplateFilter;
use super::template::{NodeTemplate, StepDefinition, StepListResponse};
use crate::error::CatalogError;
use std::fs;
use std::path::PathBuf;

/// Filters forwarded to the catalog service.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepQuery {
    pub category: Option<String>,
    pub library: Option<String>,
    pub search: Option<String>,
    /// Ask the provider to include remotely hosted libraries.
    pub use_remote: bool,
}

impl StepQuery {
    fn as_filter(&self) -> TemplateFilter {
        TemplateFilter {
            category: self.category.clone(),
            library: self.library.clone(),
            search: self.search.clone(),
        }
    }

    /// Applies the query locally, for providers that cannot filter server-side.
    pub fn apply(&self, steps: Vec<StepDefinition>) -> Vec<StepDefinition> {
        let filter = self.as_filter();
        steps
            .into_iter()
            .filter(|def| filter.matches(&NodeTemplate::from(def.clone())))
            .collect()
    }
}

/// The external step catalog service.
///
/// Implementations may fail; the catalog cache treats every failure as
/// recoverable. An empty step list is a valid answer.
#[allow(async_fn_in_trait)]
pub trait StepProvider {
    async fn get_available_steps(&self, query: &StepQuery)
    -> Result<StepListResponse, CatalogError>;
}

/// Serves a fixed, in-memory list of step definitions.
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    steps: Vec<StepDefinition>,
}

impl StaticProvider {
    pub fn new(steps: Vec<StepDefinition>) -> Self {
        Self { steps }
    }
}

impl StepProvider for StaticProvider {
    async fn get_available_steps(
        &self,
        query: &StepQuery,
    ) -> Result<StepListResponse, CatalogError> {
        Ok(StepListResponse {
            steps: query.apply(self.steps.clone()),
        })
    }
}

/// Reads the catalog from a JSON file on every request.
///
/// The file may hold either a `{ "steps": [...] }` envelope or a bare array.
#[derive(Debug, Clone)]
pub struct JsonFileProvider {
    path: PathBuf,
}

impl JsonFileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read(&self) -> Result<Vec<StepDefinition>, CatalogError> {
        let content = fs::read_to_string(&self.path).map_err(|e| CatalogError::Io {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })?;
        parse_step_list(&content)
    }
}

impl StepProvider for JsonFileProvider {
    async fn get_available_steps(
        &self,
        query: &StepQuery,
    ) -> Result<StepListResponse, CatalogError> {
        let steps = self.read()?;
        Ok(StepListResponse {
            steps: query.apply(steps),
        })
    }
}

/// Parses a catalog payload in either envelope or bare-array form.
pub fn parse_step_list(json: &str) -> Result<Vec<StepDefinition>, CatalogError> {
    let value: serde_json::Value =
        serde_json::from_str(json).map_err(|e| CatalogError::Parse(e.to_string()))?;
    if value.is_array() {
        serde_json::from_value(value).map_err(|e| CatalogError::Parse(e.to_string()))
    } else {
        serde_json::from_value::<StepListResponse>(value)
            .map(|r| r.steps)
            .map_err(|e| CatalogError::Parse(e.to_string()))
    }
}
