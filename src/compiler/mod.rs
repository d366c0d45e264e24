use crate::catalog::{NodeTemplate, is_marker_step};
use crate::config::StepConfig;
use crate::error::CompileError;
use crate::graph::GraphSnapshot;
use crate::job::{JOB_FORMAT_VERSION, JobBody, JobDefinition};
use ahash::AHashSet;
use tracing::{debug, info};

mod steps;

use steps::emit_step;

/// Turns a graph snapshot into a [`JobDefinition`].
///
/// Compilation is pure: the same snapshot, job name and registry always
/// produce the same job. Steps follow node insertion order; connections are
/// carried in the raw `flow` but do not reorder steps.
pub struct Compiler {
    snapshot: GraphSnapshot,
    job_name: String,
    known_step_types: AHashSet<String>,
}

pub struct CompilerBuilder {
    snapshot: GraphSnapshot,
    job_name: String,
    known_step_types: AHashSet<String>,
}

impl CompilerBuilder {
    pub fn new(snapshot: GraphSnapshot, job_name: impl Into<String>) -> Self {
        Self {
            snapshot,
            job_name: job_name.into(),
            known_step_types: AHashSet::new(),
        }
    }

    /// Registers the step type of every template as compilable.
    pub fn with_templates<'a, I>(mut self, templates: I) -> Self
    where
        I: IntoIterator<Item = &'a NodeTemplate>,
    {
        self.known_step_types
            .extend(templates.into_iter().map(|t| t.step_type.clone()));
        self
    }

    /// Registers a single step type, e.g. one provided outside the catalog.
    pub fn with_step_type(mut self, step_type: impl Into<String>) -> Self {
        self.known_step_types.insert(step_type.into());
        self
    }

    pub fn build(self) -> Compiler {
        Compiler {
            snapshot: self.snapshot,
            job_name: self.job_name,
            known_step_types: self.known_step_types,
        }
    }
}

impl Compiler {
    pub fn builder(snapshot: GraphSnapshot, job_name: impl Into<String>) -> CompilerBuilder {
        CompilerBuilder::new(snapshot, job_name)
    }

    fn validate(&self) -> Result<(), CompileError> {
        if self.job_name.trim().is_empty() {
            return Err(CompileError::EmptyJobName);
        }
        if self.snapshot.nodes.is_empty() {
            return Err(CompileError::EmptyGraph);
        }
        if let Some(node) = self.snapshot.nodes.iter().find(|n| {
            !is_marker_step(&n.step_type) && !self.known_step_types.contains(&n.step_type)
        }) {
            return Err(CompileError::UnknownStepType {
                node_id: node.id.to_string(),
                step_type: node.step_type.clone(),
            });
        }
        Ok(())
    }

    pub fn compile(self) -> Result<JobDefinition, CompileError> {
        self.validate()?;

        let steps: Vec<StepConfig> = self
            .snapshot
            .nodes
            .iter()
            .filter(|n| !is_marker_step(&n.step_type))
            .map(emit_step)
            .collect();
        debug!(
            nodes = self.snapshot.nodes.len(),
            steps = steps.len(),
            "Emitted executable steps"
        );

        let name = self.job_name;
        info!(job = %name, steps = steps.len(), "Compiled job");
        Ok(JobDefinition {
            name: name.clone(),
            version: JOB_FORMAT_VERSION,
            definition: JobBody {
                name,
                version: JOB_FORMAT_VERSION,
                parameters: StepConfig::new(),
                steps,
                flow: self.snapshot,
            },
            is_active: true,
        })
    }
}
