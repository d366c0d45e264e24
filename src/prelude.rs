//! One-line import for hosts embedding the editor.
//!
//! Brings in the `Editor` session, the graph and catalog types it hands out,
//! the canvas input vocabulary and the job compiler, plus their error enums.
//!
//! # Example
//!
//! ```rust,no_run
//! use kumitate::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let settings = EditorSettings::from_file("path/to/settings.json")?;
//! let mut editor = Editor::new(settings);
//! let job = JobDefinition::from_file("path/to/job.json")?;
//! editor.open_job(job);
//!
//! let compiled = editor.compile()?;
//! println!("{} steps", compiled.definition.steps.len());
//! # Ok(())
//! # }
//! ```

// Editing session
pub use crate::editor::{ConfigEditOutcome, ConfigEditRequest, ConfigEditor, Editor};

// Graph model
pub use crate::graph::{Connection, ConnectionId, FlowNode, Graph, GraphSnapshot, NodeId};

// Step catalog
pub use crate::catalog::{
    JsonFileProvider, NodeTemplate, StaticProvider, StepDefinition, StepListResponse,
    StepProvider, StepQuery, TemplateCatalog, TemplateFilter,
};

// Canvas
pub use crate::geometry::{Point, Rect, Size};
pub use crate::interaction::{
    Alignment, Confirm, DeleteRequest, InputEvent, InteractionController, InteractionState,
    Key, Modifiers, PointerButton, Response, Tool,
};
pub use crate::render::Frame;
pub use crate::viewport::{Viewport, ViewportTransform};

// Compilation and persistence
pub use crate::compiler::Compiler;
pub use crate::config::{EditorSettings, StepConfig};
pub use crate::job::JobDefinition;

// Error types
pub use crate::error::{CatalogError, CompileError, PersistenceError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
