//! # Kumitate - Visual Workflow Editor Core
//!
//! **Kumitate** is the headless core of a node-based workflow editor. Users
//! assemble a job on an infinite canvas by dropping step templates, wiring
//! output ports to input ports and editing each step's configuration; the
//! editor then compiles the graph into an executable job definition.
//!
//! ## Core Workflow
//!
//! The crate never draws pixels and never talks to a network on its own. A
//! host (desktop shell, web view, test harness) owns rendering and I/O and
//! drives the editor through plain values:
//!
//! 1.  **Load the Catalog**: Implement [`StepProvider`](catalog::StepProvider) for your step
//!     service, or use [`JsonFileProvider`](catalog::JsonFileProvider), and load it into the
//!     [`Editor`](editor::Editor). The first successful load drops a start node on the canvas.
//! 2.  **Feed Input**: Translate pointer, wheel and keyboard events into
//!     [`InputEvent`](interaction::InputEvent)s and pass them to `Editor::handle`.
//! 3.  **Render**: Call `Editor::frame` for a screen-space draw list of nodes,
//!     connection curves, the connection preview and the rubber band.
//! 4.  **Save**: `Editor::save` compiles the graph and hands the resulting
//!     [`JobDefinition`](job::JobDefinition) to your persistence callback.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use kumitate::prelude::*;
//! use std::result::Result;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = JsonFileProvider::new("steps.json");
//!     let mut editor = Editor::new(EditorSettings::default());
//!
//!     // 1. Load the step catalog. The start node appears at (100, 200).
//!     tokio_test::block_on(editor.load_catalog(&provider, StepQuery::default()))?;
//!
//!     // 2. Drop an HTTP step and wire the start node to it.
//!     let start = editor.graph().nodes().next().map(|n| n.id.clone()).unwrap();
//!     let http = editor
//!         .drop_template("http.request", Point::new(300.0, 250.0))
//!         .unwrap();
//!     editor.graph_mut().add_connection(&start, 0, &http, 0);
//!
//!     // 3. Name the job and compile it.
//!     editor.set_job_name("Ping API");
//!     let job = editor.save(|job| job)?;
//!     println!("{}", job.to_json_pretty()?);
//!
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod compiler;
pub mod config;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod interaction;
pub mod job;
pub mod layout;
pub mod prelude;
pub mod render;
pub mod viewport;
