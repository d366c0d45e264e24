//! One editing session: graph, viewport, interaction and catalog together.

use crate::catalog::{
    LoadOutcome, LoadTicket, NodeTemplate, StepListResponse, StepProvider,
    StepQuery, TemplateCatalog,
};
use crate::compiler::Compiler;
use crate::config::{EditorSettings, StepConfig};
use crate::error::{CatalogError, CompileError};
use crate::geometry::{Point, Size};
use crate::graph::{ConnectionId, Graph, NodeId};
use crate::interaction::{Alignment, Confirm, InputEvent, InteractionController, Response};
use crate::job::JobDefinition;
use crate::render::{Frame, build_frame};
use crate::viewport::Viewport;
use tracing::{debug, info};

/// Handed to the step configuration editor when it opens.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigEditRequest {
    pub node_id: NodeId,
    pub step_type: String,
    pub display_name: String,
    pub config: StepConfig,
}

/// How the configuration editor was closed.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigEditOutcome {
    Cancelled,
    Saved(StepConfig),
}

/// The modal that edits a node's configuration.
pub trait ConfigEditor {
    fn edit(&mut self, request: &ConfigEditRequest) -> ConfigEditOutcome;
}

impl<F: FnMut(&ConfigEditRequest) -> ConfigEditOutcome> ConfigEditor for F {
    fn edit(&mut self, request: &ConfigEditRequest) -> ConfigEditOutcome {
        self(request)
    }
}

#[derive(Debug)]
pub struct Editor {
    settings: EditorSettings,
    graph: Graph,
    viewport: Viewport,
    controller: InteractionController,
    catalog: TemplateCatalog,
    viewport_size: Size,
    start_node_checked: bool,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorSettings::default())
    }
}

impl Editor {
    pub fn new(settings: EditorSettings) -> Self {
        Self {
            graph: Graph::with_node_size(settings.default_node_size),
            viewport: Viewport::new(),
            controller: InteractionController::new(&settings),
            catalog: TemplateCatalog::new(),
            viewport_size: Size::new(1280.0, 720.0),
            start_node_checked: false,
            settings,
        }
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Direct model access for hosts that mutate the graph outside pointer input.
    pub fn graph_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut TemplateCatalog {
        &mut self.catalog
    }

    pub fn job_name(&self) -> &str {
        self.graph.job_name()
    }

    pub fn set_job_name(&mut self, name: impl Into<String>) {
        self.graph.set_job_name(name);
    }

    /// Size of the canvas widget in screen pixels, used by zoom-to-fit.
    pub fn set_viewport_size(&mut self, size: Size) {
        self.viewport_size = size;
    }

    /// Discards the current graph and starts an empty one.
    pub fn new_job(&mut self) {
        self.replace_graph(Graph::with_node_size(self.settings.default_node_size));
        self.start_node_checked = false;
        self.ensure_start_node();
    }

    /// Replaces the current graph with the one saved in `job`.
    pub fn open_job(&mut self, job: JobDefinition) {
        let mut graph = Graph::from_snapshot(job.definition.flow, job.name);
        graph.set_node_size(self.settings.default_node_size);
        info!(job = %graph.job_name(), nodes = graph.node_count(), "Opened job");
        self.replace_graph(graph);
        self.start_node_checked = true;
    }

    fn replace_graph(&mut self, graph: Graph) {
        self.graph = graph;
        self.controller.cancel();
        self.controller.selection_mut().clear();
        self.viewport.reset();
    }

    /// Routes one input event through the interaction controller.
    pub fn handle(&mut self, event: InputEvent) -> Response {
        let response = self
            .controller
            .handle(&mut self.graph, &mut self.viewport, event);
        match response {
            Response::FitRequested => {
                self.zoom_to_fit();
                Response::ViewportChanged
            }
            other => other,
        }
    }

    /// Draw list for the current state.
    pub fn frame(&self) -> Frame {
        build_frame(&self.graph, &self.viewport, &self.controller, &self.settings)
    }

    pub fn zoom_to_fit(&mut self) {
        self.viewport.zoom_to_fit(
            self.graph.bounding_box(),
            self.viewport_size,
            self.settings.fit_padding,
        );
    }

    pub fn reset_view(&mut self) {
        self.viewport.reset();
    }

    pub fn begin_catalog_load(&mut self, query: StepQuery) -> LoadTicket {
        self.catalog.begin_load(query)
    }

    /// Applies a finished catalog load and inserts the start node if this is
    /// the first time templates became available.
    pub fn complete_catalog_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<StepListResponse, CatalogError>,
    ) -> LoadOutcome {
        let outcome = self.catalog.complete_load(ticket, result);
        self.ensure_start_node();
        outcome
    }

    /// Loads the catalog from `provider`. Errors leave the cached templates in place.
    pub async fn load_catalog<P: StepProvider>(
        &mut self,
        provider: &P,
        query: StepQuery,
    ) -> Result<usize, CatalogError> {
        let result = self.catalog.load(provider, query).await.map(|t| t.len());
        self.ensure_start_node();
        result
    }

    /// Inserts the start node into an empty graph the first time a catalog
    /// containing `flow.start` is available. Loads without one leave the check open.
    fn ensure_start_node(&mut self) {
        if self.start_node_checked || !self.catalog.has_loaded() {
            return;
        }
        if !self.graph.is_empty() {
            self.start_node_checked = true;
            return;
        }
        if let Some(template) = self.catalog.templates().iter().find(|t| t.is_start()) {
            self.start_node_checked = true;
            let id = self
                .graph
                .add_node(template, self.settings.start_node_position);
            debug!(node = %id, "Inserted start node");
        }
    }

    fn template(&self, template_id: &str) -> Option<NodeTemplate> {
        self.catalog.find(template_id).cloned()
    }

    /// Instantiates a catalog template dropped at `screen` onto the canvas.
    pub fn drop_template(&mut self, template_id: &str, screen: Point) -> Option<NodeId> {
        let position = self.viewport.to_virtual(screen);
        self.add_template_at(template_id, position)
    }

    /// Instantiates a catalog template at a virtual position.
    pub fn add_template_at(&mut self, template_id: &str, position: Point) -> Option<NodeId> {
        let template = self.template(template_id)?;
        Some(self.graph.add_node(&template, position))
    }

    pub fn align_selection(&mut self, alignment: Alignment) -> bool {
        self.controller.align_selection(&mut self.graph, alignment)
    }

    pub fn delete_selected(&mut self, confirm: &mut impl Confirm) -> usize {
        self.controller.delete_selected(&mut self.graph, confirm)
    }

    pub fn delete_node(&mut self, id: &NodeId, confirm: &mut impl Confirm) -> bool {
        self.controller
            .delete_nodes(&mut self.graph, vec![id.clone()], confirm)
            > 0
    }

    pub fn delete_connection(&mut self, id: &ConnectionId, confirm: &mut impl Confirm) -> bool {
        self.controller.delete_connection(&mut self.graph, id, confirm)
    }

    /// Prepares the payload for opening the configuration editor on a node.
    pub fn request_config_edit(&self, node_id: &NodeId) -> Option<ConfigEditRequest> {
        self.graph.node(node_id).map(|node| ConfigEditRequest {
            node_id: node.id.clone(),
            step_type: node.step_type.clone(),
            display_name: node.display_name.clone(),
            config: node.config.clone(),
        })
    }

    /// Applies how the configuration editor closed. Cancelling changes nothing.
    pub fn finish_config_edit(
        &mut self,
        request: &ConfigEditRequest,
        outcome: ConfigEditOutcome,
    ) -> bool {
        match outcome {
            ConfigEditOutcome::Cancelled => false,
            ConfigEditOutcome::Saved(config) => {
                self.graph.set_node_config(&request.node_id, config)
            }
        }
    }

    /// Opens `editor` on a node and applies its result.
    pub fn edit_node_config(
        &mut self,
        node_id: &NodeId,
        editor: &mut impl ConfigEditor,
    ) -> bool {
        let Some(request) = self.request_config_edit(node_id) else {
            return false;
        };
        let outcome = editor.edit(&request);
        self.finish_config_edit(&request, outcome)
    }

    /// Compiles the current graph against the loaded catalog.
    pub fn compile(&self) -> Result<JobDefinition, CompileError> {
        Compiler::builder(self.graph.snapshot(), self.graph.job_name())
            .with_templates(self.catalog.templates())
            .build()
            .compile()
    }

    /// Compiles and hands the job to `on_job_create`, returning its result.
    /// Nothing is handed over when compilation fails.
    pub fn save<R>(
        &self,
        on_job_create: impl FnOnce(JobDefinition) -> R,
    ) -> Result<R, CompileError> {
        let job = self.compile()?;
        Ok(on_job_create(job))
    }
}
