//! Step template catalog cache.
//!
//! The cache holds the last successfully loaded template list. Loads are split
//! into [`TemplateCatalog::begin_load`] and [`TemplateCatalog::complete_load`]
//! so a host can keep the editor interactive while a request is outstanding;
//! [`TemplateCatalog::load`] wraps both for callers that can simply await.
//! Only the result of the most recently started load is applied.

use crate::error::CatalogError;
use tracing::{debug, info, warn};

pub mod filter;
pub mod provider;
pub mod template;

pub use filter::{TemplateFilter, categories, filter_templates, libraries};
pub use provider::{JsonFileProvider, StaticProvider, StepProvider, StepQuery, parse_step_list};
pub use template::{
    END_STEP_TYPE, NodeTemplate, START_STEP_TYPE, StepDefinition, StepListResponse,
    is_marker_step,
};

/// Where the catalog currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogStatus {
    /// Nothing has been requested yet.
    Idle,
    /// A load is outstanding. Cached templates stay usable.
    Loading,
    /// The last load succeeded.
    Ready,
    /// The last load failed. `templates()` still returns the last good list, if any.
    Failed,
}

/// Identifies one load request. Completing an outdated ticket is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// What happened when a load completed.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// New templates are in place.
    Updated { revision: u64, count: usize },
    /// A newer load had started; this result was dropped.
    Superseded,
    /// The load failed and the previous templates were kept.
    FellBack(CatalogError),
    /// The load failed and there is nothing cached to fall back to.
    Failed(CatalogError),
}

/// Delivered to subscribers after every applied load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEvent {
    pub revision: u64,
    pub template_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&CatalogEvent)>;

pub struct TemplateCatalog {
    templates: Vec<NodeTemplate>,
    loaded_once: bool,
    status: CatalogStatus,
    last_error: Option<CatalogError>,
    last_query: StepQuery,
    latest_ticket: u64,
    revision: u64,
    stale: bool,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl Default for TemplateCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TemplateCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateCatalog")
            .field("templates", &self.templates.len())
            .field("status", &self.status)
            .field("revision", &self.revision)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl TemplateCatalog {
    pub fn new() -> Self {
        Self {
            templates: Vec::new(),
            loaded_once: false,
            status: CatalogStatus::Idle,
            last_error: None,
            last_query: StepQuery::default(),
            latest_ticket: 0,
            revision: 0,
            stale: false,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Currently cached templates, possibly stale or empty.
    pub fn templates(&self) -> &[NodeTemplate] {
        &self.templates
    }

    pub fn status(&self) -> CatalogStatus {
        self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == CatalogStatus::Loading
    }

    /// True once any load has succeeded, even if it returned zero steps.
    pub fn has_loaded(&self) -> bool {
        self.loaded_once
    }

    /// The error of the last load, cleared by the next successful one.
    pub fn last_error(&self) -> Option<&CatalogError> {
        self.last_error.as_ref()
    }

    /// Bumped on every applied load.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// True after [`invalidate`](Self::invalidate) until the next applied load.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub fn find(&self, template_id: &str) -> Option<&NodeTemplate> {
        self.templates.iter().find(|t| t.template_id == template_id)
    }

    pub fn find_by_step_type(&self, step_type: &str) -> Option<&NodeTemplate> {
        self.templates.iter().find(|t| t.step_type == step_type)
    }

    pub fn filtered(&self, filter: &TemplateFilter) -> Vec<&NodeTemplate> {
        filter_templates(&self.templates, filter)
    }

    /// Starts a load. Any ticket handed out earlier becomes outdated.
    pub fn begin_load(&mut self, query: StepQuery) -> LoadTicket {
        self.latest_ticket += 1;
        self.status = CatalogStatus::Loading;
        self.last_query = query;
        debug!(ticket = self.latest_ticket, "Catalog load started");
        LoadTicket(self.latest_ticket)
    }

    /// Applies the result of the load identified by `ticket`.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<StepListResponse, CatalogError>,
    ) -> LoadOutcome {
        if ticket.0 != self.latest_ticket {
            warn!(
                ticket = ticket.0,
                latest = self.latest_ticket,
                "Dropping result of superseded catalog load"
            );
            return LoadOutcome::Superseded;
        }

        match result {
            Ok(response) => {
                self.templates = response
                    .steps
                    .into_iter()
                    .map(NodeTemplate::from)
                    .collect();
                self.loaded_once = true;
                self.stale = false;
                self.status = CatalogStatus::Ready;
                self.last_error = None;
                self.revision += 1;
                info!(
                    revision = self.revision,
                    count = self.templates.len(),
                    "Step catalog loaded"
                );
                self.notify();
                LoadOutcome::Updated {
                    revision: self.revision,
                    count: self.templates.len(),
                }
            }
            Err(err) => {
                self.status = CatalogStatus::Failed;
                self.last_error = Some(err.clone());
                if self.loaded_once {
                    warn!(
                        error = %err,
                        cached = self.templates.len(),
                        "Step catalog load failed, keeping cached templates"
                    );
                    LoadOutcome::FellBack(err)
                } else {
                    warn!(error = %err, "Step catalog load failed with nothing cached");
                    LoadOutcome::Failed(err)
                }
            }
        }
    }

    /// Fetches templates from `provider` and applies them.
    ///
    /// On failure the error is returned and the previously cached templates
    /// (if any) remain available through [`templates`](Self::templates).
    pub async fn load<P: StepProvider>(
        &mut self,
        provider: &P,
        query: StepQuery,
    ) -> Result<&[NodeTemplate], CatalogError> {
        let ticket = self.begin_load(query.clone());
        let result = provider.get_available_steps(&query).await;
        match self.complete_load(ticket, result) {
            LoadOutcome::Updated { .. } | LoadOutcome::Superseded => Ok(&self.templates),
            LoadOutcome::FellBack(err) | LoadOutcome::Failed(err) => Err(err),
        }
    }

    /// Retries with the query of the previous load.
    pub async fn retry<P: StepProvider>(
        &mut self,
        provider: &P,
    ) -> Result<&[NodeTemplate], CatalogError> {
        let query = self.last_query.clone();
        self.load(provider, query).await
    }

    /// Marks the cached list as outdated, e.g. after a library was installed.
    pub fn invalidate(&mut self) {
        self.stale = true;
    }

    /// Handles an external "catalog changed" signal: invalidates, re-fetches
    /// with the previous query and notifies subscribers on success.
    pub async fn refresh<P: StepProvider>(
        &mut self,
        provider: &P,
    ) -> Result<&[NodeTemplate], CatalogError> {
        self.invalidate();
        self.retry(provider).await
    }

    /// Registers `callback` to run after every applied load.
    ///
    /// Callbacks may see the same revision more than once if the host re-sends
    /// notifications, and should tolerate it.
    pub fn subscribe(&mut self, callback: impl FnMut(&CatalogEvent) + 'static) -> SubscriptionId {
        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        before != self.subscribers.len()
    }

    /// Re-sends the current revision to every subscriber.
    pub fn notify(&mut self) {
        let event = CatalogEvent {
            revision: self.revision,
            template_count: self.templates.len(),
        };
        for (_, callback) in self.subscribers.iter_mut() {
            callback(&event);
        }
    }
}
