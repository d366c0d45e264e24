//! Pointer and keyboard state machine of the canvas.
//!
//! Exactly one [`InteractionState`] is active at a time. The controller never
//! draws anything; it turns raw [`InputEvent`]s into graph, viewport and
//! selection changes and reports what happened as a [`Response`].

use crate::config::EditorSettings;
use crate::geometry::{Point, Rect};
use crate::graph::{ConnectionId, Graph, NodeId};
use crate::layout::{HitTarget, PortKind, PortLayout, PortRef, nodes_intersecting};
use crate::viewport::Viewport;
use tracing::debug;

mod align;
mod event;
mod selection;

pub use align::{Alignment, align_nodes};
pub use event::{InputEvent, Key, Modifiers, PointerButton};
pub use selection::SelectionSet;

/// Active canvas tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    #[default]
    Select,
    Hand,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InteractionState {
    Idle,
    DraggingNode {
        node_id: NodeId,
        /// Pointer minus node origin, in virtual units.
        grab_offset: Point,
    },
    DrawingConnection {
        from: PortRef,
        /// Current pointer in virtual units, for the preview curve.
        pointer: Point,
    },
    RubberBandSelecting {
        anchor: Point,
        current: Point,
        additive: bool,
    },
    Panning {
        /// Screen position of the previous pointer event.
        last: Point,
    },
}

/// What an event did, for the host to react to.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Ignored,
    ToolChanged(Tool),
    SelectionChanged,
    NodeMoved(NodeId),
    ConnectionStarted(PortRef),
    ConnectionCreated(ConnectionId),
    ConnectionCancelled,
    ViewportChanged,
    /// The user asked to delete the selection; the host must confirm and then
    /// call [`InteractionController::delete_selected`].
    DeleteRequested(Vec<NodeId>),
    /// The user asked to fit all nodes into view.
    FitRequested,
    /// The user asked to edit a node's configuration.
    EditRequested(NodeId),
}

/// A destructive action awaiting the user's consent.
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteRequest {
    Nodes(Vec<NodeId>),
    Connection(ConnectionId),
}

impl DeleteRequest {
    pub fn message(&self) -> String {
        match self {
            DeleteRequest::Nodes(ids) if ids.len() == 1 => {
                format!("Delete node '{}' and its connections?", ids[0])
            }
            DeleteRequest::Nodes(ids) => {
                format!("Delete {} nodes and their connections?", ids.len())
            }
            DeleteRequest::Connection(id) => format!("Delete connection '{}'?", id),
        }
    }
}

/// Asks the user to confirm a destructive action.
pub trait Confirm {
    fn confirm(&mut self, request: &DeleteRequest) -> bool;
}

impl<F: FnMut(&DeleteRequest) -> bool> Confirm for F {
    fn confirm(&mut self, request: &DeleteRequest) -> bool {
        self(request)
    }
}

#[derive(Debug, Clone)]
pub struct InteractionController {
    state: InteractionState,
    tool: Tool,
    selection: SelectionSet,
    ports: PortLayout,
    wheel_zoom_step: f64,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new(&EditorSettings::default())
    }
}

impl InteractionController {
    pub fn new(settings: &EditorSettings) -> Self {
        Self {
            state: InteractionState::Idle,
            tool: Tool::Select,
            selection: SelectionSet::new(),
            ports: PortLayout::from_settings(settings),
            wheel_zoom_step: settings.wheel_zoom_step,
        }
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == InteractionState::Idle
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut SelectionSet {
        &mut self.selection
    }

    pub fn port_layout(&self) -> &PortLayout {
        &self.ports
    }

    /// Normalized rubber-band rectangle in virtual units, while one is active.
    pub fn rubber_band(&self) -> Option<Rect> {
        match &self.state {
            InteractionState::RubberBandSelecting {
                anchor, current, ..
            } => Some(Rect::from_corners(*anchor, *current)),
            _ => None,
        }
    }

    fn transition(&mut self, next: InteractionState) {
        if std::mem::discriminant(&self.state) != std::mem::discriminant(&next) {
            debug!(from = ?self.state, to = ?next, "Interaction state change");
        }
        self.state = next;
    }

    /// Feeds one input event through the state machine.
    pub fn handle(
        &mut self,
        graph: &mut Graph,
        viewport: &mut Viewport,
        event: InputEvent,
    ) -> Response {
        match event {
            InputEvent::PointerDown {
                position,
                button,
                modifiers,
            } => self.pointer_down(graph, viewport, position, button, modifiers),
            InputEvent::PointerMove { position } => self.pointer_move(graph, viewport, position),
            InputEvent::PointerUp { position, .. } => self.pointer_up(graph, viewport, position),
            InputEvent::PointerCancel => self.cancel(),
            InputEvent::DoubleClick { position } => {
                let point = viewport.to_virtual(position);
                match self.ports.hit_test(graph, point) {
                    HitTarget::Node(id) => Response::EditRequested(id),
                    _ => Response::Ignored,
                }
            }
            InputEvent::Wheel {
                position,
                delta,
                modifiers,
            } => self.wheel(viewport, position, delta, modifiers),
            InputEvent::KeyDown {
                key,
                modifiers,
                in_text_input,
            } => self.key_down(viewport, key, modifiers, in_text_input),
        }
    }

    fn start_pan(&mut self, position: Point) {
        self.transition(InteractionState::Panning { last: position });
    }

    fn pointer_down(
        &mut self,
        graph: &mut Graph,
        viewport: &mut Viewport,
        position: Point,
        button: PointerButton,
        modifiers: Modifiers,
    ) -> Response {
        if button == PointerButton::Middle {
            let was_drawing = matches!(self.state, InteractionState::DrawingConnection { .. });
            self.start_pan(position);
            return if was_drawing {
                Response::ConnectionCancelled
            } else {
                Response::Ignored
            };
        }
        if button != PointerButton::Primary {
            return Response::Ignored;
        }

        let point = viewport.to_virtual(position);
        let hit = self.ports.hit_test(graph, point);

        // A click while a connection is in progress finishes or cancels it.
        if let InteractionState::DrawingConnection { from, .. } = &self.state {
            let from = from.clone();
            self.transition(InteractionState::Idle);
            return self.finish_connection(graph, from, hit);
        }

        if self.tool == Tool::Hand {
            self.start_pan(position);
            return Response::Ignored;
        }

        match hit {
            HitTarget::Port(port) if port.kind == PortKind::Output => {
                self.transition(InteractionState::DrawingConnection {
                    from: port.clone(),
                    pointer: point,
                });
                Response::ConnectionStarted(port)
            }
            HitTarget::Port(PortRef { node_id, .. }) | HitTarget::Node(node_id) => {
                if modifiers.command() {
                    self.selection.toggle(node_id);
                    return Response::SelectionChanged;
                }
                let Some(node) = graph.node(&node_id) else {
                    return Response::Ignored;
                };
                let grab_offset = point - node.position;
                if !self.selection.contains(&node_id) || self.selection.len() == 1 {
                    self.selection.select_only(node_id.clone());
                }
                self.transition(InteractionState::DraggingNode {
                    node_id,
                    grab_offset,
                });
                Response::SelectionChanged
            }
            HitTarget::Canvas => {
                let additive = modifiers.command();
                if !additive {
                    self.selection.clear();
                }
                self.transition(InteractionState::RubberBandSelecting {
                    anchor: point,
                    current: point,
                    additive,
                });
                Response::SelectionChanged
            }
        }
    }

    /// Completes a connection draw with the port that was clicked, or cancels it.
    fn finish_connection(
        &mut self,
        graph: &mut Graph,
        from: PortRef,
        hit: HitTarget,
    ) -> Response {
        let HitTarget::Port(to) = hit else {
            return Response::ConnectionCancelled;
        };
        if to.node_id == from.node_id {
            return Response::ConnectionCancelled;
        }
        let (source, target) = match (from.kind, to.kind) {
            (PortKind::Output, PortKind::Input) => (from, to),
            (PortKind::Input, PortKind::Output) => (to, from),
            _ => return Response::ConnectionCancelled,
        };
        match graph.add_connection(
            &source.node_id,
            source.index,
            &target.node_id,
            target.index,
        ) {
            Some(id) => Response::ConnectionCreated(id),
            None => Response::ConnectionCancelled,
        }
    }

    fn pointer_move(
        &mut self,
        graph: &mut Graph,
        viewport: &mut Viewport,
        position: Point,
    ) -> Response {
        let point = viewport.to_virtual(position);
        match &mut self.state {
            InteractionState::Idle => Response::Ignored,
            InteractionState::DraggingNode {
                node_id,
                grab_offset,
            } => {
                if graph.move_node(node_id, point - *grab_offset) {
                    Response::NodeMoved(node_id.clone())
                } else {
                    Response::Ignored
                }
            }
            InteractionState::DrawingConnection { pointer, .. } => {
                *pointer = point;
                Response::Ignored
            }
            InteractionState::RubberBandSelecting { current, .. } => {
                *current = point;
                Response::Ignored
            }
            InteractionState::Panning { last } => {
                let delta = position - *last;
                *last = position;
                viewport.pan(delta.x, delta.y);
                Response::ViewportChanged
            }
        }
    }

    fn pointer_up(
        &mut self,
        graph: &mut Graph,
        viewport: &mut Viewport,
        position: Point,
    ) -> Response {
        match &self.state {
            InteractionState::DraggingNode { node_id, .. } => {
                let node_id = node_id.clone();
                let response = self.pointer_move(graph, viewport, position);
                self.transition(InteractionState::Idle);
                match response {
                    Response::NodeMoved(_) => Response::NodeMoved(node_id),
                    other => other,
                }
            }
            InteractionState::RubberBandSelecting {
                anchor, additive, ..
            } => {
                let rect = Rect::from_corners(*anchor, viewport.to_virtual(position));
                let additive = *additive;
                let hits = nodes_intersecting(graph, &rect);
                if additive {
                    self.selection.extend(hits);
                } else {
                    self.selection.replace(hits);
                }
                self.transition(InteractionState::Idle);
                Response::SelectionChanged
            }
            InteractionState::Panning { .. } => {
                let response = self.pointer_move(graph, viewport, position);
                self.transition(InteractionState::Idle);
                response
            }
            // Connections are drawn click-to-click; releasing the first click keeps the draw alive.
            InteractionState::DrawingConnection { .. } | InteractionState::Idle => {
                Response::Ignored
            }
        }
    }

    /// Abandons whatever gesture is active and returns to idle.
    ///
    /// A dragged node stays where the last move put it; an unfinished
    /// connection is discarded.
    pub fn cancel(&mut self) -> Response {
        let response = match self.state {
            InteractionState::DrawingConnection { .. } => Response::ConnectionCancelled,
            _ => Response::Ignored,
        };
        self.transition(InteractionState::Idle);
        response
    }

    fn wheel(
        &mut self,
        viewport: &mut Viewport,
        position: Point,
        delta: Point,
        modifiers: Modifiers,
    ) -> Response {
        if modifiers.command() {
            if delta.y == 0.0 {
                return Response::Ignored;
            }
            let factor = if delta.y < 0.0 {
                self.wheel_zoom_step
            } else {
                1.0 / self.wheel_zoom_step
            };
            viewport.zoom_by(factor, position);
        } else {
            viewport.pan(-delta.x, -delta.y);
        }
        Response::ViewportChanged
    }

    fn key_down(
        &mut self,
        viewport: &mut Viewport,
        key: Key,
        modifiers: Modifiers,
        in_text_input: bool,
    ) -> Response {
        if in_text_input {
            return Response::Ignored;
        }
        match key {
            Key::Char('v') | Key::Char('V') if !modifiers.command() => {
                self.tool = Tool::Select;
                Response::ToolChanged(Tool::Select)
            }
            Key::Char('h') | Key::Char('H') if !modifiers.command() => {
                self.tool = Tool::Hand;
                Response::ToolChanged(Tool::Hand)
            }
            Key::Char('f') | Key::Char('F') if !modifiers.command() => Response::FitRequested,
            Key::Char('0') if modifiers.command() => {
                viewport.reset();
                Response::ViewportChanged
            }
            Key::Escape => {
                let cancelled = self.cancel();
                self.selection.clear();
                match cancelled {
                    Response::ConnectionCancelled => cancelled,
                    _ => Response::SelectionChanged,
                }
            }
            Key::Delete | Key::Backspace if !self.selection.is_empty() => {
                Response::DeleteRequested(self.selection.sorted_ids())
            }
            _ => Response::Ignored,
        }
    }

    /// Aligns the current selection. Needs two or more selected nodes.
    pub fn align_selection(&self, graph: &mut Graph, alignment: Alignment) -> bool {
        align_nodes(graph, self.selection.iter(), alignment)
    }

    /// Deletes `ids` once `confirm` agrees. Returns how many nodes were removed.
    pub fn delete_nodes(
        &mut self,
        graph: &mut Graph,
        ids: Vec<NodeId>,
        confirm: &mut impl Confirm,
    ) -> usize {
        let ids: Vec<NodeId> = ids
            .into_iter()
            .filter(|id| graph.contains_node(id))
            .collect();
        if ids.is_empty() || !confirm.confirm(&DeleteRequest::Nodes(ids.clone())) {
            return 0;
        }
        let removed = ids.iter().filter_map(|id| graph.remove_node(id)).count();
        self.selection.retain_existing(graph);
        if let InteractionState::DraggingNode { node_id, .. } = &self.state {
            if !graph.contains_node(node_id) {
                self.transition(InteractionState::Idle);
            }
        }
        removed
    }

    pub fn delete_selected(&mut self, graph: &mut Graph, confirm: &mut impl Confirm) -> usize {
        let ids = self.selection.sorted_ids();
        self.delete_nodes(graph, ids, confirm)
    }

    pub fn delete_connection(
        &mut self,
        graph: &mut Graph,
        id: &ConnectionId,
        confirm: &mut impl Confirm,
    ) -> bool {
        if graph.connection(id).is_none() {
            return false;
        }
        if !confirm.confirm(&DeleteRequest::Connection(id.clone())) {
            return false;
        }
        graph.remove_connection(id).is_some()
    }
}
