// ABOUTME: In-memory Measure + Render implementation for tests and headless drivers.
// ABOUTME: Records every render command and tracks the latest placement of each pane.

use std::collections::{BTreeMap, HashMap};

use dock_core::{Direction, Edge};

use crate::geometry::{BoxModel, ContainerDims, Insets, Rect};
use crate::surface::{ElementId, Measure, Render, RenderCommand};

/// Latest `Place` command seen for an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub element: ElementId,
    pub rect: Rect,
    pub visible: bool,
    pub overlay: bool,
}

/// Latest `Handles` command seen for an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HandleState {
    pub resizer: Option<Rect>,
    pub toggler: Option<Rect>,
    pub closed: bool,
    pub sliding: bool,
}

#[derive(Debug)]
pub struct HeadlessSurface {
    container: Option<ContainerDims>,
    elements: BTreeMap<Edge, ElementId>,
    /// Natural (width, height) per element
    natural: HashMap<ElementId, (i32, i32)>,
    boxes: HashMap<ElementId, BoxModel>,
    embeds: HashMap<ElementId, Vec<ElementId>>,
    commands: Vec<RenderCommand>,
    placements: BTreeMap<Edge, Placement>,
    handles: BTreeMap<Edge, HandleState>,
    masks: BTreeMap<Edge, Vec<ElementId>>,
    next_id: u64,
}

impl HeadlessSurface {
    /// A visible container with a center pane and no border panes
    pub fn new(width: i32, height: i32) -> Self {
        let mut surface = Self {
            container: Some(ContainerDims::new(width, height)),
            elements: BTreeMap::new(),
            natural: HashMap::new(),
            boxes: HashMap::new(),
            embeds: HashMap::new(),
            commands: Vec::new(),
            placements: BTreeMap::new(),
            handles: BTreeMap::new(),
            masks: BTreeMap::new(),
            next_id: 1,
        };
        surface.insert_pane(Edge::Center);
        surface
    }

    /// Container with every border pane present
    pub fn with_all_panes(width: i32, height: i32) -> Self {
        Edge::BORDERS
            .into_iter()
            .fold(Self::new(width, height), |s, edge| s.with_pane(edge))
    }

    pub fn with_pane(mut self, edge: Edge) -> Self {
        self.insert_pane(edge);
        self
    }

    pub fn with_inset(mut self, inset: Insets) -> Self {
        if let Some(container) = self.container.as_mut() {
            container.inset = inset;
        }
        self
    }

    pub fn with_natural_size(mut self, edge: Edge, width: i32, height: i32) -> Self {
        if let Some(&element) = self.elements.get(&edge) {
            self.natural.insert(element, (width, height));
        }
        self
    }

    pub fn with_box(mut self, edge: Edge, model: BoxModel) -> Self {
        if let Some(&element) = self.elements.get(&edge) {
            self.boxes.insert(element, model);
        }
        self
    }

    /// Give a pane `count` embedded elements that need masking during drags
    pub fn with_embeds(mut self, edge: Edge, count: usize) -> Self {
        if let Some(&element) = self.elements.get(&edge) {
            let ids = (0..count).map(|_| self.allocate()).collect();
            self.embeds.insert(element, ids);
        }
        self
    }

    pub fn without_container(mut self) -> Self {
        self.container = None;
        self
    }

    pub fn set_container_size(&mut self, width: i32, height: i32) {
        if let Some(container) = self.container.as_mut() {
            container.inner_width = width;
            container.inner_height = height;
        }
    }

    pub fn set_container_visible(&mut self, visible: bool) {
        if let Some(container) = self.container.as_mut() {
            container.visible = visible;
        }
    }

    /// Provide an element for an edge, replacing any previous one
    pub fn insert_pane(&mut self, edge: Edge) -> ElementId {
        let element = self.allocate();
        self.elements.insert(edge, element);
        element
    }

    pub fn remove_element(&mut self, edge: Edge) -> Option<ElementId> {
        self.elements.remove(&edge)
    }

    pub fn element(&self, edge: Edge) -> Option<ElementId> {
        self.elements.get(&edge).copied()
    }

    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<RenderCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn placement(&self, edge: Edge) -> Option<&Placement> {
        self.placements.get(&edge)
    }

    pub fn handles(&self, edge: Edge) -> Option<&HandleState> {
        self.handles.get(&edge)
    }

    pub fn masks(&self, edge: Edge) -> Option<&[ElementId]> {
        self.masks.get(&edge).map(Vec::as_slice)
    }

    /// Messages of every notice emitted so far
    pub fn notices(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                RenderCommand::Notice { message, .. } => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    fn allocate(&mut self) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        id
    }
}

impl Measure for HeadlessSurface {
    fn container(&self) -> Option<ContainerDims> {
        self.container
    }

    fn pane_element(&self, edge: Edge) -> Option<ElementId> {
        self.elements.get(&edge).copied()
    }

    fn box_model(&self, element: ElementId) -> BoxModel {
        self.boxes.get(&element).copied().unwrap_or_default()
    }

    fn natural_size(&self, element: ElementId, direction: Direction) -> i32 {
        let (width, height) = self.natural.get(&element).copied().unwrap_or_default();
        match direction {
            Direction::Horizontal => height,
            Direction::Vertical => width,
        }
    }

    fn mask_targets(&self, element: ElementId) -> Vec<ElementId> {
        self.embeds.get(&element).cloned().unwrap_or_default()
    }
}

impl Render for HeadlessSurface {
    fn apply(&mut self, command: RenderCommand) {
        match &command {
            RenderCommand::Bind { edge, element } => {
                self.elements.insert(*edge, *element);
            }
            RenderCommand::Unbind { edge, element } => {
                if self.placements.get(edge).is_some_and(|p| p.element == *element) {
                    self.placements.remove(edge);
                }
                self.handles.remove(edge);
            }
            RenderCommand::Place {
                edge,
                element,
                rect,
                visible,
                overlay,
            } => {
                self.placements.insert(
                    *edge,
                    Placement {
                        element: *element,
                        rect: *rect,
                        visible: *visible,
                        overlay: *overlay,
                    },
                );
            }
            RenderCommand::Handles {
                edge,
                resizer,
                toggler,
                closed,
                sliding,
            } => {
                self.handles.insert(
                    *edge,
                    HandleState {
                        resizer: *resizer,
                        toggler: *toggler,
                        closed: *closed,
                        sliding: *sliding,
                    },
                );
            }
            RenderCommand::Mask { edge, targets } => {
                self.masks.insert(*edge, targets.clone());
            }
            RenderCommand::Unmask { edge } => {
                self.masks.remove(edge);
            }
            _ => {}
        }
        self.commands.push(command);
    }
}
