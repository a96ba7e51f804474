// src/component.rs

//! The component tree the scheduler draws and dispatches input into.
//!
//! Every node is a `Component`. Optional behavior is advertised through
//! capability queries (`as_interactable_mut`, `as_keyboard_target_mut`,
//! `as_container`, `as_resize_subscriber`) that default to `None`, so the
//! scheduler asks a node what it can do instead of inspecting its type.
//!
//! Nodes are addressed by a `ComponentPath`: the child index at each level,
//! starting below the root. The empty path is the root itself.

use crate::buffer::{Canvas, GlyphBuffer};
use crate::error::Result;
use crate::geometry::{Location, Region};
use crate::keys::KeyEvent;
use crate::layout::{Layout, LayoutParams};
use crate::resize::ResizeSubscriber;
use log::{debug, trace, warn};

/// Child indices from the root down to a component.
pub type ComponentPath = Vec<usize>;

/// Handles pointer clicks.
pub trait Interactable {
    /// Called with the grid location of a click inside the component.
    /// Returns whether the component wants keyboard focus.
    fn clicked(&mut self, location: Location) -> bool;
}

/// Receives key presses while focused.
pub trait KeyboardTarget {
    fn key_pressed(&mut self, event: &KeyEvent);
}

pub trait Component: Send {
    /// Short name used in log messages.
    fn name(&self) -> &str {
        "component"
    }

    fn bounds(&self) -> Region;

    /// Assigns the region granted by the parent's layout.
    fn set_bounds(&mut self, bounds: Region) -> Result<()>;

    /// What this component asks its parent's layout for.
    fn layout_params(&self) -> LayoutParams {
        LayoutParams::Fill
    }

    /// Writes the component's glyphs. Locations are absolute grid locations.
    fn draw(&self, canvas: &mut dyn Canvas);

    fn as_interactable_mut(&mut self) -> Option<&mut dyn Interactable> {
        None
    }

    fn as_keyboard_target_mut(&mut self) -> Option<&mut dyn KeyboardTarget> {
        None
    }

    fn as_container(&self) -> Option<&Container> {
        None
    }

    fn as_container_mut(&mut self) -> Option<&mut Container> {
        None
    }

    fn as_resize_subscriber(&self) -> Option<&dyn ResizeSubscriber> {
        None
    }
}

/// A component holding children placed by a `Layout`.
pub struct Container {
    bounds: Region,
    params: LayoutParams,
    layout: Box<dyn Layout>,
    children: Vec<Box<dyn Component>>,
}

impl Container {
    pub fn new(layout: impl Layout + 'static) -> Self {
        Self {
            bounds: Region::sized(0, 0),
            params: LayoutParams::Fill,
            layout: Box::new(layout),
            children: Vec::new(),
        }
    }

    /// Sets what this container asks its own parent for.
    pub fn with_params(mut self, params: LayoutParams) -> Self {
        self.params = params;
        self
    }

    /// Adds a child, placing it with this container's layout. If the child
    /// rejects its region, the layout is rebuilt from the existing children so
    /// nothing stays granted to it.
    pub fn add(&mut self, mut child: Box<dyn Component>) -> Result<()> {
        let region = self.place(child.layout_params())?;
        if let Err(e) = child.set_bounds(region) {
            warn!("Container: {} rejected {}: {}", child.name(), region, e);
            self.relayout()?;
            return Err(e);
        }
        debug!("Container: added {} at {}", child.name(), region);
        self.children.push(child);
        Ok(())
    }

    fn place(&mut self, params: LayoutParams) -> Result<Region> {
        match params {
            LayoutParams::Fill => Ok(self.bounds),
            params => self.layout.bounds_for(&params),
        }
    }

    pub fn children(&self) -> &[Box<dyn Component>] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Re-runs the layout for the current bounds and reassigns every child.
    pub fn relayout(&mut self) -> Result<()> {
        self.layout.set_parent_bounds(self.bounds);
        for index in 0..self.children.len() {
            let params = self.children[index].layout_params();
            let region = self.place(params)?;
            self.children[index].set_bounds(region)?;
        }
        Ok(())
    }

    /// Path to the topmost component containing `location`, relative to this
    /// container. Later children sit above earlier ones, and a nested child
    /// sits above its container. Returns `None` if no child contains it.
    pub fn component_at(&self, location: Location) -> Option<ComponentPath> {
        for (index, child) in self.children.iter().enumerate().rev() {
            if !child.bounds().contains(location) {
                continue;
            }
            let mut path = vec![index];
            if let Some(nested) = child.as_container().and_then(|c| c.component_at(location)) {
                path.extend(nested);
            }
            return Some(path);
        }
        None
    }

    /// The component at `path` below this container. The empty path is the
    /// container itself.
    pub fn component_mut(&mut self, path: &[usize]) -> Option<&mut dyn Component> {
        let Some((&first, rest)) = path.split_first() else {
            return Some(self);
        };
        let child = self.children.get_mut(first)?;
        if rest.is_empty() {
            return Some(child.as_mut());
        }
        child.as_container_mut()?.component_mut(rest)
    }

    /// Tells every resize-aware descendant about new grid dimensions.
    fn notify_resized(&self, lines: usize, columns: usize) {
        for child in &self.children {
            if let Some(subscriber) = child.as_resize_subscriber() {
                subscriber.resize(lines, columns);
            }
            if let Some(container) = child.as_container() {
                container.notify_resized(lines, columns);
            }
        }
    }
}

impl Component for Container {
    fn name(&self) -> &str {
        "container"
    }

    fn bounds(&self) -> Region {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Region) -> Result<()> {
        self.bounds = bounds;
        self.relayout()
    }

    fn layout_params(&self) -> LayoutParams {
        self.params
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        for child in &self.children {
            child.draw(canvas);
        }
    }

    fn as_container(&self) -> Option<&Container> {
        Some(self)
    }

    fn as_container_mut(&mut self) -> Option<&mut Container> {
        Some(self)
    }
}

/// The top of the tree, always covering the whole grid.
pub struct RootContainer {
    container: Container,
}

impl RootContainer {
    pub fn new(layout: impl Layout + 'static, lines: usize, columns: usize) -> Self {
        let mut container = Container::new(layout);
        container.bounds = Region::sized(lines, columns);
        container.layout.set_parent_bounds(container.bounds);
        Self { container }
    }

    pub fn bounds(&self) -> Region {
        self.container.bounds
    }

    pub fn add(&mut self, child: Box<dyn Component>) -> Result<()> {
        self.container.add(child)
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    /// Resizes the grid to `lines` x `columns` and lays every child out again.
    pub fn resize(&mut self, lines: usize, columns: usize) -> Result<()> {
        debug!("RootContainer: resizing to {}x{}", lines, columns);
        self.container.set_bounds(Region::sized(lines, columns))?;
        self.container.notify_resized(lines, columns);
        Ok(())
    }

    /// Draws the whole tree into `canvas`, children in insertion order.
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        self.container.draw(canvas);
    }

    /// A fresh buffer covering the grid with the whole tree drawn into it.
    pub fn draw_to_buffer(&self) -> GlyphBuffer {
        let mut buffer = GlyphBuffer::new(self.bounds());
        self.draw(&mut buffer);
        trace!("RootContainer: drew {} children", self.container.len());
        buffer
    }

    pub fn component_at(&self, location: Location) -> Option<ComponentPath> {
        self.container.component_at(location)
    }

    pub fn component_mut(&mut self, path: &[usize]) -> Option<&mut dyn Component> {
        self.container.component_mut(path)
    }
}
