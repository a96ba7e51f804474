// src/scheduler.rs

//! Fixed-timestep scheduler driving resize detection, input dispatch and
//! repaint.
//!
//! Each update step:
//!
//! 1. Derives grid dimensions from the surface's pixel size. If they changed
//!    and the step's elapsed time is within the resize window, the root
//!    container is resized first, then every `ResizeNotifier` subscriber in
//!    subscription order.
//! 2. Drains the input queue in arrival order. A pointer event goes to the
//!    topmost component under it, if that component is interactable; a `true`
//!    result moves keyboard focus to it when it is also a keyboard target. A
//!    key event goes to the focused component.
//!
//! After the update steps of a loop iteration the root draws into a fresh
//! `GlyphBuffer`, which is moved into the rasterizer, and the image is
//! presented. When the loop falls behind it runs up to `max_catch_up_steps`
//! update steps before that single redraw and drops whatever lag remains.

use crate::component::{ComponentPath, RootContainer};
use crate::config::Config;
use crate::error::Result;
use crate::geometry::Location;
use crate::keys::{KeyEvent, KeySymbol, Modifiers};
use crate::rasterizer::Rasterizer;
use crate::resize::ResizeNotifier;
use crate::surface::{DisplaySurface, InputEvent};
use anyhow::Context;
use log::{debug, error, info, trace, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Receiver;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// What one update step (and optional redraw) did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// The grid dimensions changed and the resize cascade ran.
    pub resized: bool,
    /// Input events drained from the queue.
    pub events: usize,
    /// A frame was presented.
    pub presented: bool,
}

pub struct Scheduler {
    config: Config,
    lines: usize,
    columns: usize,
    root: RootContainer,
    rasterizer: Box<dyn Rasterizer>,
    surface: Box<dyn DisplaySurface>,
    notifier: ResizeNotifier,
    input_rx: Receiver<InputEvent>,
    focus: Option<ComponentPath>,
    pointer: Location,
    shutdown: Arc<AtomicBool>,
}

impl Scheduler {
    /// The grid starts at the root container's current size. Pixels map to
    /// cells at the rasterizer's cell size, which replaces the configured one
    /// when the two disagree.
    pub fn new(
        mut config: Config,
        root: RootContainer,
        rasterizer: Box<dyn Rasterizer>,
        surface: Box<dyn DisplaySurface>,
        notifier: ResizeNotifier,
        input_rx: Receiver<InputEvent>,
    ) -> Self {
        let bounds = root.bounds();
        let (cell_width, cell_height) = rasterizer.cell_size();
        let grid = &mut config.grid;
        if (grid.cell_width_px, grid.cell_height_px) != (cell_width, cell_height) {
            warn!(
                "Scheduler: configured cell size {}x{} px differs from rasterizer's {}x{} px, using the rasterizer's",
                grid.cell_width_px, grid.cell_height_px, cell_width, cell_height
            );
            grid.cell_width_px = cell_width;
            grid.cell_height_px = cell_height;
        }
        Self {
            config,
            lines: bounds.height(),
            columns: bounds.width(),
            root,
            rasterizer,
            surface,
            notifier,
            input_rx,
            focus: None,
            pointer: Location::ORIGIN,
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Current grid dimensions, lines then columns.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.lines, self.columns)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn root(&self) -> &RootContainer {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut RootContainer {
        &mut self.root
    }

    /// Path of the component holding keyboard focus.
    pub fn focus(&self) -> Option<&[usize]> {
        self.focus.as_deref()
    }

    /// Flag checked once per loop iteration; set it to stop `run`.
    pub fn shutdown_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.shutdown)
    }

    /// One update step followed by a redraw.
    pub fn tick(&mut self, delta: Duration) -> Result<TickReport> {
        let mut report = self.update(delta)?;
        self.redraw()?;
        report.presented = true;
        Ok(report)
    }

    /// Resize detection and input dispatch, without drawing.
    pub fn update(&mut self, delta: Duration) -> Result<TickReport> {
        let resized = self.check_resize(delta)?;
        let events = self.dispatch_input();
        Ok(TickReport {
            resized,
            events,
            presented: false,
        })
    }

    fn check_resize(&mut self, delta: Duration) -> Result<bool> {
        let (width_px, height_px) = self.surface.pixel_size();
        let (lines, columns) = self.config.grid.dimensions_for(width_px, height_px);

        if (lines, columns) == (self.lines, self.columns) {
            return Ok(false);
        }
        if delta > self.config.scheduler.resize_window() {
            trace!(
                "Scheduler: deferring resize to {}x{}, tick took {:?}",
                lines,
                columns,
                delta
            );
            return Ok(false);
        }

        info!(
            "Scheduler: grid resized {}x{} -> {}x{}",
            self.lines, self.columns, lines, columns
        );
        self.root.resize(lines, columns)?;
        self.lines = lines;
        self.columns = columns;
        self.notifier.notify(lines, columns);
        Ok(true)
    }

    fn dispatch_input(&mut self) -> usize {
        let mut count = 0;
        while let Ok(event) = self.input_rx.try_recv() {
            count += 1;
            match event {
                InputEvent::Pointer { x_px, y_px } => {
                    let grid = &self.config.grid;
                    let location = Location::new(
                        y_px / grid.cell_height_px.max(1),
                        x_px / grid.cell_width_px.max(1),
                    );
                    self.pointer = location;
                    self.click(location);
                }
                InputEvent::Key { symbol, modifiers } => self.key(symbol, modifiers),
            }
        }
        count
    }

    fn click(&mut self, location: Location) {
        let Some(path) = self.root.component_at(location) else {
            trace!("Scheduler: click at {} hit nothing", location);
            return;
        };
        let Some(component) = self.root.component_mut(&path) else {
            return;
        };
        let Some(target) = component.as_interactable_mut() else {
            trace!("Scheduler: {} at {} is not interactable", component.name(), location);
            return;
        };
        if !target.clicked(location) {
            return;
        }
        if component.as_keyboard_target_mut().is_some() {
            debug!("Scheduler: keyboard focus -> {} {:?}", component.name(), path);
            self.focus = Some(path);
        } else {
            debug!(
                "Scheduler: {} asked for focus but takes no keys",
                component.name()
            );
        }
    }

    fn key(&mut self, symbol: KeySymbol, modifiers: Modifiers) {
        let Some(path) = self.focus.as_deref() else {
            trace!("Scheduler: no focus, dropping {:?}", symbol);
            return;
        };
        let event = KeyEvent::new(self.pointer, symbol, modifiers);
        match self
            .root
            .component_mut(path)
            .and_then(|component| component.as_keyboard_target_mut())
        {
            Some(target) => target.key_pressed(&event),
            None => {
                warn!("Scheduler: focused component {:?} is gone", path);
                self.focus = None;
            }
        }
    }

    /// Draws the tree, rasterizes it and presents the frame.
    pub fn redraw(&mut self) -> Result<()> {
        let (width_px, height_px) = self.surface.pixel_size();
        let buffer = self.root.draw_to_buffer();
        let image = self.rasterizer.rasterize(buffer, width_px, height_px)?;
        self.surface.present(image)
    }

    /// Runs until the shutdown flag is set or a step fails.
    pub fn run(&mut self) -> Result<()> {
        let tick = self.config.scheduler.tick_duration();
        let max_steps = self.config.scheduler.max_catch_up_steps.max(1);
        info!(
            "Scheduler: running at {} ticks/s ({:?} per tick)",
            self.config.scheduler.ticks_per_second, tick
        );

        let mut last = Instant::now();
        let mut lag = Duration::ZERO;
        while !self.shutdown.load(Ordering::Acquire) {
            let now = Instant::now();
            let elapsed = now - last;
            last = now;
            lag += elapsed;

            let steps = catch_up_steps(lag, tick, max_steps);
            for _ in 0..steps {
                self.update(elapsed)?;
            }
            lag = lag.saturating_sub(tick * steps);
            if lag >= tick {
                debug!("Scheduler: dropping {:?} of lag", lag);
                lag = Duration::ZERO;
            }
            self.redraw()?;

            let next = now + tick;
            let after = Instant::now();
            if next > after {
                thread::sleep(next - after);
            }
        }
        info!("Scheduler: shutdown requested, loop exiting");
        Ok(())
    }

    /// Moves the scheduler onto its own thread.
    pub fn spawn(self) -> anyhow::Result<SchedulerHandle> {
        let shutdown = self.shutdown_flag();
        let mut scheduler = self;
        let thread = thread::Builder::new()
            .name("scheduler".to_string())
            .spawn(move || {
                let result = scheduler.run();
                if let Err(e) = &result {
                    error!("Scheduler thread error: {}", e);
                }
                result
            })
            .context("Failed to spawn scheduler thread")?;
        info!("Scheduler: spawned background thread");
        Ok(SchedulerHandle {
            shutdown,
            thread: Some(thread),
        })
    }
}

/// Update steps to run for `lag`: at least one, at most `max_steps`.
pub(crate) fn catch_up_steps(lag: Duration, tick: Duration, max_steps: u32) -> u32 {
    let whole = if tick.is_zero() {
        max_steps as u128
    } else {
        lag.as_nanos() / tick.as_nanos()
    };
    whole.clamp(1, max_steps.max(1) as u128) as u32
}

/// Owner's handle to a scheduler running on its own thread.
pub struct SchedulerHandle {
    shutdown: Arc<AtomicBool>,
    thread: Option<JoinHandle<Result<()>>>,
}

impl SchedulerHandle {
    /// Asks the loop to stop after its current iteration.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Release);
    }

    pub fn is_finished(&self) -> bool {
        self.thread.as_ref().map_or(true, |t| t.is_finished())
    }

    /// Stops the loop and waits for the thread, returning the loop's result.
    pub fn join(mut self) -> anyhow::Result<()> {
        self.shutdown();
        match self.thread.take() {
            Some(thread) => {
                let result = thread
                    .join()
                    .map_err(|_| anyhow::anyhow!("scheduler thread panicked"))?;
                result.context("Scheduler loop failed")
            }
            None => Ok(()),
        }
    }
}

impl Drop for SchedulerHandle {
    fn drop(&mut self) {
        if let Some(thread) = self.thread.take() {
            self.shutdown();
            if thread.join().is_err() {
                error!("Scheduler thread panicked during shutdown");
            }
        }
    }
}
