// src/main.rs

//! Headless demo: builds a small component tree, runs the scheduler for a
//! moment while feeding it clicks, keys and a resize, then reports what was
//! presented.
//!
//! Usage: `glyph-grid [config.json]`

use anyhow::Context;
use glyph_grid::buffer::Canvas;
use glyph_grid::color::NamedColor;
use glyph_grid::component::{Component, Container, Interactable, KeyboardTarget, RootContainer};
use glyph_grid::config::{ColorScheme, Config};
use glyph_grid::geometry::{Location, Region};
use glyph_grid::glyph::{AttrFlags, Glyph};
use glyph_grid::glyph_string::{colorize, GlyphString};
use glyph_grid::keys::{KeyEvent, KeySymbol, Modifiers};
use glyph_grid::layout::{Axis, GridLayout, GridParameters, LayoutParams, SequentialLayout};
use glyph_grid::rasterizer::{DirectRasterizer, HeadlessFontDriver};
use glyph_grid::resize::{ResizeNotifier, ResizeSubscriber};
use glyph_grid::scheduler::Scheduler;
use glyph_grid::surface::{input_channel, HeadlessSurface};
use log::{info, warn};
use std::sync::Arc;
use std::time::Duration;

/// Word-wrapped text.
struct Label {
    text: GlyphString,
    bounds: Region,
    params: LayoutParams,
}

impl Component for Label {
    fn name(&self) -> &str {
        "label"
    }

    fn bounds(&self) -> Region {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Region) -> glyph_grid::Result<()> {
        self.bounds = bounds;
        Ok(())
    }

    fn layout_params(&self) -> LayoutParams {
        self.params
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        let lines = self.text.wrap(self.bounds.width());
        let visible = lines.len().min(self.bounds.height());
        canvas.update_lines(&lines[..visible], self.bounds.start());
    }
}

/// Counts clicks and shows the count.
struct Counter {
    clicks: usize,
    bounds: Region,
    params: LayoutParams,
}

impl Interactable for Counter {
    fn clicked(&mut self, location: Location) -> bool {
        self.clicks += 1;
        info!("Counter: click {} at {}", self.clicks, location);
        false
    }
}

impl Component for Counter {
    fn name(&self) -> &str {
        "counter"
    }

    fn bounds(&self) -> Region {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Region) -> glyph_grid::Result<()> {
        self.bounds = bounds;
        Ok(())
    }

    fn layout_params(&self) -> LayoutParams {
        self.params
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        let text = GlyphString::plain(&format!("[clicks: {}]", self.clicks), NamedColor::Yellow.into());
        canvas.update_string(&text, self.bounds.start());
    }

    fn as_interactable_mut(&mut self) -> Option<&mut dyn Interactable> {
        Some(self)
    }
}

/// A single-line text field that takes focus when clicked.
struct TextField {
    text: String,
    colors: ColorScheme,
    bounds: Region,
    params: LayoutParams,
}

impl Interactable for TextField {
    fn clicked(&mut self, _location: Location) -> bool {
        true
    }
}

impl KeyboardTarget for TextField {
    fn key_pressed(&mut self, event: &KeyEvent) {
        match event.symbol {
            KeySymbol::Backspace => {
                self.text.pop();
            }
            symbol => {
                if let Some(c) = symbol.as_char().filter(|c| !c.is_control()) {
                    let c = if event.has_modifier(Modifiers::SHIFT) {
                        c.to_ascii_uppercase()
                    } else {
                        c
                    };
                    self.text.push(c);
                }
            }
        }
    }
}

impl Component for TextField {
    fn name(&self) -> &str {
        "text-field"
    }

    fn bounds(&self) -> Region {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Region) -> glyph_grid::Result<()> {
        self.bounds = bounds;
        Ok(())
    }

    fn layout_params(&self) -> LayoutParams {
        self.params
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        let cursor = Location::new(
            self.bounds.start().line,
            self.bounds.start().position + self.text.chars().count(),
        );
        let ColorScheme { foreground, background } = self.colors;
        let text: GlyphString = self
            .text
            .chars()
            .map(|c| Glyph::with_colors(c, foreground, background))
            .collect();
        canvas.update_string(&text, self.bounds.start());
        // Block cursor in reverse video.
        canvas.update_glyph(
            Glyph::with_colors(' ', foreground, background).with_flags(AttrFlags::REVERSE),
            cursor,
        );
    }

    fn as_interactable_mut(&mut self) -> Option<&mut dyn Interactable> {
        Some(self)
    }

    fn as_keyboard_target_mut(&mut self) -> Option<&mut dyn KeyboardTarget> {
        Some(self)
    }
}

struct ResizeLogger;

impl ResizeSubscriber for ResizeLogger {
    fn resize(&self, lines: usize, columns: usize) {
        info!("ResizeLogger: grid is now {}x{}", lines, columns);
    }
}

fn build_tree(config: &Config) -> anyhow::Result<RootContainer> {
    let grid = &config.grid;
    let mut root = RootContainer::new(GridLayout::new(&[1, 2]), grid.lines, grid.columns);

    let banner = GlyphString::of(&format!(
        "{} renders {} into pixels, one tick at a time.",
        colorize("glyph-grid", NamedColor::BrightCyan.into()),
        colorize("colored glyphs", NamedColor::BrightGreen.into()),
    ))
    .context("Banner text has a bad color escape")?;
    root.add(Box::new(Label {
        text: banner,
        bounds: Region::sized(0, 0),
        params: GridParameters::cell(0, 0).into(),
    }))?;

    let mut controls =
        Container::new(SequentialLayout::new(Axis::Y)).with_params(GridParameters::cell(1, 0).into());
    controls.add(Box::new(Counter {
        clicks: 0,
        bounds: Region::sized(0, 0),
        params: LayoutParams::Sequential { width: 16, height: 1 },
    }))?;
    controls.add(Box::new(TextField {
        text: String::new(),
        colors: config.colors.clone(),
        bounds: Region::sized(0, 0),
        params: LayoutParams::Sequential { width: 32, height: 1 },
    }))?;
    root.add(Box::new(controls))?;

    root.add(Box::new(Label {
        text: GlyphString::plain("Click the field, then type.", config.colors.foreground),
        bounds: Region::sized(0, 0),
        params: GridParameters::cell(1, 1).into(),
    }))?;
    Ok(root)
}

/// Main entry point for the `glyph-grid` demo.
fn main() -> anyhow::Result<()> {
    // Initialize the logger. Default filter is "info" if RUST_LOG is not set.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    info!("Starting glyph-grid demo...");

    let config = match std::env::args().nth(1) {
        Some(path) => Config::load(&path)?,
        None => {
            info!("No configuration file given, using defaults.");
            Config::default()
        }
    };
    let grid = config.grid.clone();

    let root = build_tree(&config).context("Failed to build component tree")?;
    let surface = HeadlessSurface::new(
        grid.columns * grid.cell_width_px,
        grid.lines * grid.cell_height_px,
    );
    let notifier = ResizeNotifier::new();
    notifier.subscribe(Arc::new(ResizeLogger));
    let (input, input_rx) = input_channel();

    let scheduler = Scheduler::new(
        config,
        root,
        Box::new(DirectRasterizer::from_font_metrics(HeadlessFontDriver::new(
            grid.cell_width_px,
            grid.cell_height_px,
        ))),
        Box::new(surface.clone()),
        notifier,
        input_rx,
    );
    let handle = scheduler.spawn()?;

    // The controls start half-way down the grid: counter first, then the text field.
    let controls_top = (grid.lines / 2) * grid.cell_height_px;
    input.click(grid.cell_width_px, controls_top)?;
    input.click(grid.cell_width_px, controls_top + 2 * grid.cell_height_px)?;
    for c in "hello".chars() {
        input.key(KeySymbol::Char(c), Modifiers::empty())?;
    }
    std::thread::sleep(Duration::from_millis(200));

    info!("Growing the surface by ten columns.");
    surface.set_pixel_size(
        (grid.columns + 10) * grid.cell_width_px,
        grid.lines * grid.cell_height_px,
    );
    std::thread::sleep(Duration::from_millis(200));

    handle.join().context("Scheduler did not shut down cleanly")?;

    match surface.last_frame() {
        Some(frame) => info!(
            "Presented {} frames; last frame {}x{} px",
            surface.frames(),
            frame.width(),
            frame.height()
        ),
        None => warn!("No frame was presented."),
    }
    info!("glyph-grid exited successfully.");
    Ok(())
}
