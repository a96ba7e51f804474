//! End-to-end tests: text with color escapes goes through layout, the glyph
//! buffer, both rasterizers and the scheduler.

use glyph_grid::buffer::{Canvas, GlyphBuffer};
use glyph_grid::color::Rgba;
use glyph_grid::component::{Component, RootContainer};
use glyph_grid::config::Config;
use glyph_grid::error::GridError;
use glyph_grid::geometry::{Location, Region};
use glyph_grid::glyph::Glyph;
use glyph_grid::glyph_string::GlyphString;
use glyph_grid::layout::{Axis, GridLayout, GridParameters, Layout, LayoutParams, SequentialLayout};
use glyph_grid::rasterizer::{BitmapFont, BitmapRasterizer, DirectRasterizer, HeadlessFontDriver, PixelImage, Rasterizer};
use glyph_grid::resize::{ResizeNotifier, ResizeSubscriber};
use glyph_grid::scheduler::Scheduler;
use glyph_grid::surface::{input_channel, HeadlessSurface};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use test_log::test;

// =============================================================================
// Test Fixtures
// =============================================================================

/// Draws fixed text at the top-left of its region.
struct Text {
    text: GlyphString,
    bounds: Region,
    params: LayoutParams,
}

impl Text {
    fn boxed(markup: &str, params: LayoutParams) -> Box<dyn Component> {
        Box::new(Text {
            text: GlyphString::of(markup).unwrap(),
            bounds: Region::sized(0, 0),
            params,
        })
    }
}

impl Component for Text {
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
        canvas.update_lines(&self.text.wrap(self.bounds.width()), self.bounds.start());
    }
}

struct Count(AtomicUsize);

impl ResizeSubscriber for Count {
    fn resize(&self, _lines: usize, _columns: usize) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

// =============================================================================
// Value model scenarios
// =============================================================================

#[test]
fn region_dimensions() {
    let region = Region::from_bounds(0, 0, 5, 10).unwrap();
    assert_eq!((region.width(), region.height()), (10, 5));
}

#[test]
fn buffer_write_is_lenient_and_read_is_strict() {
    let mut buffer = GlyphBuffer::new(Region::from_bounds(0, 0, 5, 10).unwrap());
    buffer.update_glyph(Glyph::from('A'), Location::new(2, 3));
    assert_eq!(buffer.glyph(Location::new(2, 3)).unwrap().c, 'A');

    let before = buffer.clone();
    buffer.update_glyph(Glyph::from('B'), Location::new(10, 10));
    assert_eq!(buffer, before);
    assert!(matches!(
        buffer.glyph(Location::new(10, 10)),
        Err(GridError::OutOfBoundsRead { .. })
    ));
}

#[test]
fn escape_colors_text() {
    let hi = GlyphString::of("\\e[255;000;000mHi").unwrap();
    let chars: Vec<char> = hi.iter().map(|g| g.c).collect();
    assert_eq!(chars, vec!['H', 'i']);
    assert!(hi.iter().all(|g| g.fg() == Rgba::opaque(255, 0, 0)));
}

#[test]
fn wrap_hello_world() {
    let lines = GlyphString::plain("hello world", Rgba::WHITE).wrap(5);
    let texts: Vec<String> = lines.iter().map(GlyphString::text).collect();
    assert_eq!(texts, vec!["hello", "world"]);
}

// =============================================================================
// Layout into buffer into pixels
// =============================================================================

#[test]
fn grid_tree_renders_colored_text_through_direct_rasterizer() {
    let mut root = RootContainer::new(GridLayout::uniform(1, 2), 2, 8);
    root.add(Text::boxed("\\e[000;255;000mgo", GridParameters::cell(0, 0).into())).unwrap();
    root.add(Text::boxed("stop", GridParameters::cell(0, 1).into())).unwrap();

    let buffer = root.draw_to_buffer();
    assert_eq!(buffer.line(0).unwrap().text(), "go  stop");
    assert_eq!(buffer.glyph(Location::new(0, 0)).unwrap().fg(), Rgba::opaque(0, 255, 0));

    let mut rasterizer = DirectRasterizer::new(HeadlessFontDriver::new(4, 8), 4, 8);
    let (w, h) = rasterizer.pixel_size_for(buffer.bounds());
    let image = rasterizer.rasterize(buffer, w, h).unwrap();
    assert_eq!((image.width(), image.height()), (32, 16));

    let green_in_first_cell = (0..8).any(|y| (0..4).any(|x| image.pixel(x, y) == Some(Rgba::opaque(0, 255, 0))));
    assert!(green_in_first_cell);
}

#[test]
fn bitmap_font_chroma_key() {
    let c = Rgba::opaque(10, 20, 30);
    let mut cell = PixelImage::filled(3, 3, Rgba::BLACK);
    cell.set_pixel(1, 1, Rgba::WHITE);
    let font = BitmapFont::from_cells(vec![cell], 'o' as u32).unwrap();

    let image = font.glyph_image(&Glyph::new('o', c)).unwrap().unwrap();
    for y in 0..3 {
        for x in 0..3 {
            let pixel = image.pixel(x, y).unwrap();
            if (x, y) == (1, 1) {
                assert_eq!(pixel, Rgba::new(10, 20, 30, 255));
            } else {
                assert_eq!(pixel.a, 0);
            }
        }
    }

    let mut rasterizer = BitmapRasterizer::new(font);
    let mut buffer = GlyphBuffer::new(Region::sized(1, 1));
    buffer.update_glyph(Glyph::new('o', c), Location::ORIGIN);
    let frame = rasterizer.rasterize(buffer, 3, 3).unwrap();
    assert_eq!(frame.pixel(1, 1), Some(c));
    assert_eq!(frame.pixel(0, 0), Some(Rgba::TRANSPARENT));
}

#[test]
fn sequential_layout_never_overlaps_along_x() {
    let width = 30;
    let mut layout = SequentialLayout::new(Axis::X);
    layout.set_parent_bounds(Region::sized(3, width));
    let mut previous_end = 0;
    for w in [5, 1, 9, 12, 4, 3] {
        let region = layout
            .bounds_for(&LayoutParams::Sequential { width: w, height: 3 })
            .unwrap();
        assert!(region.end().position <= width);
        if !region.is_empty() {
            assert!(region.start().position >= previous_end);
            previous_end = region.end().position;
        }
    }
}

#[test]
fn grid_layout_grants_each_cell_once() {
    let mut layout = GridLayout::uniform(2, 3);
    layout.set_parent_bounds(Region::sized(4, 9));
    for row in 0..2 {
        for col in 0..3 {
            let params = GridParameters::cell(row, col).into();
            assert!(layout.bounds_for(&params).is_ok());
            assert_eq!(
                layout.bounds_for(&params),
                Err(GridError::CellOccupied { row, column: col })
            );
        }
    }
}

// =============================================================================
// Scheduler
// =============================================================================

fn scheduler_with_counter(surface: &HeadlessSurface) -> (Scheduler, Arc<Count>) {
    let mut root = RootContainer::new(GridLayout::uniform(1, 1), 2, 10);
    root.add(Text::boxed("resizable", GridParameters::cell(0, 0).into())).unwrap();
    let notifier = ResizeNotifier::new();
    let count = Arc::new(Count(AtomicUsize::new(0)));
    notifier.subscribe(count.clone());
    let (_input, rx) = input_channel();
    let scheduler = Scheduler::new(
        Config::default(),
        root,
        Box::new(DirectRasterizer::new(HeadlessFontDriver::new(8, 16), 8, 16)),
        Box::new(surface.clone()),
        notifier,
        rx,
    );
    (scheduler, count)
}

#[test]
fn resize_within_window_cascades_once() {
    let surface = HeadlessSurface::new(80, 32);
    let (mut scheduler, count) = scheduler_with_counter(&surface);
    surface.set_pixel_size(120, 48);
    scheduler.tick(Duration::from_millis(40)).unwrap();
    scheduler.tick(Duration::from_millis(40)).unwrap();
    assert_eq!(count.0.load(Ordering::SeqCst), 1);
    assert_eq!(scheduler.dimensions(), (3, 15));
    assert_eq!(surface.last_frame().unwrap().width(), 120);
}

#[test]
fn resize_outside_window_does_not_cascade() {
    let surface = HeadlessSurface::new(80, 32);
    let (mut scheduler, count) = scheduler_with_counter(&surface);
    surface.set_pixel_size(120, 48);
    scheduler.tick(Duration::from_millis(60)).unwrap();
    assert_eq!(count.0.load(Ordering::SeqCst), 0);
    assert_eq!(scheduler.dimensions(), (2, 10));
}
