// src/lib.rs

//! A grid of colored characters, laid out by pluggable layouts, rasterized to
//! pixels and driven by a fixed-tick scheduler that also dispatches input.

pub mod buffer;
pub mod color;
pub mod component;
pub mod config;
pub mod error;
pub mod geometry;
pub mod glyph;
pub mod glyph_string;
pub mod keys;
pub mod layout;
pub mod rasterizer;
pub mod resize;
pub mod scheduler;
pub mod surface;

pub use buffer::{Canvas, GlyphBuffer};
pub use color::{NamedColor, Rgba};
pub use component::{Component, Container, Interactable, KeyboardTarget, RootContainer};
pub use config::Config;
pub use error::{GridError, Result};
pub use geometry::{Location, Region};
pub use glyph::{AttrFlags, Attributes, Glyph};
pub use glyph_string::{colorize, escape_sequence, GlyphString};
pub use keys::{KeyEvent, KeySymbol, Modifiers};
pub use layout::{Axis, GridLayout, GridParameters, Layout, LayoutParams, SequentialLayout};
pub use rasterizer::{PixelImage, Rasterizer};
pub use resize::{ResizeNotifier, ResizeSubscriber, SubscriptionId};
pub use scheduler::{Scheduler, SchedulerHandle, TickReport};
pub use surface::{input_channel, DisplaySurface, HeadlessSurface, InputEvent, InputSender};
