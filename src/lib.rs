//! kanjistroke presents a single character's stroke-path SVG the way a flashcard viewer does:
//! as a plain outline, with each stroke in its own color, or drawn stroke by stroke.
//!
//! # Pipeline overview
//!
//! 1. **Load**: a base64 payload of SVG text decodes into an owned visual tree (`Element`).
//! 2. **Present**: the tree goes into a `KanjiContainer`; strokes (its `path` elements) are
//!    colored by golden-ratio hue or painted in the outline color.
//! 3. **Animate**: a `StrokeSequencer` reveals strokes in order on a `Scheduler` timeline,
//!    one length unit per `time_per_dot_ms`, and can be cancelled at any instant.
//! 4. **Render** (optional): snapshots of the container rasterize to PNG frames.
//!
//! `ModeController` ties these together and owns the single live animation session.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Single timeline**: timers fire one at a time in due order; `VirtualClock` makes every
//!   animation reproducible.
//! - **Quiet core**: loading, presenting and sequencing never error. Bad payloads give
//!   `None`, operations on an empty container do nothing, cancellation is a state.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod color;
mod foundation;
mod kanjivg;
mod markup;
mod render;
mod schedule;
mod stroke;
mod viewer;

pub use color::palette::{GOLDEN_RATIO_FRACT, StrokePalette, hsv_to_rgb, hsv_to_rgb_hex};
pub use foundation::core::{DisplayBox, Millis, Rgb8};
pub use foundation::error::{KanjiStrokeError, KanjiStrokeResult};
pub use kanjivg::store::{KanjiVg, ascii_filename};
pub use markup::loader::{decode_payload, markup_from_base64, markup_from_str, parse_markup};
pub use markup::payload::{PayloadOptions, encode_payload, remove_stroke_numbers};
pub use markup::tree::{Element, Node};
pub use render::frames::{FrameSink, InMemorySink, PngDirSink, SinkConfig, render_frames};
pub use render::raster::{FrameRgba, Rasterizer, snapshot_markup};
pub use schedule::cancel::CancelToken;
pub use schedule::timeline::{Scheduler, TimerId, VirtualClock};
pub use stroke::measure::{DATA_LENGTH_ATTR, path_length, prepare_strokes, stroke_length};
pub use stroke::presenter::{colorize, outline};
pub use stroke::sequencer::{DrawPhase, SequencerState, StrokeSequencer};
pub use stroke::view::{StrokeMut, StrokeRef, for_each_stroke_mut, stroke_mut, strokes};
pub use viewer::config::ViewerConfig;
pub use viewer::container::{KanjiContainer, Marker};
pub use viewer::controller::{DisplayMode, ModeController};
