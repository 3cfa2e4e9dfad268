use std::path::{Path, PathBuf};

use crate::foundation::core::Millis;
use crate::foundation::error::{KanjiStrokeError, KanjiStrokeResult};
use crate::render::raster::{FrameRgba, Rasterizer};
use crate::schedule::timeline::Scheduler;
use crate::viewer::controller::ModeController;

/// Settings handed to a [`FrameSink`] before the first frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SinkConfig {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Frames per second.
    pub fps: u32,
}

/// Consumer of rendered frames. `push_frame` is called with strictly increasing indices.
pub trait FrameSink {
    /// Called once before the first frame.
    fn begin(&mut self, cfg: SinkConfig) -> KanjiStrokeResult<()>;
    /// Consume frame `idx`, taken at clock reading `at`.
    fn push_frame(&mut self, idx: u64, at: Millis, frame: &FrameRgba) -> KanjiStrokeResult<()>;
    /// Called once after the last frame.
    fn end(&mut self) -> KanjiStrokeResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    /// Frames in timeline order, with the clock reading they were taken at.
    pub frames: Vec<(Millis, FrameRgba)>,
}

impl InMemorySink {
    /// Empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Config passed to `begin`, if it was called.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> KanjiStrokeResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, _idx: u64, at: Millis, frame: &FrameRgba) -> KanjiStrokeResult<()> {
        self.frames.push((at, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> KanjiStrokeResult<()> {
        Ok(())
    }
}

/// Writes `frame_00000.png`, `frame_00001.png`, … into a directory.
#[derive(Debug)]
pub struct PngDirSink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl PngDirSink {
    /// Sink writing into `dir`, created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
        }
    }

    /// Paths written since `begin`, in order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// Path of frame `idx` inside `dir`.
    pub fn frame_path(dir: &Path, idx: u64) -> PathBuf {
        dir.join(format!("frame_{idx:05}.png"))
    }
}

impl FrameSink for PngDirSink {
    fn begin(&mut self, _cfg: SinkConfig) -> KanjiStrokeResult<()> {
        self.written.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: u64, _at: Millis, frame: &FrameRgba) -> KanjiStrokeResult<()> {
        let path = Self::frame_path(&self.dir, idx);
        frame.save_png(&path)?;
        self.written.push(path);
        Ok(())
    }

    fn end(&mut self) -> KanjiStrokeResult<()> {
        tracing::debug!(frames = self.written.len(), dir = %self.dir.display(), "frames written");
        Ok(())
    }
}

/// Film the controller's animation at `fps`.
///
/// A frame is taken now, then the clock is advanced one frame interval at a time, taking a
/// frame after each step, until the session stops drawing (the final state is included) or
/// `max_frames` frames were taken. Returns the number of frames pushed.
pub fn render_frames<S: Scheduler>(
    ctl: &mut ModeController<S>,
    raster: &Rasterizer,
    fps: u32,
    max_frames: u64,
    sink: &mut dyn FrameSink,
) -> KanjiStrokeResult<u64> {
    if fps == 0 {
        return Err(KanjiStrokeError::validation("fps must be > 0"));
    }
    let display = raster.display();
    sink.begin(SinkConfig {
        width: display.width,
        height: display.height,
        fps,
    })?;

    let start = ctl.now();
    let mut idx = 0u64;
    while idx < max_frames {
        let frame = raster.rasterize(ctl.container())?;
        sink.push_frame(idx, ctl.now(), &frame)?;
        idx += 1;

        if idx >= max_frames || !ctl.sequencer_state().is_drawing() {
            break;
        }
        let target = start.after(idx.saturating_mul(1000) / u64::from(fps));
        ctl.advance(target.since(ctl.now()));
    }

    sink.end()?;
    Ok(idx)
}

#[cfg(test)]
#[path = "../../tests/unit/render/frames.rs"]
mod tests;
