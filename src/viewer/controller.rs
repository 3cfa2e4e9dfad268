//! Top-level viewer entry point.
//!
//! [`ModeController`] owns the container, the scheduler and the (at most one) animation
//! session. Every operation that starts drawing, switches presentation or replaces the
//! loaded character first stops the running session, so two sequencers never share a tree.

use std::convert::Infallible;
use std::str::FromStr;

use crate::foundation::core::{Millis, Rgb8};
use crate::foundation::error::KanjiStrokeResult;
use crate::markup::loader::markup_from_base64;
use crate::schedule::cancel::CancelToken;
use crate::schedule::timeline::{Scheduler, TimerId, VirtualClock};
use crate::stroke::measure::prepare_strokes;
use crate::stroke::presenter;
use crate::stroke::sequencer::{DrawPhase, SequencerState, StrokeSequencer};
use crate::viewer::config::ViewerConfig;
use crate::viewer::container::{KanjiContainer, Marker};

/// Requested presentation for a newly set character.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayMode {
    /// Static colorized strokes.
    Color,
    /// Colorized strokes drawn one at a time.
    Animate,
    /// Static strokes in the outline color.
    Outline,
}

impl DisplayMode {
    /// Lenient parse: anything unrecognized selects [`DisplayMode::Outline`].
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "color" | "plain" | "1" => Self::Color,
            "animate" | "colorAnimate" | "animate-with-color" | "2" => Self::Animate,
            _ => Self::Outline,
        }
    }

    /// Canonical name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Color => "color",
            Self::Animate => "animate",
            Self::Outline => "outline",
        }
    }
}

impl FromStr for DisplayMode {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl std::fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
struct AnimationSession {
    token: CancelToken,
    sequencer: StrokeSequencer,
}

/// Owns one container and its animation session; see the module docs.
pub struct ModeController<S: Scheduler = VirtualClock> {
    config: ViewerConfig,
    outline_color: Rgb8,
    container: KanjiContainer,
    scheduler: S,
    session: Option<AnimationSession>,
}

impl ModeController<VirtualClock> {
    /// Controller over a fresh container named by the config, on a virtual clock.
    pub fn with_virtual_clock(config: ViewerConfig) -> KanjiStrokeResult<Self> {
        let container = KanjiContainer::new(config.container_id.clone());
        Self::new(container, VirtualClock::new(), config)
    }
}

impl<S: Scheduler> ModeController<S> {
    /// Controller over `container` driven by `scheduler`. Fails if `config` is invalid.
    pub fn new(
        container: KanjiContainer,
        scheduler: S,
        config: ViewerConfig,
    ) -> KanjiStrokeResult<Self> {
        config.validate()?;
        let outline_color = config.outline_rgb()?;
        Ok(Self {
            config,
            outline_color,
            container,
            scheduler,
            session: None,
        })
    }

    /// Active config.
    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// The container being presented.
    pub fn container(&self) -> &KanjiContainer {
        &self.container
    }

    /// The timer source.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Current clock reading.
    pub fn now(&self) -> Millis {
        self.scheduler.now()
    }

    /// State of the current (or last) animation session; `Idle` if there never was one.
    pub fn sequencer_state(&self) -> SequencerState {
        self.session
            .as_ref()
            .map_or(SequencerState::Idle, |s| s.sequencer.state())
    }

    /// Draw phases of the current (or last) session.
    pub fn session_phases(&self) -> &[DrawPhase] {
        self.session
            .as_ref()
            .map(|s| s.sequencer.phases())
            .unwrap_or_default()
    }

    /// Replace the container's content with `character`'s markup and present it in `mode`.
    ///
    /// The container is emptied first. Returns `false`, leaving it empty, when there is no
    /// payload or the payload does not decode to a usable root.
    #[tracing::instrument(skip(self, encoded))]
    pub fn set_kanji(&mut self, character: char, encoded: Option<&str>, mode: DisplayMode) -> bool {
        tracing::info!("kanji inputted: {character} ({:05x})", u32::from(character));

        self.stop_drawing();
        self.container.clear();

        let Some(encoded) = encoded else {
            return false;
        };
        let Some(mut root) = markup_from_base64(encoded) else {
            return false;
        };
        root.set_attr("width", self.config.display.width.to_string());
        root.set_attr("height", self.config.display.height.to_string());
        self.container.insert(root);

        match mode {
            DisplayMode::Color => {
                self.colorize();
            }
            DisplayMode::Animate => {
                self.colorize();
                self.animate();
            }
            DisplayMode::Outline => {
                self.outline();
            }
        }
        true
    }

    /// Stop any running animation, then color strokes by index.
    pub fn colorize(&mut self) -> usize {
        self.stop_drawing();
        presenter::colorize(&mut self.container, &self.config.palette)
    }

    /// Stop any running animation, then paint strokes in the outline color.
    pub fn outline(&mut self) -> usize {
        self.stop_drawing();
        presenter::outline(&mut self.container, self.outline_color)
    }

    /// Hide every stroke and start drawing them one by one under a fresh session.
    ///
    /// Returns the new session's state, or `Idle` when nothing is loaded.
    #[tracing::instrument(skip(self))]
    pub fn animate(&mut self) -> SequencerState {
        self.stop_drawing();
        let Some(root) = self.container.content_mut() else {
            return SequencerState::Idle;
        };

        prepare_strokes(root);
        let token = CancelToken::new();
        let mut sequencer = StrokeSequencer::new(self.config.time_per_dot_ms, token.clone());
        let state = sequencer.start(root, &mut self.scheduler);
        self.session = Some(AnimationSession { token, sequencer });
        state
    }

    /// Cancel the running animation and draw the loaded character again from the start.
    pub fn reanimate(&mut self) -> SequencerState {
        self.stop_drawing();
        self.animate()
    }

    /// Cancel the running session. A no-op returning `false` when nothing is being drawn.
    pub fn stop_drawing(&mut self) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        session.token.cancel();
        session.sequencer.halt(&mut self.scheduler)
    }

    /// Switch between the colorized and outline presentations.
    pub fn toggle_stroke_order(&mut self) {
        if self.container.has_marker(Marker::OutlineOnly) {
            self.colorize();
        } else {
            self.outline();
        }
        self.log_markers();
    }

    /// Show or hide the whole container; returns whether it is now hidden.
    pub fn toggle_visibility(&mut self) -> bool {
        let hidden = self.container.toggle_marker(Marker::Hidden);
        self.log_markers();
        hidden
    }

    fn log_markers(&self) {
        let classes: Vec<_> = self.container.markers().map(Marker::class_name).collect();
        tracing::debug!(container = self.container.id(), ?classes, "container classes");
    }

    /// Let `ms` milliseconds pass, handling every timer that falls due.
    pub fn advance(&mut self, ms: u64) {
        let until = self.scheduler.now().after(ms);
        while let Some(id) = self.scheduler.next_due(until) {
            self.dispatch(id);
        }
    }

    /// Advance until the session stops drawing or `limit_ms` pass; returns the time spent.
    pub fn run_to_end(&mut self, limit_ms: u64) -> u64 {
        let start = self.scheduler.now();
        let until = start.after(limit_ms);
        while self.sequencer_state().is_drawing() {
            match self.scheduler.next_due(until) {
                Some(id) => self.dispatch(id),
                None => break,
            }
        }
        self.scheduler.now().since(start)
    }

    fn dispatch(&mut self, id: TimerId) {
        let handled = match self.session.as_mut() {
            Some(session) => {
                session
                    .sequencer
                    .on_timer(id, self.container.content_mut(), &mut self.scheduler)
            }
            None => false,
        };
        if !handled {
            tracing::debug!(?id, "timer not claimed by any session");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/viewer/controller.rs"]
mod tests;
