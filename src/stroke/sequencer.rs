//! Stroke-by-stroke draw animation.
//!
//! A [`StrokeSequencer`] reveals the strokes of one loaded character in document order. Each
//! stroke's dash offset runs from its full length down to zero, one unit per `time_per_dot_ms`.
//! Two timers serve each stroke: a one-shot completion timer at `length * time_per_dot_ms`,
//! which alone decides when the next stroke starts, and a repeating ticker that moves the
//! visible offset. Completion always leaves the stroke at offset 0.
//!
//! Cancellation is cooperative. The owner either cancels the session's [`CancelToken`] and
//! calls [`StrokeSequencer::halt`], which disarms both timers immediately, or just cancels
//! the token, in which case the next timer the sequencer receives halts it. Either way the
//! strokes keep exactly the offsets they had and no further stroke starts.

use crate::foundation::core::Millis;
use crate::markup::tree::Element;
use crate::schedule::cancel::CancelToken;
use crate::schedule::timeline::{Scheduler, TimerId};
use crate::stroke::view::{stroke_mut, strokes};

/// Lifecycle of one animation session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum SequencerState {
    /// Not started yet.
    Idle,
    /// Stroke `i` (0-based) is being drawn.
    DrawingStroke(usize),
    /// Stopped before the last stroke finished.
    Cancelled,
    /// Every stroke was drawn.
    Completed,
}

impl SequencerState {
    /// Whether a stroke is being drawn.
    pub fn is_drawing(self) -> bool {
        matches!(self, Self::DrawingStroke(_))
    }
}

/// Record of one stroke's draw phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct DrawPhase {
    /// Stroke index in drawing order.
    pub index: usize,
    /// Stroke length in path units.
    pub length: u32,
    /// Clock reading when the phase began.
    pub started_at: Millis,
    /// `length * time_per_dot_ms`.
    pub duration_ms: u64,
    /// Set when the phase completes; stays `None` for a cancelled phase.
    pub ended_at: Option<Millis>,
}

#[derive(Debug)]
struct DrawStep {
    index: usize,
    remaining: u32,
    completion: TimerId,
    ticker: Option<TimerId>,
}

/// Drives one animation session over a stroke sequence.
#[derive(Debug)]
pub struct StrokeSequencer {
    time_per_dot_ms: u64,
    token: CancelToken,
    state: SequencerState,
    lengths: Vec<u32>,
    step: Option<DrawStep>,
    phases: Vec<DrawPhase>,
}

impl StrokeSequencer {
    /// Idle sequencer drawing one length unit per `time_per_dot_ms`, stopped by `token`.
    pub fn new(time_per_dot_ms: u64, token: CancelToken) -> Self {
        Self {
            time_per_dot_ms,
            token,
            state: SequencerState::Idle,
            lengths: Vec::new(),
            step: None,
            phases: Vec::new(),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SequencerState {
        self.state
    }

    /// Draw phases so far, one per started stroke.
    pub fn phases(&self) -> &[DrawPhase] {
        &self.phases
    }

    /// Whether a draw step is pending.
    pub fn is_running(&self) -> bool {
        self.step.is_some()
    }

    /// Begin drawing the strokes under `root`.
    ///
    /// Stroke lengths are read from their `data-length` attribute (unmeasured strokes count as
    /// zero length). Only valid from `Idle`; otherwise the current state is returned unchanged.
    pub fn start(&mut self, root: &mut Element, sched: &mut dyn Scheduler) -> SequencerState {
        if self.state != SequencerState::Idle {
            tracing::debug!(state = ?self.state, "sequencer already used; start ignored");
            return self.state;
        }

        self.lengths = strokes(root)
            .iter()
            .map(|s| s.length().unwrap_or(0))
            .collect();

        if self.lengths.is_empty() {
            tracing::debug!("no strokes to draw");
            self.state = SequencerState::Completed;
            return self.state;
        }

        self.begin_stroke(0, root, sched);
        self.state
    }

    /// React to a fired timer. Returns `false` if the timer does not belong to this session.
    ///
    /// `root` is the tree the session was started on; `None` means it was removed, which
    /// halts the session.
    pub fn on_timer(
        &mut self,
        id: TimerId,
        root: Option<&mut Element>,
        sched: &mut dyn Scheduler,
    ) -> bool {
        let Some(step) = self.step.as_ref() else {
            return false;
        };
        let is_tick = step.ticker == Some(id);
        if !is_tick && step.completion != id {
            return false;
        }

        if self.token.is_cancelled() {
            self.halt(sched);
            return true;
        }
        let Some(root) = root else {
            tracing::debug!("stroke tree went away mid-draw");
            self.halt(sched);
            return true;
        };

        if is_tick {
            self.tick(id, root, sched);
        } else {
            self.complete_stroke(root, sched);
        }
        true
    }

    /// Stop a pending draw step now: disarm its timers and move to `Cancelled`.
    ///
    /// Stroke offsets are left as they are. Returns `false` (and changes nothing) when no
    /// step is pending.
    pub fn halt(&mut self, sched: &mut dyn Scheduler) -> bool {
        let Some(step) = self.step.take() else {
            return false;
        };
        sched.clear(step.completion);
        if let Some(ticker) = step.ticker {
            sched.clear(ticker);
        }
        tracing::debug!(
            stroke = step.index,
            remaining = step.remaining,
            "drawing halted"
        );
        self.state = SequencerState::Cancelled;
        true
    }

    fn begin_stroke(&mut self, index: usize, root: &mut Element, sched: &mut dyn Scheduler) {
        let length = self.lengths[index];
        if let Some(mut stroke) = stroke_mut(root, index) {
            stroke.set_offset(length);
        }

        let duration_ms = u64::from(length).saturating_mul(self.time_per_dot_ms);
        let ticker = (length > 0).then(|| sched.set_interval(self.time_per_dot_ms));
        let completion = sched.set_timeout(duration_ms);

        self.step = Some(DrawStep {
            index,
            remaining: length,
            completion,
            ticker,
        });
        self.phases.push(DrawPhase {
            index,
            length,
            started_at: sched.now(),
            duration_ms,
            ended_at: None,
        });
        self.state = SequencerState::DrawingStroke(index);
        tracing::debug!(stroke = index, length, duration_ms, "drawing stroke");
    }

    fn tick(&mut self, id: TimerId, root: &mut Element, sched: &mut dyn Scheduler) {
        let Some(step) = self.step.as_mut() else {
            return;
        };
        step.remaining = step.remaining.saturating_sub(1);
        if let Some(mut stroke) = stroke_mut(root, step.index) {
            stroke.set_offset(step.remaining);
        }
        if step.remaining == 0 {
            sched.clear(id);
            step.ticker = None;
        }
    }

    fn complete_stroke(&mut self, root: &mut Element, sched: &mut dyn Scheduler) {
        let Some(step) = self.step.take() else {
            return;
        };
        if let Some(ticker) = step.ticker {
            sched.clear(ticker);
        }
        if let Some(mut stroke) = stroke_mut(root, step.index) {
            stroke.set_offset(0);
        }
        if let Some(phase) = self.phases.last_mut() {
            phase.ended_at = Some(sched.now());
        }

        let next = step.index + 1;
        if next < self.lengths.len() {
            self.begin_stroke(next, root, sched);
        } else {
            tracing::debug!(strokes = self.lengths.len(), "drawing completed");
            self.state = SequencerState::Completed;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stroke/sequencer.rs"]
mod tests;
