//! Timer scheduling.
//!
//! All work runs on one timeline: callers arm one-shot and repeating timers, then pump the
//! scheduler for due timers and react to each in turn. Nothing fires concurrently.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use crate::foundation::core::Millis;

/// Handle for an armed timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

/// Timer source driving the stroke sequencer.
pub trait Scheduler {
    /// Current clock reading.
    fn now(&self) -> Millis;

    /// Arm a one-shot timer firing `delay_ms` from now.
    fn set_timeout(&mut self, delay_ms: u64) -> TimerId;

    /// Arm a repeating timer firing every `period_ms` from now until cleared.
    fn set_interval(&mut self, period_ms: u64) -> TimerId;

    /// Disarm a timer. Clearing an unknown or already-fired timer is a no-op.
    fn clear(&mut self, id: TimerId);

    /// Pop the next timer due at or before `until`, moving the clock to its due time.
    ///
    /// When nothing is due the clock settles at `until` and `None` is returned.
    fn next_due(&mut self, until: Millis) -> Option<TimerId>;
}

#[derive(Clone, Copy, Debug)]
enum TimerKind {
    Timeout,
    Interval { period_ms: u64 },
}

/// Deterministic, manually advanced [`Scheduler`].
///
/// Timers fire in due-time order; ties fire in arming order, and an interval's re-arm counts
/// as arming it again.
#[derive(Debug, Default)]
pub struct VirtualClock {
    now: Millis,
    next_id: u64,
    next_seq: u64,
    queue: BinaryHeap<Reverse<(Millis, u64, TimerId)>>,
    armed: HashMap<TimerId, TimerKind>,
}

impl VirtualClock {
    /// Clock at time zero with nothing armed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of timers still armed.
    pub fn armed(&self) -> usize {
        self.armed.len()
    }

    /// Whether `id` is still armed.
    pub fn is_armed(&self, id: TimerId) -> bool {
        self.armed.contains_key(&id)
    }

    fn arm(&mut self, delay_ms: u64, kind: TimerKind) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.armed.insert(id, kind);
        self.enqueue(self.now.after(delay_ms), id);
        id
    }

    fn enqueue(&mut self, due: Millis, id: TimerId) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Reverse((due, seq, id)));
    }
}

impl Scheduler for VirtualClock {
    fn now(&self) -> Millis {
        self.now
    }

    fn set_timeout(&mut self, delay_ms: u64) -> TimerId {
        self.arm(delay_ms, TimerKind::Timeout)
    }

    fn set_interval(&mut self, period_ms: u64) -> TimerId {
        // A zero period would fire forever without time passing.
        let period_ms = period_ms.max(1);
        self.arm(period_ms, TimerKind::Interval { period_ms })
    }

    fn clear(&mut self, id: TimerId) {
        self.armed.remove(&id);
    }

    fn next_due(&mut self, until: Millis) -> Option<TimerId> {
        while let Some(&Reverse((due, _, id))) = self.queue.peek() {
            if due > until {
                break;
            }
            self.queue.pop();

            // Cleared timers leave stale queue entries behind.
            let Some(kind) = self.armed.get(&id).copied() else {
                continue;
            };

            self.now = self.now.max(due);
            match kind {
                TimerKind::Timeout => {
                    self.armed.remove(&id);
                }
                TimerKind::Interval { period_ms } => self.enqueue(due.after(period_ms), id),
            }
            return Some(id);
        }

        self.now = self.now.max(until);
        None
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/timeline.rs"]
mod tests;
