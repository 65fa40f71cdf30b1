//! Virtual-clock timer queue.
//!
//! Timers are identified by what they are for. A restartable timer replaces any
//! pending timer of the same kind, which gives debounce semantics; one-shot
//! timers just accumulate. Due timers come out in deadline order, ties in
//! scheduling order.

use std::time::Duration;

/// Purpose of a pending timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Scroll has been quiet long enough
    ScrollIdle,
    /// Resizing has been quiet long enough
    ResizeSettled,
    /// Reset the secondary bar transform after the hide pulse
    HidePulseReset,
    /// Reset a carousel link transform after its hover pulse
    HoverReset(usize),
    /// Remove a click ripple
    RippleExpired(u64),
}

#[derive(Debug, Clone)]
struct Entry {
    deadline: Duration,
    seq: u64,
    kind: TimerKind,
}

#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    entries: Vec<Entry>,
    next_seq: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a timer without touching existing ones
    pub fn schedule(&mut self, kind: TimerKind, deadline: Duration) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(Entry {
            deadline,
            seq,
            kind,
        });
    }

    /// Cancel any pending timer of this kind, then schedule a fresh one
    pub fn restart(&mut self, kind: TimerKind, deadline: Duration) {
        self.cancel(kind);
        self.schedule(kind, deadline);
    }

    pub fn cancel(&mut self, kind: TimerKind) {
        self.entries.retain(|e| e.kind != kind);
    }

    pub fn is_pending(&self, kind: TimerKind) -> bool {
        self.entries.iter().any(|e| e.kind == kind)
    }

    /// Earliest pending deadline
    pub fn next_deadline(&self) -> Option<Duration> {
        self.entries.iter().map(|e| e.deadline).min()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove and return the earliest timer due at or before `now`
    pub fn pop_due(&mut self, now: Duration) -> Option<(Duration, TimerKind)> {
        let index = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.deadline <= now)
            .min_by_key(|(_, e)| (e.deadline, e.seq))
            .map(|(i, _)| i)?;
        let entry = self.entries.swap_remove(index);
        Some((entry.deadline, entry.kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_restart_replaces_pending_timer() {
        let mut timers = TimerQueue::new();
        timers.restart(TimerKind::ScrollIdle, ms(150));
        timers.restart(TimerKind::ScrollIdle, ms(190));

        assert_eq!(timers.len(), 1);
        assert_eq!(timers.pop_due(ms(160)), None);
        assert_eq!(timers.pop_due(ms(190)), Some((ms(190), TimerKind::ScrollIdle)));
        assert!(timers.is_empty());
    }

    #[test]
    fn test_due_timers_fire_in_deadline_order() {
        let mut timers = TimerQueue::new();
        timers.schedule(TimerKind::RippleExpired(1), ms(600));
        timers.schedule(TimerKind::HoverReset(0), ms(200));
        timers.schedule(TimerKind::HidePulseReset, ms(200));

        assert_eq!(timers.next_deadline(), Some(ms(200)));
        assert_eq!(timers.pop_due(ms(1000)), Some((ms(200), TimerKind::HoverReset(0))));
        assert_eq!(timers.pop_due(ms(1000)), Some((ms(200), TimerKind::HidePulseReset)));
        assert_eq!(timers.pop_due(ms(1000)), Some((ms(600), TimerKind::RippleExpired(1))));
        assert_eq!(timers.pop_due(ms(1000)), None);
    }

    #[test]
    fn test_one_shots_of_same_kind_accumulate() {
        let mut timers = TimerQueue::new();
        timers.schedule(TimerKind::HoverReset(2), ms(200));
        timers.schedule(TimerKind::HoverReset(2), ms(250));
        assert_eq!(timers.len(), 2);

        timers.cancel(TimerKind::HoverReset(2));
        assert!(!timers.is_pending(TimerKind::HoverReset(2)));
    }
}
