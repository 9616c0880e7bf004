//! Deferred recomputation.
//!
//! Passes that read measurements must run after the host committed layout.
//! Work requested before the tick fires is merged into the pending set, so
//! any number of triggers costs one tick and one recomputation.

use bitflags::bitflags;

use crate::error::Result;
use crate::host::{TickHandle, TickSource};

bitflags! {
    /// Passes waiting for the next tick
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Work: u8 {
        /// Fixed header / width overflow flags and virtual header position
        const FIXED_HEADER = 1 << 0;
        /// Table width
        const TABLE_WIDTH = 1 << 1;
        /// Header cell width list
        const TH_WIDTHS = 1 << 2;
        /// Position map rebuild
        const FIXED_STATUS = 1 << 3;
        /// Column shadow for the current scroll offset
        const COLUMN_SHADOW = 1 << 4;
    }
}

/// Single in-flight tick per table
#[derive(Debug, Default)]
pub struct TickScheduler {
    pending: Work,
    in_flight: Option<TickHandle>,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `work` to the next tick, requesting one if none is in flight
    pub fn schedule(&mut self, work: Work, ticks: &mut impl TickSource) -> Result<()> {
        if work.is_empty() {
            return Ok(());
        }
        self.pending |= work;
        if self.in_flight.is_none() {
            self.in_flight = Some(ticks.request_tick()?);
        }
        Ok(())
    }

    /// The tick fired: hand over the pending work and clear the guard
    pub fn take(&mut self) -> Work {
        self.in_flight = None;
        std::mem::take(&mut self.pending)
    }

    /// Drop pending work and cancel the in-flight tick
    pub fn cancel(&mut self, ticks: &mut impl TickSource) {
        if let Some(handle) = self.in_flight.take() {
            ticks.cancel_tick(handle);
        }
        self.pending = Work::empty();
    }

    pub fn pending(&self) -> Work {
        self.pending
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingTicks {
        requested: i64,
        cancelled: Vec<TickHandle>,
    }

    impl TickSource for CountingTicks {
        fn request_tick(&mut self) -> Result<TickHandle> {
            self.requested += 1;
            Ok(TickHandle(self.requested))
        }

        fn cancel_tick(&mut self, handle: TickHandle) {
            self.cancelled.push(handle);
        }
    }

    #[test]
    fn test_triggers_coalesce_into_one_tick() {
        let mut ticks = CountingTicks::default();
        let mut scheduler = TickScheduler::new();
        scheduler.schedule(Work::FIXED_STATUS, &mut ticks).unwrap();
        scheduler.schedule(Work::TH_WIDTHS, &mut ticks).unwrap();
        scheduler.schedule(Work::FIXED_STATUS, &mut ticks).unwrap();
        assert_eq!(ticks.requested, 1);
        assert_eq!(scheduler.take(), Work::FIXED_STATUS | Work::TH_WIDTHS);
        assert!(!scheduler.is_in_flight());

        scheduler.schedule(Work::COLUMN_SHADOW, &mut ticks).unwrap();
        assert_eq!(ticks.requested, 2);
    }

    #[test]
    fn test_empty_work_requests_nothing() {
        let mut ticks = CountingTicks::default();
        let mut scheduler = TickScheduler::new();
        scheduler.schedule(Work::empty(), &mut ticks).unwrap();
        assert_eq!(ticks.requested, 0);
    }

    #[test]
    fn test_cancel_clears_timer_and_work() {
        let mut ticks = CountingTicks::default();
        let mut scheduler = TickScheduler::new();
        scheduler.schedule(Work::TABLE_WIDTH, &mut ticks).unwrap();
        scheduler.cancel(&mut ticks);
        assert_eq!(ticks.cancelled, vec![TickHandle(1)]);
        assert!(scheduler.pending().is_empty());
        assert!(!scheduler.is_in_flight());
    }
}
