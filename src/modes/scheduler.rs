//! Tick scheduling handle owned by the driver
//!
//! The engine only declares the cadence it wants through
//! [`TickSchedule`]; this type turns that into a tokio timer and throws the
//! timer away whenever the declaration changes, so a tick scheduled under an
//! old speed or before a pause or reset can never fire.

use std::future;
use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

use crate::game::TickSchedule;

pub struct TickScheduler {
    applied: Option<TickSchedule>,
    timer: Option<Interval>,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self {
            applied: None,
            timer: None,
        }
    }

    /// Bring the timer in line with the engine's schedule.
    /// Returns true when the outstanding tick was cancelled or rescheduled.
    pub fn sync(&mut self, schedule: TickSchedule) -> bool {
        if self.applied == Some(schedule) {
            return false;
        }

        // The first tick comes one full interval from now
        self.timer = schedule.interval.map(|period| {
            let mut timer = interval_at(Instant::now() + period, period);
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
            timer
        });
        self.applied = Some(schedule);
        true
    }

    /// Drop any outstanding tick
    pub fn cancel(&mut self) {
        self.timer = None;
        self.applied = None;
    }

    pub fn period(&self) -> Option<Duration> {
        self.timer.as_ref().map(Interval::period)
    }

    /// Wait for the next tick. Never completes while no ticks are wanted.
    pub async fn tick(&mut self) {
        match self.timer.as_mut() {
            Some(timer) => {
                timer.tick().await;
            }
            None => future::pending::<()>().await,
        }
    }
}

impl Default for TickScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::timeout;

    fn running(revision: u64, millis: u64) -> TickSchedule {
        TickSchedule {
            revision,
            interval: Some(Duration::from_millis(millis)),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_tick_after_full_interval() {
        let mut scheduler = TickScheduler::new();
        assert!(scheduler.sync(running(1, 150)));
        assert_eq!(scheduler.period(), Some(Duration::from_millis(150)));

        assert!(timeout(Duration::from_millis(100), scheduler.tick()).await.is_err());
        assert!(timeout(Duration::from_millis(100), scheduler.tick()).await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_schedule_never_ticks() {
        let mut scheduler = TickScheduler::new();
        scheduler.sync(TickSchedule {
            revision: 1,
            interval: None,
        });

        assert_eq!(scheduler.period(), None);
        assert!(timeout(Duration::from_secs(5), scheduler.tick()).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_unchanged_schedule_keeps_timer() {
        let mut scheduler = TickScheduler::new();
        assert!(scheduler.sync(running(1, 150)));
        assert!(!scheduler.sync(running(1, 150)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_revision_restarts_timer() {
        let mut scheduler = TickScheduler::new();
        scheduler.sync(running(1, 150));

        tokio::time::advance(Duration::from_millis(140)).await;
        // Same interval, new revision: the tick due in 10ms is stale
        assert!(scheduler.sync(running(2, 150)));
        assert!(timeout(Duration::from_millis(100), scheduler.tick()).await.is_err());
        assert!(timeout(Duration::from_millis(100), scheduler.tick()).await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_speed_change_uses_new_period() {
        let mut scheduler = TickScheduler::new();
        scheduler.sync(running(1, 150));
        scheduler.sync(running(2, 140));

        assert_eq!(scheduler.period(), Some(Duration::from_millis(140)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_timer() {
        let mut scheduler = TickScheduler::new();
        scheduler.sync(running(1, 150));
        scheduler.cancel();

        assert_eq!(scheduler.period(), None);
        assert!(timeout(Duration::from_secs(1), scheduler.tick()).await.is_err());
        // A cancelled scheduler re-arms even for the same schedule
        assert!(scheduler.sync(running(1, 150)));
    }
}
