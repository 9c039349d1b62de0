//! Simulated upload progress. Values advance on a timer and never reflect
//! bytes actually transferred.

use std::time::Duration;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

pub const TICK_PERIOD: Duration = Duration::from_millis(500);

/// Highest value the simulation reaches; only a confirmed upload shows 100.
pub const SIMULATED_CEILING: f64 = 99.0;

pub fn increment_for(progress: f64) -> f64 {
    if progress < 30.0 {
        5.0
    } else if progress < 60.0 {
        3.0
    } else if progress < 90.0 {
        1.0
    } else {
        0.5
    }
}

pub fn step(progress: f64) -> f64 {
    (progress + increment_for(progress)).min(SIMULATED_CEILING)
}

/// Endless sequence of progress values, one per tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressSimulator {
    current: f64,
}

impl ProgressSimulator {
    pub fn starting_at(current: f64) -> Self {
        Self {
            current: current.clamp(0.0, SIMULATED_CEILING),
        }
    }

    pub fn current(&self) -> f64 {
        self.current
    }
}

impl Iterator for ProgressSimulator {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        self.current = step(self.current);
        Some(self.current)
    }
}

/// Periodic tick source bound to one submission attempt. Dropping it stops the ticks.
#[derive(Debug)]
pub struct Ticker {
    attempt: u64,
    interval: Interval,
}

impl Ticker {
    /// First tick fires one period from now.
    pub fn start(attempt: u64) -> Self {
        let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { attempt, interval }
    }

    pub fn attempt(&self) -> u64 {
        self.attempt
    }

    pub async fn tick(&mut self) -> u64 {
        self.interval.tick().await;
        self.attempt
    }
}
