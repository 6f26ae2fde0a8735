//! Timer-gated spawning

use serde::{Deserialize, Serialize};

/// How often a spawner fires
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Interval {
    /// Simulation seconds between batches
    Seconds(f32),
    /// Simulation steps between batches
    Frames(u32),
}

/// Fires a batch of `batch` entities every interval while the population
/// is below `cap`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spawner {
    pub interval: Interval,
    pub batch: usize,
    pub cap: Option<usize>,
    /// Time of the last firing (seconds mode)
    last_fired: f32,
    /// Steps since the last firing (frames mode)
    counter: u32,
}

impl Spawner {
    pub fn every_seconds(seconds: f32, batch: usize) -> Self {
        Self {
            interval: Interval::Seconds(seconds),
            batch,
            cap: None,
            last_fired: 0.0,
            counter: 0,
        }
    }

    pub fn every_frames(frames: u32, batch: usize) -> Self {
        Self {
            interval: Interval::Frames(frames),
            batch,
            cap: None,
            last_fired: 0.0,
            counter: 0,
        }
    }

    /// Stop spawning while the population is at or above `cap`
    pub fn with_cap(mut self, cap: usize) -> Self {
        self.cap = Some(cap);
        self
    }

    /// Restart the timer at `now`
    pub fn reset(&mut self, now: f32) {
        self.last_fired = now;
        self.counter = 0;
    }

    /// Number of entities to create this step.
    ///
    /// The timer restarts whenever the interval elapses, even if the cap
    /// holds the batch back.
    pub fn poll(&mut self, now: f32, population: usize) -> usize {
        let fired = match self.interval {
            Interval::Seconds(seconds) => {
                if now > self.last_fired + seconds {
                    self.last_fired = now;
                    true
                } else {
                    false
                }
            }
            Interval::Frames(frames) => {
                self.counter += 1;
                if self.counter >= frames {
                    self.counter = 0;
                    true
                } else {
                    false
                }
            }
        };

        if !fired {
            return 0;
        }
        match self.cap {
            Some(cap) if population >= cap => 0,
            _ => self.batch,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;

    #[test]
    fn test_seconds_spawner_fires_after_interval() {
        let mut spawner = Spawner::every_seconds(0.15, 1);
        assert_eq!(spawner.poll(0.1, 0), 0);
        assert_eq!(spawner.poll(0.15, 0), 0);
        assert_eq!(spawner.poll(0.16, 0), 1);
        // Timer restarted at 0.16
        assert_eq!(spawner.poll(0.30, 0), 0);
        assert_eq!(spawner.poll(0.32, 0), 1);
    }

    #[test]
    fn test_frames_spawner_fires_every_n_calls() {
        let mut spawner = Spawner::every_frames(5, 1);
        let fired: Vec<usize> = (0..15).map(|_| spawner.poll(0.0, 0)).collect();
        assert_eq!(fired, vec![0, 0, 0, 0, 1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn test_cap_blocks_batch_but_restarts_timer() {
        let mut spawner = Spawner::every_seconds(0.3, 300).with_cap(2000);
        assert_eq!(spawner.poll(0.31, 1999), 300);
        assert_eq!(spawner.poll(0.62, 2000), 0);
        // The blocked firing still counted as a firing
        assert_eq!(spawner.poll(0.70, 0), 0);
        assert_eq!(spawner.poll(0.93, 0), 300);
    }

    #[test]
    fn test_reset_restarts_interval() {
        let mut spawner = Spawner::every_seconds(1.0, 1);
        spawner.reset(5.0);
        assert_eq!(spawner.poll(5.5, 0), 0);
        assert_eq!(spawner.poll(6.01, 0), 1);
    }

    #[test]
    fn test_fixed_step_rate() {
        // 0.15 s at 60 Hz fires every 10th step
        let mut spawner = Spawner::every_seconds(0.15, 1);
        let mut fired = 0;
        for step in 1..=600 {
            fired += spawner.poll(step as f32 * SIM_DT, 0);
        }
        assert!(fired <= 67);
        assert!(fired >= 50);
    }
}
