//! Headless list-mode benchmark
//!
//! Runs the list benchmark scene without a window, once per list mode, and
//! times how long building the depth order takes per step.

use std::time::{Duration, Instant};

use crate::consts::SIM_DT;
use crate::sim::{Action, ListMode, SceneKind, SceneState, apply, tick};

/// Steps between pilot ejections
const EJECT_EVERY: u64 = 6;
/// Fixed seed so both modes see the same ships
const BENCH_SEED: u64 = 0x5eed;

/// Timing for one list mode
#[derive(Debug, Clone, PartialEq)]
pub struct BenchReport {
    pub mode: ListMode,
    pub steps: u64,
    /// Total time spent sorting and collecting the drawable layer
    pub ordering: Duration,
    /// Most sprites in the depth-sorted layer at once
    pub peak_sprites: usize,
}

impl BenchReport {
    pub fn per_step(&self) -> Duration {
        if self.steps == 0 {
            return Duration::ZERO;
        }
        self.ordering.div_f64(self.steps as f64)
    }
}

/// Run `steps` steps in one list mode
pub fn run_mode(mode: ListMode, steps: u64) -> BenchReport {
    let mut state = SceneState::new(SceneKind::ListBench, BENCH_SEED);
    state.set_list_mode(mode);

    let mut ordering = Duration::ZERO;
    let mut peak_sprites = 0;
    for step in 1..=steps {
        tick(&mut state, SIM_DT);
        if step % EJECT_EVERY == 0 {
            apply(&mut state, Action::EjectRandom);
        }

        let start = Instant::now();
        state.prepare_draw();
        let layer = state.foreground().len();
        ordering += start.elapsed();
        peak_sprites = peak_sprites.max(layer);
    }

    BenchReport {
        mode,
        steps,
        ordering,
        peak_sprites,
    }
}

/// Run both list modes and log the comparison
pub fn run(steps: u64) -> Vec<BenchReport> {
    log::info!("Benchmarking {steps} steps per list mode");
    [ListMode::Separate, ListMode::Single]
        .into_iter()
        .map(|mode| {
            let report = run_mode(mode, steps);
            log::info!(
                "{:?}: {:?} per step ordering, peak {} sprites",
                report.mode,
                report.per_step(),
                report.peak_sprites
            );
            report
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_modes_reported() {
        let reports = run(120);
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].mode, ListMode::Separate);
        assert_eq!(reports[1].mode, ListMode::Single);
        assert!(reports.iter().all(|r| r.steps == 120));
    }

    #[test]
    fn test_layer_fills_up() {
        // Ships arrive in batches of ten from the first spawn on
        for mode in [ListMode::Separate, ListMode::Single] {
            assert!(run_mode(mode, 90).peak_sprites >= 10);
        }
    }

    #[test]
    fn test_per_step_handles_huge_step_counts() {
        let report = BenchReport {
            mode: ListMode::Separate,
            steps: 1 << 32,
            ordering: Duration::from_secs(1 << 32),
            peak_sprites: 0,
        };
        let per_step = report.per_step();
        assert!((per_step.as_secs_f64() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_steps() {
        let report = run_mode(ListMode::Single, 0);
        assert_eq!(report.per_step(), Duration::ZERO);
        assert_eq!(report.peak_sprites, 0);
    }
}
