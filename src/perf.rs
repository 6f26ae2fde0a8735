//! Frame rate tracking for the console and the on-screen graph

use std::collections::VecDeque;

/// Frames averaged for the FPS figure
const FPS_WINDOW: usize = 60;
/// Samples kept by the graph
pub const GRAPH_SAMPLES: usize = 120;

/// FPS from the timestamps of the last 60 frames
#[derive(Debug, Clone)]
pub struct FrameStats {
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    fps: u32,
}

impl Default for FrameStats {
    fn default() -> Self {
        Self {
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            fps: 0,
        }
    }
}

impl FrameStats {
    /// Record a frame at `time` milliseconds
    pub fn record(&mut self, time: f64) {
        self.frame_times[self.frame_index] = time;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;

        // The slot we will overwrite next holds the oldest frame
        let oldest = self.frame_times[self.frame_index];
        if oldest > 0.0 {
            let elapsed = time - oldest;
            if elapsed > 0.0 {
                self.fps = ((FPS_WINDOW as f64 - 1.0) * 1000.0 / elapsed).round() as u32;
            }
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}

/// Rolling FPS history
#[derive(Debug, Clone, Default)]
pub struct PerfGraph {
    samples: VecDeque<u32>,
}

impl PerfGraph {
    pub fn push(&mut self, fps: u32) {
        if self.samples.len() == GRAPH_SAMPLES {
            self.samples.pop_front();
        }
        self.samples.push_back(fps);
    }

    /// Oldest first
    pub fn samples(&self) -> impl Iterator<Item = u32> + '_ {
        self.samples.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Top of the graph's scale: the largest sample rounded up to 30
    pub fn ceiling(&self) -> u32 {
        let max = self.samples.iter().copied().max().unwrap_or(0);
        (max.div_ceil(30) * 30).max(30)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fps_at_steady_60hz() {
        let mut stats = FrameStats::default();
        for i in 1..=120 {
            stats.record(i as f64 * 1000.0 / 60.0);
        }
        assert_eq!(stats.fps(), 60);
    }

    #[test]
    fn test_fps_zero_until_window_filled() {
        let mut stats = FrameStats::default();
        for i in 1..10 {
            stats.record(i as f64 * 16.0);
        }
        assert_eq!(stats.fps(), 0);
    }

    #[test]
    fn test_graph_is_bounded() {
        let mut graph = PerfGraph::default();
        for i in 0..500 {
            graph.push(i);
        }
        assert_eq!(graph.len(), GRAPH_SAMPLES);
        assert_eq!(graph.samples().next(), Some(500 - GRAPH_SAMPLES as u32));
    }

    #[test]
    fn test_graph_ceiling() {
        let mut graph = PerfGraph::default();
        assert_eq!(graph.ceiling(), 30);
        graph.push(61);
        assert_eq!(graph.ceiling(), 90);
    }
}
