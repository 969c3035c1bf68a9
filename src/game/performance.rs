//! Frame budget monitoring
//!
//! Tracks how long each simulation frame takes against the frame budget
//! (1 / frame rate), so the runner can tell when the collision scans of all
//! snakes no longer fit.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::game::constants::timing::MONITOR_SAMPLES;

/// Minimum samples before the status is judged
const MIN_SAMPLES: usize = 10;

/// Fraction of the budget above which frames count as strained
const STRAINED_THRESHOLD: f32 = 0.7;

/// Frame budget status levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// Comfortably inside the budget
    Healthy,
    /// Using most of the budget
    Strained,
    /// Average frame takes longer than the budget
    Overrun,
}

/// Rolling monitor of frame durations
pub struct FrameMonitor {
    durations: VecDeque<Duration>,
    max_samples: usize,
    budget: Duration,
    frame_start: Option<Instant>,
    status: FrameStatus,
}

impl FrameMonitor {
    pub fn new(frame_rate: u32) -> Self {
        Self {
            durations: VecDeque::with_capacity(MONITOR_SAMPLES),
            max_samples: MONITOR_SAMPLES,
            budget: Duration::from_nanos(1_000_000_000 / frame_rate.max(1) as u64),
            frame_start: None,
            status: FrameStatus::Healthy,
        }
    }

    /// Start timing a frame
    pub fn frame_start(&mut self) {
        self.frame_start = Some(Instant::now());
    }

    /// End timing a frame and record the duration
    pub fn frame_end(&mut self) {
        if let Some(start) = self.frame_start.take() {
            self.record(start.elapsed());
        }
    }

    /// Record a frame duration
    pub fn record(&mut self, duration: Duration) {
        self.durations.push_back(duration);
        while self.durations.len() > self.max_samples {
            self.durations.pop_front();
        }
        self.update_status();
    }

    fn update_status(&mut self) {
        if self.durations.len() < MIN_SAMPLES {
            return;
        }
        let ratio = self.average().as_secs_f32() / self.budget.as_secs_f32();
        self.status = if ratio > 1.0 {
            FrameStatus::Overrun
        } else if ratio > STRAINED_THRESHOLD {
            FrameStatus::Strained
        } else {
            FrameStatus::Healthy
        };
    }

    pub fn average(&self) -> Duration {
        if self.durations.is_empty() {
            return Duration::ZERO;
        }
        let total: Duration = self.durations.iter().sum();
        total / self.durations.len() as u32
    }

    pub fn worst(&self) -> Duration {
        self.durations.iter().copied().max().unwrap_or(Duration::ZERO)
    }

    #[inline]
    pub fn status(&self) -> FrameStatus {
        self.status
    }

    #[inline]
    pub fn budget(&self) -> Duration {
        self.budget
    }

    pub fn sample_count(&self) -> usize {
        self.durations.len()
    }
}
