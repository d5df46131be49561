//! Frame-rate monitor and the backpressure policy built on it.

use crate::constants::{FPS_LOW, FPS_WARN, FPS_WINDOW};
use crate::core::Config;
use std::collections::VecDeque;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FpsStatus {
    Good,
    Warning,
    Low,
}

impl FpsStatus {
    pub fn from_fps(fps: f32) -> Self {
        if fps < FPS_LOW {
            FpsStatus::Low
        } else if fps < FPS_WARN {
            FpsStatus::Warning
        } else {
            FpsStatus::Good
        }
    }
}

/// Informational notices for the host UI.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PerfNotice {
    EffectsDisabled { fps: f32 },
}

#[derive(Clone, Debug, Default)]
pub struct PerfMonitor {
    frame_ms: VecDeque<f32>,
    degraded: bool,
}

impl PerfMonitor {
    pub fn new() -> Self {
        Self {
            frame_ms: VecDeque::with_capacity(FPS_WINDOW),
            degraded: false,
        }
    }

    /// Record a frame delta and return the smoothed FPS over the window.
    pub fn sample(&mut self, dt: Duration) -> Option<f32> {
        let ms = dt.as_secs_f32() * 1000.0;
        if !ms.is_finite() || ms <= 0.0 {
            return self.fps();
        }
        if self.frame_ms.len() == FPS_WINDOW {
            self.frame_ms.pop_front();
        }
        self.frame_ms.push_back(ms);
        self.fps()
    }

    pub fn fps(&self) -> Option<f32> {
        if self.frame_ms.is_empty() {
            return None;
        }
        let avg = self.frame_ms.iter().sum::<f32>() / self.frame_ms.len() as f32;
        Some((1000.0 / avg).round())
    }

    pub fn window_full(&self) -> bool {
        self.frame_ms.len() == FPS_WINDOW
    }

    /// True while the current low-FPS episode has already been handled.
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Backpressure policy: under sustained low FPS switch off wave and
    /// scatter, once per episode. The episode ends when FPS recovers to the
    /// warning threshold, after which the policy may fire again.
    pub fn apply_backpressure(&mut self, fps: f32, mut config: Config) -> (Config, Option<PerfNotice>) {
        if fps >= FPS_WARN {
            self.degraded = false;
            return (config, None);
        }
        if fps < FPS_LOW && !self.degraded && (config.wave || config.scatter) {
            config.wave = false;
            config.scatter = false;
            self.degraded = true;
            log::info!("[perf] fps={} disabled wave and scatter", fps);
            return (config, Some(PerfNotice::EffectsDisabled { fps }));
        }
        (config, None)
    }

    pub fn indicator_text(&self, glyphs: usize) -> String {
        format!("FPS: {} | Glyphs: {}", self.fps().unwrap_or(0.0), glyphs)
    }
}
