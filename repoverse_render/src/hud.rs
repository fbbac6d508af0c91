//! HUD cycle scheduling.
//!
//! Every body owns an exclusive visibility window inside one repeating master
//! cycle. The schedule is plain data: per body a normalized keyframe sequence
//! (fractional times paired with 0/1 opacities) that a linearly interpolating
//! SMIL renderer replays from a shared virtual clock. Mutual exclusion holds
//! by construction of the keyframes, not by any runtime coordination.

use serde::Serialize;
use thiserror::Error;

/// Seconds each body's panel stays visible before the cycle advances.
pub const DEFAULT_DWELL_SECONDS: f64 = 4.0;

/// Fraction of the total cycle inserted around each visibility edge so a
/// linearly interpolating renderer cannot produce a visible cross-fade.
pub const HARD_CUT_EPSILON: f64 = 0.001;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("HUD cycle needs at least one body")]
    NoBodies,
}

/// Where a body sits in the cycle. The boundary policy differs per position:
/// the first body is already on at cycle start, the last stays on through
/// cycle end, middle bodies need both edges, and a lone body is both first
/// and last so its panel never turns off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CyclePosition {
    First,
    Middle,
    Last,
    Solo,
}

impl CyclePosition {
    pub fn classify(index: usize, count: usize) -> Self {
        debug_assert!(index < count);
        if count == 1 {
            Self::Solo
        } else if index == 0 {
            Self::First
        } else if index == count - 1 {
            Self::Last
        } else {
            Self::Middle
        }
    }
}

/// Keyframes for one visibility window `[start, end)` (both fractions of the
/// total cycle). All of the hard-cut epsilon handling lives here.
pub fn visibility_keyframes(
    position: CyclePosition,
    start: f64,
    end: f64,
    epsilon: f64,
) -> (Vec<f64>, Vec<f64>) {
    match position {
        CyclePosition::Solo => (vec![0.0, 1.0], vec![1.0, 1.0]),
        CyclePosition::First => (
            vec![0.0, end - epsilon, end, 1.0],
            vec![1.0, 1.0, 0.0, 0.0],
        ),
        CyclePosition::Middle => (
            vec![0.0, start, start + epsilon, end - epsilon, end, 1.0],
            vec![0.0, 0.0, 1.0, 1.0, 0.0, 0.0],
        ),
        CyclePosition::Last => (
            vec![0.0, start, start + epsilon, 1.0],
            vec![0.0, 0.0, 1.0, 1.0],
        ),
    }
}

/// Visibility timeline for one body's HUD panel.
#[derive(Debug, Clone, Serialize)]
pub struct PanelTimeline {
    pub index: usize,
    pub position: CyclePosition,
    /// Absolute second at which this body's window (and its progress bar)
    /// begins within the cycle.
    pub window_start_seconds: f64,
    /// Normalized keyframe times in [0, 1], strictly non-decreasing.
    pub key_times: Vec<f64>,
    /// Opacity per keyframe, same length as `key_times`.
    pub values: Vec<f64>,
}

impl PanelTimeline {
    /// Opacity a linearly interpolating renderer would show at fractional
    /// cycle position `t`. Constant segments stay exact; only a genuine edge
    /// segment interpolates.
    pub fn opacity_at(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        for i in 0..self.key_times.len().saturating_sub(1) {
            let (t0, t1) = (self.key_times[i], self.key_times[i + 1]);
            if t < t0 || t > t1 {
                continue;
            }
            let (v0, v1) = (self.values[i], self.values[i + 1]);
            if v0 == v1 || t1 == t0 {
                return v0;
            }
            return v0 + (v1 - v0) * (t - t0) / (t1 - t0);
        }
        self.values.last().copied().unwrap_or(0.0)
    }
}

/// The full HUD schedule: one repeating master cycle shared by every panel.
#[derive(Debug, Clone, Serialize)]
pub struct HudSchedule {
    pub dwell_seconds: f64,
    pub total_cycle_seconds: f64,
    pub panels: Vec<PanelTimeline>,
}

impl HudSchedule {
    pub fn to_json_string(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Build the master cycle for `body_count` panels dwelling `dwell_seconds`
/// each. Fails only on the degenerate zero-body input.
pub fn schedule_panels(
    body_count: usize,
    dwell_seconds: f64,
) -> Result<HudSchedule, ScheduleError> {
    if body_count == 0 {
        return Err(ScheduleError::NoBodies);
    }

    let total_cycle_seconds = body_count as f64 * dwell_seconds;
    let panels = (0..body_count)
        .map(|index| {
            let position = CyclePosition::classify(index, body_count);
            let start = index as f64 / body_count as f64;
            let end = (index + 1) as f64 / body_count as f64;
            let (key_times, values) =
                visibility_keyframes(position, start, end, HARD_CUT_EPSILON);
            PanelTimeline {
                index,
                position,
                window_start_seconds: index as f64 * dwell_seconds,
                key_times,
                values,
            }
        })
        .collect();

    log::debug!("[hud] {body_count} panels, {total_cycle_seconds}s master cycle");
    Ok(HudSchedule {
        dwell_seconds,
        total_cycle_seconds,
        panels,
    })
}
