use std::time::Duration;

use crate::foundation::error::{StickframeError, StickframeResult};

/// Whether the timeline cursor is advancing on its own.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
}

/// Fixed-period frame stepper driven by elapsed time.
///
/// The scheduler owns no clock: the host feeds elapsed time through [`advance`](Self::advance),
/// so stopping is synchronous and tests can simulate ticks exactly.
#[derive(Clone, Debug)]
pub struct PlaybackScheduler {
    state: PlaybackState,
    period: Duration,
    accumulated: Duration,
}

impl PlaybackScheduler {
    pub fn new(frame_rate: u32) -> StickframeResult<Self> {
        Ok(Self {
            state: PlaybackState::Stopped,
            period: period_for(frame_rate)?,
            accumulated: Duration::ZERO,
        })
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Time between two frame steps.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Play/pause toggle. Animations with a single frame never start playing.
    pub fn toggle(&mut self, frame_count: usize) -> PlaybackState {
        if frame_count <= 1 {
            tracing::debug!(frame_count, "play ignored: nothing to animate");
            return self.state;
        }
        self.state = match self.state {
            PlaybackState::Stopped => PlaybackState::Playing,
            PlaybackState::Playing => PlaybackState::Stopped,
        };
        self.accumulated = Duration::ZERO;
        self.state
    }

    /// Halt immediately; no step applies after this returns.
    pub fn stop(&mut self) {
        self.state = PlaybackState::Stopped;
        self.accumulated = Duration::ZERO;
    }

    /// Re-derive the period. Time accumulated towards the next step is discarded.
    pub fn set_frame_rate(&mut self, frame_rate: u32) -> StickframeResult<()> {
        self.period = period_for(frame_rate)?;
        self.accumulated = Duration::ZERO;
        Ok(())
    }

    /// Consume `elapsed` and return the cursor after every whole period has stepped it forward.
    pub fn advance(&mut self, elapsed: Duration, current: usize, frame_count: usize) -> usize {
        if !self.is_playing() || frame_count <= 1 {
            return current;
        }
        self.accumulated = self.accumulated.saturating_add(elapsed);
        let period_ns = self.period.as_nanos();
        let accumulated_ns = self.accumulated.as_nanos();
        let steps = accumulated_ns / period_ns;
        if steps == 0 {
            return current;
        }
        // The remainder is below one period, which always fits in u64 nanoseconds.
        let rest = u64::try_from(accumulated_ns % period_ns).unwrap_or(0);
        self.accumulated = Duration::from_nanos(rest);
        let steps = (steps % frame_count as u128) as usize;
        (current + steps) % frame_count
    }
}

/// Step period for `frame_rate`. Rates above one frame per nanosecond have no usable period.
fn period_for(frame_rate: u32) -> StickframeResult<Duration> {
    if frame_rate == 0 {
        return Err(StickframeError::validation("frame rate must be > 0"));
    }
    let nanos = 1_000_000_000 / u64::from(frame_rate);
    if nanos == 0 {
        return Err(StickframeError::validation(format!(
            "frame rate {frame_rate} is too high to schedule"
        )));
    }
    Ok(Duration::from_nanos(nanos))
}

#[cfg(test)]
#[path = "../../tests/unit/playback/scheduler.rs"]
mod tests;
