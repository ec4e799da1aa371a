// Copyright 2025 the Meridian Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use meridian_event_state::shove::ShoveSample;

use crate::arbitration::GestureContext;
use crate::command::CameraCommand;
use crate::host::{MapHost, TelemetryKind};
use crate::recognizer::{Accumulation, Deadband, Recognizer, RecognizerState};

/// Vertical travel, in pixels, a shove must exceed before the map tilts.
pub const SHOVE_DEADBAND_PIXELS: f64 = 10.0;

/// Degrees of pitch per pixel of vertical travel; dragging up tilts further.
pub const SHOVE_PITCH_PER_PIXEL: f64 = 0.1;

/// Smallest pitch a shove can reach.
pub const MIN_TILT: f64 = 0.0;

/// Largest pitch a shove can reach.
pub const MAX_TILT: f64 = 60.0;

const DEADBAND: Deadband = Deadband::symmetric(SHOVE_DEADBAND_PIXELS);

/// Pitch for a shove of `delta_pixels` starting at `pitch`.
#[must_use]
pub fn shove_pitch(pitch: f64, delta_pixels: f64) -> f64 {
    (pitch - SHOVE_PITCH_PER_PIXEL * delta_pixels).clamp(MIN_TILT, MAX_TILT)
}

/// Two-finger vertical drag that tilts the map.
#[derive(Clone, Debug)]
pub(crate) struct ShoveRecognizer {
    state: RecognizerState,
}

impl Default for ShoveRecognizer {
    fn default() -> Self {
        Self {
            state: RecognizerState::new(Accumulation::Additive),
        }
    }
}

impl Recognizer<ShoveSample> for ShoveRecognizer {
    fn on_begin<H: MapHost + ?Sized>(
        &mut self,
        sample: &ShoveSample,
        ctx: &mut GestureContext<'_, H>,
    ) -> bool {
        if !ctx.host.is_tilt_gestures_enabled() {
            return false;
        }
        self.state.begin(sample.time);
        ctx.record(TelemetryKind::PitchStart, sample.focus);
        true
    }

    fn on_update<H: MapHost + ?Sized>(
        &mut self,
        sample: &ShoveSample,
        ctx: &mut GestureContext<'_, H>,
    ) -> bool {
        if !ctx.host.is_tilt_gestures_enabled() {
            return false;
        }

        let cumulative = self.state.accumulate(sample.delta_pixels);
        if !self.state.is_active()
            && !ctx.session.zoom_active
            && DEADBAND.is_escaped_by(cumulative)
            && ctx.past_tap_timeout(&self.state, sample.time)
        {
            log::debug!("tilt activated at {cumulative} px");
            self.state.activate();
        }
        if !self.state.is_active() {
            log::trace!("shove {cumulative} px undecided");
            return false;
        }

        ctx.cancel_transitions();
        let degrees = shove_pitch(ctx.host.pitch(), sample.delta_pixels);
        ctx.host.apply(CameraCommand::SetTilt { degrees });
        ctx.session.tilt_active = true;
        true
    }

    fn on_end<H: MapHost + ?Sized>(&mut self, _: &ShoveSample, ctx: &mut GestureContext<'_, H>) {
        self.state.reset();
        ctx.session.tilt_active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pitch_is_clamped() {
        assert_eq!(shove_pitch(30.0, -100.0), 40.0);
        assert_eq!(shove_pitch(30.0, 100.0), 20.0);
        assert_eq!(shove_pitch(55.0, -1000.0), MAX_TILT);
        assert_eq!(shove_pitch(5.0, 1000.0), MIN_TILT);
        assert_eq!(shove_pitch(90.0, 0.0), MAX_TILT);
    }
}
