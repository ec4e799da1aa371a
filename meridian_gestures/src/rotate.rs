// Copyright 2025 the Meridian Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use meridian_event_state::rotate::RotateSample;

use crate::arbitration::GestureContext;
use crate::command::CameraCommand;
use crate::host::{MapHost, TelemetryKind};
use crate::recognizer::{Accumulation, Deadband, Recognizer, RecognizerState};

/// Rotation, in degrees, a two-finger twist must exceed before the map turns.
pub const ROTATE_DEADBAND_DEGREES: f64 = 20.0;

const DEADBAND: Deadband = Deadband::symmetric(ROTATE_DEADBAND_DEGREES);

/// Two-finger rotation.
#[derive(Clone, Debug)]
pub(crate) struct RotateRecognizer {
    state: RecognizerState,
}

impl Default for RotateRecognizer {
    fn default() -> Self {
        Self {
            state: RecognizerState::new(Accumulation::Additive),
        }
    }
}

impl Recognizer<RotateSample> for RotateRecognizer {
    fn on_begin<H: MapHost + ?Sized>(
        &mut self,
        sample: &RotateSample,
        ctx: &mut GestureContext<'_, H>,
    ) -> bool {
        if !ctx.host.is_rotate_enabled() {
            return false;
        }
        self.state.begin(sample.time);
        ctx.record(TelemetryKind::RotationStart, sample.focus);
        true
    }

    fn on_update<H: MapHost + ?Sized>(
        &mut self,
        sample: &RotateSample,
        ctx: &mut GestureContext<'_, H>,
    ) -> bool {
        if ctx.rotate_suppressed() {
            log::trace!("rotate suppressed by tracking or tilt");
            return false;
        }

        let cumulative = self.state.accumulate(sample.delta_degrees);
        if !self.state.is_active()
            && !ctx.session.zoom_active
            && DEADBAND.is_escaped_by(cumulative)
            && ctx.past_tap_timeout(&self.state, sample.time)
        {
            log::debug!("rotate activated at {cumulative} degrees");
            self.state.activate();
            ctx.session.rotate_active = true;
        }
        if !self.state.is_active() {
            log::trace!("rotate {cumulative} degrees undecided");
            return false;
        }

        ctx.cancel_transitions();
        ctx.host.reset_tracking_modes(true, true);
        let degrees = ctx.host.bearing() + sample.delta_degrees;
        let anchor = ctx.anchor(sample.focus);
        ctx.host.apply(CameraCommand::SetBearing { degrees, anchor });
        true
    }

    fn on_end<H: MapHost + ?Sized>(&mut self, _: &RotateSample, _: &mut GestureContext<'_, H>) {
        self.state.reset();
    }
}
