// Copyright 2025 the Meridian Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use meridian_event_state::scale::ScaleSample;

use crate::arbitration::GestureContext;
use crate::command::CameraCommand;
use crate::host::{MapHost, TelemetryKind};
use crate::recognizer::{Accumulation, Deadband, Recognizer, RecognizerState};

/// Cumulative scale inside which a pinch is still undecided.
pub const SCALE_DEADBAND: Deadband = Deadband::new(0.95, 1.05);

/// Pinch and quick zoom.
#[derive(Clone, Debug)]
pub(crate) struct ScaleRecognizer {
    state: RecognizerState,
}

impl Default for ScaleRecognizer {
    fn default() -> Self {
        Self {
            state: RecognizerState::new(Accumulation::Multiplicative),
        }
    }
}

impl Recognizer<ScaleSample> for ScaleRecognizer {
    fn on_begin<H: MapHost + ?Sized>(
        &mut self,
        sample: &ScaleSample,
        ctx: &mut GestureContext<'_, H>,
    ) -> bool {
        if !ctx.host.is_zoom_gestures_enabled() {
            return false;
        }
        self.state.begin(sample.time);
        ctx.record(TelemetryKind::PinchStart, sample.focus);
        true
    }

    fn on_update<H: MapHost + ?Sized>(
        &mut self,
        sample: &ScaleSample,
        ctx: &mut GestureContext<'_, H>,
    ) -> bool {
        if !ctx.host.is_zoom_gestures_enabled() {
            return false;
        }

        let cumulative = self.state.accumulate(sample.factor);
        if !ctx.session.zoom_active && SCALE_DEADBAND.is_escaped_by(cumulative) {
            log::debug!("zoom activated at cumulative scale {cumulative}");
            ctx.session.zoom_active = true;
        }
        if !ctx.session.zoom_active {
            log::trace!("scale {cumulative} inside deadband");
            return false;
        }
        self.state.activate();

        if ctx.session.tilt_active {
            log::trace!("scale suppressed by tilt");
            return false;
        }

        ctx.cancel_transitions();
        let quick_zoom = !ctx.session.two_tap_candidate;
        if quick_zoom && !ctx.session.quick_zoom {
            log::debug!("quick zoom detected");
        }
        ctx.session.quick_zoom = quick_zoom;
        ctx.host.reset_tracking_modes(true, !quick_zoom);

        let anchor = ctx.scale_anchor(sample.focus);
        ctx.host.apply(CameraCommand::ScaleBy {
            factor: sample.factor,
            anchor,
        });
        true
    }

    fn on_end<H: MapHost + ?Sized>(&mut self, _: &ScaleSample, _: &mut GestureContext<'_, H>) {
        self.state.reset();
    }
}
