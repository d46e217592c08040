//! Fixed-timestep frame driver
//!
//! Rendering runs at whatever cadence the host manages; the simulation always
//! advances in whole `SIM_DT` ticks. Leftover time carries over to the next
//! frame. The measured FPS is cosmetic and never feeds back into gameplay.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::persistence::ScoreStore;
use crate::session::Session;
use crate::sim::{GameEvent, TickInput};

/// Number of frame timestamps averaged for the FPS readout
const FPS_WINDOW: usize = 60;

#[derive(Debug, Clone)]
pub struct FixedStepDriver {
    accumulator: f32,
    /// Input for the next tick; movement flags persist, one-shots clear
    pub input: TickInput,
    // FPS tracking
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    fps: u32,
}

impl Default for FixedStepDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl FixedStepDriver {
    pub fn new() -> Self {
        Self {
            accumulator: 0.0,
            input: TickInput::default(),
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            fps: 0,
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Run as many ticks as `dt` seconds cover. `time_ms` is the frame
    /// timestamp used for the FPS readout.
    pub fn update<S: ScoreStore>(
        &mut self,
        session: &mut Session<S>,
        dt: f32,
        time_ms: f64,
    ) -> Vec<GameEvent> {
        let dt = dt.clamp(0.0, 0.25);
        self.accumulator += dt;

        let mut events = Vec::new();
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            events.extend(session.step(&self.input));
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.pause = false;
            self.input.toggle_debug = false;
        }
        // Drop backlog the substep cap could not absorb
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }

        self.record_frame(time_ms);
        events
    }

    fn record_frame(&mut self, time_ms: f64) {
        self.frame_times[self.frame_index] = time_ms;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;

        // Calculate FPS from oldest to newest frame
        let oldest_time = self.frame_times[self.frame_index];
        if oldest_time > 0.0 {
            let elapsed = time_ms - oldest_time;
            if elapsed > 0.0 {
                self.fps = ((FPS_WINDOW - 1) as f64 * 1000.0 / elapsed).round() as u32;
            }
        }
    }
}
