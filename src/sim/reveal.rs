//! Chest reveal lighting
//!
//! Opening a chest fades its spotlight up while the scene light fades out;
//! closing does the reverse. Each call advances the fade by one tick and
//! reports whether the transition has finished.
//!
//! Open finishes when the *spotlight* is within `LIGHT_EPSILON` of full
//! intensity; close finishes when the *scene light* is within `LIGHT_EPSILON`
//! of its resting level. Either way both lights then snap to their targets.

use serde::{Deserialize, Serialize};

use crate::consts::{LIGHT_EPSILON, SPOT_MAX_INTENSITY};

/// Scene-wide lighting shared by every chest
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lights {
    /// Current ambient intensity
    pub scene: f32,
    /// Ambient intensity with every chest closed
    pub scene_rest: f32,
    /// Lerp factor applied per tick
    pub transition_speed: f32,
}

impl Lights {
    pub fn new(scene_rest: f32, transition_speed: f32) -> Self {
        Self {
            scene: scene_rest,
            scene_rest,
            transition_speed,
        }
    }
}

/// Outcome of one reveal tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RevealTick {
    /// The lid flag flipped on this tick
    pub lid_moved: bool,
    /// The light transition reached its end state
    pub done: bool,
}

/// Lid and spotlight of one chest
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Chest {
    pub lid_open: bool,
    pub spot: f32,
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// True once `a` and `b` are within `LIGHT_EPSILON`
#[inline]
fn settled(a: f32, b: f32) -> bool {
    (a - b).abs() < LIGHT_EPSILON
}

impl Chest {
    /// One tick of opening the lid and bringing the spotlight up
    pub fn animate_open(&mut self, lights: &mut Lights) -> RevealTick {
        let mut tick = RevealTick::default();
        if !self.lid_open {
            self.lid_open = true;
            tick.lid_moved = true;
        }

        let speed = lights.transition_speed;
        self.spot = lerp(self.spot, SPOT_MAX_INTENSITY, speed);
        lights.scene = lerp(lights.scene, 0.0, speed);

        if settled(self.spot, SPOT_MAX_INTENSITY) {
            lights.scene = 0.0;
            self.spot = SPOT_MAX_INTENSITY;
            tick.done = true;
        }
        tick
    }

    /// One tick of closing the lid and restoring the scene light
    pub fn animate_close(&mut self, lights: &mut Lights) -> RevealTick {
        let mut tick = RevealTick::default();
        if self.lid_open {
            self.lid_open = false;
            tick.lid_moved = true;
        }

        let speed = lights.transition_speed;
        self.spot = lerp(self.spot, 0.0, speed);
        lights.scene = lerp(lights.scene, lights.scene_rest, speed);

        if settled(lights.scene, lights.scene_rest) {
            self.spot = 0.0;
            lights.scene = lights.scene_rest;
            tick.done = true;
        }
        tick
    }

    /// Lid shut and spotlight off
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_until_done(mut f: impl FnMut() -> RevealTick) -> usize {
        for n in 1..=1000 {
            if f().done {
                return n;
            }
        }
        panic!("transition never finished");
    }

    #[test]
    fn test_open_moves_lid_once_and_snaps() {
        let mut lights = Lights::new(1.0, 0.1);
        let mut chest = Chest::default();

        let first = chest.animate_open(&mut lights);
        assert!(first.lid_moved);
        assert!(!first.done);
        assert!(!chest.animate_open(&mut lights).lid_moved);

        run_until_done(|| chest.animate_open(&mut lights));
        assert_eq!(chest.spot, SPOT_MAX_INTENSITY);
        assert_eq!(lights.scene, 0.0);
        assert!(chest.lid_open);
    }

    #[test]
    fn test_close_watches_scene_light() {
        let mut lights = Lights::new(1.0, 0.1);
        let mut chest = Chest::default();
        run_until_done(|| chest.animate_open(&mut lights));

        let ticks = run_until_done(|| chest.animate_close(&mut lights));
        // Scene light needs 1.0 * 0.9^n < 0.1, i.e. 22 ticks; the spotlight
        // is nowhere near zero by then and gets snapped.
        assert_eq!(ticks, 22);
        assert_eq!(chest.spot, 0.0);
        assert_eq!(lights.scene, 1.0);
        assert!(!chest.lid_open);
    }

    #[test]
    fn test_instant_transition_speed() {
        let mut lights = Lights::new(1.0, 1.0);
        let mut chest = Chest::default();
        assert!(chest.animate_open(&mut lights).done);
        assert!(chest.animate_close(&mut lights).done);
    }
}
