//! Containers (chests) and the registry that owns them

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::arc::ArcPath;
use super::reveal::{Chest, Lights, RevealTick};
use crate::consts::*;
use crate::settings::Settings;

/// Stable handle to a container: its index in the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContainerId(pub usize);

/// Table setup that cannot produce a playable round
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SetupError {
    /// Shuffling needs two distinct containers to swap
    #[error("a shell game needs at least 2 containers, found {found}")]
    TooFewContainers { found: usize },
    /// Container ids double as registry indices
    #[error("container at index {index} has id {found}")]
    MisnumberedContainer { index: usize, found: usize },
}

/// A chest on the table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Container {
    pub id: ContainerId,
    pub pos: Vec2,
    /// Where the chest sits at the start of every round
    origin: Vec2,
    /// Horizontal speed while swapping (units/sec)
    pub move_speed: f32,
    /// Peak offset of the swap arc
    pub arc_height: f32,
    /// Values restored after a loss
    base_move_speed: f32,
    base_arc_height: f32,
    lucky: bool,
    moving: bool,
    motion_start: Vec2,
    motion_target: Vec2,
    highlighted: bool,
    /// Pointer is currently over this chest
    pub hovering: bool,
    pub chest: Chest,
}

impl Container {
    pub fn new(id: ContainerId, origin: Vec2, move_speed: f32, arc_height: f32) -> Self {
        let move_speed = move_speed.clamp(MIN_MOVE_SPEED, MAX_MOVE_SPEED);
        let arc_height = arc_height.clamp(-MAX_ARC_HEIGHT, MAX_ARC_HEIGHT);
        Self {
            id,
            pos: origin,
            origin,
            move_speed,
            arc_height,
            base_move_speed: move_speed,
            base_arc_height: arc_height,
            lucky: false,
            moving: false,
            motion_start: Vec2::ZERO,
            motion_target: Vec2::ZERO,
            highlighted: false,
            hovering: false,
            chest: Chest::default(),
        }
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn is_lucky(&self) -> bool {
        self.lucky
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    pub fn motion_target(&self) -> Vec2 {
        self.motion_target
    }

    /// Path of the current (or last) swap
    pub fn path(&self) -> ArcPath {
        ArcPath::new(self.motion_start, self.motion_target, self.arc_height)
    }

    /// Exchange positions with `other`; both animate toward the other's slot.
    /// Returns false (and changes nothing) if either is already moving.
    pub fn swap_with(&mut self, other: &mut Container) -> bool {
        if self.moving || other.moving {
            return false;
        }
        self.motion_start = self.pos;
        other.motion_start = other.pos;

        self.motion_target = other.motion_start;
        other.motion_target = self.motion_start;

        self.moving = true;
        other.moving = true;
        true
    }

    /// Advance along the swap arc by one step of `dt` seconds
    pub fn integrate_motion(&mut self, dt: f32) {
        if !self.moving {
            return;
        }
        let path = self.path();
        self.pos = path.step(self.pos, self.move_speed * dt);

        // x lands exactly; y may sit one ulp off at large coordinates
        let landed = path.span() != 0.0 && self.pos.x == self.motion_target.x;
        if landed || self.pos.distance(self.motion_target) <= ARRIVAL_EPSILON {
            self.pos = self.motion_target;
            self.moving = false;
        }
    }

    /// Put the chest back where it started, empty and unlit
    pub fn reset(&mut self) {
        self.pos = self.origin;
        self.moving = false;
        self.motion_start = self.origin;
        self.motion_target = self.origin;
        self.lucky = false;
        self.highlighted = false;
        self.hovering = false;
        self.chest.reset();
    }

    /// Undo every difficulty bump
    pub fn restore_base_motion(&mut self) {
        self.move_speed = self.base_move_speed;
        self.arc_height = self.base_arc_height;
    }

    /// Hide the gold in this chest. Returns false if it already had it.
    pub fn mark_lucky(&mut self) -> bool {
        if self.lucky {
            return false;
        }
        self.lucky = true;
        true
    }

    /// Returns true if the highlight turned on
    pub fn highlight(&mut self) -> bool {
        !std::mem::replace(&mut self.highlighted, true)
    }

    /// Returns true if the highlight turned off
    pub fn dehighlight(&mut self) -> bool {
        std::mem::replace(&mut self.highlighted, false)
    }

    /// One difficulty step: faster, and a taller arc with a random direction
    pub fn bump_difficulty(&mut self, rng: &mut impl Rng) {
        let speed_bump = rng.random_range(DIFFICULTY_BUMP_MIN..DIFFICULTY_BUMP_MAX);
        let arc_bump = rng.random_range(DIFFICULTY_BUMP_MIN..DIFFICULTY_BUMP_MAX);
        let flip = rng.random_bool(0.5);

        self.move_speed = (self.move_speed + speed_bump).clamp(MIN_MOVE_SPEED, MAX_MOVE_SPEED);
        let magnitude = (self.arc_height.abs() + arc_bump).clamp(0.0, MAX_ARC_HEIGHT);
        self.arc_height = if flip { -magnitude } else { magnitude };
    }

    pub fn animate_open(&mut self, lights: &mut Lights) -> RevealTick {
        self.chest.animate_open(lights)
    }

    pub fn animate_close(&mut self, lights: &mut Lights) -> RevealTick {
        self.chest.animate_close(lights)
    }
}

/// Every chest on the table, in a fixed order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "Vec<Container>", into = "Vec<Container>")]
pub struct Registry {
    containers: Vec<Container>,
}

impl TryFrom<Vec<Container>> for Registry {
    type Error = SetupError;

    fn try_from(containers: Vec<Container>) -> Result<Self, Self::Error> {
        Self::new(containers)
    }
}

impl From<Registry> for Vec<Container> {
    fn from(registry: Registry) -> Self {
        registry.containers
    }
}

impl Registry {
    /// Build a registry; shuffling needs at least two containers
    pub fn new(containers: Vec<Container>) -> Result<Self, SetupError> {
        if containers.len() < 2 {
            return Err(SetupError::TooFewContainers {
                found: containers.len(),
            });
        }
        if let Some((index, c)) = containers.iter().enumerate().find(|(i, c)| c.id.0 != *i) {
            return Err(SetupError::MisnumberedContainer {
                index,
                found: c.id.0,
            });
        }
        Ok(Self { containers })
    }

    /// Lay out `settings.container_count` chests in a row centred on the origin
    pub fn in_row(settings: &Settings) -> Result<Self, SetupError> {
        let count = settings.container_count;
        let spacing = settings.container_spacing;
        let left = -(count.saturating_sub(1) as f32) * spacing / 2.0;
        let containers = (0..count)
            .map(|i| {
                let origin = Vec2::new(left + i as f32 * spacing, 0.0);
                Container::new(ContainerId(i), origin, settings.move_speed, settings.arc_height)
            })
            .collect();
        Self::new(containers)
    }

    pub fn len(&self) -> usize {
        self.containers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    pub fn get(&self, id: ContainerId) -> Option<&Container> {
        self.containers.get(id.0)
    }

    pub fn get_mut(&mut self, id: ContainerId) -> Option<&mut Container> {
        self.containers.get_mut(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Container> {
        self.containers.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Container> {
        self.containers.iter_mut()
    }

    /// Ids in registry order
    pub fn ids(&self) -> impl Iterator<Item = ContainerId> + '_ {
        self.containers.iter().map(|c| c.id)
    }

    /// The container currently holding the gold, if any
    pub fn lucky(&self) -> Option<ContainerId> {
        self.containers.iter().find(|c| c.is_lucky()).map(|c| c.id)
    }

    pub fn lucky_count(&self) -> usize {
        self.containers.iter().filter(|c| c.is_lucky()).count()
    }

    /// Swap two distinct containers. Returns false if the swap was refused.
    pub fn swap(&mut self, a: ContainerId, b: ContainerId) -> bool {
        if a == b || a.0 >= self.len() || b.0 >= self.len() {
            return false;
        }
        let (lo, hi) = if a.0 < b.0 { (a.0, b.0) } else { (b.0, a.0) };
        let (head, tail) = self.containers.split_at_mut(hi);
        head[lo].swap_with(&mut tail[0])
    }

    /// True if either container is still travelling
    pub fn any_moving(&self, ids: &[ContainerId]) -> bool {
        ids.iter()
            .filter_map(|&id| self.get(id))
            .any(Container::is_moving)
    }

    pub fn integrate_motion(&mut self, dt: f32) {
        for container in &mut self.containers {
            container.integrate_motion(dt);
        }
    }

    /// Reset every container, optionally undoing difficulty bumps too.
    /// Returns the ids whose highlight was switched off.
    pub fn reset_all(&mut self, restore_motion: bool) -> Vec<ContainerId> {
        let mut unlit = Vec::new();
        for container in &mut self.containers {
            if container.is_highlighted() {
                unlit.push(container.id);
            }
            container.reset();
            if restore_motion {
                container.restore_base_motion();
            }
        }
        unlit
    }
}
