//! Mobility capability for enemies.

use bevy::prelude::*;

use super::surface::NavSurface;

/// Straight-line steering agent that stays on the navigable surface.
///
/// Starts disabled. Only the placement guard turns it on, once the owner has
/// been confirmed to stand on the surface.
#[derive(Component, Debug, Clone)]
pub struct NavAgent {
    /// Movement speed in units per second
    pub speed: f32,
    /// Distance from the destination at which the agent halts
    pub stopping_distance: f32,
    enabled: bool,
    stopped: bool,
    destination: Option<Vec3>,
    velocity: Vec3,
}

impl NavAgent {
    pub fn new(speed: f32, stopping_distance: f32) -> Self {
        Self {
            speed,
            stopping_distance: stopping_distance.max(0.0),
            enabled: false,
            stopped: true,
            destination: None,
            velocity: Vec3::ZERO,
        }
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn disable(&mut self) {
        self.enabled = false;
        self.velocity = Vec3::ZERO;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Set the point to steer toward. Ignored while disabled.
    pub fn set_destination(&mut self, point: Vec3) -> bool {
        if !self.enabled {
            return false;
        }
        self.destination = Some(point);
        true
    }

    pub fn destination(&self) -> Option<Vec3> {
        self.destination
    }

    pub fn stop(&mut self, stopped: bool) {
        self.stopped = stopped;
        if stopped {
            self.velocity = Vec3::ZERO;
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn velocity_magnitude(&self) -> f32 {
        self.velocity.length()
    }

    /// Advance one frame and return the new position.
    pub fn step(&mut self, position: Vec3, delta: f32, surface: &impl NavSurface) -> Vec3 {
        self.velocity = Vec3::ZERO;
        if !self.enabled || self.stopped || delta <= 0.0 {
            return position;
        }
        let Some(destination) = self.destination else {
            return position;
        };

        let to_destination = Vec3::new(destination.x - position.x, 0.0, destination.z - position.z);
        let distance = to_destination.length();
        if distance <= self.stopping_distance {
            return position;
        }

        let travel = (self.speed * delta).min(distance - self.stopping_distance);
        let candidate = position + to_destination / distance * travel;

        // Blocked steps leave the agent in place
        let Some(next) = surface.sample_position(candidate, travel.max(0.05)) else {
            return position;
        };

        self.velocity = (next - position) / delta;
        next
    }
}

/// Rotate `transform` around Y so it looks at `target` on the horizontal plane.
pub fn face_towards(transform: &mut Transform, target: Vec3) {
    let look_target = Vec3::new(target.x, transform.translation.y, target.z);
    if look_target.distance_squared(transform.translation) < 1e-6 {
        return;
    }
    transform.look_at(look_target, Vec3::Y);
    // Models face +Z, not -Z
    transform.rotate_y(std::f32::consts::PI);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::surface::NavGrid;

    fn open_floor() -> NavGrid {
        NavGrid::from_rows(1.0, 0.0, &["..........", "..........", ".........."])
    }

    #[test]
    fn test_disabled_agent_ignores_destination() {
        let mut agent = NavAgent::new(3.0, 0.5);
        assert!(!agent.set_destination(Vec3::new(5.0, 0.0, 1.0)));
        assert_eq!(agent.destination(), None);
    }

    #[test]
    fn test_agent_moves_toward_destination() {
        let surface = open_floor();
        let mut agent = NavAgent::new(2.0, 0.5);
        agent.enable();
        agent.stop(false);
        agent.set_destination(Vec3::new(8.0, 0.0, 1.5));

        let start = Vec3::new(1.0, 0.0, 1.5);
        let next = agent.step(start, 0.5, &surface);
        assert!((next.x - 2.0).abs() < 1e-4);
        assert!((agent.velocity_magnitude() - 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_agent_halts_at_stopping_distance() {
        let surface = open_floor();
        let mut agent = NavAgent::new(10.0, 1.0);
        agent.enable();
        agent.stop(false);
        agent.set_destination(Vec3::new(5.0, 0.0, 1.5));

        let next = agent.step(Vec3::new(3.0, 0.0, 1.5), 1.0, &surface);
        assert!((next.x - 4.0).abs() < 1e-4);

        let after = agent.step(next, 1.0, &surface);
        assert_eq!(after, next);
        assert_eq!(agent.velocity_magnitude(), 0.0);
    }

    #[test]
    fn test_stopped_agent_does_not_move() {
        let surface = open_floor();
        let mut agent = NavAgent::new(2.0, 0.5);
        agent.enable();
        agent.set_destination(Vec3::new(8.0, 0.0, 1.5));
        agent.stop(true);

        let start = Vec3::new(1.0, 0.0, 1.5);
        assert_eq!(agent.step(start, 0.5, &surface), start);
    }
}
