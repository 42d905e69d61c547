//! Placement guard: an agent may only move once it stands on the surface.

use bevy::prelude::*;
use serde::Deserialize;

use super::surface::{GroundProbe, NavSurface};

/// Tuning for spawn snapping and attach retries.
#[derive(Resource, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct NavigationSettings {
    /// Seconds between attach attempts while unattached
    pub retry_interval: f32,
    /// Radius of the check that enables movement
    pub attach_radius: f32,
    /// Radius of the generous spawn-time snap
    pub snap_radius: f32,
    /// Height above the spawn point the ground probe starts from
    pub probe_height: f32,
    /// Maximum length of the ground probe
    pub probe_distance: f32,
}

impl Default for NavigationSettings {
    fn default() -> Self {
        Self {
            retry_interval: 0.5,
            attach_radius: 1.5,
            snap_radius: 10.0,
            probe_height: 5.0,
            probe_distance: 50.0,
        }
    }
}

/// Result of a single surface search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Attachment {
    Attached(Vec3),
    NotFound,
}

/// Search for the surface within `radius` of `position`.
pub fn try_attach(surface: &impl NavSurface, position: Vec3, radius: f32) -> Attachment {
    match surface.sample_position(position, radius) {
        Some(point) => Attachment::Attached(point),
        None => Attachment::NotFound,
    }
}

/// Best-effort spawn placement.
///
/// Looks for the surface with the generous snap radius first. If nothing is
/// there, probes down from above the spawn point and searches again from
/// whatever ground it finds. Returns the original position if both fail.
pub fn snap_to_surface(
    surface: &impl NavSurface,
    ground: &impl GroundProbe,
    position: Vec3,
    settings: &NavigationSettings,
) -> Vec3 {
    if let Attachment::Attached(point) = try_attach(surface, position, settings.snap_radius) {
        return point;
    }

    let origin = position + Vec3::Y * settings.probe_height;
    let Some(ground_point) = ground.probe_down(origin, settings.probe_distance) else {
        return position;
    };

    match try_attach(surface, ground_point, settings.snap_radius) {
        Attachment::Attached(point) => point,
        Attachment::NotFound => ground_point,
    }
}

/// Attachment state of an agent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Not on the surface; next attempt in `retry_in` seconds
    Unattached { retry_in: f32 },
    /// On the surface, movement enabled
    Attached,
}

/// What a guard step decided.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlacementStep {
    /// Still unattached, timer running or attempt failed
    Waiting,
    /// Attached on this step; enable movement at this position
    Attached(Vec3),
    /// Already attached earlier; nothing to do
    Settled,
}

/// Per-agent retry state machine for surface attachment.
#[derive(Component, Debug, Clone)]
pub struct PlacementGuard {
    placement: Placement,
    retry_interval: f32,
    attach_radius: f32,
    attempts: u32,
}

impl PlacementGuard {
    pub fn new(retry_interval: f32, attach_radius: f32) -> Self {
        Self {
            placement: Placement::Unattached { retry_in: 0.0 },
            retry_interval: retry_interval.max(0.0),
            attach_radius,
            attempts: 0,
        }
    }

    pub fn from_settings(settings: &NavigationSettings) -> Self {
        Self::new(settings.retry_interval, settings.attach_radius)
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn is_attached(&self) -> bool {
        self.placement == Placement::Attached
    }

    /// Number of surface searches performed so far.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn attach_radius(&self) -> f32 {
        self.attach_radius
    }

    /// Attempt attachment right now, re-arming the timer on failure.
    pub fn attempt(&mut self, surface: &impl NavSurface, position: Vec3) -> PlacementStep {
        if self.is_attached() {
            return PlacementStep::Settled;
        }

        self.attempts += 1;
        match try_attach(surface, position, self.attach_radius) {
            Attachment::Attached(point) => {
                self.placement = Placement::Attached;
                PlacementStep::Attached(point)
            }
            Attachment::NotFound => {
                self.placement = Placement::Unattached {
                    retry_in: self.retry_interval,
                };
                PlacementStep::Waiting
            }
        }
    }

    /// Advance the retry timer and attempt when it runs out.
    pub fn tick(&mut self, delta: f32, surface: &impl NavSurface, position: Vec3) -> PlacementStep {
        match self.placement {
            Placement::Attached => PlacementStep::Settled,
            Placement::Unattached { retry_in } => {
                let remaining = retry_in - delta.max(0.0);
                if remaining <= 0.0 {
                    self.attempt(surface, position)
                } else {
                    self.placement = Placement::Unattached { retry_in: remaining };
                    PlacementStep::Waiting
                }
            }
        }
    }
}
