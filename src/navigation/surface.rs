//! The navigable surface and ground probing capabilities.
//!
//! Path search is not done here. Agents steer straight at their destination
//! and use [`NavSurface::sample_position`] to stay on walkable ground.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

/// Anything that can answer "where is the closest walkable point?".
pub trait NavSurface {
    /// Closest point on the surface within `max_distance` of `point`.
    fn sample_position(&self, point: Vec3, max_distance: f32) -> Option<Vec3>;
}

/// Anything that can cast a ray straight down to find the ground.
pub trait GroundProbe {
    /// Point where a downward ray from `origin` first hits the ground.
    fn probe_down(&self, origin: Vec3, max_distance: f32) -> Option<Vec3>;
}

/// Walkable grid built from the arena layout.
///
/// Each walkable cell is a flat square of `tile_size` at `floor_height`.
#[derive(Resource, Debug, Clone, Default)]
pub struct NavGrid {
    pub tile_size: f32,
    pub floor_height: f32,
    width: usize,
    height: usize,
    walkable: Vec<bool>,
}

impl NavGrid {
    /// Build from rows of walkability flags (row index is z, column is x).
    pub fn new(tile_size: f32, floor_height: f32, rows: &[Vec<bool>]) -> Self {
        let height = rows.len();
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut walkable = vec![false; width * height];
        for (z, row) in rows.iter().enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                walkable[z * width + x] = cell;
            }
        }

        Self {
            tile_size,
            floor_height,
            width,
            height,
            walkable,
        }
    }

    /// Build from text rows where `.` marks a walkable cell.
    pub fn from_rows(tile_size: f32, floor_height: f32, rows: &[&str]) -> Self {
        let rows: Vec<Vec<bool>> = rows
            .iter()
            .map(|row| row.chars().map(|c| c == '.').collect())
            .collect();
        Self::new(tile_size, floor_height, &rows)
    }

    pub fn is_walkable(&self, x: i32, z: i32) -> bool {
        if x < 0 || z < 0 {
            return false;
        }
        let (ux, uz) = (x as usize, z as usize);
        if ux >= self.width || uz >= self.height {
            return false;
        }
        self.walkable[uz * self.width + ux]
    }

    pub fn walkable_count(&self) -> usize {
        self.walkable.iter().filter(|&&w| w).count()
    }

    /// Closest point to `point` inside cell (x, z), on the floor plane.
    fn closest_in_cell(&self, x: i32, z: i32, point: Vec3) -> Vec3 {
        let min_x = x as f32 * self.tile_size;
        let min_z = z as f32 * self.tile_size;
        Vec3::new(
            point.x.clamp(min_x, min_x + self.tile_size),
            self.floor_height,
            point.z.clamp(min_z, min_z + self.tile_size),
        )
    }
}

impl NavSurface for NavGrid {
    fn sample_position(&self, point: Vec3, max_distance: f32) -> Option<Vec3> {
        if self.tile_size <= 0.0 || max_distance < 0.0 || !point.is_finite() {
            return None;
        }

        let min_x = ((point.x - max_distance) / self.tile_size).floor() as i32;
        let max_x = ((point.x + max_distance) / self.tile_size).floor() as i32;
        let min_z = ((point.z - max_distance) / self.tile_size).floor() as i32;
        let max_z = ((point.z + max_distance) / self.tile_size).floor() as i32;

        let mut best: Option<(f32, Vec3)> = None;
        for z in min_z..=max_z {
            for x in min_x..=max_x {
                if !self.is_walkable(x, z) {
                    continue;
                }
                let candidate = self.closest_in_cell(x, z, point);
                let distance = candidate.distance(point);
                if distance > max_distance {
                    continue;
                }
                if best.map_or(true, |(d, _)| distance < d) {
                    best = Some((distance, candidate));
                }
            }
        }

        best.map(|(_, position)| position)
    }
}

/// Ground probe backed by Rapier ray casts against fixed colliders.
pub struct RapierGroundProbe<'a> {
    pub context: &'a RapierContext,
}

impl GroundProbe for RapierGroundProbe<'_> {
    fn probe_down(&self, origin: Vec3, max_distance: f32) -> Option<Vec3> {
        self.context
            .cast_ray(origin, Vec3::NEG_Y, max_distance, true, QueryFilter::only_fixed())
            .map(|(_, toi)| origin + Vec3::NEG_Y * toi)
    }
}

/// Ground probe used when no physics context is available.
pub struct NoGround;

impl GroundProbe for NoGround {
    fn probe_down(&self, _origin: Vec3, _max_distance: f32) -> Option<Vec3> {
        None
    }
}
