//! Arena data structures and RON loading.
//!
//! An arena is two same-sized character grids. The layout grid says where
//! the floor is, the entity grid says what stands on it:
//!
//! ```text
//! layout:   '.' floor   '#' wall   ' ' void
//! entities: '.' or ' ' nothing   '@' player   'b' barrel   'x' crate
//!           'c' crawler   'g' golem   's' skeleton   'z' zombie
//! ```

use bevy::prelude::*;
use serde::Deserialize;
use std::path::Path;

use super::error::ArenaError;
use crate::combat::Weapon;
use crate::core::{load_ron_file, DataLoadError};
use crate::enemies::EnemyVariant;
use crate::navigation::NavGrid;

pub const ARENA_PATH: &str = "assets/data/arena.ron";

/// Height of the player's origin above the floor.
pub const PLAYER_BODY_HEIGHT: f32 = 0.8;

fn default_tile_size() -> f32 {
    2.0
}

fn default_wall_height() -> f32 {
    3.0
}

fn default_player_health() -> f32 {
    100.0
}

fn default_prop_points() -> u32 {
    1
}

fn default_crate_health() -> f32 {
    30.0
}

/// Raw arena definition as read from RON.
#[derive(Debug, Clone, Deserialize)]
pub struct ArenaDefinitionRaw {
    pub name: String,
    #[serde(default = "default_tile_size")]
    pub tile_size: f32,
    #[serde(default)]
    pub floor_height: f32,
    #[serde(default = "default_wall_height")]
    pub wall_height: f32,
    #[serde(default = "default_player_health")]
    pub player_health: f32,
    #[serde(default)]
    pub weapon: Weapon,
    /// Score awarded for each destroyed barrel
    #[serde(default = "default_prop_points")]
    pub prop_points: u32,
    #[serde(default = "default_crate_health")]
    pub crate_health: f32,
    pub layout: Vec<String>,
    pub entities: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Void,
    Floor,
    Wall,
}

/// Something placed on the entity grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnKind {
    Enemy(EnemyVariant),
    /// Breaks in one shot, awards score
    Barrel,
    /// Dynamic body with health
    Crate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnPoint {
    pub kind: SpawnKind,
    pub grid_pos: (i32, i32),
}

/// Validated arena, ready to build.
#[derive(Resource, Debug, Clone)]
pub struct ArenaDefinition {
    pub name: String,
    pub tile_size: f32,
    pub floor_height: f32,
    pub wall_height: f32,
    pub player_health: f32,
    pub weapon: Weapon,
    pub prop_points: u32,
    pub crate_health: f32,
    pub width: usize,
    pub height: usize,
    /// Row-major cells, `height` rows of `width`
    pub cells: Vec<Cell>,
    pub player_start: (i32, i32),
    pub spawns: Vec<SpawnPoint>,
}

fn grid_size(rows: &[String]) -> (usize, usize) {
    let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
    (width, rows.len())
}

impl ArenaDefinition {
    pub fn from_raw(raw: ArenaDefinitionRaw) -> Result<Self, ArenaError> {
        let (width, height) = grid_size(&raw.layout);
        let (entity_width, entity_height) = grid_size(&raw.entities);

        // Validate grid dimensions match
        if width != entity_width || height != entity_height {
            return Err(ArenaError::GridMismatch {
                expected_width: width,
                expected_height: height,
                actual_width: entity_width,
                actual_height: entity_height,
            });
        }

        let mut cells = vec![Cell::Void; width * height];
        for (z, row) in raw.layout.iter().enumerate() {
            for (x, character) in row.chars().enumerate() {
                cells[z * width + x] = match character {
                    '.' => Cell::Floor,
                    '#' => Cell::Wall,
                    ' ' => Cell::Void,
                    other => {
                        return Err(ArenaError::UnknownPaletteEntry {
                            character: other,
                            x,
                            z,
                        })
                    }
                };
            }
        }

        let mut player_starts = Vec::new();
        let mut spawns = Vec::new();
        for (z, row) in raw.entities.iter().enumerate() {
            for (x, character) in row.chars().enumerate() {
                let grid_pos = (x as i32, z as i32);
                let kind = match character {
                    '.' | ' ' => continue,
                    '@' => {
                        player_starts.push(grid_pos);
                        continue;
                    }
                    'c' => SpawnKind::Enemy(EnemyVariant::Crawler),
                    'g' => SpawnKind::Enemy(EnemyVariant::Golem),
                    's' => SpawnKind::Enemy(EnemyVariant::Skeleton),
                    'z' => SpawnKind::Enemy(EnemyVariant::Zombie),
                    'b' => SpawnKind::Barrel,
                    'x' => SpawnKind::Crate,
                    other => {
                        return Err(ArenaError::UnknownPaletteEntry {
                            character: other,
                            x,
                            z,
                        })
                    }
                };
                spawns.push(SpawnPoint { kind, grid_pos });
            }
        }

        let player_start = match player_starts.as_slice() {
            [start] => *start,
            [] => return Err(ArenaError::MissingPlayerStart),
            starts => return Err(ArenaError::MultiplePlayerStarts(starts.len())),
        };

        Ok(Self {
            name: raw.name,
            tile_size: raw.tile_size,
            floor_height: raw.floor_height,
            wall_height: raw.wall_height,
            player_health: raw.player_health,
            weapon: raw.weapon,
            prop_points: raw.prop_points,
            crate_health: raw.crate_health,
            width,
            height,
            cells,
            player_start,
            spawns,
        })
    }

    pub fn cell(&self, x: i32, z: i32) -> Cell {
        if x < 0 || z < 0 || x as usize >= self.width || z as usize >= self.height {
            return Cell::Void;
        }
        self.cells[z as usize * self.width + x as usize]
    }

    /// World position of the centre of a grid cell, at floor height.
    pub fn grid_to_world(&self, x: i32, z: i32) -> Vec3 {
        Vec3::new(
            x as f32 * self.tile_size + self.tile_size / 2.0,
            self.floor_height,
            z as f32 * self.tile_size + self.tile_size / 2.0,
        )
    }

    /// Where the player stands at the start, looking toward the arena centre.
    pub fn player_transform(&self) -> Transform {
        let (x, z) = self.player_start;
        let position = self.grid_to_world(x, z) + Vec3::Y * PLAYER_BODY_HEIGHT;
        let centre = self.grid_to_world(self.width as i32 / 2, self.height as i32 / 2);
        Transform::from_translation(position)
            .looking_at(Vec3::new(centre.x, position.y, centre.z), Vec3::Y)
    }

    /// The navigable surface: every floor cell.
    pub fn nav_grid(&self) -> NavGrid {
        let rows: Vec<Vec<bool>> = (0..self.height)
            .map(|z| {
                (0..self.width)
                    .map(|x| self.cells[z * self.width + x] == Cell::Floor)
                    .collect()
            })
            .collect();
        NavGrid::new(self.tile_size, self.floor_height, &rows)
    }
}

/// A small walled room used when no arena file is available.
pub fn builtin_arena() -> ArenaDefinitionRaw {
    let layout = [
        "##########",
        "#........#",
        "#........#",
        "#........#",
        "#........#",
        "#........#",
        "##########",
    ];
    let entities = [
        "..........",
        ".@......c.",
        "..........",
        "..b....g..",
        "..........",
        ".x....s.z.",
        "..........",
    ];

    ArenaDefinitionRaw {
        name: "Fallback Room".to_string(),
        tile_size: default_tile_size(),
        floor_height: 0.0,
        wall_height: default_wall_height(),
        player_health: default_player_health(),
        weapon: Weapon::default(),
        prop_points: default_prop_points(),
        crate_health: default_crate_health(),
        layout: layout.iter().map(|row| row.to_string()).collect(),
        entities: entities.iter().map(|row| row.to_string()).collect(),
    }
}

/// Read and validate the arena file.
pub fn load_arena(path: &Path) -> Result<ArenaDefinition, String> {
    let raw: ArenaDefinitionRaw = load_ron_file(path).map_err(|e: DataLoadError| e.to_string())?;
    ArenaDefinition::from_raw(raw).map_err(|e| format!("Invalid arena {:?}: {}", path, e))
}

/// Load the arena, falling back to the built-in room.
pub fn load_arena_definition(mut commands: Commands) {
    let arena = match load_arena(Path::new(ARENA_PATH)) {
        Ok(arena) => {
            info!("Loaded arena: {} ({}x{})", arena.name, arena.width, arena.height);
            arena
        }
        Err(e) => {
            error!("{}; using the built-in arena", e);
            match ArenaDefinition::from_raw(builtin_arena()) {
                Ok(arena) => arena,
                Err(e) => {
                    error!("Built-in arena is invalid: {}", e);
                    return;
                }
            }
        }
    };
    commands.insert_resource(arena);
}
