//! Target acquisition: find the player and the health enemies attack.

use std::collections::VecDeque;

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use thiserror::Error;

use crate::player::{Player, PlayerHealth};

/// Why an enemy ended up without a target.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AcquisitionError {
    #[error("no entity is marked as the player")]
    NoPlayer,

    #[error("player {0:?} has no health anywhere in the scene")]
    NoHealth(Entity),
}

/// A successfully acquired target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    /// Entity whose position is chased
    pub player: Entity,
    /// Entity carrying the health that strikes land on
    pub health: Entity,
}

/// Enemy-side record of its target, decided once.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetBinding {
    #[default]
    Pending,
    Bound(Target),
    /// Acquisition failed; the enemy stays idle for good
    Unavailable,
}

/// Structural queries acquisition needs.
pub trait TargetScene {
    fn players(&self) -> Vec<Entity>;
    fn has_health(&self, entity: Entity) -> bool;
    fn children_of(&self, entity: Entity) -> Vec<Entity>;
    fn parent_of(&self, entity: Entity) -> Option<Entity>;
    /// Any entity in the scene with health, as a last resort.
    fn any_health(&self) -> Option<Entity>;
}

/// Locate the player and its health: on the player itself, then its
/// descendants, then its ancestors, then anywhere.
pub fn acquire(scene: &impl TargetScene) -> Result<Target, AcquisitionError> {
    let mut players = scene.players();
    players.sort();
    let player = *players.first().ok_or(AcquisitionError::NoPlayer)?;
    if players.len() > 1 {
        debug!("{} player entities found, tracking {:?}", players.len(), player);
    }

    let health = find_health(scene, player).ok_or(AcquisitionError::NoHealth(player))?;
    Ok(Target { player, health })
}

fn find_health(scene: &impl TargetScene, player: Entity) -> Option<Entity> {
    if scene.has_health(player) {
        return Some(player);
    }

    // Breadth-first, nearest descendants first
    let mut queue: VecDeque<Entity> = scene.children_of(player).into();
    while let Some(entity) = queue.pop_front() {
        if scene.has_health(entity) {
            return Some(entity);
        }
        queue.extend(scene.children_of(entity));
    }

    let mut ancestor = scene.parent_of(player);
    while let Some(entity) = ancestor {
        if scene.has_health(entity) {
            return Some(entity);
        }
        ancestor = scene.parent_of(entity);
    }

    scene.any_health()
}

/// ECS-backed [`TargetScene`].
#[derive(SystemParam)]
pub struct PlayerScene<'w, 's> {
    players: Query<'w, 's, Entity, With<Player>>,
    healths: Query<'w, 's, Entity, With<PlayerHealth>>,
    children: Query<'w, 's, &'static Children>,
    parents: Query<'w, 's, &'static Parent>,
}

impl TargetScene for PlayerScene<'_, '_> {
    fn players(&self) -> Vec<Entity> {
        self.players.iter().collect()
    }

    fn has_health(&self, entity: Entity) -> bool {
        self.healths.contains(entity)
    }

    fn children_of(&self, entity: Entity) -> Vec<Entity> {
        self.children
            .get(entity)
            .map(|children| children.iter().copied().collect())
            .unwrap_or_default()
    }

    fn parent_of(&self, entity: Entity) -> Option<Entity> {
        self.parents.get(entity).ok().map(Parent::get)
    }

    fn any_health(&self) -> Option<Entity> {
        self.healths.iter().min()
    }
}
