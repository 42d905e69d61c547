//! Hit routing and projectile classification.

use bevy::prelude::*;
use serde::Deserialize;

use super::damage::MAX_OWNER_DEPTH;

/// Structural questions a router needs answered about the struck hierarchy.
pub trait HitLookup {
    /// Owner recorded on the entity's hitbox, if it is a hitbox at all.
    /// `Some(None)` means a hitbox that has no owner yet.
    fn hitbox_owner(&self, entity: Entity) -> Option<Option<Entity>>;
    fn is_enemy(&self, entity: Entity) -> bool;
    fn has_health(&self, entity: Entity) -> bool;
    fn is_destructible(&self, entity: Entity) -> bool;
    fn parent_of(&self, entity: Entity) -> Option<Entity>;
}

/// Where a weapon hit should be delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitRoute {
    /// Struck a hitbox proxy; damage goes to its owner
    Hitbox { hitbox: Entity, owner: Entity },
    /// Struck part of an enemy
    Enemy(Entity),
    /// Struck something else with health
    Damageable(Entity),
    /// Struck a breakable prop
    Destructible(Entity),
    /// Nothing to do besides impact feedback
    Unhandled,
}

/// Decide what a struck collider means, in priority order: hitbox proxy,
/// enemy in the hierarchy, any health in the hierarchy, destructible prop.
pub fn route_hit(struck: Entity, lookup: &impl HitLookup) -> HitRoute {
    if let Some(owner) = lookup.hitbox_owner(struck) {
        return match owner {
            Some(owner) => HitRoute::Hitbox {
                hitbox: struck,
                owner,
            },
            None => HitRoute::Unhandled,
        };
    }

    if let Some(enemy) = find_in_ancestors(struck, lookup, |e| lookup.is_enemy(e)) {
        return HitRoute::Enemy(enemy);
    }

    if let Some(target) = find_in_ancestors(struck, lookup, |e| lookup.has_health(e)) {
        return HitRoute::Damageable(target);
    }

    if lookup.is_destructible(struck) {
        return HitRoute::Destructible(struck);
    }

    HitRoute::Unhandled
}

/// First entity in `start` and its ancestors that satisfies `predicate`.
pub fn find_in_ancestors(
    start: Entity,
    lookup: &impl HitLookup,
    predicate: impl Fn(Entity) -> bool,
) -> Option<Entity> {
    let mut current = Some(start);
    for _ in 0..MAX_OWNER_DEPTH {
        let entity = current?;
        if predicate(entity) {
            return Some(entity);
        }
        current = lookup.parent_of(entity);
    }
    None
}

/// What made an object count as a player projectile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileMatch {
    Tag,
    Layer,
    Name,
}

/// Identity facts about the other side of a collision.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectileTraits<'a> {
    pub tag: Option<&'a str>,
    /// Collision group memberships, as raw bits
    pub memberships: Option<u32>,
    pub name: Option<&'a str>,
}

/// Heuristics for recognising player projectiles.
///
/// Checked in order: exact tag, collision layer bit, name substring.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ProjectileFilter {
    pub tag: Option<String>,
    /// Collision group bits; any overlap counts
    pub layer: Option<u32>,
    pub name_hints: Vec<String>,
}

impl Default for ProjectileFilter {
    fn default() -> Self {
        Self {
            tag: Some("PlayerBullet".to_string()),
            layer: None,
            name_hints: ["bullet", "projectile", "shot", "ammo"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl ProjectileFilter {
    pub fn classify(&self, traits: &ProjectileTraits) -> Option<ProjectileMatch> {
        if let (Some(expected), Some(tag)) = (self.tag.as_deref(), traits.tag) {
            if !expected.is_empty() && expected == tag {
                return Some(ProjectileMatch::Tag);
            }
        }

        if let (Some(layer), Some(memberships)) = (self.layer, traits.memberships) {
            if layer & memberships != 0 {
                return Some(ProjectileMatch::Layer);
            }
        }

        if let Some(name) = traits.name {
            let name = name.to_lowercase();
            if self
                .name_hints
                .iter()
                .any(|hint| !hint.is_empty() && name.contains(&hint.to_lowercase()))
            {
                return Some(ProjectileMatch::Name);
            }
        }

        None
    }
}
