//! Damage resolution: how much does an incoming hit actually deal?
//!
//! The resolver only computes a number. Applying it is up to whoever owns the
//! target's health, so weapons, hitboxes, projectiles and hazards all share
//! one path without knowing what kind of enemy they hit.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use super::components::{sanitize_damage, DamageEvent, Damaging, Hazard, Projectile, Weapon};

/// Upper bound on ownership-chain walks, in case of a malformed hierarchy.
pub const MAX_OWNER_DEPTH: usize = 32;

/// Read access to damage capabilities and the ownership hierarchy.
pub trait DamageLookup {
    /// Damage value exposed by `entity` itself, if any.
    fn damage_of(&self, entity: Entity) -> Option<f32>;

    /// The entity that owns `entity` (its parent), if any.
    fn owner_of(&self, entity: Entity) -> Option<Entity>;
}

/// Where a resolved damage value came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DamageOrigin {
    /// The emitter declared the value
    Declared,
    /// Found on this entity in the source's ownership chain
    Capability(Entity),
    /// Nothing found; the configured default was used
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedDamage {
    pub amount: f32,
    pub origin: DamageOrigin,
}

/// Turns damage events into non-negative damage amounts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageResolver {
    pub default_damage: f32,
}

impl DamageResolver {
    pub fn new(default_damage: f32) -> Self {
        Self { default_damage }
    }

    pub fn resolve(&self, event: &DamageEvent, lookup: &impl DamageLookup) -> ResolvedDamage {
        if let Some(declared) = event.declared {
            return ResolvedDamage {
                amount: sanitize_damage(declared),
                origin: DamageOrigin::Declared,
            };
        }

        match probe_damage(event.source, lookup) {
            Some((holder, amount)) => ResolvedDamage {
                amount: sanitize_damage(amount),
                origin: DamageOrigin::Capability(holder),
            },
            None => ResolvedDamage {
                amount: sanitize_damage(self.default_damage),
                origin: DamageOrigin::Default,
            },
        }
    }
}

/// Walk from `source` up its owners and return the first damage value found.
pub fn probe_damage(source: Entity, lookup: &impl DamageLookup) -> Option<(Entity, f32)> {
    let mut current = Some(source);
    let mut depth = 0;

    while let Some(entity) = current {
        if let Some(amount) = lookup.damage_of(entity) {
            return Some((entity, amount));
        }
        depth += 1;
        if depth >= MAX_OWNER_DEPTH {
            break;
        }
        current = lookup.owner_of(entity);
    }

    None
}

/// ECS-backed [`DamageLookup`] over every component that implements [`Damaging`].
#[derive(SystemParam)]
pub struct DamageSources<'w, 's> {
    projectiles: Query<'w, 's, &'static Projectile>,
    hazards: Query<'w, 's, &'static Hazard>,
    weapons: Query<'w, 's, &'static Weapon>,
    parents: Query<'w, 's, &'static Parent>,
}

impl DamageLookup for DamageSources<'_, '_> {
    fn damage_of(&self, entity: Entity) -> Option<f32> {
        if let Ok(projectile) = self.projectiles.get(entity) {
            return Some(projectile.damage());
        }
        if let Ok(hazard) = self.hazards.get(entity) {
            return Some(hazard.damage());
        }
        self.weapons.get(entity).ok().map(Damaging::damage)
    }

    fn owner_of(&self, entity: Entity) -> Option<Entity> {
        self.parents.get(entity).ok().map(Parent::get)
    }
}
