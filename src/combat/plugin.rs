//! Combat plugin - damage emitters, resolution and generic damage.

use bevy::prelude::*;

use super::components::*;
use super::emitters;
use super::settings::{load_combat_settings, CombatSettings};
use super::systems;
use crate::core::TickSet;

/// Combat plugin - turns hits into damage events and applies non-enemy damage.
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app
            // Resources
            .init_resource::<CombatSettings>()
            // Events
            .add_event::<WeaponFired>()
            .add_event::<WeaponHit>()
            .add_event::<ParticleImpact>()
            .add_systems(Startup, load_combat_settings)
            // Emitters
            .add_systems(
                Update,
                (
                    emitters::bind_hitbox_owners,
                    emitters::trigger_weapon,
                    emitters::resolve_weapon_shots,
                    emitters::route_weapon_hits,
                    emitters::projectile_collisions,
                    emitters::particle_impacts,
                )
                    .chain()
                    .in_set(TickSet::Emit),
            )
            // Damage
            .add_systems(Update, systems::apply_generic_damage.in_set(TickSet::Resolve));
    }
}
