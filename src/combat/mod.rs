//! Combat module - damage emitters, routing and resolution.

mod components;
mod damage;
pub mod emitters;
mod plugin;
mod routing;
mod settings;
mod systems;

pub use components::*;
pub use damage::{probe_damage, DamageLookup, DamageOrigin, DamageResolver, DamageSources, ResolvedDamage};
pub use plugin::CombatPlugin;
pub use routing::{
    find_in_ancestors, route_hit, HitLookup, HitRoute, ProjectileFilter, ProjectileMatch,
    ProjectileTraits,
};
pub use settings::{load_combat_settings, CombatSettings, COMBAT_SETTINGS_PATH};
pub use systems::apply_generic_damage;
