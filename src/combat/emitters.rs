//! Damage emitters: the player's hitscan weapon, hitbox proxies, and
//! projectile or particle contact with enemies.
//!
//! Emitters never touch health. They route a hit to the right entity and
//! send a [`DamageEvent`]; the resolve phase does the rest.

use std::collections::HashSet;

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::*;
use super::damage::{probe_damage, DamageSources, MAX_OWNER_DEPTH};
use super::routing::{route_hit, HitLookup, HitRoute, ProjectileTraits};
use super::settings::CombatSettings;
use crate::core::{FeedbackEvent, ScoreEvent, SimulationContext};
use crate::enemies::Enemy;
use crate::player::{Player, PlayerCamera};

/// ECS-backed [`HitLookup`].
#[derive(SystemParam)]
pub struct HitScene<'w, 's> {
    hitboxes: Query<'w, 's, &'static Hitbox>,
    enemies: Query<'w, 's, (), (With<Enemy>, Without<Dead>)>,
    health: Query<'w, 's, &'static Health>,
    props: Query<'w, 's, &'static Destructible>,
    parents: Query<'w, 's, &'static Parent>,
}

impl HitScene<'_, '_> {
    fn points_for(&self, prop: Entity) -> u32 {
        self.props.get(prop).map_or(0, |prop| prop.points)
    }
}

impl HitLookup for HitScene<'_, '_> {
    fn hitbox_owner(&self, entity: Entity) -> Option<Option<Entity>> {
        self.hitboxes.get(entity).ok().map(|hitbox| hitbox.owner)
    }

    fn is_enemy(&self, entity: Entity) -> bool {
        self.enemies.contains(entity)
    }

    fn has_health(&self, entity: Entity) -> bool {
        self.health.get(entity).is_ok_and(|health| !health.is_dead())
    }

    fn is_destructible(&self, entity: Entity) -> bool {
        self.props.contains(entity)
    }

    fn parent_of(&self, entity: Entity) -> Option<Entity> {
        self.parents.get(entity).ok().map(Parent::get)
    }
}

/// Left click fires the player's weapon.
pub fn trigger_weapon(
    context: Res<SimulationContext>,
    mouse: Res<ButtonInput<MouseButton>>,
    shooters: Query<Entity, (With<Player>, With<Weapon>)>,
    mut fired: EventWriter<WeaponFired>,
) {
    if !context.active || !mouse.just_pressed(MouseButton::Left) {
        return;
    }

    for shooter in shooters.iter() {
        fired.send(WeaponFired { shooter });
    }
}

/// Cast the weapon ray for every shot fired this frame.
pub fn resolve_weapon_shots(
    mut fired: EventReader<WeaponFired>,
    rapier_context: Query<&RapierContext>,
    shooters: Query<(&Weapon, &GlobalTransform)>,
    cameras: Query<(&GlobalTransform, &Parent), With<PlayerCamera>>,
    mut hits: EventWriter<WeaponHit>,
    mut feedback: EventWriter<FeedbackEvent>,
) {
    let Ok(context) = rapier_context.get_single() else {
        fired.clear();
        return;
    };

    for event in fired.read() {
        let shooter = event.shooter;
        let Ok((weapon, shooter_transform)) = shooters.get(shooter) else {
            continue;
        };

        // Prefer the shooter's camera as the ray origin
        let eye = cameras
            .iter()
            .find(|(_, parent)| parent.get() == shooter)
            .map(|(transform, _)| transform)
            .unwrap_or(shooter_transform);
        let origin = eye.translation();
        let direction = eye.forward().as_vec3();

        feedback.send(FeedbackEvent::MuzzleFlash { shooter });

        if let Some((struck, hit)) = context.cast_ray_and_get_normal(
            origin,
            direction,
            weapon.range,
            true,
            QueryFilter::default().exclude_collider(shooter),
        ) {
            hits.send(WeaponHit {
                shooter,
                struck,
                point: hit.point,
                normal: hit.normal,
                direction,
            });
        }
    }
}

/// Route weapon hits: hitbox, enemy, anything with health, then breakable props.
#[allow(clippy::too_many_arguments)]
pub fn route_weapon_hits(
    mut commands: Commands,
    mut hits: EventReader<WeaponHit>,
    weapons: Query<&Weapon>,
    bodies: Query<&RigidBody>,
    scene: HitScene,
    mut damage_events: EventWriter<DamageEvent>,
    mut score_events: EventWriter<ScoreEvent>,
    mut feedback: EventWriter<FeedbackEvent>,
) {
    for hit in hits.read() {
        let Ok(weapon) = weapons.get(hit.shooter) else {
            continue;
        };

        feedback.send(FeedbackEvent::Impact {
            shooter: hit.shooter,
            point: hit.point,
            normal: hit.normal,
        });

        if matches!(bodies.get(hit.struck), Ok(RigidBody::Dynamic)) {
            commands.entity(hit.struck).insert(ExternalImpulse {
                impulse: hit.direction * weapon.impact_force,
                ..default()
            });
        }

        match route_hit(hit.struck, &scene) {
            HitRoute::Hitbox { hitbox, owner } => {
                debug!("{} hit hitbox {:?} of {:?}", weapon.name, hitbox, owner);
                damage_events.send(DamageEvent::declared(owner, hit.shooter, weapon.damage));
            }
            HitRoute::Enemy(target) | HitRoute::Damageable(target) => {
                debug!("{} hit {:?}", weapon.name, target);
                damage_events.send(DamageEvent::declared(target, hit.shooter, weapon.damage));
            }
            HitRoute::Destructible(prop) => {
                score_events.send(ScoreEvent {
                    points: scene.points_for(prop),
                    source: prop,
                });
                feedback.send(FeedbackEvent::PropDestroyed { point: hit.point });
                commands.entity(prop).despawn_recursive();
            }
            HitRoute::Unhandled => {}
        }
    }
}

/// Resolve missing hitbox owners by walking up to the nearest enemy.
pub fn bind_hitbox_owners(
    mut hitboxes: Query<(Entity, &mut Hitbox), Added<Hitbox>>,
    scene_enemies: Query<(), With<Enemy>>,
    parents: Query<&Parent>,
) {
    for (entity, mut hitbox) in hitboxes.iter_mut() {
        if hitbox.owner.is_some() {
            continue;
        }

        let mut current = Some(entity);
        for _ in 0..MAX_OWNER_DEPTH {
            let Some(candidate) = current else {
                break;
            };
            if scene_enemies.contains(candidate) {
                hitbox.owner = Some(candidate);
                break;
            }
            current = parents.get(candidate).ok().map(Parent::get);
        }

        match hitbox.owner {
            Some(owner) => debug!("Hitbox {:?} bound to enemy {:?}", entity, owner),
            None => warn!("Hitbox {:?} has no owning enemy; hits on it are ignored", entity),
        }
    }
}

/// ECS view used to decide whether a contact is a player projectile striking
/// a live enemy.
#[derive(SystemParam)]
pub struct ProjectileContacts<'w, 's> {
    enemies: Query<'w, 's, (), (With<Enemy>, Without<Dead>)>,
    hitboxes: Query<'w, 's, &'static Hitbox>,
    identities: Query<
        'w,
        's,
        (
            Option<&'static ObjectTag>,
            Option<&'static CollisionGroups>,
            Option<&'static Name>,
        ),
    >,
}

impl ProjectileContacts<'_, '_> {
    /// The enemy that should take the hit when `entity` is struck.
    fn victim(&self, entity: Entity) -> Option<Entity> {
        if self.enemies.contains(entity) {
            return Some(entity);
        }
        self.hitboxes
            .get(entity)
            .ok()
            .and_then(|hitbox| hitbox.owner)
            .filter(|owner| self.enemies.contains(*owner))
    }

    fn is_player_projectile(&self, entity: Entity, settings: &CombatSettings) -> bool {
        let Ok((tag, groups, name)) = self.identities.get(entity) else {
            return false;
        };
        let traits = ProjectileTraits {
            tag: tag.map(|tag| tag.0.as_str()),
            memberships: groups.map(|groups| groups.memberships.bits()),
            name: name.map(Name::as_str),
        };
        match settings.projectile.classify(&traits) {
            Some(matched) => {
                debug!("{:?} recognised as player projectile by {:?}", entity, matched);
                true
            }
            None => false,
        }
    }

    /// Pair up `(victim, projectile)` from the two sides of a contact.
    fn pair(&self, a: Entity, b: Entity, settings: &CombatSettings) -> Option<(Entity, Entity)> {
        if let Some(victim) = self.victim(a) {
            if self.is_player_projectile(b, settings) {
                return Some((victim, b));
            }
        }
        if let Some(victim) = self.victim(b) {
            if self.is_player_projectile(a, settings) {
                return Some((victim, a));
            }
        }
        None
    }
}

/// Player projectiles that touch an enemy (solid or sensor) deal their damage.
///
/// The damage is read off the projectile before it is despawned, so the
/// event carries it as a declared amount.
pub fn projectile_collisions(
    mut commands: Commands,
    mut collisions: EventReader<CollisionEvent>,
    settings: Res<CombatSettings>,
    contacts: ProjectileContacts,
    sources: DamageSources,
    mut damage_events: EventWriter<DamageEvent>,
) {
    let mut spent = HashSet::new();

    for event in collisions.read() {
        let CollisionEvent::Started(a, b, _) = *event else {
            continue;
        };
        let Some((victim, projectile)) = contacts.pair(a, b, &settings) else {
            continue;
        };

        // One projectile hits once, even when it touches several colliders
        if settings.destroy_projectile_on_hit && !spent.insert(projectile) {
            continue;
        }

        let event = match probe_damage(projectile, &sources) {
            Some((_, amount)) => DamageEvent::declared(victim, projectile, amount),
            None => DamageEvent::from_source(victim, projectile),
        };
        damage_events.send(event);

        if settings.destroy_projectile_on_hit {
            if let Some(entity) = commands.get_entity(projectile) {
                entity.despawn_recursive();
            }
        }
    }
}

/// Particle strikes from player emitters. The emitter is never destroyed.
pub fn particle_impacts(
    mut impacts: EventReader<ParticleImpact>,
    settings: Res<CombatSettings>,
    contacts: ProjectileContacts,
    mut damage_events: EventWriter<DamageEvent>,
) {
    for impact in impacts.read() {
        let Some(victim) = contacts.victim(impact.target) else {
            continue;
        };
        if !contacts.is_player_projectile(impact.particle, &settings) {
            continue;
        }
        damage_events.send(DamageEvent::from_source(victim, impact.particle));
    }
}
