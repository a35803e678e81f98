//! Headless тело актора (без физического движка)
//!
//! Для тестов и demo: плоский пол на `floor_height` + лестницы-прямоугольники.
//! В игре эту роль играет физика хоста (Godot/Rapier), плагин тогда не подключается.
//!
//! - `sample_headless_probes`: ProbeReadings через `OverlapProbe` поверх `HeadlessLevel`
//! - `apply_body_gravity` / `integrate_body_velocity`: FixedUpdate, после physics_update FSM
//! - `play_headless_clips`: вместо animation playback: отправляет "клип доигран" для Land

use bevy::prelude::*;

use crate::actor::Actor;
use crate::animation::AnimationEvent;
use crate::collision_layers::CollisionLayers;
use crate::config::MovementConfig;
use crate::fsm::{LocomotionMachine, LocomotionState, StateId};
use crate::probe::{OverlapHit, OverlapProbe, OverlapQuery, ProbeLayout, ProbeReadings};
use crate::systems::LocomotionSet;

/// Гравитация (units/sec²), умножается на `Actor::gravity_scale`
pub const GRAVITY: f32 = -9.81;

/// Лестница, axis-aligned прямоугольник
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct LadderVolume {
    pub entity: Entity,
    pub min: Vec2,
    pub max: Vec2,
}

impl LadderVolume {
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    fn overlaps_circle(&self, center: Vec2, radius: f32) -> bool {
        let closest = center.clamp(self.min, self.max);
        closest.distance(center) <= radius
    }
}

/// Уровень для headless симуляции
#[derive(Resource, Debug, Clone, Default)]
pub struct HeadlessLevel {
    pub floor_height: f32,
    pub ladders: Vec<LadderVolume>,
}

impl OverlapQuery for HeadlessLevel {
    fn overlap_circle(&self, center: Vec2, radius: f32, filter: CollisionLayers) -> Option<OverlapHit> {
        if filter.intersects(CollisionLayers::LADDERS) {
            let ladder = self
                .ladders
                .iter()
                .find(|ladder| ladder.overlaps_circle(center, radius));
            if let Some(ladder) = ladder {
                return Some(OverlapHit {
                    entity: ladder.entity,
                    position: ladder.center(),
                    is_ladder: true,
                });
            }
        }

        // Пол, полуплоскость, отдельной entity у него нет
        if filter.intersects(CollisionLayers::GROUND) && center.y - radius <= self.floor_height {
            return Some(OverlapHit {
                entity: Entity::PLACEHOLDER,
                position: Vec2::new(center.x, self.floor_height),
                is_ladder: false,
            });
        }

        None
    }
}

/// Длительности клипов для headless playback
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct HeadlessClips {
    /// Сколько секунд играет клип приземления
    pub land_duration: f32,
}

impl Default for HeadlessClips {
    fn default() -> Self {
        Self { land_duration: 0.2 }
    }
}

/// Headless тело + probe'ы + animation playback
pub struct HeadlessBodyPlugin;

impl Plugin for HeadlessBodyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HeadlessLevel>()
            .init_resource::<HeadlessClips>();

        app.add_systems(
            Update,
            (sample_headless_probes, play_headless_clips)
                .chain()
                .in_set(LocomotionSet::SampleProbes),
        );

        app.add_systems(
            FixedUpdate,
            (apply_body_gravity, integrate_body_velocity)
                .chain()
                .in_set(LocomotionSet::Integrate),
        );
    }
}

/// Probe'ы актора против HeadlessLevel
pub fn sample_headless_probes(
    level: Res<HeadlessLevel>,
    mut query: Query<(&Actor, &ProbeLayout, &MovementConfig, &mut ProbeReadings)>,
) {
    for (actor, layout, config, mut readings) in query.iter_mut() {
        let probe = OverlapProbe::new(&*level, actor.position(), layout, config);
        let sampled = ProbeReadings::sample(&probe);

        // Без записи если ничего не изменилось (Changed<ProbeReadings> остаётся честным)
        if *readings != sampled {
            *readings = sampled;
        }
    }
}

/// Land держится до конца клипа → шлём Finished когда клип "доиграл"
pub fn play_headless_clips(
    clips: Res<HeadlessClips>,
    time: Res<Time>,
    query: Query<(Entity, &LocomotionMachine)>,
    mut events: EventWriter<AnimationEvent>,
) {
    let elapsed = time.elapsed_secs();

    for (entity, machine) in query.iter() {
        if machine.current() != Some(StateId::Land) {
            continue;
        }
        let Ok(land) = machine.state(StateId::Land) else {
            continue;
        };
        if land.core().time_in_state(elapsed) >= clips.land_duration {
            events.write(AnimationEvent::finished(entity));
        }
    }
}

/// Гравитация (на земле и не летим вверх → не копим скорость падения)
pub fn apply_body_gravity(mut query: Query<(&mut Actor, &ProbeReadings)>, time: Res<Time<Fixed>>) {
    let delta = time.delta_secs();

    for (mut actor, readings) in query.iter_mut() {
        if readings.grounded && actor.velocity().y <= 0.0 {
            continue;
        }
        let vy = actor.velocity().y + GRAVITY * actor.gravity_scale() * delta;
        actor.set_velocity_y(vy);
    }
}

/// position += velocity * dt, пол не пробиваем
pub fn integrate_body_velocity(
    level: Res<HeadlessLevel>,
    mut query: Query<&mut Actor>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for mut actor in query.iter_mut() {
        let mut position = actor.position() + actor.velocity() * delta;

        if position.y < level.floor_height {
            position.y = level.floor_height;
            if actor.velocity().y < 0.0 {
                actor.set_velocity_y(0.0);
            }
        }
        actor.set_position(position);
    }
}
