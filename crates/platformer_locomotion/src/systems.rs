//! ECS обвязка locomotion FSM
//!
//! Порядок в frame:
//! - Update: `SampleProbes` (хост/headless пишет ProbeReadings) → `Logic` (init, logic тик,
//!   animation events, sync Transform)
//! - FixedUpdate: `Physics` (physics_update текущего state) → `Integrate` (тело двигается)
//!
//! Ошибки машины, ошибки программиста: логируем и падаем (fail fast).

use bevy::prelude::*;
use std::f32::consts::PI;

use crate::actor::{Actor, FacingDirection};
use crate::animation::{AnimationEvent, AnimationEventKind, AnimatorParameters};
use crate::collision_layers::get_layer_name;
use crate::config::{ConfigError, MovementConfig};
use crate::fsm::{LocomotionMachine, MachineError, StateId, TickContext, Transition};
use crate::input::InputSnapshot;
use crate::probe::ProbeReadings;

/// Фазы locomotion пайплайна
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocomotionSet {
    /// Probe'ы физики → ProbeReadings (Update)
    SampleProbes,
    /// FSM решения: переходы, velocity, flip (Update)
    Logic,
    /// Применение решений на fixed шаге (FixedUpdate)
    Physics,
    /// Интеграция тела (FixedUpdate, хост или HeadlessBodyPlugin)
    Integrate,
}

/// Event: актор сменил locomotion state
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocomotionTransition {
    pub entity: Entity,
    pub from: StateId,
    pub to: StateId,
}

impl LocomotionTransition {
    fn new(entity: Entity, transition: Transition) -> Self {
        Self {
            entity,
            from: transition.from,
            to: transition.to,
        }
    }
}

/// Всё что нужно машине для одного вызова
type MachineQuery<'w, 's> = Query<
    'w,
    's,
    (
        Entity,
        &'static mut LocomotionMachine,
        &'static mut Actor,
        &'static InputSnapshot,
        &'static ProbeReadings,
        &'static mut AnimatorParameters,
        &'static MovementConfig,
    ),
>;

/// Locomotion Plugin
///
/// Регистрирует события и системы FSM. Физику НЕ подключает:
/// хост двигает тело сам, либо добавляет `HeadlessBodyPlugin`.
pub struct LocomotionPlugin;

impl Plugin for LocomotionPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<AnimationEvent>()
            .add_event::<LocomotionTransition>();

        app.configure_sets(Update, (LocomotionSet::SampleProbes, LocomotionSet::Logic).chain())
            .configure_sets(FixedUpdate, (LocomotionSet::Physics, LocomotionSet::Integrate).chain());

        app.add_systems(
            Update,
            (
                initialize_locomotion_machines,
                locomotion_logic_update,
                dispatch_animation_events,
                sync_actor_transform,
            )
                .chain()
                .in_set(LocomotionSet::Logic),
        );

        app.add_systems(FixedUpdate, locomotion_physics_update.in_set(LocomotionSet::Physics));
    }
}

/// Спавн актора с провалидированным конфигом
///
/// Машина инициализируется в Idle первой же `initialize_locomotion_machines`.
pub fn spawn_locomotion_actor(
    commands: &mut Commands,
    position: Vec2,
    config: MovementConfig,
) -> Result<Entity, ConfigError> {
    config.validate()?;

    let filters = format!(
        "ground={} ladder={}",
        get_layer_name(config.ground_filter),
        get_layer_name(config.ladder_filter)
    );
    let entity = commands
        .spawn((
            Actor::new(position, &config),
            LocomotionMachine::default(),
            Transform::from_translation(position.extend(0.0)),
            config,
        ))
        .id();

    crate::log(&format!("Locomotion: spawned actor {:?} at {:?} ({})", entity, position, filters));
    Ok(entity)
}

fn fail_fast(entity: Entity, phase: &str, error: MachineError) -> ! {
    crate::log_error(&format!("Locomotion {:?}: {} failed: {}", entity, phase, error));
    panic!("locomotion machine of {:?} failed during {}: {}", entity, phase, error);
}

/// Initialize машин, которые ещё не стартовали (Idle)
pub fn initialize_locomotion_machines(mut query: MachineQuery, time: Res<Time>) {
    for (entity, mut machine, mut actor, input, probe, mut animator, config) in query.iter_mut() {
        if machine.is_initialized() {
            continue;
        }

        let mut ctx = TickContext {
            actor: &mut *actor,
            input,
            probe,
            animator: &mut *animator,
            config,
            delta: time.delta_secs(),
            elapsed: time.elapsed_secs(),
        };
        if let Err(error) = machine.initialize(StateId::Idle, &mut ctx) {
            fail_fast(entity, "initialize", error);
        }
    }
}

/// Logic тик каждого актора (variable delta)
pub fn locomotion_logic_update(
    mut query: MachineQuery,
    time: Res<Time>,
    mut transitions: EventWriter<LocomotionTransition>,
) {
    for (entity, mut machine, mut actor, input, probe, mut animator, config) in query.iter_mut() {
        // Заспавнен после initialize_locomotion_machines (commands применились позже) → следующий frame
        if !machine.is_initialized() {
            continue;
        }

        let mut ctx = TickContext {
            actor: &mut *actor,
            input,
            probe,
            animator: &mut *animator,
            config,
            delta: time.delta_secs(),
            elapsed: time.elapsed_secs(),
        };

        match machine.logic_update(&mut ctx) {
            Ok(Some(transition)) => {
                transitions.write(LocomotionTransition::new(entity, transition));
            }
            Ok(None) => {}
            Err(error) => fail_fast(entity, "logic_update", error),
        }
    }
}

/// Physics шаг (fixed delta). Переходов не бывает.
pub fn locomotion_physics_update(mut query: MachineQuery, time: Res<Time<Fixed>>) {
    for (entity, mut machine, mut actor, input, probe, mut animator, config) in query.iter_mut() {
        // Спавн между Update и FixedUpdate: машина стартует в следующем logic тике
        if !machine.is_initialized() {
            continue;
        }

        let mut ctx = TickContext {
            actor: &mut *actor,
            input,
            probe,
            animator: &mut *animator,
            config,
            delta: time.delta_secs(),
            elapsed: time.elapsed_secs(),
        };
        if let Err(error) = machine.physics_update(&mut ctx) {
            fail_fast(entity, "physics_update", error);
        }
    }
}

/// AnimationEvent → текущий state адресата
pub fn dispatch_animation_events(
    mut events: EventReader<AnimationEvent>,
    mut query: MachineQuery,
    time: Res<Time>,
    mut transitions: EventWriter<LocomotionTransition>,
) {
    for event in events.read() {
        let Ok((entity, mut machine, mut actor, input, probe, mut animator, config)) = query.get_mut(event.entity)
        else {
            crate::log_warning(&format!("AnimationEvent for {:?} without locomotion machine", event.entity));
            continue;
        };
        if !machine.is_initialized() {
            continue;
        }

        let mut ctx = TickContext {
            actor: &mut *actor,
            input,
            probe,
            animator: &mut *animator,
            config,
            delta: time.delta_secs(),
            elapsed: time.elapsed_secs(),
        };
        let result = match event.kind {
            AnimationEventKind::Trigger => machine.animation_trigger(&mut ctx),
            AnimationEventKind::Finished => machine.animation_finished(&mut ctx),
        };

        match result {
            Ok(Some(transition)) => {
                transitions.write(LocomotionTransition::new(entity, transition));
            }
            Ok(None) => {}
            Err(error) => fail_fast(entity, "animation event", error),
        }
    }
}

/// Actor → Transform (позиция + отзеркаливание по facing)
///
/// Facing Left = поворот на 180° вокруг Y (так хост зеркалит спрайт/модель).
pub fn sync_actor_transform(mut query: Query<(&Actor, &mut Transform), Changed<Actor>>) {
    for (actor, mut transform) in query.iter_mut() {
        let position = actor.position();
        transform.translation.x = position.x;
        transform.translation.y = position.y;
        transform.rotation = match actor.facing() {
            FacingDirection::Left => Quat::from_rotation_y(PI),
            FacingDirection::Right => Quat::IDENTITY,
        };
    }
}
