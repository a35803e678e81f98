//! PLATFORMER Locomotion Core
//!
//! Hierarchical FSM передвижения 2D персонажа на Bevy 0.16.
//!
//! Разделение ответственности:
//! - ECS (этот crate) = решения: состояния, переходы, velocity, facing, animation флаги
//! - Хост (движок/физика) = probe'ы, интеграция тела, проигрывание клипов
//!
//! Для headless симуляции хост заменяется на `HeadlessBodyPlugin`.

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

// Публичные модули
pub mod actor;
pub mod animation;
pub mod body;
pub mod collision_layers;
pub mod config;
pub mod fsm;
pub mod input;
pub mod logger;
pub mod probe;
pub mod systems;
pub mod velocity;

// Re-export основных типов
pub use actor::{Actor, FacingDirection};
pub use animation::{AnimationEvent, AnimationEventKind, AnimationSink, AnimatorParameters};
pub use body::{HeadlessBodyPlugin, HeadlessClips, HeadlessLevel, LadderVolume, GRAVITY};
pub use collision_layers::CollisionLayers;
pub use config::{ConfigError, MovementConfig};
pub use fsm::{LocomotionMachine, LocomotionState, MachineError, StateId, StateRegistry, Transition};
pub use input::InputSnapshot;
pub use logger::{
    init_logger, log, log_error, log_info, log_warning, log_with_level, set_log_level, set_logger,
    set_logger_if_needed, LogLevel, LogPrinter,
};
pub use probe::{LadderContact, OverlapHit, OverlapProbe, OverlapQuery, PhysicsProbe, ProbeLayout, ProbeReadings};
pub use systems::{spawn_locomotion_actor, LocomotionPlugin, LocomotionSet, LocomotionTransition};
pub use velocity::resolve_velocity_x;

/// Шаг симуляции (60Hz и для Update, и для FixedUpdate)
pub const TICK_SECONDS: f64 = 1.0 / 60.0;

/// Главный plugin симуляции (FSM + headless тело)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для physics шага
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            .add_plugins((LocomotionPlugin, HeadlessBodyPlugin));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Время двигается вручную (ровно TICK_SECONDS за `app.update()`), а не по wall clock.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(TICK_SECONDS)))
        .insert_resource(DeterministicRng::new(seed))
        .add_plugins(SimulationPlugin);

    app
}

/// Snapshot мира для сравнения детерминизма
/// (упрощённая версия через Debug, без полноценной сериализации)
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
