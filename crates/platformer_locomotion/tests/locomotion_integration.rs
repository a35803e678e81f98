//! Интеграционные тесты locomotion (ECS пайплайн + headless тело)
//!
//! Проверяем полные сценарии через Bevy App:
//! 1. Spawn → Idle
//! 2. Ходьба, разворот, Transform
//! 3. Прыжок → полёт → приземление → Idle (клип Land доигран headless)
//! 4. Лестница: захват, подъём, остановка
//! 5. Невалидный конфиг, чужие animation events

use std::f32::consts::PI;

use bevy::prelude::*;

use platformer_locomotion::{
    create_headless_app, spawn_locomotion_actor, Actor, AnimationEvent, AnimatorParameters, ConfigError,
    FacingDirection, HeadlessLevel, InputSnapshot, LadderVolume, LocomotionMachine, LocomotionSet,
    LocomotionTransition, MovementConfig, StateId,
};

/// Все переходы за прогон (в порядке событий)
#[derive(Resource, Default)]
struct TransitionLog(Vec<(StateId, StateId)>);

fn record_transitions(mut events: EventReader<LocomotionTransition>, mut log: ResMut<TransitionLog>) {
    for event in events.read() {
        log.0.push((event.from, event.to));
    }
}

fn create_test_app() -> App {
    let mut app = create_headless_app(42);
    app.insert_resource(HeadlessLevel {
        floor_height: 0.0,
        ladders: vec![LadderVolume {
            entity: Entity::PLACEHOLDER,
            min: Vec2::new(4.5, 0.0),
            max: Vec2::new(5.5, 6.0),
        }],
    })
    .init_resource::<TransitionLog>()
    .add_systems(Update, record_transitions.after(LocomotionSet::Logic));
    app
}

fn spawn_actor(app: &mut App, position: Vec2, config: MovementConfig) -> Result<Entity, ConfigError> {
    let result = {
        let mut commands = app.world_mut().commands();
        spawn_locomotion_actor(&mut commands, position, config)
    };
    app.world_mut().flush();
    result
}

fn run(app: &mut App, ticks: usize) {
    for _ in 0..ticks {
        app.update();
    }
}

fn set_input(app: &mut App, entity: Entity, input: InputSnapshot) {
    *app.world_mut().get_mut::<InputSnapshot>(entity).unwrap() = input;
}

fn current_state(app: &App, entity: Entity) -> Option<StateId> {
    app.world().get::<LocomotionMachine>(entity).unwrap().current()
}

fn actor(app: &App, entity: Entity) -> &Actor {
    app.world().get::<Actor>(entity).unwrap()
}

fn transitions(app: &App) -> Vec<(StateId, StateId)> {
    app.world().resource::<TransitionLog>().0.clone()
}

#[test]
fn test_spawn_initializes_idle() {
    let mut app = create_test_app();
    let entity = spawn_actor(&mut app, Vec2::ZERO, MovementConfig::default()).unwrap();

    run(&mut app, 1);

    assert_eq!(current_state(&app, entity), Some(StateId::Idle));
    let animator = app.world().get::<AnimatorParameters>(entity).unwrap();
    assert_eq!(animator.active_flags(), vec!["idle"]);
}

#[test]
fn test_walk_right_reaches_max_speed() {
    let mut app = create_test_app();
    let config = MovementConfig::default();
    let max_speed = config.move_max_speed;
    let entity = spawn_actor(&mut app, Vec2::ZERO, config).unwrap();

    run(&mut app, 2);
    // 40 тиков: останавливаемся до лестницы (4.5..5.5), иначе Idle за неё зацепится
    set_input(&mut app, entity, InputSnapshot::horizontal(1.0));
    run(&mut app, 40);

    assert_eq!(current_state(&app, entity), Some(StateId::Move));
    assert!((actor(&app, entity).velocity().x - max_speed).abs() < 1e-4);
    assert!(actor(&app, entity).position().x > 1.0, "actor moved: {:?}", actor(&app, entity).position());
    assert_eq!(actor(&app, entity).position().y, 0.0);

    // Отпустили, Move → Idle, быстрое торможение
    set_input(&mut app, entity, InputSnapshot::default());
    run(&mut app, 10);
    assert_eq!(current_state(&app, entity), Some(StateId::Idle));
    assert_eq!(actor(&app, entity).velocity().x, 0.0);

    assert!(transitions(&app).contains(&(StateId::Idle, StateId::Move)));
    assert!(transitions(&app).contains(&(StateId::Move, StateId::Idle)));
}

#[test]
fn test_walk_left_mirrors_transform() {
    let mut app = create_test_app();
    let entity = spawn_actor(&mut app, Vec2::ZERO, MovementConfig::default()).unwrap();

    run(&mut app, 2);
    set_input(&mut app, entity, InputSnapshot::horizontal(-1.0));
    run(&mut app, 30);

    assert_eq!(actor(&app, entity).facing(), FacingDirection::Left);

    let transform = app.world().get::<Transform>(entity).unwrap();
    assert!(transform.translation.x < 0.0);
    assert!(transform.rotation.abs_diff_eq(Quat::from_rotation_y(PI), 1e-5));
}

#[test]
fn test_jump_full_cycle() {
    let mut app = create_test_app();
    let entity = spawn_actor(&mut app, Vec2::ZERO, MovementConfig::default()).unwrap();

    run(&mut app, 2);

    // Одно нажатие прыжка (pressed только на один frame)
    set_input(&mut app, entity, InputSnapshot::default().with_jump());
    run(&mut app, 1);
    assert_eq!(current_state(&app, entity), Some(StateId::Jump));
    set_input(&mut app, entity, InputSnapshot::default());

    run(&mut app, 10);
    assert_eq!(current_state(&app, entity), Some(StateId::InAir));
    assert!(actor(&app, entity).position().y > 0.5);

    // Полёт ~0.8s, клип приземления 0.2s
    run(&mut app, 150);
    assert_eq!(current_state(&app, entity), Some(StateId::Idle));
    assert_eq!(actor(&app, entity).position().y, 0.0);
    assert_eq!(actor(&app, entity).velocity(), Vec2::ZERO);

    assert_eq!(
        transitions(&app),
        vec![
            (StateId::Idle, StateId::Jump),
            (StateId::Jump, StateId::InAir),
            (StateId::InAir, StateId::Land),
            (StateId::Land, StateId::Idle),
        ]
    );
}

#[test]
fn test_climb_ladder() {
    let mut app = create_test_app();
    let config = MovementConfig::default();
    let gravity_scale = config.gravity_scale;
    let entity = spawn_actor(&mut app, Vec2::new(4.8, 0.0), config).unwrap();

    run(&mut app, 2);
    set_input(&mut app, entity, InputSnapshot::default().with_climb_up());
    run(&mut app, 60);

    assert_eq!(current_state(&app, entity), Some(StateId::ClimbMove));
    let climbing = actor(&app, entity);
    assert_eq!(climbing.position().x, 5.0); // Snap к центру лестницы
    assert!(climbing.position().y > 2.0, "climbed to {:?}", climbing.position());
    assert_eq!(climbing.gravity_scale(), 0.0);

    // Отпустили, висим на месте
    set_input(&mut app, entity, InputSnapshot::default());
    run(&mut app, 5);
    assert_eq!(current_state(&app, entity), Some(StateId::ClimbIdle));
    let height = actor(&app, entity).position().y;
    run(&mut app, 30);
    assert_eq!(actor(&app, entity).position().y, height);
    assert_eq!(actor(&app, entity).gravity_scale(), 0.0);

    assert!(transitions(&app).starts_with(&[
        (StateId::Idle, StateId::ClimbIdle),
        (StateId::ClimbIdle, StateId::ClimbMove),
    ]));

    // Вниз до земли: пол держит, остаёмся на лестнице
    set_input(&mut app, entity, InputSnapshot::default().with_climb_down());
    run(&mut app, 120);
    assert_eq!(current_state(&app, entity), Some(StateId::ClimbMove));
    assert_eq!(actor(&app, entity).position().y, 0.0);
    assert_eq!(actor(&app, entity).gravity_scale(), 0.0);

    // Сходим вправо: ClimbIdle → Move, лестница позади, гравитация вернулась
    set_input(&mut app, entity, InputSnapshot::horizontal(1.0));
    run(&mut app, 30);
    assert_eq!(current_state(&app, entity), Some(StateId::Move));
    assert!(actor(&app, entity).position().x > 6.0, "walked off to {:?}", actor(&app, entity).position());
    assert_eq!(actor(&app, entity).gravity_scale(), gravity_scale);
    assert!(transitions(&app).ends_with(&[
        (StateId::ClimbMove, StateId::ClimbIdle),
        (StateId::ClimbIdle, StateId::Move),
    ]));
}

#[test]
fn test_idle_next_to_ladder_grabs_it() {
    let mut app = create_test_app();
    let entity = spawn_actor(&mut app, Vec2::new(4.3, 0.0), MovementConfig::default()).unwrap();

    run(&mut app, 2);

    assert_eq!(current_state(&app, entity), Some(StateId::ClimbIdle));
    assert_eq!(actor(&app, entity).position().x, 5.0);
    assert_eq!(transitions(&app), vec![(StateId::Idle, StateId::ClimbIdle)]);
}

#[test]
fn test_invalid_config_rejected() {
    let mut app = create_test_app();
    let config = MovementConfig {
        move_max_speed: -1.0,
        ..default()
    };

    let result = spawn_actor(&mut app, Vec2::ZERO, config);
    assert!(matches!(result, Err(ConfigError::Negative { field: "move_max_speed", .. })));

    run(&mut app, 1);
    let world = app.world_mut();
    assert_eq!(world.query::<&Actor>().iter(world).count(), 0);
}

#[test]
fn test_animation_event_for_unknown_entity_is_ignored() {
    let mut app = create_test_app();
    let entity = spawn_actor(&mut app, Vec2::ZERO, MovementConfig::default()).unwrap();
    let stranger = app.world_mut().spawn_empty().id();

    run(&mut app, 1);
    app.world_mut().send_event(AnimationEvent::finished(stranger));
    app.world_mut().send_event(AnimationEvent::trigger(entity));
    run(&mut app, 1);

    // Idle не реагирует на animation trigger
    assert_eq!(current_state(&app, entity), Some(StateId::Idle));
}

#[test]
fn test_land_finish_event_from_host() {
    let mut app = create_test_app();
    let entity = spawn_actor(&mut app, Vec2::new(0.0, 3.0), MovementConfig::default()).unwrap();
    // Клип приземления "бесконечный", выход только по событию хоста
    app.insert_resource(platformer_locomotion::HeadlessClips { land_duration: f32::MAX });

    run(&mut app, 90);
    assert_eq!(current_state(&app, entity), Some(StateId::Land));

    set_input(&mut app, entity, InputSnapshot::horizontal(1.0));
    app.world_mut().send_event(AnimationEvent::finished(entity));
    run(&mut app, 1);
    assert_eq!(current_state(&app, entity), Some(StateId::Move));
}
