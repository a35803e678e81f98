//! Headless demo PLATFORMER locomotion
//!
//! Один актор, пол и лестница. Input генерирует seeded бот, переходы FSM печатаются в лог.

use bevy::prelude::*;
use rand::Rng;

use platformer_locomotion::{
    create_headless_app, log_error, log_info, spawn_locomotion_actor, Actor, DeterministicRng, HeadlessLevel,
    InputSnapshot, LadderVolume, LocomotionMachine, LocomotionSet, LocomotionTransition, MovementConfig,
};

/// Бот держит выбранный input несколько тиков подряд (иначе дёргается каждый frame)
#[derive(Resource, Default)]
struct BotScript {
    current: InputSnapshot,
    ticks_left: u32,
}

fn main() {
    let seed = 42;

    // create_headless_app ставит logger, логировать можно только после него
    let mut app = create_headless_app(seed);
    log_info(&format!("Starting PLATFORMER headless locomotion (seed: {})", seed));

    app.insert_resource(HeadlessLevel {
        floor_height: 0.0,
        ladders: vec![LadderVolume {
            entity: Entity::PLACEHOLDER,
            min: Vec2::new(4.5, 0.0),
            max: Vec2::new(5.5, 6.0),
        }],
    })
    .init_resource::<BotScript>()
    .add_systems(Startup, spawn_player)
    .add_systems(Update, drive_bot.before(LocomotionSet::SampleProbes))
    .add_systems(Update, log_transitions.after(LocomotionSet::Logic));

    for tick in 0..1200 {
        app.update();

        if tick % 120 == 0 {
            let world = app.world_mut();
            let mut query = world.query::<(&Actor, &LocomotionMachine)>();
            for (actor, machine) in query.iter(world) {
                log_info(&format!(
                    "Tick {}: {:?} pos={:?} vel={:?} facing={:?}",
                    tick,
                    machine.current(),
                    actor.position(),
                    actor.velocity(),
                    actor.facing()
                ));
            }
        }
    }

    log_info("Simulation complete!");
}

fn spawn_player(mut commands: Commands) {
    if let Err(error) = spawn_locomotion_actor(&mut commands, Vec2::ZERO, MovementConfig::default()) {
        log_error(&format!("Failed to spawn player: {}", error));
    }
}

/// Случайный input на 10..60 тиков
fn drive_bot(
    mut rng: ResMut<DeterministicRng>,
    mut script: ResMut<BotScript>,
    mut inputs: Query<&mut InputSnapshot>,
) {
    if script.ticks_left == 0 {
        let rng = &mut rng.rng;
        let x_axis = [-1.0, 0.0, 1.0][rng.gen_range(0..3)];
        script.current = InputSnapshot {
            x_axis,
            jump_pressed: rng.gen_bool(0.1),
            crouch_held: rng.gen_bool(0.15),
            sprint_held: rng.gen_bool(0.3),
            climb_up: rng.gen_bool(0.2),
            climb_down: rng.gen_bool(0.1),
        };
        script.ticks_left = rng.gen_range(10..60);
    }
    script.ticks_left -= 1;

    for mut input in inputs.iter_mut() {
        *input = script.current;
    }
}

fn log_transitions(mut events: EventReader<LocomotionTransition>) {
    for event in events.read() {
        log_info(&format!("{:?}: {:?} → {:?}", event.entity, event.from, event.to));
    }
}
