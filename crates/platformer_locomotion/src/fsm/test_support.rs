//! Test harness: машина + все коллабораторы без ECS.

use bevy::prelude::*;

use crate::actor::Actor;
use crate::animation::AnimatorParameters;
use crate::config::MovementConfig;
use crate::fsm::{LocomotionMachine, MachineError, StateId, StateRegistry, TickContext, Transition};
use crate::input::InputSnapshot;
use crate::probe::ProbeReadings;

pub const DT: f32 = 0.1;

pub struct Harness {
    pub machine: LocomotionMachine,
    pub actor: Actor,
    pub input: InputSnapshot,
    pub probe: ProbeReadings,
    pub animator: AnimatorParameters,
    pub config: MovementConfig,
    pub elapsed: f32,
}

impl Harness {
    /// Стоим на земле в Idle
    pub fn grounded() -> Self {
        Self::starting_in(StateId::Idle, ProbeReadings::grounded())
    }

    pub fn starting_in(initial: StateId, probe: ProbeReadings) -> Self {
        let mut harness = Self::uninitialized(StateRegistry::standard(), probe);
        harness.initialize(initial).expect("initialize");
        harness
    }

    pub fn uninitialized(registry: StateRegistry, probe: ProbeReadings) -> Self {
        let config = MovementConfig {
            move_max_speed: 5.0,
            move_max_acceleration: 10.0,
            ..default()
        };
        Self {
            machine: LocomotionMachine::new(registry),
            actor: Actor::new(Vec2::ZERO, &config),
            input: InputSnapshot::default(),
            probe,
            animator: AnimatorParameters::default(),
            config,
            elapsed: 0.0,
        }
    }

    pub fn initialize(&mut self, initial: StateId) -> Result<(), MachineError> {
        let Self { machine, actor, input, probe, animator, config, elapsed } = self;
        let mut ctx = TickContext {
            actor,
            input: &*input,
            probe: &*probe,
            animator,
            config: &*config,
            delta: DT,
            elapsed: *elapsed,
        };
        machine.initialize(initial, &mut ctx)
    }

    /// Один logic тик
    pub fn tick(&mut self) -> Option<Transition> {
        self.elapsed += DT;
        self.with_ctx(|machine, ctx| machine.logic_update(ctx))
            .expect("logic_update")
    }

    pub fn physics(&mut self) {
        self.with_ctx(|machine, ctx| machine.physics_update(ctx))
            .expect("physics_update");
    }

    pub fn animation_trigger(&mut self) -> Option<Transition> {
        self.with_ctx(|machine, ctx| machine.animation_trigger(ctx))
            .expect("animation_trigger")
    }

    pub fn animation_finished(&mut self) -> Option<Transition> {
        self.with_ctx(|machine, ctx| machine.animation_finished(ctx))
            .expect("animation_finished")
    }

    pub fn change_state(&mut self, next: StateId) -> Result<Transition, MachineError> {
        self.with_ctx(|machine, ctx| machine.change_state(next, ctx))
    }

    pub fn current(&self) -> StateId {
        self.machine.current().expect("machine initialized")
    }

    fn with_ctx<R>(&mut self, f: impl FnOnce(&mut LocomotionMachine, &mut TickContext) -> R) -> R {
        let Self { machine, actor, input, probe, animator, config, elapsed } = self;
        let mut ctx = TickContext {
            actor,
            input: &*input,
            probe: &*probe,
            animator,
            config: &*config,
            delta: DT,
            elapsed: *elapsed,
        };
        f(machine, &mut ctx)
    }
}
