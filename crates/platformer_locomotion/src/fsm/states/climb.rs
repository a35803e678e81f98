//! Лестница: ClimbIdle, ClimbMove
//!
//! Пока актор на лестнице, гравитация тела отключена (gravity_scale = 0),
//! на выходе из state восстанавливается из MovementConfig.

use bevy::prelude::*;

use crate::fsm::state::{LocomotionState, StateCore, StateId, TickContext};

/// Общий кэш probe'ов для climb состояний
#[derive(Debug, Clone, Default)]
struct ClimbChecks {
    ladder_contact: bool,
    is_grounded: bool,
}

impl ClimbChecks {
    fn refresh(&mut self, ctx: &TickContext) {
        self.ladder_contact = ctx.probe.ladder_contact();
        self.is_grounded = ctx.probe.is_grounded();
    }
}

fn suspend_gravity(ctx: &mut TickContext) {
    ctx.actor.set_gravity_scale(0.0);
}

fn restore_gravity(ctx: &mut TickContext) {
    ctx.actor.set_gravity_scale(ctx.config.gravity_scale);
}

/// ClimbIdle: висим на лестнице
pub struct ClimbIdleState {
    core: StateCore,
    checks: ClimbChecks,
}

impl Default for ClimbIdleState {
    fn default() -> Self {
        Self {
            core: StateCore::new(StateId::ClimbIdle),
            checks: ClimbChecks::default(),
        }
    }
}

impl LocomotionState for ClimbIdleState {
    fn core(&self) -> &StateCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut StateCore {
        &mut self.core
    }

    fn enter(&mut self, ctx: &mut TickContext) {
        self.core.enter(ctx);
        suspend_gravity(ctx);
        ctx.actor.set_velocity_zero();

        // Snap по X к лестнице (нижний probe приоритетнее, см. PhysicsProbe::ladder_object)
        if let Some(ladder) = ctx.probe.ladder_object() {
            let position = ctx.actor.position();
            ctx.actor.set_position(Vec2::new(ladder.position.x, position.y));
        }
    }

    fn exit(&mut self, ctx: &mut TickContext) {
        self.core.exit(ctx);
        restore_gravity(ctx);
    }

    fn do_checks(&mut self, ctx: &TickContext) {
        self.checks.refresh(ctx);
    }

    fn logic_update(&mut self, ctx: &mut TickContext) -> Option<StateId> {
        ctx.actor.set_velocity_zero();

        if !self.checks.ladder_contact {
            Some(StateId::Idle)
        } else if ctx.input.climb_input() {
            Some(StateId::ClimbMove)
        } else if self.checks.is_grounded && ctx.input.x_axis != 0.0 {
            // Сошли с лестницы внизу
            Some(StateId::Move)
        } else {
            None
        }
    }

    fn physics_update(&mut self, ctx: &mut TickContext) {
        ctx.actor.set_velocity_zero();
    }
}

/// ClimbMove: движение вверх/вниз по лестнице с постоянной скоростью
pub struct ClimbMoveState {
    core: StateCore,
    checks: ClimbChecks,
    climb_velocity: Vec2,
}

impl Default for ClimbMoveState {
    fn default() -> Self {
        Self {
            core: StateCore::new(StateId::ClimbMove),
            checks: ClimbChecks::default(),
            climb_velocity: Vec2::ZERO,
        }
    }
}

impl LocomotionState for ClimbMoveState {
    fn core(&self) -> &StateCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut StateCore {
        &mut self.core
    }

    fn enter(&mut self, ctx: &mut TickContext) {
        self.core.enter(ctx);
        suspend_gravity(ctx);
    }

    fn exit(&mut self, ctx: &mut TickContext) {
        self.core.exit(ctx);
        restore_gravity(ctx);
        self.climb_velocity = Vec2::ZERO;
    }

    fn do_checks(&mut self, ctx: &TickContext) {
        self.checks.refresh(ctx);
    }

    fn logic_update(&mut self, ctx: &mut TickContext) -> Option<StateId> {
        self.climb_velocity = Vec2::new(0.0, ctx.input.climb_direction() * ctx.config.climb_speed);
        ctx.actor.set_velocity(self.climb_velocity);

        // Внизу лестницы с climb_down остаёмся в ClimbMove (пол держит), сход только через ClimbIdle → Move
        if !self.checks.ladder_contact {
            Some(StateId::Idle)
        } else if !ctx.input.climb_input() {
            Some(StateId::ClimbIdle)
        } else {
            None
        }
    }

    /// Physics шаг может успеть изменить скорость (коллизии): повторно фиксируем climb velocity
    fn physics_update(&mut self, ctx: &mut TickContext) {
        ctx.actor.set_velocity(self.climb_velocity);
    }
}
