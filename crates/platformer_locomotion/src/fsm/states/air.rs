//! Воздушные состояния: Jump (отрыв), InAir (полёт/падение), Land (приземление)

use crate::animation::{PARAM_X_VELOCITY, PARAM_Y_VELOCITY};
use crate::fsm::grounded::{GroundedBehavior, LadderGrab};
use crate::fsm::state::{LocomotionState, StateCore, StateId, TickContext};

/// Порог вертикальной скорости для приземления
///
/// На кадре отрыва probe ещё видит землю, а vy уже положительная → Land не срабатывает.
pub const LAND_VELOCITY_THRESHOLD: f32 = 0.01;

/// Jump: single-shot: импульс на Enter, через тик (или по animation trigger) → InAir
pub struct JumpState {
    core: StateCore,
}

impl Default for JumpState {
    fn default() -> Self {
        Self {
            core: StateCore::new(StateId::Jump),
        }
    }
}

impl LocomotionState for JumpState {
    fn core(&self) -> &StateCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut StateCore {
        &mut self.core
    }

    fn enter(&mut self, ctx: &mut TickContext) {
        self.core.enter(ctx);
        ctx.actor.set_velocity_y(ctx.config.jump_velocity);
    }

    fn logic_update(&mut self, ctx: &mut TickContext) -> Option<StateId> {
        ctx.actor.request_flip(ctx.input.x_axis);
        Some(StateId::InAir)
    }

    fn animation_trigger(&mut self, _ctx: &mut TickContext) -> Option<StateId> {
        Some(StateId::InAir)
    }
}

/// InAir: полёт после прыжка или падение с края
pub struct InAirState {
    core: StateCore,
    x_input: f32,
    is_grounded: bool,
}

impl Default for InAirState {
    fn default() -> Self {
        Self {
            core: StateCore::new(StateId::InAir),
            x_input: 0.0,
            is_grounded: false,
        }
    }
}

impl LocomotionState for InAirState {
    fn core(&self) -> &StateCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut StateCore {
        &mut self.core
    }

    fn do_checks(&mut self, ctx: &TickContext) {
        self.is_grounded = ctx.probe.is_grounded();
    }

    fn logic_update(&mut self, ctx: &mut TickContext) -> Option<StateId> {
        self.x_input = ctx.input.x_axis;

        if self.is_grounded && ctx.actor.velocity().y < LAND_VELOCITY_THRESHOLD {
            return Some(StateId::Land);
        }

        // Air control: модуль скорости сохраняется, направление, по input (без сглаживания)
        ctx.actor.request_flip(self.x_input);
        let vx = ctx.actor.velocity().x.abs() * self.x_input;
        ctx.actor.set_velocity_x(vx);

        let velocity = ctx.actor.velocity();
        ctx.animator.set_float(PARAM_Y_VELOCITY, velocity.y);
        ctx.animator.set_float(PARAM_X_VELOCITY, velocity.x.abs());

        None
    }
}

/// Land: приземление, держимся до конца клипа приземления
pub struct LandState {
    core: StateCore,
    grounded: GroundedBehavior,
}

impl Default for LandState {
    fn default() -> Self {
        Self {
            core: StateCore::new(StateId::Land),
            grounded: GroundedBehavior::default(),
        }
    }
}

impl LocomotionState for LandState {
    fn core(&self) -> &StateCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut StateCore {
        &mut self.core
    }

    fn do_checks(&mut self, ctx: &TickContext) {
        self.grounded.do_checks(ctx);
    }

    fn logic_update(&mut self, ctx: &mut TickContext) -> Option<StateId> {
        self.grounded.read_input(ctx);
        let max_speed = ctx.config.move_max_speed;
        self.grounded.drive_horizontal(ctx, max_speed);

        self.grounded.shared_transition(LadderGrab::OnClimbUp)
    }

    fn animation_finish_trigger(&mut self, ctx: &mut TickContext) -> Option<StateId> {
        // Input берём из контекста: finish может прийти раньше первого logic тика в Land
        if ctx.input.x_axis != 0.0 {
            Some(StateId::Move)
        } else {
            Some(StateId::Idle)
        }
    }
}
