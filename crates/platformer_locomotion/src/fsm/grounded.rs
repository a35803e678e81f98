//! GroundedBehavior: общее поведение наземных состояний (composition, не наследование)
//!
//! Idle / Move / Sprint / CrouchIdle / CrouchMove / Land держат у себя GroundedBehavior и:
//! 1. `do_checks`: кэшируют probe'ы
//! 2. `read_input`: кэшируют input тика
//! 3. `shared_transition`: общие переходы ДО своих собственных
//!
//! Порядок общих переходов: ladder > jump > fall.
//! Idle цепляется за лестницу от одного контакта, движущиеся состояния только по climb_up.

use crate::fsm::state::{StateId, TickContext};
use crate::velocity::resolve_velocity_x;

/// Когда наземное состояние хватается за лестницу
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LadderGrab {
    /// Любой контакт (Idle)
    OnContact,
    /// Контакт + climb_up: на ходу мимо лестницы проходим насквозь
    OnClimbUp,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroundedBehavior {
    pub x_input: f32,
    pub crouch_input: bool,
    pub sprint_input: bool,
    pub jump_input: bool,
    pub climb_up_input: bool,
    pub is_grounded: bool,
    pub has_ceiling: bool,
    pub ladder_contact: bool,
}

impl GroundedBehavior {
    pub fn do_checks(&mut self, ctx: &TickContext) {
        self.is_grounded = ctx.probe.is_grounded();
        self.has_ceiling = ctx.probe.has_ceiling();
        self.ladder_contact = ctx.probe.ladder_contact();
    }

    pub fn read_input(&mut self, ctx: &TickContext) {
        self.x_input = ctx.input.x_axis;
        self.crouch_input = ctx.input.crouch_held;
        self.sprint_input = ctx.input.sprint_held;
        self.jump_input = ctx.input.jump_pressed;
        self.climb_up_input = ctx.input.climb_up;
    }

    /// Общие переходы (первое выполненное условие побеждает)
    ///
    /// Прыжок только с земли: в первый тик без земли (сошли с края) побеждает fall.
    pub fn shared_transition(&self, grab: LadderGrab) -> Option<StateId> {
        if self.wants_ladder(grab) {
            Some(StateId::ClimbIdle)
        } else if self.jump_input && self.is_grounded && !self.has_ceiling {
            Some(StateId::Jump)
        } else if !self.is_grounded {
            Some(StateId::InAir)
        } else {
            None
        }
    }

    fn wants_ladder(&self, grab: LadderGrab) -> bool {
        match grab {
            LadderGrab::OnContact => self.ladder_contact,
            LadderGrab::OnClimbUp => self.ladder_contact && self.climb_up_input,
        }
    }

    /// Можно ли выпрямиться из присяда (потолок не мешает)
    pub fn can_stand(&self) -> bool {
        !self.has_ceiling
    }

    pub fn has_horizontal_input(&self) -> bool {
        self.x_input != 0.0
    }

    /// Flip + сглаженная горизонтальная скорость к `x_input * max_speed`
    pub fn drive_horizontal(&self, ctx: &mut TickContext, max_speed: f32) {
        ctx.actor.request_flip(self.x_input);
        self.settle_horizontal(ctx, self.x_input, max_speed);
    }

    /// Сглаженная скорость к `x_input * max_speed` без разворота
    pub fn settle_horizontal(&self, ctx: &mut TickContext, x_input: f32, max_speed: f32) {
        let vx = resolve_velocity_x(
            x_input,
            ctx.actor.velocity().x,
            max_speed,
            ctx.config.move_max_acceleration,
            ctx.delta,
        );
        ctx.actor.set_velocity_x(vx);
    }
}
