//! Наземные состояния: Idle, Move, Sprint

use crate::fsm::grounded::{GroundedBehavior, LadderGrab};
use crate::fsm::state::{LocomotionState, StateCore, StateId, TickContext};

/// Idle: начальное состояние, стоим на месте (тормозим до нуля)
pub struct IdleState {
    core: StateCore,
    grounded: GroundedBehavior,
}

impl Default for IdleState {
    fn default() -> Self {
        Self {
            core: StateCore::new(StateId::Idle),
            grounded: GroundedBehavior::default(),
        }
    }
}

impl LocomotionState for IdleState {
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
        self.grounded.settle_horizontal(ctx, 0.0, max_speed);

        if let Some(next) = self.grounded.shared_transition(LadderGrab::OnContact) {
            return Some(next);
        }

        if self.grounded.crouch_input {
            Some(StateId::CrouchIdle)
        } else if self.grounded.has_horizontal_input() {
            Some(StateId::Move)
        } else {
            None
        }
    }
}

/// Move: ходьба с разгоном до move_max_speed
pub struct MoveState {
    core: StateCore,
    grounded: GroundedBehavior,
}

impl Default for MoveState {
    fn default() -> Self {
        Self {
            core: StateCore::new(StateId::Move),
            grounded: GroundedBehavior::default(),
        }
    }
}

impl LocomotionState for MoveState {
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

        if let Some(next) = self.grounded.shared_transition(LadderGrab::OnClimbUp) {
            return Some(next);
        }

        if !self.grounded.has_horizontal_input() {
            Some(StateId::Idle)
        } else if self.grounded.crouch_input {
            Some(StateId::CrouchMove)
        } else if self.grounded.sprint_input {
            Some(StateId::Sprint)
        } else {
            None
        }
    }
}

/// Sprint: бег, пока держим sprint и есть горизонтальный input
pub struct SprintState {
    core: StateCore,
    grounded: GroundedBehavior,
}

impl Default for SprintState {
    fn default() -> Self {
        Self {
            core: StateCore::new(StateId::Sprint),
            grounded: GroundedBehavior::default(),
        }
    }
}

impl LocomotionState for SprintState {
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
        let max_speed = ctx.config.sprint_max_speed;
        self.grounded.drive_horizontal(ctx, max_speed);

        if let Some(next) = self.grounded.shared_transition(LadderGrab::OnClimbUp) {
            return Some(next);
        }

        if !self.grounded.sprint_input || !self.grounded.has_horizontal_input() {
            Some(StateId::Move)
        } else {
            None
        }
    }
}
