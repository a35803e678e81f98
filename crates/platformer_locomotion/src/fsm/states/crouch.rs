//! Присяд: CrouchIdle, CrouchMove
//!
//! Выпрямиться нельзя пока над головой потолок (`GroundedBehavior::can_stand`).

use crate::fsm::grounded::{GroundedBehavior, LadderGrab};
use crate::fsm::state::{LocomotionState, StateCore, StateId, TickContext};

pub struct CrouchIdleState {
    core: StateCore,
    grounded: GroundedBehavior,
}

impl Default for CrouchIdleState {
    fn default() -> Self {
        Self {
            core: StateCore::new(StateId::CrouchIdle),
            grounded: GroundedBehavior::default(),
        }
    }
}

impl LocomotionState for CrouchIdleState {
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
        let max_speed = ctx.config.crouch_max_speed;
        self.grounded.settle_horizontal(ctx, 0.0, max_speed);

        if let Some(next) = self.grounded.shared_transition(LadderGrab::OnClimbUp) {
            return Some(next);
        }

        if !self.grounded.crouch_input && self.grounded.can_stand() {
            Some(StateId::Idle)
        } else if self.grounded.has_horizontal_input() {
            Some(StateId::CrouchMove)
        } else {
            None
        }
    }
}

pub struct CrouchMoveState {
    core: StateCore,
    grounded: GroundedBehavior,
}

impl Default for CrouchMoveState {
    fn default() -> Self {
        Self {
            core: StateCore::new(StateId::CrouchMove),
            grounded: GroundedBehavior::default(),
        }
    }
}

impl LocomotionState for CrouchMoveState {
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
        let max_speed = ctx.config.crouch_max_speed;
        self.grounded.drive_horizontal(ctx, max_speed);

        if let Some(next) = self.grounded.shared_transition(LadderGrab::OnClimbUp) {
            return Some(next);
        }

        if !self.grounded.has_horizontal_input() {
            Some(StateId::CrouchIdle)
        } else if !self.grounded.crouch_input && self.grounded.can_stand() {
            Some(StateId::Idle)
        } else {
            None
        }
    }
}
