//! Конкретные locomotion состояния
//!
//! - ground: Idle, Move, Sprint
//! - crouch: CrouchIdle, CrouchMove
//! - air: Jump, InAir, Land
//! - climb: ClimbIdle, ClimbMove

pub mod air;
pub mod climb;
pub mod crouch;
pub mod ground;

pub use air::{InAirState, JumpState, LandState, LAND_VELOCITY_THRESHOLD};
pub use climb::{ClimbIdleState, ClimbMoveState};
pub use crouch::{CrouchIdleState, CrouchMoveState};
pub use ground::{IdleState, MoveState, SprintState};
