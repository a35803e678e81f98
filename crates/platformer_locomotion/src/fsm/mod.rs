//! Locomotion FSM
//!
//! State Machine + иерархия состояний (trait + composition вместо наследования).
//!
//! Поток тика:
//! 1. `LocomotionMachine::logic_update` → `do_checks` → `logic_update` текущего state
//! 2. state применяет velocity/flip и, возможно, возвращает следующий StateId
//! 3. машина делает Exit → Enter
//! 4. позже `physics_update`: только применение скорости, без переходов

pub mod grounded;
pub mod machine;
pub mod registry;
pub mod state;
pub mod states;

// Tests (separate files with _tests suffix)
#[cfg(test)]
mod test_support;

// Re-export основных типов
pub use grounded::{GroundedBehavior, LadderGrab};
pub use machine::{LocomotionMachine, MachineError, Transition};
pub use registry::StateRegistry;
pub use state::{LocomotionState, StateCore, StateId, TickContext};
pub use states::LAND_VELOCITY_THRESHOLD;
