//! StateRegistry: экземпляры состояний, созданные один раз при спавне актора
//!
//! Состояния переиспользуются между активациями (не пересоздаются на каждый переход).

use std::collections::HashMap;

use crate::fsm::machine::MachineError;
use crate::fsm::state::{LocomotionState, StateId};
use crate::fsm::states::*;

pub struct StateRegistry {
    states: HashMap<StateId, Box<dyn LocomotionState>>,
}

impl StateRegistry {
    /// Пустой реестр (для кастомных наборов поведений)
    pub fn empty() -> Self {
        Self {
            states: HashMap::new(),
        }
    }

    /// Полный набор из 10 состояний
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(IdleState::default()));
        registry.register(Box::new(MoveState::default()));
        registry.register(Box::new(JumpState::default()));
        registry.register(Box::new(InAirState::default()));
        registry.register(Box::new(LandState::default()));
        registry.register(Box::new(CrouchIdleState::default()));
        registry.register(Box::new(CrouchMoveState::default()));
        registry.register(Box::new(SprintState::default()));
        registry.register(Box::new(ClimbIdleState::default()));
        registry.register(Box::new(ClimbMoveState::default()));
        registry
    }

    /// Зарегистрировать state (заменяет прежний с тем же id, возвращает его)
    pub fn register(&mut self, state: Box<dyn LocomotionState>) -> Option<Box<dyn LocomotionState>> {
        self.states.insert(state.id(), state)
    }

    pub fn contains(&self, id: StateId) -> bool {
        self.states.contains_key(&id)
    }

    pub fn get(&self, id: StateId) -> Result<&dyn LocomotionState, MachineError> {
        self.states
            .get(&id)
            .map(|state| &**state)
            .ok_or(MachineError::InvalidState(id))
    }

    pub fn get_mut(&mut self, id: StateId) -> Result<&mut Box<dyn LocomotionState>, MachineError> {
        self.states.get_mut(&id).ok_or(MachineError::InvalidState(id))
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Зарегистрированные id в стабильном порядке
    pub fn ids(&self) -> Vec<StateId> {
        let mut ids: Vec<StateId> = self.states.keys().copied().collect();
        ids.sort();
        ids
    }
}

impl Default for StateRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
