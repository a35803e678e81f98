//! LocomotionMachine: владеет текущим state, делает Exit/Enter при переходах
//!
//! Единственная точка dispatch: logic тик, physics шаг, animation callbacks.
//! Очереди переходов нет, за один вызов максимум один переход.

use bevy::prelude::*;
use thiserror::Error;

use crate::fsm::registry::StateRegistry;
use crate::fsm::state::{LocomotionState, StateId, TickContext};

/// Ошибки машины, всегда ошибки программиста (fail fast в ECS системах)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MachineError {
    /// Переход в state, которого нет в реестре
    #[error("state {0:?} is not registered in the locomotion machine")]
    InvalidState(StateId),

    #[error("locomotion machine used before initialize()")]
    NotInitialized,

    #[error("locomotion machine is already initialized")]
    AlreadyInitialized,
}

/// Зафиксированный переход
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: StateId,
    pub to: StateId,
}

/// Hierarchical locomotion FSM актора
///
/// Инвариант: после `initialize` ровно один state текущий; Enter/Exit всегда парные.
#[derive(Component)]
pub struct LocomotionMachine {
    registry: StateRegistry,
    current: Option<StateId>,
    previous: Option<StateId>,
}

impl Default for LocomotionMachine {
    fn default() -> Self {
        Self::new(StateRegistry::standard())
    }
}

impl LocomotionMachine {
    pub fn new(registry: StateRegistry) -> Self {
        Self {
            registry,
            current: None,
            previous: None,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Option<StateId> {
        self.current
    }

    /// Предыдущий state (только для диагностики)
    pub fn previous(&self) -> Option<StateId> {
        self.previous
    }

    pub fn state(&self, id: StateId) -> Result<&dyn LocomotionState, MachineError> {
        self.registry.get(id)
    }

    pub fn registry(&self) -> &StateRegistry {
        &self.registry
    }

    /// Стартовый state. Вызывается ровно один раз до первого тика.
    pub fn initialize(&mut self, initial: StateId, ctx: &mut TickContext) -> Result<(), MachineError> {
        if self.current.is_some() {
            return Err(MachineError::AlreadyInitialized);
        }

        self.registry.get_mut(initial)?.enter(ctx);
        self.current = Some(initial);

        crate::log(&format!("Locomotion: initialized in {:?}", initial));
        Ok(())
    }

    /// Exit текущего → Enter следующего
    ///
    /// Наличие `next` проверяется ДО Exit: машина никогда не остаётся без текущего state.
    pub fn change_state(&mut self, next: StateId, ctx: &mut TickContext) -> Result<Transition, MachineError> {
        let from = self.current.ok_or(MachineError::NotInitialized)?;
        if !self.registry.contains(next) {
            return Err(MachineError::InvalidState(next));
        }

        self.registry.get_mut(from)?.exit(ctx);
        self.previous = Some(from);
        self.current = Some(next);
        self.registry.get_mut(next)?.enter(ctx);

        crate::log(&format!("Locomotion: {:?} → {:?}", from, next));
        Ok(Transition { from, to: next })
    }

    /// Logic тик: do_checks → logic_update → (опционально) переход
    pub fn logic_update(&mut self, ctx: &mut TickContext) -> Result<Option<Transition>, MachineError> {
        let current = self.current.ok_or(MachineError::NotInitialized)?;

        let state = self.registry.get_mut(current)?;
        state.do_checks(ctx);
        let requested = state.logic_update(ctx);

        self.commit(requested, ctx)
    }

    /// Physics шаг: только применение уже принятых решений
    pub fn physics_update(&mut self, ctx: &mut TickContext) -> Result<(), MachineError> {
        let current = self.current.ok_or(MachineError::NotInitialized)?;
        self.registry.get_mut(current)?.physics_update(ctx);
        Ok(())
    }

    /// Inbound callback: ключевой кадр анимации
    pub fn animation_trigger(&mut self, ctx: &mut TickContext) -> Result<Option<Transition>, MachineError> {
        let current = self.current.ok_or(MachineError::NotInitialized)?;
        let requested = self.registry.get_mut(current)?.animation_trigger(ctx);
        self.commit(requested, ctx)
    }

    /// Inbound callback: клип доигран
    pub fn animation_finished(&mut self, ctx: &mut TickContext) -> Result<Option<Transition>, MachineError> {
        let current = self.current.ok_or(MachineError::NotInitialized)?;
        let requested = self.registry.get_mut(current)?.animation_finish_trigger(ctx);
        self.commit(requested, ctx)
    }

    fn commit(&mut self, requested: Option<StateId>, ctx: &mut TickContext) -> Result<Option<Transition>, MachineError> {
        match requested {
            Some(next) => self.change_state(next, ctx).map(Some),
            None => Ok(None),
        }
    }
}
