//! State contract: StateId, общий bookkeeping (StateCore), TickContext, trait LocomotionState.

use bevy::prelude::*;

use crate::actor::Actor;
use crate::animation::AnimationSink;
use crate::config::MovementConfig;
use crate::input::InputSnapshot;
use crate::probe::PhysicsProbe;

/// Идентификатор поведения (ключ в StateRegistry)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect)]
pub enum StateId {
    Idle,
    Move,
    Jump,
    InAir,
    Land,
    CrouchIdle,
    CrouchMove,
    Sprint,
    ClimbIdle,
    ClimbMove,
}

impl StateId {
    pub const ALL: [StateId; 10] = [
        StateId::Idle,
        StateId::Move,
        StateId::Jump,
        StateId::InAir,
        StateId::Land,
        StateId::CrouchIdle,
        StateId::CrouchMove,
        StateId::Sprint,
        StateId::ClimbIdle,
        StateId::ClimbMove,
    ];

    /// Bool флаг аниматора, который держится true пока state активен
    ///
    /// Jump и InAir делят один флаг: отдельного клипа отрыва пока нет.
    pub fn animation_flag(self) -> &'static str {
        match self {
            StateId::Idle => "idle",
            StateId::Move => "move",
            StateId::Jump | StateId::InAir => "inAir",
            StateId::Land => "land",
            StateId::CrouchIdle => "crouchIdle",
            StateId::CrouchMove => "crouchMove",
            StateId::Sprint => "sprint",
            StateId::ClimbIdle => "climbIdle",
            StateId::ClimbMove => "climbMove",
        }
    }

    /// Наземное поведение (участвует в общих grounded переходах)
    pub fn is_grounded_state(self) -> bool {
        !matches!(self, StateId::Jump | StateId::InAir | StateId::ClimbIdle | StateId::ClimbMove)
    }
}

/// Всё, что state видит за один вызов (logic тик, physics шаг или animation callback)
pub struct TickContext<'a> {
    pub actor: &'a mut Actor,
    pub input: &'a InputSnapshot,
    pub probe: &'a dyn PhysicsProbe,
    pub animator: &'a mut dyn AnimationSink,
    pub config: &'a MovementConfig,
    /// Delta текущей фазы (variable для logic, fixed для physics)
    pub delta: f32,
    /// Время с начала симуляции (секунды)
    pub elapsed: f32,
}

/// Общий bookkeeping каждого state
///
/// Инвариант: enter_count == exit_count + (1 если state текущий, иначе 0).
#[derive(Debug, Clone, PartialEq)]
pub struct StateCore {
    id: StateId,
    /// true с момента Exit до следующего Enter
    is_exiting: bool,
    /// `elapsed` в момент последнего Enter
    start_time: f32,
    enter_count: u32,
    exit_count: u32,
}

impl StateCore {
    pub fn new(id: StateId) -> Self {
        Self {
            id,
            is_exiting: false,
            start_time: 0.0,
            enter_count: 0,
            exit_count: 0,
        }
    }

    pub fn id(&self) -> StateId {
        self.id
    }

    pub fn is_exiting(&self) -> bool {
        self.is_exiting
    }

    pub fn start_time(&self) -> f32 {
        self.start_time
    }

    pub fn enter_count(&self) -> u32 {
        self.enter_count
    }

    pub fn exit_count(&self) -> u32 {
        self.exit_count
    }

    /// Сколько секунд state активен (относительно `elapsed`)
    pub fn time_in_state(&self, elapsed: f32) -> f32 {
        (elapsed - self.start_time).max(0.0)
    }

    pub fn enter(&mut self, ctx: &mut TickContext) {
        self.is_exiting = false;
        self.start_time = ctx.elapsed;
        self.enter_count += 1;
        ctx.animator.set_bool(self.id.animation_flag(), true);
    }

    pub fn exit(&mut self, ctx: &mut TickContext) {
        self.is_exiting = true;
        self.exit_count += 1;
        ctx.animator.set_bool(self.id.animation_flag(), false);
    }
}

/// Capability set каждого locomotion поведения
///
/// Переход запрашивается ВОЗВРАТОМ `Some(StateId)`, state никогда не держит ссылку на машину.
/// `enter`/`exit` ничего не возвращают, поэтому переход изнутри Enter невыразим.
pub trait LocomotionState: Send + Sync + 'static {
    fn core(&self) -> &StateCore;
    fn core_mut(&mut self) -> &mut StateCore;

    fn id(&self) -> StateId {
        self.core().id()
    }

    fn enter(&mut self, ctx: &mut TickContext) {
        self.core_mut().enter(ctx);
    }

    fn exit(&mut self, ctx: &mut TickContext) {
        self.core_mut().exit(ctx);
    }

    /// Обновить кэш probe'ов. Вызывается машиной перед `logic_update`.
    fn do_checks(&mut self, _ctx: &TickContext) {}

    /// Решение на тик: velocity/flip + переход (первое выполненное условие)
    fn logic_update(&mut self, ctx: &mut TickContext) -> Option<StateId>;

    /// Применение уже принятого решения на physics шаге. Переходы здесь запрещены.
    fn physics_update(&mut self, _ctx: &mut TickContext) {}

    fn animation_trigger(&mut self, _ctx: &mut TickContext) -> Option<StateId> {
        None
    }

    fn animation_finish_trigger(&mut self, _ctx: &mut TickContext) -> Option<StateId> {
        None
    }
}
