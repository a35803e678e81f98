//! Input snapshot: intent игрока на текущий тик
//!
//! Хост (raw input polling, AI бот, тестовый скрипт) перезаписывает компонент каждый frame.
//! Locomotion слой только читает его; ничего не хранится между тиками.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Входные данные для locomotion FSM
///
/// Для headless тестов, заполняется скриптом.
/// Для игры, заполняется из keyboard/gamepad input.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
pub struct InputSnapshot {
    /// Горизонтальная ось, normalized [-1, 1] (-1/0/1 для цифрового input)
    pub x_axis: f32,
    pub jump_pressed: bool,
    pub crouch_held: bool,
    pub sprint_held: bool,
    pub climb_up: bool,
    pub climb_down: bool,
}

impl InputSnapshot {
    /// Только горизонтальная ось (clamp в [-1, 1])
    pub fn horizontal(x_axis: f32) -> Self {
        Self {
            x_axis: x_axis.clamp(-1.0, 1.0),
            ..default()
        }
    }

    pub fn with_jump(mut self) -> Self {
        self.jump_pressed = true;
        self
    }

    pub fn with_crouch(mut self) -> Self {
        self.crouch_held = true;
        self
    }

    pub fn with_sprint(mut self) -> Self {
        self.sprint_held = true;
        self
    }

    pub fn with_climb_up(mut self) -> Self {
        self.climb_up = true;
        self
    }

    pub fn with_climb_down(mut self) -> Self {
        self.climb_down = true;
        self
    }

    /// Есть ли вертикальный climb intent (вверх или вниз)
    pub fn climb_input(&self) -> bool {
        self.climb_up || self.climb_down
    }

    /// Направление лазания: +1 вверх, -1 вниз, 0 если нет input (или оба сразу)
    pub fn climb_direction(&self) -> f32 {
        match (self.climb_up, self.climb_down) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        }
    }
}
