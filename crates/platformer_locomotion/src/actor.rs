//! Actor: физическое состояние персонажа (позиция, скорость, направление взгляда)
//!
//! States НЕ пишут поля напрямую: только через setters.
//! Физическая фаза (хост или `HeadlessBodyPlugin`) читает velocity и двигает тело.

use bevy::prelude::*;

use crate::animation::AnimatorParameters;
use crate::config::MovementConfig;
use crate::input::InputSnapshot;
use crate::probe::{ProbeLayout, ProbeReadings};

/// Направление взгляда персонажа (2D: только влево/вправо)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum FacingDirection {
    Left,
    #[default]
    Right,
}

impl FacingDirection {
    /// -1.0 для Left, +1.0 для Right
    pub fn sign(self) -> f32 {
        match self {
            FacingDirection::Left => -1.0,
            FacingDirection::Right => 1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            FacingDirection::Left => FacingDirection::Right,
            FacingDirection::Right => FacingDirection::Left,
        }
    }
}

/// Актор с locomotion FSM
///
/// Автоматически добавляет input/probe/animator компоненты через Required Components.
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
#[require(Transform, InputSnapshot, ProbeReadings, ProbeLayout, AnimatorParameters)]
pub struct Actor {
    position: Vec2,
    velocity: Vec2,
    facing: FacingDirection,
    can_flip: bool,
    /// Текущий множитель гравитации (лестница временно обнуляет)
    gravity_scale: f32,
}

impl Default for Actor {
    fn default() -> Self {
        Self::new(Vec2::ZERO, &MovementConfig::default())
    }
}

impl Actor {
    /// Новый актор смотрит вправо и может разворачиваться
    pub fn new(position: Vec2, config: &MovementConfig) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            facing: FacingDirection::Right,
            can_flip: true,
            gravity_scale: config.gravity_scale,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    pub fn set_velocity_x(&mut self, x: f32) {
        self.velocity.x = x;
    }

    pub fn set_velocity_y(&mut self, y: f32) {
        self.velocity.y = y;
    }

    pub fn set_velocity_zero(&mut self) {
        self.velocity = Vec2::ZERO;
    }

    pub fn facing(&self) -> FacingDirection {
        self.facing
    }

    pub fn can_flip(&self) -> bool {
        self.can_flip
    }

    pub fn set_can_flip(&mut self, can_flip: bool) {
        self.can_flip = can_flip;
    }

    pub fn gravity_scale(&self) -> f32 {
        self.gravity_scale
    }

    pub fn set_gravity_scale(&mut self, gravity_scale: f32) {
        self.gravity_scale = gravity_scale;
    }

    /// Разворот если input смотрит в другую сторону
    ///
    /// Возвращает true если разворот произошёл (рендер должен отзеркалить спрайт).
    pub fn request_flip(&mut self, x_input: f32) -> bool {
        if x_input == 0.0 || !self.can_flip {
            return false;
        }
        if x_input.signum() == self.facing.sign() {
            return false;
        }

        self.facing = self.facing.flipped();
        true
    }
}
