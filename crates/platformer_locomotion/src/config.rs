//! MovementConfig: параметры locomotion актора
//!
//! Создаётся один раз при спавне актора, после этого read-only.
//! Валидация происходит ДО первого тика (`spawn_locomotion_actor`), per-tick не перепроверяем.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::collision_layers::CollisionLayers;

/// Ошибка валидации конфига (некорректные данные из ассетов)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("config field `{field}` must be >= 0, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("config field `{field}` must be finite")]
    NotFinite { field: &'static str },
}

/// Параметры движения персонажа
///
/// Инвариант: все числовые поля конечны и ≥ 0.
#[derive(Component, Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct MovementConfig {
    /// Максимальная скорость ходьбы (units/sec)
    pub move_max_speed: f32,
    /// Ускорение по X (units/sec²); при остановке/развороте ×5
    pub move_max_acceleration: f32,
    /// Скорость в присяде
    pub crouch_max_speed: f32,
    /// Скорость спринта
    pub sprint_max_speed: f32,
    /// Начальная вертикальная скорость прыжка
    pub jump_velocity: f32,
    /// Скорость подъёма/спуска по лестнице
    pub climb_speed: f32,
    /// Радиус ground probe
    pub ground_check_radius: f32,
    /// Радиус ladder probe (обе точки: ground check и ceiling check)
    pub ladder_check_radius: f32,
    /// Множитель гравитации для физического тела
    pub gravity_scale: f32,
    /// Слои, которые считаются землёй
    pub ground_filter: CollisionLayers,
    /// Слои, которые считаются лестницами
    pub ladder_filter: CollisionLayers,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            move_max_speed: 5.0,
            move_max_acceleration: 40.0,
            crouch_max_speed: 2.0,
            sprint_max_speed: 8.0,
            jump_velocity: 12.0,
            climb_speed: 3.0,
            ground_check_radius: 0.2,
            ladder_check_radius: 0.3,
            gravity_scale: 3.0,
            ground_filter: CollisionLayers::GROUND,
            ladder_filter: CollisionLayers::LADDERS,
        }
    }
}

impl MovementConfig {
    /// Проверка инвариантов (вызывается один раз при конструировании актора)
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("move_max_speed", self.move_max_speed),
            ("move_max_acceleration", self.move_max_acceleration),
            ("crouch_max_speed", self.crouch_max_speed),
            ("sprint_max_speed", self.sprint_max_speed),
            ("jump_velocity", self.jump_velocity),
            ("climb_speed", self.climb_speed),
            ("ground_check_radius", self.ground_check_radius),
            ("ladder_check_radius", self.ladder_check_radius),
            ("gravity_scale", self.gravity_scale),
        ];

        for (field, value) in fields {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field });
            }
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        Ok(())
    }

    /// Builder-style validation: возвращает self если конфиг корректен
    pub fn validated(self) -> Result<Self, ConfigError> {
        self.validate()?;
        Ok(self)
    }
}
