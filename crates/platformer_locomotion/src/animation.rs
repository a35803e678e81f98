//! Animation collaborator: параметры аниматора и входящие animation events
//!
//! Locomotion слой НЕ выбирает клипы. Он только:
//! - выставляет bool флаги состояний ("idle", "move", "inAir", ...)
//! - выставляет float параметры ("xVelocity", "yVelocity")
//! - принимает `AnimationEvent` (trigger / finished) от animation playback

use bevy::prelude::*;
use std::collections::HashMap;

/// Float параметр: вертикальная скорость (blend jump/fall)
pub const PARAM_Y_VELOCITY: &str = "yVelocity";
/// Float параметр: модуль горизонтальной скорости
pub const PARAM_X_VELOCITY: &str = "xVelocity";

/// Sink для параметров аниматора
pub trait AnimationSink {
    fn set_bool(&mut self, name: &str, value: bool);
    fn set_float(&mut self, name: &str, value: f32);
}

/// Параметры аниматора актора
///
/// Хост (Godot AnimationTree, sprite animator) читает их после logic фазы.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct AnimatorParameters {
    bools: HashMap<String, bool>,
    floats: HashMap<String, f32>,
}

impl AnimatorParameters {
    pub fn get_bool(&self, name: &str) -> bool {
        self.bools.get(name).copied().unwrap_or(false)
    }

    pub fn get_float(&self, name: &str) -> f32 {
        self.floats.get(name).copied().unwrap_or(0.0)
    }

    /// Все флаги со значением true (отсортированы для стабильных логов/снапшотов)
    pub fn active_flags(&self) -> Vec<&str> {
        let mut flags: Vec<&str> = self
            .bools
            .iter()
            .filter(|(_, value)| **value)
            .map(|(name, _)| name.as_str())
            .collect();
        flags.sort_unstable();
        flags
    }
}

impl AnimationSink for AnimatorParameters {
    fn set_bool(&mut self, name: &str, value: bool) {
        self.bools.insert(name.to_owned(), value);
    }

    fn set_float(&mut self, name: &str, value: f32) {
        self.floats.insert(name.to_owned(), value);
    }
}

/// Тип animation event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationEventKind {
    /// Ключевой кадр внутри клипа (например, отрыв от земли)
    Trigger,
    /// Клип доигран до конца
    Finished,
}

/// Event: animation playback → текущий state актора
///
/// Обрабатывается `dispatch_animation_events` через LocomotionMachine (не broadcast).
#[derive(Event, Debug, Clone)]
pub struct AnimationEvent {
    pub entity: Entity,
    pub kind: AnimationEventKind,
}

impl AnimationEvent {
    pub fn trigger(entity: Entity) -> Self {
        Self {
            entity,
            kind: AnimationEventKind::Trigger,
        }
    }

    pub fn finished(entity: Entity) -> Self {
        Self {
            entity,
            kind: AnimationEventKind::Finished,
        }
    }
}
