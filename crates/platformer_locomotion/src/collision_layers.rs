//! Collision Layers: битовые маски для probe фильтров
//!
//! ## Архитектура:
//! - **Layer:** на каком слое находится collider (ground, ladder, ...)
//! - **Filter:** какие слои probe учитывает при overlap запросе
//!
//! ## Layers (1-32):
//! - Layer 1 (0b1 = 1): Reserved
//! - Layer 2 (0b10 = 2): Actors
//! - Layer 3 (0b100 = 4): Ground (платформы, пол)
//! - Layer 4 (0b1000 = 8): Ladders (trigger colliders лестниц)
//!
//! ## Использование:
//! ```rust
//! use platformer_locomotion::collision_layers::*;
//!
//! let filter = CollisionLayers::GROUND | CollisionLayers::LADDERS;
//! assert!(filter.intersects(CollisionLayers::LADDERS));
//! ```

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Битовая маска слоёв (layer или filter, зависит от контекста)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect, Serialize, Deserialize)]
pub struct CollisionLayers(pub u32);

impl CollisionLayers {
    pub const NONE: Self = Self(0);

    /// Layer 2: Actors (персонажи)
    pub const ACTORS: Self = Self(0b10);

    /// Layer 3: Ground (всё, на чём можно стоять)
    pub const GROUND: Self = Self(0b100);

    /// Layer 4: Ladders (лестницы, по которым можно лазить)
    pub const LADDERS: Self = Self(0b1000);

    pub const fn bits(self) -> u32 {
        self.0
    }

    /// true если хотя бы один слой общий
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for CollisionLayers {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Получить название слоя для debug логов
pub fn get_layer_name(layer: CollisionLayers) -> &'static str {
    match layer {
        CollisionLayers::ACTORS => "Actors",
        CollisionLayers::GROUND => "Ground",
        CollisionLayers::LADDERS => "Ladders",
        _ => "Unknown",
    }
}
