//! Physics probe facade: boolean/identity запросы к физическому миру
//!
//! Locomotion FSM не знает как физика находит контакты. Она видит только:
//! - `is_grounded`: ground probe пересекается с ground-слоем
//! - `has_ceiling`: потолок над головой (pluggable, по умолчанию всегда false)
//! - `ladder_contact` / `ladder_object`: контакт с лестницей и какая именно
//!
//! Два способа подключить физику:
//! 1. Хост сам пишет `ProbeReadings` каждый frame (в `LocomotionSet::SampleProbes`)
//! 2. Хост реализует `OverlapQuery` (overlap circle), а `OverlapProbe` делает остальное

use bevy::prelude::*;

use crate::collision_layers::CollisionLayers;
use crate::config::MovementConfig;

/// Лестница, с которой контактирует актор
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct LadderContact {
    pub entity: Entity,
    /// World позиция лестницы (для snap по X при захвате)
    pub position: Vec2,
}

/// Capability interface физических probe'ов
pub trait PhysicsProbe {
    fn is_grounded(&self) -> bool;
    fn has_ceiling(&self) -> bool;
    fn ladder_contact(&self) -> bool;
    fn ladder_object(&self) -> Option<LadderContact>;
}

/// Результаты probe'ов на текущий тик (plain data)
///
/// grounded + ladder одновременно, НЕ ошибка, FSM разрешает через приоритеты переходов.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct ProbeReadings {
    pub grounded: bool,
    pub ceiling: bool,
    pub ladder_contact: bool,
    pub ladder: Option<LadderContact>,
}

impl ProbeReadings {
    /// Снять snapshot со всех probe'ов сразу
    pub fn sample(probe: &dyn PhysicsProbe) -> Self {
        Self {
            grounded: probe.is_grounded(),
            ceiling: probe.has_ceiling(),
            ladder_contact: probe.ladder_contact(),
            ladder: probe.ladder_object(),
        }
    }

    pub fn grounded() -> Self {
        Self {
            grounded: true,
            ..default()
        }
    }

    pub fn airborne() -> Self {
        Self::default()
    }

    pub fn with_ladder(mut self, ladder: LadderContact) -> Self {
        self.ladder_contact = true;
        self.ladder = Some(ladder);
        self
    }
}

impl PhysicsProbe for ProbeReadings {
    fn is_grounded(&self) -> bool {
        self.grounded
    }

    fn has_ceiling(&self) -> bool {
        self.ceiling
    }

    fn ladder_contact(&self) -> bool {
        self.ladder_contact
    }

    fn ladder_object(&self) -> Option<LadderContact> {
        self.ladder
    }
}

/// Точки probe'ов относительно позиции актора
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct ProbeLayout {
    /// Ground check (у ног)
    pub ground_check: Vec2,
    /// Ceiling check (над головой)
    pub ceiling_check: Vec2,
    /// Фильтр потолка. None → `has_ceiling` всегда false (probe не подключен)
    pub ceiling_filter: Option<CollisionLayers>,
}

impl Default for ProbeLayout {
    fn default() -> Self {
        Self {
            ground_check: Vec2::ZERO,
            ceiling_check: Vec2::new(0.0, 1.8), // Персонаж высотой ~1.8
            ceiling_filter: None,
        }
    }
}

/// Результат overlap запроса
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlapHit {
    pub entity: Entity,
    pub position: Vec2,
    /// Collider помечен тегом "ladder" (фильтр слоя сам по себе не гарантирует тег)
    pub is_ladder: bool,
}

/// Overlap circle запрос к физическому миру (реализует хост)
pub trait OverlapQuery {
    /// Первый collider из `filter`, пересекающий круг, или None
    fn overlap_circle(&self, center: Vec2, radius: f32, filter: CollisionLayers) -> Option<OverlapHit>;
}

/// PhysicsProbe поверх overlap запросов хоста
pub struct OverlapProbe<'a, Q: OverlapQuery + ?Sized> {
    query: &'a Q,
    origin: Vec2,
    layout: &'a ProbeLayout,
    config: &'a MovementConfig,
}

impl<'a, Q: OverlapQuery + ?Sized> OverlapProbe<'a, Q> {
    pub fn new(query: &'a Q, origin: Vec2, layout: &'a ProbeLayout, config: &'a MovementConfig) -> Self {
        Self {
            query,
            origin,
            layout,
            config,
        }
    }

    fn ground_point(&self) -> Vec2 {
        self.origin + self.layout.ground_check
    }

    fn ceiling_point(&self) -> Vec2 {
        self.origin + self.layout.ceiling_check
    }

    fn ladder_at(&self, point: Vec2) -> Option<OverlapHit> {
        self.query
            .overlap_circle(point, self.config.ladder_check_radius, self.config.ladder_filter)
    }
}

impl<Q: OverlapQuery + ?Sized> PhysicsProbe for OverlapProbe<'_, Q> {
    fn is_grounded(&self) -> bool {
        self.query
            .overlap_circle(self.ground_point(), self.config.ground_check_radius, self.config.ground_filter)
            .is_some()
    }

    fn has_ceiling(&self) -> bool {
        let Some(filter) = self.layout.ceiling_filter else {
            return false;
        };
        self.query
            .overlap_circle(self.ceiling_point(), self.config.ground_check_radius, filter)
            .is_some()
    }

    fn ladder_contact(&self) -> bool {
        self.ladder_at(self.ground_point()).is_some() || self.ladder_at(self.ceiling_point()).is_some()
    }

    fn ladder_object(&self) -> Option<LadderContact> {
        // Нижний probe приоритетнее верхнего (оба пересекают лестницу → побеждает нижний)
        [self.ground_point(), self.ceiling_point()]
            .into_iter()
            .filter_map(|point| self.ladder_at(point))
            .find(|hit| hit.is_ladder)
            .map(|hit| LadderContact {
                entity: hit.entity,
                position: hit.position,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Мир из кругов-collider'ов (достаточно для проверки логики probe'ов)
    struct CircleWorld {
        colliders: Vec<(OverlapHit, f32, CollisionLayers)>,
    }

    impl OverlapQuery for CircleWorld {
        fn overlap_circle(&self, center: Vec2, radius: f32, filter: CollisionLayers) -> Option<OverlapHit> {
            self.colliders
                .iter()
                .find(|(hit, r, layers)| layers.intersects(filter) && hit.position.distance(center) <= radius + r)
                .map(|(hit, _, _)| *hit)
        }
    }

    fn ladder(index: u32, position: Vec2, is_ladder: bool) -> (OverlapHit, f32, CollisionLayers) {
        (
            OverlapHit {
                entity: Entity::from_raw(index),
                position,
                is_ladder,
            },
            0.5,
            CollisionLayers::LADDERS,
        )
    }

    #[test]
    fn test_grounded_uses_ground_filter() {
        let world = CircleWorld {
            colliders: vec![(
                OverlapHit {
                    entity: Entity::from_raw(1),
                    position: Vec2::new(0.0, -0.5),
                    is_ladder: false,
                },
                0.4,
                CollisionLayers::GROUND,
            )],
        };
        let layout = ProbeLayout::default();
        let config = MovementConfig::default();

        let probe = OverlapProbe::new(&world, Vec2::ZERO, &layout, &config);
        assert!(probe.is_grounded());
        assert!(!probe.ladder_contact());

        // Высоко в воздухе, земли нет
        let probe = OverlapProbe::new(&world, Vec2::new(0.0, 5.0), &layout, &config);
        assert!(!probe.is_grounded());
    }

    #[test]
    fn test_ceiling_disabled_without_filter() {
        // Потолок физически есть, но ceiling probe не подключен
        let world = CircleWorld {
            colliders: vec![(
                OverlapHit {
                    entity: Entity::from_raw(2),
                    position: Vec2::new(0.0, 1.9),
                    is_ladder: false,
                },
                0.3,
                CollisionLayers::GROUND,
            )],
        };
        let config = MovementConfig::default();

        let layout = ProbeLayout::default();
        assert!(!OverlapProbe::new(&world, Vec2::ZERO, &layout, &config).has_ceiling());

        let wired = ProbeLayout {
            ceiling_filter: Some(CollisionLayers::GROUND),
            ..default()
        };
        assert!(OverlapProbe::new(&world, Vec2::ZERO, &wired, &config).has_ceiling());
    }

    #[test]
    fn test_ladder_contact_from_either_probe() {
        let layout = ProbeLayout::default();
        let config = MovementConfig::default();

        // Лестница только у головы
        let world = CircleWorld {
            colliders: vec![ladder(3, Vec2::new(0.0, 1.8), true)],
        };
        let probe = OverlapProbe::new(&world, Vec2::ZERO, &layout, &config);
        assert!(probe.ladder_contact());
        assert_eq!(probe.ladder_object().map(|l| l.entity), Some(Entity::from_raw(3)));
    }

    #[test]
    fn test_ladder_object_bottom_wins() {
        let layout = ProbeLayout::default();
        let config = MovementConfig::default();

        let world = CircleWorld {
            colliders: vec![
                ladder(10, Vec2::new(0.0, 1.8), true),
                ladder(11, Vec2::new(0.0, 0.0), true),
            ],
        };
        let probe = OverlapProbe::new(&world, Vec2::ZERO, &layout, &config);
        assert_eq!(probe.ladder_object().map(|l| l.entity), Some(Entity::from_raw(11)));
    }

    #[test]
    fn test_ladder_object_skips_untagged_bottom() {
        let layout = ProbeLayout::default();
        let config = MovementConfig::default();

        // Внизу collider на ladder-слое, но без тега → берём верхний
        let world = CircleWorld {
            colliders: vec![
                ladder(20, Vec2::new(0.0, 0.0), false),
                ladder(21, Vec2::new(0.0, 1.8), true),
            ],
        };
        let probe = OverlapProbe::new(&world, Vec2::ZERO, &layout, &config);
        assert!(probe.ladder_contact());
        assert_eq!(probe.ladder_object().map(|l| l.entity), Some(Entity::from_raw(21)));

        // Ни одного тега, контакт есть, объекта нет
        let world = CircleWorld {
            colliders: vec![ladder(22, Vec2::new(0.0, 0.0), false)],
        };
        let probe = OverlapProbe::new(&world, Vec2::ZERO, &layout, &config);
        assert!(probe.ladder_contact());
        assert_eq!(probe.ladder_object(), None);
    }

    #[test]
    fn test_readings_sample() {
        let readings = ProbeReadings::grounded().with_ladder(LadderContact {
            entity: Entity::from_raw(5),
            position: Vec2::new(2.0, 0.0),
        });
        let copy = ProbeReadings::sample(&readings);
        assert_eq!(copy, readings);
        assert!(copy.is_grounded() && copy.ladder_contact());
    }
}
