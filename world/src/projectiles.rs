//! Homing projectiles launched by towers.

use std::time::Duration;

use glam::Vec2;
use simple_arcade_core::{Damage, EnemyId, ProjectileId, ProjectileRules, ProjectileSnapshot};

/// Outcome of advancing a projectile by one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Flight {
    /// Still travelling toward its target.
    InFlight,
    /// Reached its target and should apply damage.
    Hit,
    /// Vanished without hitting: target gone or lifetime exhausted.
    Expired,
}

/// Projectile chasing a single enemy.
///
/// The target is held by identifier and resolved every tick, so a projectile
/// never keeps a dead enemy alive.
#[derive(Clone, Debug)]
pub(crate) struct Projectile {
    pub(crate) id: ProjectileId,
    pub(crate) target: EnemyId,
    pub(crate) damage: Damage,
    position: Vec2,
    remaining: Duration,
}

impl Projectile {
    pub(crate) fn new(
        id: ProjectileId,
        target: EnemyId,
        damage: Damage,
        position: Vec2,
        rules: &ProjectileRules,
    ) -> Self {
        Self {
            id,
            target,
            damage,
            position,
            remaining: Duration::try_from_secs_f32(rules.lifetime_secs.max(0.0))
                .unwrap_or(Duration::ZERO),
        }
    }

    /// Moves toward `target_position`, which is `None` once the target left
    /// play. Speeds and radii are given in world units.
    pub(crate) fn advance(
        &mut self,
        dt: Duration,
        target_position: Option<Vec2>,
        speed: f32,
        hit_radius: f32,
    ) -> Flight {
        let Some(destination) = target_position else {
            return Flight::Expired;
        };

        let offset = destination - self.position;
        if offset.length() <= hit_radius {
            return Flight::Hit;
        }

        let step = speed.max(0.0) * dt.as_secs_f32();
        if step >= offset.length() {
            self.position = destination;
        } else {
            self.position += offset.normalize_or_zero() * step;
        }

        self.remaining = self.remaining.saturating_sub(dt);
        if self.remaining.is_zero() {
            Flight::Expired
        } else {
            Flight::InFlight
        }
    }

    pub(crate) fn snapshot(&self) -> ProjectileSnapshot {
        ProjectileSnapshot {
            id: self.id,
            target: self.target,
            position: self.position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projectile(lifetime_secs: f32) -> Projectile {
        let rules = ProjectileRules {
            lifetime_secs,
            ..ProjectileRules::default()
        };
        Projectile::new(
            ProjectileId::new(0),
            EnemyId::new(3),
            Damage::new(2),
            Vec2::ZERO,
            &rules,
        )
    }

    #[test]
    fn moves_toward_target_without_overshooting() {
        let mut shot = projectile(100.0);
        let target = Vec2::new(3.0, 4.0);

        let flight = shot.advance(Duration::from_millis(500), Some(target), 2.0, 0.1);
        assert_eq!(flight, Flight::InFlight);
        assert!((shot.snapshot().position - Vec2::new(0.6, 0.8)).length() < 1e-5);

        let flight = shot.advance(Duration::from_secs(10), Some(target), 2.0, 0.1);
        assert_eq!(flight, Flight::InFlight);
        assert_eq!(shot.snapshot().position, target);

        assert_eq!(
            shot.advance(Duration::from_millis(100), Some(target), 2.0, 0.1),
            Flight::Hit
        );
    }

    #[test]
    fn hits_when_already_within_radius() {
        let mut shot = projectile(10.0);
        let flight = shot.advance(Duration::ZERO, Some(Vec2::new(0.05, 0.0)), 1.0, 0.15);
        assert_eq!(flight, Flight::Hit);
    }

    #[test]
    fn expires_when_target_is_gone() {
        let mut shot = projectile(10.0);
        assert_eq!(
            shot.advance(Duration::from_millis(16), None, 1.0, 0.1),
            Flight::Expired
        );
    }

    #[test]
    fn expires_after_lifetime() {
        let mut shot = projectile(1.0);
        let far = Some(Vec2::new(100.0, 0.0));
        assert_eq!(
            shot.advance(Duration::from_millis(600), far, 1.0, 0.1),
            Flight::InFlight
        );
        assert_eq!(
            shot.advance(Duration::from_millis(600), far, 1.0, 0.1),
            Flight::Expired
        );
    }
}
