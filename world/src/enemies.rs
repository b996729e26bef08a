//! Enemy state and the waypoint follower that moves it.

use std::sync::Arc;

use glam::Vec2;
use simple_arcade_core::{Damage, EnemyId, EnemySnapshot, Gold, Health};

/// Progress of a follower along its waypoints.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum FollowState {
    /// No path assigned; the follower never moves.
    Idle,
    /// Moving from `waypoints[segment]` toward `waypoints[segment + 1]`.
    Traveling {
        /// Index of the waypoint most recently departed.
        segment: usize,
        /// Interpolation fraction in `[0, 1]`.
        t: f32,
    },
    /// The final waypoint was reached.
    ReachedGoal,
}

/// Outcome of advancing a follower by one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum FollowStep {
    /// No movement happened.
    Inert,
    /// The follower moved along its path.
    Moved,
    /// The follower arrived at the final waypoint during this tick.
    ReachedGoal,
}

/// Interpolates a position along a shared waypoint sequence.
#[derive(Clone, Debug)]
pub(crate) struct PathFollower {
    waypoints: Option<Arc<[Vec2]>>,
    state: FollowState,
    position: Vec2,
}

impl PathFollower {
    /// Creates a follower placed at the first waypoint, or an idle follower
    /// parked at `fallback` when no usable path exists.
    pub(crate) fn new(waypoints: Option<Arc<[Vec2]>>, fallback: Vec2) -> Self {
        match waypoints.filter(|waypoints| !waypoints.is_empty()) {
            Some(waypoints) => Self {
                position: waypoints[0],
                waypoints: Some(waypoints),
                state: FollowState::Traveling { segment: 0, t: 0.0 },
            },
            None => Self {
                waypoints: None,
                state: FollowState::Idle,
                position: fallback,
            },
        }
    }

    pub(crate) fn position(&self) -> Vec2 {
        self.position
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> FollowState {
        self.state
    }

    /// Advances the interpolation by `dt_secs * speed` waypoints.
    pub(crate) fn advance(&mut self, dt_secs: f32, speed: f32) -> FollowStep {
        let Some(waypoints) = self.waypoints.as_ref() else {
            return FollowStep::Inert;
        };
        let FollowState::Traveling { segment, t } = self.state else {
            return FollowStep::Inert;
        };

        let Some(&destination) = waypoints.get(segment + 1) else {
            self.position = waypoints[segment];
            self.state = FollowState::ReachedGoal;
            return FollowStep::ReachedGoal;
        };

        let t = (t + dt_secs * speed.max(0.0)).min(1.0);
        let origin = waypoints[segment];
        self.position = origin.lerp(destination, t);

        if t < 1.0 {
            self.state = FollowState::Traveling { segment, t };
            return FollowStep::Moved;
        }

        if segment + 2 >= waypoints.len() {
            self.state = FollowState::ReachedGoal;
            FollowStep::ReachedGoal
        } else {
            self.state = FollowState::Traveling {
                segment: segment + 1,
                t: 0.0,
            };
            FollowStep::Moved
        }
    }
}

/// Live enemy tracked by the world.
#[derive(Clone, Debug)]
pub(crate) struct Enemy {
    pub(crate) id: EnemyId,
    pub(crate) health: Health,
    pub(crate) speed: f32,
    pub(crate) reward: Gold,
    pub(crate) follower: PathFollower,
    dying: bool,
}

impl Enemy {
    pub(crate) fn new(
        id: EnemyId,
        health: Health,
        speed: f32,
        reward: Gold,
        follower: PathFollower,
    ) -> Self {
        Self {
            id,
            health,
            speed,
            reward,
            follower,
            dying: false,
        }
    }

    /// Applies damage; returns `true` when this hit killed the enemy.
    pub(crate) fn hurt(&mut self, damage: Damage) -> bool {
        if self.dying {
            return false;
        }
        self.health = self.health.damaged(damage);
        if self.health.is_zero() {
            self.dying = true;
            return true;
        }
        false
    }

    /// Flags the enemy for removal at the end of the tick.
    pub(crate) fn mark_dying(&mut self) {
        self.dying = true;
    }

    /// Reports whether the enemy still takes part in the tick.
    pub(crate) fn is_alive(&self) -> bool {
        !self.dying
    }

    pub(crate) fn snapshot(&self) -> EnemySnapshot {
        EnemySnapshot {
            id: self.id,
            position: self.follower.position(),
            health: self.health,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight_path() -> Arc<[Vec2]> {
        vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(2.0, 0.0),
        ]
        .into()
    }

    #[test]
    fn reaches_goal_exactly_once() {
        let mut follower = PathFollower::new(Some(straight_path()), Vec2::ZERO);

        assert_eq!(follower.advance(1.5, 1.0), FollowStep::Moved);
        assert_eq!(follower.position(), Vec2::new(1.0, 0.0));
        assert_eq!(follower.advance(1.5, 1.0), FollowStep::ReachedGoal);
        assert_eq!(follower.position(), Vec2::new(2.0, 0.0));
        assert_eq!(follower.advance(1.5, 1.0), FollowStep::Inert);
        assert_eq!(follower.state(), FollowState::ReachedGoal);
    }

    #[test]
    fn interpolates_between_waypoints() {
        let mut follower = PathFollower::new(Some(straight_path()), Vec2::ZERO);

        assert_eq!(follower.advance(0.25, 2.0), FollowStep::Moved);
        assert_eq!(follower.position(), Vec2::new(0.5, 0.0));
        assert_eq!(follower.advance(0.25, 2.0), FollowStep::Moved);
        assert_eq!(follower.position(), Vec2::new(1.0, 0.0));
        assert_eq!(
            follower.state(),
            FollowState::Traveling { segment: 1, t: 0.0 }
        );
        assert_eq!(follower.advance(0.125, 2.0), FollowStep::Moved);
        assert_eq!(follower.position(), Vec2::new(1.25, 0.0));
    }

    #[test]
    fn missing_path_is_inert() {
        let parked = Vec2::new(3.0, 4.0);
        let mut follower = PathFollower::new(None, parked);
        assert_eq!(follower.advance(10.0, 5.0), FollowStep::Inert);
        assert_eq!(follower.position(), parked);

        let mut empty = PathFollower::new(Some(Arc::from(Vec::<Vec2>::new())), parked);
        assert_eq!(empty.advance(10.0, 5.0), FollowStep::Inert);
        assert_eq!(empty.state(), FollowState::Idle);
    }

    #[test]
    fn single_waypoint_path_arrives_immediately() {
        let mut follower = PathFollower::new(Some(Arc::from(vec![Vec2::ONE])), Vec2::ZERO);
        assert_eq!(follower.advance(0.0, 1.0), FollowStep::ReachedGoal);
        assert_eq!(follower.position(), Vec2::ONE);
    }

    #[test]
    fn hurt_reports_the_killing_blow_once() {
        let follower = PathFollower::new(None, Vec2::ZERO);
        let mut enemy = Enemy::new(EnemyId::new(1), Health::new(2), 1.0, Gold::new(5), follower);

        assert!(!enemy.hurt(Damage::new(1)));
        assert!(enemy.hurt(Damage::new(1)));
        assert!(!enemy.hurt(Damage::new(1)));
        assert!(!enemy.is_alive());
    }
}
