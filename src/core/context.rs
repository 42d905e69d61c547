//! Explicit per-frame simulation context.

use bevy::prelude::*;

use super::states::GameState;

/// Clock and activity flag handed to every enemy tick.
///
/// `now` only advances while `active`, so windups, cooldowns and removal
/// timers freeze during pause. `delta` always carries the raw frame time for
/// work that keeps running while paused (navigation retry).
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct SimulationContext {
    pub active: bool,
    pub now: f32,
    pub delta: f32,
}

impl SimulationContext {
    /// An active context at a fixed time. Mostly useful for tests.
    pub fn running_at(now: f32) -> Self {
        Self {
            active: true,
            now,
            delta: 0.0,
        }
    }

    /// Advance the clock by one frame.
    pub fn advance(&mut self, delta: f32) {
        self.delta = delta.max(0.0);
        if self.active {
            self.now += self.delta;
        }
    }
}

/// Running total of points earned this level.
#[derive(Resource, Debug, Default)]
pub struct LevelScore(pub u32);

/// Fold the game state and frame time into the [`SimulationContext`].
pub fn advance_simulation_context(
    time: Res<Time>,
    state: Res<State<GameState>>,
    mut context: ResMut<SimulationContext>,
) {
    context.active = state.get().is_simulating();
    context.advance(time.delta_secs());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_freezes_while_inactive() {
        let mut context = SimulationContext::running_at(1.0);
        context.advance(0.5);
        assert_eq!(context.now, 1.5);

        context.active = false;
        context.advance(0.5);
        assert_eq!(context.now, 1.5);
        assert_eq!(context.delta, 0.5);
    }

    #[test]
    fn test_negative_delta_is_ignored() {
        let mut context = SimulationContext::running_at(2.0);
        context.advance(-1.0);
        assert_eq!(context.now, 2.0);
        assert_eq!(context.delta, 0.0);
    }
}
