use serde::{Deserialize, Serialize};

use crate::tile::TileId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Endpoint {
    Origin,
    Goal,
}

impl Endpoint {
    pub fn other(self) -> Endpoint {
        match self {
            Endpoint::Origin => Endpoint::Goal,
            Endpoint::Goal => Endpoint::Origin,
        }
    }
}

/// The two click buttons. Primary places the origin first, secondary the goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    Primary,
    Secondary,
}

impl Channel {
    pub fn other(self) -> Channel {
        match self {
            Channel::Primary => Channel::Secondary,
            Channel::Secondary => Channel::Primary,
        }
    }

    pub fn first_endpoint(self) -> Endpoint {
        match self {
            Channel::Primary => Endpoint::Origin,
            Channel::Secondary => Endpoint::Goal,
        }
    }

    /// State a channel sits in after placing its first endpoint.
    pub fn armed_state(self) -> ChannelState {
        match self.first_endpoint() {
            Endpoint::Origin => ChannelState::OriginArmed,
            Endpoint::Goal => ChannelState::GoalArmed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChannelState {
    #[default]
    Idle,
    OriginArmed,
    GoalArmed,
    Resolved,
}

impl ChannelState {
    pub fn is_armed(self) -> bool {
        matches!(self, ChannelState::OriginArmed | ChannelState::GoalArmed)
    }
}

/// What a click asks the selection to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickEffect {
    /// Put the hovered tile at `endpoint`. With `clear_first` the current
    /// path, origin and goal are cleared beforehand.
    Place { endpoint: Endpoint, clear_first: bool },
    /// Clear the path, origin and goal.
    ClearAll,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClickChannels {
    pub primary: ChannelState,
    pub secondary: ChannelState,
}

impl ClickChannels {
    pub fn state(&self, channel: Channel) -> ChannelState {
        match channel {
            Channel::Primary => self.primary,
            Channel::Secondary => self.secondary,
        }
    }

    fn state_mut(&mut self, channel: Channel) -> &mut ChannelState {
        match channel {
            Channel::Primary => &mut self.primary,
            Channel::Secondary => &mut self.secondary,
        }
    }

    /// Transition table for one click on `channel`. Pure: returns the next
    /// channel states and the effect, and leaves `self` untouched so the
    /// caller can drop the click if the effect turns out to be a no-op.
    pub fn press(&self, channel: Channel) -> (ClickChannels, ClickEffect) {
        let mut next = *self;
        let other = channel.other();
        let effect = match self.state(channel) {
            ChannelState::Idle => {
                let clear_first = self.state(other) == ChannelState::Resolved;
                if clear_first {
                    *next.state_mut(other) = ChannelState::Idle;
                }
                if next.state(other) == other.armed_state() {
                    // The other button already placed its first endpoint.
                    *next.state_mut(channel) = ChannelState::Resolved;
                    *next.state_mut(other) = ChannelState::Idle;
                } else {
                    *next.state_mut(channel) = channel.armed_state();
                }
                ClickEffect::Place {
                    endpoint: channel.first_endpoint(),
                    clear_first,
                }
            }
            ChannelState::OriginArmed | ChannelState::GoalArmed => {
                *next.state_mut(channel) = ChannelState::Resolved;
                ClickEffect::Place {
                    endpoint: channel.first_endpoint().other(),
                    clear_first: false,
                }
            }
            ChannelState::Resolved => {
                next = ClickChannels::default();
                ClickEffect::ClearAll
            }
        };
        (next, effect)
    }
}

/// Outcome of the last pathfinding run for the current origin/goal pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PathStatus {
    #[default]
    NotCalculated,
    Unreachable,
    Solved { length: usize },
}

#[derive(Debug, Clone, Default)]
pub struct Selection {
    pub hovered: Option<TileId>,
    pub origin: Option<TileId>,
    pub goal: Option<TileId>,
    pub channels: ClickChannels,
    /// Reveal starts at the origin end when the origin was placed before the goal.
    pub origin_first: bool,
    pub path: PathStatus,
}

impl Selection {
    pub fn endpoint(&self, endpoint: Endpoint) -> Option<TileId> {
        match endpoint {
            Endpoint::Origin => self.origin,
            Endpoint::Goal => self.goal,
        }
    }

    /// Sets an endpoint and returns the tile it replaced.
    pub fn set_endpoint(&mut self, endpoint: Endpoint, tile: Option<TileId>) -> Option<TileId> {
        let slot = match endpoint {
            Endpoint::Origin => &mut self.origin,
            Endpoint::Goal => &mut self.goal,
        };
        std::mem::replace(slot, tile)
    }

    pub fn is_endpoint(&self, tile: TileId) -> bool {
        self.origin == Some(tile) || self.goal == Some(tile)
    }

    pub fn pair(&self) -> Option<(TileId, TileId)> {
        Some((self.origin?, self.goal?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ChannelState::*;

    fn run(presses: &[Channel]) -> (ClickChannels, Vec<ClickEffect>) {
        let mut channels = ClickChannels::default();
        let mut effects = Vec::new();
        for ch in presses {
            let (next, effect) = channels.press(*ch);
            channels = next;
            effects.push(effect);
        }
        (channels, effects)
    }

    #[test]
    fn primary_cycles_origin_goal_reset() {
        let (c, effects) = run(&[Channel::Primary, Channel::Primary, Channel::Primary]);
        assert_eq!(
            effects,
            vec![
                ClickEffect::Place { endpoint: Endpoint::Origin, clear_first: false },
                ClickEffect::Place { endpoint: Endpoint::Goal, clear_first: false },
                ClickEffect::ClearAll,
            ]
        );
        assert_eq!(c, ClickChannels::default());
    }

    #[test]
    fn secondary_mirrors_primary() {
        let (c, effects) = run(&[Channel::Secondary, Channel::Secondary]);
        assert_eq!(
            effects,
            vec![
                ClickEffect::Place { endpoint: Endpoint::Goal, clear_first: false },
                ClickEffect::Place { endpoint: Endpoint::Origin, clear_first: false },
            ]
        );
        assert_eq!(c.secondary, Resolved);
        assert_eq!(c.primary, Idle);
    }

    #[test]
    fn interleaved_click_jumps_to_resolved() {
        let (c, _) = run(&[Channel::Primary]);
        assert_eq!(c.primary, OriginArmed);

        let (next, effect) = c.press(Channel::Secondary);
        assert_eq!(effect, ClickEffect::Place { endpoint: Endpoint::Goal, clear_first: false });
        assert_eq!(next.secondary, Resolved);
        assert_eq!(next.primary, Idle);

        let (c, _) = run(&[Channel::Secondary]);
        assert_eq!(c.secondary, GoalArmed);
        let (next, effect) = c.press(Channel::Primary);
        assert_eq!(effect, ClickEffect::Place { endpoint: Endpoint::Origin, clear_first: false });
        assert_eq!(next.primary, Resolved);
        assert_eq!(next.secondary, Idle);
    }

    #[test]
    fn idle_click_clears_other_resolved_channel() {
        let (c, _) = run(&[Channel::Primary, Channel::Primary]);
        assert_eq!(c.primary, Resolved);
        let (next, effect) = c.press(Channel::Secondary);
        assert_eq!(effect, ClickEffect::Place { endpoint: Endpoint::Goal, clear_first: true });
        assert_eq!(next.primary, Idle);
        assert_eq!(next.secondary, GoalArmed);
    }

    #[test]
    fn press_does_not_mutate() {
        let c = ClickChannels::default();
        let _ = c.press(Channel::Primary);
        assert_eq!(c, ClickChannels::default());
    }

    #[test]
    fn set_endpoint_returns_replaced() {
        let mut s = Selection::default();
        assert_eq!(s.set_endpoint(Endpoint::Origin, Some(TileId(1))), None);
        assert_eq!(s.set_endpoint(Endpoint::Origin, Some(TileId(2))), Some(TileId(1)));
        assert!(s.is_endpoint(TileId(2)));
        assert!(s.pair().is_none());
        s.goal = Some(TileId(3));
        assert_eq!(s.pair(), Some((TileId(2), TileId(3))));
    }
}
