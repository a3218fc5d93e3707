//! Registry configuration parameters.

use olympiad_core::{RegistryError, DEFAULT_ADVANCE_PER_GROUP, DEFAULT_GROUP_SIZE, MAX_ENTITIES};

use crate::event::EventData;

/// Configuration for an [`Olympiad`](crate::Olympiad).
///
/// Validated at construction; the lists never grow afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OlympiadConfig {
    /// Slots in the player list, both sentinels included.
    ///
    /// Default: 64. Must be in `3..=64`.
    pub player_capacity: u32,

    /// Slots in the event list, both sentinels included.
    ///
    /// Default: 64. Must be in `3..=64`.
    pub event_capacity: u32,

    /// Group size given to new events. Default: 4.
    pub group_size: u8,

    /// Qualifiers per group given to new events. Default: 2.
    pub advance_per_group: u8,
}

impl OlympiadConfig {
    /// Default list capacity: the full mask width.
    pub const DEFAULT_CAPACITY: u32 = MAX_ENTITIES;

    /// Create a config with the given list capacities and default group
    /// settings.
    pub fn new(player_capacity: u32, event_capacity: u32) -> Self {
        Self {
            player_capacity,
            event_capacity,
            group_size: DEFAULT_GROUP_SIZE,
            advance_per_group: DEFAULT_ADVANCE_PER_GROUP,
        }
    }

    /// Check every field against its permitted range.
    pub fn validate(&self) -> Result<(), RegistryError> {
        for requested in [self.player_capacity, self.event_capacity] {
            if !(3..=MAX_ENTITIES).contains(&requested) {
                return Err(RegistryError::InvalidCapacity { requested });
            }
        }
        self.event_template().map(drop)
    }

    /// Maximum number of players that can be live at once.
    pub fn max_players(&self) -> u32 {
        self.player_capacity.saturating_sub(2)
    }

    /// Maximum number of events that can be live at once.
    pub fn max_events(&self) -> u32 {
        self.event_capacity.saturating_sub(2)
    }

    pub(crate) fn event_template(&self) -> Result<EventData, RegistryError> {
        EventData::with_group_settings(self.group_size, self.advance_per_group)
    }
}

impl Default for OlympiadConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY, Self::DEFAULT_CAPACITY)
    }
}
