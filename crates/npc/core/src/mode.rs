//! Strategy and behavioral mode enums.

/// High-level posture chosen by the strategic layer.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Strategy {
    /// Push toward enemies and engage.
    #[default]
    Aggressive,
    /// Hold back and gather information.
    Defensive,
    /// Stay unnoticed, keep patrolling.
    Stealth,
    /// Help allies.
    Support,
    /// Break contact.
    Retreat,
}

impl Strategy {
    /// Mode the operational layer enters for this strategy.
    pub const fn mode(self) -> Mode {
        match self {
            Strategy::Aggressive => Mode::Combat,
            Strategy::Defensive => Mode::Investigate,
            Strategy::Stealth => Mode::Patrol,
            Strategy::Support => Mode::Collaborate,
            Strategy::Retreat => Mode::Flee,
        }
    }
}

/// Finite state machine state (behavioral mode) of an agent.
///
/// The set is closed. State handlers are stored in a table indexed by
/// [`Mode::index`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Mode {
    #[default]
    Idle,
    Patrol,
    Investigate,
    Combat,
    Flee,
    Collaborate,
}

impl Mode {
    pub const ALL: [Mode; 6] = [
        Mode::Idle,
        Mode::Patrol,
        Mode::Investigate,
        Mode::Combat,
        Mode::Flee,
        Mode::Collaborate,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}
