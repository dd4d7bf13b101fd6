use std::fmt;

/// Which seat a combatant occupies. The first seat always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    First,
    Second,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }

    /// 1-based seat number used in console messages.
    pub fn number(self) -> u8 {
        match self {
            Side::First => 1,
            Side::Second => 2,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Side::First => 0,
            Side::Second => 1,
        }
    }
}

/// What a combatant chose to do on its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleAction {
    Attack,
    Shield,
    Surrender,
    /// Any choice outside the menu. The turn passes without effect.
    Hesitate,
}

impl BattleAction {
    /// Map the turn menu (`1. Attack, 2. Use Shield, 3. Surrender`) onto an action.
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => BattleAction::Attack,
            2 => BattleAction::Shield,
            3 => BattleAction::Surrender,
            _ => BattleAction::Hesitate,
        }
    }
}

/// How a finished battle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ending {
    /// The loser's health dropped to zero or below.
    Defeat { winner: Side },
    /// The loser gave up.
    Surrender { winner: Side },
    /// A combatant was already down when a round was due, so nobody won.
    NoContest,
}

impl Ending {
    pub fn winner(&self) -> Option<Side> {
        match self {
            Ending::Defeat { winner } | Ending::Surrender { winner } => Some(*winner),
            Ending::NoContest => None,
        }
    }
}

/// Current state of the turn machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Turn(Side),
    Over(Ending),
}

/// Something that happened during a turn, rendered as the console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BattleEvent {
    Attacked { attacker: Side, damage: i32 },
    Unarmed { side: Side },
    Shielded { side: Side },
    Surrendered { side: Side },
    Defeated { side: Side },
}

impl fmt::Display for BattleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattleEvent::Attacked { attacker, damage } => write!(
                f,
                "Character {} attacks Character {} for {} damage.",
                attacker.number(),
                attacker.opponent().number(),
                damage
            ),
            BattleEvent::Unarmed { side } => write!(
                f,
                "Character {} has no items to attack with.",
                side.number()
            ),
            BattleEvent::Shielded { side } => write!(
                f,
                "Character {} uses shield, damage will be halved for the next attack.",
                side.number()
            ),
            BattleEvent::Surrendered { side } => write!(
                f,
                "Character {} surrenders. Character {} wins.",
                side.number(),
                side.opponent().number()
            ),
            BattleEvent::Defeated { side } => write!(
                f,
                "Character {} is defeated. Character {} wins.",
                side.number(),
                side.opponent().number()
            ),
        }
    }
}

/// Tunable battle behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BattleRules {
    /// When set, a shield halves the next attack that lands on its user.
    pub shield_halves_damage: bool,
}
