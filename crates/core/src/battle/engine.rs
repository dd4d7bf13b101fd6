use tracing::{debug, info};

use crate::{error::ArenaError, models::Character, registry::Registry};

use super::models::{BattleAction, BattleEvent, BattleRules, Ending, Phase, Side};

/// A duel between two registered characters.
///
/// Both combatants are resolved once when the battle begins and are mutated
/// in place inside the registry. The same character may occupy both seats.
pub struct Battle<'a> {
    registry: &'a mut Registry,
    seats: [usize; 2],
    rules: BattleRules,
    shielded: [bool; 2],
    phase: Phase,
}

impl<'a> Battle<'a> {
    /// Resolve both combatants by id and open the first turn.
    pub fn begin(
        registry: &'a mut Registry,
        first_id: i32,
        second_id: i32,
        rules: BattleRules,
    ) -> Result<Self, ArenaError> {
        let not_found = ArenaError::CombatantsNotFound {
            first: first_id,
            second: second_id,
        };
        let first = registry
            .character_index(first_id)
            .ok_or_else(|| not_found.clone())?;
        let second = registry.character_index(second_id).ok_or(not_found)?;

        let mut battle = Self {
            registry,
            seats: [first, second],
            rules,
            shielded: [false; 2],
            phase: Phase::Turn(Side::First),
        };
        if !battle.both_standing() {
            battle.phase = Phase::Over(Ending::NoContest);
        }
        info!(
            first = first_id,
            second = second_id,
            phase = ?battle.phase,
            "Battle started"
        );
        Ok(battle)
    }

    /// Side whose move is awaited, or `None` once the battle is over.
    pub fn turn(&self) -> Option<Side> {
        match self.phase {
            Phase::Turn(side) => Some(side),
            Phase::Over(_) => None,
        }
    }

    pub fn ending(&self) -> Option<Ending> {
        match self.phase {
            Phase::Turn(_) => None,
            Phase::Over(ending) => Some(ending),
        }
    }

    pub fn is_over(&self) -> bool {
        self.ending().is_some()
    }

    /// Whether the current turn opens a new round.
    pub fn round_starting(&self) -> bool {
        self.phase == Phase::Turn(Side::First)
    }

    pub fn combatant(&self, side: Side) -> &Character {
        self.registry.character_at(self.seats[side.index()])
    }

    fn combatant_mut(&mut self, side: Side) -> &mut Character {
        self.registry.character_at_mut(self.seats[side.index()])
    }

    /// Health lines shown at the top of every round.
    pub fn status_lines(&self) -> [String; 2] {
        [Side::First, Side::Second].map(|side| {
            let character = self.combatant(side);
            format!(
                "Character {} (ID: {}) - Health: {}",
                side.number(),
                character.id,
                character.health
            )
        })
    }

    fn both_standing(&self) -> bool {
        self.combatant(Side::First).is_standing() && self.combatant(Side::Second).is_standing()
    }

    /// Play the current side's move and advance the machine.
    ///
    /// Returns the events to show, in order. Calling this after the battle is
    /// over does nothing.
    pub fn take_turn(&mut self, action: BattleAction) -> Vec<BattleEvent> {
        let Phase::Turn(side) = self.phase else {
            return Vec::new();
        };
        let mut events = Vec::new();

        match action {
            BattleAction::Attack => self.attack(side, &mut events),
            BattleAction::Shield => {
                if self.rules.shield_halves_damage {
                    self.shielded[side.index()] = true;
                }
                events.push(BattleEvent::Shielded { side });
            }
            BattleAction::Surrender => {
                events.push(BattleEvent::Surrendered { side });
                let winner = side.opponent();
                self.finish(Ending::Surrender { winner });
                return events;
            }
            BattleAction::Hesitate => {
                debug!(side = side.number(), "No action taken");
            }
        }

        let target = side.opponent();
        if !self.combatant(target).is_standing() {
            events.push(BattleEvent::Defeated { side: target });
            self.finish(Ending::Defeat { winner: side });
            return events;
        }

        self.phase = match side {
            Side::First => Phase::Turn(Side::Second),
            Side::Second if self.both_standing() => Phase::Turn(Side::First),
            Side::Second => Phase::Over(Ending::NoContest),
        };
        events
    }

    fn attack(&mut self, side: Side, events: &mut Vec<BattleEvent>) {
        let Some(power) = self.combatant(side).items.first().map(|item| item.power) else {
            events.push(BattleEvent::Unarmed { side });
            return;
        };

        let target = side.opponent();
        let damage = if std::mem::take(&mut self.shielded[target.index()]) {
            power / 2
        } else {
            power
        };
        let defender = self.combatant_mut(target);
        defender.health = defender.health.saturating_sub(damage);
        events.push(BattleEvent::Attacked {
            attacker: side,
            damage,
        });

        let attacker = self.combatant_mut(side);
        let exhausted = attacker.items.first_mut().map(|item| item.wear());
        if exhausted == Some(true) {
            let spent = attacker.items.remove(0);
            debug!(
                character = attacker.id,
                item = spent.id,
                "Item used up and removed"
            );
        }
    }

    fn finish(&mut self, ending: Ending) {
        if let Some(winner) = ending.winner() {
            self.combatant_mut(winner).record_win();
        }
        self.phase = Phase::Over(ending);
        info!(?ending, "Battle finished");
    }
}
