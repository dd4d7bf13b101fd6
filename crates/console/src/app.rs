use std::io::{BufRead, Write};

use anyhow::Result;
use arena_core::{ArenaError, Battle, BattleAction, BattleRules, ItemKind, Race, Registry};
use tracing::{debug, info, warn};

use crate::prompt::{PromptError, Prompter};

const MAIN_MENU: [&str; 7] = [
    "1. Create Item",
    "2. Create Character",
    "3. Assign Item to Character",
    "4. Edit Item",
    "5. Edit Character",
    "6. Battle",
    "7. Exit",
];

const TURN_MENU: [&str; 3] = ["1. Attack", "2. Use Shield", "3. Surrender"];

const RACE_CODES: &str = "(0: Human, 1: Dragon, 2: Giant, 3: Elf, 4: Dwarf)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    CreateItem,
    CreateCharacter,
    AssignItem,
    EditItem,
    EditCharacter,
    Battle,
    Exit,
}

impl MenuChoice {
    fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(MenuChoice::CreateItem),
            2 => Some(MenuChoice::CreateCharacter),
            3 => Some(MenuChoice::AssignItem),
            4 => Some(MenuChoice::EditItem),
            5 => Some(MenuChoice::EditCharacter),
            6 => Some(MenuChoice::Battle),
            7 => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

/// Menu-driven console session over an owned registry.
pub struct ArenaApp<R, W> {
    registry: Registry,
    prompt: Prompter<R, W>,
    rules: BattleRules,
}

impl<R: BufRead, W: Write> ArenaApp<R, W> {
    pub fn new(input: R, output: W, rules: BattleRules) -> Self {
        Self {
            registry: Registry::new(),
            prompt: Prompter::new(input, output),
            rules,
        }
    }

    /// Run the menu loop until the player exits or input ends.
    pub fn run(&mut self) -> Result<()> {
        loop {
            for line in MAIN_MENU {
                self.prompt.say(line)?;
            }
            let choice = match self.prompt.read_i32("Enter your choice: ") {
                Ok(code) => MenuChoice::from_code(code),
                Err(PromptError::Malformed(token)) => {
                    debug!(%token, "Non-numeric menu choice");
                    None
                }
                Err(PromptError::Closed) => {
                    info!("Input closed, leaving");
                    return Ok(());
                }
                Err(PromptError::Io(err)) => return Err(err.into()),
            };

            let Some(choice) = choice else {
                self.prompt.say("Invalid choice, try again.")?;
                continue;
            };
            if choice == MenuChoice::Exit {
                info!("Exit requested");
                return Ok(());
            }

            match self.dispatch(choice) {
                Ok(()) => {}
                Err(PromptError::Malformed(token)) => {
                    warn!(?choice, %token, "Operation abandoned on malformed input");
                    self.prompt.say("Invalid input.")?;
                }
                Err(PromptError::Closed) => {
                    info!(?choice, "Input closed mid-operation, leaving");
                    return Ok(());
                }
                Err(PromptError::Io(err)) => return Err(err.into()),
            }
        }
    }

    fn dispatch(&mut self, choice: MenuChoice) -> Result<(), PromptError> {
        debug!(?choice, "Dispatching");
        match choice {
            MenuChoice::CreateItem => self.create_item(),
            MenuChoice::CreateCharacter => self.create_character(),
            MenuChoice::AssignItem => self.assign_item(),
            MenuChoice::EditItem => self.edit_item(),
            MenuChoice::EditCharacter => self.edit_character(),
            MenuChoice::Battle => self.battle(),
            MenuChoice::Exit => Ok(()),
        }
    }

    fn report(
        &mut self,
        outcome: Result<(), ArenaError>,
        success: &str,
    ) -> Result<(), PromptError> {
        match outcome {
            Ok(()) => self.prompt.say(success)?,
            Err(err) => {
                debug!(?err, "Operation rejected");
                self.prompt.say(err)?;
            }
        }
        Ok(())
    }

    fn create_item(&mut self) -> Result<(), PromptError> {
        let id = self.prompt.read_i32("Enter item ID: ")?;
        let kind = self
            .prompt
            .read_i32("Enter item type (0: Shield, 1: Knife, 2: Sword): ")?;
        let power = self.prompt.read_i32("Enter item power: ")?;
        let usage = self.prompt.read_i32("Enter item usage: ")?;

        self.registry.create_item(id, ItemKind::from_code(kind), power, usage);
        self.prompt.say("Item created successfully.")?;
        Ok(())
    }

    fn create_character(&mut self) -> Result<(), PromptError> {
        let id = self.prompt.read_i32("Enter character ID: ")?;
        let name = self.prompt.read_word("Enter character name: ")?;
        let race = self
            .prompt
            .read_i32(&format!("Enter character race {RACE_CODES}: "))?;

        self.registry.create_character(id, name, Race::from_code(race));
        self.prompt.say("Character created successfully.")?;
        Ok(())
    }

    fn assign_item(&mut self) -> Result<(), PromptError> {
        let character_id = self.prompt.read_i32("Enter character ID: ")?;
        let item_id = self.prompt.read_i32("Enter item ID: ")?;

        // A capacity rejection prints only the rejection, never the success line.
        let outcome = self.registry.assign_item(character_id, item_id);
        self.report(outcome, "Item assigned successfully.")
    }

    fn edit_item(&mut self) -> Result<(), PromptError> {
        let item_id = self.prompt.read_i32("Enter item ID to edit: ")?;
        let power = self.prompt.read_i32("Enter new power for the item: ")?;

        let outcome = self.registry.edit_item(item_id, power);
        self.report(outcome, "Item edited successfully.")
    }

    fn edit_character(&mut self) -> Result<(), PromptError> {
        let id = self.prompt.read_i32("Enter character ID to edit: ")?;
        if self.registry.character(id).is_none() {
            self.prompt.say(ArenaError::CharacterNotFound { id })?;
            return Ok(());
        }

        let name = self.prompt.read_word("Enter new name for the character: ")?;
        let race = self.prompt.read_i32(&format!(
            "Enter new race for the character {RACE_CODES}: "
        ))?;

        let outcome = self.registry.edit_character(id, name, Race::from_code(race));
        self.report(outcome, "Character edited successfully.")
    }

    fn battle(&mut self) -> Result<(), PromptError> {
        let first = self.prompt.read_i32("Enter ID of the first character: ")?;
        let second = self.prompt.read_i32("Enter ID of the second character: ")?;

        let prompt = &mut self.prompt;
        let mut battle = match Battle::begin(&mut self.registry, first, second, self.rules) {
            Ok(battle) => battle,
            Err(err) => {
                prompt.say(err)?;
                return Ok(());
            }
        };

        while let Some(side) = battle.turn() {
            if battle.round_starting() {
                for line in battle.status_lines() {
                    prompt.say(line)?;
                }
            }
            for line in TURN_MENU {
                prompt.say(line)?;
            }

            let action = match prompt.read_i32(&format!(
                "Enter choice for character {}: ",
                side.number()
            )) {
                Ok(code) => BattleAction::from_code(code),
                Err(PromptError::Malformed(token)) => {
                    debug!(side = side.number(), %token, "Non-numeric battle choice");
                    BattleAction::Hesitate
                }
                Err(err) => return Err(err),
            };

            for event in battle.take_turn(action) {
                prompt.say(event)?;
            }
        }

        info!(ending = ?battle.ending(), "Battle over");
        Ok(())
    }
}

#[cfg(test)]
impl<R: BufRead, W: Write> ArenaApp<R, W> {
    fn registry(&self) -> &Registry {
        &self.registry
    }

    fn into_output(self) -> W {
        self.prompt.into_output()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    type TestApp = ArenaApp<Cursor<Vec<u8>>, Vec<u8>>;

    fn play_with(rules: BattleRules, script: &str) -> Result<TestApp> {
        let mut app = ArenaApp::new(Cursor::new(script.as_bytes().to_vec()), Vec::new(), rules);
        app.run()?;
        Ok(app)
    }

    fn play(script: &str) -> Result<TestApp> {
        play_with(BattleRules::default(), script)
    }

    fn transcript(app: TestApp) -> String {
        String::from_utf8(app.into_output()).expect("transcript is utf-8")
    }

    #[test]
    fn knife_breaks_and_attacker_goes_unarmed() -> Result<()> {
        let app = play(
            "1\n1 1 30 1\n\
             2\n10 Ada 0\n\
             2\n20 Smaug 1\n\
             3\n10 1\n\
             6\n10 20\n\
             1\n2\n1\n3\n\
             7\n",
        )?;

        let ada = app.registry().character(10).unwrap().clone();
        let smaug = app.registry().character(20).unwrap().clone();
        assert!(ada.items.is_empty());
        assert_eq!((ada.level, ada.health), (2, 100));
        assert_eq!((smaug.level, smaug.health), (1, 670));
        assert_eq!(app.registry().items()[0].usage, 1);

        let out = transcript(app);
        assert!(out.contains("Item created successfully.\n"));
        assert!(out.contains("Item assigned successfully.\n"));
        assert!(out.contains("Character 1 (ID: 10) - Health: 100\n"));
        assert!(out.contains("Character 2 (ID: 20) - Health: 700\n"));
        assert!(out.contains("Character 1 attacks Character 2 for 30 damage.\n"));
        assert!(out.contains(
            "Character 2 uses shield, damage will be halved for the next attack.\n"
        ));
        assert!(out.contains("Character 2 (ID: 20) - Health: 670\n"));
        assert!(out.contains("Character 1 has no items to attack with.\n"));
        assert!(out.contains("Character 2 surrenders. Character 1 wins.\n"));
        Ok(())
    }

    #[test]
    fn editing_missing_character_asks_nothing_more() -> Result<()> {
        let app = play("2\n10 Ada 0\n5\n99\n7\n")?;
        assert_eq!(app.registry().character(10).unwrap().name, "Ada");

        let out = transcript(app);
        assert!(out.contains("Enter character ID to edit: Character not found.\n"));
        assert!(!out.contains("Enter new name"));
        Ok(())
    }

    #[test]
    fn editing_character_resets_health() -> Result<()> {
        let app = play("2\n10 Ada 0\n5\n10 Smaug 1\n7\n")?;
        let edited = app.registry().character(10).unwrap();
        assert_eq!(edited.name, "Smaug");
        assert_eq!(edited.race, Race::Dragon);
        assert_eq!(edited.health, 700);
        assert!(transcript(app).contains("Character edited successfully.\n"));
        Ok(())
    }

    #[test]
    fn third_assignment_at_level_one_is_rejected() -> Result<()> {
        let app = play("1\n1 2 10 5\n2\n10 Ada 0\n3\n10 1\n3\n10 1\n3\n10 1\n7\n")?;
        assert_eq!(app.registry().character(10).unwrap().items.len(), 2);

        let out = transcript(app);
        assert_eq!(out.matches("Item assigned successfully.").count(), 2);
        assert!(out.contains("Cannot add more items, maximum limit reached for this level.\n"));
        Ok(())
    }

    #[test]
    fn assignment_with_unknown_ids_reports_not_found() -> Result<()> {
        let app = play("2\n10 Ada 0\n3\n10 4\n7\n")?;
        assert!(app.registry().character(10).unwrap().items.is_empty());
        assert!(transcript(app).contains("Character or item not found.\n"));
        Ok(())
    }

    #[test]
    fn edit_item_updates_template_only() -> Result<()> {
        let app = play("1\n1 2 10 5\n2\n10 Ada 0\n3\n10 1\n4\n1 99\n4\n3 5\n7\n")?;
        assert_eq!(app.registry().item(1).unwrap().power, 99);
        assert_eq!(app.registry().character(10).unwrap().items[0].power, 10);

        let out = transcript(app);
        assert!(out.contains("Item edited successfully.\n"));
        assert!(out.contains("Item not found.\n"));
        Ok(())
    }

    #[test]
    fn invalid_menu_choices_reprint_the_menu() -> Result<()> {
        let out = transcript(play("9\nabc\n7\n")?);
        assert_eq!(out.matches("Invalid choice, try again.").count(), 2);
        assert_eq!(out.matches("7. Exit").count(), 3);
        Ok(())
    }

    #[test]
    fn malformed_operation_input_abandons_the_operation() -> Result<()> {
        let app = play("1\n5 sword\n7\n")?;
        assert!(app.registry().items().is_empty());
        assert!(transcript(app).contains("Invalid input.\n"));
        Ok(())
    }

    #[test]
    fn end_of_input_stops_cleanly() -> Result<()> {
        let out = transcript(play("2\n10")?);
        assert_eq!(out.matches("7. Exit").count(), 1);
        Ok(())
    }

    #[test]
    fn battle_with_unknown_character_aborts() -> Result<()> {
        let out = transcript(play("2\n10 Ada 0\n6\n10 20\n7\n")?);
        assert!(out.contains("One or both characters not found.\n"));
        assert!(!out.contains("Enter choice for character"));
        Ok(())
    }

    #[test]
    fn unknown_battle_choices_pass_the_turn() -> Result<()> {
        let app = play("2\n10 Ada 0\n2\n20 Smaug 1\n6\n10 20\n9\nx\n3\n7\n")?;
        let smaug = app.registry().character(20).unwrap();
        assert_eq!(smaug.level, 2);
        assert_eq!(app.registry().character(10).unwrap().level, 1);

        let out = transcript(app);
        assert_eq!(out.matches("Character 1 (ID: 10) - Health: 100").count(), 2);
        assert!(out.contains("Character 1 surrenders. Character 2 wins.\n"));
        Ok(())
    }

    #[test]
    fn defeated_character_cannot_fight_until_edited() -> Result<()> {
        let app = play(
            "1\n1 2 700 5\n\
             2\n10 Ada 0\n\
             2\n20 Smaug 1\n\
             3\n10 1\n\
             6\n10 20\n1\n\
             6\n10 20\n\
             5\n20 Smaug 1\n\
             6\n10 20\n3\n\
             7\n",
        )?;
        let ada = app.registry().character(10).unwrap();
        assert_eq!(ada.level, 2);
        let smaug = app.registry().character(20).unwrap();
        assert_eq!((smaug.level, smaug.health), (2, 700));

        let out = transcript(app);
        assert!(out.contains("Character 2 is defeated. Character 1 wins.\n"));
        assert_eq!(out.matches("Character 1 (ID: 10)").count(), 2);
        assert!(out.contains("Character 1 surrenders. Character 2 wins.\n"));
        Ok(())
    }

    #[test]
    fn shield_rule_halves_incoming_damage() -> Result<()> {
        let rules = BattleRules {
            shield_halves_damage: true,
        };
        let app = play_with(
            rules,
            "1\n1 2 60 5\n\
             2\n10 Ada 0\n\
             2\n20 Smaug 1\n\
             3\n20 1\n\
             6\n10 20\n2\n1\n3\n\
             7\n",
        )?;
        assert_eq!(app.registry().character(10).unwrap().health, 70);
        assert!(transcript(app).contains("Character 2 attacks Character 1 for 30 damage.\n"));
        Ok(())
    }
}
