use chrono::{DateTime, Utc};
use fake::Dummy;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lowest difficulty a quest may carry.
pub const MIN_DIFFICULTY: u8 = 1;
/// Highest difficulty a quest may carry.
pub const MAX_DIFFICULTY: u8 = 5;
/// Progress is a percentage; values are clamped to this ceiling.
pub const MAX_PROGRESS: u8 = 100;
/// Experience required to advance one character level.
pub const EXPERIENCE_PER_LEVEL: u32 = 100;

/// Defines quest repeat schedule.
///
#[derive(Clone, Copy, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Repeat {
    OneTime,
    EveryWeeks { interval: u32 },
}

/// Defines sub-task data structure. Sub-tasks are owned by their quest and
/// have no independent lifecycle.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubTask {
    pub id: Uuid,
    pub title: String,
    pub is_completed: bool,
}

impl SubTask {
    /// Return a new incomplete sub-task with the given title.
    ///
    pub fn new(title: impl Into<String>) -> Self {
        SubTask {
            id: Uuid::new_v4(),
            title: title.into(),
            is_completed: false,
        }
    }
}

/// Defines quest data structure.
///
#[derive(Clone, Debug, Dummy, PartialEq, Serialize, Deserialize)]
pub struct Quest {
    pub id: Uuid,
    pub title: String,
    pub info: String,
    pub difficulty: u8,
    pub created_at: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub is_main_quest: bool,
    pub is_active: bool,
    pub is_completed: bool,
    pub progress: u8,
    pub repeat: Repeat,
    #[serde(default)]
    pub tasks: Vec<SubTask>,
}

impl Quest {
    /// Experience awarded to the user when this quest is completed.
    ///
    pub fn experience_reward(&self) -> u32 {
        10 * u32::from(self.difficulty)
    }
}

/// Specifying the available character classes.
///
#[derive(Clone, Copy, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacterClass {
    Knight,
    Assassin,
    Archer,
    Wizard,
}

impl CharacterClass {
    #[allow(dead_code)]
    pub const ALL: [CharacterClass; 4] = [
        CharacterClass::Knight,
        CharacterClass::Assassin,
        CharacterClass::Archer,
        CharacterClass::Wizard,
    ];

    /// Weapons a character of this class may wield.
    ///
    pub fn weapons(&self) -> &'static [Weapon] {
        match self {
            CharacterClass::Knight => {
                &[Weapon::BroadSword, Weapon::LongSword, Weapon::TwinSwords]
            }
            CharacterClass::Assassin => {
                &[Weapon::GoldenDagger, Weapon::LongDagger, Weapon::TwinDaggers]
            }
            CharacterClass::Archer => &[Weapon::Bow, Weapon::Crossbow],
            CharacterClass::Wizard => &[Weapon::Staff, Weapon::Spellbook],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CharacterClass::Knight => "Knight",
            CharacterClass::Assassin => "Assassin",
            CharacterClass::Archer => "Archer",
            CharacterClass::Wizard => "Wizard",
        }
    }
}

/// Specifying the available weapons.
///
#[derive(Clone, Copy, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weapon {
    BroadSword,
    LongSword,
    TwinSwords,
    GoldenDagger,
    LongDagger,
    TwinDaggers,
    Bow,
    Crossbow,
    Staff,
    Spellbook,
}

impl Weapon {
    pub fn label(&self) -> &'static str {
        match self {
            Weapon::BroadSword => "Broad Sword",
            Weapon::LongSword => "Long Sword",
            Weapon::TwinSwords => "Twin Swords",
            Weapon::GoldenDagger => "Golden Dagger",
            Weapon::LongDagger => "Long Dagger",
            Weapon::TwinDaggers => "Twin Daggers",
            Weapon::Bow => "Bow",
            Weapon::Crossbow => "Crossbow",
            Weapon::Staff => "Staff",
            Weapon::Spellbook => "Spellbook",
        }
    }
}

/// Defines the player profile persisted alongside the quest log.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub class: CharacterClass,
    pub weapon: Weapon,
    pub experience: u32,
}

impl Profile {
    /// Return a fresh profile with no accumulated experience.
    ///
    pub fn new(class: CharacterClass, weapon: Weapon) -> Self {
        Profile {
            class,
            weapon,
            experience: 0,
        }
    }

    /// Current character level derived from accumulated experience.
    ///
    pub fn level(&self) -> u32 {
        self.experience / EXPERIENCE_PER_LEVEL + 1
    }

    /// Experience accumulated towards the next level.
    ///
    pub fn level_progress(&self) -> u32 {
        self.experience % EXPERIENCE_PER_LEVEL
    }
}

impl Default for Profile {
    fn default() -> Self {
        Profile::new(CharacterClass::Knight, Weapon::BroadSword)
    }
}
