//! Table-backed name resolver

use ahash::AHashMap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::criteria::{StatId, StatValue};
use crate::error::{CriteriaError, Result};
use crate::names::resolver::NameResolver;
use crate::names::stats::{BREED, GENDER, LEVEL, PROFESSION, VISUAL_PROFESSION};

/// Built-in names for the well-known stats
static CORE_TABLES: Lazy<NameTables> = Lazy::new(|| {
    let mut tables = NameTables::default();

    for (id, name) in [
        (BREED, "Breed"),
        (LEVEL, "Level"),
        (GENDER, "Gender"),
        (PROFESSION, "Profession"),
        (VISUAL_PROFESSION, "VisualProfession"),
    ] {
        tables.insert_stat(id, name);
    }

    for (id, name) in [
        (1, "Soldier"),
        (2, "Martial Artist"),
        (3, "Engineer"),
        (4, "Fixer"),
        (5, "Agent"),
        (6, "Adventurer"),
        (7, "Trader"),
        (8, "Bureaucrat"),
        (9, "Enforcer"),
        (10, "Doctor"),
        (11, "Nano-Technician"),
        (12, "Meta-Physicist"),
        (14, "Keeper"),
        (15, "Shade"),
    ] {
        tables.professions.insert(id, name.to_string());
    }

    for (id, name) in [(1, "Solitus"), (2, "Opifex"), (3, "Nanomage"), (4, "Atrox")] {
        tables.breeds.insert(id, name.to_string());
    }

    for (id, name) in [(1, "Uni"), (2, "Male"), (3, "Female")] {
        tables.genders.insert(id, name.to_string());
    }

    tables
});

/// Name tables keyed by id.
///
/// JSON shape:
/// `{"stats": {"60": "Profession"}, "professions": {"8": "Bureaucrat"},
///   "flags": {"389": {"16": "NoDrop"}}}`; every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NameTables {
    #[serde(default)]
    pub stats: AHashMap<StatId, String>,
    #[serde(default)]
    pub professions: AHashMap<StatValue, String>,
    #[serde(default)]
    pub breeds: AHashMap<StatValue, String>,
    #[serde(default)]
    pub genders: AHashMap<StatValue, String>,
    #[serde(default)]
    pub flags: AHashMap<StatId, AHashMap<StatValue, String>>,
}

impl NameTables {
    /// Built-in tables for Profession, Breed, Gender and Level
    pub fn core() -> Self {
        CORE_TABLES.clone()
    }

    /// Parse tables from JSON and validate them
    pub fn from_json(json: &str) -> Result<Self> {
        let tables: NameTables = serde_json::from_str(json)?;
        tables.validate()?;
        Ok(tables)
    }

    /// Reject blank names; a blank name would render as an empty description
    pub fn validate(&self) -> Result<()> {
        let blank = |section: &str, id: StatValue| {
            Err(CriteriaError::InvalidNameTable(format!(
                "blank name for {} {}",
                section, id
            )))
        };

        for (id, name) in &self.stats {
            if name.trim().is_empty() {
                return blank("stat", StatValue::from(*id));
            }
        }
        for (section, table) in [
            ("profession", &self.professions),
            ("breed", &self.breeds),
            ("gender", &self.genders),
        ] {
            for (id, name) in table {
                if name.trim().is_empty() {
                    return blank(section, *id);
                }
            }
        }
        for flags in self.flags.values() {
            for (bit, name) in flags {
                if name.trim().is_empty() {
                    return blank("flag", *bit);
                }
            }
        }
        Ok(())
    }

    pub fn insert_stat(&mut self, stat: StatId, name: impl Into<String>) {
        self.stats.insert(stat, name.into());
    }

    pub fn insert_flag(&mut self, stat: StatId, bit: StatValue, name: impl Into<String>) {
        self.flags.entry(stat).or_default().insert(bit, name.into());
    }

    /// Builder form of [`NameTables::insert_stat`]
    pub fn with_stat(mut self, stat: StatId, name: impl Into<String>) -> Self {
        self.insert_stat(stat, name);
        self
    }

    /// Builder form of [`NameTables::insert_flag`]
    pub fn with_flag(mut self, stat: StatId, bit: StatValue, name: impl Into<String>) -> Self {
        self.insert_flag(stat, bit, name);
        self
    }

    /// Overlay `other` on top of these tables; entries in `other` win
    pub fn merge(&mut self, other: NameTables) {
        self.stats.extend(other.stats);
        self.professions.extend(other.professions);
        self.breeds.extend(other.breeds);
        self.genders.extend(other.genders);
        for (stat, flags) in other.flags {
            self.flags.entry(stat).or_default().extend(flags);
        }
    }
}

impl NameResolver for NameTables {
    fn stat_name(&self, stat: StatId) -> Option<&str> {
        self.stats.get(&stat).map(String::as_str)
    }

    fn profession_name(&self, id: StatValue) -> Option<&str> {
        self.professions.get(&id).map(String::as_str)
    }

    fn breed_name(&self, id: StatValue) -> Option<&str> {
        self.breeds.get(&id).map(String::as_str)
    }

    fn gender_name(&self, id: StatValue) -> Option<&str> {
        self.genders.get(&id).map(String::as_str)
    }

    fn flag_name(&self, stat: StatId, bit: StatValue) -> Option<&str> {
        self.flags
            .get(&stat)
            .and_then(|flags| flags.get(&bit))
            .map(String::as_str)
    }
}
