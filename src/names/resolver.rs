//! Name resolution supplied by the host application

use crate::criteria::{StatId, StatValue};
use crate::names::stats::EnumeratedStat;

/// Lookup of display names for stats and enumerated values.
///
/// Implementors answer only what they know. The provided `resolve_*` methods
/// add the numeric fallbacks, so callers never see a missing name.
pub trait NameResolver: Send + Sync {
    fn stat_name(&self, stat: StatId) -> Option<&str>;
    fn profession_name(&self, id: StatValue) -> Option<&str>;
    fn breed_name(&self, id: StatValue) -> Option<&str>;
    fn gender_name(&self, id: StatValue) -> Option<&str>;
    fn flag_name(&self, stat: StatId, bit: StatValue) -> Option<&str>;

    /// Stat name, or `"Stat <id>"`
    fn resolve_stat_name(&self, stat: StatId) -> String {
        self.stat_name(stat)
            .map_or_else(|| format!("Stat {}", stat), str::to_owned)
    }

    fn resolve_profession_name(&self, id: StatValue) -> String {
        self.profession_name(id)
            .map_or_else(|| id.to_string(), str::to_owned)
    }

    fn resolve_breed_name(&self, id: StatValue) -> String {
        self.breed_name(id).map_or_else(|| id.to_string(), str::to_owned)
    }

    fn resolve_gender_name(&self, id: StatValue) -> String {
        self.gender_name(id).map_or_else(|| id.to_string(), str::to_owned)
    }

    /// Flag name for a bit value, or the value itself
    fn resolve_flag_name(&self, stat: StatId, bit: StatValue) -> String {
        self.flag_name(stat, bit)
            .map_or_else(|| bit.to_string(), str::to_owned)
    }

    /// Render a comparison value, substituting names for enumerated stats
    fn resolve_value(&self, stat: StatId, value: StatValue) -> String {
        match EnumeratedStat::from_stat(stat) {
            Some(EnumeratedStat::Profession) => self.resolve_profession_name(value),
            Some(EnumeratedStat::Breed) => self.resolve_breed_name(value),
            Some(EnumeratedStat::Gender) => self.resolve_gender_name(value),
            None => value.to_string(),
        }
    }
}

/// Resolver that knows no names; every lookup takes the numeric fallback
#[derive(Debug, Clone, Copy, Default)]
pub struct NoNames;

impl NameResolver for NoNames {
    fn stat_name(&self, _stat: StatId) -> Option<&str> {
        None
    }

    fn profession_name(&self, _id: StatValue) -> Option<&str> {
        None
    }

    fn breed_name(&self, _id: StatValue) -> Option<&str> {
        None
    }

    fn gender_name(&self, _id: StatValue) -> Option<&str> {
        None
    }

    fn flag_name(&self, _stat: StatId, _bit: StatValue) -> Option<&str> {
        None
    }
}
