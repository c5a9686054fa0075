//! Well-known stat identifiers

use crate::criteria::StatId;

pub const BREED: StatId = 4;
pub const LEVEL: StatId = 54;
pub const GENDER: StatId = 59;
pub const PROFESSION: StatId = 60;
pub const VISUAL_PROFESSION: StatId = 368;

/// Stats whose values are ids into a name table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumeratedStat {
    Profession,
    Breed,
    Gender,
}

impl EnumeratedStat {
    /// Classify a stat id; plain numeric stats return `None`
    pub fn from_stat(stat: StatId) -> Option<Self> {
        match stat {
            PROFESSION | VISUAL_PROFESSION => Some(EnumeratedStat::Profession),
            BREED => Some(EnumeratedStat::Breed),
            GENDER => Some(EnumeratedStat::Gender),
            _ => None,
        }
    }
}
