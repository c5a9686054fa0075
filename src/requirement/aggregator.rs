//! Flat, structure-blind requirement summary
//!
//! Merges every comparison on the same stat into one entry and ignores
//! AND/OR/NOT entirely. Useful for "which stats matter"; not a
//! satisfiability check.

use ahash::AHashMap;

use crate::criteria::{ComparisonKind, Criterion, Operator, StatId, StatValue};
use crate::expression::display_form;
use crate::names::NameResolver;

/// Merged constraints on one stat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatRequirement {
    pub stat_id: StatId,
    pub stat_name: String,
    /// Inclusive lower bound (from `>`)
    pub min_value: Option<StatValue>,
    /// Inclusive upper bound (from `<`)
    pub max_value: Option<StatValue>,
    pub exact_value: Option<StatValue>,
    pub must_have_flag: Option<StatValue>,
    pub must_lack_flag: Option<StatValue>,
}

impl FlatRequirement {
    fn new(stat_id: StatId, stat_name: String) -> Self {
        Self {
            stat_id,
            stat_name,
            min_value: None,
            max_value: None,
            exact_value: None,
            must_have_flag: None,
            must_lack_flag: None,
        }
    }

    fn merge(&mut self, kind: ComparisonKind, raw: StatValue) {
        let (_, value) = display_form(kind, raw);
        match kind {
            ComparisonKind::GreaterThan => {
                self.min_value = Some(self.min_value.map_or(value, |min| min.max(value)));
            }
            ComparisonKind::LessThan => {
                self.max_value = Some(self.max_value.map_or(value, |max| max.min(value)));
            }
            ComparisonKind::Equal => self.exact_value = Some(value),
            ComparisonKind::BitSet => {
                self.must_have_flag = Some(self.must_have_flag.unwrap_or(0) | value);
            }
            ComparisonKind::BitNotSet => {
                self.must_lack_flag = Some(self.must_lack_flag.unwrap_or(0) | value);
            }
            // The stat still matters even though no bound is recorded
            ComparisonKind::NotEqual => {}
        }
    }
}

/// Summarize criteria per stat, in order of first appearance
pub fn aggregate_flat(criteria: &[Criterion], names: &dyn NameResolver) -> Vec<FlatRequirement> {
    let mut requirements: Vec<FlatRequirement> = Vec::new();
    let mut index: AHashMap<StatId, usize> = AHashMap::new();

    for criterion in criteria {
        let kind = match criterion.op() {
            Operator::Comparison(kind) => kind,
            Operator::Logical(_) | Operator::Unknown(_) => continue,
        };

        let slot = *index.entry(criterion.stat).or_insert_with(|| {
            requirements.push(FlatRequirement::new(
                criterion.stat,
                names.resolve_stat_name(criterion.stat),
            ));
            requirements.len() - 1
        });
        requirements[slot].merge(kind, criterion.value);
    }

    requirements
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::LogicalKind;
    use crate::names::stats::{LEVEL, PROFESSION};
    use crate::names::NameTables;

    const FLAGS: i32 = 389;

    #[test]
    fn test_min_and_max_share_an_entry() {
        let criteria = [
            Criterion::compare(LEVEL, ComparisonKind::GreaterThan, 99),
            Criterion::compare(LEVEL, ComparisonKind::LessThan, 200),
            Criterion::logical(LogicalKind::And),
        ];
        let flat = aggregate_flat(&criteria, &NameTables::core());

        assert_eq!(flat.len(), 1);
        assert_eq!(flat[0].stat_name, "Level");
        assert_eq!(flat[0].min_value, Some(100));
        assert_eq!(flat[0].max_value, Some(199));
        assert_eq!(flat[0].exact_value, None);
    }

    #[test]
    fn test_ignores_connectives() {
        // Two alternatives joined by OR still merge into one entry
        let criteria = [
            Criterion::compare(PROFESSION, ComparisonKind::Equal, 1),
            Criterion::compare(PROFESSION, ComparisonKind::Equal, 12),
            Criterion::logical(LogicalKind::Or),
            Criterion::logical(LogicalKind::Not),
        ];
        let flat = aggregate_flat(&criteria, &NameTables::core());

        assert_eq!(flat.len(), 1);
        assert_eq!(flat[0].exact_value, Some(12));
    }

    #[test]
    fn test_flags_and_order() {
        let criteria = [
            Criterion::compare(FLAGS, ComparisonKind::BitSet, 1),
            Criterion::compare(LEVEL, ComparisonKind::GreaterThan, 10),
            Criterion::compare(FLAGS, ComparisonKind::BitSet, 4),
            Criterion::compare(FLAGS, ComparisonKind::BitNotSet, 16),
            Criterion::new(0, 77, 1, 999),
        ];
        let flat = aggregate_flat(&criteria, &NameTables::core());

        let stats: Vec<StatId> = flat.iter().map(|r| r.stat_id).collect();
        assert_eq!(stats, vec![FLAGS, LEVEL]);
        assert_eq!(flat[0].stat_name, "Stat 389");
        assert_eq!(flat[0].must_have_flag, Some(5));
        assert_eq!(flat[0].must_lack_flag, Some(16));
    }

    #[test]
    fn test_repeated_bounds_keep_the_tightest() {
        let criteria = [
            Criterion::compare(LEVEL, ComparisonKind::GreaterThan, 50),
            Criterion::compare(LEVEL, ComparisonKind::GreaterThan, 10),
            Criterion::compare(LEVEL, ComparisonKind::LessThan, 100),
            Criterion::compare(LEVEL, ComparisonKind::LessThan, 150),
        ];
        let flat = aggregate_flat(&criteria, &NameTables::core());
        assert_eq!(flat[0].min_value, Some(51));
        assert_eq!(flat[0].max_value, Some(99));
    }

    #[test]
    fn test_not_equal_registers_stat_only() {
        let criteria = [Criterion::compare(PROFESSION, ComparisonKind::NotEqual, 3)];
        let flat = aggregate_flat(&criteria, &NameTables::core());
        assert_eq!(flat.len(), 1);
        assert_eq!(flat[0].exact_value, None);
        assert_eq!(flat[0].min_value, None);
    }
}
