//! Raw criterion records

use serde::{Deserialize, Serialize};

use crate::criteria::operator::{ComparisonKind, LogicalKind, Operator};

/// Stat identifier
pub type StatId = i32;

/// Stat or threshold value. Wide enough for 32-bit flag masks.
pub type StatValue = i64;

/// One atomic record of a postfix criteria list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criterion {
    #[serde(default)]
    pub id: i32,
    /// Stat identifier; ignored for logical operators
    #[serde(default, alias = "left_operand", alias = "leftOperand")]
    pub stat: StatId,
    /// Threshold value; ignored for logical operators
    #[serde(default, alias = "right_operand", alias = "rightOperand")]
    pub value: StatValue,
    /// Raw operator code
    #[serde(alias = "operatorCode", alias = "operator_code")]
    pub operator: i32,
}

impl Criterion {
    pub fn new(id: i32, stat: StatId, value: StatValue, operator: i32) -> Self {
        Self {
            id,
            stat,
            value,
            operator,
        }
    }

    /// Comparison record with id 0
    pub fn compare(stat: StatId, kind: ComparisonKind, value: StatValue) -> Self {
        Self::new(0, stat, value, Operator::Comparison(kind).code())
    }

    /// Logical marker record with id 0
    pub fn logical(kind: LogicalKind) -> Self {
        Self::new(0, 0, 0, Operator::Logical(kind).code())
    }

    #[inline]
    pub fn op(&self) -> Operator {
        Operator::from_code(self.operator)
    }
}

/// Parse a JSON array of criteria
pub fn criteria_from_json(json: &str) -> crate::error::Result<Vec<Criterion>> {
    Ok(serde_json::from_str(json)?)
}
