//! Operator codes carried by raw criteria

use std::fmt;

/// Raw operator codes as they appear in the source data
pub mod codes {
    pub const STAT_EQUAL: i32 = 0;
    pub const STAT_LESS_THAN: i32 = 1;
    pub const STAT_GREATER_THAN: i32 = 2;
    pub const OR: i32 = 3;
    pub const AND: i32 = 4;
    pub const STAT_BIT_SET: i32 = 22;
    pub const STAT_NOT_EQUAL: i32 = 24;
    pub const NOT: i32 = 42;
    pub const STAT_BIT_NOT_SET: i32 = 107;
}

/// Leaf-producing comparison kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonKind {
    /// Equal (=)
    Equal,
    /// Not equal
    NotEqual,
    /// Strictly less than
    LessThan,
    /// Strictly greater than
    GreaterThan,
    /// All bits of the value are set
    BitSet,
    /// No bit of the value is set
    BitNotSet,
}

/// Tree-combining logical kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalKind {
    And,
    Or,
    Not,
}

impl LogicalKind {
    /// Number of operands consumed from the stack
    #[inline]
    pub fn arity(self) -> usize {
        match self {
            LogicalKind::And | LogicalKind::Or => 2,
            LogicalKind::Not => 1,
        }
    }

    /// Upper-case name used in descriptions
    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            LogicalKind::And => "AND",
            LogicalKind::Or => "OR",
            LogicalKind::Not => "NOT",
        }
    }
}

impl fmt::Display for LogicalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Decoded operator code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Comparison(ComparisonKind),
    Logical(LogicalKind),
    /// Code outside the known table, kept verbatim
    Unknown(i32),
}

impl Operator {
    /// Decode a raw operator code
    pub fn from_code(code: i32) -> Self {
        match code {
            codes::STAT_EQUAL => Operator::Comparison(ComparisonKind::Equal),
            codes::STAT_LESS_THAN => Operator::Comparison(ComparisonKind::LessThan),
            codes::STAT_GREATER_THAN => Operator::Comparison(ComparisonKind::GreaterThan),
            codes::STAT_BIT_SET => Operator::Comparison(ComparisonKind::BitSet),
            codes::STAT_NOT_EQUAL => Operator::Comparison(ComparisonKind::NotEqual),
            codes::STAT_BIT_NOT_SET => Operator::Comparison(ComparisonKind::BitNotSet),
            codes::OR => Operator::Logical(LogicalKind::Or),
            codes::AND => Operator::Logical(LogicalKind::And),
            codes::NOT => Operator::Logical(LogicalKind::Not),
            other => Operator::Unknown(other),
        }
    }

    /// Encode back to the raw operator code
    pub fn code(self) -> i32 {
        match self {
            Operator::Comparison(ComparisonKind::Equal) => codes::STAT_EQUAL,
            Operator::Comparison(ComparisonKind::LessThan) => codes::STAT_LESS_THAN,
            Operator::Comparison(ComparisonKind::GreaterThan) => codes::STAT_GREATER_THAN,
            Operator::Comparison(ComparisonKind::BitSet) => codes::STAT_BIT_SET,
            Operator::Comparison(ComparisonKind::NotEqual) => codes::STAT_NOT_EQUAL,
            Operator::Comparison(ComparisonKind::BitNotSet) => codes::STAT_BIT_NOT_SET,
            Operator::Logical(LogicalKind::Or) => codes::OR,
            Operator::Logical(LogicalKind::And) => codes::AND,
            Operator::Logical(LogicalKind::Not) => codes::NOT,
            Operator::Unknown(code) => code,
        }
    }

    #[inline]
    pub fn is_logical(self) -> bool {
        matches!(self, Operator::Logical(_))
    }
}

impl From<i32> for Operator {
    fn from(code: i32) -> Self {
        Operator::from_code(code)
    }
}
