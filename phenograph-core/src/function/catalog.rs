//! Function Catalog
//!
//! The fixed, index-stable list of function identities a node can carry.
//! External drivers encode a node's behavior as an index (or name) into this
//! list, so the order below must never change. New entries go at the end.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, Result};

/// Identity of the function a node applies to its inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FunctionId {
    /// No function: the node always outputs its default value.
    #[default]
    #[serde(alias = "none")]
    Constant,
    Sum,
    And,
    AnyEq,
    Not,
    Gate,
    Sin,
    Cos,
    Product,
    Exp,
    LessThan,
    GreaterThan,
    Max,
    Min,
    NegSum,
    Square,
    PosClamp,
    NegClamp,
    Sqrt,
}

/// How many inputs a function consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Ignores its inputs.
    Nullary,
    /// Reads input positions `0..n`; falls back to the default output when
    /// fewer are connected.
    Indexed(usize),
    /// Reads every input.
    Variadic,
}

impl FunctionId {
    /// Every catalog entry in index order.
    pub const ALL: [FunctionId; 19] = [
        FunctionId::Constant,
        FunctionId::Sum,
        FunctionId::And,
        FunctionId::AnyEq,
        FunctionId::Not,
        FunctionId::Gate,
        FunctionId::Sin,
        FunctionId::Cos,
        FunctionId::Product,
        FunctionId::Exp,
        FunctionId::LessThan,
        FunctionId::GreaterThan,
        FunctionId::Max,
        FunctionId::Min,
        FunctionId::NegSum,
        FunctionId::Square,
        FunctionId::PosClamp,
        FunctionId::NegClamp,
        FunctionId::Sqrt,
    ];

    /// Number of entries in the catalog.
    pub const COUNT: usize = Self::ALL.len();

    /// Position of this function in [`FunctionId::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Look up a function by catalog index.
    pub fn from_index(index: usize) -> Result<Self> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(GraphError::FunctionIndexOutOfRange {
                index,
                len: Self::COUNT,
            })
    }

    /// Stable snake_case name, matching the serde representation.
    pub fn name(self) -> &'static str {
        match self {
            FunctionId::Constant => "constant",
            FunctionId::Sum => "sum",
            FunctionId::And => "and",
            FunctionId::AnyEq => "any_eq",
            FunctionId::Not => "not",
            FunctionId::Gate => "gate",
            FunctionId::Sin => "sin",
            FunctionId::Cos => "cos",
            FunctionId::Product => "product",
            FunctionId::Exp => "exp",
            FunctionId::LessThan => "less_than",
            FunctionId::GreaterThan => "greater_than",
            FunctionId::Max => "max",
            FunctionId::Min => "min",
            FunctionId::NegSum => "neg_sum",
            FunctionId::Square => "square",
            FunctionId::PosClamp => "pos_clamp",
            FunctionId::NegClamp => "neg_clamp",
            FunctionId::Sqrt => "sqrt",
        }
    }

    /// Whether this is the constant identity.
    pub fn is_constant(self) -> bool {
        self == FunctionId::Constant
    }

    /// Input arity the function expects.
    pub fn arity(self) -> Arity {
        match self {
            FunctionId::Constant => Arity::Nullary,
            FunctionId::Not => Arity::Indexed(1),
            FunctionId::Gate => Arity::Indexed(2),
            _ => Arity::Variadic,
        }
    }
}

impl fmt::Display for FunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FunctionId {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self> {
        if s == "none" {
            return Ok(FunctionId::Constant);
        }
        Self::ALL
            .iter()
            .copied()
            .find(|function| function.name() == s)
            .ok_or_else(|| GraphError::UnknownFunction(s.to_string()))
    }
}

impl TryFrom<usize> for FunctionId {
    type Error = GraphError;

    fn try_from(index: usize) -> Result<Self> {
        Self::from_index(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_is_first() {
        assert_eq!(FunctionId::ALL[0], FunctionId::Constant);
        assert_eq!(FunctionId::Constant.index(), 0);
        assert_eq!(FunctionId::default(), FunctionId::Constant);
    }

    #[test]
    fn indices_match_positions() {
        for (position, function) in FunctionId::ALL.iter().enumerate() {
            assert_eq!(function.index(), position);
            assert_eq!(FunctionId::from_index(position).unwrap(), *function);
        }
    }

    #[test]
    fn catalog_order_is_stable() {
        assert_eq!(FunctionId::COUNT, 19);
        assert_eq!(FunctionId::from_index(5).unwrap(), FunctionId::Gate);
        assert_eq!(FunctionId::from_index(10).unwrap(), FunctionId::LessThan);
        assert_eq!(FunctionId::from_index(18).unwrap(), FunctionId::Sqrt);
    }

    #[test]
    fn out_of_range_index_is_an_error() {
        let err = FunctionId::from_index(19).unwrap_err();
        assert!(matches!(
            err,
            GraphError::FunctionIndexOutOfRange { index: 19, len: 19 }
        ));
        assert!(FunctionId::try_from(usize::MAX).is_err());
    }

    #[test]
    fn names_parse_back() {
        for function in FunctionId::ALL {
            assert_eq!(function.name().parse::<FunctionId>().unwrap(), function);
            assert_eq!(function.to_string(), function.name());
        }
        assert_eq!("none".parse::<FunctionId>().unwrap(), FunctionId::Constant);
        assert!(matches!(
            "tanh".parse::<FunctionId>(),
            Err(GraphError::UnknownFunction(name)) if name == "tanh"
        ));
    }

    #[test]
    fn serde_uses_catalog_names() {
        assert_eq!(
            serde_json::to_string(&FunctionId::AnyEq).unwrap(),
            "\"any_eq\""
        );
        let parsed: Vec<FunctionId> =
            serde_json::from_str(r#"["none", "gate", "pos_clamp"]"#).unwrap();
        assert_eq!(
            parsed,
            vec![FunctionId::Constant, FunctionId::Gate, FunctionId::PosClamp]
        );
    }

    #[test]
    fn arity_marks_indexed_functions() {
        assert_eq!(FunctionId::Constant.arity(), Arity::Nullary);
        assert_eq!(FunctionId::Not.arity(), Arity::Indexed(1));
        assert_eq!(FunctionId::Gate.arity(), Arity::Indexed(2));
        assert_eq!(FunctionId::Max.arity(), Arity::Variadic);
    }
}
