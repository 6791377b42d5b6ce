use std::fmt::Display;

use crate::language::Symbol;

/// Context-free production `lhs ::= rhs`, where `lhs` is a single variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Production {
    lhs: Symbol,
    rhs: Vec<Symbol>,
}

impl Production {
    pub fn new<S: Into<Symbol>>(lhs: impl Into<Symbol>, rhs: impl IntoIterator<Item = S>) -> Self {
        Self {
            lhs: lhs.into(),
            rhs: rhs.into_iter().map(Into::into).collect(),
        }
    }

    pub fn epsilon(lhs: impl Into<Symbol>) -> Self {
        Self {
            lhs: lhs.into(),
            rhs: Vec::new(),
        }
    }

    pub fn lhs(&self) -> &Symbol {
        &self.lhs
    }

    pub fn rhs(&self) -> &[Symbol] {
        &self.rhs
    }

    pub fn is_epsilon_production(&self) -> bool {
        self.rhs.is_empty()
    }

    /// `V ::= V`, which derives nothing new.
    pub fn is_self_loop(&self) -> bool {
        self.rhs.len() == 1 && self.rhs[0] == self.lhs
    }

    pub fn first(&self) -> Option<&Symbol> {
        self.rhs.first()
    }

    /// The right-hand side without its leading symbol.
    pub fn tail(&self) -> &[Symbol] {
        self.rhs.get(1..).unwrap_or_default()
    }
}

impl Display for Production {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ::=", self.lhs)?;
        for symbol in &self.rhs {
            write!(f, " {symbol}")?;
        }

        Ok(())
    }
}
