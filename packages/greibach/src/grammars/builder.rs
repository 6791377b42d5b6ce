use crate::{
    grammars::{context_free::Grammar, production::Production},
    language::Symbol,
    ordered_set::OrderedSet,
};

/// Fluent grammar builder.
///
/// ```
/// use greibach::GrammarBuilder;
///
/// let grammar = GrammarBuilder::start("S")
///     .derive("S").to(["(", "S", ")"])
///     .derive("S").to_epsilon()
///     .build();
///
/// assert_eq!(grammar.productions().len(), 2);
/// ```
///
/// Nothing is validated here: a grammar may reference a variable before it is derived, or never
/// derive it at all. Transformations report such grammars as malformed.
#[derive(Debug, Clone)]
pub struct GrammarBuilder {
    start_variable: Symbol,
    productions: OrderedSet<Production>,
}

impl GrammarBuilder {
    pub fn start(start_variable: impl Into<Symbol>) -> Self {
        Self {
            start_variable: start_variable.into(),
            productions: OrderedSet::new(),
        }
    }

    /// Begins a production for `lhs`, completed by [`Derive::to`] or [`Derive::to_epsilon`].
    pub fn derive(self, lhs: impl Into<Symbol>) -> Derive {
        Derive {
            builder: self,
            lhs: lhs.into(),
        }
    }

    pub fn build(self) -> Grammar {
        Grammar::new(self.start_variable, self.productions)
    }
}

/// A production of the builder waiting for its right-hand side.
#[derive(Debug, Clone)]
pub struct Derive {
    builder: GrammarBuilder,
    lhs: Symbol,
}

impl Derive {
    pub fn to<S: Into<Symbol>>(mut self, rhs: impl IntoIterator<Item = S>) -> GrammarBuilder {
        self.builder.productions.insert(Production::new(self.lhs, rhs));
        self.builder
    }

    pub fn to_epsilon(mut self) -> GrammarBuilder {
        self.builder.productions.insert(Production::epsilon(self.lhs));
        self.builder
    }
}
