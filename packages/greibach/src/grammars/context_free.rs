use std::{
    fmt::Display,
    hash::{Hash, Hasher},
};

use indexmap::{IndexMap, IndexSet};
use itertools::Itertools;
use tabled::{builder::Builder, settings::Style};

use crate::{
    error::{GrammarError, Result},
    grammars::production::Production,
    language::{Symbol, EPSILON},
    ordered_set::OrderedSet,
};

/// Context-free grammar: a start variable and an ordered set of productions.
///
/// Terminals and variables are not stored. A symbol is a variable iff it is the left-hand side
/// of some production, and a terminal otherwise.
///
/// Grammars are values: every transformation returns a new grammar and leaves `self` untouched.
/// Two grammars are equal when they have the same start variable and the same set of
/// productions, in any order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    start_variable: Symbol,
    productions: OrderedSet<Production>,
}

impl Hash for Grammar {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.start_variable.hash(state);
        self.productions.iter().sorted().collect_vec().hash(state);
    }
}

impl Grammar {
    pub fn new(
        start_variable: impl Into<Symbol>,
        productions: impl IntoIterator<Item = Production>,
    ) -> Self {
        Self {
            start_variable: start_variable.into(),
            productions: productions.into_iter().collect(),
        }
    }

    pub fn start_variable(&self) -> &Symbol {
        &self.start_variable
    }

    pub fn productions(&self) -> &OrderedSet<Production> {
        &self.productions
    }

    pub fn productions_of<'a>(
        &'a self,
        variable: &'a Symbol,
    ) -> impl Iterator<Item = &'a Production> + 'a {
        self.productions
            .iter()
            .filter(move |production| production.lhs() == variable)
    }

    /// All symbols, in order of first appearance.
    pub fn symbols(&self) -> OrderedSet<Symbol> {
        self.productions
            .iter()
            .flat_map(|production| std::iter::once(production.lhs()).chain(production.rhs()))
            .cloned()
            .collect()
    }

    pub fn variables(&self) -> OrderedSet<Symbol> {
        self.productions
            .iter()
            .map(|production| production.lhs().clone())
            .collect()
    }

    pub fn terminals(&self) -> OrderedSet<Symbol> {
        let variables = self.variables();
        self.symbols()
            .into_iter()
            .filter(|symbol| !variables.contains(symbol))
            .collect()
    }

    pub fn occurs_in_rhs(&self, symbol: &Symbol) -> bool {
        self.productions
            .iter()
            .any(|production| production.rhs().contains(symbol))
    }

    pub(crate) fn derives_epsilon_directly(&self, variable: &Symbol) -> bool {
        self.productions_of(variable)
            .any(Production::is_epsilon_production)
    }

    /// Removes unreachable symbols and productions, as well as productions of the form `V ::= V`.
    pub fn simplify(&self) -> Result<Grammar> {
        let mut reachable = IndexSet::from([self.start_variable.clone()]);
        let mut frontier = reachable.clone();

        while !frontier.is_empty() {
            let mut next_frontier = IndexSet::new();

            for production in &self.productions {
                if frontier.contains(production.lhs()) && !production.is_self_loop() {
                    next_frontier.extend(
                        production
                            .rhs()
                            .iter()
                            .filter(|symbol| !reachable.contains(*symbol))
                            .cloned(),
                    );
                }
            }

            reachable.extend(next_frontier.iter().cloned());
            frontier = next_frontier;
        }

        let productions = self
            .productions
            .iter()
            .filter(|production| reachable.contains(production.lhs()) && !production.is_self_loop())
            .cloned()
            .collect::<OrderedSet<_>>();

        log::trace!(
            "simplify kept {} of {} productions",
            productions.len(),
            self.productions.len()
        );

        self.verify_consistency(Grammar {
            start_variable: self.start_variable.clone(),
            productions,
        })
    }

    /// Reverses the right-hand side of every production, which reverses every derivable word.
    pub fn reversed(&self) -> Grammar {
        Grammar {
            start_variable: self.start_variable.clone(),
            productions: self
                .productions
                .iter()
                .map(|production| {
                    Production::new(production.lhs(), production.rhs().iter().rev())
                })
                .collect(),
        }
    }

    /// Makes sure the start variable does not occur on any right-hand side, introducing a new start
    /// variable `S' ::= S` if it does.
    pub fn remove_initial_variable_from_rhs(&self) -> Result<Grammar> {
        if !self.occurs_in_rhs(&self.start_variable) {
            return Ok(self.clone());
        }

        let new_start_variable = auxiliary_variable(&self.symbols(), &self.start_variable);
        log::debug!(
            "start variable {} occurs on a right-hand side, deriving it from {}",
            self.start_variable,
            new_start_variable
        );

        let mut productions = self.productions.clone();
        productions.insert(Production::new(
            new_start_variable.clone(),
            [self.start_variable.clone()],
        ));

        self.verify_consistency(Grammar {
            start_variable: new_start_variable,
            productions,
        })
    }

    /// Checks that `result`, obtained by transforming `self`, is still well formed.
    ///
    /// A variable of `self` must not turn into a terminal of `result`. The start variable may be
    /// left without productions, which is how an empty language is represented.
    pub(crate) fn verify_consistency(&self, result: Grammar) -> Result<Grammar> {
        let variables = self.variables();

        if let Some(terminal) = result
            .terminals()
            .iter()
            .find(|terminal| variables.contains(*terminal))
        {
            return Err(GrammarError::underivable(terminal));
        }

        Ok(result)
    }

    /// Formal definition `G = (V, Σ, P, S)`, with alternatives grouped by variable.
    pub fn definition(&self) -> String {
        let mut alternatives = IndexMap::<&Symbol, Vec<String>>::new();

        for production in &self.productions {
            alternatives
                .entry(production.lhs())
                .or_default()
                .push(if production.is_epsilon_production() {
                    EPSILON.to_owned()
                } else {
                    production.rhs().iter().join(" ")
                });
        }

        let mut variables = IndexSet::from([self.start_variable.clone()]);
        variables.extend(self.variables());

        let mut definition = format!(
            "G = ({{{}}}, {{{}}}, P, {})\n\n",
            variables.iter().join(", "),
            self.terminals().iter().join(", "),
            self.start_variable
        );

        definition += "P = {\n";

        for variable in &variables {
            if let Some(rhs) = alternatives.get(variable) {
                definition += &format!("  {} → {}\n", variable, rhs.join(" | "));
            }
        }

        definition += "}\n";

        definition
    }

    /// One row per production, numbered in iteration order.
    pub fn production_table(&self) -> String {
        let mut builder = Builder::default();

        builder.push_record(["#", "Variable", "Derives"].map(String::from));
        for (i, production) in self.productions.iter().enumerate() {
            builder.push_record([
                (i + 1).to_string(),
                production.lhs().to_string(),
                if production.is_epsilon_production() {
                    EPSILON.to_owned()
                } else {
                    production.rhs().iter().join(" ")
                },
            ]);
        }

        let mut table = builder.build();
        table.with(Style::rounded());

        table.to_string()
    }
}

/// Text format accepted by the parser: one `lhs ::= rhs` line per production.
impl Display for Grammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (start, rest): (Vec<_>, Vec<_>) = self
            .productions
            .iter()
            .partition(|production| production.lhs() == &self.start_variable);

        for production in start.into_iter().chain(rest) {
            writeln!(f, "{production}")?;
        }

        Ok(())
    }
}

/// Picks a variable name derived from `base` that is not in `used`.
///
/// `base` itself is used when free. Otherwise a trailing number of `base` is replaced by
/// increasing numbers starting from its own value (`A7` gives `A8`, `A9`, ...), and a base without
/// one gets numbers starting from 2 (`S` gives `S2`, `S3`, ...). A suffix too large to count up
/// from is treated as part of the name.
pub(crate) fn auxiliary_variable(used: &OrderedSet<Symbol>, base: &Symbol) -> Symbol {
    if !used.contains(base) {
        return base.clone();
    }

    let name = base.as_str();
    let stem = name.trim_end_matches(|c: char| c.is_ascii_digit());
    let (mut stem, mut index) = match name[stem.len()..].parse::<usize>() {
        Ok(index) => (stem, index),
        Err(_) => (name, 2),
    };

    loop {
        let candidate = Symbol::new(format!("{stem}{index}"));
        if !used.contains(&candidate) {
            return candidate;
        }

        match index.checked_add(1) {
            Some(next) => index = next,
            // Out of numbers for this stem, so suffix the whole name instead.
            None => {
                stem = name;
                index = 2;
            }
        }
    }
}
