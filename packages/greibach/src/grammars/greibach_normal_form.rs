use std::fmt::Display;

use indexmap::{IndexMap, IndexSet};

use crate::{
    error::{GrammarError, Result},
    grammars::{context_free::Grammar, left_recursion::substitute_leading, production::Production},
    language::Symbol,
};

/// Right-hand side of a GNF production: a leading terminal followed by any symbols.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GnfWord {
    terminal: Symbol,
    tail: Vec<Symbol>,
}

impl GnfWord {
    pub fn terminal(&self) -> &Symbol {
        &self.terminal
    }

    pub fn tail(&self) -> &[Symbol] {
        &self.tail
    }
}

impl Display for GnfWord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.terminal)?;
        for symbol in &self.tail {
            write!(f, " {symbol}")?;
        }

        Ok(())
    }
}

/// Grammar known to be in Greibach normal form, grouped by variable.
///
/// This is what code generators consume: every word starts with a terminal, and the empty word is
/// only derivable from the start symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreibachNormalFormGrammar {
    start_symbol: Symbol,
    is_start_symbol_erasable: bool,
    productions: IndexMap<Symbol, IndexSet<GnfWord>>,
}

impl GreibachNormalFormGrammar {
    pub fn start_symbol(&self) -> &Symbol {
        &self.start_symbol
    }

    pub fn is_start_symbol_erasable(&self) -> bool {
        self.is_start_symbol_erasable
    }

    pub fn productions(&self) -> &IndexMap<Symbol, IndexSet<GnfWord>> {
        &self.productions
    }

    pub fn into_grammar(self) -> Grammar {
        let erasing = self
            .is_start_symbol_erasable
            .then(|| Production::epsilon(self.start_symbol.clone()));

        let productions = self
            .productions
            .into_iter()
            .flat_map(|(lhs, words)| {
                words.into_iter().map(move |word| {
                    Production::new(
                        lhs.clone(),
                        std::iter::once(word.terminal).chain(word.tail),
                    )
                })
            })
            .chain(erasing)
            .collect::<Vec<_>>();

        Grammar::new(self.start_symbol, productions)
    }
}

impl TryFrom<&Grammar> for GreibachNormalFormGrammar {
    type Error = GrammarError;

    fn try_from(grammar: &Grammar) -> Result<Self> {
        if let Some(violation) = grammar.greibach_normal_form_violation() {
            return Err(GrammarError::Precondition(format!(
                "grammar is not in Greibach normal form: {violation}"
            )));
        }

        let mut gnf = Self {
            start_symbol: grammar.start_variable().clone(),
            is_start_symbol_erasable: false,
            productions: IndexMap::new(),
        };

        for production in grammar.productions() {
            match production.rhs().split_first() {
                None => gnf.is_start_symbol_erasable = true,
                Some((terminal, tail)) => {
                    gnf.productions
                        .entry(production.lhs().clone())
                        .or_default()
                        .insert(GnfWord {
                            terminal: terminal.clone(),
                            tail: tail.to_vec(),
                        });
                }
            }
        }

        Ok(gnf)
    }
}

impl Grammar {
    /// Describes the first production breaking Greibach normal form, if any.
    fn greibach_normal_form_violation(&self) -> Option<String> {
        let terminals = self.terminals();

        for production in self.productions() {
            match production.first() {
                None if production.lhs() != self.start_variable() => {
                    return Some(format!("{production} derives the empty word"));
                }
                Some(first) if !terminals.contains(first) => {
                    return Some(format!("{production} does not start with a terminal"));
                }
                _ => {}
            }
        }

        if self.derives_epsilon_directly(self.start_variable())
            && self.occurs_in_rhs(self.start_variable())
        {
            return Some(format!(
                "nullable start variable {} occurs on a right-hand side",
                self.start_variable()
            ));
        }

        None
    }

    /// Checks that every production has the form `V ::= t s1 s2 ...` with `t` a terminal, except for
    /// an optional `S ::= ε` when the start variable `S` occurs on no right-hand side.
    pub fn in_greibach_normal_form(&self) -> bool {
        self.greibach_normal_form_violation().is_none()
    }

    /// Converts the grammar to Greibach normal form.
    ///
    /// Each round removes epsilon productions and left recursion, then substitutes the productions
    /// of every leading variable once. Without left recursion the leading variables form an acyclic
    /// chain, which gets one link shorter per round.
    pub fn to_greibach_normal_form(&self) -> Result<Grammar> {
        if self.in_greibach_normal_form() {
            return Ok(self.clone());
        }

        let mut grammar = self.clone();
        let mut round = 0;

        loop {
            round += 1;
            grammar = grammar
                .remove_epsilon_productions()?
                .remove_left_recursion()?;

            let variables = grammar.variables();
            let productions = substitute_leading(grammar.productions(), |production| {
                production
                    .first()
                    .is_some_and(|first| variables.contains(first))
            });

            grammar = grammar.verify_consistency(Grammar::new(
                grammar.start_variable().clone(),
                productions,
            ))?;
            log::debug!(
                "Greibach normal form round {}: {} productions",
                round,
                grammar.productions().len()
            );

            if grammar.in_greibach_normal_form() {
                return Ok(grammar);
            }
        }
    }
}
