use indexmap::IndexSet;

use crate::{
    error::Result,
    grammars::{
        context_free::{auxiliary_variable, Grammar},
        production::Production,
    },
    language::Symbol,
    ordered_set::OrderedSet,
};

/// Replaces the leading symbol `W` of every production selected by `expand` with each right-hand
/// side of `W`, keeping the other productions in place.
pub(super) fn substitute_leading(
    productions: &OrderedSet<Production>,
    mut expand: impl FnMut(&Production) -> bool,
) -> OrderedSet<Production> {
    let mut substituted = OrderedSet::with_capacity(productions.len());

    for production in productions {
        match production.first() {
            Some(leading) if expand(production) => {
                substituted.extend(
                    productions
                        .iter()
                        .filter(|alternative| alternative.lhs() == leading)
                        .map(|alternative| {
                            Production::new(
                                production.lhs(),
                                alternative.rhs().iter().chain(production.tail()),
                            )
                        }),
                );
            }
            _ => {
                substituted.insert(production.clone());
            }
        }
    }

    substituted
}

/// Rewrites `V ::= V α | β` into `V ::= β | β A` and `A ::= α | α A`, with `A` a fresh variable.
fn remove_direct_left_recursion(
    productions: &mut OrderedSet<Production>,
    variable: &Symbol,
    used: &mut OrderedSet<Symbol>,
) {
    productions.retain(|production| !(production.lhs() == variable && production.is_self_loop()));

    let (recursive, non_recursive): (Vec<_>, Vec<_>) = productions
        .iter()
        .filter(|production| production.lhs() == variable)
        .cloned()
        .partition(|production| production.first() == Some(variable));

    if recursive.is_empty() {
        return;
    }

    let auxiliary = auxiliary_variable(used, variable);
    used.insert(auxiliary.clone());
    log::debug!(
        "removing direct left recursion of {} through {} ({} recursive, {} other productions)",
        variable,
        auxiliary,
        recursive.len(),
        non_recursive.len()
    );

    let mut rewritten = Vec::with_capacity(2 * (recursive.len() + non_recursive.len()));
    for production in &non_recursive {
        rewritten.push(Production::new(variable, production.rhs()));
        rewritten.push(Production::new(
            variable,
            production.rhs().iter().chain([&auxiliary]),
        ));
    }
    for production in &recursive {
        rewritten.push(Production::new(&auxiliary, production.tail()));
        rewritten.push(Production::new(
            &auxiliary,
            production.tail().iter().chain([&auxiliary]),
        ));
    }

    productions.retain(|production| production.lhs() != variable);
    productions.extend(rewritten);
}

impl Grammar {
    /// Checks whether some variable derives, through leading symbols only, a sentential form that
    /// starts with itself. Both `V ::= V α` and indirect recursion through other variables count.
    pub fn has_left_recursion(&self) -> bool {
        let variables = self.variables();

        variables.iter().any(|variable| {
            let mut reachable = IndexSet::from([variable]);
            let mut next = 0;

            while let Some(&current) = reachable.get_index(next) {
                next += 1;

                for production in self.productions_of(current) {
                    match production.first() {
                        Some(first) if first == variable => return true,
                        Some(first) if variables.contains(first) => {
                            reachable.insert(first);
                        }
                        _ => {}
                    }
                }
            }

            false
        })
    }

    /// Removes left recursion with Paull's algorithm.
    ///
    /// The grammar is simplified and its epsilon productions are removed first. Variables are then
    /// processed in order: productions `vi ::= vj α` with `j < i` get `vj` substituted, after which
    /// direct left recursion on `vi` is rewritten through an auxiliary variable. The result is
    /// simplified, dropping variables that lost every production along the way.
    pub fn remove_left_recursion(&self) -> Result<Grammar> {
        if !self.has_left_recursion() {
            return Ok(self.clone());
        }

        let grammar = self.simplify()?.remove_epsilon_productions()?;
        if !grammar.has_left_recursion() {
            return Ok(grammar);
        }

        let start_epsilon = Production::epsilon(grammar.start_variable());
        let mut productions = grammar.productions().clone();
        let derives_epsilon = productions.shift_remove(&start_epsilon);

        let variables = grammar.variables();
        let mut used = grammar.symbols();

        for (i, vi) in variables.iter().enumerate() {
            for vj in variables.iter().take(i) {
                productions = substitute_leading(&productions, |production| {
                    production.lhs() == vi && production.first() == Some(vj)
                });
            }

            remove_direct_left_recursion(&mut productions, vi, &mut used);
        }

        if derives_epsilon {
            productions.insert(start_epsilon);
        }

        let result = Grammar::new(grammar.start_variable().clone(), productions).simplify()?;
        grammar.verify_consistency(result)
    }
}
