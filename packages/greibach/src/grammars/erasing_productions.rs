use indexmap::IndexSet;
use itertools::Itertools;

use crate::{
    error::Result,
    grammars::{
        context_free::{auxiliary_variable, Grammar},
        production::Production,
    },
    language::Symbol,
    ordered_set::OrderedSet,
};

/// Variables deriving the empty word, directly or transitively.
fn nullable_variables<'a>(
    productions: impl Iterator<Item = &'a Production> + Clone,
) -> OrderedSet<Symbol> {
    let mut nullable = IndexSet::new();

    loop {
        let mut changed = false;

        for production in productions.clone() {
            if !nullable.contains(production.lhs())
                && production.rhs().iter().all(|symbol| nullable.contains(symbol))
            {
                nullable.insert(production.lhs().clone());
                changed = true;
            }
        }

        if !changed {
            break;
        }
    }

    nullable
}

/// Nullable variables deriving nothing but the empty word.
///
/// Starts from every nullable variable and discards those with a production that mentions a
/// symbol outside the set, until nothing changes.
fn purely_nullable_variables<'a>(
    productions: impl Iterator<Item = &'a Production> + Clone,
    nullable: &OrderedSet<Symbol>,
) -> OrderedSet<Symbol> {
    let mut purely_nullable = nullable.clone();

    loop {
        let mut changed = false;

        for production in productions.clone() {
            if purely_nullable.contains(production.lhs())
                && !production
                    .rhs()
                    .iter()
                    .all(|symbol| purely_nullable.contains(symbol))
            {
                purely_nullable.shift_remove(production.lhs());
                changed = true;
            }
        }

        if !changed {
            break;
        }
    }

    purely_nullable
}

impl Grammar {
    pub fn nullable_variables(&self) -> OrderedSet<Symbol> {
        nullable_variables(self.productions().iter())
    }

    /// Removes epsilon productions.
    ///
    /// Afterwards only the start variable may derive the empty word, in which case it does not
    /// occur on any right-hand side.
    pub fn remove_epsilon_productions(&self) -> Result<Grammar> {
        let start_variable = self.start_variable();
        let nullable = self.nullable_variables();

        if nullable.contains(start_variable) && self.occurs_in_rhs(start_variable) {
            let new_start_variable = auxiliary_variable(&self.symbols(), start_variable);
            log::debug!(
                "nullable start variable {} occurs on a right-hand side, deriving it from {}",
                start_variable,
                new_start_variable
            );

            let mut productions = self.productions().clone();
            productions.insert(Production::new(
                new_start_variable.clone(),
                [start_variable.clone()],
            ));
            productions.insert(Production::epsilon(new_start_variable.clone()));

            return Grammar::new(new_start_variable, productions).remove_epsilon_productions();
        }

        if nullable.iter().all(|variable| variable == start_variable) {
            return Ok(self.clone());
        }

        let mut productions = self.productions().clone();
        let mut round = 0;

        loop {
            let nullable = nullable_variables(productions.iter());
            if nullable.iter().all(|variable| variable == start_variable) {
                break;
            }

            round += 1;
            let purely_nullable = purely_nullable_variables(productions.iter(), &nullable);
            log::debug!(
                "erasing round {}: nullable {{{}}}, purely nullable {{{}}}",
                round,
                nullable.iter().join(", "),
                purely_nullable.iter().join(", ")
            );

            let mut next_productions = OrderedSet::new();

            for production in &productions {
                if production.is_epsilon_production() {
                    if production.lhs() == start_variable {
                        next_productions.insert(production.clone());
                    }
                    continue;
                }

                let variants = production
                    .rhs()
                    .iter()
                    .map(|symbol| {
                        if purely_nullable.contains(symbol) {
                            vec![None]
                        } else if nullable.contains(symbol) {
                            vec![Some(symbol), None]
                        } else {
                            vec![Some(symbol)]
                        }
                    })
                    .multi_cartesian_product()
                    .map(|rhs| rhs.into_iter().flatten().collect::<Vec<_>>())
                    .filter(|rhs| !rhs.is_empty() || production.lhs() == start_variable);

                next_productions
                    .extend(variants.map(|rhs| Production::new(production.lhs(), rhs)));
            }

            productions = next_productions;
        }

        let result = Grammar::new(start_variable.clone(), productions).simplify()?;
        self.verify_consistency(result)
    }
}
