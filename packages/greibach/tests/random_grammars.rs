mod common;

use std::collections::{BTreeSet, HashMap};

use common::init_logging;
use greibach::{Grammar, Production, Symbol};
use pretty_assertions::assert_eq;
use rand::{rngs::StdRng, Rng, SeedableRng};

const VARIABLES: [&str; 4] = ["S", "A", "B", "C"];
const TERMINALS: [&str; 2] = ["a", "b"];
const MAX_WORD_LENGTH: usize = 5;
const GRAMMARS: u64 = 300;

/// Small grammar where every variable derives some non-empty terminal word.
fn random_grammar(rng: &mut impl Rng) -> Grammar {
    let variables = &VARIABLES[..rng.gen_range(1..=VARIABLES.len())];
    let mut productions = Vec::new();

    for variable in variables {
        let word = (0..rng.gen_range(1..=2))
            .map(|_| TERMINALS[rng.gen_range(0..TERMINALS.len())])
            .collect::<Vec<_>>();
        productions.push(Production::new(*variable, word));

        for _ in 0..rng.gen_range(0..=3) {
            let rhs = (0..rng.gen_range(0..=3))
                .map(|_| {
                    if rng.gen_bool(0.5) {
                        variables[rng.gen_range(0..variables.len())]
                    } else {
                        TERMINALS[rng.gen_range(0..TERMINALS.len())]
                    }
                })
                .collect::<Vec<_>>();
            productions.push(Production::new(*variable, rhs));
        }
    }

    Grammar::new("S", productions)
}

/// Words of the start variable up to `MAX_WORD_LENGTH`, computed as a least fixpoint.
fn bounded_language(grammar: &Grammar) -> BTreeSet<String> {
    let mut languages = grammar
        .variables()
        .into_iter()
        .map(|variable| (variable, BTreeSet::new()))
        .collect::<HashMap<Symbol, BTreeSet<String>>>();

    loop {
        let mut changed = false;

        for production in grammar.productions() {
            let mut words = BTreeSet::from([String::new()]);

            for symbol in production.rhs() {
                let parts = languages
                    .get(symbol)
                    .cloned()
                    .unwrap_or_else(|| BTreeSet::from([symbol.to_string()]));

                words = words
                    .iter()
                    .flat_map(|word| parts.iter().map(move |part| format!("{word}{part}")))
                    .filter(|word| word.len() <= MAX_WORD_LENGTH)
                    .collect();
            }

            let language = languages.get_mut(production.lhs()).unwrap();
            for word in words {
                changed |= language.insert(word);
            }
        }

        if !changed {
            break;
        }
    }

    languages
        .remove(grammar.start_variable())
        .unwrap_or_default()
}

fn grammars() -> impl Iterator<Item = Grammar> {
    (0..GRAMMARS).map(|seed| random_grammar(&mut StdRng::seed_from_u64(seed)))
}

#[test]
fn structural_properties() {
    for grammar in grammars() {
        assert_eq!(grammar.reversed().reversed(), grammar);

        let simplified = grammar.simplify().unwrap();
        assert_eq!(simplified.simplify().unwrap(), simplified);

        let variables = grammar.variables();
        assert!(variables.is_disjoint(&grammar.terminals()));
        assert_eq!(
            variables.len() + grammar.terminals().len(),
            grammar.symbols().len()
        );
    }
}

#[test]
fn reversal_reverses_words() {
    for grammar in grammars() {
        let expected = bounded_language(&grammar)
            .into_iter()
            .map(|word| word.chars().rev().collect::<String>())
            .collect::<BTreeSet<_>>();

        assert_eq!(bounded_language(&grammar.reversed()), expected, "{grammar}");
    }
}

#[test]
fn epsilon_removal_keeps_the_language() {
    for grammar in grammars() {
        let result = grammar.remove_epsilon_productions().unwrap();
        let start = result.start_variable();

        assert!(result
            .nullable_variables()
            .iter()
            .all(|variable| variable == start));
        assert_eq!(bounded_language(&result), bounded_language(&grammar), "{grammar}");
    }
}

#[test]
fn left_recursion_removal_keeps_the_language() {
    for grammar in grammars() {
        let result = grammar.remove_left_recursion().unwrap();

        assert!(!result.has_left_recursion(), "{grammar}");
        assert_eq!(bounded_language(&result), bounded_language(&grammar), "{grammar}");
    }
}

#[test]
fn greibach_normal_form_keeps_the_language() {
    init_logging();

    for grammar in grammars() {
        let result = grammar.to_greibach_normal_form().unwrap();

        assert!(result.in_greibach_normal_form(), "{grammar}");
        assert!(!result.has_left_recursion());
        assert_eq!(bounded_language(&result), bounded_language(&grammar), "{grammar}");
    }
}
