#![allow(dead_code)]

use greibach::{Grammar, GrammarBuilder, OrderedSet, Production, Symbol};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// `a ::= b c | d e f`, `b ::= a`, `c ::= ε`
pub fn unit_cycle() -> Grammar {
    GrammarBuilder::start("a")
        .derive("a")
        .to(["b", "c"])
        .derive("a")
        .to(["d", "e", "f"])
        .derive("b")
        .to(["a"])
        .derive("c")
        .to_epsilon()
        .build()
}

/// `a ::= ε | b c d`, `b ::= ε`, `c ::= d | ε`
pub fn nullable_prefix() -> Grammar {
    GrammarBuilder::start("a")
        .derive("a")
        .to_epsilon()
        .derive("a")
        .to(["b", "c", "d"])
        .derive("b")
        .to_epsilon()
        .derive("c")
        .to(["d"])
        .derive("c")
        .to_epsilon()
        .build()
}

/// Balanced parentheses, `S ::= S S | ( S ) | ε`
pub fn balanced() -> Grammar {
    GrammarBuilder::start("S")
        .derive("S")
        .to(["S", "S"])
        .derive("S")
        .to(["(", "S", ")"])
        .derive("S")
        .to_epsilon()
        .build()
}

pub fn arithmetic() -> Grammar {
    GrammarBuilder::start("E")
        .derive("E")
        .to(["E", "+", "T"])
        .derive("E")
        .to(["T"])
        .derive("T")
        .to(["T", "*", "F"])
        .derive("T")
        .to(["F"])
        .derive("F")
        .to(["(", "E", ")"])
        .derive("F")
        .to(["x"])
        .build()
}

pub fn indirect() -> Grammar {
    GrammarBuilder::start("A")
        .derive("A")
        .to(["B", "a"])
        .derive("A")
        .to(["a"])
        .derive("B")
        .to(["C", "b"])
        .derive("C")
        .to(["A", "c"])
        .derive("C")
        .to(["c"])
        .derive("Unused")
        .to(["u"])
        .build()
}

/// Nullable variables hidden in front of a left-recursive occurrence.
pub fn hidden_left_recursion() -> Grammar {
    GrammarBuilder::start("S")
        .derive("S")
        .to(["N", "S", "s"])
        .derive("S")
        .to(["t"])
        .derive("N")
        .to(["n"])
        .derive("N")
        .to_epsilon()
        .build()
}

pub fn samples() -> Vec<Grammar> {
    vec![
        unit_cycle(),
        nullable_prefix(),
        balanced(),
        arithmetic(),
        indirect(),
        hidden_left_recursion(),
    ]
}

pub fn symbols(names: &[&str]) -> OrderedSet<Symbol> {
    names.iter().map(|name| Symbol::from(*name)).collect()
}

/// Checks whether a grammar in Greibach normal form derives `word`, one character per terminal.
pub fn derives(grammar: &Grammar, word: &str) -> bool {
    assert!(
        grammar.in_greibach_normal_form(),
        "only grammars in Greibach normal form are supported"
    );

    let word = word
        .chars()
        .map(|c| Symbol::new(c.to_string()))
        .collect::<Vec<_>>();

    derives_from(
        grammar,
        &grammar.terminals(),
        &[grammar.start_variable().clone()],
        &word,
    )
}

fn derives_from(
    grammar: &Grammar,
    terminals: &OrderedSet<Symbol>,
    sentential_form: &[Symbol],
    rest: &[Symbol],
) -> bool {
    let Some((top, others)) = sentential_form.split_first() else {
        return rest.is_empty();
    };

    if rest.is_empty() {
        return sentential_form
            .iter()
            .all(|symbol| grammar.productions().contains(&Production::epsilon(symbol)));
    }

    // Every symbol left over derives at least one terminal.
    if sentential_form.len() > rest.len() {
        return false;
    }

    if terminals.contains(top) {
        return rest[0] == *top && derives_from(grammar, terminals, others, &rest[1..]);
    }

    grammar.productions_of(top).any(|production| {
        let mut next = production.rhs().to_vec();
        next.extend_from_slice(others);
        derives_from(grammar, terminals, &next, rest)
    })
}
