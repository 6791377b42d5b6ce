use enumflags2::BitFlags;
use greibach::{parse, GrammarBuilder, GrammarOption, GreibachNormalFormGrammar, Result};

fn balanced_parentheses() -> Result<()> {
    let grammar = parse(
        "S ::= S S
         S ::= ( S )
         S ::=",
    )?;
    println!("Grammar:\n{}", grammar.definition());
    println!("Productions:\n{}", grammar.production_table());

    let without_epsilon = grammar.remove_epsilon_productions()?;
    println!("Without ε-productions:\n{}", without_epsilon.definition());

    let without_left_recursion = without_epsilon.remove_left_recursion()?;
    println!(
        "Without left recursion:\n{}",
        without_left_recursion.definition()
    );

    let gnf = grammar.to_greibach_normal_form()?;
    println!("Greibach Normal Form:\n{}", gnf.definition());

    let view = GreibachNormalFormGrammar::try_from(&gnf)?;
    println!(
        "Start symbol {} (erasable: {})",
        view.start_symbol(),
        view.is_start_symbol_erasable()
    );
    for (variable, words) in view.productions() {
        for word in words {
            println!("  {} → {}", variable, word);
        }
    }

    Ok(())
}

fn reversed_grammar() -> Result<()> {
    let grammar = GrammarBuilder::start("a")
        .derive("a")
        .to(["b", "c"])
        .derive("a")
        .to(["d", "e", "f"])
        .derive("b")
        .to(["a"])
        .derive("c")
        .to_epsilon()
        .build();
    println!("Grammar:\n{}", grammar);

    for options in [BitFlags::empty(), BitFlags::from(GrammarOption::Reversed)] {
        let normalized = grammar.normalize(options)?;
        println!("Normalized with {:?}:\n{}", options, normalized);
    }

    Ok(())
}

fn malformed_grammar() {
    let grammar = GrammarBuilder::start("S")
        .derive("S")
        .to(["A", "s"])
        .derive("A")
        .to(["A", "a"])
        .build();

    match grammar.to_greibach_normal_form() {
        Ok(gnf) => println!("Greibach Normal Form:\n{}", gnf),
        Err(e) => log::error!("cannot normalize {}: {}", grammar.start_variable(), e),
    }
}

fn main() {
    env_logger::init();

    if let Err(e) = balanced_parentheses() {
        log::error!("{}", e);
    }
    if let Err(e) = reversed_grammar() {
        log::error!("{}", e);
    }
    malformed_grammar();
}
