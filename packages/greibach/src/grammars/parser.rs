use std::str::FromStr;

use winnow::{
    combinator::{eof, preceded, repeat, terminated},
    error::{StrContext, StrContextValue},
    prelude::*,
    token::{take_till, take_until, take_while},
};

use crate::{
    error::{GrammarError, Result},
    grammars::{context_free::Grammar, production::Production},
    language::Symbol,
    ordered_set::OrderedSet,
};

const DELIMITER: &str = "::=";

fn whitespace<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    take_while(0.., char::is_whitespace).parse_next(input)
}

fn symbol<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    take_till(1.., char::is_whitespace).parse_next(input)
}

/// `lhs ::= s1 s2 ... sn`, returning the untrimmed left-hand side and the right-hand symbols.
fn production<'s>(input: &mut &'s str) -> ModalResult<(&'s str, Vec<&'s str>)> {
    let lhs = terminated(take_until(0.., DELIMITER), DELIMITER)
        .context(StrContext::Expected(StrContextValue::StringLiteral(DELIMITER)))
        .parse_next(input)?;
    let rhs = repeat(0.., preceded(whitespace, symbol)).parse_next(input)?;
    (whitespace, eof).void().parse_next(input)?;

    Ok((lhs, rhs))
}

/// Parses a grammar written one production per line, `lhs ::= s1 s2 ... sn`.
///
/// Symbols are separated by whitespace and an empty right-hand side is an epsilon production.
/// Blank lines are skipped, and the left-hand side of the first production is the start variable.
pub fn parse(text: &str) -> Result<Grammar> {
    let mut start_variable = None;
    let mut productions = OrderedSet::new();

    for (i, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let error = |message: String| GrammarError::Parse {
            line: i + 1,
            message,
        };

        let (lhs, rhs) = production
            .parse(line)
            .map_err(|e| error(e.inner().to_string()))?;

        let lhs = lhs.trim();
        if lhs.is_empty() {
            return Err(error(format!("missing left-hand side before `{DELIMITER}`")));
        }
        if lhs.contains(char::is_whitespace) {
            return Err(error(format!(
                "left-hand side `{lhs}` is not a single symbol"
            )));
        }

        let lhs = Symbol::from(lhs);
        if start_variable.is_none() {
            start_variable = Some(lhs.clone());
        }
        productions.insert(Production::new(lhs, rhs));
    }

    let start_variable = start_variable.ok_or_else(|| GrammarError::Parse {
        line: text.lines().count() + 1,
        message: "expected at least one production".to_string(),
    })?;

    log::debug!(
        "parsed {} productions with start variable {}",
        productions.len(),
        start_variable
    );

    Ok(Grammar::new(start_variable, productions))
}

impl FromStr for Grammar {
    type Err = GrammarError;

    fn from_str(s: &str) -> Result<Self> {
        parse(s)
    }
}
