//! Context-free grammars and their conversion to Greibach normal form.
//!
//! Grammars are immutable values built with [`GrammarBuilder`] or read with [`parse`]. Every
//! transformation returns a new grammar, and the ones that can break a grammar check the result
//! and report a [`GrammarError`] instead.
//!
//! ```
//! use greibach::parse;
//!
//! let grammar = parse(
//!     "S ::= S S
//!      S ::= ( S )
//!      S ::=",
//! )?;
//! assert!(grammar.has_left_recursion());
//!
//! let gnf = grammar.to_greibach_normal_form()?;
//! assert!(gnf.in_greibach_normal_form());
//! # Ok::<(), greibach::GrammarError>(())
//! ```

pub mod error;
pub mod grammars;
pub mod language;
pub mod ordered_set;

pub use enumflags2::BitFlags;
pub use error::{GrammarError, Result};
pub use grammars::{
    builder::{Derive, GrammarBuilder},
    context_free::Grammar,
    greibach_normal_form::{GnfWord, GreibachNormalFormGrammar},
    options::GrammarOption,
    parser::parse,
    production::Production,
};
pub use language::Symbol;
pub use ordered_set::{OrderedSet, PowerSet};
