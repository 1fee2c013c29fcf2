//! Parsing expression grammars evaluated at run time.
//!
//! A grammar is a set of named rules whose bodies are trees of
//! [`Combinator`]s. Parsing evaluates the start rule against the input and
//! yields a [`ParseNode`] tree navigable by rule name.
//!
//! ```
//! use parsegen::{pattern, rule, Grammar};
//!
//! let mut builder = Grammar::builder();
//! builder
//!     .start("expr")
//!     .rule("expr", |_| {
//!         Ok(rule("integer").then(rule("operator").then(rule("expr")).maybe()))
//!     })?
//!     .rule("operator", |_| pattern("[+-]"))?
//!     .rule("integer", |_| pattern("[0-9]+"))?;
//! let parser = builder.build()?.into_parser();
//!
//! let tree = parser.parse("53 + 28 - 17")?;
//! assert_eq!(tree.child("integer").unwrap().first().as_str(), "53");
//! # Ok::<(), parsegen::Error>(())
//! ```

mod combinator;
mod error;
mod grammar;
mod matcher;
mod options;
mod position;
mod state;
mod tree;

pub use combinator::{
    choice, empty, eoi, eol, lit, literal, lits, pattern, placeholder, rule, seq, Combinator, Kind,
};
pub use error::{Error, ParseError, Result};
pub use grammar::{Grammar, GrammarBuilder, Parser, Rule, RuleBody};
pub use matcher::{describe, escape, Matcher};
pub use options::{Options, Overrides};
pub use position::Position;
pub use state::State;
pub use tree::{Child, ParseNode, Tag};
