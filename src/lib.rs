//! Grammars declared as combinators or as ABNF text, interpreted at run time.
//!
//! See [`parsegen`] for the combinator engine and [`abnf`] for the ABNF
//! front end.

pub use abnf::{self, AbnfExt};
pub use parsegen::{
    self, choice, empty, eoi, eol, lit, lits, pattern, rule, seq, Child, Combinator, Error,
    Grammar, GrammarBuilder, Options, Overrides, ParseError, ParseNode, Parser, Tag,
};
