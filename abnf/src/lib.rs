//! ABNF (RFC 5234) front end for parsegen grammars.
//!
//! ABNF text is parsed with a grammar built from parsegen itself, then each
//! rule definition is compiled into a combinator and registered into a
//! [`GrammarBuilder`] like any hand-written rule.
//!
//! ```
//! use abnf::AbnfExt;
//! use parsegen::Grammar;
//!
//! let mut builder = Grammar::builder();
//! builder
//!     .configure(|o| o.strip_whitespace = false)
//!     .start("greeting")
//!     .abnf(
//!         r#"
//!         greeting = "hello" SP name
//!         name     = 1*ALPHA
//!         "#,
//!     )?;
//! let parser = builder.build()?.into_parser();
//!
//! let tree = parser.parse("Hello world")?;
//! assert_eq!(tree.child("name").unwrap().first().as_str(), "world");
//! # Ok::<(), abnf::Error>(())
//! ```

mod compiler;
mod error;
mod grammar;
mod normalize;
mod values;

use log::debug;
use parsegen::{rule, Combinator, Grammar, GrammarBuilder};

pub use compiler::{compile, Definitions};
pub use error::{Error, Result};
pub use grammar::{abnf_grammar, core_tokens};
pub use normalize::normalize;
pub use values::NumVal;

/// Bulk registration of rules written in ABNF.
pub trait AbnfExt {
    /// Compile `text` and register every rule it defines. The ABNF core
    /// rules (`ALPHA`, `DIGIT`, `CRLF`, ...) are declared as tokens unless
    /// the grammar already has tokens by those names.
    ///
    /// Rule bodies are bound on first use, so the text may refer to rules
    /// defined later in it, or to rules and tokens declared outside it.
    fn abnf(&mut self, text: &str) -> Result<&mut Self>;
}

impl AbnfExt for GrammarBuilder {
    fn abnf(&mut self, text: &str) -> Result<&mut Self> {
        let defs = compile(text)?;
        for (name, token) in core_tokens()? {
            if !self.has_token(name) {
                self.token_combinator(name, token)?;
            }
        }
        for (name, rhs) in defs {
            debug!("registering ABNF rule '{}'", name);
            self.rule(&name, move |g| Ok(resolve(&rhs, g)))?;
        }
        Ok(self)
    }
}

/// Bind the rule-name placeholders of `rhs` within `grammar`: an upper-case
/// name the grammar has a token for becomes that token, anything else a
/// reference to the rule of that name.
pub fn resolve(rhs: &Combinator, grammar: &Grammar) -> Combinator {
    rhs.clone().map_placeholders(&mut |name| {
        let constant = !name.chars().any(char::is_lowercase);
        match grammar.token(name) {
            Ok(token) if constant => token,
            _ => rule(name),
        }
    })
}
