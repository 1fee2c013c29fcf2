use regex::{Regex, RegexBuilder};
use std::fmt::{self, Display};

use crate::{Error, Position, Result};

/// One alternative of a literal: fixed text or a pattern anchored at the
/// current offset.
#[derive(Debug, Clone)]
pub enum Matcher {
    Text(String),
    Pattern {
        source: String,
        sensitive: Regex,
        insensitive: Regex,
    },
}

impl Matcher {
    /// Compile a pattern matcher. The pattern only ever matches starting at
    /// the current offset, never further into the input.
    pub fn pattern(source: &str) -> Result<Self> {
        let anchored = format!("^(?:{})", source);
        let compile = |case_insensitive: bool| {
            RegexBuilder::new(&anchored)
                .case_insensitive(case_insensitive)
                .build()
                .map_err(|e| Error::Pattern {
                    pattern: source.to_owned(),
                    source: e,
                })
        };
        Ok(Matcher::Pattern {
            source: source.to_owned(),
            sensitive: compile(false)?,
            insensitive: compile(true)?,
        })
    }

    /// Try this alternative at the cursor, advancing it on success.
    pub fn match_at<'a>(&self, pos: &mut Position<'a>, case_sensitive: bool) -> Option<&'a str> {
        match self {
            Matcher::Text(s) => pos.match_str(s, case_sensitive),
            Matcher::Pattern {
                sensitive,
                insensitive,
                ..
            } => {
                if case_sensitive {
                    pos.match_pattern(sensitive)
                } else {
                    pos.match_pattern(insensitive)
                }
            }
        }
    }
}

impl From<&str> for Matcher {
    fn from(s: &str) -> Self {
        Matcher::Text(s.to_owned())
    }
}

impl From<String> for Matcher {
    fn from(s: String) -> Self {
        Matcher::Text(s)
    }
}

impl From<char> for Matcher {
    fn from(c: char) -> Self {
        Matcher::Text(c.to_string())
    }
}

impl PartialEq for Matcher {
    fn eq(&self, other: &Matcher) -> bool {
        match (self, other) {
            (Matcher::Text(a), Matcher::Text(b)) => a == b,
            (Matcher::Pattern { source: a, .. }, Matcher::Pattern { source: b, .. }) => a == b,
            _ => false,
        }
    }
}

impl Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Matcher::Text(s) => write!(f, "\"{}\"", escape(s)),
            Matcher::Pattern { source, .. } => write!(f, "/{}/", source),
        }
    }
}

/// Human readable list of alternatives, e.g. `"a", "b" or "c"`.
pub fn describe(matchers: &[Matcher]) -> String {
    match matchers.split_last() {
        None => String::new(),
        Some((last, [])) => last.to_string(),
        Some((last, init)) => {
            let init: Vec<String> = init.iter().map(ToString::to_string).collect();
            format!("{} or {}", init.join(", "), last)
        }
    }
}

/// Escape control characters and quotes for display.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\x0B' => out.push_str("\\v"),
            '\x0C' => out.push_str("\\f"),
            '"' => out.push_str("\\\""),
            c => out.push(c),
        }
    }
    out
}
