//! Walks the parse tree of ABNF text and builds one combinator per rule.

use log::debug;
use std::collections::HashMap;

use parsegen::{choice, empty, lit, pattern, placeholder, seq, Combinator, ParseNode};

use crate::grammar::abnf_grammar;
use crate::normalize::normalize;
use crate::values::{decode_num_val, decode_repeat, to_char, NumVal};
use crate::{Error, Result};

/// Rule definitions compiled from ABNF text, in document order.
///
/// Rule names on the right-hand sides are left as placeholders. They are
/// bound when the definitions are registered into a grammar.
#[derive(Debug, Default)]
pub struct Definitions {
    rules: Vec<(String, Combinator)>,
    index: HashMap<String, usize>,
}

impl Definitions {
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Combinator> {
        self.index.get(name).map(|&idx| &self.rules[idx].1)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|(name, _)| name.as_str())
    }

    /// Bind `rhs` to `name`: `=` defines, `=/` adds alternatives to an
    /// existing definition. A second `=` for a name is a
    /// [`DuplicateRule`](parsegen::Error::DuplicateRule) error rather than a
    /// silent replacement.
    pub fn define(&mut self, name: &str, operator: &str, rhs: Combinator) -> Result<()> {
        match operator {
            "=" => {
                if self.index.contains_key(name) {
                    return Err(parsegen::Error::DuplicateRule(name.to_owned()).into());
                }
                self.index.insert(name.to_owned(), self.rules.len());
                self.rules.push((name.to_owned(), rhs));
            }
            "=/" => {
                let idx = *self
                    .index
                    .get(name)
                    .ok_or_else(|| Error::UndefinedIncrement(name.to_owned()))?;
                let slot = &mut self.rules[idx].1;
                let existing = std::mem::replace(slot, empty());
                *slot = existing.or(rhs);
            }
            other => {
                return Err(Error::InvalidOperator {
                    rule: name.to_owned(),
                    operator: other.to_owned(),
                })
            }
        }
        Ok(())
    }

    fn rule(&mut self, node: &ParseNode) -> Result<()> {
        let name = child(node, "rulename")?.as_str();
        let operator = child(node, "defined_as")?.as_str().trim();
        let elements = child(node, "elements")?;
        let rhs = alternation(child(elements, "alternation")?)?;
        debug!("compiled ABNF rule '{}' ({})", name, operator);
        self.define(name, operator, rhs)
    }
}

impl IntoIterator for Definitions {
    type Item = (String, Combinator);
    type IntoIter = std::vec::IntoIter<(String, Combinator)>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.into_iter()
    }
}

/// Compile ABNF text into rule definitions.
pub fn compile(text: &str) -> Result<Definitions> {
    let normalized = normalize(text);
    let parser = abnf_grammar()?.into_parser();
    let mut tree = parser.parse(&normalized)?;
    tree.delete_rule("c_wsp", true);
    tree.delete_rule("c_nl", true);

    let mut defs = Definitions::default();
    for node in tree.children_named("rule") {
        defs.rule(node)?;
    }
    Ok(defs)
}

fn child<'n, 'a>(node: &'n ParseNode<'a>, name: &str) -> Result<&'n ParseNode<'a>> {
    node.child(name)
        .map(|c| c.first())
        .ok_or_else(|| Error::Malformed(format!("'{}' has no {}", node.tag(), name)))
}

fn alternation(node: &ParseNode) -> Result<Combinator> {
    let mut alternatives = node
        .children_named("concatenation")
        .map(concatenation)
        .filter_map(Result::transpose)
        .collect::<Result<Vec<_>>>()?;
    Ok(match alternatives.len() {
        0 => empty(),
        1 => alternatives.remove(0),
        _ => choice(alternatives),
    })
}

fn concatenation(node: &ParseNode) -> Result<Option<Combinator>> {
    let mut items = node
        .children_named("repetition")
        .map(repetition)
        .collect::<Result<Vec<_>>>()?;
    Ok(match items.len() {
        0 => None,
        1 => items.pop(),
        _ => Some(seq(items)),
    })
}

fn repetition(node: &ParseNode) -> Result<Combinator> {
    let element = element(child(node, "element")?)?;
    match node.child("repeat") {
        Some(repeat) => {
            let (min, max) = decode_repeat(repeat.first().as_str())?;
            Ok(element.repeat(min, max))
        }
        None => Ok(element),
    }
}

fn element(node: &ParseNode) -> Result<Combinator> {
    let inner = node
        .get(0)
        .ok_or_else(|| Error::Malformed("empty element".to_owned()))?;
    match inner.name() {
        Some("rulename") => Ok(placeholder(inner.as_str())),
        Some("group") => alternation(child(inner, "alternation")?),
        Some("option") => Ok(alternation(child(inner, "alternation")?)?.maybe()),
        Some("char_val") => char_val(inner.as_str()),
        Some("num_val") => num_val(inner.as_str()),
        _ => Err(Error::Malformed(format!(
            "unexpected element '{}'",
            inner.tag()
        ))),
    }
}

/// Quoted strings match case-insensitively.
fn char_val(text: &str) -> Result<Combinator> {
    let inner = text
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .ok_or_else(|| Error::Malformed(format!("unquoted string {}", text)))?;
    Ok(lit(inner).case_sensitive(false))
}

fn num_val(text: &str) -> Result<Combinator> {
    match decode_num_val(text)? {
        NumVal::Sequence(values) => {
            let s = values.into_iter().map(to_char).collect::<Result<String>>()?;
            Ok(lit(&s).case_sensitive(true))
        }
        NumVal::Range(lo, hi) => {
            let (lo, hi) = (to_char(lo)?, to_char(hi)?);
            if lo > hi {
                return Err(Error::InvalidValue(format!("empty range {}", text)));
            }
            let class = format!("[\\x{{{:x}}}-\\x{{{:x}}}]", lo as u32, hi as u32);
            Ok(pattern(&class)?.case_sensitive(true))
        }
    }
}
