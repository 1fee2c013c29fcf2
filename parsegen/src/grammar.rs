//! Rule registry and the parser instances that memoize rule bodies.
//!
//! A [`Grammar`] is the structural declaration: options, tokens, and for each
//! rule a deferred body. A [`Parser`] is one instance of a grammar. It builds
//! each rule body the first time evaluation reaches it and keeps it for its
//! own lifetime. Since rule references inside a body are only names, a rule
//! may refer to itself or to rules declared after it without recursing at
//! construction time.

use log::{debug, trace};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::{rule, Combinator, Error, Matcher, Options, Overrides, ParseNode, Result, State, Tag};

/// A deferred rule body, run once per parser instance.
pub type RuleBody = Rc<dyn Fn(&Grammar) -> Result<Combinator>>;

struct RuleDef {
    name: Rc<str>,
    overrides: Overrides,
    body: RuleBody,
}

#[derive(Default)]
pub struct Grammar {
    options: Options,
    rules: Vec<RuleDef>,
    index: HashMap<Rc<str>, usize>,
    tokens: HashMap<String, Combinator>,
    start: Option<Rc<str>>,
}

impl Grammar {
    pub fn builder() -> GrammarBuilder {
        GrammarBuilder {
            grammar: Grammar::default(),
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn start(&self) -> Option<&str> {
        self.start.as_deref()
    }

    /// Rule names in declaration order.
    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| &*r.name)
    }

    pub fn has_rule(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn has_token(&self, name: &str) -> bool {
        self.tokens.contains_key(name)
    }

    /// A copy of the token `name`.
    pub fn token(&self, name: &str) -> Result<Combinator> {
        self.tokens
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UnknownToken(name.to_owned()))
    }

    fn rule_def(&self, name: &str) -> Option<&RuleDef> {
        self.index.get(name).map(|&idx| &self.rules[idx])
    }

    pub fn into_parser(self) -> Parser {
        Parser::new(self)
    }
}

impl fmt::Debug for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Grammar")
            .field("options", &self.options)
            .field("rules", &self.rules.iter().map(|r| &r.name).collect::<Vec<_>>())
            .field("tokens", &self.tokens.keys().collect::<Vec<_>>())
            .field("start", &self.start)
            .finish()
    }
}

/// Declares the rules, tokens and options of a [`Grammar`].
pub struct GrammarBuilder {
    grammar: Grammar,
}

impl GrammarBuilder {
    pub fn options(&mut self, options: Options) -> &mut Self {
        self.grammar.options = options;
        self
    }

    /// Adjust individual grammar-wide options.
    pub fn configure<F: FnOnce(&mut Options)>(&mut self, f: F) -> &mut Self {
        f(&mut self.grammar.options);
        self
    }

    pub fn start(&mut self, name: &str) -> &mut Self {
        self.grammar.start = Some(name.into());
        self
    }

    /// Declare a reusable literal.
    pub fn token<I, M>(&mut self, name: &str, alternatives: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = M>,
        M: Into<Matcher>,
    {
        self.token_combinator(name, crate::lits(alternatives))
    }

    /// Declare a reusable literal from an already built literal combinator,
    /// e.g. one with its own case sensitivity.
    pub fn token_combinator(&mut self, name: &str, literal: Combinator) -> Result<&mut Self> {
        if self.grammar.tokens.contains_key(name) {
            return Err(Error::DuplicateToken(name.to_owned()));
        }
        self.grammar.tokens.insert(name.to_owned(), literal);
        Ok(self)
    }

    pub fn has_token(&self, name: &str) -> bool {
        self.grammar.has_token(name)
    }

    pub fn has_rule(&self, name: &str) -> bool {
        self.grammar.has_rule(name)
    }

    /// Declare a rule whose body is built on first use.
    pub fn rule<F>(&mut self, name: &str, body: F) -> Result<&mut Self>
    where
        F: Fn(&Grammar) -> Result<Combinator> + 'static,
    {
        self.rule_with(name, Overrides::default(), body)
    }

    /// Declare a rule evaluated with `overrides` merged over the options in
    /// effect where it is reached.
    pub fn rule_with<F>(&mut self, name: &str, overrides: Overrides, body: F) -> Result<&mut Self>
    where
        F: Fn(&Grammar) -> Result<Combinator> + 'static,
    {
        if self.grammar.index.contains_key(name) {
            return Err(Error::DuplicateRule(name.to_owned()));
        }
        let name: Rc<str> = name.into();
        self.grammar
            .index
            .insert(name.clone(), self.grammar.rules.len());
        self.grammar.rules.push(RuleDef {
            name,
            overrides,
            body: Rc::new(body),
        });
        Ok(self)
    }

    pub fn build(self) -> Result<Grammar> {
        if let Some(ref start) = self.grammar.start {
            if !self.grammar.has_rule(start) {
                return Err(Error::UnknownRule(start.to_string()));
            }
        }
        Ok(self.grammar)
    }
}

/// A rule body built for one parser instance.
#[derive(Debug)]
pub struct Rule {
    name: Rc<str>,
    overrides: Overrides,
    body: Combinator,
}

impl Rule {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn body(&self) -> &Combinator {
        &self.body
    }

    pub fn overrides(&self) -> &Overrides {
        &self.overrides
    }

    /// Evaluate the body under the rule's overrides. A failing body gives a
    /// failed node named after the rule; only an asserted reference raises.
    pub fn apply<'a>(
        &self,
        state: &State<'a, '_>,
        offset: usize,
        opts: &Options,
        depth: usize,
        assert: bool,
    ) -> Result<ParseNode<'a>> {
        let depth = depth + 1;
        if let Some(max) = opts.max_depth {
            if depth > max {
                return Err(Error::RecursionLimit { depth });
            }
        }
        trace!("rule '{}' at {} (depth {})", self.name, offset, depth);

        state.enter(&self.name, offset, opts)?;
        let rule_opts = self.overrides.apply(opts);
        let tree = self.body.apply(state, offset, &rule_opts, depth);
        state.exit();
        let tree = tree?;
        let tag = Tag::Rule(self.name.clone());
        match tree.end() {
            Some(end) => {
                let matched = tree.matched();
                Ok(ParseNode::new(tag, matched, offset, end, vec![tree]))
            }
            None => {
                if assert {
                    return Err(state.error(offset, format!("Failed to match rule '{}'", self.name)));
                }
                let children = if opts.include_failed { vec![tree] } else { vec![] };
                Ok(ParseNode::failed(tag, offset, children))
            }
        }
    }
}

/// An instance of a grammar with its own rule cache.
///
/// Not meant to be shared between concurrent parses; use one instance per
/// thread.
pub struct Parser {
    grammar: Rc<Grammar>,
    cache: RefCell<HashMap<Rc<str>, Rc<Rule>>>,
}

impl Parser {
    pub fn new(grammar: impl Into<Rc<Grammar>>) -> Self {
        Parser {
            grammar: grammar.into(),
            cache: RefCell::new(HashMap::new()),
        }
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// The rule `name`, building its body on first access.
    pub fn rule(&self, name: &str) -> Result<Rc<Rule>> {
        if let Some(rule) = self.cache.borrow().get(name) {
            return Ok(rule.clone());
        }

        let def = self
            .grammar
            .rule_def(name)
            .ok_or_else(|| Error::UnknownRule(name.to_owned()))?;
        debug!("building body of rule '{}'", name);
        let body = (def.body)(&self.grammar)?;
        let rule = Rc::new(Rule {
            name: def.name.clone(),
            overrides: def.overrides.clone(),
            body,
        });
        self.cache
            .borrow_mut()
            .insert(def.name.clone(), rule.clone());
        Ok(rule)
    }

    /// Parse `input` from the start rule.
    pub fn parse<'a>(&self, input: &'a str) -> Result<ParseNode<'a>> {
        let start = self.grammar.start().ok_or(Error::NoStartRule)?;
        self.parse_rule(start, input)
    }

    /// Parse `input` from the rule `name`. The tree is simplified when the
    /// grammar's options ask for it. Input left over after the match is not
    /// an error; see [`ParseNode::end`].
    pub fn parse_rule<'a>(&self, name: &str, input: &'a str) -> Result<ParseNode<'a>> {
        let mut tree = self.evaluate(name, input)?;
        if tree.is_failed() {
            debug!("rule '{}' did not match", name);
            return Err(Error::NoMatch);
        }
        if self.grammar.options.simplify_parse_tree {
            tree.simplify();
        }
        Ok(tree)
    }

    /// The raw result of evaluating rule `name` from offset 0: never
    /// simplified, and a failed node rather than an error when nothing
    /// matched.
    pub fn evaluate<'a>(&self, name: &str, input: &'a str) -> Result<ParseNode<'a>> {
        let state = State::new(input, self);
        rule(name).apply(&state, 0, &self.grammar.options, 0)
    }
}

impl fmt::Debug for Parser {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Parser")
            .field("grammar", &self.grammar)
            .field("cached", &self.cache.borrow().len())
            .finish()
    }
}
