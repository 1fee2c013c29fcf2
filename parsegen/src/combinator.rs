use std::borrow::Cow;
use std::rc::Rc;

use crate::matcher::{describe, Matcher};
use crate::{Error, Options, ParseNode, Result, State, Tag};

/// The kind of a combinator node.
#[derive(Debug, Clone, PartialEq)]
pub enum Kind {
    /// Ordered alternatives; an empty list always matches, zero-width.
    Literal {
        matchers: Vec<Matcher>,
        case_sensitive: Option<bool>,
    },
    Sequence,
    Choice,
    /// `max` of `None` is unbounded.
    Repeat {
        min: usize,
        max: Option<usize>,
    },
    Optional,
    EndOfLine,
    EndOfInput,
    /// A named rule, resolved through the parser's registry when reached.
    Rule(Rc<str>),
    /// An unresolved rule-name reference. Must be replaced through
    /// [`Combinator::map_placeholders`] before evaluation.
    Placeholder(Rc<str>),
}

/// A matching primitive and its children.
#[derive(Debug, Clone, PartialEq)]
pub struct Combinator {
    kind: Kind,
    children: Vec<Combinator>,
    assert: bool,
}

/// Match any of `alternatives` literally.
pub fn lits<I, M>(alternatives: I) -> Combinator
where
    I: IntoIterator<Item = M>,
    M: Into<Matcher>,
{
    literal(alternatives.into_iter().map(Into::into).collect())
}

pub fn lit(text: &str) -> Combinator {
    literal(vec![Matcher::from(text)])
}

/// Match a regular expression anchored at the current offset.
pub fn pattern(source: &str) -> Result<Combinator> {
    Ok(literal(vec![Matcher::pattern(source)?]))
}

pub fn literal(matchers: Vec<Matcher>) -> Combinator {
    Combinator::new(
        Kind::Literal {
            matchers,
            case_sensitive: None,
        },
        vec![],
    )
}

/// A literal that always matches the empty string.
pub fn empty() -> Combinator {
    literal(vec![])
}

pub fn seq<I: IntoIterator<Item = Combinator>>(children: I) -> Combinator {
    Combinator::new(Kind::Sequence, children.into_iter().collect())
}

pub fn choice<I: IntoIterator<Item = Combinator>>(children: I) -> Combinator {
    Combinator::new(Kind::Choice, children.into_iter().collect())
}

/// A reference to the rule `name`.
pub fn rule(name: &str) -> Combinator {
    Combinator::new(Kind::Rule(name.into()), vec![])
}

pub fn placeholder(name: &str) -> Combinator {
    Combinator::new(Kind::Placeholder(name.into()), vec![])
}

pub fn eol() -> Combinator {
    Combinator::new(Kind::EndOfLine, vec![])
}

pub fn eoi() -> Combinator {
    Combinator::new(Kind::EndOfInput, vec![])
}

impl Combinator {
    fn new(kind: Kind, children: Vec<Combinator>) -> Self {
        Combinator {
            kind,
            children,
            assert: false,
        }
    }

    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    pub fn children(&self) -> &[Combinator] {
        &self.children
    }

    pub fn is_asserted(&self) -> bool {
        self.assert
    }

    /// Tag of the nodes this combinator produces.
    pub fn tag(&self) -> Tag {
        match &self.kind {
            Kind::Literal { .. } => Tag::Literal,
            Kind::Sequence => Tag::Sequence,
            Kind::Choice => Tag::Choice,
            Kind::Repeat { .. } => Tag::Repeat,
            Kind::Optional => Tag::Optional,
            Kind::EndOfLine => Tag::EndOfLine,
            Kind::EndOfInput => Tag::EndOfInput,
            Kind::Rule(name) | Kind::Placeholder(name) => Tag::Rule(name.clone()),
        }
    }

    /// Short description used in error messages.
    pub fn id(&self) -> String {
        match &self.kind {
            Kind::Literal { matchers, .. } if !matchers.is_empty() => describe(matchers),
            _ => self.tag().to_string(),
        }
    }

    /// Fail hard instead of backtracking when this node doesn't match.
    pub fn assert(mut self) -> Self {
        self.assert = true;
        self
    }

    /// Sequence `self` then `other`, extending an existing sequence.
    pub fn then(self, other: Combinator) -> Self {
        let mut children = self.flatten(&Kind::Sequence);
        children.extend(other.flatten(&Kind::Sequence));
        seq(children)
    }

    /// Ordered choice of `self` then `other`, extending an existing choice.
    pub fn or(self, other: Combinator) -> Self {
        let mut children = self.flatten(&Kind::Choice);
        children.extend(other.flatten(&Kind::Choice));
        choice(children)
    }

    fn flatten(self, kind: &Kind) -> Vec<Combinator> {
        if self.kind == *kind && !self.assert {
            self.children
        } else {
            vec![self]
        }
    }

    /// Greedy repetition; `max` of `None` is unbounded.
    pub fn repeat(self, min: usize, max: Option<usize>) -> Self {
        Combinator::new(Kind::Repeat { min, max }, vec![self])
    }

    pub fn many(self) -> Self {
        self.repeat(0, None)
    }

    pub fn many1(self) -> Self {
        self.repeat(1, None)
    }

    pub fn times(self, n: usize) -> Self {
        self.repeat(n, Some(n))
    }

    pub fn maybe(self) -> Self {
        Combinator::new(Kind::Optional, vec![self])
    }

    /// Override the grammar's case sensitivity for this literal. No effect
    /// on other kinds.
    pub fn case_sensitive(mut self, value: bool) -> Self {
        if let Kind::Literal {
            ref mut case_sensitive,
            ..
        } = self.kind
        {
            *case_sensitive = Some(value);
        }
        self
    }

    /// Replace every placeholder in the tree with `f(name)`. An asserted
    /// placeholder yields an asserted replacement.
    pub fn map_placeholders<F>(self, f: &mut F) -> Self
    where
        F: FnMut(&str) -> Combinator,
    {
        match self.kind {
            Kind::Placeholder(ref name) => {
                let mut resolved = f(&**name);
                resolved.assert |= self.assert;
                resolved
            }
            _ => Combinator {
                children: self
                    .children
                    .into_iter()
                    .map(|c| c.map_placeholders(f))
                    .collect(),
                ..self
            },
        }
    }

    /// Evaluate this combinator on its own from the start of `input`. Rule
    /// references can't be resolved here.
    pub fn parse<'a>(&self, input: &'a str, opts: &Options) -> Result<ParseNode<'a>> {
        let parser = crate::Grammar::default().into_parser();
        let state = State::new(input, &parser);
        self.apply(&state, 0, opts, 0)
    }

    /// Match at `offset`. A mismatch yields a failed node; only an asserted
    /// node turns it into an error. `depth` counts the rules being evaluated
    /// around this node.
    pub fn apply<'a>(
        &self,
        state: &State<'a, '_>,
        offset: usize,
        opts: &Options,
        depth: usize,
    ) -> Result<ParseNode<'a>> {
        match &self.kind {
            Kind::Literal {
                matchers,
                case_sensitive,
            } => self.apply_literal(state, offset, opts, matchers, *case_sensitive),
            Kind::Sequence => self.apply_sequence(state, offset, opts, depth),
            Kind::Choice => self.apply_choice(state, offset, opts, depth),
            Kind::Repeat { min, max } => self.apply_repeat(state, offset, opts, depth, *min, *max),
            Kind::Optional => self.apply_optional(state, offset, opts, depth),
            Kind::EndOfLine => self.apply_eol(state, offset, opts),
            Kind::EndOfInput => self.apply_eoi(state, offset, opts),
            Kind::Rule(name) => {
                let rule = state.parser().rule(name)?;
                rule.apply(state, offset, opts, depth, self.assert)
            }
            Kind::Placeholder(name) => Err(Error::Unresolved(name.to_string())),
        }
    }

    fn apply_literal<'a>(
        &self,
        state: &State<'a, '_>,
        offset: usize,
        opts: &Options,
        matchers: &[Matcher],
        case_sensitive: Option<bool>,
    ) -> Result<ParseNode<'a>> {
        let mut pos = state.cursor(offset);
        pos.skip_whitespace(opts);
        let start = pos.idx;
        if matchers.is_empty() {
            return Ok(ParseNode::new(Tag::Literal, Cow::Borrowed(""), start, start, vec![]));
        }

        let case_sensitive = case_sensitive.unwrap_or(opts.case_sensitive);
        for m in matchers {
            let mut attempt = pos.clone();
            if let Some(s) = m.match_at(&mut attempt, case_sensitive) {
                return Ok(ParseNode::new(
                    Tag::Literal,
                    Cow::Borrowed(s),
                    start,
                    attempt.idx,
                    vec![],
                ));
            }
        }

        if self.assert {
            return Err(state.error(start, format!("Expected {}", describe(matchers))));
        }
        Ok(ParseNode::failed(Tag::Literal, start, vec![]))
    }

    fn apply_sequence<'a>(
        &self,
        state: &State<'a, '_>,
        offset: usize,
        opts: &Options,
        depth: usize,
    ) -> Result<ParseNode<'a>> {
        let mut pos = offset;
        let mut matches = Vec::with_capacity(self.children.len());
        for child in &self.children {
            pos = state.skip_whitespace(pos, opts);
            let tree = child.apply(state, pos, opts, depth)?;
            match tree.end() {
                Some(end) => {
                    pos = end;
                    matches.push(tree);
                }
                None => {
                    if self.assert {
                        return Err(state.error(
                            pos,
                            format!("Failed to match {} in sequence", child.id()),
                        ));
                    }
                    if opts.include_failed {
                        matches.push(tree);
                    } else {
                        matches.clear();
                    }
                    return Ok(ParseNode::failed(Tag::Sequence, offset, matches));
                }
            }
        }

        let matched = state.concat(offset, pos, &matches);
        Ok(ParseNode::new(Tag::Sequence, matched, offset, pos, matches))
    }

    fn apply_choice<'a>(
        &self,
        state: &State<'a, '_>,
        offset: usize,
        opts: &Options,
        depth: usize,
    ) -> Result<ParseNode<'a>> {
        let pos = state.skip_whitespace(offset, opts);
        let mut attempts = Vec::new();
        for child in &self.children {
            let tree = child.apply(state, pos, opts, depth)?;
            if let Some(end) = tree.end() {
                let matched = tree.matched();
                let children = if opts.include_failed {
                    attempts.push(tree);
                    attempts
                } else {
                    vec![tree]
                };
                return Ok(ParseNode::new(Tag::Choice, matched, offset, end, children));
            }
            if opts.include_failed {
                attempts.push(tree);
            }
        }

        if self.assert {
            return Err(state.error(pos, "Choice found no matches"));
        }
        Ok(ParseNode::failed(Tag::Choice, offset, attempts))
    }

    fn apply_repeat<'a>(
        &self,
        state: &State<'a, '_>,
        offset: usize,
        opts: &Options,
        depth: usize,
        min: usize,
        max: Option<usize>,
    ) -> Result<ParseNode<'a>> {
        let child = match self.children.first() {
            Some(child) => child,
            None => return Ok(ParseNode::new(Tag::Repeat, Cow::Borrowed(""), offset, offset, vec![])),
        };

        let mut pos = offset;
        let mut matches = Vec::new();
        let mut last_failed = None;
        loop {
            let at = state.skip_whitespace(pos, opts);
            let tree = child.apply(state, at, opts, depth)?;
            match tree.end() {
                Some(end) => {
                    matches.push(tree);
                    pos = end;
                    // A zero-width match would repeat forever.
                    if end == at {
                        break;
                    }
                }
                None => {
                    last_failed = Some(tree);
                    break;
                }
            }
        }

        let count = matches.len();
        let too_few = count < min;
        let too_many = max.map_or(false, |max| count > max);
        if too_few || too_many {
            if self.assert {
                let message = if too_few {
                    "Not enough matches for repeated term"
                } else {
                    "Too many matches for repeated term"
                };
                return Err(state.error(pos, message));
            }
            if opts.include_failed {
                matches.extend(last_failed);
            } else {
                matches.clear();
            }
            return Ok(ParseNode::failed(Tag::Repeat, offset, matches));
        }

        let matched = state.concat(offset, pos, &matches);
        if opts.include_failed {
            matches.extend(last_failed);
        }
        Ok(ParseNode::new(Tag::Repeat, matched, offset, pos, matches))
    }

    fn apply_optional<'a>(
        &self,
        state: &State<'a, '_>,
        offset: usize,
        opts: &Options,
        depth: usize,
    ) -> Result<ParseNode<'a>> {
        let child = match self.children.first() {
            Some(child) => child,
            None => return Ok(ParseNode::new(Tag::Optional, Cow::Borrowed(""), offset, offset, vec![])),
        };

        let tree = child.apply(state, offset, opts, depth)?;
        match tree.end() {
            Some(end) => {
                let matched = tree.matched();
                Ok(ParseNode::new(Tag::Optional, matched, offset, end, vec![tree]))
            }
            None => {
                let children = if opts.include_failed { vec![tree] } else { vec![] };
                Ok(ParseNode::new(Tag::Optional, Cow::Borrowed(""), offset, offset, children))
            }
        }
    }

    fn apply_eol<'a>(
        &self,
        state: &State<'a, '_>,
        offset: usize,
        opts: &Options,
    ) -> Result<ParseNode<'a>> {
        let mut pos = state.cursor(offset);
        let newline = pos
            .match_str("\n", true)
            .or_else(|| pos.match_str("\r\n", true));
        if let Some(s) = newline {
            return Ok(ParseNode::new(Tag::EndOfLine, Cow::Borrowed(s), offset, pos.idx, vec![]));
        }

        pos.skip_whitespace(opts);
        if pos.is_at_end() {
            return Ok(ParseNode::new(Tag::EndOfLine, Cow::Borrowed(""), offset, pos.idx, vec![]));
        }

        if self.assert {
            return Err(state.error(
                offset,
                format!("Expected end of line but encountered {}", state.describe_at(offset)),
            ));
        }
        Ok(ParseNode::failed(Tag::EndOfLine, offset, vec![]))
    }

    fn apply_eoi<'a>(
        &self,
        state: &State<'a, '_>,
        offset: usize,
        opts: &Options,
    ) -> Result<ParseNode<'a>> {
        let pos = state.skip_whitespace(offset, opts);
        if pos >= state.input().len() {
            return Ok(ParseNode::new(Tag::EndOfInput, Cow::Borrowed(""), offset, pos, vec![]));
        }

        if self.assert {
            return Err(state.error(
                pos,
                format!("Expected end of input but encountered {}", state.describe_at(pos)),
            ));
        }
        Ok(ParseNode::failed(Tag::EndOfInput, offset, vec![]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> Options {
        Options::default()
    }

    struct TestCase {
        input: &'static str,
        // Some is the expected end offset, None a failed match.
        end: Option<usize>,
    }

    fn assert_test_cases(c: &Combinator, opts: &Options, tests: Vec<TestCase>) {
        for t in tests {
            let node = c.parse(t.input, opts).unwrap();
            assert_eq!(node.end(), t.end, "input: {:?}, node: {:?}", t.input, node);
        }
    }

    #[test]
    fn literal_alternatives_in_order() {
        let c = lits(vec!["a", "ab"]);
        let node = c.parse("abc", &opts()).unwrap();
        assert_eq!(node.as_str(), "a");
        assert_eq!(node.end(), Some(1));
    }

    #[test]
    fn literal_skips_whitespace() {
        let c = lit("x");
        assert_test_cases(
            &c,
            &opts(),
            vec![
                TestCase { input: "x", end: Some(1) },
                TestCase { input: "  x", end: Some(3) },
                TestCase { input: "y", end: None },
                TestCase { input: "", end: None },
            ],
        );

        let strict = Options {
            strip_whitespace: false,
            ..opts()
        };
        assert_test_cases(&c, &strict, vec![TestCase { input: " x", end: None }]);
    }

    #[test]
    fn literal_case_sensitivity() {
        let insensitive = Options {
            case_sensitive: false,
            ..opts()
        };
        let node = lit("true").parse("TRUE", &insensitive).unwrap();
        assert_eq!(node.as_str(), "TRUE");
        assert_eq!(node.end(), Some(4));

        assert!(lit("true").parse("TRUE", &opts()).unwrap().is_failed());
        // Node level wins over the options.
        let c = lit("true").case_sensitive(false);
        assert_eq!(c.parse("True", &opts()).unwrap().end(), Some(4));
        let c = lit("true").case_sensitive(true);
        assert!(c.parse("True", &insensitive).unwrap().is_failed());
    }

    #[test]
    fn literal_pattern_is_prefix_anchored() {
        let c = pattern("[0-9]+").unwrap();
        assert_test_cases(
            &c,
            &opts(),
            vec![
                TestCase { input: "123abc", end: Some(3) },
                TestCase { input: "abc123", end: None },
            ],
        );
    }

    #[test]
    fn empty_literal_always_matches() {
        let node = empty().parse("abc", &opts()).unwrap();
        assert_eq!(node.end(), Some(0));
        assert_eq!(node.as_str(), "");
    }

    #[test]
    fn asserted_literal_raises() {
        let err = lit("}").assert().parse("{ 1 ", &opts()).unwrap_err();
        match err {
            Error::Parse(e) => {
                assert_eq!(e.offset, 0);
                assert_eq!(e.message, "Expected \"}\"");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn sequence_joins_children() {
        let c = seq(vec![lit("a"), lit("b"), lit("c")]);
        let node = c.parse("a b  c", &opts()).unwrap();
        assert_eq!(node.as_str(), "abc");
        assert_eq!(node.end(), Some(6));
        assert_eq!(node.children().len(), 3);

        let node = c.parse("abc", &opts()).unwrap();
        assert_eq!(node.as_str(), "abc");

        let node = c.parse("a b d", &opts()).unwrap();
        assert!(node.is_failed());
        assert!(node.children().is_empty());
    }

    #[test]
    fn asserted_sequence_names_failing_child() {
        let err = seq(vec![lit("a"), lit("b")])
            .assert()
            .parse("ac", &opts())
            .unwrap_err();
        assert_eq!(err.to_string(), "Failed to match \"b\" in sequence at 1.");
    }

    #[test]
    fn choice_prefers_first_alternative() {
        let c = lit("a").or(lit("ab"));
        let node = c.parse("ab", &opts()).unwrap();
        assert_eq!(node.as_str(), "a");

        let c = lit("ab").or(lit("a"));
        let node = c.parse("ab", &opts()).unwrap();
        assert_eq!(node.as_str(), "ab");

        assert!(c.parse("b", &opts()).unwrap().is_failed());
    }

    #[test]
    fn choice_records_attempts_when_debugging() {
        let c = choice(vec![lit("x"), lit("y"), lit("a")]);
        let node = c.parse("a", &Options::debug()).unwrap();
        assert_eq!(node.children().len(), 3);
        assert!(node.children()[0].is_failed());
        assert!(node.children()[1].is_failed());
        assert_eq!(node.as_str(), "a");

        let node = c.parse("a", &opts()).unwrap();
        assert_eq!(node.children().len(), 1);
    }

    #[test]
    fn then_and_or_flatten() {
        let c = lit("a").then(lit("b")).then(lit("c"));
        assert_eq!(c.kind(), &Kind::Sequence);
        assert_eq!(c.children().len(), 3);

        let c = lit("a").or(lit("b")).or(lit("c"));
        assert_eq!(c.kind(), &Kind::Choice);
        assert_eq!(c.children().len(), 3);

        // Asserted groups stay intact.
        let c = lit("a").then(lit("b")).assert().then(lit("c"));
        assert_eq!(c.children().len(), 2);
    }

    #[test]
    fn repeat_bounds() {
        let c = lit("a").repeat(2, Some(3));
        assert_test_cases(
            &c,
            &opts(),
            vec![
                TestCase { input: "a", end: None },
                TestCase { input: "aa", end: Some(2) },
                TestCase { input: "a a a", end: Some(5) },
                TestCase { input: "aaaa", end: None },
            ],
        );

        let c = lit("a").many();
        assert_test_cases(
            &c,
            &opts(),
            vec![
                TestCase { input: "", end: Some(0) },
                TestCase { input: "b", end: Some(0) },
                TestCase { input: "aaab", end: Some(3) },
            ],
        );
    }

    #[test]
    fn repeat_does_not_consume_trailing_whitespace() {
        let node = lit("a").many1().parse("a a  ", &opts()).unwrap();
        assert_eq!(node.end(), Some(3));
        assert_eq!(node.as_str(), "aa");
    }

    #[test]
    fn repeat_stops_on_zero_width_match() {
        let node = empty().many().parse("abc", &opts()).unwrap();
        assert_eq!(node.end(), Some(0));
        assert_eq!(node.children().len(), 1);
    }

    #[test]
    fn asserted_repeat_messages() {
        let c = lit("a").repeat(2, Some(2)).assert();
        let err = c.parse("a", &opts()).unwrap_err();
        assert_eq!(err.to_string(), "Not enough matches for repeated term at 1.");
        let err = c.parse("aaa", &opts()).unwrap_err();
        assert_eq!(err.to_string(), "Too many matches for repeated term at 3.");
    }

    #[test]
    fn optional_never_fails() {
        let c = lit("a").maybe();
        let node = c.parse("b", &opts()).unwrap();
        assert_eq!(node.end(), Some(0));
        assert_eq!(node.as_str(), "");

        let node = c.parse("a", &opts()).unwrap();
        assert_eq!(node.end(), Some(1));
        assert_eq!(node.as_str(), "a");
    }

    #[test]
    fn end_of_line() {
        let strict = Options {
            strip_whitespace: false,
            ..opts()
        };
        assert_test_cases(
            &eol(),
            &strict,
            vec![
                TestCase { input: "\nx", end: Some(1) },
                TestCase { input: "\r\nx", end: Some(2) },
                TestCase { input: "", end: Some(0) },
                TestCase { input: "x", end: None },
                TestCase { input: " \n", end: None },
            ],
        );
        // Trailing whitespace before the end of input counts as end of line.
        assert_test_cases(&eol(), &opts(), vec![TestCase { input: "  ", end: Some(2) }]);
    }

    #[test]
    fn end_of_input() {
        assert_test_cases(
            &eoi(),
            &opts(),
            vec![
                TestCase { input: "", end: Some(0) },
                TestCase { input: " \t", end: Some(2) },
                TestCase { input: " x", end: None },
            ],
        );
        let err = eoi().assert().parse(" x", &opts()).unwrap_err();
        assert_eq!(err.to_string(), "Expected end of input but encountered 'x' at 1.");
    }

    #[test]
    fn rule_reference_without_grammar() {
        let err = rule("missing").parse("x", &opts()).unwrap_err();
        assert!(matches!(err, Error::UnknownRule(ref name) if name == "missing"));
    }

    #[test]
    fn placeholders() {
        let c = seq(vec![placeholder("a"), lit("x"), placeholder("b").assert()]);
        assert!(matches!(
            c.parse("", &opts()).unwrap_err(),
            Error::Unresolved(_)
        ));

        let resolved = c.map_placeholders(&mut |name| lit(name));
        assert_eq!(resolved.children()[0], lit("a"));
        assert!(resolved.children()[2].is_asserted());
        assert_eq!(resolved.parse("axb", &opts()).unwrap().end(), Some(3));
    }

    struct DebugCase {
        input: &'static str,
        end: Option<usize>,
        // Children kept, the last of which is the failed attempt.
        children: usize,
    }

    fn assert_debug_cases(c: &Combinator, tests: Vec<DebugCase>) {
        for t in tests {
            let node = c.parse(t.input, &Options::debug()).unwrap();
            assert_eq!(node.end(), t.end, "input: {:?}, node: {:?}", t.input, node);
            assert_eq!(node.children().len(), t.children, "input: {:?}", t.input);
            let last = node.children().last().unwrap();
            assert!(last.is_failed(), "input: {:?}, last: {:?}", t.input, last);
        }
    }

    #[test]
    fn failed_sequence_keeps_prefix_when_debugging() {
        let c = seq(vec![lit("a"), lit("b"), lit("c")]);
        assert_debug_cases(
            &c,
            vec![
                DebugCase { input: "a b d", end: None, children: 3 },
                DebugCase { input: "x", end: None, children: 1 },
            ],
        );
        let node = c.parse("a b d", &Options::debug()).unwrap();
        assert_eq!(node.children()[0].as_str(), "a");
        assert_eq!(node.children()[1].as_str(), "b");
    }

    #[test]
    fn repeat_keeps_last_attempt_when_debugging() {
        assert_debug_cases(
            &lit("a").many(),
            vec![
                DebugCase { input: "aab", end: Some(2), children: 3 },
                DebugCase { input: "", end: Some(0), children: 1 },
            ],
        );
        assert_debug_cases(
            &lit("a").repeat(3, None),
            vec![DebugCase { input: "aa", end: None, children: 3 }],
        );
        assert_debug_cases(
            &lit("a").repeat(0, Some(1)),
            vec![DebugCase { input: "aa", end: None, children: 3 }],
        );
    }

    #[test]
    fn optional_keeps_failed_child_when_debugging() {
        assert_debug_cases(
            &lit("a").maybe(),
            vec![DebugCase { input: "b", end: Some(0), children: 1 }],
        );
        let node = lit("a").maybe().parse("b", &opts()).unwrap();
        assert!(node.children().is_empty());
    }
}
