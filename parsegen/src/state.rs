use std::borrow::Cow;
use std::cell::RefCell;
use std::rc::Rc;

use crate::{Error, Options, ParseError, ParseNode, Parser, Position};

/// A rule evaluation in progress.
#[derive(Debug)]
struct Frame {
    rule: Rc<str>,
    offset: usize,
    opts: Options,
}

/// Evaluation state shared by every `apply` call of one parse: the input,
/// the parser instance whose registry resolves rule references, and the
/// stack of rules currently being evaluated.
#[derive(Debug)]
pub struct State<'a, 'p> {
    input: &'a str,
    parser: &'p Parser,
    active: RefCell<Vec<Frame>>,
}

impl<'a, 'p> State<'a, 'p> {
    pub fn new(input: &'a str, parser: &'p Parser) -> Self {
        State {
            input,
            parser,
            active: RefCell::new(Vec::new()),
        }
    }

    /// Record entry into `rule` at `offset` under `opts`.
    ///
    /// Entering a rule that is already being evaluated at the same offset
    /// under the same options can only recurse forever, so that is reported
    /// as [`Error::LeftRecursion`]. Offsets never decrease towards the top of
    /// the stack, so only the frames at `offset` need to be looked at.
    pub fn enter(&self, rule: &Rc<str>, offset: usize, opts: &Options) -> Result<(), Error> {
        let mut active = self.active.borrow_mut();
        let cycle = active
            .iter()
            .rev()
            .take_while(|f| f.offset == offset)
            .any(|f| f.rule == *rule && f.opts == *opts);
        if cycle {
            return Err(Error::LeftRecursion {
                rule: rule.to_string(),
                offset,
            });
        }
        active.push(Frame {
            rule: rule.clone(),
            offset,
            opts: opts.clone(),
        });
        Ok(())
    }

    /// Pop the frame pushed by the matching [`State::enter`].
    pub fn exit(&self) {
        self.active.borrow_mut().pop();
    }

    pub fn input(&self) -> &'a str {
        self.input
    }

    pub fn parser(&self) -> &'p Parser {
        self.parser
    }

    pub fn cursor(&self, offset: usize) -> Position<'a> {
        Position::new(self.input, offset)
    }

    /// Offset after any whitespace at `offset` that `opts` says to skip.
    pub fn skip_whitespace(&self, offset: usize, opts: &Options) -> usize {
        let mut pos = self.cursor(offset);
        pos.skip_whitespace(opts);
        pos.idx
    }

    /// Matched text of a node spanning `start..end` made of `children`.
    ///
    /// Borrows from the input when nothing was skipped between the children,
    /// otherwise joins their texts.
    pub fn concat(&self, start: usize, end: usize, children: &[ParseNode<'a>]) -> Cow<'a, str> {
        if let [only] = children {
            return only.matched();
        }
        let len: usize = children.iter().map(|c| c.as_str().len()).sum();
        match self.input.get(start..end) {
            Some(span) if span.len() == len => Cow::Borrowed(span),
            _ => Cow::Owned(children.iter().map(ParseNode::as_str).collect()),
        }
    }

    /// The character at `offset` for error messages.
    pub fn describe_at(&self, offset: usize) -> String {
        match self.cursor(offset).rest().chars().next() {
            Some(c) => format!("'{}'", c.escape_default()),
            None => "end of input".to_owned(),
        }
    }

    pub fn error(&self, offset: usize, message: impl Into<String>) -> Error {
        Error::Parse(ParseError::new(offset, message, self.input))
    }
}
