use std::borrow::Cow;
use std::fmt::{self, Display};
use std::ops::Index;
use std::rc::Rc;

/// Identity of a parse node: a user rule name or the structural kind of the
/// combinator that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Tag {
    Rule(Rc<str>),
    Sequence,
    Choice,
    Repeat,
    Optional,
    Literal,
    EndOfLine,
    EndOfInput,
}

impl Tag {
    /// Bookkeeping wrappers removed by [`ParseNode::simplify`].
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Tag::Sequence | Tag::Choice | Tag::Repeat | Tag::Optional
        )
    }

    pub fn rule_name(&self) -> Option<&str> {
        match self {
            Tag::Rule(name) => Some(name),
            _ => None,
        }
    }
}

impl From<&str> for Tag {
    fn from(name: &str) -> Self {
        Tag::Rule(name.into())
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Tag::Rule(name) => write!(f, "{}", name),
            Tag::Sequence => write!(f, "sequence"),
            Tag::Choice => write!(f, "choice"),
            Tag::Repeat => write!(f, "repeat"),
            Tag::Optional => write!(f, "optional"),
            Tag::Literal => write!(f, "literal"),
            Tag::EndOfLine => write!(f, "eol"),
            Tag::EndOfInput => write!(f, "eoi"),
        }
    }
}

/// A node of the parse tree.
///
/// Ownership runs strictly from parent to child. A failed node has no end
/// offset and, unless failed attempts are being kept, no children.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseNode<'a> {
    tag: Tag,
    matched: Cow<'a, str>,
    offset: usize,
    end: Option<usize>,
    children: Vec<ParseNode<'a>>,
}

impl<'a> ParseNode<'a> {
    pub(crate) fn new(
        tag: Tag,
        matched: Cow<'a, str>,
        offset: usize,
        end: usize,
        children: Vec<ParseNode<'a>>,
    ) -> Self {
        ParseNode {
            tag,
            matched,
            offset,
            end: Some(end),
            children,
        }
    }

    pub(crate) fn failed(tag: Tag, offset: usize, children: Vec<ParseNode<'a>>) -> Self {
        ParseNode {
            tag,
            matched: Cow::Borrowed(""),
            offset,
            end: None,
            children,
        }
    }

    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    /// The rule name, if this node was produced by a rule.
    pub fn name(&self) -> Option<&str> {
        self.tag.rule_name()
    }

    /// The matched text. Whitespace skipped between elements is not part of
    /// it.
    pub fn as_str(&self) -> &str {
        &self.matched
    }

    /// Offset at which evaluation of this node began.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Offset just past the match, `None` if the node failed.
    pub fn end(&self) -> Option<usize> {
        self.end
    }

    pub fn is_failed(&self) -> bool {
        self.end.is_none()
    }

    pub(crate) fn matched(&self) -> Cow<'a, str> {
        self.matched.clone()
    }

    pub fn children(&self) -> &[ParseNode<'a>] {
        &self.children
    }

    pub fn into_children(self) -> Vec<ParseNode<'a>> {
        self.children
    }

    pub fn get(&self, idx: usize) -> Option<&ParseNode<'a>> {
        self.children.get(idx)
    }

    /// Direct children produced by the rule `name`, in order.
    pub fn children_named<'n>(
        &'n self,
        name: &'n str,
    ) -> impl Iterator<Item = &'n ParseNode<'a>> + 'n {
        self.children
            .iter()
            .filter(move |c| c.name() == Some(name))
    }

    pub fn has_child(&self, name: &str) -> bool {
        self.children.iter().any(|c| c.name() == Some(name))
    }

    /// Look up direct children by rule name: nothing, the single matching
    /// child, or every matching child in order.
    pub fn child(&self, name: &str) -> Option<Child<'_, 'a>> {
        let mut found: Vec<&ParseNode<'a>> = self
            .children
            .iter()
            .filter(|c| c.name() == Some(name))
            .collect();
        match found.len() {
            0 => None,
            1 => found.pop().map(Child::One),
            _ => Some(Child::Many(found)),
        }
    }

    /// Remove every direct child carrying `tag`, and with `recursive` every
    /// such descendant.
    pub fn delete_rule(&mut self, tag: impl Into<Tag>, recursive: bool) {
        let tag = tag.into();
        self.delete(&tag, recursive);
    }

    fn delete(&mut self, tag: &Tag, recursive: bool) {
        self.children.retain(|c| c.tag != *tag);
        if recursive {
            for c in &mut self.children {
                c.delete(tag, true);
            }
        }
    }

    /// Splice structural wrapper nodes into their parents until only rule
    /// and literal nodes remain. A node left with a single literal child
    /// takes that literal's text.
    pub fn simplify(&mut self) -> &mut Self {
        let mut children = std::mem::take(&mut self.children);
        loop {
            let mut spliced = false;
            let mut next = Vec::with_capacity(children.len());
            for child in children {
                if child.tag.is_structural() {
                    spliced = true;
                    next.extend(child.children);
                } else {
                    next.push(child);
                }
            }
            children = next;
            if !spliced {
                break;
            }
        }

        for child in &mut children {
            child.simplify();
        }
        if let [only] = children.as_slice() {
            if only.tag == Tag::Literal {
                self.matched = only.matched.clone();
            }
        }
        self.children = children;
        self
    }

    /// Detach the tree from the input it was parsed from.
    pub fn into_owned(self) -> ParseNode<'static> {
        ParseNode {
            tag: self.tag,
            matched: Cow::Owned(self.matched.into_owned()),
            offset: self.offset,
            end: self.end,
            children: self
                .children
                .into_iter()
                .map(ParseNode::into_owned)
                .collect(),
        }
    }
}

impl<'a> Index<usize> for ParseNode<'a> {
    type Output = ParseNode<'a>;

    fn index(&self, idx: usize) -> &Self::Output {
        &self.children[idx]
    }
}

impl<'a> Display for ParseNode<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.matched)
    }
}

/// Result of a by-name child lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum Child<'n, 'a> {
    One(&'n ParseNode<'a>),
    Many(Vec<&'n ParseNode<'a>>),
}

impl<'n, 'a> Child<'n, 'a> {
    pub fn first(&self) -> &'n ParseNode<'a> {
        match self {
            Child::One(node) => *node,
            Child::Many(nodes) => nodes[0],
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Child::One(_) => 1,
            Child::Many(nodes) => nodes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &'n ParseNode<'a>> + '_ {
        let nodes = match self {
            Child::One(node) => std::slice::from_ref(node),
            Child::Many(nodes) => nodes.as_slice(),
        };
        nodes.iter().copied()
    }
}

impl<'n, 'a> IntoIterator for Child<'n, 'a> {
    type Item = &'n ParseNode<'a>;
    type IntoIter = std::vec::IntoIter<&'n ParseNode<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        match self {
            Child::One(node) => vec![node].into_iter(),
            Child::Many(nodes) => nodes.into_iter(),
        }
    }
}
