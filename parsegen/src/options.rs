use serde::Deserialize;
use std::borrow::Cow;

/// Grammar-wide evaluation options.
///
/// Passed by reference down every `apply` call. Rules may carry
/// [`Overrides`], which are merged over the ambient options for the rule's
/// own body only.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Skip `whitespace_chars` before literal matches and between sequence
    /// and repetition elements.
    pub strip_whitespace: bool,
    pub whitespace_chars: Vec<char>,
    /// Default case sensitivity for literals that don't set their own.
    pub case_sensitive: bool,
    /// Keep failed attempts in the tree.
    pub include_failed: bool,
    pub simplify_parse_tree: bool,
    /// Rule nesting depth at which parsing aborts with
    /// [`Error::RecursionLimit`](crate::Error::RecursionLimit). `None` never
    /// aborts. Left recursion is reported regardless of this setting.
    pub max_depth: Option<usize>,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            strip_whitespace: true,
            whitespace_chars: vec!['\0', '\t', '\n', '\x0B', '\x0C', '\r', ' '],
            case_sensitive: true,
            include_failed: false,
            simplify_parse_tree: true,
            max_depth: None,
        }
    }
}

impl Options {
    /// Options suited to inspecting why a parse failed: failed attempts are
    /// kept and the raw derivation tree is returned unsimplified.
    pub fn debug() -> Self {
        Options {
            include_failed: true,
            simplify_parse_tree: false,
            ..Options::default()
        }
    }

    pub fn is_whitespace(&self, c: char) -> bool {
        self.whitespace_chars.contains(&c)
    }
}

/// Rule-local option overrides. Unset fields fall through to the ambient
/// options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub strip_whitespace: Option<bool>,
    pub whitespace_chars: Option<Vec<char>>,
    pub case_sensitive: Option<bool>,
    pub include_failed: Option<bool>,
}

impl Overrides {
    pub fn new() -> Self {
        Overrides::default()
    }

    pub fn strip_whitespace(mut self, value: bool) -> Self {
        self.strip_whitespace = Some(value);
        self
    }

    pub fn whitespace_chars(mut self, chars: impl IntoIterator<Item = char>) -> Self {
        self.whitespace_chars = Some(chars.into_iter().collect());
        self
    }

    pub fn case_sensitive(mut self, value: bool) -> Self {
        self.case_sensitive = Some(value);
        self
    }

    pub fn include_failed(mut self, value: bool) -> Self {
        self.include_failed = Some(value);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Overrides::default()
    }

    /// Merge these overrides over `opts`, borrowing when there is nothing
    /// to override.
    pub fn apply<'o>(&self, opts: &'o Options) -> Cow<'o, Options> {
        if self.is_empty() {
            return Cow::Borrowed(opts);
        }

        let mut merged = opts.clone();
        if let Some(v) = self.strip_whitespace {
            merged.strip_whitespace = v;
        }
        if let Some(ref v) = self.whitespace_chars {
            merged.whitespace_chars = v.clone();
        }
        if let Some(v) = self.case_sensitive {
            merged.case_sensitive = v;
        }
        if let Some(v) = self.include_failed {
            merged.include_failed = v;
        }
        Cow::Owned(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_overrides_borrow() {
        let opts = Options::default();
        let merged = Overrides::new().apply(&opts);
        assert!(matches!(merged, Cow::Borrowed(_)));
    }

    #[test]
    fn overrides_only_touch_set_fields() {
        let opts = Options::default();
        let merged = Overrides::new().strip_whitespace(false).apply(&opts);
        assert!(!merged.strip_whitespace);
        assert_eq!(merged.whitespace_chars, opts.whitespace_chars);
        assert_eq!(merged.case_sensitive, opts.case_sensitive);
        // The ambient options are untouched.
        assert!(opts.strip_whitespace);

        let merged = Overrides::new()
            .whitespace_chars(vec![' '])
            .include_failed(true)
            .apply(&opts);
        assert_eq!(merged.whitespace_chars, vec![' ']);
        assert!(merged.include_failed);
        assert!(merged.strip_whitespace);
    }

    #[test]
    fn deserialize_partial_options() {
        let opts: Options = serde_json::from_str(
            r#"{ "strip_whitespace": false, "whitespace_chars": [" ", "\t"], "max_depth": 64 }"#,
        )
        .unwrap();
        assert!(!opts.strip_whitespace);
        assert_eq!(opts.whitespace_chars, vec![' ', '\t']);
        assert_eq!(opts.max_depth, Some(64));
        assert!(opts.case_sensitive);
        assert!(opts.simplify_parse_tree);
    }

    #[test]
    fn debug_preset() {
        let opts = Options::debug();
        assert!(opts.include_failed);
        assert!(!opts.simplify_parse_tree);
        assert!(opts.strip_whitespace);
    }
}
