use regex::Regex;

use crate::Options;

/// Keep track of a position within a str, updating on successful operations.
#[derive(Debug, Clone)]
pub struct Position<'a> {
    pub input: &'a str,
    pub idx: usize,
}

impl<'a> Position<'a> {
    /// Create a new cursor. `start` is clamped to the end of the input.
    pub fn new(input: &'a str, start: usize) -> Self {
        Position {
            input,
            idx: start.min(input.len()),
        }
    }

    /// The remaining, unmatched input.
    pub fn rest(&self) -> &'a str {
        self.input.get(self.idx..).unwrap_or("")
    }

    pub fn is_at_end(&self) -> bool {
        self.idx >= self.input.len()
    }

    /// Skip over whitespace if `opts` asks for it.
    pub fn skip_whitespace(&mut self, opts: &Options) {
        if !opts.strip_whitespace {
            return;
        }
        let skipped: usize = self
            .rest()
            .chars()
            .take_while(|c| opts.is_whitespace(*c))
            .map(char::len_utf8)
            .sum();
        self.idx += skipped;
    }

    /// Check if a string matches the current input starting at the current
    /// index. The index will be updated on match.
    pub fn match_str(&mut self, s: &str, case_sensitive: bool) -> Option<&'a str> {
        let rest = self.rest();
        let len = if case_sensitive {
            if rest.starts_with(s) {
                Some(s.len())
            } else {
                None
            }
        } else {
            caseless_prefix(rest, s)
        };
        len.map(|n| self.advance(n))
    }

    /// Match an anchored pattern at the current index. The index will be
    /// updated on match.
    pub fn match_pattern(&mut self, re: &Regex) -> Option<&'a str> {
        let rest = self.rest();
        match re.find(rest) {
            Some(m) if m.start() == 0 => Some(self.advance(m.end())),
            _ => None,
        }
    }

    fn advance(&mut self, n: usize) -> &'a str {
        let matched = &self.input[self.idx..self.idx + n];
        self.idx += n;
        matched
    }
}

/// Length in bytes of the prefix of `haystack` equal to `needle` ignoring
/// case.
fn caseless_prefix(haystack: &str, needle: &str) -> Option<usize> {
    let mut hay = haystack.char_indices();
    for n in needle.chars() {
        let (_, h) = hay.next()?;
        if !h.to_lowercase().eq(n.to_lowercase()) {
            return None;
        }
    }
    Some(hay.next().map_or(haystack.len(), |(idx, _)| idx))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_match_str_simple() {
        let tests = vec![
            ("", 0, "", true),
            ("hello", 0, "world", false),
            ("hello", 0, "hello", true),
            ("hello", 0, "ello", false),
            ("hello", 1, "ello", true),
        ];
        for test in tests {
            let mut c = Position::new(test.0, test.1);
            let got = c.match_str(test.2, true).is_some();
            assert_eq!(got, test.3, "test case: {:?}", test);
        }
    }

    #[test]
    fn position_match_str_idx_multiple() {
        let mut c = Position::new("hello", 0);
        let got1 = c.match_str("he", true);
        let got2 = c.match_str("llo", true);
        assert_eq!(got1, Some("he"));
        assert_eq!(got2, Some("llo"), "cursor: {:?}", c);
        assert!(c.is_at_end());
    }

    #[test]
    fn position_match_str_caseless() {
        let mut c = Position::new("TRUE story", 0);
        assert_eq!(c.match_str("true", false), Some("TRUE"));
        assert_eq!(c.idx, 4);
        assert_eq!(c.match_str("X", false), None);
        assert_eq!(c.idx, 4);
    }

    #[test]
    fn position_skip_whitespace() {
        let opts = Options::default();
        let mut c = Position::new("  \t\nx", 0);
        c.skip_whitespace(&opts);
        assert_eq!(c.idx, 4);

        let opts = Options {
            strip_whitespace: false,
            ..Options::default()
        };
        let mut c = Position::new("  x", 0);
        c.skip_whitespace(&opts);
        assert_eq!(c.idx, 0);
    }

    #[test]
    fn position_match_pattern_is_anchored() {
        let re = Regex::new("^(?:[0-9]+)").unwrap();
        let mut c = Position::new("ab12", 0);
        assert_eq!(c.match_pattern(&re), None);
        let mut c = Position::new("ab12", 2);
        assert_eq!(c.match_pattern(&re), Some("12"));
    }
}
