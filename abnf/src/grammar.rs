//! The ABNF syntax (RFC 5234, section 4) expressed as a parsegen grammar.
//!
//! Whitespace is significant in ABNF, so the grammar turns stripping off and
//! spells out every comment and line continuation.

use parsegen::{choice, eoi, eol, lit, lits, pattern, rule, seq, Combinator, Grammar, Result};

/// The core rules of RFC 5234 appendix B.1.
pub fn core_tokens() -> Result<Vec<(&'static str, Combinator)>> {
    Ok(vec![
        ("ALPHA", pattern("[A-Za-z]")?),
        ("DIGIT", pattern("[0-9]")?),
        ("HEXDIG", pattern("[0-9A-Fa-f]")?),
        ("DQUOTE", lit("\"")),
        ("SP", lit(" ")),
        ("HTAB", lit("\t")),
        ("WSP", lits(vec![" ", "\t"])),
        ("LWSP", pattern(r"(?:(?:\r\n)?[ \t])*")?),
        ("VCHAR", pattern(r"[\x21-\x7E]")?),
        ("CHAR", pattern(r"[\x01-\x7F]")?),
        ("OCTET", pattern(r"[\x00-\xFF]")?),
        ("CTL", pattern(r"[\x00-\x1F\x7F]")?),
        ("CR", lit("\r")),
        ("LF", lit("\n")),
        ("CRLF", lit("\r\n")),
        ("BIT", lits(vec!["0", "1"])),
    ])
}

/// `open *c_wsp alternation *c_wsp close`
fn enclosed(open: &str, close: &str) -> Combinator {
    seq(vec![
        lit(open),
        rule("c_wsp").many(),
        rule("alternation"),
        rule("c_wsp").many(),
        lit(close),
    ])
}

/// `prefix 1*digit [ 1*("." 1*digit) / ("-" 1*digit) ]`
fn based_value(prefix: &str, digit: Combinator) -> Combinator {
    let digits = digit.many1();
    seq(vec![
        lit(prefix).case_sensitive(false),
        digits.clone(),
        lit(".")
            .then(digits.clone())
            .many1()
            .or(lit("-").then(digits))
            .maybe(),
    ])
}

pub fn abnf_grammar() -> Result<Grammar> {
    let mut b = Grammar::builder();
    b.configure(|o| o.strip_whitespace = false).start("rulelist");
    for (name, token) in core_tokens()? {
        b.token_combinator(name, token)?;
    }

    b.rule("rulelist", |_| {
        Ok(choice(vec![rule("c_wsp"), rule("c_nl"), rule("rule")])
            .many()
            .then(eoi().assert()))
    })?
    .rule("rule", |_| {
        Ok(seq(vec![
            rule("rulename"),
            rule("defined_as"),
            rule("elements"),
            rule("c_nl"),
        ]))
    })?
    .rule("rulename", |_| pattern("[A-Za-z][A-Za-z0-9_-]*"))?
    .rule("defined_as", |_| {
        Ok(seq(vec![
            rule("c_wsp").many(),
            lits(vec!["=/", "="]),
            rule("c_wsp").many(),
        ]))
    })?
    .rule("elements", |_| Ok(rule("alternation").then(rule("c_wsp").many())))?
    .rule("c_wsp", |g| {
        Ok(g.token("WSP")?.or(rule("c_nl").then(g.token("WSP")?)))
    })?
    .rule("c_nl", |_| Ok(rule("comment").or(eol())))?
    .rule("comment", |g| {
        Ok(seq(vec![
            lit(";"),
            g.token("WSP")?.or(g.token("VCHAR")?).many(),
            eol(),
        ]))
    })?
    .rule("alternation", |_| {
        Ok(rule("concatenation").then(
            seq(vec![
                rule("c_wsp").many(),
                lit("/"),
                rule("c_wsp").many(),
                rule("concatenation"),
            ])
            .many(),
        ))
    })?
    .rule("concatenation", |_| {
        Ok(rule("repetition").then(rule("c_wsp").many1().then(rule("repetition")).many()))
    })?
    .rule("repetition", |_| Ok(rule("repeat").maybe().then(rule("element"))))?
    .rule("repeat", |_| pattern(r"[0-9]*\*[0-9]*|[0-9]+"))?
    .rule("element", |_| {
        Ok(choice(vec![
            rule("rulename"),
            rule("group"),
            rule("option"),
            rule("char_val"),
            rule("num_val"),
        ]))
    })?
    .rule("group", |_| Ok(enclosed("(", ")")))?
    .rule("option", |_| Ok(enclosed("[", "]")))?
    .rule("char_val", |_| pattern(r#""[\x20\x21\x23-\x7E]*""#))?
    .rule("num_val", |_| {
        Ok(lit("%").then(choice(vec![
            rule("bin_val"),
            rule("dec_val"),
            rule("hex_val"),
        ])))
    })?
    .rule("bin_val", |g| Ok(based_value("b", g.token("BIT")?)))?
    .rule("dec_val", |g| Ok(based_value("d", g.token("DIGIT")?)))?
    .rule("hex_val", |g| Ok(based_value("x", g.token("HEXDIG")?)))?;

    b.build()
}
