//! The postal address grammar from the Wikipedia article on ABNF.

use abnf::AbnfExt;
use anyhow::{anyhow, Result};
use parsegen::{Grammar, Kind, ParseNode, Parser};

const POSTAL_ADDRESS: &str = r#"
    postal-address   = name-part street zip-part

    name-part        = *(personal-part SP) last-name [SP suffix] CRLF
    name-part        =/ personal-part CRLF

    personal-part    = first-name / (initial ".")
    first-name       = *ALPHA
    initial          = ALPHA
    last-name        = *ALPHA
    suffix           = ("Jr." / "Sr." / 1*("I" / "V" / "X"))

    street           = house-num SP street-name CRLF
    house-num        = 1*8(DIGIT / ALPHA)
    street-name      = 1*(VCHAR) *(SP 1*VCHAR)

    zip-part         = town-name "," SP state 1*2SP zip-code CRLF
    town-name        = 1*(ALPHA / SP)
    state            = 2ALPHA
    zip-code         = 5DIGIT ["-" 4DIGIT]
"#;

fn postal_parser() -> Result<Parser> {
    let mut b = Grammar::builder();
    b.configure(|o| o.strip_whitespace = false)
        .start("postal-address")
        .abnf(POSTAL_ADDRESS)?;
    Ok(b.build()?.into_parser())
}

fn field<'n, 'a>(node: &'n ParseNode<'a>, name: &str) -> Result<&'n ParseNode<'a>> {
    node.child(name)
        .map(|c| c.first())
        .ok_or_else(|| anyhow!("no {} in {}", name, node.tag()))
}

#[test]
fn postal_address() -> Result<()> {
    let parser = postal_parser()?;
    let input = "Amber Thrall\r\n1064 E Lowell St\r\nTucson, AZ 85719\r\n";
    let tree = parser.parse(input)?;
    assert_eq!(tree.end(), Some(input.len()));

    let name = field(&tree, "name-part")?;
    assert_eq!(field(name, "personal-part")?.as_str(), "Amber");
    assert_eq!(field(name, "last-name")?.as_str(), "Thrall");
    assert!(!name.has_child("suffix"));

    let street = field(&tree, "street")?;
    assert_eq!(field(street, "house-num")?.as_str(), "1064");
    assert_eq!(field(street, "street-name")?.as_str(), "E Lowell St");

    let zip = field(&tree, "zip-part")?;
    assert_eq!(field(zip, "town-name")?.as_str(), "Tucson");
    assert_eq!(field(zip, "state")?.as_str(), "AZ");
    assert_eq!(field(zip, "zip-code")?.as_str(), "85719");
    Ok(())
}

#[test]
fn suffix_alternatives() -> Result<()> {
    let parser = postal_parser()?;
    let tests = vec![
        ("Jr.", Some(3)),
        ("sr.", Some(3)),
        ("XIV", Some(3)),
        ("Esq.", None),
    ];
    for (input, end) in tests {
        let tree = parser.evaluate("suffix", input)?;
        assert_eq!(tree.end(), end, "input: {:?}", input);
    }
    Ok(())
}

#[test]
fn incremental_name_part() -> Result<()> {
    let parser = postal_parser()?;
    let name_part = parser.rule("name-part")?;
    assert_eq!(name_part.body().kind(), &Kind::Choice);
    assert_eq!(name_part.body().children().len(), 2);

    // The first alternative already accepts a lone name.
    let tree = parser.parse_rule("name-part", "Thrall\r\n")?;
    assert_eq!(field(&tree, "last-name")?.as_str(), "Thrall");
    Ok(())
}

#[test]
fn zip_code_extension() -> Result<()> {
    let parser = postal_parser()?;
    let tree = parser.parse_rule("zip-code", "85719-1234")?;
    assert_eq!(tree.end(), Some(10));
    assert!(parser.parse_rule("zip-code", "8571").is_err());
    Ok(())
}
