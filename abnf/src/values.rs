//! Decoding of numeric values (`%x41-5A`, `%d13.10`, `%b0101`) and repetition
//! prefixes (`1*8`, `*`, `3`) once the ABNF grammar has recognised them.

use nom::{
    branch::alt,
    bytes::complete::{tag, tag_no_case, take_while1},
    character::complete::digit1,
    combinator::{all_consuming, map, map_res, opt, value},
    multi::many1,
    sequence::{preceded, separated_pair},
    IResult,
};

use crate::{Error, Result};

/// A decoded numeric value terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NumVal {
    /// One scalar, or several joined with `.`.
    Sequence(Vec<u32>),
    /// Inclusive range `lo-hi`.
    Range(u32, u32),
}

fn radix(input: &str) -> IResult<&str, u32> {
    alt((
        value(2, tag_no_case("b")),
        value(10, tag_no_case("d")),
        value(16, tag_no_case("x")),
    ))(input)
}

fn number<'a>(radix: u32) -> impl FnMut(&'a str) -> IResult<&'a str, u32> {
    map_res(
        take_while1(move |c: char| c.is_digit(radix)),
        move |s: &str| u32::from_str_radix(s, radix),
    )
}

pub fn num_val(input: &str) -> IResult<&str, NumVal> {
    let (rem, radix) = preceded(tag("%"), radix)(input)?;
    let (rem, first) = number(radix)(rem)?;
    let (rem, rest) = opt(alt((
        map(preceded(tag("-"), number(radix)), move |hi| NumVal::Range(first, hi)),
        map(many1(preceded(tag("."), number(radix))), move |more| {
            let mut values = vec![first];
            values.extend(more);
            NumVal::Sequence(values)
        }),
    )))(rem)?;
    Ok((rem, rest.unwrap_or_else(|| NumVal::Sequence(vec![first]))))
}

fn count(input: &str) -> IResult<&str, usize> {
    map_res(digit1, |s: &str| s.parse::<usize>())(input)
}

/// `min` and `max` of a repeat prefix; `None` is unbounded.
pub fn repeat(input: &str) -> IResult<&str, (usize, Option<usize>)> {
    alt((
        map(
            separated_pair(opt(count), tag("*"), opt(count)),
            |(min, max)| (min.unwrap_or(0), max),
        ),
        map(count, |n| (n, Some(n))),
    ))(input)
}

pub fn decode_num_val(text: &str) -> Result<NumVal> {
    let (_, value) = all_consuming(num_val)(text)?;
    Ok(value)
}

pub fn decode_repeat(text: &str) -> Result<(usize, Option<usize>)> {
    let (_, (min, max)) = all_consuming(repeat)(text)?;
    match max {
        Some(max) if max < min => Err(Error::InvalidValue(format!(
            "repeat '{}' has a maximum below its minimum",
            text
        ))),
        _ => Ok((min, max)),
    }
}

pub fn to_char(value: u32) -> Result<char> {
    std::char::from_u32(value)
        .ok_or_else(|| Error::InvalidValue(format!("{:#x} is not a character", value)))
}
