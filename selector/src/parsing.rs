use nom::branch::alt;
use nom::bytes::complete::{escaped, tag, take_till};
use nom::character::complete::{char, none_of};
use nom::combinator::{all_consuming, opt, value};
use nom::multi::many0;
use nom::sequence::{delimited, preceded};
use nom::IResult;

use super::{Part, Selector, DEFAULT_TAG};

fn is_delimiter(c: char) -> bool {
    matches!(c, '#' | '.' | '[' | ']')
}

/// Everything up to the next `#`, `.`, `[` or `]`
fn parse_segment(input: &str) -> IResult<&str, &str> {
    take_till(is_delimiter)(input)
}

/// Parse a selector with whitespace already removed. Only the first id is kept.
pub(crate) fn selector(input: &str) -> IResult<&str, Selector> {
    let (r, tag_name) = parse_segment(input)?;
    let (r, parts) = many0(alt((parse_id, parse_class, parse_attribute, parse_stray_close)))(r)?;

    let mut has_id = false;
    let mut kept = Vec::with_capacity(parts.len());
    for part in parts.into_iter().flatten() {
        if let Part::Id(_) = part {
            if has_id {
                continue;
            }
            has_id = true;
        }
        kept.push(part);
    }

    let tag_name = if tag_name.is_empty() { DEFAULT_TAG } else { tag_name };
    Ok((
        r,
        Selector {
            tag: tag_name.to_string(),
            parts: kept,
        },
    ))
}

#[cfg(test)]
#[test]
fn test_parse_selector() {
    let i = "span#main.big[hidden]";
    let target = Selector {
        tag: "span".to_string(),
        parts: vec![part!(#"main"), part!(."big"), part!(["hidden"])],
    };
    assert_eq!(selector(i).unwrap(), ("", target));

    let i = ".big";
    let target = Selector {
        tag: "div".to_string(),
        parts: vec![part!(."big")],
    };
    assert_eq!(selector(i).unwrap(), ("", target));

    let i = "#a#b";
    let target = Selector {
        tag: "div".to_string(),
        parts: vec![part!(#"a")],
    };
    assert_eq!(selector(i).unwrap(), ("", target));
}

/// `#name`, empty names are dropped
fn parse_id(input: &str) -> IResult<&str, Option<Part>> {
    let (r, name) = preceded(char('#'), parse_segment)(input)?;
    Ok((r, (!name.is_empty()).then(|| Part::Id(name.to_string()))))
}

/// `.name`, empty names are dropped
fn parse_class(input: &str) -> IResult<&str, Option<Part>> {
    let (r, name) = preceded(char('.'), parse_segment)(input)?;
    Ok((r, (!name.is_empty()).then(|| Part::Class(name.to_string()))))
}

/// `[name]` or `[name=value]`. An unterminated bracket runs to the end of input.
fn parse_attribute(input: &str) -> IResult<&str, Option<Part>> {
    let (r, pair) = delimited(char('['), take_till(|c: char| c == ']'), opt(char(']')))(input)?;
    Ok((r, attribute_pair(pair)))
}

fn parse_stray_close(input: &str) -> IResult<&str, Option<Part>> {
    value(None, char(']'))(input)
}

#[cfg(test)]
#[test]
fn test_parse_attribute() {
    assert_eq!(parse_attribute("[test]").unwrap(), ("", Some(part!(["test"]))));
    assert_eq!(
        parse_attribute(r#"[href="/a.png"]"#).unwrap(),
        ("", Some(part!(["href" => "/a.png"])))
    );
    assert_eq!(
        parse_attribute("[lang=en].x").unwrap(),
        (".x", Some(part!(["lang" => "en"])))
    );
    assert_eq!(
        parse_attribute("[lang=en").unwrap(),
        ("", Some(part!(["lang" => "en"])))
    );
    assert_eq!(parse_attribute("[]").unwrap(), ("", None));
    assert_eq!(parse_attribute("[=x]").unwrap(), ("", None));
    assert!(parse_attribute(".x").is_err());
}

fn attribute_pair(pair: &str) -> Option<Part> {
    let (name, value) = match pair.split_once('=') {
        Some((name, value)) => (name, Some(unquote(value))),
        None => (pair, None),
    };
    if name.is_empty() {
        return None;
    }
    Some(Part::Attribute {
        name: name.to_string(),
        value: value.map(str::to_string),
    })
}

/// Strip one layer of matching quotes. Values the quotes don't fully enclose are kept as-is.
fn unquote(value: &str) -> &str {
    match all_consuming(alt((parse_single_quoted, parse_double_quoted)))(value) {
        Ok((_, inner)) => inner,
        Err(_) => value,
    }
}

#[cfg(test)]
#[test]
fn test_unquote() {
    assert_eq!(unquote(r#""thing""#), "thing");
    assert_eq!(unquote("'thing'"), "thing");
    assert_eq!(unquote("thing"), "thing");
    assert_eq!(unquote(r#""""#), "");
    assert_eq!(unquote(r#""a"b"#), r#""a"b"#);
    assert_eq!(unquote(r#""a'"#), r#""a'"#);
    assert_eq!(unquote(r#"'it\'s'"#), r#"it\'s"#);
}

fn parse_single_quoted(input: &str) -> IResult<&str, &str> {
    let esc = escaped(none_of("\\\'"), '\\', tag("'"));
    let esc_or_empty = alt((esc, tag("")));
    delimited(tag("'"), esc_or_empty, tag("'"))(input)
}

fn parse_double_quoted(input: &str) -> IResult<&str, &str> {
    let esc = escaped(none_of("\\\""), '\\', tag("\""));
    let esc_or_empty = alt((esc, tag("")));
    delimited(tag("\""), esc_or_empty, tag("\""))(input)
}
