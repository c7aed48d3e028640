//! Record parser
//!
//! Parses a single `@type{key, name = value, ...}` record starting at a
//! known boundary offset, tracking the byte span so field writes can locate
//! the record region later. Field values may be brace-delimited (with
//! nesting), quoted, or bare words.

use nom::{
    bytes::complete::take_while1,
    character::complete::{char, multispace0},
    IResult,
};

use crate::error::{DocumentError, Result};
use crate::record::{Field, Record};

/// Parse the record beginning at `start`, which must be the offset of the
/// `@` of a record boundary.
pub fn parse_record_at(text: &str, start: usize) -> Result<Record> {
    let slice = &text[start..];
    let (after_header, (entry_type, key)) = parse_header(slice).map_err(|_| parse_err(
        format!("malformed record header at offset {start}"),
    ))?;

    let mut remaining = after_header;
    let mut fields = Vec::new();
    loop {
        remaining = remaining.trim_start();
        if let Some(rest) = remaining.strip_prefix(',') {
            remaining = rest;
            continue;
        }
        if let Some(rest) = remaining.strip_prefix('}') {
            let end = start + slice.len() - rest.len();
            return Ok(Record {
                key,
                entry_type,
                fields,
                span: start..end,
            });
        }
        if remaining.is_empty() {
            return Err(parse_err(format!("unterminated record '{key}'")));
        }
        let (rest, field) = parse_field(remaining)?;
        fields.push(field);
        remaining = rest;
    }
}

/// `@type{key` — entry type is alphanumeric, the cite key runs to the first
/// comma, brace, or whitespace.
fn parse_header(input: &str) -> IResult<&str, (String, String)> {
    let (input, _) = char('@')(input)?;
    let (input, entry_type) = take_while1(|c: char| c.is_ascii_alphanumeric())(input)?;
    let (input, _) = multispace0(input)?;
    let (input, _) = char('{')(input)?;
    let (input, _) = multispace0(input)?;
    let (input, key) = take_while1(is_key_char)(input)?;
    Ok((input, (entry_type.to_string(), key.to_string())))
}

fn is_key_char(c: char) -> bool {
    !c.is_whitespace() && c != ',' && c != '{' && c != '}'
}

fn parse_field(input: &str) -> Result<(&str, Field)> {
    let (rest, name) = field_name(input)
        .map_err(|_| parse_err(format!("expected field name near '{}'", head(input))))?;
    let rest = rest.trim_start();
    let rest = rest
        .strip_prefix('=')
        .ok_or_else(|| parse_err(format!("expected '=' after field '{name}'")))?;
    let rest = rest.trim_start();

    let (rest, value) = if rest.starts_with('{') {
        braced_value(rest)?
    } else if rest.starts_with('"') {
        quoted_value(rest)?
    } else {
        bare_value(rest)
    };

    Ok((
        rest,
        Field {
            name: name.to_string(),
            value,
        },
    ))
}

fn field_name(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_')(input)
}

/// Brace-delimited value with nesting. The braces themselves are not part
/// of the value.
fn braced_value(input: &str) -> Result<(&str, String)> {
    let mut depth = 0usize;
    for (i, b) in input.bytes().enumerate() {
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok((&input[i + 1..], input[1..i].to_string()));
                }
            }
            _ => {}
        }
    }
    Err(parse_err("unbalanced braces in field value".to_string()))
}

fn quoted_value(input: &str) -> Result<(&str, String)> {
    let inner = &input[1..];
    match inner.find('"') {
        Some(end) => Ok((&inner[end + 1..], inner[..end].to_string())),
        None => Err(parse_err("unterminated quoted field value".to_string())),
    }
}

/// Bare word or number, terminated by a comma, closing brace, or whitespace.
fn bare_value(input: &str) -> (&str, String) {
    let end = input
        .find(|c: char| c == ',' || c == '}' || c.is_whitespace())
        .unwrap_or(input.len());
    (&input[end..], input[..end].to_string())
}

fn parse_err(message: String) -> DocumentError {
    DocumentError::Parse { message }
}

fn head(input: &str) -> &str {
    let end = input
        .char_indices()
        .nth(20)
        .map(|(i, _)| i)
        .unwrap_or(input.len());
    &input[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_record() {
        let text = "@article{Smith2010,\n  title = {A Mapping Study},\n  year = 2010,\n}\n";
        let record = parse_record_at(text, 0).unwrap();
        assert_eq!(record.key, "Smith2010");
        assert_eq!(record.entry_type, "article");
        assert_eq!(record.get("title"), Some("A Mapping Study"));
        assert_eq!(record.get("year"), Some("2010"));
        assert_eq!(&text[record.span.clone()], text.trim_end());
    }

    #[test]
    fn test_parse_nested_braces() {
        let text = "@article{Test, title = {The {LaTeX} Guide}}";
        let record = parse_record_at(text, 0).unwrap();
        assert_eq!(record.get("title"), Some("The {LaTeX} Guide"));
        assert_eq!(record.span, 0..text.len());
    }

    #[test]
    fn test_parse_quoted_value() {
        let text = "@article{Test, journal = \"Annalen der Physik\"}";
        let record = parse_record_at(text, 0).unwrap();
        assert_eq!(record.get("journal"), Some("Annalen der Physik"));
    }

    #[test]
    fn test_parse_at_offset() {
        let text = "@misc{first,\n  note = {x},\n}\n@article{second,\n  title = {T},\n}\n";
        let second = text.find("@article").unwrap();
        let record = parse_record_at(text, second).unwrap();
        assert_eq!(record.key, "second");
        assert_eq!(record.span.start, second);
    }

    #[test]
    fn test_parse_fieldless_record() {
        let text = "@misc{lonely}";
        let record = parse_record_at(text, 0).unwrap();
        assert_eq!(record.key, "lonely");
        assert!(record.fields.is_empty());
    }

    #[test]
    fn test_parse_trailing_comma() {
        let text = "@article{Test,\n  title = {T},\n}";
        let record = parse_record_at(text, 0).unwrap();
        assert_eq!(record.fields.len(), 1);
    }

    #[test]
    fn test_unterminated_record_fails() {
        let text = "@article{Broken,\n  title = {T},\n";
        assert!(matches!(
            parse_record_at(text, 0),
            Err(DocumentError::Parse { .. })
        ));
    }

    #[test]
    fn test_missing_equals_fails() {
        let text = "@article{Broken, title {T}}";
        assert!(parse_record_at(text, 0).is_err());
    }
}
