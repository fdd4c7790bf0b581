use nom::{
    branch::alt,
    bytes::complete::{tag, take_until},
    combinator::{all_consuming, verify},
    error::{ErrorKind, ParseError},
    sequence::terminated,
    IResult, Parser,
};
use nom_language::error::VerboseError;

use crate::types::{Assignment, Error, Operator, PathToken};

type Res<T, U> = IResult<T, U, VerboseError<T>>;

/// Parses a sequence of assignment tokens, in order.
///
/// Fails on the first token that matches none of the operator grammars.
///
/// ## Example
///
/// ```rust
/// use je::Operator;
///
/// let assignments = je::parse_assignments(["name=john", "age:=30"]).unwrap();
/// assert_eq!(assignments[0].operator, Operator::AssignString);
/// assert_eq!(assignments[1].operator, Operator::AssignJson);
/// ```
pub fn parse_assignments<I, S>(tokens: I) -> Result<Vec<Assignment>, Error>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .map(|token| parse_assignment(token.as_ref()))
        .collect()
}

/// Parses a single assignment token into an [`Assignment`].
///
/// The operator grammars overlap (`[].`, `[]:=`, `[]=`, `:@`, `@`, `:=`,
/// `=`), so the token is matched against a priority-ordered list of
/// sub-parsers; the first match wins.
pub fn parse_assignment(token: &str) -> Result<Assignment, Error> {
    let result = all_consuming(alt((
        array_map,
        append_array_json,
        append_array,
        assign_json_file,
        assign_file,
        assign_json,
        assign_string,
    )))
    .parse(token);

    match result {
        Ok((_, assignment)) => Ok(assignment),
        Err(err) => {
            log::debug!("assignment parse trace for {token:?}: {err}");
            Err(Error::MalformedAssignment {
                token: token.to_string(),
            })
        }
    }
}

/// Splits the input at the first occurrence of `marker`, requiring a
/// non-empty prefix. Returns the prefix; the remaining input starts right
/// after the marker.
fn split_on<'a>(input: &'a str, marker: &'static str) -> Res<&'a str, &'a str> {
    terminated(
        verify(take_until(marker), |prefix: &str| !prefix.is_empty()),
        tag(marker),
    )
    .parse(input)
}

// [].prop:=value  /  [].prop=value
//
// After the marker, := takes priority over =; both require a non-empty
// property name. When neither matches, the token falls through to the
// remaining operator grammars.
fn array_map(input: &str) -> Res<&str, Assignment> {
    let (input, base) = split_on(input, "[].")?;
    let (value, (property, operator)) = match split_on(input, ":=") {
        Ok((value, property)) => (value, (property, Operator::ArrayMapJson)),
        Err(_) => {
            let (value, property) = split_on(input, "=")?;
            (value, (property, Operator::ArrayMap))
        }
    };

    Ok((
        "",
        Assignment {
            path: format!("{base}[].{property}"),
            operator,
            value: value.to_string(),
        },
    ))
}

// path[]:=value
fn append_array_json(input: &str) -> Res<&str, Assignment> {
    let (value, base) = split_on(input, "[]:=")?;
    Ok((
        "",
        Assignment {
            path: format!("{base}[]"),
            operator: Operator::AppendArrayJson,
            value: value.to_string(),
        },
    ))
}

// path[]=value
fn append_array(input: &str) -> Res<&str, Assignment> {
    let (value, base) = split_on(input, "[]=")?;
    Ok((
        "",
        Assignment {
            path: format!("{base}[]"),
            operator: Operator::AppendArray,
            value: value.to_string(),
        },
    ))
}

// path:@filename
fn assign_json_file(input: &str) -> Res<&str, Assignment> {
    let (value, path) = split_on(input, ":@")?;
    Ok((
        "",
        Assignment {
            path: path.to_string(),
            operator: Operator::AssignJsonFile,
            value: value.to_string(),
        },
    ))
}

// path@filename
//
// Rejected when the prefix already contains '=': an '@' after an '='
// belongs to the value (e.g. an e-mail address), not to a file operator.
fn assign_file(input: &str) -> Res<&str, Assignment> {
    let (value, path) = split_on(input, "@")?;
    if path.contains('=') {
        return Err(nom::Err::Error(VerboseError::from_error_kind(
            input,
            ErrorKind::Verify,
        )));
    }

    Ok((
        "",
        Assignment {
            path: path.to_string(),
            operator: Operator::AssignFile,
            value: value.to_string(),
        },
    ))
}

// path:=value
fn assign_json(input: &str) -> Res<&str, Assignment> {
    let (value, path) = split_on(input, ":=")?;
    Ok((
        "",
        Assignment {
            path: path.to_string(),
            operator: Operator::AssignJson,
            value: value.to_string(),
        },
    ))
}

// path=value
fn assign_string(input: &str) -> Res<&str, Assignment> {
    let (value, path) = split_on(input, "=")?;
    Ok((
        "",
        Assignment {
            path: path.to_string(),
            operator: Operator::AssignString,
            value: value.to_string(),
        },
    ))
}

/// Splits a dotted path into segments.
///
/// A backslash-escaped dot (`\.`) is a literal dot inside a segment, not a
/// delimiter. Any other backslash is kept as-is.
///
/// ## Example
///
/// ```rust
/// assert_eq!(
///     je::segments(r"servers.prod\.eu.host"),
///     ["servers", "prod.eu", "host"]
/// );
/// ```
pub fn segments(path: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = path.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'.') => {
                chars.next();
                current.push('.');
            }
            '.' => segments.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    segments.push(current);

    segments
}

/// Splits a dotted path into [`PathToken`]s.
///
/// Segments consisting only of ASCII digits address array indices; all
/// other segments address object keys.
pub fn path_tokens(path: &str) -> Vec<PathToken> {
    segments(path).into_iter().map(path_token).collect()
}

fn path_token(segment: String) -> PathToken {
    if !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(index) = segment.parse::<usize>() {
            return PathToken::Index(index);
        }
    }
    PathToken::Key(segment)
}
