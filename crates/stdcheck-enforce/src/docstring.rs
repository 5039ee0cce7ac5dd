//! Docstring parser.
//!
//! Turns cleaned docstring text into a [`DocModel`] plus every formatting
//! issue found on the way. Parsing never fails: a malformed section yields a
//! `DOC` issue and as much of the model as could be recovered.
//!
//! Grammar:
//!
//! ```text
//! Summary line ending with a period.
//! optional further summary lines
//!
//! Args:
//!     name (type[, optional]): description; defaults to value
//!         continuation of the description
//!
//! Returns:
//!     type: description
//! ```

use stdcheck_core::types::{DocArg, DocModel, DocReturn};

use crate::types::RuleId;

const ARGS_HEADER: &str = "Args:";
const RETURNS_HEADER: &str = "Returns:";
const OPTIONAL_MARKER: &str = "optional";

/// Structural docstring problem, reported as a `DOC` violation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocFormatError {
    #[error("`Args:` section has no entries")]
    EmptyArgs,
    #[error("malformed `Args:` entry on docstring line {line}: `{text}`")]
    MalformedArg { line: u32, text: String },
    #[error("`Returns:` section has no entry")]
    EmptyReturns,
    #[error("malformed `Returns:` entry on docstring line {line}: `{text}`")]
    MalformedReturn { line: u32, text: String },
    #[error("`Returns:` section has more than one entry")]
    MultipleReturns,
    #[error("duplicate `{0}` section")]
    DuplicateSection(&'static str),
}

/// A formatting issue found while parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocIssue {
    pub rule: RuleId,
    pub message: String,
    /// Documented argument the issue is about, as written in `Args:`.
    pub arg: Option<String>,
}

impl From<DocFormatError> for DocIssue {
    fn from(err: DocFormatError) -> Self {
        DocIssue {
            rule: RuleId::Doc,
            message: err.to_string(),
            arg: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDocstring {
    pub model: DocModel,
    pub issues: Vec<DocIssue>,
}

/// Parse a cleaned docstring.
pub fn parse_docstring(text: &str) -> ParsedDocstring {
    let lines: Vec<&str> = text.lines().collect();
    let mut parsed = ParsedDocstring::default();

    let mut i = 0;
    let mut summary_lines = Vec::new();
    while i < lines.len() {
        let trimmed = lines[i].trim();
        if trimmed.is_empty() || is_header(trimmed) {
            break;
        }
        summary_lines.push(trimmed);
        i += 1;
    }
    check_summary(&summary_lines, &mut parsed.issues);
    parsed.model.summary = summary_lines.join(" ");

    let mut seen_returns = false;
    while i < lines.len() {
        let trimmed = lines[i].trim();
        if trimmed == ARGS_HEADER {
            let (body, next) = section_body(&lines, i);
            if parsed.model.has_args_section {
                parsed.issues.push(DocFormatError::DuplicateSection(ARGS_HEADER).into());
            } else {
                parsed.model.has_args_section = true;
                parsed.model.args = parse_args(&body, &mut parsed.issues);
            }
            i = next;
        } else if trimmed == RETURNS_HEADER {
            let (body, next) = section_body(&lines, i);
            if seen_returns {
                parsed.issues.push(DocFormatError::DuplicateSection(RETURNS_HEADER).into());
            } else {
                seen_returns = true;
                parsed.model.returns = parse_returns(&body, &mut parsed.issues);
            }
            i = next;
        } else {
            i += 1;
        }
    }

    for arg in &parsed.model.args {
        check_description(
            &format!("argument `{}`", arg.name),
            Some(&arg.name),
            &arg.description,
            &mut parsed.issues,
        );
    }
    if let Some(ret) = &parsed.model.returns {
        check_description("return value", None, &ret.description, &mut parsed.issues);
    }

    parsed
}

fn is_header(trimmed: &str) -> bool {
    trimmed == ARGS_HEADER || trimmed == RETURNS_HEADER
}

fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

/// One non-blank line of a section body with its 1-based docstring line.
struct BodyLine<'a> {
    number: u32,
    indent: usize,
    text: &'a str,
}

/// Collect the lines belonging to the section whose header is at `header`.
///
/// The section ends at the first non-blank line indented at or left of the
/// header. Returns the body and the index to resume scanning from.
fn section_body<'a>(lines: &[&'a str], header: usize) -> (Vec<BodyLine<'a>>, usize) {
    let header_indent = indent_of(lines[header]);
    let mut body = Vec::new();
    let mut i = header + 1;
    while i < lines.len() {
        let line = lines[i];
        if !line.trim().is_empty() {
            let indent = indent_of(line);
            if indent <= header_indent {
                break;
            }
            body.push(BodyLine {
                number: i as u32 + 1,
                indent,
                text: line.trim(),
            });
        }
        i += 1;
    }
    (body, i)
}

fn check_summary(summary_lines: &[&str], issues: &mut Vec<DocIssue>) {
    let Some(first) = summary_lines.first() else {
        issues.push(DocIssue {
            rule: RuleId::R10,
            message: "docstring summary is empty".to_string(),
            arg: None,
        });
        return;
    };
    if !first.ends_with('.') {
        issues.push(DocIssue {
            rule: RuleId::R9,
            message: format!("summary line `{first}` does not end with a period"),
            arg: None,
        });
    }
}

fn parse_args(body: &[BodyLine<'_>], issues: &mut Vec<DocIssue>) -> Vec<DocArg> {
    let Some(first) = body.first() else {
        issues.push(DocFormatError::EmptyArgs.into());
        return Vec::new();
    };
    let entry_indent = first.indent;

    let mut args: Vec<DocArg> = Vec::new();
    // Continuations after a malformed entry have nowhere to go.
    let mut accepting_continuation = false;
    for line in body {
        if line.indent > entry_indent {
            if accepting_continuation {
                if let Some(current) = args.last_mut() {
                    append_continuation(&mut current.description, line.text);
                }
            }
            continue;
        }
        match (line.indent == entry_indent)
            .then(|| parse_arg_entry(line.text, line.number))
            .flatten()
        {
            Some(arg) => {
                args.push(arg);
                accepting_continuation = true;
            }
            None => {
                issues.push(
                    DocFormatError::MalformedArg {
                        line: line.number,
                        text: line.text.to_string(),
                    }
                    .into(),
                );
                accepting_continuation = false;
            }
        }
    }

    args
}

fn append_continuation(description: &mut String, text: &str) {
    if !description.is_empty() {
        description.push(' ');
    }
    description.push_str(text);
}

/// Split `name (type[, optional]): description`.
fn parse_arg_entry(text: &str, line: u32) -> Option<DocArg> {
    let open = text.find('(')?;
    let name = text[..open].trim_end();
    if !is_arg_name(name) {
        return None;
    }

    let close = open + matching_close(&text[open..])?;
    let inner = &text[open + 1..close];
    let description = text[close + 1..].trim_start().strip_prefix(':')?.trim();

    let (type_text, optional) = split_optional(inner);
    if type_text.is_empty() {
        return None;
    }
    Some(DocArg {
        name: name.to_string(),
        type_text: type_text.to_string(),
        optional,
        description: description.to_string(),
        line_offset: line,
    })
}

fn is_arg_name(name: &str) -> bool {
    let ident = name.trim_start_matches('*');
    name.len() - ident.len() <= 2
        && ident
            .chars()
            .next()
            .is_some_and(|c| c.is_alphabetic() || c == '_')
        && ident.chars().all(|c| c.is_alphanumeric() || c == '_')
}

/// Byte offset of the bracket closing the one that opens `text`.
fn matching_close(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote = None;
    for (idx, c) in text.char_indices() {
        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '\'' | '"' => quote = Some(c),
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return (c == ')').then_some(idx);
                }
            }
            _ => {}
        }
    }
    None
}

/// Strip a trailing top-level `, optional` from a documented type.
fn split_optional(inner: &str) -> (&str, bool) {
    if let Some(comma) = last_top_level_comma(inner) {
        if inner[comma + 1..].trim() == OPTIONAL_MARKER {
            return (inner[..comma].trim(), true);
        }
    }
    (inner.trim(), false)
}

fn last_top_level_comma(text: &str) -> Option<usize> {
    let mut depth = 0i32;
    let mut last = None;
    for (idx, c) in text.char_indices() {
        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth -= 1,
            ',' if depth == 0 => last = Some(idx),
            _ => {}
        }
    }
    last
}

/// Byte offset of the first `:` outside any brackets.
fn first_top_level_colon(text: &str) -> Option<usize> {
    let mut depth = 0i32;
    for (idx, c) in text.char_indices() {
        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth -= 1,
            ':' if depth == 0 => return Some(idx),
            _ => {}
        }
    }
    None
}

fn parse_returns(body: &[BodyLine<'_>], issues: &mut Vec<DocIssue>) -> Option<DocReturn> {
    let Some(first) = body.first() else {
        issues.push(DocFormatError::EmptyReturns.into());
        return None;
    };
    let entry_indent = first.indent;

    let mut entries = body.iter().filter(|l| l.indent <= entry_indent);
    let entry = entries.next()?;
    if entries.next().is_some() {
        issues.push(DocFormatError::MultipleReturns.into());
    }

    let malformed = || DocFormatError::MalformedReturn {
        line: entry.number,
        text: entry.text.to_string(),
    };
    let Some(colon) = first_top_level_colon(entry.text) else {
        issues.push(malformed().into());
        return None;
    };
    let type_text = entry.text[..colon].trim();
    if type_text.is_empty() {
        issues.push(malformed().into());
        return None;
    }

    let mut description = entry.text[colon + 1..].trim().to_string();
    let continuations = body
        .iter()
        .skip_while(|l| l.number <= entry.number)
        .take_while(|l| l.indent > entry_indent);
    for line in continuations {
        append_continuation(&mut description, line.text);
    }

    Some(DocReturn {
        type_text: type_text.to_string(),
        description,
    })
}

/// Descriptions are `;`-separated clauses, each starting lowercase, with no
/// final period. Argument descriptions may not contain a `:` outside quotes
/// and brackets.
fn check_description(
    subject: &str,
    arg: Option<&str>,
    description: &str,
    issues: &mut Vec<DocIssue>,
) {
    let mut push = |message: String| {
        issues.push(DocIssue {
            rule: RuleId::R3,
            message,
            arg: arg.map(str::to_string),
        })
    };

    for clause in clauses(description) {
        match clause.chars().next() {
            None => push(format!("description of {subject} has an empty clause")),
            Some(c) if c.is_uppercase() => push(format!(
                "description clause `{clause}` of {subject} starts with an uppercase letter"
            )),
            Some(_) => {}
        }
        if arg.is_some() && !top_level_offsets(clause, ':').is_empty() {
            push(format!(
                "description clause `{clause}` of {subject} contains `:`"
            ));
        }
    }
    if description.trim_end().ends_with('.') {
        push(format!("description of {subject} ends with a period"));
    }
}

/// Split a description into its trimmed `;`-separated clauses. A `;` inside
/// a quoted literal or brackets does not split.
pub fn clauses(description: &str) -> impl Iterator<Item = &str> {
    let mut parts = Vec::new();
    let mut start = 0;
    for idx in top_level_offsets(description, ';') {
        parts.push(description[start..idx].trim());
        start = idx + 1;
    }
    parts.push(description[start..].trim());
    parts.into_iter()
}

/// Byte offsets of `target` outside brackets and quoted literals.
///
/// A quote only opens a literal at the start of a word, so apostrophes in
/// prose (`the user's name`) are plain text. If a literal never closes the
/// text is rescanned with quotes ignored.
fn top_level_offsets(text: &str, target: char) -> Vec<usize> {
    scan_offsets(text, target, true).unwrap_or_else(|| {
        scan_offsets(text, target, false).unwrap_or_default()
    })
}

fn scan_offsets(text: &str, target: char, track_quotes: bool) -> Option<Vec<usize>> {
    let mut depth = 0i32;
    let mut quote = None;
    let mut prev = None;
    let mut found = Vec::new();
    for (idx, c) in text.char_indices() {
        let previous = prev.replace(c);
        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '\'' | '"'
                if track_quotes && !previous.is_some_and(|p: char| p.is_alphanumeric()) =>
            {
                quote = Some(c)
            }
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth -= 1,
            c if c == target && depth <= 0 => found.push(idx),
            _ => {}
        }
    }
    quote.is_none().then_some(found)
}

#[cfg(test)]
#[path = "docstring_tests.rs"]
mod tests;
