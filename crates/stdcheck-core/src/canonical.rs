//! Canonical text rendering for type annotations and default literals.
//!
//! Textual equality of canonical forms is the only notion of type equality
//! stdcheck has. Both the annotation side (rendered from syntax tokens) and
//! the documentation side (free text) go through the same normalizer, so
//! `dict[str,int]`, `dict[ str, int ]` and `dict[str, int]` all compare equal.
//!
//! Rules:
//! - whitespace runs collapse to a single space, leading/trailing trimmed
//! - no space after an opening bracket or before a closing one
//! - an opening bracket directly after a name or closing bracket is glued (`list[int]`)
//! - commas are followed by exactly one space (`int, str`)
//! - a trailing comma before a closing bracket is dropped (type mode only;
//!   `(1,)` is a different literal from `(1)`)
//! - no spaces around attribute dots (`typing.Optional`)
//! - unions are rendered `a | b` (type mode only)
//! - string literals are copied verbatim

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Type,
    Literal,
}

/// Normalize type annotation text (from source or from a docstring).
pub fn canonical_type_text(text: &str) -> String {
    normalize(text, Mode::Type)
}

/// Normalize the source text of a default value expression.
pub fn canonical_literal_text(text: &str) -> String {
    normalize(text, Mode::Literal)
}

fn is_opener(c: char) -> bool {
    matches!(c, '(' | '[' | '{')
}

fn is_closer(c: char) -> bool {
    matches!(c, ')' | ']' | '}')
}

fn is_word(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn trim_trailing_spaces(out: &mut String) {
    while out.ends_with(' ') {
        out.pop();
    }
}

fn flush_space(out: &mut String, pending: bool) {
    if !pending {
        return;
    }
    match out.chars().last() {
        None => {}
        Some(c) if is_opener(c) || c == ' ' => {}
        Some(_) => out.push(' '),
    }
}

fn normalize(text: &str, mode: Mode) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    let mut glue_next = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c.is_whitespace() {
            if !glue_next {
                pending_space = true;
            }
            continue;
        }
        glue_next = false;

        match c {
            '\'' | '"' => {
                flush_space(&mut out, pending_space);
                pending_space = false;
                out.push(c);
                let mut escaped = false;
                for s in chars.by_ref() {
                    out.push(s);
                    if escaped {
                        escaped = false;
                    } else if s == '\\' {
                        escaped = true;
                    } else if s == c {
                        break;
                    }
                }
            }
            ',' => {
                trim_trailing_spaces(&mut out);
                out.push(',');
                pending_space = true;
            }
            c if is_opener(c) => {
                let glued = out.chars().last().is_some_and(|p| is_word(p) || is_closer(p));
                if !(glued && pending_space) {
                    flush_space(&mut out, pending_space);
                }
                pending_space = false;
                out.push(c);
            }
            c if is_closer(c) => {
                trim_trailing_spaces(&mut out);
                if mode == Mode::Type && out.ends_with(',') {
                    out.pop();
                }
                out.push(c);
                pending_space = false;
            }
            '|' if mode == Mode::Type => {
                trim_trailing_spaces(&mut out);
                if !out.is_empty() {
                    out.push(' ');
                }
                out.push('|');
                pending_space = true;
            }
            '.' => {
                let attribute = out.chars().last().is_some_and(|p| is_word(p) || is_closer(p));
                if attribute {
                    trim_trailing_spaces(&mut out);
                    glue_next = chars.peek().is_some_and(|n| n.is_whitespace());
                } else {
                    flush_space(&mut out, pending_space);
                }
                pending_space = false;
                out.push('.');
            }
            _ => {
                flush_space(&mut out, pending_space);
                pending_space = false;
                out.push(c);
            }
        }
    }

    trim_trailing_spaces(&mut out);
    out
}
