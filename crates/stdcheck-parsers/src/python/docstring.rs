//! Docstring literal handling: quote stripping, escape decoding, and
//! indentation cleanup.

use std::borrow::Cow;

const TAB_WIDTH: usize = 8;

/// The value of a string literal as Python sees it: quotes and prefix
/// stripped, escape sequences decoded unless the literal is raw.
///
/// Returns `None` for f-strings and bytes literals.
pub fn string_literal_value(text: &str) -> Option<Cow<'_, str>> {
    let body = unquote_string_literal(text)?;
    let prefix = &text[..text.find(['"', '\'']).unwrap_or(0)];
    if prefix.contains(['r', 'R']) || !body.contains('\\') {
        return Some(Cow::Borrowed(body));
    }
    Some(Cow::Owned(decode_escapes(body)))
}

/// Decode the escape sequences of a non-raw string literal body.
///
/// `\x`, `\u`, and `\U` escapes are decoded when well formed. Named
/// `\N{...}` escapes and unknown escapes are kept as written.
fn decode_escapes(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(next) = chars.next() else {
            out.push('\\');
            break;
        };
        match next {
            '\n' => {}
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
            }
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            '\\' => out.push('\\'),
            '\'' => out.push('\''),
            '"' => out.push('"'),
            'a' => out.push('\u{07}'),
            'b' => out.push('\u{08}'),
            'f' => out.push('\u{0C}'),
            'v' => out.push('\u{0B}'),
            '0'..='7' => {
                let mut digits = String::from(next);
                while digits.len() < 3 && chars.peek().is_some_and(|d| ('0'..='7').contains(d)) {
                    digits.extend(chars.next());
                }
                match u32::from_str_radix(&digits, 8).ok().and_then(char::from_u32) {
                    Some(decoded) => out.push(decoded),
                    None => {
                        out.push('\\');
                        out.push_str(&digits);
                    }
                }
            }
            'x' | 'u' | 'U' => {
                let width = match next {
                    'x' => 2,
                    'u' => 4,
                    _ => 8,
                };
                let digits: String = chars.clone().take(width).collect();
                let decoded = (digits.len() == width && digits.chars().all(|d| d.is_ascii_hexdigit()))
                    .then(|| u32::from_str_radix(&digits, 16).ok())
                    .flatten()
                    .and_then(char::from_u32);
                match decoded {
                    Some(decoded) => {
                        out.push(decoded);
                        for _ in 0..width {
                            chars.next();
                        }
                    }
                    None => {
                        out.push('\\');
                        out.push(next);
                    }
                }
            }
            other => {
                out.push('\\');
                out.push(other);
            }
        }
    }
    out
}

/// Strip the prefix and quotes from a string literal's source text.
///
/// Returns `None` for f-strings and bytes literals, which are never
/// docstrings. Escape sequences are kept as written; see
/// [`string_literal_value`] for the decoded value.
pub fn unquote_string_literal(text: &str) -> Option<&str> {
    let prefix_len = text
        .find(|c: char| c == '"' || c == '\'')
        .unwrap_or(text.len());
    let prefix = &text[..prefix_len];
    if prefix.chars().any(|c| matches!(c, 'f' | 'F' | 'b' | 'B' | 't' | 'T')) {
        return None;
    }
    let body = &text[prefix_len..];
    for quote in ["\"\"\"", "'''", "\"", "'"] {
        if body.len() >= 2 * quote.len() && body.starts_with(quote) && body.ends_with(quote) {
            return Some(&body[quote.len()..body.len() - quote.len()]);
        }
    }
    None
}

/// Clean docstring indentation the way Python's `inspect.cleandoc` does.
///
/// Tabs are expanded, leading whitespace is removed from the first line,
/// the common indentation of the remaining lines is removed, and leading
/// and trailing blank lines are dropped.
pub fn clean_docstring(raw: &str) -> String {
    let lines: Vec<String> = raw.lines().map(expand_tabs).collect();

    let margin = lines
        .iter()
        .skip(1)
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start().len())
        .min()
        .unwrap_or(0);

    let mut cleaned: Vec<&str> = Vec::with_capacity(lines.len());
    for (i, line) in lines.iter().enumerate() {
        if i == 0 {
            cleaned.push(line.trim_start());
        } else {
            cleaned.push(line.get(margin..).unwrap_or_else(|| line.trim_start()));
        }
    }

    while cleaned.first().is_some_and(|l| l.trim().is_empty()) {
        cleaned.remove(0);
    }
    while cleaned.last().is_some_and(|l| l.trim().is_empty()) {
        cleaned.pop();
    }
    cleaned.join("\n")
}

fn expand_tabs(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut column = 0;
    for c in line.chars() {
        if c == '\t' {
            let pad = TAB_WIDTH - column % TAB_WIDTH;
            out.extend(std::iter::repeat(' ').take(pad));
            column += pad;
        } else {
            out.push(c);
            column += 1;
        }
    }
    out
}
