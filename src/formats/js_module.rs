//! Reading and writing `dioxus.config.js` style modules.
//!
//! Only a single exported object literal is understood. The literal is turned
//! into JSON text (comments dropped, keys quoted, strings normalized, trailing
//! commas removed) and then handed to serde_json.

use anyhow::{Context, Result};
use regex::Regex;

use crate::config::ProjectConfig;

const HEADER: &str = "/**\n * @type {import(\"dioxus-cli\").DioxusConfig}\n */\n";

/// Render a config as a CommonJS module.
pub fn render(config: &ProjectConfig) -> Result<String> {
    let body = serde_json::to_string_pretty(config).context("Failed to render JS config")?;
    Ok(format!("{}module.exports = {};\n", HEADER, body))
}

/// Extract the exported object literal from a JS module and convert it to JSON.
pub fn to_json(source: &str) -> Result<String> {
    let Stripped { code, masked } = strip_comments(source)?;

    // Search the masked copy so an `export default` inside a string is not a match.
    let export = Regex::new(r"(?:module\.exports|exports\.default)\s*=|export\s+default\b")?;
    let found = export
        .find(&masked)
        .context("No `module.exports =` or `export default` found in JS config")?;

    let after = &code[found.end()..];
    let start = found.end() + (after.len() - after.trim_start().len());
    let rest = code[start..].trim_end();
    let literal = rest.strip_suffix(';').unwrap_or(rest).trim_end();
    if !literal.starts_with('{') {
        anyhow::bail!("JS config must export an object literal");
    }

    let line_offset = code[..start].matches('\n').count();
    literal_to_json(literal, line_offset)
}

/// Comment-free source, plus a copy of it with string contents blanked out.
/// Both have identical byte offsets.
struct Stripped {
    code: String,
    masked: String,
}

/// Remove `//` and `/* */` comments, leaving string contents untouched.
/// Newlines are kept so line numbers in later errors stay meaningful.
fn strip_comments(source: &str) -> Result<Stripped> {
    let mut out = String::with_capacity(source.len());
    let mut masked = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();
    let mut line = 1;

    while let Some(c) = chars.next() {
        match c {
            '"' | '\'' | '`' => {
                out.push(c);
                masked.push(c);
                let mut escaped = false;
                loop {
                    let s = chars
                        .next()
                        .with_context(|| format!("Unterminated string starting on line {}", line))?;
                    out.push(s);
                    if s == '\n' {
                        masked.push('\n');
                        line += 1;
                    } else if s == c && !escaped {
                        masked.push(s);
                        break;
                    } else {
                        masked.extend(std::iter::repeat_n(' ', s.len_utf8()));
                    }
                    escaped = !escaped && s == '\\';
                }
            }
            '/' if chars.peek() == Some(&'/') => {
                for s in chars.by_ref() {
                    if s == '\n' {
                        out.push('\n');
                        masked.push('\n');
                        line += 1;
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let start = line;
                let mut prev = '\0';
                loop {
                    let s = chars
                        .next()
                        .with_context(|| format!("Unterminated comment starting on line {}", start))?;
                    if s == '\n' {
                        out.push('\n');
                        masked.push('\n');
                        line += 1;
                    }
                    if prev == '*' && s == '/' {
                        break;
                    }
                    prev = s;
                }
            }
            '\n' => {
                out.push(c);
                masked.push(c);
                line += 1;
            }
            _ => {
                out.push(c);
                masked.push(c);
            }
        }
    }

    Ok(Stripped { code: out, masked })
}

/// Convert a comment-free object literal to JSON text.
fn literal_to_json(literal: &str, line_offset: usize) -> Result<String> {
    let chars: Vec<char> = literal.chars().collect();
    let mut out = String::with_capacity(literal.len() + 16);
    let mut line = line_offset + 1;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '"' | '\'' | '`' => {
                let (value, end) = read_string(&chars, i, line)?;
                line += chars[i..end].iter().filter(|&&c| c == '\n').count();
                out.push_str(&serde_json::to_string(&value)?);
                i = end;
                continue;
            }
            '}' | ']' => {
                drop_trailing_comma(&mut out);
                out.push(c);
            }
            c if c.is_ascii_alphabetic() || c == '_' || c == '$' => {
                let start = i;
                while i < chars.len() && is_ident_char(chars[i]) {
                    i += 1;
                }
                let word: String = chars[start..i].iter().collect();
                if next_significant(&chars, i) == Some(':') {
                    out.push_str(&serde_json::to_string(&word)?);
                } else {
                    match word.as_str() {
                        "true" | "false" | "null" => out.push_str(&word),
                        _ => anyhow::bail!(
                            "Unsupported expression `{}` on line {} of JS config (only literal values are allowed)",
                            word,
                            line
                        ),
                    }
                }
                continue;
            }
            c if c.is_ascii_digit() => {
                // Exponents (`1e5`, `2E-3`) must not be read as identifiers.
                let start = i;
                while i < chars.len()
                    && (chars[i].is_ascii_alphanumeric()
                        || chars[i] == '.'
                        || (matches!(chars[i], '+' | '-') && matches!(chars[i - 1], 'e' | 'E')))
                {
                    i += 1;
                }
                out.extend(&chars[start..i]);
                continue;
            }
            '\n' => {
                out.push(c);
                line += 1;
            }
            '(' | ')' | '=' | ';' => anyhow::bail!(
                "Unsupported syntax `{}` on line {} of JS config (only literal values are allowed)",
                c,
                line
            ),
            _ => out.push(c),
        }
        i += 1;
    }

    Ok(out)
}

/// Read a quoted string starting at `start`, returning its value and the index
/// just past the closing quote.
fn read_string(chars: &[char], start: usize, line: usize) -> Result<(String, usize)> {
    let quote = chars[start];
    let mut value = String::new();
    let mut i = start + 1;

    while i < chars.len() {
        let c = chars[i];
        if c == quote {
            return Ok((value, i + 1));
        }
        if quote == '`' && c == '$' && chars.get(i + 1) == Some(&'{') {
            anyhow::bail!(
                "Template interpolation on line {} of JS config is not supported",
                line
            );
        }
        if c == '\\' {
            i = read_escape(chars, i + 1, line, &mut value)?;
        } else {
            value.push(c);
            i += 1;
        }
    }

    anyhow::bail!("Unterminated string on line {} of JS config", line)
}

/// Decode the escape whose letter sits at `i` (just past the backslash),
/// returning the index after it.
fn read_escape(chars: &[char], i: usize, line: usize, value: &mut String) -> Result<usize> {
    let esc = *chars
        .get(i)
        .with_context(|| format!("Unterminated string on line {}", line))?;

    let decoded = match esc {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        'b' => '\u{8}',
        'f' => '\u{c}',
        'v' => '\u{b}',
        '0' if !chars.get(i + 1).is_some_and(char::is_ascii_digit) => '\0',
        '\\' | '\'' | '"' | '`' => esc,
        // Line continuation
        '\n' => return Ok(i + 1),
        'x' => {
            let code = hex_at(chars, i + 1, 2)
                .with_context(|| format!("Invalid escape `\\x` on line {} of JS config", line))?;
            value.push(char::from(code as u8));
            return Ok(i + 3);
        }
        'u' => {
            let (code, next) = read_unicode(chars, i, line)?;
            let (code, next) = if (0xD800..0xDC00).contains(&code) {
                let low = match (chars.get(next).copied(), chars.get(next + 1).copied()) {
                    (Some('\\'), Some('u')) => Some(read_unicode(chars, next + 1, line)?),
                    _ => None,
                };
                match low {
                    Some((low, after)) if (0xDC00..0xE000).contains(&low) => {
                        (0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00), after)
                    }
                    _ => anyhow::bail!(
                        "Unpaired surrogate `\\u{:X}` on line {} of JS config",
                        code,
                        line
                    ),
                }
            } else {
                (code, next)
            };
            let ch = char::from_u32(code).with_context(|| {
                format!("Invalid unicode escape `\\u{:X}` on line {} of JS config", code, line)
            })?;
            value.push(ch);
            return Ok(next);
        }
        other => anyhow::bail!(
            "Unsupported escape `\\{}` on line {} of JS config",
            other,
            line
        ),
    };

    value.push(decoded);
    Ok(i + 1)
}

/// Read the code point of a `\uXXXX` or `\u{X...}` escape whose `u` is at `i`.
fn read_unicode(chars: &[char], i: usize, line: usize) -> Result<(u32, usize)> {
    let invalid = || format!("Invalid unicode escape on line {} of JS config", line);

    if chars.get(i + 1) == Some(&'{') {
        let close = chars[i + 2..]
            .iter()
            .position(|&c| c == '}')
            .with_context(invalid)?;
        if close == 0 || close > 6 {
            anyhow::bail!(invalid());
        }
        let code = hex_at(chars, i + 2, close).with_context(invalid)?;
        if code > 0x10FFFF {
            anyhow::bail!(invalid());
        }
        Ok((code, i + 3 + close))
    } else {
        let code = hex_at(chars, i + 1, 4).with_context(invalid)?;
        Ok((code, i + 5))
    }
}

fn hex_at(chars: &[char], from: usize, len: usize) -> Option<u32> {
    let digits = chars.get(from..from + len)?;
    digits.iter().try_fold(0u32, |acc, c| Some(acc * 16 + c.to_digit(16)?))
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

fn next_significant(chars: &[char], from: usize) -> Option<char> {
    chars[from..].iter().copied().find(|c| !c.is_whitespace())
}

fn drop_trailing_comma(out: &mut String) {
    let trimmed = out.trim_end().len();
    if out[..trimmed].ends_with(',') {
        out.truncate(trimmed - 1);
    }
}
