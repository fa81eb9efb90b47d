//! Built-in minifier for opaque nodes.

use csspack_core::{Error, Minifier, Result};

/// Characters that never need surrounding whitespace.
const TIGHT: &[char] = &['{', '}', ';', ','];

/// Minimal minifier: drops comments, collapses whitespace runs to one space,
/// and removes whitespace next to `{ } ; ,`. Quoted strings are copied as-is.
///
/// Stands in for a full stylesheet printer when the caller has none.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceMinifier;

impl Minifier for WhitespaceMinifier {
    fn minify(&self, source: &str) -> Result<String> {
        let mut out = String::with_capacity(source.len());
        let mut chars = source.chars().peekable();
        let mut pending_space = false;
        let mut quote: Option<char> = None;

        while let Some(c) = chars.next() {
            if let Some(q) = quote {
                out.push(c);
                if c == '\\' {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                } else if c == q {
                    quote = None;
                }
                continue;
            }

            match c {
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    let mut prev = '\0';
                    loop {
                        match chars.next() {
                            Some('/') if prev == '*' => break,
                            Some(next) => prev = next,
                            None => return Err(Error::minifier("unterminated comment")),
                        }
                    }
                    pending_space = true;
                }
                c if c.is_whitespace() => pending_space = true,
                c if TIGHT.contains(&c) => {
                    pending_space = false;
                    out.push(c);
                }
                c => {
                    if pending_space && !out.is_empty() && !out.ends_with(TIGHT) {
                        out.push(' ');
                    }
                    pending_space = false;
                    if c == '"' || c == '\'' {
                        quote = Some(c);
                    }
                    out.push(c);
                }
            }
        }

        if quote.is_some() {
            return Err(Error::minifier("unterminated string"));
        }
        Ok(out)
    }
}
