//! Argument lexing and flag parsing for `/tldr`.
//!
//! Lexing resolves shell-style quoting into plain tokens; flag parsing only
//! recognizes flags and pairs them with values. Numeric validation of the
//! window value happens later, at fetch time, so an unknown flag and a
//! malformed number stay distinct failures with distinct messages.

use crate::summarize::error::TldrError;

/// The user's retrieval bound, value kept raw until fetch time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowArg {
    Hours(String),
    Count(String),
}

/// A validated `/tldr` invocation. Exactly one window bound by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TldrRequest {
    pub window: WindowArg,
    pub custom_prompt: Option<String>,
    pub post_publicly: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parsed {
    Help,
    Request(TldrRequest),
}

/// POSIX-shell-like word splitting. Single quotes are literal; double quotes
/// group and honor `\"` and `\\`; a bare backslash escapes the next
/// character. Unbalanced quoting is a parse error.
pub fn lex(input: &str) -> Result<Vec<String>, TldrError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        match c {
            c if c.is_whitespace() => {
                if in_word {
                    tokens.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            '\'' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('\'') => break,
                        Some(inner) => current.push(inner),
                        None => {
                            return Err(TldrError::MalformedArguments(
                                "no closing quotation".to_owned(),
                            ));
                        }
                    }
                }
            }
            '"' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some(escaped @ ('"' | '\\')) => current.push(escaped),
                            Some(other) => {
                                current.push('\\');
                                current.push(other);
                            }
                            None => {
                                return Err(TldrError::MalformedArguments(
                                    "no closing quotation".to_owned(),
                                ));
                            }
                        },
                        Some(inner) => current.push(inner),
                        None => {
                            return Err(TldrError::MalformedArguments(
                                "no closing quotation".to_owned(),
                            ));
                        }
                    }
                }
            }
            '\\' => {
                in_word = true;
                match chars.next() {
                    Some(escaped) => current.push(escaped),
                    None => {
                        return Err(TldrError::MalformedArguments(
                            "no escaped character".to_owned(),
                        ));
                    }
                }
            }
            other => {
                in_word = true;
                current.push(other);
            }
        }
    }

    if in_word {
        tokens.push(current);
    }
    Ok(tokens)
}

/// Consume tokens left to right. `--help` anywhere short-circuits to help.
/// `-h`, `-m` and `-c` take the next token verbatim as their value; `-p` is
/// a bare boolean; anything else is an unrecognized flag. Repeated flags
/// overwrite.
pub fn parse_flags(tokens: &[String]) -> Result<Parsed, TldrError> {
    if tokens.iter().any(|t| t == "--help") {
        return Ok(Parsed::Help);
    }

    let mut hours: Option<String> = None;
    let mut count: Option<String> = None;
    let mut custom_prompt: Option<String> = None;
    let mut post_publicly = false;

    let mut iter = tokens.iter();
    while let Some(token) = iter.next() {
        match token.as_str() {
            "-h" => {
                hours = Some(
                    iter.next()
                        .ok_or(TldrError::MissingFlagValue("-h"))?
                        .clone(),
                )
            }
            "-m" => {
                count = Some(
                    iter.next()
                        .ok_or(TldrError::MissingFlagValue("-m"))?
                        .clone(),
                )
            }
            "-c" => {
                custom_prompt = Some(
                    iter.next()
                        .ok_or(TldrError::MissingFlagValue("-c"))?
                        .clone(),
                )
            }
            "-p" => post_publicly = true,
            other => return Err(TldrError::UnrecognizedFlag(other.to_owned())),
        }
    }

    // Window validation runs only after every token is consumed, so the
    // conflict is reported regardless of flag order.
    let window = match (hours, count) {
        (Some(_), Some(_)) => return Err(TldrError::ConflictingWindowSpec),
        (Some(h), None) => WindowArg::Hours(h),
        (None, Some(m)) => WindowArg::Count(m),
        (None, None) => return Err(TldrError::MissingWindowSpec),
    };

    Ok(Parsed::Request(TldrRequest {
        window,
        custom_prompt,
        post_publicly,
    }))
}
