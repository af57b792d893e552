use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A bare value, or anything after the `--` marker.
    Positional,
    /// A single `-x` flag, possibly expanded out of a `-xyz` bundle.
    ShortOption,
    /// A `--long` alias, with any `=value` suffix split off.
    LongOption,
    /// The value half of `--key=value`, quotes stripped and escapes decoded.
    OptionValue,
    /// The literal `--` end-of-options marker.
    EndOptions,
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    /// The classified text, e.g. `-a` for one flag of a `-abc` bundle.
    pub value: String,
    /// The raw argument string this token came from, for diagnostics.
    pub raw: String,
    /// Index of the originating raw argument. Tokens expanded or split
    /// from one argument share it, which lets remainder consumption
    /// recover the argument vector verbatim.
    pub source: usize,
}

impl Token {
    fn new(kind: TokenKind, value: String, raw: &str, source: usize) -> Self {
        Self {
            kind,
            value,
            raw: raw.to_string(),
            source,
        }
    }
}

/// Classifies raw argument strings into a replayable token stream.
///
/// The cursor supports `peek`/`next`/`reset`/`seek` because the binder
/// looks ahead variable distances to satisfy arity rules without
/// re-tokenizing.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    tokens: Vec<Token>,
    position: usize,
}

impl Tokenizer {
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tokens = Vec::new();
        let mut options_ended = false;
        for (source, arg) in args.into_iter().enumerate() {
            let arg = arg.as_ref();
            if options_ended {
                tokens.push(Token::new(
                    TokenKind::Positional,
                    arg.to_string(),
                    arg,
                    source,
                ));
            } else if arg == "--" {
                options_ended = true;
                tokens.push(Token::new(
                    TokenKind::EndOptions,
                    arg.to_string(),
                    arg,
                    source,
                ));
            } else if arg.len() > 2 && arg.starts_with("--") {
                match arg.split_once('=') {
                    Some((name, value)) => {
                        tokens.push(Token::new(
                            TokenKind::LongOption,
                            name.to_string(),
                            arg,
                            source,
                        ));
                        tokens.push(Token::new(
                            TokenKind::OptionValue,
                            decode_option_value(value),
                            arg,
                            source,
                        ));
                    }
                    None => tokens.push(Token::new(
                        TokenKind::LongOption,
                        arg.to_string(),
                        arg,
                        source,
                    )),
                }
            } else if arg.len() >= 2 && arg.starts_with('-') {
                if arg.len() == 2 {
                    tokens.push(Token::new(
                        TokenKind::ShortOption,
                        arg.to_string(),
                        arg,
                        source,
                    ));
                } else {
                    // -abc expands to -a -b -c, each keeping the bundle
                    // as its raw form.
                    for flag in arg.chars().skip(1) {
                        tokens.push(Token::new(
                            TokenKind::ShortOption,
                            format!("-{flag}"),
                            arg,
                            source,
                        ));
                    }
                }
            } else {
                tokens.push(Token::new(
                    TokenKind::Positional,
                    arg.to_string(),
                    arg,
                    source,
                ));
            }
        }
        Self {
            tokens,
            position: 0,
        }
    }

    pub fn has_next(&self) -> bool {
        self.position < self.tokens.len()
    }

    pub fn peek(&self) -> Result<&Token> {
        self.tokens.get(self.position).ok_or(Error::NoMoreTokens)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<Token> {
        let token = self
            .tokens
            .get(self.position)
            .cloned()
            .ok_or(Error::NoMoreTokens)?;
        self.position += 1;
        Ok(token)
    }

    pub fn reset(&mut self) {
        self.position = 0;
    }

    /// Moves the cursor, clamped to the stream length.
    pub fn seek(&mut self, position: usize) {
        self.position = position.min(self.tokens.len());
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Strips surrounding matching quotes from an inline option value and,
/// for double-quoted text, decodes backslash escapes.
fn decode_option_value(raw: &str) -> String {
    if raw.len() >= 2 {
        let mut chars = raw.chars();
        let first = chars.next();
        let last = raw.chars().next_back();
        if first == last {
            match first {
                Some('"') => return decode_escapes(&raw[1..raw.len() - 1]),
                Some('\'') => return raw[1..raw.len() - 1].to_string(),
                _ => {}
            }
        }
    }
    raw.to_string()
}

fn decode_escapes(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            output.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => output.push('\n'),
            Some('t') => output.push('\t'),
            Some('r') => output.push('\r'),
            Some('\\') => output.push('\\'),
            Some('"') => output.push('"'),
            Some('\'') => output.push('\''),
            // Unknown escapes pass through with their backslash.
            Some(other) => {
                output.push('\\');
                output.push(other);
            }
            None => output.push('\\'),
        }
    }
    output
}
