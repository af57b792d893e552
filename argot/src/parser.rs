use std::collections::HashMap;

use crate::argument::{validate_name, Action, Argument, Nargs};
use crate::error::{Error, Result};
use crate::namespace::Namespace;
use crate::tokenizer::{Token, TokenKind, Tokenizer};
use crate::value::Value;

/// The declaration surface and parse entry points.
///
/// Arguments are registered up front and stay immutable during
/// parsing; each `parse_args` call builds its own transient session,
/// so one declared parser may serve concurrent parses as long as no
/// caller registers arguments in the meantime.
pub struct ArgumentParser {
    prog: String,
    description: String,
    epilog: String,
    add_help: bool,
    arguments: Vec<Argument>,
    alias_index: HashMap<String, usize>,
}

impl ArgumentParser {
    pub fn new(prog: &str) -> Self {
        let mut parser = Self {
            prog: prog.to_string(),
            description: String::new(),
            epilog: String::new(),
            add_help: true,
            arguments: Vec::new(),
            alias_index: HashMap::new(),
        };
        parser.register_help_argument();
        parser
    }

    pub fn with_description(mut self, text: &str) -> Self {
        self.description = text.to_string();
        self
    }

    pub fn with_epilog(mut self, text: &str) -> Self {
        self.epilog = text.to_string();
        self
    }

    /// Enables or disables the automatic `--help`/`-h` argument.
    pub fn with_help(mut self, enabled: bool) -> Self {
        if enabled == self.add_help {
            return self;
        }
        self.add_help = enabled;
        if enabled {
            self.register_help_argument();
        } else {
            self.arguments
                .retain(|argument| argument.action_kind() != Action::Help);
            self.rebuild_alias_index();
        }
        self
    }

    fn register_help_argument(&mut self) {
        // The index is free of these aliases here, so this cannot fail.
        if let Ok(argument) = self.add_argument(["--help", "-h"]) {
            argument
                .action(Action::Help)
                .help("show this help message and exit");
        }
    }

    fn rebuild_alias_index(&mut self) {
        self.alias_index.clear();
        for (index, argument) in self.arguments.iter().enumerate() {
            for name in argument.names() {
                self.alias_index.insert(name.clone(), index);
            }
        }
    }

    /// Registers an argument under one or more aliases and returns it
    /// for fluent configuration. Malformed aliases and collisions with
    /// already-registered aliases fail here, never at parse time.
    pub fn add_argument<I, S>(&mut self, names: I) -> Result<&mut Argument>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(Error::InvalidArgumentName {
                name: String::new(),
            });
        }
        for name in &names {
            validate_name(name)?;
        }
        for name in &names {
            if self.alias_index.contains_key(name) {
                return Err(Error::DuplicateArgument { name: name.clone() });
            }
        }
        let index = self.arguments.len();
        for name in &names {
            self.alias_index.insert(name.clone(), index);
        }
        self.arguments.push(Argument::new(names));
        Ok(&mut self.arguments[index])
    }

    pub fn prog(&self) -> &str {
        &self.prog
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn epilog(&self) -> &str {
        &self.epilog
    }

    pub fn argument_count(&self) -> usize {
        self.arguments.len()
    }

    pub fn has_argument(&self, name: &str) -> bool {
        self.alias_index.contains_key(name)
    }

    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    /// Parses an explicit argument list (no program name at the front).
    pub fn parse_args<I, S>(&self, args: I) -> Result<Namespace>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        Session::new(self, &args).run()
    }

    /// Parses a raw OS argument vector: index 0 is the program path,
    /// stripped before tokenizing; its basename becomes `prog` when no
    /// explicit name was given.
    pub fn parse_argv<I, S>(&mut self, argv: I) -> Result<Namespace>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let argv: Vec<String> = argv.into_iter().map(Into::into).collect();
        if let Some(program) = argv.first() {
            if self.prog.is_empty() {
                self.prog = basename(program).to_string();
            }
        }
        let rest = if argv.is_empty() { &argv[..] } else { &argv[1..] };
        self.parse_args(rest.iter().cloned())
    }

    /// Parses the current process's arguments.
    pub fn parse_os(&mut self) -> Result<Namespace> {
        self.parse_argv(std::env::args())
    }
}

fn basename(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Transient per-parse binder state; discarded after producing the
/// namespace or raising an error.
struct Session<'a> {
    parser: &'a ArgumentParser,
    tokens: Tokenizer,
    namespace: Namespace,
    positional_order: Vec<usize>,
    next_positional: usize,
}

impl<'a> Session<'a> {
    fn new(parser: &'a ArgumentParser, args: &[String]) -> Self {
        let positional_order = parser
            .arguments
            .iter()
            .enumerate()
            .filter(|(_, argument)| argument.is_positional())
            .map(|(index, _)| index)
            .collect();
        Self {
            parser,
            tokens: Tokenizer::new(args),
            namespace: Namespace::new(),
            positional_order,
            next_positional: 0,
        }
    }

    fn run(mut self) -> Result<Namespace> {
        self.seed_defaults();
        while self.tokens.has_next() {
            let token = self.tokens.next()?;
            match token.kind {
                TokenKind::EndOptions => {}
                TokenKind::Positional => self.bind_positional(token)?,
                TokenKind::ShortOption | TokenKind::LongOption => self.bind_optional(token)?,
                // A value token at scan level means an inline value was
                // given to an argument that consumes none.
                TokenKind::OptionValue => {
                    return Err(Error::Unrecognized {
                        tokens: vec![token.raw],
                    })
                }
            }
        }
        self.check_required()?;
        Ok(self.namespace)
    }

    fn seed_defaults(&mut self) {
        for argument in &self.parser.arguments {
            let default = argument.default_value();
            if !default.is_empty() {
                self.namespace.set(argument.storage_key(), default.clone());
            }
        }
    }

    fn bind_optional(&mut self, token: Token) -> Result<()> {
        let Some(&index) = self.parser.alias_index.get(&token.value) else {
            return Err(Error::Unrecognized {
                tokens: vec![token.value],
            });
        };
        let argument: &'a Argument = &self.parser.arguments[index];
        let key = argument.storage_key();
        match argument.action_kind() {
            Action::Help => Err(Error::HelpRequested {
                text: self.parser.format_help(),
            }),
            Action::StoreTrue => {
                self.namespace.set(key, true);
                Ok(())
            }
            Action::StoreFalse => {
                self.namespace.set(key, false);
                Ok(())
            }
            Action::Count => {
                let current = match self.namespace.value(&key) {
                    Some(Value::Int(count)) => *count,
                    _ => 0,
                };
                self.namespace.set(key, current + 1);
                Ok(())
            }
            Action::Append => {
                let raw = self.take_value(&token.value)?;
                // Conversion validates the token; the list keeps raw form.
                argument
                    .convert(&raw)
                    .map_err(|err| err.with_argument(&token.value))?;
                let mut items = match self.namespace.value(&key) {
                    Some(Value::List(items)) => items.clone(),
                    _ => Vec::new(),
                };
                items.push(raw);
                self.namespace.set(key, Value::List(items));
                Ok(())
            }
            Action::Custom => {
                let raw = self.take_value(&token.value)?;
                match argument.custom_callback() {
                    Some(accumulate) => {
                        let current = self
                            .namespace
                            .value(&key)
                            .cloned()
                            .unwrap_or(Value::Empty);
                        let next = accumulate(&current, &raw)?;
                        self.namespace.set(key, next);
                    }
                    None => {
                        let value = self.convert_checked(argument, &token.value, &raw)?;
                        self.namespace.set(key, value);
                    }
                }
                Ok(())
            }
            Action::Store => self.bind_store(argument, &token.value, false, None),
        }
    }

    fn bind_positional(&mut self, token: Token) -> Result<()> {
        if self.next_positional >= self.positional_order.len() {
            // Too many positionals; drain the rest so the error names
            // every leftover token.
            let mut extras = vec![token.value];
            while self.tokens.has_next() {
                let next = self.tokens.next()?;
                if next.kind == TokenKind::Positional {
                    extras.push(next.value);
                }
            }
            return Err(Error::Unrecognized { tokens: extras });
        }
        let index = self.positional_order[self.next_positional];
        self.next_positional += 1;
        let argument: &'a Argument = &self.parser.arguments[index];
        let display = argument.canonical_name().to_string();
        self.bind_store(argument, &display, true, Some(token))
    }

    /// The nargs policy, shared by store-action optionals and
    /// positionals. For positionals the first matching token is already
    /// consumed and arrives as `first`.
    fn bind_store(
        &mut self,
        argument: &Argument,
        display: &str,
        positional: bool,
        first: Option<Token>,
    ) -> Result<()> {
        let key = argument.storage_key();
        let mut raws: Vec<String> = Vec::new();
        let mut last_source = None;
        if let Some(token) = first {
            last_source = Some(token.source);
            raws.push(token.value);
        }
        match argument.arity() {
            Nargs::Exact(count) => {
                while raws.len() < count && self.peek_value_shaped(positional) {
                    raws.push(self.tokens.next()?.value);
                }
                if raws.len() < count {
                    return Err(Error::arity(display, &expected_phrase(count)));
                }
                if count == 1 {
                    let value = self.convert_checked(argument, display, &raws[0])?;
                    self.namespace.set(key, value);
                } else {
                    for raw in &raws {
                        self.convert_checked(argument, display, raw)?;
                    }
                    self.namespace.set(key, Value::List(raws));
                }
            }
            Nargs::Optional => {
                if raws.is_empty() && self.peek_value_shaped(positional) {
                    raws.push(self.tokens.next()?.value);
                }
                // With no value the seeded default stands, or the key
                // stays unset.
                if let Some(raw) = raws.first() {
                    let value = self.convert_checked(argument, display, raw)?;
                    self.namespace.set(key, value);
                }
            }
            Nargs::ZeroOrMore | Nargs::OneOrMore => {
                while self.peek_value_shaped(positional) {
                    raws.push(self.tokens.next()?.value);
                }
                if raws.is_empty() && argument.arity() == Nargs::OneOrMore {
                    return Err(Error::arity(display, "expected at least one argument"));
                }
                for raw in &raws {
                    self.convert_checked(argument, display, raw)?;
                }
                self.namespace.set(key, Value::List(raws));
            }
            Nargs::Remainder => {
                let mut collected: Vec<String> = raws;
                while self.tokens.has_next() {
                    let token = self.tokens.next()?;
                    // Tokens split or expanded from one raw argument
                    // collapse back to that argument.
                    if Some(token.source) == last_source {
                        continue;
                    }
                    last_source = Some(token.source);
                    collected.push(token.raw);
                }
                self.namespace.set(key, Value::List(collected));
            }
        }
        Ok(())
    }

    /// Whether the next token can be consumed as a value. Positional
    /// binding only absorbs positional-classified tokens; optionals
    /// also accept inline `=` values.
    fn peek_value_shaped(&self, positional: bool) -> bool {
        match self.tokens.peek() {
            Ok(token) => match token.kind {
                TokenKind::Positional => true,
                TokenKind::OptionValue => !positional,
                _ => false,
            },
            Err(_) => false,
        }
    }

    /// Consumes the single value token `append`/`custom` require.
    fn take_value(&mut self, alias: &str) -> Result<String> {
        if self.peek_value_shaped(false) {
            Ok(self.tokens.next()?.value)
        } else {
            Err(Error::arity(alias, "expected one argument"))
        }
    }

    fn convert_checked(&self, argument: &Argument, display: &str, raw: &str) -> Result<Value> {
        let value = argument
            .convert(raw)
            .map_err(|err| err.with_argument(display))?;
        let choices = argument.choice_values();
        if !choices.is_empty() && !choices.contains(&value) {
            return Err(Error::InvalidChoice {
                argument: display.to_string(),
                value: value.to_string(),
                choices: choices.iter().map(|choice| choice.to_string()).collect(),
            });
        }
        Ok(value)
    }

    fn check_required(&self) -> Result<()> {
        let mut missing = Vec::new();
        for argument in &self.parser.arguments {
            if !argument.default_value().is_empty() {
                // A declared default always satisfies the check.
                continue;
            }
            let implicitly_required = argument.is_positional()
                && matches!(argument.arity(), Nargs::Exact(count) if count > 0)
                || argument.is_positional() && argument.arity() == Nargs::OneOrMore;
            if !(argument.is_required() || implicitly_required) {
                continue;
            }
            if !self.namespace.has(&argument.storage_key()) {
                missing.push(argument.canonical_name().to_string());
            }
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::MissingRequired { names: missing })
        }
    }
}

fn expected_phrase(count: usize) -> String {
    match count {
        1 => "expected one argument".to_string(),
        _ => format!("expected {count} arguments"),
    }
}
