use std::fmt;
use std::sync::Arc;

use crate::convert::{converter_for, custom_converter, Converter};
use crate::error::{Error, Result};
use crate::value::Value;

/// The binding behavior executed when an argument is matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Action {
    #[default]
    Store,
    StoreTrue,
    StoreFalse,
    Count,
    Append,
    Help,
    Custom,
}

/// How many value tokens an argument consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nargs {
    /// Exactly this many value tokens.
    Exact(usize),
    /// Zero or one (`?`).
    Optional,
    /// Zero or more (`*`).
    ZeroOrMore,
    /// One or more (`+`).
    OneOrMore,
    /// Every remaining token verbatim, regardless of shape.
    Remainder,
}

impl Default for Nargs {
    fn default() -> Self {
        Nargs::Exact(1)
    }
}

impl From<usize> for Nargs {
    fn from(count: usize) -> Self {
        Nargs::Exact(count)
    }
}

/// Accumulator threaded through a `custom` action:
/// `(current value, raw token) -> new value`.
pub type CustomAction = Arc<dyn Fn(&Value, &str) -> Result<Value> + Send + Sync>;

/// Declarative metadata for one named argument.
///
/// Configured fluently after registration; whether the argument is
/// positional is derived solely from whether its first alias starts
/// with `-`.
#[derive(Clone)]
pub struct Argument {
    names: Vec<String>,
    help: String,
    metavar: Option<String>,
    action: Action,
    type_name: String,
    default: Value,
    choices: Vec<Value>,
    nargs: Nargs,
    required: bool,
    converter: Converter,
    custom_action: Option<CustomAction>,
}

impl Argument {
    pub(crate) fn new(names: Vec<String>) -> Self {
        Self {
            names,
            help: String::new(),
            metavar: None,
            action: Action::Store,
            type_name: "string".to_string(),
            default: Value::Empty,
            choices: Vec::new(),
            nargs: Nargs::default(),
            required: false,
            converter: converter_for("string"),
            custom_action: None,
        }
    }

    pub fn help(&mut self, text: &str) -> &mut Self {
        self.help = text.to_string();
        self
    }

    pub fn metavar(&mut self, name: &str) -> &mut Self {
        self.metavar = Some(name.to_string());
        self
    }

    pub fn action(&mut self, action: Action) -> &mut Self {
        self.action = action;
        self
    }

    /// Selects the converter by type name; unknown names fall back to
    /// the identity string converter.
    pub fn value_type(&mut self, type_name: &str) -> &mut Self {
        self.type_name = type_name.to_string();
        self.converter = converter_for(type_name);
        self
    }

    pub fn default<V: Into<Value>>(&mut self, value: V) -> &mut Self {
        self.default = value.into();
        self
    }

    pub fn choices<I, V>(&mut self, choices: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.choices = choices.into_iter().map(Into::into).collect();
        self
    }

    pub fn nargs<N: Into<Nargs>>(&mut self, nargs: N) -> &mut Self {
        self.nargs = nargs.into();
        self
    }

    pub fn required(&mut self, required: bool) -> &mut Self {
        self.required = required;
        self
    }

    /// Installs a custom string conversion; failures are re-raised as
    /// conversion errors carrying the raw value.
    pub fn converter<F>(&mut self, convert: F) -> &mut Self
    where
        F: Fn(&str) -> std::result::Result<Value, String> + Send + Sync + 'static,
    {
        self.converter = custom_converter(convert);
        self
    }

    /// Installs a custom accumulator and switches the action to
    /// [`Action::Custom`].
    pub fn custom_action<F>(&mut self, accumulate: F) -> &mut Self
    where
        F: Fn(&Value, &str) -> Result<Value> + Send + Sync + 'static,
    {
        self.custom_action = Some(Arc::new(accumulate));
        self.action = Action::Custom;
        self
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// The declared form: the first alias.
    pub fn canonical_name(&self) -> &str {
        &self.names[0]
    }

    pub fn help_text(&self) -> &str {
        &self.help
    }

    pub fn metavar_override(&self) -> Option<&str> {
        self.metavar.as_deref()
    }

    pub fn action_kind(&self) -> Action {
        self.action
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn default_value(&self) -> &Value {
        &self.default
    }

    pub fn choice_values(&self) -> &[Value] {
        &self.choices
    }

    pub fn arity(&self) -> Nargs {
        self.nargs
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn is_positional(&self) -> bool {
        !self.names[0].starts_with('-')
    }

    /// The key this argument stores under: positionals use their name
    /// verbatim, optionals prefer the longest `--long` alias stripped
    /// of dashes, falling back to a stripped short alias.
    pub fn storage_key(&self) -> String {
        if self.is_positional() {
            return self.names[0].clone();
        }
        let long = self
            .names
            .iter()
            .filter(|name| name.starts_with("--"))
            .max_by_key(|name| name.len());
        long.unwrap_or(&self.names[0])
            .trim_start_matches('-')
            .to_string()
    }

    pub(crate) fn convert(&self, raw: &str) -> Result<Value> {
        (self.converter)(raw)
    }

    pub(crate) fn custom_callback(&self) -> Option<&CustomAction> {
        self.custom_action.as_ref()
    }
}

impl fmt::Debug for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Argument")
            .field("names", &self.names)
            .field("action", &self.action)
            .field("type_name", &self.type_name)
            .field("default", &self.default)
            .field("choices", &self.choices)
            .field("nargs", &self.nargs)
            .field("required", &self.required)
            .finish_non_exhaustive()
    }
}

/// Validates an alias at declaration time: positionals are
/// `[A-Za-z_][A-Za-z0-9_-]*`, short options `-` plus alphanumerics,
/// long options `--` plus alphanumerics, hyphens, or underscores.
pub(crate) fn validate_name(name: &str) -> Result<()> {
    let invalid = || Error::InvalidArgumentName {
        name: name.to_string(),
    };
    if let Some(rest) = name.strip_prefix("--") {
        if rest.is_empty()
            || !rest
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_')
        {
            return Err(invalid());
        }
        return Ok(());
    }
    if let Some(rest) = name.strip_prefix('-') {
        if rest.is_empty() || !rest.chars().all(|ch| ch.is_ascii_alphanumeric()) {
            return Err(invalid());
        }
        return Ok(());
    }
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            if chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-') {
                Ok(())
            } else {
                Err(invalid())
            }
        }
        _ => Err(invalid()),
    }
}
