use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything a declaration or parse call can fail with.
///
/// `HelpRequested` is a control signal rather than a genuine failure:
/// callers should match it (or check [`Error::is_help`]) and print the
/// carried text before exiting successfully.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("invalid argument name '{name}'")]
    InvalidArgumentName { name: String },

    #[error("duplicate argument definition '{name}'")]
    DuplicateArgument { name: String },

    #[error("{}", conversion_message(.argument, .message))]
    Conversion {
        argument: Option<String>,
        value: String,
        message: String,
    },

    #[error("argument {argument}: {message}")]
    Arity { argument: String, message: String },

    #[error("unrecognized arguments: {}", .tokens.join(" "))]
    Unrecognized { tokens: Vec<String> },

    #[error("{}", missing_required_message(.names))]
    MissingRequired { names: Vec<String> },

    #[error("argument {argument}: invalid choice: '{value}' (choose from {})", quote_list(.choices))]
    InvalidChoice {
        argument: String,
        value: String,
        choices: Vec<String>,
    },

    #[error("no more tokens")]
    NoMoreTokens,

    #[error("key '{key}' not found in namespace")]
    KeyNotFound { key: String },

    #[error("type mismatch: stored type is {found}, requested type is {expected}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("value is empty")]
    EmptyValue,

    #[error("help requested")]
    HelpRequested { text: String },
}

impl Error {
    pub(crate) fn conversion(value: &str, message: String) -> Self {
        Error::Conversion {
            argument: None,
            value: value.to_string(),
            message,
        }
    }

    pub(crate) fn arity(argument: &str, message: &str) -> Self {
        Error::Arity {
            argument: argument.to_string(),
            message: message.to_string(),
        }
    }

    /// Attaches the argument name a conversion failure occurred under, so
    /// the rendered message reads `argument --count: invalid int value: ...`.
    pub(crate) fn with_argument(self, name: &str) -> Self {
        match self {
            Error::Conversion {
                value, message, ..
            } => Error::Conversion {
                argument: Some(name.to_string()),
                value,
                message,
            },
            other => other,
        }
    }

    /// True for the help-requested control signal.
    pub fn is_help(&self) -> bool {
        matches!(self, Error::HelpRequested { .. })
    }

    /// The rendered help text, when this is the help signal.
    pub fn help_text(&self) -> Option<&str> {
        match self {
            Error::HelpRequested { text } => Some(text),
            _ => None,
        }
    }
}

fn conversion_message(argument: &Option<String>, message: &str) -> String {
    match argument {
        Some(name) => format!("argument {name}: {message}"),
        None => message.to_string(),
    }
}

fn missing_required_message(names: &[String]) -> String {
    if names.is_empty() {
        "required arguments are missing".to_string()
    } else {
        format!(
            "the following arguments are required: {}",
            names.join(", ")
        )
    }
}

fn quote_list(choices: &[String]) -> String {
    choices
        .iter()
        .map(|choice| format!("'{choice}'"))
        .collect::<Vec<_>>()
        .join(", ")
}
