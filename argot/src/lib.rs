mod argument;
mod convert;
mod error;
mod help;
mod namespace;
mod parser;
mod tokenizer;
mod value;

pub use crate::argument::{Action, Argument, CustomAction, Nargs};
pub use crate::convert::{converter_for, custom_converter, Converter};
pub use crate::error::{Error, Result};
pub use crate::namespace::Namespace;
pub use crate::parser::ArgumentParser;
pub use crate::tokenizer::{Token, TokenKind, Tokenizer};
pub use crate::value::{FromValue, Value};
