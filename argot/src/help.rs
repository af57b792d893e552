use crate::argument::{Action, Argument, Nargs};
use crate::error::Error;
use crate::parser::ArgumentParser;

impl ArgumentParser {
    /// The one-line `usage:` summary: optionals first, then
    /// positionals, each rendered per its arity.
    pub fn format_usage(&self) -> String {
        let mut usage = format!("usage: {}", self.prog());
        for argument in self.arguments() {
            if argument.is_positional() {
                continue;
            }
            let entry = option_usage(argument);
            if argument.is_required() {
                usage.push_str(&format!(" {entry}"));
            } else {
                usage.push_str(&format!(" [{entry}]"));
            }
        }
        for argument in self.arguments() {
            if argument.is_positional() {
                usage.push(' ');
                usage.push_str(&positional_usage(argument));
            }
        }
        usage
    }

    /// Full argparse-style help text: usage line, description,
    /// `positional arguments:` then `options:` sections, epilog.
    pub fn format_help(&self) -> String {
        let mut lines = vec![self.format_usage()];
        if !self.description().is_empty() {
            lines.push(String::new());
            lines.push(self.description().to_string());
        }

        let positionals: Vec<&Argument> = self
            .arguments()
            .iter()
            .filter(|argument| argument.is_positional())
            .collect();
        if !positionals.is_empty() {
            lines.push(String::new());
            lines.push("positional arguments:".to_string());
            for argument in positionals {
                let label = positional_usage(argument);
                lines.push(entry_line(&label, argument.help_text()));
            }
        }

        let options: Vec<&Argument> = self
            .arguments()
            .iter()
            .filter(|argument| !argument.is_positional())
            .collect();
        if !options.is_empty() {
            lines.push(String::new());
            lines.push("options:".to_string());
            for argument in options {
                let mut label = argument.names().join(", ");
                if takes_value(argument) {
                    label.push(' ');
                    label.push_str(&option_metavar(argument));
                }
                let mut entry = entry_line(&label, argument.help_text());
                if argument.is_required() {
                    entry.push_str(" (required)");
                } else if !argument.default_value().is_empty() {
                    entry.push_str(&format!(" (default: {})", argument.default_value()));
                }
                lines.push(entry);
            }
        }

        if !self.epilog().is_empty() {
            lines.push(String::new());
            lines.push(self.epilog().to_string());
        }
        lines.join("\n")
    }

    /// Renders a parse failure the way argparse does: the usage line,
    /// then `prog: error: message`.
    pub fn format_error(&self, error: &Error) -> String {
        format!("{}\n{}: error: {}", self.format_usage(), self.prog(), error)
    }
}

fn takes_value(argument: &Argument) -> bool {
    matches!(
        argument.action_kind(),
        Action::Store | Action::Append | Action::Custom
    )
}

fn metavar(argument: &Argument) -> String {
    match argument.metavar_override() {
        Some(name) => name.to_string(),
        None => argument.storage_key().to_uppercase(),
    }
}

fn option_metavar(argument: &Argument) -> String {
    let name = metavar(argument);
    match argument.action_kind() {
        Action::Store => arity_display(argument.arity(), &name),
        // append/custom always take exactly one value
        _ => name,
    }
}

fn option_usage(argument: &Argument) -> String {
    let mut entry = argument.names()[0].clone();
    if takes_value(argument) {
        entry.push(' ');
        entry.push_str(&option_metavar(argument));
    }
    entry
}

fn positional_usage(argument: &Argument) -> String {
    let name = match argument.metavar_override() {
        Some(metavar) => metavar.to_string(),
        None => argument.canonical_name().to_string(),
    };
    arity_display(argument.arity(), &name)
}

fn arity_display(nargs: Nargs, name: &str) -> String {
    match nargs {
        Nargs::Exact(count) => {
            let mut parts = Vec::with_capacity(count.max(1));
            for _ in 0..count.max(1) {
                parts.push(name);
            }
            parts.join(" ")
        }
        Nargs::Optional => format!("[{name}]"),
        Nargs::ZeroOrMore => format!("[{name} ...]"),
        Nargs::OneOrMore => format!("{name} [{name} ...]"),
        Nargs::Remainder => "...".to_string(),
    }
}

fn entry_line(label: &str, help: &str) -> String {
    if help.is_empty() {
        format!("  {label}")
    } else if label.len() < 22 {
        format!("  {label:<22}{help}")
    } else {
        format!("  {label}  {help}")
    }
}
