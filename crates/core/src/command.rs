// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Normalization of free-text `bd` command lines.
//!
//! A command line is split into shell-like tokens (quotes group words), the
//! `bd` program token and verb are located, and the remaining tokens are
//! sorted into flag values, switches, and positionals. The first positional
//! after the verb is the target id (or the title, for `create`).

use std::collections::HashMap;

/// Program name of the tracker CLI.
pub const PROGRAM: &str = "bd";

/// Flags that take a value, by every spelling accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum ValueFlag {
    Status,
    Reason,
    Label,
    Parent,
    Comment,
    Blocks,
    Type,
    /// Recognized so its value is not mistaken for the target id.
    Ignored,
}

const VALUE_FLAGS: &[(&str, ValueFlag)] = &[
    ("-s", ValueFlag::Status),
    ("--status", ValueFlag::Status),
    ("-r", ValueFlag::Reason),
    ("--reason", ValueFlag::Reason),
    ("-l", ValueFlag::Label),
    ("--label", ValueFlag::Label),
    ("--labels", ValueFlag::Label),
    ("-p", ValueFlag::Parent),
    ("--parent", ValueFlag::Parent),
    ("-m", ValueFlag::Comment),
    ("--comment", ValueFlag::Comment),
    ("--message", ValueFlag::Comment),
    ("-b", ValueFlag::Blocks),
    ("--blocks", ValueFlag::Blocks),
    ("-t", ValueFlag::Type),
    ("--type", ValueFlag::Type),
    ("-d", ValueFlag::Ignored),
    ("--description", ValueFlag::Ignored),
    ("--title", ValueFlag::Ignored),
    ("--priority", ValueFlag::Ignored),
    ("-a", ValueFlag::Ignored),
    ("--assignee", ValueFlag::Ignored),
];

/// Unquoted tokens that end the `bd` invocation inside a compound command.
const SHELL_SEPARATORS: &[&str] = &["&&", "||", ";", "|"];

/// A `bd` command reduced to the facts the guard and propagation engine use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BdCommand {
    /// `bd ready`
    Ready,
    /// `bd delete <id> [--hard] [--force] [--cascade]`
    Delete {
        id: Option<String>,
        hard: bool,
        force: bool,
        cascade: bool,
    },
    /// `bd update <id> [--status <s>] [--comment <text>]`
    Update {
        id: Option<String>,
        status: Option<String>,
        comment: Option<String>,
    },
    /// `bd close <id> [--reason <text>]`
    Close {
        id: Option<String>,
        reason: Option<String>,
    },
    /// `bd create <title> [--label <l>]... [--type <t>] [--parent <id>]`
    Create {
        title: Option<String>,
        labels: Vec<String>,
        type_flag: Option<String>,
        parent: Option<String>,
    },
    /// `bd dep <from> [--blocks <to>]`
    Dep {
        from: Option<String>,
        blocks: Option<String>,
    },
    /// Any other verb. Never guarded.
    Other { verb: String },
}

impl BdCommand {
    /// Parses a shell command line. Returns `None` when it does not invoke
    /// `bd`.
    pub fn parse(command: &str) -> Option<Self> {
        let tokens = tokenize(command);
        let mut rest = tokens
            .iter()
            .skip_while(|t| is_env_assignment(t))
            .map(String::as_str);

        if !is_program(rest.next()?) {
            return None;
        }

        let args: Vec<&str> = rest
            .take_while(|t| !SHELL_SEPARATORS.contains(t))
            .collect();
        let verb_pos = args.iter().position(|t| !t.starts_with('-'));
        let Some(verb_pos) = verb_pos else {
            return Some(BdCommand::Other {
                verb: String::new(),
            });
        };
        let verb = args[verb_pos];
        let parsed = ParsedArgs::parse(&args[verb_pos + 1..]);

        let command = match verb {
            "ready" => BdCommand::Ready,
            "delete" => BdCommand::Delete {
                id: parsed.first_positional(),
                hard: parsed.has_switch("--hard"),
                force: parsed.has_switch("--force"),
                cascade: parsed.has_switch("--cascade"),
            },
            "update" => BdCommand::Update {
                id: parsed.first_positional(),
                status: parsed.last(ValueFlag::Status),
                comment: parsed.last(ValueFlag::Comment),
            },
            "close" => BdCommand::Close {
                id: parsed.first_positional(),
                reason: parsed.last(ValueFlag::Reason),
            },
            "create" => BdCommand::Create {
                title: parsed.first_positional(),
                labels: parsed.labels(),
                type_flag: parsed.last(ValueFlag::Type),
                parent: parsed.last(ValueFlag::Parent),
            },
            "dep" => BdCommand::Dep {
                from: parsed.first_positional(),
                blocks: parsed.last(ValueFlag::Blocks),
            },
            other => BdCommand::Other {
                verb: other.to_string(),
            },
        };
        Some(command)
    }

    /// The verb as typed, for logging.
    pub fn verb(&self) -> &str {
        match self {
            BdCommand::Ready => "ready",
            BdCommand::Delete { .. } => "delete",
            BdCommand::Update { .. } => "update",
            BdCommand::Close { .. } => "close",
            BdCommand::Create { .. } => "create",
            BdCommand::Dep { .. } => "dep",
            BdCommand::Other { verb } => verb,
        }
    }
}

/// Tokens after the verb, sorted by role.
#[derive(Debug, Default)]
struct ParsedArgs {
    positionals: Vec<String>,
    values: HashMap<ValueFlag, Vec<String>>,
    switches: Vec<String>,
}

impl ParsedArgs {
    fn parse(args: &[&str]) -> Self {
        let mut parsed = ParsedArgs::default();
        let mut i = 0;
        while i < args.len() {
            let token = args[i];
            if let Some((name, value)) = token.split_once('=').filter(|_| token.starts_with('-')) {
                if let Some(flag) = lookup_value_flag(name) {
                    parsed.values.entry(flag).or_default().push(value.to_string());
                } else {
                    parsed.switches.push(name.to_string());
                }
            } else if let Some(flag) = lookup_value_flag(token) {
                if let Some(value) = args.get(i + 1) {
                    parsed.values.entry(flag).or_default().push(value.to_string());
                    i += 1;
                }
            } else if token.starts_with('-') && token.len() > 1 {
                parsed.switches.push(token.to_string());
            } else {
                parsed.positionals.push(token.to_string());
            }
            i += 1;
        }
        parsed
    }

    fn first_positional(&self) -> Option<String> {
        self.positionals.first().cloned()
    }

    fn has_switch(&self, name: &str) -> bool {
        self.switches.iter().any(|s| s == name)
    }

    fn last(&self, flag: ValueFlag) -> Option<String> {
        self.values.get(&flag).and_then(|v| v.last()).cloned()
    }

    /// Every label, with comma-separated values split apart.
    fn labels(&self) -> Vec<String> {
        self.values
            .get(&ValueFlag::Label)
            .into_iter()
            .flatten()
            .flat_map(|v| v.split(','))
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect()
    }
}

fn lookup_value_flag(token: &str) -> Option<ValueFlag> {
    VALUE_FLAGS
        .iter()
        .find(|(name, _)| *name == token)
        .map(|(_, flag)| *flag)
}

fn is_program(token: &str) -> bool {
    token == PROGRAM || token.ends_with(&format!("/{PROGRAM}"))
}

/// `NAME=value` prefix such as `BEADS_DIR=x bd list`.
fn is_env_assignment(token: &str) -> bool {
    match token.split_once('=') {
        Some((name, _)) => {
            !name.is_empty()
                && name
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_')
                && !name.starts_with(|c: char| c.is_ascii_digit())
        }
        None => false,
    }
}

/// Tokenize a command line, respecting quoted values.
///
/// Backslash escapes follow the shell. Outside quotes `\x` is `x`. Inside
/// double quotes only `\"`, `\\`, `\$` and `` \` `` are unescaped. Inside single
/// quotes a backslash is literal.
pub fn tokenize(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut in_quotes = false;
    let mut quote_char = ' ';
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' if !(in_quotes && quote_char == '\'') => {
                in_token = true;
                match chars.peek().copied() {
                    Some(next) if !in_quotes => {
                        current.push(next);
                        chars.next();
                    }
                    Some(next @ ('"' | '\\' | '$' | '`')) => {
                        current.push(next);
                        chars.next();
                    }
                    _ => current.push(c),
                }
            }
            '"' | '\'' if !in_quotes => {
                in_quotes = true;
                in_token = true;
                quote_char = c;
            }
            c if in_quotes && c == quote_char => {
                in_quotes = false;
            }
            c if c.is_whitespace() && !in_quotes => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            _ => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if in_token {
        tokens.push(current);
    }

    tokens
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
