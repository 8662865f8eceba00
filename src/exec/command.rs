// src/exec/command.rs

//! Command template rendering and command-line splitting.

/// Replaced with the path of the affected file.
pub const PATH_PLACEHOLDER: &str = "{Path}";

/// Replaced with a comma separated list of event names.
pub const EVENTS_PLACEHOLDER: &str = "{Events}";

/// A program name plus its positional arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandLine {
    /// Split a rendered command. Returns `None` for a blank command.
    pub fn parse(cmd: &str) -> Option<Self> {
        let mut parts = split_command(cmd).into_iter();
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
        })
    }
}

impl std::fmt::Display for CommandLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Substitute the placeholders in `template`.
///
/// This is plain text replacement: a path that itself contains `{Events}`
/// will have that text substituted too.
pub fn render(template: &str, path: &str, events: &[String]) -> String {
    template
        .replace(PATH_PLACEHOLDER, path)
        .replace(EVENTS_PLACEHOLDER, &events.join(","))
}

/// Split a command line on whitespace.
///
/// Whitespace between a pair of quotes (`'` or `"`, either one toggles the
/// quoted state) does not split. The quote characters stay in the token.
pub fn split_command(cmd: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut quoted = false;

    for c in cmd.chars() {
        if c == '"' || c == '\'' {
            quoted = !quoted;
        }
        if !quoted && c.is_whitespace() {
            if !current.is_empty() {
                parts.push(std::mem::take(&mut current));
            }
            continue;
        }
        current.push(c);
    }
    if !current.is_empty() {
        parts.push(current);
    }

    parts
}
