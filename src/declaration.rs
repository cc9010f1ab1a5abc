/// Node declarations and the line grammar that produces them.
///
/// ```text
/// <marker><name> -> <target>[, <target>]*
/// ```
///
/// `%` declares a toggle, `&` a gate, and no marker a source. Targets
/// that never appear on the left of a line become sinks when the
/// network is built.

use std::str::FromStr;

use crate::error::{PulseError, PulseResult};
use crate::node::Kind;

/// One parsed declaration line.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Declaration {
    pub name: String,
    pub kind: Kind,
    /// Targets in the order they were written.
    pub outputs: Vec<String>,
}

impl Declaration {
    /// Convenience constructor for tests and programmatic networks.
    pub fn new<S: Into<String>>(name: impl Into<String>, kind: Kind, outputs: impl IntoIterator<Item = S>) -> Self {
        Declaration {
            name: name.into(),
            kind,
            outputs: outputs.into_iter().map(Into::into).collect(),
        }
    }
}

impl FromStr for Declaration {
    type Err = PulseError;

    /// Parse one line. Errors carry `line: 0`; [`parse_declarations`]
    /// fills in the real line number.
    fn from_str(line: &str) -> PulseResult<Self> {
        let (head, tail) = line
            .split_once("->")
            .ok_or_else(|| malformed("missing `->`"))?;
        let head = head.trim();

        let split = head
            .find(|c: char| c != '%' && c != '&')
            .unwrap_or(head.len());
        let (marker, name) = head.split_at(split);
        let kind = Kind::from_marker(marker)
            .ok_or_else(|| malformed(format!("unknown marker {:?}", marker)))?;
        if !is_valid_name(name) {
            return Err(malformed(format!("invalid node name {:?}", name)));
        }

        let outputs: Vec<String> = tail.split(',').map(|t| t.trim().to_string()).collect();
        if let Some(bad) = outputs.iter().find(|t| !is_valid_name(t)) {
            return Err(malformed(format!("invalid target name {:?}", bad)));
        }

        Ok(Declaration {
            name: name.to_string(),
            kind,
            outputs,
        })
    }
}

fn malformed(reason: impl Into<String>) -> PulseError {
    PulseError::MalformedDeclaration {
        line: 0,
        reason: reason.into(),
    }
}

impl std::fmt::Display for Declaration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{} -> {}", self.kind.marker(), self.name, self.outputs.join(", "))
    }
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_alphanumeric() || c == '_')
}

/// Parse every non-blank line of `text` into a declaration.
pub fn parse_declarations(text: &str) -> PulseResult<Vec<Declaration>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            line.parse::<Declaration>().map_err(|e| match e {
                PulseError::MalformedDeclaration { reason, .. } => PulseError::MalformedDeclaration {
                    line: idx + 1,
                    reason,
                },
                other => other,
            })
        })
        .collect()
}
