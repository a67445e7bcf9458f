//! # Command Parser
//!
//! Splits raw inbound text into a command name and argument list and
//! validates the name against the registry. Only the name is lower-cased;
//! arguments keep their original case, since downstream actions may depend
//! on exact text.

use crate::application::registry::CommandRegistry;
use crate::domain::error::ParseError;
use crate::domain::types::ParsedCommand;

pub fn parse(raw: &str, registry: &CommandRegistry) -> Result<ParsedCommand, ParseError> {
    let mut tokens = raw.split_whitespace();
    let Some(first) = tokens.next() else {
        return Err(ParseError::Empty);
    };

    let name = first.to_lowercase();
    if !registry.contains(&name) {
        return Err(ParseError::Unknown(name));
    }

    Ok(ParsedCommand {
        name,
        args: tokens.map(str::to_string).collect(),
    })
}
