//! `Group#action` route targets.

use std::fmt;
use std::str::FromStr;

use crate::dispatch::error::DispatchError;

const DELIMITER: char = '#';

/// A parsed route target naming a handler group and one of its actions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Target {
    group: String,
    action: String,
}

impl Target {
    /// Split on `#`. Exactly two non-empty parts are required.
    pub fn parse(raw: &str) -> Result<Self, DispatchError> {
        let parts: Vec<&str> = raw.split(DELIMITER).collect();
        match parts.as_slice() {
            [group, action] if !group.is_empty() && !action.is_empty() => Ok(Self {
                group: group.to_string(),
                action: action.to_string(),
            }),
            _ => Err(DispatchError::MalformedTarget(raw.to_string())),
        }
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn action(&self) -> &str {
        &self.action
    }
}

impl FromStr for Target {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.group, DELIMITER, self.action)
    }
}
