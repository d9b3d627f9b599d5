//! Placeholder match types.
//!
//! # Built-in types
//! | Name   | Regex           | Value  |
//! |--------|-----------------|--------|
//! | `i`    | `[0-9]+`        | `i64`  |
//! | `a`    | `[0-9A-Za-z]+`  | string |
//! | `h`    | `[0-9A-Fa-f]+`  | string |
//! | `*`    | `.+?`           | string |
//! | `**`   | `.+`            | string |
//! | (none) | `[^/\.]+`       | string |

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::routing::error::{RoutingError, RoutingResult};

/// How a captured value is converted into a [`ParamValue`](super::ParamValue).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    Int,
    #[default]
    Str,
}

/// A named regex fragment usable inside `[type:name]` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchType {
    pub regex: String,
    pub kind: ParamKind,
}

/// The set of match types known to a route table.
#[derive(Debug, Clone)]
pub struct MatchTypes {
    types: HashMap<String, MatchType>,
}

impl Default for MatchTypes {
    fn default() -> Self {
        let mut types = HashMap::new();
        let builtin = [
            ("i", "[0-9]+", ParamKind::Int),
            ("a", "[0-9A-Za-z]+", ParamKind::Str),
            ("h", "[0-9A-Fa-f]+", ParamKind::Str),
            ("*", ".+?", ParamKind::Str),
            ("**", ".+", ParamKind::Str),
            ("", r"[^/\.]+", ParamKind::Str),
        ];
        for (name, regex, kind) in builtin {
            types.insert(
                name.to_string(),
                MatchType {
                    regex: regex.to_string(),
                    kind,
                },
            );
        }
        Self { types }
    }
}

impl MatchTypes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&MatchType> {
        self.types.get(name)
    }

    /// Add or replace a match type. The fragment must compile on its own.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        regex: impl Into<String>,
        kind: ParamKind,
    ) -> RoutingResult<()> {
        let name = name.into();
        let regex = regex.into();
        if let Err(source) = regex::Regex::new(&format!("^(?:{})$", regex)) {
            return Err(RoutingError::InvalidMatchType { name, source });
        }
        self.types.insert(name, MatchType { regex, kind });
        Ok(())
    }
}
