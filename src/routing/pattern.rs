//! Route pattern parsing and compilation.
//!
//! Pattern syntax:
//! - literal text is matched as-is (regex metacharacters are escaped)
//! - `[type:name]` captures a parameter using the regex of match type `type`
//! - `[:name]` uses the default single-segment type
//! - a trailing `?` (`/[i:page]?`) makes the placeholder optional together
//!   with the `/` or `.` immediately before it
//!
//! Every placeholder becomes a capture group named `p0`, `p1`, ... so that
//! parameter names never have to be valid regex group names.

use regex::Regex;

use crate::routing::error::{RoutingError, RoutingResult};
use crate::routing::match_types::{MatchTypes, ParamKind};
use crate::routing::params::{ParamValue, Params};

/// One parsed piece of a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Placeholder {
        kind: String,
        name: String,
        optional: bool,
        /// Separator swallowed along with an optional placeholder.
        prefix: Option<char>,
    },
}

#[derive(Debug, Clone)]
struct ParamSlot {
    name: String,
    kind: ParamKind,
    group: usize,
}

/// A pattern compiled against a fixed set of match types.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    source: String,
    segments: Vec<Segment>,
    regex: Regex,
    slots: Vec<ParamSlot>,
}

impl CompiledPattern {
    /// Parse and compile `pattern`. Unknown match types fail here, never at
    /// match time.
    pub fn compile(pattern: &str, types: &MatchTypes) -> RoutingResult<Self> {
        let segments = parse(pattern)?;

        let mut regex_str = String::from("^");
        let mut pending: Vec<(String, ParamKind)> = Vec::new();
        for segment in &segments {
            match segment {
                Segment::Literal(text) => regex_str.push_str(&regex::escape(text)),
                Segment::Placeholder {
                    kind,
                    name,
                    optional,
                    prefix,
                } => {
                    let match_type = types.get(kind).ok_or_else(|| RoutingError::UnknownMatchType {
                        pattern: pattern.to_string(),
                        kind: kind.clone(),
                    })?;
                    if pending.iter().any(|(n, _)| n == name) {
                        return Err(invalid(pattern, format!("parameter '{}' appears twice", name)));
                    }
                    let group = format!("(?P<p{}>{})", pending.len(), match_type.regex);
                    if *optional {
                        regex_str.push_str("(?:");
                        if let Some(c) = prefix {
                            regex_str.push_str(&regex::escape(&c.to_string()));
                        }
                        regex_str.push_str(&group);
                        regex_str.push_str(")?");
                    } else {
                        regex_str.push_str(&group);
                    }
                    pending.push((name.clone(), match_type.kind));
                }
            }
        }
        regex_str.push('$');

        let regex = Regex::new(&regex_str)
            .map_err(|e| invalid(pattern, format!("does not compile: {}", e)))?;

        let names: Vec<Option<&str>> = regex.capture_names().collect();
        let mut slots = Vec::with_capacity(pending.len());
        for (i, (name, kind)) in pending.into_iter().enumerate() {
            let group_name = format!("p{}", i);
            let group = names
                .iter()
                .position(|n| *n == Some(group_name.as_str()))
                .ok_or_else(|| {
                    invalid(pattern, format!("capture group for '{}' is missing", name))
                })?;
            slots.push(ParamSlot { name, kind, group });
        }

        Ok(Self {
            source: pattern.to_string(),
            segments,
            regex,
            slots,
        })
    }

    /// The pattern as registered.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Parameter names in pattern order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|s| s.name.as_str())
    }

    /// Full-string match. Integer captures that do not fit in `i64` make the
    /// whole match fail.
    pub fn captures(&self, path: &str) -> Option<Params> {
        let caps = self.regex.captures(path)?;
        let mut params = Params::new();
        for slot in &self.slots {
            let Some(m) = caps.get(slot.group) else {
                continue;
            };
            let value = match slot.kind {
                ParamKind::Int => ParamValue::Int(m.as_str().parse().ok()?),
                ParamKind::Str => ParamValue::Str(m.as_str().to_string()),
            };
            params.insert(slot.name.clone(), value);
        }
        Some(params)
    }
}

fn invalid(pattern: &str, reason: impl Into<String>) -> RoutingError {
    RoutingError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: reason.into(),
    }
}

/// Split a pattern into literal and placeholder segments.
pub fn parse(pattern: &str) -> RoutingResult<Vec<Segment>> {
    if !pattern.starts_with('/') {
        return Err(invalid(pattern, "must start with '/'"));
    }

    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '[' => {
                let mut body = String::new();
                let mut closed = false;
                for next in chars.by_ref() {
                    match next {
                        ']' => {
                            closed = true;
                            break;
                        }
                        '[' => return Err(invalid(pattern, "nested '['")),
                        _ => body.push(next),
                    }
                }
                if !closed {
                    return Err(invalid(pattern, "unclosed '['"));
                }
                let (kind, name) = body
                    .split_once(':')
                    .ok_or_else(|| {
                        invalid(pattern, format!("placeholder '[{}]' has no name", body))
                    })?;
                if name.is_empty() || name.contains(':') {
                    return Err(invalid(
                        pattern,
                        format!("placeholder '[{}]' has an invalid name", body),
                    ));
                }

                let optional = chars.peek() == Some(&'?');
                if optional {
                    chars.next();
                }
                let prefix = if optional {
                    match literal.chars().last() {
                        Some(p @ ('/' | '.')) => {
                            literal.pop();
                            Some(p)
                        }
                        _ => None,
                    }
                } else {
                    None
                };

                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                } else if prefix.is_none()
                    && matches!(segments.last(), Some(Segment::Placeholder { .. }))
                {
                    // Without a separator the split between the two captures is ambiguous.
                    return Err(invalid(
                        pattern,
                        format!("placeholder '[{}]' directly follows another placeholder", body),
                    ));
                }
                segments.push(Segment::Placeholder {
                    kind: kind.to_string(),
                    name: name.to_string(),
                    optional,
                    prefix,
                });
            }
            ']' => return Err(invalid(pattern, "unmatched ']'")),
            _ => literal.push(c),
        }
    }
    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(pattern: &str) -> CompiledPattern {
        CompiledPattern::compile(pattern, &MatchTypes::new()).unwrap()
    }

    #[test]
    fn test_parse_segments() {
        let segments = parse("/catalogue/produit/[i:id]").unwrap();
        assert_eq!(
            segments,
            vec![
                Segment::Literal("/catalogue/produit/".into()),
                Segment::Placeholder {
                    kind: "i".into(),
                    name: "id".into(),
                    optional: false,
                    prefix: None,
                },
            ]
        );
    }

    #[test]
    fn test_parse_optional_takes_prefix() {
        let segments = parse("/list/[i:page]?").unwrap();
        assert_eq!(
            segments,
            vec![
                Segment::Literal("/list".into()),
                Segment::Placeholder {
                    kind: "i".into(),
                    name: "page".into(),
                    optional: true,
                    prefix: Some('/'),
                },
            ]
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse("/a/[i:id").is_err());
        assert!(parse("/a/[i]").is_err());
        assert!(parse("/a/[i:]").is_err());
        assert!(parse("/a/]").is_err());
        assert!(parse("/a/[[i:id]]").is_err());
    }

    #[test]
    fn test_pattern_must_be_rooted() {
        let types = MatchTypes::new();
        for pattern in ["", "catalogue/[i:id]", "[i:id]"] {
            let err = CompiledPattern::compile(pattern, &types).unwrap_err();
            assert!(matches!(err, RoutingError::InvalidPattern { .. }), "{:?}", pattern);
        }
        assert!(CompiledPattern::compile("/", &types).is_ok());
    }

    #[test]
    fn test_adjacent_placeholders_rejected() {
        let err = parse("/p/[a:x][i:y]").unwrap_err();
        assert!(matches!(err, RoutingError::InvalidPattern { .. }));
        assert!(parse("/p/[a:x]-[i:y]").is_ok());

        // The optional separator keeps the two captures apart.
        let p = compile("/download/[:file].[a:ext]?");
        assert_eq!(p.captures("/download/notes.txt").unwrap().get_str("ext"), Some("txt"));
        assert!(p.captures("/download/notes").unwrap().get("ext").is_none());
    }

    #[test]
    fn test_integer_capture_is_typed() {
        let p = compile("/catalogue/produit/[i:id]");
        let params = p.captures("/catalogue/produit/42").unwrap();
        assert_eq!(params.get_int("id"), Some(42));
        assert!(p.captures("/catalogue/produit/abc").is_none());
    }

    #[test]
    fn test_literal_metacharacters_are_escaped() {
        let p = compile("/files/report.pdf");
        assert!(p.captures("/files/report.pdf").is_some());
        assert!(p.captures("/files/reportXpdf").is_none());
    }

    #[test]
    fn test_default_type_stops_at_dot_and_slash() {
        let p = compile("/download/[:file].[a:ext]");
        let params = p.captures("/download/notes.txt").unwrap();
        assert_eq!(params.get_str("file"), Some("notes"));
        assert_eq!(params.get_str("ext"), Some("txt"));
        assert!(p.captures("/download/a/b.txt").is_none());
    }

    #[test]
    fn test_optional_placeholder() {
        let p = compile("/list/[i:page]?");
        assert_eq!(p.captures("/list/3").unwrap().get_int("page"), Some(3));
        assert!(p.captures("/list").unwrap().is_empty());
        assert!(p.captures("/list/").is_none());
    }

    #[test]
    fn test_integer_overflow_does_not_match() {
        let p = compile("/item/[i:id]");
        assert!(p.captures("/item/99999999999999999999999").is_none());
    }

    #[test]
    fn test_unknown_type_rejected() {
        let err = CompiledPattern::compile("/a/[slug:s]", &MatchTypes::new()).unwrap_err();
        assert!(matches!(err, RoutingError::UnknownMatchType { ref kind, .. } if kind == "slug"));
    }

    #[test]
    fn test_duplicate_param_rejected() {
        let err = CompiledPattern::compile("/a/[i:id]/[i:id]", &MatchTypes::new()).unwrap_err();
        assert!(matches!(err, RoutingError::InvalidPattern { .. }));
    }

    #[test]
    fn test_param_names_need_not_be_identifiers() {
        let p = compile("/post/[i:post-id]");
        assert_eq!(p.captures("/post/5").unwrap().get_int("post-id"), Some(5));
    }
}
