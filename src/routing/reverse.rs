//! Reverse URL generation.
//!
//! Generation is permissive: supplied values are written as-is and are not
//! checked against the placeholder's match type, so a URL generated with a
//! value the type would reject will not match back.

use crate::routing::error::{RoutingError, RoutingResult};
use crate::routing::params::Params;
use crate::routing::pattern::Segment;
use crate::routing::router::RouteTable;

impl RouteTable {
    /// Build the URL of the route called `name`, base path included.
    pub fn generate(&self, name: &str, params: &Params) -> RoutingResult<String> {
        let route = self
            .route(name)
            .ok_or_else(|| RoutingError::UnknownRouteName(name.to_string()))?;

        let mut url = String::from(self.base_path());
        for segment in route.pattern.segments() {
            match segment {
                Segment::Literal(text) => url.push_str(text),
                Segment::Placeholder {
                    name: param,
                    optional,
                    prefix,
                    ..
                } => match params.get(param) {
                    Some(value) => {
                        if let Some(c) = prefix {
                            url.push(*c);
                        }
                        url.push_str(&value.to_string());
                    }
                    None if *optional => {}
                    None => {
                        return Err(RoutingError::MissingParameter {
                            route: name.to_string(),
                            param: param.clone(),
                        })
                    }
                },
            }
        }
        Ok(url)
    }
}
