//! Handler groups and their actions.
//!
//! A handler group is registered under a name with a factory that builds a
//! fresh handler instance per request from the shared route table. Each
//! action is a plain function on that handler type, bound by name.
//!
//! ```text
//! registry.group("CatalogController", CatalogController::new)
//!     .action("product", CatalogController::product);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::dispatch::error::{DispatchError, HandlerError};
use crate::dispatch::reply::Reply;
use crate::dispatch::target::Target;
use crate::routing::{Params, RouteTable};

/// Result of a handler action.
pub type HandlerResult = Result<(), HandlerError>;

/// A bound action: builds the handler and runs one of its methods.
pub type Action = Arc<dyn Fn(&Arc<RouteTable>, &Params, &mut Reply) -> HandlerResult + Send + Sync>;

type Factory<C> = Arc<dyn Fn(Arc<RouteTable>) -> C + Send + Sync>;

/// Actions of one handler group, keyed by action name.
#[derive(Default)]
pub struct HandlerGroup {
    actions: HashMap<String, Action>,
}

impl HandlerGroup {
    pub fn action(&self, name: &str) -> Option<&Action> {
        self.actions.get(name)
    }

    pub fn action_names(&self) -> impl Iterator<Item = &str> {
        self.actions.keys().map(String::as_str)
    }
}

/// Name-indexed handler groups, populated at startup.
#[derive(Default)]
pub struct HandlerRegistry {
    groups: HashMap<String, HandlerGroup>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or extend) the group `name`, whose handlers are built by
    /// `factory`.
    pub fn group<C, F>(&mut self, name: impl Into<String>, factory: F) -> GroupBuilder<'_, C>
    where
        C: 'static,
        F: Fn(Arc<RouteTable>) -> C + Send + Sync + 'static,
    {
        let group = self.groups.entry(name.into()).or_default();
        GroupBuilder {
            group,
            factory: Arc::new(factory),
        }
    }

    pub fn get(&self, group: &str) -> Option<&HandlerGroup> {
        self.groups.get(group)
    }

    /// Find the action a target points at.
    pub fn resolve(&self, target: &Target) -> Result<&Action, DispatchError> {
        let group = self
            .groups
            .get(target.group())
            .ok_or_else(|| DispatchError::UnknownHandlerGroup(target.group().to_string()))?;
        group
            .action(target.action())
            .ok_or_else(|| DispatchError::UnknownAction {
                group: target.group().to_string(),
                action: target.action().to_string(),
            })
    }

    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (name, group) in &self.groups {
            let mut actions: Vec<&str> = group.action_names().collect();
            actions.sort_unstable();
            map.entry(name, &actions);
        }
        map.finish()
    }
}

/// Binds actions to a handler group.
pub struct GroupBuilder<'r, C> {
    group: &'r mut HandlerGroup,
    factory: Factory<C>,
}

impl<C: 'static> GroupBuilder<'_, C> {
    /// Bind `action` under `name`.
    pub fn action(
        self,
        name: impl Into<String>,
        action: fn(&C, &Params, &mut Reply) -> HandlerResult,
    ) -> Self {
        let factory = Arc::clone(&self.factory);
        let bound: Action = Arc::new(move |routes, params, reply| {
            let handler = factory(Arc::clone(routes));
            action(&handler, params, reply)
        });
        self.group.actions.insert(name.into(), bound);
        self
    }
}
