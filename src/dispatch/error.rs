//! Dispatch error definitions.

use thiserror::Error;

/// Error type returned by handler actions. The dispatcher never inspects it.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while dispatching a request.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Target is not of the form `Group#action`.
    #[error("malformed target '{0}': expected 'Group#action'")]
    MalformedTarget(String),

    /// No handler group registered under this name.
    #[error("unknown handler group '{0}'")]
    UnknownHandlerGroup(String),

    /// The group exists but has no such action.
    #[error("handler group '{group}' has no action '{action}'")]
    UnknownAction { group: String, action: String },

    /// The handler action itself failed.
    #[error("handler '{target}' failed: {source}")]
    Handler {
        target: String,
        #[source]
        source: HandlerError,
    },

    /// The not-found handler could not run. Always a configuration problem.
    #[error("not-found handler failed: {0}")]
    Fallback(#[source] Box<DispatchError>),
}

impl DispatchError {
    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            DispatchError::MalformedTarget(_) => "malformed_target",
            DispatchError::UnknownHandlerGroup(_) => "unknown_group",
            DispatchError::UnknownAction { .. } => "unknown_action",
            DispatchError::Handler { .. } => "handler",
            DispatchError::Fallback(_) => "fallback",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DispatchError::UnknownAction {
            group: "MainController".into(),
            action: "missing".into(),
        };
        assert_eq!(
            err.to_string(),
            "handler group 'MainController' has no action 'missing'"
        );

        let err = DispatchError::Fallback(Box::new(DispatchError::UnknownHandlerGroup("X".into())));
        assert!(err.to_string().contains("unknown handler group 'X'"));
        assert_eq!(err.kind(), "fallback");
    }
}
