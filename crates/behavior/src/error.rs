//! Behavior stack errors.

use ledgewalk_physics::ConfigError;
use thiserror::Error;

use crate::handler::HandlerId;

/// Errors raised by the behavior stack and actor setup.
///
/// `EmptyStack` and `Config` are setup defects: the actor's update is
/// aborted and the error logged. The rest reject a single request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BehaviorError {
    #[error("behavior stack is empty")]
    EmptyStack,

    #[error("cannot remove the only handler on the stack")]
    LastHandler,

    #[error("handler index {index} out of range for stack of {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("no handler with id {0} on the stack")]
    UnknownHandler(HandlerId),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
