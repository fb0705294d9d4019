//! Top-level error type for the approval flow
//!
//! Each module defines its own thiserror enum; `FlowError` aggregates them so
//! a failed run always reports which step broke.

use crate::api::ApiError;
use crate::poller::PollError;
use crate::signer::SignError;
use crate::wallet::KeyError;

#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    #[error("key generation failed: {0}")]
    KeyGeneration(#[from] KeyError),

    #[error("signing failed: {0}")]
    Signing(#[from] SignError),

    #[error("wallet API call failed during {step}: {source}")]
    Api {
        step: &'static str,
        #[source]
        source: ApiError,
    },

    #[error(transparent)]
    Poll(#[from] PollError),

    /// A required field was absent from an external response; the run is
    /// aborted rather than retried.
    #[error("precondition violated: {0}")]
    Precondition(String),
}

impl FlowError {
    pub(crate) fn api(step: &'static str) -> impl FnOnce(ApiError) -> FlowError {
        move |source| FlowError::Api { step, source }
    }
}

pub type FlowResult<T> = Result<T, FlowError>;
