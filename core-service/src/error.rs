use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Core initialization failed: {0}")]
    InitializationFailed(String),

    #[error("Runtime error: {0}")]
    Runtime(#[from] core_runtime::Error),

    #[error("Dispatch error: {0}")]
    Dispatch(#[from] core_dispatch::DispatchError),
}

impl CoreError {
    /// True when the call was skipped because the network is unreachable
    pub fn is_offline(&self) -> bool {
        matches!(
            self,
            CoreError::Dispatch(core_dispatch::DispatchError::Offline)
        )
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
