use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("duplicate port name: {0}")]
    DuplicatePort(String),

    #[error("port not found: {0}")]
    PortNotFound(String),

    #[error("component path not found: {0}")]
    ComponentNotFound(String),

    #[error("wiring error: {0}")]
    Wiring(String),

    #[error("connection not found: {0}")]
    ConnectionNotFound(String),

    #[error("incompatible component structures: {0}")]
    Incompatible(String),

    #[error("{0} is not initialized")]
    NotInitialized(String),

    #[error("initialization of {process} failed: {reason}")]
    Init { process: String, reason: String },

    #[error("execution of {process} failed")]
    Execution {
        process: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("illegal state: {0}")]
    IllegalState(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ProcessError>;
