#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown scenario {0:?}")]
    UnknownScenario(String),

    #[error("IO error")]
    IOError(#[from] std::io::Error),

    #[error("Config parse error")]
    ParseError(#[from] serde_json::Error),
}
