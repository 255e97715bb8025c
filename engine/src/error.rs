use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid indicator parameter: {0}")]
    InvalidParameter(String),

    #[error("CSV parsing system error: {source}")]
    CsvSystemError {
        #[from]
        source: csv::Error,
    },

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("CSV data format error: {0}")]
    CsvDataFormatError(String),

    #[error("Market data store error: {0}")]
    MarketDataError(String),

    // Catch-all for anyhow errors when direct conversion is suitable
    #[error(transparent)]
    AnyhowError(#[from] anyhow::Error),
}

impl From<EngineError> for tonic::Status {
    fn from(err: EngineError) -> Self {
        tracing::error!("Mapping EngineError to tonic::Status: {:?}", err); // Log the error source
        match err {
            EngineError::InvalidParameter(msg) => tonic::Status::invalid_argument(format!("Invalid indicator parameter: {}", msg)),
            EngineError::CsvSystemError { source } => tonic::Status::invalid_argument(format!("CSV parsing system error: {}", source)),
            EngineError::IoError { source } => tonic::Status::internal(format!("I/O error: {}", source)),
            EngineError::CsvDataFormatError(msg) => tonic::Status::invalid_argument(format!("CSV data format error: {}", msg)),

            EngineError::MarketDataError(msg) => {
                if msg.to_lowercase().contains("not found") {
                    tonic::Status::not_found(msg)
                } else {
                    tonic::Status::internal(format!("Market data error: {}", msg))
                }
            }
            EngineError::AnyhowError(source) => tonic::Status::internal(format!("An internal error occurred: {}", source)),
        }
    }
}
