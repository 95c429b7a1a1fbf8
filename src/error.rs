/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("API key is missing")]
    MissingApiKey,

    /// A fault that carries no human-readable detail (e.g. a panicked fetch task)
    #[error("Unknown error")]
    Unknown,

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Human-readable detail of the fault, if it has one.
    ///
    /// Wrapped errors report their own message; string variants report the
    /// inner text without the variant prefix.
    pub fn description(&self) -> Option<String> {
        let detail = match self {
            AppError::HttpClient(e) => e.to_string(),
            AppError::ExternalApi(msg)
            | AppError::MalformedResponse(msg)
            | AppError::Internal(msg) => msg.clone(),
            AppError::MissingApiKey => self.to_string(),
            AppError::Unknown => return None,
        };

        let detail = detail.trim();
        if detail.is_empty() {
            None
        } else {
            Some(detail.to_string())
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
