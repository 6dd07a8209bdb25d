use thiserror::Error;

/// A turn that could not produce a reply.
///
/// Command failures never end up here: they are rendered into the reply
/// text instead. Only the state flush can fail a turn.
#[derive(Debug, Error)]
pub enum TurnError {
    #[error("conversation state flush failed: {0}")]
    StateFlush(#[from] charlie_state::StateError),
}

/// Base64 decoding failures. The display text is what the user sees.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("invalid input")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("invalid utf-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

/// Weather lookup failures, rendered inline as `, error=<diagnostic>`.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("no weather API key configured")]
    NoApiKey,

    /// Built with the request URL stripped; see `WeatherClient::fetch`.
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    #[error("weather API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("invalid weather response: {0}")]
    Parse(String),

    #[error("weather response is missing `{0}`")]
    MissingField(&'static str),
}
