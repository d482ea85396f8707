use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnnotationError {
    #[error("transcript must have a '{tier}' tier")]
    MissingTier { tier: &'static str },
    #[error("malformed {tier} interval #{index}: {message}")]
    MalformedInterval {
        tier: &'static str,
        index: usize,
        message: String,
    },
    #[error("no phone {phone} in word {word}")]
    OutOfRangeEdit { word: usize, phone: usize },
    #[error("focus index {index} is out of range for {len} words")]
    FocusOutOfRange { index: usize, len: usize },
    #[error("degenerate range: end {end} <= start {start}")]
    RangeDegenerate { start: f64, end: f64 },
    #[error("invalid config: {message}")]
    InvalidConfig { message: String },
    #[error("I/O error while {context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON parse error while {context}: {source}")]
    Json {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("{context}: {message}")]
    TextGrid {
        context: &'static str,
        message: String,
    },
}

impl AnnotationError {
    pub(crate) fn malformed(tier: &'static str, index: usize, message: impl Into<String>) -> Self {
        Self::MalformedInterval {
            tier,
            index,
            message: message.into(),
        }
    }

    pub(crate) fn degenerate(start: f64, end: f64) -> Self {
        Self::RangeDegenerate { start, end }
    }

    pub(crate) fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    pub(crate) fn io(context: &'static str, source: std::io::Error) -> Self {
        Self::Io { context, source }
    }

    pub(crate) fn json(context: &'static str, source: serde_json::Error) -> Self {
        Self::Json { context, source }
    }

    pub(crate) fn textgrid(context: &'static str, err: impl std::fmt::Display) -> Self {
        Self::TextGrid {
            context,
            message: err.to_string(),
        }
    }
}
