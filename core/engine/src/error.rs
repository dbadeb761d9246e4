use std::borrow::Cow;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Pipeline failure classes.
///
/// Every async boundary converts its failure into one of these before it
/// reaches user-visible state; only `UnsupportedEnvironment` gates the
/// feature as a whole, the rest are recoverable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// No speech-recognition capability is available in the host environment.
    UnsupportedEnvironment,
    /// Vendor-reported failure during an active recognition session.
    Recognition(String),
    /// A segment or audio payload failed transcription.
    AudioProcessing(String),
    /// Translation call failed or the upstream service is misconfigured.
    Translation(String),
    /// Wiring fault inside the engine itself (missing component, closed channel).
    Internal(Cow<'static, str>),
}

impl PipelineError {
    pub fn internal<T>(message: T) -> Self
    where
        T: Into<Cow<'static, str>>,
    {
        Self::Internal(message.into())
    }

    /// The message shown as the current error state.
    pub fn message(&self) -> String {
        match self {
            Self::UnsupportedEnvironment => {
                "Speech recognition is not supported in this environment".to_string()
            }
            Self::Recognition(message) => message.clone(),
            Self::AudioProcessing(message) => message.clone(),
            Self::Translation(message) => message.clone(),
            Self::Internal(message) => message.to_string(),
        }
    }
}

impl Display for PipelineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl Error for PipelineError {}

pub type PipelineResult<T> = Result<T, PipelineError>;
