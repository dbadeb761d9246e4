use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, PipelineResult};

/// Translation target selected by the user.
///
/// Changing the target takes effect on the next translation call only;
/// in-flight calls keep the language captured at invocation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TargetLanguage {
    Es,
    Fr,
    De,
    It,
    Ja,
}

impl TargetLanguage {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Es => "ES",
            Self::Fr => "FR",
            Self::De => "DE",
            Self::It => "IT",
            Self::Ja => "JA",
        }
    }

    pub fn from_code(code: &str) -> PipelineResult<Self> {
        match code.to_ascii_uppercase().as_str() {
            "ES" => Ok(Self::Es),
            "FR" => Ok(Self::Fr),
            "DE" => Ok(Self::De),
            "IT" => Ok(Self::It),
            "JA" => Ok(Self::Ja),
            other => Err(PipelineError::Translation(format!(
                "unknown target language: {}",
                other
            ))),
        }
    }
}

impl std::fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One recognized alternative inside a result batch. Interim results are
/// observed for live display only; only final results reach the transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognitionResult {
    pub text: String,
    pub is_final: bool,
}

/// The newly-available result range of one recognition callback.
///
/// `result_index` is the absolute index of the first entry in `results`
/// within the session's full result list; batches arrive in order and each
/// carries only results from `result_index` onward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultBatch {
    pub result_index: usize,
    pub results: Vec<RecognitionResult>,
}

/// A fixed-duration chunk of encoded audio captured from a live stream.
///
/// Transient: exists only between capture and transcription-call
/// completion. `seq` is the emission order assigned by the audio source;
/// sources number segments consecutively from zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioSegment {
    pub seq: u64,
    pub data: Vec<u8>,
    pub timestamp_ms: u64,
    pub duration_ms: u64,
}

/// Ordered, append-only sequence of finalized text fragments.
///
/// Each append stores the fragment followed by a single-space separator.
/// The buffer never reorders or deletes; it is reset only by an explicit
/// clear.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcript {
    text: String,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one finalized fragment plus its trailing separator.
    pub fn append(&mut self, fragment: &str) {
        self.text.push_str(fragment);
        self.text.push(' ');
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }
}
