//! Text-area display composition.
//!
//! The dictated transcript and the user's free-text edits are two
//! independent inputs merged into one display value at render time. Keeping
//! them separate means a dictation append can never clobber keystrokes the
//! user typed while the append was in flight.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayBuffer {
    dictated: String,
    edited: String,
}

impl DisplayBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one finalized dictation fragment plus its trailing separator.
    pub fn append_dictated(&mut self, fragment: &str) {
        self.dictated.push_str(fragment);
        self.dictated.push(' ');
    }

    /// Replace the user-edited text. Dictated text is untouched.
    pub fn set_edited(&mut self, text: impl Into<String>) {
        self.edited = text.into();
    }

    pub fn dictated(&self) -> &str {
        &self.dictated
    }

    pub fn edited(&self) -> &str {
        &self.edited
    }

    /// The composed display value: user edits first, dictation appended.
    pub fn merged(&self) -> String {
        if self.edited.is_empty() {
            return self.dictated.clone();
        }
        if self.dictated.is_empty() {
            return self.edited.clone();
        }
        format!("{} {}", self.edited.trim_end(), self.dictated)
    }

    pub fn clear(&mut self) {
        self.dictated.clear();
        self.edited.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merged_is_edits_then_dictation() {
        let mut buffer = DisplayBuffer::new();
        buffer.set_edited("my notes:");
        buffer.append_dictated("Hello");
        buffer.append_dictated("world");
        assert_eq!(buffer.merged(), "my notes: Hello world ");
    }

    #[test]
    fn append_does_not_disturb_edits() {
        let mut buffer = DisplayBuffer::new();
        buffer.set_edited("typing along");
        let before = buffer.edited().to_string();
        buffer.append_dictated("dictated");
        assert_eq!(buffer.edited(), before);
    }

    #[test]
    fn empty_sides_merge_cleanly() {
        let mut buffer = DisplayBuffer::new();
        assert_eq!(buffer.merged(), "");
        buffer.append_dictated("only dictation");
        assert_eq!(buffer.merged(), "only dictation ");

        let mut buffer = DisplayBuffer::new();
        buffer.set_edited("only edits");
        assert_eq!(buffer.merged(), "only edits");
    }

    #[test]
    fn clear_resets_both_inputs() {
        let mut buffer = DisplayBuffer::new();
        buffer.set_edited("a");
        buffer.append_dictated("b");
        buffer.clear();
        assert_eq!(buffer.merged(), "");
    }
}
