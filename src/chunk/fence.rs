//! Fenced code block tracking.

use once_cell::sync::Lazy;
use regex::Regex;

/// Line a chunk is terminated with when it has to end inside a fence.
pub const FENCE_CLOSER: &str = "```";

static FENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*```").expect("valid fence delimiter regex"));

/// A run of three backticks, optionally followed by a language tag.
pub fn is_fence_delimiter(line: &str) -> bool {
    FENCE_RE.is_match(line)
}

/// Open/closed state of the fence at the current position, remembering the
/// line that opened it so it can be re-emitted at the top of the next chunk.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FenceState {
    opener: Option<String>,
}

impl FenceState {
    pub fn is_open(&self) -> bool {
        self.opener.is_some()
    }

    pub fn opener(&self) -> Option<&str> {
        self.opener.as_deref()
    }

    /// Advance past `line`. Returns true when the line was a delimiter.
    pub fn observe(&mut self, line: &str) -> bool {
        if !is_fence_delimiter(line) {
            return false;
        }
        if self.opener.take().is_none() {
            self.opener = Some(line.to_string());
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_delimiters_with_and_without_language_tag() {
        assert!(is_fence_delimiter("```"));
        assert!(is_fence_delimiter("```diff"));
        assert!(is_fence_delimiter("   ```yaml"));
        assert!(!is_fence_delimiter("``"));
        assert!(!is_fence_delimiter("text ```"));
        assert!(!is_fence_delimiter(""));
    }

    #[test]
    fn observe_toggles_and_remembers_opener() {
        let mut state = FenceState::default();
        assert!(!state.observe("plain"));
        assert!(!state.is_open());

        assert!(state.observe("```diff"));
        assert_eq!(state.opener(), Some("```diff"));

        assert!(!state.observe("+ added"));
        assert!(state.is_open());

        assert!(state.observe("```"));
        assert!(!state.is_open());
        assert_eq!(state.opener(), None);
    }
}
