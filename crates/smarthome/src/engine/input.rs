use regex::Regex;
use regex::RegexBuilder;
use tracing::debug;
use tracing::info;
use tracing::warn;

/// Decides which raw strings from typing and speech become utterances.
///
/// Speech is gated by a wake phrase when one is configured: hearing the phrase
/// opens a one-shot listening window, and only the next transcript (or the text
/// following the phrase in the same transcript) is passed on.
#[derive(Debug)]
pub struct InputSurface {
    wake_phrase: Option<Regex>,
    listening: bool,
}

impl InputSurface {
    /// A blank wake phrase is the same as none: every transcript is passed on.
    pub fn new(wake_phrase: Option<&str>) -> Self {
        let wake_phrase = wake_phrase
            .map(str::trim)
            .filter(|phrase| !phrase.is_empty())
            .and_then(|phrase| {
                RegexBuilder::new(&regex::escape(phrase))
                    .case_insensitive(true)
                    .build()
                    .ok()
            });

        Self {
            wake_phrase,
            listening: false,
        }
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn start_listening(&mut self) {
        debug!("Listening for speech");
        self.listening = true;
    }

    /// Typed text is passed on as-is unless it is blank.
    pub fn typed(&self, text: &str) -> Option<String> {
        if text.trim().is_empty() {
            return None;
        }
        Some(text.to_string())
    }

    pub fn transcript(&mut self, transcript: &str) -> Option<String> {
        if let Some(wake_phrase) = &self.wake_phrase {
            if let Some(m) = wake_phrase.find(transcript) {
                let rest = transcript[m.end()..]
                    .trim_start_matches(|c: char| c.is_whitespace() || c.is_ascii_punctuation())
                    .trim_end();
                if rest.is_empty() {
                    info!("Wake phrase heard, listening");
                    self.listening = true;
                    return None;
                }
                self.listening = false;
                return Some(rest.to_string());
            }

            if !self.listening {
                debug!("Ignoring transcript {:?}, not listening", transcript);
                return None;
            }
        }

        self.listening = false;
        let text = transcript.trim();
        if text.is_empty() {
            None
        } else {
            Some(text.to_string())
        }
    }

    pub fn speech_error(&mut self, error: &str) {
        warn!("Speech recognition error: {}", error);
        self.listening = false;
    }

    pub fn speech_ended(&mut self) {
        self.listening = false;
    }
}
