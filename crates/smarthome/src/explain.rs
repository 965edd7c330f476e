//! Annotated reports showing why an utterance was read the way it was.

use std::ops::Range;

use ariadne::Color;
use ariadne::Config;
use ariadne::IndexType;
use ariadne::Label;
use ariadne::Report;
use ariadne::ReportKind;
use ariadne::Source;

use crate::command::Command;
use crate::command::Interpretation;
use crate::command::MatchKind;

const SOURCE_ID: &str = "utterance";
const UNMATCHED_HELP: &str = "no rule matched, read as a status request for all devices";

/// Render an interpretation as a report over the lower-cased utterance, one
/// label per rule that fired, followed by the resulting command.
pub fn explain(interpretation: &Interpretation) -> String {
    let command = &interpretation.command;
    let text = interpretation.text.as_str();

    let mut report = Report::build(ReportKind::Advice, span(0..text.len()))
        .with_config(
            Config::default()
                .with_color(false)
                .with_index_type(IndexType::Byte),
        )
        .with_message(format!("Interpreted {:?}", command.raw));

    for rule_match in &interpretation.matches {
        report = report.with_label(
            Label::new(span(rule_match.span.clone()))
                .with_message(label(rule_match.kind, command))
                .with_color(color(rule_match.kind)),
        );
    }

    // Without labels ariadne prints only the header, so notes and help for an
    // unmatched utterance are written after the report.
    let matched = !interpretation.matches.is_empty();
    if matched {
        report = report.with_note(summary(command));
    }

    let mut output = Vec::new();
    report
        .finish()
        .write((SOURCE_ID.to_string(), Source::from(text)), &mut output)
        .ok();

    let mut explained = String::from_utf8_lossy(&output).to_string();
    if !matched {
        if !explained.is_empty() && !explained.ends_with('\n') {
            explained.push('\n');
        }
        explained.push_str(&format!("Help: {}\n", UNMATCHED_HELP));
        explained.push_str(&format!("Note: {}\n", summary(command)));
    }
    explained
}

fn span(range: Range<usize>) -> (String, Range<usize>) {
    (SOURCE_ID.to_string(), range)
}

fn label(kind: MatchKind, command: &Command) -> String {
    match kind {
        MatchKind::Action => format!("action: {}", command.action),
        MatchKind::Device => format!("device: {}", command.device),
        MatchKind::Room => match command.room {
            Some(room) => format!("room: {}", room),
            None => "room".to_string(),
        },
        MatchKind::Value => match command.value {
            Some(value) => format!("value: {}", value),
            None => "value".to_string(),
        },
    }
}

fn color(kind: MatchKind) -> Color {
    match kind {
        MatchKind::Action => Color::Green,
        MatchKind::Device => Color::Cyan,
        MatchKind::Room => Color::Yellow,
        MatchKind::Value => Color::Magenta,
    }
}

fn summary(command: &Command) -> String {
    let room = command
        .room
        .map(|room| room.to_string())
        .unwrap_or_else(|| "-".to_string());
    let value = command
        .value
        .map(|value| value.to_string())
        .unwrap_or_else(|| "-".to_string());
    format!(
        "action={} device={} room={} value={}",
        command.action, command.device, room, value
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::interpret_with_matches;

    #[test]
    fn test_explain_labels_each_match() {
        let report = explain(&interpret_with_matches("Turn on the kitchen light at 40%"));
        assert!(report.contains("turn on the kitchen light at 40%"));
        assert!(report.contains("action: turn_on"));
        assert!(report.contains("device: light"));
        assert!(report.contains("room: kitchen"));
        assert!(report.contains("value: 40"));
        assert!(report.contains("action=turn_on device=light room=kitchen value=40"));
    }

    #[test]
    fn test_explain_fallback() {
        let report = explain(&interpret_with_matches("good morning"));
        assert!(report.contains("no rule matched"));
        assert!(report.contains("action=status device=all room=- value=-"));
    }

    #[test]
    fn test_explain_empty_utterance() {
        let report = explain(&interpret_with_matches(""));
        assert!(report.contains("Interpreted \"\""));
        assert!(report.contains("no rule matched"));
        assert!(report.contains("action=status device=all room=- value=-"));
    }

    #[test]
    fn test_explain_summary_follows_labels() {
        let report = explain(&interpret_with_matches("make the fan faster"));
        let label_at = report.find("device: fan").unwrap();
        let summary_at = report.find("action=increase device=fan room=- value=-").unwrap();
        assert!(label_at < summary_at);
        assert!(!report.contains("no rule matched"));
    }
}
