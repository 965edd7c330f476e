use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use regex::RegexBuilder;
use strum::Display;
use tracing::debug;

use super::rules::ACTION_RULES;
use super::rules::ALL_ROOMS_PHRASE;
use super::rules::DEVICE_SYNONYMS;
use super::rules::ROOM_SYNONYMS;
use super::rules::VALUE_PATTERN;
use super::Action;
use super::Command;
use super::DeviceTarget;
use super::RoomTarget;

static ACTION_MATCHERS: LazyLock<Vec<(Action, Regex)>> = LazyLock::new(|| {
    ACTION_RULES
        .iter()
        .map(|rule| (rule.action, compile(rule.pattern)))
        .collect()
});

static VALUE_MATCHER: LazyLock<Regex> = LazyLock::new(|| compile(VALUE_PATTERN));

fn compile(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .expect("rule patterns are valid regular expressions")
}

/// Which part of a command a rule match decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum MatchKind {
    Action,
    Device,
    Room,
    Value,
}

/// A rule that fired, with the byte range it matched in the lower-cased text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch {
    pub kind: MatchKind,
    pub span: Range<usize>,
}

/// A command together with the evidence for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpretation {
    pub command: Command,

    /// The lower-cased utterance the rules ran against.
    pub text: String,

    /// At most one match per kind, in classification order.
    pub matches: Vec<RuleMatch>,
}

impl Interpretation {
    pub fn match_for(&self, kind: MatchKind) -> Option<&RuleMatch> {
        self.matches.iter().find(|m| m.kind == kind)
    }
}

/// Read a free-text utterance as a command.
///
/// Never fails: text that matches no rule reads as a status request for all
/// devices with no room and no value.
pub fn interpret(raw: &str) -> Command {
    interpret_with_matches(raw).command
}

pub fn interpret_with_matches(raw: &str) -> Interpretation {
    let text = raw.to_lowercase();
    let mut matches = Vec::new();

    let action = classify_action(&text, &mut matches);
    let device = classify_device(&text, &mut matches);
    let room = classify_room(&text, &mut matches);
    let value = extract_value(&text, &mut matches);

    let command = Command {
        action,
        device,
        room,
        value,
        raw: raw.to_string(),
    };
    debug!("Interpreted {:?} as {:?}", raw, command);

    Interpretation {
        command,
        text,
        matches,
    }
}

fn classify_action(text: &str, matches: &mut Vec<RuleMatch>) -> Action {
    for (action, regex) in ACTION_MATCHERS.iter() {
        if let Some(m) = regex.find(text) {
            matches.push(RuleMatch {
                kind: MatchKind::Action,
                span: m.range(),
            });
            return *action;
        }
    }
    Action::Status
}

fn classify_device(text: &str, matches: &mut Vec<RuleMatch>) -> DeviceTarget {
    match find_first(text, DEVICE_SYNONYMS) {
        Some((device_type, span)) => {
            matches.push(RuleMatch {
                kind: MatchKind::Device,
                span,
            });
            DeviceTarget::Only(device_type)
        }
        None => DeviceTarget::All,
    }
}

fn classify_room(text: &str, matches: &mut Vec<RuleMatch>) -> Option<RoomTarget> {
    if let Some(start) = text.find(ALL_ROOMS_PHRASE) {
        matches.push(RuleMatch {
            kind: MatchKind::Room,
            span: start..start + ALL_ROOMS_PHRASE.len(),
        });
        return Some(RoomTarget::All);
    }

    let (room, span) = find_first(text, ROOM_SYNONYMS)?;
    matches.push(RuleMatch {
        kind: MatchKind::Room,
        span,
    });
    Some(RoomTarget::Only(room))
}

fn extract_value(text: &str, matches: &mut Vec<RuleMatch>) -> Option<u32> {
    let captures = VALUE_MATCHER.captures(text)?;
    let digits = captures.get(1)?;

    // Digit runs too long for a u32 are treated as no value at all.
    let value = digits.as_str().parse::<u32>().ok()?;
    if let Some(whole) = captures.get(0) {
        matches.push(RuleMatch {
            kind: MatchKind::Value,
            span: whole.range(),
        });
    }
    Some(value)
}

/// First table entry (in table order, not text order) found in `text`.
fn find_first<T: Copy>(text: &str, table: &[(&str, T)]) -> Option<(T, Range<usize>)> {
    table.iter().find_map(|(key, value)| {
        text.find(key)
            .map(|start| (*value, start..start + key.len()))
    })
}
