use std::io;
use std::time::Duration;

use tokio::time::Instant;

use super::*;
use crate::command::Action;
use crate::config::AssistantConfig;
use crate::feedback::AssistantFeedback;
use crate::feedback::Emoji;
use crate::feedback::Mood;
use crate::home::seed_collection;
use crate::home::DeviceCollection;
use crate::render::Renderer;

fn assistant() -> AssistantConfig {
    AssistantConfig {
        wake_phrase: Some("hey home".to_string()),
        feedback_timeout_ms: 5000,
        greeting: "Hello".to_string(),
    }
}

/// Records everything it is asked to show.
#[derive(Default)]
struct RecordingRenderer {
    renders: Vec<DeviceCollection>,
    feedback: Vec<AssistantFeedback>,
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, devices: &DeviceCollection) -> io::Result<()> {
        self.renders.push(devices.clone());
        Ok(())
    }

    fn show_feedback(&mut self, feedback: &AssistantFeedback, _mood: Mood) -> io::Result<()> {
        self.feedback.push(feedback.clone());
        Ok(())
    }
}

#[test]
fn test_starts_with_visible_greeting() {
    let engine = Engine::new(seed_collection(), &assistant());
    assert_eq!(engine.feedback().message, "Hello");
    assert_eq!(engine.feedback().emoji, Emoji::WavingHand);
    assert!(engine.feedback().is_visible);
    assert_eq!(engine.devices(), &seed_collection());
}

#[test]
fn test_greeting_sets_initial_mood() {
    let engine = Engine::new(seed_collection(), &assistant());
    assert_eq!(engine.mood(), Mood::Happy);

    let config = AssistantConfig {
        greeting: "Checking the house for you".to_string(),
        ..assistant()
    };
    let engine = Engine::new(seed_collection(), &config);
    assert_eq!(engine.mood(), Mood::Thinking);

    let config = AssistantConfig {
        greeting: "Turning on the lights".to_string(),
        ..assistant()
    };
    let engine = Engine::new(seed_collection(), &config);
    assert_eq!(engine.mood(), Mood::Excited);
}

#[test]
fn test_handle_utterance_updates_devices_and_feedback() {
    let mut engine = Engine::new(seed_collection(), &assistant());
    let command = engine.handle_utterance("Turn on living room lights");

    assert_eq!(command.action, Action::TurnOn);
    assert!(engine.devices().get("light_living").unwrap().is_on);
    assert!(!engine.devices().get("light_kitchen").unwrap().is_on);
    assert_eq!(engine.feedback().message, "Turning on lights in the living room");
    assert_eq!(engine.feedback().emoji, Emoji::LightBulb);
    assert!(engine.feedback().is_visible);
    assert_eq!(engine.mood(), Mood::Excited);
}

#[test]
fn test_feedback_hides_after_timeout() {
    let mut engine = Engine::new(seed_collection(), &assistant());
    engine.handle_utterance("status");

    assert!(!engine.hide_feedback_if_due(Instant::now()));
    assert!(engine.feedback().is_visible);

    let later = Instant::now() + Duration::from_millis(5000);
    assert!(engine.hide_feedback_if_due(later));
    assert!(!engine.feedback().is_visible);
    assert_eq!(engine.feedback().message, "Checking status of all devices");

    // Already hidden.
    assert!(!engine.hide_feedback_if_due(later));
    // Hiding does not change the mood.
    assert_eq!(engine.mood(), Mood::Thinking);
}

#[test]
fn test_toggle_unknown_device() {
    let mut engine = Engine::new(seed_collection(), &assistant());
    assert!(!engine.toggle_device("garage"));
    assert_eq!(engine.devices(), &seed_collection());

    assert!(engine.toggle_device("fan_bedroom"));
    assert!(engine.devices().get("fan_bedroom").unwrap().is_on);
}

#[test]
fn test_toggle_leaves_feedback_alone() {
    let mut engine = Engine::new(seed_collection(), &assistant());
    let outcome = engine.handle_event(InputEvent::Toggle("switch_kitchen".to_string()));
    assert_eq!(
        outcome,
        Outcome::Toggled {
            id: "switch_kitchen".to_string(),
            known: true
        }
    );
    assert_eq!(engine.feedback().message, "Hello");
}

#[test]
fn test_speech_requires_wake_phrase() {
    let mut engine = Engine::new(seed_collection(), &assistant());

    let outcome = engine.handle_event(InputEvent::Transcript("turn on the fans".to_string()));
    assert_eq!(outcome, Outcome::Ignored);
    assert!(!engine.devices().get("fan_living").unwrap().is_on);

    let outcome = engine.handle_event(InputEvent::Transcript("hey home".to_string()));
    assert_eq!(outcome, Outcome::Ignored);
    assert!(engine.is_listening());

    let outcome = engine.handle_event(InputEvent::Transcript("turn on the fans".to_string()));
    assert!(matches!(outcome, Outcome::Commanded(_)));
    assert!(engine.devices().get("fan_living").unwrap().is_on);
    assert!(engine.devices().get("fan_bedroom").unwrap().is_on);
}

#[test]
fn test_speech_error_never_reaches_core() {
    let mut engine = Engine::new(seed_collection(), &assistant());
    engine.handle_event(InputEvent::StartListening);
    let outcome = engine.handle_event(InputEvent::SpeechError("no-speech".to_string()));
    assert_eq!(outcome, Outcome::Ignored);
    assert!(!engine.is_listening());
    assert_eq!(engine.devices(), &seed_collection());
    assert_eq!(engine.feedback().message, "Hello");
}

#[test]
fn test_blank_text_is_ignored() {
    let mut engine = Engine::new(seed_collection(), &assistant());
    assert_eq!(engine.handle_event(InputEvent::Text("  ".to_string())), Outcome::Ignored);
    assert_eq!(engine.feedback().message, "Hello");
}

#[tokio::test]
async fn test_run_processes_events_in_order() {
    let engine = Engine::new(seed_collection(), &assistant());
    let (tx, rx) = input_channel();

    let events = [
        InputEvent::Text("turn on the lights".to_string()),
        InputEvent::Text("dimmer lights".to_string()),
        InputEvent::Text("dimmer bedroom lights".to_string()),
        InputEvent::Toggle("switch_kitchen".to_string()),
        InputEvent::Toggle("nope".to_string()),
        InputEvent::Text("".to_string()),
    ];
    for event in events {
        tx.send(event).await.unwrap();
    }
    drop(tx);

    let mut renderer = RecordingRenderer::default();
    let devices = engine.run(rx, &mut renderer).await.unwrap();

    // Bedroom light: 80 -> 60 -> 40, still on.
    let bedroom = devices.get("light_bedroom").unwrap();
    assert_eq!(bedroom.brightness(), Some(40));
    assert!(bedroom.is_on);

    let living = devices.get("light_living").unwrap();
    assert_eq!(living.brightness(), Some(80));
    assert!(living.is_on);

    assert!(devices.get("switch_kitchen").unwrap().is_on);

    // Initial render plus one per command and one for the known toggle.
    assert_eq!(renderer.renders.len(), 5);
    let messages: Vec<_> = renderer.feedback.iter().map(|f| f.message.as_str()).collect();
    assert_eq!(
        messages,
        vec![
            "Hello",
            "Turning on lights",
            "Decreasing lights",
            "Decreasing lights in the bedroom room",
        ]
    );
}

#[tokio::test]
async fn test_run_hides_feedback_when_timer_fires() {
    let config = AssistantConfig {
        feedback_timeout_ms: 10,
        ..assistant()
    };
    let engine = Engine::new(seed_collection(), &config);
    let (tx, rx) = input_channel();

    let sender = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        drop(tx);
    });

    let mut renderer = RecordingRenderer::default();
    engine.run(rx, &mut renderer).await.unwrap();
    sender.await.unwrap();

    assert_eq!(renderer.feedback.len(), 2);
    assert!(renderer.feedback[0].is_visible);
    assert!(!renderer.feedback[1].is_visible);
    assert_eq!(renderer.feedback[1].message, "Hello");
}
