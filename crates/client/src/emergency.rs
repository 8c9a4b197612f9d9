//! Full-screen emergency overlay driven by `emergency_alerts` inserts.
//!
//! `Idle -> Active(alert) -> Idle`. A new active alert replaces whatever is
//! shown and is read aloud; `dismiss` silences it. Nothing is sent back to
//! the server.

use site_events::{tables, RowChange, SiteEvent};

use crate::models::EmergencyAlert;

#[derive(Debug, Clone, PartialEq)]
pub struct SpeechOptions {
    /// BCP 47 language tag.
    pub language: String,
    pub rate: f32,
    pub pitch: f32,
}

impl Default for SpeechOptions {
    fn default() -> Self {
        Self {
            language: "tr-TR".to_string(),
            rate: 0.9,
            pitch: 1.0,
        }
    }
}

/// Text-to-speech output.
pub trait Speaker: Send {
    fn speak(&mut self, text: &str, options: &SpeechOptions);
    /// Stop any speech in progress. Must be safe to call when silent.
    fn stop(&mut self);
}

/// Speaker that writes to the log instead of an audio device.
#[derive(Debug, Default)]
pub struct LogSpeaker;

impl Speaker for LogSpeaker {
    fn speak(&mut self, text: &str, options: &SpeechOptions) {
        tracing::warn!(language = %options.language, rate = options.rate, "EMERGENCY: {text}");
    }

    fn stop(&mut self) {
        tracing::debug!("Speech stopped");
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum OverlayState {
    Idle,
    Active(EmergencyAlert),
}

pub struct EmergencyOverlay<S: Speaker> {
    state: OverlayState,
    speaker: S,
    options: SpeechOptions,
}

impl<S: Speaker> EmergencyOverlay<S> {
    pub fn new(speaker: S) -> Self {
        Self::with_options(speaker, SpeechOptions::default())
    }

    pub fn with_options(speaker: S, options: SpeechOptions) -> Self {
        Self {
            state: OverlayState::Idle,
            speaker,
            options,
        }
    }

    pub fn state(&self) -> &OverlayState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, OverlayState::Active(_))
    }

    /// Feed a realtime event. Returns `true` if the overlay now shows it.
    pub fn handle_event(&mut self, event: &SiteEvent) -> bool {
        if event.table != tables::EMERGENCY_ALERTS || event.change != RowChange::Insert {
            return false;
        }
        match serde_json::from_value::<EmergencyAlert>(event.record.clone()) {
            Ok(alert) => self.show(alert),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    record_id = event.record_id,
                    "Unparseable emergency alert"
                );
                false
            }
        }
    }

    /// Display `alert` and read it aloud. Inactive alerts are ignored.
    pub fn show(&mut self, alert: EmergencyAlert) -> bool {
        if !alert.active {
            tracing::debug!(alert_id = alert.id, "Ignoring inactive emergency alert");
            return false;
        }
        self.speaker.stop();
        self.speaker.speak(&alert.message, &self.options);
        tracing::info!(
            alert_id = alert.id,
            alert_type = %alert.alert_type,
            "Emergency overlay shown"
        );
        self.state = OverlayState::Active(alert);
        true
    }

    pub fn dismiss(&mut self) {
        self.speaker.stop();
        if let OverlayState::Active(alert) = &self.state {
            tracing::info!(alert_id = alert.id, "Emergency overlay dismissed");
        }
        self.state = OverlayState::Idle;
    }
}

impl<S: Speaker> Drop for EmergencyOverlay<S> {
    fn drop(&mut self) {
        self.speaker.stop();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use serde_json::json;

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Speak(String, SpeechOptions),
        Stop,
    }

    #[derive(Clone, Default)]
    struct RecordingSpeaker(Arc<Mutex<Vec<Call>>>);

    impl RecordingSpeaker {
        fn calls(&self) -> Vec<Call> {
            self.0.lock().unwrap().clone()
        }
    }

    impl Speaker for RecordingSpeaker {
        fn speak(&mut self, text: &str, options: &SpeechOptions) {
            self.0
                .lock()
                .unwrap()
                .push(Call::Speak(text.to_string(), options.clone()));
        }

        fn stop(&mut self) {
            self.0.lock().unwrap().push(Call::Stop);
        }
    }

    fn alert_insert(id: i64, message: &str, active: bool) -> SiteEvent {
        SiteEvent::inserted(
            tables::EMERGENCY_ALERTS,
            id,
            &json!({ "id": id, "type": "fire", "message": message, "active": active }),
        )
    }

    #[test]
    fn active_insert_shows_and_speaks() {
        let speaker = RecordingSpeaker::default();
        let mut overlay = EmergencyOverlay::new(speaker.clone());

        assert!(overlay.handle_event(&alert_insert(1, "Yangın! Binayı terk edin", true)));

        assert!(overlay.is_active());
        assert_eq!(
            speaker.calls(),
            vec![
                Call::Stop,
                Call::Speak("Yangın! Binayı terk edin".into(), SpeechOptions::default()),
            ]
        );
    }

    #[test]
    fn default_voice_is_turkish() {
        let options = SpeechOptions::default();
        assert_eq!(options.language, "tr-TR");
        assert_eq!(options.rate, 0.9);
        assert_eq!(options.pitch, 1.0);
    }

    #[test]
    fn inactive_alerts_are_ignored() {
        let speaker = RecordingSpeaker::default();
        let mut overlay = EmergencyOverlay::new(speaker.clone());

        assert!(!overlay.handle_event(&alert_insert(1, "Drill over", false)));
        assert_eq!(overlay.state(), &OverlayState::Idle);
        assert!(speaker.calls().is_empty());
    }

    #[test]
    fn newer_alert_replaces_the_current_one() {
        let speaker = RecordingSpeaker::default();
        let mut overlay = EmergencyOverlay::new(speaker.clone());

        overlay.handle_event(&alert_insert(1, "first", true));
        overlay.handle_event(&alert_insert(2, "second", true));

        assert_matches::assert_matches!(overlay.state(), OverlayState::Active(a) if a.id == 2);
        let calls = speaker.calls();
        assert_eq!(calls[2], Call::Stop);
        assert_eq!(calls[3], Call::Speak("second".into(), SpeechOptions::default()));
    }

    #[test]
    fn updates_and_other_tables_do_not_trigger() {
        let mut overlay = EmergencyOverlay::new(RecordingSpeaker::default());
        let update = SiteEvent::updated(
            tables::EMERGENCY_ALERTS,
            1,
            &json!({ "id": 1, "type": "fire", "message": "x", "active": true }),
        );
        let guest = SiteEvent::inserted(tables::GUESTS, 1, &json!({ "id": 1 }));

        assert!(!overlay.handle_event(&update));
        assert!(!overlay.handle_event(&guest));
        assert!(!overlay.is_active());
    }

    #[test]
    fn dismiss_stops_speech_and_returns_to_idle() {
        let speaker = RecordingSpeaker::default();
        let mut overlay = EmergencyOverlay::new(speaker.clone());
        overlay.handle_event(&alert_insert(1, "Deprem", true));

        overlay.dismiss();

        assert_eq!(overlay.state(), &OverlayState::Idle);
        assert_eq!(speaker.calls().last(), Some(&Call::Stop));
    }

    #[test]
    fn dropping_the_overlay_stops_speech() {
        let speaker = RecordingSpeaker::default();
        let overlay = EmergencyOverlay::new(speaker.clone());
        drop(overlay);
        assert_eq!(speaker.calls(), vec![Call::Stop]);
    }
}
