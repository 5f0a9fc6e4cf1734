use serde::{Deserialize, Serialize};

/// One recorded player input.
///
/// Serialized flat with a `type` tag so a recording reads as
/// `{"type": "swipe_letter", "timestamp": 1200, "x": 0, "y": 1, "word": "CA"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputEvent {
    /// Milliseconds since the start of the game
    pub timestamp: f64,
    #[serde(flatten)]
    pub kind: InputEventKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEventKind {
    SwipeLetter {
        x: i32,
        y: i32,
        /// Cumulative word at capture time, when the recorder sent one
        #[serde(default, skip_serializing_if = "Option::is_none")]
        word: Option<String>,
    },
    SwipeWord {
        #[serde(default)]
        word: String,
    },
    KeyboardWord {
        #[serde(default)]
        word: String,
        #[serde(default, rename = "tracePath")]
        trace_path: Vec<bool>,
    },
    WordClear,
    WordSubmit {
        #[serde(default)]
        word: String,
    },
    BoardRotation {
        #[serde(default)]
        rotation: f64,
    },
}

impl InputEvent {
    pub fn new(timestamp: f64, kind: InputEventKind) -> Self {
        InputEvent { timestamp, kind }
    }

    pub fn swipe_letter(timestamp: f64, x: i32, y: i32, word: Option<&str>) -> Self {
        Self::new(
            timestamp,
            InputEventKind::SwipeLetter {
                x,
                y,
                word: word.map(str::to_string),
            },
        )
    }

    pub fn swipe_word(timestamp: f64, word: &str) -> Self {
        Self::new(timestamp, InputEventKind::SwipeWord { word: word.to_string() })
    }

    pub fn keyboard_word(timestamp: f64, word: &str, trace_path: Vec<bool>) -> Self {
        Self::new(
            timestamp,
            InputEventKind::KeyboardWord {
                word: word.to_string(),
                trace_path,
            },
        )
    }

    pub fn word_clear(timestamp: f64) -> Self {
        Self::new(timestamp, InputEventKind::WordClear)
    }

    pub fn word_submit(timestamp: f64, word: &str) -> Self {
        Self::new(timestamp, InputEventKind::WordSubmit { word: word.to_string() })
    }

    pub fn board_rotation(timestamp: f64, rotation: f64) -> Self {
        Self::new(timestamp, InputEventKind::BoardRotation { rotation })
    }

    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            InputEventKind::SwipeLetter { .. } => "swipe_letter",
            InputEventKind::SwipeWord { .. } => "swipe_word",
            InputEventKind::KeyboardWord { .. } => "keyboard_word",
            InputEventKind::WordClear => "word_clear",
            InputEventKind::WordSubmit { .. } => "word_submit",
            InputEventKind::BoardRotation { .. } => "board_rotation",
        }
    }
}

/// A single player's input log, in storage order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Recording {
    pub events: Vec<InputEvent>,
}

impl Recording {
    pub fn new(events: Vec<InputEvent>) -> Self {
        Recording { events }
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Largest timestamp in the log. Storage order is not trusted.
    pub fn max_time(&self) -> f64 {
        self.events
            .iter()
            .map(|e| e.timestamp)
            .filter(|t| t.is_finite())
            .fold(0.0, f64::max)
    }

    /// Events that have happened by `time`, in storage order.
    pub fn events_until(&self, time: f64) -> impl Iterator<Item = &InputEvent> {
        self.events.iter().filter(move |e| e.timestamp <= time)
    }
}

impl From<Vec<InputEvent>> for Recording {
    fn from(events: Vec<InputEvent>) -> Self {
        Recording::new(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tagged_events_with_missing_fields() {
        let json = r#"[
            {"type": "swipe_letter", "timestamp": 100, "x": 0, "y": 1},
            {"type": "swipe_letter", "timestamp": 150, "x": 0, "y": 2, "word": "AT"},
            {"type": "keyboard_word", "timestamp": 200, "word": "CAT"},
            {"type": "word_clear", "timestamp": 250},
            {"type": "board_rotation", "timestamp": 300, "rotation": 90}
        ]"#;
        let recording: Recording = serde_json::from_str(json).unwrap();

        assert_eq!(recording.len(), 5);
        assert_eq!(recording.events[0], InputEvent::swipe_letter(100.0, 0, 1, None));
        assert_eq!(recording.events[1], InputEvent::swipe_letter(150.0, 0, 2, Some("AT")));
        assert_eq!(recording.events[2], InputEvent::keyboard_word(200.0, "CAT", vec![]));
        assert_eq!(recording.events[3].kind_name(), "word_clear");
        assert_eq!(recording.events[4], InputEvent::board_rotation(300.0, 90.0));
    }

    #[test]
    fn max_time_ignores_storage_order() {
        let recording = Recording::new(vec![
            InputEvent::word_clear(500.0),
            InputEvent::word_clear(900.0),
            InputEvent::word_clear(300.0),
        ]);
        assert_eq!(recording.max_time(), 900.0);
        assert_eq!(Recording::default().max_time(), 0.0);
    }

    #[test]
    fn events_until_filters_by_timestamp_not_index() {
        let recording = Recording::new(vec![
            InputEvent::word_clear(100.0),
            InputEvent::word_clear(400.0),
            InputEvent::word_clear(200.0),
        ]);
        let stamps: Vec<f64> = recording.events_until(250.0).map(|e| e.timestamp).collect();
        assert_eq!(stamps, vec![100.0, 200.0]);
    }
}
