use parking_lot::RwLock;
use std::sync::Arc;

use crate::output::{Message, QuizOutput, Sound};

#[derive(Clone, Debug, PartialEq)]
pub enum Entry {
    Text(Message),
    Sound(Sound),
}

#[derive(Clone)]
pub struct MockQuizOutput {
    entries: Arc<RwLock<Vec<Entry>>>,
    sound_enabled: Arc<RwLock<bool>>,
}

impl MockQuizOutput {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(Vec::new())),
            sound_enabled: Arc::new(RwLock::new(true)),
        }
    }

    pub fn flush(&self) -> Vec<Entry> {
        std::mem::replace(&mut *self.entries.write(), Vec::new())
    }

    pub fn flush_messages(&self) -> Vec<Message> {
        self.flush()
            .into_iter()
            .filter_map(|entry| match entry {
                Entry::Text(message) => Some(message),
                Entry::Sound(_) => None,
            })
            .collect()
    }

    pub fn contains_message(&self, message: &Message) -> bool {
        self.entries
            .read()
            .iter()
            .any(|entry| matches!(entry, Entry::Text(m) if m == message))
    }

    pub fn played_sound(&self, sound: Sound) -> bool {
        self.entries
            .read()
            .iter()
            .any(|entry| matches!(entry, Entry::Sound(s) if *s == sound))
    }
}

impl QuizOutput for MockQuizOutput {
    fn say(&self, message: &Message) {
        self.entries.write().push(Entry::Text(message.clone()));
    }

    fn play_sound(&self, sound: Sound) {
        if *self.sound_enabled.read() {
            self.entries.write().push(Entry::Sound(sound));
        }
    }

    fn toggle_sound(&self) -> bool {
        let mut enabled = self.sound_enabled.write();
        *enabled = !*enabled;
        *enabled
    }
}
