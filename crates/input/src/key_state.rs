//! Pressed-key tracking for game loops.
//!
//! `KeyState` is owned by whoever runs the loop and fed every key event; the
//! loop then asks which keys are held. Nothing here is global.
//!
//! Many terminals never report key releases. Each press is timestamped and
//! [`KeyState::expire`] drops keys that have not been pressed or repeated
//! within the release timeout, so a single tap does not stick forever.

use std::time::{Duration, Instant};

use arrayvec::ArrayVec;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

/// Most keys tracked at once; pressing another drops the oldest.
pub const MAX_HELD_KEYS: usize = 16;

pub const DEFAULT_RELEASE_TIMEOUT: Duration = Duration::from_millis(150);

#[derive(Debug, Clone)]
pub struct KeyState {
    held: ArrayVec<(KeyCode, Instant), MAX_HELD_KEYS>,
    release_timeout: Duration,
}

impl Default for KeyState {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyState {
    pub fn new() -> Self {
        Self::with_release_timeout(DEFAULT_RELEASE_TIMEOUT)
    }

    pub fn with_release_timeout(release_timeout: Duration) -> Self {
        Self {
            held: ArrayVec::new(),
            release_timeout,
        }
    }

    pub fn release_timeout(&self) -> Duration {
        self.release_timeout
    }

    pub fn press(&mut self, code: KeyCode, now: Instant) {
        let code = normalize(code);
        if let Some(entry) = self.held.iter_mut().find(|(k, _)| *k == code) {
            entry.1 = now;
            return;
        }
        if self.held.is_full() {
            self.held.remove(0);
        }
        self.held.push((code, now));
    }

    pub fn release(&mut self, code: KeyCode) {
        let code = normalize(code);
        self.held.retain(|(k, _)| *k != code);
    }

    pub fn is_pressed(&self, code: KeyCode) -> bool {
        let code = normalize(code);
        self.held.iter().any(|(k, _)| *k == code)
    }

    pub fn handle_event(&mut self, key: &KeyEvent, now: Instant) {
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => self.press(key.code, now),
            KeyEventKind::Release => self.release(key.code),
        }
    }

    /// Auto-release keys last seen more than the release timeout before `now`.
    pub fn expire(&mut self, now: Instant) {
        let timeout = self.release_timeout;
        self.held
            .retain(|(_, at)| now.saturating_duration_since(*at) <= timeout);
    }

    pub fn pressed(&self) -> impl Iterator<Item = KeyCode> + '_ {
        self.held.iter().map(|(k, _)| *k)
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }

    pub fn clear(&mut self) {
        self.held.clear();
    }
}

/// Letters are tracked case-insensitively (Shift should not change a binding).
fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}
