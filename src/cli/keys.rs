//! Crossterm key events to held-key state.
//!
//! Terminals only report key releases when the keyboard enhancement
//! protocol is active. Without it a key is treated as held until no press
//! or repeat event has arrived for [`HOLD_TIMEOUT`].

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use std::time::{Duration, Instant};
use tilequest::Keys;

/// How long a key stays down after its last press or repeat event.
pub(crate) const HOLD_TIMEOUT: Duration = Duration::from_millis(120);

/// Map a terminal key code to a game key.
pub(crate) fn translate(code: KeyCode) -> Option<Keys> {
    let key = match code {
        KeyCode::Up => Keys::UP,
        KeyCode::Down => Keys::DOWN,
        KeyCode::Left => Keys::LEFT,
        KeyCode::Right => Keys::RIGHT,
        KeyCode::Enter => Keys::ENTER,
        KeyCode::Esc => Keys::ESCAPE,
        KeyCode::Char(' ') => Keys::SPACE,
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'w' => Keys::W,
            'a' => Keys::A,
            's' => Keys::S,
            'd' => Keys::D,
            _ => return None,
        },
        _ => return None,
    };
    Some(key)
}

/// Keys currently considered down.
#[derive(Debug, Default)]
pub(crate) struct KeyTracker {
    down: Vec<(Keys, Instant)>,
    releases_reported: bool,
}

impl KeyTracker {
    /// Create a tracker. With `releases_reported` set, keys stay down until
    /// their release event instead of timing out.
    pub(crate) fn new(releases_reported: bool) -> Self {
        Self {
            down: Vec::new(),
            releases_reported,
        }
    }

    /// Record a key event.
    pub(crate) fn handle(&mut self, event: KeyEvent, now: Instant) {
        let Some(key) = translate(event.code) else {
            return;
        };
        match event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                self.down.retain(|(k, _)| *k != key);
                self.down.push((key, now));
            }
            KeyEventKind::Release => self.down.retain(|(k, _)| *k != key),
        }
    }

    /// Keys down at `now`, after expiring stale ones.
    pub(crate) fn snapshot(&mut self, now: Instant) -> Keys {
        if !self.releases_reported {
            self.down
                .retain(|(_, seen)| now.saturating_duration_since(*seen) < HOLD_TIMEOUT);
        }
        self.down.iter().fold(Keys::empty(), |acc, (k, _)| acc | *k)
    }
}
