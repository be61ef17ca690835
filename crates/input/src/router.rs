use std::collections::HashSet;

use crate::action::{Action, BlockEdit};

/// Keys the explorer listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    Q,
    E,
    Space,
    Shift,
    L,
    F,
    N,
    K,
}

impl Key {
    /// Parse a key name, case-insensitively (`"w"`, `"space"`, `" "`, `"shift"`).
    pub fn from_name(name: &str) -> Option<Self> {
        let key = match name.to_ascii_lowercase().as_str() {
            "w" => Self::W,
            "a" => Self::A,
            "s" => Self::S,
            "d" => Self::D,
            "q" => Self::Q,
            "e" => Self::E,
            " " | "space" => Self::Space,
            "shift" => Self::Shift,
            "l" => Self::L,
            "f" => Self::F,
            "n" => Self::N,
            "k" => Self::K,
            _ => return None,
        };
        Some(key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
}

/// Raw events from the host's keyboard and pointer source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    ButtonDown(MouseButton),
    ButtonUp(MouseButton),
    /// Pointer motion in pixels since the previous event.
    PointerMoved { dx: f32, dy: f32 },
    /// Pointer left the surface; ends any drag.
    PointerLeft,
}

/// Held keys in the order they are applied each frame.
const HELD_BINDINGS: [(Key, Action); 7] = [
    (Key::W, Action::MoveForward),
    (Key::S, Action::MoveBackward),
    (Key::A, Action::MoveLeft),
    (Key::D, Action::MoveRight),
    (Key::Q, Action::PanLeft),
    (Key::E, Action::PanRight),
    (Key::Space, Action::Jump),
];

/// Turns raw events into the actions for the next frame.
///
/// Pointer look (left-drag), right-click block edits and toggles are queued
/// as they arrive; held movement keys are appended once per frame in
/// [`InputRouter::frame_actions`].
#[derive(Debug, Clone)]
pub struct InputRouter {
    keys_held: HashSet<Key>,
    dragging: bool,
    mouse_sensitivity: f32,
    pending: Vec<Action>,
}

impl InputRouter {
    pub fn new(mouse_sensitivity: f32) -> Self {
        Self {
            keys_held: HashSet::new(),
            dragging: false,
            mouse_sensitivity,
            pending: Vec::new(),
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.keys_held.contains(&key)
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown(key) => {
                // Auto-repeat arrives as repeated key-downs; toggles fire on the first only.
                if self.keys_held.insert(key) {
                    self.on_key_pressed(key);
                }
            }
            InputEvent::KeyUp(key) => {
                self.keys_held.remove(&key);
            }
            InputEvent::ButtonDown(MouseButton::Left) => {
                self.dragging = true;
            }
            InputEvent::ButtonDown(MouseButton::Right) => {
                let edit = if self.is_held(Key::Shift) {
                    BlockEdit::Lower
                } else {
                    BlockEdit::Raise
                };
                tracing::trace!(?edit, "block edit requested");
                self.pending.push(Action::EditBlock(edit));
            }
            InputEvent::ButtonUp(MouseButton::Left) | InputEvent::PointerLeft => {
                self.dragging = false;
            }
            InputEvent::ButtonUp(MouseButton::Right) => {}
            InputEvent::PointerMoved { dx, dy } => {
                if self.dragging {
                    self.pending.push(Action::Look {
                        yaw_degrees: -dx * self.mouse_sensitivity,
                        pitch_degrees: -dy * self.mouse_sensitivity,
                    });
                }
            }
        }
    }

    fn on_key_pressed(&mut self, key: Key) {
        let toggle = match key {
            Key::L => Action::ToggleLighting,
            Key::F => Action::ToggleSpotlight,
            Key::N => Action::ToggleNormals,
            Key::K => Action::ToggleLightAnimation,
            _ => return,
        };
        self.pending.push(toggle);
    }

    /// Actions for this frame: queued one-shot actions first, then one action per held key.
    pub fn frame_actions(&mut self) -> Vec<Action> {
        let mut actions = std::mem::take(&mut self.pending);
        actions.extend(
            HELD_BINDINGS
                .iter()
                .filter(|(key, _)| self.keys_held.contains(key))
                .map(|(_, action)| *action),
        );
        actions
    }

    /// Forget all held keys and any drag, e.g. when the host loses focus.
    pub fn release_all(&mut self) {
        self.keys_held.clear();
        self.dragging = false;
    }
}
