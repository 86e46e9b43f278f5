//! Key state tracking.
//!
//! `InputManager` turns raw press/release events into a persistent
//! pressed-key map plus an edge-triggered action queue. Each tick the game
//! loop takes one [`InputFrame`] from it and hands that to `compute::tick`,
//! so the simulation never reads shared key state.

use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    Space,
    Escape,
    Char(char),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
    Shoot,
    Pause,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Down,
    Up,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActionEvent {
    pub action: Action,
    pub phase: Phase,
}

/// Input consumed by one simulation tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputFrame {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    /// A shoot press happened since the previous frame.
    pub shoot: bool,
}

#[derive(Clone, Debug)]
pub struct InputManager {
    keys: HashMap<Key, bool>,
    bindings: HashMap<Key, Action>,
    events: Vec<ActionEvent>,
    enabled: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        let mut manager = InputManager {
            keys: HashMap::new(),
            bindings: HashMap::new(),
            events: Vec::new(),
            enabled: true,
        };
        manager.bind(Key::ArrowLeft, Action::MoveLeft);
        manager.bind(Key::ArrowRight, Action::MoveRight);
        manager.bind(Key::ArrowUp, Action::Jump);
        manager.bind(Key::Space, Action::Shoot);
        manager.bind(Key::Escape, Action::Pause);
        manager.bind(Key::Char('a'), Action::MoveLeft);
        manager.bind(Key::Char('d'), Action::MoveRight);
        manager.bind(Key::Char('w'), Action::Jump);
        manager
    }

    pub fn bind(&mut self, key: Key, action: Action) {
        self.bindings.insert(key, action);
    }

    pub fn unbind(&mut self, key: Key) {
        self.bindings.remove(&key);
    }

    pub fn binding(&self, key: Key) -> Option<Action> {
        self.bindings.get(&key).copied()
    }

    /// Record a press. Only the first press of a held key emits a `Down` event.
    pub fn key_down(&mut self, key: Key) {
        if !self.enabled {
            return;
        }
        let was_pressed = self.keys.insert(key, true).unwrap_or(false);
        if let Some(action) = self.binding(key) {
            if !was_pressed {
                self.events.push(ActionEvent { action, phase: Phase::Down });
            }
        }
    }

    pub fn key_up(&mut self, key: Key) {
        if !self.enabled {
            return;
        }
        self.keys.insert(key, false);
        if let Some(action) = self.binding(key) {
            self.events.push(ActionEvent { action, phase: Phase::Up });
        }
    }

    pub fn is_key_pressed(&self, key: Key) -> bool {
        self.keys.get(&key).copied().unwrap_or(false)
    }

    /// True if any key bound to `action` is held.
    pub fn is_action_active(&self, action: Action) -> bool {
        self.bindings
            .iter()
            .any(|(key, bound)| *bound == action && self.is_key_pressed(*key))
    }

    /// Keys currently held.
    pub fn pressed_keys(&self) -> impl Iterator<Item = Key> + '_ {
        self.keys.iter().filter(|(_, down)| **down).map(|(key, _)| *key)
    }

    /// Take every action event queued since the last drain.
    pub fn drain_events(&mut self) -> Vec<ActionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Snapshot for one tick. Consumes pending events.
    pub fn frame(&mut self) -> InputFrame {
        let shoot = self
            .drain_events()
            .iter()
            .any(|e| e.action == Action::Shoot && e.phase == Phase::Down);
        InputFrame {
            left: self.is_action_active(Action::MoveLeft),
            right: self.is_action_active(Action::MoveRight),
            jump: self.is_action_active(Action::Jump),
            shoot,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Ignore input and forget everything currently held.
    pub fn disable(&mut self) {
        self.enabled = false;
        self.reset();
    }

    pub fn reset(&mut self) {
        self.keys.clear();
        self.events.clear();
    }
}
