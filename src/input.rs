//! Input collection and per-frame snapshots.
//!
//! The window shell feeds winit events into an [`InputCollector`]; once per
//! frame the collector is sampled into an [`InputSnapshot`] the camera
//! consumes. The snapshot carries held movement keys and the absolute
//! pointer position — look deltas are computed by the camera against the
//! viewport center, so the shell must re-center the pointer (and report the
//! centered position back through [`InputCollector::set_pointer`]) after
//! every sample a rendered frame consumes, or deltas compound across
//! frames. A dropped frame consumes nothing; its snapshot and pointer carry
//! over unchanged.

use std::collections::HashMap;

use winit::{
    event::{ElementState, KeyEvent, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

/// Movement keys the collector tracks.
const KEY_CODES: [KeyCode; 6] = [
    KeyCode::KeyW,
    KeyCode::KeyS,
    KeyCode::KeyA,
    KeyCode::KeyD,
    KeyCode::Space,
    KeyCode::ControlLeft,
];

/// A per-frame view of the input state.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    /// W held: move along the look direction.
    pub forward: bool,
    /// S held: move against the look direction.
    pub backward: bool,
    /// A held: strafe along up × orientation.
    pub strafe_left: bool,
    /// D held: strafe against up × orientation.
    pub strafe_right: bool,
    /// Space held: move toward −Y (up on screen).
    pub ascend: bool,
    /// Left Ctrl held: move toward +Y.
    pub descend: bool,
    /// Absolute pointer position in physical pixels.
    pub pointer: (f64, f64),
}

/// Accumulates winit events between frames.
pub struct InputCollector {
    held: HashMap<KeyCode, bool>,
    pointer: (f64, f64),
}

impl InputCollector {
    /// Creates a collector with nothing held and the pointer at the given
    /// position (normally the initial viewport center).
    pub fn new(pointer: (f64, f64)) -> Self {
        let mut held = HashMap::new();
        for key_code in KEY_CODES {
            held.insert(key_code, false);
        }
        Self { held, pointer }
    }

    /// Processes a window event and updates the internal state.
    pub fn intake_input(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state,
                        physical_key: PhysicalKey::Code(key),
                        ..
                    },
                ..
            } => {
                if let Some(key_state) = self.held.get_mut(key) {
                    *key_state = *state == ElementState::Pressed;
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.pointer = (position.x, position.y);
            }
            _ => {}
        }
    }

    /// Overwrites the tracked pointer position. Called by the shell after it
    /// re-centers the OS cursor, closing the recenter feedback loop.
    pub fn set_pointer(&mut self, pointer: (f64, f64)) {
        self.pointer = pointer;
    }

    /// Clears all held keys. Called when the window loses focus so keys do
    /// not stick across focus changes.
    pub fn reset(&mut self) {
        for state in self.held.values_mut() {
            *state = false;
        }
    }

    /// Samples the current state into a snapshot.
    pub fn snapshot(&self) -> InputSnapshot {
        let held = |key: KeyCode| self.held.get(&key).copied().unwrap_or(false);
        InputSnapshot {
            forward: held(KeyCode::KeyW),
            backward: held(KeyCode::KeyS),
            strafe_left: held(KeyCode::KeyA),
            strafe_right: held(KeyCode::KeyD),
            ascend: held(KeyCode::Space),
            descend: held(KeyCode::ControlLeft),
            pointer: self.pointer,
        }
    }
}
