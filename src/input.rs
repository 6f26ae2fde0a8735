//! Platform-neutral key mapping
//!
//! Runners translate their own key events into [`Key`] and ask
//! [`action_for_key`] what the current scene does with it.

use crate::sim::{Action, SceneKind};

/// Keys the lab reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    Space,
    Backspace,
    F1,
    F2,
    T,
    P,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom(key: &str) -> Option<Self> {
        match key {
            "Escape" => Some(Key::Escape),
            " " => Some(Key::Space),
            "Backspace" => Some(Key::Backspace),
            "F1" => Some(Key::F1),
            "F2" => Some(Key::F2),
            "t" | "T" => Some(Key::T),
            "p" | "P" => Some(Key::P),
            _ => None,
        }
    }
}

/// What `key` does in `scene`, if anything
pub fn action_for_key(scene: SceneKind, key: Key) -> Option<Action> {
    match (scene, key) {
        (_, Key::Escape) => Some(Action::Quit),
        (SceneKind::Spiral, _) => None,
        (SceneKind::Drift, Key::Space) => Some(Action::Report),
        (SceneKind::Drift, _) => None,
        (_, Key::F1) => Some(Action::Report),
        (_, Key::Space) => Some(Action::EjectRandom),
        (_, Key::Backspace) => Some(Action::EjectAll),
        (SceneKind::Sprites, _) => None,
        (_, Key::T) => Some(Action::ToggleTrippy),
        (_, Key::P) => Some(Action::TogglePerfGraph),
        (SceneKind::MeteorField, Key::F2) => Some(Action::CycleMeteorStyle),
        (SceneKind::ListBench, Key::F2) => Some(Action::ToggleListMode),
        _ => None,
    }
}
