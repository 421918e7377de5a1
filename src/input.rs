//! Platform-agnostic input
//!
//! The editor core only sees [`EditorKey`] and [`InputEvent`] values with
//! canvas-relative pixel coordinates (top-left origin). The winit event
//! loop in [`crate::app`] translates window events into these.

use winit::keyboard::{Key, NamedKey};

/// A key the editor reacts to.
///
/// Characters are case sensitive: `v` and `V` select different views and
/// uppercase rotation keys rotate clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorKey {
    Char(char),
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Escape,
}

impl EditorKey {
    /// Converts a winit logical key. Multi-character text and keys the
    /// editor has no binding for yield `None`.
    pub fn from_winit(key: &Key) -> Option<Self> {
        match key {
            Key::Character(text) => {
                let mut chars = text.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(Self::Char(c)),
                    _ => None,
                }
            }
            Key::Named(NamedKey::ArrowLeft) => Some(Self::ArrowLeft),
            Key::Named(NamedKey::ArrowRight) => Some(Self::ArrowRight),
            Key::Named(NamedKey::ArrowUp) => Some(Self::ArrowUp),
            Key::Named(NamedKey::ArrowDown) => Some(Self::ArrowDown),
            Key::Named(NamedKey::Escape) => Some(Self::Escape),
            _ => None,
        }
    }
}

/// One input event in canvas coordinates.
///
/// Clicks are not an event of their own: the editor derives them from
/// `MouseDown`/`MouseUp` pairs that barely moved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyPressed(EditorKey),
    MouseDown { x: f32, y: f32 },
    MouseMove { x: f32, y: f32 },
    MouseUp { x: f32, y: f32 },
    /// The cursor left the canvas; ends any drag or pending click.
    CursorLeft,
}

/// Derives click events from press/release pairs.
///
/// A release within `slop` pixels of the matching press is a click.
/// Releases after a longer drag are not.
#[derive(Debug, Clone, Copy)]
pub struct ClickTracker {
    slop: f32,
    pressed_at: Option<(f32, f32)>,
}

impl Default for ClickTracker {
    fn default() -> Self {
        Self::new(4.0)
    }
}

impl ClickTracker {
    pub fn new(slop: f32) -> Self {
        Self {
            slop,
            pressed_at: None,
        }
    }

    pub fn press(&mut self, x: f32, y: f32) {
        self.pressed_at = Some((x, y));
    }

    /// Forgets a pending press.
    pub fn cancel(&mut self) {
        self.pressed_at = None;
    }

    /// Returns the click position if this release completes a click.
    pub fn release(&mut self, x: f32, y: f32) -> Option<(f32, f32)> {
        let (px, py) = self.pressed_at.take()?;
        let (dx, dy) = (x - px, y - py);
        (dx * dx + dy * dy <= self.slop * self.slop).then_some((x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_keys_keep_case() {
        assert_eq!(
            EditorKey::from_winit(&Key::Character("V".into())),
            Some(EditorKey::Char('V'))
        );
        assert_eq!(
            EditorKey::from_winit(&Key::Character("v".into())),
            Some(EditorKey::Char('v'))
        );
        assert_eq!(EditorKey::from_winit(&Key::Character("ab".into())), None);
    }

    #[test]
    fn test_named_keys() {
        assert_eq!(
            EditorKey::from_winit(&Key::Named(NamedKey::ArrowUp)),
            Some(EditorKey::ArrowUp)
        );
        assert_eq!(
            EditorKey::from_winit(&Key::Named(NamedKey::Escape)),
            Some(EditorKey::Escape)
        );
        assert_eq!(EditorKey::from_winit(&Key::Named(NamedKey::Tab)), None);
    }

    #[test]
    fn test_click_requires_small_movement() {
        let mut tracker = ClickTracker::new(4.0);
        tracker.press(10.0, 10.0);
        assert_eq!(tracker.release(12.0, 11.0), Some((12.0, 11.0)));

        tracker.press(10.0, 10.0);
        assert_eq!(tracker.release(40.0, 10.0), None);

        // Release without press.
        assert_eq!(tracker.release(10.0, 10.0), None);

        tracker.press(10.0, 10.0);
        tracker.cancel();
        assert_eq!(tracker.release(10.0, 10.0), None);
    }
}
