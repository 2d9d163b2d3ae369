//! Keyboard input translation for the interactive UI.
//!
//! Keys map onto [`InputEvent`]s; activation targets whatever button the top frame has
//! focused.

use crate::ui::view::{InputEvent, RawInput};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Translates a key press. `focused` is the top frame's focused button index. Returns
/// `None` for keys the UI does not use and for key releases.
pub(super) fn translate_key(key_event: &KeyEvent, focused: usize) -> Option<InputEvent> {
    if key_event.kind == KeyEventKind::Release {
        return None;
    }

    let event = match key_event.code {
        KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            InputEvent::Exit
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => InputEvent::Exit,
        KeyCode::Enter | KeyCode::Char(' ') => InputEvent::Activate(focused),
        KeyCode::Esc | KeyCode::Backspace => InputEvent::Back,
        KeyCode::F(5) | KeyCode::Char('r') | KeyCode::Char('R') => InputEvent::Refresh,
        KeyCode::Up | KeyCode::Char('k') => InputEvent::Other(RawInput::Up),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => InputEvent::Other(RawInput::Down),
        KeyCode::BackTab => InputEvent::Other(RawInput::Up),
        KeyCode::Home => InputEvent::Other(RawInput::Home),
        KeyCode::End => InputEvent::Other(RawInput::End),
        KeyCode::PageUp => InputEvent::Other(RawInput::PageUp),
        KeyCode::PageDown => InputEvent::Other(RawInput::PageDown),
        _ => return None,
    };

    tracing::debug!("Key {:?} -> {:?}", key_event.code, event);
    Some(event)
}
