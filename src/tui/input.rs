use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

/// Represents the result of handling a key event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Quit the application
    Quit,
    /// Swipe the front card right
    Like,
    /// Swipe the front card left
    Pass,
    /// Undo last decision
    Undo,
    /// Switch between the deck and the liked summary
    ToggleSummary,
    /// Throw the deck away and fetch a new one
    NewDeck,
    /// Retry a failed load
    Retry,
    /// Open the front card in the browser
    Open,
    /// Toggle help overlay
    Help,
    /// No action
    None,
}

/// Maps keyboard events to actions
pub fn handle_key_event(key: KeyEvent) -> KeyAction {
    match (key.code, key.modifiers) {
        // Quit: q, Esc or Ctrl+C
        (KeyCode::Char('q'), KeyModifiers::NONE) => KeyAction::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => KeyAction::Quit,
        (KeyCode::Esc, KeyModifiers::NONE) => KeyAction::Quit,

        // Like: Right arrow or l
        (KeyCode::Right, KeyModifiers::NONE) => KeyAction::Like,
        (KeyCode::Char('l'), KeyModifiers::NONE) => KeyAction::Like,

        // Pass: Left arrow or h
        (KeyCode::Left, KeyModifiers::NONE) => KeyAction::Pass,
        (KeyCode::Char('h'), KeyModifiers::NONE) => KeyAction::Pass,

        // Undo: u or Ctrl+Z
        (KeyCode::Char('u'), KeyModifiers::NONE) => KeyAction::Undo,
        (KeyCode::Char('z'), KeyModifiers::CONTROL) => KeyAction::Undo,

        (KeyCode::Char('s'), KeyModifiers::NONE) => KeyAction::ToggleSummary,
        (KeyCode::Char('n'), KeyModifiers::NONE) => KeyAction::NewDeck,
        (KeyCode::Char('r'), KeyModifiers::NONE) => KeyAction::Retry,
        (KeyCode::Char('o'), KeyModifiers::NONE) => KeyAction::Open,

        // Help: ? (some terminals report it with Shift)
        (KeyCode::Char('?'), KeyModifiers::NONE) => KeyAction::Help,
        (KeyCode::Char('?'), KeyModifiers::SHIFT) => KeyAction::Help,

        _ => KeyAction::None,
    }
}

/// Pointer gesture steps, in terminal columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseAction {
    /// Left button pressed on the front card
    Press(u16),
    Drag(u16),
    Release(u16),
    None,
}

/// Maps mouse events to gesture steps. A press only counts inside `card`.
pub fn handle_mouse_event(mouse: MouseEvent, card: Option<Rect>) -> MouseAction {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => match card {
            Some(area) if contains(area, mouse.column, mouse.row) => {
                MouseAction::Press(mouse.column)
            }
            _ => MouseAction::None,
        },
        MouseEventKind::Drag(MouseButton::Left) => MouseAction::Drag(mouse.column),
        MouseEventKind::Up(MouseButton::Left) => MouseAction::Release(mouse.column),
        _ => MouseAction::None,
    }
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}
