use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::app::{App, Phase};
use crate::page::Section;

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    ScrollDown,
    ScrollUp,
    ScrollHalfPageDown,
    ScrollHalfPageUp,
    ScrollPageDown,
    ScrollPageUp,
    JumpToTop,
    JumpToBottom,
    PendingG, // First 'g' press, waiting for second 'g'
    NextSlide,
    PrevSlide,
    SkipLoader,
    // Form editing
    BeginEdit,
    ExitEdit,
    NextField,
    PrevField,
    Confirm,
    ToggleAccountVariant,
    InputChar(char),
    Backspace,
    // Pointer
    PointerMove(u16, u16),
    PointerPress(u16, u16),
    PointerRelease,
    WheelUp,
    WheelDown,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App) -> Action {
    // The loading screen only reacts to skip and quit
    if app.phase == Phase::Loading {
        return handle_loading_phase(key);
    }

    // Form editing captures the keyboard
    if app.is_editing() {
        return handle_edit_mode(key);
    }

    // Normal mode keybindings
    match (key.code, key.modifiers) {
        // Quit
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,

        // Line scrolling
        (KeyCode::Char('j'), KeyModifiers::NONE) => Action::ScrollDown,
        (KeyCode::Char('k'), KeyModifiers::NONE) => Action::ScrollUp,
        (KeyCode::Down, KeyModifiers::NONE) => Action::ScrollDown,
        (KeyCode::Up, KeyModifiers::NONE) => Action::ScrollUp,

        // Paged scrolling
        (KeyCode::Char('d'), KeyModifiers::CONTROL) => Action::ScrollHalfPageDown,
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => Action::ScrollHalfPageUp,
        (KeyCode::Char('f'), KeyModifiers::CONTROL) => Action::ScrollPageDown,
        (KeyCode::Char('b'), KeyModifiers::CONTROL) => Action::ScrollPageUp,
        (KeyCode::PageDown, KeyModifiers::NONE) => Action::ScrollPageDown,
        (KeyCode::PageUp, KeyModifiers::NONE) => Action::ScrollPageUp,
        (KeyCode::Char(' '), KeyModifiers::NONE) => Action::ScrollPageDown,

        // Jump to top/bottom
        (KeyCode::Char('g'), KeyModifiers::NONE) => {
            // gg requires double press
            if app.pending_key == Some('g') {
                Action::JumpToTop
            } else {
                Action::PendingG
            }
        }
        (KeyCode::Char('G'), KeyModifiers::SHIFT) => Action::JumpToBottom,

        // Carousel navigation while the testimonials are on screen
        (KeyCode::Char('h'), KeyModifiers::NONE) if app.section_on_screen(Section::Testimonials) => {
            Action::PrevSlide
        }
        (KeyCode::Char('l'), KeyModifiers::NONE) if app.section_on_screen(Section::Testimonials) => {
            Action::NextSlide
        }
        (KeyCode::Left, KeyModifiers::NONE) if app.section_on_screen(Section::Testimonials) => {
            Action::PrevSlide
        }
        (KeyCode::Right, KeyModifiers::NONE) if app.section_on_screen(Section::Testimonials) => {
            Action::NextSlide
        }

        // Enter a form when one is on screen
        (KeyCode::Char('i'), KeyModifiers::NONE) if app.form_target().is_some() => {
            Action::BeginEdit
        }
        (KeyCode::Enter, KeyModifiers::NONE) if app.form_target().is_some() => Action::BeginEdit,

        // Switch between sign-in and register panels
        (KeyCode::Char('r'), KeyModifiers::NONE) if app.section_on_screen(Section::Account) => {
            Action::ToggleAccountVariant
        }

        _ => Action::None,
    }
}

/// Handle key events on the loading screen
fn handle_loading_phase(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
        (KeyCode::Enter, KeyModifiers::NONE) => Action::SkipLoader,
        (KeyCode::Char(' '), KeyModifiers::NONE) => Action::SkipLoader,
        (KeyCode::Esc, KeyModifiers::NONE) => Action::SkipLoader,
        _ => Action::None,
    }
}

/// Handle key events while a form field has focus
fn handle_edit_mode(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
        (KeyCode::Char('r'), KeyModifiers::CONTROL) => Action::ToggleAccountVariant,
        (KeyCode::Esc, _) => Action::ExitEdit,
        (KeyCode::Tab, _) => Action::NextField,
        (KeyCode::BackTab, _) => Action::PrevField,
        (KeyCode::Down, KeyModifiers::NONE) => Action::NextField,
        (KeyCode::Up, KeyModifiers::NONE) => Action::PrevField,
        (KeyCode::Enter, _) => Action::Confirm,
        (KeyCode::Backspace, _) => Action::Backspace,
        (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => Action::InputChar(c),
        _ => Action::None,
    }
}

/// Handle a mouse event and return the corresponding action
pub fn handle_mouse_event(mouse: MouseEvent) -> Action {
    match mouse.kind {
        MouseEventKind::Moved => Action::PointerMove(mouse.column, mouse.row),
        MouseEventKind::Drag(MouseButton::Left) => Action::PointerMove(mouse.column, mouse.row),
        MouseEventKind::Down(MouseButton::Left) => Action::PointerPress(mouse.column, mouse.row),
        MouseEventKind::Up(MouseButton::Left) => Action::PointerRelease,
        MouseEventKind::ScrollUp => Action::WheelUp,
        MouseEventKind::ScrollDown => Action::WheelDown,
        _ => Action::None,
    }
}
