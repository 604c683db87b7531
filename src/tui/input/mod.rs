mod confirm;
mod detail;
mod forms;
mod mouse;
mod navigate;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};

use super::app::App;
use super::modal::Modal;

// Import all submodule functions into this module's namespace
// so that submodules can access cross-module functions via `use super::*;`
#[allow(unused_imports)]
use confirm::*;
#[allow(unused_imports)]
use detail::*;
#[allow(unused_imports)]
use forms::*;
#[allow(unused_imports)]
use mouse::*;
#[allow(unused_imports)]
use navigate::*;

/// Handle a key event for whatever currently has input
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    // A drag in progress owns the keyboard until it ends; Esc aborts it
    if !app.drag.is_idle() {
        if key.code == KeyCode::Esc {
            app.drag.cancel();
            app.set_status("Drag cancelled");
        }
        return;
    }

    if app.show_help {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q')) {
            app.show_help = false;
        }
        return;
    }

    match &app.modal {
        None => handle_navigate(app, key),
        Some(Modal::BoardForm(_)) => handle_board_form(app, key),
        Some(Modal::TaskForm(_)) => handle_task_form(app, key),
        Some(Modal::TaskDetail(_)) => handle_detail(app, key),
        Some(Modal::ConfirmDelete(_)) => handle_confirm(app, key),
        Some(Modal::BoardMenu(_)) => handle_board_menu(app, key),
    }
}

/// Handle a mouse event
pub fn handle_mouse(app: &mut App, event: MouseEvent) {
    handle_mouse_event(app, event);
}

/// Handle a bracketed paste: inserted into the focused form field, if any
pub fn handle_paste(app: &mut App, text: &str) {
    if text.is_empty() {
        return;
    }
    match &mut app.modal {
        Some(Modal::BoardForm(form)) => {
            if let Some((field, input)) = form.focused_input() {
                input.insert_str(text);
                form.errors.clear(field);
            }
        }
        Some(Modal::TaskForm(form)) => {
            if let Some((field, input)) = form.focused_input() {
                input.insert_str(text);
                if let Some(field) = field {
                    form.errors.clear(field);
                }
            }
        }
        _ => {}
    }
}

fn is_ctrl(key: &KeyEvent, c: char) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char(c)
}

#[cfg(test)]
pub(crate) mod test_support {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::layout::Rect;

    use crate::io::color_scheme::ColorScheme;
    use crate::io::seed;
    use crate::model::UiConfig;
    use crate::tui::app::App;

    pub const AREA: Rect = Rect {
        x: 0,
        y: 0,
        width: 120,
        height: 40,
    };

    pub fn demo_app() -> App {
        let mut app = App::new(seed::demo().unwrap(), &UiConfig::default(), ColorScheme::Dark);
        app.sync_layout(AREA);
        app
    }

    pub fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    pub fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    pub fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            super::handle_key(app, key(KeyCode::Char(c)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::tui::modal::BoardField;

    #[test]
    fn help_swallows_keys_until_closed() {
        let mut app = demo_app();
        handle_key(&mut app, key(KeyCode::Char('?')));
        assert!(app.show_help);
        handle_key(&mut app, key(KeyCode::Char('n')));
        assert!(app.modal.is_none());
        handle_key(&mut app, key(KeyCode::Esc));
        assert!(!app.show_help);
    }

    #[test]
    fn paste_goes_to_focused_field() {
        let mut app = demo_app();
        app.open_add_board();
        handle_paste(&mut app, "Sprint\n12");
        match &app.modal {
            Some(Modal::BoardForm(form)) => {
                assert_eq!(form.focus, BoardField::Name);
                assert_eq!(form.name.as_str(), "Sprint 12");
            }
            other => panic!("unexpected modal {other:?}"),
        }
    }
}
