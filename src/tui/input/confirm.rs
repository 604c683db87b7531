use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::App;
use crate::tui::modal::{BOARD_MENU, DeleteTarget, Modal};

use super::*;

pub(super) fn handle_confirm(app: &mut App, key: KeyEvent) {
    let Some(Modal::ConfirmDelete(confirm)) = &mut app.modal else {
        return;
    };
    match (key.modifiers, key.code) {
        (KeyModifiers::NONE, KeyCode::Char('y')) => confirm_delete(app),
        (KeyModifiers::NONE, KeyCode::Char('n')) | (_, KeyCode::Esc) => app.modal = None,
        (_, KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab)
        | (KeyModifiers::NONE, KeyCode::Char('h') | KeyCode::Char('l')) => {
            confirm.confirm_focused = !confirm.confirm_focused;
        }
        (_, KeyCode::Enter) | (KeyModifiers::NONE, KeyCode::Char(' ')) => {
            if confirm.confirm_focused {
                confirm_delete(app);
            } else {
                app.modal = None;
            }
        }
        _ => {}
    }
}

/// Run the pending delete and close the dialog
pub(super) fn confirm_delete(app: &mut App) {
    let Some(Modal::ConfirmDelete(confirm)) = app.modal.take() else {
        return;
    };
    let what = match &confirm.target {
        DeleteTarget::Board { name, .. } => format!("Deleted board '{}'", name),
        DeleteTarget::Task { title, .. } => format!("Deleted task '{}'", title),
    };
    if app.dispatch(confirm.intent()).is_ok() {
        app.set_status(what);
    }
}

pub(super) fn handle_board_menu(app: &mut App, key: KeyEvent) {
    let Some(Modal::BoardMenu(menu)) = &mut app.modal else {
        return;
    };
    match key.code {
        KeyCode::Esc | KeyCode::Char('m') => app.modal = None,
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => {
            menu.cursor = (menu.cursor + 1) % BOARD_MENU.len();
        }
        KeyCode::Up | KeyCode::Char('k') | KeyCode::BackTab => {
            menu.cursor = (menu.cursor + BOARD_MENU.len() - 1) % BOARD_MENU.len();
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            let item = menu.cursor;
            run_board_menu_item(app, item);
        }
        KeyCode::Char('e') => run_board_menu_item(app, 0),
        KeyCode::Char('d') => run_board_menu_item(app, 1),
        _ => {}
    }
}

/// Edit Board (0) or Delete Board (1)
pub(super) fn run_board_menu_item(app: &mut App, item: usize) {
    app.modal = None;
    match item {
        0 => app.open_edit_board(false),
        1 => app.open_delete_board(),
        _ => {}
    }
}
