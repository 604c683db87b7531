use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Focus, MoveDir};
use crate::tui::layout::SidebarItem;

use super::*;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    if is_ctrl(&key, 'c') {
        app.should_quit = true;
        return;
    }

    // Global keys
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('?') => {
            app.show_help = true;
            return;
        }
        KeyCode::Char('s') => {
            app.toggle_sidebar();
            return;
        }
        KeyCode::Char('t') => {
            app.toggle_theme();
            return;
        }
        KeyCode::Char('B') => {
            app.open_add_board();
            return;
        }
        KeyCode::Char('[') => {
            app.cycle_board(false);
            return;
        }
        KeyCode::Char(']') => {
            app.cycle_board(true);
            return;
        }
        KeyCode::Tab | KeyCode::BackTab => {
            if app.sidebar_open {
                app.focus = match app.focus {
                    Focus::Board => Focus::Sidebar,
                    Focus::Sidebar => Focus::Board,
                };
            }
            return;
        }
        KeyCode::Esc => {
            app.status_message = None;
            return;
        }
        _ => {}
    }

    match app.focus {
        Focus::Sidebar => handle_sidebar_key(app, key),
        Focus::Board => handle_board_key(app, key),
    }
}

fn handle_sidebar_key(app: &mut App, key: KeyEvent) {
    let items = SidebarItem::all(app.state.boards.len());
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            app.sidebar_cursor = (app.sidebar_cursor + 1).min(items.len() - 1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.sidebar_cursor = app.sidebar_cursor.saturating_sub(1);
        }
        KeyCode::Char('l') | KeyCode::Right => app.focus = Focus::Board,
        KeyCode::Enter | KeyCode::Char(' ') => {
            if let Some(item) = items.get(app.sidebar_cursor) {
                activate_sidebar_item(app, *item);
            }
        }
        _ => {}
    }
}

/// What a click or Enter on a sidebar row does
pub(super) fn activate_sidebar_item(app: &mut App, item: SidebarItem) {
    match item {
        SidebarItem::Board(index) => {
            app.select_board_at(index);
            app.focus = Focus::Board;
        }
        SidebarItem::CreateBoard => app.open_add_board(),
        SidebarItem::ThemeToggle => app.toggle_theme(),
        SidebarItem::HideSidebar => app.toggle_sidebar(),
    }
}

fn handle_board_key(app: &mut App, key: KeyEvent) {
    if app.active_board().is_none() {
        // Nothing to navigate; offer the create flow
        if matches!(key.code, KeyCode::Enter | KeyCode::Char('n')) {
            app.open_add_board();
        }
        return;
    }

    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    match key.code {
        KeyCode::Char('h') | KeyCode::Left if !shift => move_cursor_column(app, -1),
        KeyCode::Char('l') | KeyCode::Right if !shift => move_cursor_column(app, 1),
        KeyCode::Char('j') | KeyCode::Down if !shift => move_cursor_task(app, 1),
        KeyCode::Char('k') | KeyCode::Up if !shift => move_cursor_task(app, -1),
        KeyCode::Char('H') | KeyCode::Left => app.move_selected(MoveDir::Left),
        KeyCode::Char('L') | KeyCode::Right => app.move_selected(MoveDir::Right),
        KeyCode::Char('J') | KeyCode::Down => app.move_selected(MoveDir::Down),
        KeyCode::Char('K') | KeyCode::Up => app.move_selected(MoveDir::Up),
        KeyCode::Char('g') | KeyCode::Home => {
            app.cursor.task = 0;
            app.follow_cursor = true;
        }
        KeyCode::Char('G') | KeyCode::End => {
            let len = app.selected_column().map_or(0, |c| c.tasks.len());
            app.cursor.task = len.saturating_sub(1);
            app.follow_cursor = true;
        }
        KeyCode::Enter => match app.selected_task().map(|t| t.id) {
            Some(id) => app.open_task_detail(id),
            None => {
                // empty board: Enter jumps straight to adding a column
                if app.active_board().is_some_and(|b| b.columns.is_empty()) {
                    app.open_edit_board(true);
                }
            }
        },
        KeyCode::Char('n') => {
            let column = app.cursor.column;
            app.open_add_task(Some(column));
        }
        KeyCode::Char('e') => app.open_edit_board(false),
        KeyCode::Char('c') => app.open_edit_board(true),
        KeyCode::Char('m') => app.open_board_menu(),
        KeyCode::Char('D') => app.open_delete_board(),
        KeyCode::Char('x') | KeyCode::Delete => {
            if let Some(id) = app.selected_task().map(|t| t.id) {
                app.open_delete_task(id);
            }
        }
        _ => {}
    }
}

fn move_cursor_column(app: &mut App, delta: isize) {
    let Some(board) = app.active_board() else {
        return;
    };
    let columns = board.columns.len();
    if columns == 0 {
        return;
    }
    let next = app.cursor.column.saturating_add_signed(delta).min(columns - 1);
    let tasks = board.columns[next].tasks.len();
    app.cursor.column = next;
    app.cursor.task = app.cursor.task.min(tasks.saturating_sub(1));
    app.follow_cursor = true;
}

fn move_cursor_task(app: &mut App, delta: isize) {
    let len = app.selected_column().map_or(0, |c| c.tasks.len());
    if len == 0 {
        return;
    }
    app.cursor.task = app.cursor.task.saturating_add_signed(delta).min(len - 1);
    app.follow_cursor = true;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::Cursor;
    use crate::tui::input::test_support::*;
    use crate::tui::modal::{Modal, TaskField};

    #[test]
    fn arrows_move_cursor_within_bounds() {
        let mut app = demo_app();
        handle_key(&mut app, key(KeyCode::Char('k')));
        assert_eq!(app.cursor, Cursor { column: 0, task: 0 });
        handle_key(&mut app, key(KeyCode::Char('j')));
        handle_key(&mut app, key(KeyCode::Char('j')));
        assert_eq!(app.cursor.task, 2);
        for _ in 0..5 {
            handle_key(&mut app, key(KeyCode::Right));
        }
        assert_eq!(app.cursor.column, 2);
        assert_eq!(app.cursor.task, 2);
    }

    #[test]
    fn shift_l_moves_task_to_next_column() {
        let mut app = demo_app();
        let id = app.selected_task().unwrap().id;
        handle_key(&mut app, key(KeyCode::Char('L')));
        let board = app.active_board().unwrap();
        assert_eq!(board.locate_task(id).map(|(c, _)| c), Some(1));
        assert_eq!(app.selected_task().map(|t| t.id), Some(id));
    }

    #[test]
    fn n_opens_add_task_for_cursor_column() {
        let mut app = demo_app();
        handle_key(&mut app, key(KeyCode::Right));
        handle_key(&mut app, key(KeyCode::Char('n')));
        match &app.modal {
            Some(Modal::TaskForm(form)) => {
                assert_eq!(form.selected_status(), Some("Doing"));
                assert_eq!(form.focus, TaskField::Title);
            }
            other => panic!("unexpected modal {other:?}"),
        }
    }

    #[test]
    fn enter_opens_detail_and_x_confirms_delete() {
        let mut app = demo_app();
        handle_key(&mut app, key(KeyCode::Enter));
        assert!(matches!(app.modal, Some(Modal::TaskDetail(_))));
        app.modal = None;
        handle_key(&mut app, key(KeyCode::Char('x')));
        assert!(matches!(app.modal, Some(Modal::ConfirmDelete(_))));
    }

    #[test]
    fn sidebar_enter_selects_board() {
        let mut app = demo_app();
        handle_key(&mut app, key(KeyCode::Tab));
        assert_eq!(app.focus, Focus::Sidebar);
        handle_key(&mut app, key(KeyCode::Down));
        handle_key(&mut app, key(KeyCode::Enter));
        assert_eq!(app.active_board().map(|b| b.name.as_str()), Some("Marketing Plan"));
        assert_eq!(app.focus, Focus::Board);
    }

    #[test]
    fn brackets_cycle_boards_with_wrap() {
        let mut app = demo_app();
        handle_key(&mut app, key(KeyCode::Char('[')));
        assert_eq!(app.active_board().map(|b| b.name.as_str()), Some("Roadmap"));
        handle_key(&mut app, key(KeyCode::Char(']')));
        assert_eq!(app.active_board().map(|b| b.name.as_str()), Some("Platform Launch"));
    }

    #[test]
    fn hiding_sidebar_returns_focus_to_board() {
        let mut app = demo_app();
        app.focus = Focus::Sidebar;
        handle_key(&mut app, key(KeyCode::Char('s')));
        assert!(!app.sidebar_open);
        assert_eq!(app.focus, Focus::Board);
        handle_key(&mut app, key(KeyCode::Tab));
        assert_eq!(app.focus, Focus::Board);
    }

    #[test]
    fn quit_keys() {
        let mut app = demo_app();
        handle_key(&mut app, ctrl('c'));
        assert!(app.should_quit);
        let mut app = demo_app();
        handle_key(&mut app, key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }
}
