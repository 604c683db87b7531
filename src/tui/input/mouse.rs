use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::ops::drag::{DragOutcome, DragSource};
use crate::ops::intent::Intent;
use crate::tui::app::{App, Cursor, Focus};
use crate::tui::layout::{
    ADD_COLUMN_LABEL, BoardHit, CREATE_BOARD_LABEL, contains, prompt_button,
};
use crate::tui::modal::Modal;
use crate::tui::modal_layout::ModalHit;

use super::*;

/// Rows moved per wheel notch
const SCROLL_STEP: u16 = 3;

pub(super) fn handle_mouse_event(app: &mut App, event: MouseEvent) {
    let (x, y) = (event.column, event.row);
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => mouse_down(app, x, y),
        MouseEventKind::Drag(MouseButton::Left) => mouse_drag(app, x, y),
        MouseEventKind::Up(MouseButton::Left) => mouse_up(app, x, y),
        MouseEventKind::ScrollDown if event.modifiers.contains(KeyModifiers::SHIFT) => {
            scroll_columns(app, 1)
        }
        MouseEventKind::ScrollUp if event.modifiers.contains(KeyModifiers::SHIFT) => {
            scroll_columns(app, -1)
        }
        MouseEventKind::ScrollDown => scroll_rows(app, x, y, true),
        MouseEventKind::ScrollUp => scroll_rows(app, x, y, false),
        MouseEventKind::ScrollRight => scroll_columns(app, 1),
        MouseEventKind::ScrollLeft => scroll_columns(app, -1),
        _ => {}
    }
}

fn mouse_down(app: &mut App, x: u16, y: u16) {
    if app.show_help {
        app.show_help = false;
        return;
    }

    if app.modal.is_some() {
        match app.modal_layout.as_ref().and_then(|l| l.hit_test(x, y)) {
            // outside the modal: dismiss without committing
            None => app.modal = None,
            Some(hit) => modal_click(app, hit),
        }
        return;
    }

    if let Some(strip) = app.screen.strip
        && contains(strip, x, y)
    {
        app.toggle_sidebar();
        return;
    }
    if let Some(item) = app.sidebar.hit_test(x, y) {
        activate_sidebar_item(app, item);
        return;
    }

    if contains(app.screen.header, x, y) {
        let has_columns = app.active_board().is_some_and(|b| !b.columns.is_empty());
        if contains(app.header.add_task, x, y) && has_columns {
            app.open_add_task(None);
        } else if contains(app.header.menu, x, y) {
            app.open_board_menu();
        }
        return;
    }

    board_click(app, x, y);
}

fn board_click(app: &mut App, x: u16, y: u16) {
    let area = app.screen.board;
    let Some(board) = app.active_board() else {
        if contains(prompt_button(area, CREATE_BOARD_LABEL), x, y) {
            app.open_add_board();
        }
        return;
    };
    if board.columns.is_empty() {
        if contains(prompt_button(area, ADD_COLUMN_LABEL), x, y) {
            app.open_edit_board(true);
        }
        return;
    }

    match app.board_layout.hit_test(x, y) {
        BoardHit::Card { column, task } => {
            let Some(col) = board.columns.get(column) else {
                return;
            };
            let Some(card) = col.tasks.get(task) else {
                return;
            };
            let source = DragSource {
                task_id: card.id,
                column: col.name.clone(),
                index: task,
            };
            app.cursor = Cursor { column, task };
            app.focus = Focus::Board;
            app.drag.press(source, (x, y));
        }
        BoardHit::Lane { column } => {
            let tasks = board.columns.get(column).map_or(0, |c| c.tasks.len());
            app.cursor.column = column;
            app.cursor.task = app.cursor.task.min(tasks.saturating_sub(1));
            app.focus = Focus::Board;
        }
        BoardHit::NewColumn => app.open_edit_board(true),
        BoardHit::Empty => {}
    }
}

fn mouse_drag(app: &mut App, x: u16, y: u16) {
    if app.drag.is_idle() {
        return;
    }
    let zone = app.board_layout.drop_zone_at(x, y);
    app.drag.motion((x, y), zone, app.drag_threshold);
}

fn mouse_up(app: &mut App, x: u16, y: u16) {
    let zone = app.board_layout.drop_zone_at(x, y);
    match app.drag.release((x, y), zone) {
        DragOutcome::Committed(intent) => commit_drop(app, intent),
        DragOutcome::Clicked(task_id) => app.open_task_detail(task_id),
        DragOutcome::Cancelled | DragOutcome::Ignored => {}
    }
}

fn commit_drop(app: &mut App, intent: Intent) {
    let Intent::MoveTask {
        task_id,
        ref source,
        ref target,
        ..
    } = intent
    else {
        return;
    };
    let note = (source != target).then(|| {
        let title = app
            .active_board()
            .and_then(|b| b.find_task(task_id))
            .map(|t| t.title.clone())
            .unwrap_or_default();
        format!("Moved '{}' to {}", title, target)
    });
    if app.dispatch(intent).is_ok() {
        app.select_task(task_id);
        if let Some(note) = note {
            app.set_status(note);
        }
    }
}

fn modal_click(app: &mut App, hit: ModalHit) {
    let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
    match (&mut app.modal, hit) {
        (Some(Modal::BoardForm(form)), ModalHit::Board(field)) => {
            form.focus = field;
            if form.focused_input().is_none() {
                handle_board_form(app, enter);
            }
        }
        (Some(Modal::TaskForm(form)), ModalHit::Task(field)) => {
            form.focus = field;
            if form.focused_input().is_none() {
                handle_task_form(app, enter);
            }
        }
        (Some(Modal::TaskDetail(detail)), ModalHit::Detail(field)) => {
            detail.focus = field;
            detail.menu = None;
            handle_detail(app, enter);
        }
        (Some(Modal::TaskDetail(detail)), ModalHit::DetailMenuButton) => {
            detail.menu = match detail.menu {
                Some(_) => None,
                None => Some(0),
            };
        }
        (Some(Modal::TaskDetail(detail)), ModalHit::MenuItem(item)) => {
            let task_id = detail.task_id;
            run_detail_menu_item(app, task_id, item);
        }
        (Some(Modal::TaskDetail(detail)), ModalHit::Inert) => detail.menu = None,
        (Some(Modal::BoardMenu(_)), ModalHit::MenuItem(item)) => run_board_menu_item(app, item),
        (Some(Modal::ConfirmDelete(_)), ModalHit::Confirm) => confirm_delete(app),
        (Some(Modal::ConfirmDelete(_)), ModalHit::Cancel) => app.modal = None,
        _ => {}
    }
}

fn scroll_rows(app: &mut App, x: u16, y: u16, down: bool) {
    if app.modal.is_some() || !contains(app.screen.board, x, y) {
        return;
    }
    let max = app.board_layout.max_scroll_row();
    app.scroll.row = if down {
        app.scroll.row.saturating_add(SCROLL_STEP).min(max)
    } else {
        app.scroll.row.saturating_sub(SCROLL_STEP)
    };
}

fn scroll_columns(app: &mut App, delta: isize) {
    if app.modal.is_some() {
        return;
    }
    let columns = app.active_board().map_or(0, |b| b.columns.len());
    app.scroll.column = app
        .scroll
        .column
        .saturating_add_signed(delta)
        .min(columns.saturating_sub(1));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::input::test_support::*;
    use crate::tui::modal::BoardField;
    use crate::tui::modal_layout::ModalLayout;

    fn mouse(kind: MouseEventKind, x: u16, y: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column: x,
            row: y,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn down(app: &mut App, x: u16, y: u16) {
        handle_mouse(app, mouse(MouseEventKind::Down(MouseButton::Left), x, y));
    }

    fn drag(app: &mut App, x: u16, y: u16) {
        handle_mouse(app, mouse(MouseEventKind::Drag(MouseButton::Left), x, y));
    }

    fn up(app: &mut App, x: u16, y: u16) {
        handle_mouse(app, mouse(MouseEventKind::Up(MouseButton::Left), x, y));
    }

    /// A point inside a card, away from its border
    fn card_point(app: &App, column: usize, task: usize) -> (u16, u16) {
        let lane = app.board_layout.lane(column).unwrap();
        let rect = lane.card_rect(task, app.scroll.row).unwrap();
        (rect.x + 2, rect.y + 1)
    }

    #[test]
    fn drag_card_into_other_column() {
        let mut app = demo_app();
        let id = app.active_board().unwrap().columns[0].tasks[0].id;
        let (x, y) = card_point(&app, 0, 0);
        let (tx, ty) = card_point(&app, 1, 0);
        down(&mut app, x, y);
        drag(&mut app, tx, ty);
        assert!(app.drag.is_dragging());
        up(&mut app, tx, ty - 1);

        let board = app.active_board().unwrap();
        assert_eq!(board.columns[1].tasks[0].id, id);
        assert_eq!(board.columns[1].tasks[0].status, "Doing");
        assert!(app.drag.is_idle());
        assert_eq!(app.cursor, Cursor { column: 1, task: 0 });
    }

    #[test]
    fn click_without_motion_opens_detail() {
        let mut app = demo_app();
        let id = app.active_board().unwrap().columns[0].tasks[1].id;
        let (x, y) = card_point(&app, 0, 1);
        down(&mut app, x, y);
        up(&mut app, x, y);
        assert!(matches!(app.modal, Some(Modal::TaskDetail(ref d)) if d.task_id == id));
    }

    #[test]
    fn drop_outside_columns_cancels() {
        let mut app = demo_app();
        let before = app.state.clone();
        let (x, y) = card_point(&app, 0, 0);
        down(&mut app, x, y);
        drag(&mut app, 5, 10);
        up(&mut app, 5, 10);
        assert!(app.drag.is_idle());
        assert_eq!(app.state, before);
        assert!(app.modal.is_none());
    }

    #[test]
    fn drop_on_own_slot_is_noop() {
        let mut app = demo_app();
        let before = app.state.clone();
        let (x, y) = card_point(&app, 0, 1);
        down(&mut app, x, y);
        drag(&mut app, x + 3, y);
        up(&mut app, x + 3, y);
        assert!(app.state.shares_all_boards(&before));
    }

    #[test]
    fn esc_during_drag_cancels() {
        let mut app = demo_app();
        let before = app.state.clone();
        let (x, y) = card_point(&app, 0, 0);
        let (tx, ty) = card_point(&app, 1, 0);
        down(&mut app, x, y);
        drag(&mut app, tx, ty);
        handle_key(&mut app, key(KeyCode::Esc));
        up(&mut app, tx, ty);
        assert_eq!(app.state, before);
        assert!(app.modal.is_none());
    }

    #[test]
    fn sidebar_click_selects_board() {
        let mut app = demo_app();
        let rect = app.sidebar.rows[1].1;
        down(&mut app, rect.x + 1, rect.y);
        assert_eq!(app.active_board().map(|b| b.name.as_str()), Some("Marketing Plan"));
    }

    #[test]
    fn header_buttons() {
        let mut app = demo_app();
        let add = app.header.add_task;
        down(&mut app, add.x + 1, add.y);
        assert!(matches!(app.modal, Some(Modal::TaskForm(_))));

        app.modal = None;
        let menu = app.header.menu;
        down(&mut app, menu.x, menu.y);
        assert!(matches!(app.modal, Some(Modal::BoardMenu(_))));
    }

    #[test]
    fn click_outside_modal_dismisses() {
        let mut app = demo_app();
        app.open_add_board();
        app.sync_layout(AREA);
        down(&mut app, 0, 0);
        assert!(app.modal.is_none());
    }

    #[test]
    fn click_add_column_button_in_form() {
        let mut app = demo_app();
        app.open_add_board();
        app.sync_layout(AREA);
        let Some(ModalLayout::BoardForm(layout)) = app.modal_layout.clone() else {
            panic!("board form layout missing");
        };
        down(&mut app, layout.add_column.x + 1, layout.add_column.y);
        match &app.modal {
            Some(Modal::BoardForm(form)) => {
                assert_eq!(form.columns.len(), 3);
                assert_eq!(form.focus, BoardField::ColumnName(2));
            }
            other => panic!("unexpected modal {other:?}"),
        }
    }

    #[test]
    fn click_subtask_in_detail_toggles_it() {
        let mut app = demo_app();
        let task = app.active_board().unwrap().columns[0].tasks[0].clone();
        app.open_task_detail(task.id);
        app.sync_layout(AREA);
        let Some(ModalLayout::TaskDetail(layout)) = app.modal_layout.clone() else {
            panic!("detail layout missing");
        };
        let row = layout.subtasks[1];
        down(&mut app, row.x + 1, row.y);
        let now = app.active_board().unwrap().find_task(task.id).unwrap().clone();
        assert_ne!(now.subtasks[1].is_completed, task.subtasks[1].is_completed);
        assert!(matches!(app.modal, Some(Modal::TaskDetail(_))));
    }

    #[test]
    fn new_column_lane_opens_edit_board() {
        let mut app = demo_app();
        // wide enough for the trailing lane after three columns
        app.sync_layout(ratatui::layout::Rect::new(0, 0, 160, 40));
        let rect = app.board_layout.new_column.unwrap();
        down(&mut app, rect.x + 2, rect.y + 2);
        match &app.modal {
            Some(Modal::BoardForm(form)) => {
                assert!(form.editing.is_some());
                assert_eq!(form.columns.len(), 4);
            }
            other => panic!("unexpected modal {other:?}"),
        }
    }

    #[test]
    fn wheel_scrolls_within_bounds() {
        let mut app = demo_app();
        let board = app.screen.board;
        handle_mouse(&mut app, mouse(MouseEventKind::ScrollUp, board.x + 2, board.y + 2));
        assert_eq!(app.scroll.row, 0);
        handle_mouse(&mut app, mouse(MouseEventKind::ScrollRight, board.x + 2, board.y + 2));
        handle_mouse(&mut app, mouse(MouseEventKind::ScrollRight, board.x + 2, board.y + 2));
        handle_mouse(&mut app, mouse(MouseEventKind::ScrollRight, board.x + 2, board.y + 2));
        assert_eq!(app.scroll.column, 2);
    }
}
