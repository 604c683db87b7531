//! Geometry of the open modal. Computed with the screen layout before each
//! draw so the renderer and the mouse handler agree on every field.

use ratatui::layout::Rect;

use crate::model::Board;

use super::layout::contains;
use super::modal::{
    BOARD_MENU, BoardField, BoardForm, ConfirmDelete, DETAIL_MENU, DetailField, Modal,
    TaskDetail, TaskField, TaskForm,
};
use super::wrap;

pub const MODAL_W: u16 = 56;
pub const DESCRIPTION_ROWS: u16 = 4;
const MENU_W: u16 = 18;
/// Name input, then a color swatch and a remove button of this width each
const ROW_BUTTON_W: u16 = 3;

pub fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

/// Hands out consecutive full-width rows; rows past the bottom come back
/// with zero height so they neither draw nor hit.
struct Rows {
    x: u16,
    width: u16,
    y: u16,
    bottom: u16,
}

impl Rows {
    fn take(&mut self, height: u16) -> Rect {
        let h = height.min(self.bottom.saturating_sub(self.y));
        let rect = Rect::new(self.x, self.y.min(self.bottom), self.width, h);
        self.y = self.y.saturating_add(height);
        rect
    }

    fn skip(&mut self, n: u16) {
        self.y = self.y.saturating_add(n);
    }
}

/// A bordered modal box centered on screen, plus a row cursor over its
/// padded interior
fn modal_box(content_rows: u16, screen: Rect) -> (Rect, Rows) {
    let width = MODAL_W.min(screen.width.saturating_sub(2));
    let height = (content_rows + 2).min(screen.height.saturating_sub(2));
    let area = centered_rect_fixed(width, height, screen);
    let rows = Rows {
        x: area.x + 2,
        width: area.width.saturating_sub(4),
        y: area.y + 1,
        bottom: (area.y + area.height).saturating_sub(1),
    };
    (area, rows)
}

/// Split a row into a text field and trailing buttons
fn split_row(row: Rect, buttons: u16) -> (Rect, Vec<Rect>) {
    let reserved = buttons * (ROW_BUTTON_W + 1);
    let field = Rect::new(row.x, row.y, row.width.saturating_sub(reserved), row.height);
    let mut x = field.x + field.width;
    let rects = (0..buttons)
        .map(|_| {
            let r = Rect::new(x + 1, row.y, ROW_BUTTON_W, row.height);
            x += ROW_BUTTON_W + 1;
            r
        })
        .collect();
    (field, rects)
}

// ── Board form ──

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRowLayout {
    pub name: Rect,
    pub color: Rect,
    pub remove: Rect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardFormLayout {
    pub area: Rect,
    pub name_label: Rect,
    pub name: Rect,
    pub columns_label: Rect,
    pub columns: Vec<ColumnRowLayout>,
    pub add_column: Rect,
    pub submit: Rect,
}

impl BoardFormLayout {
    pub fn compute(form: &BoardForm, screen: Rect) -> Self {
        let n = form.columns.len() as u16;
        let (area, mut rows) = modal_box(9 + n, screen);
        rows.skip(1);
        let name_label = rows.take(1);
        let name = rows.take(1);
        rows.skip(1);
        let columns_label = rows.take(1);
        let columns = (0..n)
            .map(|_| {
                let (name, buttons) = split_row(rows.take(1), 2);
                ColumnRowLayout {
                    name,
                    color: buttons[0],
                    remove: buttons[1],
                }
            })
            .collect();
        rows.skip(1);
        let add_column = rows.take(1);
        rows.skip(1);
        let submit = rows.take(1);
        BoardFormLayout {
            area,
            name_label,
            name,
            columns_label,
            columns,
            add_column,
            submit,
        }
    }

    pub fn hit_test(&self, x: u16, y: u16) -> Option<BoardField> {
        if contains(self.name, x, y) {
            return Some(BoardField::Name);
        }
        for (i, row) in self.columns.iter().enumerate() {
            if contains(row.name, x, y) {
                return Some(BoardField::ColumnName(i));
            }
            if contains(row.color, x, y) {
                return Some(BoardField::ColumnColor(i));
            }
            if contains(row.remove, x, y) {
                return Some(BoardField::RemoveColumn(i));
            }
        }
        if contains(self.add_column, x, y) {
            return Some(BoardField::AddColumn);
        }
        contains(self.submit, x, y).then_some(BoardField::Submit)
    }
}

// ── Task form ──

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtaskRowLayout {
    pub title: Rect,
    pub remove: Rect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFormLayout {
    pub area: Rect,
    pub title_label: Rect,
    pub title: Rect,
    pub description_label: Rect,
    pub description: Rect,
    pub subtasks_label: Rect,
    pub subtasks: Vec<SubtaskRowLayout>,
    pub add_subtask: Rect,
    /// Label and selector; only the add form has them
    pub status: Option<(Rect, Rect)>,
    pub submit: Rect,
}

impl TaskFormLayout {
    pub fn compute(form: &TaskForm, screen: Rect) -> Self {
        let n = form.subtasks.len() as u16;
        let status_rows = if form.has_status() { 3 } else { 0 };
        let (area, mut rows) = modal_box(10 + DESCRIPTION_ROWS + n + status_rows, screen);
        rows.skip(1);
        let title_label = rows.take(1);
        let title = rows.take(1);
        rows.skip(1);
        let description_label = rows.take(1);
        let description = rows.take(DESCRIPTION_ROWS);
        rows.skip(1);
        let subtasks_label = rows.take(1);
        let subtasks = (0..n)
            .map(|_| {
                let (title, buttons) = split_row(rows.take(1), 1);
                SubtaskRowLayout {
                    title,
                    remove: buttons[0],
                }
            })
            .collect();
        let add_subtask = rows.take(1);
        rows.skip(1);
        let status = form.has_status().then(|| {
            let label = rows.take(1);
            let selector = rows.take(1);
            rows.skip(1);
            (label, selector)
        });
        let submit = rows.take(1);
        TaskFormLayout {
            area,
            title_label,
            title,
            description_label,
            description,
            subtasks_label,
            subtasks,
            add_subtask,
            status,
            submit,
        }
    }

    pub fn hit_test(&self, x: u16, y: u16) -> Option<TaskField> {
        if contains(self.title, x, y) {
            return Some(TaskField::Title);
        }
        if contains(self.description, x, y) {
            return Some(TaskField::Description);
        }
        for (i, row) in self.subtasks.iter().enumerate() {
            if contains(row.title, x, y) {
                return Some(TaskField::Subtask(i));
            }
            if contains(row.remove, x, y) {
                return Some(TaskField::RemoveSubtask(i));
            }
        }
        if contains(self.add_subtask, x, y) {
            return Some(TaskField::AddSubtask);
        }
        if let Some((_, selector)) = self.status
            && contains(selector, x, y)
        {
            return Some(TaskField::Status);
        }
        contains(self.submit, x, y).then_some(TaskField::Submit)
    }
}

// ── Task detail ──

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailLayout {
    pub area: Rect,
    pub title: Rect,
    pub title_lines: Vec<String>,
    pub menu_button: Rect,
    pub description: Rect,
    pub description_lines: Vec<String>,
    pub subtasks_label: Rect,
    pub subtasks: Vec<Rect>,
    pub status_label: Rect,
    pub status: Rect,
    /// The edit/delete dropdown while open
    pub menu: Option<MenuLayout>,
}

impl DetailLayout {
    pub fn compute(detail: &TaskDetail, board: &Board, screen: Rect) -> Option<Self> {
        let task = board.find_task(detail.task_id)?;
        let inner_w = MODAL_W.min(screen.width.saturating_sub(2)).saturating_sub(4) as usize;
        let title_lines = wrap::wrap_text(&task.title, inner_w.saturating_sub(4));
        let description_lines = if task.description.trim().is_empty() {
            Vec::new()
        } else {
            wrap::wrap_text(&task.description, inner_w)
        };
        let t = title_lines.len() as u16;
        let d = description_lines.len() as u16;
        let n = task.subtasks.len() as u16;
        let desc_rows = if d > 0 { d + 1 } else { 0 };
        let (area, mut rows) = modal_box(5 + t + desc_rows + n, screen);

        rows.skip(1);
        let title_row = rows.take(t);
        let (title, buttons) = split_row(title_row, 1);
        let menu_button = Rect::new(buttons[0].x, title_row.y, ROW_BUTTON_W, title_row.height.min(1));
        rows.skip(1);
        let description = if d > 0 {
            let r = rows.take(d);
            rows.skip(1);
            r
        } else {
            Rect::new(rows.x, rows.y, rows.width, 0)
        };
        let subtasks_label = rows.take(1);
        let subtasks = (0..n).map(|_| rows.take(1)).collect();
        rows.skip(1);
        let status_label = rows.take(1);
        let status = rows.take(1);

        let menu = detail
            .menu
            .map(|_| MenuLayout::anchored(menu_button, DETAIL_MENU.len(), screen));
        Some(DetailLayout {
            area,
            title,
            title_lines,
            menu_button,
            description,
            description_lines,
            subtasks_label,
            subtasks,
            status_label,
            status,
            menu,
        })
    }
}

// ── Confirmation and menus ──

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmLayout {
    pub area: Rect,
    pub title: Rect,
    pub message: Rect,
    pub message_lines: Vec<String>,
    pub delete: Rect,
    pub cancel: Rect,
}

impl ConfirmLayout {
    pub fn compute(confirm: &ConfirmDelete, screen: Rect) -> Self {
        let inner_w = MODAL_W.min(screen.width.saturating_sub(2)).saturating_sub(4);
        let message_lines = wrap::wrap_text(&confirm.message(), inner_w as usize);
        let m = message_lines.len() as u16;
        let (area, mut rows) = modal_box(5 + m, screen);
        rows.skip(1);
        let title = rows.take(1);
        rows.skip(1);
        let message = rows.take(m);
        rows.skip(1);
        let buttons = rows.take(1);
        let half = buttons.width.saturating_sub(1) / 2;
        let delete = Rect::new(buttons.x, buttons.y, half, buttons.height);
        let cancel = Rect::new(buttons.x + half + 1, buttons.y, half, buttons.height);
        ConfirmLayout {
            area,
            title,
            message,
            message_lines,
            delete,
            cancel,
        }
    }
}

/// A small dropdown hanging below its button, right-aligned to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuLayout {
    pub area: Rect,
    pub items: Vec<Rect>,
}

impl MenuLayout {
    pub fn anchored(button: Rect, count: usize, screen: Rect) -> Self {
        let width = MENU_W.min(screen.width);
        let right = (button.x + button.width).min(screen.x + screen.width);
        let x = right.saturating_sub(width).max(screen.x);
        let y = button.y + 1;
        let height = (count as u16 + 2).min((screen.y + screen.height).saturating_sub(y));
        let area = Rect::new(x, y, width, height);
        let bottom = (y + height).saturating_sub(1);
        let items = (0..count as u16)
            .map(|i| y + 1 + i)
            .filter(|row| *row < bottom)
            .map(|row| Rect::new(x + 1, row, width.saturating_sub(2), 1))
            .collect();
        MenuLayout { area, items }
    }

    pub fn item_at(&self, x: u16, y: u16) -> Option<usize> {
        self.items.iter().position(|r| contains(*r, x, y))
    }
}

/// A click inside the open modal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalHit {
    Board(BoardField),
    Task(TaskField),
    Detail(DetailField),
    DetailMenuButton,
    MenuItem(usize),
    Confirm,
    Cancel,
    /// Inside the modal but on nothing clickable
    Inert,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalLayout {
    BoardForm(BoardFormLayout),
    TaskForm(TaskFormLayout),
    TaskDetail(DetailLayout),
    ConfirmDelete(ConfirmLayout),
    BoardMenu(MenuLayout),
}

impl ModalLayout {
    /// None when the modal refers to something that no longer exists
    pub fn compute(
        modal: &Modal,
        board: Option<&Board>,
        screen: Rect,
        header_menu: Rect,
    ) -> Option<Self> {
        Some(match modal {
            Modal::BoardForm(form) => ModalLayout::BoardForm(BoardFormLayout::compute(form, screen)),
            Modal::TaskForm(form) => ModalLayout::TaskForm(TaskFormLayout::compute(form, screen)),
            Modal::TaskDetail(detail) => {
                ModalLayout::TaskDetail(DetailLayout::compute(detail, board?, screen)?)
            }
            Modal::ConfirmDelete(confirm) => {
                ModalLayout::ConfirmDelete(ConfirmLayout::compute(confirm, screen))
            }
            Modal::BoardMenu(_) => ModalLayout::BoardMenu(MenuLayout::anchored(
                header_menu,
                BOARD_MENU.len(),
                screen,
            )),
        })
    }

    pub fn area(&self) -> Rect {
        match self {
            ModalLayout::BoardForm(l) => l.area,
            ModalLayout::TaskForm(l) => l.area,
            ModalLayout::TaskDetail(l) => l.area,
            ModalLayout::ConfirmDelete(l) => l.area,
            ModalLayout::BoardMenu(l) => l.area,
        }
    }

    /// What the point lands on; None means outside the modal
    pub fn hit_test(&self, x: u16, y: u16) -> Option<ModalHit> {
        if let ModalLayout::TaskDetail(detail) = self
            && let Some(menu) = &detail.menu
            && contains(menu.area, x, y)
        {
            return Some(menu.item_at(x, y).map_or(ModalHit::Inert, ModalHit::MenuItem));
        }
        if !contains(self.area(), x, y) {
            return None;
        }
        let hit = match self {
            ModalLayout::BoardForm(l) => l.hit_test(x, y).map(ModalHit::Board),
            ModalLayout::TaskForm(l) => l.hit_test(x, y).map(ModalHit::Task),
            ModalLayout::TaskDetail(l) => {
                if contains(l.menu_button, x, y) {
                    Some(ModalHit::DetailMenuButton)
                } else if contains(l.status, x, y) {
                    Some(ModalHit::Detail(DetailField::Status))
                } else {
                    l.subtasks
                        .iter()
                        .position(|r| contains(*r, x, y))
                        .map(|i| ModalHit::Detail(DetailField::Subtask(i)))
                }
            }
            ModalLayout::ConfirmDelete(l) => {
                if contains(l.delete, x, y) {
                    Some(ModalHit::Confirm)
                } else if contains(l.cancel, x, y) {
                    Some(ModalHit::Cancel)
                } else {
                    None
                }
            }
            ModalLayout::BoardMenu(l) => l.item_at(x, y).map(ModalHit::MenuItem),
        };
        Some(hit.unwrap_or(ModalHit::Inert))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Column, ColumnColor, Subtask, Task};

    const SCREEN: Rect = Rect {
        x: 0,
        y: 0,
        width: 100,
        height: 40,
    };

    fn board() -> Board {
        let mut board = Board::new("Platform Launch");
        board.columns.push(Column::new("Todo", ColumnColor::Color1));
        let mut task = Task::new("Plan launch", "Todo");
        task.description = "Outline the launch checklist".into();
        task.subtasks.push(Subtask::new("Draft"));
        task.subtasks.push(Subtask::new("Review"));
        board.columns[0].tasks.push(task);
        board
    }

    #[test]
    fn board_form_rows_follow_columns() {
        let form = BoardForm::add();
        let layout = BoardFormLayout::compute(&form, SCREEN);
        assert_eq!(layout.area.width, MODAL_W);
        assert_eq!(layout.area.height, 9 + 2 + 2);
        assert_eq!(layout.columns.len(), 2);
        assert_eq!(layout.columns[1].name.y, layout.columns[0].name.y + 1);
        let row = &layout.columns[0];
        assert_eq!(layout.hit_test(row.color.x, row.color.y), Some(BoardField::ColumnColor(0)));
        assert_eq!(layout.hit_test(row.remove.x + 1, row.remove.y), Some(BoardField::RemoveColumn(0)));
        assert_eq!(layout.hit_test(layout.submit.x, layout.submit.y), Some(BoardField::Submit));
    }

    #[test]
    fn edit_task_form_has_no_status_rows() {
        let board = board();
        let add = TaskFormLayout::compute(&TaskForm::add(&board, None), SCREEN);
        let edit = TaskFormLayout::compute(&TaskForm::edit(&board.columns[0].tasks[0]), SCREEN);
        assert!(add.status.is_some());
        assert!(edit.status.is_none());
        assert_eq!(edit.subtasks.len(), 2);
    }

    #[test]
    fn detail_hits_subtasks_and_status() {
        let board = board();
        let task = &board.columns[0].tasks[0];
        let detail = TaskDetail::new(task);
        let layout = DetailLayout::compute(&detail, &board, SCREEN).unwrap();
        assert_eq!(layout.description_lines, ["Outline the launch checklist"]);
        let modal = ModalLayout::TaskDetail(layout.clone());
        let second = layout.subtasks[1];
        assert_eq!(
            modal.hit_test(second.x + 2, second.y),
            Some(ModalHit::Detail(DetailField::Subtask(1)))
        );
        assert_eq!(
            modal.hit_test(layout.status.x, layout.status.y),
            Some(ModalHit::Detail(DetailField::Status))
        );
        assert_eq!(modal.hit_test(0, 0), None);
    }

    #[test]
    fn detail_of_missing_task_has_no_layout() {
        let board = board();
        let stale = TaskDetail::new(&Task::new("Gone", "Todo"));
        assert!(DetailLayout::compute(&stale, &board, SCREEN).is_none());
    }

    #[test]
    fn confirm_buttons_side_by_side() {
        let confirm = ConfirmDelete::board(&board());
        let layout = ConfirmLayout::compute(&confirm, SCREEN);
        assert_eq!(layout.delete.y, layout.cancel.y);
        assert!(layout.delete.x + layout.delete.width < layout.cancel.x);
        let modal = ModalLayout::ConfirmDelete(layout.clone());
        assert_eq!(modal.hit_test(layout.cancel.x, layout.cancel.y), Some(ModalHit::Cancel));
        assert_eq!(modal.hit_test(layout.area.x + 1, layout.area.y + 1), Some(ModalHit::Inert));
    }

    #[test]
    fn menu_hangs_below_button() {
        let button = Rect::new(90, 1, 3, 1);
        let menu = MenuLayout::anchored(button, 2, SCREEN);
        assert_eq!(menu.area.y, 2);
        assert_eq!(menu.area.x + menu.area.width, 93);
        assert_eq!(menu.item_at(80, 4), Some(1));
    }

    #[test]
    fn tiny_screen_clips_rows() {
        let form = BoardForm::add();
        let layout = BoardFormLayout::compute(&form, Rect::new(0, 0, 40, 8));
        assert_eq!(layout.submit.height, 0);
        assert_eq!(layout.hit_test(layout.submit.x, layout.submit.y), None);
    }
}
