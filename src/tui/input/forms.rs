use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ops::intent::Intent;
use crate::ops::validate::{Field, ValidationErrors};
use crate::tui::app::App;
use crate::tui::modal::{BoardField, Modal, TaskField, TaskForm};
use crate::tui::text_input::TextInput;

use super::*;

/// Apply an editing key to a text field. Returns true when the text changed.
pub(super) fn edit_text(input: &mut TextInput, key: KeyEvent) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('w') if ctrl => {
            input.delete_word_back();
            true
        }
        KeyCode::Char('u') if ctrl => {
            input.clear();
            true
        }
        KeyCode::Char('a') if ctrl => {
            input.home();
            false
        }
        KeyCode::Char('e') if ctrl => {
            input.end();
            false
        }
        KeyCode::Char(_) if ctrl => false,
        KeyCode::Char(c) => {
            input.insert_char(c);
            true
        }
        KeyCode::Enter if input.multiline => {
            input.insert_char('\n');
            true
        }
        KeyCode::Backspace => {
            input.backspace();
            true
        }
        KeyCode::Delete => {
            input.delete();
            true
        }
        KeyCode::Left => {
            input.left();
            false
        }
        KeyCode::Right => {
            input.right();
            false
        }
        KeyCode::Home => {
            input.home();
            false
        }
        KeyCode::End => {
            input.end();
            false
        }
        _ => false,
    }
}

// ── Board form ──

pub(super) fn handle_board_form(app: &mut App, key: KeyEvent) {
    if is_ctrl(&key, 's') {
        submit_board_form(app);
        return;
    }
    let Some(Modal::BoardForm(form)) = &mut app.modal else {
        return;
    };
    match key.code {
        KeyCode::Esc => {
            app.modal = None;
            return;
        }
        KeyCode::Tab | KeyCode::Down => {
            form.focus_next(true);
            return;
        }
        KeyCode::BackTab | KeyCode::Up => {
            form.focus_next(false);
            return;
        }
        _ => {}
    }

    let activate = matches!(key.code, KeyCode::Enter | KeyCode::Char(' '));
    match form.focus {
        BoardField::Submit if activate => submit_board_form(app),
        BoardField::AddColumn if activate => {
            if !form.add_column() {
                app.set_status("Maximum Columns Reached");
            }
        }
        BoardField::RemoveColumn(i) if activate => form.remove_column(i),
        BoardField::ColumnColor(i)
            if activate || matches!(key.code, KeyCode::Left | KeyCode::Right) =>
        {
            form.cycle_color(i)
        }
        BoardField::Name | BoardField::ColumnName(_) if key.code == KeyCode::Enter => {
            form.focus_next(true)
        }
        _ => {
            if let Some((field, input)) = form.focused_input()
                && edit_text(input, key)
            {
                form.errors.clear(field);
            }
        }
    }
}

/// First field carrying an error, for refocusing after a failed submit
fn board_error_focus(errors: &ValidationErrors) -> Option<BoardField> {
    errors.iter().find_map(|(field, _)| match field {
        Field::BoardName => Some(BoardField::Name),
        Field::Column(i) => Some(BoardField::ColumnName(i)),
        Field::Columns => Some(BoardField::AddColumn),
        _ => None,
    })
}

pub(super) fn submit_board_form(app: &mut App) {
    let Some(Modal::BoardForm(mut form)) = app.modal.take() else {
        return;
    };
    let intent = form.intent();
    let name = form.name.as_str().trim().to_string();
    let created = matches!(intent, Intent::AddBoard { .. });
    match app.dispatch(intent) {
        Ok(()) => {
            app.set_status(if created {
                format!("Created board '{}'", name)
            } else {
                format!("Saved board '{}'", name)
            });
        }
        Err(errors) => {
            if let Some(focus) = board_error_focus(&errors) {
                form.focus = focus;
            }
            app.set_status(errors.to_string());
            form.errors = errors;
            app.modal = Some(Modal::BoardForm(form));
        }
    }
}

// ── Task form ──

pub(super) fn handle_task_form(app: &mut App, key: KeyEvent) {
    if is_ctrl(&key, 's') {
        submit_task_form(app);
        return;
    }
    let Some(Modal::TaskForm(form)) = &mut app.modal else {
        return;
    };
    match key.code {
        KeyCode::Esc => {
            app.modal = None;
            return;
        }
        KeyCode::Tab => {
            form.focus_next(true);
            return;
        }
        KeyCode::BackTab => {
            form.focus_next(false);
            return;
        }
        // Up/Down step between fields except inside the description
        KeyCode::Down if form.focus != TaskField::Description => {
            form.focus_next(true);
            return;
        }
        KeyCode::Up if form.focus != TaskField::Description => {
            form.focus_next(false);
            return;
        }
        _ => {}
    }

    let activate = matches!(key.code, KeyCode::Enter | KeyCode::Char(' '));
    match form.focus {
        TaskField::Submit if activate => submit_task_form(app),
        TaskField::AddSubtask if activate => form.add_subtask(),
        TaskField::RemoveSubtask(i) if activate => form.remove_subtask(i),
        TaskField::Status => match key.code {
            KeyCode::Left | KeyCode::Char('h') => form.cycle_status(false),
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Enter | KeyCode::Char(' ') => {
                form.cycle_status(true)
            }
            _ => {}
        },
        TaskField::Title | TaskField::Subtask(_) if key.code == KeyCode::Enter => {
            form.focus_next(true)
        }
        _ => {
            if let Some((field, input)) = form.focused_input()
                && edit_text(input, key)
                && let Some(field) = field
            {
                form.errors.clear(field);
            }
        }
    }
}

fn task_error_focus(errors: &ValidationErrors) -> Option<TaskField> {
    errors.iter().find_map(|(field, _)| match field {
        Field::Title => Some(TaskField::Title),
        Field::Subtask(i) => Some(TaskField::Subtask(i)),
        Field::Status => Some(TaskField::Status),
        _ => None,
    })
}

/// Status column index the add form will drop the new task into
fn target_column(app: &App, form: &TaskForm) -> Option<usize> {
    let board = app.active_board()?;
    form.selected_status()
        .and_then(|s| board.column_index(s))
        .or(Some(0))
}

pub(super) fn submit_task_form(app: &mut App) {
    let Some(Modal::TaskForm(mut form)) = app.modal.take() else {
        return;
    };
    let title = form.title.as_str().trim().to_string();
    let target = target_column(app, &form);
    let editing = form.editing;
    match app.dispatch(form.intent()) {
        Ok(()) => match editing {
            Some(id) => {
                app.select_task(id);
                app.set_status(format!("Saved task '{}'", title));
            }
            None => {
                // the new task is last in its column
                if let Some(column) = target {
                    let len = app
                        .active_board()
                        .and_then(|b| b.columns.get(column))
                        .map_or(0, |c| c.tasks.len());
                    app.cursor.column = column;
                    app.cursor.task = len.saturating_sub(1);
                    app.follow_cursor = true;
                }
                app.set_status(format!("Created task '{}'", title));
            }
        },
        Err(errors) => {
            if let Some(focus) = task_error_focus(&errors) {
                form.focus = focus;
            }
            app.set_status(errors.to_string());
            form.errors = errors;
            app.modal = Some(Modal::TaskForm(form));
        }
    }
}
