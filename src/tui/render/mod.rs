pub mod board_view;
pub mod confirm;
pub mod forms;
pub mod header;
pub mod help_overlay;
mod helpers;
pub mod sidebar;
pub mod status_row;
pub mod task_detail;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;

use super::app::App;
use super::modal::Modal;
use super::modal_layout::ModalLayout;

/// Main render function. Layouts come from `App::sync_layout`, which
/// must run for the same frame area first.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    match app.screen.sidebar {
        Some(rect) => sidebar::render_sidebar(frame, app, rect),
        None => {
            if let Some(rect) = app.screen.strip {
                sidebar::render_strip(frame, app, rect);
            }
        }
    }
    header::render_header(frame, app, app.screen.header);
    board_view::render_board(frame, app, app.screen.board);
    status_row::render_status_row(frame, app, app.screen.status);

    if let (Some(modal), Some(layout)) = (&app.modal, &app.modal_layout) {
        frame
            .buffer_mut()
            .set_style(area, Style::default().add_modifier(Modifier::DIM));
        render_modal(frame, app, modal, layout);
    }

    // Help overlay (rendered on top of everything)
    if app.show_help {
        help_overlay::render_help_overlay(frame, app, area);
    }
}

fn render_modal(frame: &mut Frame, app: &App, modal: &Modal, layout: &ModalLayout) {
    match (modal, layout) {
        (Modal::BoardForm(form), ModalLayout::BoardForm(l)) => {
            forms::render_board_form(frame, &app.theme, form, l)
        }
        (Modal::TaskForm(form), ModalLayout::TaskForm(l)) => {
            forms::render_task_form(frame, &app.theme, form, l)
        }
        (Modal::TaskDetail(detail), ModalLayout::TaskDetail(l)) => {
            if let Some(board) = app.active_board() {
                task_detail::render_task_detail(frame, &app.theme, board, detail, l);
            }
        }
        (Modal::ConfirmDelete(confirm), ModalLayout::ConfirmDelete(l)) => {
            confirm::render_confirm(frame, &app.theme, confirm, l)
        }
        (Modal::BoardMenu(menu), ModalLayout::BoardMenu(l)) => {
            confirm::render_menu(frame, &app.theme, &crate::tui::modal::BOARD_MENU, menu.cursor, l)
        }
        _ => {}
    }
}
