use std::io;
use std::time::Duration;

use crossterm::event::{
    self, DisableBracketedPaste, DisableFocusChange, DisableMouseCapture, EnableBracketedPaste,
    EnableFocusChange, EnableMouseCapture, Event, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;

use crate::io::color_scheme::{self, ColorScheme};
use crate::model::{Board, Column, KanbanConfig, KanbanState, Task, TaskId, ThemeChoice, UiConfig};
use crate::ops::drag::DragGesture;
use crate::ops::intent::{self, Intent};
use crate::ops::validate::ValidationErrors;

use super::input;
use super::layout::{
    BoardLayout, BoardScroll, HeaderLayout, ScreenLayout, SidebarItem, SidebarLayout,
};
use super::modal::{BoardForm, BoardMenu, ConfirmDelete, Modal, TaskDetail, TaskForm};
use super::modal_layout::ModalLayout;
use super::render;
use super::theme::Theme;

/// Which pane receives navigation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    Board,
}

/// Keyboard selection on the board: a column and a task within it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub column: usize,
    pub task: usize,
}

/// Direction for keyboard task moves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDir {
    Up,
    Down,
    Left,
    Right,
}

/// Main application state
pub struct App {
    pub state: KanbanState,
    pub ui: UiConfig,
    pub theme: Theme,
    pub scheme: ColorScheme,
    pub should_quit: bool,
    pub sidebar_open: bool,
    pub focus: Focus,
    /// Index into `SidebarItem::all`
    pub sidebar_cursor: usize,
    pub cursor: Cursor,
    pub scroll: BoardScroll,
    /// Scroll the board so the cursor is visible on the next layout pass
    pub follow_cursor: bool,
    /// Active board changed: reset scroll and cursor before the next draw
    pub pending_reset: bool,
    pub modal: Option<Modal>,
    pub drag: DragGesture,
    pub drag_threshold: u16,
    pub screen: ScreenLayout,
    pub sidebar: SidebarLayout,
    pub header: HeaderLayout,
    pub board_layout: BoardLayout,
    pub modal_layout: Option<ModalLayout>,
    /// Transient message for the status row
    pub status_message: Option<String>,
    pub show_help: bool,
    pub show_key_hints: bool,
}

impl App {
    pub fn new(state: KanbanState, ui: &UiConfig, scheme: ColorScheme) -> Self {
        App {
            state,
            theme: Theme::from_config(ui, scheme),
            scheme,
            should_quit: false,
            sidebar_open: ui.sidebar,
            focus: Focus::Board,
            sidebar_cursor: 0,
            cursor: Cursor::default(),
            scroll: BoardScroll::default(),
            follow_cursor: true,
            pending_reset: false,
            modal: None,
            drag: DragGesture::Idle,
            drag_threshold: ui.drag_threshold.max(1),
            screen: ScreenLayout::default(),
            sidebar: SidebarLayout::default(),
            header: HeaderLayout::default(),
            board_layout: BoardLayout::default(),
            modal_layout: None,
            status_message: None,
            show_help: false,
            show_key_hints: ui.show_key_hints,
            ui: ui.clone(),
        }
    }

    pub fn active_board(&self) -> Option<&Board> {
        self.state.active_board()
    }

    pub fn selected_column(&self) -> Option<&Column> {
        self.active_board()?.columns.get(self.cursor.column)
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.selected_column()?.tasks.get(self.cursor.task)
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Run one intent through the mutation engine and swap in the result.
    /// Validation errors come back for the modal to show; state is untouched.
    pub fn dispatch(&mut self, intent: Intent) -> Result<(), ValidationErrors> {
        let next = match intent::apply(&self.state, &intent) {
            Ok(next) => next,
            Err(errors) => {
                tracing::debug!(intent = intent.name(), %errors, "intent rejected");
                return Err(errors);
            }
        };
        let changed = next != self.state;
        if next.active != self.state.active {
            self.pending_reset = true;
        }
        self.state = next;
        tracing::debug!(intent = intent.name(), changed, "intent applied");
        self.clamp_cursor();
        self.drop_stale_modal();
        Ok(())
    }

    /// Keep the cursor inside the active board
    pub fn clamp_cursor(&mut self) {
        let (columns, tasks) = match self.active_board() {
            Some(board) => {
                let column = self.cursor.column.min(board.columns.len().saturating_sub(1));
                let tasks = board.columns.get(column).map_or(0, |c| c.tasks.len());
                (board.columns.len(), tasks)
            }
            None => (0, 0),
        };
        self.cursor.column = self.cursor.column.min(columns.saturating_sub(1));
        self.cursor.task = self.cursor.task.min(tasks.saturating_sub(1));
        let items = SidebarItem::all(self.state.boards.len()).len();
        self.sidebar_cursor = self.sidebar_cursor.min(items.saturating_sub(1));
    }

    /// Close a detail view whose task is gone
    fn drop_stale_modal(&mut self) {
        if let Some(Modal::TaskDetail(detail)) = &self.modal {
            let exists = self
                .active_board()
                .is_some_and(|b| b.find_task(detail.task_id).is_some());
            if !exists {
                self.modal = None;
            }
        }
    }

    /// Put the cursor on a task of the active board
    pub fn select_task(&mut self, task_id: TaskId) {
        if let Some((column, task)) = self.active_board().and_then(|b| b.locate_task(task_id)) {
            self.cursor = Cursor { column, task };
            self.follow_cursor = true;
        }
    }

    /// Recompute every layout for the coming draw. Applies the deferred
    /// board-switch reset first.
    pub fn sync_layout(&mut self, area: Rect) {
        if self.pending_reset {
            self.pending_reset = false;
            self.scroll = BoardScroll::default();
            self.cursor = Cursor::default();
            self.follow_cursor = true;
            self.clamp_cursor();
        }

        self.screen = ScreenLayout::compute(area, self.sidebar_open);
        self.sidebar = self
            .screen
            .sidebar
            .map(|r| SidebarLayout::compute(r, self.state.boards.len()))
            .unwrap_or_default();
        self.header = HeaderLayout::compute(self.screen.header);

        self.board_layout = match self.state.active_board() {
            Some(board) => {
                let visible = BoardLayout::visible_lanes(self.screen.board.width);
                if self.follow_cursor {
                    if self.cursor.column < self.scroll.column {
                        self.scroll.column = self.cursor.column;
                    } else if self.cursor.column >= self.scroll.column + visible {
                        self.scroll.column = self.cursor.column + 1 - visible;
                    }
                }
                let mut layout = BoardLayout::compute(board, self.screen.board, self.scroll);
                if self.follow_cursor
                    && let Some(lane) = layout.lane(self.cursor.column)
                    && let Some(card) = lane.cards.get(self.cursor.task)
                {
                    let span = card.span;
                    let height = lane.content_height;
                    if span.top < self.scroll.row {
                        self.scroll.row = span.top;
                    } else if span.bottom() > self.scroll.row + height {
                        self.scroll.row = span.bottom().saturating_sub(height);
                    }
                }
                self.scroll.row = self.scroll.row.min(layout.max_scroll_row());
                self.scroll.column = layout.scroll.column;
                layout.scroll.row = self.scroll.row;
                layout
            }
            None => BoardLayout::default(),
        };
        self.follow_cursor = false;

        self.modal_layout = self.modal.as_ref().and_then(|modal| {
            ModalLayout::compute(modal, self.state.active_board(), area, self.header.menu)
        });
    }

    // ── Opening modals ──

    pub fn open_add_board(&mut self) {
        self.modal = Some(Modal::BoardForm(BoardForm::add()));
    }

    pub fn open_edit_board(&mut self, with_new_column: bool) {
        let Some(board) = self.active_board() else {
            return;
        };
        let form = if with_new_column {
            BoardForm::edit_with_new_column(board)
        } else {
            BoardForm::edit(board)
        };
        self.modal = Some(Modal::BoardForm(form));
    }

    pub fn open_delete_board(&mut self) {
        if let Some(board) = self.active_board() {
            self.modal = Some(Modal::ConfirmDelete(ConfirmDelete::board(board)));
        }
    }

    pub fn open_board_menu(&mut self) {
        if self.active_board().is_some() {
            self.modal = Some(Modal::BoardMenu(BoardMenu::default()));
        }
    }

    /// Add Task, defaulting the status to `column`
    pub fn open_add_task(&mut self, column: Option<usize>) {
        let Some(board) = self.active_board() else {
            return;
        };
        if board.columns.is_empty() {
            self.set_status("Add a column before adding tasks");
            return;
        }
        self.modal = Some(Modal::TaskForm(TaskForm::add(board, column)));
    }

    pub fn open_edit_task(&mut self, task_id: TaskId) {
        if let Some(task) = self.active_board().and_then(|b| b.find_task(task_id)) {
            self.modal = Some(Modal::TaskForm(TaskForm::edit(task)));
        }
    }

    pub fn open_task_detail(&mut self, task_id: TaskId) {
        if let Some(task) = self.active_board().and_then(|b| b.find_task(task_id)) {
            self.modal = Some(Modal::TaskDetail(TaskDetail::new(task)));
        }
    }

    pub fn open_delete_task(&mut self, task_id: TaskId) {
        if let Some(task) = self.active_board().and_then(|b| b.find_task(task_id)) {
            self.modal = Some(Modal::ConfirmDelete(ConfirmDelete::task(task)));
        }
    }

    // ── Board-level actions ──

    pub fn select_board_at(&mut self, index: usize) {
        let Some(id) = self.state.boards.get(index).map(|b| b.id) else {
            return;
        };
        let _ = self.dispatch(Intent::SelectBoard(id));
    }

    /// Step to the previous/next board, wrapping
    pub fn cycle_board(&mut self, forward: bool) {
        let n = self.state.boards.len();
        if n == 0 {
            return;
        }
        let current = self.state.active_index().unwrap_or(0);
        let next = if forward {
            (current + 1) % n
        } else {
            (current + n - 1) % n
        };
        self.select_board_at(next);
    }

    pub fn toggle_theme(&mut self) {
        self.scheme = self.scheme.toggled();
        self.theme = Theme::from_config(&self.ui, self.scheme);
        tracing::debug!(scheme = ?self.scheme, "theme toggled");
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
        if !self.sidebar_open {
            self.focus = Focus::Board;
        }
    }

    /// Move the selected task one step with the keyboard
    pub fn move_selected(&mut self, dir: MoveDir) {
        let Some(board) = self.active_board() else {
            return;
        };
        let Some(task) = self.selected_task() else {
            return;
        };
        let task_id = task.id;
        let title = task.title.clone();
        let Cursor { column, task: index } = self.cursor;
        let source = board.columns[column].name.clone();
        let (target_column, target_index) = match dir {
            MoveDir::Up if index > 0 => (column, index - 1),
            // slot after the next card, before removal
            MoveDir::Down if index + 1 < board.columns[column].tasks.len() => (column, index + 2),
            MoveDir::Left if column > 0 => (column - 1, index),
            MoveDir::Right if column + 1 < board.columns.len() => (column + 1, index),
            _ => return,
        };
        let target = board.columns[target_column].name.clone();
        let intent = Intent::MoveTask {
            task_id,
            source,
            target: target.clone(),
            index: target_index,
        };
        if self.dispatch(intent).is_ok() {
            self.select_task(task_id);
            if target_column != column {
                self.set_status(format!("Moved '{}' to {}", title, target));
            }
        }
    }
}

/// Run the TUI application
pub fn run(
    state: KanbanState,
    config: &KanbanConfig,
    theme: Option<ThemeChoice>,
) -> Result<(), Box<dyn std::error::Error>> {
    let choice = theme.unwrap_or(config.ui.theme);
    let scheme = color_scheme::resolve(choice, color_scheme::detect());
    let mut app = App::new(state, &config.ui, scheme);
    tracing::info!(
        boards = app.state.boards.len(),
        scheme = ?scheme,
        "starting kanban"
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste,
        EnableFocusChange
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(
            io::stdout(),
            DisableFocusChange,
            DisableBracketedPaste,
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableFocusChange,
        DisableBracketedPaste,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    tracing::info!("kanban exited");
    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| {
            app.sync_layout(frame.area());
            render::render(frame, app);
        })?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => input::handle_key(app, key),
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                Event::Paste(text) => input::handle_paste(app, &text),
                Event::FocusLost => {
                    if !app.drag.is_idle() {
                        app.drag.cancel();
                    }
                }
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::seed;

    fn app() -> App {
        let state = seed::demo().unwrap();
        let mut app = App::new(state, &UiConfig::default(), ColorScheme::Dark);
        app.sync_layout(Rect::new(0, 0, 120, 40));
        app
    }

    #[test]
    fn new_app_starts_on_first_board() {
        let app = app();
        assert_eq!(app.active_board().map(|b| b.name.as_str()), Some("Platform Launch"));
        assert_eq!(app.cursor, Cursor::default());
        assert!(app.modal.is_none());
        assert!(app.drag.is_idle());
    }

    #[test]
    fn board_switch_resets_cursor_on_next_layout() {
        let mut app = app();
        app.cursor = Cursor { column: 1, task: 0 };
        app.select_board_at(1);
        assert!(app.pending_reset);
        app.sync_layout(Rect::new(0, 0, 120, 40));
        assert!(!app.pending_reset);
        assert_eq!(app.cursor, Cursor::default());
        assert_eq!(app.scroll, BoardScroll::default());
        assert_eq!(app.active_board().map(|b| b.name.as_str()), Some("Marketing Plan"));
    }

    #[test]
    fn reselecting_active_board_is_not_a_switch() {
        let mut app = app();
        app.select_board_at(0);
        assert!(!app.pending_reset);
    }

    #[test]
    fn dispatch_error_leaves_state_alone() {
        let mut app = app();
        let before = app.state.clone();
        let err = app
            .dispatch(Intent::AddBoard {
                name: "platform launch".into(),
                columns: Vec::new(),
            })
            .unwrap_err();
        assert!(!err.is_empty());
        assert!(app.state.shares_all_boards(&before));
    }

    #[test]
    fn move_selected_right_changes_status() {
        let mut app = app();
        let task_id = app.selected_task().unwrap().id;
        app.move_selected(MoveDir::Right);
        let board = app.active_board().unwrap();
        let (column, _) = board.locate_task(task_id).unwrap();
        assert_eq!(column, 1);
        assert_eq!(board.find_task(task_id).unwrap().status, board.columns[1].name);
        assert_eq!(app.cursor.column, 1);
        assert!(app.status_message.as_deref().unwrap().starts_with("Moved"));
    }

    #[test]
    fn move_selected_down_swaps_with_next() {
        let mut app = app();
        let ids: Vec<TaskId> = app.active_board().unwrap().columns[0]
            .tasks
            .iter()
            .map(|t| t.id)
            .collect();
        app.move_selected(MoveDir::Down);
        let after: Vec<TaskId> = app.active_board().unwrap().columns[0]
            .tasks
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(after[0], ids[1]);
        assert_eq!(after[1], ids[0]);
        assert_eq!(app.cursor.task, 1);
    }

    #[test]
    fn deleting_shown_task_closes_detail() {
        let mut app = app();
        let task_id = app.selected_task().unwrap().id;
        app.open_task_detail(task_id);
        app.dispatch(Intent::DeleteTask(task_id)).unwrap();
        assert!(app.modal.is_none());
    }

    #[test]
    fn theme_toggle_flips_scheme() {
        let mut app = app();
        let dark_bg = app.theme.background;
        app.toggle_theme();
        assert_eq!(app.scheme, ColorScheme::Light);
        assert_ne!(app.theme.background, dark_bg);
    }

    #[test]
    fn add_task_needs_a_column() {
        let mut app = app();
        let id = app.active_board().unwrap().id;
        app.dispatch(Intent::UpdateBoard(crate::ops::board_ops::BoardDraft {
            id,
            name: "Platform Launch".into(),
            columns: Vec::new(),
        }))
        .unwrap();
        app.open_add_task(None);
        assert!(app.modal.is_none());
        assert!(app.status_message.is_some());
    }
}
