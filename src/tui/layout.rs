//! Screen geometry: where the sidebar, header, lanes and cards are.
//!
//! Everything is a pure function of the board and the terminal area, so
//! the renderer and the mouse handler always agree on what is where.

use ratatui::layout::Rect;

use crate::model::{Board, Task, TaskId};
use crate::ops::drag::{CardSpan, DropZone};

use super::wrap;

pub const SIDEBAR_W: u16 = 28;
/// Collapsed sidebar: a thin strip that reopens it
pub const STRIP_W: u16 = 2;
pub const HEADER_H: u16 = 3;
/// Lane width including the gap to its right
pub const LANE_W: u16 = 30;
pub const LANE_GAP: u16 = 2;
/// Header row plus a blank row above the first card
const LANE_HEADER_H: u16 = 2;
pub const MAX_TITLE_LINES: usize = 2;

/// Text width inside a card: lane minus borders and one cell of padding each side
pub const CARD_TEXT_W: usize = (LANE_W - LANE_GAP - 4) as usize;

pub fn contains(rect: Rect, x: u16, y: u16) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

/// Top-level regions of the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenLayout {
    pub area: Rect,
    pub sidebar: Option<Rect>,
    pub strip: Option<Rect>,
    pub header: Rect,
    pub board: Rect,
    pub status: Rect,
}

impl ScreenLayout {
    pub fn compute(area: Rect, sidebar_open: bool) -> Self {
        let status_h = area.height.min(1);
        let main_h = area.height - status_h;
        let status = Rect::new(area.x, area.y + main_h, area.width, status_h);

        let left_w = if sidebar_open { SIDEBAR_W } else { STRIP_W };
        let left_w = left_w.min(area.width);
        let left = Rect::new(area.x, area.y, left_w, main_h);
        let right_x = area.x + left_w;
        let right_w = area.width - left_w;

        let header_h = HEADER_H.min(main_h);
        let header = Rect::new(right_x, area.y, right_w, header_h);
        let board = Rect::new(right_x, area.y + header_h, right_w, main_h - header_h);

        ScreenLayout {
            area,
            sidebar: sidebar_open.then_some(left),
            strip: (!sidebar_open).then_some(left),
            header,
            board,
            status,
        }
    }
}

/// A selectable row in the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarItem {
    Board(usize),
    CreateBoard,
    ThemeToggle,
    HideSidebar,
}

impl SidebarItem {
    /// Keyboard order of the sidebar rows
    pub fn all(board_count: usize) -> Vec<SidebarItem> {
        let mut items: Vec<SidebarItem> = (0..board_count).map(SidebarItem::Board).collect();
        items.extend([
            SidebarItem::CreateBoard,
            SidebarItem::ThemeToggle,
            SidebarItem::HideSidebar,
        ]);
        items
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SidebarLayout {
    /// The "ALL BOARDS (n)" row
    pub title: Option<Rect>,
    pub rows: Vec<(SidebarItem, Rect)>,
}

impl SidebarLayout {
    /// Board list from the top, theme toggle and hide row pinned to the bottom
    pub fn compute(sidebar: Rect, board_count: usize) -> Self {
        let inner_w = sidebar.width.saturating_sub(1); // right border
        let row = |y: u16| Rect::new(sidebar.x, y, inner_w, 1);
        let bottom = sidebar.y + sidebar.height;
        if sidebar.height < 4 {
            return SidebarLayout::default();
        }

        let hide_y = bottom - 2;
        let theme_y = bottom.saturating_sub(4).max(sidebar.y);
        let mut rows = Vec::new();
        let mut y = sidebar.y + 3;
        for i in 0..board_count {
            if y >= theme_y {
                break;
            }
            rows.push((SidebarItem::Board(i), row(y)));
            y += 1;
        }
        if y < theme_y {
            rows.push((SidebarItem::CreateBoard, row(y)));
        }
        rows.push((SidebarItem::ThemeToggle, row(theme_y)));
        rows.push((SidebarItem::HideSidebar, row(hide_y)));

        SidebarLayout {
            title: Some(row(sidebar.y + 1)),
            rows,
        }
    }

    pub fn rect_of(&self, item: SidebarItem) -> Option<Rect> {
        self.rows.iter().find(|(i, _)| *i == item).map(|(_, r)| *r)
    }

    pub fn hit_test(&self, x: u16, y: u16) -> Option<SidebarItem> {
        self.rows
            .iter()
            .find(|(_, r)| contains(*r, x, y))
            .map(|(item, _)| *item)
    }
}

/// Clickable parts of the header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeaderLayout {
    pub title: Rect,
    pub add_task: Rect,
    pub menu: Rect,
}

pub const ADD_TASK_LABEL: &str = " + Add New Task ";

impl HeaderLayout {
    pub fn compute(header: Rect) -> Self {
        let y = header.y + header.height.min(3) / 2;
        let menu_w = header.width.min(3);
        let menu = Rect::new(header.x + header.width - menu_w, y, menu_w, 1);
        let add_w = (ADD_TASK_LABEL.len() as u16).min(header.width - menu_w);
        let add_task = Rect::new(menu.x.saturating_sub(add_w + 1), y, add_w, 1);
        let title = Rect::new(header.x + 1, y, add_task.x.saturating_sub(header.x + 2), 1);
        HeaderLayout {
            title,
            add_task,
            menu,
        }
    }
}

/// Button labels under the empty-board and no-board prompts
pub const ADD_COLUMN_LABEL: &str = "+ Add New Column";
pub const CREATE_BOARD_LABEL: &str = "+ Create New Board";

/// Prompt text row, centered in the board area
pub fn prompt_row(area: Rect) -> Rect {
    let y = area.y + area.height.saturating_sub(1) / 2;
    Rect::new(area.x, y.saturating_sub(1), area.width, area.height.min(1))
}

/// The button under a prompt, two rows below its text
pub fn prompt_button(area: Rect, label: &str) -> Rect {
    let row = prompt_row(area);
    let width = (label.len() as u16 + 4).min(area.width);
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = (row.y + 2).min((area.y + area.height).saturating_sub(1));
    Rect::new(x, y, width, area.height.min(1))
}

/// How far the board area is scrolled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoardScroll {
    /// First visible column
    pub column: usize,
    /// Content rows scrolled off the top of every lane
    pub row: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardLayout {
    pub task_id: TaskId,
    /// In lane content rows
    pub span: CardSpan,
    pub title_lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaneLayout {
    /// Index of the column on the board
    pub column: usize,
    pub name: String,
    /// Drawn lane (without the trailing gap)
    pub rect: Rect,
    pub header: Rect,
    /// Screen row of content row 0 when unscrolled
    pub content_top: u16,
    pub content_height: u16,
    pub cards: Vec<CardLayout>,
    pub spans: Vec<CardSpan>,
}

impl LaneLayout {
    /// Screen rect of card `index`, clipped to the lane. None when it is
    /// scrolled fully out of view or starts above the visible content.
    pub fn card_rect(&self, index: usize, scroll_row: u16) -> Option<Rect> {
        let span = self.cards.get(index)?.span;
        if span.top < scroll_row {
            return None;
        }
        let top = self.content_top + (span.top - scroll_row);
        let bottom_limit = self.content_top + self.content_height;
        if top >= bottom_limit {
            return None;
        }
        let height = span.height.min(bottom_limit - top);
        Some(Rect::new(self.rect.x, top, self.rect.width, height))
    }

    /// Card under a screen row
    pub fn card_at(&self, y: u16, scroll_row: u16) -> Option<usize> {
        if y < self.content_top || y >= self.content_top + self.content_height {
            return None;
        }
        let row = y - self.content_top + scroll_row;
        let index = self.cards.iter().position(|c| c.span.contains_row(row))?;
        self.card_rect(index, scroll_row).map(|_| index)
    }

    /// Columns accept drops across their full width including the gap
    pub fn accepts_x(&self, x: u16) -> bool {
        x >= self.rect.x && x < self.rect.x + self.rect.width + LANE_GAP
    }

    pub fn drop_zone(&self, scroll_row: u16) -> DropZone<'_> {
        DropZone {
            column: &self.name,
            cards: &self.spans,
            top: self.content_top,
            scroll: scroll_row,
        }
    }
}

/// What sits under a point in the board area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardHit {
    Card { column: usize, task: usize },
    Lane { column: usize },
    NewColumn,
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoardLayout {
    pub area: Rect,
    pub scroll: BoardScroll,
    pub lanes: Vec<LaneLayout>,
    /// The trailing "+ New Column" lane, when it fits
    pub new_column: Option<Rect>,
    /// Tallest lane content, in rows
    pub content_rows: u16,
}

/// Rows a card needs: borders, clamped title, subtask summary
pub fn card_height(task: &Task) -> (u16, Vec<String>) {
    let lines = wrap::wrap_clamped(&task.title, CARD_TEXT_W, MAX_TITLE_LINES);
    let summary = u16::from(!task.subtasks.is_empty());
    (2 + lines.len() as u16 + summary, lines)
}

impl BoardLayout {
    /// How many lanes fit side by side
    pub fn visible_lanes(width: u16) -> usize {
        (width.saturating_sub(1) / LANE_W).max(1) as usize
    }

    pub fn compute(board: &Board, area: Rect, scroll: BoardScroll) -> Self {
        let visible = Self::visible_lanes(area.width);
        let first = scroll.column.min(board.columns.len().saturating_sub(1));
        let content_top = area.y + LANE_HEADER_H.min(area.height);
        let content_height = area.height.saturating_sub(LANE_HEADER_H);

        let mut lanes = Vec::new();
        let mut content_rows = 0u16;
        let mut slot = 0u16;
        for (ci, column) in board.columns.iter().enumerate().skip(first).take(visible) {
            let x = area.x + 1 + slot * LANE_W;
            let width = (LANE_W - LANE_GAP).min((area.x + area.width).saturating_sub(x));
            let rect = Rect::new(x, area.y, width, area.height);

            let mut top = 0u16;
            let cards: Vec<CardLayout> = column
                .tasks
                .iter()
                .map(|task| {
                    let (height, title_lines) = card_height(task);
                    let span = CardSpan::new(top, height);
                    top = top.saturating_add(height);
                    CardLayout {
                        task_id: task.id,
                        span,
                        title_lines,
                    }
                })
                .collect();
            content_rows = content_rows.max(top);

            lanes.push(LaneLayout {
                column: ci,
                name: column.name.clone(),
                rect,
                header: Rect::new(x, area.y, width, area.height.min(1)),
                content_top,
                content_height,
                spans: cards.iter().map(|c| c.span).collect(),
                cards,
            });
            slot += 1;
        }

        let shown_all = first + lanes.len() >= board.columns.len();
        let new_x = area.x + 1 + slot * LANE_W;
        let new_column = (shown_all
            && !board.columns.is_empty()
            && new_x + LANE_W - LANE_GAP <= area.x + area.width)
            .then(|| Rect::new(new_x, content_top, LANE_W - LANE_GAP, content_height));

        BoardLayout {
            area,
            scroll: BoardScroll {
                column: first,
                row: scroll.row,
            },
            lanes,
            new_column,
            content_rows,
        }
    }

    pub fn lane(&self, column: usize) -> Option<&LaneLayout> {
        self.lanes.iter().find(|l| l.column == column)
    }

    /// Lane accepting a drop at this point
    pub fn lane_at(&self, x: u16, y: u16) -> Option<&LaneLayout> {
        if !contains(self.area, x, y) {
            return None;
        }
        self.lanes.iter().find(|l| l.accepts_x(x))
    }

    pub fn drop_zone_at(&self, x: u16, y: u16) -> Option<DropZone<'_>> {
        self.lane_at(x, y).map(|l| l.drop_zone(self.scroll.row))
    }

    pub fn hit_test(&self, x: u16, y: u16) -> BoardHit {
        if !contains(self.area, x, y) {
            return BoardHit::Empty;
        }
        if let Some(r) = self.new_column
            && contains(r, x, y)
        {
            return BoardHit::NewColumn;
        }
        for lane in &self.lanes {
            if !contains(lane.rect, x, y) {
                continue;
            }
            if let Some(task) = lane.card_at(y, self.scroll.row) {
                return BoardHit::Card {
                    column: lane.column,
                    task,
                };
            }
            return BoardHit::Lane {
                column: lane.column,
            };
        }
        BoardHit::Empty
    }

    /// Largest useful vertical scroll
    pub fn max_scroll_row(&self) -> u16 {
        let visible = self.lanes.first().map_or(0, |l| l.content_height);
        self.content_rows.saturating_sub(visible)
    }
}
