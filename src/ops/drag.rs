//! Drag-and-drop: pointer geometry to insertion index, and the press →
//! drag → release gesture that turns a drop into a single `MoveTask`.
//!
//! Everything here works on terminal cell coordinates and plain card
//! geometry, so it is independent of the renderer.

use crate::model::TaskId;

use super::intent::Intent;

/// Vertical extent of one rendered task card, in terminal rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardSpan {
    pub top: u16,
    pub height: u16,
}

impl CardSpan {
    pub fn new(top: u16, height: u16) -> Self {
        CardSpan { top, height }
    }

    pub fn bottom(&self) -> u16 {
        self.top.saturating_add(self.height)
    }

    pub fn contains_row(&self, y: u16) -> bool {
        y >= self.top && y < self.bottom()
    }
}

/// Insertion index for a pointer at row `pointer_y` over a column whose
/// cards are `cards` (in display order).
///
/// The slot is just before the first card whose vertical midpoint lies
/// below the pointer, or the end of the list when there is none.
pub fn drop_index(pointer_y: u16, cards: &[CardSpan]) -> usize {
    // midpoint = top + height / 2, compared in half-rows to stay exact
    let pointer = u32::from(pointer_y) * 2;
    cards
        .iter()
        .position(|c| pointer < u32::from(c.top) * 2 + u32::from(c.height))
        .unwrap_or(cards.len())
}

/// Where the "drop here" line goes for an insertion index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropIndicator {
    /// Above the card at this index
    Before(usize),
    /// Below the card at this index (the last one)
    After(usize),
    /// The column has no cards
    Empty,
}

pub fn drop_indicator(index: usize, card_count: usize) -> DropIndicator {
    if card_count == 0 {
        DropIndicator::Empty
    } else if index < card_count {
        DropIndicator::Before(index)
    } else {
        DropIndicator::After(card_count - 1)
    }
}

/// The column under the pointer, as the layout reports it.
///
/// Card spans are in lane content rows: row 0 is the first row below the
/// lane header before any scrolling. `top` is the screen row where the
/// content starts and `scroll` how many content rows are scrolled away.
#[derive(Debug, Clone, Copy)]
pub struct DropZone<'a> {
    pub column: &'a str,
    pub cards: &'a [CardSpan],
    pub top: u16,
    pub scroll: u16,
}

impl DropZone<'_> {
    /// Screen row to content row
    pub fn content_row(&self, y: u16) -> u16 {
        y.saturating_sub(self.top).saturating_add(self.scroll)
    }
}

/// The task being dragged and where it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSource {
    pub task_id: TaskId,
    pub column: String,
    pub index: usize,
}

/// Resolved drop position while hovering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropTarget {
    pub column: String,
    pub index: usize,
}

impl DropTarget {
    fn resolve(zone: DropZone<'_>, pointer_y: u16) -> Self {
        DropTarget {
            column: zone.column.to_string(),
            index: drop_index(zone.content_row(pointer_y), zone.cards),
        }
    }
}

/// Result of releasing the mouse button
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragOutcome {
    /// Dropped somewhere that moves the task
    Committed(Intent),
    /// Dropped outside every column, or back onto its own slot
    Cancelled,
    /// Released without dragging: a plain click on the card
    Clicked(TaskId),
    /// No gesture was in progress
    Ignored,
}

/// Pointer gesture state. At most one gesture exists at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragGesture {
    #[default]
    Idle,
    Pressed {
        source: DragSource,
        origin: (u16, u16),
    },
    Dragging {
        source: DragSource,
        pointer: (u16, u16),
        hover: Option<DropTarget>,
    },
}

impl DragGesture {
    /// Mouse down on a card
    pub fn press(&mut self, source: DragSource, at: (u16, u16)) {
        *self = DragGesture::Pressed { source, origin: at };
    }

    /// Pointer moved with the button held. Returns true when the hover
    /// feedback changed and should be redrawn.
    pub fn motion(&mut self, at: (u16, u16), zone: Option<DropZone<'_>>, threshold: u16) -> bool {
        match self {
            DragGesture::Idle => false,
            DragGesture::Pressed { source, origin } => {
                let dx = at.0.abs_diff(origin.0);
                let dy = at.1.abs_diff(origin.1);
                if dx.max(dy) < threshold {
                    return false;
                }
                let source = source.clone();
                *self = DragGesture::Dragging {
                    source,
                    pointer: at,
                    hover: zone.map(|z| DropTarget::resolve(z, at.1)),
                };
                true
            }
            DragGesture::Dragging { pointer, hover, .. } => {
                let next = zone.map(|z| DropTarget::resolve(z, at.1));
                let changed = *hover != next || *pointer != at;
                *pointer = at;
                *hover = next;
                changed
            }
        }
    }

    /// Mouse up. Always ends the gesture.
    pub fn release(&mut self, at: (u16, u16), zone: Option<DropZone<'_>>) -> DragOutcome {
        match std::mem::take(self) {
            DragGesture::Idle => DragOutcome::Ignored,
            DragGesture::Pressed { source, .. } => DragOutcome::Clicked(source.task_id),
            DragGesture::Dragging { source, .. } => {
                let Some(target) = zone.map(|z| DropTarget::resolve(z, at.1)) else {
                    return DragOutcome::Cancelled;
                };
                let same_slot = target.column == source.column
                    && (target.index == source.index || target.index == source.index + 1);
                if same_slot {
                    return DragOutcome::Cancelled;
                }
                DragOutcome::Committed(Intent::MoveTask {
                    task_id: source.task_id,
                    source: source.column,
                    target: target.column,
                    index: target.index,
                })
            }
        }
    }

    /// Abort without touching board state
    pub fn cancel(&mut self) {
        *self = DragGesture::Idle;
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, DragGesture::Dragging { .. })
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, DragGesture::Idle)
    }

    pub fn source(&self) -> Option<&DragSource> {
        match self {
            DragGesture::Idle => None,
            DragGesture::Pressed { source, .. } | DragGesture::Dragging { source, .. } => {
                Some(source)
            }
        }
    }

    pub fn hover(&self) -> Option<&DropTarget> {
        match self {
            DragGesture::Dragging { hover, .. } => hover.as_ref(),
            _ => None,
        }
    }

    pub fn pointer(&self) -> Option<(u16, u16)> {
        match self {
            DragGesture::Dragging { pointer, .. } => Some(*pointer),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Three cards of height 4 starting at row 3, one blank row apart
    fn cards() -> Vec<CardSpan> {
        vec![CardSpan::new(3, 4), CardSpan::new(8, 4), CardSpan::new(13, 4)]
    }

    #[test]
    fn drop_index_uses_midpoints() {
        let cards = cards();
        // midpoints at rows 5, 10, 15
        assert_eq!(drop_index(0, &cards), 0);
        assert_eq!(drop_index(4, &cards), 0);
        assert_eq!(drop_index(5, &cards), 1);
        assert_eq!(drop_index(9, &cards), 1);
        assert_eq!(drop_index(10, &cards), 2);
        assert_eq!(drop_index(15, &cards), 3);
        assert_eq!(drop_index(40, &cards), 3);
    }

    #[test]
    fn drop_index_odd_heights_are_exact() {
        // height 3 at top 2: midpoint 3.5
        let cards = [CardSpan::new(2, 3)];
        assert_eq!(drop_index(3, &cards), 0);
        assert_eq!(drop_index(4, &cards), 1);
    }

    #[test]
    fn drop_index_empty_column_is_zero() {
        assert_eq!(drop_index(7, &[]), 0);
    }

    #[test]
    fn indicator_positions() {
        assert_eq!(drop_indicator(0, 0), DropIndicator::Empty);
        assert_eq!(drop_indicator(1, 3), DropIndicator::Before(1));
        assert_eq!(drop_indicator(3, 3), DropIndicator::After(2));
    }

    fn source(column: &str, index: usize) -> DragSource {
        DragSource {
            task_id: TaskId::new(),
            column: column.into(),
            index,
        }
    }

    #[test]
    fn press_and_release_is_a_click() {
        let mut gesture = DragGesture::default();
        let src = source("Todo", 0);
        let id = src.task_id;
        gesture.press(src, (10, 4));
        assert!(!gesture.motion((10, 4), None, 1));
        assert_eq!(gesture.release((10, 4), None), DragOutcome::Clicked(id));
        assert!(gesture.is_idle());
    }

    #[test]
    fn drag_past_threshold_then_drop_commits_once() {
        let cards = cards();
        let zone = DropZone {
            column: "Doing",
            cards: &cards,
            top: 0,
            scroll: 0,
        };
        let mut gesture = DragGesture::default();
        let src = source("Todo", 1);
        let id = src.task_id;
        gesture.press(src, (5, 9));

        assert!(gesture.motion((30, 9), Some(zone), 1));
        assert!(gesture.is_dragging());
        assert_eq!(gesture.hover().map(|h| h.index), Some(1));
        // hovering repeatedly never commits anything
        gesture.motion((30, 4), Some(zone), 1);
        gesture.motion((31, 4), Some(zone), 1);
        assert_eq!(gesture.hover().map(|h| h.index), Some(0));

        let outcome = gesture.release((31, 4), Some(zone));
        assert_eq!(
            outcome,
            DragOutcome::Committed(Intent::MoveTask {
                task_id: id,
                source: "Todo".into(),
                target: "Doing".into(),
                index: 0,
            })
        );
        assert_eq!(gesture.release((31, 4), Some(zone)), DragOutcome::Ignored);
    }

    #[test]
    fn threshold_holds_back_small_motion() {
        let mut gesture = DragGesture::default();
        gesture.press(source("Todo", 0), (10, 10));
        assert!(!gesture.motion((11, 11), None, 2));
        assert!(!gesture.is_dragging());
        assert!(gesture.motion((12, 10), None, 2));
        assert!(gesture.is_dragging());
    }

    #[test]
    fn drop_outside_columns_cancels() {
        let mut gesture = DragGesture::default();
        gesture.press(source("Todo", 0), (1, 1));
        gesture.motion((5, 5), None, 1);
        assert_eq!(gesture.release((5, 5), None), DragOutcome::Cancelled);
        assert!(gesture.is_idle());
    }

    #[test]
    fn drop_on_own_slot_cancels() {
        let cards = cards();
        let zone = DropZone {
            column: "Todo",
            cards: &cards,
            top: 0,
            scroll: 0,
        };
        for y in [5, 9] {
            // pointer over card 1's area resolves to slot 1 or 2
            let mut gesture = DragGesture::default();
            gesture.press(source("Todo", 1), (2, 9));
            gesture.motion((2, y), Some(zone), 0);
            assert_eq!(gesture.release((2, y), Some(zone)), DragOutcome::Cancelled);
        }
    }

    #[test]
    fn zone_maps_screen_rows_through_scroll() {
        let cards = cards();
        let zone = DropZone {
            column: "Todo",
            cards: &cards,
            top: 10,
            scroll: 6,
        };
        // screen row 10 is content row 6, past card 0's midpoint
        assert_eq!(zone.content_row(10), 6);
        assert_eq!(zone.content_row(2), 6);
        assert_eq!(DropTarget::resolve(zone, 10).index, 1);
    }

    #[test]
    fn cancel_resets() {
        let mut gesture = DragGesture::default();
        gesture.press(source("Todo", 0), (1, 1));
        gesture.motion((9, 9), None, 1);
        gesture.cancel();
        assert!(gesture.is_idle());
        assert!(gesture.source().is_none());
    }
}
