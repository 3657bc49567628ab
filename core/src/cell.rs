use serde::{Deserialize, Serialize};

/// What a cell holds once the board has been initialized.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellValue {
    Mine,
    Count(u8),
}

/// A single board cell. The value stays unset until mines are placed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    value: Option<CellValue>,
    opened: bool,
    marked: bool,
}

impl Cell {
    pub const fn value(&self) -> Option<CellValue> {
        self.value
    }

    pub const fn has_mine(&self) -> bool {
        matches!(self.value, Some(CellValue::Mine))
    }

    /// Number of adjacent mines, `None` for mines and unset cells.
    pub const fn adjacent_count(&self) -> Option<u8> {
        match self.value {
            Some(CellValue::Count(count)) => Some(count),
            _ => None,
        }
    }

    pub const fn is_opened(&self) -> bool {
        self.opened
    }

    pub const fn is_marked(&self) -> bool {
        self.marked
    }

    /// How the presentation layer should draw this cell. With `show_all` closed
    /// cells expose their value, which is what the board looks like after a
    /// loss or a cancelled round.
    pub const fn view(&self, show_all: bool) -> CellView {
        if self.marked {
            return CellView::Marked;
        }
        if !self.opened && !show_all {
            return CellView::Closed;
        }
        match self.value {
            Some(CellValue::Mine) => CellView::Mine,
            Some(CellValue::Count(count)) => CellView::Open(count),
            None => CellView::Closed,
        }
    }

    pub(crate) fn set_value(&mut self, value: CellValue) {
        self.value = Some(value);
    }

    pub(crate) fn open(&mut self) {
        self.opened = true;
    }

    pub(crate) fn mark(&mut self) {
        self.marked = true;
    }

    pub(crate) fn unmark(&mut self) {
        self.marked = false;
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Closed,
    Marked,
    Open(u8),
    Mine,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_cell_is_unset_and_closed() {
        let cell = Cell::default();
        assert_eq!(cell.value(), None);
        assert!(!cell.is_opened());
        assert!(!cell.is_marked());
        assert_eq!(cell.view(true), CellView::Closed);
    }

    #[test]
    fn view_hides_values_until_opened() {
        let mut cell = Cell::default();
        cell.set_value(CellValue::Count(3));
        assert_eq!(cell.view(false), CellView::Closed);
        assert_eq!(cell.view(true), CellView::Open(3));

        cell.open();
        assert_eq!(cell.view(false), CellView::Open(3));
    }

    #[test]
    fn marked_view_wins_over_show_all() {
        let mut cell = Cell::default();
        cell.set_value(CellValue::Mine);
        cell.mark();
        assert_eq!(cell.view(true), CellView::Marked);
        cell.unmark();
        assert_eq!(cell.view(true), CellView::Mine);
    }

    #[test]
    fn clear_resets_everything() {
        let mut cell = Cell::default();
        cell.set_value(CellValue::Mine);
        cell.open();
        cell.clear();
        assert_eq!(cell, Cell::default());
    }
}
