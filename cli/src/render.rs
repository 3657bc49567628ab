use std::fmt::Write;

use sapper_core::{CellView, Session, SessionState};

const CLOSED: char = '#';
const MARKED: char = '?';
const MINE: char = '*';
const EMPTY: char = '.';

pub const MSG_WON: &str = "Hooray, you won!";
pub const MSG_LOST: &str = "Oops, a mistake... Try again";
pub const MSG_CANCELLED: &str = "Game stopped on request";

fn symbol(view: CellView) -> char {
    match view {
        CellView::Closed => CLOSED,
        CellView::Marked => MARKED,
        CellView::Mine => MINE,
        CellView::Open(0) => EMPTY,
        CellView::Open(count) => char::from_digit(count.into(), 10).unwrap_or('+'),
    }
}

/// Text grid with column numbers on top and row numbers on the left.
pub fn board(session: &Session) -> String {
    let board = session.board();
    let show_all = session.show_all_values();
    let (width, height) = board.size();

    let mut out = String::from("   ");
    for x in 0..width {
        let _ = write!(out, "{}", x % 10);
    }
    out.push('\n');

    for y in 0..height {
        let _ = write!(out, "{y:>2} ");
        for x in 0..width {
            out.push(symbol(board[(x, y)].view(show_all)));
        }
        out.push('\n');
    }
    out
}

pub fn controls(session: &Session) -> String {
    let controls = session.controls();
    format!("time {}  marked {}", controls.clock(), controls.tally())
}

pub const fn message(state: SessionState) -> Option<&'static str> {
    match state {
        SessionState::Playing => None,
        SessionState::Won => Some(MSG_WON),
        SessionState::Lost => Some(MSG_LOST),
        SessionState::Cancelled => Some(MSG_CANCELLED),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sapper_core::Board;

    fn session(size: (u8, u8), mines: &[(u8, u8)]) -> Session {
        Session::from_board(Board::with_mines(size, mines).unwrap(), 0)
    }

    #[test]
    fn fresh_board_is_all_closed() {
        let rendered = board(&session((3, 2), &[(0, 0)]));
        assert_eq!(rendered, "   012\n 0 ###\n 1 ###\n");
    }

    #[test]
    fn opened_and_marked_cells() {
        let mut session = session((3, 2), &[(0, 0)]);
        session.open((2, 1)).unwrap();
        session.mark((0, 0)).unwrap();

        assert_eq!(board(&session), "   012\n 0 ?1.\n 1 #1.\n");
    }

    #[test]
    fn loss_shows_every_value() {
        let mut session = session((3, 1), &[(0, 0)]);
        session.open((2, 0)).unwrap();
        session.open((0, 0)).unwrap();

        assert_eq!(board(&session), "   012\n 0 *1.\n");
        assert_eq!(message(session.state()), Some(MSG_LOST));
    }

    #[test]
    fn controls_line() {
        let mut session = session((3, 1), &[(0, 0)]);
        session.mark((0, 0)).unwrap();
        assert_eq!(controls(&session), "time 00:00:00  marked 1 / 1");
    }
}
