use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::RefCell;
use core::fmt;
use core::time::Duration;
use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Playing,
    Won,
    Lost,
    Cancelled,
}

impl SessionState {
    pub const fn is_finished(self) -> bool {
        !matches!(self, Self::Playing)
    }
}

/// Presentation hooks, called while the session is being updated.
pub trait SessionObserver {
    fn cells_opened(&mut self, _board: &Board, _cells: &[Coord2]) {}
    fn mark_changed(&mut self, _coords: Coord2, _marked: bool) {}
    fn round_started(&mut self) {}
    fn round_ended(&mut self, _state: SessionState) {}
}

/// Player input, as produced by the input layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Input {
    Open(Coord2),
    Mark(Coord2),
    Restart,
    Cancel,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Response {
    Opened(RevealResult),
    Marked(bool),
    Restarted,
    Cancelled,
}

/// Read-only snapshot for the periodic time/marks display.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Controls {
    pub elapsed: Duration,
    pub marked: CellCount,
    pub mines: CellCount,
}

impl Controls {
    pub fn clock(&self) -> Clock {
        Clock(self.elapsed)
    }

    pub fn tally(&self) -> Tally {
        Tally {
            marked: self.marked,
            mines: self.mines,
        }
    }
}

/// Displays as `HH:MM:SS`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Clock(pub Duration);

impl fmt::Display for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.0.as_secs();
        write!(
            f,
            "{:02}:{:02}:{:02}",
            secs / 3600,
            secs % 3600 / 60,
            secs % 60
        )
    }
}

/// Displays as `marked / mines`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Tally {
    pub marked: CellCount,
    pub mines: CellCount,
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.marked, self.mines)
    }
}

/// One player's game: a board, the round lifecycle and its timer.
pub struct Session {
    board: Board,
    state: SessionState,
    started_at: Instant,
    ended_after: Option<Duration>,
    seeds: rand::rngs::SmallRng,
    observer: Option<Box<dyn SessionObserver>>,
}

impl Session {
    pub fn new(config: BoardConfig, seed: u64) -> Result<Self> {
        use rand::prelude::*;

        let mut seeds = SmallRng::seed_from_u64(seed);
        let board = Board::new(config, seeds.random())?;
        Ok(Self::with_board(board, seeds))
    }

    /// Starts a round on a prepared board.
    pub fn from_board(board: Board, seed: u64) -> Self {
        use rand::prelude::*;

        Self::with_board(board, SmallRng::seed_from_u64(seed))
    }

    fn with_board(board: Board, seeds: rand::rngs::SmallRng) -> Self {
        log::debug!("Round started on {:?} board", board.size());
        Self {
            board,
            state: SessionState::Playing,
            started_at: Instant::now(),
            ended_after: None,
            seeds,
            observer: None,
        }
    }

    pub fn set_observer(&mut self, observer: impl SessionObserver + 'static) {
        self.observer = Some(Box::new(observer));
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// Whether closed cells should be drawn with their values.
    pub fn show_all_values(&self) -> bool {
        self.board.is_initialized()
            && matches!(self.state, SessionState::Lost | SessionState::Cancelled)
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed_at(Instant::now())
    }

    pub fn elapsed_at(&self, now: Instant) -> Duration {
        self.ended_after
            .unwrap_or_else(|| now.saturating_duration_since(self.started_at))
    }

    pub fn controls(&self) -> Controls {
        self.controls_at(Instant::now())
    }

    pub fn controls_at(&self, now: Instant) -> Controls {
        Controls {
            elapsed: self.elapsed_at(now),
            marked: self.board.marked_count(),
            mines: self.board.mine_count(),
        }
    }

    pub fn handle(&mut self, input: Input) -> Result<Response> {
        match input {
            Input::Open(coords) => self.open(coords).map(Response::Opened),
            Input::Mark(coords) => self.mark(coords).map(Response::Marked),
            Input::Restart => {
                self.restart();
                Ok(Response::Restarted)
            }
            Input::Cancel => self.cancel().map(|()| Response::Cancelled),
        }
    }

    /// Left click: open a cell and settle the round if it ended.
    pub fn open(&mut self, coords: Coord2) -> Result<RevealResult> {
        self.check_playing()?;
        let result = self.board.reveal(coords)?;
        if let Some(observer) = self.observer.as_mut() {
            observer.cells_opened(&self.board, &result.opened);
        }
        self.settle();
        Ok(result)
    }

    /// Right click: toggle the mark on a closed cell.
    pub fn mark(&mut self, coords: Coord2) -> Result<bool> {
        self.check_playing()?;
        let marked = self.board.toggle_mark(coords)?;
        if let Some(observer) = self.observer.as_mut() {
            observer.mark_changed(coords, marked);
        }
        self.settle();
        Ok(marked)
    }

    /// Clears the board and starts a new round with a fresh layout.
    pub fn restart(&mut self) {
        use rand::prelude::*;

        self.board.clear();
        self.board.reseed(self.seeds.random());
        self.state = SessionState::Playing;
        self.started_at = Instant::now();
        self.ended_after = None;
        log::debug!("Round restarted");
        if let Some(observer) = self.observer.as_mut() {
            observer.round_started();
        }
    }

    pub fn cancel(&mut self) -> Result<()> {
        self.check_playing()?;
        self.end(SessionState::Cancelled);
        Ok(())
    }

    fn settle(&mut self) {
        match self.board.status() {
            GameStatus::InProgress => {}
            GameStatus::Won => self.end(SessionState::Won),
            GameStatus::Lost => self.end(SessionState::Lost),
        }
    }

    fn end(&mut self, state: SessionState) {
        let elapsed = self.elapsed();
        self.state = state;
        self.ended_after = Some(elapsed);
        log::debug!("Round ended: {:?} after {}", state, Clock(elapsed));
        if let Some(observer) = self.observer.as_mut() {
            observer.round_ended(state);
        }
    }

    fn check_playing(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}

/// Session handle shared between event callbacks. An input that arrives while
/// another one is still being handled is dropped, not queued.
#[derive(Clone)]
pub struct SharedSession(Rc<RefCell<Session>>);

impl SharedSession {
    pub fn new(session: Session) -> Self {
        Self(Rc::new(RefCell::new(session)))
    }

    /// Returns `None` when the input was ignored because an update is in
    /// progress.
    pub fn dispatch(&self, input: Input) -> Option<Result<Response>> {
        let Ok(mut session) = self.0.try_borrow_mut() else {
            log::debug!("Ignoring {:?}, update in progress", input);
            return None;
        };
        Some(session.handle(input))
    }

    /// Timer reads, skipped while an update is in progress.
    pub fn controls(&self) -> Option<Controls> {
        self.read(Session::controls)
    }

    pub fn read<R>(&self, f: impl FnOnce(&Session) -> R) -> Option<R> {
        self.0.try_borrow().ok().map(|session| f(&session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn session(size: Coord2, mines: &[Coord2]) -> Session {
        Session::from_board(Board::with_mines(size, mines).unwrap(), 0)
    }

    #[derive(Default)]
    struct Log(Rc<RefCell<Vec<&'static str>>>);

    impl SessionObserver for Log {
        fn cells_opened(&mut self, _board: &Board, _cells: &[Coord2]) {
            self.0.borrow_mut().push("opened");
        }

        fn mark_changed(&mut self, _coords: Coord2, _marked: bool) {
            self.0.borrow_mut().push("marked");
        }

        fn round_started(&mut self) {
            self.0.borrow_mut().push("started");
        }

        fn round_ended(&mut self, state: SessionState) {
            self.0.borrow_mut().push(match state {
                SessionState::Playing => "playing",
                SessionState::Won => "won",
                SessionState::Lost => "lost",
                SessionState::Cancelled => "cancelled",
            });
        }
    }

    #[test]
    fn win_by_opening_and_marking() {
        let mut session = session((3, 3), &[(2, 2)]);

        let result = session.open((0, 0)).unwrap();
        assert_eq!(result.opened.len(), 8);
        assert_eq!(session.state(), SessionState::Playing);

        assert!(session.mark((2, 2)).unwrap());
        assert_eq!(session.state(), SessionState::Won);
        assert!(!session.show_all_values());
    }

    #[test]
    fn opening_a_mine_ends_the_round() {
        let mut session = session((2, 2), &[(0, 0)]);

        let result = session.open((0, 0)).unwrap();

        assert!(result.triggered_mine);
        assert_eq!(session.state(), SessionState::Lost);
        assert!(session.show_all_values());
        assert_eq!(session.open((1, 1)), Err(GameError::AlreadyEnded));
        assert_eq!(session.mark((1, 1)), Err(GameError::AlreadyEnded));
    }

    #[test]
    fn cancel_blocks_input_until_restart() {
        let mut session = Session::new(BoardConfig::DEFAULT, 3).unwrap();
        assert!(!session.show_all_values());

        session.open((4, 4)).unwrap();
        session.cancel().unwrap();

        assert_eq!(session.state(), SessionState::Cancelled);
        assert!(session.show_all_values());
        assert_eq!(session.cancel(), Err(GameError::AlreadyEnded));

        session.restart();
        assert_eq!(session.state(), SessionState::Playing);
        assert!(!session.board().is_initialized());
        assert!(session.open((0, 0)).is_ok());
    }

    #[test]
    fn restart_draws_a_new_seed() {
        let mut session = Session::new(BoardConfig::WEB, 11).unwrap();
        let before = session.board().source().clone();

        session.restart();

        assert_ne!(session.board().source(), &before);
    }

    #[test]
    fn board_errors_leave_the_round_running() {
        let mut session = session((3, 1), &[(2, 0)]);
        session.open((0, 0)).unwrap();

        assert_eq!(session.open((0, 0)), Err(GameError::AlreadyOpened));
        assert_eq!(session.open((9, 9)), Err(GameError::InvalidCoordinate));
        assert_eq!(session.mark((1, 0)), Err(GameError::AlreadyOpened));
        assert_eq!(session.state(), SessionState::Playing);
    }

    #[test]
    fn timer_freezes_when_round_ends() {
        let mut session = session((2, 2), &[(0, 0)]);
        let later = Instant::now() + Duration::from_secs(3600);
        assert!(session.elapsed_at(later) >= Duration::from_secs(3600));

        session.open((0, 0)).unwrap();

        let frozen = session.elapsed();
        assert_eq!(session.elapsed_at(later), frozen);
    }

    #[test]
    fn controls_labels() {
        let controls = Controls {
            elapsed: Duration::from_secs(3725),
            marked: 3,
            mines: 10,
        };
        assert_eq!(alloc::format!("{}", controls.clock()), "01:02:05");
        assert_eq!(alloc::format!("{}", controls.tally()), "3 / 10");
        assert_eq!(alloc::format!("{}", Clock(Duration::from_millis(999))), "00:00:00");
    }

    #[test]
    fn observer_sees_lifecycle() {
        let log = Log::default();
        let events = log.0.clone();
        let mut session = session((2, 1), &[(0, 0)]);
        session.set_observer(log);

        session.open((1, 0)).unwrap();
        session.mark((0, 0)).unwrap();
        session.restart();

        assert_eq!(*events.borrow(), ["opened", "marked", "won", "started"]);
    }

    #[test]
    fn dispatch_routes_inputs() {
        let shared = SharedSession::new(session((3, 3), &[(2, 2)]));

        let opened = shared.dispatch(Input::Open((0, 0))).unwrap().unwrap();
        assert!(matches!(opened, Response::Opened(result) if result.opened.len() == 8));
        assert_eq!(
            shared.dispatch(Input::Mark((2, 2))),
            Some(Ok(Response::Marked(true)))
        );
        assert_eq!(shared.read(Session::state), Some(SessionState::Won));
        assert_eq!(shared.controls().map(|c| c.marked), Some(1));
    }

    struct Reentrant {
        shared: Rc<RefCell<Option<SharedSession>>>,
        ignored: Rc<RefCell<Vec<bool>>>,
    }

    impl SessionObserver for Reentrant {
        fn cells_opened(&mut self, _board: &Board, _cells: &[Coord2]) {
            if let Some(shared) = self.shared.borrow().as_ref() {
                let mut ignored = self.ignored.borrow_mut();
                ignored.push(shared.dispatch(Input::Mark((2, 2))).is_none());
                ignored.push(shared.controls().is_none());
            }
        }
    }

    #[test]
    fn reentrant_input_is_ignored() {
        let slot = Rc::new(RefCell::new(None));
        let ignored = Rc::new(RefCell::new(Vec::new()));
        let mut session = session((3, 3), &[(2, 2)]);
        session.set_observer(Reentrant {
            shared: slot.clone(),
            ignored: ignored.clone(),
        });
        let shared = SharedSession::new(session);
        slot.replace(Some(shared.clone()));

        assert!(matches!(shared.dispatch(Input::Open((0, 0))), Some(Ok(_))));

        assert_eq!(*ignored.borrow(), [true, true]);
        assert_eq!(shared.read(|s| s.board().marked_count()), Some(0));
        // break the Rc cycle
        slot.replace(None);
    }
}
