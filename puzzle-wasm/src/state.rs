use std::cell::{Cell, RefCell};
use std::rc::Rc;

use puzzle_core::{PuzzleConfig, PuzzleController};
use web_sys::{Document, HtmlElement};

type SolvedHook = Rc<dyn Fn()>;

/// The controller plus the solved hooks of the page. Cloning shares the
/// same puzzle.
///
/// The core fires its solved listeners while the controller is still
/// mutably borrowed, so the listener here only raises a flag; hooks run
/// from [`Game::flush_solved`] once the borrow has ended and are free to
/// call back into the puzzle.
#[derive(Clone)]
pub struct Game {
    controller: Rc<RefCell<PuzzleController>>,
    solved_pending: Rc<Cell<bool>>,
    solved_hooks: Rc<RefCell<Vec<SolvedHook>>>,
}

impl Game {
    pub fn new(config: PuzzleConfig) -> Self {
        let mut controller = PuzzleController::new(config);
        let solved_pending = Rc::new(Cell::new(false));
        let flag = solved_pending.clone();
        controller.on_solved(move || flag.set(true));
        Self {
            controller: Rc::new(RefCell::new(controller)),
            solved_pending,
            solved_hooks: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn read<R>(&self, f: impl FnOnce(&PuzzleController) -> R) -> R {
        f(&self.controller.borrow())
    }

    /// Mutates the puzzle without running solved hooks.
    pub fn apply<R>(&self, f: impl FnOnce(&mut PuzzleController) -> R) -> R {
        f(&mut self.controller.borrow_mut())
    }

    /// Mutates the puzzle, then runs solved hooks if the edge was crossed.
    pub fn run<R>(&self, f: impl FnOnce(&mut PuzzleController) -> R) -> R {
        let out = self.apply(f);
        self.flush_solved();
        out
    }

    pub fn on_solved(&self, hook: impl Fn() + 'static) {
        self.solved_hooks.borrow_mut().push(Rc::new(hook));
    }

    pub fn flush_solved(&self) {
        if !self.solved_pending.replace(false) {
            return;
        }
        // Hooks may register further hooks.
        let hooks: Vec<SolvedHook> = self.solved_hooks.borrow().clone();
        for hook in hooks {
            hook();
        }
    }
}

/// Page state for the DOM front end.
pub struct State {
    pub document: Document,
    pub config: PuzzleConfig,
    pub game: Game,
    pub board: HtmlElement,
    pub tray: HtmlElement,
}

thread_local! {
    pub static STATE: RefCell<Option<Rc<State>>> = const { RefCell::new(None) };
}
