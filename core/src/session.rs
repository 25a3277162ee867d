use crate::*;

/// Whoever owns the session lifecycle; told once when a game ends so it can offer a replay.
pub trait SessionHost {
    fn game_over(&mut self, result: GameResult);
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Dispatch {
    pub updated: bool,
    pub ended: Option<GameResult>,
}

/// One player's game: the board, plus what is needed to deal a fresh one.
#[derive(Clone, Debug)]
pub struct Session<G = RandomLayoutGenerator> {
    config: GameConfig,
    generator: G,
    board: Board,
    move_count: u32,
}

impl Session {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self::with_generator(config, RandomLayoutGenerator::new(seed))
    }
}

impl<G: LayoutGenerator> Session<G> {
    pub fn with_generator(config: GameConfig, mut generator: G) -> Self {
        let board = generator.generate(config);
        Self {
            config,
            generator,
            board,
            move_count: 0,
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Moves that changed the board since the last reset.
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Applies one input and draws every cell it changed.
    pub fn dispatch(&mut self, input: Input, renderer: &mut impl Renderer) -> Dispatch {
        let updated = match input {
            Input::Reveal(coords) => match self.board.reveal(coords) {
                Ok(outcome) => outcome.has_update(),
                Err(err) => {
                    log::debug!("reveal {coords:?} ignored: {err}");
                    false
                }
            },
            Input::ToggleFlag(coords) => match self.board.toggle_flag(coords) {
                Ok(outcome) => outcome.has_update(),
                Err(err) => {
                    log::debug!("flag {coords:?} ignored: {err}");
                    false
                }
            },
            Input::Reset => {
                self.reset();
                self.redraw(renderer);
                return Dispatch {
                    updated: true,
                    ended: None,
                };
            }
        };

        if !updated {
            return Dispatch {
                updated,
                ended: None,
            };
        }

        self.move_count = self.move_count.saturating_add(1);
        let ended = self.board.is_finished().then(|| self.board.result());
        match ended {
            // winning changes how the untouched mines look, so repaint everything
            Some(GameResult::Won) => self.redraw(renderer),
            _ => self.flush(renderer),
        }
        if let Some(result) = ended {
            log::debug!("game over after {} moves: {result:?}", self.move_count);
        }

        Dispatch { updated, ended }
    }

    /// Like [`Session::dispatch`], and notifies `host` when the input ended the game.
    pub fn dispatch_to(
        &mut self,
        input: Input,
        renderer: &mut impl Renderer,
        host: &mut impl SessionHost,
    ) -> Dispatch {
        let dispatch = self.dispatch(input, renderer);
        if let Some(result) = dispatch.ended {
            host.game_over(result);
        }
        dispatch
    }

    pub fn reset(&mut self) {
        self.board = self.generator.generate(self.config);
        self.move_count = 0;
        log::debug!("new game, {} mines", self.board.mine_count());
    }

    /// Draws the whole board, dropping any pending changes.
    pub fn redraw(&mut self, renderer: &mut impl Renderer) {
        self.board.take_changes();
        let result = self.board.result();
        for (coords, cell) in self.board.iter_cells() {
            renderer.draw_cell(coords, Glyph::for_cell(cell, result));
        }
    }

    fn flush(&mut self, renderer: &mut impl Renderer) {
        let result = self.board.result();
        for coords in self.board.take_changes() {
            renderer.draw_cell(coords, Glyph::for_cell(self.board[coords], result));
        }
    }
}
