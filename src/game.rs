//! Turn loop for human and computer players.
//!
//! A game runs in three phases:
//! - **Opening**: Black removes one of their pieces from the center or a corner
//! - **Reply**: White removes one of their pieces next to the hole
//! - **Captures**: players alternate capture moves until the side to move has
//!   none, and the other side wins
//!
//! The game reads human moves from any `BufRead` and writes the board and
//! prompts to any `Write`, so it can be driven from stdin or from a test.
//!
//! ## Example
//!
//! ```ignore
//! use konane::board::Board;
//! use konane::game::{Agent, Game};
//! use konane::search::SearchLimits;
//!
//! let stdin = std::io::stdin();
//! let mut game = Game::new(
//!     Board::standard(),
//!     Agent::Human,
//!     Agent::Computer,
//!     SearchLimits::default(),
//!     stdin.lock(),
//!     std::io::stdout(),
//! );
//! let winner = game.play()?;
//! ```

use std::io::{BufRead, Write};

use crate::board::{Board, Color};
use crate::constants::OPENING_CELLS;
use crate::error::{KonaneError, Result};
use crate::movegen::actions;
use crate::position::{
    Move, State, apply_opening, apply_reply, parse_move, parse_removal, reply_candidates, result,
};
use crate::search::{Decision, SearchContext, SearchLimits, decide};

/// Who picks the moves for one color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Agent {
    Human,
    Computer,
}

/// A game in progress.
pub struct Game<R, W> {
    state: State,
    black: Agent,
    white: Agent,
    ctx: SearchContext,
    rng: fastrand::Rng,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Game<R, W> {
    pub fn new(
        board: Board,
        black: Agent,
        white: Agent,
        limits: SearchLimits,
        input: R,
        output: W,
    ) -> Self {
        Self {
            state: State::initial(board),
            black,
            white,
            ctx: SearchContext::new(limits),
            rng: fastrand::Rng::new(),
            input,
            output,
        }
    }

    /// Seed the generator behind the computer's opening and reply choices.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = fastrand::Rng::with_seed(seed);
        self
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// Consume the game, returning its output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    fn agent(&self, color: Color) -> Agent {
        match color {
            Color::Black => self.black,
            Color::White => self.white,
        }
    }

    /// Play the game to the end and return the winner.
    pub fn play(&mut self) -> Result<Color> {
        write!(self.output, "{}", self.state)?;

        self.state = match self.agent(self.state.player()) {
            Agent::Human => self.human_opening()?,
            Agent::Computer => self.computer_opening()?,
        };
        writeln!(self.output)?;
        write!(self.output, "{}", self.state)?;

        self.state = match self.agent(self.state.player()) {
            Agent::Human => self.human_reply()?,
            Agent::Computer => self.computer_reply()?,
        };

        loop {
            writeln!(self.output)?;
            write!(self.output, "{}", self.state)?;

            if actions(&self.state).is_empty() {
                let winner = self.state.player().opponent();
                writeln!(self.output, "\nNo moves left!...")?;
                writeln!(self.output, "\n{winner} wins!!!")?;
                log::info!("game over: {winner} wins");
                return Ok(winner);
            }

            self.state = match self.agent(self.state.player()) {
                Agent::Human => self.human_turn(parse_move, result)?,
                Agent::Computer => self.computer_move()?,
            };
        }
    }

    /// Prompt until a line is read; EOF ends the game.
    fn prompt(&mut self, message: &str) -> Result<String> {
        write!(self.output, "{message}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(KonaneError::InputClosed);
        }
        Ok(line)
    }

    /// Prompt until a line parses and the parsed move applies to the state.
    fn human_turn(
        &mut self,
        parse: fn(&str) -> Result<Move>,
        apply: fn(&State, &Move) -> Result<State>,
    ) -> Result<State> {
        loop {
            let line = self.prompt("Please enter a move: ")?;
            match parse(&line).and_then(|mv| Ok((mv, apply(&self.state, &mv)?))) {
                Ok((mv, next)) => {
                    writeln!(self.output, "Move chosen: {mv}")?;
                    return Ok(next);
                }
                Err(err) => writeln!(self.output, "{err}")?,
            }
        }
    }

    fn human_opening(&mut self) -> Result<State> {
        writeln!(
            self.output,
            "To begin game, please remove one piece from the board."
        )?;
        writeln!(
            self.output,
            "Valid moves are from the 4 center squares, or one of the corners."
        )?;
        writeln!(self.output, "Piece removed must be a piece of your color!")?;
        self.human_turn(parse_removal, apply_opening)
    }

    fn human_reply(&mut self) -> Result<State> {
        writeln!(
            self.output,
            "Please remove a piece of your color adjacent to the piece removed"
        )?;
        self.human_turn(parse_removal, apply_reply)
    }

    fn computer_opening(&mut self) -> Result<State> {
        let player = self.state.player();
        let board = *self.state.board();
        let candidates: Vec<_> = OPENING_CELLS
            .into_iter()
            .filter(|&pt| board.get(pt) == Some(player))
            .collect();
        let cell = self
            .rng
            .choice(candidates)
            .ok_or(KonaneError::NoRemovablePiece(player))?;

        let mv = Move::removal(cell);
        writeln!(self.output, "Move chosen: {mv}")?;
        apply_opening(&self.state, &mv)
    }

    fn computer_reply(&mut self) -> Result<State> {
        let player = self.state.player();
        let cell = self
            .rng
            .choice(reply_candidates(&self.state))
            .ok_or(KonaneError::NoRemovablePiece(player))?;

        let mv = Move::removal(cell);
        writeln!(self.output, "Move chosen: {mv}")?;
        apply_reply(&self.state, &mv)
    }

    fn computer_move(&mut self) -> Result<State> {
        self.ctx.start_turn();
        let mv = match decide(&self.state, &mut self.ctx) {
            Ok(Decision::Play(mv)) => mv,
            Ok(Decision::NoLegalMove) | Err(KonaneError::NoDecision) => {
                let fallback = actions(&self.state)
                    .first()
                    .copied()
                    .ok_or(KonaneError::NoDecision)?;
                log::warn!("search returned no move, playing {fallback}");
                fallback
            }
            Err(err) => return Err(err),
        };

        let elapsed = self.ctx.elapsed();
        writeln!(self.output, "Time taken: {:.2}s", elapsed.as_secs_f64())?;
        writeln!(self.output, "Peak memory: {} bytes", self.ctx.peak_memory())?;
        writeln!(self.output, "Move chosen: {mv}")?;
        log::info!(
            "{} plays {mv} in {elapsed:?} (peak memory {} bytes)",
            self.state.player(),
            self.ctx.peak_memory()
        );
        result(&self.state, &mv)
    }
}

/// Agents from the command-line color argument.
///
/// An argument starting with `B` or `W` (any case) names the human's color.
/// Anything else opens the [`choose_agents`] menu.
pub fn agents_from_arg<R: BufRead, W: Write>(
    arg: &str,
    input: &mut R,
    output: &mut W,
) -> Result<(Agent, Agent)> {
    match arg.chars().next().and_then(Color::from_symbol) {
        Some(human) => Ok(agents_for_human(human)),
        None => choose_agents(input, output),
    }
}

/// Ask which kind of game to play, returning the agents for Black and White.
pub fn choose_agents<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<(Agent, Agent)> {
    writeln!(output, "Play konane:")?;
    writeln!(output, " a) play computer")?;
    writeln!(output, " b) computer vs computer")?;

    let option = loop {
        let line = read_answer(input, output, "Please choose an option: ")?;
        match line.chars().next() {
            Some(c @ ('a' | 'b')) => break c,
            _ => continue,
        }
    };
    if option == 'b' {
        return Ok((Agent::Computer, Agent::Computer));
    }

    let human = loop {
        let line = read_answer(input, output, "Please choose a player ('B' or 'W' ): ")?;
        if let Some(color) = line.chars().next().and_then(Color::from_symbol) {
            break color;
        }
    };
    Ok(agents_for_human(human))
}

/// Agents for a human playing `human` against the computer.
pub fn agents_for_human(human: Color) -> (Agent, Agent) {
    match human {
        Color::Black => (Agent::Human, Agent::Computer),
        Color::White => (Agent::Computer, Agent::Human),
    }
}

fn read_answer<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
) -> Result<String> {
    write!(output, "{message}")?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(KonaneError::InputClosed);
    }
    Ok(line.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_choose_agents_menu() {
        let mut input = Cursor::new("x\nb\n");
        let mut output = Vec::new();
        let agents = choose_agents(&mut input, &mut output).unwrap();
        assert_eq!(agents, (Agent::Computer, Agent::Computer));

        let mut input = Cursor::new("a\nq\nW\n");
        let agents = choose_agents(&mut input, &mut Vec::new()).unwrap();
        assert_eq!(agents, (Agent::Computer, Agent::Human));
    }

    #[test]
    fn test_choose_agents_eof() {
        let mut input = Cursor::new("a\n");
        assert!(matches!(
            choose_agents(&mut input, &mut Vec::new()),
            Err(KonaneError::InputClosed)
        ));
    }

    #[test]
    fn test_agents_from_arg() {
        let mut output = Vec::new();
        let mut no_input = Cursor::new("");
        assert_eq!(
            agents_from_arg("B", &mut no_input, &mut output).unwrap(),
            (Agent::Human, Agent::Computer)
        );
        assert_eq!(
            agents_from_arg("white", &mut no_input, &mut output).unwrap(),
            (Agent::Computer, Agent::Human)
        );
        // A color argument never touches the menu.
        assert!(output.is_empty());

        let mut input = Cursor::new("b\n");
        assert_eq!(
            agents_from_arg("-", &mut input, &mut output).unwrap(),
            (Agent::Computer, Agent::Computer)
        );
        assert!(String::from_utf8(output).unwrap().contains("computer vs computer"));

        assert!(matches!(
            agents_from_arg("", &mut Cursor::new(""), &mut Vec::new()),
            Err(KonaneError::InputClosed)
        ));
    }

    #[test]
    fn test_human_reply_reprompts() {
        let state = State::initial(Board::standard());
        let state = apply_opening(&state, &Move::removal((3, 3))).unwrap();
        // F5 and E4 hold Black away from the hole, E5 is accepted.
        let input = Cursor::new("F5\nE4\nE5\n");
        let mut game = Game::new(
            *state.board(),
            Agent::Human,
            Agent::Human,
            SearchLimits::default(),
            input,
            Vec::new(),
        );
        game.state = state;
        let next = game.human_reply().unwrap();
        assert_eq!(next.board().get((3, 4)), None);
        assert_eq!(next.player(), Color::Black);
        let text = String::from_utf8(game.into_output()).unwrap();
        assert_eq!(text.matches("illegal move").count(), 2);
        assert!(text.ends_with("Move chosen: E5\n"));
    }

    #[test]
    fn test_human_opening_reprompts() {
        // E5 holds White, C6 is not an opening cell, D5 is accepted.
        let input = Cursor::new("E5\nC6\nzz\nD5\n");
        let mut game = Game::new(
            Board::standard(),
            Agent::Human,
            Agent::Computer,
            SearchLimits::default(),
            input,
            Vec::new(),
        );
        let next = game.human_opening().unwrap();
        assert_eq!(next.board().get((3, 3)), None);
        assert_eq!(next.player(), Color::White);
        let text = String::from_utf8(game.into_output()).unwrap();
        assert_eq!(text.matches("illegal move").count(), 2);
        assert_eq!(text.matches("invalid move input").count(), 1);
    }

    #[test]
    fn test_computer_opening_and_reply_are_legal() {
        for seed in 0..16 {
            let mut game = Game::new(
                Board::standard(),
                Agent::Computer,
                Agent::Computer,
                SearchLimits::default(),
                Cursor::new(""),
                Vec::new(),
            )
            .with_seed(seed);
            game.state = game.computer_opening().unwrap();
            assert_eq!(game.state.board().pieces(), 63);
            game.state = game.computer_reply().unwrap();
            assert_eq!(game.state.board().pieces(), 62);
            assert_eq!(game.state.player(), Color::Black);
        }
    }

    #[test]
    fn test_human_input_closed() {
        let mut game = Game::new(
            Board::standard(),
            Agent::Human,
            Agent::Human,
            SearchLimits::default(),
            Cursor::new(""),
            Vec::new(),
        );
        assert!(matches!(game.play(), Err(KonaneError::InputClosed)));
    }
}
