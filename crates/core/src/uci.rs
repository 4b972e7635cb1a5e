use std::io::{stdin, stdout, BufRead, Write};

use anyhow::{anyhow, Context, Result};
use log::{debug, warn};
use nom::{
    branch::alt,
    bytes::complete::{tag, take_till1, take_until},
    character::complete::space1,
    combinator::{all_consuming, eof, map, opt, recognize, rest, value},
    multi::{count, many0},
    sequence::{pair, preceded, tuple},
    IResult,
};

use crate::{
    game::{Board, Move, Piece},
    Engine,
};

/// Engine settings exposed through `setoption`.
pub trait UciOptions {
    /// `option name ...` lines sent in reply to `uci`.
    fn declarations(&self) -> Vec<String>;

    fn set_option(&mut self, name: &str, value: &str) -> Result<()>;
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Command {
    Uci,
    IsReady,
    UciNewGame,
    Position {
        fen: Option<String>,
        moves: Vec<String>,
    },
    Go,
    SetOption {
        name: String,
        value: Option<String>,
    },
    Display,
    Quit,
}

fn word(i: &str) -> IResult<&str, &str> {
    take_till1(|c: char| c.is_whitespace())(i)
}

fn fen(i: &str) -> IResult<&str, &str> {
    recognize(pair(word, count(preceded(space1, word), 5)))(i)
}

fn position(i: &str) -> IResult<&str, Command> {
    map(
        preceded(
            pair(tag("position"), space1),
            pair(
                alt((
                    value(None, tag("startpos")),
                    map(preceded(pair(tag("fen"), space1), fen), Some),
                )),
                opt(preceded(
                    tuple((space1, tag("moves"))),
                    many0(preceded(space1, word)),
                )),
            ),
        ),
        |(fen, moves): (Option<&str>, Option<Vec<&str>>)| Command::Position {
            fen: fen.map(str::to_string),
            moves: moves
                .unwrap_or_default()
                .into_iter()
                .map(str::to_string)
                .collect(),
        },
    )(i)
}

fn set_option(i: &str) -> IResult<&str, Command> {
    map(
        preceded(
            tuple((tag("setoption"), space1, tag("name"), space1)),
            pair(
                alt((take_until(" value "), rest)),
                opt(preceded(tag(" value "), rest)),
            ),
        ),
        |(name, value): (&str, Option<&str>)| Command::SetOption {
            name: name.trim().to_string(),
            value: value.map(|v| v.trim().to_string()),
        },
    )(i)
}

fn command(i: &str) -> IResult<&str, Command> {
    alt((
        // "ucinewgame" before "uci", which is a prefix of it
        value(Command::UciNewGame, tag("ucinewgame")),
        value(Command::Uci, tag("uci")),
        value(Command::IsReady, tag("isready")),
        position,
        // Search limits are ignored, every search runs to its fixed depth
        value(
            Command::Go,
            preceded(tag("go"), alt((eof, preceded(space1, rest)))),
        ),
        set_option,
        value(Command::Display, tag("d")),
        value(Command::Quit, tag("quit")),
    ))(i)
}

/// Parses one line from the GUI. Unknown commands yield `None`.
pub fn parse_command(line: &str) -> Option<Command> {
    all_consuming(command)(line.trim())
        .ok()
        .map(|(_, command)| command)
}

/// Finds the legal move `uci` refers to. Promotion letters are accepted in
/// either case.
fn find_legal_move(board: &Board, uci: &str) -> Result<Move> {
    let requested: Move = uci.parse()?;
    board
        .legal_moves()
        .into_iter()
        .find(|m| {
            m.from_pos == requested.from_pos
                && m.to_pos == requested.to_pos
                && m.promotion.and_then(Piece::kind) == requested.promotion.and_then(Piece::kind)
        })
        .ok_or_else(|| anyhow!("Illegal move {uci} in position {}", board.to_fen()))
}

fn setup_position(fen: Option<&str>, moves: &[String]) -> Result<Board> {
    let mut board = match fen {
        Some(fen) => Board::from_fen(fen)?,
        None => Board::default(),
    };

    for uci in moves {
        let m = find_legal_move(&board, uci)?;
        board.push(&m);
    }

    Ok(board)
}

fn respond(out: &mut impl Write, msg: &str) -> Result<()> {
    writeln!(out, "{msg}")?;
    out.flush()?;
    debug!("Responded with: {msg}");
    Ok(())
}

/// Runs the UCI loop over stdin/stdout until `quit` or end of input.
pub fn start_uci<E: Engine<Board> + UciOptions>(name: &str, engine: &mut E) -> Result<()> {
    run_uci(name, engine, stdin().lock(), &mut stdout().lock())
}

pub fn run_uci<E, I, O>(name: &str, engine: &mut E, input: I, out: &mut O) -> Result<()>
where
    E: Engine<Board> + UciOptions,
    I: BufRead,
    O: Write,
{
    let mut board = Board::default();

    for line in input.lines() {
        let line = line.context("Failed to read command")?;
        debug!("Received message: {line}");

        let Some(command) = parse_command(&line) else {
            debug!("Ignoring unknown command: {line}");
            continue;
        };

        match command {
            Command::Uci => {
                respond(out, &format!("id name {name}"))?;
                respond(out, "id author chess-ai")?;
                for declaration in engine.declarations() {
                    respond(out, &declaration)?;
                }
                respond(out, "uciok")?;
            }
            Command::IsReady => respond(out, "readyok")?,
            Command::UciNewGame => board = Board::default(),
            Command::Position { fen, moves } => match setup_position(fen.as_deref(), &moves) {
                Ok(b) => board = b,
                Err(e) => warn!("Ignoring position command: {e:#}"),
            },
            Command::Go => {
                let reply = match engine.best_move(&mut board) {
                    Ok(m) => format!("bestmove {m}"),
                    Err(e) => {
                        warn!("{} found no move: {e}", engine.name());
                        "bestmove 0000".to_string()
                    }
                };
                respond(out, &reply)?;
            }
            Command::SetOption { name, value } => {
                if let Err(e) = engine.set_option(&name, value.as_deref().unwrap_or_default()) {
                    warn!("Rejected option {name}: {e:#}");
                }
            }
            Command::Display => respond(out, &board.to_string())?,
            Command::Quit => break,
        }
    }

    debug!("Connection terminated.");
    Ok(())
}
