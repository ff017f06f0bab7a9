//! The adventure itself: walking from the start room to the end room one command at a time.

use crate::{
    datastr::graph::NodeId,
    error::{Error, Result},
    rooms::*,
    time_request::TimeFile,
};
use std::io::{BufRead, Write};

pub const PROMPT: &str = "WHERE TO? >";
/// Reserved command which shows the current time instead of moving.
pub const TIME_COMMAND: &str = "time";
pub const UNKNOWN_ROOM_MESSAGE: &str = "HUH? I DON’T UNDERSTAND THAT ROOM. TRY AGAIN.";

/// What a line of input asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(NodeId),
    Time,
    Invalid,
}

/// The result of handling one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Moved,
    Won,
    Time,
    Invalid,
}

/// State of one play through a room set.
#[derive(Debug)]
pub struct Adventure<'a> {
    rooms: &'a RoomSet,
    current: NodeId,
    // names of the rooms moved into, in order
    path: Vec<String>,
    show_location: bool,
}

impl<'a> Adventure<'a> {
    pub fn new(rooms: &'a RoomSet) -> Adventure<'a> {
        Adventure {
            rooms,
            current: rooms.start(),
            path: Vec::new(),
            show_location: true,
        }
    }

    pub fn current(&self) -> &'a Room {
        self.rooms.room(self.current)
    }

    /// Rooms moved into so far, the start room is not part of it.
    pub fn path(&self) -> &[String] {
        &self.path
    }

    pub fn steps(&self) -> usize {
        self.path.len()
    }

    pub fn is_won(&self) -> bool {
        self.current == self.rooms.end()
    }

    /// Match a line of input, with the line terminator already removed.
    /// The time command takes precedence over room names, matching is exact and case sensitive.
    pub fn interpret(&self, input: &str) -> Command {
        if input == TIME_COMMAND {
            return Command::Time;
        }
        if self.current().is_connected_to(input) {
            if let Some(id) = self.rooms.id_of(input) {
                return Command::Move(id);
            }
        }
        Command::Invalid
    }

    /// Apply a command which does not need any I/O.
    /// Time requests are only acknowledged here, fetching the time is up to the caller.
    pub fn advance(&mut self, command: Command) -> Step {
        match command {
            Command::Move(id) => {
                self.current = id;
                self.path.push(self.current().name().to_string());
                if self.is_won() {
                    Step::Won
                } else {
                    Step::Moved
                }
            }
            Command::Time => Step::Time,
            Command::Invalid => Step::Invalid,
        }
    }

    /// Play until the end room is reached, reading commands from `input` and writing the transcript to `output`.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut output: W, time_file: &TimeFile) -> Result<()> {
        while !self.is_won() {
            if self.show_location {
                self.write_location(&mut output)?;
            }
            write!(output, "{}", PROMPT)?;
            output.flush()?;

            let line = read_command(&mut input)?;
            writeln!(output)?;

            let step = self.advance(self.interpret(&line));
            self.show_location = step != Step::Time;
            match step {
                Step::Moved => (),
                Step::Time => writeln!(output, "{}\n", time_file.request()?)?,
                Step::Invalid => writeln!(output, "{}\n", UNKNOWN_ROOM_MESSAGE)?,
                Step::Won => self.write_victory(&mut output)?,
            }
        }

        report!("steps", self.steps());
        report!("path", self.path);
        output.flush()?;
        Ok(())
    }

    fn write_location<W: Write>(&self, output: &mut W) -> Result<()> {
        let room = self.current();
        writeln!(output, "CURRENT LOCATION: {}", room.name())?;
        write!(output, "POSSIBLE CONNECTIONS:")?;
        if !room.connections().is_empty() {
            write!(output, " {}.", room.connections().join(", "))?;
        }
        writeln!(output)?;
        Ok(())
    }

    fn write_victory<W: Write>(&self, output: &mut W) -> Result<()> {
        writeln!(output, "YOU HAVE FOUND THE END ROOM. CONGRATULATIONS!")?;
        writeln!(output, "YOU TOOK {} STEPS. YOUR PATH TO VICTORY WAS:", self.steps())?;
        for name in &self.path {
            writeln!(output, "{}", name)?;
        }
        Ok(())
    }
}

// one line with only the trailing newline removed, a `\r` before it stays part of the command
fn read_command<R: BufRead>(input: &mut R) -> Result<String> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(Error::InputClosed);
    }
    if line.ends_with('\n') {
        line.pop();
    }
    Ok(line)
}
