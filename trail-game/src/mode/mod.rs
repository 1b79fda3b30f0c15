//! Console modes: the stack of menus and screens the player moves through.
//!
//! Every mode is a small state machine over its own forms. The
//! [`Navigator`] owns the [`ModeStack`], forwards each input line and tick to
//! the top mode and applies the [`Transition`] it returns. Modes are created
//! through the [`ModeRegistry`], which maps a [`ModeKind`] tag to a
//! constructor.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::simulation::SimulationContext;

pub mod command;
pub mod ending;
pub mod game_over;
pub mod high_scores;
pub mod hunt;
pub mod location;
pub mod main_menu;
pub mod navigator;
pub mod new_game;
pub mod options;
pub mod random_event;
pub mod registry;
pub mod river_crossing;
pub mod stack;
pub mod store;
pub mod trade;
pub mod travel;

pub use command::{MenuCommand, menu_lines, parse_choice, parse_yes_no};
pub use navigator::{Navigator, NavigatorError};
pub use registry::{ModeCtor, ModeRegistry};
pub use stack::ModeStack;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeKind {
    MainMenu,
    NewGame,
    Store,
    Travel,
    Location,
    RiverCrossing,
    Hunt,
    Trade,
    RandomEvent,
    GameOver,
    HighScores,
    Options,
    Ending,
}

impl ModeKind {
    pub const ALL: [Self; 13] = [
        Self::MainMenu,
        Self::NewGame,
        Self::Store,
        Self::Travel,
        Self::Location,
        Self::RiverCrossing,
        Self::Hunt,
        Self::Trade,
        Self::RandomEvent,
        Self::GameOver,
        Self::HighScores,
        Self::Options,
        Self::Ending,
    ];
}

impl fmt::Display for ModeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// One line typed at the console.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Input {
    pub text: String,
    /// Time between the prompt appearing and the line arriving.
    pub latency_ms: u32,
}

impl Input {
    #[must_use]
    pub fn new(text: impl Into<String>, latency_ms: u32) -> Self {
        Self {
            text: text.into(),
            latency_ms,
        }
    }

    #[must_use]
    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }
}

impl From<&str> for Input {
    fn from(text: &str) -> Self {
        Self::new(text, 0)
    }
}

impl From<String> for Input {
    fn from(text: String) -> Self {
        Self::new(text, 0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickKind {
    /// Sent once after every processed input line.
    System,
    /// Simulated time passing while a mode asks for it.
    Game,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    Stay,
    Push(ModeKind),
    Replace(ModeKind),
    Pop,
    /// Clear the stack and start over from one mode.
    Reset(ModeKind),
    Exit,
}

/// What a mode wants drawn: a heading, body lines and the prompt.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Screen {
    pub title: String,
    pub body: Vec<String>,
    pub prompt: String,
}

impl Screen {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.body.push(line.into());
        self
    }

    #[must_use]
    pub fn lines<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.body.extend(lines.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn blank(self) -> Self {
        self.line("")
    }

    #[must_use]
    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.title.is_empty() {
            writeln!(f, "{}", self.title)?;
            writeln!(f)?;
        }
        for line in &self.body {
            writeln!(f, "{line}")?;
        }
        if !self.prompt.is_empty() {
            writeln!(f)?;
            write!(f, "{} ", self.prompt)?;
        }
        Ok(())
    }
}

/// A menu or screen handler living on the mode stack.
pub trait Mode {
    fn kind(&self) -> ModeKind;

    fn render(&self, ctx: &SimulationContext) -> Screen;

    fn on_input(&mut self, ctx: &mut SimulationContext, input: &Input) -> Transition;

    fn on_tick(&mut self, _ctx: &mut SimulationContext, _tick: TickKind) -> Transition {
        Transition::Stay
    }

    /// Called whenever the mode becomes the top of the stack, on entry and
    /// when a mode above it pops.
    fn on_focus(&mut self, _ctx: &mut SimulationContext) -> Transition {
        Transition::Stay
    }

    fn wants_game_ticks(&self) -> bool {
        false
    }
}

const PRESS_ENTER: &str = "Press ENTER to continue.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_renders_title_body_and_prompt() {
        let screen = Screen::new("Fort Laramie")
            .line("April 10, 1848")
            .blank()
            .prompt("What is your choice?");
        assert_eq!(
            screen.to_string(),
            "Fort Laramie\n\nApril 10, 1848\n\n\nWhat is your choice? "
        );
    }

    #[test]
    fn input_trims_whitespace() {
        let input = Input::from("  3 \n");
        assert_eq!(input.trimmed(), "3");
        assert_eq!(input.latency_ms, 0);
    }
}
