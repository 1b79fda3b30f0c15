//! The read-eval loop: draw the top mode, read a line, dispatch, tick.

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::time::Instant;
use trail_game::{
    DataLoader, GameEngine, GameStorage, Input, Navigator, SimulationContext, TickKind,
};

use crate::render;

/// Where console lines come from.
pub trait LineSource {
    /// Next line without its newline, or `None` at end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying reader fails.
    fn next_line(&mut self) -> Result<Option<String>>;

    /// Whether lines should be echoed after the prompt (they were not typed).
    fn echoes(&self) -> bool {
        false
    }
}

pub struct StdinSource {
    stdin: io::Stdin,
}

impl StdinSource {
    pub fn new() -> Self {
        Self { stdin: io::stdin() }
    }
}

impl Default for StdinSource {
    fn default() -> Self {
        Self::new()
    }
}

impl LineSource for StdinSource {
    fn next_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = self
            .stdin
            .lock()
            .read_line(&mut line)
            .context("reading from stdin")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// Replays a file of input lines. Lines starting with `#` are comments.
#[derive(Debug)]
pub struct ScriptSource {
    lines: std::vec::IntoIter<String>,
}

impl ScriptSource {
    pub fn from_text(text: &str) -> Self {
        let lines: Vec<String> = text
            .lines()
            .filter(|line| !line.trim_start().starts_with('#'))
            .map(str::to_string)
            .collect();
        Self {
            lines: lines.into_iter(),
        }
    }

    /// # Errors
    ///
    /// Returns an error if the script cannot be read.
    pub fn open(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading script {}", path.display()))?;
        Ok(Self::from_text(&text))
    }
}

impl LineSource for ScriptSource {
    fn next_line(&mut self) -> Result<Option<String>> {
        Ok(self.lines.next())
    }

    fn echoes(&self) -> bool {
        true
    }
}

/// Game ticks owed for the time a line took to arrive.
pub fn game_ticks_for(latency_ms: u32, tick_ms: u32) -> u32 {
    (latency_ms / tick_ms.max(1)).max(1)
}

pub struct Console<'a, L: DataLoader, S: GameStorage> {
    pub engine: &'a GameEngine<L, S>,
    pub tick_ms: u32,
}

impl<L, S> Console<'_, L, S>
where
    L: DataLoader,
    S: GameStorage,
    S::Error: Into<anyhow::Error>,
{
    /// Run until the player exits or input ends.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `out` fails or a mode asks for an
    /// unregistered mode.
    pub fn run(
        &self,
        ctx: &mut SimulationContext,
        nav: &mut Navigator,
        source: &mut dyn LineSource,
        out: &mut impl Write,
    ) -> Result<usize> {
        let mut handled = 0_usize;
        while nav.is_running() {
            if let Some(screen) = nav.screen(ctx) {
                render::paint(&screen, out)?;
            }
            let prompted = Instant::now();
            let Some(line) = source.next_line()? else {
                writeln!(out)?;
                log::debug!("input ended after {handled} lines");
                break;
            };
            if source.echoes() {
                writeln!(out, "{line}")?;
            }
            let latency_ms = if source.echoes() {
                0
            } else {
                u32::try_from(prompted.elapsed().as_millis()).unwrap_or(u32::MAX)
            };
            handled += 1;
            self.step(ctx, nav, Input::new(line, latency_ms))?;
        }
        self.persist(ctx);
        writeln!(out, "Happy trails!")?;
        out.flush()?;
        Ok(handled)
    }

    fn step(&self, ctx: &mut SimulationContext, nav: &mut Navigator, input: Input) -> Result<()> {
        let latency_ms = input.latency_ms;
        nav.dispatch(ctx, input)?;
        if nav.is_running() {
            nav.tick(ctx, TickKind::System)?;
        }
        for _ in 0..game_ticks_for(latency_ms, self.tick_ms) {
            if !nav.wants_game_ticks() {
                break;
            }
            nav.tick(ctx, TickKind::Game)?;
        }
        self.persist(ctx);
        Ok(())
    }

    fn persist(&self, ctx: &mut SimulationContext) {
        if let Err(err) = self.engine.flush(ctx) {
            let err: anyhow::Error = err.into();
            log::warn!("could not write game data: {err:#}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripts_skip_comments() {
        let mut source = ScriptSource::from_text("# main menu\n1\n  # profession\n2\n\n");
        assert_eq!(source.next_line().unwrap().as_deref(), Some("1"));
        assert_eq!(source.next_line().unwrap().as_deref(), Some("2"));
        assert_eq!(source.next_line().unwrap().as_deref(), Some(""));
        assert_eq!(source.next_line().unwrap(), None);
        assert!(source.echoes());
    }

    #[test]
    fn slow_answers_owe_more_ticks() {
        assert_eq!(game_ticks_for(0, 250), 1);
        assert_eq!(game_ticks_for(999, 250), 3);
        assert_eq!(game_ticks_for(1_000, 250), 4);
        assert_eq!(game_ticks_for(40, 0), 40);
    }
}
