//! Terminal presentation of mode screens.

use colored::Colorize;
use std::io::{self, Write};
use trail_game::Screen;

const RULE_WIDTH: usize = 60;

pub fn banner(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", "Westward: the Oregon Trail".bright_cyan().bold())?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH).cyan())?;
    Ok(())
}

/// True for lines shaped like `  3. Label`.
fn is_menu_line(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed
        .split_once(". ")
        .is_some_and(|(code, _)| !code.is_empty() && code.chars().all(|c| c.is_ascii_digit()))
}

pub fn paint(screen: &Screen, out: &mut impl Write) -> io::Result<()> {
    writeln!(out)?;
    if !screen.title.is_empty() {
        writeln!(out, "{}", screen.title.bold().yellow())?;
        writeln!(out, "{}", "-".repeat(screen.title.chars().count().min(RULE_WIDTH)).yellow())?;
    }
    for line in &screen.body {
        if is_menu_line(line) {
            writeln!(out, "{}", line.bright_white())?;
        } else {
            writeln!(out, "{line}")?;
        }
    }
    if !screen.prompt.is_empty() {
        writeln!(out)?;
        write!(out, "{} ", screen.prompt.green().bold())?;
    }
    out.flush()
}
