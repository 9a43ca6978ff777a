//! Interactive tile builder loop.
//!
//! The wizard reads menu choices and field values from a `BufRead` and writes
//! its prompts to a `Write`, so tests can drive it with in-memory buffers
//! while `main` hands it the locked stdin/stdout pair.

use std::fs;
use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::tile::{self, Tile};

/// Loop state: the tiles collected so far and whether the user picked done.
pub struct Wizard {
    tiles: Vec<Tile>,
    done: bool,
}

impl Wizard {
    pub fn new() -> Self {
        Self {
            tiles: Vec::new(),
            done: false,
        }
    }

    /// Run the menu loop until the user picks `[D]one`.
    ///
    /// Unrecognized input never ends the loop: a non-empty entry gets a short
    /// notice, an empty line just re-shows the menu.
    pub fn run<R: BufRead, W: Write>(mut self, input: &mut R, output: &mut W) -> Result<Vec<Tile>> {
        while !self.done {
            writeln!(output)?;
            writeln!(output, "[B]utton")?;
            writeln!(output, "[T]ext")?;
            writeln!(output, "[D]one")?;
            output.flush()?;

            let choice = read_line(input)?;
            match choice.to_lowercase().as_str() {
                "b" => {
                    let title = prompt(input, output, "Title: ")?;
                    let publish_topic = prompt(input, output, "Topic: ")?;
                    let publish_payload = prompt(input, output, "Payload: ")?;
                    tracing::debug!("Adding button tile '{}' -> {}", title, publish_topic);
                    self.tiles.push(Tile::Button {
                        title,
                        publish_topic,
                        publish_payload,
                    });
                }
                "t" => {
                    let title = prompt(input, output, "Title: ")?;
                    let subscribe_topic = prompt(input, output, "Topic: ")?;
                    tracing::debug!("Adding text tile '{}' <- {}", title, subscribe_topic);
                    self.tiles.push(Tile::Text {
                        title,
                        subscribe_topic,
                    });
                }
                "d" => {
                    self.done = true;
                }
                "" => {}
                _ => {
                    tracing::warn!("Unrecognized menu option: {}", choice);
                    writeln!(output, "Unrecognized option: {}", choice)?;
                }
            }
        }

        tracing::info!("Wizard finished with {} tile(s)", self.tiles.len());
        Ok(self.tiles)
    }
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

/// Post-loop sequence: print the rendered array, offer the file write, then
/// wait for ENTER.
///
/// Any answer other than `y`/`yes` (case-insensitive) leaves `path` untouched.
pub fn finish<R: BufRead, W: Write>(
    tiles: &[Tile],
    input: &mut R,
    output: &mut W,
    path: &Path,
) -> Result<()> {
    let json = tile::render(tiles)?;
    writeln!(output, "{}", json)?;

    let answer = prompt(input, output, "Print to file? (y/n) ")?.to_lowercase();
    if answer == "y" || answer == "yes" {
        fs::write(path, &json)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("Wrote {} tile(s) to {}", tiles.len(), path.display());
    }

    write!(output, "ENTER to quit")?;
    output.flush()?;
    // EOF is acceptable here; everything is already written.
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(())
}

/// Read one line, stripping the trailing newline. EOF mid-prompt is an error.
fn read_line<R: BufRead>(input: &mut R) -> Result<String> {
    let mut line = String::new();
    let n = input.read_line(&mut line).context("Failed to read input")?;
    if n == 0 {
        bail!("Unexpected end of input");
    }
    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }
    Ok(line)
}

fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, label: &str) -> Result<String> {
    write!(output, "{}", label)?;
    output.flush()?;
    read_line(input)
}
