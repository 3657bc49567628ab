use anyhow::{Context, bail};
use sapper_core::{Coord, Coord2, Input};

pub const HELP: &str = "\
commands:
  o X Y   open the cell at column X, row Y
  m X Y   mark or unmark a cell
  n       new game
  c       cancel the current game
  a       watch an ad
  h       this help
  q       quit";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Play(Input),
    Ad,
    Help,
    Quit,
}

fn coords<'a>(mut words: impl Iterator<Item = &'a str>) -> anyhow::Result<Coord2> {
    let mut next = |axis: &str| -> anyhow::Result<Coord> {
        let word = words.next().with_context(|| format!("Missing {axis}"))?;
        word.parse()
            .with_context(|| format!("Invalid {axis} {word:?}"))
    };
    let x = next("column")?;
    let y = next("row")?;
    Ok((x, y))
}

impl Command {
    pub fn parse(line: &str) -> anyhow::Result<Self> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            bail!("Empty command, try h for help");
        };

        let command = match verb {
            "o" | "open" => Self::Play(Input::Open(coords(&mut words)?)),
            "m" | "mark" => Self::Play(Input::Mark(coords(&mut words)?)),
            "n" | "new" => Self::Play(Input::Restart),
            "c" | "cancel" => Self::Play(Input::Cancel),
            "a" | "ad" => Self::Ad,
            "h" | "help" | "?" => Self::Help,
            "q" | "quit" => Self::Quit,
            other => bail!("Unknown command {other:?}, try h for help"),
        };

        if let Some(extra) = words.next() {
            bail!("Unexpected {extra:?} after command");
        }
        Ok(command)
    }
}
