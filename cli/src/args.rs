use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use sapper_core::{BoardConfig, CellCount, Coord};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    Web,
    DirectGames,
}

impl Mode {
    pub const fn preset(self) -> BoardConfig {
        match self {
            Self::Web => BoardConfig::WEB,
            Self::DirectGames => BoardConfig::DIRECT_GAMES,
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// What log level to use
    #[command(flatten)]
    pub verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Board preset
    #[arg(short, long, value_enum, default_value_t = Mode::Web)]
    pub mode: Mode,

    /// JSON file holding a board config, replaces the preset
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub width: Option<Coord>,

    #[arg(long)]
    pub height: Option<Coord>,

    #[arg(long)]
    pub mines: Option<CellCount>,
}

impl Args {
    pub fn board_config(&self) -> anyhow::Result<BoardConfig> {
        let base = match &self.config {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("Could not read {}", path.display()))?;
                serde_json::from_str(&json)
                    .with_context(|| format!("Invalid board config in {}", path.display()))?
            }
            None => self.mode.preset(),
        };

        let size = (
            self.width.unwrap_or(base.size.0),
            self.height.unwrap_or(base.size.1),
        );
        let mines = self.mines.unwrap_or(base.mines);
        Ok(BoardConfig::new(size, mines)?)
    }
}
