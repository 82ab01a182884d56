use std::path::PathBuf;

use anyhow::Context as _;
use blockfall_engine::{DriverExit, DriverTiming, GameConfig, GameSession, PieceSeed, run_session};
use clap::Parser;

use crate::{
    terminal::{CrosstermInput, TuiPresenter},
    util,
};

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Starting level; levels above 29 play at the top speed [default: 0]
    #[arg(long, value_name = "N")]
    level: Option<u32>,
    /// Key that rotates the piece counterclockwise [default: a]
    #[arg(long, value_name = "C")]
    left_rotation_key: Option<char>,
    /// Key that rotates the piece clockwise [default: s]
    #[arg(long, value_name = "C")]
    right_rotation_key: Option<char>,
    /// Seed for the piece sequence, as 32 hexadecimal digits
    #[arg(long, value_name = "HEX32")]
    seed: Option<PieceSeed>,
    /// JSON file with game settings; flags given on the command line win
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl CommandArgs {
    fn game_config(&self) -> anyhow::Result<GameConfig> {
        let mut config: GameConfig = match &self.config {
            Some(path) => util::read_json_file("config", path)?,
            None => GameConfig::default(),
        };
        if let Some(level) = self.level {
            config.start_level = level;
        }
        if let Some(key) = self.left_rotation_key {
            config.left_rotation_key = key;
        }
        if let Some(key) = self.right_rotation_key {
            config.right_rotation_key = key;
        }
        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }

    fn session(&self) -> anyhow::Result<GameSession> {
        let config = self.game_config()?;
        let session = match self.seed {
            Some(seed) => GameSession::with_seed(config, seed),
            None => GameSession::new(config),
        };
        session.context("Failed to start game session")
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    let mut session = args.session()?;

    let exit = ratatui::run(|terminal| {
        let mut input = CrosstermInput::new();
        let mut presenter = TuiPresenter::new(terminal);
        run_session(
            &mut session,
            &mut input,
            &mut presenter,
            &DriverTiming::default(),
        )
    })
    .context("Terminal I/O failed")?;

    let progression = session.progression();
    let verdict = match exit {
        DriverExit::GameOver => "Game over",
        DriverExit::Quit => "Quit",
    };
    println!(
        "{verdict}: score {}, level {}, lines {}",
        progression.score(),
        progression.level(),
        progression.destroyed_lines()
    );
    Ok(())
}
