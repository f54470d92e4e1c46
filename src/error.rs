use std::path::PathBuf;

use mazecore::MazeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Maze error; {0}")]
    Maze(#[from] MazeError),
    #[error("Settings file error; {0}")]
    Io(#[from] std::io::Error),
    #[error("Settings error in {path:?}; {source}")]
    Settings {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("Settings serialization error; {0}")]
    Serialize(#[from] ron::Error),
    #[error("Logger error; {0}")]
    Logger(#[from] log::SetLoggerError),
    #[error("No preference directory on this platform")]
    NoConfigDir,
}
