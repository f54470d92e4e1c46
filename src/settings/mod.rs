use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use log::LevelFilter;
use mazecore::{GeneratorKind, SolverKind};
use ron::{self, extensions::Extensions};
use serde::{Deserialize, Serialize};

use crate::error::Error;

const DEFAULT_SETTINGS: &str = include_str!("./default_settings.ron");

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Off,
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub rows: Option<usize>,
    #[serde(default)]
    pub columns: Option<usize>,
    #[serde(default)]
    pub generator: Option<GeneratorKind>,
    #[serde(default)]
    pub solver: Option<SolverKind>,
    #[serde(default)]
    pub delay_ms: Option<u64>,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub color_by_depth: Option<bool>,
    #[serde(default)]
    pub log_level: Option<LogLevel>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_rows(mut self, value: usize) -> Self {
        self.rows = Some(value);
        self
    }

    pub fn get_rows(&self) -> usize {
        self.rows.unwrap_or(15)
    }

    pub fn set_columns(mut self, value: usize) -> Self {
        self.columns = Some(value);
        self
    }

    pub fn get_columns(&self) -> usize {
        self.columns.unwrap_or(25)
    }

    pub fn set_generator(mut self, value: GeneratorKind) -> Self {
        self.generator = Some(value);
        self
    }

    pub fn get_generator(&self) -> GeneratorKind {
        self.generator.unwrap_or_default()
    }

    pub fn set_solver(mut self, value: SolverKind) -> Self {
        self.solver = Some(value);
        self
    }

    pub fn get_solver(&self) -> SolverKind {
        self.solver.unwrap_or_default()
    }

    pub fn set_delay_ms(mut self, value: u64) -> Self {
        self.delay_ms = Some(value);
        self
    }

    pub fn get_delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms.unwrap_or_default())
    }

    pub fn set_seed(mut self, value: u64) -> Self {
        self.seed = Some(value);
        self
    }

    /// `None` means a fresh random seed for every run.
    pub fn get_seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn set_color_by_depth(mut self, value: bool) -> Self {
        self.color_by_depth = Some(value);
        self
    }

    pub fn get_color_by_depth(&self) -> bool {
        self.color_by_depth.unwrap_or(true)
    }

    pub fn set_log_level(mut self, value: LogLevel) -> Self {
        self.log_level = Some(value);
        self
    }

    pub fn get_log_level(&self) -> LevelFilter {
        self.log_level.unwrap_or_default().into()
    }

    pub fn default_path() -> Result<PathBuf, Error> {
        dirs::preference_dir()
            .map(|dir| dir.join("mazesim").join("settings.ron"))
            .ok_or(Error::NoConfigDir)
    }

    fn options() -> ron::Options {
        ron::Options::default().with_default_extension(Extensions::IMPLICIT_SOME)
    }

    pub fn from_ron(path: &Path, text: &str) -> Result<Self, Error> {
        Self::options().from_str(text).map_err(|source| Error::Settings {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reads the settings file, creating it with the default content first if it is missing.
    pub fn load(path: &Path) -> Result<Self, Error> {
        if !path.exists() {
            log::info!("creating default settings at {:?}", path);
            Self::reset_config(path)?;
        }

        let text = fs::read_to_string(path)?;
        Self::from_ron(path, &text)
    }

    pub fn reset_config(path: &Path) -> Result<(), Error> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, DEFAULT_SETTINGS)?;

        Ok(())
    }

    pub fn to_ron(&self) -> Result<String, Error> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use std::{env, process};

    use super::*;

    fn parse(text: &str) -> Settings {
        Settings::from_ron(Path::new("test.ron"), text).unwrap()
    }

    #[test]
    fn default_file_parses() {
        let settings = parse(DEFAULT_SETTINGS);

        assert_eq!(settings.get_rows(), 15);
        assert_eq!(settings.get_columns(), 25);
        assert_eq!(settings.get_generator(), GeneratorKind::DepthFirstSearch);
        assert_eq!(settings.get_solver(), SolverKind::BreadthFirst);
        assert_eq!(settings.get_seed(), None);
        assert_eq!(settings.get_log_level(), LevelFilter::Warn);
    }

    #[test]
    fn missing_fields_fall_back() {
        let settings = parse("(generator: RndKruskals, delay_ms: 20)");

        assert_eq!(settings.get_generator(), GeneratorKind::RndKruskals);
        assert_eq!(settings.get_delay(), Duration::from_millis(20));
        assert_eq!(settings.get_rows(), 15);
        assert!(settings.get_color_by_depth());
        assert_eq!(settings, Settings::new().set_generator(GeneratorKind::RndKruskals).set_delay_ms(20));
    }

    #[test]
    fn broken_file_names_path() {
        let err = Settings::from_ron(Path::new("broken.ron"), "(rows: \"many\")").unwrap_err();
        assert!(matches!(err, Error::Settings { ref path, .. } if path == Path::new("broken.ron")));
    }

    #[test]
    fn serialized_settings_read_back() {
        let settings = Settings::new()
            .set_solver(SolverKind::AStar)
            .set_seed(7)
            .set_log_level(LogLevel::Debug);

        assert_eq!(parse(&settings.to_ron().unwrap()), settings);
    }

    #[test]
    fn load_creates_missing_file() {
        let dir = env::temp_dir().join(format!("mazesim-settings-{}", process::id()));
        let path = dir.join("settings.ron");
        let _ = fs::remove_dir_all(&dir);

        let settings = Settings::load(&path).unwrap();
        assert!(path.exists());
        assert_eq!(settings, parse(DEFAULT_SETTINGS));

        fs::remove_dir_all(&dir).unwrap();
    }
}
