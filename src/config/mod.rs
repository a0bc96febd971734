pub mod toml_config;

use crate::core::announcement::{Announcement, DEFAULT_GREETING, DEFAULT_REMINDER};
use crate::core::engine::{DrawSettings, DEFAULT_MAX_ATTEMPTS};
use crate::core::selector::ByePolicy;
use crate::utils::error::{BuddyError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_path, validate_range, Validate};
use serde::{Deserialize, Serialize};
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use clap::Parser;

pub const DEFAULT_HISTORY_PATH: &str = "buddies.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum ByeStrategy {
    Organizer,
    MostPlayed,
    Random,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "lunch-buddies")]
#[command(about = "Draw fortnightly lunch buddy pairs without repeating past pairings")]
pub struct CliConfig {
    /// Candidate list, one name per line
    pub candidates: Option<String>,

    /// History file of previous rounds
    #[arg(long)]
    pub history: Option<String>,

    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Person who sits out when the roster is odd
    #[arg(long)]
    pub organizer: Option<String>,

    #[arg(long, value_enum)]
    pub bye_policy: Option<ByeStrategy>,

    /// How many proposals to make before giving up
    #[arg(long)]
    pub max_attempts: Option<u32>,

    /// Seed the random draw for a reproducible result
    #[arg(long)]
    pub seed: Option<u64>,

    /// Redraw automatically when someone is left unmatched
    #[arg(long)]
    pub redraw_unmatched: bool,

    /// Accept proposals without asking (implies --redraw-unmatched)
    #[arg(short, long)]
    pub yes: bool,

    /// Show the proposal but do not write history
    #[arg(long)]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

/// Resolved run configuration: defaults, then TOML, then command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub candidates_path: Option<String>,
    pub history_path: String,
    pub organizer: Option<String>,
    pub bye_strategy: Option<ByeStrategy>,
    pub max_attempts: u32,
    pub redraw_on_unmatched: bool,
    pub seed: Option<u64>,
    pub auto_confirm: bool,
    pub dry_run: bool,
    pub greeting: String,
    pub reminder: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            candidates_path: None,
            history_path: DEFAULT_HISTORY_PATH.to_string(),
            organizer: None,
            bye_strategy: None,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            redraw_on_unmatched: false,
            seed: None,
            auto_confirm: false,
            dry_run: false,
            greeting: DEFAULT_GREETING.to_string(),
            reminder: DEFAULT_REMINDER.to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_toml(file: &TomlConfig) -> Self {
        let defaults = Self::default();
        Self {
            candidates_path: None,
            history_path: file.history.path.clone().unwrap_or(defaults.history_path),
            organizer: file.draw.organizer.clone(),
            bye_strategy: file.draw.bye_policy,
            max_attempts: file.draw.max_attempts.unwrap_or(defaults.max_attempts),
            redraw_on_unmatched: file.draw.redraw_on_unmatched.unwrap_or(false),
            seed: file.draw.seed,
            auto_confirm: false,
            dry_run: false,
            greeting: file.announcement.greeting.clone().unwrap_or(defaults.greeting),
            reminder: file.announcement.reminder.clone().unwrap_or(defaults.reminder),
        }
    }

    /// Without an explicit strategy, a named organizer sits out; otherwise the
    /// most experienced candidate does.
    pub fn bye_policy(&self) -> Result<ByePolicy> {
        let strategy = self.bye_strategy.unwrap_or(if self.organizer.is_some() {
            ByeStrategy::Organizer
        } else {
            ByeStrategy::MostPlayed
        });

        match strategy {
            ByeStrategy::Organizer => match &self.organizer {
                Some(name) => Ok(ByePolicy::Organizer(name.clone())),
                None => Err(BuddyError::ConfigError {
                    message: "bye policy 'organizer' needs an organizer name (--organizer)"
                        .to_string(),
                }),
            },
            ByeStrategy::MostPlayed => Ok(ByePolicy::MostPlayed),
            ByeStrategy::Random => Ok(ByePolicy::Random),
        }
    }

    pub fn draw_settings(&self) -> Result<DrawSettings> {
        Ok(DrawSettings {
            bye_policy: self.bye_policy()?,
            max_attempts: self.max_attempts,
            // 無人確認時不可直接接受有人落單的配對
            redraw_on_unmatched: self.redraw_on_unmatched || self.auto_confirm,
            dry_run: self.dry_run,
            announcement: Announcement::new(self.greeting.clone(), self.reminder.clone()),
        })
    }

    pub fn candidates_path(&self) -> Result<&str> {
        self.candidates_path
            .as_deref()
            .ok_or_else(|| BuddyError::MissingArgument {
                message: "no candidate file given".to_string(),
            })
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_path("candidates", self.candidates_path()?)?;
        validate_path("history", &self.history_path)?;
        validate_range("max_attempts", self.max_attempts, 1, 10)?;
        if let Some(organizer) = &self.organizer {
            validate_non_empty_string("organizer", organizer)?;
        }
        self.bye_policy()?;
        Ok(())
    }
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 載入 TOML（若有指定），再套用命令列覆蓋設定
    pub fn resolve(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                let file = TomlConfig::from_file(path)?;
                file.validate()?;
                AppConfig::from_toml(&file)
            }
            None => AppConfig::default(),
        };

        self.apply_overrides(&mut config);
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut AppConfig) {
        config.candidates_path = self.candidates.clone();
        if let Some(history) = &self.history {
            config.history_path = history.clone();
        }
        if let Some(organizer) = &self.organizer {
            config.organizer = Some(organizer.clone());
        }
        if let Some(strategy) = self.bye_policy {
            config.bye_strategy = Some(strategy);
        }
        if let Some(max_attempts) = self.max_attempts {
            config.max_attempts = max_attempts;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config.redraw_on_unmatched |= self.redraw_unmatched;
        config.auto_confirm = self.yes;
        config.dry_run = self.dry_run;
    }
}
