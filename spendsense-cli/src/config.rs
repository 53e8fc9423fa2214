use anyhow::{Context, Result, anyhow};
use chrono::{NaiveDateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use spendsense_budget::{DEFAULT_CAUTION_RATIO, HISTORY_WINDOW};
use spendsense_ingest::{DEFAULT_SOURCE, ParseOptions};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// tracing EnvFilter directive used when RUST_LOG is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    #[serde(default)]
    pub parser: ParserSection,
    #[serde(default)]
    pub budget: BudgetSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParserSection {
    pub source: String,
    /// IANA zone used for "now" when a message carries no date
    pub timezone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetSection {
    pub caution_ratio: f64,
    pub history_months: usize,
}

fn default_log_filter() -> String {
    "spendsense=info".to_string()
}

impl Default for ParserSection {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE.to_string(),
            timezone: "Asia/Kolkata".to_string(),
        }
    }
}

impl Default for BudgetSection {
    fn default() -> Self {
        Self {
            caution_ratio: DEFAULT_CAUTION_RATIO,
            history_months: HISTORY_WINDOW,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            parser: ParserSection::default(),
            budget: BudgetSection::default(),
        }
    }
}

impl Config {
    pub fn timezone(&self) -> Result<Tz> {
        self.parser
            .timezone
            .parse::<Tz>()
            .map_err(|e| anyhow!("invalid timezone {:?}: {e}", self.parser.timezone))
    }

    /// Wall-clock time in the configured zone
    pub fn now(&self) -> Result<NaiveDateTime> {
        Ok(Utc::now().with_timezone(&self.timezone()?).naive_local())
    }

    pub fn parse_options(&self, source: Option<String>) -> Result<ParseOptions> {
        let opts = ParseOptions::at(self.now()?);
        Ok(opts.with_source(source.unwrap_or_else(|| self.parser.source.clone())))
    }
}

/// `~/.spendsense`, where the config file lives
pub fn spendsense_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".spendsense"))
}

pub fn config_path() -> Result<PathBuf> {
    Ok(spendsense_home()?.join("config.toml"))
}

pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

/// Write `cfg` to `p`, creating the parent directory if needed.
pub fn save_config_to(p: &Path, cfg: &Config) -> Result<()> {
    if let Some(dir) = p.parent() {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(p, s).with_context(|| format!("write {}", p.display()))
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config_to(&p, &Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let cfg: Config = toml::from_str("[parser]\nsource = \"statement\"\ntimezone = \"UTC\"\n").unwrap();
        assert_eq!(cfg.parser.source, "statement");
        assert_eq!(cfg.budget, BudgetSection::default());
        assert_eq!(cfg.log_filter, "spendsense=info");
        assert!(cfg.timezone().is_ok());
    }

    #[test]
    fn test_round_trip_default() {
        let s = toml::to_string_pretty(&Config::default()).unwrap();
        let back: Config = toml::from_str(&s).unwrap();
        assert_eq!(back, Config::default());
    }

    #[test]
    fn test_bad_timezone() {
        let mut cfg = Config::default();
        cfg.parser.timezone = "Mars/Olympus".to_string();
        assert!(cfg.timezone().is_err());
        assert!(cfg.parse_options(None).is_err());
    }

    #[test]
    fn test_save_then_load() {
        let dir = std::env::temp_dir().join(format!("spendsense-config-{}", std::process::id()));
        let p = dir.join("nested").join("config.toml");
        let mut cfg = Config::default();
        cfg.budget.history_months = 3;
        cfg.parser.timezone = "UTC".to_string();

        save_config_to(&p, &cfg).unwrap();
        assert_eq!(load_config_from(&p).unwrap(), cfg);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_file_is_default() {
        let cfg = load_config_from(Path::new("/nonexistent/spendsense/config.toml")).unwrap();
        assert_eq!(cfg, Config::default());
    }
}
