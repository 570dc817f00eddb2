use std::{path::Path, process::ExitCode};

use anyhow::Context;
use chrono::Local;
use clap::Parser;
use woozy_core::{ConfigStatus, Configuration, ForecastCache, ForecastLoader, YrProvider};

use crate::{
    icons::IconSet,
    render::{DEFAULT_DATE_FORMAT, Presenter, parse_date_format},
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "woozy", version, about = "Weather forecast from yr.no in your terminal")]
pub struct Cli {
    /// Force cache clear before loading the forecast.
    #[arg(long)]
    pub cache_clear: bool,

    /// Number of days to print when the config file leaves `days` at 0.
    #[arg(long, default_value_t = 3)]
    pub days: u32,

    /// Icon set used in the report.
    #[arg(long, value_enum, default_value_t = IconSet::Emoji)]
    pub icons: IconSet,

    /// strftime pattern for day headings.
    #[arg(long, default_value = DEFAULT_DATE_FORMAT, value_parser = parse_date_format)]
    pub date_format: String,

    /// Log cache and network activity to stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        let path = Configuration::config_file_path()
            .context("Failed to load/create configuration")?;
        let loader = ForecastLoader::new(ForecastCache::in_temp_dir(), Box::new(YrProvider::new()));

        self.run_with(&path, &loader).await
    }

    /// Load the config at `config_path`, then load and print the forecast.
    /// Returns a failure exit code after writing a placeholder config.
    pub async fn run_with(
        self,
        config_path: &Path,
        loader: &ForecastLoader,
    ) -> anyhow::Result<ExitCode> {
        let config = match Configuration::load_or_bootstrap(config_path)
            .context("Failed to load/create configuration")?
        {
            ConfigStatus::Loaded(config) => config,
            ConfigStatus::Bootstrapped(path) => {
                println!(
                    "Configuration file not found, created an example in {}..",
                    path.display()
                );
                println!(".. edit it and restart woozy");
                return Ok(ExitCode::FAILURE);
            }
        };

        let forecast = loader
            .load(&config.place, self.cache_clear)
            .await
            .with_context(|| format!("Failed to load weather for {}", config.place))?;

        let days = config.effective_days(self.days) as usize;
        let presenter = Presenter::new(self.icons, self.date_format)?;
        print!("{}", presenter.render(&forecast, days, Local::now()));

        Ok(ExitCode::SUCCESS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use std::fs;
    use woozy_core::timefmt::FEED_TIME_FORMAT;

    // Nothing listens here; tests that reach the network fail loudly.
    fn offline_loader(dir: &Path) -> ForecastLoader {
        ForecastLoader::new(
            ForecastCache::new(dir.join("forecast.xml")),
            Box::new(YrProvider::with_base_url("http://127.0.0.1:9")),
        )
    }

    fn fresh_feed() -> String {
        let now = Local::now();
        let stamp = |t: chrono::DateTime<Local>| t.format(FEED_TIME_FORMAT).to_string();
        format!(
            r#"<weatherdata>
  <location><name>Oslo</name><country>Norway</country></location>
  <meta><lastupdate>{}</lastupdate><nextupdate>{}</nextupdate></meta>
  <sun rise="{}" set="{}" />
  <forecast><tabular>
    <time from="{}" to="{}" period="2"><symbol number="4" name="Cloudy" /></time>
  </tabular></forecast>
</weatherdata>"#,
            stamp(now - TimeDelta::hours(1)),
            stamp(now + TimeDelta::hours(6)),
            stamp(now - TimeDelta::hours(2)),
            stamp(now + TimeDelta::hours(4)),
            stamp(now),
            stamp(now + TimeDelta::hours(6)),
        )
    }

    #[tokio::test]
    async fn first_run_writes_placeholder_and_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join(".woozy");
        let loader = offline_loader(dir.path());
        let cli = Cli::try_parse_from(["woozy"]).unwrap();

        let code = cli.run_with(&config_path, &loader).await.unwrap();

        assert_eq!(code, ExitCode::FAILURE);
        assert!(config_path.exists());
        assert!(!loader.cache().path().exists());
    }

    #[tokio::test]
    async fn configured_run_uses_fresh_cache() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join(".woozy");
        Configuration {
            place: "Norway/Oslo/Oslo/Oslo".to_string(),
            days: 1,
        }
        .save(&config_path)
        .unwrap();
        let loader = offline_loader(dir.path());
        loader.cache().write(fresh_feed().as_bytes()).unwrap();
        let cli = Cli::try_parse_from(["woozy"]).unwrap();

        let code = cli.run_with(&config_path, &loader).await.unwrap();

        assert_eq!(code, ExitCode::SUCCESS);
    }

    #[tokio::test]
    async fn malformed_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join(".woozy");
        fs::write(&config_path, "not json").unwrap();
        let loader = offline_loader(dir.path());
        let cli = Cli::try_parse_from(["woozy"]).unwrap();

        let err = cli.run_with(&config_path, &loader).await.unwrap_err();

        assert!(err.to_string().contains("Failed to load/create configuration"));
    }

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["woozy"]).unwrap();
        assert!(!cli.cache_clear);
        assert_eq!(cli.days, 3);
        assert_eq!(cli.icons, IconSet::Emoji);
        assert_eq!(cli.date_format, DEFAULT_DATE_FORMAT);
    }

    #[test]
    fn parses_flags() {
        let cli = Cli::try_parse_from([
            "woozy",
            "--cache-clear",
            "--days",
            "5",
            "--icons",
            "plain",
            "--date-format",
            "%A:",
        ])
        .unwrap();

        assert!(cli.cache_clear);
        assert_eq!(cli.days, 5);
        assert_eq!(cli.icons, IconSet::Plain);
        assert_eq!(cli.date_format, "%A:");
    }

    #[test]
    fn rejects_invalid_date_format() {
        assert!(Cli::try_parse_from(["woozy", "--date-format", "%Q"]).is_err());
    }

    #[test]
    fn rejects_negative_days() {
        assert!(Cli::try_parse_from(["woozy", "--days", "-1"]).is_err());
    }

    #[test]
    fn command_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
