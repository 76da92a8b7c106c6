use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Text};

use skycast_core::{
    Config, HistoryStore, SearchCounter, SearchHistory, WeatherService, provider_from_config,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Weather reports with advisories")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key.
    Configure,

    /// Show the weather report for a city name or "lat,lon" coordinate pair.
    Show {
        /// City name (e.g. "London") or coordinates (e.g. "-6.2,106.8").
        query: String,
    },

    /// Interactive session: repeated queries with search history.
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { query } => show(&query).await,
            Command::Interactive => interactive().await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let mut config = Config::load()?;
    config.set_api_key(api_key);
    config.save()?;

    println!("API key saved to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show(query: &str) -> anyhow::Result<()> {
    let config = Config::load()?;
    let service = WeatherService::new(provider_from_config(&config)?);

    // One-shot invocation: the session stores live and die with this call.
    let mut history = SearchHistory::new();
    let mut counter = SearchCounter::new();

    match service.query(query, &mut history, &mut counter).await {
        Ok(report) => print!("{}", render::report(&report)),
        Err(err) => println!("{}", err.user_message()),
    }

    Ok(())
}

async fn interactive() -> anyhow::Result<()> {
    let config = Config::load()?;
    let service = WeatherService::new(provider_from_config(&config)?);

    let mut history = SearchHistory::new();
    let mut counter = SearchCounter::new();

    loop {
        let input = Text::new("City or coordinates (lat,lon):")
            .with_help_message("Press enter on an empty line to quit")
            .prompt()
            .context("Failed to read query")?;

        if input.trim().is_empty() {
            break;
        }

        match service.query(&input, &mut history, &mut counter).await {
            Ok(report) => print!("{}", render::report(&report)),
            Err(err) => println!("{}", err.user_message()),
        }

        if !history.entries().is_empty() {
            println!("Recent searches: {}", history.entries().join(", "));
        }
        println!();
    }

    let top = counter.top(5);
    if !top.is_empty() {
        println!("Most searched this session:");
        for (city, count) in top {
            println!("  {city}: {count}");
        }
    }

    Ok(())
}
