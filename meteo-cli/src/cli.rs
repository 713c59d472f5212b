use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use meteo_core::{
    Config, Criterion, Error, ErrorKind, LocationQuery, ResolvedWeather, Resolver,
    resolver_from_config,
};

use crate::{configure, logger, presenter};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "meteo", version, about = "Current Swiss weather by postal code or city name")]
pub struct Cli {
    /// Verbose logging on stderr.
    #[arg(long, global = true)]
    pub debug: bool,

    /// Per-request timeout in seconds, overriding the configured value.
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show current weather for a location.
    Current(LocationArgs),

    /// Show the daily forecast for a location.
    Forecast(LocationArgs),

    /// List postal-code directory entries by code or by name.
    Lookup {
        /// What to match on: "code" or "name".
        #[arg(value_parser = parse_criterion)]
        by: Criterion,

        /// Postal code or city name, as written in the directory.
        value: String,
    },

    /// Interactively edit endpoints, timeout and the "no data" sentinel.
    Configure,
}

#[derive(Debug, Clone, Args)]
#[group(required = true, multiple = false)]
pub struct LocationArgs {
    /// Postal code or city name; digits-only input is treated as a postal code.
    pub location: Option<String>,

    /// Postal code of the location, e.g. 8000.
    #[arg(long)]
    pub zip: Option<String>,

    /// City name, e.g. Zürich.
    #[arg(long)]
    pub city: Option<String>,
}

impl LocationArgs {
    pub fn query(&self) -> Result<LocationQuery, Error> {
        match (&self.zip, &self.city, &self.location) {
            (Some(zip), _, _) => Ok(LocationQuery::PostalCode(zip.trim().to_string())),
            (_, Some(city), _) => Ok(LocationQuery::CityName(city.trim().to_string())),
            (_, _, Some(location)) => LocationQuery::detect(location),
            (None, None, None) => {
                Err(Error::InvalidLocation("please provide a postal code or a city name".into()))
            }
        }
    }
}

fn parse_criterion(value: &str) -> Result<Criterion, String> {
    Criterion::try_from(value).map_err(|e| e.to_string())
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        let Cli { debug, timeout, command } = self;
        logger::init(debug)?;

        match command {
            Command::Configure => {
                configure::run()?;
                Ok(ExitCode::SUCCESS)
            }
            Command::Current(args) => {
                let resolver = build_resolver(timeout)?;
                show(&resolver, &args, |resolved| print!("{}", presenter::current_table(resolved)))
                    .await
            }
            Command::Forecast(args) => {
                let resolver = build_resolver(timeout)?;
                show(&resolver, &args, |resolved| print!("{}", presenter::forecast_table(resolved)))
                    .await
            }
            Command::Lookup { by, value } => {
                let resolver = build_resolver(timeout)?;
                match resolver.directory().lookup(by, &value).await {
                    Ok(records) if records.is_empty() => {
                        eprintln!("No directory entries for {by} '{value}'.");
                        Ok(ExitCode::from(exit_status(&Error::LocationNotFound(value))))
                    }
                    Ok(records) => {
                        print!("{}", presenter::records_table(&records));
                        Ok(ExitCode::SUCCESS)
                    }
                    Err(err) => Ok(report(&err)),
                }
            }
        }
    }
}

fn build_resolver(timeout: Option<u64>) -> anyhow::Result<Resolver> {
    let mut config = Config::load()?;
    if let Some(timeout) = timeout {
        config.timeout_secs = timeout;
    }
    resolver_from_config(&config)
}

async fn show(
    resolver: &Resolver,
    args: &LocationArgs,
    render: impl FnOnce(&ResolvedWeather),
) -> anyhow::Result<ExitCode> {
    let resolved = match args.query() {
        Ok(query) => resolver.resolve(&query).await,
        Err(err) => Err(err),
    };

    match resolved {
        Ok(resolved) => {
            render(&resolved);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => Ok(report(&err)),
    }
}

/// Print a message that tells bad input apart from provider trouble, and pick the exit code.
fn report(err: &Error) -> ExitCode {
    match err {
        Error::InvalidLocation(msg) => {
            eprintln!("Invalid location: {msg}.");
            eprintln!("Hint: use a 4-digit Swiss postal code (e.g. 8000) or a city name.");
        }
        Error::LocationNotFound(name) => {
            eprintln!("No location named '{name}' found.");
            eprintln!("Hint: names are matched as the directory writes them, e.g. 'Zürich'.");
        }
        Error::Upstream(source) => {
            eprintln!("Weather or directory service unavailable, try again later.");
            eprintln!("Cause: {source:#}");
        }
        Error::NoObservationAvailable { location, tried } => {
            eprintln!("MeteoSwiss has no current observation for '{location}'.");
            eprintln!("Postal codes tried: {}", tried.join(", "));
        }
    }
    ExitCode::from(exit_status(err))
}

/// 2: bad input, 3: provider trouble, 4: no reading. Anything else exits with 1.
fn exit_status(err: &Error) -> u8 {
    match err.kind() {
        kind if kind.is_bad_input() => 2,
        ErrorKind::Upstream => 3,
        ErrorKind::NoObservationAvailable => 4,
        _ => 1,
    }
}
