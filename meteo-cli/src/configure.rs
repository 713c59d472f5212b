use anyhow::{Context, Result};
use inquire::{Confirm, CustomType, Text};
use meteo_core::Config;

/// Walk through every setting, prefilled with the current value, then save.
pub fn run() -> Result<()> {
    let current = Config::load()?;

    let timeout_secs = CustomType::<u64>::new("Request timeout (seconds):")
        .with_default(current.timeout_secs)
        .with_error_message("Please enter a whole number of seconds")
        .prompt()?;

    let rows = CustomType::<u32>::new("Maximum directory records per lookup:")
        .with_default(current.rows)
        .with_error_message("Please enter a whole number")
        .prompt()?;

    let skip_sentinel = Confirm::new("Skip readings MeteoSwiss marks as 'no data'?")
        .with_default(current.skip_sentinel)
        .prompt()?;

    let sentinel_time_ms = if skip_sentinel {
        CustomType::<i64>::new("'No data' timestamp (epoch milliseconds):")
            .with_default(current.sentinel_time_ms)
            .with_error_message("Please enter an integer")
            .prompt()?
    } else {
        current.sentinel_time_ms
    };

    let directory_url = Text::new("Swiss Post directory URL:")
        .with_default(&current.directory_url)
        .prompt()?;

    let weather_url = Text::new("MeteoSwiss URL:").with_default(&current.weather_url).prompt()?;

    let updated = Config {
        directory_url,
        weather_url,
        timeout_secs,
        rows,
        sentinel_time_ms,
        skip_sentinel,
    };
    updated.validate().context("Configuration not saved")?;
    updated.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}
