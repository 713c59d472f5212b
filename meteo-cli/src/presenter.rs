//! Human-friendly rendering of resolved weather and directory records.

use chrono::{DateTime, Local};
use meteo_core::{LocationRecord, ResolvedWeather, WeatherObservation};
use unicode_width::UnicodeWidthStr;

/// Plain-text table with left-aligned, space-padded columns. Widths are terminal columns,
/// so emoji and other wide glyphs count double.
#[derive(Debug, Default)]
struct Table {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    fn new(header: &[&str]) -> Self {
        Self { header: header.iter().map(|h| h.to_string()).collect(), rows: Vec::new() }
    }

    fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    fn render(&self) -> String {
        let mut widths: Vec<usize> = self.header.iter().map(|h| h.width()).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.width());
            }
        }

        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();

        let mut out = String::new();
        out.push_str(&line(&self.header, &widths));
        out.push('\n');
        out.push_str(&line(&rule, &widths));
        out.push('\n');
        for row in &self.rows {
            out.push_str(&line(row, &widths));
            out.push('\n');
        }
        out
    }
}

fn line(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.width());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect();
    padded.join("  ").trim_end().to_string()
}

pub fn current_table(resolved: &ResolvedWeather) -> String {
    let current = resolved.current();
    let mut table = Table::new(&["Zip", "City", "Condition", "Temperature", "Updated at"]);
    table.push(vec![
        resolved.postal_code.clone(),
        resolved.location_name.clone(),
        icon_emoji(current.icon).to_string(),
        format_temperature(current.temperature_c),
        updated_at(current),
    ]);
    table.render()
}

pub fn forecast_table(resolved: &ResolvedWeather) -> String {
    let mut out = format!("{} {}\n", resolved.postal_code, resolved.location_name);
    if resolved.report.forecast.is_empty() {
        out.push_str("No forecast available.\n");
        return out;
    }

    let mut table = Table::new(&["Day", "Condition", "Min", "Max", "Precipitation"]);
    for day in &resolved.report.forecast {
        table.push(vec![
            day.day.format("%a %d.%m.").to_string(),
            icon_emoji(day.icon).to_string(),
            format_temperature(day.temperature_min_c),
            format_temperature(day.temperature_max_c),
            format!("{:.1} mm", day.precipitation_mm),
        ]);
    }
    out.push_str(&table.render());
    out
}

pub fn records_table(records: &[LocationRecord]) -> String {
    let mut table = Table::new(&["Zip", "City", "Canton", "Lat", "Lon"]);
    for record in records {
        let (lat, lon) = record
            .geo_point
            .map(|(lat, lon)| (format!("{lat:.4}"), format!("{lon:.4}")))
            .unwrap_or_default();
        table.push(vec![
            record.postal_code.clone(),
            record.name.clone(),
            record.canton.clone().unwrap_or_default(),
            lat,
            lon,
        ]);
    }
    table.render()
}

pub fn format_temperature(celsius: f64) -> String {
    format!("{celsius:.1} °C")
}

fn updated_at(observation: &WeatherObservation) -> String {
    observation
        .observation_time()
        .map(|t| DateTime::<Local>::from(t).format("%H:%M %d.%m.%Y").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// MeteoSwiss symbol code to emoji. Night variants are the day code plus 100.
pub fn icon_emoji(icon: i32) -> &'static str {
    let night = icon > 100;
    match icon % 100 {
        1 if night => "🌙",
        1 => "☀️",
        2 => "🌤️",
        3 | 4 => "⛅",
        5 | 6 | 29 | 31 | 32 => "🌦️",
        9 | 10 => "🌧️",
        12 | 13 | 23..=25 => "🌩️",
        7 | 8 | 11 | 14..=22 | 30 => "🌨️",
        26 => "🔆💨",
        27 => "🔆🌁",
        28 => "🌁",
        _ => "-",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use meteo_core::{DailyForecast, WeatherReport};

    fn resolved() -> ResolvedWeather {
        ResolvedWeather {
            postal_code: "8001".into(),
            location_name: "Zürich".into(),
            report: WeatherReport {
                current: WeatherObservation {
                    time_ms: 1_718_000_000_000,
                    temperature_c: 21.3,
                    icon: 1,
                },
                forecast: vec![DailyForecast {
                    day: NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
                    icon: 9,
                    temperature_min_c: 13.0,
                    temperature_max_c: 24.0,
                    precipitation_mm: 0.4,
                }],
            },
        }
    }

    #[test]
    fn current_table_has_header_and_values() {
        let out = current_table(&resolved());
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Zip   City    Condition"));
        assert!(lines[2].starts_with("8001  Zürich  ☀️"));
        assert!(lines[2].contains("21.3 °C"));
    }

    #[test]
    fn forecast_table_lists_days() {
        let out = forecast_table(&resolved());

        assert!(out.starts_with("8001 Zürich\n"));
        assert!(out.contains("Mon 10.06."));
        assert!(out.contains("🌧️"));
        assert!(out.contains("13.0 °C"));
        assert!(out.contains("0.4 mm"));
    }

    #[test]
    fn empty_forecast_is_reported() {
        let mut r = resolved();
        r.report.forecast.clear();

        assert!(forecast_table(&r).contains("No forecast available."));
    }

    #[test]
    fn records_table_handles_missing_metadata() {
        let records = [
            LocationRecord {
                postal_code: "3011".into(),
                name: "Bern".into(),
                canton: Some("BE".into()),
                geo_point: Some((46.948, 7.4474)),
            },
            LocationRecord {
                postal_code: "3012".into(),
                name: "Bern".into(),
                canton: None,
                geo_point: None,
            },
        ];

        let out = records_table(&records);

        assert!(out.contains("3011  Bern  BE      46.9480  7.4474"));
        assert!(out.lines().any(|l| l == "3012  Bern"));
    }

    #[test]
    fn wide_icons_keep_columns_aligned() {
        let mut r = resolved();
        r.report.forecast = [3, 0, 4]
            .into_iter()
            .map(|icon| DailyForecast {
                day: NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
                icon,
                temperature_min_c: 13.0,
                temperature_max_c: 24.0,
                precipitation_mm: 0.4,
            })
            .collect();

        let out = forecast_table(&r);
        let offsets: Vec<usize> = out
            .lines()
            .filter_map(|l| l.find("°C").map(|i| l[..i].width()))
            .collect();

        assert_eq!(offsets.len(), 3);
        assert!(offsets.iter().all(|o| *o == offsets[0]), "{offsets:?}\n{out}");
    }

    #[test]
    fn night_icons_map_like_day_icons() {
        assert_eq!(icon_emoji(1), "☀️");
        assert_eq!(icon_emoji(101), "🌙");
        assert_eq!(icon_emoji(105), icon_emoji(5));
        assert_eq!(icon_emoji(0), "-");
        assert_eq!(icon_emoji(99), "-");
    }

    #[test]
    fn temperature_has_one_decimal() {
        assert_eq!(format_temperature(-3.0), "-3.0 °C");
        assert_eq!(format_temperature(21.26), "21.3 °C");
    }
}
