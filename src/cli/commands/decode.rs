//! Decode command implementation
//!
//! Decodes reports given as arguments, in a file or on stdin, and prints each
//! one for humans or as JSON. Decoding exceptions are part of the output and
//! never fail the command.

use crate::Result;
use crate::cli::args::{DecodeArgs, OutputFormat};
use crate::cli::commands::shared::{DecodeStats, load_decoder, to_json_line};
use crate::cli::input::{read_report_file, read_reports, read_stdin_reports};
use crate::models::{DecodeTermination, DecodedMetar, Unit, Value, WindShear};
use colored::*;
use std::time::Instant;
use tracing::{debug, info};

/// Run the decode command
pub async fn run_decode(args: DecodeArgs) -> Result<DecodeStats> {
    let start_time = Instant::now();
    args.validate()?;

    let decoder = load_decoder(args.config_file.as_deref(), &args.config_overrides())?;
    let reports = collect_reports(&args)?;
    info!("Decoding {} reports", reports.len());

    let mut stats = DecodeStats {
        files_processed: usize::from(args.file.is_some()),
        ..DecodeStats::default()
    };

    for raw in &reports {
        let report = decoder.decode(raw);
        debug!("Decoded {:?}: {:?}", raw, report.termination);
        stats.record(&report);

        match args.format {
            OutputFormat::Human => println!("{}", format_report(&report)),
            OutputFormat::Json => println!("{}", to_json_line(&report)?),
        }
    }

    stats.processing_time = start_time.elapsed();
    Ok(stats)
}

fn collect_reports(args: &DecodeArgs) -> Result<Vec<String>> {
    if !args.reports.is_empty() {
        return read_reports(args.reports.join("\n").as_bytes());
    }

    match &args.file {
        Some(path) => Ok(read_report_file(path)?
            .into_iter()
            .map(|line| line.text)
            .collect()),
        None => read_stdin_reports(),
    }
}

fn value_or_unknown(value: Option<&Value>) -> String {
    value.map_or_else(|| "unknown".to_string(), Value::to_string)
}

fn push_line(lines: &mut Vec<String>, label: &str, text: impl AsRef<str>) {
    lines.push(format!("  {:<14}{}", format!("{}:", label).bright_white(), text.as_ref()));
}

/// Render a decoded report for the terminal
pub fn format_report(report: &DecodedMetar) -> String {
    let mut lines = Vec::new();

    let station = report.icao.as_deref().unwrap_or("????");
    let time = report.time_label().unwrap_or_else(|| "time unknown".to_string());
    let verdict = if report.is_valid() {
        "valid".green()
    } else {
        format!("{} exception(s)", report.decoding_exceptions().len()).yellow()
    };
    lines.push(format!("{}  {}  ({})", station.bright_cyan().bold(), time, verdict));
    lines.push(format!("  {}", report.raw_metar.bright_black()));

    if let Some(report_type) = &report.report_type {
        let text = if report_type.is_correction() {
            format!("{} (correction)", report_type.base_name())
        } else {
            report_type.base_name().to_string()
        };
        push_line(&mut lines, "Type", text);
    }

    if let Some(status) = &report.status {
        push_line(&mut lines, "Status", status.to_string());
    }

    if let Some(wind) = &report.surface_wind {
        let direction = if wind.variable_direction {
            "variable".to_string()
        } else {
            value_or_unknown(wind.mean_direction.as_ref())
        };
        let mut text = format!("{} at {}", direction, value_or_unknown(wind.mean_speed.as_ref()));
        if let Some(gust) = &wind.speed_variations {
            text.push_str(&format!(", gusts {}", gust));
        }
        if let Some((from, to)) = &wind.direction_variations {
            text.push_str(&format!(", varying {} to {}", from, to));
        }
        push_line(&mut lines, "Wind", text);
    }

    if let Some(visibility) = &report.visibility {
        let text = if visibility.is_cavok {
            "CAVOK".to_string()
        } else {
            let mut text = value_or_unknown(visibility.prevailing_visibility.as_ref());
            if visibility.is_unlimited {
                text.push_str(" (unlimited)");
            }
            if let Some(minimum) = &visibility.minimum_visibility {
                text.push_str(&format!(", minimum {}", minimum));
                if let Some(direction) = &visibility.minimum_visibility_direction {
                    text.push_str(&format!(" {}", direction));
                }
            }
            text
        };
        push_line(&mut lines, "Visibility", text);
    }

    for range in &report.runways_visual_range {
        let text = match (&range.visual_range, &range.visual_range_interval) {
            (Some(value), _) => value.to_string(),
            (None, Some((low, high))) => format!("{} to {}", low, high),
            (None, None) => "unknown".to_string(),
        };
        push_line(&mut lines, &format!("RVR {}", range.runway), text);
    }

    if !report.present_weather.is_empty() {
        let codes: Vec<&str> = report
            .present_weather
            .iter()
            .map(|weather| weather.raw_value.as_str())
            .collect();
        push_line(&mut lines, "Weather", codes.join(" "));
    }

    if !report.clouds.is_empty() {
        let layers: Vec<String> = report
            .clouds
            .iter()
            .map(|layer| match &layer.base_height {
                Some(height) => format!("{:?} at {}", layer.amount, height),
                None => format!("{:?}", layer.amount),
            })
            .collect();
        push_line(&mut lines, "Clouds", layers.join(", "));
    }

    if let Some(ceiling) = &report.ceiling {
        push_line(&mut lines, "Ceiling", value_or_unknown(ceiling.base_height.as_ref()));
    }

    if report.air_temperature.is_some() || report.dew_point_temperature.is_some() {
        let degrees = |value: Option<i32>| {
            value.map_or_else(|| "unknown".to_string(), |v| format!("{} {}", v, Unit::DegreeCelsius))
        };
        push_line(
            &mut lines,
            "Temperature",
            format!(
                "{}, dew point {}",
                degrees(report.air_temperature),
                degrees(report.dew_point_temperature)
            ),
        );
    }

    if let Some(pressure) = &report.pressure {
        push_line(&mut lines, "Pressure", pressure.value.to_string());
    }

    if let Some(recent) = &report.recent_weather {
        push_line(&mut lines, "Recent", recent.types().join(" "));
    }

    match &report.wind_shear {
        Some(WindShear::AllRunways) => push_line(&mut lines, "Wind shear", "all runways"),
        Some(WindShear::Runways(runways)) => push_line(&mut lines, "Wind shear", runways.join(", ")),
        None => {}
    }

    if let Some(trend) = &report.trend {
        push_line(&mut lines, "Trend", &trend.raw_value);
    }

    match report.termination {
        DecodeTermination::NilExit => lines.push(format!("  {}", "NIL report, no data".yellow())),
        DecodeTermination::StrictAbort => {
            lines.push(format!("  {}", "Strict decoding stopped early".red()))
        }
        DecodeTermination::ChainExhausted => {}
    }

    for exception in report.decoding_exceptions() {
        let marker = if exception.is_soft() { "~".yellow() } else { "!".red() };
        lines.push(format!("  {} {}", marker, exception));
    }

    lines.join("\n")
}
