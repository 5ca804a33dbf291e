//! Batch command implementation
//!
//! Decodes every report of a file, or of every report file below a
//! directory, and writes one JSON line per report. Files are decoded on a
//! bounded pool of blocking tasks that share one decoder.

use crate::cli::args::BatchArgs;
use crate::cli::commands::shared::{DecodeStats, create_progress_bar, load_decoder, to_json_line};
use crate::cli::input::{discover_report_files, read_report_file};
use crate::decoder::MetarDecoder;
use crate::models::DecodedMetar;
use crate::{Error, Result};
use colored::*;
use futures::stream::{self, StreamExt};
use indicatif::HumanDuration;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::task;
use tracing::{debug, error, info, warn};

/// One output line: a decoded report and where it was read
#[derive(Debug, Serialize)]
pub struct BatchRecord<'a> {
    pub source: &'a Path,
    pub line: usize,
    pub report: &'a DecodedMetar,
}

/// Reports decoded from one file
#[derive(Debug)]
struct FileOutcome {
    path: PathBuf,
    reports: Vec<(usize, DecodedMetar)>,
}

/// Run the batch command
pub async fn run_batch(args: BatchArgs) -> Result<DecodeStats> {
    args.validate()?;

    let decoder = load_decoder(args.config_file.as_deref(), &args.config_overrides())?;
    let files = discover_report_files(&args.input_path)?;

    if files.is_empty() {
        warn!("No report files found under {}", args.input_path.display());
    }

    let writer: Box<dyn Write + Send> = match &args.output_file {
        Some(path) => Box::new(File::create(path).map_err(|e| {
            Error::io(format!("Failed to create output file {}", path.display()), e)
        })?),
        None => Box::new(std::io::stdout()),
    };

    let stats = decode_files(
        Arc::new(decoder),
        &files,
        args.worker_count(),
        args.show_progress(),
        BufWriter::new(writer),
    )
    .await?;

    if args.show_progress() {
        print_summary(&stats);
    }

    Ok(stats)
}

/// Decode report files concurrently and write JSON lines in file order
pub async fn decode_files<W: Write>(
    decoder: Arc<MetarDecoder>,
    files: &[PathBuf],
    workers: usize,
    show_progress: bool,
    mut writer: W,
) -> Result<DecodeStats> {
    let start_time = Instant::now();
    info!(
        "Decoding {} report files with {} workers",
        files.len(),
        workers
    );

    let progress_bar = (show_progress && !files.is_empty())
        .then(|| create_progress_bar(files.len() as u64, "Decoding report files..."));

    let mut outcomes = stream::iter(files.iter().cloned())
        .map(|path| {
            let decoder = Arc::clone(&decoder);
            async move {
                task::spawn_blocking(move || decode_file(&decoder, path))
                    .await
                    .map_err(|e| Error::processing_interrupted(format!("Decoding task failed: {}", e)))?
            }
        })
        .buffered(workers.max(1));

    let mut stats = DecodeStats::default();

    while let Some(outcome) = outcomes.next().await {
        let outcome = match outcome {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Failed to decode file: {:#}", e);
                if let Some(pb) = &progress_bar {
                    pb.abandon_with_message("Batch failed");
                }
                return Err(e);
            }
        };

        let mut file_stats = DecodeStats {
            files_processed: 1,
            ..DecodeStats::default()
        };
        for (line, report) in &outcome.reports {
            file_stats.record(report);
            let record = BatchRecord {
                source: &outcome.path,
                line: *line,
                report,
            };
            writeln!(writer, "{}", to_json_line(&record)?)
                .map_err(|e| Error::io("Failed to write decoded report".to_string(), e))?;
        }

        debug!(
            "Decoded {} reports from {} ({} with exceptions)",
            file_stats.reports_decoded,
            outcome.path.display(),
            file_stats.reports_with_exceptions
        );
        stats.merge(&file_stats);

        if let Some(pb) = &progress_bar {
            pb.inc(1);
            pb.set_message(format!("{} reports", stats.reports_decoded));
        }
    }

    writer
        .flush()
        .map_err(|e| Error::io("Failed to flush decoded reports".to_string(), e))?;

    if let Some(pb) = progress_bar {
        pb.finish_with_message(format!("{} reports decoded", stats.reports_decoded));
    }

    stats.processing_time = start_time.elapsed();
    info!(
        "Decoded {} reports from {} files in {:?}",
        stats.reports_decoded, stats.files_processed, stats.processing_time
    );
    Ok(stats)
}

fn decode_file(decoder: &MetarDecoder, path: PathBuf) -> Result<FileOutcome> {
    let reports = read_report_file(&path)?
        .into_iter()
        .map(|line| (line.line_number, decoder.decode(&line.text)))
        .collect();

    Ok(FileOutcome { path, reports })
}

fn print_summary(stats: &DecodeStats) {
    eprintln!();
    eprintln!("{}", "Batch summary".bright_green().bold());
    eprintln!("  {:<26}{}", "Files processed:", stats.files_processed);
    eprintln!(
        "  {:<26}{}",
        "Reports decoded:",
        stats.reports_decoded.to_string().bright_cyan()
    );
    eprintln!(
        "  {:<26}{}",
        "Reports with exceptions:",
        stats.reports_with_exceptions.to_string().yellow()
    );
    eprintln!("  {:<26}{}", "NIL reports:", stats.nil_reports);
    if stats.strict_aborts > 0 {
        eprintln!("  {:<26}{}", "Strict aborts:", stats.strict_aborts.to_string().red());
    }
    eprintln!("  {:<26}{:.1}%", "Clean reports:", stats.clean_rate());
    eprintln!(
        "  {:<26}{}",
        "Elapsed:",
        HumanDuration(stats.processing_time)
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_decode_files_writes_json_lines_in_order() {
        let temp_dir = TempDir::new().unwrap();
        let first = temp_dir.path().join("a.txt");
        let second = temp_dir.path().join("b.txt");
        fs::write(
            &first,
            "KJFK 261651Z 18010KT 10SM FEW250 24/18 A3000\n# comment\nKXYZ 261651Z NIL\n",
        )
        .unwrap();
        fs::write(&second, "KJFK 261651Z 180X10KT 10SM FEW250 24/18 A3000\n").unwrap();

        let mut output = Vec::new();
        let stats = decode_files(
            Arc::new(MetarDecoder::new()),
            &[first.clone(), second.clone()],
            2,
            false,
            &mut output,
        )
        .await
        .unwrap();

        assert_eq!(stats.files_processed, 2);
        assert_eq!(stats.reports_decoded, 3);
        assert_eq!(stats.reports_with_exceptions, 1);
        assert_eq!(stats.nil_reports, 1);

        let text = String::from_utf8(output).unwrap();
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["line"], 1);
        assert_eq!(lines[1]["line"], 3);
        assert_eq!(lines[1]["report"]["termination"], "NilExit");
        assert_eq!(lines[2]["source"], second.to_str().unwrap());
    }

    #[tokio::test]
    async fn test_decode_files_missing_file() {
        let result = decode_files(
            Arc::new(MetarDecoder::new()),
            &[PathBuf::from("/nonexistent/reports.txt")],
            1,
            false,
            std::io::sink(),
        )
        .await;

        assert!(matches!(result, Err(Error::Io { .. })));
    }
}
