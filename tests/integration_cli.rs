//! Integration tests for the command-line front end
//!
//! Commands are run in-process through their async entry points, with
//! report files and configuration written to temporary directories.

use clap::Parser;
use metar_decoder::cli::args::{Args, Commands};
use metar_decoder::cli::commands::{batch, decode};
use std::fs;
use tempfile::TempDir;

fn write_archive(temp_dir: &TempDir) {
    let day = temp_dir.path().join("2024-06-26");
    fs::create_dir_all(&day).unwrap();

    fs::write(
        day.join("kjfk.metar"),
        "# KJFK hourly\nKJFK 261651Z 18010KT 10SM FEW250 24/18 A3000\nKJFK 261751Z 180X10KT 10SM FEW250 24/18 A3000\n",
    )
    .unwrap();
    fs::write(
        temp_dir.path().join("misc.txt"),
        "KXYZ 261651Z NIL\n\nLFPG 261630Z 24008KT CAVOK 22/12 Q1015 NOSIG=\n",
    )
    .unwrap();
    fs::write(temp_dir.path().join("readme.md"), "not a report\n").unwrap();
}

#[tokio::test]
async fn test_batch_command_writes_json_lines() {
    let temp_dir = TempDir::new().unwrap();
    write_archive(&temp_dir);
    let output = temp_dir.path().join("decoded.jsonl");

    let args = Args::try_parse_from([
        "metar-decoder",
        "batch",
        "--input",
        temp_dir.path().to_str().unwrap(),
        "--output",
        output.to_str().unwrap(),
        "--workers",
        "2",
        "--quiet",
    ])
    .unwrap();
    let Some(Commands::Batch(batch_args)) = args.get_command() else {
        panic!("batch command expected");
    };

    let stats = batch::run_batch(batch_args).await.unwrap();
    assert_eq!(stats.files_processed, 2);
    assert_eq!(stats.reports_decoded, 4);
    assert_eq!(stats.reports_with_exceptions, 1);
    assert_eq!(stats.nil_reports, 1);

    let contents = fs::read_to_string(&output).unwrap();
    let records: Vec<serde_json::Value> = contents
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(records.len(), 4);
    assert!(records.iter().all(|record| record["report"]["icao"].is_string()));
}

#[tokio::test]
async fn test_batch_command_strict_flag() {
    let temp_dir = TempDir::new().unwrap();
    write_archive(&temp_dir);

    let args = Args::try_parse_from([
        "metar-decoder",
        "batch",
        "-i",
        temp_dir.path().to_str().unwrap(),
        "-o",
        temp_dir.path().join("strict.jsonl").to_str().unwrap(),
        "--strict",
        "-q",
    ])
    .unwrap();
    let Some(Commands::Batch(batch_args)) = args.get_command() else {
        panic!("batch command expected");
    };

    let stats = batch::run_batch(batch_args).await.unwrap();
    assert_eq!(stats.strict_aborts, 1);
}

#[tokio::test]
async fn test_batch_command_rejects_bad_config() {
    let temp_dir = TempDir::new().unwrap();
    write_archive(&temp_dir);
    let config = temp_dir.path().join("config.toml");
    fs::write(&config, "match_budget_ms = 0\n").unwrap();

    let args = Args::try_parse_from([
        "metar-decoder",
        "batch",
        "-i",
        temp_dir.path().to_str().unwrap(),
        "-o",
        temp_dir.path().join("out.jsonl").to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
        "-q",
    ])
    .unwrap();
    let Some(Commands::Batch(batch_args)) = args.get_command() else {
        panic!("batch command expected");
    };

    assert!(batch::run_batch(batch_args).await.is_err());
}

#[tokio::test]
async fn test_decode_command_from_file() {
    let temp_dir = TempDir::new().unwrap();
    write_archive(&temp_dir);
    let file = temp_dir.path().join("misc.txt");

    let args = Args::try_parse_from([
        "metar-decoder",
        "decode",
        "--file",
        file.to_str().unwrap(),
        "--format",
        "json",
    ])
    .unwrap();
    let Some(Commands::Decode(decode_args)) = args.get_command() else {
        panic!("decode command expected");
    };

    let stats = decode::run_decode(decode_args).await.unwrap();
    assert_eq!(stats.files_processed, 1);
    assert_eq!(stats.reports_decoded, 2);
    assert_eq!(stats.reports_with_exceptions, 0);
}
