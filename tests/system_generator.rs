use std::fs;

use parallel_perf::system_gen::{SystemGenerator, read_system};
use parallel_perf::utils::{config::GeneratorConfig, error::PerfError};
use tempfile::TempDir;

#[test]
fn default_size_writes_thousand_rows_of_thousand_and_one_values() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("input.txt");
    let config = GeneratorConfig::default().with_output(&path).with_seed(2024);

    let stats = SystemGenerator::new(config).unwrap().generate().unwrap();
    assert_eq!((stats.rows, stats.columns), (1000, 1001));

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.ends_with('\n'));

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 1000);
    for line in &lines {
        let tokens: Vec<&str> = line.split(' ').collect();
        assert_eq!(tokens.len(), 1001);
        for token in tokens {
            let value: f64 = token.parse().unwrap();
            assert!((1.0..=10.0).contains(&value), "{value} out of range");
            assert_eq!(token.split_once('.').map(|(_, f)| f.len()), Some(2), "{token}");
        }
    }

    let system = read_system(&path).unwrap();
    assert_eq!(system.size, 1000);
    assert_eq!(system.constants.len(), 1000);
    assert!(system.coefficients.iter().all(|row| row.len() == 1000));
    assert!(system.within(1.0, 10.0));
}

#[test]
fn seeded_runs_are_reproducible_and_overwrite() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("system.txt");
    fs::write(&path, "stale contents that must disappear\n").unwrap();

    let config = GeneratorConfig::default().with_size(16).with_output(&path).with_seed(9);

    SystemGenerator::new(config.clone()).unwrap().generate().unwrap();
    let first = fs::read_to_string(&path).unwrap();
    SystemGenerator::new(config).unwrap().generate().unwrap();
    let second = fs::read_to_string(&path).unwrap();

    assert_eq!(first, second);
    assert!(!first.contains("stale"));
    assert_eq!(first.lines().count(), 16);
}

#[test]
fn size_one_system_has_two_values() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tiny.txt");
    let config = GeneratorConfig::default().with_size(1).with_output(&path);

    SystemGenerator::new(config).unwrap().generate().unwrap();
    let system = read_system(&path).unwrap();
    assert_eq!(system.size, 1);
    assert_eq!(system.coefficients[0].len(), 1);
}

#[test]
fn unwritable_destination_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing-dir").join("input.txt");
    let config = GeneratorConfig::default().with_size(2).with_output(&path);

    let err = SystemGenerator::new(config).unwrap().generate().unwrap_err();
    assert!(matches!(err, PerfError::Io { .. }));
}
