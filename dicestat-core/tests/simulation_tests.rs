// dicestat-core/tests/simulation_tests.rs
use std::io::Write;

use anyhow::Result;
use tempfile::{tempdir, NamedTempFile};
use test_log::test;

use dicestat_core::{
    analyze_stored, run_simulation, run_with_die, CriticalValuePolicy, DiceError, Die,
    FrequencyTable, PersistenceMode, SimulationRequest, SimulatorConfig,
};

fn config_in(dir: &std::path::Path, mode: PersistenceMode) -> SimulatorConfig {
    SimulatorConfig {
        output_dir: dir.to_path_buf(),
        persistence: mode,
        ..SimulatorConfig::default()
    }
}

#[test]
fn test_sequence_pipeline_writes_and_reloads() -> Result<()> {
    let dir = tempdir()?;
    let config = config_in(dir.path(), PersistenceMode::Sequence);
    let request = SimulationRequest { sides: 6, rolls: 120, seed: Some(11) };

    let outcome = run_simulation(&request, &config)?;

    assert!(outcome.saved_to().exists());
    let name = outcome.saved_to().file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("d6_rolls_") && name.ends_with(".csv"), "{}", name);

    assert_eq!(outcome.rolls.len(), 120);
    assert_eq!(outcome.report.frequencies.total(), 120);
    assert_eq!(
        outcome.report.frequencies,
        FrequencyTable::from_rolls(&outcome.rolls)
    );
    let summary = outcome.report.summary.expect("simulations carry a summary");
    assert_eq!(summary.total, 120);
    assert!(summary.min >= 1 && summary.max <= 6);
    assert_eq!(outcome.report.deviations.len(), 6);
    Ok(())
}

#[test]
fn test_frequency_pipeline_writes_frequency_file() -> Result<()> {
    let dir = tempdir()?;
    let config = config_in(dir.path(), PersistenceMode::Frequency);
    let request = SimulationRequest { sides: 20, rolls: 400, seed: Some(3) };

    let outcome = run_simulation(&request, &config)?;

    let name = outcome.saved_to().file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("d20_frequencies_"), "{}", name);
    assert_eq!(outcome.mode, PersistenceMode::Frequency);
    assert_eq!(outcome.report.frequencies.sides(), 20);
    assert_eq!(outcome.report.frequencies.total(), 400);
    Ok(())
}

#[test]
fn test_seeded_runs_are_reproducible() -> Result<()> {
    let a_dir = tempdir()?;
    let b_dir = tempdir()?;
    let request = SimulationRequest { sides: 12, rolls: 50, seed: Some(1234) };

    let a = run_simulation(&request, &config_in(a_dir.path(), PersistenceMode::Sequence))?;
    let b = run_simulation(&request, &config_in(b_dir.path(), PersistenceMode::Sequence))?;

    assert_eq!(a.rolls, b.rolls);
    assert_eq!(a.report.chi_squared, b.report.chi_squared);
    Ok(())
}

#[test]
fn test_single_roll_run() -> Result<()> {
    let dir = tempdir()?;
    let mut die = Die::seeded(4, 5)?;
    let outcome = run_with_die(&mut die, 1, &config_in(dir.path(), PersistenceMode::Sequence))?;

    let value = outcome.rolls.values()[0];
    let summary = outcome.report.summary.unwrap();
    assert_eq!(summary.min, value);
    assert_eq!(summary.max, value);
    assert_eq!(summary.mode, value);
    assert!((summary.mean - value as f64).abs() < f64::EPSILON);
    Ok(())
}

#[test]
fn test_invalid_requests_are_rejected() {
    let dir = tempdir().unwrap();
    let config = config_in(dir.path(), PersistenceMode::Sequence);

    let zero_sides = SimulationRequest { sides: 0, rolls: 5, seed: None };
    assert!(matches!(
        run_simulation(&zero_sides, &config),
        Err(DiceError::InvalidConfiguration(_))
    ));

    let zero_rolls = SimulationRequest { sides: 6, rolls: 0, seed: None };
    assert!(matches!(
        run_simulation(&zero_rolls, &config),
        Err(DiceError::InvalidConfiguration(_))
    ));
}

#[test]
fn test_analyze_biased_frequency_file() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    file.write_all(b"Face,Frequency\n1,6\n2,0\n3,0\n4,0\n5,0\n6,0\n")?;

    let report = analyze_stored(file.path(), None, None, CriticalValuePolicy::Fixed)?;

    assert!(report.summary.is_none());
    assert!((report.chi_squared.statistic - 30.0).abs() < 1e-9);
    assert!(report.chi_squared.is_biased);
    assert!((report.deviations[3].percent + 100.0).abs() < 1e-9);
    Ok(())
}

#[test]
fn test_analyze_fair_frequency_file() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    file.write_all(b"Face,Frequency\n1,1\n2,1\n3,1\n4,1\n5,1\n6,1\n")?;

    let report = analyze_stored(
        file.path(),
        Some(PersistenceMode::Frequency),
        Some(6),
        CriticalValuePolicy::Fixed,
    )?;
    assert_eq!(report.chi_squared.statistic, 0.0);
    assert!(!report.chi_squared.is_biased);
    Ok(())
}

#[test]
fn test_analyze_sequence_file_needs_sides() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    file.write_all(b"Roll #,Result\n1,2\n2,2\n3,5\n")?;

    assert!(matches!(
        analyze_stored(file.path(), None, None, CriticalValuePolicy::Fixed),
        Err(DiceError::InvalidConfiguration(_))
    ));

    let report = analyze_stored(file.path(), None, Some(6), CriticalValuePolicy::Fixed)?;
    let summary = report.summary.unwrap();
    assert_eq!(summary.mode, 2);
    assert_eq!(summary.total, 3);
    assert_eq!(report.frequencies.counts(), &[0, 2, 0, 0, 1, 0]);
    Ok(())
}

#[test]
fn test_analyze_rejects_mismatched_sides() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    file.write_all(b"Face,Frequency\n1,1\n2,1\n")?;
    assert!(matches!(
        analyze_stored(file.path(), None, Some(6), CriticalValuePolicy::Fixed),
        Err(DiceError::InvalidConfiguration(_))
    ));
    Ok(())
}

#[test]
fn test_analyze_rejects_all_zero_frequency_file() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    file.write_all(b"Face,Frequency\n1,0\n2,0\n3,0\n4,0\n5,0\n6,0\n")?;

    for policy in [CriticalValuePolicy::Fixed, CriticalValuePolicy::DegreesOfFreedom] {
        assert!(matches!(
            analyze_stored(file.path(), None, None, policy),
            Err(DiceError::MalformedInput(_))
        ));
    }
    Ok(())
}

#[test]
fn test_config_file_controls_pipeline() -> Result<()> {
    let dir = tempdir()?;
    let out_dir = dir.path().join("results");
    let config_path = dir.path().join("dicestat.yaml");
    std::fs::write(
        &config_path,
        format!(
            "output_dir: {:?}\npersistence: frequency\ncritical_value: degrees-of-freedom\n",
            out_dir
        ),
    )?;

    let config = SimulatorConfig::load_from_file(&config_path)?;
    assert_eq!(config.critical_value, CriticalValuePolicy::DegreesOfFreedom);

    let outcome = run_simulation(
        &SimulationRequest { sides: 6, rolls: 60, seed: Some(8) },
        &config,
    )?;
    assert!(outcome.saved_to().starts_with(&out_dir));
    assert_eq!(outcome.report.chi_squared.critical_value, Some(11.070));
    Ok(())
}
