//! End-to-end tests for command dispatch against a temp state file.

use std::fs;
use std::path::Path;

use clap::{CommandFactory, Parser};
use rstest::rstest;
use tempfile::TempDir;

use hva::cli::{execute, Cli, CliResult};
use hva::exitcode;
use hva::util::testing::{init_test_setup, SAMPLE_IMPORT};

fn run(state: &Path, args: &[&str]) -> CliResult<()> {
    init_test_setup();
    let mut argv = vec!["hva", "--state", state.to_str().unwrap()];
    argv.extend_from_slice(args);
    execute(&Cli::parse_from(argv))
}

fn load(state: &Path) -> hva::domain::Hotel {
    serde_json::from_str(&fs::read_to_string(state).unwrap()).unwrap()
}

#[test]
fn verify_cli() {
    Cli::command().debug_assert();
}

#[test]
fn given_new_state_when_registering_then_snapshot_holds_entities() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let state = dir.path().join("hotel.json");
    run(&state, &["new"]).unwrap();

    // Act
    run(&state, &["register", "species", "S1", "Leão"]).unwrap();
    run(&state, &["register", "habitat", "H1", "Savana", "100"]).unwrap();
    run(&state, &["register", "animal", "A1", "Simba", "S1", "H1"]).unwrap();
    run(&state, &["register", "tree", "T1", "Carvalho", "5", "2", "CADUCA", "--habitat", "H1"]).unwrap();

    // Assert
    let hotel = load(&state);
    assert_eq!(hotel.animal_satisfaction("A1").unwrap(), 120.0);
    assert_eq!(hotel.habitat("H1").unwrap().tree_count(), 1);
}

#[test]
fn given_existing_state_when_new_without_force_then_usage_error() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let state = dir.path().join("hotel.json");
    run(&state, &["new"]).unwrap();

    // Act
    let err = run(&state, &["new"]).unwrap_err();

    // Assert
    assert_eq!(err.exit_code(), exitcode::USAGE);
    run(&state, &["new", "--force"]).unwrap();
}

#[test]
fn given_import_then_season_advance_when_reloading_then_state_persists() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let state = dir.path().join("hotel.json");
    let input = dir.path().join("hotel.txt");
    fs::write(&input, SAMPLE_IMPORT).unwrap();

    // Act
    run(&state, &["import", input.to_str().unwrap()]).unwrap();
    run(&state, &["season", "advance"]).unwrap();
    run(&state, &["vaccinate", "A2", "VAC1", "V1"]).unwrap();

    // Assert
    let hotel = load(&state);
    assert_eq!(hotel.season(), hva::domain::Season::Summer);
    assert_eq!(hotel.wrong_vaccinations().len(), 1);
}

#[test]
fn given_read_only_command_when_run_then_snapshot_is_not_rewritten() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let state = dir.path().join("hotel.json");
    run(&state, &["new"]).unwrap();
    fs::write(&state, "{\"season\":\"Spring\",\"species\":{},\"habitats\":{},\"animals\":{},\"workers\":{},\"trees\":{},\"vaccines\":{},\"vaccinations\":[]}").unwrap();
    let before = fs::read_to_string(&state).unwrap();

    // Act
    run(&state, &["show", "animals"]).unwrap();
    run(&state, &["satisfaction"]).unwrap();

    // Assert
    assert_eq!(fs::read_to_string(&state).unwrap(), before);
}

#[rstest]
#[case(&["animal", "transfer", "A9", "H1"], exitcode::DATAERR)]
#[case(&["worker", "remove-responsibility", "V1", "S3"], exitcode::DATAERR)]
#[case(&["import", "/nonexistent/hva/input.txt"], exitcode::NOINPUT)]
fn given_failing_command_when_run_then_exit_code_matches(
    #[case] args: &[&str],
    #[case] expected: i32,
) {
    // Arrange
    let dir = TempDir::new().unwrap();
    let state = dir.path().join("hotel.json");
    let input = dir.path().join("hotel.txt");
    fs::write(&input, SAMPLE_IMPORT).unwrap();
    run(&state, &["import", input.to_str().unwrap()]).unwrap();

    // Act
    let err = run(&state, args).unwrap_err();

    // Assert
    assert_eq!(err.exit_code(), expected);
}

#[test]
fn given_failing_import_when_not_atomic_then_earlier_records_are_saved() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let state = dir.path().join("hotel.json");
    let input = dir.path().join("bad.txt");
    fs::write(&input, "ESPÉCIE|S1|Leão\nESPÉCIE|S1|Leoa\n").unwrap();

    // Act
    let plain = run(&state, &["import", input.to_str().unwrap()]);
    let other_state = dir.path().join("atomic.json");
    run(&other_state, &["new"]).unwrap();
    let atomic = run(&other_state, &["import", "--atomic", input.to_str().unwrap()]);

    // Assert
    assert!(plain.is_err());
    assert!(atomic.is_err());
    assert!(load(&state).species("S1").is_ok());
    assert!(load(&other_state).species("S1").is_err());
}
