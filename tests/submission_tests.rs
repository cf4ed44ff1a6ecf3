mod common;

use std::fs;

use common::{advance, temp_base};
use setup_wizard::{
    config::{Config, ConfigManager, SubmissionTarget},
    schema::StepInput,
    services::{DirectorySubmitter, Submitter},
    wizard::{FinishedAggregate, StepId, StepOutcome, WizardController},
};

fn finish(wizard: &mut WizardController) -> FinishedAggregate {
    advance(wizard);
    match wizard
        .submit_step(StepId::LinkAccounts, StepInput::LinkAccounts(Vec::new()))
        .unwrap()
    {
        StepOutcome::Completed { aggregate, delivered } => {
            assert!(delivered);
            aggregate
        }
        other => panic!("expected completion, got {:?}", other),
    }
}

#[test]
fn directory_target_writes_the_aggregate_as_json() {
    let out = temp_base().join("submissions");
    let config = Config {
        submission: SubmissionTarget::Directory(out.clone()),
        ..Config::default()
    };
    let mut wizard = WizardController::new(config.submission.submitter());
    let aggregate = finish(&mut wizard);

    let files: Vec<_> = fs::read_dir(&out)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    assert_eq!(files.len(), 1);
    let name = files[0].file_name().unwrap().to_string_lossy().into_owned();
    assert!(
        name.starts_with("onboarding_") && name.ends_with(".json"),
        "{name}"
    );

    let stored: FinishedAggregate =
        serde_json::from_str(&fs::read_to_string(&files[0]).unwrap()).unwrap();
    assert_eq!(stored, aggregate);
}

#[test]
fn same_second_submissions_do_not_overwrite() {
    let out = temp_base();
    let mut first = WizardController::default();
    let aggregate = finish(&mut first);

    let mut submitter = DirectorySubmitter::new(out.clone());
    submitter.submit(&aggregate).unwrap();
    submitter.submit(&aggregate).unwrap();

    let written = submitter.written();
    assert_eq!(written.len(), 2);
    assert_ne!(written[0], written[1]);
    assert!(written.iter().all(|path| path.exists()));
}

#[test]
fn config_round_trips_submission_target() {
    let base = temp_base();
    let manager = ConfigManager::with_base_dir(base.clone()).unwrap();
    let config = Config {
        submission: SubmissionTarget::Directory(base.join("out")),
        ..Config::default()
    };
    manager.save(&config).unwrap();

    let raw = fs::read_to_string(manager.path()).unwrap();
    assert!(raw.contains("\"directory\""), "{raw}");
    assert_eq!(manager.load().unwrap(), config);
}
