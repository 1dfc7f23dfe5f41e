//! Integration tests for operation dispatch and exit codes.

use chrono::NaiveDate;
use rstest::rstest;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::tempdir;

use pdfvalidate::config::{OutputFormat, ValidateArgs};
use pdfvalidate::dispatch::{Dispatcher, Operation};
use pdfvalidate::error::ToolError;
use pdfvalidate::settings::Settings;
use pdfvalidate::update::{StateStore, UpdateAdvisor};

use crate::common::{
    CountingRegistry, MissingEngine, RegistryReply, StubEngine, write_descriptor, write_pdf,
};

fn settings(dir: &Path) -> Settings {
    Settings {
        descriptor_path: dir.join("config.json"),
        state_path: dir.join(".local_data.json"),
        update_check: false,
        ..Settings::with_resource_dir(dir)
    }
}

fn dispatcher(dir: &Path, engine: StubEngine) -> Dispatcher {
    Dispatcher::new(settings(dir)).with_engine(Arc::new(engine))
}

#[rstest]
#[case(0)]
#[case(1)]
#[tokio::test]
async fn test_engine_status_is_exit_code(#[case] status: i32) {
    let dir = tempdir().unwrap();
    let args = ValidateArgs {
        input: write_pdf(dir.path(), "doc.pdf"),
        output: Some(dir.path().join("report.xml")),
        ..Default::default()
    };

    let code = dispatcher(dir.path(), StubEngine::exiting(status))
        .dispatch(Operation::Validate(args))
        .await;

    assert_eq!(code, status);
}

#[rstest]
#[case::missing_input("missing.pdf", None, OutputFormat::Text, 11)]
#[case::not_pdf("doc.txt", None, OutputFormat::Text, 12)]
#[case::xml_without_output("doc.pdf", None, OutputFormat::Xml, 13)]
#[case::xml_wrong_extension("doc.pdf", Some("report.html"), OutputFormat::Xml, 13)]
#[case::html_without_output("doc.pdf", None, OutputFormat::Html, 14)]
#[case::html_wrong_extension("doc.pdf", Some("report.xml"), OutputFormat::Html, 14)]
#[tokio::test]
async fn test_argument_errors(
    #[case] input: &str,
    #[case] output: Option<&str>,
    #[case] format: OutputFormat,
    #[case] expected: i32,
) {
    let dir = tempdir().unwrap();
    write_pdf(dir.path(), "doc.pdf");
    std::fs::write(dir.path().join("doc.txt"), b"plain text").unwrap();

    let engine = StubEngine::exiting(0);
    let args = ValidateArgs {
        input: dir.path().join(input),
        output: output.map(|name| dir.path().join(name)),
        format: Some(format),
        ..Default::default()
    };

    let dispatcher = Dispatcher::new(settings(dir.path()));
    let engine = Arc::new(engine);
    let code = dispatcher
        .with_engine(engine.clone())
        .dispatch(Operation::Validate(args))
        .await;

    assert_eq!(code, expected);
    assert!(engine.invocations().is_empty(), "engine must not run");
}

#[tokio::test]
async fn test_engine_failure_exit_code() {
    let dir = tempdir().unwrap();
    let args = ValidateArgs {
        input: write_pdf(dir.path(), "doc.pdf"),
        format: Some(OutputFormat::Json),
        ..Default::default()
    };

    let code = Dispatcher::new(settings(dir.path()))
        .with_engine(Arc::new(MissingEngine))
        .dispatch(Operation::Validate(args.clone()))
        .await;
    assert_eq!(code, 30);

    let code = dispatcher(dir.path(), StubEngine::exiting(3))
        .dispatch(Operation::Validate(args))
        .await;
    assert_eq!(code, 30);
}

#[tokio::test]
async fn test_config_export_to_file() {
    let dir = tempdir().unwrap();
    let descriptor = "{\n  \"version\": \"v1.2.0\",\n  \"name\": \"veraPDF validation\"\n}\n";
    write_descriptor(dir.path(), descriptor);
    let output = dir.path().join("exported.json");

    let code = dispatcher(dir.path(), StubEngine::exiting(0))
        .dispatch(Operation::Config {
            output: Some(output.clone()),
        })
        .await;

    assert_eq!(code, 0);
    assert_eq!(std::fs::read_to_string(&output).unwrap(), descriptor);
}

#[tokio::test]
async fn test_config_missing_descriptor() {
    let dir = tempdir().unwrap();

    let err = dispatcher(dir.path(), StubEngine::exiting(0))
        .execute(Operation::Config { output: None })
        .await
        .unwrap_err();

    assert!(matches!(err, ToolError::Internal { .. }));
    assert_eq!(err.exit_code(), 2);
}

#[tokio::test]
async fn test_advisory_does_not_change_exit_code() {
    let dir = tempdir().unwrap();
    write_descriptor(dir.path(), r#"{"version": "v1.0.0"}"#);
    let registry = Arc::new(CountingRegistry::new(RegistryReply::Unreachable));
    let advisor = UpdateAdvisor::new(
        registry.clone(),
        StateStore::new(dir.path().join(".local_data.json")),
        dir.path().join("config.json"),
    )
    .with_today(NaiveDate::from_ymd_opt(2025, 6, 14).unwrap());

    let args = ValidateArgs {
        input: write_pdf(dir.path(), "doc.pdf"),
        output: Some(dir.path().join("report.xml")),
        ..Default::default()
    };

    let code = dispatcher(dir.path(), StubEngine::exiting(1))
        .with_advisor(Some(advisor))
        .dispatch(Operation::Validate(args))
        .await;

    assert_eq!(code, 1);
    // Joined before dispatch returns.
    assert_eq!(registry.calls(), 1);
    assert!(dir.path().join(".local_data.json").exists());
}

#[tokio::test]
async fn test_advisory_runs_alongside_argument_errors() {
    let dir = tempdir().unwrap();
    let registry = Arc::new(CountingRegistry::new(RegistryReply::NoTags));
    let advisor = UpdateAdvisor::new(
        registry.clone(),
        StateStore::new(dir.path().join(".local_data.json")),
        dir.path().join("config.json"),
    );

    let code = dispatcher(dir.path(), StubEngine::exiting(0))
        .with_advisor(Some(advisor))
        .dispatch(Operation::Validate(ValidateArgs {
            input: PathBuf::from("/nonexistent/input.pdf"),
            ..Default::default()
        }))
        .await;

    assert_eq!(code, 11);
    assert_eq!(registry.calls(), 1);
}
