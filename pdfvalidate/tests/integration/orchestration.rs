//! Integration tests for engine orchestration and report routing.

use rstest::rstest;
use std::sync::Arc;
use tempfile::tempdir;

use pdfvalidate::config::{OutputFormat, ValidateArgs, ValidationRequest};
use pdfvalidate::engine::{Orchestrator, Outcome};
use pdfvalidate::error::ToolError;
use pdfvalidate::validation::RequestValidator;

use crate::common::{MissingEngine, StubEngine, write_pdf};

fn validated(args: ValidateArgs) -> ValidationRequest {
    RequestValidator::new()
        .validate(args)
        .expect("request should validate")
}

#[rstest]
#[case(0, Outcome::Compliant)]
#[case(1, Outcome::NonCompliant)]
#[tokio::test]
async fn test_engine_status_passes_through(#[case] status: i32, #[case] expected: Outcome) {
    let dir = tempdir().unwrap();
    let request = validated(ValidateArgs {
        input: write_pdf(dir.path(), "doc.pdf"),
        format: Some(OutputFormat::Text),
        ..Default::default()
    });

    let orchestrator = Orchestrator::new(Arc::new(StubEngine::exiting(status)));

    let result = orchestrator.execute(&request).await.unwrap();
    assert_eq!(result.outcome, expected);
    assert_eq!(result.exit_code(), status);

    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let code = orchestrator
        .run_with(&request, &mut stdout, &mut stderr)
        .await
        .unwrap();
    assert_eq!(code, status);
}

#[tokio::test]
async fn test_report_written_to_output_file() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("report.xml");
    std::fs::write(&output, b"stale report that is much longer than the new one").unwrap();

    let report = b"<?xml version=\"1.0\"?>\n<report compliant=\"false\"/>\n";
    let engine = Arc::new(StubEngine::new(Some(1), report, b""));
    let request = validated(ValidateArgs {
        input: write_pdf(dir.path(), "doc.pdf"),
        output: Some(output.clone()),
        format: Some(OutputFormat::Xml),
        ..Default::default()
    });

    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let code = Orchestrator::new(engine)
        .run_with(&request, &mut stdout, &mut stderr)
        .await
        .unwrap();

    assert_eq!(code, 1);
    assert_eq!(std::fs::read(&output).unwrap(), report);
    assert!(stdout.is_empty(), "report must not reach stdout");
    assert!(stderr.is_empty());
}

#[tokio::test]
async fn test_report_written_to_stdout() {
    let dir = tempdir().unwrap();
    let report = b"{\"compliant\": true}\n\x00\xff";
    let engine = Arc::new(StubEngine::new(Some(0), report, b"engine warning"));
    let request = validated(ValidateArgs {
        input: write_pdf(dir.path(), "doc.pdf"),
        format: Some(OutputFormat::Json),
        ..Default::default()
    });

    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let code = Orchestrator::new(engine)
        .run_with(&request, &mut stdout, &mut stderr)
        .await
        .unwrap();

    assert_eq!(code, 0);
    assert_eq!(stdout, report);
    assert_eq!(stderr, b"engine warning\n");
}

#[rstest]
#[case(Some(3))]
#[case(Some(-1))]
#[case(None)]
#[tokio::test]
async fn test_unexpected_status_is_validation_failure(#[case] status: Option<i32>) {
    let dir = tempdir().unwrap();
    let engine = Arc::new(StubEngine::new(status, b"partial", b"java.lang.OutOfMemoryError"));
    let request = validated(ValidateArgs {
        input: write_pdf(dir.path(), "doc.pdf"),
        format: Some(OutputFormat::Text),
        ..Default::default()
    });

    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let err = Orchestrator::new(engine)
        .run_with(&request, &mut stdout, &mut stderr)
        .await
        .unwrap_err();

    assert!(matches!(err, ToolError::ValidationFailed { .. }));
    assert_eq!(err.exit_code(), 30);
    assert_eq!(stdout, b"partial");
    assert_eq!(stderr, b"java.lang.OutOfMemoryError\n");
}

#[tokio::test]
async fn test_diagnostics_forwarded_when_report_unwritable() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("missing-dir").join("report.xml");
    let engine = Arc::new(StubEngine::new(Some(1), b"<report/>", b"engine warning"));
    let request = validated(ValidateArgs {
        input: write_pdf(dir.path(), "doc.pdf"),
        output: Some(output.clone()),
        format: Some(OutputFormat::Xml),
        ..Default::default()
    });

    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let err = Orchestrator::new(engine)
        .run_with(&request, &mut stdout, &mut stderr)
        .await
        .unwrap_err();

    assert_eq!(err.exit_code(), 30);
    assert!(err.detail().unwrap().contains("report.xml"));
    assert_eq!(stderr, b"engine warning\n");
    assert!(stdout.is_empty());
    assert!(!output.exists());
}

#[tokio::test]
async fn test_engine_spawn_failure() {
    let dir = tempdir().unwrap();
    let request = validated(ValidateArgs {
        input: write_pdf(dir.path(), "doc.pdf"),
        format: Some(OutputFormat::Raw),
        ..Default::default()
    });

    let err = Orchestrator::new(Arc::new(MissingEngine))
        .execute(&request)
        .await
        .unwrap_err();

    assert_eq!(err.exit_code(), 30);
    let detail = err.detail().unwrap();
    assert!(detail.contains("missing-engine"), "detail: {detail}");
}

#[tokio::test]
async fn test_engine_receives_request_flags() {
    let dir = tempdir().unwrap();
    let input = write_pdf(dir.path(), "doc.pdf");
    let profile = dir.path().join("profile.xml");
    std::fs::write(&profile, b"<profile/>").unwrap();

    let engine = Arc::new(StubEngine::exiting(0));
    let request = validated(ValidateArgs {
        input: input.clone(),
        output: Some(dir.path().join("out.html")),
        format: Some(OutputFormat::Html),
        profile: Some(profile.clone()),
        flavour: Some("ua1".to_string()),
        max_failures: Some(100),
        max_failures_displayed: Some(5),
        show_passes: true,
    });

    Orchestrator::new(engine.clone())
        .execute(&request)
        .await
        .unwrap();

    let invocations = engine.invocations();
    assert_eq!(invocations.len(), 1);
    let invocation = &invocations[0];

    assert_eq!(invocation.flag_value("--format").unwrap(), "html");
    assert_eq!(invocation.flag_value("--flavour").unwrap(), "ua1");
    assert_eq!(invocation.flag_value("--maxfailures").unwrap(), "100");
    assert_eq!(invocation.flag_value("--maxfailuresdisplayed").unwrap(), "5");
    assert_eq!(
        invocation.flag_value("--profile").unwrap(),
        profile.as_os_str()
    );
    assert!(invocation.has_flag("--pass"));
    assert_eq!(
        invocation.args().last().unwrap().as_os_str(),
        input.as_os_str()
    );
}

#[cfg(unix)]
mod process {
    use super::*;
    use pdfvalidate::engine::ProcessEngine;
    use pdfvalidate::settings::EngineSettings;

    use crate::common::engine_script;

    #[rstest]
    #[case(0, 0)]
    #[case(1, 1)]
    #[tokio::test]
    async fn test_process_engine_exit_codes(#[case] status: i32, #[case] expected: i32) {
        let dir = tempdir().unwrap();
        let script = engine_script(
            dir.path(),
            &format!("printf 'report for %s' \"$#\"\necho 'checked' >&2\nexit {status}"),
        );
        let request = validated(ValidateArgs {
            input: write_pdf(dir.path(), "doc.pdf"),
            format: Some(OutputFormat::Text),
            ..Default::default()
        });

        let engine = Arc::new(ProcessEngine::new(&EngineSettings::program(&script)));
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let code = Orchestrator::new(engine)
            .run_with(&request, &mut stdout, &mut stderr)
            .await
            .unwrap();

        assert_eq!(code, expected);
        // --maxfailures N --maxfailuresdisplayed N --format text <input>
        assert_eq!(stdout, b"report for 7");
        assert_eq!(stderr, b"checked\n");
    }

    #[tokio::test]
    async fn test_process_engine_unexpected_exit() {
        let dir = tempdir().unwrap();
        let script = engine_script(dir.path(), "exit 3");
        let request = validated(ValidateArgs {
            input: write_pdf(dir.path(), "doc.pdf"),
            format: Some(OutputFormat::Text),
            ..Default::default()
        });

        let engine = Arc::new(ProcessEngine::new(&EngineSettings::program(&script)));
        let err = Orchestrator::new(engine)
            .execute(&request)
            .await
            .unwrap_err();
        assert_eq!(err.exit_code(), 30);
    }

    #[tokio::test]
    async fn test_process_engine_missing_program() {
        let dir = tempdir().unwrap();
        let request = validated(ValidateArgs {
            input: write_pdf(dir.path(), "doc.pdf"),
            format: Some(OutputFormat::Text),
            ..Default::default()
        });

        let engine = Arc::new(ProcessEngine::new(&EngineSettings::program(
            dir.path().join("no-such-engine"),
        )));
        let err = Orchestrator::new(engine)
            .execute(&request)
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::ValidationFailed { .. }));
    }
}
