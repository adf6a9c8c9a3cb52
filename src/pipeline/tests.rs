//! Tests for the end-to-end pipeline.

use super::*;
use crate::test_support::{DirGuard, Workspace};
use serial_test::serial;

const TEMPLATE: &str = r#"job "escrow" {
  group "api" {
    task "server" {
      env {
        {{ENV_VARS}}
      }
    }
  }
}
"#;

fn render_only(ws: &Workspace) -> Config {
    Config {
        skip_launch: true,
        ..ws.config()
    }
}

#[test]
fn test_run_renders_env_block() {
    let ws = Workspace::new("FOO=bar\nBAZ=\"qux\"\n", TEMPLATE);

    let report = run(&render_only(&ws)).unwrap();

    assert_eq!(report.variables, 2);
    assert_eq!(report.replacements, 1);
    assert!(report.launch.is_none());
    assert_eq!(
        ws.output(),
        r#"job "escrow" {
  group "api" {
    task "server" {
      env {
        FOO = "bar"
        BAZ = "qux"
      }
    }
  }
}
"#
    );
}

#[test]
fn test_run_inline_template_scenario() {
    let ws = Workspace::new("FOO=bar\nBAZ=\"qux\"", "A={{ENV_VARS}}B");

    run(&render_only(&ws)).unwrap();

    assert_eq!(ws.output(), "A=FOO = \"bar\"\n        BAZ = \"qux\"B");
}

#[test]
fn test_run_empty_env_file_removes_placeholder() {
    let ws = Workspace::new("\n\nno pairs here\n", "A={{ENV_VARS}}B");

    let report = run(&render_only(&ws)).unwrap();

    assert_eq!(report.variables, 0);
    assert_eq!(ws.output(), "A=B");
}

#[test]
fn test_run_missing_placeholder_writes_template_unchanged() {
    let template = "job \"escrow\" { env { STATIC = \"1\" } }\n";
    let ws = Workspace::new("FOO=bar", template);

    let report = run(&render_only(&ws)).unwrap();

    assert_eq!(report.replacements, 0);
    assert_eq!(ws.output().as_bytes(), template.as_bytes());
}

#[test]
fn test_run_strict_missing_placeholder_fails_after_writing() {
    let template = "no token\n";
    let ws = Workspace::new("FOO=bar", template);
    let config = Config {
        strict: true,
        ..render_only(&ws)
    };

    let err = run(&config).unwrap_err();

    assert!(matches!(err, EnvJobError::PlaceholderMissing { .. }));
    assert_eq!(ws.output(), template);
}

#[test]
fn test_run_missing_env_file_aborts_before_writing() {
    let ws = Workspace::new("FOO=bar", TEMPLATE);
    std::fs::remove_file(ws.path().join(".env")).unwrap();

    let err = run(&render_only(&ws)).unwrap_err();

    assert!(matches!(err, EnvJobError::EnvFile(_)));
    assert!(!ws.path().join("generated_escrow.nomad.hcl").exists());
}

#[test]
fn test_run_missing_template_aborts_before_writing() {
    let ws = Workspace::new("FOO=bar", TEMPLATE);
    std::fs::remove_file(ws.path().join("escrow_job_template.hcl")).unwrap();

    let err = run(&render_only(&ws)).unwrap_err();

    assert!(matches!(err, EnvJobError::Template(_)));
    assert!(!ws.path().join("generated_escrow.nomad.hcl").exists());
}

#[test]
fn test_run_overwrites_previous_output() {
    let ws = Workspace::new("FOO=bar", "{{ENV_VARS}}");
    std::fs::write(ws.path().join("generated_escrow.nomad.hcl"), "stale").unwrap();

    run(&render_only(&ws)).unwrap();

    assert_eq!(ws.output(), "FOO = \"bar\"");
}

#[test]
fn test_run_honours_custom_indent_and_placeholder() {
    let ws = Workspace::new("A=1\nB=2", "<<ENV>>");
    let config = Config {
        placeholder: "<<ENV>>".to_string(),
        indent: 2,
        ..render_only(&ws)
    };

    run(&config).unwrap();

    assert_eq!(ws.output(), "A = \"1\"\n  B = \"2\"");
}

#[test]
#[serial]
fn test_run_with_default_relative_paths() {
    let ws = Workspace::new("FOO=bar", "x {{ENV_VARS}} y");
    let _guard = DirGuard::new(ws.path());

    let config = Config {
        skip_launch: true,
        ..Config::default()
    };
    let report = run(&config).unwrap();

    assert_eq!(report.output, PathBuf::from("generated_escrow.nomad.hcl"));
    assert_eq!(ws.output(), "x FOO = \"bar\" y");
}

#[cfg(unix)]
#[test]
fn test_run_launches_scheduler_with_output_path() {
    let ws = Workspace::new("FOO=bar", "{{ENV_VARS}}");
    let submitted = ws.path().join("submitted.hcl");
    let config = Config {
        scheduler_command: format!(
            "sh -c 'cp \"$1\" \"$0\"' {}",
            shell_words::quote(&submitted.to_string_lossy())
        ),
        ..ws.config()
    };

    let report = run(&config).unwrap();

    let outcome = report.launch.unwrap();
    assert!(outcome.is_success());
    assert!(outcome.command.ends_with("generated_escrow.nomad.hcl"));
    assert_eq!(std::fs::read_to_string(&submitted).unwrap(), "FOO = \"bar\"");
}

#[cfg(unix)]
#[test]
fn test_run_ignores_scheduler_failure_by_default() {
    let ws = Workspace::new("FOO=bar", "{{ENV_VARS}}");
    let config = Config {
        scheduler_command: "false".to_string(),
        ..ws.config()
    };

    let report = run(&config).unwrap();

    assert_eq!(report.launch.unwrap().exit_code, Some(1));
}

#[cfg(unix)]
#[test]
fn test_run_strict_reports_scheduler_failure() {
    let ws = Workspace::new("FOO=bar", "{{ENV_VARS}}");
    let config = Config {
        scheduler_command: "false".to_string(),
        strict: true,
        ..ws.config()
    };

    let err = run(&config).unwrap_err();

    match err {
        EnvJobError::SchedulerFailed { command, status } => {
            assert!(command.starts_with("false "));
            assert_eq!(status, "exit code 1");
        }
        other => panic!("unexpected error: {other}"),
    }
    // The job file is still produced.
    assert_eq!(ws.output(), "FOO = \"bar\"");
}

#[test]
fn test_run_rejects_oversized_indent_before_rendering() {
    let ws = Workspace::new("A=1\nB=2", "{{ENV_VARS}}");
    let config = Config {
        indent: usize::MAX,
        ..render_only(&ws)
    };

    let err = run(&config).unwrap_err();

    assert!(matches!(err, EnvJobError::Config(_)));
    assert!(!ws.path().join("generated_escrow.nomad.hcl").exists());
}
