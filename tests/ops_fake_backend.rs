// tests/ops_fake_backend.rs

use tmpguard_test_utils::{RecordingBackend, init_tracing};

use std::error::Error;
use std::ffi::OsString;
use std::path::Path;

use tmpguard::config::ToolPaths;
use tmpguard::exec::ExecutionResult;
use tmpguard::guard::GuardKind;
use tmpguard::ops::FsOps;

type TestResult = Result<(), Box<dyn Error>>;

#[tokio::test]
async fn every_operation_produces_the_expected_command_line() -> TestResult {
    init_tracing();
    let backend = RecordingBackend::new();
    let ops = FsOps::new(backend.clone(), ToolPaths::default());

    ops.create_file("/tmp/x/f").await?;
    ops.remove_file("/tmp/x/f").await?;
    ops.create_directory("/tmp/x/d").await?;
    ops.remove_directory("/tmp/x/d").await?;
    ops.copy_directory("/tmp/x/a", "/tmp/x/b").await?;
    ops.move_item("/tmp/x/b", "/tmp/x/c").await?;
    ops.write_to_file("/tmp/x/f", "hello").await?;

    let commands: Vec<String> = backend.recorded().iter().map(|d| d.to_string()).collect();
    assert_eq!(
        commands,
        [
            r#"touch "/tmp/x/f""#,
            r#"rm "/tmp/x/f""#,
            r#"mkdir "/tmp/x/d""#,
            r#"rm "-r" "/tmp/x/d""#,
            r#"cp "-R" "/tmp/x/a" "/tmp/x/b""#,
            r#"mv "/tmp/x/b" "/tmp/x/c""#,
            r#"printf "%s\n" "hello" | tee "/tmp/x/f""#,
        ]
    );
    Ok(())
}

#[tokio::test]
async fn every_path_argument_is_guarded() -> TestResult {
    init_tracing();
    let backend = RecordingBackend::new();
    let ops = FsOps::new(backend.clone(), ToolPaths::default());

    ops.remove_directory("/tmp/x/d").await?;
    ops.move_item("/tmp/x/a", "/tmp/x/b").await?;

    let recorded = backend.recorded();

    let rmdir = &recorded[0];
    assert_eq!(rmdir.guarded_paths().len(), 1);
    assert_eq!(rmdir.guarded_paths()[0].path, Path::new("/tmp/x/d"));
    assert_eq!(rmdir.guarded_paths()[0].kind, GuardKind::Single);

    let mv = &recorded[1];
    for guarded in mv.guarded_paths() {
        assert_eq!(guarded.kind, GuardKind::Paired);
        assert!(mv.args().contains(&OsString::from(guarded.path.as_os_str())));
    }
    Ok(())
}

#[tokio::test]
async fn backend_result_is_passed_through_untouched() -> TestResult {
    init_tracing();
    let canned = ExecutionResult {
        stdout: None,
        stderr: Some("mkdir: cannot create directory\n".to_string()),
        exit_code: 1,
        cancelled: false,
    };
    let ops = FsOps::new(RecordingBackend::with_response(canned.clone()), ToolPaths::default());

    let res = ops.create_directory("/tmp/x/d").await?;
    assert_eq!(res, canned);
    Ok(())
}
