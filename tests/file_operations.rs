// tests/file_operations.rs

use tmpguard_test_utils::{TestSandbox, init_tracing, tree_digest, with_timeout};

use std::error::Error;
use std::fs;

type TestResult = Result<(), Box<dyn Error>>;

const TEST_FILENAME: &str = "Test File";
const TEST_DIRECTORY_NAME: &str = "Test Directory";
const TEST_DIRECTORY_NAME_TWO: &str = "Test Directory Two";
const TEST_CONTENTS: &str = "Test Contents";

#[tokio::test]
async fn create_then_remove_file() -> TestResult {
    init_tracing();
    let sandbox = TestSandbox::new();
    let ops = sandbox.ops();
    let path = sandbox.path(TEST_FILENAME);

    let created = with_timeout(ops.create_file(&path)).await?;
    assert_eq!(created.stdout, None);
    assert_eq!(created.stderr, None);
    assert_eq!(created.exit_code, 0);

    assert!(path.exists());
    assert!(!path.is_dir());

    let removed = with_timeout(ops.remove_file(&path)).await?;
    assert!(removed.is_silent());
    assert_eq!(removed.exit_code, 0);

    assert!(!path.exists());
    Ok(())
}

#[tokio::test]
async fn create_then_remove_directory() -> TestResult {
    init_tracing();
    let sandbox = TestSandbox::new();
    let ops = sandbox.ops();
    let path = sandbox.path(TEST_DIRECTORY_NAME);

    let created = with_timeout(ops.create_directory(&path)).await?;
    assert!(created.is_silent());
    assert!(created.success());
    assert!(path.is_dir());

    // Recursive removal also takes the contents.
    fs::write(path.join(TEST_FILENAME), TEST_CONTENTS)?;

    let removed = with_timeout(ops.remove_directory(&path)).await?;
    assert!(removed.is_silent());
    assert!(removed.success());
    assert!(!path.exists());
    Ok(())
}

#[tokio::test]
async fn write_to_new_file() -> TestResult {
    init_tracing();
    let sandbox = TestSandbox::new();
    let ops = sandbox.ops();
    let path = sandbox.path(TEST_FILENAME);

    let res = with_timeout(ops.write_to_file(&path, TEST_CONTENTS)).await?;

    // The write pipeline echoes what it wrote on stdout.
    assert_eq!(res.stdout.as_deref(), Some("Test Contents\n"));
    assert_eq!(res.stderr, None);
    assert_eq!(res.exit_code, 0);

    assert!(path.is_file());
    let raw = fs::read_to_string(&path)?;
    assert_eq!(raw.strip_suffix('\n'), Some(TEST_CONTENTS));
    Ok(())
}

#[tokio::test]
async fn write_replaces_existing_file() -> TestResult {
    init_tracing();
    let sandbox = TestSandbox::new();
    let ops = sandbox.ops();
    let path = sandbox.path(TEST_FILENAME);

    let created = with_timeout(ops.create_file(&path)).await?;
    assert!(created.success());
    fs::write(&path, "old contents that are longer than the new ones")?;

    let res = with_timeout(ops.write_to_file(&path, TEST_CONTENTS)).await?;
    assert!(res.success());
    assert_eq!(res.stderr, None);

    let raw = fs::read_to_string(&path)?;
    assert_eq!(raw.strip_suffix('\n'), Some(TEST_CONTENTS));

    let removed = with_timeout(ops.remove_file(&path)).await?;
    assert!(removed.success());
    assert!(!path.exists());
    Ok(())
}

#[tokio::test]
async fn write_contents_that_look_like_options() -> TestResult {
    init_tracing();
    let sandbox = TestSandbox::new();
    let ops = sandbox.ops();

    for (i, contents) in ["-n", "--version", "-e a\\tb", "100%"].into_iter().enumerate() {
        let path = sandbox.path(format!("{TEST_FILENAME} {i}"));
        let res = with_timeout(ops.write_to_file(&path, contents)).await?;

        assert_eq!(res.exit_code, 0, "{contents:?}");
        assert_eq!(res.stderr, None, "{contents:?}");
        assert_eq!(fs::read_to_string(&path)?, format!("{contents}\n"));
        assert_eq!(res.stdout, Some(format!("{contents}\n")));
    }
    Ok(())
}

#[tokio::test]
async fn write_into_missing_directory_fails() -> TestResult {
    init_tracing();
    let sandbox = TestSandbox::new();
    let ops = sandbox.ops();
    let path = sandbox.path(TEST_DIRECTORY_NAME).join(TEST_FILENAME);

    let res = with_timeout(ops.write_to_file(&path, TEST_CONTENTS)).await?;

    assert!(res.exit_code > 0);
    // Streams are drained before completion, so the diagnostic is always there.
    assert!(res.stderr.is_some());
    assert!(!path.exists());
    assert!(!sandbox.path(TEST_DIRECTORY_NAME).exists());
    Ok(())
}

#[tokio::test]
async fn move_directory_leaves_only_destination() -> TestResult {
    init_tracing();
    let sandbox = TestSandbox::new();
    let ops = sandbox.ops();

    let source = sandbox.path(TEST_DIRECTORY_NAME);
    fs::create_dir_all(&source)?;
    fs::write(source.join(TEST_FILENAME), TEST_CONTENTS)?;

    let destination = sandbox.path(TEST_DIRECTORY_NAME_TWO);
    let res = with_timeout(ops.move_item(&source, &destination)).await?;
    assert!(res.is_silent());
    assert_eq!(res.exit_code, 0);

    let moved_file = destination.join(TEST_FILENAME);
    assert!(moved_file.is_file());
    assert_eq!(fs::read_to_string(&moved_file)?, TEST_CONTENTS);
    assert!(!source.exists());
    Ok(())
}

#[tokio::test]
async fn copy_directory_keeps_both_trees() -> TestResult {
    init_tracing();
    let sandbox = TestSandbox::new();
    let ops = sandbox.ops();

    let source = sandbox.path(TEST_DIRECTORY_NAME);
    fs::create_dir_all(source.join("nested"))?;
    fs::write(source.join(TEST_FILENAME), TEST_CONTENTS)?;
    fs::write(source.join("nested").join("inner.txt"), "inner")?;

    let destination = sandbox.path(TEST_DIRECTORY_NAME_TWO);
    let res = with_timeout(ops.copy_directory(&source, &destination)).await?;
    assert!(res.is_silent());
    assert_eq!(res.exit_code, 0);

    assert!(source.join(TEST_FILENAME).is_file());
    assert!(destination.join(TEST_FILENAME).is_file());
    assert_eq!(tree_digest(&source)?, tree_digest(&destination)?);
    Ok(())
}

#[tokio::test]
async fn failing_tool_reports_exit_code_and_stderr() -> TestResult {
    init_tracing();
    let sandbox = TestSandbox::new();
    let ops = sandbox.ops();

    let res = with_timeout(ops.remove_file(sandbox.path("does not exist"))).await?;

    assert_ne!(res.exit_code, 0);
    assert!(!res.success());
    assert!(res.stderr.is_some());
    assert_eq!(res.stdout, None);
    Ok(())
}

#[tokio::test]
async fn dispatch_reports_through_the_callback() -> TestResult {
    init_tracing();
    let sandbox = TestSandbox::new();
    let ops = sandbox.ops();
    let path = sandbox.path(TEST_FILENAME);

    let (tx, rx) = tokio::sync::oneshot::channel();
    let handle = ops.dispatch(
        &tmpguard::ops::Operation::CreateFile { path: path.clone() },
        move |res| {
            let _ = tx.send(res);
        },
    )?;

    let res = with_timeout(rx).await?;
    assert!(res.is_silent());
    assert_eq!(res.exit_code, 0);
    with_timeout(handle.join()).await?;
    assert!(path.is_file());
    Ok(())
}
