#![allow(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

use std::path::Path;

use qtmoc_common::{MocCompiler, ToolError, moc_install_path};
use rstest::rstest;

#[rstest]
#[case("macos", "aarch64", Some("/usr/local/Qt5.6.0/5.6/clang_64/bin/moc"))]
#[case("linux", "x86_64", Some("/usr/local/Qt5.6.0/5.6/gcc_64/bin/moc"))]
#[case("linux", "x86", Some("/usr/local/Qt5.6.0/5.6/gcc/bin/moc"))]
#[case("windows", "x86", Some("C:\\Qt\\Qt5.6.0\\5.6\\mingw49_32\\bin\\moc.exe"))]
#[case("linux", "riscv64", None)]
#[case("freebsd", "x86_64", None)]
fn test_moc_install_path(#[case] os: &str, #[case] arch: &str, #[case] expected: Option<&str>) {
    assert_eq!(moc_install_path(os, arch), expected);
}

#[test]
fn test_moc_missing_override() {
    let result = MocCompiler::locate(Some(Path::new("/definitely/not/here/moc")));
    assert!(matches!(result, Err(ToolError::NotFound { .. })));
}

#[test]
fn test_moc_args() {
    let tmp = tempfile::tempdir().unwrap();
    let fake = tmp.path().join("moc");
    std::fs::write(&fake, "").unwrap();

    let moc = MocCompiler::with_path(&fake).unwrap();
    let args = moc.build_args(Path::new("/app/moc.cpp"), Path::new("/app/moc_moc.h"));
    assert_eq!(args, vec!["/app/moc.cpp", "-o", "/app/moc_moc.h"]);
}

#[cfg(unix)]
mod unix {
    use std::process::Command;

    use qtmoc_common::{ToolError, run_tool};

    #[test]
    fn test_run_tool_combines_output() {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "echo out; echo err 1>&2"]);
        let output = run_tool(&mut cmd, "test.echo").unwrap();
        assert_eq!(output, "out\nerr\n");
    }

    #[test]
    fn test_run_tool_failure_keeps_output() {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "echo broken 1>&2; exit 3"]);
        let err = run_tool(&mut cmd, "test.fail").unwrap_err();
        match &err {
            ToolError::Failed { label, output, .. } => {
                assert_eq!(label, "test.fail");
                assert_eq!(output, "broken\n");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.output(), Some("broken\n"));
    }

    #[test]
    fn test_run_tool_missing_binary() {
        let mut cmd = Command::new("/definitely/not/here/tool");
        let err = run_tool(&mut cmd, "test.missing").unwrap_err();
        assert!(matches!(err, ToolError::Io { .. }));
    }
}
