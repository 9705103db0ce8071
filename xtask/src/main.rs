//! Developer workflow tasks for the presetlint workspace.

use std::{
    env,
    path::Path,
    process::{Command, ExitCode, Stdio},
};

fn main() -> ExitCode {
    match parse_command() {
        Some(Task::Tidy) => run_tidy(),
        Some(Task::Test) => run_tests(),
        None => {
            eprintln!("Usage: cargo xtask <tidy|test>");
            ExitCode::from(2)
        }
    }
}

enum Task {
    /// Format and apply clippy fixes.
    Tidy,
    /// Run unit and property tests with a larger proptest case count.
    Test,
}

fn parse_command() -> Option<Task> {
    let mut args = env::args();
    let _ = args.next();
    match args.next().as_deref() {
        Some("tidy") if args.next().is_none() => Some(Task::Tidy),
        Some("test") if args.next().is_none() => Some(Task::Test),
        _ => None,
    }
}

fn run_tidy() -> ExitCode {
    if !run_fmt() {
        return ExitCode::from(1);
    }

    if !run_clippy() {
        return ExitCode::from(1);
    }

    ExitCode::SUCCESS
}

fn run_tests() -> ExitCode {
    let cases = env::var("PROPTEST_CASES").unwrap_or_else(|_| "1024".to_string());
    let ok = Command::new("cargo")
        .args(["test", "-p", "presetlint"])
        .env("PROPTEST_CASES", cases)
        .status()
        .is_ok_and(|status| status.success());
    if ok {
        ExitCode::SUCCESS
    } else {
        eprintln!("Tests failed");
        ExitCode::from(1)
    }
}

fn run_fmt() -> bool {
    if Path::new("rustfmt-nightly.toml").exists() {
        run_command(
            "cargo",
            &[
                "+nightly",
                "fmt",
                "--all",
                "--",
                "--config-path",
                "./rustfmt-nightly.toml",
            ],
        )
    } else {
        run_command("cargo", &["+nightly", "fmt", "--all"])
    }
}

fn run_clippy() -> bool {
    run_command(
        "cargo",
        &[
            "clippy",
            "-q",
            "--fix",
            "--all",
            "--all-targets",
            "--all-features",
            "--allow-dirty",
            "--tests",
            "--examples",
        ],
    )
}

fn run_command(program: &str, args: &[&str]) -> bool {
    match Command::new(program)
        .args(args)
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
    {
        Ok(status) if status.success() => true,
        Ok(status) => {
            eprintln!("Command `{program}` failed with status {status}");
            false
        }
        Err(err) => {
            eprintln!("Failed to run `{program}`: {err}");
            false
        }
    }
}
