use std::process::{Command, Output};

fn optdump_binary() -> &'static str {
    env!("CARGO_BIN_EXE_optdump")
}

/// Run optdump with `args` and extra environment, scrubbing anything the
/// harness reads so the outer environment cannot leak in.
fn run(args: &[&str], env: &[(&str, &str)]) -> Output {
    let mut cmd = Command::new(optdump_binary());
    cmd.args(args)
        .env_remove("RUST_LOG")
        .env_remove("OPTDUMP_STRICT")
        .env_remove("OPTDUMP_OPERANDS");
    for (k, v) in env {
        cmd.env(k, v);
    }
    cmd.output().expect("failed to run optdump")
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn has_line(output: &Output, line: &str) -> bool {
    stdout_lines(output).iter().any(|l| l == line)
}

#[test]
fn defaults_with_no_arguments() {
    let out = run(&[], &[]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    for line in [
        "abool=false",
        "aint8=0",
        "aint=0",
        "auint64=0",
        "afloat64=0",
        "astring=",
        "achoice=default",
    ] {
        assert!(has_line(&out, line), "missing {:?} in {:?}", line, stdout_lines(&out));
    }
    assert!(!stdout_lines(&out).iter().any(|l| l.starts_with("arg[")));
}

#[test]
fn options_and_residual_arguments() {
    let out = run(
        &["-bi", "5", "--afloat32=5.5", "-c", "bar", "--aint64", "-7", "foo", "-u", "9"],
        &[],
    );
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert!(has_line(&out, "abool=true"));
    assert!(has_line(&out, "aint=5"));
    assert!(has_line(&out, "afloat32=5.5"));
    assert!(has_line(&out, "achoice=bar"));
    assert!(has_line(&out, "aint64=-7"));
    // scanning stopped at "foo"
    assert!(has_line(&out, "auint=0"));
    assert!(has_line(&out, "arg[0]=foo"));
    assert!(has_line(&out, "arg[1]=-u"));
    assert!(has_line(&out, "arg[2]=9"));
}

#[test]
fn parse_errors_exit_with_two() {
    let cases: &[(&[&str], &str)] = &[
        (&["-x"], "unknown argument: -x"),
        (&["--aint="], "no value for argument: --aint"),
        (&["--auint8", "256"], "is not a valid uint8 value"),
        (&["-c", "hey"], "(possible values: foo,bar,baz,default)"),
    ];
    for (args, message) in cases {
        let out = run(args, &[]);
        assert_eq!(out.status.code(), Some(2), "{:?}", args);
        assert!(stderr(&out).contains(message), "{:?}: {}", args, stderr(&out));
        assert!(out.stdout.is_empty());
    }
}

#[test]
fn operands_from_environment() {
    let env = [("OPTDUMP_OPERANDS", "name,value?")];

    let out = run(&["-s", "aaa", "foo"], &env);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert!(has_line(&out, "astring=aaa"));
    assert!(has_line(&out, "operand name=foo"));
    assert!(has_line(&out, "operand value="));

    let out = run(&["foo", "bar", "extra"], &env);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert!(has_line(&out, "operand value=bar"));
    // surplus operands are dropped, not passed through
    assert!(!stdout_lines(&out).iter().any(|l| l.starts_with("arg[")));
}

#[test]
fn strict_operand_counting() {
    let out = run(&[], &[("OPTDUMP_OPERANDS", "name"), ("OPTDUMP_STRICT", "1")]);
    assert_eq!(out.status.code(), Some(2));
    assert!(stderr(&out).contains("exactly 1"), "{}", stderr(&out));

    let out = run(
        &["-b"],
        &[("OPTDUMP_OPERANDS", "name,value?"), ("OPTDUMP_STRICT", "1")],
    );
    assert_eq!(out.status.code(), Some(2));
    assert!(stderr(&out).contains("at least 1"), "{}", stderr(&out));

    let out = run(&["foo"], &[("OPTDUMP_OPERANDS", "name"), ("OPTDUMP_STRICT", "1")]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert!(has_line(&out, "operand name=foo"));
}

#[test]
fn bad_operand_declaration_is_not_a_parse_error() {
    let out = run(&[], &[("OPTDUMP_OPERANDS", "name,name")]);
    assert_eq!(out.status.code(), Some(1));
    assert!(
        stderr(&out).contains("invalid definition: duplicate operand 'name'"),
        "{}",
        stderr(&out)
    );
}

#[test]
fn trace_logging_goes_to_stderr() {
    let mut cmd = Command::new(optdump_binary());
    cmd.args(["--aint", "3"])
        .env("RUST_LOG", "cmdopt=trace")
        .env_remove("OPTDUMP_STRICT")
        .env_remove("OPTDUMP_OPERANDS");
    let out = cmd.output().expect("failed to run optdump");
    assert!(out.status.success());
    assert!(has_line(&out, "aint=3"));
    assert!(stderr(&out).contains("bound next token"), "{}", stderr(&out));
}
