//! End-to-end tests driving the `cflr` binary through the bundled text
//! frontend, covering the same scenarios exercised at the unit level in
//! `src/solver.rs`.

use std::io::Write;
use std::path::PathBuf;
use std::process::Command;
use tempfile::NamedTempFile;

struct TestContext {
    bin: PathBuf,
}

impl TestContext {
    fn new() -> Self {
        let bin = std::env::var("CARGO_BIN_EXE_cflr")
            .ok()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./target/debug/cflr"));
        Self { bin }
    }

    fn run_on(&self, program: &str, extra: &[&str]) -> std::process::Output {
        let mut file = NamedTempFile::new().expect("create fixture file");
        write!(file, "{program}").expect("write fixture");
        let path = file.into_temp_path();

        let mut cmd = Command::new(&self.bin);
        cmd.arg(&path);
        cmd.args(extra);
        let output = cmd.output().expect("run cflr binary");
        path.close().ok();
        output
    }
}

#[test]
fn s1_simple_address_and_copy_via_text_frontend() {
    let ctx = TestContext::new();
    let out = ctx.run_on("p = &a\nq = p\n", &["--output", "human"]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8_lossy(&out.stdout);
    // p=0, a=1, q=2
    assert!(stdout.contains("0 -> 1"));
    assert!(stdout.contains("2 -> 1"));
}

#[test]
fn s2_store_load_through_object_via_text_frontend() {
    let ctx = TestContext::new();
    let program = "p = &o\nq = &o\n*p = x\ny = *q\n";
    // p=0, o=1, q=2, x=3, y=4
    let out = ctx.run_on(program, &["--output", "human"]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("0 -> 1"));
    assert!(stdout.contains("2 -> 1"));
}

#[test]
fn s3_transitive_copies_via_text_frontend() {
    let ctx = TestContext::new();
    let program = "a = &obj\nb = a\nc = b\n";
    // a=0, obj=1, b=2, c=3
    let out = ctx.run_on(program, &["--output", "human"]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("0 -> 1"));
    assert!(stdout.contains("2 -> 1"));
    assert!(stdout.contains("3 -> 1"));
}

#[test]
fn s4_empty_program_produces_no_points_to_facts() {
    let ctx = TestContext::new();
    let out = ctx.run_on("# nothing here\n", &["--output", "human"]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).trim().is_empty());
}

#[test]
fn s5_cycle_via_text_frontend() {
    let ctx = TestContext::new();
    let program = "p = &o1\nq = &o2\nq = p\np = q\n";
    // p=0, o1=1, q=2, o2=3
    let out = ctx.run_on(program, &["--output", "human"]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("0 -> 1"));
    assert!(stdout.contains("0 -> 3"));
    assert!(stdout.contains("2 -> 1"));
    assert!(stdout.contains("2 -> 3"));
}

#[test]
fn s6_self_store_load_via_text_frontend() {
    let ctx = TestContext::new();
    let program = "p = &o\n*p = p\nr = *p\n";
    // p=0, o=1, r=2
    let out = ctx.run_on(program, &["--output", "human"]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("0 -> 1"));
    assert!(stdout.contains("2 -> 1"));
}

#[test]
fn malformed_input_exits_nonzero_with_a_message() {
    let ctx = TestContext::new();
    let out = ctx.run_on("p q r\n", &[]);
    assert!(!out.status.success());
    assert!(!out.stderr.is_empty());
}

#[test]
fn json_output_round_trips_through_serde_json() {
    let ctx = TestContext::new();
    let out = ctx.run_on("p = &a\n", &["--output", "json"]);
    assert!(out.status.success());
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).expect("valid json");
    assert_eq!(value["tool"], "cflr");
    assert!(value["data"].is_array());
}

#[test]
fn dump_graph_includes_the_addr_bar_seed_edge() {
    let ctx = TestContext::new();
    let out = ctx.run_on("p = &a\n", &["--dump-graph", "--output", "dot"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("digraph LabeledGraph"));
    assert!(stdout.contains("AddrBar"));
}

#[test]
fn stats_subcommand_reports_nonzero_pops_for_nonempty_input() {
    let ctx = TestContext::new();
    let out = ctx.run_on("p = &a\nq = p\n", &["stats", "--output", "json"]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).expect("valid json");
    assert!(value["data"]["pops"].as_u64().unwrap() > 0);
}
