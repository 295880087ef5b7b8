#![allow(missing_docs)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use serde_json::Value;
use tempfile::TempDir;

struct Fixture {
    dir: TempDir,
    csv: PathBuf,
}

impl Fixture {
    fn new(contents: &str) -> Self {
        let dir = TempDir::new().expect("tempdir");
        let csv = dir.path().join("pairs.csv");
        fs::write(&csv, contents).expect("write csv");
        Self { dir, csv }
    }

    /// Config path that does not exist, so the user's own config is never read.
    fn config(&self) -> PathBuf {
        self.dir.path().join("cli.toml")
    }

    fn cmd(&self) -> assert_cmd::Command {
        let mut cmd = cargo_bin_cmd!("itemnet");
        cmd.env_remove("ITEMNET_LOG")
            .arg("--config")
            .arg(self.config());
        cmd
    }
}

const PAIRS: &str = "a,b\nhub,x\nx,hub\nhub,y\ny,z\n";

fn stdout_json(output: &[u8]) -> Value {
    serde_json::from_slice(output).expect("json output")
}

fn path_str(path: &Path) -> &str {
    path.to_str().expect("utf8 path")
}

#[test]
fn links_prints_edges_in_creation_order() {
    let fx = Fixture::new(PAIRS);
    fx.cmd()
        .arg("links")
        .arg(&fx.csv)
        .assert()
        .success()
        .stdout("hub x 2\nhub y 1\ny z 1\n");
}

#[test]
fn keep_order_flag_splits_reversed_pairs() {
    let fx = Fixture::new(PAIRS);
    fx.cmd()
        .args(["--keep-order", "links"])
        .arg(&fx.csv)
        .assert()
        .success()
        .stdout("hub x 1\nx hub 1\nhub y 1\ny z 1\n");
}

#[test]
fn degenerate_row_fails_unless_ignored() {
    let fx = Fixture::new("a,b\nq,r\nq,q\n");
    fx.cmd()
        .arg("links")
        .arg(&fx.csv)
        .assert()
        .failure()
        .code(1);
    fx.cmd()
        .args(["--ignore-key-equality-error", "links"])
        .arg(&fx.csv)
        .assert()
        .success()
        .stdout("q r 1\n");
}

#[test]
fn stats_json_reports_tallies() {
    let fx = Fixture::new(PAIRS);
    let output = fx
        .cmd()
        .args(["--format", "json", "stats"])
        .arg(&fx.csv)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json = stdout_json(&output);
    assert_eq!(json["items"], 4);
    assert_eq!(json["edges"], 3);
    assert_eq!(json["total_weight"], 4);
    assert_eq!(json["policy"], "symmetric");
    assert_eq!(json["per_item"][0]["item"], "hub");
    assert_eq!(json["per_item"][0]["weight"], 3);
}

#[test]
fn get_reports_link_or_exits_three() {
    let fx = Fixture::new(PAIRS);
    fx.cmd()
        .arg("get")
        .arg(&fx.csv)
        .args(["x", "hub"])
        .assert()
        .success()
        .stdout("hub x 2\n");
    fx.cmd()
        .arg("get")
        .arg(&fx.csv)
        .args(["x", "z"])
        .assert()
        .code(3);
}

#[test]
fn containing_lists_incident_links() {
    let fx = Fixture::new(PAIRS);
    let output = fx
        .cmd()
        .args(["--format", "json", "containing"])
        .arg(&fx.csv)
        .arg("y")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json = stdout_json(&output);
    let links = json.as_array().expect("array");
    assert_eq!(links.len(), 2);
    assert_eq!(links[0]["a"], "hub");
    assert_eq!(links[1]["b"], "z");
}

#[test]
fn count_column_without_headers() {
    let fx = Fixture::new("p;q;4\nq;p;1\n");
    fx.cmd()
        .args(["links", "--no-headers", "--count-column", "2", "--delimiter", ";"])
        .arg(&fx.csv)
        .assert()
        .success()
        .stdout("p q 5\n");
}

#[test]
fn config_file_supplies_network_options() {
    let fx = Fixture::new(PAIRS);
    fs::write(
        fx.config(),
        "[network]\nkeep_order = true\n\n[import]\na_column = \"b\"\nb_column = \"a\"\n",
    )
    .expect("write config");
    fx.cmd()
        .arg("links")
        .arg(&fx.csv)
        .assert()
        .success()
        .stdout("x hub 1\nhub x 1\ny hub 1\nz y 1\n");
}

#[test]
fn config_init_then_show() {
    let fx = Fixture::new(PAIRS);
    fx.cmd().args(["config", "init"]).assert().success();
    assert!(fx.config().exists());
    fx.cmd().args(["config", "init"]).assert().failure();

    let output = fx
        .cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let shown = String::from_utf8(output).expect("utf8");
    assert!(shown.contains("keep_order = false"));
    assert!(shown.contains("degeneracy = \"value_equality\""));

    fx.cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(format!("{}\n", path_str(&fx.config())));
}

#[test]
fn completions_are_generated() {
    let fx = Fixture::new(PAIRS);
    let output = fx
        .cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    assert!(String::from_utf8_lossy(&output).contains("itemnet"));
}

#[test]
fn stats_text_uses_plain_sections() {
    let fx = Fixture::new(PAIRS);
    let output = fx
        .cmd()
        .args(["--theme", "plain", "stats"])
        .arg(&fx.csv)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(output).expect("utf8");
    assert!(text.contains("== Network"));
    assert!(text.contains("total weight: 4"));
    assert!(text.contains("- hub links=2 weight=3"));
}
