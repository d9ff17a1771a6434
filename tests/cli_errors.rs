mod common;

use common::write_temp_config;
use predicates::str::contains;

#[test]
fn zero_tasks_fails() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("queue-sim");
    cmd.args(["run", "--tasks", "0"]);
    cmd.assert()
        .failure()
        .stderr(contains("Error: task count must be greater than 0"));
}

#[test]
fn empty_pool_fails() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("queue-sim");
    cmd.args(["run", "--static-servers", "0", "--scenario", "0:queue"]);
    cmd.assert()
        .failure()
        .stderr(contains("Error: server pool must contain at least one server"));
}

#[test]
fn invalid_scenario_fails() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("queue-sim");
    cmd.args(["run", "--scenario", "x:queue"]);
    cmd.assert().failure().stderr(contains(
        "Error: invalid scenario entry 'x:queue': expected dynamic_servers[:queue|:no-queue]",
    ));
}

#[test]
fn zero_trials_fails() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("queue-sim");
    cmd.args(["run", "--trials", "0"]);
    cmd.assert()
        .failure()
        .stderr(contains("Error: trials must be greater than 0"));
}

#[test]
fn negative_std_dev_fails() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("queue-sim");
    cmd.args(["run", "--work-std-dev=-1"]);
    cmd.assert()
        .failure()
        .stderr(contains("Error: invalid work distribution"));
}

#[test]
fn negative_std_dev_in_config_fails() {
    let config = r#"
[workload]
tasks = 10
mean_interval = 60.0
interval_std_dev = -5.0
mean_work = 220.0
work_std_dev = 60.0
"#;
    let path = write_temp_config(config, "toml");
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("queue-sim");
    cmd.args(["run", "--config", path.to_str().unwrap()]);
    cmd.assert()
        .failure()
        .stderr(contains("Error: invalid interval distribution"));
}

#[test]
fn missing_config_fails() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("queue-sim");
    cmd.args(["run", "--config", "/nonexistent/queue-sim.toml"]);
    cmd.assert()
        .failure()
        .stderr(contains("Error: failed to read config '/nonexistent/queue-sim.toml'"));
}
