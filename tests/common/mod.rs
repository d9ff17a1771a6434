use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

pub fn write_temp_config(contents: &str, extension: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time should be available")
        .as_nanos();
    path.push(format!(
        "queue-sim-config-{}-{}.{}",
        std::process::id(),
        nanos,
        extension
    ));
    fs::write(&path, contents).expect("config write should succeed");
    path
}

pub const TWO_TASKS_ONE_SERVER: &str = r#"
static_servers = 1
tie_break = "stable"
workload = [
  { arrival = 0.0, work = 10.0 },
  { arrival = 1.0, work = 10.0 },
]
scenarios = [
  { dynamic_servers = 0, has_queue = false },
  { dynamic_servers = 0, has_queue = true },
]
"#;
