//! Reusable fixtures for golive CLI tests.

/// Managed-file config: one overwritten code file, one preserved data file.
///
/// `live_dir` is overridden per-test via `--target`, so the value here is a
/// placeholder that never gets used.
pub const TWO_FILE_CONFIG: &str = r#"
live_dir = "live"

[run]
entry = "app.code"

[[files]]
source = "app.code"
policy = "overwrite"

[[files]]
source = "data.csv"
policy = "preserve"
"#;

pub const CODE_V1: &str = "v1";
pub const CODE_V2: &str = "v2";
pub const DATA_V1: &str = "pairs-v1";
pub const DATA_EDITED: &str = "pairs-v1-edited";

/// Interpreter name that cannot exist on PATH, for provisioning-failure tests
pub const MISSING_PYTHON: &str = "golive-test-missing-python-3xq";
