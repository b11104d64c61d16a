// Pipeline constants (no magic values)

/// Name of the work file inside the scoped temp directory
pub const WORK_FILE_NAME: &str = "work.gcode";

/// Prefix for per-invocation temp directories
pub const TEMP_DIR_PREFIX: &str = "estimate-";
