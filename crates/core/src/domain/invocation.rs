// Invocation - the exact command line handed to the estimator

use std::path::Path;

use crate::domain::EstimatorSettings;

/// Estimator subcommand that rewrites a G-code file in place
pub const POST_PROCESS_SUBCOMMAND: &str = "post-process";

/// Program plus ordered arguments for one estimator run
///
/// Shape: `<path> --config_<kind> <config_arg> post-process <work_file>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn post_process(settings: &EstimatorSettings, work_file: &Path) -> Self {
        Self {
            program: settings.path.clone(),
            args: vec![
                settings.config_flag(),
                settings.config_arg.clone(),
                POST_PROCESS_SUBCOMMAND.to_string(),
                work_file.to_string_lossy().into_owned(),
            ],
        }
    }

    /// Full argument vector including the program as element 0
    pub fn argv(&self) -> Vec<&str> {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect()
    }

    /// Work file path, the last argument
    pub fn work_file(&self) -> Option<&Path> {
        self.args.last().map(Path::new)
    }
}
