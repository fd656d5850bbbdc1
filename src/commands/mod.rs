pub type CmdResult<T> = renumber::Result<(T, i32)>;

pub(crate) struct GlobalArgs {}

pub mod config;
pub mod standardize;

/// Dispatch a command to its handler and map result to JSON.
macro_rules! dispatch {
    ($args:expr, $global:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run($args, $global))
    };
}

pub(crate) fn run_text(
    command: crate::Commands,
    _global: &GlobalArgs,
) -> renumber::Result<(String, i32)> {
    match command {
        crate::Commands::Standardize(args) => standardize::run_text(args),
        // config always answers in JSON
        crate::Commands::Config(_) => Err(renumber::Error::validation_invalid_argument(
            "output_mode",
            "Command does not support text output",
        )),
    }
}

pub(crate) fn run_json(
    command: crate::Commands,
    global: &GlobalArgs,
) -> (renumber::Result<serde_json::Value>, i32) {
    crate::tty::status("renumber is working...");

    match command {
        crate::Commands::Standardize(args) => dispatch!(args, global, standardize),
        crate::Commands::Config(args) => dispatch!(args, global, config),
    }
}
