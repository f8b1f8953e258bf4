#![allow(non_snake_case)]
use FifthOrderGreenBVP::Utils::logger::{LoggingOptions, init_logger};
use FifthOrderGreenBVP::numerical::BVP_Green::problem_presets::Preset;
use FifthOrderGreenBVP::numerical::BVP_Green::task_parser_green::GreenTask;
use FifthOrderGreenBVP::numerical::real_number::Real;
use log::{error, info};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use strum::IntoEnumIterator;

/// FifthOrderGreenBVP [task_file]
/// without a task file the three presets are solved with their default settings
fn main() -> ExitCode {
    let tasks = match env::args().nth(1) {
        Some(path) => match GreenTask::from_file(&PathBuf::from(&path)) {
            Ok(task) => vec![task],
            Err(e) => {
                eprintln!("{}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => Preset::iter().map(GreenTask::for_preset).collect(),
    };
    let logging = tasks
        .first()
        .map(|task| task.logging.clone())
        .unwrap_or_else(LoggingOptions::default);
    init_logger(&logging);

    for task in tasks {
        match task.solve() {
            Ok(outcome) => {
                let solution = &outcome.solution;
                info!(
                    "{}: {} after k = {} passes, n = {}, elapsed {:?}",
                    task.preset, solution.status, solution.k, task.n, solution.elapsed
                );
                if let Some(max_error) = outcome.max_error {
                    info!("{}: max |x_i - x*(t_i)| = {}", task.preset, max_error.to_string_with_digits(6));
                }
            }
            Err(e) => {
                error!("{}: {}", task.preset, e);
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}
