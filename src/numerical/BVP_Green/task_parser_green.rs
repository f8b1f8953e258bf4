//! # Task files for the Green's-function solver
//!
//! A task is a plain text document of titled sections holding `key: value` pairs (see
//! [`crate::Utils::task_parser`]). Numbers stay as written until the working precision is known,
//! so literals like `1e-30` survive untouched at 256 bits.
//!
//! ## Sections
//! - `problem`: `preset` (required, one of `e^t`, `t^6`, `1/(t+1)`), `q` (delay factor of `e^t`)
//! - `interval`: `a`, `b`, `n`
//! - `boundary` (optional): `c1`..`c5`; `c4`/`c5` also take the literal `e`. Missing section: the preset's data
//! - `solver_settings`: `tolerance`, `max_steps` (0 = iterate to convergence), `precision` (bits), `parallel`
//! - `logging`: `loglevel`, `log_file` (a path, `auto` for a timestamped name, `none`), `console`
//!
//! Accepted aliases: `solve_settings`/`settings` for `solver_settings`, `bc`/`boundary_conditions` for
//! `boundary`, `tol`/`eps` for `tolerance`, `max_iterations`/`maxsteps` for `max_steps`,
//! `prec`/`bits` for `precision`. Titles and keys are case-insensitive.
//!
//! ## Usage Example
//! ```rust
//! use FifthOrderGreenBVP::numerical::BVP_Green::task_parser_green::GreenTask;
//! use std::str::FromStr;
//! let task = GreenTask::from_str("problem\n preset: t^6\ninterval\n n: 20").unwrap();
//! assert_eq!(task.n, 20);
//! let problem = task.problem::<f64>().unwrap();
//! assert_eq!(problem.boundary.c5, 6.0);
//! ```
use crate::Utils::logger::{LoggingOptions, timestamped_log_name};
use crate::Utils::task_parser::{DocumentMap, DocumentParser, Value};
use crate::numerical::BVP_Green::Green_solver::{GreenIterationSolver, GreenSolution};
use crate::numerical::BVP_Green::green_kernel::BoundaryData;
use crate::numerical::BVP_Green::problem::FifthOrderProblem;
use crate::numerical::BVP_Green::problem_presets::{
    DEFAULT_N, DEFAULT_PRECISION, DEFAULT_Q, DEFAULT_TOLERANCE, Preset, PresetKernel,
};
use crate::numerical::real_number::{Real, RealParseError};
use log::info;
use rug::Float;
use simplelog::LevelFilter;
use std::collections::HashMap;
use std::env;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("cannot parse task: {0}")]
    Parse(String),
    #[error("missing '{field}' in section '{section}'")]
    Missing { section: String, field: String },
    #[error("invalid value '{value}' for '{field}': {reason}")]
    Invalid {
        field: String,
        value: String,
        reason: String,
    },
    #[error("unknown preset '{0}', expected one of e^t, t^6, 1/(t+1)")]
    UnknownPreset(String),
    #[error(transparent)]
    Real(#[from] RealParseError),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Boundary literals c1..c5 as written in the task.
pub type BoundaryLiterals = [String; 5];

/// Validated content of a task file; numbers are decimal literals.
#[derive(Debug, Clone, PartialEq)]
pub struct GreenTask {
    pub preset: Preset,
    pub q: String,
    pub a: String,
    pub b: String,
    pub n: usize,
    /// None: the preset's own boundary data
    pub boundary: Option<BoundaryLiterals>,
    pub tolerance: String,
    pub max_steps: usize,
    pub precision: u32,
    pub parallel: bool,
    pub logging: LoggingOptions,
}

/// Final generation plus, when the boundary data are the preset's, the distance to the exact solution.
#[derive(Debug, Clone)]
pub struct TaskOutcome {
    pub solution: GreenSolution<Float>,
    pub max_error: Option<Float>,
}

const BOUNDARY_KEYS: [&str; 5] = ["c1", "c2", "c3", "c4", "c5"];

fn first_value<'a>(doc: &'a DocumentMap, section: &str, field: &str) -> Option<&'a Value> {
    doc.get(section)?.get(field)?.as_ref()?.first()
}

fn invalid(field: &str, value: &Value, reason: &str) -> TaskError {
    TaskError::Invalid {
        field: field.to_string(),
        value: value.to_string_value(),
        reason: reason.to_string(),
    }
}

fn decimal(doc: &DocumentMap, section: &str, field: &str, default: &str) -> Result<String, TaskError> {
    match first_value(doc, section, field) {
        None => Ok(default.to_string()),
        Some(v) => v
            .as_decimal_string()
            .ok_or_else(|| invalid(field, v, "a number is expected")),
    }
}

fn unsigned(doc: &DocumentMap, section: &str, field: &str, default: usize) -> Result<usize, TaskError> {
    match first_value(doc, section, field) {
        None => Ok(default),
        Some(v) => v
            .as_integer()
            .and_then(|i| usize::try_from(i).ok())
            .ok_or_else(|| invalid(field, v, "a non-negative integer is expected")),
    }
}

fn boolean(doc: &DocumentMap, section: &str, field: &str, default: bool) -> Result<bool, TaskError> {
    match first_value(doc, section, field) {
        None => Ok(default),
        Some(v) => v
            .as_boolean()
            .ok_or_else(|| invalid(field, v, "true or false is expected")),
    }
}

/// literal `e` or a decimal number
fn boundary_literal(doc: &DocumentMap, field: &str) -> Result<String, TaskError> {
    match first_value(doc, "boundary", field) {
        None => Err(TaskError::Missing {
            section: "boundary".to_string(),
            field: field.to_string(),
        }),
        Some(Value::String(s)) if s == "e" => Ok(s.clone()),
        Some(v) => v
            .as_decimal_string()
            .ok_or_else(|| invalid(field, v, "a number or e is expected")),
    }
}

fn logging_options(doc: &DocumentMap) -> Result<LoggingOptions, TaskError> {
    let mut options = LoggingOptions::default();
    if let Some(v) = first_value(doc, "logging", "loglevel") {
        let text = v.to_string_value();
        options.level = LevelFilter::from_str(&text)
            .map_err(|_| invalid("loglevel", v, "off, error, warn, info, debug or trace"))?;
    }
    if let Some(v) = first_value(doc, "logging", "log_file") {
        options.log_file = match v.to_string_value().as_str() {
            "none" | "None" | "false" => None,
            "auto" | "true" => Some(timestamped_log_name()),
            path => Some(PathBuf::from(path)),
        };
    }
    options.log_to_console = boolean(doc, "logging", "console", true)?;
    Ok(options)
}

fn parser_with_pseudonims(input: String) -> DocumentParser {
    let headers_pseudonims: HashMap<String, Vec<String>> = HashMap::from([
        (
            "solver_settings".to_string(),
            vec!["solve_settings".to_string(), "settings".to_string()],
        ),
        (
            "boundary".to_string(),
            vec!["bc".to_string(), "boundary_conditions".to_string()],
        ),
    ]);
    let field_name_pseudonims: HashMap<String, Vec<String>> = HashMap::from([
        ("tolerance".to_string(), vec!["tol".to_string(), "eps".to_string()]),
        (
            "max_steps".to_string(),
            vec!["max_iterations".to_string(), "maxsteps".to_string()],
        ),
        ("precision".to_string(), vec!["prec".to_string(), "bits".to_string()]),
    ]);
    let mut parser = DocumentParser::new(input);
    parser.with_pseudonims(Some(headers_pseudonims), Some(field_name_pseudonims));
    parser
}

impl GreenTask {
    /// Task of a preset with the default settings.
    pub fn for_preset(preset: Preset) -> Self {
        Self {
            preset,
            q: DEFAULT_Q.to_string(),
            a: "0".to_string(),
            b: "1".to_string(),
            n: DEFAULT_N,
            boundary: None,
            tolerance: DEFAULT_TOLERANCE.to_string(),
            max_steps: 0,
            precision: DEFAULT_PRECISION,
            parallel: true,
            logging: LoggingOptions::default(),
        }
    }

    pub fn from_document(doc: &DocumentMap) -> Result<Self, TaskError> {
        let preset_value = first_value(doc, "problem", "preset").ok_or_else(|| TaskError::Missing {
            section: "problem".to_string(),
            field: "preset".to_string(),
        })?;
        let preset_name = preset_value.to_string_value();
        let preset =
            Preset::from_str(&preset_name).map_err(|_| TaskError::UnknownPreset(preset_name.clone()))?;

        let boundary = if doc.contains_key("boundary") {
            let mut literals: BoundaryLiterals = Default::default();
            for (slot, key) in literals.iter_mut().zip(BOUNDARY_KEYS) {
                *slot = boundary_literal(doc, key)?;
            }
            Some(literals)
        } else {
            None
        };

        let precision = unsigned(doc, "solver_settings", "precision", DEFAULT_PRECISION as usize)?;
        let task = Self {
            preset,
            q: decimal(doc, "problem", "q", DEFAULT_Q)?,
            a: decimal(doc, "interval", "a", "0")?,
            b: decimal(doc, "interval", "b", "1")?,
            n: unsigned(doc, "interval", "n", DEFAULT_N)?,
            boundary,
            tolerance: decimal(doc, "solver_settings", "tolerance", DEFAULT_TOLERANCE)?,
            max_steps: unsigned(doc, "solver_settings", "max_steps", 0)?,
            precision: u32::try_from(precision).map_err(|_| TaskError::Invalid {
                field: "precision".to_string(),
                value: precision.to_string(),
                reason: "too large".to_string(),
            })?,
            parallel: boolean(doc, "solver_settings", "parallel", true)?,
            logging: logging_options(doc)?,
        };
        task.validate()?;
        Ok(task)
    }

    /// n ≥ 2, a < b, precision ≥ 2 and, in convergence mode, tolerance > 0.
    pub fn validate(&self) -> Result<(), TaskError> {
        let fail = |field: &str, value: String, reason: &str| -> Result<(), TaskError> {
            Err(TaskError::Invalid {
                field: field.to_string(),
                value,
                reason: reason.to_string(),
            })
        };
        if self.n < 2 {
            return fail("n", self.n.to_string(), "at least 2 subintervals are needed");
        }
        // precision below 2 bits is rejected by MPFR itself
        if self.precision < 2 {
            return fail("precision", self.precision.to_string(), "at least 2 bits");
        }
        let a = Float::from_decimal_str(&self.a, self.precision)?;
        let b = Float::from_decimal_str(&self.b, self.precision)?;
        if a >= b {
            return fail("b", self.b.clone(), "the interval must satisfy a < b");
        }
        let tolerance = Float::from_decimal_str(&self.tolerance, self.precision)?;
        if self.max_steps == 0 && tolerance <= 0 {
            return fail(
                "tolerance",
                self.tolerance.clone(),
                "must be positive when max_steps = 0",
            );
        }
        Float::from_decimal_str(&self.q, self.precision)?;
        Ok(())
    }

    pub fn from_file(path: &Path) -> Result<Self, TaskError> {
        let mut parser = parser_with_pseudonims(String::new());
        parser.setting_from_file(path.to_path_buf()).map_err(TaskError::Parse)?;
        let doc = parser.parse_document().map_err(TaskError::Parse)?;
        Self::from_document(&doc)
    }

    fn boundary_data<T: Real>(&self) -> Result<BoundaryData<T>, TaskError> {
        let Some(literals) = &self.boundary else {
            return Ok(self.preset.boundary(self.precision)?);
        };
        let value = |s: &String| -> Result<T, TaskError> {
            if s == "e" {
                Ok(T::from_int(1, self.precision).exp())
            } else {
                Ok(T::from_decimal_str(s, self.precision)?)
            }
        };
        Ok(BoundaryData {
            c1: value(&literals[0])?,
            c2: value(&literals[1])?,
            c3: value(&literals[2])?,
            c4: value(&literals[3])?,
            c5: value(&literals[4])?,
        })
    }

    /// The problem at the task's precision (f64 ignores it).
    pub fn problem<T: Real>(&self) -> Result<FifthOrderProblem<T, PresetKernel<T>>, TaskError> {
        let p = self.precision;
        Ok(FifthOrderProblem::new(
            T::from_decimal_str(&self.a, p)?,
            T::from_decimal_str(&self.b, p)?,
            self.n,
            self.boundary_data()?,
            T::from_decimal_str(&self.tolerance, p)?,
            self.max_steps,
            self.preset.kernel(T::from_decimal_str(&self.q, p)?),
        ))
    }

    /// Solves with MPFR numbers at the task's precision.
    pub fn solve(&self) -> Result<TaskOutcome, TaskError> {
        let problem = self.problem::<Float>()?;
        let kernel = problem.kernel.clone();
        info!("task: preset {}, n = {}, precision {} bits", self.preset, self.n, self.precision);
        let mut solver = GreenIterationSolver::new(problem);
        solver.set_parallel(self.parallel);
        let solution = solver.solve();
        let on_preset_data = self.boundary.is_none() && self.a == "0" && self.b == "1";
        let max_error = on_preset_data.then(|| solution.max_abs_error(|t| kernel.exact_solution(t)));
        Ok(TaskOutcome { solution, max_error })
    }
}

impl FromStr for GreenTask {
    type Err = TaskError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut parser = parser_with_pseudonims(input.to_string());
        let doc = parser.parse_document().map_err(TaskError::Parse)?;
        Self::from_document(&doc)
    }
}

/// Writes a commented task template; returns the path written.
pub fn create_template_file(path: Option<PathBuf>) -> Result<PathBuf, TaskError> {
    let form = r#"
// Fifth-order BVP task
problem
    // e^t, t^6 or 1/(t+1)
    preset: t^6
    // delay factor, used by e^t only
    q: 0.5
interval
    a: 0
    b: 1
    // number of subintervals, at least 2
    n: 100
// optional, remove the whole section to use the preset's data
// c4 and c5 accept the literal e
boundary
    c1: 0
    c2: 0
    c3: 0
    c4: 1
    c5: 6
solver_settings
    tolerance: 1e-15
    // 0: iterate until |max x_k - max x_k-1| < tolerance
    max_steps: 0
    // bits of every number
    precision: 128
    parallel: true
logging
    // off, error, warn, info, debug, trace
    loglevel: info
    // a path, auto or none
    log_file: none
    console: true
"#;
    let file_path = match path {
        Some(p) => p,
        None => {
            let mut default_path = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            default_path.push("green_bvp_task.txt");
            default_path
        }
    };
    let mut file = File::create(&file_path)?;
    file.write_all(form.as_bytes())?;
    info!("template file created at: {:?}", file_path);
    Ok(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::io::Write;
    use tempfile::tempdir;

    const FULL_TASK: &str = r#"
    // sixth power on a coarse grid
    problem
        preset: t^6
        q: 0.5
    interval
        a: 0  b: 1  n: 12
    boundary
        c1: 0
        c2: 0
        c3: 0
        c4: 1
        c5: 6
    solver_settings
        tolerance: 1e-20
        max_steps: 0
        precision: 96
        parallel: false
    logging
        loglevel: debug
        log_file: none
    "#;

    #[test]
    fn full_task_is_read_verbatim() {
        let task = GreenTask::from_str(FULL_TASK).unwrap();
        assert_eq!(task.preset, Preset::SixthPower);
        assert_eq!(task.n, 12);
        assert_eq!(task.tolerance, "1e-20");
        assert_eq!(task.precision, 96);
        assert!(!task.parallel);
        assert_eq!(task.logging.level, LevelFilter::Debug);
        assert_eq!(task.logging.log_file, None);
        let expected: BoundaryLiterals = ["0", "0", "0", "1", "6"].map(String::from);
        assert_eq!(task.boundary, Some(expected));
    }

    #[test]
    fn defaults_fill_missing_sections() {
        let task = GreenTask::from_str("problem\n preset: 1/(t+1)").unwrap();
        assert_eq!(task, GreenTask::for_preset(Preset::Reciprocal));
    }

    #[test]
    fn problem_is_built_at_task_precision() {
        let task = GreenTask::from_str(FULL_TASK).unwrap();
        let problem = task.problem::<Float>().unwrap();
        assert_eq!(problem.precision, 96);
        assert_eq!(problem.tolerance.prec(), 96);
        assert_eq!(problem.boundary.c5, Float::with_val(96, 6));
        let problem = task.problem::<f64>().unwrap();
        assert_eq!(problem.tolerance, 1e-20);
    }

    #[test]
    fn literal_e_in_boundary() {
        let input = "problem\n preset: e^t\nbc\n c1: 1\n c2: 1\n c3: 1\n c4: e\n c5: e";
        let task = GreenTask::from_str(input).unwrap();
        let problem = task.problem::<f64>().unwrap();
        assert_abs_diff_eq!(problem.boundary.c4, std::f64::consts::E, epsilon = 1e-15);
        assert_eq!(problem.boundary.c4, problem.boundary.c5);
    }

    #[test]
    fn aliases_are_accepted() {
        let input = "problem preset: t^6\nsettings tol: 1e-9 maxsteps: 3 bits: 64";
        let task = GreenTask::from_str(input).unwrap();
        assert_eq!(task.tolerance, "1e-9");
        assert_eq!(task.max_steps, 3);
        assert_eq!(task.precision, 64);
    }

    #[test]
    fn invalid_tasks_are_rejected() {
        assert!(matches!(
            GreenTask::from_str("problem\n preset: sin(t)"),
            Err(TaskError::UnknownPreset(_))
        ));
        assert!(matches!(
            GreenTask::from_str("problem\n q: 0.5"),
            Err(TaskError::Missing { .. })
        ));
        assert!(matches!(
            GreenTask::from_str("problem\n preset: t^6\ninterval\n n: 1"),
            Err(TaskError::Invalid { .. })
        ));
        assert!(matches!(
            GreenTask::from_str("problem\n preset: t^6\ninterval\n a: 1 b: 0"),
            Err(TaskError::Invalid { .. })
        ));
        assert!(matches!(
            GreenTask::from_str("problem\n preset: t^6\nsolver_settings\n tolerance: 0"),
            Err(TaskError::Invalid { .. })
        ));
        // a zero tolerance is fine with a fixed budget
        assert!(GreenTask::from_str("problem\n preset: t^6\nsolver_settings\n tolerance: 0 max_steps: 4").is_ok());
        assert!(matches!(
            GreenTask::from_str("problem\n preset: t^6\nsolver_settings\n precision: 1"),
            Err(TaskError::Invalid { .. })
        ));
        assert!(matches!(
            GreenTask::from_str("problem\n preset: t^6\nboundary\n c1: 0"),
            Err(TaskError::Missing { .. })
        ));
        assert!(matches!(GreenTask::from_str("not a task"), Err(TaskError::Parse(_))));
    }

    #[test]
    fn template_file_is_a_valid_task() {
        let dir = tempdir().unwrap();
        let path = create_template_file(Some(dir.path().join("task.txt"))).unwrap();
        let task = GreenTask::from_file(&path).unwrap();
        assert_eq!(task.preset, Preset::SixthPower);
        assert_eq!(task.n, 100);
        assert_eq!(task.precision, 128);
    }

    #[test]
    fn task_from_file_solves() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("task.txt");
        let mut file = File::create(&path).unwrap();
        write!(file, "{}", FULL_TASK).unwrap();
        let task = GreenTask::from_file(&path).unwrap();
        let outcome = task.solve().unwrap();
        assert_eq!(outcome.solution.x.len(), 13);
        // the boundary section is explicit, so no comparison with the preset
        assert!(outcome.max_error.is_none());

        let outcome = GreenTask::from_str("problem\n preset: t^6\ninterval\n n: 12\nsolver_settings\n precision: 96")
            .unwrap()
            .solve()
            .unwrap();
        let error = outcome.max_error.unwrap();
        assert!(error < 1e-12, "max error {}", error);
    }

    #[test]
    fn missing_file_is_a_parse_error() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            GreenTask::from_file(&dir.path().join("absent.txt")),
            Err(TaskError::Parse(_))
        ));
    }
}
