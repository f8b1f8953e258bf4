//! # Green's-function solver for fifth-order boundary value problems
//!
//! Solves x⁽⁵⁾(t) = f(t, x(t), x(φ(t))) on [a, b] with x(a)=c1, x'(a)=c2, x''(a)=c3, x(b)=c4,
//! x'(b)=c5 by fixed-point iteration on the equivalent integral equation. Works with any
//! [`crate::numerical::real_number::Real`]: `f64` or MPFR numbers of arbitrary precision.
//!
//! ## Usage Example
//! ```rust
//! use FifthOrderGreenBVP::numerical::BVP_Green::Green_solver::{GreenIterationSolver, SolverStatus};
//! use FifthOrderGreenBVP::numerical::BVP_Green::problem_presets::Preset;
//! use FifthOrderGreenBVP::numerical::real_number::Real;
//! use rug::Float;
//! let prec = 128;
//! let tolerance = Float::from_decimal_str("1e-15", prec).unwrap();
//! let q = Float::from_decimal_str("0.5", prec).unwrap();
//! let problem = Preset::SixthPower.problem(20, tolerance, 0, q).unwrap();
//! let kernel = problem.kernel.clone();
//! let mut solver = GreenIterationSolver::new(problem);
//! let solution = solver.solve();
//! assert_eq!(solution.status, SolverStatus::Converged);
//! let error = solution.max_abs_error(|t| kernel.exact_solution(t));
//! assert!(error < 1e-12);
//! ```
/// derivative-like quantities M at the nodes
pub mod derivative_recovery;
/// H/K kernel and the boundary quartic
pub mod green_kernel;
pub mod grid;
/// composite 7-16-7 rule
pub mod quadrature;
pub mod quintic_spline;
pub mod problem;
/// e^t, t^6 and 1/(t+1) test problems with exact solutions
pub mod problem_presets;
/// iteration controller
pub mod Green_solver;
/// task files
pub mod task_parser_green;
