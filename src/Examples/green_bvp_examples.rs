#![allow(non_snake_case)]
use crate::numerical::BVP_Green::Green_solver::GreenIterationSolver;
use crate::numerical::BVP_Green::green_kernel::BoundaryData;
use crate::numerical::BVP_Green::problem::{ClosureKernel, FifthOrderProblem};
use crate::numerical::BVP_Green::problem_presets::{DEFAULT_PRECISION, Preset};
use crate::numerical::BVP_Green::task_parser_green::{GreenTask, create_template_file};
use crate::numerical::real_number::Real;
use rug::Float;
use std::env;
use strum::IntoEnumIterator;

pub fn green_bvp_examples(example: usize) {
    match example {
        0 => {
            // t^6 with plain f64: fast, accuracy limited by double precision
            let problem = Preset::SixthPower.problem(100, 1e-14_f64, 0, 0.5).unwrap();
            let kernel = problem.kernel.clone();
            let mut solver = GreenIterationSolver::new(problem);
            let solution = solver.solve();
            let error = solution.max_abs_error(|t| kernel.exact_solution(t));
            println!(
                "t^6 (f64): k = {}, max error = {:e}, elapsed {:?}",
                solution.k, error, solution.elapsed
            );
        }
        1 => {
            // 1/(t+1) with the default settings: n = 100, ε = 1e-15, 128 bits
            let problem = Preset::Reciprocal.default_problem::<Float>(DEFAULT_PRECISION).unwrap();
            let kernel = problem.kernel.clone();
            let solution = GreenIterationSolver::new(problem).solve();
            let error = solution.max_abs_error(|t| kernel.exact_solution(t));
            println!(
                "1/(t+1) (128 bits): k = {}, max error = {}",
                solution.k,
                error.to_string_with_digits(5)
            );
            let spline = solution.spline();
            let t = Float::from_decimal_str("0.333", DEFAULT_PRECISION).unwrap();
            println!(
                "x(0.333) = {}, exact {}",
                spline.evaluate(&t).to_string_with_digits(30),
                kernel.exact_solution(&t).to_string_with_digits(30)
            );
        }
        2 => {
            // e^t at 256 bits with a tolerance far below double precision
            let prec = 256;
            let tolerance = Float::from_decimal_str("1e-40", prec).unwrap();
            let q = Float::from_decimal_str("0.5", prec).unwrap();
            let problem = Preset::ExpT.problem(100, tolerance, 0, q).unwrap();
            let kernel = problem.kernel.clone();
            let solution = GreenIterationSolver::new(problem).solve();
            for (t, e) in solution
                .t_mesh
                .iter()
                .zip(solution.errors(|t| kernel.exact_solution(t)))
                .step_by(10)
            {
                println!("t = {:>5}  error = {}", t.to_string_with_digits(3), e.to_string_with_digits(5));
            }
        }
        3 => {
            // user defined problem on [1, 2]: x⁽⁵⁾ = 720t + x(t) − t⁶, exact solution t⁶
            let kernel = ClosureKernel::new(
                |s: &f64, v: &f64, _w: &f64| 720.0 * s + v - s.powi(6),
                |t: &f64| *t,
            );
            let bc = BoundaryData {
                c1: 1.0,
                c2: 6.0,
                c3: 30.0,
                c4: 64.0,
                c5: 192.0,
            };
            // fixed budget of 8 passes, the tolerance is not used
            let problem = FifthOrderProblem::new(1.0, 2.0, 50, bc, 0.0, 8, kernel);
            let solution = GreenIterationSolver::new(problem).solve();
            println!(
                "[1, 2]: status {}, k = {}, max error = {:e}",
                solution.status,
                solution.k,
                solution.max_abs_error(|t| t.powi(6))
            );
        }
        4 => {
            // all presets at once, each solve on its own thread
            let handles: Vec<_> = Preset::iter()
                .map(|preset| {
                    let problem = preset.default_problem::<Float>(DEFAULT_PRECISION).unwrap();
                    (preset, GreenIterationSolver::new(problem).solve_in_background())
                })
                .collect();
            for (preset, handle) in handles {
                let solution = handle.join().unwrap();
                println!("{}: {} after k = {} in {:?}", preset, solution.status, solution.k, solution.elapsed);
            }
        }
        5 => {
            // task file round trip
            let mut path = env::temp_dir();
            path.push("green_bvp_task.txt");
            let path = create_template_file(Some(path)).unwrap();
            let mut task = GreenTask::from_file(&path).unwrap();
            task.n = 40;
            // compare with t⁶ through the preset's own boundary data
            task.boundary = None;
            let outcome = task.solve().unwrap();
            println!(
                "task {:?}: k = {}, max error = {:?}",
                path,
                outcome.solution.k,
                outcome.max_error.map(|e| e.to_string_with_digits(5))
            );
        }
        _ => {
            println!("no such example: {}", example);
        }
    }
}
