/// numeric contract: f64 and MPFR numbers behind one trait
pub mod real_number;
/// fixed-point Green's-function solver of fifth-order BVPs
/// ```
/// use FifthOrderGreenBVP::numerical::BVP_Green::Green_solver::GreenIterationSolver;
/// use FifthOrderGreenBVP::numerical::BVP_Green::problem_presets::Preset;
/// let problem = Preset::Reciprocal.problem(16, 1e-12_f64, 0, 0.5).unwrap();
/// let solution = GreenIterationSolver::new(problem).solve();
/// println!("k = {}, x = {}", solution.k, solution.x);
/// ```
pub mod BVP_Green;
