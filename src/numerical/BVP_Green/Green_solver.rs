/*
Fixed-point iteration for fifth-order two-point boundary value problems
    x⁽⁵⁾(t) = f(t, x(t), x(φ(t))),  x(a)=c1, x'(a)=c2, x''(a)=c3, x(b)=c4, x'(b)=c5
written as the integral equation
    x(t) = g(t) + ∫ G(t,s)·f(s, x(s), x(φ(s))) ds
where g is the quartic satisfying the boundary data and G is the Green's function of x⁽⁵⁾.
Every pass evaluates the right-hand side on the nodes and midpoints of a uniform grid with the
composite 7-16-7 rule; the delayed argument φ(s) is read through the spline of the previous
generation, then the derivative-like quantities M feeding the next spline are recovered.
*/
use crate::numerical::BVP_Green::derivative_recovery::recover_derivatives;
use crate::numerical::BVP_Green::green_kernel::BoundaryQuartic;
use crate::numerical::BVP_Green::grid::Grid;
use crate::numerical::BVP_Green::problem::{FifthOrderProblem, ProblemKernel};
use crate::numerical::BVP_Green::quadrature::QuadratureEngine;
use crate::numerical::BVP_Green::quintic_spline::QuinticSpline;
use crate::numerical::real_number::{Literals, Real};
use log::{debug, info, warn};
use nalgebra::DVector;
use rayon::prelude::*;
use std::ops::Range;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use strum_macros::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SolverStatus {
    /// built, zeroth pass not done yet
    Init,
    Iterating,
    /// |Δmax| < ε
    Converged,
    /// max_steps passes done
    Exhausted,
}

pub struct GreenIterationSolver<T: Real, K: ProblemKernel<T>> {
    pub problem: FifthOrderProblem<T, K>,
    lits: Literals<T>,
    grid: Grid<T>,
    g: BoundaryQuartic<T>,
    xk: Vec<T>,      // x_0..x_n of the current generation
    xk_prev: Vec<T>, // x_0..x_n of the previous generation
    zk: Vec<T>,      // z_1..z_n, stored at 0..n-1
    zk_prev: Vec<T>,
    m: Vec<T>, // M_0..M_n recovered from xk, zk
    k: usize,
    status: SolverStatus,
    parallel: bool,
}

impl<T: Real, K: ProblemKernel<T>> GreenIterationSolver<T, K> {
    pub fn new(problem: FifthOrderProblem<T, K>) -> Self {
        let lits = Literals::new(problem.precision);
        let grid = Grid::new(&problem.a, &problem.b, problem.n, &lits);
        let g = BoundaryQuartic::new(&problem.a, &problem.b, &problem.boundary, &lits);
        Self {
            problem,
            lits,
            grid,
            g,
            xk: Vec::new(),
            xk_prev: Vec::new(),
            zk: Vec::new(),
            zk_prev: Vec::new(),
            m: Vec::new(),
            k: 0,
            status: SolverStatus::Init,
            parallel: true,
        }
    }

    /// Evaluate the nodes (and midpoints) of a pass with rayon; on by default.
    /// Both paths give bit-identical results since each entry is summed in the same order.
    pub fn set_parallel(&mut self, parallel: bool) {
        self.parallel = parallel;
    }

    pub fn status(&self) -> SolverStatus {
        self.status
    }
    pub fn k(&self) -> usize {
        self.k
    }
    pub fn grid(&self) -> &Grid<T> {
        &self.grid
    }
    pub fn literals(&self) -> &Literals<T> {
        &self.lits
    }
    pub fn boundary_quartic(&self) -> &BoundaryQuartic<T> {
        &self.g
    }
    pub fn xk(&self) -> &[T] {
        &self.xk
    }
    pub fn xk_prev(&self) -> &[T] {
        &self.xk_prev
    }
    pub fn zk(&self) -> &[T] {
        &self.zk
    }
    pub fn zk_prev(&self) -> &[T] {
        &self.zk_prev
    }
    pub fn m(&self) -> &[T] {
        &self.m
    }

    /// Zeroth pass: every sample of the integrand reads the boundary quartic g.
    pub fn initialize(&mut self) {
        let n = self.grid.n;
        let bc = &self.problem.boundary;
        // the first convergence test compares the zeroth pass with g itself
        let mut start = Vec::with_capacity(n + 1);
        start.push(bc.c1.clone());
        start.extend((1..n).map(|i| self.g.eval(self.grid.t(i))));
        start.push(bc.c4.clone());
        self.xk_prev = start;

        let (interior, mids) = {
            let engine = QuadratureEngine::new(&self.grid, &self.lits, &self.g, &self.problem.kernel);
            let grid = &self.grid;
            let interior = evaluate_points(self.parallel, 1..n, |i| engine.zeroth_pass_value(grid.t(i)));
            let mids = evaluate_points(self.parallel, 1..n + 1, |j| engine.zeroth_pass_value(grid.u(j)));
            (interior, mids)
        };
        self.zk_prev = mids.clone();
        self.commit(interior, mids);
        self.k = 1;
        self.status = SolverStatus::Iterating;
        debug!(
            "zeroth pass done, |Δmax| against the boundary quartic = {}",
            self.max_change().to_string_with_digits(6)
        );
    }

    /// One fixed-point pass. The node and midpoint passes both read the previous generation:
    /// grid values directly, φ(s) through the spline over (xk_prev, zk_prev, M).
    pub fn iterate_once(&mut self) {
        if self.status == SolverStatus::Init {
            self.initialize();
            return;
        }
        let n = self.grid.n;
        self.xk_prev.clone_from(&self.xk);
        self.zk_prev.clone_from(&self.zk);

        let (interior, mids) = {
            let engine = QuadratureEngine::new(&self.grid, &self.lits, &self.g, &self.problem.kernel);
            let spline = QuinticSpline::new(&self.grid, &self.lits, &self.xk_prev, &self.zk_prev, &self.m);
            let (grid, nodes, prev_mids) = (&self.grid, &self.xk_prev, &self.zk_prev);
            let interior = evaluate_points(self.parallel, 1..n, |i| {
                engine.iterate_value(grid.t(i), nodes, prev_mids, &spline)
            });
            let mids = evaluate_points(self.parallel, 1..n + 1, |j| {
                engine.iterate_value(grid.u(j), nodes, prev_mids, &spline)
            });
            (interior, mids)
        };
        self.commit(interior, mids);
        self.k += 1;
    }

    /// xk with the boundary values pinned, then M recovered from the committed generation.
    fn commit(&mut self, interior: Vec<T>, mids: Vec<T>) {
        let bc = &self.problem.boundary;
        let mut nodes = Vec::with_capacity(self.grid.n + 1);
        nodes.push(bc.c1.clone());
        nodes.extend(interior);
        nodes.push(bc.c4.clone());
        self.m = recover_derivatives(&self.grid, &nodes, &mids, &bc.c2, &bc.c5, &self.lits);
        self.xk = nodes;
        self.zk = mids;
    }

    /// Nodes whose maxima are compared: 1..=n-2, or the whole interior on a two-interval grid.
    pub fn convergence_window(&self) -> Range<usize> {
        let n = self.grid.n;
        if n > 2 { 1..n - 1 } else { 1..n }
    }

    /// |max xk − max xk_prev| over the convergence window
    pub fn max_change(&self) -> T {
        let window = self.convergence_window();
        match (max_of(&self.xk[window.clone()]), max_of(&self.xk_prev[window])) {
            (Some(current), Some(previous)) => (current - &previous).abs(),
            // a single subinterval has no interior node
            _ => self.lits.zero.clone(),
        }
    }

    /// Fixed budget: k ≥ max_steps. Otherwise |Δmax| < ε.
    pub fn solution_is_good_enough(&self) -> bool {
        if self.problem.max_steps != 0 {
            return self.problem.max_steps <= self.k;
        }
        self.max_change() < self.problem.tolerance
    }

    /// Runs until convergence or until the step budget is spent.
    /// With max_steps = 0 and a problem that never settles this does not return.
    pub fn solve(&mut self) -> GreenSolution<T> {
        let begin = Instant::now();
        info!(
            "solving fifth-order BVP on [{}, {}] with n = {}, precision = {} bits, {}",
            self.problem.a.to_string_with_digits(10),
            self.problem.b.to_string_with_digits(10),
            self.grid.n,
            self.problem.precision,
            if self.problem.max_steps == 0 {
                format!("tolerance = {}", self.problem.tolerance.to_string_with_digits(6))
            } else {
                format!("fixed budget of {} passes", self.problem.max_steps)
            }
        );
        if self.status == SolverStatus::Init {
            self.initialize();
        }
        while !self.solution_is_good_enough() {
            self.iterate_once();
            debug!(
                "pass {}: |Δmax| = {}",
                self.k,
                self.max_change().to_string_with_digits(6)
            );
        }
        self.status = if self.problem.max_steps != 0 {
            warn!("step budget of {} passes used up, returning the last generation", self.problem.max_steps);
            SolverStatus::Exhausted
        } else {
            SolverStatus::Converged
        };
        let elapsed = begin.elapsed();
        info!("{} after k = {} passes in {:?}", self.status, self.k, elapsed);
        self.solution(elapsed)
    }

    fn solution(&self, elapsed: Duration) -> GreenSolution<T> {
        GreenSolution {
            grid: self.grid.clone(),
            lits: self.lits.clone(),
            t_mesh: DVector::from_vec(self.grid.nodes.clone()),
            x: DVector::from_vec(self.xk.clone()),
            mids: self.zk.clone(),
            m: self.m.clone(),
            k: self.k,
            status: self.status,
            elapsed,
        }
    }
}

impl<T: Real, K: ProblemKernel<T> + 'static> GreenIterationSolver<T, K> {
    /// Moves the whole solve to its own thread; join the handle to await the result.
    pub fn solve_in_background(mut self) -> JoinHandle<GreenSolution<T>> {
        thread::spawn(move || self.solve())
    }
}

fn evaluate_points<T, F>(parallel: bool, range: Range<usize>, point: F) -> Vec<T>
where
    T: Real,
    F: Fn(usize) -> T + Sync + Send,
{
    if parallel {
        range.into_par_iter().map(point).collect()
    } else {
        range.map(point).collect()
    }
}

fn max_of<T: Real>(values: &[T]) -> Option<T> {
    let (first, rest) = values.split_first()?;
    let mut best = first;
    for v in rest {
        if v > best {
            best = v;
        }
    }
    Some(best.clone())
}

/// Final generation of a solve together with the mesh it lives on.
#[derive(Debug, Clone)]
pub struct GreenSolution<T: Real> {
    grid: Grid<T>,
    lits: Literals<T>,
    pub t_mesh: DVector<T>,
    /// x at t_0..t_n
    pub x: DVector<T>,
    /// z at u_1..u_n
    pub mids: Vec<T>,
    /// M_0..M_n
    pub m: Vec<T>,
    pub k: usize,
    pub status: SolverStatus,
    pub elapsed: Duration,
}

impl<T: Real> GreenSolution<T> {
    /// Evaluator for off-grid abscissas over the final generation.
    pub fn spline(&self) -> QuinticSpline<'_, T> {
        QuinticSpline::new(&self.grid, &self.lits, self.x.as_slice(), &self.mids, &self.m)
    }

    /// x_i − x*(t_i) for every node
    pub fn errors<F: Fn(&T) -> T>(&self, exact: F) -> Vec<T> {
        self.t_mesh
            .iter()
            .zip(self.x.iter())
            .map(|(t, x)| x.clone() - &exact(t))
            .collect()
    }

    pub fn max_abs_error<F: Fn(&T) -> T>(&self, exact: F) -> T {
        let abs: Vec<T> = self.errors(exact).into_iter().map(|e| e.abs()).collect();
        max_of(&abs).unwrap_or_else(|| self.lits.zero.clone())
    }
}
