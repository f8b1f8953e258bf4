//! # Composite quadrature of the correction integral
//!
//! For an evaluation point p (a node t_i or a midpoint u_i) the correction term is
//!
//! Σ_{j=1..n} [7·F(p,t_{j-1}) + 16·F(p,u_j) + 7·F(p,t_j)] · h/30,
//! F(p,s) = G(p,s)·f(s, x(s), x(φ(s))).
//!
//! The rule is fixed: the same weights at every node of every pass, no adaptive refinement.
//! x(s) comes from the boundary quartic g on the zeroth pass and from the previous generation
//! afterwards, where x(φ(s)) is read through the spline reconstruction.
use crate::numerical::BVP_Green::green_kernel::{BoundaryQuartic, GreenKernel};
use crate::numerical::BVP_Green::grid::Grid;
use crate::numerical::BVP_Green::problem::ProblemKernel;
use crate::numerical::BVP_Green::quintic_spline::QuinticSpline;
use crate::numerical::real_number::{Literals, Real};

/// Where the integrand is sampled inside the composite rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplePoint {
    /// t_j, j in 0..=n
    Node(usize),
    /// u_j, j in 1..=n
    Midpoint(usize),
}

/// Σ_{j=1..n} [7·F(t_{j-1}) + 16·F(u_j) + 7·F(t_j)] · h/30
pub fn composite_sum<T: Real, F>(grid: &Grid<T>, lits: &Literals<T>, mut integrand: F) -> T
where
    F: FnMut(SamplePoint) -> T,
{
    let h_30 = grid.h.clone() / &lits.thirty;
    let mut sum = lits.zero.clone();
    for j in 1..=grid.n {
        let left = integrand(SamplePoint::Node(j - 1));
        let mid = integrand(SamplePoint::Midpoint(j));
        let right = integrand(SamplePoint::Node(j));
        sum = sum
            + (lits.seven.clone() * &left + lits.sixteen.clone() * &mid + lits.seven.clone() * &right);
    }
    h_30 * &sum
}

/// Evaluates x(p) = g(p) + ∫ G(p,s)·f(s, x(s), x(φ(s))) ds for one generation.
pub struct QuadratureEngine<'a, T: Real, K: ProblemKernel<T>> {
    grid: &'a Grid<T>,
    lits: &'a Literals<T>,
    green: GreenKernel<'a, T>,
    g: &'a BoundaryQuartic<T>,
    kernel: &'a K,
}

impl<'a, T: Real, K: ProblemKernel<T>> QuadratureEngine<'a, T, K> {
    pub fn new(
        grid: &'a Grid<T>,
        lits: &'a Literals<T>,
        g: &'a BoundaryQuartic<T>,
        kernel: &'a K,
    ) -> Self {
        Self {
            grid,
            lits,
            green: GreenKernel::new(&grid.a, &grid.b, lits),
            g,
            kernel,
        }
    }

    fn abscissa(&self, point: SamplePoint) -> &'a T {
        match point {
            SamplePoint::Node(j) => self.grid.t(j),
            SamplePoint::Midpoint(j) => self.grid.u(j),
        }
    }

    /// zeroth pass: x(s) = g(s) everywhere
    pub fn zeroth_pass_value(&self, p: &T) -> T {
        let correction = composite_sum(self.grid, self.lits, |point| {
            let s = self.abscissa(point);
            let v = self.g.eval(s);
            let w = self.g.eval(&self.kernel.phi(s));
            self.green.eval(p, s) * &self.kernel.f(s, &v, &w)
        });
        self.g.eval(p) + &correction
    }

    /// later passes: grid values of the previous generation, the delayed argument through the spline
    pub fn iterate_value(&self, p: &T, prev_nodes: &[T], prev_mids: &[T], spline: &QuinticSpline<'_, T>) -> T {
        let correction = composite_sum(self.grid, self.lits, |point| {
            let s = self.abscissa(point);
            let v = match point {
                SamplePoint::Node(j) => &prev_nodes[j],
                SamplePoint::Midpoint(j) => &prev_mids[j - 1],
            };
            let w = spline.evaluate(&self.kernel.phi(s));
            self.green.eval(p, s) * &self.kernel.f(s, v, &w)
        });
        self.g.eval(p) + &correction
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numerical::BVP_Green::green_kernel::{BoundaryData, green};
    use crate::numerical::BVP_Green::problem::ClosureKernel;
    use approx::assert_abs_diff_eq;

    #[test]
    fn sample_order_and_weights() {
        let lits: Literals<f64> = Literals::new(53);
        let grid = Grid::new(&0.0, &1.0, 3, &lits);
        let mut visited = Vec::new();
        let total = composite_sum(&grid, &lits, |p| {
            visited.push(p);
            1.0
        });
        // weights add up to 30 per subinterval, so a constant integrates exactly
        assert_abs_diff_eq!(total, 1.0, epsilon = 1e-15);
        assert_eq!(visited.len(), 9);
        assert_eq!(
            &visited[0..3],
            &[SamplePoint::Node(0), SamplePoint::Midpoint(1), SamplePoint::Node(1)]
        );
        assert_eq!(visited[8], SamplePoint::Node(3));
    }

    #[test]
    fn exact_for_quintics_with_flat_ends() {
        // the end-derivative terms of the rule telescope away when f'(a) = f'(b) = 0
        let lits: Literals<f64> = Literals::new(53);
        let grid = Grid::new(&0.0, &2.0, 4, &lits);
        let f = |s: f64| s * s * (2.0 - s).powi(2) * (1.0 + s);
        let total = composite_sum(&grid, &lits, |p| match p {
            SamplePoint::Node(j) => f(grid.nodes[j]),
            SamplePoint::Midpoint(j) => f(grid.midpoints[j - 1]),
        });
        assert_abs_diff_eq!(total, 32.0 / 15.0, epsilon = 1e-13);
    }

    #[test]
    fn zeroth_pass_with_vanishing_rhs_is_the_quartic() {
        let lits: Literals<f64> = Literals::new(53);
        let grid = Grid::new(&0.0, &1.0, 10, &lits);
        let bc = BoundaryData {
            c1: 1.0,
            c2: -1.0,
            c3: 2.0,
            c4: 0.5,
            c5: -0.25,
        };
        let g = BoundaryQuartic::new(&0.0, &1.0, &bc, &lits);
        let kernel = ClosureKernel::new(|_s: &f64, _v: &f64, _w: &f64| 0.0, |t: &f64| *t);
        let engine = QuadratureEngine::new(&grid, &lits, &g, &kernel);
        for t in grid.nodes.iter() {
            assert_eq!(engine.zeroth_pass_value(t), g.eval(t));
        }
    }

    #[test]
    fn constant_rhs_matches_integrated_kernel() {
        // f ≡ 1: x(t) − g(t) = ∫₀¹ G(t,s) ds = t³(t−1)²/120 and the rule hits it at every node
        let lits: Literals<f64> = Literals::new(53);
        let grid = Grid::new(&0.0, &1.0, 20, &lits);
        let bc = BoundaryData {
            c1: 0.0,
            c2: 0.0,
            c3: 0.0,
            c4: 0.0,
            c5: 0.0,
        };
        let g = BoundaryQuartic::new(&0.0, &1.0, &bc, &lits);
        let kernel = ClosureKernel::new(|_s: &f64, _v: &f64, _w: &f64| 1.0, |t: &f64| *t);
        let engine = QuadratureEngine::new(&grid, &lits, &g, &kernel);
        for i in [3, 10, 17] {
            let t = grid.nodes[i];
            let reference = t.powi(3) * (t - 1.0).powi(2) / 120.0;
            assert_abs_diff_eq!(engine.zeroth_pass_value(&t), reference, epsilon = 1e-15);
        }
        // the kernel vanishes on the boundary
        assert_eq!(green(&1.0, &0.3, &lits), 0.0);
    }
}
