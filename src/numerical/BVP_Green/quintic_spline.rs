//! # Spline reconstruction of an iterate between grid points
//!
//! On every subinterval [t_{i-1}, t_i] the iterate is rebuilt from five data: the two node
//! values, the midpoint value and the two derivative-like quantities M. With τ = (T − t_{i-1})/h
//!
//! S(T) = A(τ)·x_{i-1} + B(τ)·z_i + C(τ)·x_i + D(τ)·h·M_{i-1} + E(τ)·h·M_i
//!
//! where
//! - A(τ) = (1−2τ)(1−τ)²(1+4τ)
//! - B(τ) = 16τ²(1−τ)²
//! - C(τ) = τ²(2τ−1)(1+4(1−τ))
//! - D(τ) = τ(1−2τ)(1−τ)²
//! - E(τ) = τ²(1−2τ)(1−τ)
//!
//! At τ = 0, ½, 1 the basis reduces to the node, midpoint and node values, and S'(t_{i-1}) = M_{i-1},
//! S'(t_i) = M_i.
//!
//! The spline is needed because the delayed argument φ(s) of the nonlinear term generally
//! falls between grid points.
use crate::numerical::BVP_Green::grid::Grid;
use crate::numerical::real_number::{Literals, Real};

/// A, B, C, D, E at normalized position τ
pub fn hermite_basis<T: Real>(tau: &T, lits: &Literals<T>) -> [T; 5] {
    let one_minus = lits.one.clone() - tau;
    let one_minus_2 = lits.one.clone() - lits.two.clone() * tau;
    let a = one_minus_2.clone() * &one_minus * &one_minus * &(lits.one.clone() + lits.four.clone() * tau);
    let b = lits.sixteen.clone() * tau * tau * &one_minus * &one_minus;
    let c = tau.clone()
        * tau
        * &(lits.two.clone() * tau - &lits.one)
        * &(lits.one.clone() + lits.four.clone() * &one_minus);
    let d = tau.clone() * &one_minus_2 * &one_minus * &one_minus;
    let e = tau.clone() * tau * &one_minus_2 * &one_minus;
    [a, b, c, d, e]
}

/// Read-only view of one iterate generation, evaluated as a piecewise spline.
#[derive(Debug, Clone, Copy)]
pub struct QuinticSpline<'a, T: Real> {
    grid: &'a Grid<T>,
    lits: &'a Literals<T>,
    /// values at t_0..t_n
    nodes: &'a [T],
    /// values at u_1..u_n
    mids: &'a [T],
    /// M_0..M_n
    derivs: &'a [T],
}

impl<'a, T: Real> QuinticSpline<'a, T> {
    pub fn new(
        grid: &'a Grid<T>,
        lits: &'a Literals<T>,
        nodes: &'a [T],
        mids: &'a [T],
        derivs: &'a [T],
    ) -> Self {
        debug_assert_eq!(nodes.len(), grid.n + 1);
        debug_assert_eq!(mids.len(), grid.n);
        debug_assert_eq!(derivs.len(), grid.n + 1);
        Self {
            grid,
            lits,
            nodes,
            mids,
            derivs,
        }
    }

    /// Smallest i in 1..=n with T ≤ t_i; abscissas beyond b fall into the last subinterval.
    pub fn locate(&self, x: &T) -> usize {
        let n = self.grid.n;
        let mut i = 1;
        while x > self.grid.t(i) && i < n {
            i += 1;
        }
        i
    }

    /// S(T)
    pub fn evaluate(&self, x: &T) -> T {
        let i = self.locate(x);
        let h = &self.grid.h;
        let tau = (x.clone() - self.grid.t(i - 1)) / h;
        let [a, b, c, d, e] = hermite_basis(&tau, self.lits);
        a * &self.nodes[i - 1]
            + b * &self.mids[i - 1]
            + c * &self.nodes[i]
            + d * h * &self.derivs[i - 1]
            + e * h * &self.derivs[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rug::Float;

    #[test]
    fn basis_interpolation_conditions() {
        let lits: Literals<f64> = Literals::new(53);
        assert_eq!(hermite_basis(&0.0, &lits), [1.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(hermite_basis(&0.5, &lits), [0.0, 1.0, 0.0, 0.0, 0.0]);
        assert_eq!(hermite_basis(&1.0, &lits), [0.0, 0.0, 1.0, 0.0, 0.0]);
        // derivative conditions: only D has unit slope at 0, only E at 1
        let d = 1e-6;
        let slope = |tau: f64, k: usize| {
            (hermite_basis(&(tau + d), &lits)[k] - hermite_basis(&(tau - d), &lits)[k]) / (2.0 * d)
        };
        for k in 0..5 {
            let expected0 = if k == 3 { 1.0 } else { 0.0 };
            let expected1 = if k == 4 { 1.0 } else { 0.0 };
            assert_abs_diff_eq!(slope(0.0, k), expected0, epsilon = 1e-8);
            assert_abs_diff_eq!(slope(1.0, k), expected1, epsilon = 1e-8);
        }
    }

    #[test]
    fn locate_picks_smallest_enclosing_subinterval() {
        let lits: Literals<f64> = Literals::new(53);
        let grid = Grid::new(&0.0, &1.0, 4, &lits);
        let zeros = vec![0.0; 5];
        let mids = vec![0.0; 4];
        let spline = QuinticSpline::new(&grid, &lits, &zeros, &mids, &zeros);
        assert_eq!(spline.locate(&0.0), 1);
        assert_eq!(spline.locate(&0.1), 1);
        assert_eq!(spline.locate(&0.25), 1);
        assert_eq!(spline.locate(&0.26), 2);
        assert_eq!(spline.locate(&0.75), 3);
        assert_eq!(spline.locate(&1.0), 4);
        assert_eq!(spline.locate(&1.5), 4);
    }

    /// node, midpoint and derivative reproduction on every subinterval of an arbitrary generation
    #[test]
    fn spline_reproduces_grid_data() {
        let prec = 160;
        let lits: Literals<Float> = Literals::new(prec);
        let n = 12;
        let grid = Grid::new(&lits.zero, &lits.one, n, &lits);
        // arbitrary, non-smooth data
        let nodes: Vec<Float> = (0..=n)
            .map(|i| Float::from_int(((i * 7) % 5) as i64 - 2, prec) / Float::from_int(3, prec))
            .collect();
        let mids: Vec<Float> = (1..=n)
            .map(|j| Float::from_int(((j * 3) % 4) as i64, prec) / Float::from_int(7, prec))
            .collect();
        let derivs: Vec<Float> = (0..=n)
            .map(|i| Float::from_int(i as i64 - 6, prec))
            .collect();
        let spline = QuinticSpline::new(&grid, &lits, &nodes, &mids, &derivs);
        let tol = Float::from_decimal_str("1e-40", prec).unwrap();
        // τ = 0 exactly at a
        assert_eq!(spline.evaluate(grid.t(0)), nodes[0]);
        for i in 1..=n {
            // elsewhere agreement is up to the rounding of τ
            assert!((spline.evaluate(grid.t(i - 1)) - &nodes[i - 1]).abs() < tol);
            assert!((spline.evaluate(grid.t(i)) - &nodes[i]).abs() < tol);
            assert!((spline.evaluate(grid.u(i)) - &mids[i - 1]).abs() < tol);
        }
    }

    #[test]
    fn spline_is_exact_for_quartics() {
        // x(t) = t⁴ − t² + 2 with exact M = x'
        let lits: Literals<f64> = Literals::new(53);
        let n = 8;
        let grid = Grid::new(&0.0, &1.0, n, &lits);
        let x = |t: f64| t.powi(4) - t * t + 2.0;
        let dx = |t: f64| 4.0 * t.powi(3) - 2.0 * t;
        let nodes: Vec<f64> = grid.nodes.iter().map(|t| x(*t)).collect();
        let mids: Vec<f64> = grid.midpoints.iter().map(|u| x(*u)).collect();
        let derivs: Vec<f64> = grid.nodes.iter().map(|t| dx(*t)).collect();
        let spline = QuinticSpline::new(&grid, &lits, &nodes, &mids, &derivs);
        for k in 0..=100 {
            let t = k as f64 / 100.0;
            assert_abs_diff_eq!(spline.evaluate(&t), x(t), epsilon = 1e-13);
        }
    }
}
