//! Uniform grid on [a, b]: n + 1 nodes and n midpoints.
use crate::numerical::real_number::{Literals, Real};

#[derive(Debug, Clone)]
pub struct Grid<T: Real> {
    pub a: T,
    pub b: T,
    pub n: usize,
    /// step (b - a)/n
    pub h: T,
    /// t_0..t_n
    pub nodes: Vec<T>,
    /// u_1..u_n stored at positions 0..n-1
    pub midpoints: Vec<T>,
}

impl<T: Real> Grid<T> {
    /// t_i = a + i*h, u_j = (t_{j-1} + t_j)/2. n = 0 is excluded by the caller.
    pub fn new(a: &T, b: &T, n: usize, lits: &Literals<T>) -> Self {
        assert!(n > 0, "grid needs at least one subinterval");
        let n_t = lits.int(n as i64);
        let h = (b.clone() - a) / &n_t;
        let mut nodes: Vec<T> = (0..n)
            .map(|i| a.clone() + &(lits.int(i as i64) * &h))
            .collect();
        // last node is b itself, so that t_n == b holds without rounding drift
        nodes.push(b.clone());
        let midpoints = (1..=n)
            .map(|j| (nodes[j - 1].clone() + &nodes[j]) / &lits.two)
            .collect();
        Self {
            a: a.clone(),
            b: b.clone(),
            n,
            h,
            nodes,
            midpoints,
        }
    }

    /// t_i
    pub fn t(&self, i: usize) -> &T {
        &self.nodes[i]
    }

    /// u_j, j in 1..=n
    pub fn u(&self, j: usize) -> &T {
        &self.midpoints[j - 1]
    }

    /// length of the whole interval
    pub fn length(&self) -> T {
        self.b.clone() - &self.a
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rug::Float;

    fn check_invariants<T: Real>(grid: &Grid<T>, lits: &Literals<T>) {
        assert_eq!(grid.nodes.len(), grid.n + 1);
        assert_eq!(grid.midpoints.len(), grid.n);
        assert!(grid.nodes[0] == grid.a);
        assert!(grid.nodes[grid.n] == grid.b);
        for i in 1..=grid.n {
            assert!(grid.t(i - 1) < grid.t(i), "nodes must increase strictly");
            let mid = (grid.t(i - 1).clone() + grid.t(i)) / &lits.two;
            assert!(*grid.u(i) == mid);
            assert!(grid.t(i - 1) < grid.u(i) && grid.u(i) < grid.t(i));
        }
    }

    #[test]
    fn unit_interval_f64() {
        let lits: Literals<f64> = Literals::new(53);
        for n in [2, 3, 7, 10, 100, 1000] {
            let grid = Grid::new(&0.0, &1.0, n, &lits);
            check_invariants(&grid, &lits);
            assert_eq!(grid.h, 1.0 / n as f64);
        }
    }

    #[test]
    fn shifted_interval_float() {
        let prec = 160;
        let lits: Literals<Float> = Literals::new(prec);
        let a = Float::from_decimal_str("-0.3", prec).unwrap();
        let b = Float::from_decimal_str("2.7", prec).unwrap();
        for n in [2, 5, 64, 101] {
            let grid = Grid::new(&a, &b, n, &lits);
            check_invariants(&grid, &lits);
        }
    }

    #[test]
    #[should_panic]
    fn zero_subintervals() {
        let lits: Literals<f64> = Literals::new(53);
        let _ = Grid::new(&0.0, &1.0, 0, &lits);
    }
}
