//! Derivative-like quantities M_i feeding the spline:
//! M_0 = c2, M_n = c5 and, for interior nodes,
//! M_i = (x_{i-1} − 8 z_i + 8 z_{i+1} − x_{i+1}) / (6h),
//! a centered difference over the four samples around t_i, exact for quartics.
use crate::numerical::BVP_Green::grid::Grid;
use crate::numerical::real_number::{Literals, Real};

/// Recompute all M_i from a freshly committed generation (`nodes` = x_0..x_n, `mids` = z_1..z_n).
pub fn recover_derivatives<T: Real>(
    grid: &Grid<T>,
    nodes: &[T],
    mids: &[T],
    m_left: &T,
    m_right: &T,
    lits: &Literals<T>,
) -> Vec<T> {
    let n = grid.n;
    let h6 = grid.h.clone() * &lits.six;
    let mut m = Vec::with_capacity(n + 1);
    m.push(m_left.clone());
    for i in 1..n {
        // z_i and z_{i+1} are stored at i-1 and i
        let value = (nodes[i - 1].clone() - lits.eight.clone() * &mids[i - 1]
            + lits.eight.clone() * &mids[i]
            - &nodes[i + 1])
            / &h6;
        m.push(value);
    }
    m.push(m_right.clone());
    m
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rug::Float;

    #[test]
    fn exact_for_quartic_data() {
        let lits: Literals<f64> = Literals::new(53);
        let grid = Grid::new(&0.0, &1.0, 10, &lits);
        let x = |t: f64| t.powi(4) - 2.0 * t.powi(3) + t;
        let dx = |t: f64| 4.0 * t.powi(3) - 6.0 * t * t + 1.0;
        let nodes: Vec<f64> = grid.nodes.iter().map(|t| x(*t)).collect();
        let mids: Vec<f64> = grid.midpoints.iter().map(|u| x(*u)).collect();
        let m = recover_derivatives(&grid, &nodes, &mids, &-7.0, &7.0, &lits);
        assert_eq!(m.len(), 11);
        assert_eq!(m[0], -7.0);
        assert_eq!(m[10], 7.0);
        for i in 1..10 {
            assert_abs_diff_eq!(m[i], dx(grid.nodes[i]), epsilon = 1e-12);
        }
    }

    #[test]
    fn boundary_entries_are_copied_exactly() {
        let prec = 128;
        let lits: Literals<Float> = Literals::new(prec);
        let grid = Grid::new(&lits.zero, &lits.one, 3, &lits);
        let nodes = vec![lits.one.clone(); 4];
        let mids = vec![lits.one.clone(); 3];
        let c2 = Float::from_decimal_str("-1", prec).unwrap();
        let c5 = Float::from_decimal_str("-0.25", prec).unwrap();
        let m = recover_derivatives(&grid, &nodes, &mids, &c2, &c5, &lits);
        assert_eq!(m[0], c2);
        assert_eq!(m[3], c5);
        // constant data has zero slope
        assert_eq!(m[1], lits.zero);
        assert_eq!(m[2], lits.zero);
    }
}
