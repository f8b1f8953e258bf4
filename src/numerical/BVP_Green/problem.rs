//! Problem definition: interval, grid size, boundary data, stopping rule and the problem kernel.
use crate::numerical::BVP_Green::green_kernel::BoundaryData;
use crate::numerical::real_number::Real;
use std::fmt;

/// The two pure functions defining the right-hand side x⁽⁵⁾(t) = f(t, x(t), x(φ(t))).
pub trait ProblemKernel<T: Real>: Send + Sync {
    /// nonlinear right-hand side f(s, v, w)
    fn f(&self, s: &T, v: &T, w: &T) -> T;
    /// argument transformation φ(t)
    fn phi(&self, t: &T) -> T;
}

impl<T: Real, K: ProblemKernel<T> + ?Sized> ProblemKernel<T> for Box<K> {
    fn f(&self, s: &T, v: &T, w: &T) -> T {
        (**self).f(s, v, w)
    }
    fn phi(&self, t: &T) -> T {
        (**self).phi(t)
    }
}

/// Adapts a pair of closures to [`ProblemKernel`].
pub struct ClosureKernel<F, P> {
    pub f: F,
    pub phi: P,
}

impl<F, P> ClosureKernel<F, P> {
    pub fn new(f: F, phi: P) -> Self {
        Self { f, phi }
    }
}

impl<T, F, P> ProblemKernel<T> for ClosureKernel<F, P>
where
    T: Real,
    F: Fn(&T, &T, &T) -> T + Send + Sync,
    P: Fn(&T) -> T + Send + Sync,
{
    fn f(&self, s: &T, v: &T, w: &T) -> T {
        (self.f)(s, v, w)
    }
    fn phi(&self, t: &T) -> T {
        (self.phi)(t)
    }
}

/// A fifth-order two-point BVP ready to be solved; read-only once built.
pub struct FifthOrderProblem<T: Real, K: ProblemKernel<T>> {
    pub a: T,
    pub b: T,
    /// number of subintervals, n >= 2
    pub n: usize,
    pub boundary: BoundaryData<T>,
    /// ε of the convergence test; unused when `max_steps > 0`
    pub tolerance: T,
    /// 0: iterate to convergence; N > 0: run exactly N passes
    pub max_steps: usize,
    /// precision (bits) of every literal the solver creates
    pub precision: u32,
    pub kernel: K,
}

impl<T: Real, K: ProblemKernel<T>> FifthOrderProblem<T, K> {
    pub fn new(
        a: T,
        b: T,
        n: usize,
        boundary: BoundaryData<T>,
        tolerance: T,
        max_steps: usize,
        kernel: K,
    ) -> Self {
        let precision = a.precision();
        Self {
            a,
            b,
            n,
            boundary,
            tolerance,
            max_steps,
            precision,
            kernel,
        }
    }
}

impl<T: Real, K: ProblemKernel<T>> fmt::Debug for FifthOrderProblem<T, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FifthOrderProblem")
            .field("a", &self.a)
            .field("b", &self.b)
            .field("n", &self.n)
            .field("boundary", &self.boundary)
            .field("tolerance", &self.tolerance)
            .field("max_steps", &self.max_steps)
            .field("precision", &self.precision)
            .finish_non_exhaustive()
    }
}
