//! # Green's function of the fifth-order boundary operator and the boundary quartic
//!
//! On the unit interval the problem
//! x⁽⁵⁾(t) = f(t, x(t), x(φ(t))), x(0)=c1, x'(0)=c2, x''(0)=c3, x(1)=c4, x'(1)=c5
//! is equivalent to the integral equation
//! x(t) = g(t) + ∫₀¹ G(t,s) f(s, x(s), x(φ(s))) ds,
//! where g is the quartic matching the five boundary values and
//! G(t,s) = H(t,s) for s ≤ t, K(t,s) otherwise.
//!
//! A general interval [a,b] is mapped onto [0,1] by τ = (t - a)/L, L = b - a:
//! derivative data is scaled by powers of L and the kernel becomes L⁴·G(τ_t, τ_s).
//! For a = 0, b = 1 every scaling factor is exactly one.
use crate::numerical::real_number::{Literals, Real};

/// H(t,s) = s²(t−1)²/24 · (3s²t² + 2s²t + s² − 8st² − 4st + 6t²), the branch for s ≤ t
pub fn h_part<T: Real>(t: &T, s: &T, lits: &Literals<T>) -> T {
    let s2 = s.clone() * s;
    let t2 = t.clone() * t;
    let t_1 = t.clone() - &lits.one;
    let poly = lits.three.clone() * &s2 * &t2 + lits.two.clone() * &s2 * t + s2.clone()
        - lits.eight.clone() * s * &t2
        - lits.four.clone() * s * t
        + lits.six.clone() * &t2;
    s2 * &t_1 * &t_1 / &lits.twenty_four * &poly
}

/// K(t,s) = (s−1)³t³/24 · (t − 4s + 3ts), the branch for s > t
pub fn k_part<T: Real>(t: &T, s: &T, lits: &Literals<T>) -> T {
    let s_1 = s.clone() - &lits.one;
    let poly = t.clone() - lits.four.clone() * s + lits.three.clone() * t * s;
    s_1.clone() * &s_1 * &s_1 * t * t * t / &lits.twenty_four * &poly
}

/// G(t,s) on the unit square; evaluated pointwise, never tabulated
pub fn green<T: Real>(t: &T, s: &T, lits: &Literals<T>) -> T {
    if s <= t {
        h_part(t, s, lits)
    } else {
        k_part(t, s, lits)
    }
}

/// Green's function expressed in the physical variable of [a,b].
#[derive(Debug, Clone)]
pub struct GreenKernel<'a, T: Real> {
    lits: &'a Literals<T>,
    a: T,
    length: T,
    /// L⁴
    scale: T,
}

impl<'a, T: Real> GreenKernel<'a, T> {
    pub fn new(a: &T, b: &T, lits: &'a Literals<T>) -> Self {
        let length = b.clone() - a;
        let l2 = length.clone() * &length;
        let scale = l2.clone() * &l2;
        Self {
            lits,
            a: a.clone(),
            length,
            scale,
        }
    }

    /// τ = (t − a)/L
    pub fn normalize(&self, t: &T) -> T {
        (t.clone() - &self.a) / &self.length
    }

    /// L⁴·G(τ_t, τ_s)
    pub fn eval(&self, t: &T, s: &T) -> T {
        let tau_t = self.normalize(t);
        let tau_s = self.normalize(s);
        self.scale.clone() * &green(&tau_t, &tau_s, self.lits)
    }
}

/// The five boundary scalars: x(a), x'(a), x''(a), x(b), x'(b).
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryData<T> {
    pub c1: T,
    pub c2: T,
    pub c3: T,
    pub c4: T,
    pub c5: T,
}

/// Zeroth approximation g: the quartic satisfying g(a)=c1, g'(a)=c2, g''(a)=c3, g(b)=c4, g'(b)=c5.
#[derive(Debug, Clone)]
pub struct BoundaryQuartic<T: Real> {
    a: T,
    length: T,
    c1: T,
    c2: T,
    half_c3: T,
    quartic_coef: T,
    cubic_coef: T,
}

impl<T: Real> BoundaryQuartic<T> {
    pub fn new(a: &T, b: &T, bc: &BoundaryData<T>, lits: &Literals<T>) -> Self {
        let length = b.clone() - a;
        // derivative data in the normalized variable τ
        let c2 = bc.c2.clone() * &length;
        let c3 = bc.c3.clone() * &length * &length;
        let c5 = bc.c5.clone() * &length;
        let (c1, c4) = (&bc.c1, &bc.c4);
        let half_c3 = c3.clone() / &lits.two;
        let quartic_coef = c5.clone() - lits.three.clone() * c4 + half_c3.clone()
            + lits.two.clone() * &c2
            + lits.three.clone() * c1;
        let cubic_coef = lits.four.clone() * c4 - &c5 - &c3 - lits.three.clone() * &c2
            - lits.four.clone() * c1;
        Self {
            a: a.clone(),
            length,
            c1: c1.clone(),
            c2,
            half_c3,
            quartic_coef,
            cubic_coef,
        }
    }

    pub fn eval(&self, t: &T) -> T {
        let tau = (t.clone() - &self.a) / &self.length;
        self.quartic_coef.clone() * &tau * &tau * &tau * &tau
            + self.cubic_coef.clone() * &tau * &tau * &tau
            + self.half_c3.clone() * &tau * &tau
            + self.c2.clone() * &tau
            + &self.c1
    }
}
