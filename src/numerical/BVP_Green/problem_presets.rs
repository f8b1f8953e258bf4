//! # Test problems with known exact solutions
//!
//! Each preset provides the pair (f, φ) of a fifth-order BVP on [0, 1], its boundary data and
//! the exact solution x*(t), so that the solver's result can be checked node by node.
//!
//! | preset    | f(s, v, w)                                   | φ(t) | x*(t)     |
//! |-----------|----------------------------------------------|------|-----------|
//! | `e^t`     | v/2 + e^{(1−q)s}·w/2                         | q·t  | e^t       |
//! | `t^6`     | 720s + v·w/4 − v³/4                          | t²   | t⁶        |
//! | `1/(t+1)` | −120/(s+1)⁶ + (s+2)/10·v²·w − v/(5(s+1))     | t/2  | 1/(t+1)   |
use crate::numerical::BVP_Green::green_kernel::BoundaryData;
use crate::numerical::BVP_Green::problem::{FifthOrderProblem, ProblemKernel};
use crate::numerical::real_number::{RealParseError, Real};
use strum_macros::{Display, EnumIter, EnumString};

pub const DEFAULT_N: usize = 100;
pub const DEFAULT_TOLERANCE: &str = "0.000000000000001";
pub const DEFAULT_Q: &str = "0.5";
pub const DEFAULT_PRECISION: u32 = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
pub enum Preset {
    #[strum(serialize = "e^t")]
    ExpT,
    #[strum(serialize = "t^6")]
    SixthPower,
    #[strum(serialize = "1/(t+1)")]
    Reciprocal,
}

impl Preset {
    /// x(0), x'(0), x''(0), x(1), x'(1) of the exact solution
    pub fn boundary<T: Real>(&self, precision: u32) -> Result<BoundaryData<T>, RealParseError> {
        let lit = |s: &str| T::from_decimal_str(s, precision);
        let bc = match self {
            Preset::ExpT => {
                let e = T::from_int(1, precision).exp();
                BoundaryData {
                    c1: lit("1")?,
                    c2: lit("1")?,
                    c3: lit("1")?,
                    c4: e.clone(),
                    c5: e,
                }
            }
            Preset::SixthPower => BoundaryData {
                c1: lit("0")?,
                c2: lit("0")?,
                c3: lit("0")?,
                c4: lit("1")?,
                c5: lit("6")?,
            },
            Preset::Reciprocal => BoundaryData {
                c1: lit("1")?,
                c2: lit("-1")?,
                c3: lit("2")?,
                c4: lit("0.5")?,
                c5: lit("-0.25")?,
            },
        };
        Ok(bc)
    }

    pub fn kernel<T: Real>(&self, q: T) -> PresetKernel<T> {
        PresetKernel::new(*self, q)
    }

    /// Problem on [0, 1] with the preset's boundary data; the precision is the tolerance's.
    pub fn problem<T: Real>(
        &self,
        n: usize,
        tolerance: T,
        max_steps: usize,
        q: T,
    ) -> Result<FifthOrderProblem<T, PresetKernel<T>>, RealParseError> {
        let precision = tolerance.precision();
        let boundary = self.boundary(precision)?;
        let a = T::from_int(0, precision);
        let b = T::from_int(1, precision);
        Ok(FifthOrderProblem::new(
            a,
            b,
            n,
            boundary,
            tolerance,
            max_steps,
            self.kernel(q),
        ))
    }

    /// Problem with the defaults of the original presets: n = 100, ε = 1e-15, q = 0.5.
    pub fn default_problem<T: Real>(
        &self,
        precision: u32,
    ) -> Result<FifthOrderProblem<T, PresetKernel<T>>, RealParseError> {
        let tolerance = T::from_decimal_str(DEFAULT_TOLERANCE, precision)?;
        let q = T::from_decimal_str(DEFAULT_Q, precision)?;
        self.problem(DEFAULT_N, tolerance, 0, q)
    }
}

/// f and φ of a [`Preset`], with its literals prebuilt at the precision of q.
#[derive(Debug, Clone)]
pub struct PresetKernel<T: Real> {
    pub preset: Preset,
    /// delay factor of the `e^t` preset
    pub q: T,
    one: T,
    two: T,
    four: T,
    five: T,
    ten: T,
    hundred_twenty: T,
    seven_hundred_twenty: T,
    six: T,
}

impl<T: Real> PresetKernel<T> {
    pub fn new(preset: Preset, q: T) -> Self {
        let p = q.precision();
        Self {
            preset,
            q,
            one: T::from_int(1, p),
            two: T::from_int(2, p),
            four: T::from_int(4, p),
            five: T::from_int(5, p),
            ten: T::from_int(10, p),
            hundred_twenty: T::from_int(120, p),
            seven_hundred_twenty: T::from_int(720, p),
            six: T::from_int(6, p),
        }
    }

    /// x*(t)
    pub fn exact_solution(&self, t: &T) -> T {
        match self.preset {
            Preset::ExpT => t.clone().exp(),
            Preset::SixthPower => t.clone().pow(&self.six),
            Preset::Reciprocal => self.one.clone() / &(t.clone() + &self.one),
        }
    }
}

impl<T: Real> ProblemKernel<T> for PresetKernel<T> {
    fn f(&self, s: &T, v: &T, w: &T) -> T {
        match self.preset {
            Preset::ExpT => {
                let growth = ((self.one.clone() - &self.q) * s).exp();
                v.clone() / &self.two + growth * w / &self.two
            }
            Preset::SixthPower => {
                self.seven_hundred_twenty.clone() * s + v.clone() * w / &self.four
                    - v.clone() * v * v / &self.four
            }
            Preset::Reciprocal => {
                let s1 = s.clone() + &self.one;
                let mut source = -self.hundred_twenty.clone();
                for _ in 0..6 {
                    source = source / &s1;
                }
                source + (s.clone() + &self.two) / &self.ten * v * v * w - v.clone() / &self.five / &s1
            }
        }
    }

    fn phi(&self, t: &T) -> T {
        match self.preset {
            Preset::ExpT => self.q.clone() * t,
            Preset::SixthPower => t.clone() * t,
            Preset::Reciprocal => t.clone() / &self.two,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rug::Float;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn names_round_trip_through_strum() {
        assert_eq!(Preset::from_str("t^6").unwrap(), Preset::SixthPower);
        assert_eq!(Preset::from_str("1/(t+1)").unwrap(), Preset::Reciprocal);
        assert_eq!(Preset::from_str("e^t").unwrap(), Preset::ExpT);
        assert_eq!(Preset::SixthPower.to_string(), "t^6");
        assert!(Preset::from_str("sin(t)").is_err());
    }

    /// the exact solution turns the nonlinear term into x⁽⁵⁾
    #[test]
    fn exact_solutions_satisfy_the_equation() {
        let fifth = |p: Preset, t: f64| match p {
            Preset::ExpT => t.exp(),
            Preset::SixthPower => 720.0 * t,
            Preset::Reciprocal => -120.0 / (t + 1.0).powi(6),
        };
        for preset in Preset::iter() {
            let kernel = preset.kernel(0.5_f64);
            for k in 0..=10 {
                let t = k as f64 / 10.0;
                let v = kernel.exact_solution(&t);
                let w = kernel.exact_solution(&kernel.phi(&t));
                assert_abs_diff_eq!(kernel.f(&t, &v, &w), fifth(preset, t), epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn boundary_data_matches_exact_solution() {
        let prec = 128;
        for preset in Preset::iter() {
            let q = Float::from_decimal_str(DEFAULT_Q, prec).unwrap();
            let kernel = preset.kernel(q);
            let bc: BoundaryData<Float> = preset.boundary(prec).unwrap();
            let zero = Float::from_int(0, prec);
            let one = Float::from_int(1, prec);
            assert_eq!(kernel.exact_solution(&zero), bc.c1);
            let tol = Float::from_decimal_str("1e-30", prec).unwrap();
            assert!((kernel.exact_solution(&one) - &bc.c4).abs() < tol, "{}", preset);
        }
    }

    #[test]
    fn default_problem() {
        let problem = Preset::Reciprocal.default_problem::<Float>(DEFAULT_PRECISION).unwrap();
        assert_eq!(problem.n, DEFAULT_N);
        assert_eq!(problem.max_steps, 0);
        assert_eq!(problem.precision, DEFAULT_PRECISION);
        assert_eq!(problem.boundary.c5, Float::from_decimal_str("-0.25", 128).unwrap());
    }
}
