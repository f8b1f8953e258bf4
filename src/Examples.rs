//! examples of usage of FifthOrderGreenBVP
/// fifth-order BVP examples solved with the Green's-function iteration
pub mod green_bvp_examples;
