//! Closed form integrals between normalized primitive s-type gaussians
//! `N(alpha) * exp(-alpha * |r - R|^2)`.
//!
//! Every function multiplies in the normalization constants of its primitives itself, so
//! contraction coefficients are expected to refer to normalized primitives (the convention
//! used by basis set exchange).
//!
//! Reference:
//!
//! [1] Szabo, A. & Ostlund, N. Modern Quantum Chemistry, appendix A.
use std::f64::consts::PI;

use nalgebra::Vector3;

/// Below this argument the Boys function is replaced by its limit `F0(0) = 1`.
pub const BOYS_SMALL_ARGUMENT: f64 = 1e-10;

/// Normalization constant of an s-type gaussian, `(2 alpha / pi)^(3/4)`.
#[inline(always)]
pub fn normalization(exponent: f64) -> f64 {
    (2.0 * exponent / PI).powf(0.75)
}

/// Zeroth order Boys function `F0(t) = 1/2 sqrt(pi / t) erf(sqrt(t))`.
///
/// Small arguments return the exact limit instead of evaluating `0 / 0`.
pub fn boys_f0(t: f64) -> f64 {
    if t < BOYS_SMALL_ARGUMENT {
        1.0
    } else {
        0.5 * (PI / t).sqrt() * libm::erf(t.sqrt())
    }
}

/// Center of the gaussian that is the product of two gaussians.
#[inline(always)]
pub(crate) fn product_center(
    a_exp: f64,
    a_pos: &Vector3<f64>,
    b_exp: f64,
    b_pos: &Vector3<f64>,
) -> Vector3<f64> {
    (a_exp * a_pos + b_exp * b_pos) / (a_exp + b_exp)
}

/// Prefactor `exp(-ab/(a+b) |A - B|^2)` of the gaussian product theorem.
#[inline(always)]
fn product_prefactor(a_exp: f64, a_pos: &Vector3<f64>, b_exp: f64, b_pos: &Vector3<f64>) -> f64 {
    let reduced = a_exp * b_exp / (a_exp + b_exp);
    (-reduced * (a_pos - b_pos).norm_squared()).exp()
}

/// Overlap `<a|b>` of two primitives.
pub fn overlap(alpha: f64, beta: f64, r_a: &Vector3<f64>, r_b: &Vector3<f64>) -> f64 {
    normalization(alpha)
        * normalization(beta)
        * (PI / (alpha + beta)).powf(1.5)
        * product_prefactor(alpha, r_a, beta, r_b)
}

/// Kinetic energy integral `<a|-1/2 nabla^2|b>`.
///
/// `overlap` has to be the value of [`overlap`] for the same arguments.
pub fn kinetic(alpha: f64, beta: f64, r_a: &Vector3<f64>, r_b: &Vector3<f64>, overlap: f64) -> f64 {
    let reduced = alpha * beta / (alpha + beta);
    reduced * (3.0 - 2.0 * reduced * (r_a - r_b).norm_squared()) * overlap
}

/// Attraction `<a|1/|r - C||b>` to a unit point charge at `r_nuc`. The sign and the nuclear
/// charge are applied by the caller.
pub fn nuclear_attraction(
    alpha: f64,
    beta: f64,
    r_a: &Vector3<f64>,
    r_b: &Vector3<f64>,
    r_nuc: &Vector3<f64>,
) -> f64 {
    let zeta = alpha + beta;
    let center = product_center(alpha, r_a, beta, r_b);
    let boys = boys_f0(zeta * (center - r_nuc).norm_squared());

    normalization(alpha)
        * normalization(beta)
        * product_prefactor(alpha, r_a, beta, r_b)
        * (2.0 * PI / zeta)
        * boys
}

/// Electron repulsion integral `(ab|cd)` in chemists' notation.
#[allow(clippy::too_many_arguments)]
pub fn electron_repulsion(
    alpha: f64,
    beta: f64,
    gamma: f64,
    delta: f64,
    r_a: &Vector3<f64>,
    r_b: &Vector3<f64>,
    r_c: &Vector3<f64>,
    r_d: &Vector3<f64>,
) -> f64 {
    let zeta = alpha + beta;
    let eta = gamma + delta;
    let p = product_center(alpha, r_a, beta, r_b);
    let q = product_center(gamma, r_c, delta, r_d);

    let rho = zeta * eta / (zeta + eta);
    let boys = boys_f0(rho * (p - q).norm_squared());

    2.0 * PI.powf(2.5) / (zeta * eta * (zeta + eta).sqrt())
        * product_prefactor(alpha, r_a, beta, r_b)
        * product_prefactor(gamma, r_c, delta, r_d)
        * boys
        * normalization(alpha)
        * normalization(beta)
        * normalization(gamma)
        * normalization(delta)
}
