//! Contraction of the primitive integrals over s-type basis functions.
use crate::{atom::Atom, basis::BasisFunction};

use super::{primitive, Integrator};

/// Integrates contracted s-type gaussians by summing the closed form primitive integrals
/// over every combination of primitives.
#[derive(Copy, Clone, Debug, Default)]
pub struct SGaussianIntegrator;

impl Integrator for SGaussianIntegrator {
    type Function = BasisFunction;

    fn overlap(&self, functions: (&Self::Function, &Self::Function)) -> f64 {
        let (basis_a, basis_b) = functions;

        let mut output = 0.0;
        for (primitive_a, primitive_b) in itertools::iproduct!(
            basis_a.contraction().primitives(),
            basis_b.contraction().primitives()
        ) {
            output += primitive_a.coefficient
                * primitive_b.coefficient
                * primitive::overlap(
                    primitive_a.exponent,
                    primitive_b.exponent,
                    &basis_a.center,
                    &basis_b.center,
                );
        }
        output
    }

    fn kinetic(&self, functions: (&Self::Function, &Self::Function)) -> f64 {
        self.overlap_kinetic(functions).1
    }

    fn overlap_kinetic(&self, functions: (&Self::Function, &Self::Function)) -> (f64, f64) {
        let (basis_a, basis_b) = functions;

        let (mut overlap, mut kinetic) = (0.0, 0.0);
        for (primitive_a, primitive_b) in itertools::iproduct!(
            basis_a.contraction().primitives(),
            basis_b.contraction().primitives()
        ) {
            let (alpha, beta) = (primitive_a.exponent, primitive_b.exponent);
            let weight = primitive_a.coefficient * primitive_b.coefficient;

            let s = primitive::overlap(alpha, beta, &basis_a.center, &basis_b.center);
            let t = primitive::kinetic(alpha, beta, &basis_a.center, &basis_b.center, s);

            overlap += weight * s;
            kinetic += weight * t;
        }
        (overlap, kinetic)
    }

    fn nuclear(&self, functions: (&Self::Function, &Self::Function), nuclei: &[Atom]) -> f64 {
        let (basis_a, basis_b) = functions;

        let mut output = 0.0;
        for (nucleus, primitive_a, primitive_b) in itertools::iproduct!(
            nuclei,
            basis_a.contraction().primitives(),
            basis_b.contraction().primitives()
        ) {
            output += -(nucleus.nuclear_charge() as f64)
                * primitive_a.coefficient
                * primitive_b.coefficient
                * primitive::nuclear_attraction(
                    primitive_a.exponent,
                    primitive_b.exponent,
                    &basis_a.center,
                    &basis_b.center,
                    &nucleus.position,
                );
        }
        output
    }

    fn electron_repulsion(
        &self,
        functions: (
            &Self::Function,
            &Self::Function,
            &Self::Function,
            &Self::Function,
        ),
    ) -> f64 {
        let (basis_a, basis_b, basis_c, basis_d) = functions;

        let mut output = 0.0;
        for primitive_a in basis_a.contraction().primitives() {
            for primitive_b in basis_b.contraction().primitives() {
                for primitive_c in basis_c.contraction().primitives() {
                    for primitive_d in basis_d.contraction().primitives() {
                        output += primitive_a.coefficient
                            * primitive_b.coefficient
                            * primitive_c.coefficient
                            * primitive_d.coefficient
                            * primitive::electron_repulsion(
                                primitive_a.exponent,
                                primitive_b.exponent,
                                primitive_c.exponent,
                                primitive_d.exponent,
                                &basis_a.center,
                                &basis_b.center,
                                &basis_c.center,
                                &basis_d.center,
                            )
                    }
                }
            }
        }

        output
    }
}
