use nalgebra::Vector3;
use toyhf::{
    atom::Atom,
    basis::{library, BasisFunction},
    hf::{
        matrices::{compute_nuclear_matrix, compute_overlap_and_kinetic_matrices},
        restricted_hartree_fock, HartreeFockConfig, HartreeFockInput,
    },
    integrals::{ElectronTensor, SGaussianIntegrator},
    periodic_table::ElementType,
    Molecule,
};

use criterion::{criterion_group, criterion_main, Criterion};

const INTEGRATOR: SGaussianIntegrator = SGaussianIntegrator;

struct Instance {
    name: String,
    molecule: Molecule,
    basis_functions: Vec<BasisFunction>,
}

fn instance(name: &str, molecule: Molecule, basis_set: &str) -> Instance {
    let basis_functions = library::by_name(basis_set)
        .and_then(|b| b.basis_for(&molecule).ok())
        .unwrap_or_else(|| panic!("no {basis_set} basis for {name}"));

    Instance {
        name: format!("{name} {basis_set}"),
        molecule,
        basis_functions,
    }
}

/// Linear chain of hydrogen atoms 1.4 bohr apart
fn hydrogen_chain(n_atoms: usize) -> Molecule {
    Molecule::new(
        (0..n_atoms)
            .map(|i| Atom::new(ElementType::H, Vector3::new(0.0, 0.0, 1.4 * i as f64)))
            .collect(),
    )
}

fn bench_one_electron(c: &mut Criterion, instances: &[Instance]) {
    for instance in instances {
        let basis_functions = &instance.basis_functions;
        let nuclei = instance.molecule.atoms();

        c.bench_function(&format!("Overlap+Kinetic {}", instance.name), |b| {
            b.iter(|| compute_overlap_and_kinetic_matrices(basis_functions, &INTEGRATOR))
        });
        c.bench_function(&format!("Nuclear {}", instance.name), |b| {
            b.iter(|| compute_nuclear_matrix(basis_functions, nuclei, &INTEGRATOR))
        });
    }
}

fn bench_electron(c: &mut Criterion, instances: &[Instance]) {
    for instance in instances {
        let basis_functions = &instance.basis_functions;

        c.bench_function(&format!("Electron Repulsion {}", instance.name), |b| {
            b.iter(|| ElectronTensor::from_basis(basis_functions, &INTEGRATOR))
        });
    }
}

fn bench_scf(c: &mut Criterion, instances: &[Instance]) {
    for instance in instances {
        let input = HartreeFockInput {
            molecule: &instance.molecule,
            basis: &instance.basis_functions,
            basis_set_name: &instance.name,
            config: HartreeFockConfig {
                verbose: false,
                ..Default::default()
            },
        };

        c.bench_function(&format!("RHF {}", instance.name), |b| {
            b.iter(|| restricted_hartree_fock(&input, None))
        });
    }
}

fn bench_integrals(c: &mut Criterion) {
    let instances = [
        instance("hydrogen", Molecule::hydrogen(1.4), "STO-3G"),
        instance("hydrogen", Molecule::hydrogen(1.4), "6-31G"),
        instance("H6 chain", hydrogen_chain(6), "STO-3G"),
        instance("H6 chain", hydrogen_chain(6), "6-31G"),
    ];

    bench_one_electron(c, &instances);
    bench_electron(c, &instances);
    bench_scf(c, &instances[..2]);
}

criterion_group!(benches, bench_integrals);
criterion_main!(benches);
