use std::{
    fs,
    path::{Path, PathBuf},
    time::Instant,
};

use anyhow::{bail, Context};
use clap::{ArgAction, Args, Parser, Subcommand};
use serde::Serialize;
use toyhf::{
    basis::{library, BasisSet},
    config::{parse_xyz, ConfigBasisSet, ConfigMolecule},
    hf::{
        restricted_hartree_fock, HartreeFockConfig, HartreeFockInput, LogObserver, ScfObserver,
    },
    molecule::ANGSTROM_TO_BOHR,
    Molecule,
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: HfCommand,

    /// Don't log a line per SCF iteration
    #[arg(long, short, action = ArgAction::SetTrue, global = true)]
    quiet: bool,
}

#[derive(Args, Debug)]
struct ScfArgs {
    /// The maximum number of iterations the SCF loop should attempt before giving up
    #[arg(long, default_value_t = 50)]
    max_iterations: usize,
    /// if the total energy changes by less than this between two iterations, the system is
    /// considered converged
    #[arg(long, default_value_t = 1e-6)]
    epsilon: f64,
    /// Renormalize every contracted basis function to unit self overlap
    #[arg(long)]
    normalize: bool,
    /// Drop p and higher shells from basis set files instead of failing
    #[arg(long)]
    s_only: bool,
}

#[derive(Subcommand, Debug)]
enum HfCommand {
    /// Restricted hartree fock for a single geometry
    #[command(name = "rhf")]
    RestrictedHartreeFock {
        /// Built-in basis set name (STO-3G, 6-31G) or a basis set exchange json file
        #[arg(long, short, default_value = "STO-3G")]
        basis_set: String,
        /// A json or xyz file with the molecule. Defaults to H2 at `--bond-length`
        #[arg(long, short)]
        molecule: Option<PathBuf>,
        /// H-H distance used when no molecule file is given
        #[arg(long, default_value_t = 1.4)]
        bond_length: f64,
        /// Read `--bond-length` in angstrom instead of bohr
        #[arg(long)]
        angstrom: bool,
        #[command(flatten)]
        scf: ScfArgs,
        /// Write the full result as json to this path
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Restricted hartree fock for H2 over a range of bond lengths and basis sets
    #[command(name = "scan")]
    Scan {
        /// Basis sets to scan, built-in names or basis set exchange json files
        #[arg(long, short, num_args = 1.., default_values_t = ["STO-3G".to_owned(), "6-31G".to_owned()])]
        basis_sets: Vec<String>,
        /// Smallest bond length
        #[arg(long, default_value_t = 0.5)]
        start: f64,
        /// Largest bond length
        #[arg(long, default_value_t = 3.0)]
        stop: f64,
        /// Number of geometries between `start` and `stop`, both included
        #[arg(long, default_value_t = 11)]
        points: usize,
        /// Bond lengths are given in angstrom instead of bohr
        #[arg(long)]
        angstrom: bool,
        #[command(flatten)]
        scf: ScfArgs,
        /// Write every scan point as json to this path
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

/// One geometry of a scan. Failed points keep their error message instead of an energy.
#[derive(Serialize, Debug)]
struct ScanPoint {
    basis_set: String,
    bond_length: f64,
    converged: bool,
    iterations: usize,
    total_energy: Option<f64>,
    error: Option<String>,
}

impl ScfArgs {
    /// The built-in iteration log lines stay off, progress goes through [`LogObserver`].
    fn config(&self) -> HartreeFockConfig {
        HartreeFockConfig {
            max_iterations: self.max_iterations,
            epsilon: self.epsilon,
            verbose: false,
        }
    }

    fn load_basis_set(&self, name_or_path: &str) -> anyhow::Result<BasisSet> {
        let basis_set = match library::by_name(name_or_path) {
            Some(basis_set) => basis_set,
            None => {
                let contents = fs::read_to_string(name_or_path)
                    .with_context(|| format!("no built-in basis set or file {name_or_path}"))?;
                let mut config: ConfigBasisSet = serde_json::from_str(&contents)
                    .with_context(|| format!("could not parse basis set {name_or_path}"))?;
                if self.s_only {
                    config = config.s_shells_only();
                }
                BasisSet::try_from(config)?
            }
        };

        Ok(if self.normalize {
            basis_set.normalized()
        } else {
            basis_set
        })
    }
}

fn load_molecule(path: &Path) -> anyhow::Result<Molecule> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("could not read molecule {}", path.display()))?;

    let molecule = if path.extension().is_some_and(|e| e.eq_ignore_ascii_case("xyz")) {
        parse_xyz(&contents)?
    } else {
        let config: ConfigMolecule = serde_json::from_str(&contents)
            .with_context(|| format!("could not parse molecule {}", path.display()))?;
        Molecule::try_from(config)?
    };

    Ok(molecule)
}

fn write_json(path: &Path, value: &impl Serialize) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).with_context(|| format!("could not write {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        HfCommand::RestrictedHartreeFock {
            basis_set,
            molecule,
            bond_length,
            angstrom,
            scf,
            output,
        } => {
            let basis_set = scf.load_basis_set(&basis_set)?;
            let molecule = match molecule {
                Some(path) => load_molecule(&path)?,
                None if angstrom => Molecule::hydrogen(bond_length * ANGSTROM_TO_BOHR),
                None => Molecule::hydrogen(bond_length),
            };
            let basis = basis_set.basis_for(&molecule)?;

            let input = HartreeFockInput {
                molecule: &molecule,
                basis: &basis,
                basis_set_name: basis_set.name(),
                config: scf.config(),
            };

            let start = Instant::now();
            let mut observer = LogObserver::default();
            let observer: Option<&mut dyn ScfObserver> =
                (!cli.quiet).then_some(&mut observer as &mut dyn ScfObserver);
            let hf_output = restricted_hartree_fock(&input, observer)?;

            if hf_output.converged {
                println!(
                    "hartree fock converged after {} iterations and {:0.2?}",
                    hf_output.iterations,
                    start.elapsed()
                );
            } else {
                println!(
                    "hartree fock did not converge within {} iterations",
                    hf_output.iterations
                );
            }
            println!("basis set: {} ({} functions)", hf_output.basis_set, hf_output.n_basis);
            println!("electronic energy: {:3.6}", hf_output.electronic_energy);
            println!("nuclear repulsion energy: {:3.6}", hf_output.nuclear_repulsion);
            println!("hartree fock energy: {:3.6}", hf_output.total_energy());
            println!("orbital energies: {:3.4?}", hf_output.orbital_energies);
            if let Some(gap) = hf_output.homo_lumo_gap() {
                println!("homo lumo gap: {gap:3.4}");
            }

            if let Some(path) = output {
                write_json(&path, &hf_output)?;
            }
        }

        HfCommand::Scan {
            basis_sets,
            start,
            stop,
            points,
            angstrom,
            scf,
            output,
        } => {
            if points == 0 || !(start > 0.0 && stop >= start) {
                bail!("scan needs at least one point and 0 < start <= stop");
            }

            let unit = if angstrom { ANGSTROM_TO_BOHR } else { 1.0 };
            let step = if points > 1 {
                (stop - start) / (points - 1) as f64
            } else {
                0.0
            };

            let mut scan = Vec::with_capacity(points * basis_sets.len());
            for name in &basis_sets {
                let basis_set = match scf.load_basis_set(name) {
                    Ok(basis_set) => basis_set,
                    Err(e) => {
                        log::error!("skipping basis set {name}: {e:#}");
                        continue;
                    }
                };

                for i in 0..points {
                    let bond_length = start + step * i as f64;
                    let molecule = Molecule::hydrogen(bond_length * unit);

                    let result = basis_set
                        .basis_for(&molecule)
                        .map_err(Into::into)
                        .and_then(|basis| {
                            restricted_hartree_fock(
                                &HartreeFockInput {
                                    molecule: &molecule,
                                    basis: &basis,
                                    basis_set_name: basis_set.name(),
                                    config: scf.config(),
                                },
                                None,
                            )
                        });

                    let point = match result {
                        Ok(hf_output) => {
                            if !hf_output.converged {
                                log::warn!(
                                    "{name} at {bond_length:.4} did not converge, keeping last energy"
                                );
                            }
                            ScanPoint {
                                basis_set: name.clone(),
                                bond_length,
                                converged: hf_output.converged,
                                iterations: hf_output.iterations,
                                total_energy: Some(hf_output.total_energy()),
                                error: None,
                            }
                        }
                        Err(e) => {
                            log::error!("{name} at {bond_length:.4} failed: {e}");
                            ScanPoint {
                                basis_set: name.clone(),
                                bond_length,
                                converged: false,
                                iterations: 0,
                                total_energy: None,
                                error: Some(e.to_string()),
                            }
                        }
                    };

                    if !cli.quiet {
                        log::info!(
                            "{name} r = {bond_length:.4}: {:?} ({} iterations)",
                            point.total_energy,
                            point.iterations
                        );
                    }
                    scan.push(point);
                }
            }

            println!("{:<12} {:>10} {:>16} {:>10}", "basis", "r", "energy", "converged");
            for point in &scan {
                let energy = point
                    .total_energy
                    .map_or_else(|| "-".to_owned(), |e| format!("{e:.8}"));
                println!(
                    "{:<12} {:>10.4} {:>16} {:>10}",
                    point.basis_set, point.bond_length, energy, point.converged
                );
            }

            if let Some(path) = output {
                write_json(&path, &scan)?;
            }
        }
    }

    Ok(())
}
