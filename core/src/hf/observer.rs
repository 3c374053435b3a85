//! Diagnostic sinks for the SCF loop.
//!
//! The numerical code never prints anything. Callers that want to follow a calculation pass
//! an [`ScfObserver`] into [`restricted_hartree_fock`](super::restricted_hartree_fock).
use serde::Serialize;

use super::{matrices::IntegralMatrices, HartreeFockOutput};

/// What happened in one SCF iteration.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IterationReport {
    /// 1-based
    pub iteration: usize,
    pub total_energy: f64,
    /// `|E - E_old|`, compared against the convergence threshold
    pub energy_change: f64,
    pub orbital_energies: Vec<f64>,
}

pub trait ScfObserver {
    /// Called once after all integrals have been computed.
    fn integrals_ready(&mut self, _matrices: &IntegralMatrices) {}

    fn iteration(&mut self, report: &IterationReport);

    /// Called once with the final result, converged or not.
    fn finished(&mut self, _output: &HartreeFockOutput) {}
}

/// Forwards everything to the `log` facade.
#[derive(Debug, Clone, Copy)]
pub struct LogObserver {
    pub level: log::Level,
}

impl Default for LogObserver {
    fn default() -> Self {
        Self {
            level: log::Level::Info,
        }
    }
}

impl ScfObserver for LogObserver {
    fn integrals_ready(&mut self, matrices: &IntegralMatrices) {
        log::log!(self.level, "S overlap matrix: {:0.6}", matrices.overlap);
        log::log!(self.level, "T kinetic energy matrix: {:0.6}", matrices.kinetic);
        log::log!(self.level, "V nuclear attraction matrix: {:0.6}", matrices.nuclear);
    }

    fn iteration(&mut self, report: &IterationReport) {
        log::log!(
            self.level,
            "iteration {:<4} - energy {:.6} Ha, delta {:.2e}, orbital energies {:.4?}",
            report.iteration,
            report.total_energy,
            report.energy_change,
            report.orbital_energies
        );
    }

    fn finished(&mut self, output: &HartreeFockOutput) {
        if output.converged {
            log::log!(
                self.level,
                "converged in {} iterations, final energy {:.6} Ha",
                output.iterations,
                output.final_energy
            );
        } else {
            log::log!(
                self.level,
                "not converged after {} iterations, last energy {:.6} Ha",
                output.iterations,
                output.final_energy
            );
        }
    }
}

/// Keeps every iteration report in memory.
#[derive(Debug, Clone, Default)]
pub struct IterationRecorder {
    pub reports: Vec<IterationReport>,
    pub finished: bool,
}

impl ScfObserver for IterationRecorder {
    fn iteration(&mut self, report: &IterationReport) {
        self.reports.push(report.clone());
    }

    fn finished(&mut self, _output: &HartreeFockOutput) {
        self.finished = true;
    }
}
