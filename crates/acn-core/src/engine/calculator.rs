use super::config::CalculatorConfig;
use super::context::EvaluationContext;
use super::embedding::PointChargePotential;
use super::error::EngineError;
use super::pairwise;
use super::results::{Property, PropertyValue, Results};
use crate::core::forcefield::combining::{PairMatrices, lorentz_berthelot};
use crate::core::forcefield::constraint::RigidLinearConstraint;
use crate::core::forcefield::params::AcnParams;
use crate::core::forcefield::switching::SmoothCutoff;
use crate::core::models::snapshot::Snapshot;
use nalgebra::Vector3;
use std::collections::BTreeMap;
use tracing::{debug, instrument, warn};

/// Energy and force calculator for rigid three-site acetonitrile.
///
/// Everything that does not depend on the snapshot is derived at construction. The calculator
/// keeps the results of its last successful evaluation and, optionally, an attached
/// [`PointChargePotential`].
#[derive(Debug, Clone)]
pub struct AcnCalculator {
    config: CalculatorConfig,
    params: AcnParams,
    pair_matrices: PairMatrices,
    constraint: RigidLinearConstraint,
    cutoff: SmoothCutoff,
    embedding: Option<PointChargePotential>,
    context: Option<EvaluationContext>,
    results: Option<Results>,
    cutoff_warning_issued: bool,
}

impl AcnCalculator {
    /// Creates a calculator with the standard model parameters.
    pub fn new(config: CalculatorConfig) -> Result<Self, EngineError> {
        Self::with_params(config, AcnParams::default())
    }

    pub fn with_params(config: CalculatorConfig, params: AcnParams) -> Result<Self, EngineError> {
        config.validate()?;
        let pair_matrices = lorentz_berthelot(&params.lennard_jones());
        let constraint = RigidLinearConstraint::new(&params);

        debug!(
            cutoff = config.cutoff,
            width = config.width,
            layout = %config.layout,
            "Created acetonitrile calculator"
        );

        Ok(Self {
            cutoff: config.cutoff_function(),
            config,
            params,
            pair_matrices,
            constraint,
            embedding: None,
            context: None,
            results: None,
            cutoff_warning_issued: false,
        })
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    pub fn params(&self) -> &AcnParams {
        &self.params
    }

    /// Context of the last successful evaluation.
    pub fn context(&self) -> Option<&EvaluationContext> {
        self.context.as_ref()
    }

    /// Results of the last successful evaluation.
    pub fn results(&self) -> Option<&Results> {
        self.results.as_ref()
    }

    /// Attaches external point charges, replacing any previous set.
    ///
    /// Their positions must be supplied through the returned handle before every evaluation.
    pub fn embed(&mut self, charges: Vec<f64>) -> &mut PointChargePotential {
        debug!(charges = charges.len(), "Attached external point charges");
        self.embedding.insert(PointChargePotential::new(charges))
    }

    pub fn embedding(&self) -> Option<&PointChargePotential> {
        self.embedding.as_ref()
    }

    pub fn embedding_mut(&mut self) -> Option<&mut PointChargePotential> {
        self.embedding.as_mut()
    }

    pub fn detach_embedding(&mut self) -> Option<PointChargePotential> {
        self.embedding.take()
    }

    /// Evaluates energy and forces for `snapshot`.
    ///
    /// # Errors
    ///
    /// Every precondition is checked before accumulation starts; on failure the previous
    /// results are kept and the external positions are not consumed.
    #[instrument(skip_all, name = "acn_calculate", fields(atoms = snapshot.len()))]
    pub fn calculate(&mut self, snapshot: &Snapshot) -> Result<&Results, EngineError> {
        let context = EvaluationContext::prepare(snapshot, self.config.layout)?;
        if let Some(embedding) = &self.embedding {
            embedding.check_ready()?;
        }
        self.warn_on_short_axes(&context);

        let pairwise = pairwise::accumulate(
            snapshot.positions(),
            snapshot.charges(),
            &context,
            &self.pair_matrices,
            &self.cutoff,
        );
        let mut energy = pairwise.energy;
        let mut forces = pairwise.forces;

        if let Some(embedding) = self.embedding.as_mut() {
            let (e, solute_forces) =
                embedding.calculate(snapshot.charges(), snapshot.positions())?;
            energy.embedding = e;
            for (f, extra) in forces.iter_mut().zip(solute_forces) {
                *f += extra;
            }
        }

        let redistributed = self.constraint.redistribute(context.layout, &forces);

        debug!(
            energy = energy.total(),
            pairs_in_range = pairwise.pairs_in_range,
            "Evaluation complete"
        );

        self.context = Some(context);
        Ok(&*self.results.insert(Results {
            energy,
            forces: redistributed,
            unconstrained_forces: forces,
            pairs_in_range: pairwise.pairs_in_range,
        }))
    }

    /// Evaluates `snapshot` and returns the requested properties.
    pub fn get_properties(
        &mut self,
        snapshot: &Snapshot,
        requested: &[Property],
    ) -> Result<BTreeMap<Property, PropertyValue>, EngineError> {
        Ok(self.calculate(snapshot)?.properties(requested))
    }

    pub fn potential_energy(&mut self, snapshot: &Snapshot) -> Result<f64, EngineError> {
        Ok(self.calculate(snapshot)?.energy())
    }

    pub fn forces(&mut self, snapshot: &Snapshot) -> Result<Vec<Vector3<f64>>, EngineError> {
        Ok(self.calculate(snapshot)?.forces().to_vec())
    }

    fn warn_on_short_axes(&mut self, context: &EvaluationContext) {
        if self.cutoff_warning_issued {
            return;
        }
        let short = context.short_periodic_axes(self.config.cutoff);
        if !short.is_empty() {
            warn!(
                cutoff = self.config.cutoff,
                axes = ?short,
                "Cutoff exceeds half the cell length; only the nearest image of each molecule is counted"
            );
            self.cutoff_warning_issued = true;
        }
    }
}
