use crate::core::forcefield::params::AcnParams;
use crate::core::forcefield::switching::SmoothCutoff;
use crate::core::models::layout::{MoleculeLayout, SITES_PER_MOLECULE};
use thiserror::Error;

pub const DEFAULT_CUTOFF: f64 = 5.0;
pub const DEFAULT_WIDTH: f64 = 1.0;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// Settings fixed for the lifetime of a calculator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalculatorConfig {
    /// Molecule-pair cutoff radius in Å.
    pub cutoff: f64,
    /// Width of the switching shell inside the cutoff, in Å.
    pub width: f64,
    /// Site ordering shared by every molecule of the evaluated systems.
    pub layout: MoleculeLayout,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            cutoff: DEFAULT_CUTOFF,
            width: DEFAULT_WIDTH,
            layout: MoleculeLayout::default(),
        }
    }
}

impl CalculatorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.cutoff.is_finite() && self.cutoff > 0.0) {
            return Err(ConfigError::InvalidParameter {
                name: "cutoff",
                reason: format!("must be a positive length, got {}", self.cutoff),
            });
        }
        if !(self.width.is_finite() && self.width > 0.0 && self.width <= self.cutoff) {
            return Err(ConfigError::InvalidParameter {
                name: "width",
                reason: format!(
                    "must lie in (0, cutoff = {}], got {}",
                    self.cutoff, self.width
                ),
            });
        }
        Ok(())
    }

    pub fn cutoff_function(&self) -> SmoothCutoff {
        SmoothCutoff::new(self.cutoff, self.width)
    }
}

#[derive(Default)]
pub struct CalculatorConfigBuilder {
    cutoff: Option<f64>,
    width: Option<f64>,
    layout: Option<MoleculeLayout>,
}

impl CalculatorConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cutoff(mut self, cutoff: f64) -> Self {
        self.cutoff = Some(cutoff);
        self
    }
    pub fn width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }
    pub fn layout(mut self, layout: MoleculeLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    pub fn build(self) -> Result<CalculatorConfig, ConfigError> {
        let config = CalculatorConfig {
            cutoff: self.cutoff.unwrap_or(DEFAULT_CUTOFF),
            width: self.width.unwrap_or(DEFAULT_WIDTH),
            layout: self.layout.unwrap_or_default(),
        };
        config.validate()?;
        Ok(config)
    }
}

/// How a workflow decides the molecule layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutSelection {
    /// Detect from the first frame, at the charge-assignment offset.
    #[default]
    Detect,
    Fixed(MoleculeLayout),
}

/// Where partial charges come from in a workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChargeAssignment {
    /// Use the charges stored in each snapshot.
    FromSnapshot,
    /// Overwrite charges with the model's per-species values, starting at `offset`.
    Standard { offset: usize },
}

impl Default for ChargeAssignment {
    fn default() -> Self {
        ChargeAssignment::Standard { offset: 0 }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EvaluateConfig {
    pub cutoff: f64,
    pub width: f64,
    pub layout: LayoutSelection,
    pub charges: ChargeAssignment,
    pub params: AcnParams,
}

impl EvaluateConfig {
    /// Calculator settings for a resolved layout.
    pub fn calculator_config(&self, layout: MoleculeLayout) -> CalculatorConfig {
        CalculatorConfig {
            cutoff: self.cutoff,
            width: self.width,
            layout,
        }
    }

    /// Index of the first atom belonging to the acetonitrile molecules.
    pub fn first_molecule_atom(&self) -> usize {
        match self.charges {
            ChargeAssignment::FromSnapshot => 0,
            ChargeAssignment::Standard { offset } => offset,
        }
    }
}

#[derive(Default)]
pub struct EvaluateConfigBuilder {
    cutoff: Option<f64>,
    width: Option<f64>,
    layout: Option<LayoutSelection>,
    charges: Option<ChargeAssignment>,
    params: Option<AcnParams>,
}

impl EvaluateConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cutoff(mut self, cutoff: f64) -> Self {
        self.cutoff = Some(cutoff);
        self
    }
    pub fn width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }
    pub fn layout(mut self, layout: LayoutSelection) -> Self {
        self.layout = Some(layout);
        self
    }
    pub fn charges(mut self, charges: ChargeAssignment) -> Self {
        self.charges = Some(charges);
        self
    }
    pub fn params(mut self, params: AcnParams) -> Self {
        self.params = Some(params);
        self
    }

    pub fn build(self) -> Result<EvaluateConfig, ConfigError> {
        let config = EvaluateConfig {
            cutoff: self.cutoff.unwrap_or(DEFAULT_CUTOFF),
            width: self.width.unwrap_or(DEFAULT_WIDTH),
            layout: self.layout.unwrap_or_default(),
            charges: self.charges.unwrap_or_default(),
            params: self.params.unwrap_or_default(),
        };
        config
            .calculator_config(MoleculeLayout::default())
            .validate()?;
        if config.first_molecule_atom() % SITES_PER_MOLECULE != 0 {
            return Err(ConfigError::InvalidParameter {
                name: "charge offset",
                reason: format!(
                    "{} is not a multiple of {}; every atom is evaluated as a molecule site",
                    config.first_molecule_atom(),
                    SITES_PER_MOLECULE
                ),
            });
        }
        Ok(config)
    }
}
