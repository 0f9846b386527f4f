use super::combining::LennardJonesParam;
use super::units::{CARBON_MASS, KJ_PER_MOL, METHYL_MASS, NITROGEN_MASS};
use crate::core::models::species::Species;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Static parameters of one interaction site.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteParams {
    /// Partial charge in e.
    pub charge: f64,
    /// Lennard-Jones diameter in Å.
    pub sigma: f64,
    /// Lennard-Jones well depth in eV.
    pub epsilon: f64,
    /// Site mass in amu.
    pub mass: f64,
}

/// The complete parameter set of the three-site model.
///
/// [`AcnParams::default`] returns the published parameters of Guardia et al. (2001).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct AcnParams {
    pub methyl: SiteParams,
    pub carbon: SiteParams,
    pub nitrogen: SiteParams,
    /// Me-C distance in Å.
    pub bond_methyl_carbon: f64,
    /// C-N distance in Å.
    pub bond_carbon_nitrogen: f64,
}

#[derive(Debug, Error)]
pub enum ParamLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Invalid parameter in '{path}': {reason}")]
    Invalid { path: String, reason: String },
}

impl Default for AcnParams {
    fn default() -> Self {
        Self {
            methyl: SiteParams {
                charge: 0.206,
                sigma: 3.775,
                epsilon: 0.7824 * KJ_PER_MOL,
                mass: METHYL_MASS,
            },
            carbon: SiteParams {
                charge: 0.247,
                sigma: 3.650,
                epsilon: 0.544 * KJ_PER_MOL,
                mass: CARBON_MASS,
            },
            nitrogen: SiteParams {
                charge: -0.453,
                sigma: 3.200,
                epsilon: 0.6276 * KJ_PER_MOL,
                mass: NITROGEN_MASS,
            },
            bond_methyl_carbon: 1.458,
            bond_carbon_nitrogen: 1.157,
        }
    }
}

impl AcnParams {
    pub fn load(path: &Path) -> Result<Self, ParamLoadError> {
        let display = path.to_string_lossy().to_string();
        let content = std::fs::read_to_string(path).map_err(|e| ParamLoadError::Io {
            path: display.clone(),
            source: e,
        })?;
        let params: Self = toml::from_str(&content).map_err(|e| ParamLoadError::Toml {
            path: display.clone(),
            source: e,
        })?;
        params
            .validate()
            .map_err(|reason| ParamLoadError::Invalid {
                path: display,
                reason,
            })?;
        Ok(params)
    }

    #[inline]
    pub fn site(&self, species: Species) -> &SiteParams {
        match species {
            Species::Methyl => &self.methyl,
            Species::Carbon => &self.carbon,
            Species::Nitrogen => &self.nitrogen,
        }
    }

    /// Lennard-Jones parameters in {Me, C, N} order.
    pub fn lennard_jones(&self) -> [LennardJonesParam; 3] {
        Species::ALL.map(|species| {
            let site = self.site(species);
            LennardJonesParam {
                sigma: site.sigma,
                epsilon: site.epsilon,
            }
        })
    }

    /// Me-N distance in Å.
    #[inline]
    pub fn bond_methyl_nitrogen(&self) -> f64 {
        self.bond_methyl_carbon + self.bond_carbon_nitrogen
    }

    fn validate(&self) -> Result<(), String> {
        for species in Species::ALL {
            let site = self.site(species);
            let checks = [
                ("charge", site.charge, false),
                ("sigma", site.sigma, true),
                ("epsilon", site.epsilon, true),
                ("mass", site.mass, true),
            ];
            for (name, value, must_be_positive) in checks {
                if !value.is_finite() || (must_be_positive && value <= 0.0) {
                    return Err(format!("{species} {name} = {value}"));
                }
            }
        }
        for (name, value) in [
            ("bond-methyl-carbon", self.bond_methyl_carbon),
            ("bond-carbon-nitrogen", self.bond_carbon_nitrogen),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!("{name} = {value}"));
            }
        }
        Ok(())
    }
}
