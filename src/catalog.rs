use std::{collections::HashSet, fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{battery::Battery, prelude::*};

const REFERENCE: &str = include_str!("../data/batteries.json");

/// Immutable, validated battery collection.
///
/// Every engine operation borrows the catalog, none of them mutates it.
#[must_use]
#[derive(Clone, Debug, PartialEq, Serialize, derive_more::Deref)]
#[serde(transparent)]
pub struct Catalog(Vec<Battery>);

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("battery #{index} has an empty name")]
    EmptyName { index: usize },

    #[error("duplicate battery name `{0}`")]
    DuplicateName(String),

    #[error("`{name}`: `{field}` must be finite and non-negative, got {value}")]
    InvalidField { name: String, field: &'static str, value: f64 },

    #[error("`{0}` has zero depth of discharge and cannot deliver any energy")]
    NoUsableCapacity(String),
}

/// TOML catalogs use an array of `[[battery]]` tables.
#[derive(Deserialize)]
struct CatalogFile {
    battery: Vec<Battery>,
}

impl Catalog {
    pub fn try_new(batteries: Vec<Battery>) -> Result<Self, CatalogError> {
        let mut names = HashSet::with_capacity(batteries.len());
        for (index, battery) in batteries.iter().enumerate() {
            if battery.name.trim().is_empty() {
                return Err(CatalogError::EmptyName { index });
            }
            if !names.insert(battery.name.as_str()) {
                return Err(CatalogError::DuplicateName(battery.name.clone()));
            }
            for (field, value) in battery.numeric_fields() {
                // Operating temperatures are the only fields allowed below zero:
                let is_temperature = field.starts_with("operatingTemp");
                if !value.is_finite() || (value < 0.0 && !is_temperature) {
                    return Err(CatalogError::InvalidField {
                        name: battery.name.clone(),
                        field,
                        value,
                    });
                }
            }
            if battery.depth_of_discharge <= 0.0 {
                return Err(CatalogError::NoUsableCapacity(battery.name.clone()));
            }
        }
        Ok(Self(batteries))
    }

    /// Built-in reference dataset of eight common chemistries.
    pub fn reference() -> Result<Self> {
        Self::from_json(REFERENCE).context("the embedded reference catalog is broken")
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let batteries: Vec<Battery> = serde_json::from_str(json)?;
        Ok(Self::try_new(batteries)?)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(text)?;
        Ok(Self::try_new(file.battery)?)
    }

    /// Load a `.toml` or `.json` catalog file.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read `{}`", path.display()))?;
        let catalog = match path.extension().and_then(|extension| extension.to_str()) {
            Some("toml") => Self::from_toml(&text),
            Some("json") => Self::from_json(&text),
            _ => bail!("unsupported catalog format: `{}`", path.display()),
        }
        .with_context(|| format!("failed to parse `{}`", path.display()))?;
        info!(n_batteries = catalog.len(), "loaded the catalog");
        Ok(catalog)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Battery> {
        self.0.iter().find(|battery| battery.name == name)
    }

    /// All the batteries, in catalog order.
    #[must_use]
    pub fn all(&self) -> Vec<&Battery> {
        self.0.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn battery(name: &str) -> Battery {
        Battery { depth_of_discharge: 100.0, ..crate::battery::tests::battery(name) }
    }

    #[test]
    fn test_reference_catalog() {
        let catalog = Catalog::reference().unwrap();
        assert_eq!(catalog.len(), 8);
        assert_eq!(catalog[0].name, "Lead-Acid");
        assert_eq!(catalog[7].name, "Flow Battery");
        assert_eq!(catalog.get("LFP").unwrap().cycle_life, 3500.0);
        assert!(catalog.get("Graphene").is_none());
    }

    #[test]
    fn test_duplicate_name() {
        let result = Catalog::try_new(vec![battery("LFP"), battery("LFP")]);
        assert!(matches!(result, Err(CatalogError::DuplicateName(name)) if name == "LFP"));
    }

    #[test]
    fn test_empty_name() {
        let result = Catalog::try_new(vec![battery("LFP"), battery("  ")]);
        assert!(matches!(result, Err(CatalogError::EmptyName { index: 1 })));
    }

    #[test]
    fn test_invalid_field() {
        let result = Catalog::try_new(vec![Battery { cost: -1.0, ..battery("LFP") }]);
        assert!(matches!(
            result,
            Err(CatalogError::InvalidField { field: "cost_INRperkWh", .. }),
        ));
        let result = Catalog::try_new(vec![Battery { efficiency: f64::NAN, ..battery("LFP") }]);
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_depth_of_discharge() {
        let result = Catalog::try_new(vec![Battery { depth_of_discharge: 0.0, ..battery("LFP") }]);
        assert!(matches!(result, Err(CatalogError::NoUsableCapacity(name)) if name == "LFP"));
    }

    #[test]
    fn test_parse_error() {
        let error = Catalog::from_json("[{\"name\": ").unwrap_err();
        assert!(error.downcast_ref::<serde_json::Error>().is_some());
        let error = Catalog::from_toml("[[battery]]\nname = 1").unwrap_err();
        assert!(error.downcast_ref::<CatalogError>().is_none());
    }

    #[test]
    fn test_negative_temperature_is_allowed() {
        let catalog =
            Catalog::try_new(vec![Battery { operating_temp_min: -20.0, ..battery("LFP") }]);
        assert!(catalog.is_ok());
    }

    #[test]
    fn test_empty_catalog() {
        assert!(Catalog::try_new(Vec::new()).unwrap().is_empty());
    }

    #[test]
    fn test_from_toml() {
        let catalog = Catalog::from_toml(
            r#"
            [[battery]]
            name = "LFP"
            energyDensity_Whkg = 125
            cycleLife_cycles = 3500
            chargeTime_hours = 1.5
            selfDischarge_pctPerMonth = 3
            safety_rating10 = 9
            cost_INRperkWh = 16600
            tempRange_spanC = 80
            applications = "Grid storage"
            efficiency_pct = 96
            powerDensity_Wkg = 280
            depthOfDischarge_pct = 95
            operatingTemp_min = -20
            operatingTemp_max = 60
            "#,
        )
        .unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog[0].depth_of_discharge, 95.0);
    }
}
