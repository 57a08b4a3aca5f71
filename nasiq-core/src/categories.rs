//! Configurable price-band table mapping a final price to a tier.
//!
//! Two divergent boundary sets shipped in earlier versions of the app; both
//! are expressible here as configuration. `standard` is the canonical table,
//! `legacy` exists so datasets priced under the older copy can still be
//! categorized.

use crate::error::NasiqError;
use nasiq_schemas::category::Category;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBand {
    pub category: Category,
    pub min_price: f64,
    /// Exclusive upper bound. `None` marks the open-ended top band.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct BandsFile {
    pub schema_version: String,
    pub bands: Vec<CategoryBand>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBands {
    bands: Vec<CategoryBand>,
}

impl CategoryBands {
    /// The canonical boundary table: 0 / 200 / 300 / 450.
    pub fn standard() -> Self {
        Self::preset_bands(&[200.0, 300.0, 450.0])
    }

    /// The older divergent boundary table: 0 / 300 / 600 / 1000.
    pub fn legacy() -> Self {
        Self::preset_bands(&[300.0, 600.0, 1000.0])
    }

    pub fn preset(name: &str) -> Result<Self, NasiqError> {
        match name {
            "standard" => Ok(Self::standard()),
            "legacy" => Ok(Self::legacy()),
            other => Err(NasiqError::UnknownPreset(other.to_string())),
        }
    }

    fn preset_bands(cutoffs: &[f64; 3]) -> Self {
        let bands = vec![
            CategoryBand {
                category: Category::Economy,
                min_price: 0.0,
                max_price: Some(cutoffs[0]),
            },
            CategoryBand {
                category: Category::Daily,
                min_price: cutoffs[0],
                max_price: Some(cutoffs[1]),
            },
            CategoryBand {
                category: Category::Premium,
                min_price: cutoffs[1],
                max_price: Some(cutoffs[2]),
            },
            CategoryBand {
                category: Category::Luxury,
                min_price: cutoffs[2],
                max_price: None,
            },
        ];
        CategoryBands { bands }
    }

    /// Builds a validated table: one band per tier in ascending order,
    /// starting at zero, contiguous, with an open-ended top band.
    pub fn new(bands: Vec<CategoryBand>) -> Result<Self, NasiqError> {
        if bands.len() != Category::ALL.len() {
            return Err(NasiqError::BandConfig(format!(
                "expected {} bands, found {}",
                Category::ALL.len(),
                bands.len()
            )));
        }
        for (band, expected) in bands.iter().zip(Category::ALL) {
            if band.category != expected {
                return Err(NasiqError::BandConfig(format!(
                    "band for '{}' is out of order, expected '{}'",
                    band.category, expected
                )));
            }
        }
        if bands[0].min_price != 0.0 {
            return Err(NasiqError::BandConfig(
                "the lowest band must start at 0".to_string(),
            ));
        }
        for pair in bands.windows(2) {
            let upper = pair[0].max_price.ok_or_else(|| {
                NasiqError::BandConfig(format!(
                    "band for '{}' needs an upper bound",
                    pair[0].category
                ))
            })?;
            if upper <= pair[0].min_price {
                return Err(NasiqError::BandConfig(format!(
                    "band for '{}' has an empty price range",
                    pair[0].category
                )));
            }
            if pair[1].min_price != upper {
                return Err(NasiqError::BandConfig(format!(
                    "bands for '{}' and '{}' are not contiguous",
                    pair[0].category, pair[1].category
                )));
            }
        }
        if bands[Category::ALL.len() - 1].max_price.is_some() {
            return Err(NasiqError::BandConfig(
                "the top band must be open-ended".to_string(),
            ));
        }
        Ok(CategoryBands { bands })
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, NasiqError> {
        let file: BandsFile = serde_yaml::from_str(text)
            .map_err(|e| NasiqError::YamlParsing("<bands>".to_string(), e))?;
        Self::new(file.bands)
    }

    /// Looks up the half-open band `[min, max)` containing `price`. Prices
    /// outside every band saturate to the top tier.
    pub fn categorize(&self, price: f64) -> Category {
        for band in &self.bands {
            if price >= band.min_price && band.max_price.map_or(true, |max| price < max) {
                return band.category;
            }
        }
        Category::Luxury
    }

    pub fn bands(&self) -> &[CategoryBand] {
        &self.bands
    }
}
