use crate::analyze::relevance::RelevanceParams;
use crate::error::SysrecError;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SysrecConfig {
    pub relevance: Option<RelevanceConfig>,
    pub selection: Option<SelectionConfig>,
    pub tuning: Option<TuningConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RelevanceConfig {
    pub depth_penalty: Option<f64>,
    pub pronom_rarity_weight: Option<f64>,
    pub system_rarity_weight: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SelectionConfig {
    pub target: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TuningConfig {
    /// `[depth_penalty, pronom_rarity_weight, system_rarity_weight]` triples.
    pub options: Option<Vec<[f64; 3]>>,
}

impl SysrecConfig {
    pub fn relevance_params(&self) -> RelevanceParams {
        let defaults = RelevanceParams::default();
        match &self.relevance {
            Some(relevance) => RelevanceParams {
                depth_penalty: relevance.depth_penalty.unwrap_or(defaults.depth_penalty),
                pronom_rarity_weight: relevance
                    .pronom_rarity_weight
                    .unwrap_or(defaults.pronom_rarity_weight),
                system_rarity_weight: relevance
                    .system_rarity_weight
                    .unwrap_or(defaults.system_rarity_weight),
            },
            None => defaults,
        }
    }

    pub fn selection_target(&self) -> Option<usize> {
        self.selection
            .as_ref()
            .and_then(|selection| selection.target)
    }

    /// Configured tuning grid, if any.
    pub fn tuning_options(&self) -> Option<Vec<RelevanceParams>> {
        self.tuning
            .as_ref()
            .and_then(|tuning| tuning.options.as_ref())
            .map(|options| {
                options
                    .iter()
                    .map(|[depth, pronom, system]| RelevanceParams::new(*depth, *pronom, *system))
                    .collect()
            })
    }

    pub fn validate(&self) -> Result<(), SysrecError> {
        self.relevance_params().validate()?;
        if self.selection_target() == Some(0) {
            return Err(SysrecError::InvalidParameter(
                "selection.target must be at least 1".to_string(),
            ));
        }
        if let Some(options) = self.tuning_options() {
            if options.is_empty() {
                return Err(SysrecError::InvalidParameter(
                    "tuning.options must not be empty".to_string(),
                ));
            }
            for option in &options {
                option.validate()?;
            }
        }
        Ok(())
    }
}
