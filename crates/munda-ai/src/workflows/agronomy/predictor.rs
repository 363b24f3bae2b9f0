use serde::{Deserialize, Serialize};
use tracing::debug;

use super::sensors::SensorReadings;
use crate::workflows::credit::SoilObservation;

/// Capability boundary for the soil and crop models. Scoring only consumes the resulting observation.
pub trait SoilPredictor: Send + Sync {
    fn predict_soil(&self, readings: &SensorReadings) -> Result<SoilPrediction, PredictionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum PredictionError {
    #[error("prediction backend unavailable: {0}")]
    Unavailable(String),
    #[error("prediction backend returned an invalid response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoilType {
    Loamy,
    Clay,
    Sandy,
    Peaty,
    Saline,
}

impl SoilType {
    pub const fn label(self) -> &'static str {
        match self {
            SoilType::Loamy => "Loamy",
            SoilType::Clay => "Clay",
            SoilType::Sandy => "Sandy",
            SoilType::Peaty => "Peaty",
            SoilType::Saline => "Saline",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhCategory {
    Acidic,
    Neutral,
    Alkaline,
}

impl PhCategory {
    pub fn from_ph(ph: f64) -> Self {
        if ph < 6.5 {
            PhCategory::Acidic
        } else if ph > 7.5 {
            PhCategory::Alkaline
        } else {
            PhCategory::Neutral
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            PhCategory::Acidic => "acidic",
            PhCategory::Neutral => "neutral",
            PhCategory::Alkaline => "alkaline",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityCategory {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl QualityCategory {
    pub fn from_score(score: f64) -> Self {
        if score < 30.0 {
            QualityCategory::Poor
        } else if score < 60.0 {
            QualityCategory::Fair
        } else if score < 80.0 {
            QualityCategory::Good
        } else {
            QualityCategory::Excellent
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            QualityCategory::Poor => "poor",
            QualityCategory::Fair => "fair",
            QualityCategory::Good => "good",
            QualityCategory::Excellent => "excellent",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilPrediction {
    pub soil_type: SoilType,
    pub soil_ph: f64,
    pub ph_category: PhCategory,
    pub recommended_crop: String,
    pub quality_score: f64,
    pub quality_category: QualityCategory,
}

impl SoilPrediction {
    pub fn observation(&self) -> SoilObservation {
        SoilObservation {
            quality_score: self.quality_score,
        }
    }
}

/// Rule-of-thumb predictor used when no trained models are deployed.
#[derive(Debug, Clone, Default)]
pub struct HeuristicSoilPredictor;

const DEFAULT_SOIL_PH: f64 = 6.5;
const DEFAULT_CROP: &str = "Maize";

impl SoilPredictor for HeuristicSoilPredictor {
    fn predict_soil(&self, readings: &SensorReadings) -> Result<SoilPrediction, PredictionError> {
        let raw = (readings.npk.average() / 100.0) * 70.0 + (readings.soil_moisture / 100.0) * 30.0;
        let quality_score = round_two(raw.clamp(0.0, 100.0));
        debug!(quality_score, "heuristic soil quality estimate");

        Ok(SoilPrediction {
            soil_type: SoilType::Loamy,
            soil_ph: DEFAULT_SOIL_PH,
            ph_category: PhCategory::from_ph(DEFAULT_SOIL_PH),
            recommended_crop: DEFAULT_CROP.to_string(),
            quality_score,
            quality_category: QualityCategory::from_score(quality_score),
        })
    }
}

fn round_two(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
