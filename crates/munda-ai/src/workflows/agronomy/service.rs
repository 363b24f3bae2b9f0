use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::advisory::{
    companion_crop, field_summary, land_preparation_advice, soil_improvement_suggestions,
    water_alert, WaterAlert,
};
use super::alerts::{sms_summary, AlertError, AlertPublisher, FarmerAlert};
use super::predictor::{PredictionError, SoilPrediction, SoilPredictor};
use super::repository::{InsightRepository, INSIGHT_HISTORY_LIMIT};
use super::sensors::{SensorError, SensorReadings};
use crate::workflows::credit::{FarmerId, FarmerRepository, RepositoryError};

const DEFAULT_YIELD_ESTIMATE: f64 = 50.0;

/// Everything derived from one sensor upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldInsight {
    pub farmer_id: FarmerId,
    pub readings: SensorReadings,
    pub prediction: SoilPrediction,
    pub companion_crop: String,
    pub land_preparation: Vec<String>,
    pub soil_improvement: Vec<String>,
    pub nutrients: Vec<String>,
    pub water_alert: WaterAlert,
    pub estimated_farm_size_ha: f64,
    pub summary: String,
    pub recorded_at: DateTime<Utc>,
}

/// Service turning raw kit uploads into advice and the soil observations credit scoring consumes.
pub struct InsightService<P, F, I, A> {
    predictor: Arc<P>,
    farmers: Arc<F>,
    insights: Arc<I>,
    alerts: Arc<A>,
}

impl<P, F, I, A> InsightService<P, F, I, A>
where
    P: SoilPredictor + 'static,
    F: FarmerRepository + 'static,
    I: InsightRepository + 'static,
    A: AlertPublisher + 'static,
{
    pub fn new(predictor: Arc<P>, farmers: Arc<F>, insights: Arc<I>, alerts: Arc<A>) -> Self {
        Self {
            predictor,
            farmers,
            insights,
            alerts,
        }
    }

    pub fn process(
        &self,
        farmer_id: &FarmerId,
        readings: SensorReadings,
    ) -> Result<FieldInsight, InsightServiceError> {
        if let Err(err) = readings.validate() {
            warn!(farmer_id = %farmer_id.0, error = %err, "rejected sensor upload");
            return Err(err.into());
        }

        let prediction = self.predictor.predict_soil(&readings)?;
        let insight = build_insight(farmer_id, readings, prediction);

        self.farmers
            .record_observation(farmer_id, insight.prediction.observation())?;
        self.insights.record(insight.clone())?;

        info!(
            farmer_id = %farmer_id.0,
            quality_score = insight.prediction.quality_score,
            needs_water = insight.water_alert.needs_water,
            "field insight recorded"
        );

        if insight.water_alert.needs_water {
            let mut details = BTreeMap::new();
            details.insert(
                "liters_needed".to_string(),
                insight.water_alert.liters_needed.to_string(),
            );
            details.insert("message".to_string(), insight.water_alert.message.clone());
            self.alerts.publish(FarmerAlert {
                template: "water_alert".to_string(),
                farmer_id: farmer_id.clone(),
                details,
            })?;
        }

        let mut details = BTreeMap::new();
        details.insert("message".to_string(), sms_summary(&insight.summary));
        self.alerts.publish(FarmerAlert {
            template: "summary_report".to_string(),
            farmer_id: farmer_id.clone(),
            details,
        })?;

        Ok(insight)
    }

    /// The farmer's most recent insights, newest first.
    pub fn history(
        &self,
        farmer_id: &FarmerId,
    ) -> Result<Vec<FieldInsight>, InsightServiceError> {
        Ok(self.insights.latest(farmer_id, INSIGHT_HISTORY_LIMIT)?)
    }
}

pub(crate) fn build_insight(
    farmer_id: &FarmerId,
    readings: SensorReadings,
    prediction: SoilPrediction,
) -> FieldInsight {
    let companion = companion_crop(&prediction.recommended_crop).to_string();
    let land_preparation = land_preparation_advice(prediction.soil_type, prediction.soil_ph);
    let soil_improvement = soil_improvement_suggestions(
        &readings.npk,
        prediction.soil_type,
        prediction.quality_score,
    );
    let nutrients = soil_improvement
        .iter()
        .filter(|s| s.contains("fertilizer") || s.contains("nutrient"))
        .cloned()
        .collect();
    let alert = water_alert(readings.soil_moisture, readings.temperature);
    let summary = field_summary(
        &prediction,
        &companion,
        &land_preparation,
        &soil_improvement,
        &alert,
    );
    let estimated_farm_size_ha = (readings
        .crop_yield_estimate
        .unwrap_or(DEFAULT_YIELD_ESTIMATE)
        / 10.0)
        .clamp(0.5, 10.0);

    FieldInsight {
        farmer_id: farmer_id.clone(),
        readings,
        prediction,
        companion_crop: companion,
        land_preparation,
        soil_improvement,
        nutrients,
        water_alert: alert,
        estimated_farm_size_ha,
        summary,
        recorded_at: Utc::now(),
    }
}

/// Error raised by the insight service.
#[derive(Debug, thiserror::Error)]
pub enum InsightServiceError {
    #[error(transparent)]
    Sensor(#[from] SensorError),
    #[error(transparent)]
    Prediction(#[from] PredictionError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Alert(#[from] AlertError),
}
