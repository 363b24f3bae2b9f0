//! Sensor uploads from field kits: soil prediction, agronomic advice, alerts and insight history.

pub mod advisory;
pub mod alerts;
pub mod predictor;
pub mod repository;
pub mod router;
pub mod sensors;
pub mod service;


pub use advisory::{
    companion_crop, field_summary, land_preparation_advice, soil_improvement_suggestions,
    water_alert, WaterAlert,
};
pub use alerts::{sms_summary, AlertError, AlertPublisher, FarmerAlert, SMS_SUMMARY_LIMIT};
pub use predictor::{
    HeuristicSoilPredictor, PhCategory, PredictionError, QualityCategory, SoilPrediction,
    SoilPredictor, SoilType,
};
pub use repository::{InsightRepository, INSIGHT_HISTORY_LIMIT};
pub use router::{insight_router, KitSnapshot};
pub use sensors::{simulated_kit_readings, NpkReading, SensorError, SensorReadings};
pub use service::{FieldInsight, InsightService, InsightServiceError};
