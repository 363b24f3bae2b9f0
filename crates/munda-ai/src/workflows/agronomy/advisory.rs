use serde::{Deserialize, Serialize};

use super::predictor::{SoilPrediction, SoilType};
use super::sensors::NpkReading;

const OPTIMAL_MOISTURE: f64 = 60.0;
const DRY_THRESHOLD: f64 = 40.0;
const LITERS_PER_MOISTURE_POINT: f64 = 10.0;
const HEAT_THRESHOLD_C: f64 = 30.0;

/// Intercropping partner for the recommended crop. Unknown crops pair with beans.
pub fn companion_crop(main_crop: &str) -> &'static str {
    match main_crop {
        "Maize" => "Beans",
        "Beans" => "Maize",
        "Tomato" => "Basil",
        "Potato" => "Beans",
        "Rice" => "Fish",
        "Wheat" => "Clover",
        "Corn" => "Squash",
        _ => "Beans",
    }
}

pub fn land_preparation_advice(soil_type: SoilType, soil_ph: f64) -> Vec<String> {
    let mut advice: Vec<&str> = Vec::new();

    match soil_type {
        SoilType::Clay => advice.extend([
            "Add organic matter to improve drainage",
            "Use raised beds for better water management",
            "Avoid tilling when soil is wet",
        ]),
        SoilType::Sandy => advice.extend([
            "Add compost to improve water retention",
            "Use mulch to reduce water loss",
            "Consider drip irrigation",
        ]),
        SoilType::Loamy => advice.extend([
            "Maintain organic matter levels",
            "Practice crop rotation",
        ]),
        SoilType::Peaty | SoilType::Saline => {}
    }

    if soil_ph < 6.0 {
        advice.push("Add lime to raise pH level");
    } else if soil_ph > 7.5 {
        advice.push("Add sulfur or organic matter to lower pH");
    }

    if advice.is_empty() {
        advice.push("Standard land preparation recommended");
    }
    advice.into_iter().map(str::to_string).collect()
}

pub fn soil_improvement_suggestions(
    npk: &NpkReading,
    soil_type: SoilType,
    quality_score: f64,
) -> Vec<String> {
    let mut suggestions: Vec<&str> = Vec::new();

    if npk.n < 50.0 {
        suggestions.push("Add nitrogen-rich fertilizer (Urea or compost)");
    }
    if npk.p < 40.0 {
        suggestions.push("Add phosphorus fertilizer (DAP or bone meal)");
    }
    if npk.k < 40.0 {
        suggestions.push("Add potassium fertilizer (Muriate of Potash)");
    }

    if quality_score < 50.0 {
        suggestions.push("Add organic compost to improve soil structure");
        suggestions.push("Consider cover crops to enhance soil fertility");
    }

    match soil_type {
        SoilType::Sandy => suggestions.push("Add clay or organic matter to improve texture"),
        SoilType::Clay => suggestions.push("Add sand or gypsum to improve drainage"),
        _ => {}
    }

    if suggestions.is_empty() {
        suggestions.push("Maintain current soil management practices");
    }
    suggestions.into_iter().map(str::to_string).collect()
}

/// Irrigation guidance derived from soil moisture and air temperature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterAlert {
    pub needs_water: bool,
    pub liters_needed: u32,
    pub message: String,
}

pub fn water_alert(soil_moisture: f64, temperature: f64) -> WaterAlert {
    if soil_moisture >= DRY_THRESHOLD {
        return WaterAlert {
            needs_water: false,
            liters_needed: 0,
            message: "Soil moisture is adequate".to_string(),
        };
    }

    let deficit = OPTIMAL_MOISTURE - soil_moisture;
    let liters_needed = (deficit * LITERS_PER_MOISTURE_POINT).ceil() as u32;

    let mut message = format!("Water your crops with {liters_needed} liters");
    if temperature > HEAT_THRESHOLD_C {
        message.push_str(". High temperature detected - increase watering frequency.");
    }

    WaterAlert {
        needs_water: true,
        liters_needed,
        message,
    }
}

/// Plain-text report sent to the farmer after each sensor upload.
pub fn field_summary(
    prediction: &SoilPrediction,
    companion: &str,
    land_preparation: &[String],
    soil_improvement: &[String],
    alert: &WaterAlert,
) -> String {
    let water_line = if alert.needs_water {
        format!("Warning: {}", alert.message)
    } else {
        "Water levels are adequate".to_string()
    };

    format!(
        "Soil Analysis Summary:\n\
         - Soil Type: {}\n\
         - Soil pH: {} ({})\n\
         - Soil Quality: {} ({}/100)\n\
         \n\
         Crop Recommendations:\n\
         - Recommended Crop: {}\n\
         - Companion Crop: {}\n\
         \n\
         {}\n\
         \n\
         Land Preparation: {}\n\
         \n\
         Soil Improvement: {}",
        prediction.soil_type.label(),
        prediction.soil_ph,
        prediction.ph_category.label(),
        prediction.quality_category.label(),
        prediction.quality_score,
        prediction.recommended_crop,
        companion,
        water_line,
        land_preparation.join(", "),
        soil_improvement.join(", "),
    )
}
