use crate::infra::{
    InMemoryAlertPublisher, InMemoryCreditScoreRepository, InMemoryFarmerRepository,
    InMemoryInsightRepository,
};
use clap::Args;
use munda_ai::error::AppError;
use munda_ai::workflows::agronomy::{
    FieldInsight, HeuristicSoilPredictor, InsightService, NpkReading, SensorReadings,
};
use munda_ai::workflows::credit::{
    ApplicantProfile, CreditScoringService, EducationLevel, FarmerId, LoanRecord, LoanStatus,
    LossHistory, RiskScoringEngine, ScoringConfig, ScoringResult, SoilObservation,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Applicant profile as a JSON file
    #[arg(long)]
    pub(crate) profile: PathBuf,
    /// Soil quality reading (0-100). Omit to score without soil data.
    #[arg(long)]
    pub(crate) soil_quality: Option<f64>,
    /// Partner catalog CSV (name,base_interest_rate_percent,distance_km)
    #[arg(long)]
    pub(crate) partners_csv: Option<PathBuf>,
    /// Print the full result as JSON instead of a text summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Partner catalog CSV used for offers. Defaults to the built-in banks.
    #[arg(long)]
    pub(crate) partners_csv: Option<PathBuf>,
    /// Skip the sensor upload and score with the neutral soil default.
    #[arg(long)]
    pub(crate) skip_insights: bool,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        profile,
        soil_quality,
        partners_csv,
        json,
    } = args;

    let raw = std::fs::read_to_string(&profile)?;
    let profile: ApplicantProfile = serde_json::from_str(&raw)?;
    let engine = RiskScoringEngine::new(load_partners(partners_csv)?);
    let observation = soil_quality.map(|quality_score| SoilObservation { quality_score });
    let result = engine.evaluate(&profile, observation.as_ref())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        render_scoring_result(&result);
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        partners_csv,
        skip_insights,
    } = args;

    let farmers = Arc::new(InMemoryFarmerRepository::default());
    let scores = Arc::new(InMemoryCreditScoreRepository::default());
    let alerts = Arc::new(InMemoryAlertPublisher::default());
    let credit = CreditScoringService::new(farmers.clone(), scores, load_partners(partners_csv)?);
    let insights = InsightService::new(
        Arc::new(HeuristicSoilPredictor),
        farmers,
        Arc::new(InMemoryInsightRepository::default()),
        alerts.clone(),
    );

    let farmer_id = FarmerId("demo-farmer-kirinyaga".to_string());
    println!("Múnda AI demo for {}", farmer_id.0);

    let profile = match credit.register_profile(&farmer_id, demo_profile()) {
        Ok(profile) => profile,
        Err(err) => {
            println!("  Profile rejected: {}", err);
            return Ok(());
        }
    };
    println!(
        "- Registered profile: cooperative={} | {} education | {} year(s) farming | assets {:.0} KES",
        profile.cooperative_member,
        profile.education_level.label(),
        profile.farming_experience_years,
        profile.asset_value
    );

    if skip_insights {
        println!("\nSensor upload skipped; scoring with the neutral soil default");
    } else {
        match insights.process(&farmer_id, demo_readings()) {
            Ok(insight) => render_insight(&insight),
            Err(err) => println!("  Sensor upload rejected: {}", err),
        }
    }

    let record = match credit.calculate(&farmer_id) {
        Ok(record) => record,
        Err(err) => {
            println!("  Credit scoring unavailable: {}", err);
            return Ok(());
        }
    };
    println!("\nCredit score (soil quality {:.2})", record.factors.soil_quality);
    render_scoring_result(&record.result);

    let events = alerts.events();
    if events.is_empty() {
        println!("\nFarmer alerts: none dispatched");
    } else {
        println!("\nFarmer alerts:");
        for alert in events {
            let message = alert.details.get("message").map(String::as_str).unwrap_or("");
            println!("  - template={} -> {} ({})", alert.template, alert.farmer_id.0, message);
        }
    }

    Ok(())
}

fn load_partners(partners_csv: Option<PathBuf>) -> Result<ScoringConfig, AppError> {
    match partners_csv {
        Some(path) => ScoringConfig::from_path(path).map_err(AppError::from),
        None => Ok(ScoringConfig::standard()),
    }
}

fn render_scoring_result(result: &ScoringResult) {
    println!(
        "Risk score: {}/100 ({} risk)",
        result.risk_score,
        result.risk_category.label()
    );
    println!("Loan ceiling: {} KES", result.loan_ceiling);
    println!("{}", result.rationale);

    println!("Score adjustments:");
    for adjustment in &result.adjustments {
        println!(
            "  - {:?}: {:+} ({})",
            adjustment.factor, adjustment.points, adjustment.notes
        );
    }

    if result.ranked_offers.is_empty() {
        println!("Partner offers: none available");
        return;
    }
    println!("Partner offers (nearest first):");
    for offer in &result.ranked_offers {
        println!(
            "  - {}: {:.2}% | up to {} KES | {:.1} km",
            offer.partner_name,
            offer.adjusted_rate_percent,
            offer.max_offer_amount,
            offer.distance_km
        );
    }
}

fn render_insight(insight: &FieldInsight) {
    println!("\nField insight");
    println!(
        "- Soil: {} | pH {:.1} ({}) | quality {:.2} ({:?})",
        insight.prediction.soil_type.label(),
        insight.prediction.soil_ph,
        insight.prediction.ph_category.label(),
        insight.prediction.quality_score,
        insight.prediction.quality_category
    );
    println!(
        "- Recommended crop: {} with {}",
        insight.prediction.recommended_crop, insight.companion_crop
    );
    println!("- Estimated farm size: {:.1} ha", insight.estimated_farm_size_ha);
    for line in &insight.soil_improvement {
        println!("  - {}", line);
    }
    println!("{}", insight.summary);
}

fn demo_profile() -> ApplicantProfile {
    ApplicantProfile {
        cooperative_member: true,
        education_level: EducationLevel::Primary,
        farming_experience_years: 7,
        asset_value: 65_000.0,
        loss_history: LossHistory {
            drought: true,
            ..LossHistory::default()
        },
        loans: vec![
            LoanRecord {
                amount: 20_000.0,
                status: LoanStatus::Paid,
                institution: Some("Equity Bank".to_string()),
            },
            LoanRecord {
                amount: 12_000.0,
                status: LoanStatus::Active,
                institution: Some("Family Bank".to_string()),
            },
        ],
    }
}

fn demo_readings() -> SensorReadings {
    SensorReadings {
        iot_kit_serial: Some("MK-DEMO-001".to_string()),
        npk: NpkReading {
            n: 62.0,
            p: 48.0,
            k: 71.0,
        },
        soil_moisture: 28.0,
        humidity: 64.0,
        temperature: 31.0,
        crop_yield_estimate: Some(18.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("munda-ai-{}-{}", std::process::id(), name))
    }

    #[test]
    fn demo_runs_end_to_end() {
        run_demo(DemoArgs::default()).expect("demo completes");
    }

    #[test]
    fn score_reads_profile_json() {
        let path = temp_path("profile.json");
        let mut file = std::fs::File::create(&path).expect("temp file");
        file.write_all(
            serde_json::to_string(&demo_profile())
                .expect("serializes")
                .as_bytes(),
        )
        .expect("write profile");

        let outcome = run_score(ScoreArgs {
            profile: path.clone(),
            soil_quality: Some(65.0),
            partners_csv: None,
            json: true,
        });
        std::fs::remove_file(&path).ok();
        outcome.expect("profile scores");
    }

    #[test]
    fn score_rejects_malformed_profile() {
        let path = temp_path("broken.json");
        std::fs::write(&path, "{\"cooperative_member\": \"yes\"}").expect("write profile");

        let outcome = run_score(ScoreArgs {
            profile: path.clone(),
            soil_quality: None,
            partners_csv: None,
            json: false,
        });
        std::fs::remove_file(&path).ok();
        assert!(matches!(outcome, Err(AppError::Payload(_))));
    }

    #[test]
    fn score_rejects_out_of_range_soil() {
        let path = temp_path("soil.json");
        std::fs::write(
            &path,
            serde_json::to_string(&demo_profile()).expect("serializes"),
        )
        .expect("write profile");

        let outcome = run_score(ScoreArgs {
            profile: path.clone(),
            soil_quality: Some(140.0),
            partners_csv: None,
            json: false,
        });
        std::fs::remove_file(&path).ok();
        assert!(matches!(outcome, Err(AppError::Scoring(_))));
    }
}
