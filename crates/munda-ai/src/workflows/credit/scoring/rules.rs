use super::super::domain::{ApplicantProfile, EducationLevel, SoilObservation};
use super::{RiskCategory, RiskFactor, ScoreAdjustment};

pub(crate) const BASELINE_SCORE: i32 = 50;

/// Applies the additive rubric and returns every non-zero adjustment alongside the clamped score.
pub(crate) fn score_profile(
    profile: &ApplicantProfile,
    soil: Option<&SoilObservation>,
) -> (Vec<ScoreAdjustment>, u8) {
    let mut adjustments = Vec::new();
    let mut push = |factor: RiskFactor, points: i32, notes: String| {
        if points != 0 {
            adjustments.push(ScoreAdjustment {
                factor,
                points,
                notes,
            });
        }
    };

    if profile.cooperative_member {
        push(
            RiskFactor::CooperativeMembership,
            -15,
            "cooperative member".to_string(),
        );
    } else {
        push(
            RiskFactor::CooperativeMembership,
            10,
            "no cooperative membership".to_string(),
        );
    }

    let education = match profile.education_level {
        EducationLevel::Tertiary => -10,
        EducationLevel::Secondary => -5,
        EducationLevel::Primary => 0,
        EducationLevel::None => 5,
    };
    push(
        RiskFactor::Education,
        education,
        format!("{} education", profile.education_level.label()),
    );

    let years = profile.farming_experience_years;
    let experience = if years >= 10 {
        -10
    } else if years >= 5 {
        -5
    } else if years < 2 {
        10
    } else {
        0
    };
    push(
        RiskFactor::Experience,
        experience,
        format!("{years} year(s) farming"),
    );

    let assets = profile.asset_value;
    let asset_points = if assets >= 100_000.0 {
        -10
    } else if assets >= 50_000.0 {
        -5
    } else if assets < 10_000.0 {
        10
    } else {
        0
    };
    push(
        RiskFactor::AssetValue,
        asset_points,
        format!("assets valued at {assets:.0}"),
    );

    let losses = &profile.loss_history;
    for (reported, points, label) in [
        (losses.drought, 8, "drought"),
        (losses.rainfall_variability, 5, "rainfall variability"),
        (losses.heatwave, 5, "heatwave"),
        (losses.storm, 5, "storm"),
        (losses.mudslide, 7, "mudslide"),
    ] {
        if reported {
            push(
                RiskFactor::LossHistory,
                points,
                format!("past {label} losses"),
            );
        }
    }

    let active = profile.active_loan_count();
    let active_points = if active > 2 {
        15
    } else if active > 0 {
        5
    } else {
        0
    };
    push(
        RiskFactor::ActiveLoans,
        active_points,
        format!("{active} active loan(s)"),
    );

    let defaulted = profile.defaulted_loan_count();
    push(
        RiskFactor::DefaultedLoans,
        (defaulted as i32).saturating_mul(20),
        format!("{defaulted} defaulted loan(s)"),
    );

    if let Some(observation) = soil {
        let quality = observation.quality_score;
        let soil_points = if quality >= 80.0 {
            -5
        } else if quality < 40.0 {
            10
        } else {
            0
        };
        push(
            RiskFactor::SoilQuality,
            soil_points,
            format!("soil quality {quality:.0}/100"),
        );
    }

    let raw: i32 = BASELINE_SCORE + adjustments.iter().map(|a| a.points).sum::<i32>();
    (adjustments, clamp_score(raw))
}

pub(crate) fn clamp_score(raw: i32) -> u8 {
    raw.clamp(0, 100) as u8
}

pub(crate) fn categorize(risk_score: u8) -> RiskCategory {
    if risk_score < 30 {
        RiskCategory::Low
    } else if risk_score < 60 {
        RiskCategory::Medium
    } else {
        RiskCategory::High
    }
}
