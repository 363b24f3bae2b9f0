use serde::{Deserialize, Serialize};

/// Nitrogen, phosphorus and potassium levels on the kit's 0-100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NpkReading {
    pub n: f64,
    pub p: f64,
    pub k: f64,
}

impl NpkReading {
    pub fn average(&self) -> f64 {
        (self.n + self.p + self.k) / 3.0
    }
}

/// One upload from a field IoT kit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReadings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iot_kit_serial: Option<String>,
    pub npk: NpkReading,
    pub soil_moisture: f64,
    pub humidity: f64,
    pub temperature: f64,
    #[serde(default)]
    pub crop_yield_estimate: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SensorError {
    #[error("{field} reading {value} is outside {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("crop yield estimate must be non-negative (found {0})")]
    NegativeYield(f64),
}

impl SensorReadings {
    pub fn validate(&self) -> Result<(), SensorError> {
        check_range("npk.n", self.npk.n, 0.0, 100.0)?;
        check_range("npk.p", self.npk.p, 0.0, 100.0)?;
        check_range("npk.k", self.npk.k, 0.0, 100.0)?;
        check_range("soil_moisture", self.soil_moisture, 0.0, 100.0)?;
        check_range("humidity", self.humidity, 0.0, 100.0)?;
        check_range("temperature", self.temperature, -20.0, 50.0)?;

        if let Some(estimate) = self.crop_yield_estimate {
            if !estimate.is_finite() || estimate < 0.0 {
                return Err(SensorError::NegativeYield(estimate));
            }
        }

        Ok(())
    }
}

/// Deterministic readings for a kit serial, used until the kit gateway is wired in.
///
/// The same serial always yields the same values, all within the validated ranges.
pub fn simulated_kit_readings(serial: &str) -> SensorReadings {
    let seed = serial.encode_utf16().map(u64::from).sum::<u64>() % 1000;
    let offset = |base: u64, spread: u64| (base + seed % spread) as f64;

    SensorReadings {
        iot_kit_serial: Some(serial.to_string()),
        npk: NpkReading {
            n: offset(50, 40),
            p: offset(40, 35),
            k: offset(35, 30),
        },
        soil_moisture: offset(40, 50),
        humidity: offset(60, 30),
        temperature: offset(20, 15),
        crop_yield_estimate: Some(offset(50, 100)),
    }
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), SensorError> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(SensorError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn readings() -> SensorReadings {
        SensorReadings {
            iot_kit_serial: Some("MK-0042".to_string()),
            npk: NpkReading {
                n: 45.0,
                p: 38.0,
                k: 52.0,
            },
            soil_moisture: 35.0,
            humidity: 60.0,
            temperature: 24.0,
            crop_yield_estimate: Some(40.0),
        }
    }

    #[test]
    fn accepts_readings_within_kit_limits() {
        assert_eq!(readings().validate(), Ok(()));
    }

    #[test]
    fn names_the_offending_field() {
        let mut out_of_range = readings();
        out_of_range.temperature = 51.0;

        match out_of_range.validate() {
            Err(SensorError::OutOfRange { field, value, .. }) => {
                assert_eq!(field, "temperature");
                assert_eq!(value, 51.0);
            }
            other => panic!("expected out of range, got {other:?}"),
        }
    }

    #[test]
    fn rejects_negative_yield_estimate() {
        let mut negative = readings();
        negative.crop_yield_estimate = Some(-1.0);

        assert_eq!(negative.validate(), Err(SensorError::NegativeYield(-1.0)));
    }

    #[test]
    fn simulated_readings_follow_the_serial() {
        // "MK-0042" sums to 395
        let kit = simulated_kit_readings("MK-0042");

        assert_eq!(kit.iot_kit_serial.as_deref(), Some("MK-0042"));
        assert_eq!(kit.npk, NpkReading { n: 85.0, p: 50.0, k: 40.0 });
        assert_eq!(kit.soil_moisture, 85.0);
        assert_eq!(kit.humidity, 65.0);
        assert_eq!(kit.temperature, 25.0);
        assert_eq!(kit.crop_yield_estimate, Some(145.0));
        assert_eq!(kit, simulated_kit_readings("MK-0042"));
        assert_eq!(kit.validate(), Ok(()));
    }

    #[test]
    fn simulated_readings_stay_in_range_for_long_serials() {
        let serial = "MUNDA-KIT-".repeat(40);
        assert_eq!(simulated_kit_readings(&serial).validate(), Ok(()));
    }
}
