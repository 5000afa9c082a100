//! Domain model for spawn sightings.
//!
//! A `Spawn` is a geolocated, time-bounded event identified by an external
//! encounter id. The raw report type carries the untyped query-parameter
//! strings and owns the parse-and-validate step that turns them into a
//! typed row; a value that cannot be coerced is rejected rather than
//! silently zeroed.

use serde::{Deserialize, Serialize};

use crate::error::IngestError;

/// A recorded spawn sighting.
///
/// At most one row exists per `encounter_id`; the database enforces the
/// uniqueness, not the application. Rows are created on first report and
/// never refreshed, deleted, or expired by this service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Spawn {
    /// External unique identifier for the sighting event.
    pub encounter_id: String,

    /// Epoch seconds at which the event ceases to be valid.
    pub expiration_timestamp: i64,

    /// Latitude of the sighting.
    pub latitude: f64,

    /// Longitude of the sighting.
    pub longitude: f64,

    /// Descriptive label for the sighted creature.
    pub name: String,

    /// Identifier of the stationary location associated with the event.
    pub spawn_point_id: String,
}

/// Raw sighting report as it arrives on the wire.
///
/// All six fields are required query parameters and reach us as untyped
/// strings. [`RawSpawnReport::parse`] performs the explicit coercion into a
/// [`Spawn`].
#[derive(Debug, Clone, Deserialize)]
pub struct RawSpawnReport {
    /// External unique identifier, kept as-is.
    pub encounter_id: String,

    /// Epoch seconds, must parse as a signed integer.
    pub expiration_timestamp: String,

    /// Latitude, must parse as a float.
    pub latitude: String,

    /// Longitude, must parse as a float.
    pub longitude: String,

    /// Descriptive label, kept as-is.
    pub name: String,

    /// Stationary location identifier, kept as-is.
    pub spawn_point_id: String,
}

impl RawSpawnReport {
    /// Coerces the raw strings into a typed [`Spawn`].
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Validation`] naming the first parameter that
    /// fails to parse. No partial coercion takes place.
    pub fn parse(self) -> std::result::Result<Spawn, IngestError> {
        let expiration_timestamp =
            self.expiration_timestamp.parse::<i64>().map_err(|_| IngestError::Validation {
                param: "expiration_timestamp",
                value: self.expiration_timestamp.clone(),
            })?;

        let latitude = self.latitude.parse::<f64>().map_err(|_| IngestError::Validation {
            param: "latitude",
            value: self.latitude.clone(),
        })?;

        let longitude = self.longitude.parse::<f64>().map_err(|_| IngestError::Validation {
            param: "longitude",
            value: self.longitude.clone(),
        })?;

        Ok(Spawn {
            encounter_id: self.encounter_id,
            expiration_timestamp,
            latitude,
            longitude,
            name: self.name,
            spawn_point_id: self.spawn_point_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(lat: &str, lon: &str, exp: &str) -> RawSpawnReport {
        RawSpawnReport {
            encounter_id: "E1".to_string(),
            expiration_timestamp: exp.to_string(),
            latitude: lat.to_string(),
            longitude: lon.to_string(),
            name: "Pidgey".to_string(),
            spawn_point_id: "SP1".to_string(),
        }
    }

    #[test]
    fn parse_accepts_well_formed_report() {
        let spawn = raw("37.7749", "-122.4194", "1700000000").parse().expect("valid report");

        assert_eq!(spawn.encounter_id, "E1");
        assert_eq!(spawn.expiration_timestamp, 1_700_000_000);
        assert!((spawn.latitude - 37.7749).abs() < f64::EPSILON);
        assert!((spawn.longitude - (-122.4194)).abs() < f64::EPSILON);
        assert_eq!(spawn.name, "Pidgey");
        assert_eq!(spawn.spawn_point_id, "SP1");
    }

    #[test]
    fn parse_rejects_non_numeric_latitude() {
        let err = raw("abc", "-122.4194", "1700000000").parse().unwrap_err();

        match err {
            IngestError::Validation { param, value } => {
                assert_eq!(param, "latitude");
                assert_eq!(value, "abc");
            },
            other => panic!("expected validation error, got {other}"),
        }
    }

    #[test]
    fn parse_rejects_fractional_expiration() {
        let err = raw("37.0", "-122.0", "1700000000.5").parse().unwrap_err();

        assert_eq!(err.code(), "E1002");
        assert!(matches!(err, IngestError::Validation { param: "expiration_timestamp", .. }));
    }

    #[test]
    fn parse_rejects_empty_longitude() {
        let err = raw("37.0", "", "1700000000").parse().unwrap_err();

        assert!(matches!(err, IngestError::Validation { param: "longitude", .. }));
    }

    #[test]
    fn parse_keeps_string_fields_verbatim() {
        let mut report = raw("1.0", "2.0", "3");
        report.name = "Pidgey2".to_string();

        let spawn = report.parse().expect("valid report");
        assert_eq!(spawn.name, "Pidgey2");
    }
}
