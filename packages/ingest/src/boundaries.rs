//! District boundary loading.
//!
//! Reduces the district polygon `FeatureCollection` to the join keys the
//! views need ([`DistrictFeature`]). Geometry itself is left to the
//! rendering layer, which reads the same file.

use std::io::Read;

use geojson::{FeatureCollection, GeoJson};
use school_map_district_models::{DistrictCode, DistrictFeature};

use crate::IngestError;

/// Default property holding the eight-digit district code.
pub const DEFAULT_CODE_PROPERTY: &str = "ORG8CODE";
/// Default property holding the district display name.
pub const DEFAULT_NAME_PROPERTY: &str = "DISTRICT_N";

/// Which feature properties carry the join keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureProperties {
    /// Property holding the district code (string or number).
    pub code: String,
    /// Property holding the display name.
    pub name: String,
}

impl Default for FeatureProperties {
    fn default() -> Self {
        Self {
            code: DEFAULT_CODE_PROPERTY.to_owned(),
            name: DEFAULT_NAME_PROPERTY.to_owned(),
        }
    }
}

/// Parses a `GeoJSON` `FeatureCollection` from `reader`.
///
/// # Errors
///
/// Returns [`IngestError::Io`] on read failure and [`IngestError::GeoJson`]
/// if the text is not a `FeatureCollection`.
pub fn read_feature_collection<R: Read>(mut reader: R) -> Result<FeatureCollection, IngestError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    let geojson: GeoJson = text.parse()?;
    Ok(FeatureCollection::try_from(geojson)?)
}

/// Reduces every feature of `collection` to a [`DistrictFeature`], in
/// file order.
///
/// Features whose code property is missing or malformed are kept with
/// `code: None` so they still render, as no-data.
#[must_use]
pub fn district_features(
    collection: &FeatureCollection,
    properties: &FeatureProperties,
) -> Vec<DistrictFeature> {
    let features: Vec<DistrictFeature> = collection
        .features
        .iter()
        .map(|feature| {
            let code = feature
                .property(&properties.code)
                .and_then(property_as_code_text)
                .and_then(|raw| match DistrictCode::parse(&raw) {
                    Ok(code) => Some(code),
                    Err(e) => {
                        log::warn!("Boundary feature has unusable code: {e}");
                        None
                    }
                });

            let name = feature
                .property(&properties.name)
                .and_then(serde_json::Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_owned);

            DistrictFeature { code, name }
        })
        .collect();

    let without_code = features.iter().filter(|f| f.code.is_none()).count();
    log::info!(
        "Loaded {} district features ({without_code} without a usable code)",
        features.len()
    );

    features
}

/// Renders a code property as text. Boundary files store codes either as
/// strings or as JSON numbers, which lose leading zeros.
fn property_as_code_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => n.as_u64().map(|u| u.to_string()).or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0)
                .map(|f| format!("{f:.0}"))
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
      "type": "FeatureCollection",
      "features": [
        {
          "type": "Feature",
          "properties": { "ORG8CODE": "00350000", "DISTRICT_N": "Boston" },
          "geometry": { "type": "Point", "coordinates": [-71.06, 42.36] }
        },
        {
          "type": "Feature",
          "properties": { "ORG8CODE": 10000, "DISTRICT_N": " Abington " },
          "geometry": null
        },
        {
          "type": "Feature",
          "properties": { "ORG8CODE": "N/A", "DISTRICT_N": "Unknown" },
          "geometry": null
        },
        {
          "type": "Feature",
          "properties": { "DISTRICT_N": "" },
          "geometry": null
        }
      ]
    }"#;

    #[test]
    fn reduces_features_to_join_keys() {
        let collection = read_feature_collection(SAMPLE.as_bytes()).unwrap();
        let features = district_features(&collection, &FeatureProperties::default());
        assert_eq!(features.len(), 4);

        assert_eq!(features[0].code.as_ref().unwrap().as_str(), "00350000");
        assert_eq!(features[0].name.as_deref(), Some("Boston"));

        assert_eq!(features[1].code.as_ref().unwrap().as_str(), "00010000");
        assert_eq!(features[1].name.as_deref(), Some("Abington"));

        assert!(features[2].code.is_none());
        assert!(!features[2].has_known_name());

        assert!(features[3].code.is_none());
        assert!(features[3].name.is_none());
    }

    #[test]
    fn custom_property_names() {
        let text = r#"{
          "type": "FeatureCollection",
          "features": [{
            "type": "Feature",
            "properties": { "CODE": "7", "NAME": "Tiny" },
            "geometry": null
          }]
        }"#;
        let collection = read_feature_collection(text.as_bytes()).unwrap();
        let properties = FeatureProperties {
            code: "CODE".to_owned(),
            name: "NAME".to_owned(),
        };
        let features = district_features(&collection, &properties);
        assert_eq!(features[0].code.as_ref().unwrap().as_str(), "00000007");
        assert_eq!(features[0].name.as_deref(), Some("Tiny"));
    }

    #[test]
    fn rejects_non_collections() {
        let point = r#"{ "type": "Point", "coordinates": [0.0, 0.0] }"#;
        assert!(matches!(
            read_feature_collection(point.as_bytes()),
            Err(IngestError::GeoJson(_))
        ));
    }

    #[test]
    fn float_codes_keep_digits() {
        assert_eq!(
            property_as_code_text(&serde_json::json!(350_000.0)).as_deref(),
            Some("350000")
        );
        assert_eq!(property_as_code_text(&serde_json::json!(3.5)), None);
        assert_eq!(property_as_code_text(&serde_json::json!(true)), None);
    }
}
