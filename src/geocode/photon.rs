//! Photon geocoder backend

use super::{FetchError, Geocoder};
use crate::address::RawCandidate;
use crate::config::Settings;
use crate::network::HttpClient;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

/// Photon (komoot) forward geocoder
pub struct PhotonGeocoder {
    client: HttpClient,
    endpoint: String,
    limit: usize,
}

impl PhotonGeocoder {
    pub fn new(client: HttpClient, endpoint: impl Into<String>, limit: usize) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            limit,
        }
    }

    /// Build from loaded settings
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let client = HttpClient::with_settings(&settings.outgoing)?;
        Ok(Self::new(
            client,
            settings.geocoder.endpoint.clone(),
            settings.geocoder.limit,
        ))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Geocoder for PhotonGeocoder {
    fn name(&self) -> &str {
        "photon"
    }

    async fn fetch(&self, query: &str) -> Result<Vec<RawCandidate>, FetchError> {
        let params = [("q", query.to_string()), ("limit", self.limit.to_string())];
        let response = self.client.get_with_params(&self.endpoint, &params).await?;

        if !response.is_success() {
            return Err(FetchError::Status(response.status));
        }

        let collection: FeatureCollection = response.json()?;
        let candidates = parse_features(collection, self.limit)?;

        debug!("photon returned {} candidates for '{}'", candidates.len(), query);
        Ok(candidates)
    }
}

/// Photon returns: {"features": [{"properties": {...}, "geometry": {"coordinates": [lon, lat]}}]}
#[derive(Debug, Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    properties: Properties,
    geometry: Geometry,
}

#[derive(Debug, Default, Deserialize)]
struct Properties {
    name: Option<String>,
    city: Option<String>,
    town: Option<String>,
    district: Option<String>,
    state: Option<String>,
    statecode: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    coordinates: Vec<f64>,
}

fn parse_features(
    collection: FeatureCollection,
    limit: usize,
) -> Result<Vec<RawCandidate>, FetchError> {
    collection
        .features
        .into_iter()
        .take(limit)
        .map(|feature| {
            let (longitude, latitude) = match feature.geometry.coordinates.as_slice() {
                [lon, lat, ..] => (*lon, *lat),
                other => {
                    return Err(FetchError::Malformed(format!(
                        "expected [lon, lat], got {} coordinates",
                        other.len()
                    )))
                }
            };
            let props = feature.properties;

            Ok(RawCandidate {
                name: props.name.unwrap_or_default(),
                suburb: props.district.unwrap_or_default(),
                city: props.city.or(props.town).unwrap_or_default(),
                state: props.state.or(props.statecode).unwrap_or_default(),
                longitude,
                latitude,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio_test::{assert_err, assert_ok};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn geocoder(server: &MockServer, limit: usize) -> PhotonGeocoder {
        PhotonGeocoder::new(
            HttpClient::new().unwrap(),
            format!("{}/api/", server.uri()),
            limit,
        )
    }

    fn sample_body() -> serde_json::Value {
        json!({
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": {
                        "name": "Rua Augusta",
                        "district": "Consolação",
                        "city": "São Paulo",
                        "state": "São Paulo"
                    },
                    "geometry": {"type": "Point", "coordinates": [-46.6531, -23.5537]}
                },
                {
                    "type": "Feature",
                    "properties": {
                        "name": "Rua Augusta",
                        "town": "Jundiaí",
                        "statecode": "SP"
                    },
                    "geometry": {"type": "Point", "coordinates": [-46.88, -23.18]}
                }
            ]
        })
    }

    #[tokio::test]
    async fn test_fetch_parses_features() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/"))
            .and(query_param("q", "Rua Augusta"))
            .and(query_param("limit", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(sample_body()))
            .expect(1)
            .mount(&server)
            .await;

        let candidates = assert_ok!(geocoder(&server, 5).fetch("Rua Augusta").await);

        assert_eq!(candidates.len(), 2);
        assert_eq!(
            candidates[0],
            RawCandidate {
                name: "Rua Augusta".to_string(),
                suburb: "Consolação".to_string(),
                city: "São Paulo".to_string(),
                state: "São Paulo".to_string(),
                longitude: -46.6531,
                latitude: -23.5537,
            }
        );
        assert_eq!(candidates[1].city, "Jundiaí");
        assert_eq!(candidates[1].state, "SP");
        assert_eq!(candidates[1].suburb, "");
        assert_eq!(candidates[1].label(), "Rua Augusta, Jundiaí, SP");
    }

    #[tokio::test]
    async fn test_limit_caps_candidates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(sample_body()))
            .mount(&server)
            .await;

        let candidates = assert_ok!(geocoder(&server, 1).fetch("Rua Augusta").await);
        assert_eq!(candidates.len(), 1);
    }

    #[tokio::test]
    async fn test_non_success_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = assert_err!(geocoder(&server, 5).fetch("Rua Augusta").await);
        assert_eq!(err, FetchError::Status(503));
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = assert_err!(geocoder(&server, 5).fetch("Rua Augusta").await);
        assert_eq!(err.kind(), "malformed");
    }

    #[tokio::test]
    async fn test_short_coordinates_are_malformed() {
        let server = MockServer::start().await;
        let body = json!({
            "features": [{"properties": {"name": "X"}, "geometry": {"coordinates": [1.0]}}]
        });
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let err = assert_err!(geocoder(&server, 5).fetch("Rua X").await);
        assert_eq!(err.kind(), "malformed");
    }

    #[tokio::test]
    async fn test_empty_collection() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"features": []})))
            .mount(&server)
            .await;

        let candidates = assert_ok!(geocoder(&server, 5).fetch("Nowhere").await);
        assert!(candidates.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        let geocoder = PhotonGeocoder::new(
            HttpClient::new().unwrap(),
            "http://127.0.0.1:1/api/",
            5,
        );
        let err = assert_err!(geocoder.fetch("Rua Augusta").await);
        assert_eq!(err.kind(), "network");
    }
}
