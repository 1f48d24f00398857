//! Province → district lookup for the registration and branch forms.
//!
//! Two public administrative-division APIs are in use with different shapes:
//! `{code, name, districts:[...]}` and `{results:[{province_id, province_name}]}`.
//! Both are read into [`Province`] / [`District`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use configs::GeoConfig;
use models::geo::{District, Province};
use moka::future::Cache;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::errors::ServiceError;

#[async_trait]
pub trait GeoProvider: Send + Sync {
    async fn provinces(&self) -> Result<Vec<Province>, ServiceError>;
    async fn districts(&self, province_code: &str) -> Result<Vec<District>, ServiceError>;

    async fn find_province(&self, code: &str) -> Result<Option<Province>, ServiceError> {
        Ok(self.provinces().await?.into_iter().find(|p| p.code == code))
    }

    async fn find_district(&self, province_code: &str, code: &str) -> Result<Option<District>, ServiceError> {
        Ok(self.districts(province_code).await?.into_iter().find(|d| d.code == code))
    }
}

/// Talks to the configured third-party endpoints.
pub struct HttpGeoProvider {
    http: reqwest::Client,
    cfg: GeoConfig,
}

impl HttpGeoProvider {
    pub fn new(http: reqwest::Client, cfg: GeoConfig) -> Self {
        Self { http, cfg }
    }

    async fn fetch(&self, url: &str) -> Result<Value, ServiceError> {
        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ServiceError::Api { status: status.as_u16(), detail: None });
        }
        resp.json::<Value>().await.map_err(|e| ServiceError::Decode(e.to_string()))
    }
}

#[async_trait]
impl GeoProvider for HttpGeoProvider {
    #[instrument(skip(self))]
    async fn provinces(&self) -> Result<Vec<Province>, ServiceError> {
        let raw = self.fetch(&self.cfg.provinces_url).await?;
        Ok(parse_provinces(raw))
    }

    #[instrument(skip(self))]
    async fn districts(&self, province_code: &str) -> Result<Vec<District>, ServiceError> {
        if !is_area_code(province_code) {
            return Err(ServiceError::Validation("Mã tỉnh/thành phố không hợp lệ.".into()));
        }
        let raw = self.fetch(&self.cfg.districts_url_for(province_code)).await?;
        Ok(parse_districts(raw, province_code))
    }
}

/// Reference data barely changes; keep it for the configured TTL.
pub struct CachedGeoProvider<P: GeoProvider> {
    inner: P,
    provinces: Cache<(), Arc<Vec<Province>>>,
    districts: Cache<String, Arc<Vec<District>>>,
}

impl<P: GeoProvider> CachedGeoProvider<P> {
    pub fn new(inner: P, ttl: Duration) -> Self {
        Self {
            inner,
            provinces: Cache::builder().max_capacity(1).time_to_live(ttl).build(),
            districts: Cache::builder().max_capacity(128).time_to_live(ttl).build(),
        }
    }
}

#[async_trait]
impl<P: GeoProvider> GeoProvider for CachedGeoProvider<P> {
    async fn provinces(&self) -> Result<Vec<Province>, ServiceError> {
        if let Some(hit) = self.provinces.get(&()).await {
            return Ok(hit.as_ref().clone());
        }
        let fresh = self.inner.provinces().await?;
        // empty answers are not cached so a flaky upstream does not blank the select for a day
        if !fresh.is_empty() {
            self.provinces.insert((), Arc::new(fresh.clone())).await;
        }
        debug!(count = fresh.len(), "provinces_fetched");
        Ok(fresh)
    }

    async fn districts(&self, province_code: &str) -> Result<Vec<District>, ServiceError> {
        let key = province_code.to_string();
        if let Some(hit) = self.districts.get(&key).await {
            return Ok(hit.as_ref().clone());
        }
        let fresh = self.inner.districts(province_code).await?;
        if !fresh.is_empty() {
            self.districts.insert(key, Arc::new(fresh.clone())).await;
        }
        Ok(fresh)
    }
}

/// Division codes are short and alphanumeric; anything else never reaches the upstream URL.
pub fn is_area_code(code: &str) -> bool {
    !code.is_empty() && code.len() <= 10 && code.bytes().all(|b| b.is_ascii_alphanumeric())
}

fn as_code(v: Option<&Value>) -> Option<String> {
    match v? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn as_name(v: Option<&Value>) -> Option<String> {
    v.and_then(Value::as_str).map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}

fn entries(v: Value, nested_key: &str) -> Vec<Value> {
    match v {
        Value::Array(items) => items,
        Value::Object(mut map) => {
            for key in [nested_key, "results", "data"] {
                if let Some(Value::Array(items)) = map.remove(key) {
                    return items;
                }
            }
            Vec::new()
        }
        _ => Vec::new(),
    }
}

pub fn parse_provinces(v: Value) -> Vec<Province> {
    entries(v, "provinces")
        .iter()
        .filter_map(|e| {
            let code = as_code(e.get("code").or_else(|| e.get("province_id")).or_else(|| e.get("id")))?;
            let name = as_name(e.get("name").or_else(|| e.get("province_name")))?;
            Some(Province { code, name })
        })
        .collect()
}

pub fn parse_districts(v: Value, province_code: &str) -> Vec<District> {
    entries(v, "districts")
        .iter()
        .filter_map(|e| {
            let code = as_code(e.get("code").or_else(|| e.get("district_id")).or_else(|| e.get("id")))?;
            let name = as_name(e.get("name").or_else(|| e.get("district_name")))?;
            Some(District { code, name, province_code: province_code.to_string() })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn open_api_shape() {
        let p = parse_provinces(json!([{"name": "Thành phố Hà Nội", "code": 1, "districts": []}]));
        assert_eq!(p, vec![Province { code: "1".into(), name: "Thành phố Hà Nội".into() }]);
        let d = parse_districts(
            json!({"code": 79, "name": "TP HCM", "districts": [{"name": "Quận 1", "code": 760}]}),
            "79",
        );
        assert_eq!(d[0].code, "760");
        assert_eq!(d[0].province_code, "79");
    }

    #[test]
    fn results_shape() {
        let p = parse_provinces(json!({"results": [{"province_id": "01", "province_name": "Hà Nội"}, {"province_id": "02"}]}));
        assert_eq!(p.len(), 1);
        assert_eq!(p[0].code, "01");
        let d = parse_districts(json!({"results": [{"district_id": "001", "district_name": "Ba Đình"}]}), "01");
        assert_eq!(d[0].name, "Ba Đình");
    }

    #[test]
    fn area_codes() {
        assert!(is_area_code("79"));
        assert!(is_area_code("001"));
        assert!(!is_area_code(""));
        assert!(!is_area_code("../../admin"));
        assert!(!is_area_code("79?x=1"));
        assert!(!is_area_code("79 "));
    }

    #[tokio::test]
    async fn http_provider_refuses_odd_codes_locally() {
        let geo = HttpGeoProvider::new(reqwest::Client::new(), GeoConfig::default());
        let err = geo.districts("../p").await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    struct Counting(AtomicUsize);

    #[async_trait]
    impl GeoProvider for Counting {
        async fn provinces(&self) -> Result<Vec<Province>, ServiceError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(vec![Province { code: "79".into(), name: "TP HCM".into() }])
        }
        async fn districts(&self, province_code: &str) -> Result<Vec<District>, ServiceError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(vec![District { code: "760".into(), name: "Quận 1".into(), province_code: province_code.into() }])
        }
    }

    #[tokio::test]
    async fn cache_serves_repeat_lookups() {
        let cached = CachedGeoProvider::new(Counting(AtomicUsize::new(0)), Duration::from_secs(60));
        cached.provinces().await.unwrap();
        cached.provinces().await.unwrap();
        cached.districts("79").await.unwrap();
        cached.districts("79").await.unwrap();
        assert_eq!(cached.inner.0.load(Ordering::SeqCst), 2);
        assert!(cached.find_district("79", "760").await.unwrap().is_some());
        assert!(cached.find_province("01").await.unwrap().is_none());
    }
}
