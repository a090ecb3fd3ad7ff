#![allow(dead_code)]

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use device_sessions::{
    geo::{GeoError, GeoProvider, GeoResolver},
    models::{
        location::LocationInfo,
        session::{NewSession, Session, SessionSummary},
    },
    store::{SessionStore, StoreError, StoreResult},
};
use reqwest::StatusCode;

/// Provider with a canned answer that counts how often it was asked.
pub struct MockProvider {
    name: &'static str,
    answer: Option<LocationInfo>,
    calls: Arc<AtomicUsize>,
}

impl MockProvider {
    pub fn succeeding(name: &'static str, city: &str, country: &str) -> Self {
        Self {
            name,
            answer: Some(LocationInfo {
                city: Some(city.to_string()),
                country: Some(country.to_string()),
                location: Some(format!("{city}, {country}")),
                ..Default::default()
            }),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing(name: &'static str) -> Self {
        Self {
            name,
            answer: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_answer(name: &'static str, answer: LocationInfo) -> Self {
        Self {
            name,
            answer: Some(answer),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn counter(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }
}

#[async_trait]
impl GeoProvider for MockProvider {
    fn name(&self) -> &str {
        self.name
    }

    async fn try_resolve(&self, ip: &str) -> Result<LocationInfo, GeoError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.answer {
            Some(answer) => Ok(LocationInfo {
                ip: ip.to_string(),
                ..answer.clone()
            }),
            None => Err(GeoError::Status(StatusCode::SERVICE_UNAVAILABLE)),
        }
    }
}

/// Builds a resolver over the given providers and returns their call counters.
pub fn resolver(providers: Vec<MockProvider>) -> (GeoResolver, Vec<Arc<AtomicUsize>>) {
    let counters = providers.iter().map(MockProvider::counter).collect();
    let providers = providers
        .into_iter()
        .map(|p| Arc::new(p) as Arc<dyn GeoProvider>)
        .collect();
    (GeoResolver::new(providers), counters)
}

pub fn calls(counter: &Arc<AtomicUsize>) -> usize {
    counter.load(Ordering::SeqCst)
}

/// Store whose every operation fails.
pub struct FailingStore;

#[async_trait]
impl SessionStore for FailingStore {
    async fn create(&self, _session: NewSession) -> StoreResult<Session> {
        Err(StoreError::Backend("connection refused".into()))
    }

    async fn find_by_token(&self, _session_token: &str) -> StoreResult<Option<Session>> {
        Err(StoreError::Backend("connection refused".into()))
    }

    async fn find_active_by_user(
        &self,
        _user_id: &str,
        _now: DateTime<Utc>,
    ) -> StoreResult<Vec<SessionSummary>> {
        Err(StoreError::Backend("connection refused".into()))
    }

    async fn touch(&self, _session_token: &str, _now: DateTime<Utc>) -> StoreResult<()> {
        Err(StoreError::Backend("connection refused".into()))
    }

    async fn deactivate(&self, _session_token: &str) -> StoreResult<()> {
        Err(StoreError::Backend("connection refused".into()))
    }

    async fn delete(&self, _session_token: &str) -> StoreResult<()> {
        Err(StoreError::Backend("connection refused".into()))
    }

    async fn delete_expired(&self, _now: DateTime<Utc>) -> StoreResult<u64> {
        Err(StoreError::Backend("connection refused".into()))
    }
}

pub fn session_row(
    token: &str,
    user_id: &str,
    expires: DateTime<Utc>,
    is_active: bool,
) -> Session {
    let now = Utc::now();
    Session {
        id: format!("id-{token}"),
        user_id: user_id.to_string(),
        session_token: token.to_string(),
        expires,
        device_info: "Mozilla Firefox on Linux (Desktop)".to_string(),
        ip_address: "198.51.100.7".to_string(),
        location: "Berlin, Germany".to_string(),
        is_active,
        last_activity: now,
        created_at: now,
    }
}
