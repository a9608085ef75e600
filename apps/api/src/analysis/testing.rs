//! Test doubles for the registry and document collaborators.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};

use crate::analysis::document::{DocumentFormat, DocumentProcessingError, TextExtractor};
use crate::analysis::models::RegistrationDate;
use crate::analysis::registry::{LookupFailure, RegistryRecord, RegistryVerifier};

enum Behavior {
    Record(RegistryRecord),
    Fail,
    Hang,
}

/// Registry with a canned answer that counts how often it was asked.
pub struct StubRegistry {
    behavior: Behavior,
    calls: AtomicUsize,
}

impl StubRegistry {
    fn new(behavior: Behavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn registered_since(date: DateTime<Utc>) -> Self {
        Self::with_dates(vec![RegistrationDate::Timestamp(date)])
    }

    pub fn with_dates(registration_dates: Vec<RegistrationDate>) -> Self {
        Self::new(Behavior::Record(RegistryRecord {
            registered: true,
            registration_dates,
        }))
    }

    pub fn unregistered() -> Self {
        Self::new(Behavior::Record(RegistryRecord::default()))
    }

    pub fn failing() -> Self {
        Self::new(Behavior::Fail)
    }

    pub fn hanging() -> Self {
        Self::new(Behavior::Hang)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RegistryVerifier for StubRegistry {
    async fn lookup(&self, _domain: &str) -> Result<RegistryRecord, LookupFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            Behavior::Record(record) => Ok(record.clone()),
            Behavior::Fail => Err(LookupFailure::Status(503)),
            Behavior::Hang => {
                std::future::pending::<()>().await;
                unreachable!()
            }
        }
    }
}

/// Extractor that returns fixed text, or fails when built with `failing`.
pub struct StubExtractor {
    text: Option<String>,
}

impl StubExtractor {
    pub fn returning(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
        }
    }

    pub fn failing() -> Self {
        Self { text: None }
    }
}

#[async_trait]
impl TextExtractor for StubExtractor {
    async fn extract(
        &self,
        _bytes: Bytes,
        _format: DocumentFormat,
    ) -> Result<String, DocumentProcessingError> {
        self.text
            .clone()
            .ok_or_else(|| DocumentProcessingError::Unreadable("corrupt stream".to_string()))
    }
}
