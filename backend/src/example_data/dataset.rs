//! Parsing and consistency checks for marketplace fixtures.

use std::collections::HashSet;

use serde::Deserialize;
use thiserror::Error;

use crate::domain::{Feedback, SwapRequest, UserProfile};

/// Problems found in a fixture before anything is stored.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("fixture is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("fixture demo password must not be empty")]
    EmptyPassword,
    #[error("duplicate {entity} {key} in fixture")]
    Duplicate { entity: &'static str, key: String },
    #[error("{entity} {id} references unknown {target} {key}")]
    DanglingReference {
        entity: &'static str,
        id: String,
        target: &'static str,
        key: String,
    },
}

/// Profiles, requests and feedback read from a fixture file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketplaceDataset {
    pub demo_password: String,
    pub users: Vec<UserProfile>,
    #[serde(default)]
    pub requests: Vec<SwapRequest>,
    #[serde(default)]
    pub feedback: Vec<Feedback>,
}

impl MarketplaceDataset {
    /// Parse a fixture and check that every reference resolves.
    ///
    /// Field-level rules (skill names, e-mail format, rating range) are
    /// enforced by the domain types during deserialisation.
    pub fn from_json(raw: &str) -> Result<Self, DatasetError> {
        let dataset: Self = serde_json::from_str(raw)?;
        dataset.check()?;
        Ok(dataset)
    }

    fn check(&self) -> Result<(), DatasetError> {
        if self.demo_password.is_empty() {
            return Err(DatasetError::EmptyPassword);
        }

        let mut user_ids = HashSet::new();
        let mut emails = HashSet::new();
        for user in &self.users {
            if !user_ids.insert(user.id.clone()) {
                return Err(DatasetError::Duplicate {
                    entity: "user id",
                    key: user.id.to_string(),
                });
            }
            if !emails.insert(user.email.clone()) {
                return Err(DatasetError::Duplicate {
                    entity: "email",
                    key: user.email.to_string(),
                });
            }
        }

        let mut request_ids = HashSet::new();
        for request in &self.requests {
            for party in [request.from_user_id(), request.to_user_id()] {
                if !user_ids.contains(party) {
                    return Err(DatasetError::DanglingReference {
                        entity: "request",
                        id: request.id().to_string(),
                        target: "user",
                        key: party.to_string(),
                    });
                }
            }
            request_ids.insert(request.id());
        }

        for feedback in &self.feedback {
            if !request_ids.contains(&feedback.request_id) {
                return Err(DatasetError::DanglingReference {
                    entity: "feedback",
                    id: feedback.id.to_string(),
                    target: "request",
                    key: feedback.request_id.to_string(),
                });
            }
        }
        Ok(())
    }
}
