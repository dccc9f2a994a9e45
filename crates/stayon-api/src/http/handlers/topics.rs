//! Form options for the intake page.

use std::time::Instant;

use axum::Json;
use serde::Serialize;

use stayon_types::retention::{EmphasisTopic, UrgencyTier};

use crate::http::response::ApiResponse;

#[derive(Debug, Serialize)]
pub struct TopicOption {
    pub value: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Serialize)]
pub struct TierOption {
    pub value: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct FormOptions {
    pub emphasis_topics: Vec<TopicOption>,
    pub urgency_tiers: Vec<TierOption>,
}

pub fn form_options() -> FormOptions {
    FormOptions {
        emphasis_topics: EmphasisTopic::ALL
            .into_iter()
            .map(|t| TopicOption {
                value: t.slug(),
                label: t.label(),
                description: t.description(),
            })
            .collect(),
        urgency_tiers: UrgencyTier::ALL
            .into_iter()
            .map(|t| TierOption {
                value: t.short_name(),
                label: t.label(),
            })
            .collect(),
    }
}

/// GET /api/v1/topics - Emphasis topics and urgency tiers.
pub async fn get_topics() -> Json<ApiResponse<FormOptions>> {
    ApiResponse::success(form_options(), Instant::now()).json()
}
