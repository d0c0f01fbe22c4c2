// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava webhook event payload.

use serde::Deserialize;

/// What happened to the object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectType {
    Create,
    Update,
    Delete,
    #[serde(other)]
    Unknown,
}

/// Kind of object the event is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectType {
    Activity,
    Athlete,
    #[serde(other)]
    Unknown,
}

/// Event notification as POSTed by Strava.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    pub aspect_type: AspectType,
    pub object_type: ObjectType,
    /// Activity ID, or athlete ID for athlete events
    pub object_id: u64,
    /// Athlete who owns the object
    pub owner_id: u64,
    #[serde(default)]
    pub subscription_id: Option<u64>,
    #[serde(default)]
    pub event_time: Option<i64>,
    /// Changed fields for update events, e.g. {"title": "..."}
    #[serde(default)]
    pub updates: Option<serde_json::Map<String, serde_json::Value>>,
}

impl WebhookEvent {
    /// Only newly created activities are enriched and dispatched.
    pub fn is_new_activity(&self) -> bool {
        self.aspect_type == AspectType::Create && self.object_type == ObjectType::Activity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_create_activity() {
        let event: WebhookEvent = serde_json::from_value(json!({
            "aspect_type": "create",
            "event_time": 1516126040,
            "object_id": 1360128428_u64,
            "object_type": "activity",
            "owner_id": 134815,
            "subscription_id": 120475,
            "updates": {}
        }))
        .unwrap();

        assert!(event.is_new_activity());
        assert_eq!(event.object_id, 1360128428);
        assert_eq!(event.subscription_id, Some(120475));
    }

    #[test]
    fn test_unknown_types_are_tolerated() {
        let event: WebhookEvent = serde_json::from_value(json!({
            "aspect_type": "deauthorize",
            "object_id": 0,
            "object_type": "club",
            "owner_id": 1
        }))
        .unwrap();

        assert_eq!(event.aspect_type, AspectType::Unknown);
        assert_eq!(event.object_type, ObjectType::Unknown);
        assert!(!event.is_new_activity());
    }

    #[test]
    fn test_athlete_update_is_not_dispatched() {
        let event: WebhookEvent = serde_json::from_value(json!({
            "aspect_type": "update",
            "object_id": 134815,
            "object_type": "athlete",
            "owner_id": 134815,
            "updates": {"authorized": "false"}
        }))
        .unwrap();

        assert_eq!(event.object_type, ObjectType::Athlete);
        assert!(!event.is_new_activity());
    }
}
