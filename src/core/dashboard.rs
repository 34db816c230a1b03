use crate::core::store::EventStore;
use crate::enums::EventCategory;
use crate::errors::Error;
use crate::models::event::{Event, EventDetails};

/// Per-dog overview: a health score plus the raw activity, diet and
/// wellness history.
#[derive(Debug, Clone)]
pub struct DogDashboard {
    pub total_health_score: f64,
    pub activity: Vec<Event>,
    pub diet: Vec<Event>,
    pub wellness: Vec<Event>,
}

/// Mean severity over the dog's health events, 0 without any.
pub fn mean_health_severity(events: &[Event]) -> f64 {
    let severities: Vec<f64> = events
        .iter()
        .filter_map(|event| match &event.details {
            EventDetails::Health(health) => Some(f64::from(health.severity)),
            _ => None,
        })
        .collect();

    if severities.is_empty() {
        return 0.0;
    }
    severities.iter().sum::<f64>() / severities.len() as f64
}

pub async fn load_dashboard(events: &dyn EventStore, dog_id: &str) -> Result<DogDashboard, Error> {
    let (health, activity, diet, wellness) = tokio::try_join!(
        events.list_for_dog(dog_id, EventCategory::Health),
        events.list_for_dog(dog_id, EventCategory::Exercise),
        events.list_for_dog(dog_id, EventCategory::Diet),
        events.list_for_dog(dog_id, EventCategory::Wellness),
    )?;

    tracing::debug!(
        "Dashboard for dog {}: {} health, {} exercise, {} diet, {} wellness events",
        dog_id,
        health.len(),
        activity.len(),
        diet.len(),
        wellness.len()
    );

    Ok(DogDashboard {
        total_health_score: mean_health_severity(&health),
        activity,
        diet,
        wellness,
    })
}
