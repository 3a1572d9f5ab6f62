//! Calendar view: resolved assignments merged with projected queue days.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::dates::add_days;
use crate::error::{CoreError, CoreResult};
use crate::store::DutyStore;
use crate::types::{Day, DbId};

pub const EVENT_TYPE_ASSIGNMENT: &str = "assignment";
pub const EVENT_TYPE_QUEUE_PROJECTION: &str = "queue_projection";
pub const STATUS_QUEUED: &str = "queued";

/// One calendar cell, shaped for FullCalendar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarEvent {
    pub title: String,
    pub start: Day,
    #[serde(rename = "extendedProps")]
    pub extended_props: EventProps,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventProps {
    pub worker_id: DbId,
    pub status: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queue_item_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queue_order: Option<i32>,
}

/// Build the events for `start..=end`, sorted by day.
///
/// Queue entries are projected from their own `start_date` (never earlier
/// than `today`), and a projected day is dropped when a real assignment
/// already occupies it.
pub async fn build_calendar(
    store: &dyn DutyStore,
    start: Day,
    end: Day,
    today: Day,
) -> CoreResult<Vec<CalendarEvent>> {
    if start > end {
        return Err(CoreError::Validation(
            "start_date must not be after end_date".into(),
        ));
    }

    let names: HashMap<DbId, String> = store
        .list_workers()
        .await?
        .into_iter()
        .map(|w| (w.id, w.name))
        .collect();

    let assignments = store.list_assignments_between(start, end).await?;
    let occupied: HashSet<Day> = assignments.iter().map(|a| a.date).collect();

    let mut events = Vec::new();
    for assignment in &assignments {
        let Some(name) = names.get(&assignment.worker_id) else {
            tracing::warn!(assignment_id = assignment.id, "Assignment references unknown worker");
            continue;
        };
        events.push(CalendarEvent {
            title: name.clone(),
            start: assignment.date,
            extended_props: EventProps {
                worker_id: assignment.worker_id,
                status: assignment.status.as_str().to_string(),
                kind: EVENT_TYPE_ASSIGNMENT,
                queue_item_id: None,
                queue_order: None,
            },
        });
    }

    for entry in store.list_queue().await? {
        let Some(name) = names.get(&entry.worker_id) else {
            tracing::warn!(entry_id = entry.id, "Queue entry references unknown worker");
            continue;
        };
        let first = entry.start_date.max(today);
        for offset in 0..i64::from(entry.duration_days) {
            let day = add_days(first, offset);
            if day > end {
                break;
            }
            if day < start || occupied.contains(&day) {
                continue;
            }
            events.push(CalendarEvent {
                title: format!("{name} (queued)"),
                start: day,
                extended_props: EventProps {
                    worker_id: entry.worker_id,
                    status: STATUS_QUEUED.to_string(),
                    kind: EVENT_TYPE_QUEUE_PROJECTION,
                    queue_item_id: Some(entry.id),
                    queue_order: Some(entry.order),
                },
            });
        }
    }

    events.sort_by_key(|e| e.start);
    Ok(events)
}
