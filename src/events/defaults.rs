//! Seeds for new events.

use serde_json::{json, Value};

/// Store record for a brand new event, matching [`HubEvent::default`].
///
/// [`HubEvent::default`]: super::HubEvent
#[must_use]
pub fn default_event_record() -> Value {
    json!({
        "title": "",
        "summary": "",
        "description": "",
        "access": "PRIVATE",
        "allDay": false,
        "allowRegistration": true,
        "notifyAttendees": true,
        "attendanceType": ["IN_PERSON"],
        "inPersonCapacity": null,
        "onlineMeetings": [],
        "status": "PLANNED",
        "readGroups": [],
        "editGroups": [],
        "tags": [],
        "categories": [],
        "associations": []
    })
}
