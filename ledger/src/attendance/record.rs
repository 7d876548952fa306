//! Attendance records: who checked in, when, and an optional reference to
//! a captured artifact (e.g. a photo path). This is the payload producer's
//! data model; [`AttendanceRecord::to_payload`] is the only bridge into the
//! chain.

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, SubsecRound};
use serde::{Deserialize, Serialize};

use crate::config::{DATE_FORMAT, TIME_FORMAT};
use crate::storage::payload::{Fields, Payload};

/// One check-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub staff_id: String,
    pub staff_name: String,
    pub date: NaiveDate,
    /// Local wall-clock time, whole seconds.
    pub time: NaiveTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact: Option<String>,
}

impl AttendanceRecord {
    /// Record a check-in at the current local time.
    pub fn now(
        staff_id: impl Into<String>,
        staff_name: impl Into<String>,
        artifact: Option<String>,
    ) -> Self {
        Self::at(staff_id, staff_name, artifact, Local::now().naive_local())
    }

    /// Record a check-in at `when`, dropping sub-second precision.
    pub fn at(
        staff_id: impl Into<String>,
        staff_name: impl Into<String>,
        artifact: Option<String>,
        when: NaiveDateTime,
    ) -> Self {
        Self {
            staff_id: staff_id.into(),
            staff_name: staff_name.into(),
            date: when.date(),
            time: when.time().trunc_subsecs(0),
            artifact,
        }
    }

    /// Payload fields, in this order: `staff_id`, `staff_name`, `date`,
    /// `time`, then `artifact` when present.
    pub fn to_payload(&self) -> Payload {
        let mut fields = Fields::new()
            .with("staff_id", self.staff_id.as_str())
            .with("staff_name", self.staff_name.as_str())
            .with("date", self.date.format(DATE_FORMAT).to_string())
            .with("time", self.time.format(TIME_FORMAT).to_string());
        if let Some(artifact) = &self.artifact {
            fields.insert("artifact", artifact.as_str());
        }
        Payload::Record(fields)
    }
}
