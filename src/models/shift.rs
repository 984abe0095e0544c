use std::fmt;

use chrono::NaiveTime;

use crate::entities::shifts;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shift {
    pub id: i32,
    pub code: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl From<shifts::Model> for Shift {
    fn from(model: shifts::Model) -> Self {
        Self {
            id: model.id,
            code: model.code,
            start_time: model.start_time,
            end_time: model.end_time,
        }
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID {}: {} ({} - {})",
            self.id,
            self.code,
            self.start_time.format("%H:%M:%S"),
            self.end_time.format("%H:%M:%S")
        )
    }
}
