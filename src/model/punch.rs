use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// The two punch-in types the source export produces. Work punches count
/// toward regular/overtime hours, non-work punches toward PTO.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum PunchInType {
    #[strum(serialize = "Clock In")]
    ClockIn,
    #[strum(serialize = "Non-Work")]
    NonWork,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct Punch {
    pub id: i64,
    pub employee_id: i64,
    pub work_date: NaiveDate,
    pub punch_in_time: Option<NaiveTime>,
    pub punch_out_time: Option<NaiveTime>,
    pub punch_in_type: String,
    pub punch_out_type: Option<String>,
    pub regular_duration: f64,
    pub ot_duration: f64,
    pub paid_duration: f64,
}

/// A punch as produced by the ingestion loader, before the store assigns an
/// id. `work_date` and `punch_in_type` are NOT NULL in the schema; a row
/// missing either fails the insert and aborts the run.
#[derive(Debug, Clone)]
pub struct NewPunch {
    pub employee_id: i64,
    pub work_date: Option<NaiveDate>,
    pub punch_in_time: Option<NaiveTime>,
    pub punch_out_time: Option<NaiveTime>,
    pub punch_in_type: Option<String>,
    pub punch_out_type: Option<String>,
    pub regular_duration: f64,
    pub ot_duration: f64,
    pub paid_duration: f64,
}
