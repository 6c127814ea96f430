use serde::Serialize;

/// Classification of a completed attendance day.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum DayType {
    /// Record is still open (no time-out yet).
    Incomplete,
    /// Worked less than the 4-hour minimum; unpaid.
    Invalid,
    HalfDay,
    FullDay,
    Overtime,
    /// No record at all for a scheduled workday.
    Absent,
}

impl DayType {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            DayType::Incomplete => "incomplete",
            DayType::Invalid => "invalid",
            DayType::HalfDay => "half_day",
            DayType::FullDay => "full_day",
            DayType::Overtime => "overtime",
            DayType::Absent => "absent",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "incomplete" => Some(DayType::Incomplete),
            "invalid" => Some(DayType::Invalid),
            "half_day" => Some(DayType::HalfDay),
            "full_day" => Some(DayType::FullDay),
            "overtime" => Some(DayType::Overtime),
            "absent" => Some(DayType::Absent),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DayType::Incomplete => "Incomplete",
            DayType::Invalid => "Invalid",
            DayType::HalfDay => "Half Day",
            DayType::FullDay => "Full Day",
            DayType::Overtime => "Overtime",
            DayType::Absent => "Absent",
        }
    }
}

/// How an open shift was closed.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum CloseMethod {
    /// Employee (or admin on their behalf) clocked out inside the window.
    Manual,
    /// The nightly sweep force-closed the shift; never overtime-eligible.
    Auto,
}

impl CloseMethod {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            CloseMethod::Manual => "manual",
            CloseMethod::Auto => "auto",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "manual" => Some(CloseMethod::Manual),
            "auto" => Some(CloseMethod::Auto),
            _ => None,
        }
    }

    pub fn is_manual(&self) -> bool {
        matches!(self, CloseMethod::Manual)
    }
}
