use chrono::NaiveDate;
use thiserror::Error;

/// Paramètres d'une génération par mois.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateRequest {
    pub year: i32,
    pub start_month: u32,
    pub end_month: u32,
}

impl Default for GenerateRequest {
    fn default() -> Self {
        Self {
            year: 2025,
            start_month: 7,
            end_month: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    SelfPair,
    BeforeAvailability,
    CapExceeded,
    BackToBack,
    MandatoryMissing,
}

impl ViolationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationKind::SelfPair => "self-pair",
            ViolationKind::BeforeAvailability => "before-availability",
            ViolationKind::CapExceeded => "cap-exceeded",
            ViolationKind::BackToBack => "back-to-back",
            ViolationKind::MandatoryMissing => "mandatory-missing",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub date: NaiveDate,
    pub person: String,
    pub kind: ViolationKind,
}

#[derive(Error, Debug)]
pub enum SchedError {
    #[error("invalid month: {0} (expected 1..=12)")]
    InvalidMonth(u32),
    #[error("invalid month range: end month {end} is before start month {start}")]
    InvalidRange { start: u32, end: u32 },
    #[error("year out of supported range: {0}")]
    InvalidYear(i32),
}
