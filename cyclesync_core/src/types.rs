//! Core domain types for the CycleSync tracker.
//!
//! This module defines the fundamental types used throughout the system:
//! - Cycle records and fertile windows
//! - Contraceptive methods, durations, and renewal schedules
//! - Sexual activity logs and food preferences
//! - Alert payloads returned to the presentation layer

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Cycle Types
// ============================================================================

/// Estimated fertile window as 1-based day offsets into a cycle.
///
/// Derived from cycle length via a fixed offset heuristic (luteal phase
/// ~14 days, sperm viability ~5 days). Not clinically validated.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FertileWindow {
    pub start_day: i64,
    pub end_day: i64,
}

impl FertileWindow {
    /// Whether a 1-based day offset falls inside the window.
    ///
    /// Windows computed from very short cycles can be empty
    /// (`end_day < start_day`); those contain no days.
    pub fn contains(&self, day_in_cycle: i64) -> bool {
        day_in_cycle >= self.start_day && day_in_cycle <= self.end_day
    }
}

impl std::fmt::Display for FertileWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start_day, self.end_day)
    }
}

/// A recorded menstrual cycle
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CycleRecord {
    pub id: u64,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Inclusive day count: `(end - start) + 1`
    pub length: i64,
    pub fertile_window: FertileWindow,
}

// ============================================================================
// Contraceptive Method Types
// ============================================================================

/// Closed set of supported contraceptive methods
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MethodKind {
    Pills,
    Injection,
    Implant,
    HormonalIud,
    CopperIud,
    MaleCondom,
    FemaleCondom,
    EmergencyContraception,
    Vasectomy,
    TubalLigation,
}

impl MethodKind {
    /// Stable identifier used for CLI arguments and display
    pub fn id(&self) -> &'static str {
        match self {
            MethodKind::Pills => "pills",
            MethodKind::Injection => "injection",
            MethodKind::Implant => "implant",
            MethodKind::HormonalIud => "hormonal_iud",
            MethodKind::CopperIud => "copper_iud",
            MethodKind::MaleCondom => "male_condom",
            MethodKind::FemaleCondom => "female_condom",
            MethodKind::EmergencyContraception => "emergency_contraception",
            MethodKind::Vasectomy => "vasectomy",
            MethodKind::TubalLigation => "tubal_ligation",
        }
    }

    pub fn is_emergency(&self) -> bool {
        matches!(self, MethodKind::EmergencyContraception)
    }

    /// All methods, in catalog order
    pub fn all() -> &'static [MethodKind] {
        &[
            MethodKind::Pills,
            MethodKind::Injection,
            MethodKind::Implant,
            MethodKind::HormonalIud,
            MethodKind::CopperIud,
            MethodKind::MaleCondom,
            MethodKind::FemaleCondom,
            MethodKind::EmergencyContraception,
            MethodKind::Vasectomy,
            MethodKind::TubalLigation,
        ]
    }
}

/// Unit for a method's effective duration
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DurationUnit {
    Months,
    Years,
    /// Single-use methods (condoms, emergency contraception); renewal is
    /// cosmetic and never counts as ongoing protection
    SingleUse,
    /// Sterilization; never expires
    Permanent,
}

/// When a logged method must be reapplied or replaced
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Renewal {
    Scheduled(NaiveDate),
    Permanent,
}

impl Renewal {
    pub fn scheduled(&self) -> Option<NaiveDate> {
        match self {
            Renewal::Scheduled(date) => Some(*date),
            Renewal::Permanent => None,
        }
    }
}

impl std::fmt::Display for Renewal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Renewal::Scheduled(date) => write!(f, "{}", date),
            Renewal::Permanent => write!(f, "Permanent"),
        }
    }
}

/// A catalog entry describing a contraceptive method
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MethodProfile {
    pub kind: MethodKind,
    pub name: String,
    /// Duration value in `unit`; 1 for single-use, 0 for permanent
    pub duration: u32,
    pub unit: DurationUnit,
    pub typical_use_effectiveness: f64,
    pub perfect_use_effectiveness: f64,
    pub effects: String,
    pub source: String,
}

/// A logged use of a contraceptive method
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ContraceptiveLog {
    pub id: Uuid,
    pub method: MethodKind,
    pub name: String,
    pub duration: u32,
    pub unit: DurationUnit,
    pub start: NaiveDate,
    pub renewal: Renewal,
    pub typical_use_effectiveness: f64,
    pub perfect_use_effectiveness: f64,
    pub effects: String,
    pub source: String,
}

// ============================================================================
// Activity and Preference Types
// ============================================================================

/// Protection used for a logged activity
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Protection {
    Protected,
    Unprotected,
}

/// A logged sexual activity entry
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SexLog {
    pub id: Uuid,
    pub date: NaiveDate,
    pub protection: Protection,
    /// Suppresses pregnancy-risk alerting; the risk model only flags
    /// unwanted exposure
    pub trying_pregnancy: bool,
}

/// Closed set of food categories; the "All" filter value is not a member
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FoodCategory {
    Fruits,
    Vegetables,
    Grains,
    Protein,
    Dairy,
    Snacks,
    Sweets,
    Beverages,
}

impl FoodCategory {
    /// Parse a category name, rejecting anything outside the fixed set
    /// (including the "all" filter value).
    pub fn parse(s: &str) -> Option<FoodCategory> {
        match s.to_lowercase().as_str() {
            "fruits" => Some(FoodCategory::Fruits),
            "vegetables" => Some(FoodCategory::Vegetables),
            "grains" => Some(FoodCategory::Grains),
            "protein" => Some(FoodCategory::Protein),
            "dairy" => Some(FoodCategory::Dairy),
            "snacks" => Some(FoodCategory::Snacks),
            "sweets" => Some(FoodCategory::Sweets),
            "beverages" => Some(FoodCategory::Beverages),
            _ => None,
        }
    }
}

/// A favorite food entry
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FoodPreference {
    pub id: Uuid,
    pub name: String,
    pub category: FoodCategory,
}

// ============================================================================
// Alert Types
// ============================================================================

/// Kind of user-facing alert
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    RenewalReminder,
    OveruseWarning,
    PregnancyRisk,
}

/// Alert payload; the presentation layer owns rendering and timing
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
}

/// Result of the safety advisor's risk evaluation
#[derive(Clone, Debug, PartialEq)]
pub struct RiskAssessment {
    pub fertile_day: bool,
    pub active_contraception: bool,
    pub ec_overuse: bool,
    pub alert: Option<Alert>,
}
