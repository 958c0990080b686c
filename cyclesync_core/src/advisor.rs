//! Safety advisor: pregnancy-risk evaluation for logged sexual activity.
//!
//! Combines the fertile-window estimate from the most recent cycle, the
//! active-contraception status from the method log, and the yearly
//! emergency-contraception usage count into a single assessment.

use crate::cycle::day_in_cycle;
use crate::scheduler::ec_uses_this_year;
use crate::{
    Alert, AlertKind, ContraceptiveLog, CycleRecord, DurationUnit, Error, Protection, Result,
    RiskAssessment, SexLog,
};
use chrono::NaiveDate;

/// Whether `date` falls inside the most recent cycle's fertile window
///
/// Only the last logged cycle is consulted; with no cycle history the day
/// is treated as non-fertile.
pub fn is_fertile_day(cycles: &[CycleRecord], date: NaiveDate) -> bool {
    let Some(last) = cycles.last() else {
        return false;
    };
    let day = day_in_cycle(last.start, date);
    last.fertile_window.contains(day)
}

/// Whether any non-single-use method currently provides protection
///
/// A method is active when `start <= today <= renewal` for a scheduled
/// renewal. Permanent methods carry no renewal date and never satisfy the
/// range check; they intentionally do not count as active protection here
/// (see DESIGN.md).
pub fn has_active_contraception(logs: &[ContraceptiveLog], today: NaiveDate) -> bool {
    logs.iter().any(|log| {
        log.unit != DurationUnit::SingleUse
            && log
                .renewal
                .scheduled()
                .is_some_and(|renewal| log.start <= today && today <= renewal)
    })
}

/// Evaluate pregnancy risk for a sexual activity event
///
/// Fails with `Error::InvalidDate` if the event date is in the future.
/// A pregnancy-risk alert is raised iff the activity was unprotected, on a
/// fertile day, with no active contraception, and the user is not trying to
/// conceive. The alert body switches to the overuse warning once the yearly
/// emergency-contraception threshold has been reached.
///
/// Pure: persisting the event is the caller's responsibility and must
/// happen regardless of the outcome.
pub fn evaluate_risk(
    event: &SexLog,
    cycles: &[CycleRecord],
    contraceptives: &[ContraceptiveLog],
    today: NaiveDate,
) -> Result<RiskAssessment> {
    if event.date > today {
        return Err(Error::InvalidDate(event.date));
    }

    let fertile_day = is_fertile_day(cycles, event.date);
    let active_contraception = has_active_contraception(contraceptives, today);
    let ec_overuse = ec_uses_this_year(contraceptives, today) >= crate::scheduler::EC_OVERUSE_THRESHOLD;

    let at_risk = event.protection == Protection::Unprotected
        && fertile_day
        && !active_contraception
        && !event.trying_pregnancy;

    let alert = at_risk.then(|| {
        let message = if ec_overuse {
            "Unprotected in fertile window. You've used emergency contraception \
             3+ times this year. Consult a doctor for a regular method."
                .to_string()
        } else {
            "Unprotected in fertile window. Consider emergency contraception \
             within 72-120 hours to prevent pregnancy."
                .to_string()
        };
        Alert {
            kind: AlertKind::PregnancyRisk,
            message,
        }
    });

    if alert.is_some() {
        tracing::info!("Pregnancy-risk alert for activity on {}", event.date);
    }

    Ok(RiskAssessment {
        fertile_day,
        active_contraception,
        ec_overuse,
        alert,
    })
}
