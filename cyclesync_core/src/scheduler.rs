//! Contraceptive method scheduling: renewal dates, renewal reminders,
//! and emergency-contraception overuse detection.

use crate::{
    Alert, AlertKind, ContraceptiveLog, DurationUnit, Error, MethodProfile, Renewal, Result,
};
use chrono::{Duration, Months, NaiveDate};
use uuid::Uuid;

/// Days before a scheduled renewal at which a reminder starts firing
pub const RENEWAL_LEAD_DAYS: i64 = 7;

/// Emergency-contraception uses per calendar year that trigger the
/// standing overuse warning
pub const EC_OVERUSE_THRESHOLD: usize = 3;

/// Create a contraceptive log entry for a method started on `start`
///
/// Fails with `Error::InvalidDate` if `start` is after `today`. The renewal
/// date is `start + duration` in the method's unit; permanent methods never
/// expire and single-use methods get a cosmetic renewal equal to the start
/// date (never enforced as ongoing protection).
pub fn schedule_method(
    profile: &MethodProfile,
    start: NaiveDate,
    today: NaiveDate,
) -> Result<ContraceptiveLog> {
    if start > today {
        return Err(Error::InvalidDate(start));
    }

    let renewal = compute_renewal(profile, start)?;

    tracing::info!(
        "Scheduling {}: start {}, renewal {}",
        profile.name,
        start,
        renewal
    );

    Ok(ContraceptiveLog {
        id: Uuid::new_v4(),
        method: profile.kind,
        name: profile.name.clone(),
        duration: profile.duration,
        unit: profile.unit,
        start,
        renewal,
        typical_use_effectiveness: profile.typical_use_effectiveness,
        perfect_use_effectiveness: profile.perfect_use_effectiveness,
        effects: profile.effects.clone(),
        source: profile.source.clone(),
    })
}

fn compute_renewal(profile: &MethodProfile, start: NaiveDate) -> Result<Renewal> {
    let renewal = match profile.unit {
        DurationUnit::Permanent => Renewal::Permanent,
        DurationUnit::SingleUse => Renewal::Scheduled(start),
        DurationUnit::Months => Renewal::Scheduled(add_months(start, profile.duration)?),
        DurationUnit::Years => Renewal::Scheduled(add_months(start, profile.duration * 12)?),
    };
    Ok(renewal)
}

/// Calendar month addition; end-of-month dates clamp (chrono semantics),
/// e.g. 2024-02-29 + 60 months = 2029-02-28.
fn add_months(start: NaiveDate, months: u32) -> Result<NaiveDate> {
    start
        .checked_add_months(Months::new(months))
        .ok_or_else(|| Error::Other(format!("Renewal date out of range: {} + {}mo", start, months)))
}

/// Renewal reminders for every log whose scheduled renewal is within
/// `RENEWAL_LEAD_DAYS` of `today` (or already past)
///
/// Evaluated against the full log list; callers re-run this whenever the
/// list changes, not only at creation time. Permanent methods never remind.
pub fn renewal_reminders(logs: &[ContraceptiveLog], today: NaiveDate) -> Vec<Alert> {
    logs.iter()
        .filter_map(|log| {
            let renewal = log.renewal.scheduled()?;
            if today >= renewal - Duration::days(RENEWAL_LEAD_DAYS) {
                Some(Alert {
                    kind: AlertKind::RenewalReminder,
                    message: format!("{} due for renewal on {}.", log.name, renewal),
                })
            } else {
                None
            }
        })
        .collect()
}

/// Count of emergency-contraception logs started in `today`'s calendar year
pub fn ec_uses_this_year(logs: &[ContraceptiveLog], today: NaiveDate) -> usize {
    use chrono::Datelike;
    logs.iter()
        .filter(|log| log.method.is_emergency() && log.start.year() == today.year())
        .count()
}

/// Standing overuse warning once the yearly threshold is reached
///
/// Non-blocking: further entries are still accepted.
pub fn ec_overuse_warning(logs: &[ContraceptiveLog], today: NaiveDate) -> Option<Alert> {
    let uses = ec_uses_this_year(logs, today);
    if uses >= EC_OVERUSE_THRESHOLD {
        Some(Alert {
            kind: AlertKind::OveruseWarning,
            message: format!(
                "Emergency contraception used {} times this year. \
                 Consider a regular family planning method.",
                uses
            ),
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::build_default_catalog;
    use crate::MethodKind;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn log_for(kind: MethodKind, start: NaiveDate, today: NaiveDate) -> ContraceptiveLog {
        let catalog = build_default_catalog();
        schedule_method(catalog.method(kind).unwrap(), start, today).unwrap()
    }

    #[test]
    fn test_three_month_injection_renewal() {
        let log = log_for(MethodKind::Injection, date(2024, 1, 1), date(2024, 1, 1));
        assert_eq!(log.renewal, Renewal::Scheduled(date(2024, 4, 1)));
    }

    #[test]
    fn test_five_year_implant_clamps_leap_day() {
        let log = log_for(MethodKind::Implant, date(2024, 2, 29), date(2024, 3, 1));
        assert_eq!(log.renewal, Renewal::Scheduled(date(2029, 2, 28)));
    }

    #[test]
    fn test_permanent_method_never_expires() {
        for start in [date(2020, 1, 1), date(2024, 6, 15)] {
            let log = log_for(MethodKind::Vasectomy, start, date(2024, 6, 15));
            assert_eq!(log.renewal, Renewal::Permanent);
        }
    }

    #[test]
    fn test_single_use_renewal_is_start_date() {
        let log = log_for(MethodKind::MaleCondom, date(2024, 5, 1), date(2024, 5, 1));
        assert_eq!(log.renewal, Renewal::Scheduled(date(2024, 5, 1)));
    }

    #[test]
    fn test_future_start_rejected() {
        let catalog = build_default_catalog();
        let profile = catalog.method(MethodKind::Pills).unwrap();
        let result = schedule_method(profile, date(2024, 6, 2), date(2024, 6, 1));
        assert!(matches!(result, Err(Error::InvalidDate(_))));
    }

    #[test]
    fn test_reminder_fires_within_lead_window() {
        let today = date(2024, 3, 26);
        // Pills started 2024-03-01 renew 2024-04-01; 6 days out
        let logs = vec![log_for(MethodKind::Pills, date(2024, 3, 1), today)];
        let reminders = renewal_reminders(&logs, today);
        assert_eq!(reminders.len(), 1);
        assert_eq!(reminders[0].kind, AlertKind::RenewalReminder);
        assert!(reminders[0].message.contains("2024-04-01"));
    }

    #[test]
    fn test_no_reminder_before_lead_window() {
        let today = date(2024, 3, 10);
        let logs = vec![log_for(MethodKind::Pills, date(2024, 3, 1), today)];
        assert!(renewal_reminders(&logs, today).is_empty());
    }

    #[test]
    fn test_reminder_still_fires_after_renewal_passed() {
        let today = date(2024, 6, 1);
        let logs = vec![log_for(MethodKind::Pills, date(2024, 3, 1), today)];
        assert_eq!(renewal_reminders(&logs, today).len(), 1);
    }

    #[test]
    fn test_single_use_logs_remind_immediately() {
        // A cosmetic renewal equal to the start date is always inside the
        // lead window, so condoms and EC remind from day one
        let today = date(2024, 5, 1);
        let logs = vec![
            log_for(MethodKind::MaleCondom, today, today),
            log_for(MethodKind::EmergencyContraception, today, today),
        ];
        assert_eq!(renewal_reminders(&logs, today).len(), 2);
    }

    #[test]
    fn test_permanent_methods_never_remind() {
        let today = date(2024, 6, 1);
        let logs = vec![log_for(MethodKind::TubalLigation, date(2020, 1, 1), today)];
        assert!(renewal_reminders(&logs, today).is_empty());
    }

    #[test]
    fn test_reminders_cover_full_list() {
        let today = date(2024, 4, 2);
        let logs = vec![
            log_for(MethodKind::Pills, date(2024, 3, 5), today), // renews 2024-04-05
            log_for(MethodKind::Injection, date(2024, 1, 10), today), // renews 2024-04-10
            log_for(MethodKind::Implant, date(2024, 1, 1), today), // renews 2029-01-01
        ];
        assert_eq!(renewal_reminders(&logs, today).len(), 2);
    }

    #[test]
    fn test_ec_overuse_threshold() {
        let today = date(2024, 8, 1);
        let mut logs: Vec<ContraceptiveLog> = (1..=2)
            .map(|m| log_for(MethodKind::EmergencyContraception, date(2024, m, 1), today))
            .collect();
        assert!(ec_overuse_warning(&logs, today).is_none());

        logs.push(log_for(
            MethodKind::EmergencyContraception,
            date(2024, 3, 1),
            today,
        ));
        let warning = ec_overuse_warning(&logs, today).unwrap();
        assert_eq!(warning.kind, AlertKind::OveruseWarning);

        // Stays set on further entries in the same year
        logs.push(log_for(
            MethodKind::EmergencyContraception,
            date(2024, 4, 1),
            today,
        ));
        assert!(ec_overuse_warning(&logs, today).is_some());
    }

    #[test]
    fn test_ec_count_resets_across_calendar_years() {
        let logs: Vec<ContraceptiveLog> = (1..=3)
            .map(|m| {
                log_for(
                    MethodKind::EmergencyContraception,
                    date(2024, m, 1),
                    date(2024, 12, 31),
                )
            })
            .collect();
        assert_eq!(ec_uses_this_year(&logs, date(2024, 12, 31)), 3);
        // Entries from last year do not count toward the new year's total
        assert_eq!(ec_uses_this_year(&logs, date(2025, 1, 1)), 0);
        assert!(ec_overuse_warning(&logs, date(2025, 1, 1)).is_none());
    }

    #[test]
    fn test_non_ec_methods_not_counted() {
        let today = date(2024, 8, 1);
        let logs = vec![
            log_for(MethodKind::Pills, date(2024, 1, 1), today),
            log_for(MethodKind::MaleCondom, date(2024, 2, 1), today),
        ];
        assert_eq!(ec_uses_this_year(&logs, today), 0);
    }
}
