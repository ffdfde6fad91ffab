//! Doctor fatigue tracking and the load-balance heuristic.
//!
//! Two distinct fatigue thresholds exist on purpose: a break is suggested
//! above 75, but a doctor only counts as overloaded for load balancing
//! above 80 (or when explicitly flagged overworked).

use chrono::{DateTime, Utc};

use crate::models::{Doctor, LoadBalanceSuggestion};

/// Fatigue score above which the fatigue-status endpoint suggests a break.
pub const BREAK_SUGGESTED_THRESHOLD: i64 = 75;

/// Fatigue score above which a doctor counts as overloaded for load balancing.
pub const OVERLOADED_THRESHOLD: i64 = 80;

/// Fatigue score below which a non-overworked doctor can absorb extra cases.
pub const UNDERUTILIZED_THRESHOLD: i64 = 40;

/// Notional number of cases a single suggestion proposes to move.
pub const SUGGESTED_TRANSFER_COUNT: i64 = 2;

/// Break reset: fatigue back to 0, overworked flag cleared, break time
/// stamped. No other doctor is affected.
pub fn apply_break(doctor: &Doctor, at: DateTime<Utc>) -> Doctor {
    Doctor {
        fatigue_score: 0,
        is_overworked: false,
        last_break_time: Some(at),
        ..doctor.clone()
    }
}

pub fn break_suggested(fatigue_score: i64) -> bool {
    fatigue_score > BREAK_SUGGESTED_THRESHOLD
}

/// Suggest moving cases from the first overloaded doctor to the first
/// underutilized one, in roster order.
///
/// This is a first-match policy, not an optimal assignment: at most one
/// suggestion comes back no matter how many doctors qualify, and the two
/// searches run independently over the full roster.
pub fn suggest_load_balance(doctors: &[Doctor]) -> Vec<LoadBalanceSuggestion> {
    if doctors.len() < 2 {
        return Vec::new();
    }

    let overloaded = doctors
        .iter()
        .find(|d| d.is_overworked || d.fatigue_score > OVERLOADED_THRESHOLD);
    let underutilized = doctors
        .iter()
        .find(|d| !d.is_overworked && d.fatigue_score < UNDERUTILIZED_THRESHOLD);

    match (overloaded, underutilized) {
        (Some(over), Some(under)) => vec![LoadBalanceSuggestion {
            overloaded_doctor_id: over.id,
            underutilized_doctor_id: under.id,
            suggested_transfer_count: SUGGESTED_TRANSFER_COUNT,
            reason: format!(
                "{} is overloaded. Suggesting transfer of {} non-urgent cases to {}.",
                over.name, SUGGESTED_TRANSFER_COUNT, under.name
            ),
        }],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doctor(id: i64, name: &str, fatigue_score: i64, is_overworked: bool) -> Doctor {
        Doctor {
            id,
            name: name.into(),
            specialization: "Family Practice".into(),
            working_hours_start: "09:00".into(),
            working_hours_end: "17:00".into(),
            max_daily_capacity: 20,
            fatigue_score,
            last_break_time: None,
            is_overworked,
        }
    }

    #[test]
    fn apply_break_resets_regardless_of_prior_state() {
        let tired = doctor(1, "Dr. Foster", 95, true);
        let now = Utc::now();
        let rested = apply_break(&tired, now);

        assert_eq!(rested.fatigue_score, 0);
        assert!(!rested.is_overworked);
        assert_eq!(rested.last_break_time, Some(now));
        // Identity and schedule are untouched
        assert_eq!(rested.id, 1);
        assert_eq!(rested.max_daily_capacity, 20);
    }

    #[test]
    fn break_suggested_above_seventy_five() {
        assert!(!break_suggested(75));
        assert!(break_suggested(76));
    }

    #[test]
    fn no_suggestion_below_two_doctors() {
        assert!(suggest_load_balance(&[]).is_empty());
        assert!(suggest_load_balance(&[doctor(1, "Dr. Solo", 95, true)]).is_empty());
    }

    #[test]
    fn suggestion_pairs_overloaded_with_underutilized() {
        let roster = vec![
            doctor(1, "Dr. Foster", 90, true),
            doctor(2, "Dr. Liu", 20, false),
        ];
        let suggestions = suggest_load_balance(&roster);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].overloaded_doctor_id, 1);
        assert_eq!(suggestions[0].underutilized_doctor_id, 2);
        assert_eq!(suggestions[0].suggested_transfer_count, 2);
        assert!(suggestions[0].reason.contains("Dr. Foster"));
        assert!(suggestions[0].reason.contains("Dr. Liu"));
    }

    #[test]
    fn no_suggestion_when_neither_threshold_met() {
        let roster = vec![
            doctor(1, "Dr. Foster", 50, false),
            doctor(2, "Dr. Liu", 30, false),
        ];
        // 30 < 40 makes Dr. Liu underutilized, but nobody is overloaded
        assert!(suggest_load_balance(&roster).is_empty());
    }

    #[test]
    fn fatigue_eighty_is_not_overloaded() {
        // Strictly greater than 80; the overworked flag is the only other way in
        let roster = vec![
            doctor(1, "Dr. Foster", 80, false),
            doctor(2, "Dr. Liu", 10, false),
        ];
        assert!(suggest_load_balance(&roster).is_empty());
    }

    #[test]
    fn overworked_flag_alone_qualifies() {
        let roster = vec![
            doctor(1, "Dr. Foster", 10, true),
            doctor(2, "Dr. Liu", 10, false),
        ];
        let suggestions = suggest_load_balance(&roster);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].overloaded_doctor_id, 1);
    }

    #[test]
    fn first_match_wins_even_with_many_candidates() {
        let roster = vec![
            doctor(1, "Dr. Foster", 90, true),
            doctor(2, "Dr. Santos", 95, true),
            doctor(3, "Dr. Liu", 20, false),
            doctor(4, "Dr. Chen", 10, false),
        ];
        let suggestions = suggest_load_balance(&roster);
        assert_eq!(suggestions.len(), 1, "at most one suggestion regardless of candidates");
        assert_eq!(suggestions[0].overloaded_doctor_id, 1);
        assert_eq!(suggestions[0].underutilized_doctor_id, 3);
    }

    #[test]
    fn searches_are_independent_of_each_other() {
        // The underutilized search starts from the roster head, not after
        // the overloaded match.
        let roster = vec![
            doctor(1, "Dr. Liu", 20, false),
            doctor(2, "Dr. Foster", 90, true),
        ];
        let suggestions = suggest_load_balance(&roster);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].overloaded_doctor_id, 2);
        assert_eq!(suggestions[0].underutilized_doctor_id, 1);
    }
}
