// libs/doctor-cell/src/services/slots.rs
use std::collections::HashMap;

use chrono::{Duration, NaiveDateTime, NaiveTime, Timelike};
use tracing::debug;

use shared_utils::datekey::{date_key, time_label};

use crate::models::{DaySlots, Slot};

/// First bookable hour of the clinic day.
pub const OPENING_HOUR: u32 = 10;
/// Slots must start strictly before this hour.
pub const CLOSING_HOUR: u32 = 21;
/// Fixed slot granularity in minutes.
pub const SLOT_STEP_MINUTES: i64 = 60;
/// Number of day buckets generated per request.
pub const WINDOW_DAYS: i64 = 7;

/// Generate the 7-day booking window for a doctor.
///
/// Output is recomputed fresh on every call and is deterministic for a fixed
/// `now`: the same instant and booked map always produce the same buckets.
pub fn generate_week(
    now: NaiveDateTime,
    slots_booked: &HashMap<String, Vec<String>>,
) -> Vec<DaySlots> {
    let buckets: Vec<DaySlots> = (0..WINDOW_DAYS)
        .map(|offset| generate_day(now, offset, slots_booked))
        .collect();

    debug!(
        "Generated {} day buckets, {} slots total",
        buckets.len(),
        buckets.iter().map(|d| d.slots.len()).sum::<usize>()
    );

    buckets
}

fn generate_day(
    now: NaiveDateTime,
    offset: i64,
    slots_booked: &HashMap<String, Vec<String>>,
) -> DaySlots {
    let date = now.date() + Duration::days(offset);
    let key = date_key(date);

    let start = if offset == 0 {
        day_zero_start(now)
    } else {
        NaiveTime::from_hms_opt(OPENING_HOUR, 0, 0)
    };

    let mut slots = Vec::new();

    // A start past closing (or past midnight) leaves the bucket empty; the
    // bucket itself is still emitted so date-selector indices stay aligned.
    if let Some(start) = start {
        let closing = date.and_hms_opt(CLOSING_HOUR, 0, 0).unwrap();
        let mut current = date.and_time(start);

        while current < closing {
            let label = time_label(current.time());
            let taken = slots_booked
                .get(&key)
                .map(|times| times.iter().any(|t| t == &label))
                .unwrap_or(false);

            if !taken {
                slots.push(Slot {
                    starts_at: current,
                    label,
                });
            }

            current += Duration::minutes(SLOT_STEP_MINUTES);
        }
    }

    DaySlots {
        date,
        date_key: key,
        slots,
    }
}

/// Start time for today's bucket. Rounding policy is carried over from the
/// original booking flow verbatim: past the opening hour the window starts at
/// the next full hour, and the minute snaps to :30 when the clock reads past
/// half past, otherwise to :00.
fn day_zero_start(now: NaiveDateTime) -> Option<NaiveTime> {
    let hour = if now.hour() > OPENING_HOUR {
        now.hour() + 1
    } else {
        OPENING_HOUR
    };
    let minute = if now.minute() > 30 { 30 } else { 0 };

    // 23:xx rolls to hour 24, which has no representation; treat as closed.
    NaiveTime::from_hms_opt(hour, minute, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn empty_booked_map_yields_seven_full_buckets() {
        let now = at(2024, 6, 5, 9, 0);
        let week = generate_week(now, &HashMap::new());

        assert_eq!(week.len(), 7);
        for day in &week {
            // 10:00 through 20:00 inclusive at 60-minute steps.
            assert_eq!(day.slots.len(), 11);
            assert_eq!(day.slots.first().unwrap().label, "10:00 AM");
            assert_eq!(day.slots.last().unwrap().label, "8:00 PM");
        }
    }

    #[test]
    fn slot_count_matches_ceiling_formula_for_half_hour_start() {
        // 13:45 -> start 14:30; ceil((21:00 - 14:30) / 60) = 7 slots.
        let now = at(2024, 6, 5, 13, 45);
        let week = generate_week(now, &HashMap::new());

        assert_eq!(week[0].slots.len(), 7);
        assert_eq!(week[0].slots.first().unwrap().label, "2:30 PM");
        assert_eq!(week[0].slots.last().unwrap().label, "8:30 PM");
    }

    #[test]
    fn slots_do_not_overlap() {
        let now = at(2024, 6, 5, 13, 45);
        for day in generate_week(now, &HashMap::new()) {
            for pair in day.slots.windows(2) {
                assert!(pair[1].starts_at - pair[0].starts_at >= Duration::minutes(60));
            }
        }
    }

    #[test]
    fn minute_snap_rounds_forward_on_the_hour_side() {
        // 13:10 -> next hour, minute 0.
        let now = at(2024, 6, 5, 13, 10);
        let week = generate_week(now, &HashMap::new());
        assert_eq!(week[0].slots.first().unwrap().label, "2:00 PM");
    }

    #[test]
    fn before_opening_starts_at_ten() {
        let now = at(2024, 6, 5, 7, 50);
        let week = generate_week(now, &HashMap::new());
        assert_eq!(week[0].slots.first().unwrap().label, "10:00 AM");
    }

    #[test]
    fn booked_slots_are_excluded() {
        // 10:00 AM already taken on June 5 2024.
        let mut booked = HashMap::new();
        booked.insert("5_6_2024".to_string(), vec!["10:00 AM".to_string()]);

        let now = at(2024, 6, 5, 9, 0);
        let week = generate_week(now, &booked);

        let labels: Vec<&str> = week[0].slots.iter().map(|s| s.label.as_str()).collect();
        assert!(!labels.contains(&"10:00 AM"));
        assert!(labels.contains(&"11:00 AM"));
        assert_eq!(week[0].slots.len(), 10);
    }

    #[test]
    fn every_booked_label_is_absent_across_the_window() {
        let mut booked = HashMap::new();
        booked.insert("5_6_2024".to_string(), vec!["11:00 AM".to_string(), "3:00 PM".to_string()]);
        booked.insert("7_6_2024".to_string(), vec!["8:00 PM".to_string()]);

        let now = at(2024, 6, 5, 9, 0);
        let week = generate_week(now, &booked);

        for day in &week {
            if let Some(taken) = booked.get(&day.date_key) {
                for label in taken {
                    assert!(day.slots.iter().all(|s| &s.label != label));
                }
            }
        }
    }

    #[test]
    fn identical_inputs_yield_identical_output() {
        let mut booked = HashMap::new();
        booked.insert("5_6_2024".to_string(), vec!["10:00 AM".to_string()]);

        let now = at(2024, 6, 5, 14, 42);
        let a = generate_week(now, &booked);
        let b = generate_week(now, &booked);

        assert_eq!(a.len(), b.len());
        for (da, db) in a.iter().zip(b.iter()) {
            assert_eq!(da.date_key, db.date_key);
            assert_eq!(da.slots, db.slots);
        }
    }

    #[test]
    fn late_evening_today_is_an_empty_bucket_not_a_missing_one() {
        let now = at(2024, 6, 5, 22, 15);
        let week = generate_week(now, &HashMap::new());

        assert_eq!(week.len(), 7);
        assert!(week[0].slots.is_empty());
        assert_eq!(week[0].date_key, "5_6_2024");
        // Tomorrow is unaffected.
        assert_eq!(week[1].slots.len(), 11);
    }

    #[test]
    fn eleven_pm_does_not_wrap_past_midnight() {
        let now = at(2024, 6, 5, 23, 40);
        let week = generate_week(now, &HashMap::new());
        assert!(week[0].slots.is_empty());
    }

    #[test]
    fn date_keys_advance_across_month_boundaries() {
        let now = at(2024, 6, 28, 9, 0);
        let week = generate_week(now, &HashMap::new());
        assert_eq!(week[0].date_key, "28_6_2024");
        assert_eq!(week[3].date_key, "1_7_2024");
    }
}
