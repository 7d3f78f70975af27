//! Dose schedule expansion — backend types and the pure generator.
//!
//! A prescription entry carries morning/midday/evening selectors, a dose
//! and a duration in days. Expansion turns that into one dose event per
//! (day, selected slot) pair, slots pinned to fixed clock times. The
//! computation is deterministic and restartable: same entry + same start
//! date always yields the same sequence.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::models::enums::{DoseSlot, Frequency};

/// One medication line as submitted by the prescription form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationEntry {
    pub name: String,
    #[serde(default)]
    pub morning: bool,
    #[serde(default)]
    pub midday: bool,
    #[serde(default)]
    pub evening: bool,
    #[serde(default)]
    pub interval_hours: Option<u32>,
    pub duration_days: u32,
    pub dose_value: f64,
    #[serde(default)]
    pub unit: Option<String>,
}

impl MedicationEntry {
    /// Selected slots in morning → midday → evening order.
    pub fn selected_slots(&self) -> Vec<DoseSlot> {
        let mut slots = Vec::with_capacity(3);
        if self.morning {
            slots.push(DoseSlot::Morning);
        }
        if self.midday {
            slots.push(DoseSlot::Midday);
        }
        if self.evening {
            slots.push(DoseSlot::Evening);
        }
        slots
    }

    /// Frequency label recorded on the prescription item: `custom` when an
    /// interval is set, otherwise the first selected slot, falling back to
    /// evening. An entry with no slots still expands to zero events.
    pub fn frequency(&self) -> Frequency {
        if self.interval_hours.is_some_and(|h| h > 0) {
            return Frequency::Custom;
        }
        self.selected_slots()
            .first()
            .copied()
            .map(Frequency::from)
            .unwrap_or(Frequency::Evening)
    }

    /// Unit string stored with the item.
    pub fn unit_label(&self) -> &str {
        match self.unit.as_deref() {
            Some(u) if !u.trim().is_empty() => u,
            _ => "unit",
        }
    }
}

/// One expanded dose occurrence. `day` is 1-based and contiguous from
/// the prescription start date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduledDose {
    pub day: u32,
    pub slot: DoseSlot,
    pub scheduled_at: NaiveDateTime,
    pub dose_value: f64,
}

/// Expand one entry into its dose events, ordered by day then slot.
///
/// For duration N and k selected slots this yields exactly N·k events.
pub fn expand_entry(entry: &MedicationEntry, start: NaiveDate) -> Vec<ScheduledDose> {
    let slots = entry.selected_slots();
    let mut doses = Vec::with_capacity(slots.len() * entry.duration_days as usize);

    for day_offset in 0..entry.duration_days {
        let date = start + chrono::Duration::days(i64::from(day_offset));
        for slot in &slots {
            // hour is one of 8/12/18, always valid
            let scheduled_at = date
                .and_hms_opt(slot.hour(), 0, 0)
                .expect("slot hour is a valid time");
            doses.push(ScheduledDose {
                day: day_offset + 1,
                slot: *slot,
                scheduled_at,
                dose_value: entry.dose_value,
            });
        }
    }

    doses
}

/// Adherence numbers for a user's dose list.
#[derive(Debug, Clone, PartialEq)]
pub struct AdherenceSummary {
    /// Percentage of doses taken, rounded; 100 for an empty list.
    pub observance_rate: u32,
    /// Doses not yet taken.
    pub active_reminders: u32,
    /// All scheduled doses.
    pub planned_reminders: u32,
    /// Index of the first untaken dose, if any.
    pub next_dose: Option<usize>,
}

/// Summarize taken/untaken flags of a chronologically ordered dose list.
pub fn summarize_adherence(taken_flags: &[bool]) -> AdherenceSummary {
    let total = taken_flags.len();
    let taken = taken_flags.iter().filter(|t| **t).count();

    let observance_rate = if total > 0 {
        ((taken as f64 / total as f64) * 100.0).round() as u32
    } else {
        100
    };

    AdherenceSummary {
        observance_rate,
        active_reminders: (total - taken) as u32,
        planned_reminders: total as u32,
        next_dose: taken_flags.iter().position(|t| !t),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(morning: bool, midday: bool, evening: bool, duration_days: u32) -> MedicationEntry {
        MedicationEntry {
            name: "Amoxicillin".into(),
            morning,
            midday,
            evening,
            interval_hours: None,
            duration_days,
            dose_value: 500.0,
            unit: Some("mg".into()),
        }
    }

    #[test]
    fn produces_one_event_per_day_slot_pair() {
        let doses = expand_entry(&entry(true, true, true, 7), date(2026, 3, 1));
        assert_eq!(doses.len(), 21);

        // Days are 1-based and contiguous
        let days: Vec<u32> = doses.iter().map(|d| d.day).collect();
        let expected: Vec<u32> = (1..=7).flat_map(|d| [d, d, d]).collect();
        assert_eq!(days, expected);
    }

    #[test]
    fn slots_pin_fixed_clock_times() {
        let doses = expand_entry(&entry(true, false, true, 1), date(2026, 3, 1));
        assert_eq!(doses.len(), 2);
        assert_eq!(doses[0].scheduled_at.to_string(), "2026-03-01 08:00:00");
        assert_eq!(doses[1].scheduled_at.to_string(), "2026-03-01 18:00:00");
    }

    #[test]
    fn dates_advance_by_calendar_day() {
        let doses = expand_entry(&entry(false, true, false, 3), date(2026, 2, 27));
        let dates: Vec<String> = doses.iter().map(|d| d.scheduled_at.date().to_string()).collect();
        assert_eq!(dates, ["2026-02-27", "2026-02-28", "2026-03-01"]);
    }

    #[test]
    fn no_slots_means_no_events() {
        let doses = expand_entry(&entry(false, false, false, 14), date(2026, 3, 1));
        assert!(doses.is_empty());
    }

    #[test]
    fn zero_duration_means_no_events() {
        let doses = expand_entry(&entry(true, true, true, 0), date(2026, 3, 1));
        assert!(doses.is_empty());
    }

    #[test]
    fn expansion_is_deterministic() {
        let e = entry(true, false, true, 5);
        let start = date(2026, 3, 1);
        assert_eq!(expand_entry(&e, start), expand_entry(&e, start));
    }

    #[test]
    fn frequency_prefers_interval_then_first_slot() {
        let mut e = entry(false, true, true, 1);
        assert_eq!(e.frequency(), Frequency::Midday);

        e.interval_hours = Some(6);
        assert_eq!(e.frequency(), Frequency::Custom);

        // Zero interval behaves like no interval
        e.interval_hours = Some(0);
        assert_eq!(e.frequency(), Frequency::Midday);

        let none = entry(false, false, false, 1);
        assert_eq!(none.frequency(), Frequency::Evening);
    }

    #[test]
    fn unit_label_falls_back() {
        let mut e = entry(true, false, false, 1);
        assert_eq!(e.unit_label(), "mg");
        e.unit = None;
        assert_eq!(e.unit_label(), "unit");
        e.unit = Some("  ".into());
        assert_eq!(e.unit_label(), "unit");
    }

    #[test]
    fn adherence_of_empty_list_is_full() {
        let s = summarize_adherence(&[]);
        assert_eq!(s.observance_rate, 100);
        assert_eq!(s.active_reminders, 0);
        assert_eq!(s.planned_reminders, 0);
        assert_eq!(s.next_dose, None);
    }

    #[test]
    fn adherence_counts_and_next_dose() {
        let s = summarize_adherence(&[true, true, false, true]);
        assert_eq!(s.observance_rate, 75);
        assert_eq!(s.active_reminders, 1);
        assert_eq!(s.planned_reminders, 4);
        assert_eq!(s.next_dose, Some(2));
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }
}
