//! Watering schedule calculations
//!
//! Pure date arithmetic over local calendar dates. The caller supplies
//! `today`, so nothing in here reads the wall clock except `SystemClock`.
//!
//! Callers guarantee `watering_frequency >= 1`; it is not re-validated here.

use chrono::{DateTime, Days, Local, NaiveDate, Utc};
use serde::Serialize;

use crate::models::Plant;

/// Source of the current date and instant
pub trait Clock {
    /// Current local calendar date
    fn today(&self) -> NaiveDate;

    /// Current instant
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time in the local timezone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock pinned to a fixed instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    today: NaiveDate,
    now: DateTime<Utc>,
}

impl FixedClock {
    /// Pin the clock to midnight UTC of `today`
    pub fn on(today: NaiveDate) -> Self {
        Self {
            today,
            now: today.and_time(chrono::NaiveTime::MIN).and_utc(),
        }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today
    }

    fn now(&self) -> DateTime<Utc> {
        self.now
    }
}

/// Date the plant next needs water
pub fn next_watering_date(plant: &Plant) -> NaiveDate {
    plant
        .last_watered
        .checked_add_days(Days::new(u64::from(plant.watering_frequency)))
        .unwrap_or(NaiveDate::MAX)
}

/// Whole days from `today` until the next watering; negative when overdue
pub fn days_until_next_watering(plant: &Plant, today: NaiveDate) -> i64 {
    (next_watering_date(plant) - today).num_days()
}

/// True when the next watering date is today or already past
pub fn needs_watering_today(plant: &Plant, today: NaiveDate) -> bool {
    next_watering_date(plant) <= today
}

/// Schedule summary for one plant, as shown on its card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WateringStatus {
    pub next_watering: NaiveDate,
    pub days_until: i64,
    pub due: bool,
}

impl WateringStatus {
    /// Short badge text
    pub fn badge(&self) -> &'static str {
        if self.due {
            "Water now"
        } else {
            "OK"
        }
    }

    /// Human description of when water is next needed
    pub fn describe(&self) -> String {
        match self.days_until {
            0 => "Needs water today".to_string(),
            d if d < 0 => {
                let overdue = -d;
                format!("Overdue by {} day{}", overdue, plural(overdue))
            }
            d => format!("Next watering in {} day{}", d, plural(d)),
        }
    }
}

fn plural(n: i64) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

/// Compute the full schedule summary for a plant
pub fn watering_status(plant: &Plant, today: NaiveDate) -> WateringStatus {
    WateringStatus {
        next_watering: next_watering_date(plant),
        days_until: days_until_next_watering(plant, today),
        due: needs_watering_today(plant, today),
    }
}
