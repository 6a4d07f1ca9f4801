use std::time::Duration;

use chrono::{DateTime, Days, NaiveTime, TimeDelta, TimeZone};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    /// Fixed interval, measured from the last run.
    Every(Duration),
    /// Once a day at a wall-clock time in the scheduler's time zone.
    DailyAt(NaiveTime),
}

impl Schedule {
    /// First run time strictly after `now`.
    pub fn next_after<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> DateTime<Tz> {
        match self {
            Self::Every(interval) => {
                let step = TimeDelta::from_std(*interval).unwrap_or(TimeDelta::days(1));
                now.clone()
                    .checked_add_signed(step)
                    .unwrap_or_else(|| now.clone())
            }
            Self::DailyAt(time) => next_wall_clock(now, *time),
        }
    }
}

fn next_wall_clock<Tz: TimeZone>(now: &DateTime<Tz>, time: NaiveTime) -> DateTime<Tz> {
    let timezone = now.timezone();
    let today = now.date_naive();

    /* a DST gap can swallow the time on one day; the following day will have it */
    for offset in 0..=2 {
        let Some(date) = today.checked_add_days(Days::new(offset)) else {
            break;
        };

        if let Some(candidate) = timezone.from_local_datetime(&date.and_time(time)).earliest() {
            if candidate > *now {
                return candidate;
            }
        }
    }

    now.clone() + TimeDelta::days(1)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn at(text: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(text).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn every_adds_the_interval() {
        let schedule = Schedule::Every(Duration::from_secs(300));

        assert_eq!(
            schedule.next_after(&at("2024-03-01T10:00:00Z")),
            at("2024-03-01T10:05:00Z")
        );
    }

    #[test]
    fn daily_later_today() {
        let schedule = Schedule::DailyAt(NaiveTime::from_hms_opt(8, 0, 0).unwrap());

        assert_eq!(
            schedule.next_after(&at("2024-03-01T06:30:00Z")),
            at("2024-03-01T08:00:00Z")
        );
    }

    #[test]
    fn daily_rolls_over_to_tomorrow_once_passed() {
        let schedule = Schedule::DailyAt(NaiveTime::from_hms_opt(8, 0, 0).unwrap());

        assert_eq!(
            schedule.next_after(&at("2024-03-01T08:00:00Z")),
            at("2024-03-02T08:00:00Z")
        );
        assert_eq!(
            schedule.next_after(&at("2024-12-31T23:59:00Z")),
            at("2025-01-01T08:00:00Z")
        );
    }
}
