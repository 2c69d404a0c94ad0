use super::stats::StatsAccumulator;
use crate::error::Result;
use crate::types::{NormalizedTable, WeekdayPace};
use crate::utils::format_duration;
use std::collections::BTreeMap;

pub const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Mean pace per weekday, Monday first. Weekdays without a known pace are
/// left out rather than reported as zero.
pub fn avg_pace_by_weekday(table: &NormalizedTable) -> Result<Vec<WeekdayPace>> {
    let mut groups: BTreeMap<u32, StatsAccumulator> = BTreeMap::new();
    for record in table.records() {
        if let Some(pace) = record.avg_pace_secs {
            groups.entry(record.day_of_week).or_default().push(pace);
        }
    }

    let mut result = Vec::with_capacity(groups.len());
    for (day, acc) in groups {
        let (Some(name), Some(mean)) = (WEEKDAY_NAMES.get(day as usize), acc.mean()) else {
            continue;
        };
        result.push(WeekdayPace {
            day: name.to_string(),
            mean_pace: format_duration(mean)?,
        });
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{run, table};

    #[test]
    fn test_groups_by_weekday() {
        // 2024-01-01 is a Monday
        let t = table(vec![
            run("2024-01-01 07:00:00", 5.0, "5:00"),
            run("2024-01-08 07:00:00", 5.0, "6:00"),
            run("2024-01-03 07:00:00", 5.0, "4:30"),
            run("2024-01-07 07:00:00", 5.0, "7:00"),
        ]);
        let result = avg_pace_by_weekday(&t).unwrap();

        let days: Vec<&str> = result.iter().map(|w| w.day.as_str()).collect();
        assert_eq!(days, vec!["Monday", "Wednesday", "Sunday"]);
        assert_eq!(result[0].mean_pace, "05:30.00");
        assert_eq!(result[1].mean_pace, "04:30.00");
    }

    #[test]
    fn test_missing_weekday_is_absent() {
        let t = table(vec![
            run("2024-01-01 07:00:00", 5.0, "5:00"),
            run("2024-01-03 07:00:00", 5.0, "5:00"),
        ]);
        let result = avg_pace_by_weekday(&t).unwrap();
        assert!(result.iter().all(|w| w.day != "Tuesday"));
    }

    #[test]
    fn test_unknown_pace_rows_dropped() {
        // Tuesday only has an unparseable pace
        let t = table(vec![
            run("2024-01-01 07:00:00", 5.0, "5:00"),
            run("2024-01-02 07:00:00", 5.0, "--"),
        ]);
        let result = avg_pace_by_weekday(&t).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].day, "Monday");
    }
}
