use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

// ============================================================================
// Source Columns
// ============================================================================

/// Header labels of the activity export, in file order.
pub const SOURCE_COLUMNS: [&str; 19] = [
    "Date",
    "Title",
    "Distance",
    "Calories",
    "Time",
    "Avg HR",
    "Max HR",
    "Avg Run Cadence",
    "Max Run Cadence",
    "Avg Pace",
    "Best Pace",
    "Total Ascent",
    "Total Descent",
    "Avg Stride Length",
    "Best Lap Time",
    "Moving Time",
    "Elapsed Time",
    "Min Elevation",
    "Max Elevation",
];

/// Columns without which a dataset is rejected outright.
pub const REQUIRED_COLUMNS: [&str; 4] = ["Date", "Distance", "Time", "Avg Pace"];

pub const KM_PER_MILE: f64 = 1.609344;

// ============================================================================
// Fields
// ============================================================================

/// Numeric fields of a normalized record, addressable by their export label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Field {
    Distance,
    DistanceMiles,
    Calories,
    AvgHr,
    MaxHr,
    AvgRunCadence,
    MaxRunCadence,
    TotalAscent,
    TotalDescent,
    AvgStrideLength,
    MinElevation,
    MaxElevation,
    TimeSecs,
    AvgPaceSecs,
    BestPaceSecs,
    HourOfDay,
    DayOfWeek,
    Year,
    PaceMa30,
    HrMa30,
}

impl Field {
    pub const ALL: [Field; 20] = [
        Field::Distance,
        Field::DistanceMiles,
        Field::Calories,
        Field::AvgHr,
        Field::MaxHr,
        Field::AvgRunCadence,
        Field::MaxRunCadence,
        Field::TotalAscent,
        Field::TotalDescent,
        Field::AvgStrideLength,
        Field::MinElevation,
        Field::MaxElevation,
        Field::TimeSecs,
        Field::AvgPaceSecs,
        Field::BestPaceSecs,
        Field::HourOfDay,
        Field::DayOfWeek,
        Field::Year,
        Field::PaceMa30,
        Field::HrMa30,
    ];

    /// The label this field carries in reports and configuration.
    pub fn label(self) -> &'static str {
        match self {
            Field::Distance => "Distance",
            Field::DistanceMiles => "Distance_in_miles",
            Field::Calories => "Calories",
            Field::AvgHr => "Avg HR",
            Field::MaxHr => "Max HR",
            Field::AvgRunCadence => "Avg Run Cadence",
            Field::MaxRunCadence => "Max Run Cadence",
            Field::TotalAscent => "Total Ascent",
            Field::TotalDescent => "Total Descent",
            Field::AvgStrideLength => "Avg Stride Length",
            Field::MinElevation => "Min Elevation",
            Field::MaxElevation => "Max Elevation",
            Field::TimeSecs => "Time_in_secs",
            Field::AvgPaceSecs => "Avg_pace_secs",
            Field::BestPaceSecs => "Best_pace_secs",
            Field::HourOfDay => "Hour_of_day",
            Field::DayOfWeek => "Day_of_week",
            Field::Year => "Year",
            Field::PaceMa30 => "Pace_MA_30",
            Field::HrMa30 => "Avg_HR_MA_30",
        }
    }

    /// Look a field up by its label.
    pub fn from_label(label: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.label() == label)
    }

    /// The export column this field is read or derived from.
    pub fn source_column(self) -> &'static str {
        match self {
            Field::Distance | Field::DistanceMiles => "Distance",
            Field::Calories => "Calories",
            Field::AvgHr | Field::HrMa30 => "Avg HR",
            Field::MaxHr => "Max HR",
            Field::AvgRunCadence => "Avg Run Cadence",
            Field::MaxRunCadence => "Max Run Cadence",
            Field::TotalAscent => "Total Ascent",
            Field::TotalDescent => "Total Descent",
            Field::AvgStrideLength => "Avg Stride Length",
            Field::MinElevation => "Min Elevation",
            Field::MaxElevation => "Max Elevation",
            Field::TimeSecs => "Time",
            Field::AvgPaceSecs | Field::PaceMa30 => "Avg Pace",
            Field::BestPaceSecs => "Best Pace",
            Field::HourOfDay | Field::DayOfWeek | Field::Year => "Date",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Records
// ============================================================================

/// One row of the export with every cell typed. Unknown cells are `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub date: Option<String>,
    pub title: Option<String>,
    pub distance: Option<f64>,
    pub calories: Option<f64>,
    pub time: Option<String>,
    pub avg_hr: Option<f64>,
    pub max_hr: Option<f64>,
    pub avg_run_cadence: Option<f64>,
    pub max_run_cadence: Option<f64>,
    pub avg_pace: Option<String>,
    pub best_pace: Option<String>,
    pub total_ascent: Option<f64>,
    pub total_descent: Option<f64>,
    pub avg_stride_length: Option<f64>,
    pub best_lap_time: Option<String>,
    pub moving_time: Option<String>,
    pub elapsed_time: Option<String>,
    pub min_elevation: Option<f64>,
    pub max_elevation: Option<f64>,
}

/// Parsed export rows together with the header columns that were present.
#[derive(Debug, Clone, Default)]
pub struct RawDataset {
    pub records: Vec<RawRecord>,
    pub columns: BTreeSet<String>,
}

/// A raw record plus the calendar, unit and pace features derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub raw: RawRecord,
    pub timestamp: NaiveDateTime,
    pub short_date: NaiveDate,
    pub distance_miles: Option<f64>,
    pub time_secs: Option<f64>,
    pub avg_pace_secs: Option<f64>,
    pub best_pace_secs: Option<f64>,
    pub hour_of_day: u32,
    /// 0 = Monday .. 6 = Sunday
    pub day_of_week: u32,
    pub month: u32,
    /// `YYYY-MM`
    pub month_year: String,
    pub year: i32,
    pub pace_ma_30: Option<f64>,
    pub hr_ma_30: Option<f64>,
}

impl NormalizedRecord {
    /// Numeric value of a field, `None` when unknown.
    pub fn value(&self, field: Field) -> Option<f64> {
        match field {
            Field::Distance => self.raw.distance,
            Field::DistanceMiles => self.distance_miles,
            Field::Calories => self.raw.calories,
            Field::AvgHr => self.raw.avg_hr,
            Field::MaxHr => self.raw.max_hr,
            Field::AvgRunCadence => self.raw.avg_run_cadence,
            Field::MaxRunCadence => self.raw.max_run_cadence,
            Field::TotalAscent => self.raw.total_ascent,
            Field::TotalDescent => self.raw.total_descent,
            Field::AvgStrideLength => self.raw.avg_stride_length,
            Field::MinElevation => self.raw.min_elevation,
            Field::MaxElevation => self.raw.max_elevation,
            Field::TimeSecs => self.time_secs,
            Field::AvgPaceSecs => self.avg_pace_secs,
            Field::BestPaceSecs => self.best_pace_secs,
            Field::HourOfDay => Some(f64::from(self.hour_of_day)),
            Field::DayOfWeek => Some(f64::from(self.day_of_week)),
            Field::Year => Some(f64::from(self.year)),
            Field::PaceMa30 => self.pace_ma_30,
            Field::HrMa30 => self.hr_ma_30,
        }
    }
}

/// The normalized dataset, in file order.
///
/// Built once per upload and only ever read afterwards.
#[derive(Debug, Clone, Default)]
pub struct NormalizedTable {
    records: Vec<NormalizedRecord>,
    columns: BTreeSet<String>,
}

impl NormalizedTable {
    pub fn new(records: Vec<NormalizedRecord>, columns: BTreeSet<String>) -> Self {
        Self { records, columns }
    }

    pub fn records(&self) -> &[NormalizedRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether the export carried the given header column.
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.contains(column)
    }

    /// Whether a field can be computed for this table.
    pub fn has_field(&self, field: Field) -> bool {
        self.has_column(field.source_column())
    }

    /// Resolve a field label, returning `None` for unknown labels and for fields
    /// whose source column is absent.
    pub fn resolve(&self, label: &str) -> Option<Field> {
        Field::from_label(label).filter(|f| self.has_field(*f))
    }

    /// Values of a field in row order, unknowns included.
    pub fn values(&self, field: Field) -> impl Iterator<Item = Option<f64>> + '_ {
        self.records.iter().map(move |r| r.value(field))
    }

    /// Known values of a field in row order.
    pub fn known_values(&self, field: Field) -> Vec<f64> {
        self.values(field).flatten().collect()
    }
}

static_assertions::assert_impl_all!(NormalizedTable: Send, Sync);

// ============================================================================
// Metric Results
// ============================================================================

/// Descriptive statistics of one field. Unknown statistics are `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DescriptiveRow {
    pub label: String,
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub p25: Option<f64>,
    pub p50: Option<f64>,
    pub p75: Option<f64>,
    pub max: Option<f64>,
}

/// Descriptive rows plus the formatted overall mean pace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DescriptiveMatrix {
    pub rows: Vec<DescriptiveRow>,
    /// `None` when the table has no pace column; empty when no pace is known.
    pub mean_pace: Option<String>,
}

/// Mean pace of all runs started on one weekday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekdayPace {
    /// English day name, `Monday`..`Sunday`.
    pub day: String,
    /// Formatted as `MM:SS.ss`.
    pub mean_pace: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub total_calories: i64,
    pub total_distance: f64,
}

/// Per-year mean/std/min/max of one field, years ascending.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YearlyTable {
    pub years: Vec<i32>,
    pub mean: Vec<Option<f64>>,
    pub std: Vec<Option<f64>>,
    pub min: Vec<Option<f64>>,
    pub max: Vec<Option<f64>>,
}

/// Result of an optional per-field computation: either data or an inline error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldOutcome<T> {
    Computed(T),
    NotFound { error: String },
}

impl<T> FieldOutcome<T> {
    pub fn not_found(label: &str) -> Self {
        FieldOutcome::NotFound {
            error: format!("{label} not found in dataset"),
        }
    }

    pub fn computed(&self) -> Option<&T> {
        match self {
            FieldOutcome::Computed(v) => Some(v),
            FieldOutcome::NotFound { .. } => None,
        }
    }
}

/// Per-field outcomes keyed by the requested label, in request order.
pub type PerField<T> = Vec<(String, FieldOutcome<T>)>;

/// One of the fastest runs at a target distance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceRecord {
    pub date: NaiveDateTime,
    pub distance: f64,
    pub time: Option<String>,
    pub avg_pace: Option<String>,
}

/// Up to three fastest runs for one caller-supplied target distance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestPerformances {
    /// The target exactly as supplied; used verbatim as the report key.
    pub distance: f64,
    pub runs: Vec<PerformanceRecord>,
}

// ============================================================================
// Series Results
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    /// Bin midpoints, ascending.
    pub bins: Vec<f64>,
    pub counts: Vec<u64>,
}

/// Raw values of one metric alongside their trailing moving average.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovingAverageSeries {
    pub dates: Vec<String>,
    pub values: Vec<Option<f64>>,
    pub moving_average: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesData {
    pub avg_hr: MovingAverageSeries,
    pub avg_pace: MovingAverageSeries,
}
