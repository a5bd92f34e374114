//! # Due Date Calculator
//!
//! Estimates the due date, conception date and LMP from one of five methods,
//! then projects gestational age, trimester, baby size and a milestone
//! timeline against a reference date.
//!
//! ## Methods
//!
//! | Method       | Due date                                |
//! |--------------|-----------------------------------------|
//! | `lmp`        | LMP + (cycle − luteal) + 266            |
//! | `conception` | conception + 266                        |
//! | `ivf`        | transfer + (266 − embryo age)           |
//! | `ultrasound` | scan + (280 − gestational age at scan)  |
//! | `dueDate`    | as entered                              |
//!
//! The reference date is always passed in; nothing here reads the clock.
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use health_core::calculations::due_date::calculate;
//! use health_core::input::CalculatorInput;
//!
//! let input = CalculatorInput::new()
//!     .with("method", "lmp")
//!     .with("lmpDate", "2026-01-01");
//! let today = NaiveDate::from_ymd_opt(2026, 4, 1).unwrap();
//!
//! let result = calculate(&input, today);
//! assert_eq!(result.text("dueDate"), Some("2026-10-08"));
//! assert_eq!(result.text("trimester"), Some("first"));
//! ```

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{CalcError, CalcResult};
use crate::format::{round_to, Formatter};
use crate::formulas::gestation::{
    self, EmbryoAge, GenderPrediction, Trimester, CONCEPTION_TO_DUE_DAYS, FULL_GESTATION_DAYS,
    FULL_TERM_WEEK, LMP_TO_CONCEPTION_DAYS, MAX_WEEK, MILESTONES, TRIMESTER_SPANS,
};
use crate::input::CalculatorInput;
use crate::locale::{fill_template, Translator};
use crate::result::{ChartSeriesPoint, MilestoneRow, ResultBuilder, ResultBundle, TableRow};
use crate::settings::EngineSettings;

const DEFAULT_SUMMARY: &str =
    "Estimated due date: {dueDate}. You are {weeks} weeks and {days} days pregnant ({trimester}).";
const DEFAULT_SUMMARY_NOT_PREGNANT: &str =
    "Estimated due date: {dueDate}. Your pregnancy timeline starts on {lmpDate}.";

/// How the due date is estimated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum DueDateMethod {
    #[default]
    Lmp,
    Conception,
    Ivf,
    Ultrasound,
    DueDate,
}

impl DueDateMethod {
    pub const ALL: [DueDateMethod; 5] = [
        DueDateMethod::Lmp,
        DueDateMethod::Conception,
        DueDateMethod::Ivf,
        DueDateMethod::Ultrasound,
        DueDateMethod::DueDate,
    ];

    pub fn parse(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.code().eq_ignore_ascii_case(code))
    }

    pub fn code(&self) -> &'static str {
        match self {
            DueDateMethod::Lmp => "lmp",
            DueDateMethod::Conception => "conception",
            DueDateMethod::Ivf => "ivf",
            DueDateMethod::Ultrasound => "ultrasound",
            DueDateMethod::DueDate => "dueDate",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DueDateMethod::Lmp => "Last menstrual period",
            DueDateMethod::Conception => "Conception date",
            DueDateMethod::Ivf => "IVF transfer date",
            DueDateMethod::Ultrasound => "Ultrasound",
            DueDateMethod::DueDate => "Known due date",
        }
    }
}

/// Validated method with its method-specific inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "camelCase")]
pub enum MethodInput {
    Lmp {
        lmp: NaiveDate,
        cycle_length: i64,
        luteal_phase: i64,
    },
    Conception {
        conception: NaiveDate,
    },
    Ivf {
        transfer: NaiveDate,
        embryo_age: EmbryoAge,
    },
    Ultrasound {
        scan: NaiveDate,
        /// Gestational age at the scan (days)
        gestational_days: i64,
    },
    DueDate {
        due: NaiveDate,
    },
}

impl MethodInput {
    pub fn method(&self) -> DueDateMethod {
        match self {
            MethodInput::Lmp { .. } => DueDateMethod::Lmp,
            MethodInput::Conception { .. } => DueDateMethod::Conception,
            MethodInput::Ivf { .. } => DueDateMethod::Ivf,
            MethodInput::Ultrasound { .. } => DueDateMethod::Ultrasound,
            MethodInput::DueDate { .. } => DueDateMethod::DueDate,
        }
    }

    /// The `(due, conception, lmp)` triple for this method.
    pub fn dates(&self) -> CalcResult<PregnancyDates> {
        let dates = match *self {
            MethodInput::Lmp {
                lmp,
                cycle_length,
                luteal_phase,
            } => {
                let conception = shift(lmp, cycle_length - luteal_phase)?;
                PregnancyDates {
                    due: shift(conception, CONCEPTION_TO_DUE_DAYS)?,
                    conception,
                    lmp,
                }
            }
            MethodInput::Conception { conception } => PregnancyDates {
                due: shift(conception, CONCEPTION_TO_DUE_DAYS)?,
                conception,
                lmp: shift(conception, -LMP_TO_CONCEPTION_DAYS)?,
            },
            MethodInput::Ivf { transfer, embryo_age } => {
                let due = shift(transfer, CONCEPTION_TO_DUE_DAYS - embryo_age.days())?;
                PregnancyDates {
                    due,
                    conception: shift(transfer, -embryo_age.days())?,
                    lmp: shift(due, -FULL_GESTATION_DAYS)?,
                }
            }
            MethodInput::Ultrasound { scan, gestational_days } => {
                let due = shift(scan, FULL_GESTATION_DAYS - gestational_days)?;
                let lmp = shift(due, -FULL_GESTATION_DAYS)?;
                PregnancyDates {
                    due,
                    conception: shift(lmp, LMP_TO_CONCEPTION_DAYS)?,
                    lmp,
                }
            }
            MethodInput::DueDate { due } => {
                let lmp = shift(due, -FULL_GESTATION_DAYS)?;
                PregnancyDates {
                    due,
                    conception: shift(lmp, LMP_TO_CONCEPTION_DAYS)?,
                    lmp,
                }
            }
        };
        Ok(dates)
    }
}

/// Due date, conception date and LMP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PregnancyDates {
    pub due: NaiveDate,
    pub conception: NaiveDate,
    pub lmp: NaiveDate,
}

/// Week and day counts read off a scan report are whole numbers.
fn whole(field: &str, value: f64) -> CalcResult<i64> {
    if value.fract() != 0.0 {
        return Err(CalcError::invalid_input(field, value.to_string(), "Must be a whole number"));
    }
    Ok(value as i64)
}

fn shift(date: NaiveDate, days: i64) -> CalcResult<NaiveDate> {
    date.checked_add_signed(Duration::days(days))
        .ok_or_else(|| CalcError::invalid_date("date", date.to_string()))
}

/// Typed inputs for the due-date calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DueDateInput {
    pub method: MethodInput,
    /// Maternal age at conception, for the gender chart
    pub mother_age: Option<u32>,
    pub show_gender_prediction: bool,
    pub show_milestones: bool,
    pub show_baby_size: bool,
    pub show_chart: bool,
}

impl DueDateInput {
    pub fn from_input(input: &CalculatorInput, settings: &EngineSettings) -> CalcResult<Self> {
        let method = match input.choice_or("method", DueDateMethod::default(), DueDateMethod::parse)? {
            DueDateMethod::Lmp => MethodInput::Lmp {
                lmp: input.require_date("lmpDate")?,
                cycle_length: input
                    .number_in_range_or("cycleLength", settings.default_cycle_length as f64, 20.0, 45.0)?
                    .round() as i64,
                luteal_phase: input
                    .number_in_range_or("lutealPhase", settings.default_luteal_phase as f64, 9.0, 18.0)?
                    .round() as i64,
            },
            DueDateMethod::Conception => MethodInput::Conception {
                conception: input.require_date("conceptionDate")?,
            },
            DueDateMethod::Ivf => {
                let embryo_age = match input.number("embryoAge")? {
                    Some(days) => EmbryoAge::from_days(days).ok_or_else(|| {
                        CalcError::invalid_input("embryoAge", days.to_string(), "Embryo age must be 3, 5 or 6 days")
                    })?,
                    None => EmbryoAge::default(),
                };
                MethodInput::Ivf {
                    transfer: input.require_date("transferDate")?,
                    embryo_age,
                }
            }
            DueDateMethod::Ultrasound => {
                let weeks = whole("gestationalWeeks", input.require_in_range("gestationalWeeks", 0.0, MAX_WEEK as f64)?)?;
                let days = whole("gestationalDays", input.number_in_range_or("gestationalDays", 0.0, 0.0, 6.0)?)?;
                MethodInput::Ultrasound {
                    scan: input.require_date("ultrasoundDate")?,
                    gestational_days: weeks * 7 + days,
                }
            }
            DueDateMethod::DueDate => MethodInput::DueDate {
                due: input.require_date("dueDate")?,
            },
        };

        // Only feeds the gender chart, which clamps it to the chart's rows.
        let mother_age = match input.number("motherAge")? {
            Some(age) if age < 0.0 => {
                return Err(CalcError::invalid_input("motherAge", age.to_string(), "Must not be negative"));
            }
            other => other.map(|age| age.trunc() as u32),
        };

        Ok(DueDateInput {
            method,
            mother_age,
            show_gender_prediction: input.toggle_or("showGenderPrediction", false),
            show_milestones: input.toggle("showMilestones"),
            show_baby_size: input.toggle("showBabySize"),
            show_chart: input.toggle("showChart"),
        })
    }
}

/// Gestational progress on the reference date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestationalAge {
    /// Days since LMP; negative before LMP
    pub days: i64,
    pub trimester: Trimester,
    /// 0–100
    pub progress_percent: f64,
    /// 1–42
    pub current_week: u32,
}

impl GestationalAge {
    pub fn on(lmp: NaiveDate, today: NaiveDate) -> Self {
        let days = today.signed_duration_since(lmp).num_days();
        let progress = (days as f64 / FULL_GESTATION_DAYS as f64 * 100.0).round();
        GestationalAge {
            days,
            trimester: Trimester::from_gestational_days(days),
            progress_percent: progress.clamp(0.0, 100.0),
            current_week: (days.div_euclid(7) + 1).clamp(1, MAX_WEEK) as u32,
        }
    }

    /// Completed weeks; zero before LMP
    pub fn weeks(&self) -> i64 {
        self.days.max(0) / 7
    }

    /// Days past the last completed week; zero before LMP
    pub fn remainder_days(&self) -> i64 {
        self.days.max(0) % 7
    }
}

/// Numeric outcome of the due-date calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DueDateResult {
    pub method: DueDateMethod,
    pub dates: PregnancyDates,
    pub age: GestationalAge,
    pub days_until_due: i64,
    pub full_term: NaiveDate,
    pub gender_prediction: Option<GenderPrediction>,
}

pub fn compute(input: &DueDateInput, today: NaiveDate) -> CalcResult<DueDateResult> {
    let dates = input.method.dates()?;
    Ok(DueDateResult {
        method: input.method.method(),
        dates,
        age: GestationalAge::on(dates.lmp, today),
        days_until_due: dates.due.signed_duration_since(today).num_days(),
        full_term: shift(dates.lmp, FULL_TERM_WEEK * 7)?,
        gender_prediction: input
            .mother_age
            .map(|age| gestation::gender_prediction(age, dates.conception.month())),
    })
}

pub fn derive(input: &CalculatorInput, today: NaiveDate, settings: &EngineSettings) -> CalcResult<ResultBundle> {
    let parsed = DueDateInput::from_input(input, settings)?;
    let result = compute(&parsed, today)?;
    debug!(
        method = result.method.code(),
        due = %result.dates.due,
        gestational_days = result.age.days,
        "due date estimated"
    );
    assemble(&parsed, &result, input.translator(), settings)
}

fn assemble(
    parsed: &DueDateInput,
    r: &DueDateResult,
    t: &dyn Translator,
    settings: &EngineSettings,
) -> CalcResult<ResultBundle> {
    let f = Formatter::new(t, &settings.default_date_format);
    let due = r.dates.due;
    let (weeks, rem) = (r.age.weeks(), r.age.remainder_days());
    let size = gestation::baby_size(r.age.current_week);
    let sized = parsed.show_baby_size;
    let gender = r.gender_prediction;

    let mut b = ResultBuilder::new();
    b.metric("dueDate", due.to_string(), f.date(due))
        .metric("conceptionDate", r.dates.conception.to_string(), f.date(r.dates.conception))
        .metric("lmpDate", r.dates.lmp.to_string(), f.date(r.dates.lmp))
        .metric("method", r.method.code(), f.label(r.method.display_name()))
        .metric("gestationalAgeDays", r.age.days as f64, f.with_unit(r.age.days as f64, 0, "days"))
        .metric("gestationalWeeks", weeks as f64, f.with_unit(weeks as f64, 0, "weeks"))
        .metric("gestationalDaysRemainder", rem as f64, f.with_unit(rem as f64, 0, "days"))
        .metric("trimester", r.age.trimester.code(), f.label(r.age.trimester.display_name()))
        .metric("progressPercent", r.age.progress_percent, f.percent(r.age.progress_percent))
        .metric("currentWeek", r.age.current_week as f64, f.number(r.age.current_week as f64, 0))
        .metric("daysUntilDue", r.days_until_due as f64, f.with_unit(r.days_until_due as f64, 0, "days"))
        .metric("fullTermDate", r.full_term.to_string(), f.date(r.full_term))
        .metric_if(
            "babySize",
            size.map(|s| s.comparison),
            size.map(|s| f.label(s.comparison)).unwrap_or_default(),
            sized,
        )
        .metric_if(
            "babyLength",
            size.map(|s| s.length_cm),
            size.map(|s| f.with_unit(s.length_cm, 1, "cm")).unwrap_or_default(),
            sized,
        )
        .metric_if(
            "babyWeight",
            size.map(|s| s.weight_g),
            size.map(|s| f.with_unit(s.weight_g, 0, "g")).unwrap_or_default(),
            sized,
        )
        .metric_if(
            "babyHighlight",
            size.map(|s| s.highlight),
            size.map(|s| f.label(s.highlight)).unwrap_or_default(),
            sized,
        )
        .metric("zodiacSign", gestation::zodiac_sign(due), f.label(gestation::zodiac_sign(due)))
        .metric("season", gestation::season(due.month()), f.label(gestation::season(due.month())))
        .metric(
            "birthstone",
            gestation::birthstone(due.month()),
            f.label(gestation::birthstone(due.month())),
        )
        .metric_if(
            "genderPrediction",
            gender.map(|g| g.code()),
            gender.map(|g| f.label(g.display_name())).unwrap_or_default(),
            parsed.show_gender_prediction,
        );

    if parsed.show_milestones {
        let rows = MILESTONES
            .iter()
            .map(|m| {
                let date = shift(r.dates.lmp, m.week as i64 * 7)?;
                Ok(TableRow::Milestone(MilestoneRow {
                    week: m.week,
                    date: f.date(date),
                    milestone: f.label(m.title),
                    description: f.label(m.description),
                }))
            })
            .collect::<CalcResult<Vec<_>>>()?;
        b.table(rows);
    }

    if parsed.show_chart {
        let points = TRIMESTER_SPANS
            .iter()
            .map(|(trimester, start, end)| {
                let done = (r.age.days - start).clamp(0, end - start);
                ChartSeriesPoint::new(f.label(trimester.display_name()), done as f64)
            })
            .collect();
        b.chart(points);
    }

    let summary = if r.age.trimester == Trimester::NotPregnant {
        fill_template(
            &t.template("dueDateSummaryNotPregnant", DEFAULT_SUMMARY_NOT_PREGNANT),
            &[("dueDate", f.date(due)), ("lmpDate", f.date(r.dates.lmp))],
        )
    } else {
        fill_template(
            &t.template("dueDateSummary", DEFAULT_SUMMARY),
            &[
                ("dueDate", f.date(due)),
                ("weeks", weeks.to_string()),
                ("days", rem.to_string()),
                ("trimester", f.label(r.age.trimester.display_name()).to_lowercase()),
                ("progress", f.percent(round_to(r.age.progress_percent, 0))),
                ("daysUntilDue", r.days_until_due.to_string()),
            ],
        )
    };
    Ok(b.build(summary))
}

/// Due-date calculator with default settings.
pub fn calculate(input: &CalculatorInput, today: NaiveDate) -> ResultBundle {
    calculate_with_settings(input, today, &EngineSettings::default())
}

pub fn calculate_with_settings(input: &CalculatorInput, today: NaiveDate, settings: &EngineSettings) -> ResultBundle {
    derive(input, today, settings).unwrap_or_else(|err| {
        debug!(error = %err, code = err.error_code(), "due date input rejected");
        ResultBundle::invalid()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn lmp_input() -> CalculatorInput {
        CalculatorInput::new()
            .with("method", "lmp")
            .with("lmpDate", "2026-01-01")
    }

    #[test]
    fn test_lmp_method() {
        let result = calculate(&lmp_input(), d(2026, 4, 1));
        assert!(result.is_valid);
        assert_eq!(result.text("dueDate"), Some("2026-10-08"));
        assert_eq!(result.text("conceptionDate"), Some("2026-01-15"));
        assert_eq!(result.text("lmpDate"), Some("2026-01-01"));
        assert_eq!(result.display("dueDate"), "October 8, 2026");
        assert_eq!(result.number("gestationalAgeDays"), Some(90.0));
        assert_eq!(result.number("gestationalWeeks"), Some(12.0));
        assert_eq!(result.number("gestationalDaysRemainder"), Some(6.0));
        assert_eq!(result.text("trimester"), Some("first"));
        assert_eq!(result.number("progressPercent"), Some(32.0));
        assert_eq!(result.number("currentWeek"), Some(13.0));
        assert_eq!(result.number("daysUntilDue"), Some(190.0));
        assert_eq!(result.text("fullTermDate"), Some("2026-09-17"));
        assert_eq!(result.text("babySize"), Some("Lemon"));
        assert_eq!(result.text("zodiacSign"), Some("Libra"));
        assert_eq!(result.text("season"), Some("Autumn"));
        assert_eq!(result.text("birthstone"), Some("Opal"));
        assert!(result.value("genderPrediction").unwrap().is_null());
        assert_eq!(
            result.summary,
            "Estimated due date: October 8, 2026. You are 12 weeks and 6 days pregnant (first trimester)."
        );
    }

    #[test]
    fn test_long_cycle_shifts_ovulation() {
        let input = lmp_input().with("cycleLength", 35.0);
        let result = calculate(&input, d(2026, 4, 1));
        assert_eq!(result.text("conceptionDate"), Some("2026-01-22"));
        assert_eq!(result.text("dueDate"), Some("2026-10-15"));
    }

    #[test]
    fn test_ivf_day5() {
        let input = CalculatorInput::new()
            .with("method", "ivf")
            .with("transferDate", "2026-02-10")
            .with("embryoAge", 5.0);
        let result = calculate(&input, d(2026, 3, 1));
        assert_eq!(result.text("dueDate"), Some("2026-10-29"));
        assert_eq!(result.text("conceptionDate"), Some("2026-02-05"));
        assert_eq!(result.text("lmpDate"), Some("2026-01-22"));
    }

    #[test]
    fn test_conception_method() {
        let input = CalculatorInput::new()
            .with("method", "conception")
            .with("conceptionDate", "2026-01-15");
        let result = calculate(&input, d(2026, 4, 1));
        assert_eq!(result.text("dueDate"), Some("2026-10-08"));
        assert_eq!(result.text("lmpDate"), Some("2026-01-01"));
    }

    #[test]
    fn test_ultrasound_method() {
        let input = CalculatorInput::new()
            .with("method", "ultrasound")
            .with("ultrasoundDate", "2026-03-26")
            .with("gestationalWeeks", 12.0)
            .with("gestationalDays", 0.0);
        let result = calculate(&input, d(2026, 3, 26));
        // 2026-03-26 is 84 days after 2026-01-01
        assert_eq!(result.text("lmpDate"), Some("2026-01-01"));
        assert_eq!(result.text("dueDate"), Some("2026-10-08"));
        assert_eq!(result.number("gestationalWeeks"), Some(12.0));
    }

    #[test]
    fn test_known_due_date_reverse() {
        let input = CalculatorInput::new()
            .with("method", "dueDate")
            .with("dueDate", "2026-10-08T00:00:00.000Z");
        let result = calculate(&input, d(2026, 4, 1));
        assert_eq!(result.text("lmpDate"), Some("2026-01-01"));
        assert_eq!(result.text("conceptionDate"), Some("2026-01-15"));
    }

    #[test]
    fn test_trimester_boundaries() {
        let lmp = d(2026, 1, 1);
        let cases = [
            (13 * 7, "second"),
            (27 * 7, "third"),
            (42 * 7, "postTerm"),
        ];
        for (days, expected) in cases {
            let today = lmp + Duration::days(days);
            let result = calculate(&lmp_input(), today);
            assert_eq!(result.text("trimester"), Some(expected), "day {}", days);
        }
    }

    #[test]
    fn test_before_lmp_is_not_pregnant() {
        let result = calculate(&lmp_input(), d(2025, 12, 20));
        assert!(result.is_valid);
        assert_eq!(result.text("trimester"), Some("notPregnant"));
        assert_eq!(result.number("gestationalAgeDays"), Some(-12.0));
        assert_eq!(result.number("progressPercent"), Some(0.0));
        assert_eq!(result.number("currentWeek"), Some(1.0));
        assert!(result.value("babySize").unwrap().is_null());
        assert_eq!(result.display("babySize"), "");
        assert_eq!(result.chart_data().iter().map(|p| p.value).sum::<f64>(), 0.0);
        assert!(result.summary.contains("starts on January 1, 2026"));
    }

    #[test]
    fn test_milestones_and_chart() {
        let result = calculate(&lmp_input(), d(2026, 4, 1));
        let rows = result.table_data();
        assert_eq!(rows.len(), 16);
        match &rows[0] {
            TableRow::Milestone(row) => {
                assert_eq!(row.week, 4);
                assert_eq!(row.date, "January 29, 2026");
            }
            other => panic!("unexpected row {:?}", other),
        }
        let chart = result.chart_data();
        assert_eq!(chart.len(), 3);
        assert_eq!(chart[0].value, 90.0);
        assert_eq!(chart[1].value, 0.0);
    }

    #[test]
    fn test_gender_prediction_requires_age_and_toggle() {
        let input = lmp_input().with("motherAge", 30.0);
        let hidden = calculate(&input, d(2026, 4, 1));
        // Conceived in January at 30
        assert_eq!(hidden.text("genderPrediction"), Some("boy"));
        assert_eq!(hidden.display("genderPrediction"), "");

        let shown = calculate(&input.with("showGenderPrediction", true), d(2026, 4, 1));
        assert_eq!(shown.display("genderPrediction"), "Boy");
    }

    #[test]
    fn test_mother_age_outside_chart_is_clamped() {
        let today = d(2026, 4, 1);
        let predict = |age: f64| {
            let result = calculate(&lmp_input().with("motherAge", age), today);
            assert!(result.is_valid, "age {}", age);
            result.text("genderPrediction").map(str::to_string)
        };
        assert_eq!(predict(70.0), predict(45.0));
        assert_eq!(predict(12.0), predict(18.0));
        assert!(predict(70.0).is_some());

        let negative = lmp_input().with("motherAge", -3.0);
        assert_eq!(
            derive(&negative, today, &EngineSettings::default()).unwrap_err().field(),
            Some("motherAge")
        );
    }

    #[test]
    fn test_fractional_scan_age_rejected() {
        let today = d(2026, 4, 1);
        let settings = EngineSettings::default();
        let scan = CalculatorInput::new()
            .with("method", "ultrasound")
            .with("ultrasoundDate", "2026-03-26");

        let weeks = scan.clone().with("gestationalWeeks", 12.7);
        let err = derive(&weeks, today, &settings).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert_eq!(err.field(), Some("gestationalWeeks"));

        let days = scan.with("gestationalWeeks", 12.0).with("gestationalDays", 2.5);
        assert_eq!(derive(&days, today, &settings).unwrap_err().field(), Some("gestationalDays"));
    }

    #[test]
    fn test_settings_cycle_defaults_are_range_checked() {
        let today = d(2026, 4, 1);
        let short_cycle = EngineSettings {
            default_cycle_length: 10,
            ..EngineSettings::default()
        };
        let err = derive(&lmp_input(), today, &short_cycle).unwrap_err();
        assert_eq!(err.error_code(), "OUT_OF_RANGE");
        assert_eq!(err.field(), Some("cycleLength"));
        assert!(!calculate_with_settings(&lmp_input(), today, &short_cycle).is_valid);

        // An explicit value still overrides a bad default
        let explicit = lmp_input().with("cycleLength", 28.0);
        assert!(calculate_with_settings(&explicit, today, &short_cycle).is_valid);
    }

    #[test]
    fn test_rejected_inputs() {
        let today = d(2026, 4, 1);
        let settings = EngineSettings::default();

        let feb30 = CalculatorInput::new().with("lmpDate", "2026-02-30");
        assert_eq!(calculate(&feb30, today), ResultBundle::invalid());
        assert_eq!(derive(&feb30, today, &settings).unwrap_err().error_code(), "INVALID_DATE");

        let no_weeks = CalculatorInput::new()
            .with("method", "ultrasound")
            .with("ultrasoundDate", "2026-03-26");
        assert_eq!(
            derive(&no_weeks, today, &settings).unwrap_err(),
            CalcError::missing_field("gestationalWeeks")
        );

        let bad_cycle = lmp_input().with("cycleLength", 60.0);
        assert_eq!(derive(&bad_cycle, today, &settings).unwrap_err().error_code(), "OUT_OF_RANGE");

        let bad_embryo = CalculatorInput::new()
            .with("method", "ivf")
            .with("transferDate", "2026-02-10")
            .with("embryoAge", 4.0);
        assert_eq!(derive(&bad_embryo, today, &settings).unwrap_err().field(), Some("embryoAge"));

        let missing = CalculatorInput::new().with("method", "conception");
        assert_eq!(
            derive(&missing, today, &settings).unwrap_err(),
            CalcError::missing_field("conceptionDate")
        );
    }
}
