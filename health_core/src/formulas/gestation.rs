//! # Gestation Tables
//!
//! Constants and calendar lookups for the due-date calculator.
//!
//! Gestational age is counted from the last menstrual period (LMP), not from
//! conception. A full term is 280 days (40 weeks); conception is assumed
//! 14 days after LMP, leaving 266 days from conception to due date.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Full gestation from LMP (days)
pub const FULL_GESTATION_DAYS: i64 = 280;
/// Assumed LMP-to-conception interval (days)
pub const LMP_TO_CONCEPTION_DAYS: i64 = 14;
/// Conception to due date (days)
pub const CONCEPTION_TO_DUE_DAYS: i64 = FULL_GESTATION_DAYS - LMP_TO_CONCEPTION_DAYS;
/// Start of full term (weeks from LMP)
pub const FULL_TERM_WEEK: i64 = 37;
/// Last week with a table entry
pub const MAX_WEEK: i64 = 42;

/// Pregnancy stage derived from gestational age
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Trimester {
    NotPregnant,
    First,
    Second,
    Third,
    PostTerm,
}

impl Trimester {
    /// Classify a gestational age in days.
    ///
    /// Completed weeks < 13 → first, < 27 → second, < 42 → third (the
    /// current week is still ≤ 42), anything later is post-term.
    pub fn from_gestational_days(days: i64) -> Self {
        if days < 0 {
            return Trimester::NotPregnant;
        }
        match days / 7 {
            w if w < 13 => Trimester::First,
            w if w < 27 => Trimester::Second,
            w if w < MAX_WEEK => Trimester::Third,
            _ => Trimester::PostTerm,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Trimester::NotPregnant => "notPregnant",
            Trimester::First => "first",
            Trimester::Second => "second",
            Trimester::Third => "third",
            Trimester::PostTerm => "postTerm",
        }
    }

    /// Label key
    pub fn display_name(&self) -> &'static str {
        match self {
            Trimester::NotPregnant => "Not yet pregnant",
            Trimester::First => "First trimester",
            Trimester::Second => "Second trimester",
            Trimester::Third => "Third trimester",
            Trimester::PostTerm => "Post-term",
        }
    }
}

impl std::fmt::Display for Trimester {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Day ranges `[start, end)` of each trimester, for the progress chart
pub const TRIMESTER_SPANS: [(Trimester, i64, i64); 3] = [
    (Trimester::First, 0, 13 * 7),
    (Trimester::Second, 13 * 7, 27 * 7),
    (Trimester::Third, 27 * 7, FULL_GESTATION_DAYS),
];

/// Embryo age at IVF transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum EmbryoAge {
    Day3,
    #[default]
    Day5,
    Day6,
}

impl EmbryoAge {
    pub fn from_days(days: f64) -> Option<Self> {
        match days {
            d if d == 3.0 => Some(EmbryoAge::Day3),
            d if d == 5.0 => Some(EmbryoAge::Day5),
            d if d == 6.0 => Some(EmbryoAge::Day6),
            _ => None,
        }
    }

    pub fn days(&self) -> i64 {
        match self {
            EmbryoAge::Day3 => 3,
            EmbryoAge::Day5 => 5,
            EmbryoAge::Day6 => 6,
        }
    }
}

/// Baby size comparison for one gestational week
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BabySize {
    pub week: u32,
    pub comparison: &'static str,
    pub length_cm: f64,
    pub weight_g: f64,
    pub highlight: &'static str,
}

const fn size(week: u32, comparison: &'static str, length_cm: f64, weight_g: f64, highlight: &'static str) -> BabySize {
    BabySize {
        week,
        comparison,
        length_cm,
        weight_g,
        highlight,
    }
}

/// Weeks 4 through 42. Lengths are crown-rump until week 19, crown-heel after.
const BABY_SIZE_TABLE: [BabySize; 39] = [
    size(4, "Poppy seed", 0.1, 0.0, "The embryo implants and the placenta starts to form."),
    size(5, "Sesame seed", 0.2, 0.0, "The neural tube, future brain and spine, begins to close."),
    size(6, "Lentil", 0.6, 0.0, "A heartbeat can often be seen on ultrasound."),
    size(7, "Blueberry", 1.3, 1.0, "Arm and leg buds appear."),
    size(8, "Raspberry", 1.6, 1.0, "Fingers and toes start to form."),
    size(9, "Cherry", 2.3, 2.0, "All essential organs have begun to develop."),
    size(10, "Strawberry", 3.1, 4.0, "The embryo is now officially a fetus."),
    size(11, "Fig", 4.1, 7.0, "Bones begin to harden."),
    size(12, "Lime", 5.4, 14.0, "Reflexes develop; fingers open and close."),
    size(13, "Lemon", 7.4, 23.0, "Vocal cords form and fingerprints appear."),
    size(14, "Peach", 8.7, 43.0, "Baby can squint, frown and grimace."),
    size(15, "Apple", 10.1, 70.0, "Baby senses light through closed eyelids."),
    size(16, "Avocado", 11.6, 100.0, "The heart pumps about 25 quarts of blood a day."),
    size(17, "Pear", 13.0, 140.0, "Fat stores begin to develop under the skin."),
    size(18, "Bell pepper", 14.2, 190.0, "Ears move into position and baby may hear sounds."),
    size(19, "Mango", 15.3, 240.0, "A protective coating called vernix covers the skin."),
    size(20, "Banana", 25.6, 300.0, "Halfway there; movements are often felt now."),
    size(21, "Carrot", 26.7, 360.0, "Baby swallows amniotic fluid and practises digestion."),
    size(22, "Papaya", 27.8, 430.0, "Eyebrows and eyelids are fully formed."),
    size(23, "Grapefruit", 28.9, 501.0, "Rapid eye movements begin."),
    size(24, "Cantaloupe", 30.0, 600.0, "The lungs develop branches and surfactant cells."),
    size(25, "Cauliflower", 34.6, 660.0, "Baby responds to familiar voices."),
    size(26, "Lettuce", 35.6, 760.0, "The eyes begin to open."),
    size(27, "Cabbage", 36.6, 875.0, "Sleep and wake cycles become regular."),
    size(28, "Eggplant", 37.6, 1005.0, "Baby can blink and may dream."),
    size(29, "Butternut squash", 38.6, 1153.0, "Muscles and lungs keep maturing."),
    size(30, "Cucumber", 39.9, 1319.0, "The brain grows rapidly."),
    size(31, "Coconut", 41.1, 1502.0, "Baby can turn the head from side to side."),
    size(32, "Jicama", 42.4, 1702.0, "Toenails and fingernails are visible."),
    size(33, "Pineapple", 43.7, 1918.0, "Bones harden, except the skull."),
    size(34, "Cantaloupe melon", 45.0, 2146.0, "The central nervous system is maturing."),
    size(35, "Honeydew melon", 46.2, 2383.0, "Kidneys are fully developed."),
    size(36, "Romaine lettuce", 47.4, 2622.0, "Baby may drop lower into the pelvis."),
    size(37, "Swiss chard", 48.6, 2859.0, "Early term: baby practises breathing movements."),
    size(38, "Leek", 49.8, 3083.0, "Organs are ready for life outside the womb."),
    size(39, "Mini watermelon", 50.7, 3288.0, "Full term: the brain is still developing quickly."),
    size(40, "Small pumpkin", 51.2, 3462.0, "Due week: baby is ready to meet you."),
    size(41, "Watermelon", 51.5, 3597.0, "Late term: your provider will monitor closely."),
    size(42, "Jackfruit", 51.7, 3685.0, "Post-term: induction is usually discussed."),
];

static BABY_SIZES: Lazy<BTreeMap<u32, BabySize>> =
    Lazy::new(|| BABY_SIZE_TABLE.iter().map(|entry| (entry.week, *entry)).collect());

/// Size comparison for a gestational week (4–42)
pub fn baby_size(week: u32) -> Option<&'static BabySize> {
    BABY_SIZES.get(&week)
}

/// Number of weeks covered by the size table
pub fn baby_size_weeks() -> usize {
    BABY_SIZES.len()
}

/// Zodiac sign start dates `(month, day, sign)`, in calendar order
const ZODIAC_STARTS: [(u32, u32, &str); 12] = [
    (1, 20, "Aquarius"),
    (2, 19, "Pisces"),
    (3, 21, "Aries"),
    (4, 20, "Taurus"),
    (5, 21, "Gemini"),
    (6, 21, "Cancer"),
    (7, 23, "Leo"),
    (8, 23, "Virgo"),
    (9, 23, "Libra"),
    (10, 23, "Scorpio"),
    (11, 22, "Sagittarius"),
    (12, 22, "Capricorn"),
];

/// Western zodiac sign for a date
pub fn zodiac_sign(date: NaiveDate) -> &'static str {
    let key = (date.month(), date.day());
    ZODIAC_STARTS
        .iter()
        .rev()
        .find(|(month, day, _)| key >= (*month, *day))
        .map(|(_, _, sign)| *sign)
        // Before Jan 20 the sign started in the previous December
        .unwrap_or("Capricorn")
}

/// Meteorological season (northern hemisphere) for a month
pub fn season(month: u32) -> &'static str {
    match month {
        3..=5 => "Spring",
        6..=8 => "Summer",
        9..=11 => "Autumn",
        _ => "Winter",
    }
}

const BIRTHSTONES: [&str; 12] = [
    "Garnet",
    "Amethyst",
    "Aquamarine",
    "Diamond",
    "Emerald",
    "Pearl",
    "Ruby",
    "Peridot",
    "Sapphire",
    "Opal",
    "Topaz",
    "Turquoise",
];

/// Birthstone for a 1-based month
pub fn birthstone(month: u32) -> &'static str {
    BIRTHSTONES[(month.clamp(1, 12) - 1) as usize]
}

/// Outcome of the gender chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenderPrediction {
    Boy,
    Girl,
}

impl GenderPrediction {
    pub fn code(&self) -> &'static str {
        match self {
            GenderPrediction::Boy => "boy",
            GenderPrediction::Girl => "girl",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            GenderPrediction::Boy => "Boy",
            GenderPrediction::Girl => "Girl",
        }
    }
}

pub const CHART_MIN_AGE: u32 = 18;
pub const CHART_MAX_AGE: u32 = 45;

/// Traditional "Chinese gender chart": rows are maternal age 18–45, columns
/// conception month Jan–Dec. This is folklore with roughly coin-flip
/// accuracy and is shown for entertainment only.
const GENDER_CHART: [&[u8; 12]; 28] = [
    b"GBGBBBBBBBBB", // 18
    b"BGBGGBBBBBGG", // 19
    b"GBGBBBBBBGBB", // 20
    b"BGGGGGGGGGGG", // 21
    b"GBBGBGGBGGGG", // 22
    b"BBBGBBGGGBBG", // 23
    b"BGBBGBBGGGGG", // 24
    b"GBBGGBGBBBBB", // 25
    b"BGBGGBGBGGGG", // 26
    b"GBGBGGBBBBGB", // 27
    b"BGBGGGBBBBGG", // 28
    b"GBGGBBBBBGGG", // 29
    b"BGGGGGGGGGBB", // 30
    b"BGBGGGGGGGGB", // 31
    b"BGBGGGGGGGGB", // 32
    b"GBGBGGGBGGGB", // 33
    b"BGBGGGGGGGBB", // 34
    b"BBGBGGGBGGBB", // 35
    b"BGBBBGBGBGGG", // 36
    b"GBGGBGBBGBGB", // 37
    b"BGBBGBGBGBGB", // 38
    b"GBBGBGBGBGBG", // 39
    b"BGBGBGBGBGBG", // 40
    b"GBGBGBGBGBGB", // 41
    b"BGBGBGBGBGBG", // 42
    b"GBGBGBGBGBBB", // 43
    b"BBGBBBGBGBGG", // 44
    b"GBBGGGBGBGBB", // 45
];

/// Look up the chart. Age is clamped to 18–45 and month to 1–12.
pub fn gender_prediction(mother_age: u32, conception_month: u32) -> GenderPrediction {
    let row = (mother_age.clamp(CHART_MIN_AGE, CHART_MAX_AGE) - CHART_MIN_AGE) as usize;
    let col = (conception_month.clamp(1, 12) - 1) as usize;
    match GENDER_CHART[row][col] {
        b'B' => GenderPrediction::Boy,
        _ => GenderPrediction::Girl,
    }
}

/// A fixed point on the prenatal timeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Milestone {
    /// Weeks after LMP
    pub week: u32,
    pub title: &'static str,
    pub description: &'static str,
}

const fn milestone(week: u32, title: &'static str, description: &'static str) -> Milestone {
    Milestone {
        week,
        title,
        description,
    }
}

pub const MILESTONES: [Milestone; 16] = [
    milestone(4, "Positive pregnancy test", "Home tests can usually detect hCG around the time of a missed period."),
    milestone(6, "Heartbeat detectable", "A transvaginal ultrasound may show cardiac activity."),
    milestone(8, "First prenatal visit", "Blood work, dating scan and health history with your provider."),
    milestone(10, "Genetic screening window", "Cell-free DNA screening can be done from about week 10."),
    milestone(12, "Nuchal translucency scan", "First-trimester screening ultrasound between weeks 11 and 14."),
    milestone(13, "Second trimester begins", "Nausea often eases and energy returns."),
    milestone(16, "First movements possible", "Some people feel early flutters (quickening) from weeks 16 to 20."),
    milestone(20, "Anatomy scan", "Detailed ultrasound of baby's organs and growth."),
    milestone(24, "Viability milestone", "Babies born from this week have a chance of survival with intensive care."),
    milestone(26, "Glucose screening", "Gestational diabetes test is done between weeks 24 and 28."),
    milestone(28, "Third-trimester checkups", "Visits become more frequent; Tdap vaccine is recommended."),
    milestone(32, "Growth check", "Provider checks baby's position and growth."),
    milestone(36, "Group B strep test", "Routine swab between weeks 36 and 37; pack your hospital bag."),
    milestone(37, "Early term", "Baby is considered early term."),
    milestone(40, "Due date", "Only a small share of babies arrive exactly on the due date."),
    milestone(42, "Post-term", "Induction is typically recommended by this point."),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_constants() {
        assert_eq!(FULL_GESTATION_DAYS, 280);
        assert_eq!(CONCEPTION_TO_DUE_DAYS, 266);
    }

    #[test]
    fn test_trimester_boundaries() {
        assert_eq!(Trimester::from_gestational_days(-1), Trimester::NotPregnant);
        assert_eq!(Trimester::from_gestational_days(0), Trimester::First);
        assert_eq!(Trimester::from_gestational_days(13 * 7 - 1), Trimester::First);
        assert_eq!(Trimester::from_gestational_days(13 * 7), Trimester::Second);
        assert_eq!(Trimester::from_gestational_days(27 * 7 - 1), Trimester::Second);
        assert_eq!(Trimester::from_gestational_days(27 * 7), Trimester::Third);
        assert_eq!(Trimester::from_gestational_days(42 * 7 - 1), Trimester::Third);
        assert_eq!(Trimester::from_gestational_days(42 * 7), Trimester::PostTerm);
    }

    #[test]
    fn test_baby_size_table_complete() {
        assert_eq!(baby_size_weeks(), 39);
        for week in 4..=42 {
            let entry = baby_size(week).unwrap();
            assert_eq!(entry.week, week);
        }
        assert!(baby_size(3).is_none());
        assert!(baby_size(43).is_none());
        assert_eq!(baby_size(20).unwrap().comparison, "Banana");
    }

    #[test]
    fn test_baby_weight_non_decreasing() {
        let weights: Vec<f64> = BABY_SIZE_TABLE.iter().map(|s| s.weight_g).collect();
        assert!(weights.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_zodiac() {
        assert_eq!(zodiac_sign(d(2026, 10, 8)), "Libra");
        assert_eq!(zodiac_sign(d(2026, 10, 29)), "Scorpio");
        assert_eq!(zodiac_sign(d(2026, 1, 5)), "Capricorn");
        assert_eq!(zodiac_sign(d(2026, 12, 25)), "Capricorn");
        assert_eq!(zodiac_sign(d(2026, 1, 20)), "Aquarius");
        assert_eq!(zodiac_sign(d(2026, 3, 20)), "Pisces");
    }

    #[test]
    fn test_season_and_birthstone() {
        assert_eq!(season(10), "Autumn");
        assert_eq!(season(12), "Winter");
        assert_eq!(season(1), "Winter");
        assert_eq!(season(4), "Spring");
        assert_eq!(season(7), "Summer");
        assert_eq!(birthstone(10), "Opal");
        assert_eq!(birthstone(1), "Garnet");
        assert_eq!(birthstone(12), "Turquoise");
    }

    #[test]
    fn test_gender_chart_shape_and_clamping() {
        assert!(GENDER_CHART
            .iter()
            .all(|row| row.iter().all(|c| *c == b'B' || *c == b'G')));
        assert_eq!(gender_prediction(18, 1), GenderPrediction::Girl);
        assert_eq!(gender_prediction(18, 2), GenderPrediction::Boy);
        assert_eq!(gender_prediction(16, 2), gender_prediction(18, 2));
        assert_eq!(gender_prediction(50, 1), gender_prediction(45, 1));
        assert_eq!(gender_prediction(30, 0), gender_prediction(30, 1));
        assert_eq!(gender_prediction(30, 13), gender_prediction(30, 12));
    }

    #[test]
    fn test_milestones() {
        assert_eq!(MILESTONES.len(), 16);
        assert!(MILESTONES.windows(2).all(|w| w[0].week < w[1].week));
        assert_eq!(MILESTONES.last().unwrap().week, 42);
    }

    #[test]
    fn test_embryo_age() {
        assert_eq!(EmbryoAge::from_days(5.0), Some(EmbryoAge::Day5));
        assert_eq!(EmbryoAge::from_days(4.0), None);
        assert_eq!(EmbryoAge::Day6.days(), 6);
    }
}
