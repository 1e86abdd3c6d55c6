use chrono::Weekday;
use itertools::Itertools;
use phf::phf_map;
use serde_with::DeserializeFromStr;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, ErrorKind};

/// Static text of a month view for one language.
#[derive(Debug, PartialEq)]
pub struct Labels {
    pub year_marker: &'static str,
    pub month_names: [&'static str; 12],
    pub month_marker: &'static str,
    /// Starting with Sunday
    pub weekdays: [&'static str; 7],
}

static EN: Labels = Labels {
    year_marker: "",
    month_names: [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ],
    month_marker: "",
    weekdays: ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
};

static ZH: Labels = Labels {
    year_marker: "年",
    month_names: [
        "一", "二", "三", "四", "五", "六", "七", "八", "九", "十", "十一", "十二",
    ],
    month_marker: "月",
    weekdays: ["日", "一", "二", "三", "四", "五", "六"],
};

static LOCALES: phf::Map<&'static str, &'static Labels> = phf_map! {
    "en" => &EN,
    "zh" => &ZH,
};

impl Labels {
    pub fn month_name(&self, month0: u32) -> &'static str {
        self.month_names[month0 as usize % 12]
    }

    /// Header of a month view, e.g. `2024 February` or `2024 年 二 月`.
    pub fn month_label(&self, year: i32, month0: u32) -> String {
        let year = year.to_string();
        [
            year.as_str(),
            self.year_marker,
            self.month_name(month0),
            self.month_marker,
        ]
        .iter()
        .filter(|part| !part.is_empty())
        .join(" ")
    }

    pub fn weekday(&self, day: Weekday) -> &'static str {
        self.weekdays[day.num_days_from_sunday() as usize]
    }

    pub fn weekday_header(&self, week_start: Weekday) -> impl Iterator<Item = &'static str> + '_ {
        std::iter::successors(Some(week_start), |day| Some(day.succ()))
            .take(7)
            .map(move |day| self.weekday(day))
    }
}

#[derive(Clone, Copy, DeserializeFromStr)]
pub struct Locale {
    code: &'static str,
    labels: &'static Labels,
}

impl Locale {
    pub fn code(&self) -> &'static str {
        self.code
    }

    pub fn labels(&self) -> &'static Labels {
        self.labels
    }

    pub fn available() -> impl Iterator<Item = &'static str> {
        LOCALES.keys().copied()
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale {
            code: "en",
            labels: &EN,
        }
    }
}

impl FromStr for Locale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LOCALES
            .get_entry(s.to_lowercase().as_str())
            .map(|(&code, &labels)| Locale { code, labels })
            .ok_or_else(|| Error::new(ErrorKind::UnknownLocale, &format!("'{}'", s)))
    }
}

impl fmt::Debug for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Locale({})", self.code)
    }
}

impl PartialEq for Locale {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_labels() {
        let en: Locale = "en".parse().unwrap();
        assert_eq!(en.labels().month_label(2024, 1), "2024 February");

        let zh: Locale = "zh".parse().unwrap();
        assert_eq!(zh.labels().month_label(2024, 1), "2024 年 二 月");
        assert_eq!(zh.labels().month_label(1999, 11), "1999 年 十二 月");
    }

    #[test]
    fn weekday_header_rotates_to_week_start() {
        let labels = Locale::default().labels();
        let sunday: Vec<_> = labels.weekday_header(Weekday::Sun).collect();
        assert_eq!(sunday, ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]);

        let monday: Vec<_> = labels.weekday_header(Weekday::Mon).collect();
        assert_eq!(monday, ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]);
    }

    #[test]
    fn unknown_locale_is_rejected() {
        let err = "fr".parse::<Locale>().unwrap_err();
        assert!(matches!(err.kind, ErrorKind::UnknownLocale));
        assert_eq!("ZH".parse::<Locale>().unwrap().code(), "zh");
    }

    #[test]
    fn all_locales_are_listed() {
        let mut codes: Vec<_> = Locale::available().collect();
        codes.sort_unstable();
        assert_eq!(codes, ["en", "zh"]);
    }
}
