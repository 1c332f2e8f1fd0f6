use crate::dates::DAYS_IN_WEEK;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use time::Month;

/// The day of the week shown in the first column of the day grid
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum WeekStart {
    Sunday,
    Monday,
}

/// Display strings and layout conventions for one locale
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LocaleTable {
    /// Language code accepted by [`Locale::from_str`]
    pub code: &'static str,
    /// Month names, January first
    pub month_names: [&'static str; 12],
    /// Weekday abbreviations in column order
    pub weekday_labels: [&'static str; DAYS_IN_WEEK],
    pub week_start: WeekStart,
}

static ENGLISH: LocaleTable = LocaleTable {
    code: "en",
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
    weekday_labels: ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"],
    week_start: WeekStart::Sunday,
};

static RUSSIAN: LocaleTable = LocaleTable {
    code: "ru",
    month_names: [
        "Январь",
        "Февраль",
        "Март",
        "Апрель",
        "Май",
        "Июнь",
        "Июль",
        "Август",
        "Сентябрь",
        "Октябрь",
        "Ноябрь",
        "Декабрь",
    ],
    weekday_labels: ["Пн", "Вт", "Ср", "Чт", "Пт", "Сб", "Вс"],
    week_start: WeekStart::Monday,
};

/// The language of all labels in a calendar, together with its weekday
/// ordering
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Locale {
    /// English names, weeks starting on Sunday
    #[default]
    English,
    /// Russian names, weeks starting on Monday
    Russian,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::English, Locale::Russian];

    pub fn table(self) -> &'static LocaleTable {
        match self {
            Locale::English => &ENGLISH,
            Locale::Russian => &RUSSIAN,
        }
    }

    /// Looks up a locale by its position in [`Locale::ALL`]
    pub fn from_index(index: usize) -> Option<Locale> {
        Locale::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        match self {
            Locale::English => 0,
            Locale::Russian => 1,
        }
    }

    /// Returns the locale for a language code, falling back to English for
    /// anything unrecognized
    pub fn from_language(code: &str) -> Locale {
        code.parse().unwrap_or_default()
    }

    pub fn code(self) -> &'static str {
        self.table().code
    }

    pub fn month_name(self, month: Month) -> &'static str {
        self.table().month_names[usize::from(u8::from(month)) - 1]
    }

    pub fn weekday_labels(self) -> [&'static str; DAYS_IN_WEEK] {
        self.table().weekday_labels
    }

    pub fn week_start(self) -> WeekStart {
        self.table().week_start
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Locale {
    type Err = UnknownLocaleError;

    fn from_str(s: &str) -> Result<Locale, UnknownLocaleError> {
        Locale::ALL
            .into_iter()
            .find(|loc| loc.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownLocaleError(s.to_owned()))
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("unknown locale {0:?}; expected one of \"en\", \"ru\"")]
pub struct UnknownLocaleError(pub String);
