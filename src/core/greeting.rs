use chrono::{NaiveDateTime, Timelike};
use std::fmt::Display;

/// Time-of-day greeting shown at the top of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Greeting {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl Greeting {
    pub fn for_hour(hour: u32) -> Self {
        match hour {
            6..=11 => Greeting::Morning,
            12..=17 => Greeting::Afternoon,
            18..=21 => Greeting::Evening,
            _ => Greeting::Night,
        }
    }

    pub fn at(time: &NaiveDateTime) -> Self {
        Self::for_hour(time.hour())
    }
}

impl Display for Greeting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Greeting::Morning => "Доброе утро",
                Greeting::Afternoon => "Добрый день",
                Greeting::Evening => "Добрый вечер",
                Greeting::Night => "Доброй ночи",
            }
        )
    }
}
