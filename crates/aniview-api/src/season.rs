//! AniList's quarter buckets and how "this season" / "next season" are
//! derived from a date.

use chrono::{Datelike, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl Season {
    /// The season a month (1..=12) falls in.  December counts as winter.
    pub fn for_month(month: u32) -> Self {
        match month {
            12 | 1 | 2 => Season::Winter,
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            _ => Season::Fall,
        }
    }

    pub fn as_graphql(&self) -> &'static str {
        match self {
            Season::Winter => "WINTER",
            Season::Spring => "SPRING",
            Season::Summer => "SUMMER",
            Season::Fall => "FALL",
        }
    }
}

/// A season pinned to the year the API labels it with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeasonYear {
    pub season: Season,
    pub year: i32,
}

impl SeasonYear {
    /// The season `today` falls in.  A December date already belongs to the
    /// winter labelled with the following year.
    pub fn current(today: NaiveDate) -> Self {
        let season = Season::for_month(today.month());
        let year = if today.month() == 12 {
            today.year() + 1
        } else {
            today.year()
        };
        Self { season, year }
    }

    /// The season after this one, carrying the year across the fall/winter
    /// boundary.
    pub fn next(self) -> Self {
        match self.season {
            Season::Winter => Self {
                season: Season::Spring,
                year: self.year,
            },
            Season::Spring => Self {
                season: Season::Summer,
                year: self.year,
            },
            Season::Summer => Self {
                season: Season::Fall,
                year: self.year,
            },
            Season::Fall => Self {
                season: Season::Winter,
                year: self.year + 1,
            },
        }
    }
}
