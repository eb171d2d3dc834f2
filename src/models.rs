//! Frontend Models
//!
//! Data structures shared by the launcher and the Time Fragments widget.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Time Fragments settings (local cache payload and remote document)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub topic: String,
    pub start_date: NaiveDate,
    pub target_date: NaiveDate,
}

impl Settings {
    /// Defaults for a first visit: the calendar year containing `today`
    pub fn defaults_for(today: NaiveDate) -> Self {
        let year = today.year();
        Self {
            topic: "今年".to_string(),
            start_date: NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(today),
            target_date: NaiveDate::from_ymd_opt(year + 1, 1, 1).unwrap_or(today),
        }
    }
}

/// Symbolic icon reference, rendered by `components::IconView`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    Hourglass,
    Timer,
    Circle,
    Square,
    Triangle,
    Hexagon,
    Command,
}

/// One launcher cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    pub id: u32,
    pub name: String,
    /// External link; `None` renders an inert placeholder
    pub link: Option<String>,
    pub icon: Icon,
}

impl Tile {
    pub fn is_link(&self) -> bool {
        self.link.is_some()
    }
}

/// Signed-in user as shown in the UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub uid: String,
    pub is_anonymous: bool,
    pub email: Option<String>,
    pub display_name: Option<String>,
}

impl UserProfile {
    pub fn label(&self) -> String {
        if self.is_anonymous {
            return "匿名用户".to_string();
        }
        self.display_name
            .clone()
            .or_else(|| self.email.clone())
            .unwrap_or_else(|| self.uid.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_defaults_cover_current_year() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap();
        let settings = Settings::defaults_for(today);
        assert_eq!(settings.start_date, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
        assert_eq!(settings.target_date, NaiveDate::from_ymd_opt(2027, 1, 1).unwrap());
    }

    #[test]
    fn test_settings_json_shape() {
        let settings = Settings {
            topic: "毕业".to_string(),
            start_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            target_date: NaiveDate::from_ymd_opt(2027, 6, 30).unwrap(),
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(
            json,
            r#"{"topic":"毕业","startDate":"2026-09-01","targetDate":"2027-06-30"}"#
        );
    }

    #[test]
    fn test_user_label() {
        let mut user = UserProfile {
            uid: "u1".to_string(),
            is_anonymous: true,
            email: None,
            display_name: None,
        };
        assert_eq!(user.label(), "匿名用户");

        user.is_anonymous = false;
        user.email = Some("a@b.c".to_string());
        assert_eq!(user.label(), "a@b.c");
    }
}
