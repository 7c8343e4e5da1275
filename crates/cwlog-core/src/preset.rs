use serde::Serialize;

pub const CUSTOM_PRESET: &str = "custom";
pub const DEFAULT_PRESET: &str = "1h";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatePreset {
    pub value: &'static str,
    pub label: &'static str,
    pub minutes_ago: Option<i64>,
}

impl DatePreset {
    const fn lookback(value: &'static str, label: &'static str, minutes: i64) -> Self {
        Self {
            value,
            label,
            minutes_ago: Some(minutes),
        }
    }

    pub fn is_custom(&self) -> bool {
        self.minutes_ago.is_none()
    }
}

pub static DATE_PRESETS: [DatePreset; 10] = [
    DatePreset::lookback("15m", "Last 15 minutes", 15),
    DatePreset::lookback("30m", "Last 30 minutes", 30),
    DatePreset::lookback("1h", "Last 1 hour", 60),
    DatePreset::lookback("3h", "Last 3 hours", 180),
    DatePreset::lookback("6h", "Last 6 hours", 360),
    DatePreset::lookback("12h", "Last 12 hours", 720),
    DatePreset::lookback("1d", "Last 1 day", 1440),
    DatePreset::lookback("3d", "Last 3 days", 4320),
    DatePreset::lookback("7d", "Last 7 days", 10080),
    DatePreset {
        value: CUSTOM_PRESET,
        label: "Custom range",
        minutes_ago: None,
    },
];

pub fn find_preset(value: &str) -> Option<&'static DatePreset> {
    DATE_PRESETS.iter().find(|preset| preset.value == value)
}

#[cfg(test)]
mod tests {
    use super::{find_preset, CUSTOM_PRESET, DATE_PRESETS, DEFAULT_PRESET};

    #[test]
    fn catalog_is_ordered_and_ends_with_custom() {
        let values: Vec<&str> = DATE_PRESETS.iter().map(|p| p.value).collect();
        assert_eq!(
            values,
            vec!["15m", "30m", "1h", "3h", "6h", "12h", "1d", "3d", "7d", "custom"]
        );
        assert!(DATE_PRESETS[9].is_custom());
        assert_eq!(
            DATE_PRESETS.iter().filter(|p| p.is_custom()).count(),
            1
        );
    }

    #[test]
    fn lookup_by_value() {
        assert_eq!(find_preset("7d").unwrap().minutes_ago, Some(10080));
        assert_eq!(find_preset(DEFAULT_PRESET).unwrap().minutes_ago, Some(60));
        assert!(find_preset(CUSTOM_PRESET).unwrap().minutes_ago.is_none());
        assert!(find_preset("2w").is_none());
    }
}
