use serde::{Deserialize, Serialize};

/// One dataset row: eruption duration and the wait before it, in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub eruption_time: f64,
    pub waiting_time: f64,
}

/// Column metadata shared by the plot and the table so both views label the
/// same field the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLabel {
    pub id: &'static str,
    pub name: &'static str,
}

pub const ERUPTION_LABEL: ColumnLabel = ColumnLabel {
    id: "eruption_time",
    name: "Eruption Time (mins)",
};

pub const WAITING_LABEL: ColumnLabel = ColumnLabel {
    id: "waiting_time",
    name: "Waiting Time (mins)",
};

/// Columns in dataset-file order.
pub const COLUMN_LABELS: [ColumnLabel; 2] = [ERUPTION_LABEL, WAITING_LABEL];

/// Discrete slider position. The sampling fraction is geometric in the
/// position: `1 / 2^level`, so every fraction is a power of two in (0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SliderLevel(u8);

impl SliderLevel {
    pub const MAX: u8 = 7;

    pub fn new(value: u8) -> Option<Self> {
        (value <= Self::MAX).then_some(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn fraction(self) -> f64 {
        1.0 / f64::from(1u32 << self.0)
    }

    /// Slider mark text, `1/1` through `1/128`.
    pub fn mark(self) -> String {
        format!("1/{}", 1u32 << self.0)
    }
}

/// Marker color for the scatter plot. Affects rendering only; changing it
/// never triggers a resample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayColor {
    Orange,
    DarkOrange,
    #[default]
    Coral,
    OrangeRed,
}

impl DisplayColor {
    pub const ALL: [DisplayColor; 4] = [
        DisplayColor::Orange,
        DisplayColor::DarkOrange,
        DisplayColor::Coral,
        DisplayColor::OrangeRed,
    ];

    /// CSS color keyword, as drawn by the client.
    pub fn css_name(self) -> &'static str {
        match self {
            DisplayColor::Orange => "orange",
            DisplayColor::DarkOrange => "darkorange",
            DisplayColor::Coral => "coral",
            DisplayColor::OrangeRed => "orangered",
        }
    }

    /// Human-readable dropdown label.
    pub fn label(self) -> &'static str {
        match self {
            DisplayColor::Orange => "Orange",
            DisplayColor::DarkOrange => "Dark Orange",
            DisplayColor::Coral => "Coral",
            DisplayColor::OrangeRed => "Orange Red",
        }
    }
}
