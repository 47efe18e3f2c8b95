//! Reading direction of slots on a sheet
//!
//! A direction-spec picks which axis is walked first and which way each
//! axis runs. Text form is `row-major,L2R,T2B`; the two-letter codes of
//! the classic `pdfnup` tool (`RD`, `DL`, ...) are accepted as aliases.

use std::fmt;
use std::str::FromStr;

use crate::types::NupError;

/// Axis walked first when filling a sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FastAxis {
    /// Fill a row before moving to the next row
    #[default]
    RowMajor,
    /// Fill a column before moving to the next column
    ColumnMajor,
}

/// Direction along a row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Horizontal {
    #[default]
    LeftToRight,
    RightToLeft,
}

/// Direction along a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Vertical {
    #[default]
    TopToBottom,
    BottomToTop,
}

/// Slot reading order: fast axis plus the direction of each axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DirectionSpec {
    pub fast_axis: FastAxis,
    pub horizontal: Horizontal,
    pub vertical: Vertical,
}

impl DirectionSpec {
    pub fn new(fast_axis: FastAxis, horizontal: Horizontal, vertical: Vertical) -> Self {
        Self {
            fast_axis,
            horizontal,
            vertical,
        }
    }

    /// All eight axis/direction combinations
    pub fn all() -> [DirectionSpec; 8] {
        let mut specs = [DirectionSpec::default(); 8];
        let mut i = 0;
        for fast_axis in [FastAxis::RowMajor, FastAxis::ColumnMajor] {
            for horizontal in [Horizontal::LeftToRight, Horizontal::RightToLeft] {
                for vertical in [Vertical::TopToBottom, Vertical::BottomToTop] {
                    specs[i] = DirectionSpec::new(fast_axis, horizontal, vertical);
                    i += 1;
                }
            }
        }
        specs
    }

    /// Look up a two-letter code from the classic tool.
    ///
    /// The first letter is the fast direction, the second the slow one:
    /// `R` rightward, `L` leftward, `D` downward, `U` upward.
    pub fn from_legacy_code(code: &str) -> Option<Self> {
        use FastAxis::*;
        use Horizontal::*;
        use Vertical::*;

        let spec = match code.to_ascii_uppercase().as_str() {
            "RD" => Self::new(RowMajor, LeftToRight, TopToBottom),
            "RU" => Self::new(RowMajor, LeftToRight, BottomToTop),
            "LD" => Self::new(RowMajor, RightToLeft, TopToBottom),
            "LU" => Self::new(RowMajor, RightToLeft, BottomToTop),
            "DR" => Self::new(ColumnMajor, LeftToRight, TopToBottom),
            "DL" => Self::new(ColumnMajor, RightToLeft, TopToBottom),
            "UR" => Self::new(ColumnMajor, LeftToRight, BottomToTop),
            "UL" => Self::new(ColumnMajor, RightToLeft, BottomToTop),
            _ => return None,
        };
        Some(spec)
    }

    /// The two-letter code for this spec
    pub fn legacy_code(&self) -> &'static str {
        use FastAxis::*;
        use Horizontal::*;
        use Vertical::*;

        match (self.fast_axis, self.horizontal, self.vertical) {
            (RowMajor, LeftToRight, TopToBottom) => "RD",
            (RowMajor, LeftToRight, BottomToTop) => "RU",
            (RowMajor, RightToLeft, TopToBottom) => "LD",
            (RowMajor, RightToLeft, BottomToTop) => "LU",
            (ColumnMajor, LeftToRight, TopToBottom) => "DR",
            (ColumnMajor, RightToLeft, TopToBottom) => "DL",
            (ColumnMajor, LeftToRight, BottomToTop) => "UR",
            (ColumnMajor, RightToLeft, BottomToTop) => "UL",
        }
    }
}

impl fmt::Display for DirectionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let axis = match self.fast_axis {
            FastAxis::RowMajor => "row-major",
            FastAxis::ColumnMajor => "column-major",
        };
        let horizontal = match self.horizontal {
            Horizontal::LeftToRight => "L2R",
            Horizontal::RightToLeft => "R2L",
        };
        let vertical = match self.vertical {
            Vertical::TopToBottom => "T2B",
            Vertical::BottomToTop => "B2T",
        };
        write!(f, "{},{},{}", axis, horizontal, vertical)
    }
}

impl FromStr for DirectionSpec {
    type Err = NupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(spec) = DirectionSpec::from_legacy_code(trimmed) {
            return Ok(spec);
        }

        let invalid = || {
            NupError::Configuration(format!(
                "invalid direction '{}': expected e.g. 'row-major,L2R,T2B' or a code like 'RD'",
                s
            ))
        };

        let mut fast_axis = None;
        let mut horizontal = None;
        let mut vertical = None;

        for token in trimmed.split(',').map(str::trim) {
            let slot_taken = match token.to_ascii_lowercase().as_str() {
                "row-major" | "rows" => fast_axis.replace(FastAxis::RowMajor).is_some(),
                "column-major" | "col-major" | "columns" => {
                    fast_axis.replace(FastAxis::ColumnMajor).is_some()
                }
                "l2r" => horizontal.replace(Horizontal::LeftToRight).is_some(),
                "r2l" => horizontal.replace(Horizontal::RightToLeft).is_some(),
                "t2b" => vertical.replace(Vertical::TopToBottom).is_some(),
                "b2t" => vertical.replace(Vertical::BottomToTop).is_some(),
                _ => return Err(invalid()),
            };
            // Each axis may be given once
            if slot_taken {
                return Err(invalid());
            }
        }

        Ok(DirectionSpec {
            fast_axis: fast_axis.unwrap_or_default(),
            horizontal: horizontal.unwrap_or_default(),
            vertical: vertical.unwrap_or_default(),
        })
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for DirectionSpec {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for DirectionSpec {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
