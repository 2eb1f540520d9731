use serde::Serialize;
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString};

pub mod measure;
pub mod packer;

pub use measure::{AspectRatio, Measure};
pub use packer::{BalancedGridPacker, LayoutError, Placement, PlacementResult};

/// Direction in which tracks grow. Vertical packs into columns, horizontal
/// into rows.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    #[default]
    #[strum(to_string = "vertical", serialize = "v", serialize = "columns")]
    Vertical,
    #[strum(to_string = "horizontal", serialize = "h", serialize = "rows")]
    Horizontal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_deserialization() {
        let cases = vec![
            ("\"vertical\"", Axis::Vertical),
            ("\"Vertical\"", Axis::Vertical),
            ("\"v\"", Axis::Vertical),
            ("\"columns\"", Axis::Vertical),
            ("\"HORIZONTAL\"", Axis::Horizontal),
            ("\"rows\"", Axis::Horizontal),
        ];

        for (json, expected) in cases {
            let deserialized: Axis = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
    }

    #[test]
    fn test_axis_display() {
        assert_eq!(Axis::Vertical.to_string(), "vertical");
        assert_eq!(Axis::Horizontal.to_string(), "horizontal");
    }
}
