//! Crop-anchor policies.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::GeometryError;

/// Which region of the source survives a square crop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    Center,
    /// Region with the highest luma histogram entropy.
    Entropy,
    /// Region with the highest salience (edges, saturation, skin tones).
    #[default]
    Attention,
    North,
    South,
    East,
    West,
    Northeast,
    Northwest,
    Southeast,
    Southwest,
}

impl Anchor {
    pub const ALL: [Anchor; 11] = [
        Anchor::Center,
        Anchor::Entropy,
        Anchor::Attention,
        Anchor::North,
        Anchor::South,
        Anchor::East,
        Anchor::West,
        Anchor::Northeast,
        Anchor::Northwest,
        Anchor::Southeast,
        Anchor::Southwest,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Anchor::Center => "center",
            Anchor::Entropy => "entropy",
            Anchor::Attention => "attention",
            Anchor::North => "north",
            Anchor::South => "south",
            Anchor::East => "east",
            Anchor::West => "west",
            Anchor::Northeast => "northeast",
            Anchor::Northwest => "northwest",
            Anchor::Southeast => "southeast",
            Anchor::Southwest => "southwest",
        }
    }

    /// Whether the offset depends on pixel content rather than dimensions.
    pub fn is_content_aware(self) -> bool {
        matches!(self, Anchor::Entropy | Anchor::Attention)
    }

    /// Offset of a `side`-sized square inside a `width` x `height` source.
    ///
    /// Content-aware anchors resolve to center here; they are handled by an
    /// [`AnchorChooser`](super::AnchorChooser) when pixels are available.
    pub fn fixed_offset(self, width: u32, height: u32, side: u32) -> (u32, u32) {
        let slack_x = width.saturating_sub(side);
        let slack_y = height.saturating_sub(side);

        let x = match self {
            Anchor::West | Anchor::Northwest | Anchor::Southwest => 0,
            Anchor::East | Anchor::Northeast | Anchor::Southeast => slack_x,
            _ => slack_x / 2,
        };
        let y = match self {
            Anchor::North | Anchor::Northeast | Anchor::Northwest => 0,
            Anchor::South | Anchor::Southeast | Anchor::Southwest => slack_y,
            _ => slack_y / 2,
        };

        (x, y)
    }
}

impl FromStr for Anchor {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Anchor::ALL
            .into_iter()
            .find(|anchor| anchor.as_str() == lowered)
            .ok_or_else(|| GeometryError::UnknownAnchor(s.to_string()))
    }
}

impl std::fmt::Display for Anchor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_attention() {
        assert_eq!(Anchor::default(), Anchor::Attention);
    }

    #[test]
    fn test_parse_round_trips_names() {
        for anchor in Anchor::ALL {
            assert_eq!(anchor.as_str().parse::<Anchor>().unwrap(), anchor);
        }
        assert_eq!(" NorthEast ".parse::<Anchor>().unwrap(), Anchor::Northeast);
    }

    #[test]
    fn test_parse_unknown_anchor() {
        let err = "top-left".parse::<Anchor>().unwrap_err();
        assert!(matches!(err, GeometryError::UnknownAnchor(ref s) if s == "top-left"));
    }

    #[test]
    fn test_content_aware() {
        assert!(Anchor::Entropy.is_content_aware());
        assert!(Anchor::Attention.is_content_aware());
        assert!(!Anchor::Center.is_content_aware());
        assert!(!Anchor::Southwest.is_content_aware());
    }

    #[test]
    fn test_landscape_offsets() {
        // 600x400 source, 400px square: 200px of horizontal slack
        assert_eq!(Anchor::Center.fixed_offset(600, 400, 400), (100, 0));
        assert_eq!(Anchor::West.fixed_offset(600, 400, 400), (0, 0));
        assert_eq!(Anchor::East.fixed_offset(600, 400, 400), (200, 0));
        assert_eq!(Anchor::North.fixed_offset(600, 400, 400), (100, 0));
        assert_eq!(Anchor::Southeast.fixed_offset(600, 400, 400), (200, 0));
    }

    #[test]
    fn test_portrait_offsets() {
        // 400x700 source, 400px square: 300px of vertical slack
        assert_eq!(Anchor::Center.fixed_offset(400, 700, 400), (0, 150));
        assert_eq!(Anchor::North.fixed_offset(400, 700, 400), (0, 0));
        assert_eq!(Anchor::South.fixed_offset(400, 700, 400), (0, 300));
        assert_eq!(Anchor::Northwest.fixed_offset(400, 700, 400), (0, 0));
        assert_eq!(Anchor::Southwest.fixed_offset(400, 700, 400), (0, 300));
        assert_eq!(Anchor::East.fixed_offset(400, 700, 400), (0, 150));
    }

    #[test]
    fn test_center_truncates() {
        // Odd slack rounds down
        assert_eq!(Anchor::Center.fixed_offset(401, 100, 100), (150, 0));
    }
}
