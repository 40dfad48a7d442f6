//! The [`DiagonalMovement`] policy controlling corner-cutting.

use std::fmt;
use std::str::FromStr;

use crate::error::GridError;

/// When a diagonal step between two cells is legal.
///
/// The four orthogonal neighbours are always candidates. A diagonal neighbour
/// is additionally gated on the two orthogonal cells it squeezes between.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DiagonalMovement {
    /// All four diagonals, regardless of the adjacent orthogonal cells.
    Always,
    /// No diagonal steps at all.
    #[default]
    Never,
    /// Diagonal allowed if at least one adjacent orthogonal cell is walkable.
    IfAtMostOneObstacle,
    /// Diagonal allowed only if both adjacent orthogonal cells are walkable.
    OnlyWhenNoObstacles,
}

impl DiagonalMovement {
    pub const ALL: [DiagonalMovement; 4] = [
        Self::Always,
        Self::Never,
        Self::IfAtMostOneObstacle,
        Self::OnlyWhenNoObstacles,
    ];

    /// Resolve the legacy pair of flags into a policy.
    ///
    /// `allow_diagonal = false` means [`Never`](Self::Never); otherwise
    /// `dont_cross_corners` picks between the two corner-cutting rules.
    pub const fn from_flags(allow_diagonal: bool, dont_cross_corners: bool) -> Self {
        match (allow_diagonal, dont_cross_corners) {
            (false, _) => Self::Never,
            (true, true) => Self::OnlyWhenNoObstacles,
            (true, false) => Self::IfAtMostOneObstacle,
        }
    }

    /// Numeric code of the policy (1 = always, 2 = never, 3 = one obstacle,
    /// 4 = no obstacles).
    pub const fn code(self) -> u8 {
        match self {
            Self::Always => 1,
            Self::Never => 2,
            Self::IfAtMostOneObstacle => 3,
            Self::OnlyWhenNoObstacles => 4,
        }
    }

    /// Whether any diagonal steps may be produced.
    #[inline]
    pub const fn allows_diagonal(self) -> bool {
        !matches!(self, Self::Never)
    }

    /// Whether a diagonal step is legal given walkability of the two
    /// orthogonal cells it passes between.
    #[inline]
    pub const fn permits(self, side_a: bool, side_b: bool) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::IfAtMostOneObstacle => side_a || side_b,
            Self::OnlyWhenNoObstacles => side_a && side_b,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Never => "never",
            Self::IfAtMostOneObstacle => "if_at_most_one_obstacle",
            Self::OnlyWhenNoObstacles => "only_when_no_obstacles",
        }
    }
}

impl TryFrom<u8> for DiagonalMovement {
    type Error = GridError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|d| d.code() == code)
            .ok_or_else(|| GridError::InvalidDiagonalMovement(code.to_string()))
    }
}

impl FromStr for DiagonalMovement {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match key.as_str() {
            "always" => Ok(Self::Always),
            "never" => Ok(Self::Never),
            "if_at_most_one_obstacle" | "ifatmostoneobstacle" => Ok(Self::IfAtMostOneObstacle),
            "only_when_no_obstacles" | "onlywhennoobstacles" => Ok(Self::OnlyWhenNoObstacles),
            _ => Err(GridError::InvalidDiagonalMovement(s.to_string())),
        }
    }
}

impl fmt::Display for DiagonalMovement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for d in DiagonalMovement::ALL {
            assert_eq!(DiagonalMovement::try_from(d.code()).unwrap(), d);
        }
    }

    #[test]
    fn unknown_code_is_rejected() {
        assert!(matches!(
            DiagonalMovement::try_from(0),
            Err(GridError::InvalidDiagonalMovement(_))
        ));
        assert!(DiagonalMovement::try_from(5).is_err());
    }

    #[test]
    fn names_parse() {
        for d in DiagonalMovement::ALL {
            assert_eq!(d.to_string().parse::<DiagonalMovement>().unwrap(), d);
        }
        assert_eq!(
            "IfAtMostOneObstacle".parse::<DiagonalMovement>().unwrap(),
            DiagonalMovement::IfAtMostOneObstacle
        );
        assert!("sometimes".parse::<DiagonalMovement>().is_err());
    }

    #[test]
    fn legacy_flags() {
        use DiagonalMovement::*;
        assert_eq!(DiagonalMovement::from_flags(false, true), Never);
        assert_eq!(DiagonalMovement::from_flags(true, true), OnlyWhenNoObstacles);
        assert_eq!(DiagonalMovement::from_flags(true, false), IfAtMostOneObstacle);
    }

    #[test]
    fn corner_rules() {
        use DiagonalMovement::*;
        assert!(Always.permits(false, false));
        assert!(!Never.permits(true, true));
        assert!(IfAtMostOneObstacle.permits(true, false));
        assert!(!IfAtMostOneObstacle.permits(false, false));
        assert!(OnlyWhenNoObstacles.permits(true, true));
        assert!(!OnlyWhenNoObstacles.permits(true, false));
    }
}
