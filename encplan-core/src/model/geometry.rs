//! Geometry primitives shared by titles, profiles and resolved output:
//! ratios, rotation, crop and padding rectangles.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::utils::reduce_ratio;

/// A numerator/denominator pair (pixel aspect, frame rate).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ratio {
    pub num: u32,
    pub den: u32,
}

impl Ratio {
    pub const SQUARE: Ratio = Ratio { num: 1, den: 1 };

    pub const fn new(num: u32, den: u32) -> Self {
        Self { num, den }
    }

    /// The ratio with zero components replaced by 1:1.
    pub fn normalized(self) -> Self {
        if self.num == 0 || self.den == 0 {
            Self::SQUARE
        } else {
            self
        }
    }

    /// Lowest terms; 1:1 for degenerate ratios or if a term overflows `u32`.
    pub fn reduced(self) -> Self {
        let Self { num, den } = self.normalized();
        Self::from_u64(num as u64, den as u64)
    }

    pub(crate) fn from_u64(num: u64, den: u64) -> Self {
        match reduce_ratio(num, den) {
            Some((num, den)) => match (u32::try_from(num), u32::try_from(den)) {
                (Ok(num), Ok(den)) => Self { num, den },
                _ => Self::SQUARE,
            },
            None => Self::SQUARE,
        }
    }

    pub fn as_f64(self) -> f64 {
        if self.den == 0 {
            0.0
        } else {
            self.num as f64 / self.den as f64
        }
    }

    pub fn is_square(self) -> bool {
        let reduced = self.reduced();
        reduced.num == reduced.den
    }
}

impl Default for Ratio {
    fn default() -> Self {
        Self::SQUARE
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.num, self.den)
    }
}

/// Clockwise picture rotation in 90° steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum Rotation {
    #[default]
    None,
    Cw90,
    Cw180,
    Cw270,
}

impl Rotation {
    pub fn degrees(self) -> u16 {
        match self {
            Rotation::None => 0,
            Rotation::Cw90 => 90,
            Rotation::Cw180 => 180,
            Rotation::Cw270 => 270,
        }
    }

    /// The rotation that undoes this one: (360 - R) mod 360.
    pub fn inverse(self) -> Self {
        match self {
            Rotation::None => Rotation::None,
            Rotation::Cw90 => Rotation::Cw270,
            Rotation::Cw180 => Rotation::Cw180,
            Rotation::Cw270 => Rotation::Cw90,
        }
    }

    /// True when width and height trade places.
    pub fn swaps_axes(self) -> bool {
        matches!(self, Rotation::Cw90 | Rotation::Cw270)
    }
}

impl TryFrom<u16> for Rotation {
    type Error = CoreError;

    fn try_from(degrees: u16) -> Result<Self, Self::Error> {
        match degrees {
            0 => Ok(Rotation::None),
            90 => Ok(Rotation::Cw90),
            180 => Ok(Rotation::Cw180),
            270 => Ok(Rotation::Cw270),
            other => Err(CoreError::InvalidRotation(other)),
        }
    }
}

impl From<Rotation> for u16 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

/// Pixels removed from each edge of the picture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Crop {
    pub top: u32,
    pub bottom: u32,
    pub left: u32,
    pub right: u32,
}

impl Crop {
    pub const fn new(top: u32, bottom: u32, left: u32, right: u32) -> Self {
        Self {
            top,
            bottom,
            left,
            right,
        }
    }

    /// Top plus bottom, saturating at `u32::MAX`.
    pub fn vertical(&self) -> u32 {
        self.top.saturating_add(self.bottom)
    }

    /// Left plus right, saturating at `u32::MAX`.
    pub fn horizontal(&self) -> u32 {
        self.left.saturating_add(self.right)
    }

    pub fn is_empty(&self) -> bool {
        self.vertical() == 0 && self.horizontal() == 0
    }

    /// Relabels edges for a mirrored picture: a horizontal flip swaps
    /// left/right, a vertical flip swaps top/bottom.
    #[must_use]
    pub fn flipped(self, horizontal: bool, vertical: bool) -> Self {
        let mut crop = self;
        if horizontal {
            std::mem::swap(&mut crop.left, &mut crop.right);
        }
        if vertical {
            std::mem::swap(&mut crop.top, &mut crop.bottom);
        }
        crop
    }

    /// Relabels edges for a picture rotated clockwise by `rotation`.
    ///
    /// At 90° the source left edge becomes the top, the top becomes the
    /// right, and so on. Magnitudes are untouched.
    #[must_use]
    pub fn rotated(self, rotation: Rotation) -> Self {
        let Crop {
            top,
            bottom,
            left,
            right,
        } = self;
        match rotation {
            Rotation::None => self,
            Rotation::Cw90 => Crop {
                top: left,
                right: top,
                bottom: right,
                left: bottom,
            },
            Rotation::Cw180 => Crop {
                top: bottom,
                bottom: top,
                left: right,
                right: left,
            },
            Rotation::Cw270 => Crop {
                top: right,
                right: bottom,
                bottom: left,
                left: top,
            },
        }
    }

    /// Maps a crop expressed in final (flipped, then rotated) orientation
    /// back onto the source picture's axes.
    #[must_use]
    pub fn to_source_orientation(
        self,
        rotation: Rotation,
        flip_horizontal: bool,
        flip_vertical: bool,
    ) -> Self {
        self.rotated(rotation.inverse())
            .flipped(flip_horizontal, flip_vertical)
    }
}

impl fmt::Display for Crop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}",
            self.top, self.bottom, self.left, self.right
        )
    }
}

/// Pixels added around the scaled picture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Padding {
    pub top: u32,
    pub bottom: u32,
    pub left: u32,
    pub right: u32,
}

impl Padding {
    pub const fn new(top: u32, bottom: u32, left: u32, right: u32) -> Self {
        Self {
            top,
            bottom,
            left,
            right,
        }
    }

    /// Top plus bottom, saturating at `u32::MAX`.
    pub fn vertical(&self) -> u32 {
        self.top.saturating_add(self.bottom)
    }

    /// Left plus right, saturating at `u32::MAX`.
    pub fn horizontal(&self) -> u32 {
        self.left.saturating_add(self.right)
    }

    pub fn is_empty(&self) -> bool {
        self.vertical() == 0 && self.horizontal() == 0
    }
}

impl fmt::Display for Padding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}",
            self.top, self.bottom, self.left, self.right
        )
    }
}
