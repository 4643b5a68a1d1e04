//! Crop resolution.
//!
//! Turns the profile's cropping mode and the scan's detected borders into
//! concrete per-edge crop values. Automatic crops are relabelled into the
//! final (flipped, rotated) orientation so that the geometry resolver can
//! subtract them from rotated source dimensions directly; use
//! [`Crop::to_source_orientation`] to hand them to an encoder that crops
//! before rotating.

use crate::model::{Crop, CroppingType, EncodingProfile, SourceTitle};

/// Resolves the crop to apply, expressed in final orientation.
///
/// - `None`: nothing is cropped.
/// - `Custom`: the profile's values, unmodified.
/// - `Automatic`: the detected borders, flipped then rotated, with edges
///   below `cropping_minimum` ignored and, with `crop_single_axis`, only the
///   axis with the larger total kept.
pub fn resolve_cropping(profile: &EncodingProfile, title: &SourceTitle) -> Crop {
    match profile.cropping_type {
        CroppingType::None => Crop::default(),
        CroppingType::Custom => profile.cropping,
        CroppingType::Automatic => {
            let oriented = title
                .autocrop
                .flipped(profile.flip_horizontal, profile.flip_vertical)
                .rotated(profile.rotation);

            let mut crop = apply_minimum(oriented, profile.cropping_minimum);
            if profile.crop_single_axis {
                crop = keep_dominant_axis(crop);
            }

            log::debug!(
                "Automatic crop: detected {} -> oriented {} -> applied {}",
                title.autocrop,
                oriented,
                crop
            );
            crop
        }
    }
}

fn apply_minimum(crop: Crop, minimum: u32) -> Crop {
    let keep = |value: u32| if value < minimum { 0 } else { value };
    Crop {
        top: keep(crop.top),
        bottom: keep(crop.bottom),
        left: keep(crop.left),
        right: keep(crop.right),
    }
}

/// Zeroes the axis with the smaller total crop. On a tie the vertical
/// (letterbox) crop is kept.
fn keep_dominant_axis(crop: Crop) -> Crop {
    if crop.vertical() >= crop.horizontal() {
        Crop {
            left: 0,
            right: 0,
            ..crop
        }
    } else {
        Crop {
            top: 0,
            bottom: 0,
            ..crop
        }
    }
}
