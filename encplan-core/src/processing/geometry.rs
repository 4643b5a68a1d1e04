// ============================================================================
// encplan-core/src/processing/geometry.rs
// ============================================================================
//
// GEOMETRY RESOLUTION: Final picture size, padding and pixel aspect
//
// This module computes the dimensions handed to the encoder's resize and pad
// filters. It mirrors what the encoder will actually produce, so every
// rounding decision here has to match the encoder's own.
//
// WORKFLOW (automatic sizing):
// 1. Swap source axes and PAR for 90°/270° rotation
// 2. Subtract the resolved crop (clamped to a 2 pixel minimum)
// 3. Derive square-pixel "adjusted" dimensions unless anamorphic
// 4. Build the picture ceiling from bounds, padding mode and upscale cap
// 5. Scale by the tighter ceiling and round to whole pixels
// 6. Add padding per padding mode
// 7. Round the output to the modulus; padded axes absorb the difference,
//    unpadded axes change the scaled picture instead
// 8. Derive the output PAR for anamorphic encodes

use serde::{Deserialize, Serialize};

use crate::config::CoreConfig;
use crate::model::{EncodingProfile, Padding, PaddingMode, Ratio, SizingMode, SourceTitle};
use crate::processing::cropping::resolve_cropping;
use crate::utils::{round_to_modulus, split_even};

/// Cropped source dimensions never go below this many pixels.
const MIN_CROPPED_DIMENSION: i64 = 2;

/// Resolved picture geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSize {
    /// Width the picture is scaled to, before padding
    pub scale_width: u32,

    /// Height the picture is scaled to, before padding
    pub scale_height: u32,

    /// Encoded frame width including padding
    pub output_width: u32,

    /// Encoded frame height including padding
    pub output_height: u32,

    /// Pixel aspect ratio of the encoded frame
    pub par: Ratio,

    pub padding: Padding,
}

impl OutputSize {
    /// Display aspect ratio of the encoded frame (width × PAR / height).
    pub fn display_aspect(&self) -> f64 {
        if self.output_height == 0 {
            return 0.0;
        }
        self.output_width as f64 * self.par.as_f64() / self.output_height as f64
    }

    /// Width a player shows the frame at, after applying the PAR.
    pub fn display_width(&self) -> u32 {
        (self.output_width as f64 * self.par.as_f64()).round() as u32
    }
}

/// Signed padding pair for one axis while it is being computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct AxisPadding {
    lead: i64,
    trail: i64,
}

impl AxisPadding {
    fn new(lead: i64, trail: i64) -> Self {
        Self { lead, trail }
    }

    fn split(total: i64) -> Self {
        let (lead, trail) = split_even(total);
        Self { lead, trail }
    }

    fn total(&self) -> i64 {
        self.lead + self.trail
    }

    fn is_negative(&self) -> bool {
        self.lead < 0 || self.trail < 0
    }

    fn clamped(self) -> Self {
        Self {
            lead: self.lead.max(0),
            trail: self.trail.max(0),
        }
    }

    /// Absorbs a modulus rounding delta.
    ///
    /// Growth is split between the sides (leading side gets the floor), or
    /// goes entirely to the only padded side. Shrinking pulls evenly from
    /// both sides, leading side first, and never below zero; whatever the
    /// padding cannot absorb is left for the picture.
    fn absorb(&mut self, delta: i64) {
        if delta > 0 {
            if self.lead == 0 {
                self.trail += delta;
            } else if self.trail == 0 {
                self.lead += delta;
            } else {
                let (lead, trail) = split_even(delta);
                self.lead += lead;
                self.trail += trail;
            }
        } else if delta < 0 {
            let remove = -delta;
            let mut take_lead = self.lead.min((remove + 1) / 2);
            let take_trail = self.trail.min(remove - take_lead);
            let leftover = remove - take_lead - take_trail;
            take_lead += (self.lead - take_lead).min(leftover);
            self.lead -= take_lead;
            self.trail -= take_trail;
        }
    }
}

/// Resolves the output geometry for `profile` applied to `title`.
///
/// Never fails: inconsistent intermediate states (for example a Fill
/// padding target of 0 while the user is still typing) are clamped and
/// logged rather than rejected.
pub fn resolve_geometry(
    profile: &EncodingProfile,
    title: &SourceTitle,
    config: &CoreConfig,
) -> OutputSize {
    match profile.sizing_mode {
        SizingMode::Manual => manual_size(profile),
        SizingMode::Automatic => automatic_size(profile, title, config),
    }
}

fn manual_size(profile: &EncodingProfile) -> OutputSize {
    let padding = if profile.padding_mode == PaddingMode::Custom {
        profile.padding
    } else {
        Padding::default()
    };

    OutputSize {
        scale_width: profile.width,
        scale_height: profile.height,
        output_width: profile.width.saturating_add(padding.horizontal()),
        output_height: profile.height.saturating_add(padding.vertical()),
        par: profile
            .pixel_aspect
            .map(Ratio::normalized)
            .unwrap_or(Ratio::SQUARE),
        padding,
    }
}

fn automatic_size(
    profile: &EncodingProfile,
    title: &SourceTitle,
    config: &CoreConfig,
) -> OutputSize {
    let crop = resolve_cropping(profile, title);
    let modulus = i64::from(effective_modulus(profile, config));

    // ---- Source geometry in final orientation ----
    let par = title.par.normalized();
    let (mut source_width, mut source_height) =
        (i64::from(title.width), i64::from(title.height));
    let (mut par_width, mut par_height) = (i64::from(par.num), i64::from(par.den));
    if profile.rotation.swaps_axes() {
        std::mem::swap(&mut source_width, &mut source_height);
        std::mem::swap(&mut par_width, &mut par_height);
    }

    let cropped_width = (source_width - i64::from(crop.horizontal())).max(MIN_CROPPED_DIMENSION);
    let cropped_height = (source_height - i64::from(crop.vertical())).max(MIN_CROPPED_DIMENSION);

    // ---- Square-pixel dimensions ----
    let (adjusted_width, adjusted_height) = if profile.anamorphic {
        (cropped_width as f64, cropped_height as f64)
    } else if par_width > par_height {
        (
            cropped_width as f64 * par_width as f64 / par_height as f64,
            cropped_height as f64,
        )
    } else {
        (
            cropped_width as f64,
            cropped_height as f64 * par_height as f64 / par_width as f64,
        )
    };

    // ---- Scale into the ceiling ----
    let upscale_cap = profile.scaling_mode.upscale_cap();
    let (max_width, max_height) =
        picture_ceiling(profile, adjusted_width, adjusted_height, upscale_cap, config);

    let mut scale_factor = match (max_width, max_height) {
        (Some(w), Some(h)) => (w / adjusted_width).min(h / adjusted_height),
        (Some(w), None) => w / adjusted_width,
        (None, Some(h)) => h / adjusted_height,
        (None, None) => 1.0,
    };
    if let Some(cap) = upscale_cap {
        scale_factor = scale_factor.min(cap);
    }

    let picture_width = ((adjusted_width * scale_factor).round() as i64).max(1);
    let picture_height = ((adjusted_height * scale_factor).round() as i64).max(1);

    log::debug!(
        "Geometry: source {}x{} par {}:{} crop {} -> cropped {}x{} adjusted {:.2}x{:.2} \
         ceiling {:?}x{:?} scale {:.4} -> picture {}x{}",
        source_width,
        source_height,
        par_width,
        par_height,
        crop,
        cropped_width,
        cropped_height,
        adjusted_width,
        adjusted_height,
        max_width,
        max_height,
        scale_factor,
        picture_width,
        picture_height
    );

    // ---- Padding ----
    let target_width = padding_target(profile.width, profile.max_width, picture_width);
    let target_height = padding_target(profile.height, profile.max_height, picture_height);

    let (mut horizontal, mut vertical) = match profile.padding_mode {
        PaddingMode::None => (AxisPadding::default(), AxisPadding::default()),
        PaddingMode::Custom => (
            AxisPadding::new(i64::from(profile.padding.left), i64::from(profile.padding.right)),
            AxisPadding::new(i64::from(profile.padding.top), i64::from(profile.padding.bottom)),
        ),
        PaddingMode::Fill => (
            AxisPadding::split(target_width - picture_width),
            AxisPadding::split(target_height - picture_height),
        ),
        PaddingMode::Width => (
            AxisPadding::split(target_width - picture_width),
            AxisPadding::default(),
        ),
        PaddingMode::Height => (
            AxisPadding::default(),
            AxisPadding::split(target_height - picture_height),
        ),
    };

    if horizontal.is_negative() || vertical.is_negative() {
        log::error!(
            "Negative padding computed (horizontal {}/{}, vertical {}/{}); clamping to zero. \
             picture {}x{}, cropped {}x{}, crop {}, profile {:?}, title {:?}",
            horizontal.lead,
            horizontal.trail,
            vertical.lead,
            vertical.trail,
            picture_width,
            picture_height,
            cropped_width,
            cropped_height,
            crop,
            profile,
            title
        );
        horizontal = horizontal.clamped();
        vertical = vertical.clamped();
    }

    let output_width = picture_width + horizontal.total();
    let output_height = picture_height + vertical.total();

    // ---- Modulus rounding ----
    let rounded_width = round_to_modulus(output_width, modulus);
    let rounded_height = round_to_modulus(output_height, modulus);

    if horizontal.total() != 0 {
        horizontal.absorb(rounded_width - output_width);
    }
    if vertical.total() != 0 {
        vertical.absorb(rounded_height - output_height);
    }

    let scale_width = rounded_width - horizontal.total();
    let scale_height = rounded_height - vertical.total();

    // ---- Pixel aspect ----
    let output_par = if profile.anamorphic {
        anamorphic_par(
            cropped_width,
            cropped_height,
            par_width,
            par_height,
            scale_width,
            scale_height,
        )
    } else {
        Ratio::SQUARE
    };

    let size = OutputSize {
        scale_width: to_dimension(scale_width),
        scale_height: to_dimension(scale_height),
        output_width: to_dimension(rounded_width),
        output_height: to_dimension(rounded_height),
        par: output_par,
        padding: Padding {
            top: to_dimension(vertical.lead),
            bottom: to_dimension(vertical.trail),
            left: to_dimension(horizontal.lead),
            right: to_dimension(horizontal.trail),
        },
    };

    log::debug!(
        "Geometry: output {}x{} (scale {}x{}, padding {}, par {}) modulus {}",
        size.output_width,
        size.output_height,
        size.scale_width,
        size.scale_height,
        size.padding,
        size.par,
        modulus
    );

    size
}

fn effective_modulus(profile: &EncodingProfile, config: &CoreConfig) -> u32 {
    let modulus = if profile.modulus == 0 {
        config.default_modulus
    } else {
        profile.modulus
    };
    modulus.max(1)
}

/// Picture width/height bounds, `None` meaning unbounded on that axis.
///
/// Fill/Width/Height padding pin the bound to the padded target size. The
/// upscale cap bounds both axes relative to the adjusted source. With no
/// bound at all the configured default ceiling applies.
fn picture_ceiling(
    profile: &EncodingProfile,
    adjusted_width: f64,
    adjusted_height: f64,
    upscale_cap: Option<f64>,
    config: &CoreConfig,
) -> (Option<f64>, Option<f64>) {
    let bound = |value: u32| (value > 0).then_some(value as f64);

    let mut max_width = bound(profile.max_width);
    let mut max_height = bound(profile.max_height);

    match profile.padding_mode {
        PaddingMode::Fill => {
            max_width = bound(profile.width).or(max_width);
            max_height = bound(profile.height).or(max_height);
        }
        PaddingMode::Width => max_width = bound(profile.width).or(max_width),
        PaddingMode::Height => max_height = bound(profile.height).or(max_height),
        PaddingMode::None | PaddingMode::Custom => {}
    }

    if let Some(cap) = upscale_cap {
        let cap_width = adjusted_width * cap;
        let cap_height = adjusted_height * cap;
        max_width = Some(max_width.map_or(cap_width, |w| w.min(cap_width)));
        max_height = Some(max_height.map_or(cap_height, |h| h.min(cap_height)));
    }

    if max_width.is_none() && max_height.is_none() {
        max_width = bound(config.default_max_width);
        max_height = bound(config.default_max_height);
    }

    (max_width, max_height)
}

/// Size a padded axis is filled to. A target of 0 falls back to the
/// profile maximum, and with no maximum either the axis is not padded.
fn padding_target(target: u32, max: u32, picture: i64) -> i64 {
    match (target, max) {
        (0, 0) => picture,
        (0, max) => i64::from(max).max(picture),
        (target, _) => i64::from(target),
    }
}

/// PAR that makes `scale_width x scale_height` display with the cropped
/// source's true aspect.
fn anamorphic_par(
    cropped_width: i64,
    cropped_height: i64,
    par_width: i64,
    par_height: i64,
    scale_width: i64,
    scale_height: i64,
) -> Ratio {
    let product = |a: i64, b: i64, c: i64| a.checked_mul(b).and_then(|ab| ab.checked_mul(c));
    let (Some(num), Some(den)) = (
        product(cropped_width, par_width, scale_height),
        product(cropped_height, par_height, scale_width),
    ) else {
        log::debug!("Anamorphic PAR overflows; using square pixels");
        return Ratio::SQUARE;
    };
    if num <= 0 || den <= 0 {
        return Ratio::SQUARE;
    }
    Ratio::from_u64(num as u64, den as u64)
}

fn to_dimension(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absorb_growth_splits_or_fills_single_side() {
        let mut padding = AxisPadding::new(93, 94);
        padding.absorb(4);
        assert_eq!(padding, AxisPadding::new(95, 96));

        let mut padding = AxisPadding::new(93, 94);
        padding.absorb(3);
        assert_eq!(padding, AxisPadding::new(94, 96));

        let mut padding = AxisPadding::new(10, 0);
        padding.absorb(3);
        assert_eq!(padding, AxisPadding::new(13, 0));
    }

    #[test]
    fn test_absorb_shrink_prefers_leading_side() {
        let mut padding = AxisPadding::new(5, 4);
        padding.absorb(-1);
        assert_eq!(padding, AxisPadding::new(4, 4));

        let mut padding = AxisPadding::new(5, 5);
        padding.absorb(-2);
        assert_eq!(padding, AxisPadding::new(4, 4));

        let mut padding = AxisPadding::new(5, 2);
        padding.absorb(-7);
        assert_eq!(padding, AxisPadding::new(0, 0));
    }

    #[test]
    fn test_absorb_shrink_never_goes_negative() {
        let mut padding = AxisPadding::new(1, 1);
        padding.absorb(-6);
        assert_eq!(padding, AxisPadding::new(0, 0));

        let mut padding = AxisPadding::new(0, 3);
        padding.absorb(-2);
        assert_eq!(padding, AxisPadding::new(0, 1));
    }

    #[test]
    fn test_anamorphic_par_reduces() {
        assert_eq!(anamorphic_par(720, 480, 32, 27, 720, 480), Ratio::new(32, 27));
        assert_eq!(anamorphic_par(0, 480, 32, 27, 720, 480), Ratio::SQUARE);

        let big = i64::from(u32::MAX);
        assert_eq!(anamorphic_par(big, 480, big, 27, big, 480), Ratio::SQUARE);
    }

    #[test]
    fn test_padding_target_falls_back_to_maximum() {
        assert_eq!(padding_target(1280, 1920, 960), 1280);
        assert_eq!(padding_target(0, 1920, 960), 1920);
        assert_eq!(padding_target(0, 0, 960), 960);
        assert_eq!(padding_target(0, 640, 960), 960);
    }
}
