// ============================================================================
// encplan-core/src/model/profile.rs
// ============================================================================
//
// ENCODING PROFILE: User-authored sizing, cropping and audio settings
//
// A profile is a plain value. Callers that edit profiles live clone them
// before mutating, so every resolver call sees an immutable snapshot.

use serde::{Deserialize, Serialize};

use super::geometry::{Crop, Padding, Ratio, Rotation};
use crate::capabilities::{AudioEncoder, Container, Mixdown};
use crate::error::{CoreError, CoreResult};

/// How the output picture size is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizingMode {
    /// Derive the size from the source and the profile's bounds
    #[default]
    Automatic,
    /// Use the profile's width and height as given
    Manual,
}

/// Upscaling policy for automatic sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalingMode {
    #[default]
    DownscaleOnly,
    /// Scale up as far as the bounds allow
    UpscaleFill,
    Upscale2X,
    Upscale3X,
    Upscale4X,
}

impl ScalingMode {
    /// Largest allowed scale factor relative to the source, `None` if unbounded.
    pub fn upscale_cap(self) -> Option<f64> {
        match self {
            ScalingMode::DownscaleOnly => Some(1.0),
            ScalingMode::UpscaleFill => None,
            ScalingMode::Upscale2X => Some(2.0),
            ScalingMode::Upscale3X => Some(3.0),
            ScalingMode::Upscale4X => Some(4.0),
        }
    }
}

/// How padding is added around the scaled picture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaddingMode {
    #[default]
    None,
    /// Pad both axes out to the profile's width and height
    Fill,
    /// Pad horizontally out to the profile's width
    Width,
    /// Pad vertically out to the profile's height
    Height,
    /// Use the profile's explicit padding
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CroppingType {
    #[default]
    Automatic,
    None,
    Custom,
}

/// Rate control for an encoded audio track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioRateControl {
    /// Target bitrate in kbps; 0 selects the encoder default
    Bitrate(u32),
    /// Encoder-specific VBR quality value
    Quality(f64),
}

impl Default for AudioRateControl {
    fn default() -> Self {
        AudioRateControl::Bitrate(0)
    }
}

/// One configured output audio encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioEncoding {
    /// 1-based index into the job's chosen tracks; 0 means every chosen track
    pub input_number: usize,

    pub encoder: AudioEncoder,

    pub rate_control: AudioRateControl,

    /// Output sample rate in Hz; 0 keeps the source rate
    pub sample_rate: u32,

    /// `None` picks the best mixdown for the source
    pub mixdown: Option<Mixdown>,

    /// Gain in dB
    pub gain: f64,

    /// Dynamic range compression; 0 disables it
    pub drc: f64,

    pub compression: Option<f64>,

    /// Copy the source instead of encoding when the codecs match
    pub passthrough_if_possible: bool,

    pub name: Option<String>,
}

impl Default for AudioEncoding {
    fn default() -> Self {
        Self {
            input_number: 0,
            encoder: AudioEncoder::Aac,
            rate_control: AudioRateControl::default(),
            sample_rate: 0,
            mixdown: None,
            gain: 0.0,
            drc: 0.0,
            compression: None,
            passthrough_if_possible: false,
            name: None,
        }
    }
}

/// Enables or disables one passthrough codec for auto passthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyMaskChoice {
    pub codec: AudioEncoder,
    pub enabled: bool,
}

/// User-authored encoding settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodingProfile {
    pub container: Container,

    //
    // Sizing
    //

    pub sizing_mode: SizingMode,
    pub scaling_mode: ScalingMode,
    pub padding_mode: PaddingMode,

    /// Target output width (manual size, or padded size for Fill/Width)
    pub width: u32,

    /// Target output height (manual size, or padded size for Fill/Height)
    pub height: u32,

    /// Picture width bound for automatic sizing; 0 = unbounded
    pub max_width: u32,

    /// Picture height bound for automatic sizing; 0 = unbounded
    pub max_height: u32,

    /// Explicit padding for `PaddingMode::Custom`
    pub padding: Padding,

    pub anamorphic: bool,

    /// Pixel aspect for manual sizing; `None` is square pixels
    pub pixel_aspect: Option<Ratio>,

    /// Dimension rounding granularity; 0 uses the configured default
    pub modulus: u32,

    //
    // Cropping
    //

    pub cropping_type: CroppingType,

    /// Explicit crop for `CroppingType::Custom`
    pub cropping: Crop,

    /// Automatic crop values below this are ignored
    pub cropping_minimum: u32,

    /// Only crop the axis with the larger automatic crop
    pub crop_single_axis: bool,

    //
    // Orientation
    //

    pub rotation: Rotation,
    pub flip_horizontal: bool,
    pub flip_vertical: bool,

    //
    // Frame rate
    //

    /// Output frame rate; `None` keeps the source rate
    pub framerate: Option<f64>,

    /// With `framerate` set: constant rate if true, peak cap if false
    pub constant_framerate: bool,

    //
    // Audio
    //

    pub audio_encodings: Vec<AudioEncoding>,

    /// Per-codec auto passthrough choices; empty allows every codec
    pub audio_copy_mask: Vec<CopyMaskChoice>,

    /// Encoder used when passthrough is not possible
    pub audio_fallback: Option<AudioEncoder>,
}

impl Default for EncodingProfile {
    fn default() -> Self {
        Self {
            container: Container::Mkv,
            sizing_mode: SizingMode::default(),
            scaling_mode: ScalingMode::default(),
            padding_mode: PaddingMode::default(),
            width: 0,
            height: 0,
            max_width: 0,
            max_height: 0,
            padding: Padding::default(),
            anamorphic: false,
            pixel_aspect: None,
            modulus: 2,
            cropping_type: CroppingType::default(),
            cropping: Crop::default(),
            cropping_minimum: 0,
            crop_single_axis: false,
            rotation: Rotation::default(),
            flip_horizontal: false,
            flip_vertical: false,
            framerate: None,
            constant_framerate: false,
            audio_encodings: Vec::new(),
            audio_copy_mask: Vec::new(),
            audio_fallback: None,
        }
    }
}

impl EncodingProfile {
    /// Checks values the resolvers cannot give a sensible meaning to.
    ///
    /// Resolution never calls this itself; it stays total so half-edited
    /// profiles still produce a preview.
    pub fn validate(&self) -> CoreResult<()> {
        if !matches!(self.modulus, 0 | 2 | 4 | 8 | 16) {
            return Err(CoreError::InvalidProfile(format!(
                "modulus must be 2, 4, 8 or 16 (got {})",
                self.modulus
            )));
        }

        if let Some(framerate) = self.framerate {
            if !framerate.is_finite() || framerate <= 0.0 {
                return Err(CoreError::InvalidProfile(format!(
                    "framerate must be positive (got {framerate})"
                )));
            }
        }

        if let Some(fallback) = self.audio_fallback {
            if fallback.is_passthrough() {
                return Err(CoreError::InvalidFallbackEncoder(fallback.to_string()));
            }
        }

        for choice in &self.audio_copy_mask {
            if !choice.codec.is_passthrough() || choice.codec == AudioEncoder::AutoPassthru {
                return Err(CoreError::InvalidProfile(format!(
                    "copy mask entry {} is not a codec passthrough encoder",
                    choice.codec
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile_is_valid() {
        assert!(EncodingProfile::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let profile = EncodingProfile {
            modulus: 3,
            ..EncodingProfile::default()
        };
        assert!(matches!(profile.validate(), Err(CoreError::InvalidProfile(_))));

        let profile = EncodingProfile {
            framerate: Some(-1.0),
            ..EncodingProfile::default()
        };
        assert!(matches!(profile.validate(), Err(CoreError::InvalidProfile(_))));

        let profile = EncodingProfile {
            audio_fallback: Some(AudioEncoder::Ac3Passthru),
            ..EncodingProfile::default()
        };
        assert!(matches!(profile.validate(), Err(CoreError::InvalidFallbackEncoder(_))));

        let profile = EncodingProfile {
            audio_copy_mask: vec![CopyMaskChoice {
                codec: AudioEncoder::Aac,
                enabled: true,
            }],
            ..EncodingProfile::default()
        };
        assert!(matches!(profile.validate(), Err(CoreError::InvalidProfile(_))));
    }

    #[test]
    fn test_upscale_caps() {
        assert_eq!(ScalingMode::DownscaleOnly.upscale_cap(), Some(1.0));
        assert_eq!(ScalingMode::UpscaleFill.upscale_cap(), None);
        assert_eq!(ScalingMode::Upscale3X.upscale_cap(), Some(3.0));
    }

    #[test]
    fn test_profile_json_defaults() {
        let profile: EncodingProfile = serde_json::from_str(
            r#"{
                "max_width": 1280,
                "max_height": 720,
                "audio_encodings": [
                    { "encoder": "copy:ac3", "rate_control": { "bitrate": 0 } },
                    { "input_number": 1, "encoder": "av_aac", "rate_control": { "quality": 2.5 } }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(profile.modulus, 2);
        assert_eq!(profile.sizing_mode, SizingMode::Automatic);
        assert_eq!(profile.audio_encodings.len(), 2);
        assert_eq!(profile.audio_encodings[0].encoder, AudioEncoder::Ac3Passthru);
        assert_eq!(
            profile.audio_encodings[1].rate_control,
            AudioRateControl::Quality(2.5)
        );
    }
}
