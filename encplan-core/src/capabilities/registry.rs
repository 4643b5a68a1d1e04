// ============================================================================
// encplan-core/src/capabilities/registry.rs
// ============================================================================
//
// CAPABILITY REGISTRY: What each audio encoder can do
//
// The registry is read-only data: supported containers, sample rates,
// mixdowns, bitrate limits and defaults, quality and compression scales.
// Resolvers receive it as `&impl CapabilityRegistry`, so tests can pass a
// hand-built table while production code uses `CapabilityTable::standard()`.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::{AudioCodec, AudioEncoder, Container, Mixdown};

/// A bounded numeric scale with a default, used for VBR quality and
/// compression levels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleRange {
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

impl ScaleRange {
    pub const fn new(min: f64, max: f64, default: f64) -> Self {
        Self { min, max, default }
    }

    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.default;
        }
        value.clamp(self.min, self.max)
    }
}

/// Default bitrates in kbps by output channel class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DefaultBitrates {
    pub mono: u32,
    pub stereo: u32,
    /// 3 to 6 channels (5.1 and below)
    pub surround: u32,
    /// 7 or more channels
    pub surround_wide: u32,
}

impl DefaultBitrates {
    pub const fn new(mono: u32, stereo: u32, surround: u32, surround_wide: u32) -> Self {
        Self {
            mono,
            stereo,
            surround,
            surround_wide,
        }
    }

    pub fn for_channels(&self, channels: u32) -> u32 {
        match channels {
            0 | 1 => self.mono,
            2 => self.stereo,
            3..=6 => self.surround,
            _ => self.surround_wide,
        }
    }
}

/// Capabilities of a single encoder.
///
/// Passthrough encoders only carry `codec` and `containers`; the remaining
/// fields describe re-encoding and are left empty for them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncoderCapabilities {
    pub encoder: AudioEncoder,

    /// Codec family produced (or copied). `None` only for auto passthrough.
    pub codec: Option<AudioCodec>,

    pub containers: Vec<Container>,

    /// Supported output sample rates in Hz, ascending
    pub sample_rates: Vec<u32>,

    /// Widest mixdown the encoder can produce
    pub max_mixdown: Mixdown,

    /// Accepted bitrate range in kbps
    pub bitrate_range: Option<(u32, u32)>,

    pub default_bitrates: DefaultBitrates,

    /// VBR quality scale, for encoders with a quality mode
    pub quality: Option<ScaleRange>,

    /// True when the encoder's default rate control is quality rather than bitrate
    pub default_is_quality: bool,

    /// Compression level scale, for encoders that expose one
    pub compression: Option<ScaleRange>,
}

impl EncoderCapabilities {
    /// Capabilities entry for a passthrough encoder.
    pub fn passthrough(
        encoder: AudioEncoder,
        codec: Option<AudioCodec>,
        containers: &[Container],
    ) -> Self {
        Self {
            encoder,
            codec,
            containers: containers.to_vec(),
            sample_rates: Vec::new(),
            max_mixdown: Mixdown::SevenPointOne,
            bitrate_range: None,
            default_bitrates: DefaultBitrates::default(),
            quality: None,
            default_is_quality: false,
            compression: None,
        }
    }

    pub fn supports_container(&self, container: Container) -> bool {
        self.containers.contains(&container)
    }

    /// Widest mixdown for a source with `source_channels` channels.
    ///
    /// Matrix-encoded stereo is only chosen when the source has surround
    /// channels to fold in. An unknown channel count (0) is treated as stereo.
    pub fn best_mixdown(&self, source_channels: u32) -> Mixdown {
        const CANDIDATES: [Mixdown; 6] = [
            Mixdown::SevenPointOne,
            Mixdown::SixPointOne,
            Mixdown::FivePointOne,
            Mixdown::DolbyProLogicII,
            Mixdown::Stereo,
            Mixdown::Mono,
        ];

        let source_channels = if source_channels == 0 { 2 } else { source_channels };
        let limit = self.max_mixdown.channels().min(source_channels);

        CANDIDATES
            .into_iter()
            .filter(|m| !m.is_matrix_encoded() || source_channels > 2)
            .find(|m| m.channels() <= limit)
            .unwrap_or(Mixdown::Mono)
    }

    /// Resolves a requested mixdown (`None` = automatic) against the source
    /// layout and the encoder's limits. Never upmixes.
    pub fn sanitize_mixdown(&self, requested: Option<Mixdown>, source_channels: u32) -> Mixdown {
        let best = self.best_mixdown(source_channels);
        let Some(requested) = requested else {
            return best;
        };

        let requested = if requested.is_matrix_encoded() && source_channels <= 2 {
            Mixdown::Stereo
        } else {
            requested
        };

        if requested.channels() > best.channels() {
            best
        } else {
            requested
        }
    }

    /// Resolves a requested sample rate (0 = keep the source rate) to the
    /// highest supported rate not above it, or the lowest supported rate.
    pub fn sanitize_sample_rate(&self, requested: u32, source_rate: u32) -> u32 {
        let target = if requested == 0 { source_rate } else { requested };
        if self.sample_rates.is_empty() {
            return target;
        }

        self.sample_rates
            .iter()
            .copied()
            .filter(|rate| *rate <= target)
            .max()
            .or_else(|| self.sample_rates.iter().copied().min())
            .unwrap_or(target)
    }

    /// Default bitrate in kbps for the given mixdown, within the encoder's range.
    pub fn default_bitrate(&self, mixdown: Mixdown) -> u32 {
        let bitrate = self.default_bitrates.for_channels(mixdown.channels());
        self.clamp_bitrate(bitrate)
    }

    /// Resolves a requested bitrate in kbps (0 = default for the mixdown).
    pub fn sanitize_bitrate(&self, mixdown: Mixdown, requested: u32) -> u32 {
        if requested == 0 {
            self.default_bitrate(mixdown)
        } else {
            self.clamp_bitrate(requested)
        }
    }

    fn clamp_bitrate(&self, bitrate: u32) -> u32 {
        match self.bitrate_range {
            Some((min, max)) => bitrate.clamp(min, max),
            None => bitrate,
        }
    }

    /// Clamps a quality value to the encoder's scale. `None` when the encoder
    /// has no quality mode.
    pub fn sanitize_quality(&self, quality: f64) -> Option<f64> {
        self.quality.map(|range| range.clamp(quality))
    }

    /// Resolves a compression level. `None` when the encoder has none.
    pub fn sanitize_compression(&self, requested: Option<f64>) -> Option<f64> {
        self.compression
            .map(|range| requested.map_or(range.default, |level| range.clamp(level)))
    }
}

/// Lookup interface over encoder capabilities.
///
/// Implementors only provide the ordered encoder list; every query is
/// derived from it. The order matters: it decides which encoder
/// [`CapabilityRegistry::first_encoder_for`] picks as the fallback.
pub trait CapabilityRegistry: Send + Sync {
    /// All known encoders in preference order.
    fn encoders(&self) -> &[EncoderCapabilities];

    fn capabilities(&self, encoder: AudioEncoder) -> Option<&EncoderCapabilities> {
        self.encoders().iter().find(|caps| caps.encoder == encoder)
    }

    /// Every codec-specific passthrough encoder (auto passthrough excluded).
    fn passthrough_encoders(&self) -> Vec<AudioEncoder> {
        self.encoders()
            .iter()
            .filter(|caps| {
                caps.encoder.is_passthrough() && caps.encoder != AudioEncoder::AutoPassthru
            })
            .map(|caps| caps.encoder)
            .collect()
    }

    /// The passthrough encoder able to copy `codec`, if any.
    fn passthrough_for(&self, codec: AudioCodec) -> Option<AudioEncoder> {
        self.encoders()
            .iter()
            .find(|caps| {
                caps.encoder.is_passthrough()
                    && caps.encoder != AudioEncoder::AutoPassthru
                    && caps.codec == Some(codec)
            })
            .map(|caps| caps.encoder)
    }

    fn codec_family(&self, encoder: AudioEncoder) -> Option<AudioCodec> {
        self.capabilities(encoder).and_then(|caps| caps.codec)
    }

    fn supports_container(&self, encoder: AudioEncoder, container: Container) -> bool {
        self.capabilities(encoder)
            .is_some_and(|caps| caps.supports_container(container))
    }

    /// First non-passthrough encoder usable in `container`.
    fn first_encoder_for(&self, container: Container) -> Option<AudioEncoder> {
        self.encoders()
            .iter()
            .find(|caps| !caps.encoder.is_passthrough() && caps.supports_container(container))
            .map(|caps| caps.encoder)
    }

    /// Whether a source stream in `codec` can be copied in place of
    /// encoding with `encoder` (same codec family, e.g. any AAC encoder and
    /// an AAC source).
    fn is_bit_compatible(&self, encoder: AudioEncoder, codec: AudioCodec) -> bool {
        !encoder.is_passthrough() && self.codec_family(encoder) == Some(codec)
    }
}

/// Table-backed [`CapabilityRegistry`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapabilityTable {
    encoders: Vec<EncoderCapabilities>,
}

impl CapabilityRegistry for CapabilityTable {
    fn encoders(&self) -> &[EncoderCapabilities] {
        &self.encoders
    }
}

static STANDARD_TABLE: Lazy<CapabilityTable> = Lazy::new(CapabilityTable::build_standard);

const COMMON_RATES: &[u32] = &[8000, 11025, 12000, 16000, 22050, 24000, 32000, 44100, 48000];

impl CapabilityTable {
    pub fn new(encoders: Vec<EncoderCapabilities>) -> Self {
        Self { encoders }
    }

    /// The built-in table, constructed once per process.
    pub fn standard() -> &'static CapabilityTable {
        &STANDARD_TABLE
    }

    fn build_standard() -> Self {
        use AudioCodec as C;
        use AudioEncoder as E;
        use Container::{Mkv, Mp4, Webm};

        let encode = |encoder: E,
                      codec: C,
                      containers: &[Container],
                      sample_rates: &[u32],
                      max_mixdown: Mixdown,
                      bitrate_range: (u32, u32),
                      default_bitrates: DefaultBitrates| EncoderCapabilities {
            encoder,
            codec: Some(codec),
            containers: containers.to_vec(),
            sample_rates: sample_rates.to_vec(),
            max_mixdown,
            bitrate_range: Some(bitrate_range),
            default_bitrates,
            quality: None,
            default_is_quality: false,
            compression: None,
        };

        let aac = encode(
            E::Aac,
            C::Aac,
            &[Mp4, Mkv],
            COMMON_RATES,
            Mixdown::SevenPointOne,
            (32, 1536),
            DefaultBitrates::new(80, 160, 384, 512),
        );

        let fdk_aac = EncoderCapabilities {
            quality: Some(ScaleRange::new(1.0, 5.0, 3.0)),
            ..encode(
                E::FdkAac,
                C::Aac,
                &[Mp4, Mkv],
                COMMON_RATES,
                Mixdown::SevenPointOne,
                (32, 1536),
                DefaultBitrates::new(80, 160, 384, 512),
            )
        };

        let fdk_he_aac = encode(
            E::FdkHeAac,
            C::Aac,
            &[Mp4, Mkv],
            &[16000, 22050, 24000, 32000, 44100, 48000],
            Mixdown::SevenPointOne,
            (16, 768),
            DefaultBitrates::new(48, 64, 192, 256),
        );

        let opus = EncoderCapabilities {
            compression: Some(ScaleRange::new(0.0, 10.0, 10.0)),
            ..encode(
                E::Opus,
                C::Opus,
                &[Mkv, Webm, Mp4],
                &[48000],
                Mixdown::SevenPointOne,
                (6, 1536),
                DefaultBitrates::new(64, 128, 256, 384),
            )
        };

        let vorbis = EncoderCapabilities {
            quality: Some(ScaleRange::new(-2.0, 10.0, 5.0)),
            default_is_quality: true,
            ..encode(
                E::Vorbis,
                C::Vorbis,
                &[Mkv, Webm],
                COMMON_RATES,
                Mixdown::SevenPointOne,
                (32, 1024),
                DefaultBitrates::new(80, 160, 384, 448),
            )
        };

        let ac3 = encode(
            E::Ac3,
            C::Ac3,
            &[Mp4, Mkv],
            &[32000, 44100, 48000],
            Mixdown::FivePointOne,
            (32, 640),
            DefaultBitrates::new(96, 224, 448, 640),
        );

        let eac3 = encode(
            E::Eac3,
            C::Eac3,
            &[Mp4, Mkv],
            &[32000, 44100, 48000],
            Mixdown::FivePointOne,
            (32, 1536),
            DefaultBitrates::new(96, 224, 448, 640),
        );

        let mp3 = EncoderCapabilities {
            quality: Some(ScaleRange::new(0.0, 10.0, 5.0)),
            compression: Some(ScaleRange::new(0.0, 9.0, 2.0)),
            ..encode(
                E::Mp3,
                C::Mp3,
                &[Mp4, Mkv],
                COMMON_RATES,
                Mixdown::Stereo,
                (32, 320),
                DefaultBitrates::new(96, 160, 160, 160),
            )
        };

        let encoders = vec![
            aac,
            fdk_aac,
            fdk_he_aac,
            opus,
            vorbis,
            ac3,
            eac3,
            mp3,
            EncoderCapabilities::passthrough(E::AutoPassthru, None, &[Mp4, Mkv, Webm]),
            EncoderCapabilities::passthrough(E::AacPassthru, Some(C::Aac), &[Mp4, Mkv]),
            EncoderCapabilities::passthrough(E::Ac3Passthru, Some(C::Ac3), &[Mp4, Mkv]),
            EncoderCapabilities::passthrough(E::Eac3Passthru, Some(C::Eac3), &[Mp4, Mkv]),
            EncoderCapabilities::passthrough(E::TrueHdPassthru, Some(C::TrueHd), &[Mkv]),
            EncoderCapabilities::passthrough(E::DtsPassthru, Some(C::Dts), &[Mp4, Mkv]),
            EncoderCapabilities::passthrough(E::DtsHdPassthru, Some(C::DtsHd), &[Mkv]),
            EncoderCapabilities::passthrough(E::Mp3Passthru, Some(C::Mp3), &[Mp4, Mkv]),
            EncoderCapabilities::passthrough(E::FlacPassthru, Some(C::Flac), &[Mp4, Mkv]),
            EncoderCapabilities::passthrough(E::OpusPassthru, Some(C::Opus), &[Mp4, Mkv, Webm]),
        ];

        Self { encoders }
    }
}
