//! Audio codec, encoder, mixdown and container vocabulary.
//!
//! Encoders and codecs are identified by their short names (`av_aac`,
//! `copy:ac3`, ...) only at the boundary: parsing turns them into the enums
//! below, and everything downstream works on the enums and on the
//! capability data in [`registry`].

pub mod registry;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub use registry::{
    CapabilityRegistry, CapabilityTable, DefaultBitrates, EncoderCapabilities, ScaleRange,
};

/// Output container format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Container {
    Mp4,
    Mkv,
    Webm,
}

impl Container {
    pub fn short_name(self) -> &'static str {
        match self {
            Container::Mp4 => "mp4",
            Container::Mkv => "mkv",
            Container::Webm => "webm",
        }
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

impl FromStr for Container {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mp4" | "m4v" => Ok(Container::Mp4),
            "mkv" | "matroska" => Ok(Container::Mkv),
            "webm" => Ok(Container::Webm),
            other => Err(CoreError::UnknownContainer(other.to_string())),
        }
    }
}

/// Codec of a source audio stream, as reported by the scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AudioCodec {
    #[serde(rename = "aac")]
    Aac,
    #[serde(rename = "ac3")]
    Ac3,
    #[serde(rename = "eac3")]
    Eac3,
    #[serde(rename = "truehd")]
    TrueHd,
    #[serde(rename = "dts")]
    Dts,
    #[serde(rename = "dtshd")]
    DtsHd,
    #[serde(rename = "mp3")]
    Mp3,
    #[serde(rename = "mp2")]
    Mp2,
    #[serde(rename = "flac")]
    Flac,
    #[serde(rename = "opus")]
    Opus,
    #[serde(rename = "vorbis")]
    Vorbis,
    #[serde(rename = "pcm")]
    Pcm,
    #[serde(rename = "other")]
    Other,
}

const CODEC_NAMES: &[(AudioCodec, &str)] = &[
    (AudioCodec::Aac, "aac"),
    (AudioCodec::Ac3, "ac3"),
    (AudioCodec::Eac3, "eac3"),
    (AudioCodec::TrueHd, "truehd"),
    (AudioCodec::Dts, "dts"),
    (AudioCodec::DtsHd, "dtshd"),
    (AudioCodec::Mp3, "mp3"),
    (AudioCodec::Mp2, "mp2"),
    (AudioCodec::Flac, "flac"),
    (AudioCodec::Opus, "opus"),
    (AudioCodec::Vorbis, "vorbis"),
    (AudioCodec::Pcm, "pcm"),
    (AudioCodec::Other, "other"),
];

impl AudioCodec {
    pub fn short_name(self) -> &'static str {
        CODEC_NAMES
            .iter()
            .find(|(codec, _)| *codec == self)
            .map(|(_, name)| *name)
            .unwrap_or("other")
    }

    /// Audio samples carried by one compressed frame of this codec.
    ///
    /// Used to count audio frames for the container overhead estimate.
    pub fn samples_per_frame(self) -> u32 {
        match self {
            AudioCodec::Aac | AudioCodec::Vorbis => 1024,
            AudioCodec::Opus => 960,
            AudioCodec::Mp3 | AudioCodec::Mp2 => 1152,
            _ => 1536,
        }
    }
}

impl fmt::Display for AudioCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

impl FromStr for AudioCodec {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        let wanted = match wanted.as_str() {
            "e-ac3" | "e-ac-3" | "ec3" => "eac3",
            "ac-3" => "ac3",
            "dts-hd" | "dts-hd ma" => "dtshd",
            other => other,
        };
        CODEC_NAMES
            .iter()
            .find(|(_, name)| *name == wanted)
            .map(|(codec, _)| *codec)
            .ok_or_else(|| CoreError::UnknownCodec(s.to_string()))
    }
}

/// Output audio encoder, including the passthrough pseudo-encoders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AudioEncoder {
    #[serde(rename = "av_aac")]
    Aac,
    #[serde(rename = "fdk_aac")]
    FdkAac,
    #[serde(rename = "fdk_haac")]
    FdkHeAac,
    #[serde(rename = "mp3")]
    Mp3,
    #[serde(rename = "vorbis")]
    Vorbis,
    #[serde(rename = "opus")]
    Opus,
    #[serde(rename = "ac3")]
    Ac3,
    #[serde(rename = "eac3")]
    Eac3,
    /// Passes through any codec allowed by the copy mask.
    #[serde(rename = "copy")]
    AutoPassthru,
    #[serde(rename = "copy:aac")]
    AacPassthru,
    #[serde(rename = "copy:ac3")]
    Ac3Passthru,
    #[serde(rename = "copy:eac3")]
    Eac3Passthru,
    #[serde(rename = "copy:truehd")]
    TrueHdPassthru,
    #[serde(rename = "copy:dts")]
    DtsPassthru,
    #[serde(rename = "copy:dtshd")]
    DtsHdPassthru,
    #[serde(rename = "copy:mp3")]
    Mp3Passthru,
    #[serde(rename = "copy:flac")]
    FlacPassthru,
    #[serde(rename = "copy:opus")]
    OpusPassthru,
}

const ENCODER_NAMES: &[(AudioEncoder, &str)] = &[
    (AudioEncoder::Aac, "av_aac"),
    (AudioEncoder::FdkAac, "fdk_aac"),
    (AudioEncoder::FdkHeAac, "fdk_haac"),
    (AudioEncoder::Mp3, "mp3"),
    (AudioEncoder::Vorbis, "vorbis"),
    (AudioEncoder::Opus, "opus"),
    (AudioEncoder::Ac3, "ac3"),
    (AudioEncoder::Eac3, "eac3"),
    (AudioEncoder::AutoPassthru, "copy"),
    (AudioEncoder::AacPassthru, "copy:aac"),
    (AudioEncoder::Ac3Passthru, "copy:ac3"),
    (AudioEncoder::Eac3Passthru, "copy:eac3"),
    (AudioEncoder::TrueHdPassthru, "copy:truehd"),
    (AudioEncoder::DtsPassthru, "copy:dts"),
    (AudioEncoder::DtsHdPassthru, "copy:dtshd"),
    (AudioEncoder::Mp3Passthru, "copy:mp3"),
    (AudioEncoder::FlacPassthru, "copy:flac"),
    (AudioEncoder::OpusPassthru, "copy:opus"),
];

impl AudioEncoder {
    pub fn short_name(self) -> &'static str {
        ENCODER_NAMES
            .iter()
            .find(|(encoder, _)| *encoder == self)
            .map(|(_, name)| *name)
            .unwrap_or("copy")
    }

    /// True for `copy` and every `copy:<codec>` encoder.
    pub fn is_passthrough(self) -> bool {
        matches!(
            self,
            AudioEncoder::AutoPassthru
                | AudioEncoder::AacPassthru
                | AudioEncoder::Ac3Passthru
                | AudioEncoder::Eac3Passthru
                | AudioEncoder::TrueHdPassthru
                | AudioEncoder::DtsPassthru
                | AudioEncoder::DtsHdPassthru
                | AudioEncoder::Mp3Passthru
                | AudioEncoder::FlacPassthru
                | AudioEncoder::OpusPassthru
        )
    }
}

impl fmt::Display for AudioEncoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

impl FromStr for AudioEncoder {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ENCODER_NAMES
            .iter()
            .find(|(_, name)| *name == wanted)
            .map(|(encoder, _)| *encoder)
            .ok_or_else(|| CoreError::UnknownEncoder(s.to_string()))
    }
}

/// Output channel layout of an encoded track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Mixdown {
    #[serde(rename = "mono")]
    Mono,
    #[serde(rename = "stereo")]
    Stereo,
    /// Dolby Surround matrix encoding
    #[serde(rename = "dpl1")]
    DolbySurround,
    /// Dolby Pro Logic II matrix encoding
    #[serde(rename = "dpl2")]
    DolbyProLogicII,
    #[serde(rename = "5point1")]
    FivePointOne,
    #[serde(rename = "6point1")]
    SixPointOne,
    #[serde(rename = "7point1")]
    SevenPointOne,
}

const MIXDOWN_NAMES: &[(Mixdown, &str)] = &[
    (Mixdown::Mono, "mono"),
    (Mixdown::Stereo, "stereo"),
    (Mixdown::DolbySurround, "dpl1"),
    (Mixdown::DolbyProLogicII, "dpl2"),
    (Mixdown::FivePointOne, "5point1"),
    (Mixdown::SixPointOne, "6point1"),
    (Mixdown::SevenPointOne, "7point1"),
];

impl Mixdown {
    pub fn short_name(self) -> &'static str {
        MIXDOWN_NAMES
            .iter()
            .find(|(mixdown, _)| *mixdown == self)
            .map(|(_, name)| *name)
            .unwrap_or("stereo")
    }

    /// Number of discrete output channels.
    pub fn channels(self) -> u32 {
        match self {
            Mixdown::Mono => 1,
            Mixdown::Stereo | Mixdown::DolbySurround | Mixdown::DolbyProLogicII => 2,
            Mixdown::FivePointOne => 6,
            Mixdown::SixPointOne => 7,
            Mixdown::SevenPointOne => 8,
        }
    }

    /// Matrix-encoded stereo that carries surround information.
    pub fn is_matrix_encoded(self) -> bool {
        matches!(self, Mixdown::DolbySurround | Mixdown::DolbyProLogicII)
    }
}

impl fmt::Display for Mixdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

impl FromStr for Mixdown {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        let wanted = match wanted.as_str() {
            "5.1" => "5point1",
            "6.1" => "6point1",
            "7.1" => "7point1",
            other => other,
        };
        MIXDOWN_NAMES
            .iter()
            .find(|(_, name)| *name == wanted)
            .map(|(mixdown, _)| *mixdown)
            .ok_or_else(|| CoreError::UnknownMixdown(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoder_short_names_round_trip() {
        for (encoder, name) in ENCODER_NAMES {
            assert_eq!(encoder.short_name(), *name);
            assert_eq!(name.parse::<AudioEncoder>().unwrap(), *encoder);
        }
    }

    #[test]
    fn test_unknown_names_fail_fast() {
        assert!(matches!(
            "x264".parse::<AudioEncoder>(),
            Err(CoreError::UnknownEncoder(name)) if name == "x264"
        ));
        assert!(matches!("atrac".parse::<AudioCodec>(), Err(CoreError::UnknownCodec(_))));
        assert!(matches!("quad".parse::<Mixdown>(), Err(CoreError::UnknownMixdown(_))));
        assert!(matches!("avi".parse::<Container>(), Err(CoreError::UnknownContainer(_))));
    }

    #[test]
    fn test_codec_aliases() {
        assert_eq!("E-AC3".parse::<AudioCodec>().unwrap(), AudioCodec::Eac3);
        assert_eq!("dts-hd".parse::<AudioCodec>().unwrap(), AudioCodec::DtsHd);
        assert_eq!("5.1".parse::<Mixdown>().unwrap(), Mixdown::FivePointOne);
    }

    #[test]
    fn test_passthrough_classification() {
        assert!(AudioEncoder::AutoPassthru.is_passthrough());
        assert!(AudioEncoder::Ac3Passthru.is_passthrough());
        assert!(!AudioEncoder::Ac3.is_passthrough());
        assert!(!AudioEncoder::FdkHeAac.is_passthrough());
    }

    #[test]
    fn test_samples_per_frame() {
        assert_eq!(AudioCodec::Aac.samples_per_frame(), 1024);
        assert_eq!(AudioCodec::Mp3.samples_per_frame(), 1152);
        assert_eq!(AudioCodec::Ac3.samples_per_frame(), 1536);
        assert_eq!(AudioCodec::Dts.samples_per_frame(), 1536);
        assert_eq!(AudioCodec::Other.samples_per_frame(), 1536);
    }

    #[test]
    fn test_serde_uses_short_names() {
        let json = serde_json::to_string(&AudioEncoder::Ac3Passthru).unwrap();
        assert_eq!(json, "\"copy:ac3\"");
        let mixdown: Mixdown = serde_json::from_str("\"5point1\"").unwrap();
        assert_eq!(mixdown, Mixdown::FivePointOne);
    }
}
