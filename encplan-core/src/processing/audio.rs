// ============================================================================
// encplan-core/src/processing/audio.rs
// ============================================================================
//
// AUDIO TRACK RESOLUTION: Pair encodings with source tracks
//
// Each configured audio encoding is paired with the chosen source track(s)
// it targets, and each pairing is resolved to either a passthrough copy or a
// concrete encode with sanitized settings.
//
// KEY COMPONENTS:
// - Fallback selection: the encoder used when a passthrough cannot happen
// - Copy mask: the passthrough encoders any pairing may copy with
// - Per-track resolution: codec, mixdown, rate, bitrate/quality and name
//
// Pairings that point past the chosen or source track lists are skipped
// rather than failing the job, so one profile can be applied to a batch of
// heterogeneous sources.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::capabilities::{
    AudioCodec, AudioEncoder, CapabilityRegistry, Container, EncoderCapabilities, Mixdown,
};
use crate::error::{CoreError, CoreResult};
use crate::model::{
    AudioEncoding, AudioRateControl, ChosenAudioTrack, EncodingProfile, Job, SourceAudioTrack,
    SourceTitle,
};

/// Settings an encoder uses when nothing beyond the source is known.
///
/// Attached to passthrough tracks so size estimates can account for the
/// encoder silently falling back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallbackSettings {
    pub encoder: AudioEncoder,
    pub mixdown: Mixdown,
    pub sample_rate: u32,

    /// kbps, when the encoder defaults to bitrate mode
    pub bitrate: Option<u32>,

    /// When the encoder defaults to quality mode
    pub quality: Option<f64>,
}

/// One output audio track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedAudioTrack {
    /// 1-based source track number
    pub track_number: usize,

    pub source_codec: AudioCodec,

    /// Encoder actually used; a codec passthrough encoder when copying
    pub encoder: AudioEncoder,

    pub passthrough: bool,

    /// `None` for passthrough tracks
    pub mixdown: Option<Mixdown>,

    /// Output sample rate in Hz
    pub sample_rate: u32,

    /// kbps for bitrate-targeted encodes
    pub bitrate: Option<u32>,

    pub quality: Option<f64>,

    pub gain: f64,
    pub drc: f64,
    pub compression: Option<f64>,
    pub name: Option<String>,

    /// Fallback defaults for passthrough tracks, if a fallback exists
    pub fallback: Option<FallbackSettings>,
}

/// Result of audio resolution for one job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedAudio {
    pub fallback_encoder: Option<AudioEncoder>,

    /// Passthrough encoders a track is allowed to be copied with
    pub copy_mask: BTreeSet<AudioEncoder>,

    pub tracks: Vec<ResolvedAudioTrack>,
}

impl ResolvedAudio {
    /// Whether a passthrough track will actually be copied under the mask.
    pub fn copies(&self, track: &ResolvedAudioTrack) -> bool {
        track.passthrough && self.copy_mask.contains(&track.encoder)
    }
}

/// Resolves the job's audio encodings against the title's audio tracks.
///
/// Fails fast on configuration errors: an encoder missing from `registry`,
/// a passthrough fallback, or no usable fallback for the container.
pub fn resolve_audio<R>(job: &Job, title: &SourceTitle, registry: &R) -> CoreResult<ResolvedAudio>
where
    R: CapabilityRegistry + ?Sized,
{
    let profile = &job.profile;

    for encoding in &profile.audio_encodings {
        if registry.capabilities(encoding.encoder).is_none() {
            return Err(CoreError::UnknownEncoder(encoding.encoder.to_string()));
        }
    }

    let fallback_encoder = select_fallback(profile, registry)?;
    let copy_mask = build_copy_mask(profile, registry);

    let resolver = TrackResolver {
        registry,
        container: profile.container,
        fallback_encoder,
        copy_mask: &copy_mask,
    };

    let mut tracks = Vec::new();
    for (index, encoding) in profile.audio_encodings.iter().enumerate() {
        let pairings = paired_tracks(encoding, &job.chosen_audio_tracks);
        if pairings.is_empty() {
            log::debug!(
                "Audio encoding {} (input {}) has no chosen track; skipping",
                index + 1,
                encoding.input_number
            );
        }

        for chosen in pairings {
            let Some(source) = title.audio_track(chosen.track_number) else {
                log::debug!(
                    "Audio encoding {}: source has no track {}; skipping",
                    index + 1,
                    chosen.track_number
                );
                continue;
            };
            tracks.push(resolver.resolve(encoding, chosen, source)?);
        }
    }

    Ok(ResolvedAudio {
        fallback_encoder,
        copy_mask,
        tracks,
    })
}

/// Picks the fallback encoder when any encoding may pass through.
fn select_fallback<R>(profile: &EncodingProfile, registry: &R) -> CoreResult<Option<AudioEncoder>>
where
    R: CapabilityRegistry + ?Sized,
{
    let needs_fallback = profile
        .audio_encodings
        .iter()
        .any(|encoding| encoding.encoder.is_passthrough());
    if !needs_fallback {
        return Ok(None);
    }

    match profile.audio_fallback {
        Some(fallback) => {
            if fallback.is_passthrough() {
                return Err(CoreError::InvalidFallbackEncoder(fallback.to_string()));
            }
            if registry.capabilities(fallback).is_none() {
                return Err(CoreError::UnknownEncoder(fallback.to_string()));
            }
            if !registry.supports_container(fallback, profile.container) {
                log::warn!(
                    "Fallback encoder {} is not supported in {}",
                    fallback,
                    profile.container
                );
            }
            Ok(Some(fallback))
        }
        None => registry
            .first_encoder_for(profile.container)
            .map(Some)
            .ok_or(CoreError::NoFallbackEncoder {
                container: profile.container,
            }),
    }
}

fn build_copy_mask<R>(profile: &EncodingProfile, registry: &R) -> BTreeSet<AudioEncoder>
where
    R: CapabilityRegistry + ?Sized,
{
    registry
        .passthrough_encoders()
        .into_iter()
        .filter(|encoder| {
            profile
                .audio_copy_mask
                .iter()
                .find(|choice| choice.codec == *encoder)
                .is_none_or(|choice| choice.enabled)
        })
        .collect()
}

fn paired_tracks<'a>(
    encoding: &AudioEncoding,
    chosen: &'a [ChosenAudioTrack],
) -> &'a [ChosenAudioTrack] {
    match encoding.input_number {
        0 => chosen,
        n => chosen.get(n - 1).map(std::slice::from_ref).unwrap_or(&[]),
    }
}

/// Display name: a user-chosen name differing from the source, then the
/// encoding's name, then the source name.
fn resolve_name(
    chosen: &ChosenAudioTrack,
    encoding: &AudioEncoding,
    source: &SourceAudioTrack,
) -> Option<String> {
    let present = |name: &Option<String>| name.clone().filter(|n| !n.is_empty());

    present(&chosen.name)
        .filter(|name| source.name.as_deref() != Some(name.as_str()))
        .or_else(|| present(&encoding.name))
        .or_else(|| present(&source.name))
}

fn default_settings(caps: &EncoderCapabilities, source: &SourceAudioTrack) -> FallbackSettings {
    let mixdown = caps.best_mixdown(source.channels);
    let sample_rate = caps.sanitize_sample_rate(0, source.sample_rate);

    match caps.quality.filter(|_| caps.default_is_quality) {
        Some(range) => FallbackSettings {
            encoder: caps.encoder,
            mixdown,
            sample_rate,
            bitrate: None,
            quality: Some(range.default),
        },
        None => FallbackSettings {
            encoder: caps.encoder,
            mixdown,
            sample_rate,
            bitrate: Some(caps.default_bitrate(mixdown)),
            quality: None,
        },
    }
}

struct TrackResolver<'a, R: ?Sized> {
    registry: &'a R,
    container: Container,
    fallback_encoder: Option<AudioEncoder>,
    copy_mask: &'a BTreeSet<AudioEncoder>,
}

impl<R> TrackResolver<'_, R>
where
    R: CapabilityRegistry + ?Sized,
{
    fn resolve(
        &self,
        encoding: &AudioEncoding,
        chosen: &ChosenAudioTrack,
        source: &SourceAudioTrack,
    ) -> CoreResult<ResolvedAudioTrack> {
        let name = resolve_name(chosen, encoding, source);

        if encoding.encoder.is_passthrough() {
            return match self.eligible_passthrough(encoding.encoder, source.codec) {
                Some(encoder) => Ok(self.passthrough_track(chosen, source, encoder, name)),
                None => {
                    let fallback = self.fallback_encoder.ok_or(CoreError::NoFallbackEncoder {
                        container: self.container,
                    })?;
                    log::debug!(
                        "Track {} ({}) cannot pass through with {}; encoding with {}",
                        chosen.track_number,
                        source.codec,
                        encoding.encoder,
                        fallback
                    );
                    self.fallback_track(encoding, chosen, source, fallback, name)
                }
            };
        }

        if encoding.passthrough_if_possible
            && self.registry.is_bit_compatible(encoding.encoder, source.codec)
        {
            let copy = self
                .registry
                .passthrough_for(source.codec)
                .filter(|encoder| self.registry.supports_container(*encoder, self.container));
            match copy {
                Some(encoder) if self.copy_mask.contains(&encoder) => {
                    return Ok(self.passthrough_track(chosen, source, encoder, name));
                }
                Some(encoder) => log::debug!(
                    "Track {} ({}) could pass through but {} is masked; encoding with {}",
                    chosen.track_number,
                    source.codec,
                    encoder,
                    encoding.encoder
                ),
                None => {}
            }
        }

        let caps = self.caps(encoding.encoder)?;
        if !caps.supports_container(self.container) {
            log::warn!(
                "Audio encoder {} is not supported in {}; resolving anyway",
                encoding.encoder,
                self.container
            );
        }

        let mixdown = caps.sanitize_mixdown(encoding.mixdown, source.channels);
        let (bitrate, quality) = match encoding.rate_control {
            AudioRateControl::Quality(requested) => match caps.sanitize_quality(requested) {
                Some(quality) => (None, Some(quality)),
                None => (Some(caps.default_bitrate(mixdown)), None),
            },
            AudioRateControl::Bitrate(0) => {
                match caps.quality.filter(|_| caps.default_is_quality) {
                    Some(range) => (None, Some(range.default)),
                    None => (Some(caps.default_bitrate(mixdown)), None),
                }
            }
            AudioRateControl::Bitrate(requested) => {
                (Some(caps.sanitize_bitrate(mixdown, requested)), None)
            }
        };

        Ok(ResolvedAudioTrack {
            track_number: chosen.track_number,
            source_codec: source.codec,
            encoder: encoding.encoder,
            passthrough: false,
            mixdown: Some(mixdown),
            sample_rate: caps.sanitize_sample_rate(encoding.sample_rate, source.sample_rate),
            bitrate,
            quality,
            gain: encoding.gain,
            drc: encoding.drc,
            compression: caps.sanitize_compression(encoding.compression),
            name,
            fallback: None,
        })
    }

    /// The codec passthrough encoder to copy with, when allowed.
    fn eligible_passthrough(
        &self,
        configured: AudioEncoder,
        codec: AudioCodec,
    ) -> Option<AudioEncoder> {
        self.registry.passthrough_for(codec).filter(|encoder| {
            (configured == AudioEncoder::AutoPassthru || configured == *encoder)
                && self.copy_mask.contains(encoder)
                && self.registry.supports_container(*encoder, self.container)
        })
    }

    fn passthrough_track(
        &self,
        chosen: &ChosenAudioTrack,
        source: &SourceAudioTrack,
        encoder: AudioEncoder,
        name: Option<String>,
    ) -> ResolvedAudioTrack {
        let fallback = self
            .fallback_encoder
            .and_then(|fallback| self.registry.capabilities(fallback))
            .map(|caps| default_settings(caps, source));

        ResolvedAudioTrack {
            track_number: chosen.track_number,
            source_codec: source.codec,
            encoder,
            passthrough: true,
            mixdown: None,
            sample_rate: source.sample_rate,
            bitrate: None,
            quality: None,
            gain: 0.0,
            drc: 0.0,
            compression: None,
            name,
            fallback,
        }
    }

    fn fallback_track(
        &self,
        encoding: &AudioEncoding,
        chosen: &ChosenAudioTrack,
        source: &SourceAudioTrack,
        fallback: AudioEncoder,
        name: Option<String>,
    ) -> CoreResult<ResolvedAudioTrack> {
        let caps = self.caps(fallback)?;
        let settings = default_settings(caps, source);

        Ok(ResolvedAudioTrack {
            track_number: chosen.track_number,
            source_codec: source.codec,
            encoder: fallback,
            passthrough: false,
            mixdown: Some(settings.mixdown),
            sample_rate: settings.sample_rate,
            bitrate: settings.bitrate,
            quality: settings.quality,
            gain: encoding.gain,
            drc: encoding.drc,
            compression: caps.sanitize_compression(None),
            name,
            fallback: None,
        })
    }

    fn caps(&self, encoder: AudioEncoder) -> CoreResult<&EncoderCapabilities> {
        self.registry
            .capabilities(encoder)
            .ok_or_else(|| CoreError::UnknownEncoder(encoder.to_string()))
    }
}
