use std::path::{Path, PathBuf};
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use thiserror::Error;

/// Failures surfaced before the beat pipeline ever sees a sample.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("failed to open audio file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unsupported or unrecognized audio format: {0}")]
    UnsupportedFormat(#[source] SymphoniaError),
    #[error("no audio tracks found")]
    NoTrack,
    #[error("unknown sample rate")]
    UnknownSampleRate,
    #[error("audio decoding failed: {0}")]
    Decoder(#[source] SymphoniaError),
    #[error("audio stream contained no samples")]
    Empty,
}

/// Mono PCM ready for analysis.
#[derive(Clone, Debug)]
pub struct AudioData {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl AudioData {
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

pub fn decode_audio(path: &Path) -> Result<AudioData, DecodeError> {
    let file = std::fs::File::open(path).map_err(|source| DecodeError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
        .map_err(DecodeError::UnsupportedFormat)?;

    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != symphonia::core::codecs::CODEC_TYPE_NULL)
        .ok_or(DecodeError::NoTrack)?;

    let track_id = track.id;
    let channels = track.codec_params.channels.map_or(1, |c| c.count());
    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or(DecodeError::UnknownSampleRate)?;

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(DecodeError::Decoder)?;

    let mut mono: Vec<f32> = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(ref e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                break;
            }
            Err(e) => return Err(DecodeError::Decoder(e)),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(d) => d,
            Err(SymphoniaError::DecodeError(msg)) => {
                log::debug!("Skipping undecodable packet: {}", msg);
                continue;
            }
            Err(e) => return Err(DecodeError::Decoder(e)),
        };

        let spec = *decoded.spec();
        let num_frames = decoded.frames();

        let mut sample_buf = SampleBuffer::<f32>::new(num_frames as u64, spec);
        sample_buf.copy_interleaved_ref(decoded);

        first_channel_into(&mut mono, sample_buf.samples(), channels);
    }

    if mono.is_empty() {
        return Err(DecodeError::Empty);
    }

    let audio = AudioData {
        samples: mono,
        sample_rate,
    };

    log::info!(
        "Decoded audio: {} samples, {}Hz, {:.2}s",
        audio.samples.len(),
        audio.sample_rate,
        audio.duration_secs()
    );

    Ok(audio)
}

/// Keep channel 0 of each interleaved frame, appending to `out`.
///
/// Analysis runs on one channel; the others are dropped rather than mixed.
fn first_channel_into(out: &mut Vec<f32>, interleaved: &[f32], channels: usize) {
    if channels <= 1 {
        out.extend_from_slice(interleaved);
        return;
    }
    out.extend(interleaved.iter().step_by(channels).copied());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stereo_keeps_left_channel() {
        let mut out = Vec::new();
        first_channel_into(&mut out, &[1.0, 0.0, 0.5, 0.5, -1.0, 1.0], 2);
        assert_eq!(out, vec![1.0, 0.5, -1.0]);
    }

    #[test]
    fn out_of_phase_stereo_is_not_cancelled() {
        let mut out = Vec::new();
        first_channel_into(&mut out, &[0.4, -0.4, 0.3, -0.3], 2);
        assert_eq!(out, vec![0.4, 0.3]);
    }

    #[test]
    fn mono_passes_through() {
        let mut out = vec![0.25];
        first_channel_into(&mut out, &[0.1, 0.2], 1);
        assert_eq!(out, vec![0.25, 0.1, 0.2]);
    }

    #[test]
    fn missing_file_is_open_error() {
        let err = decode_audio(Path::new("/definitely/not/here.wav")).unwrap_err();
        assert!(matches!(err, DecodeError::Open { .. }));
    }

    #[test]
    fn duration_from_sample_count() {
        let audio = AudioData {
            samples: vec![0.0; 22050],
            sample_rate: 44100,
        };
        assert_eq!(audio.duration_secs(), 0.5);
    }
}
