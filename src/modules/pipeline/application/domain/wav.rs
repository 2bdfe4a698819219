//! Wraps raw PCM bytes in a standards-conformant WAV header rather than
//! resampling (spec §4.6 Stage A): the capture profile is fixed at 16 kHz,
//! mono, 16-bit signed little-endian PCM.

pub const SAMPLE_RATE_HZ: u32 = 16_000;
pub const CHANNELS: u16 = 1;
pub const BITS_PER_SAMPLE: u16 = 16;

/// Returns `true` for container formats that already carry their own header
/// (no wrapping needed) based on the stored MIME type or key extension.
pub fn is_already_containerized(content_type: &str, object_key: &str) -> bool {
    let lower_type = content_type.to_ascii_lowercase();
    if lower_type.contains("wav") || lower_type.contains("mp4") || lower_type.contains("m4a") {
        return true;
    }
    let lower_key = object_key.to_ascii_lowercase();
    lower_key.ends_with(".wav") || lower_key.ends_with(".m4a") || lower_key.ends_with(".mp4")
}

/// Wraps `pcm` (raw 16 kHz/mono/16-bit-signed-LE samples) in a 44-byte
/// canonical WAV header and returns the full file bytes.
pub fn wrap_pcm_as_wav(pcm: &[u8]) -> Vec<u8> {
    let byte_rate = SAMPLE_RATE_HZ * u32::from(CHANNELS) * u32::from(BITS_PER_SAMPLE) / 8;
    let block_align = CHANNELS * BITS_PER_SAMPLE / 8;
    let data_len = pcm.len() as u32;
    let riff_len = 36 + data_len;

    let mut out = Vec::with_capacity(44 + pcm.len());
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&riff_len.to_le_bytes());
    out.extend_from_slice(b"WAVE");

    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // PCM
    out.extend_from_slice(&CHANNELS.to_le_bytes());
    out.extend_from_slice(&SAMPLE_RATE_HZ.to_le_bytes());
    out.extend_from_slice(&byte_rate.to_le_bytes());
    out.extend_from_slice(&block_align.to_le_bytes());
    out.extend_from_slice(&BITS_PER_SAMPLE.to_le_bytes());

    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    out.extend_from_slice(pcm);

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapped_header_reports_the_fixed_capture_profile() {
        let wav = wrap_pcm_as_wav(&[0u8; 100]);
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
        let channels = u16::from_le_bytes([wav[22], wav[23]]);
        let sample_rate = u32::from_le_bytes([wav[24], wav[25], wav[26], wav[27]]);
        let bits = u16::from_le_bytes([wav[34], wav[35]]);
        assert_eq!(channels, 1);
        assert_eq!(sample_rate, 16_000);
        assert_eq!(bits, 16);
        assert_eq!(wav.len(), 144);
    }

    #[test]
    fn wav_extension_is_recognized_as_already_containerized() {
        assert!(is_already_containerized("audio/wav", "sessions/x/audio/y.wav"));
        assert!(!is_already_containerized(
            "audio/l16",
            "sessions/x/audio/y.pcm"
        ));
    }
}
