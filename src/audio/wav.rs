use std::io::Cursor;

use anyhow::{Context, Result};

use super::synth::Pcm;

/// Encode PCM (f32 interleaved) as an in-memory 32-bit float WAV file.
pub fn pcm_to_wav_bytes(pcm: &Pcm) -> Result<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::new());
    let spec = hound::WavSpec {
        channels: pcm.channels,
        sample_rate: pcm.sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut writer = hound::WavWriter::new(&mut cursor, spec).context("WAV writer creation")?;
    for &sample in &pcm.samples {
        writer.write_sample(sample).context("WAV sample write")?;
    }
    writer.finalize().context("WAV finalize")?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::synth;

    #[test]
    fn encodes_header_and_samples() {
        let pcm = synth::woodblock();
        let bytes = pcm_to_wav_bytes(&pcm).unwrap();
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WAVE");

        let reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, synth::CUE_SAMPLE_RATE);
        assert_eq!(reader.len() as usize, pcm.samples.len());
    }
}
