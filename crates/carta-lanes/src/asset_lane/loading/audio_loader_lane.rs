// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Audio container sniffing.
//!
//! Clips are kept encoded; this lane only checks that the bytes are a
//! container the mixer can play and reads the WAV header when there is one.

use super::super::{AssetLoaderLane, BoxError};
use anyhow::{bail, Context, Result};
use carta_core::asset::{AssetData, AssetDefinition, AudioClip, AudioFormat, WavInfo};
use std::io::Cursor;

/// A lane that validates audio clips.
#[derive(Debug, Clone, Copy, Default)]
pub struct AudioLoaderLane;

impl AssetLoaderLane for AudioLoaderLane {
    fn load(&self, _definition: &AssetDefinition, bytes: &[u8]) -> Result<AssetData, BoxError> {
        let format = sniff_format(bytes)?;
        let wav = match format {
            AudioFormat::Wav => Some(read_wav_info(bytes)?),
            AudioFormat::Ogg | AudioFormat::Mp3 => None,
        };

        Ok(AssetData::Audio(AudioClip {
            format,
            wav,
            bytes: bytes.to_vec(),
        }))
    }
}

fn sniff_format(bytes: &[u8]) -> Result<AudioFormat> {
    match bytes {
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'A', b'V', b'E', ..] => Ok(AudioFormat::Wav),
        [b'O', b'g', b'g', b'S', ..] => Ok(AudioFormat::Ogg),
        [b'I', b'D', b'3', ..] => Ok(AudioFormat::Mp3),
        [0xFF, second, ..] if second & 0xE0 == 0xE0 => Ok(AudioFormat::Mp3),
        _ => bail!("unrecognised audio container"),
    }
}

fn read_wav_info(bytes: &[u8]) -> Result<WavInfo> {
    let reader = hound::WavReader::new(Cursor::new(bytes)).context("Invalid WAV header")?;
    let spec = reader.spec();
    Ok(WavInfo {
        sample_rate: spec.sample_rate,
        channels: spec.channels,
        duration_frames: reader.duration(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wav_bytes() -> Vec<u8> {
        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: 22_050,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
            for i in 0..100i16 {
                writer.write_sample(i).unwrap();
                writer.write_sample(-i).unwrap();
            }
            writer.finalize().unwrap();
        }
        cursor.into_inner()
    }

    #[test]
    fn test_wav_header_is_read() {
        let def = AssetDefinition::new("steps", "steps.wav", carta_core::asset::MediaKind::Audio);
        let data = AudioLoaderLane.load(&def, &wav_bytes()).unwrap();
        let AssetData::Audio(clip) = data else {
            panic!("expected audio");
        };
        assert_eq!(clip.format, AudioFormat::Wav);
        assert_eq!(
            clip.wav,
            Some(WavInfo {
                sample_rate: 22_050,
                channels: 2,
                duration_frames: 100
            })
        );
    }

    #[test]
    fn test_sniff_other_containers() {
        assert_eq!(sniff_format(b"OggS\0\0").unwrap(), AudioFormat::Ogg);
        assert_eq!(sniff_format(b"ID3\x04").unwrap(), AudioFormat::Mp3);
        assert_eq!(sniff_format(&[0xFF, 0xFB, 0x90]).unwrap(), AudioFormat::Mp3);
        assert!(sniff_format(b"<html>").is_err());
    }
}
