use std::{f64::consts::TAU, fs::File};

use log::info;
use wavh_core::{WavHeader, WavWriter, CD_SAMPLE_RATE, WAV_HEADER_SIZE};

use crate::{ChannelLayout, CliError, CliResult, ToneConfig};

/// Синусоида частоты `freq_hz` длиной `len` выборок при 44 100 Гц.
pub fn sine_wave(
    freq_hz: u64,
    amplitude: i16,
    len: usize,
) -> Vec<i16> {
    let amp = amplitude as f64;
    let step = TAU * freq_hz as f64 / CD_SAMPLE_RATE as f64;

    (0..len).map(|i| (amp * (step * i as f64).sin()) as i16).collect()
}

/// Генерирует тон по конфигурации и пишет его в `config.output_path`.
pub fn write_tone(config: &ToneConfig) -> CliResult<WavHeader> {
    let n = config.samples_per_channel();
    let channels: u64 = match config.layout {
        ChannelLayout::Mono => 1,
        ChannelLayout::Stereo => 2,
    };

    // data_size и container_size должны уместиться в u32
    let payload = n as u64 * channels * 2;
    if payload > u32::MAX as u64 - (WAV_HEADER_SIZE as u64 - 8) {
        return Err(CliError::InvalidArgument(format!(
            "duration {} s does not fit in a WAV file ({payload} payload bytes)",
            config.duration_secs
        )));
    }

    let left = sine_wave(config.left_freq_hz, config.amplitude, n);
    let file = File::create(&config.output_path)?;

    let header = match config.layout {
        ChannelLayout::Mono => {
            let header = WavHeader::for_mono_cd_audio(&left);
            let mut writer = WavWriter::new(file, header.clone())?;
            writer.write_samples(&left)?;
            writer.finish()?;
            header
        }
        ChannelLayout::Stereo => {
            let right = sine_wave(config.right_freq_hz, config.amplitude, n);
            let header = WavHeader::for_stereo_cd_audio(&left, &right)?;
            let mut writer = WavWriter::new(file, header.clone())?;
            writer.write_frames(&left, &right)?;
            writer.finish()?;
            header
        }
    };

    info!(
        "Tone written: {:?} ({}, {} samples/channel, {} bytes)",
        config.output_path,
        config.layout,
        n,
        header.byte_length() + header.payload_byte_length()
    );

    Ok(header)
}
