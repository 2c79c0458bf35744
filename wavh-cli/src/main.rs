use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::{error, info};
use wavh_cli::{copy, inspect, parse_freq_hz, write_tone, ChannelLayout, OutputFormat, ToneConfig};

#[derive(Parser, Debug)]
#[command(
    name = "wavh",
    version = env!("CARGO_PKG_VERSION"),
    about = "Inspect, generate and copy WAV files",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
    /// Тихий режим (только ошибки)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Вывести заголовки WAV файлов
    Inspect {
        /// Файлы для чтения
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Вывод в JSON
        #[arg(long)]
        json: bool,
        /// Проверить теги и согласованность полей
        #[arg(long)]
        strict: bool,
    },
    /// Записать синусоидальный тон качества CD
    Tone {
        /// Путь к выходному файлу
        #[arg(short, long, default_value = "tone.wav")]
        output: PathBuf,
        /// Раскладка каналов: mono, stereo
        #[arg(short, long, default_value = "stereo")]
        layout: String,
        /// Частота левого канала (220Hz, 1kHz, 220)
        #[arg(long, default_value = "220Hz")]
        left: String,
        /// Частота правого канала
        #[arg(long, default_value = "440Hz")]
        right: String,
        /// Длительность, секунды
        #[arg(short, long, default_value = "8")]
        duration: u32,
        /// Амплитуда синусоиды
        #[arg(short, long, default_value = "24576")]
        amplitude: i16,
    },
    /// Скопировать WAV файл через кодек заголовков
    Copy {
        src: PathBuf,
        dst: PathBuf,
        /// Перечитать копию и сравнить заголовки
        #[arg(long)]
        verify: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    let level = if cli.quiet {
        log::LevelFilter::Error
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(level)
        .format_target(false)
        .format_timestamp_secs()
        .init();

    let result = match cli.command {
        Command::Inspect {
            files,
            json,
            strict,
        } => {
            let format = if json {
                OutputFormat::Json
            } else {
                OutputFormat::Text
            };
            inspect(&files, format, strict).map(|out| print!("{out}"))
        }

        Command::Tone {
            output,
            layout,
            left,
            right,
            duration,
            amplitude,
        } => {
            let config = match tone_config(output, &layout, &left, &right, duration, amplitude) {
                Ok(c) => c,
                Err(e) => {
                    error!("{e}");
                    std::process::exit(1);
                }
            };

            info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
            info!("  Layout        : {}", config.layout);
            info!("  Left          : {} Hz", config.left_freq_hz);
            if config.layout == ChannelLayout::Stereo {
                info!("  Right         : {} Hz", config.right_freq_hz);
            }
            info!("  Duration      : {} s", config.duration_secs);
            info!("  Amplitude     : {}", config.amplitude);
            info!("  Output        : {:?}", config.output_path);
            info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

            write_tone(&config).map(|_| ())
        }

        Command::Copy { src, dst, verify } => copy(&src, &dst, verify).map(|_| ()),
    };

    if let Err(e) = result {
        error!("{e}");
        std::process::exit(1);
    }
}

fn tone_config(
    output_path: PathBuf,
    layout: &str,
    left: &str,
    right: &str,
    duration_secs: u32,
    amplitude: i16,
) -> Result<ToneConfig, String> {
    let layout: ChannelLayout = layout.parse()?;
    let left_freq_hz = parse_freq_hz(left).map_err(|e| format!("--left: {e}"))?;
    let right_freq_hz = parse_freq_hz(right).map_err(|e| format!("--right: {e}"))?;

    Ok(ToneConfig {
        layout,
        left_freq_hz,
        right_freq_hz,
        amplitude,
        duration_secs,
        output_path,
    })
}
