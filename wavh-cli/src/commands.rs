use std::{
    fs::{self, File},
    io,
    path::{Path, PathBuf},
};

use log::{debug, info, warn};
use tempfile::NamedTempFile;
use wavh_core::{copy_wav, read_header_from_path, SampleEncoding, WavHeader};

use crate::{CliError, CliResult};

/// Формат вывода `inspect`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Читает заголовки файлов и возвращает их текстовое представление.
///
/// При `strict` каждый заголовок дополнительно проверяется на
/// согласованность; первая же ошибка прерывает обработку.
pub fn inspect(
    paths: &[PathBuf],
    format: OutputFormat,
    strict: bool,
) -> CliResult<String> {
    let mut out = String::new();

    for (i, path) in paths.iter().enumerate() {
        let header = read_header_from_path(path)?;

        if strict {
            header.validate()?;
        }
        if header.channel_count() > 2 {
            warn!("{path:?}: {} channels", header.channel_count());
        }

        match format {
            OutputFormat::Text => {
                if paths.len() > 1 {
                    if i > 0 {
                        out.push('\n');
                    }
                    out.push_str(&format!("== {} ==\n", path.display()));
                }
                out.push_str(&header.to_string());
            }
            OutputFormat::Json => {
                out.push_str(&serde_json::to_string_pretty(&header)?);
                out.push('\n');
            }
        }

        let encoding = SampleEncoding::from_i16(header.sample_encoding())
            .map(|e| e.name())
            .unwrap_or("unknown");
        info!(
            "{path:?}: {encoding}, {:.3} s, header {} bytes, payload {} bytes",
            header.duration_secs(),
            header.byte_length(),
            header.payload_byte_length()
        );
    }

    Ok(out)
}

/// Копирует WAV файл через кодек. При `verify` заголовок копии читается
/// заново и сравнивается с исходным.
///
/// Копия пишется во временный файл рядом с `dst` и переименовывается
/// только после успешной записи: при ошибке `dst` не трогается.
pub fn copy(
    src: &Path,
    dst: &Path,
    verify: bool,
) -> CliResult<WavHeader> {
    if src == dst || same_file(src, dst)? {
        return Err(CliError::InvalidArgument(format!(
            "source and destination are the same file: {src:?} -> {dst:?}"
        )));
    }

    let dir = match dst.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let tmp = NamedTempFile::new_in(dir)?;
    debug!("Copying via temporary file {:?}", tmp.path());

    let header = copy_wav(File::open(src)?, tmp.as_file())?;
    fs::set_permissions(tmp.path(), fs::metadata(src)?.permissions())?;
    tmp.persist(dst).map_err(|e| CliError::Io(e.error))?;

    info!(
        "Copied {src:?} -> {dst:?}: {} payload bytes",
        header.payload_byte_length()
    );

    if verify {
        let copied = read_header_from_path(dst)?;
        if copied != header {
            return Err(CliError::VerifyMismatch(dst.to_path_buf()));
        }
        info!("Verified: headers agree");
    }

    Ok(header)
}

/// Указывают ли пути на один файл после раскрытия ссылок и `..`.
/// Несуществующий `dst` не может совпадать с `src`.
fn same_file(
    src: &Path,
    dst: &Path,
) -> CliResult<bool> {
    let src = fs::canonicalize(src)?;
    let dst = match fs::canonicalize(dst) {
        Ok(path) => path,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e.into()),
    };

    Ok(src == dst)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::{write_tone, ChannelLayout, ToneConfig};

    fn make_tone(
        dir: &Path,
        name: &str,
        layout: ChannelLayout,
    ) -> PathBuf {
        let config = ToneConfig {
            layout,
            duration_secs: 1,
            output_path: dir.join(name),
            ..ToneConfig::default()
        };
        write_tone(&config).unwrap();
        config.output_path
    }

    #[test]
    fn test_inspect_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = make_tone(dir.path(), "a.wav", ChannelLayout::Stereo);

        let out = inspect(&[path], OutputFormat::Text, true).unwrap();

        assert!(out.starts_with("container_tag        RIFF\n"));
        assert!(out.contains("channel_count        2\n"));
        assert!(out.contains("data_size            176400\n"));
        assert!(!out.contains("=="));
    }

    #[test]
    fn test_inspect_several_files() {
        let dir = tempfile::tempdir().unwrap();
        let a = make_tone(dir.path(), "a.wav", ChannelLayout::Mono);
        let b = make_tone(dir.path(), "b.wav", ChannelLayout::Stereo);

        let out = inspect(&[a, b], OutputFormat::Text, false).unwrap();

        assert!(out.contains("a.wav =="));
        assert!(out.contains("b.wav =="));
        assert_eq!(out.matches("container_tag").count(), 2);
    }

    #[test]
    fn test_inspect_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = make_tone(dir.path(), "a.wav", ChannelLayout::Mono);

        let out = inspect(&[path], OutputFormat::Json, false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["sample_rate"], 44_100);
        assert_eq!(value["data_chunk_tag"], "data");
    }

    #[test]
    fn test_inspect_strict_rejects_foreign_tag() {
        let dir = tempfile::tempdir().unwrap();
        let path = make_tone(dir.path(), "a.wav", ChannelLayout::Mono);

        let mut raw = fs::read(&path).unwrap();
        raw[8..12].copy_from_slice(b"WAVX");
        fs::write(&path, raw).unwrap();

        let lenient = inspect(&[path.clone()], OutputFormat::Text, false).unwrap();
        assert!(lenient.contains("format_tag           WAVX\n"));

        let strict = inspect(&[path], OutputFormat::Text, true);
        assert!(matches!(strict, Err(CliError::Wav(_))));
    }

    #[test]
    fn test_copy_verify() {
        let dir = tempfile::tempdir().unwrap();
        let src = make_tone(dir.path(), "src.wav", ChannelLayout::Stereo);
        let dst = dir.path().join("dst.wav");

        let header = copy(&src, &dst, true).unwrap();

        assert_eq!(header.channel_count(), 2);
        assert_eq!(fs::read(&src).unwrap(), fs::read(&dst).unwrap());
    }

    #[test]
    fn test_copy_same_path() {
        let dir = tempfile::tempdir().unwrap();
        let src = make_tone(dir.path(), "src.wav", ChannelLayout::Mono);

        assert!(matches!(
            copy(&src, &src, false),
            Err(CliError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_copy_same_file_other_spelling() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        let src = make_tone(dir.path(), "src.wav", ChannelLayout::Mono);
        let before = fs::read(&src).unwrap();

        let alias = dir.path().join("sub").join("..").join("src.wav");
        assert!(matches!(
            copy(&src, &alias, false),
            Err(CliError::InvalidArgument(_))
        ));
        assert_eq!(fs::read(&src).unwrap(), before);
    }

    #[cfg(unix)]
    #[test]
    fn test_copy_onto_symlink_keeps_source() {
        let dir = tempfile::tempdir().unwrap();
        let src = make_tone(dir.path(), "src.wav", ChannelLayout::Mono);
        let link = dir.path().join("link.wav");
        std::os::unix::fs::symlink(&src, &link).unwrap();
        let before = fs::read(&src).unwrap();

        assert!(matches!(
            copy(&src, &link, false),
            Err(CliError::InvalidArgument(_))
        ));
        assert_eq!(fs::read(&src).unwrap(), before);
        assert_eq!(before.len(), 44 + 88_200);
    }

    #[test]
    fn test_copy_onto_hard_link_keeps_source() {
        let dir = tempfile::tempdir().unwrap();
        let src = make_tone(dir.path(), "src.wav", ChannelLayout::Stereo);
        let link = dir.path().join("link.wav");
        fs::hard_link(&src, &link).unwrap();
        let before = fs::read(&src).unwrap();

        copy(&src, &link, true).unwrap();

        assert_eq!(fs::read(&src).unwrap(), before);
        assert_eq!(fs::read(&link).unwrap(), before);
    }

    #[test]
    fn test_copy_failure_leaves_destination() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("notes.txt");
        fs::write(&src, b"not audio").unwrap();
        let dst = dir.path().join("dst.wav");
        fs::write(&dst, b"keep me").unwrap();

        assert!(matches!(copy(&src, &dst, false), Err(CliError::Wav(_))));
        assert_eq!(fs::read(&dst).unwrap(), b"keep me");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
    }
}
