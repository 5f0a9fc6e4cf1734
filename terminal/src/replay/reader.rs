use anyhow::{Context, Result};
use common::MatchReplay;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Extensions of gzip compressed match documents.
const COMPRESSED_EXTENSIONS: [&str; 2] = ["replay", "gz"];

/// Extensions picked up when scanning a directory.
const REPLAY_EXTENSIONS: [&str; 3] = ["replay", "gz", "json"];

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}

pub struct ReplayReader;

impl ReplayReader {
    pub fn load_replay(path: &Path) -> Result<MatchReplay> {
        let file =
            File::open(path).with_context(|| format!("Failed to open replay file: {:?}", path))?;
        let mut reader: Box<dyn Read> = if has_extension(path, &COMPRESSED_EXTENSIONS) {
            Box::new(GzDecoder::new(BufReader::new(file)))
        } else {
            Box::new(BufReader::new(file))
        };

        let mut json = String::new();
        reader
            .read_to_string(&mut json)
            .with_context(|| format!("Failed to read replay file: {:?}", path))?;
        if json.trim().is_empty() {
            anyhow::bail!("Replay file is empty: {:?}", path);
        }

        let replay = MatchReplay::from_json(&json)
            .with_context(|| format!("Failed to load replay from {:?}", path))?;
        tracing::debug!(?path, players = replay.players.len(), "Loaded replay");
        Ok(replay)
    }

    /// Write a match document, compressed when the extension asks for it.
    pub fn save_replay(path: &Path, replay: &MatchReplay) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create replay directory: {:?}", parent))?;
        }
        let json = serde_json::to_string(replay).context("Failed to serialize replay")?;
        let file = File::create(path)
            .with_context(|| format!("Failed to create replay file: {:?}", path))?;

        if has_extension(path, &COMPRESSED_EXTENSIONS) {
            let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
            encoder.write_all(json.as_bytes())?;
            encoder.finish()?.flush()?;
        } else {
            let mut writer = BufWriter::new(file);
            writer.write_all(json.as_bytes())?;
            writer.flush()?;
        }
        Ok(())
    }

    pub fn list_replays(dir: &Path) -> Result<Vec<PathBuf>> {
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut replays = Vec::new();

        fn find_replay_files(dir: &Path, replays: &mut Vec<PathBuf>) -> Result<()> {
            for entry in fs::read_dir(dir)? {
                let entry = entry?;
                let path = entry.path();

                if path.is_dir() {
                    // Unreadable subdirectories are skipped rather than failing the listing
                    find_replay_files(&path, replays).ok();
                } else if has_extension(&path, &REPLAY_EXTENSIONS) {
                    replays.push(path);
                }
            }
            Ok(())
        }

        find_replay_files(dir, &mut replays)?;

        // Newest first
        replays.sort_by(|a, b| {
            let a_time = a
                .metadata()
                .and_then(|m| m.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            let b_time = b
                .metadata()
                .and_then(|m| m.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            b_time.cmp(&a_time)
        });

        Ok(replays)
    }
}
