//! Share artifact files.
//!
//! Each holder's `ShareBox` is stored as one JSON list in a file named
//! `<stem>_share_<holder>.key`. The first element is the format tag, the
//! rest are share tokens, e.g. `["keysplit-v1","2-9f03c1","2-11ab"]`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::error::{Error, Result};
use crate::share::Share;
use crate::sharebox::ShareBox;

const KEY_EXTENSION: &str = "key";
const SHARE_MARKERS: [&str; 2] = ["_share_", "_private_share_"];

/// Format tag leading every artifact this version writes.
pub const ARTIFACT_TAG: &str = "keysplit-v1";
const TAG_PREFIX: &str = "keysplit-v";

/// Renders a box as its tagged JSON list of tokens.
pub fn emit_artifact(share_box: &ShareBox) -> Result<String> {
    let mut list = vec![ARTIFACT_TAG.to_string()];

    list.extend(share_box.tokens());
    Ok(serde_json::to_string(&list)?)
}

/// Parses a tagged JSON list of share tokens. Only a list of strings whose
/// first element is `ARTIFACT_TAG` and whose other elements are valid
/// tokens, all for the same holder, is accepted.
pub fn parse_artifact(text: &str) -> Result<ShareBox> {
    let list: Vec<String> = serde_json::from_str(text).map_err(|e| {
        Error::Decode(format!("share artifact is not a JSON list of tokens: {}", e))
    })?;

    let tokens = match list.split_first() {
        Some((tag, tokens)) if tag == ARTIFACT_TAG => tokens,
        Some((tag, _)) if tag.starts_with(TAG_PREFIX) => {
            return Err(Error::Decode(format!(
                "unsupported share artifact version {:?}",
                tag
            )))
        }
        _ => {
            return Err(Error::Decode(format!(
                "share artifact does not start with {:?}",
                ARTIFACT_TAG
            )))
        }
    };

    let shares = tokens
        .iter()
        .map(|token| token.parse::<Share>())
        .collect::<Result<Vec<_>>>()?;

    let mut share_box = ShareBox::new();
    share_box.init(shares)?;

    Ok(share_box)
}

pub fn read_artifact(path: &Path) -> Result<ShareBox> {
    debug!("reading share artifact {}", path.display());

    parse_artifact(&fs::read_to_string(path)?)
}

pub fn write_artifact(path: &Path, share_box: &ShareBox) -> Result<()> {
    fs::write(path, emit_artifact(share_box)?)?;

    Ok(())
}

pub fn share_file_name(stem: &str, holder: u32) -> String {
    format!("{}_share_{}.{}", stem, holder, KEY_EXTENSION)
}

pub fn combined_file_name(stem: &str) -> String {
    format!("{}_combined_private.{}", stem, KEY_EXTENSION)
}

/// File name of `path` without its extension.
pub fn key_stem(path: &Path) -> Result<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_string)
        .ok_or_else(|| {
            Error::InvalidParameters(format!("{} has no usable file name", path.display()))
        })
}

/// Writes every box to `<dir>/<stem>_share_<holder>.key` and returns the
/// paths in holder order.
pub fn write_split(artifacts: &[ShareBox], dir: &Path, stem: &str) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::with_capacity(artifacts.len());

    for share_box in artifacts {
        let path = dir.join(share_file_name(stem, share_box.holder));

        write_artifact(&path, share_box)?;
        paths.push(path);
    }

    info!("wrote {} share files to {}", paths.len(), dir.display());

    Ok(paths)
}

fn is_key_file(path: &Path) -> bool {
    path.is_file() && path.extension().map_or(false, |ext| ext == KEY_EXTENSION)
}

fn file_name(path: &Path) -> &str {
    path.file_name().and_then(|name| name.to_str()).unwrap_or("")
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;

    entries.sort();
    Ok(entries)
}

/// The single `.key` file in `dir` that is not itself a share.
pub fn find_key_file(dir: &Path) -> Result<PathBuf> {
    let mut candidates: Vec<PathBuf> = sorted_entries(dir)?
        .into_iter()
        .filter(|path| is_key_file(path))
        .filter(|path| !file_name(path).contains("share_"))
        .collect();

    match candidates.len() {
        0 => Err(Error::Io(std::io::Error::new(
            ErrorKind::NotFound,
            format!("no .key file found in {}", dir.display()),
        ))),
        1 => Ok(candidates.remove(0)),
        _ => Err(Error::InvalidParameters(format!(
            "several .key files found in {}: {}",
            dir.display(),
            candidates
                .iter()
                .map(|path| file_name(path).to_string())
                .collect::<Vec<_>>()
                .join(", ")
        ))),
    }
}

/// Share files of `stem` in `dir`, both `<stem>_share_<n>.key` and
/// `<stem>_private_share_<n>.key`, sorted by name.
pub fn find_share_files(dir: &Path, stem: &str) -> Result<Vec<PathBuf>> {
    let prefixes: Vec<String> = SHARE_MARKERS
        .iter()
        .map(|marker| format!("{}{}", stem, marker))
        .collect();

    let paths: Vec<PathBuf> = sorted_entries(dir)?
        .into_iter()
        .filter(|path| is_key_file(path))
        .filter(|path| {
            let name = file_name(path);
            prefixes.iter().any(|prefix| name.starts_with(prefix.as_str()))
        })
        .collect();

    if paths.is_empty() {
        return Err(Error::Io(std::io::Error::new(
            ErrorKind::NotFound,
            format!("no share files for {:?} found in {}", stem, dir.display()),
        )));
    }

    Ok(paths)
}
