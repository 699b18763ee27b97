use crate::candidates::CandidateGenerator;
use crate::error::{Error, Result};
use crate::normalizer::Normalizer;
use crate::types::RecoveryResult;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info, trace};

/// Moves a file to `new_path`, looking for it under its likely historical
/// names when `old_path_guess` is not on disk.
///
/// Failed rename attempts are expected while probing and are not reported.
/// An existing `new_path` is never overwritten: the call then yields
/// [`RecoveryResult::NotFound`], which also covers a file that was already
/// renamed by an earlier run. The only error is a fault while checking
/// whether `new_path` exists.
///
/// Moves go through a hard link so that a target appearing between the
/// existence check and the move is not replaced. Filesystems without hard
/// links fall back to `rename`, where that window remains.
pub fn recover<N: Normalizer>(
    generator: &CandidateGenerator<'_, N>,
    old_path_guess: &Path,
    new_path: &Path,
) -> Result<RecoveryResult> {
    if target_exists(new_path)? {
        debug!(path = %new_path.display(), "target already exists");
        return Ok(RecoveryResult::NotFound);
    }

    if move_without_replacing(old_path_guess, new_path) {
        info!(from = %old_path_guess.display(), to = %new_path.display(), "renamed");
        return Ok(RecoveryResult::Succeeded(old_path_guess.to_path_buf()));
    }

    let Some(basename) = old_path_guess.file_name().and_then(|name| name.to_str()) else {
        return Ok(RecoveryResult::NotFound);
    };
    let directory = old_path_guess.parent().unwrap_or_else(|| Path::new(""));

    let candidates = generator.candidates_for(basename);
    debug!(basename, ?candidates, "probing candidates");

    for candidate in candidates {
        let candidate_path = directory.join(&candidate);
        if target_exists(new_path)? {
            break;
        }
        if move_without_replacing(&candidate_path, new_path) {
            info!(from = %candidate_path.display(), to = %new_path.display(), "renamed candidate");
            return Ok(RecoveryResult::Succeeded(candidate_path));
        }
    }

    Ok(RecoveryResult::NotFound)
}

fn target_exists(path: &Path) -> Result<bool> {
    path.try_exists().map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn move_without_replacing(from: &Path, to: &Path) -> bool {
    match fs::hard_link(from, to) {
        Ok(()) => match fs::remove_file(from) {
            Ok(()) => true,
            Err(err) => {
                trace!(from = %from.display(), error = %err, "source kept, undoing link");
                if let Err(err) = fs::remove_file(to) {
                    trace!(to = %to.display(), error = %err, "could not remove link");
                }
                false
            }
        },
        Err(err) if matches!(err.kind(), ErrorKind::NotFound | ErrorKind::AlreadyExists) => {
            trace!(from = %from.display(), error = %err, "move attempt failed");
            false
        }
        // no hard links here (FAT, some network mounts, directories)
        Err(err) => {
            trace!(from = %from.display(), error = %err, "hard link refused, renaming");
            if to.exists() {
                return false;
            }
            match fs::rename(from, to) {
                Ok(()) => true,
                Err(err) => {
                    trace!(from = %from.display(), error = %err, "rename attempt failed");
                    false
                }
            }
        }
    }
}
