//! Asset hashing with side effects (copying or moving into hashed names).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::error::AssetError;
use crate::utils::hash;
use crate::utils::path::{relative_path, to_slash};
use crate::{debug, log};

use super::mapping::{HashRun, PathMapping, SkipReason};
use super::name::hashed_path;
use super::scan::{ResolvedGroup, resolve_group};
use super::FileGroup;

/// Options that shape hashed names and file placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashOptions {
    /// Move instead of copy; the original disappears.
    pub delete_originals: bool,
    /// Joins basename and hash.
    pub separator: String,
    /// Requested hash length, see [`hash::effective_len`].
    pub hash_length: usize,
    /// Compute digests of a group concurrently.
    pub parallel: bool,
}

impl Default for HashOptions {
    fn default() -> Self {
        Self {
            delete_originals: false,
            separator: ".".into(),
            hash_length: hash::MIN_LEN,
            parallel: false,
        }
    }
}

/// Hash every existing file of every group, in order.
///
/// Every group is resolved before any file is placed, so hashed copies made
/// by this run never match a later pattern.
///
/// Groups are folded into one [`HashRun`]; the order of its hashes is group
/// order, then resolution order within a group.
pub fn hash_groups(
    workdir: &Path,
    groups: &[FileGroup],
    options: &HashOptions,
) -> Result<HashRun, AssetError> {
    let resolved = groups
        .iter()
        .map(|group| resolve_group(workdir, group))
        .collect::<Result<Vec<_>, _>>()?;

    resolved.iter().try_fold(HashRun::default(), |run, group| {
        debug!("scan"; "{} candidate(s) under {}", group.files.len(), group.root.display());
        hash_group(group, options, run)
    })
}

/// Hash one resolved group onto the accumulator.
pub fn hash_group(
    group: &ResolvedGroup,
    options: &HashOptions,
    run: HashRun,
) -> Result<HashRun, AssetError> {
    let (present, run) = filter_present(&group.files, run);
    let digests = digest_files(&present, options)?;

    present
        .into_iter()
        .zip(digests)
        .try_fold(run, |run, (file, digest)| {
            place(&group.root, file, digest, options, run)
        })
}

/// Drop candidates that are not regular files, recording them as missing.
fn filter_present(files: &[PathBuf], run: HashRun) -> (Vec<&Path>, HashRun) {
    files
        .iter()
        .fold((Vec::with_capacity(files.len()), run), |(mut present, run), file| {
            if file.is_file() {
                present.push(file.as_path());
                (present, run)
            } else {
                log!("warning"; "source file \"{}\" not found", file.display());
                (present, run.skip(file, SkipReason::MissingSource))
            }
        })
}

/// Digest every file; order of the result matches `files`.
fn digest_files(files: &[&Path], options: &HashOptions) -> Result<Vec<String>, AssetError> {
    let len = options.hash_length;
    if options.parallel {
        files.par_iter().map(|file| digest_file(file, len)).collect()
    } else {
        files.iter().map(|file| digest_file(file, len)).collect()
    }
}

/// Fingerprint of a file's exact bytes.
pub fn digest_file(file: &Path, hash_length: usize) -> Result<String, AssetError> {
    let reader = fs::File::open(file).map_err(|err| AssetError::io(file, err))?;
    let digest = hash::compute_reader(reader).map_err(|err| AssetError::io(file, err))?;
    Ok(hash::truncate(digest, hash_length))
}

/// Copy or move `file` next to itself under its hashed name, then verify.
fn place(
    root: &Path,
    file: &Path,
    digest: String,
    options: &HashOptions,
    run: HashRun,
) -> Result<HashRun, AssetError> {
    let delete = options.delete_originals;
    place_with(root, file, digest, options, run, |from, to| {
        if delete {
            fs::rename(from, to)
        } else {
            fs::copy(from, to).map(|_| ())
        }
    })
}

/// Placement with the filesystem transfer supplied by the caller.
fn place_with<F>(
    root: &Path,
    file: &Path,
    digest: String,
    options: &HashOptions,
    run: HashRun,
    transfer: F,
) -> Result<HashRun, AssetError>
where
    F: FnOnce(&Path, &Path) -> io::Result<()>,
{
    let hashed = hashed_path(file, &options.separator, &digest);
    transfer(file, &hashed).map_err(|err| AssetError::io(file, err))?;

    let from = to_slash(&relative_path(root, file));
    if !hashed.is_file() {
        log!("error"; "failed hashing file \"{}\"", from);
        return Ok(run.skip(file, SkipReason::WriteFailure));
    }

    let to = to_slash(&relative_path(root, &hashed));
    log!("hash"; "{} → {}", from, to);
    Ok(run.record(digest, PathMapping::new(from, to)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn site() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("tmp/css")).unwrap();
        fs::create_dir_all(root.join("tmp/js")).unwrap();
        fs::write(root.join("tmp/css/style.min.css"), "body{color:red}").unwrap();
        fs::write(root.join("tmp/js/script.js"), "console.log(1)").unwrap();
        dir
    }

    fn group() -> FileGroup {
        FileGroup::new("tmp", ["css/style.min.css", "js/script.js"]).expanded(true)
    }

    #[test]
    fn test_copy_keeps_originals() {
        let dir = site();
        let root = dir.path();
        let run = hash_groups(root, &[group()], &HashOptions::default()).unwrap();

        let css_hash = hash::fingerprint("body{color:red}", 8);
        let js_hash = hash::fingerprint("console.log(1)", 8);
        assert_eq!(run.hashes, vec![css_hash.clone(), js_hash.clone()]);
        assert_eq!(
            run.mappings[0],
            PathMapping::new("css/style.min.css", format!("css/style.min.{css_hash}.css"))
        );
        assert_eq!(
            run.mappings[1],
            PathMapping::new("js/script.js", format!("js/script.{js_hash}.js"))
        );

        assert!(root.join("tmp/css/style.min.css").exists());
        assert!(root.join(format!("tmp/css/style.min.{css_hash}.css")).exists());
        assert!(root.join(format!("tmp/js/script.{js_hash}.js")).exists());
        assert!(run.skipped.is_empty());
    }

    #[test]
    fn test_move_deletes_originals() {
        let dir = site();
        let root = dir.path();
        let options = HashOptions {
            delete_originals: true,
            ..HashOptions::default()
        };
        let run = hash_groups(root, &[group()], &options).unwrap();

        assert_eq!(run.len(), 2);
        assert!(!root.join("tmp/css/style.min.css").exists());
        assert!(!root.join("tmp/js/script.js").exists());
        let hashed = root.join("tmp").join(&run.mappings[0].to);
        assert_eq!(fs::read_to_string(hashed).unwrap(), "body{color:red}");
    }

    #[test]
    fn test_missing_source_is_skipped() {
        let dir = site();
        let root = dir.path();
        let group = FileGroup::new("tmp", ["css/gone.css", "js/script.js"]);
        let run = hash_groups(root, &[group], &HashOptions::default()).unwrap();

        assert_eq!(run.len(), 1);
        assert_eq!(run.mappings[0].from, "js/script.js");
        assert_eq!(run.skipped.len(), 1);
        assert_eq!(run.skipped[0].path, root.join("tmp/css/gone.css"));
        assert_eq!(run.skipped[0].reason, SkipReason::MissingSource);
    }

    #[test]
    fn test_directory_candidate_is_missing_source() {
        let dir = site();
        let run = hash_groups(dir.path(), &[FileGroup::new("tmp", ["css"])], &HashOptions::default())
            .unwrap();
        assert!(run.is_empty());
        assert_eq!(run.skipped[0].reason, SkipReason::MissingSource);
    }

    #[test]
    fn test_hash_length_and_separator() {
        let dir = site();
        let options = HashOptions {
            separator: "-".into(),
            hash_length: 12,
            ..HashOptions::default()
        };
        let run = hash_groups(dir.path(), &[group()], &options).unwrap();

        let hash = &run.hashes[0];
        assert_eq!(hash.len(), 12);
        assert_eq!(run.mappings[0].to, format!("css/style.min-{hash}.css"));

        // shorter than eight is raised to eight
        let dir = site();
        let options = HashOptions {
            hash_length: 3,
            ..HashOptions::default()
        };
        let run = hash_groups(dir.path(), &[group()], &options).unwrap();
        assert!(run.hashes.iter().all(|h| h.len() == 8));
    }

    #[test]
    fn test_identical_content_identical_hash() {
        let dir = site();
        let root = dir.path();
        fs::write(root.join("tmp/js/copy.js"), "console.log(1)").unwrap();
        let group = FileGroup::new("tmp", ["js/script.js", "js/copy.js"]);
        let run = hash_groups(root, &[group], &HashOptions::default()).unwrap();
        assert_eq!(run.hashes[0], run.hashes[1]);
    }

    #[test]
    fn test_group_order_drives_hash_order() {
        let dir = site();
        let root = dir.path();
        let css = FileGroup::new("tmp/css", ["style.min.css"]);
        let js = FileGroup::new("tmp/js", ["script.js"]);
        let run = hash_groups(root, &[js, css], &HashOptions::default()).unwrap();

        assert_eq!(run.mappings[0].from, "script.js");
        assert_eq!(run.mappings[1].from, "style.min.css");
        assert_eq!(run.hashes[0], hash::fingerprint("console.log(1)", 8));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let sequential = {
            let dir = site();
            hash_groups(dir.path(), &[group()], &HashOptions::default()).unwrap()
        };
        let parallel = {
            let dir = site();
            let options = HashOptions {
                parallel: true,
                ..HashOptions::default()
            };
            hash_groups(dir.path(), &[group()], &options).unwrap()
        };
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_rerun_hashes_hashed_output_again() {
        let dir = site();
        let root = dir.path();
        let first = hash_groups(root, &[group()], &HashOptions::default()).unwrap();

        let hashed = FileGroup::new("tmp", [first.mappings[0].to.clone()]);
        let second = hash_groups(root, &[hashed], &HashOptions::default()).unwrap();

        // same bytes, so the hash repeats and the name is hashed twice
        let hash = &first.hashes[0];
        assert_eq!(
            second.mappings[0].to,
            format!("css/style.min.{hash}.{hash}.css")
        );
    }

    #[test]
    fn test_overlapping_groups_see_only_sources() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("dist/css")).unwrap();
        fs::write(root.join("dist/css/a.css"), "a{}").unwrap();

        let groups = [
            FileGroup::new("dist", ["css/*.css"]),
            FileGroup::new("dist", ["**/*.css"]),
        ];
        let run = hash_groups(root, &groups, &HashOptions::default()).unwrap();

        let hash = hash::fingerprint("a{}", 8);
        let expected = PathMapping::new("css/a.css", format!("css/a.{hash}.css"));
        assert_eq!(run.mappings, vec![expected.clone(), expected]);
        assert!(!root.join(format!("dist/css/a.{hash}.{hash}.css")).exists());
    }

    #[test]
    fn test_missing_output_is_write_failure() {
        let dir = site();
        let root = dir.path().join("tmp");
        let file = root.join("css/style.min.css");

        // transfer reports success but leaves nothing behind
        let run = place_with(
            &root,
            &file,
            "1a2b3c4d".into(),
            &HashOptions::default(),
            HashRun::default(),
            |_, _| Ok(()),
        )
        .unwrap();

        assert!(run.is_empty());
        assert!(run.hashes.is_empty());
        assert_eq!(run.skipped.len(), 1);
        assert_eq!(run.skipped[0].path, file);
        assert_eq!(run.skipped[0].reason, SkipReason::WriteFailure);
    }

    #[test]
    fn test_invalid_pattern_is_an_error() {
        let dir = site();
        let group = FileGroup::new("tmp", ["css/[oops"]);
        let err = hash_groups(dir.path(), &[group], &HashOptions::default()).unwrap_err();
        assert!(matches!(err, AssetError::Pattern(_)));
    }
}
