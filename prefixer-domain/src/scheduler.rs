use crate::error::{FileError, SchedulerError};
use crate::ports::{RunObserver, SourceStore};
use crate::table::RenameTable;
use crate::worklist::{Step, Worklist};
use camino::{Utf8Path, Utf8PathBuf};
use prefixer_descriptor::{DescriptorRecord, co_located, decode, encode, namespace_group};
use prefixer_edit::{ExtractedRegions, Extraction, companion_path, extract, patch_companion, splice};
use prefixer_types::outcome::{BlockedFile, FileChange, FileResult, OutcomeKind};
use prefixer_types::policy::CompanionPolicy;
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct RenameOptions {
    /// Prepended verbatim to every committed descriptor name.
    pub prefix: String,
    /// Compute everything, write nothing.
    pub dry_run: bool,
    /// Keep before/after text of every written file in [`BatchOutcome::changes`].
    pub record_changes: bool,
    pub file_suffix: String,
    pub companion_suffix: String,
    pub companion_policy: CompanionPolicy,
}

impl Default for RenameOptions {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            dry_run: false,
            record_changes: false,
            file_suffix: ".pb.go".to_string(),
            companion_suffix: "_grpc.pb.go".to_string(),
            companion_policy: CompanionPolicy::default(),
        }
    }
}

/// Full text of a file before and after a rename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChange {
    pub path: Utf8PathBuf,
    pub before: String,
    pub after: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Termination {
    #[default]
    Completed,
    Unsatisfiable {
        blocked: Vec<BlockedFile>,
    },
    CompanionAbort {
        path: Utf8PathBuf,
        message: String,
    },
}

#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    /// One entry per candidate in the order they left the worklist, plus
    /// companion failures, plus every still-blocked file on a stall.
    pub results: Vec<FileResult>,
    pub changes: Vec<TextChange>,
    pub sweeps: u64,
    pub termination: Termination,
}

impl BatchOutcome {
    pub fn check(&self) -> Result<(), SchedulerError> {
        match &self.termination {
            Termination::Completed => Ok(()),
            Termination::Unsatisfiable { blocked } => Err(SchedulerError::Unsatisfiable {
                blocked: blocked.clone(),
            }),
            Termination::CompanionAbort { path, message } => Err(SchedulerError::CompanionAbort {
                path: path.clone(),
                message: message.clone(),
            }),
        }
    }

    pub fn has_failures(&self) -> bool {
        self.results.iter().any(|r| r.outcome.is_error())
    }
}

/// Per-entry cache so a deferred file is read and decoded only once.
#[derive(Debug)]
enum Candidate {
    Unread,
    Decoded(Box<Decoded>),
}

#[derive(Debug)]
struct Decoded {
    text: String,
    regions: ExtractedRegions,
    record: DescriptorRecord,
}

enum Visit {
    Deferred(String),
    Finished(FileResult),
    Committed(Commit),
}

struct Commit {
    result: FileResult,
    original: String,
    renamed: String,
}

pub struct Scheduler<'a> {
    store: &'a dyn SourceStore,
    observer: &'a dyn RunObserver,
    opts: RenameOptions,
}

impl<'a> Scheduler<'a> {
    pub fn new(store: &'a dyn SourceStore, observer: &'a dyn RunObserver, opts: RenameOptions) -> Self {
        Self {
            store,
            observer,
            opts,
        }
    }

    /// Drive `paths` to a fixed point, recording every commit in `table`.
    pub fn run(&self, paths: Vec<Utf8PathBuf>, table: &mut RenameTable) -> BatchOutcome {
        let mut worklist: Worklist<Candidate> =
            Worklist::new(paths.into_iter().map(|p| (p, Candidate::Unread)).collect());
        let mut outcome = BatchOutcome::default();

        loop {
            match worklist.step() {
                Step::Done => break,
                Step::Stalled(blocked) => {
                    for b in &blocked {
                        warn!(path = %b.path, dependency = %b.dependency, "unsatisfied dependency");
                        let mut result = FileResult::new(b.path.clone(), OutcomeKind::Blocked);
                        result.message = Some(format!("depends on '{}'", b.dependency));
                        self.observer.on_result(&result);
                        outcome.results.push(result);
                    }
                    outcome.termination = Termination::Unsatisfiable { blocked };
                    break;
                }
                Step::Visit => {}
            }

            let (path, candidate) = worklist.current();
            let path = path.to_path_buf();

            match self.visit(&path, candidate, table, &mut outcome.changes) {
                Visit::Deferred(dependency) => {
                    debug!(path = %path, dependency = %dependency, "dependency unprocessed, work later");
                    self.observer.on_deferred(&path, &dependency);
                    worklist.defer(dependency);
                }
                Visit::Finished(result) => {
                    worklist.finish_current();
                    self.observer.on_result(&result);
                    outcome.results.push(result);
                }
                Visit::Committed(commit) => {
                    worklist.finish_current();
                    self.observer.on_result(&commit.result);
                    outcome.results.push(commit.result);

                    if let Err(err) =
                        self.sync_companion(&path, &commit.original, &commit.renamed, &mut outcome.changes)
                    {
                        let companion = match &err {
                            FileError::Companion { path: companion, .. } => companion.clone(),
                            _ => path.clone(),
                        };
                        warn!(path = %companion, error = %err, "companion patch failed");
                        let result = FileResult::failed(companion.clone(), err.kind(), err.to_string());
                        self.observer.on_result(&result);
                        outcome.results.push(result);

                        if self.opts.companion_policy == CompanionPolicy::Abort {
                            outcome.termination = Termination::CompanionAbort {
                                path: companion,
                                message: err.to_string(),
                            };
                            break;
                        }
                    }
                }
            }
        }

        outcome.sweeps = worklist.sweeps();
        outcome
    }

    fn visit(
        &self,
        path: &Utf8Path,
        candidate: &mut Candidate,
        table: &mut RenameTable,
        changes: &mut Vec<TextChange>,
    ) -> Visit {
        if let Candidate::Unread = candidate {
            match self.load(path) {
                Ok(Loaded::Decoded(decoded)) => *candidate = Candidate::Decoded(decoded),
                Ok(Loaded::Skipped(kind)) => {
                    debug!(path = %path, outcome = ?kind, "skipping file");
                    return Visit::Finished(FileResult::new(path.to_path_buf(), kind));
                }
                Err(err) => return Visit::Finished(failed(path, &err)),
            }
        }
        let Candidate::Decoded(decoded) = candidate else {
            return Visit::Finished(FileResult::new(path.to_path_buf(), OutcomeKind::NotATarget));
        };

        // Rewrite co-located dependencies on a copy; the cached record stays
        // pristine in case this file has to wait.
        let mut record = decoded.record.clone();
        let mut rewritten = Vec::new();
        for dep in record.dependencies.iter_mut() {
            if !co_located(dep, &decoded.record.name) {
                continue;
            }
            match table.get(dep) {
                Some(renamed) => {
                    rewritten.push(renamed.to_string());
                    *dep = renamed.to_string();
                }
                None => return Visit::Deferred(dep.clone()),
            }
        }

        match self.commit(path, decoded, record, table, changes) {
            Ok(mut commit) => {
                commit.result.dependencies_rewritten = rewritten;
                Visit::Committed(commit)
            }
            Err(err) => Visit::Finished(failed(path, &err)),
        }
    }

    fn load(&self, path: &Utf8Path) -> Result<Loaded, FileError> {
        let text = self.store.read_to_string(path).map_err(FileError::Io)?;
        let regions = match extract(&text)? {
            Extraction::Target(regions) => regions,
            Extraction::NotATarget => return Ok(Loaded::Skipped(OutcomeKind::NotATarget)),
            Extraction::AlreadyProcessed => {
                return Ok(Loaded::Skipped(OutcomeKind::AlreadyProcessed));
            }
        };
        let record = decode(&regions.payload).map_err(FileError::Decode)?;
        debug!(
            path = %path,
            name = %record.name,
            group = namespace_group(&record.name),
            deps = record.dependencies.len(),
            "decoded descriptor"
        );

        Ok(Loaded::Decoded(Box::new(Decoded {
            text,
            regions,
            record,
        })))
    }

    fn commit(
        &self,
        path: &Utf8Path,
        decoded: &Decoded,
        mut record: DescriptorRecord,
        table: &mut RenameTable,
        changes: &mut Vec<TextChange>,
    ) -> Result<Commit, FileError> {
        let original = decoded.record.name.clone();
        if let Some(first) = table.source_of(&original) {
            return Err(FileError::DuplicateName {
                name: original,
                first: first.to_path_buf(),
            });
        }

        let renamed = format!("{}{}", self.opts.prefix, original);
        record.name = renamed.clone();
        let payload = encode(&record).map_err(FileError::Encode)?;
        let text = splice(
            &decoded.text,
            &decoded.regions,
            &payload,
            &self.opts.prefix,
            &renamed,
        );

        let change = self.persist(path, &decoded.text, text, changes)?;
        table
            .insert(original.clone(), renamed.clone(), path)
            .map_err(|first| FileError::DuplicateName {
                name: original.clone(),
                first,
            })?;
        info!(path = %path, from = %original, to = %renamed, "renamed descriptor");

        let mut result = FileResult::renamed(path.to_path_buf(), &original, &renamed);
        result.files.push(change);
        Ok(Commit {
            result,
            original,
            renamed,
        })
    }

    /// Keep the companion's `Metadata:` line in step with a committed rename.
    fn sync_companion(
        &self,
        base: &Utf8Path,
        from: &str,
        to: &str,
        changes: &mut Vec<TextChange>,
    ) -> Result<(), FileError> {
        let Some(path) = companion_path(base, &self.opts.file_suffix, &self.opts.companion_suffix)
        else {
            return Ok(());
        };
        if !self.store.exists(&path) {
            return Ok(());
        }

        let companion_err = |source: anyhow::Error| FileError::Companion {
            path: path.clone(),
            source,
        };
        let text = self.store.read_to_string(&path).map_err(companion_err)?;
        let patched = patch_companion(&text, from, to).map_err(|e| companion_err(e.into()))?;
        self.persist(&path, &text, patched, changes)
            .map_err(|e| match e {
                FileError::Io(source) => companion_err(source),
                other => other,
            })?;

        debug!(path = %path, from = %from, to = %to, "patched companion metadata");
        Ok(())
    }

    fn persist(
        &self,
        path: &Utf8Path,
        before: &str,
        after: String,
        changes: &mut Vec<TextChange>,
    ) -> Result<FileChange, FileError> {
        if !self.opts.dry_run {
            self.store.write(path, &after).map_err(FileError::Io)?;
        }
        let change = file_change(path, before, &after);
        if self.opts.record_changes {
            changes.push(TextChange {
                path: path.to_path_buf(),
                before: before.to_string(),
                after,
            });
        }
        Ok(change)
    }
}

enum Loaded {
    Decoded(Box<Decoded>),
    Skipped(OutcomeKind),
}

fn failed(path: &Utf8Path, err: &FileError) -> FileResult {
    warn!(path = %path, kind = err.kind(), error = %err, "dropping file");
    FileResult::failed(path.to_path_buf(), err.kind(), err.to_string())
}

fn file_change(path: &Utf8Path, before: &str, after: &str) -> FileChange {
    FileChange {
        path: path.to_path_buf(),
        sha256_before: sha256_hex(before.as_bytes()),
        sha256_after: sha256_hex(after.as_bytes()),
        bytes_before: before.len() as u64,
        bytes_after: after.len() as u64,
    }
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
