//! Per-entry pipeline and the bounded fan-out over entries.
//!
//! Keeps up to `max_concurrent` entries in flight on blocking threads; when
//! one finishes the next is started until all entries are done. A failed
//! entry never cancels its siblings.

use std::path::PathBuf;
use std::sync::Arc;

use crate::error::{EntryError, FetchError};
use crate::fetch::{fetch_schema, DocumentReader, HttpClient};
use crate::naming::{resolve_output_path, NamingRules};
use crate::output::{write_schema, FileWriter};
use crate::source::classify;

use super::report::{ExtractionReport, WrittenSchema};

/// Everything one entry needs, shared by all tasks of a run.
pub(super) struct EntryContext {
    pub http: Arc<dyn HttpClient>,
    pub documents: Arc<dyn DocumentReader>,
    pub writer: Arc<dyn FileWriter>,
    pub rules: NamingRules,
    pub root: PathBuf,
}

/// Classify, name, fetch and write one reference.
pub(super) fn extract_entry(ctx: &EntryContext, reference: &str) -> Result<WrittenSchema, EntryError> {
    let failed = |cause: FetchError| EntryError::ExtractionFailed {
        reference: reference.to_string(),
        cause,
    };

    let source = classify(reference).map_err(failed)?;
    let relative = resolve_output_path(reference, &source, &ctx.rules)?;
    let schema = fetch_schema(&source, ctx.http.as_ref(), ctx.documents.as_ref()).map_err(failed)?;
    let path = write_schema(ctx.writer.as_ref(), &ctx.root, &relative, &schema).map_err(failed)?;

    tracing::debug!(reference, path = %path.display(), "schema written");
    Ok(WrittenSchema {
        reference: reference.to_string(),
        path,
    })
}

/// Runs every entry with at most `max_concurrent` in flight and collects the outcomes.
///
/// An entry whose task panics or is cancelled is reported as
/// `ExtractionFailed` with a `TaskFailed` cause.
pub(super) async fn run_entries(
    ctx: Arc<EntryContext>,
    entries: Vec<String>,
    max_concurrent: usize,
) -> ExtractionReport {
    let max_concurrent = max_concurrent.max(1);
    let mut slots: Vec<Option<Result<WrittenSchema, EntryError>>> =
        entries.iter().map(|_| None).collect();
    let mut pending = entries.iter().cloned().enumerate();
    let mut join_set = tokio::task::JoinSet::new();
    let mut last_join_error = None;

    loop {
        while join_set.len() < max_concurrent {
            let Some((index, reference)) = pending.next() else {
                break;
            };
            let ctx = Arc::clone(&ctx);
            join_set.spawn_blocking(move || (index, extract_entry(&ctx, &reference)));
        }

        let Some(res) = join_set.join_next().await else {
            break;
        };
        match res {
            Ok((index, outcome)) => slots[index] = Some(outcome),
            Err(e) => {
                tracing::error!("entry task join: {}", e);
                last_join_error = Some(e.to_string());
            }
        }
    }

    let mut report = ExtractionReport::default();
    for (reference, slot) in entries.into_iter().zip(slots) {
        let outcome = slot.unwrap_or_else(|| {
            Err(EntryError::ExtractionFailed {
                cause: FetchError::TaskFailed {
                    reason: last_join_error
                        .clone()
                        .unwrap_or_else(|| "task did not finish".to_string()),
                },
                reference,
            })
        });
        match outcome {
            Ok(written) => report.written.push(written),
            Err(e) => {
                tracing::warn!(reference = e.reference(), "{}", e);
                report.failures.push(e);
            }
        }
    }
    report
}
