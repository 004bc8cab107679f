//! Badge processing pipeline with explicit stages.
//!
//! The pipeline follows these stages in order:
//! 1. **Ingest**: read the attendee CSV and flatten packed rows
//! 2. **Duplicates**: warn about attendees booked more than once
//! 3. **Layout**: place every attendee on the 2 x 4 page grid
//! 4. **Render**: load the logo, build the document and write it atomically
//!
//! Any stage error aborts the run before anything is written.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use badge_docx::{DocxSummary, LogoImage, write_docx};
use badge_ingest::{AttendeeList, DuplicateAttendee, find_duplicates, load_attendees};
use badge_layout::{BadgePlan, LayoutConfig, plan_badges};
use badge_model::AttendeeRecord;
use tracing::{info, info_span, trace, warn};

use crate::logging::redact_value;
use crate::types::RunResult;

/// Paths for one run, in command line order.
#[derive(Debug, Clone)]
pub struct BadgeJob {
    pub input: PathBuf,
    pub logo: PathBuf,
    pub output: PathBuf,
}

/// Run every stage for `job` with the default sheet layout.
pub fn run(job: &BadgeJob) -> Result<RunResult> {
    run_with_config(job, &LayoutConfig::default())
}

pub fn run_with_config(job: &BadgeJob, config: &LayoutConfig) -> Result<RunResult> {
    let run_span = info_span!("badges", input = %job.input.display());
    let _run_guard = run_span.enter();
    let run_start = Instant::now();

    let attendees = ingest(&job.input)?;
    let duplicates = check_duplicates(&attendees.records);
    let plan = layout(&attendees.records, config);
    let written = render(&plan, config, &job.logo, &job.output)?;

    info!(
        badges = written.badges,
        pages = written.pages,
        duration_ms = run_start.elapsed().as_millis(),
        "badge run complete"
    );
    Ok(RunResult {
        input: job.input.clone(),
        output: written.path,
        source_rows: attendees.source_rows,
        packed_rows: attendees.packed_rows,
        badges: written.badges,
        blank: attendees.blank_records,
        pages: written.pages,
        annotated: plan.annotated_count(),
        duplicates: duplicates.len(),
        bytes: written.bytes,
    })
}

// ============================================================================
// Stage 1: Ingest
// ============================================================================

pub fn ingest(input: &Path) -> Result<AttendeeList> {
    info_span!("ingest").in_scope(|| -> Result<_> {
        let start = Instant::now();
        let attendees = load_attendees(input)
            .with_context(|| format!("read attendees from {}", input.display()))?;
        for (index, record) in attendees.records.iter().enumerate() {
            let name = record.display_name();
            trace!(
                index,
                name = redact_value(&name),
                organisation = redact_value(&record.organisation),
                "attendee"
            );
        }
        info!(
            attendees = attendees.records.len(),
            rows = attendees.source_rows,
            blank = attendees.blank_records,
            additional_column = attendees.has_additional_column,
            duration_ms = start.elapsed().as_millis(),
            "ingest complete"
        );
        Ok(attendees)
    })
}

// ============================================================================
// Stage 2: Duplicates
// ============================================================================

/// Report repeated attendees. Nothing is removed.
pub fn check_duplicates(records: &[AttendeeRecord]) -> Vec<DuplicateAttendee> {
    info_span!("duplicates").in_scope(|| {
        let duplicates = find_duplicates(records);
        for duplicate in &duplicates {
            let name = records[duplicate.index].display_name();
            warn!(
                index = duplicate.index,
                first_index = duplicate.first_index,
                name = redact_value(&name),
                "attendee appears more than once; printing both badges"
            );
        }
        if !duplicates.is_empty() {
            info!(duplicates = duplicates.len(), "duplicate check complete");
        }
        duplicates
    })
}

// ============================================================================
// Stage 3: Layout
// ============================================================================

pub fn layout(records: &[AttendeeRecord], config: &LayoutConfig) -> BadgePlan {
    info_span!("layout").in_scope(|| {
        let start = Instant::now();
        let plan = plan_badges(records, config);
        info!(
            badges = plan.badge_count(),
            pages = plan.pages.len(),
            page_breaks = plan.page_breaks(),
            duration_ms = start.elapsed().as_millis(),
            "layout complete"
        );
        plan
    })
}

// ============================================================================
// Stage 4: Render
// ============================================================================

pub fn render(
    plan: &BadgePlan,
    config: &LayoutConfig,
    logo_path: &Path,
    output: &Path,
) -> Result<DocxSummary> {
    info_span!("render", output = %output.display()).in_scope(|| -> Result<_> {
        let start = Instant::now();
        let logo = LogoImage::load(logo_path)
            .with_context(|| format!("load logo {}", logo_path.display()))?;
        let (width_px, height_px) = logo.pixel_size();
        info!(
            format = logo.format().extension(),
            width_px,
            height_px,
            "logo verified"
        );
        let written = write_docx(output, plan, config, &logo)
            .with_context(|| format!("write badge document {}", output.display()))?;
        info!(
            bytes = written.bytes,
            duration_ms = start.elapsed().as_millis(),
            "render complete"
        );
        Ok(written)
    })
}
