//! Run Orchestration
//!
//! One conversion run: read the export, clear the output directory, validate,
//! build the hierarchy, project every accepted item and write the results.
//! [`convert`] is the pure middle part and does no I/O.

use crate::cleaning::{self, CleanWordPressItem, IssuePolicy, ValidationReport};
use crate::config::SacConfig;
use crate::error::ApiError;
use crate::hierarchy::{build_from_items, HierarchyMap, UidGenerator};
use crate::output::OutputWriter;
use crate::projector::project;
use crate::sac::{ItemEntry, SacItem, SacItemRootType};
use crate::slug::slugify;
use crate::types::{is_accepted_type, PostId};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// File name (without extension) of the top-level manifest.
pub const ROOT_FILE: &str = "root";

/// File name (without extension) of the combined item list.
pub const ITEMS_FILE: &str = "items";

/// Counts for one finished run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Items present in the export
    pub total_items: usize,
    /// Items of an accepted post type that passed validation
    pub accepted: usize,
    pub skipped_type: usize,
    /// Items dropped by validation under the skip policy
    pub skipped_invalid: usize,
    pub projected: usize,
    pub orphans: usize,
    pub files_written: usize,
    pub elapsed_ms: u128,
}

/// Result of converting a list of clean items.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub tree: HierarchyMap,
    /// Projected items in input order
    pub items: Vec<SacItem>,
    pub skipped_type: usize,
    /// Accepted items that produced no output record
    pub unprojected: usize,
    origins: Vec<(PostId, String)>,
}

impl Conversion {
    /// Manifest listing the top-level uids in display order.
    pub fn root(&self) -> SacItemRootType {
        SacItemRootType {
            uids: Some(self.tree.root().child_uids.clone()),
        }
    }

    /// Per-item file records, parallel to [`Conversion::items`].
    pub fn entries(&self) -> impl Iterator<Item = ItemEntry> + '_ {
        self.items
            .iter()
            .zip(&self.origins)
            .map(|(item, (post_id, post_type))| ItemEntry {
                slug: item.slug().map(str::to_string),
                data: item.clone(),
                uids: self.tree.get(*post_id).cloned(),
                item_type: Some(post_type.clone()),
            })
    }

    pub fn orphans(&self) -> usize {
        self.tree.orphans().count()
    }
}

/// Build the hierarchy and project every accepted item.
///
/// When a post id occurs twice only the later item is projected, matching the
/// node the hierarchy keeps.
pub fn convert(items: &[CleanWordPressItem], uids: &mut dyn UidGenerator) -> Conversion {
    let tree = build_from_items(items, uids);

    // only accepted items own a node, so only they can supersede one
    let last_seen: HashMap<PostId, usize> = items
        .iter()
        .enumerate()
        .filter(|(_, item)| is_accepted_type(&item.post_type))
        .map(|(i, item)| (item.post_id, i))
        .collect();

    let mut projected = Vec::with_capacity(items.len());
    let mut origins = Vec::with_capacity(items.len());
    let mut skipped_type = 0;
    let mut unprojected = 0;

    for (i, item) in items.iter().enumerate() {
        if !is_accepted_type(&item.post_type) {
            debug!(post_id = item.post_id, post_type = %item.post_type, "Skipping unsupported post type");
            skipped_type += 1;
            continue;
        }
        if last_seen.get(&item.post_id) != Some(&i) {
            debug!(post_id = item.post_id, "Skipping item superseded by a later duplicate");
            unprojected += 1;
            continue;
        }
        match project(item, &tree) {
            Some(mut sac) => {
                sac.set_slug(slugify(&item.title));
                origins.push((item.post_id, item.post_type.clone()));
                projected.push(sac);
            }
            None => unprojected += 1,
        }
    }

    Conversion {
        tree,
        items: projected,
        skipped_type,
        unprojected,
        origins,
    }
}

/// Read and parse the export file.
pub fn read_input(path: &Path) -> Result<Value, ApiError> {
    let text = fs::read_to_string(path).map_err(|e| ApiError::io(path, e))?;
    serde_json::from_str(&text).map_err(|e| ApiError::json(path, e))
}

/// Execute a full run as configured.
///
/// The output directory is cleared before validation, so a failed run leaves
/// it empty.
pub fn run(config: &SacConfig) -> Result<RunReport, ApiError> {
    let started = Instant::now();
    info!(input = %config.input.display(), output = %config.output_dir.display(), "Starting conversion");

    let raw = read_input(&config.input)?;
    let writer = OutputWriter::new(&config.output_dir);
    writer.clear()?;

    let validated = cleaning::validate_with_policy(&raw, config.on_item_issue)?;
    let items = validated.data.rss.channel.item;

    let mut uids = config.uid.generator();
    let conversion = convert(&items, uids.as_mut());

    let mut files_written = 0;
    if config.write_individual_items {
        for entry in conversion.entries() {
            writer.write_json(&entry.data.uid, &entry)?;
            files_written += 1;
        }
    } else {
        writer.write_json(ITEMS_FILE, &conversion.items)?;
        files_written += 1;
    }
    writer.write_json(ROOT_FILE, &conversion.root())?;
    files_written += 1;

    let report = RunReport {
        total_items: items.len() + validated.skipped_items,
        accepted: items.len() - conversion.skipped_type,
        skipped_type: conversion.skipped_type,
        skipped_invalid: validated.skipped_items,
        projected: conversion.items.len(),
        orphans: conversion.orphans(),
        files_written,
        elapsed_ms: started.elapsed().as_millis(),
    };
    info!(
        projected = report.projected,
        skipped_type = report.skipped_type,
        skipped_invalid = report.skipped_invalid,
        orphans = report.orphans,
        files = report.files_written,
        elapsed_ms = report.elapsed_ms as u64,
        "Conversion finished"
    );
    Ok(report)
}

/// Outcome of validating an export without converting it.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CheckReport {
    pub total_items: usize,
    pub valid_items: usize,
    /// Document-level issues were found; a run would abort regardless of policy
    pub fatal: bool,
    pub issues: ValidationReport,
}

impl CheckReport {
    pub fn is_valid(&self) -> bool {
        self.issues.is_valid()
    }
}

/// Validate the export at `path`, collecting every issue.
pub fn check(path: &Path) -> Result<CheckReport, ApiError> {
    let raw = read_input(path)?;
    let total_items = raw
        .pointer("/rss/channel/item")
        .and_then(Value::as_array)
        .map_or(0, Vec::len);

    let report = match cleaning::validate_with_policy(&raw, IssuePolicy::Skip) {
        Ok(validated) => CheckReport {
            total_items,
            valid_items: validated.data.rss.channel.item.len(),
            fatal: false,
            issues: validated.skipped,
        },
        Err(err) => CheckReport {
            total_items,
            valid_items: 0,
            fatal: true,
            issues: err.report,
        },
    };
    info!(
        total = report.total_items,
        valid = report.valid_items,
        issues = report.issues.len(),
        "Checked export"
    );
    Ok(report)
}
