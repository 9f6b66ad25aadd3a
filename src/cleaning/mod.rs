//! Input Cleaning
//!
//! Turns the loosely-typed XML-derived JSON export into [`CleanWordPressData`].
//! Field rules live in [`rules`], record shapes in [`schema`]. Validation
//! collects every issue it finds. Anything wrong outside an `<item>` is
//! fatal; item issues are handled according to [`IssuePolicy`].

pub mod report;
pub mod rules;
pub mod schema;
pub mod wrapped;

pub use report::{ValidationError, ValidationIssue, ValidationReport};
pub use schema::{
    CleanAuthor, CleanCategory, CleanChannel, CleanRss, CleanTag, CleanWordPressData,
    CleanWordPressItem,
};
pub use wrapped::{unwrap, Wrapped};

use report::{indexed, join};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

/// What to do with an item that fails validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssuePolicy {
    /// Fail the whole run, reporting every issue.
    #[default]
    Abort,
    /// Drop the offending items and continue.
    Skip,
}

/// Outcome of validating a document.
#[derive(Debug, Clone)]
pub struct ValidatedExport {
    pub data: CleanWordPressData,
    /// Issues of items dropped under [`IssuePolicy::Skip`]
    pub skipped: ValidationReport,
    pub skipped_items: usize,
}

/// Validate a raw export, aborting on any issue.
pub fn validate(raw: &Value) -> Result<CleanWordPressData, ValidationError> {
    validate_with_policy(raw, IssuePolicy::Abort).map(|validated| validated.data)
}

/// Validate a raw export with an explicit item-issue policy.
pub fn validate_with_policy(
    raw: &Value,
    policy: IssuePolicy,
) -> Result<ValidatedExport, ValidationError> {
    let mut report = ValidationReport::new();

    let rss = rules::object(raw.get("rss"), "rss", &mut report);
    let channel_path = join("rss", "channel");
    let Some(channel) = rss.and_then(|rss| rules::object(rss.get("channel"), &channel_path, &mut report))
    else {
        return Err(ValidationError::new(report));
    };
    let field = |key: &str| (channel.get(key), join(&channel_path, key));

    let (v, p) = field("title");
    let title = rules::string(v, &p, &mut report);
    let (v, p) = field("link");
    let link = rules::url(v, &p, &mut report);
    let (v, p) = field("description");
    let description = rules::string(v, &p, &mut report);
    let (v, p) = field("author");
    let author = schema::author(v, &p, &mut report);
    let (v, p) = field("category");
    let categories = schema::list(v, &p, &mut report, schema::category);
    let (v, p) = field("tag");
    let tags = schema::list(v, &p, &mut report, schema::tag);

    let (v, item_path) = field("item");
    let raw_items = rules::array(v, &item_path, &mut report);

    let mut items = Vec::new();
    let mut item_issues = ValidationReport::new();
    let mut skipped_items = 0;
    for (i, raw_item) in raw_items.into_iter().flatten().enumerate() {
        let mut issues = ValidationReport::new();
        match schema::item(raw_item, &indexed(&item_path, i), &mut issues) {
            Some(item) if issues.is_valid() => items.push(item),
            _ => {
                skipped_items += 1;
                item_issues.extend(issues);
            }
        }
    }

    let (Some(title), Some(link), Some(description), Some(author), Some(category), Some(tag)) =
        (title, link, description, author, categories, tags)
    else {
        report.extend(item_issues);
        return Err(ValidationError::new(report));
    };
    if raw_items.is_none() || !report.is_valid() {
        report.extend(item_issues);
        return Err(ValidationError::new(report));
    }

    if !item_issues.is_valid() {
        match policy {
            IssuePolicy::Abort => return Err(ValidationError::new(item_issues)),
            IssuePolicy::Skip => {
                for issue in item_issues.iter() {
                    warn!(path = %issue.path, "Skipping invalid item: {}", issue.message);
                }
            }
        }
    }

    debug!(
        items = items.len(),
        skipped = skipped_items,
        "Validated export"
    );

    Ok(ValidatedExport {
        data: CleanWordPressData {
            rss: CleanRss {
                channel: CleanChannel {
                    title,
                    link,
                    description,
                    author,
                    category,
                    tag,
                    item: items,
                },
            },
        },
        skipped: item_issues,
        skipped_items,
    })
}
