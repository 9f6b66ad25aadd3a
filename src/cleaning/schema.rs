//! Clean export model and the record validators that produce it.

use super::report::{indexed, join, ValidationReport};
use super::rules;
use crate::types::{JsonObject, PostId};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::BTreeMap;

/// One `<item>` after cleaning.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanWordPressItem {
    pub title: String,
    pub link: String,
    pub pub_date: Option<DateTime<Utc>>,
    pub encoded: Vec<String>,
    pub guid: String,
    pub post_id: PostId,
    pub post_parent: PostId,
    pub post_type: String,
    pub category: Vec<String>,
    pub tag: Vec<String>,
    pub attachment_url: Option<String>,
    /// `meta_key` → decoded `meta_value`
    pub postmeta: JsonObject,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CleanAuthor {
    pub author_id: i64,
    pub author_login: String,
    pub author_email: String,
    pub author_display_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CleanCategory {
    pub term_id: i64,
    pub category_nicename: String,
    pub category_parent: String,
    pub cat_name: String,
    pub termmeta: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CleanTag {
    pub term_id: i64,
    pub tag_slug: String,
    pub tag_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CleanChannel {
    pub title: String,
    pub link: String,
    pub description: String,
    pub author: CleanAuthor,
    pub category: Vec<CleanCategory>,
    pub tag: Vec<CleanTag>,
    pub item: Vec<CleanWordPressItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CleanRss {
    pub channel: CleanChannel,
}

/// The whole export after cleaning.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanWordPressData {
    pub rss: CleanRss,
}

/// Validate one `<item>`.
pub fn item(value: &Value, path: &str, report: &mut ValidationReport) -> Option<CleanWordPressItem> {
    let fields = rules::object(Some(value), path, report)?;
    let field = |key: &str| (fields.get(key), join(path, key));

    let (v, p) = field("title");
    let title = rules::cdata_string(v, &p, report);
    let (v, p) = field("link");
    let link = rules::url(v, &p, report);
    let (v, p) = field("pubDate");
    let pub_date = rules::optional_date(v, &p, report);
    let (v, p) = field("encoded");
    let encoded = rules::string_list(v, &p, report);
    let (v, p) = field("guid");
    let guid = rules::string(v, &p, report);
    let (v, p) = field("post_id");
    let post_id = rules::integer(v, &p, report);
    let (v, p) = field("post_parent");
    let post_parent = rules::integer(v, &p, report);
    let (v, p) = field("post_type");
    let post_type = rules::cdata_string(v, &p, report);
    let (v, p) = field("category");
    let category = rules::string_list(v, &p, report);
    let (v, p) = field("tag");
    let tag = rules::string_list(v, &p, report);
    let (v, p) = field("attachment_url");
    let attachment_url = rules::optional_cdata_string(v, &p, report);
    let (v, p) = field("postmeta");
    let postmeta = rules::key_value_list(v, &p, report, rules::serialized_meta);

    Some(CleanWordPressItem {
        title: title?,
        link: link?,
        pub_date: pub_date?,
        encoded: encoded?,
        guid: guid?,
        post_id: post_id?,
        post_parent: post_parent?,
        post_type: post_type?,
        category: category?,
        tag: tag?,
        attachment_url: attachment_url?,
        postmeta: postmeta?.into_iter().collect(),
    })
}

/// Validate one `<wp:category>`.
pub fn category(value: &Value, path: &str, report: &mut ValidationReport) -> Option<CleanCategory> {
    let fields = rules::object(Some(value), path, report)?;

    let term_id = rules::integer(fields.get("term_id"), &join(path, "term_id"), report);
    let category_nicename = rules::cdata_string(
        fields.get("category_nicename"),
        &join(path, "category_nicename"),
        report,
    );
    let category_parent = rules::cdata_string(
        fields.get("category_parent"),
        &join(path, "category_parent"),
        report,
    );
    let cat_name = rules::cdata_string(fields.get("cat_name"), &join(path, "cat_name"), report);
    let termmeta = rules::key_value_list(
        fields.get("termmeta"),
        &join(path, "termmeta"),
        report,
        rules::cdata_string,
    );

    Some(CleanCategory {
        term_id: term_id?,
        category_nicename: category_nicename?,
        category_parent: category_parent?,
        cat_name: cat_name?,
        termmeta: termmeta?.into_iter().collect(),
    })
}

/// Validate one `<wp:tag>`.
pub fn tag(value: &Value, path: &str, report: &mut ValidationReport) -> Option<CleanTag> {
    let fields = rules::object(Some(value), path, report)?;

    let term_id = rules::integer(fields.get("term_id"), &join(path, "term_id"), report);
    let tag_slug = rules::cdata_string(fields.get("tag_slug"), &join(path, "tag_slug"), report);
    let tag_name = rules::cdata_string(fields.get("tag_name"), &join(path, "tag_name"), report);

    Some(CleanTag {
        term_id: term_id?,
        tag_slug: tag_slug?,
        tag_name: tag_name?,
    })
}

/// Validate the `<wp:author>` block.
pub fn author(value: Option<&Value>, path: &str, report: &mut ValidationReport) -> Option<CleanAuthor> {
    let fields = rules::object(value, path, report)?;

    let author_id = rules::integer(fields.get("author_id"), &join(path, "author_id"), report);
    let author_login =
        rules::cdata_string(fields.get("author_login"), &join(path, "author_login"), report);
    let author_email =
        rules::email(fields.get("author_email"), &join(path, "author_email"), report);
    let author_display_name = rules::cdata_string(
        fields.get("author_display_name"),
        &join(path, "author_display_name"),
        report,
    );

    Some(CleanAuthor {
        author_id: author_id?,
        author_login: author_login?,
        author_email: author_email?,
        author_display_name: author_display_name?,
    })
}

/// Validate every element of a required array with `rule`.
///
/// Returns `None` if the array is missing or any element was rejected.
pub fn list<T>(
    value: Option<&Value>,
    path: &str,
    report: &mut ValidationReport,
    rule: impl Fn(&Value, &str, &mut ValidationReport) -> Option<T>,
) -> Option<Vec<T>> {
    let entries = rules::array(value, path, report)?;
    let mut out = Vec::with_capacity(entries.len());
    let mut valid = true;
    for (i, entry) in entries.iter().enumerate() {
        match rule(entry, &indexed(path, i), report) {
            Some(record) => out.push(record),
            None => valid = false,
        }
    }
    valid.then_some(out)
}
