//! Blog posts.

use super::coerce::{lenient_parsed, optional_datetime, string_list, string_or_null};
use super::{Attachment, StoredRecord};
use crate::error::{CoreError, Result};
use crate::id::RecordId;
use crate::slug::slugify;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

string_enum! {
    /// Topic a blog post is filed under.
    BlogCategory ("blog category") {
        /// Tech
        Tech => "Tech",
        /// Business
        Business => "Business",
        /// Lifestyle
        Lifestyle => "Lifestyle",
        /// Education
        Education => "Education",
        /// Entertainment
        Entertainment => "Entertainment",
        /// Health
        Health => "Health",
        /// Travel
        Travel => "Travel",
        /// Food
        Food => "Food",
        /// Sports
        Sports => "Sports",
        /// Other
        Other => "Other",
    }
}

string_enum! {
    /// Publication state of a post.
    BlogStatus ("blog status") {
        /// Work in progress, hidden.
        Draft => "draft",
        /// Publicly readable.
        Published => "published",
        /// Withdrawn, hidden.
        Archived => "archived",
    }
}

impl Default for BlogStatus {
    fn default() -> Self {
        Self::Draft
    }
}

/// A published or draft article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    /// Backend id.
    pub id: RecordId,

    /// Title.
    #[serde(default, deserialize_with = "string_or_null")]
    pub title: String,

    /// Stored slug, if the editor saved one.
    #[serde(default, deserialize_with = "string_or_null")]
    pub slug: String,

    /// HTML body.
    #[serde(default, deserialize_with = "string_or_null")]
    pub content: String,

    /// Topic.
    #[serde(default, deserialize_with = "lenient_parsed")]
    pub category: Option<BlogCategory>,

    /// Tags.
    #[serde(default, deserialize_with = "string_list")]
    pub tags: Vec<String>,

    /// Author display name.
    #[serde(default, deserialize_with = "string_or_null")]
    pub author: String,

    /// Stored featured image filename, empty when none.
    #[serde(default, deserialize_with = "string_or_null")]
    pub featured_image: String,

    /// Publication state.
    pub status: BlogStatus,

    /// Creation timestamp, backend managed.
    #[serde(default, deserialize_with = "optional_datetime")]
    pub created: Option<DateTime<Utc>>,

    /// Last update timestamp, backend managed.
    #[serde(default, deserialize_with = "optional_datetime")]
    pub updated: Option<DateTime<Utc>>,
}

impl BlogPost {
    /// Featured image file field name.
    pub const IMAGE_FIELD: &'static str = "featured_image";

    /// Returns `true` if the post appears in public listings.
    #[must_use]
    pub fn is_published(&self) -> bool {
        self.status == BlogStatus::Published
    }

    /// Plain-text excerpt of the body, at most `max_chars` characters
    /// followed by `...` when truncated.
    #[must_use]
    pub fn excerpt(&self, max_chars: usize) -> String {
        let text = strip_tags(&self.content);
        if text.chars().count() > max_chars {
            let mut cut: String = text.chars().take(max_chars).collect();
            cut.push_str("...");
            cut
        } else {
            text
        }
    }
}

impl StoredRecord for BlogPost {
    const COLLECTION: &'static str = "blogs";

    fn record_id(&self) -> &RecordId {
        &self.id
    }

    fn file_name(&self, field: &str) -> Option<&str> {
        match field {
            Self::IMAGE_FIELD if !self.featured_image.is_empty() => Some(&self.featured_image),
            _ => None,
        }
    }
}

fn strip_tags(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }
    text
}

/// Editor form for a new post.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewBlogPost {
    /// Title (required).
    pub title: String,
    /// Slug; derived from the title when left empty.
    pub slug: String,
    /// HTML body (required).
    pub content: String,
    /// Topic (required).
    pub category: Option<BlogCategory>,
    /// Tags.
    pub tags: Vec<String>,
    /// Author display name.
    pub author: String,
    /// Initial publication state.
    pub status: BlogStatus,
    /// Optional featured image upload.
    pub featured_image: Option<Attachment>,
}

impl NewBlogPost {
    /// Start a draft with the required fields.
    #[must_use]
    pub fn new(title: impl Into<String>, content: impl Into<String>, category: BlogCategory) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            category: Some(category),
            ..Self::default()
        }
    }

    /// Check required fields.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] naming the first missing field.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(CoreError::validation("title", "Title is required"));
        }
        if self.content.trim().is_empty() {
            return Err(CoreError::validation("content", "Content is required"));
        }
        if self.category.is_none() {
            return Err(CoreError::validation("category", "Category is required"));
        }
        Ok(())
    }

    /// Non-empty text fields in backend naming. The image is not included.
    #[must_use]
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let slug = if self.slug.trim().is_empty() {
            slugify(&self.title)
        } else {
            slugify(&self.slug)
        };

        let mut fields = vec![
            ("title", self.title.clone()),
            ("slug", slug),
            ("content", self.content.clone()),
            ("status", self.status.as_str().to_string()),
        ];
        if let Some(category) = self.category {
            fields.push(("category", category.as_str().to_string()));
        }
        if !self.tags.is_empty() {
            fields.push(("tags", self.tags.join(", ")));
        }
        if !self.author.trim().is_empty() {
            fields.push(("author", self.author.clone()));
        }

        fields.retain(|(_, value)| !value.trim().is_empty());
        fields
    }
}

/// Partial edit of an existing post. Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlogPostUpdate {
    /// New title.
    pub title: Option<String>,
    /// New HTML body.
    pub content: Option<String>,
    /// New topic.
    pub category: Option<BlogCategory>,
    /// Replacement tag list.
    pub tags: Option<Vec<String>>,
    /// New author.
    pub author: Option<String>,
    /// New publication state.
    pub status: Option<BlogStatus>,
    /// Replacement featured image.
    pub featured_image: Option<Attachment>,
}

impl BlogPostUpdate {
    /// Check that no field is being blanked out.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if `title` or `content` is set to blank.
    pub fn validate(&self) -> Result<()> {
        if self.title.as_deref().is_some_and(|title| title.trim().is_empty()) {
            return Err(CoreError::validation("title", "Title cannot be blank"));
        }
        if self.content.as_deref().is_some_and(|content| content.trim().is_empty()) {
            return Err(CoreError::validation("content", "Content cannot be blank"));
        }
        Ok(())
    }

    /// Text fields that are set, in backend naming.
    #[must_use]
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        if let Some(title) = &self.title {
            fields.push(("title", title.clone()));
        }
        if let Some(content) = &self.content {
            fields.push(("content", content.clone()));
        }
        if let Some(category) = self.category {
            fields.push(("category", category.as_str().to_string()));
        }
        if let Some(tags) = &self.tags {
            fields.push(("tags", tags.join(", ")));
        }
        if let Some(author) = &self.author {
            fields.push(("author", author.clone()));
        }
        if let Some(status) = self.status {
            fields.push(("status", status.as_str().to_string()));
        }
        fields
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn post() -> BlogPost {
        serde_json::from_value(json!({
            "id": "blog42",
            "title": "Planning Your First Conference Talk",
            "content": "<h2>Start early</h2><p>Pick a topic you love.</p>",
            "category": "Education",
            "tags": "speaking, tips",
            "author": "Editorial Team",
            "featured_image": "talk_x1y2.png",
            "status": "published",
            "created": "2025-02-01 10:00:00.000Z",
            "updated": "2025-02-02 10:00:00.000Z"
        }))
        .unwrap()
    }

    #[test]
    fn test_deserialize_backend_record() {
        let post = post();
        assert_eq!(post.category, Some(BlogCategory::Education));
        assert_eq!(post.tags, vec!["speaking", "tips"]);
        assert!(post.is_published());
        assert_eq!(post.file_name(BlogPost::IMAGE_FIELD), Some("talk_x1y2.png"));
        assert_eq!(post.file_name("thumbnail"), None);
    }

    #[test]
    fn test_excerpt_strips_markup() {
        let post = post();
        assert_eq!(post.excerpt(200), "Start earlyPick a topic you love.");
        assert_eq!(post.excerpt(5), "Start...");
    }

    #[test]
    fn test_new_post_defaults_to_draft_with_derived_slug() {
        let form = NewBlogPost::new("Hello, World!", "<p>hi</p>", BlogCategory::Tech);
        assert!(form.validate().is_ok());

        let fields = form.form_fields();
        assert!(fields.contains(&("slug", "hello-world".to_string())));
        assert!(fields.contains(&("status", "draft".to_string())));
        assert!(fields.contains(&("category", "Tech".to_string())));
        assert!(!fields.iter().any(|(key, _)| *key == "author"));
    }

    #[test]
    fn test_new_post_validation() {
        let mut form = NewBlogPost::new("Title", "", BlogCategory::Food);
        assert!(matches!(
            form.validate(),
            Err(CoreError::Validation { field: "content", .. })
        ));
        form.content = "<p>body</p>".to_string();
        form.category = None;
        assert!(matches!(
            form.validate(),
            Err(CoreError::Validation { field: "category", .. })
        ));
    }

    #[test]
    fn test_update_only_sends_set_fields() {
        let update = BlogPostUpdate {
            status: Some(BlogStatus::Archived),
            ..BlogPostUpdate::default()
        };
        assert_eq!(update.form_fields(), vec![("status", "archived".to_string())]);

        let blank = BlogPostUpdate {
            title: Some(" ".to_string()),
            ..BlogPostUpdate::default()
        };
        assert!(blank.validate().is_err());
    }
}
