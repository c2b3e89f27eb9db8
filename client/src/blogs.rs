//! Blog listing, lookup and editing.

use crate::client::{PocketBaseClient, multipart_form, trace_outcome};
use crate::error::{ClientError, Result};
use crate::wire::SORT_NEWEST;
use conference_alert_core::models::StoredRecord;
use conference_alert_core::{
    BlogCategory, BlogPost, BlogPostUpdate, BlogQuery, NewBlogPost, Page, PageRequest, RecordId, slug,
};

impl PocketBaseClient {
    /// Published posts matching `query`, newest first.
    ///
    /// # Errors
    ///
    /// Returns the transport or backend error.
    #[tracing::instrument(skip(self), name = "query_blogs")]
    pub async fn query_blogs(&self, query: &BlogQuery, request: PageRequest) -> Result<Page<BlogPost>> {
        trace_outcome(
            "query_blogs",
            self.list_records(BlogPost::COLLECTION, &query.to_filter(), SORT_NEWEST, "", request)
                .await,
        )
    }

    /// Every published post.
    ///
    /// # Errors
    ///
    /// Returns the transport or backend error.
    pub async fn list_blogs(&self, request: PageRequest) -> Result<Page<BlogPost>> {
        self.query_blogs(&BlogQuery::All, request).await
    }

    /// Published posts whose title, content, tags or category contain `term`.
    ///
    /// A blank term lists every published post.
    ///
    /// # Errors
    ///
    /// Returns the transport or backend error.
    pub async fn search_blogs(&self, term: &str, request: PageRequest) -> Result<Page<BlogPost>> {
        self.query_blogs(&BlogQuery::from_selection(term, None, ""), request)
            .await
    }

    /// Published posts in `category`.
    ///
    /// # Errors
    ///
    /// Returns the transport or backend error.
    pub async fn blogs_by_category(&self, category: BlogCategory, request: PageRequest) -> Result<Page<BlogPost>> {
        self.query_blogs(&BlogQuery::Category(category), request).await
    }

    /// Published posts tagged with `tag`.
    ///
    /// # Errors
    ///
    /// Returns the transport or backend error.
    pub async fn blogs_by_tag(&self, tag: &str, request: PageRequest) -> Result<Page<BlogPost>> {
        self.query_blogs(&BlogQuery::from_selection("", None, tag), request)
            .await
    }

    /// A post by id.
    ///
    /// Drafts and archived posts are only returned to administrators.
    ///
    /// # Errors
    ///
    /// Returns the transport or backend error.
    #[tracing::instrument(skip(self), name = "get_blog")]
    pub async fn get_blog(&self, id: &RecordId) -> Result<Option<BlogPost>> {
        let post: Option<BlogPost> = trace_outcome("get_blog", self.get_record(BlogPost::COLLECTION, id).await)?;
        let is_admin = self.current_user().is_some_and(|user| user.is_superuser());
        Ok(post.filter(|post| post.is_published() || is_admin))
    }

    /// A post by its detail-page slug.
    ///
    /// # Errors
    ///
    /// Returns the transport or backend error.
    pub async fn get_blog_by_slug(&self, slug: &str) -> Result<Option<BlogPost>> {
        let Some(id) = slug::decode(slug) else {
            tracing::debug!(slug, "Slug carries no record id");
            return Ok(None);
        };
        self.get_blog(&id).await
    }

    /// Up to `limit` other published posts in the same category, newest first.
    ///
    /// A post without a category has no related posts.
    ///
    /// # Errors
    ///
    /// Returns the transport or backend error.
    pub async fn related_blogs(&self, post: &BlogPost, limit: u32) -> Result<Vec<BlogPost>> {
        let Some(category) = post.category else {
            return Ok(Vec::new());
        };
        if limit == 0 {
            return Ok(Vec::new());
        }

        // One extra so the post itself can be dropped.
        let page = self
            .blogs_by_category(category, PageRequest::first(limit.saturating_add(1)))
            .await?;

        Ok(page
            .items
            .into_iter()
            .filter(|candidate| candidate.id != post.id)
            .take(limit as usize)
            .collect())
    }

    /// Publish or draft a new post. Administrators only.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotAuthenticated`] without a session,
    /// [`ClientError::Forbidden`] for non-administrators,
    /// [`ClientError::Validation`] for a missing field, or the backend's error.
    #[tracing::instrument(skip(self, post), fields(title = %post.title), name = "create_blog")]
    pub async fn create_blog(&self, post: &NewBlogPost) -> Result<BlogPost> {
        let result = async {
            self.require_superuser()?;
            post.validate()?;

            let image = post
                .featured_image
                .as_ref()
                .map(|attachment| (BlogPost::IMAGE_FIELD, attachment));
            let form = multipart_form(post.form_fields(), image)?;

            let created: BlogPost = self.create_record(BlogPost::COLLECTION, form).await?;
            tracing::info!(blog_id = %created.id, status = %created.status, "Blog post created");
            Ok::<_, ClientError>(created)
        }
        .await;

        trace_outcome("create_blog", result)
    }

    /// Apply a partial edit to a post. Administrators only.
    ///
    /// # Errors
    ///
    /// Same as [`create_blog`](Self::create_blog).
    #[tracing::instrument(skip(self, update), name = "update_blog")]
    pub async fn update_blog(&self, id: &RecordId, update: &BlogPostUpdate) -> Result<BlogPost> {
        let result = async {
            self.require_superuser()?;
            update.validate()?;

            let image = update
                .featured_image
                .as_ref()
                .map(|attachment| (BlogPost::IMAGE_FIELD, attachment));
            let form = multipart_form(update.form_fields(), image)?;

            let updated: BlogPost = self.update_record(BlogPost::COLLECTION, id, form).await?;
            tracing::info!(blog_id = %updated.id, "Blog post updated");
            Ok::<_, ClientError>(updated)
        }
        .await;

        trace_outcome("update_blog", result)
    }

    /// Public featured image URL, or `None` if no image was uploaded.
    #[must_use]
    pub fn blog_image_url(&self, post: &BlogPost) -> Option<String> {
        self.asset_url(post, BlogPost::IMAGE_FIELD)
    }

    /// Detail-page slug for `post`.
    #[must_use]
    pub fn blog_slug(post: &BlogPost) -> String {
        slug::encode(&post.title, &post.id)
    }
}
