//! Event listing, search, lookup and submission.

use crate::client::{PocketBaseClient, multipart_form, trace_outcome};
use crate::error::{ClientError, Result};
use crate::wire::{EXPAND_SUBMITTER, SORT_BY_START_DATE, SORT_NEWEST, SORT_SOONEST};
use conference_alert_core::filter::{upcoming_filter, user_events_filter};
use conference_alert_core::models::StoredRecord;
use conference_alert_core::pagination::MAX_PAGE_SIZE;
use conference_alert_core::{
    Event, EventStats, EventStatus, Filter, NewEvent, Page, PageRequest, RecordId, SearchCriteria, calendar,
    slug,
};

impl PocketBaseClient {
    /// Newest events first, with the submitter expanded.
    ///
    /// `filter` narrows the listing; an empty filter lists everything the
    /// caller may see.
    ///
    /// # Errors
    ///
    /// Returns the transport or backend error.
    #[tracing::instrument(skip(self, filter), fields(filter = %filter), name = "list_events")]
    pub async fn list_events(&self, filter: &Filter, request: PageRequest) -> Result<Page<Event>> {
        trace_outcome(
            "list_events",
            self.list_records(Event::COLLECTION, filter, SORT_NEWEST, EXPAND_SUBMITTER, request)
                .await,
        )
    }

    /// Events matching `filter`, latest start date first, with the
    /// submitter expanded.
    ///
    /// # Errors
    ///
    /// Returns the transport or backend error.
    #[tracing::instrument(skip(self, filter), fields(filter = %filter), name = "search_events")]
    pub async fn search_events(&self, filter: &Filter, request: PageRequest) -> Result<Page<Event>> {
        trace_outcome(
            "search_events",
            self.list_records(Event::COLLECTION, filter, SORT_BY_START_DATE, EXPAND_SUBMITTER, request)
                .await,
        )
    }

    /// Accepted events matching `criteria`.
    ///
    /// # Errors
    ///
    /// Returns the transport or backend error.
    pub async fn find_events(&self, criteria: &SearchCriteria, request: PageRequest) -> Result<Page<Event>> {
        self.search_events(&criteria.to_filter(), request).await
    }

    /// An event by id, or `None` if it does not exist or is not visible.
    ///
    /// # Errors
    ///
    /// Returns the transport or backend error.
    #[tracing::instrument(skip(self), name = "get_event")]
    pub async fn get_event(&self, id: &RecordId) -> Result<Option<Event>> {
        trace_outcome("get_event", self.get_record(Event::COLLECTION, id).await)
    }

    /// An event by its detail-page slug.
    ///
    /// A slug that does not end in a well-formed id finds nothing.
    ///
    /// # Errors
    ///
    /// Returns the transport or backend error.
    pub async fn get_event_by_slug(&self, slug: &str) -> Result<Option<Event>> {
        let Some(id) = slug::decode(slug) else {
            tracing::debug!(slug, "Slug carries no record id");
            return Ok(None);
        };
        self.get_event(&id).await
    }

    /// Submit an event for moderation.
    ///
    /// The record is stamped with the signed-in user and the `pending`
    /// status; callers cannot choose either.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotAuthenticated`] without a session,
    /// [`ClientError::Validation`] if a required field is missing, or the
    /// backend's error.
    #[tracing::instrument(skip(self, event), fields(name = %event.name), name = "create_event")]
    pub async fn create_event(&self, event: &NewEvent) -> Result<Event> {
        let result = async {
            let session = self.require_session()?;
            event.validate()?;

            let mut fields = event.form_fields();
            fields.push(("submitted_by", session.user().id.to_string()));
            fields.push(("status", EventStatus::Pending.as_str().to_string()));

            let thumbnail = event
                .thumbnail
                .as_ref()
                .map(|attachment| (Event::THUMBNAIL_FIELD, attachment));
            let form = multipart_form(fields, thumbnail)?;

            let created: Event = self.create_record(Event::COLLECTION, form).await?;
            tracing::info!(event_id = %created.id, user_id = %session.user().id, "Event submitted");
            Ok::<_, ClientError>(created)
        }
        .await;

        trace_outcome("create_event", result)
    }

    /// Events submitted by `user_id`, newest first, whatever their status.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotAuthenticated`] without a session, or the
    /// transport or backend error.
    #[tracing::instrument(skip(self), name = "get_user_events")]
    pub async fn get_user_events(&self, user_id: &RecordId, request: PageRequest) -> Result<Page<Event>> {
        let result = match self.require_session() {
            Ok(_) => {
                self.list_records(Event::COLLECTION, &user_events_filter(user_id), SORT_NEWEST, "", request)
                    .await
            }
            Err(error) => Err(error),
        };
        trace_outcome("get_user_events", result)
    }

    /// Status counts over every event the signed-in user submitted.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotAuthenticated`] without a session, or the
    /// transport or backend error.
    pub async fn my_event_stats(&self) -> Result<EventStats> {
        let session = self.require_session()?;
        let user_id = session.user().id.clone();

        let mut request = PageRequest::first(MAX_PAGE_SIZE);
        let mut stats = EventStats::default();
        loop {
            let page = self.get_user_events(&user_id, request).await?;
            let tally = EventStats::tally(&page.items);
            stats.total += tally.total;
            stats.pending += tally.pending;
            stats.accepted += tally.accepted;
            stats.rejected += tally.rejected;

            if !page.has_next() {
                return Ok(stats);
            }
            request = request.next();
        }
    }

    /// The next `limit` accepted events starting today or later, soonest
    /// first.
    ///
    /// # Errors
    ///
    /// Returns the transport or backend error.
    #[tracing::instrument(skip(self), name = "upcoming_events")]
    pub async fn upcoming_events(&self, limit: u32) -> Result<Vec<Event>> {
        let filter = upcoming_filter(self.clock().today());
        let page: Page<Event> = trace_outcome(
            "upcoming_events",
            self.list_records(
                Event::COLLECTION,
                &filter,
                SORT_SOONEST,
                EXPAND_SUBMITTER,
                PageRequest::first(limit),
            )
            .await,
        )?;
        Ok(page.items)
    }

    /// Accepted events starting in the given month, refined by `criteria`.
    ///
    /// Any start-date window already on `criteria` is replaced.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] for an invalid month, or the
    /// transport or backend error.
    pub async fn monthly_events(
        &self,
        year: i32,
        month: u32,
        criteria: SearchCriteria,
        request: PageRequest,
    ) -> Result<Page<Event>> {
        let Some((first, next)) = calendar::month_bounds(year, month) else {
            return trace_outcome(
                "monthly_events",
                Err(ClientError::Validation {
                    field: "month".to_string(),
                    message: format!("{year}-{month:02} is not a valid month"),
                }),
            );
        };

        let criteria = criteria.starting_between(Some(first), Some(next));
        self.search_events(&criteria.to_filter(), request).await
    }

    /// Public thumbnail URL, or `None` if no thumbnail was uploaded.
    #[must_use]
    pub fn event_thumbnail_url(&self, event: &Event) -> Option<String> {
        self.asset_url(event, Event::THUMBNAIL_FIELD)
    }

    /// Detail-page slug for `event`.
    #[must_use]
    pub fn event_slug(event: &Event) -> String {
        slug::encode(&event.name, &event.id)
    }
}
