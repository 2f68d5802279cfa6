//! Notification engine: create with dedup, fan-out, read state, cleanup
//!
//! Validation failures here are silent skips (`Ok(None)`), not errors; a
//! missing row is a boolean result; only storage failures propagate.
//! Dedup is best-effort under concurrency: two racing creates can both
//! miss the window lookup and insert. That is accepted per-row behavior,
//! not something a transaction papers over.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{Duration, Utc};
use engage_core::entities::{Comment, Notification, NotificationKind, Post, User};
use engage_core::traits::NotificationQuery;
use engage_core::Snowflake;
use serde::Serialize;
use serde_json::json;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, instrument, warn};

use crate::dto::{NotificationPage, NotificationResponse, NotificationStats, SenderInfo};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Cleanup never deletes rows younger than this, whatever the caller asks
pub const MIN_RETENTION_DAYS: u32 = 7;

/// Input for creating a single notification
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub recipient_id: Snowflake,
    /// None = sent by the system
    pub sender_id: Option<Snowflake>,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Outcome of one fan-out run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FanOutReport {
    pub created: u64,
    pub skipped: u64,
    pub failed: u64,
}

enum FanOutOutcome {
    Created,
    Skipped,
    Failed,
}

/// Notification lifecycle service
pub struct NotificationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> NotificationService<'a> {
    /// Create a new NotificationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    // ========================================================================
    // Creation
    // ========================================================================

    /// Create a notification.
    ///
    /// Returns `Ok(None)` for every silent skip: self-notification,
    /// missing or inactive recipient, missing or inactive sender. A dedup
    /// hit returns the existing row, indistinguishable from a fresh create
    /// for the caller.
    #[instrument(skip(self, input), fields(recipient_id = %input.recipient_id, kind = %input.kind))]
    pub async fn create(&self, input: NewNotification) -> ServiceResult<Option<Notification>> {
        if input.sender_id == Some(input.recipient_id) {
            debug!("Skipping self-notification");
            return Ok(None);
        }

        if self
            .ctx
            .user_repo()
            .find_active_by_id(input.recipient_id)
            .await?
            .is_none()
        {
            debug!("Recipient missing or inactive, skipping");
            return Ok(None);
        }

        if let Some(sender_id) = input.sender_id {
            if self
                .ctx
                .user_repo()
                .find_active_by_id(sender_id)
                .await?
                .is_none()
            {
                debug!(sender_id = %sender_id, "Sender missing or inactive, skipping");
                return Ok(None);
            }

            // Dedup applies only to kinds with a window and only to
            // user-sent notifications.
            if input.kind.dedup_window().is_some() {
                let cutoff =
                    Utc::now() - Duration::minutes(self.ctx.engine().dedup_window_minutes);
                if let Some(existing) = self
                    .ctx
                    .notification_repo()
                    .find_recent_duplicate(input.recipient_id, sender_id, input.kind, cutoff)
                    .await?
                {
                    let new_post_id = input.data.as_ref().and_then(|d| d.get("postId"));
                    if existing.post_id_in_data() == new_post_id {
                        debug!(
                            existing_id = %existing.id,
                            "Duplicate within dedup window, returning existing"
                        );
                        return Ok(Some(existing));
                    }
                }
            }
        }

        let notification = Notification::new(
            self.ctx.generate_id(),
            input.recipient_id,
            input.sender_id,
            input.kind,
            input.title,
            input.message,
            input.data,
        );
        self.ctx.notification_repo().create(&notification).await?;

        info!(
            notification_id = %notification.id,
            recipient_id = %notification.recipient_id,
            "Notification created"
        );
        Ok(Some(notification))
    }

    /// Notify a post author that someone liked their post
    pub async fn notify_like(
        &self,
        post: &Post,
        liker: &User,
    ) -> ServiceResult<Option<Notification>> {
        if liker.id == post.author_id {
            return Ok(None);
        }
        self.create(NewNotification {
            recipient_id: post.author_id,
            sender_id: Some(liker.id),
            kind: NotificationKind::Like,
            title: "New Like".to_string(),
            message: format!("{} liked your post", liker.display_name()),
            data: Some(json!({
                "postId": post.id.to_string(),
                "postPreview": post.preview(),
                "action": "like",
            })),
        })
        .await
    }

    /// Notify a post author that someone commented on their post
    pub async fn notify_comment(
        &self,
        post: &Post,
        commenter: &User,
        comment: &Comment,
    ) -> ServiceResult<Option<Notification>> {
        if commenter.id == post.author_id {
            return Ok(None);
        }
        self.create(NewNotification {
            recipient_id: post.author_id,
            sender_id: Some(commenter.id),
            kind: NotificationKind::Comment,
            title: "New Comment".to_string(),
            message: format!("{} commented on your post", commenter.display_name()),
            data: Some(json!({
                "postId": post.id.to_string(),
                "postPreview": post.preview(),
                "commentId": comment.id.to_string(),
                "commentPreview": comment.preview(),
                "action": "comment",
            })),
        })
        .await
    }

    /// Notify a user that someone started following them
    pub async fn notify_follow(
        &self,
        followed: &User,
        follower: &User,
    ) -> ServiceResult<Option<Notification>> {
        if follower.id == followed.id {
            return Ok(None);
        }
        self.create(NewNotification {
            recipient_id: followed.id,
            sender_id: Some(follower.id),
            kind: NotificationKind::Follow,
            title: "New Follower".to_string(),
            message: format!("{} started following you", follower.display_name()),
            data: Some(json!({
                "userId": follower.id.to_string(),
                "action": "follow",
            })),
        })
        .await
    }

    /// Notify a user that they were mentioned in a post
    pub async fn notify_mention(
        &self,
        mentioned_id: Snowflake,
        sender: &User,
        post_id: Snowflake,
        mention_text: &str,
    ) -> ServiceResult<Option<Notification>> {
        if sender.id == mentioned_id {
            return Ok(None);
        }
        self.create(NewNotification {
            recipient_id: mentioned_id,
            sender_id: Some(sender.id),
            kind: NotificationKind::Mention,
            title: "New Mention".to_string(),
            message: format!("{} mentioned you in a post", sender.display_name()),
            data: Some(json!({
                "postId": post_id.to_string(),
                "mentionText": mention_text,
                "action": "mention",
            })),
        })
        .await
    }

    /// Bulk system notification. Each recipient goes through `create`
    /// (sender None, so no self or dedup checks beyond active-recipient);
    /// per-recipient failures are logged and counted as skips.
    ///
    /// Returns `(created, skipped)`.
    #[instrument(skip(self, title, message, data))]
    pub async fn notify_system(
        &self,
        recipient_ids: &[Snowflake],
        title: &str,
        message: &str,
        data: Option<serde_json::Value>,
    ) -> ServiceResult<(u64, u64)> {
        let mut created = 0u64;
        let mut skipped = 0u64;

        for &recipient_id in recipient_ids {
            let result = self
                .create(NewNotification {
                    recipient_id,
                    sender_id: None,
                    kind: NotificationKind::System,
                    title: title.to_string(),
                    message: message.to_string(),
                    data: data.clone(),
                })
                .await;
            match result {
                Ok(Some(_)) => created += 1,
                Ok(None) => skipped += 1,
                Err(e) => {
                    warn!(recipient_id = %recipient_id, error = %e, "System notification failed");
                    skipped += 1;
                }
            }
        }

        info!(created, skipped, "System notification fan-out complete");
        Ok((created, skipped))
    }

    // ========================================================================
    // Fan-out
    // ========================================================================

    /// Deliver a `PostUpdate` notification to every follower of the author
    /// through a semaphore-bounded worker pool.
    ///
    /// Per-recipient failures are logged and isolated. When a deadline is
    /// given and expires, remaining work is abandoned and the counts so far
    /// are returned. The only hard error is every insert failing while at
    /// least one follower exists. No dedup applies to fan-out.
    #[instrument(skip(self))]
    pub async fn fan_out_new_post(
        &self,
        author_id: Snowflake,
        post_id: Snowflake,
        deadline: Option<StdDuration>,
    ) -> ServiceResult<FanOutReport> {
        let Some(author) = self.ctx.user_repo().find_active_by_id(author_id).await? else {
            debug!("Author missing or inactive, nothing to fan out");
            return Ok(FanOutReport::default());
        };
        let post = self
            .ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Post", post_id.to_string()))?;

        let followers = self.ctx.follow_repo().follower_ids(author_id).await?;
        let total = followers.len();
        if total == 0 {
            debug!("No followers, nothing to fan out");
            return Ok(FanOutReport::default());
        }

        let title = "New Post".to_string();
        let message = format!("{} published a new post", author.display_name());
        let data = json!({
            "postId": post_id.to_string(),
            "postPreview": post.preview(),
            "action": "new_post",
        });

        let semaphore = Arc::new(Semaphore::new(self.ctx.engine().fanout_concurrency.max(1)));
        let notification_repo = self.ctx.notification_repo_arc();
        let user_repo = self.ctx.user_repo_arc();
        let mut workers = JoinSet::new();

        for recipient_id in followers {
            let notification = Notification::new(
                self.ctx.generate_id(),
                recipient_id,
                Some(author_id),
                NotificationKind::PostUpdate,
                title.clone(),
                message.clone(),
                Some(data.clone()),
            );
            let semaphore = Arc::clone(&semaphore);
            let notification_repo = Arc::clone(&notification_repo);
            let user_repo = Arc::clone(&user_repo);

            workers.spawn(async move {
                let _permit = match semaphore.acquire().await {
                    Ok(permit) => permit,
                    Err(_) => return FanOutOutcome::Failed,
                };
                match user_repo.find_active_by_id(recipient_id).await {
                    Ok(Some(_)) => {}
                    Ok(None) => {
                        debug!(recipient_id = %recipient_id, "Recipient inactive, skipping");
                        return FanOutOutcome::Skipped;
                    }
                    Err(e) => {
                        warn!(recipient_id = %recipient_id, error = %e, "Fan-out recipient lookup failed");
                        return FanOutOutcome::Failed;
                    }
                }
                match notification_repo.create(&notification).await {
                    Ok(()) => FanOutOutcome::Created,
                    Err(e) => {
                        warn!(recipient_id = %recipient_id, error = %e, "Fan-out insert failed");
                        FanOutOutcome::Failed
                    }
                }
            });
        }

        let expiry = deadline.map(|d| tokio::time::Instant::now() + d);
        let mut report = FanOutReport::default();
        loop {
            let next = match expiry {
                Some(at) => match tokio::time::timeout_at(at, workers.join_next()).await {
                    Ok(next) => next,
                    Err(_) => {
                        warn!(
                            completed = report.created + report.skipped + report.failed,
                            total, "Fan-out deadline expired, abandoning remaining work"
                        );
                        workers.abort_all();
                        break;
                    }
                },
                None => workers.join_next().await,
            };
            match next {
                None => break,
                Some(Ok(FanOutOutcome::Created)) => report.created += 1,
                Some(Ok(FanOutOutcome::Skipped)) => report.skipped += 1,
                Some(Ok(FanOutOutcome::Failed)) | Some(Err(_)) => report.failed += 1,
            }
        }

        if report.created == 0 && report.skipped == 0 && report.failed as usize == total {
            return Err(ServiceError::internal(format!(
                "fan-out for post {post_id} failed for all {total} followers"
            )));
        }

        info!(
            post_id = %post_id,
            created = report.created,
            skipped = report.skipped,
            failed = report.failed,
            "Fan-out complete"
        );
        Ok(report)
    }

    // ========================================================================
    // Read path
    // ========================================================================

    /// One page of a recipient's notifications, newest first.
    ///
    /// `page` is 1-indexed; `page_size` is clamped to 1..=100. The unread
    /// count covers the whole inbox, not the page. Sender display info is
    /// attached per item when the sender still exists.
    #[instrument(skip(self, query))]
    pub async fn list(
        &self,
        recipient_id: Snowflake,
        page: u32,
        page_size: u32,
        query: &NotificationQuery,
    ) -> ServiceResult<NotificationPage> {
        let page = page.max(1);
        let page_size = page_size.clamp(1, 100);

        let (rows, total) = self
            .ctx
            .notification_repo()
            .find_page_for_recipient(recipient_id, query, page, page_size)
            .await?;
        let unread_count = self.ctx.notification_repo().count_unread(recipient_id).await?;

        let mut notifications = Vec::with_capacity(rows.len());
        for row in &rows {
            let sender = match row.sender_id {
                Some(sender_id) => self
                    .ctx
                    .user_repo()
                    .find_by_id(sender_id)
                    .await?
                    .map(|u| SenderInfo::from_user(&u)),
                None => None,
            };
            notifications.push(NotificationResponse::from_entity(row, sender));
        }

        Ok(NotificationPage {
            notifications,
            total,
            unread_count,
            page,
            has_next: u64::from(page) * u64::from(page_size) < total,
        })
    }

    /// Number of unread notifications in a recipient's inbox
    pub async fn unread_count(&self, recipient_id: Snowflake) -> ServiceResult<u64> {
        Ok(self.ctx.notification_repo().count_unread(recipient_id).await?)
    }

    /// Inbox statistics: total, unread, and created in the last 24 hours
    #[instrument(skip(self))]
    pub async fn stats(&self, recipient_id: Snowflake) -> ServiceResult<NotificationStats> {
        let repo = self.ctx.notification_repo();
        let total = repo
            .count_for_recipient(recipient_id, &NotificationQuery::default())
            .await?;
        let unread = repo.count_unread(recipient_id).await?;
        let recent = repo
            .count_since(recipient_id, Utc::now() - Duration::hours(24))
            .await?;
        Ok(NotificationStats { total, unread, recent })
    }

    // ========================================================================
    // Read-state and deletion
    // ========================================================================

    /// Mark one notification read, ownership-checked. Returns false when
    /// the row does not exist or belongs to someone else; true otherwise,
    /// whether or not it was already read.
    #[instrument(skip(self))]
    pub async fn mark_read(
        &self,
        notification_id: Snowflake,
        recipient_id: Snowflake,
    ) -> ServiceResult<bool> {
        Ok(self
            .ctx
            .notification_repo()
            .mark_read(notification_id, recipient_id)
            .await?)
    }

    /// Mark everything unread as read. Idempotent; a second call returns 0.
    #[instrument(skip(self))]
    pub async fn mark_all_read(&self, recipient_id: Snowflake) -> ServiceResult<u64> {
        let updated = self.ctx.notification_repo().mark_all_read(recipient_id).await?;
        info!(recipient_id = %recipient_id, updated, "Marked all notifications read");
        Ok(updated)
    }

    /// Delete one notification, ownership-checked
    #[instrument(skip(self))]
    pub async fn delete(
        &self,
        notification_id: Snowflake,
        recipient_id: Snowflake,
    ) -> ServiceResult<bool> {
        Ok(self
            .ctx
            .notification_repo()
            .delete(notification_id, recipient_id)
            .await?)
    }

    /// Delete notifications strictly older than `max_age_days` days.
    ///
    /// The retention floor (7 days, raised by config) applies whatever the
    /// caller asks for. Returns the number of rows deleted.
    #[instrument(skip(self))]
    pub async fn delete_old(&self, max_age_days: u32) -> ServiceResult<u64> {
        let floor = self.ctx.engine().min_retention_days.max(MIN_RETENTION_DAYS);
        let effective = max_age_days.max(floor);
        if effective != max_age_days {
            warn!(
                requested = max_age_days,
                effective, "Cleanup age raised to retention floor"
            );
        }

        let cutoff = Utc::now() - Duration::days(i64::from(effective));
        let deleted = self.ctx.notification_repo().delete_older_than(cutoff).await?;
        info!(deleted, max_age_days = effective, "Old notifications deleted");
        Ok(deleted)
    }
}
