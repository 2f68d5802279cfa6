//! Trending feed ranking
//!
//! Scores are computed on demand from the denormalized counters; nothing
//! about the ranking is ever persisted.

use chrono::{DateTime, Duration, Utc};
use engage_core::{Snowflake, TrendingScore};
use std::collections::HashMap;
use tracing::{debug, instrument};

use crate::dto::{TrendingPage, TrendingPostResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Trending ranking service
pub struct TrendingService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> TrendingService<'a> {
    /// Create a new TrendingService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Trending score for one post.
    ///
    /// Weighted engagement decayed by age, with a small boost for author
    /// reach and for engagement velocity. Pure function of its inputs:
    /// deterministic for a fixed `now`. Rounded to 2 decimal places.
    pub fn score(
        likes: i64,
        comments: i64,
        shares: i64,
        created_at: DateTime<Utc>,
        author_influence: i64,
        now: DateTime<Utc>,
    ) -> f64 {
        let engagement = likes.max(0) as f64
            + comments.max(0) as f64 * 2.0
            + shares.max(0) as f64 * 3.0;

        let hours_old = ((now - created_at).num_milliseconds() as f64 / 3_600_000.0).max(0.0);
        let decay = (-hours_old / 24.0).exp();
        let author = 1.0 + (author_influence.max(1) as f64).log10() * 0.1;
        let velocity = engagement / hours_old.max(1.0);
        let vfactor = 1.0 + velocity.max(1.0).log10() * 0.2;

        let score = engagement * decay * author * vfactor;
        (score * 100.0).round() / 100.0
    }

    /// One page of the trending feed.
    ///
    /// Candidates are posts inside the window with any nonzero engagement
    /// counter. Every candidate is scored against a single `now` captured
    /// once per call, sorted score DESC with `created_at` DESC ties, then
    /// paginated 1-indexed. `window_hours` falls back to the configured
    /// default.
    #[instrument(skip(self))]
    pub async fn rank(
        &self,
        window_hours: Option<u32>,
        page: u32,
        page_size: u32,
    ) -> ServiceResult<TrendingPage> {
        let window_hours = window_hours
            .unwrap_or(self.ctx.engine().trending_window_hours)
            .max(1);
        let page = page.max(1);
        let page_size = page_size.clamp(1, 100);

        let now = Utc::now();
        let cutoff = now - Duration::hours(i64::from(window_hours));
        let candidates = self.ctx.post_repo().find_engaged_since(cutoff).await?;
        debug!(candidates = candidates.len(), window_hours, "Scoring trending candidates");

        // one author lookup per distinct author
        let mut influence: HashMap<Snowflake, i64> = HashMap::new();
        let mut scored = Vec::with_capacity(candidates.len());
        for post in candidates {
            let author_influence = match influence.get(&post.author_id) {
                Some(&cached) => cached,
                None => {
                    let followers = self
                        .ctx
                        .user_repo()
                        .find_by_id(post.author_id)
                        .await?
                        .map_or(0, |author| author.followers_count.max(0));
                    influence.insert(post.author_id, followers);
                    followers
                }
            };
            let counters = post.counters();
            let score = TrendingScore::new(
                post.id,
                Self::score(
                    counters.likes,
                    counters.comments,
                    counters.shares,
                    post.created_at,
                    author_influence,
                    now,
                ),
            );
            scored.push((post, score));
        }

        scored.sort_by(|(a, score_a), (b, score_b)| {
            score_b
                .score
                .partial_cmp(&score_a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });

        let total = scored.len() as u64;
        let offset = (page as usize - 1).saturating_mul(page_size as usize);
        let posts = scored
            .iter()
            .skip(offset)
            .take(page_size as usize)
            .map(|(post, score)| TrendingPostResponse::from_scored(post, score.score))
            .collect();

        Ok(TrendingPage {
            posts,
            total,
            page,
            has_next: u64::from(page) * u64::from(page_size) < total,
            window_hours,
        })
    }
}
