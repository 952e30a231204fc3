use super::ArticleQueryService;
use crate::{
    application::{dto::BlogStatsDto, error::ApplicationResult},
    domain::article::{ArticleQuery, Visibility},
};

pub const DEFAULT_STATS_COUNT: u64 = 5;
const MAX_STATS_COUNT: u64 = 50;

#[derive(Debug, Clone, Copy, Default)]
pub struct BlogStatsQuery {
    pub latest: Option<u64>,
    pub most_commented: Option<u64>,
}

impl ArticleQueryService {
    pub async fn blog_stats(&self, query: BlogStatsQuery) -> ApplicationResult<BlogStatsDto> {
        let latest_count = query.latest.unwrap_or(DEFAULT_STATS_COUNT).min(MAX_STATS_COUNT);
        let commented_count = query
            .most_commented
            .unwrap_or(DEFAULT_STATS_COUNT)
            .min(MAX_STATS_COUNT);

        let published = ArticleQuery::published();
        let total_published = self.read_repo.count(&published).await?;
        let latest = if latest_count == 0 {
            Vec::new()
        } else {
            self.read_repo
                .list(&published.window(0, latest_count))
                .await?
        };
        let most_commented = if commented_count == 0 {
            Vec::new()
        } else {
            self.read_repo
                .most_commented(Visibility::Published, commented_count)
                .await?
        };

        Ok(BlogStatsDto {
            total_published,
            latest: latest.into_iter().map(Into::into).collect(),
            most_commented: most_commented.into_iter().map(Into::into).collect(),
        })
    }
}
