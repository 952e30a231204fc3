// tests/article_feed.rs
use bitacora::application::{
    commands::articles::{DeleteArticleCommand, SetArticleStatusCommand},
    error::ApplicationError,
    queries::articles::{BlogStatsQuery, GetArticleDetailQuery, ListArticlesQuery},
};
use bitacora::domain::article::{ArticleOrdering, ArticleStatus};

mod support;
use support::{TestBlog, days_after};

async fn seven_articles(blog: &TestBlog) -> Vec<i64> {
    let mut ids = Vec::new();
    for day in 0..7 {
        let tags: &[&str] = if day % 2 == 0 { &["rust"] } else { &["web"] };
        let article = blog
            .article()
            .title(format!("Entrada {day}"))
            .tags(tags)
            .at(days_after(day))
            .create()
            .await;
        ids.push(article.id);
    }
    ids
}

fn page(token: Option<&str>) -> ListArticlesQuery {
    ListArticlesQuery {
        page: token.map(str::to_string),
        tag: None,
        ordering: ArticleOrdering::NewestFirst,
    }
}

#[tokio::test]
async fn feed_pages_hold_three_newest_first() {
    let blog = TestBlog::new();
    let ids = seven_articles(&blog).await;
    blog.article().title("Borrador").draft().create().await;

    let first = blog
        .services
        .article_queries
        .list_articles(page(None))
        .await
        .unwrap();

    assert_eq!(first.total, 7);
    assert_eq!(first.num_pages, 3);
    assert_eq!(first.per_page, 3);
    let shown: Vec<i64> = first.items.iter().map(|a| a.id).collect();
    assert_eq!(shown, vec![ids[6], ids[5], ids[4]]);
    assert!(first.has_next);
    assert!(!first.has_previous);
}

#[tokio::test]
async fn bad_page_tokens_fall_back_instead_of_failing() {
    let blog = TestBlog::new();
    let ids = seven_articles(&blog).await;
    let queries = &blog.services.article_queries;

    let not_a_number = queries.list_articles(page(Some("abc"))).await.unwrap();
    assert_eq!(not_a_number.page, 1);

    for token in ["999", "0", "-3"] {
        let last = queries.list_articles(page(Some(token))).await.unwrap();
        assert_eq!(last.page, 3, "token {token}");
        let shown: Vec<i64> = last.items.iter().map(|a| a.id).collect();
        assert_eq!(shown, vec![ids[0]]);
        assert!(!last.has_next);
    }
}

#[tokio::test]
async fn empty_feed_is_a_single_empty_page() {
    let blog = TestBlog::new();
    let feed = blog
        .services
        .article_queries
        .list_articles(page(Some("4")))
        .await
        .unwrap();
    assert_eq!(feed.page, 1);
    assert_eq!(feed.num_pages, 1);
    assert!(feed.items.is_empty());
}

#[tokio::test]
async fn tag_filter_and_oldest_first_ordering() {
    let blog = TestBlog::new();
    let ids = seven_articles(&blog).await;

    let feed = blog
        .services
        .article_queries
        .list_articles(ListArticlesQuery {
            page: None,
            tag: Some("rust".into()),
            ordering: ArticleOrdering::OldestFirst,
        })
        .await
        .unwrap();

    assert_eq!(feed.total, 4);
    let shown: Vec<i64> = feed.items.iter().map(|a| a.id).collect();
    assert_eq!(shown, vec![ids[0], ids[2], ids[4]]);
    assert!(feed.items.iter().all(|a| a.tags.iter().any(|t| t.slug == "rust")));
}

#[tokio::test]
async fn unknown_tag_is_not_found() {
    let blog = TestBlog::new();
    seven_articles(&blog).await;

    let err = blog
        .services
        .article_queries
        .list_articles(ListArticlesQuery {
            page: None,
            tag: Some("haskell".into()),
            ordering: ArticleOrdering::NewestFirst,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::NotFound(_)));
}

#[tokio::test]
async fn same_title_on_same_day_gets_distinct_slugs() {
    let blog = TestBlog::new();
    let first = blog.article().title("Hola mundo").create().await;
    let second = blog.article().title("Hola mundo").create().await;
    let next_day = blog
        .article()
        .title("Hola mundo")
        .at(days_after(1))
        .create()
        .await;

    assert_eq!(first.slug, "hola-mundo");
    assert_eq!(second.slug, "hola-mundo-1");
    assert_eq!(next_day.slug, "hola-mundo");
    assert_eq!(first.path, "/2024/3/1/hola-mundo");
}

#[tokio::test]
async fn detail_resolves_by_date_and_slug() {
    let blog = TestBlog::new();
    let article = blog
        .article()
        .title("Programación en Rust")
        .tags(&["rust"])
        .create()
        .await;
    let sibling = blog
        .article()
        .title("Más Rust")
        .tags(&["rust"])
        .at(days_after(2))
        .create()
        .await;
    blog.comment(article.id, "Ana", "Primero").await;
    blog.comment(article.id, "Luis", "Segundo").await;

    let detail = blog
        .services
        .article_queries
        .article_detail(GetArticleDetailQuery {
            year: 2024,
            month: 3,
            day: 1,
            slug: "programacion-en-rust".into(),
        })
        .await
        .unwrap();

    assert_eq!(detail.article.id, article.id);
    let bodies: Vec<&str> = detail.comments.iter().map(|c| c.body.as_str()).collect();
    assert_eq!(bodies, vec!["Primero", "Segundo"]);
    let related: Vec<i64> = detail.related.iter().map(|a| a.id).collect();
    assert_eq!(related, vec![sibling.id]);
}

#[tokio::test]
async fn detail_rejects_wrong_day_impossible_dates_and_drafts() {
    let blog = TestBlog::new();
    blog.article().title("Visible").create().await;
    blog.article().title("Oculto").draft().create().await;

    let cases = [
        (2024, 3, 2, "visible"),
        (2024, 2, 30, "visible"),
        (2024, 3, 1, "Not A Slug"),
        (2024, 3, 1, "oculto"),
    ];
    for (year, month, day, slug) in cases {
        let err = blog
            .services
            .article_queries
            .article_detail(GetArticleDetailQuery {
                year,
                month,
                day,
                slug: slug.into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound(_)), "{slug}: {err:?}");
    }
}

#[tokio::test]
async fn publishing_and_deleting_change_visibility() {
    let blog = TestBlog::new();
    let draft = blog.article().title("Pronto").draft().create().await;
    let commands = &blog.services.article_commands;
    let queries = &blog.services.article_queries;

    assert_eq!(queries.list_articles(page(None)).await.unwrap().total, 0);

    let published = commands
        .set_article_status(SetArticleStatusCommand {
            id: draft.id,
            status: ArticleStatus::Published,
        })
        .await
        .unwrap();
    assert_eq!(published.status, "published");
    assert_eq!(queries.list_articles(page(None)).await.unwrap().total, 1);

    commands
        .delete_article(DeleteArticleCommand { id: draft.id })
        .await
        .unwrap();
    assert_eq!(queries.list_articles(page(None)).await.unwrap().total, 0);

    let err = commands
        .delete_article(DeleteArticleCommand { id: draft.id })
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::NotFound(_)));
}

#[tokio::test]
async fn stats_report_latest_and_most_commented() {
    let blog = TestBlog::new();
    let quiet = blog.article().title("Silencio").at(days_after(3)).create().await;
    let busy = blog.article().title("Debate").at(days_after(1)).create().await;
    let some = blog.article().title("Charla").at(days_after(2)).create().await;
    for n in 0..3 {
        blog.comment(busy.id, "Ana", &format!("comentario {n}")).await;
    }
    blog.comment(some.id, "Luis", "hola").await;

    let stats = blog
        .services
        .article_queries
        .blog_stats(BlogStatsQuery {
            latest: Some(2),
            most_commented: Some(3),
        })
        .await
        .unwrap();

    assert_eq!(stats.total_published, 3);
    let latest: Vec<i64> = stats.latest.iter().map(|a| a.id).collect();
    assert_eq!(latest, vec![quiet.id, some.id]);
    let ranked: Vec<(i64, u64)> = stats
        .most_commented
        .iter()
        .map(|entry| (entry.article.id, entry.comments))
        .collect();
    assert_eq!(ranked, vec![(busy.id, 3), (some.id, 1), (quiet.id, 0)]);
}
