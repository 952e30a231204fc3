// tests/comments_and_share.rs
use bitacora::application::{
    commands::{comments::PostCommentCommand, share::ShareArticleCommand},
    error::ApplicationError,
    forms::REQUIRED,
    queries::articles::GetArticleDetailQuery,
};
use bitacora::domain::{
    article::ArticleId,
    comment::{CommentBody, CommentRepository, CommenterName, NewComment},
    contact::EmailAddress,
};
use std::sync::Arc;

mod support;
use support::{FailingMailer, TestBlog, fixed_now};

fn comment(article_id: i64, name: &str, email: &str, body: &str) -> PostCommentCommand {
    let present = |value: &str| (!value.is_empty()).then(|| value.to_string());
    PostCommentCommand {
        article_id,
        name: present(name),
        email: present(email),
        body: present(body),
    }
}

fn share(article_id: i64) -> ShareArticleCommand {
    ShareArticleCommand {
        article_id,
        name: Some("Lucía".into()),
        email: Some("lucia@example.com".into()),
        to: Some("amigo@example.org".into()),
        comments: Some("Te va a gustar.".into()),
    }
}

#[tokio::test]
async fn valid_comment_is_stored_and_listed() {
    let blog = TestBlog::new();
    let article = blog.article().title("Hola mundo").create().await;

    let created = blog
        .services
        .comment_commands
        .post_comment(comment(article.id, "Ana", "ana@example.com", "¡Genial!"))
        .await
        .unwrap();

    assert_eq!(created.article_id, article.id);
    assert_eq!(created.name, "Ana");
    assert_eq!(created.body, "¡Genial!");
}

#[tokio::test]
async fn invalid_comment_reports_every_field() {
    let blog = TestBlog::new();
    let article = blog.article().create().await;

    let err = blog
        .services
        .comment_commands
        .post_comment(comment(article.id, "", "no-es-un-correo", "   "))
        .await
        .unwrap_err();

    let ApplicationError::InvalidForm(fields) = err else {
        panic!("expected InvalidForm, got {err:?}");
    };
    assert_eq!(fields.len(), 3);
    assert_eq!(fields.get("name"), Some(REQUIRED));
    assert_eq!(fields.get("body"), Some(REQUIRED));
    assert_eq!(fields.get("email"), Some("enter a valid email address"));
}

#[tokio::test]
async fn comments_on_missing_or_draft_articles_are_not_found() {
    let blog = TestBlog::new();
    let draft = blog.article().title("Oculto").draft().create().await;

    for id in [draft.id, 4_242] {
        let err = blog
            .services
            .comment_commands
            .post_comment(comment(id, "", "", ""))
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound(_)), "{err:?}");
    }
}

#[tokio::test]
async fn share_sends_one_recommendation_email() {
    let blog = TestBlog::new();
    let article = blog.article().title("Programación en Rust").create().await;

    let receipt = blog
        .services
        .share_commands
        .share_article(share(article.id))
        .await
        .unwrap();

    assert!(receipt.sent);
    assert_eq!(receipt.to, "amigo@example.org");
    assert_eq!(
        receipt.subject,
        "Lucía recommends you read Programación en Rust"
    );

    let sent = blog.mailer.sent();
    assert_eq!(sent.len(), 1);
    let mail = &sent[0];
    assert_eq!(mail.recipients, vec!["amigo@example.org".to_string()]);
    assert_eq!(mail.sender, "noreply@localhost.localdomain");
    assert_eq!(mail.subject, receipt.subject);
    assert_eq!(
        mail.body,
        "Read Programación en Rust at http://localhost:8080/2024/3/1/programacion-en-rust\n\n\
         Lucía's comments: Te va a gustar."
    );
}

#[tokio::test]
async fn invalid_share_form_sends_nothing() {
    let blog = TestBlog::new();
    let article = blog.article().create().await;

    let err = blog
        .services
        .share_commands
        .share_article(ShareArticleCommand {
            name: Some("x".repeat(26)),
            to: Some("sin-arroba".into()),
            ..share(article.id)
        })
        .await
        .unwrap_err();

    let ApplicationError::InvalidForm(fields) = err else {
        panic!("expected InvalidForm, got {err:?}");
    };
    assert!(fields.get("name").is_some());
    assert!(fields.get("to").is_some());
    assert!(fields.get("email").is_none());
    assert!(blog.mailer.sent().is_empty());
}

#[tokio::test]
async fn mail_failures_surface_as_infrastructure_errors() {
    let blog = TestBlog::with_mailer(Arc::new(FailingMailer));
    let article = blog.article().create().await;

    let err = blog
        .services
        .share_commands
        .share_article(share(article.id))
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Infrastructure(_)), "{err:?}");
}

#[tokio::test]
async fn inactive_comments_are_hidden_from_detail() {
    let blog = TestBlog::new();
    let article = blog.article().title("Moderación").create().await;

    blog.comment(article.id, "Ana", "Visible").await;
    CommentRepository::insert(
        blog.store.as_ref(),
        NewComment {
            article_id: ArticleId(article.id),
            name: CommenterName::new("Spam").unwrap(),
            email: EmailAddress::new("spam@example.com").unwrap(),
            body: CommentBody::new("Oculto").unwrap(),
            active: false,
            created_at: fixed_now(),
        },
    )
    .await
    .unwrap();

    let detail = blog
        .services
        .article_queries
        .article_detail(GetArticleDetailQuery {
            year: 2024,
            month: 3,
            day: 1,
            slug: article.slug.clone(),
        })
        .await
        .unwrap();

    let bodies: Vec<&str> = detail.comments.iter().map(|c| c.body.as_str()).collect();
    assert_eq!(bodies, vec!["Visible"]);
}
