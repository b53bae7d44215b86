//! Catalog and referential integrity tests.
//!
//! Run with: cargo test -- --ignored (requires a Postgres instance).

use chrono::NaiveDate;
use libris_server::{
    error::{AppError, EntityKind},
    models::{
        author::CreateAuthor,
        book::{CreateBook, UpdateBook},
        member::CreateMember,
    },
    repository::Repository,
    services::Services,
};
use sqlx::PgPool;

fn services(pool: &PgPool) -> Services {
    Services::new(Repository::new(pool.clone(), 2000))
}

fn author(name: &str) -> CreateAuthor {
    CreateAuthor {
        name: name.to_string(),
        birth_date: NaiveDate::from_ymd_opt(1920, 1, 2).unwrap(),
        nationality: Some("British".to_string()),
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn book_creation_validates_the_whole_author_set(pool: PgPool) {
    let svc = services(&pool);
    let a1 = svc.catalog.create_author(author("Asimov")).await.unwrap();
    let a2 = svc.catalog.create_author(author("Clarke")).await.unwrap();

    // One missing id fails the whole set, nothing is inserted
    let err = svc
        .catalog
        .create_book(CreateBook {
            title: "Foundation".to_string(),
            publication_year: Some(1951),
            available: 3,
            author_ids: vec![a1.id, 999],
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::NotFound {
            kind: EntityKind::Author,
            id: 999
        }
    ));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);

    // The valid set goes through with both associations
    let book = svc
        .catalog
        .create_book(CreateBook {
            title: "Foundation".to_string(),
            publication_year: Some(1951),
            available: 3,
            author_ids: vec![a1.id, a2.id],
        })
        .await
        .unwrap();
    assert_eq!(book.authors.len(), 2);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn author_set_is_replaced_wholesale_on_patch(pool: PgPool) {
    let svc = services(&pool);
    let a1 = svc.catalog.create_author(author("Asimov")).await.unwrap();
    let a2 = svc.catalog.create_author(author("Clarke")).await.unwrap();

    let book = svc
        .catalog
        .create_book(CreateBook {
            title: "Foundation".to_string(),
            publication_year: Some(1951),
            available: 1,
            author_ids: vec![a1.id],
        })
        .await
        .unwrap();

    let patched = svc
        .catalog
        .patch_book(
            book.id,
            UpdateBook {
                author_ids: Some(vec![a2.id]),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(patched.authors.len(), 1);
    assert_eq!(patched.authors[0].id, a2.id);
    // Title untouched by the partial update
    assert_eq!(patched.title, "Foundation");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn referenced_author_cannot_be_deleted(pool: PgPool) {
    let svc = services(&pool);
    let a1 = svc.catalog.create_author(author("Asimov")).await.unwrap();

    let book = svc
        .catalog
        .create_book(CreateBook {
            title: "Foundation".to_string(),
            publication_year: Some(1951),
            available: 1,
            author_ids: vec![a1.id],
        })
        .await
        .unwrap();

    let err = svc.catalog.delete_author(a1.id).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    svc.catalog.delete_book(book.id).await.unwrap();
    svc.catalog.delete_author(a1.id).await.unwrap();
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn duplicate_member_email_is_a_conflict(pool: PgPool) {
    let svc = services(&pool);

    let member = CreateMember {
        name: "Ada".to_string(),
        email: "ada@example.org".to_string(),
        address: "Somewhere 1".to_string(),
        password_hash: None,
    };
    svc.members.create_member(member).await.unwrap();

    let err = svc
        .members
        .create_member(CreateMember {
            name: "Other Ada".to_string(),
            email: "ada@example.org".to_string(),
            address: "Elsewhere 2".to_string(),
            password_hash: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn invalid_member_email_is_rejected(pool: PgPool) {
    let svc = services(&pool);

    let err = svc
        .members
        .create_member(CreateMember {
            name: "Ada".to_string(),
            email: "not-an-email".to_string(),
            address: "Somewhere 1".to_string(),
            password_hash: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}
