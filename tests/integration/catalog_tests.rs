//! Service-level tests against a real database

use libris_server::{
    models::{
        author::CreateAuthor,
        category::CreateCategory,
        content::{ContentQuery, CreateContent},
        enums::{ContentStatus, ContentType},
        extension::{
            CreateArticle, CreateBook, CreateMagazine, CreateMultimedia, ExtendedInfo, ExtensionData,
        },
    },
    services::{seed, Services},
    AppError,
};
use axum::{http::StatusCode, response::IntoResponse};
use rust_decimal::Decimal;
use sqlx::PgPool;

fn search(q: &str) -> ContentQuery {
    ContentQuery {
        q: Some(q.to_string()),
        ..Default::default()
    }
}

async fn book(services: &Services, title: &str, author_ids: &[i32], category_ids: &[i32]) -> i32 {
    services
        .content
        .create_book(CreateContent::titled(title), CreateBook::default(), author_ids, category_ids)
        .await
        .unwrap()
        .id
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_sample_data_is_created_once(pool: PgPool) {
    let services = super::services(pool);

    let report = seed::initialize_if_needed(&services).await.unwrap().unwrap();
    assert_eq!(report.authors, 5);
    assert_eq!(report.categories, 7);
    assert_eq!(report.books, 8);
    assert!(seed::has_sample_data(&services).await);

    assert!(seed::initialize_if_needed(&services).await.unwrap().is_none());
    assert_eq!(services.authors.get_all().await.unwrap().len(), 5);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_pride_and_prejudice_details(pool: PgPool) {
    let services = super::services(pool);
    seed::populate(&services).await.unwrap();

    let found = services.content.search(&search("PRIDE")).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title, "Pride and Prejudice");
    assert_eq!(found[0].content_type, ContentType::Book);

    let details = services
        .content
        .get_with_details(found[0].id)
        .await
        .unwrap()
        .unwrap();

    let authors: Vec<String> = details.authors.iter().map(|a| a.full_name()).collect();
    assert_eq!(authors, vec!["Jane Austen"]);

    let categories: Vec<&str> = details.categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(categories, vec!["Classic Literature", "Fiction", "Romance"]);

    match details.extended_info {
        Some(ExtendedInfo::Book(book)) => {
            assert_eq!(book.publisher, "T. Egerton");
            assert_eq!(book.page_count, Some(432));
            assert_eq!(book.content_id, found[0].id);
        }
        other => panic!("expected book details, got {:?}", other),
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_failed_create_leaves_nothing_behind(pool: PgPool) {
    let services = super::services(pool);
    let fiction = services
        .categories
        .create(CreateCategory::new("Fiction"))
        .await
        .unwrap();

    let result = services
        .content
        .create_book(
            CreateContent::titled("Ghost Book"),
            CreateBook::default(),
            &[9999],
            &[fiction.id],
        )
        .await;
    assert!(matches!(result, Err(AppError::Database(_))));

    let query = ContentQuery {
        available_only: Some(false),
        ..Default::default()
    };
    assert!(services.content.search(&query).await.unwrap().is_empty());
    assert!(services.content.get_books(None).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_extension_decides_content_type(pool: PgPool) {
    let services = super::services(pool);

    let content = CreateContent {
        content_type: Some(ContentType::Book),
        ..CreateContent::titled("Nature, vol. 1")
    };
    let article = CreateArticle {
        journal_name: "Nature".to_string(),
        doi: Some("10.1038/001".to_string()),
        ..Default::default()
    };
    let created = services
        .content
        .create_article(content, article, &[], &[])
        .await
        .unwrap();
    assert_eq!(created.content_type, ContentType::Article);

    let details = services.content.get_with_details(created.id).await.unwrap().unwrap();
    assert!(matches!(
        details.extended_info,
        Some(ExtendedInfo::Article(ref a)) if a.journal_name == "Nature"
    ));
    assert!(details.authors.is_empty());
    assert!(details.categories.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_duplicate_links_are_collapsed(pool: PgPool) {
    let services = super::services(pool);
    let author = services
        .authors
        .create(CreateAuthor::new("George", "Orwell"))
        .await
        .unwrap();

    let id = book(&services, "Animal Farm", &[author.id, author.id], &[]).await;

    assert_eq!(services.content.get_authors_for(id).await.unwrap().len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_status_changes_and_availability(pool: PgPool) {
    let services = super::services(pool);
    let first = book(&services, "Foundation", &[], &[]).await;
    book(&services, "Foundation and Empire", &[], &[]).await;

    let magazine = CreateMagazine {
        issue_number: "42".to_string(),
        frequency: "weekly".to_string(),
        publisher: "Condé Nast".to_string(),
    };
    services
        .content
        .create_magazine(CreateContent::titled("The New Yorker"), magazine, &[], &[])
        .await
        .unwrap();

    assert!(services
        .content
        .update_status(first, ContentStatus::CheckedOut)
        .await
        .unwrap());
    assert!(!services
        .content
        .update_status(424242, ContentStatus::Maintenance)
        .await
        .unwrap());

    let counts = services.content.count_available_by_type().await.unwrap();
    assert_eq!(counts.len(), 4);
    assert_eq!(counts[&ContentType::Book], 1);
    assert_eq!(counts[&ContentType::Magazine], 1);
    assert_eq!(counts[&ContentType::Article], 0);
    assert_eq!(counts[&ContentType::Multimedia], 0);

    let available = services.content.search(&search("foundation")).await.unwrap();
    assert_eq!(available.len(), 1);
    assert_eq!(available[0].title, "Foundation and Empire");

    let everything = ContentQuery {
        available_only: Some(false),
        ..search("foundation")
    };
    let all = services.content.search(&everything).await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[1].id, first);
    assert_eq!(all[1].status, ContentStatus::CheckedOut);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_search_treats_wildcards_literally(pool: PgPool) {
    let services = super::services(pool);
    book(&services, "100% Pure", &[], &[]).await;
    book(&services, "1000 Pure", &[], &[]).await;
    book(&services, "snake_case", &[], &[]).await;
    book(&services, "snakeXcase", &[], &[]).await;

    let percent = services.content.search(&search("100%")).await.unwrap();
    assert_eq!(percent.len(), 1);
    assert_eq!(percent[0].title, "100% Pure");

    let underscore = services.content.search(&search("e_c")).await.unwrap();
    assert_eq!(underscore.len(), 1);
    assert_eq!(underscore[0].title, "snake_case");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_search_filters(pool: PgPool) {
    let services = super::services(pool);
    let asimov = services
        .authors
        .create(CreateAuthor::new("Isaac", "Asimov"))
        .await
        .unwrap();
    let scifi = services
        .categories
        .create(CreateCategory::new("Science Fiction"))
        .await
        .unwrap();

    let robots = book(&services, "The Robots of Dawn", &[asimov.id], &[scifi.id]).await;
    book(&services, "Robots in Art", &[], &[]).await;
    let film = CreateMultimedia {
        media_type: "dvd".to_string(),
        duration_minutes: Some(115),
        file_format: None,
        file_size_mb: None,
    };
    services
        .content
        .create_multimedia(CreateContent::titled("Robots (film)"), film, &[], &[])
        .await
        .unwrap();

    assert_eq!(services.content.search(&search("robots")).await.unwrap().len(), 3);

    let by_type = ContentQuery {
        content_type: Some(ContentType::Multimedia),
        ..search("robots")
    };
    let media = services.content.search(&by_type).await.unwrap();
    assert_eq!(media.len(), 1);
    assert_eq!(media[0].content_type, ContentType::Multimedia);

    let by_author = ContentQuery {
        author_id: Some(asimov.id),
        ..Default::default()
    };
    let written = services.content.search(&by_author).await.unwrap();
    assert_eq!(written.len(), 1);
    assert_eq!(written[0].id, robots);

    let by_category = ContentQuery {
        category_id: Some(scifi.id),
        ..search("dawn")
    };
    assert_eq!(services.content.search(&by_category).await.unwrap().len(), 1);

    let limited = ContentQuery {
        limit: Some(2),
        ..Default::default()
    };
    let newest = services.content.search(&limited).await.unwrap();
    assert_eq!(newest.len(), 2);
    assert_eq!(newest[0].title, "Robots (film)");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_recent_and_books(pool: PgPool) {
    let services = super::services(pool);
    book(&services, "Emma", &[], &[]).await;
    book(&services, "Persuasion", &[], &[]).await;
    services
        .content
        .create_article(CreateContent::titled("On Novels"), CreateArticle::default(), &[], &[])
        .await
        .unwrap();

    let recent = services.content.get_recent(Some(1), None).await.unwrap();
    assert_eq!(recent.len(), 3);
    assert_eq!(recent[0].title, "On Novels");

    let books = services.content.get_books(Some(1)).await.unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].title, "Persuasion");

    assert!(matches!(
        services.content.get_books(Some(0)).await,
        Err(AppError::Validation(_))
    ));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_authors_search_and_lookup(pool: PgPool) {
    let services = super::services(pool);
    let woolf = services
        .authors
        .create(CreateAuthor::new("Virginia", "Woolf"))
        .await
        .unwrap();
    services
        .authors
        .create(CreateAuthor::new("Agatha", "Christie"))
        .await
        .unwrap();

    let found = services.authors.search("WOOL").await.unwrap();
    assert_eq!(found, vec![woolf.clone()]);
    assert_eq!(services.authors.search("agat").await.unwrap().len(), 1);
    assert!(services.authors.search("%").await.unwrap().is_empty());
    assert_eq!(services.authors.search("").await.unwrap().len(), 2);

    let all = services.authors.get_all().await.unwrap();
    assert_eq!(all[0].last_name, "Christie");

    assert_eq!(services.authors.get_by_id(woolf.id).await.unwrap(), Some(woolf));
    assert_eq!(services.authors.get_by_id(424242).await.unwrap(), None);

    let invalid = CreateAuthor {
        website: Some("not a url".to_string()),
        ..CreateAuthor::new("Jane", "Doe")
    };
    assert!(matches!(
        services.authors.create(invalid).await,
        Err(AppError::Validation(_))
    ));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_category_hierarchy(pool: PgPool) {
    let services = super::services(pool);
    let fiction = services
        .categories
        .create(CreateCategory::new("Fiction"))
        .await
        .unwrap();
    let mystery = services
        .categories
        .create(CreateCategory {
            parent_id: Some(fiction.id),
            ..CreateCategory::new("Mystery")
        })
        .await
        .unwrap();
    services
        .categories
        .create(CreateCategory::new("Biography"))
        .await
        .unwrap();

    let roots: Vec<String> = services
        .categories
        .get_roots()
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(roots, vec!["Biography", "Fiction"]);

    let children = services.categories.get_children(fiction.id).await.unwrap();
    assert_eq!(children, vec![mystery.clone()]);
    assert_eq!(services.categories.get_all().await.unwrap().len(), 3);

    let duplicate = services.categories.create(CreateCategory::new("Fiction")).await;
    assert!(duplicate.is_err_and(|e| e.is_unique_violation()));

    let orphan = services
        .categories
        .create(CreateCategory {
            parent_id: Some(424242),
            ..CreateCategory::new("Lost")
        })
        .await;
    assert!(matches!(orphan, Err(AppError::Database(_))));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_failed_seed_writes_nothing(pool: PgPool) {
    let services = super::services(pool);
    services
        .categories
        .create(CreateCategory::new("Fiction"))
        .await
        .unwrap();

    for _ in 0..2 {
        let result = seed::initialize_if_needed(&services).await;
        assert!(result.is_err_and(|e| e.is_unique_violation()));
        assert!(services.authors.get_all().await.unwrap().is_empty());
        assert_eq!(services.categories.get_all().await.unwrap().len(), 1);
        assert!(services.content.get_books(None).await.unwrap().is_empty());
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_details_without_extension_row(pool: PgPool) {
    let services = super::services(pool.clone());
    let id = book(&services, "Lost Pages", &[], &[]).await;

    sqlx::query("DELETE FROM books WHERE content_id = $1")
        .bind(id)
        .execute(&pool)
        .await
        .unwrap();

    let details = services.content.get_with_details(id).await.unwrap().unwrap();
    assert_eq!(details.content.id, id);
    assert!(details.extended_info.is_none());

    assert!(services.content.get_with_details(424242).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_recent_excludes_older_content(pool: PgPool) {
    let services = super::services(pool.clone());
    let old = book(&services, "Old Acquisition", &[], &[]).await;
    book(&services, "New Acquisition", &[], &[]).await;

    sqlx::query("UPDATE content SET created_at = NOW() - INTERVAL '10 days' WHERE id = $1")
        .bind(old)
        .execute(&pool)
        .await
        .unwrap();

    let week: Vec<String> = services
        .content
        .get_recent(Some(7), None)
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.title)
        .collect();
    assert_eq!(week, vec!["New Acquisition"]);

    let month = services.content.get_recent(Some(30), None).await.unwrap();
    assert_eq!(month.len(), 2);
    assert_eq!(month[1].id, old);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn test_oversized_file_size_is_a_bad_value(pool: PgPool) {
    let services = super::services(pool);
    let film = CreateMultimedia {
        media_type: "digital".to_string(),
        duration_minutes: None,
        file_format: Some("mp4".to_string()),
        file_size_mb: Some(Decimal::new(1_000_000_000_000, 0)),
    };

    let rejected = services
        .content
        .create_multimedia(CreateContent::titled("Archive"), film.clone(), &[], &[])
        .await;
    assert!(matches!(rejected, Err(AppError::Validation(_))));

    // Straight to storage, skipping validation: the column overflow still maps to 400.
    let repo = &services.repository.content;
    let mut tx = services.repository.begin().await.unwrap();
    let created = repo
        .insert(&mut tx, &CreateContent::titled("Archive"), ContentType::Multimedia)
        .await
        .unwrap();
    let overflow = repo
        .insert_extension(&mut tx, created.id, &ExtensionData::Multimedia(film))
        .await
        .unwrap_err();
    assert_eq!(overflow.into_response().status(), StatusCode::BAD_REQUEST);
}
