//! Sample catalog used to bootstrap an empty database

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgConnection;

use crate::{
    error::{AppError, AppResult},
    models::{
        author::{Author, CreateAuthor},
        category::{Category, CreateCategory},
        content::CreateContent,
        extension::{CreateBook, ExtensionData},
    },
};

use super::Services;

struct SampleAuthor {
    first_name: &'static str,
    last_name: &'static str,
    biography: &'static str,
    born: (i32, u32, u32),
}

struct SampleBook {
    title: &'static str,
    description: &'static str,
    published: (i32, u32, u32),
    tags: &'static [&'static str],
    publisher: &'static str,
    page_count: i32,
    format: &'static str,
    authors: &'static [&'static str],
    categories: &'static [&'static str],
}

const AUTHORS: &[SampleAuthor] = &[
    SampleAuthor {
        first_name: "Jane",
        last_name: "Austen",
        biography: "English novelist known primarily for her six major novels.",
        born: (1775, 12, 16),
    },
    SampleAuthor {
        first_name: "George",
        last_name: "Orwell",
        biography: "English novelist and journalist known for his dystopian works.",
        born: (1903, 6, 25),
    },
    SampleAuthor {
        first_name: "Agatha",
        last_name: "Christie",
        biography: "English writer known for her detective novels.",
        born: (1890, 9, 15),
    },
    SampleAuthor {
        first_name: "Isaac",
        last_name: "Asimov",
        biography: "American writer and professor of biochemistry, known for science fiction.",
        born: (1920, 1, 2),
    },
    SampleAuthor {
        first_name: "Virginia",
        last_name: "Woolf",
        biography: "English writer and modernist pioneer.",
        born: (1882, 1, 25),
    },
];

const CATEGORIES: &[(&str, &str)] = &[
    ("Fiction", "Fictional literature"),
    ("Science Fiction", "Speculative fiction with futuristic concepts"),
    ("Mystery", "Detective and mystery novels"),
    ("Classic Literature", "Timeless literary works"),
    ("Dystopian", "Dark future societies"),
    ("Romance", "Romantic literature"),
    ("Modernist", "Modernist literary movement"),
];

const BOOKS: &[SampleBook] = &[
    SampleBook {
        title: "Pride and Prejudice",
        description: "A romantic novel that critiques the British landed gentry at the end of the 18th century.",
        published: (1813, 1, 28),
        tags: &["romance", "social commentary", "british literature"],
        publisher: "T. Egerton",
        page_count: 432,
        format: "paperback",
        authors: &["Jane Austen"],
        categories: &["Fiction", "Romance", "Classic Literature"],
    },
    SampleBook {
        title: "1984",
        description: "A dystopian social science fiction novel about totalitarian control and surveillance.",
        published: (1949, 6, 8),
        tags: &["dystopian", "totalitarianism", "surveillance", "political fiction"],
        publisher: "Secker & Warburg",
        page_count: 328,
        format: "hardcover",
        authors: &["George Orwell"],
        categories: &["Fiction", "Dystopian", "Science Fiction"],
    },
    SampleBook {
        title: "Murder on the Orient Express",
        description: "A detective novel featuring Hercule Poirot solving a murder on a luxury train.",
        published: (1934, 1, 1),
        tags: &["detective", "murder mystery", "hercule poirot"],
        publisher: "Collins Crime Club",
        page_count: 256,
        format: "paperback",
        authors: &["Agatha Christie"],
        categories: &["Fiction", "Mystery"],
    },
    SampleBook {
        title: "Foundation",
        description: "The first novel in the Foundation series, exploring a galactic empire's decline and renewal.",
        published: (1951, 5, 1),
        tags: &["space opera", "galactic empire", "psychohistory", "science fiction"],
        publisher: "Gnome Press",
        page_count: 244,
        format: "hardcover",
        authors: &["Isaac Asimov"],
        categories: &["Science Fiction", "Fiction"],
    },
    SampleBook {
        title: "To the Lighthouse",
        description: "A modernist novel exploring the Ramsay family's experiences over a decade.",
        published: (1927, 5, 5),
        tags: &["modernist", "stream of consciousness", "family drama"],
        publisher: "Hogarth Press",
        page_count: 209,
        format: "hardcover",
        authors: &["Virginia Woolf"],
        categories: &["Fiction", "Modernist", "Classic Literature"],
    },
    SampleBook {
        title: "Animal Farm",
        description: "An allegorical novella about farm animals who rebel against their human farmer.",
        published: (1945, 8, 17),
        tags: &["allegory", "political satire", "fable"],
        publisher: "Secker & Warburg",
        page_count: 112,
        format: "paperback",
        authors: &["George Orwell"],
        categories: &["Fiction", "Dystopian"],
    },
    SampleBook {
        title: "The Robots of Dawn",
        description: "A science fiction mystery novel featuring detective Elijah Baley and robot R. Daneel.",
        published: (1983, 10, 1),
        tags: &["robots", "detective story", "future society"],
        publisher: "Doubleday",
        page_count: 384,
        format: "hardcover",
        authors: &["Isaac Asimov"],
        categories: &["Science Fiction", "Mystery", "Fiction"],
    },
    SampleBook {
        title: "Emma",
        description: "A novel about Emma Woodhouse, a young woman who meddles in the romantic lives of others.",
        published: (1815, 12, 23),
        tags: &["romance", "matchmaking", "social comedy"],
        publisher: "John Murray",
        page_count: 474,
        format: "paperback",
        authors: &["Jane Austen"],
        categories: &["Fiction", "Romance", "Classic Literature"],
    },
];

/// Counts of rows written by [`populate`]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub authors: usize,
    pub categories: usize,
    pub books: usize,
}

fn date((year, month, day): (i32, u32, u32)) -> AppResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| AppError::Internal(format!("Invalid sample date {}-{}-{}", year, month, day)))
}

fn midnight_utc(ymd: (i32, u32, u32)) -> AppResult<DateTime<Utc>> {
    let (year, month, day) = ymd;
    date(ymd)?
        .and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc())
        .ok_or_else(|| AppError::Internal(format!("Invalid sample date {}-{}-{}", year, month, day)))
}

fn ids_for<T>(names: &[&str], rows: &[T], name_of: impl Fn(&T) -> String, id_of: impl Fn(&T) -> i32) -> Vec<i32> {
    names
        .iter()
        .filter_map(|name| rows.iter().find(|&row| name_of(row) == *name).map(&id_of))
        .collect()
}

/// True once at least one book exists. Lookup failures count as "no data".
pub async fn has_sample_data(services: &Services) -> bool {
    match services.content.get_books(Some(1)).await {
        Ok(books) => !books.is_empty(),
        Err(e) => {
            tracing::error!("Error checking for sample data: {}", e);
            false
        }
    }
}

/// Write the sample authors, categories and books in one transaction.
/// Either everything is written or nothing is.
pub async fn populate(services: &Services) -> AppResult<SeedReport> {
    let mut tx = services.repository.begin().await?;
    let written = write_samples(services, &mut tx).await;

    match written {
        Ok(report) => {
            tx.commit().await?;
            tracing::info!(
                "Created sample data: {} authors, {} categories, {} books",
                report.authors,
                report.categories,
                report.books
            );
            Ok(report)
        }
        Err(e) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::warn!("Rollback of sample data also failed: {}", rollback_err);
            }
            Err(e)
        }
    }
}

async fn write_samples(services: &Services, conn: &mut PgConnection) -> AppResult<SeedReport> {
    let mut authors: Vec<Author> = Vec::with_capacity(AUTHORS.len());
    for sample in AUTHORS {
        let data = CreateAuthor {
            biography: sample.biography.to_string(),
            birth_date: Some(date(sample.born)?),
            ..CreateAuthor::new(sample.first_name, sample.last_name)
        };
        authors.push(services.authors.create_in(&mut *conn, &data).await?);
    }

    let mut categories: Vec<Category> = Vec::with_capacity(CATEGORIES.len());
    for (name, description) in CATEGORIES {
        let data = CreateCategory {
            description: description.to_string(),
            ..CreateCategory::new(*name)
        };
        categories.push(services.categories.create_in(&mut *conn, &data).await?);
    }

    let mut books = 0;
    for sample in BOOKS {
        let author_ids = ids_for(sample.authors, &authors, Author::full_name, |a| a.id);
        let category_ids = ids_for(sample.categories, &categories, |c| c.name.clone(), |c| c.id);

        let content = CreateContent {
            description: sample.description.to_string(),
            publication_date: Some(midnight_utc(sample.published)?),
            tags: sample.tags.iter().map(|t| t.to_string()).collect(),
            ..CreateContent::titled(sample.title)
        };
        let book = ExtensionData::Book(CreateBook {
            page_count: Some(sample.page_count),
            edition: "First Edition".to_string(),
            format: sample.format.to_string(),
            ..CreateBook::published_by(sample.publisher)
        });

        services
            .content
            .create_content_in(&mut *conn, &content, &book, &author_ids, &category_ids)
            .await?;
        books += 1;
    }

    Ok(SeedReport {
        authors: authors.len(),
        categories: categories.len(),
        books,
    })
}

/// Populate the catalog unless it already holds books
pub async fn initialize_if_needed(services: &Services) -> AppResult<Option<SeedReport>> {
    if has_sample_data(services).await {
        tracing::info!("Sample data already exists");
        return Ok(None);
    }
    tracing::info!("No existing data found, creating sample data");
    populate(services).await.map(Some)
}
