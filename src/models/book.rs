//! Book model

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use utoipa::{IntoParams, ToSchema};

/// Book record as stored in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// 16-character random identifier
    pub id: String,
    pub name: String,
    pub year: i32,
    pub author: String,
    pub summary: String,
    pub publisher: String,
    pub page_count: i64,
    pub read_page: i64,
    pub reading: bool,
    /// Whether `readPage` matched `pageCount` when the book was created.
    /// Not recomputed on update.
    pub finished: bool,
    #[serde(serialize_with = "serialize_timestamp")]
    #[schema(value_type = String, format = DateTime)]
    pub inserted_at: DateTime<Utc>,
    #[serde(serialize_with = "serialize_timestamp")]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTime<Utc>,
}

impl Book {
    /// Build a new record from a validated payload
    pub fn new(id: String, data: BookPayload, now: DateTime<Utc>) -> Self {
        let finished = data.page_count == data.read_page;
        Self {
            id,
            name: data.name.unwrap_or_default(),
            year: data.year,
            author: data.author,
            summary: data.summary,
            publisher: data.publisher,
            page_count: data.page_count,
            read_page: data.read_page,
            reading: data.reading,
            finished,
            inserted_at: now,
            updated_at: now,
        }
    }

    /// Replace the editable fields. `id`, `inserted_at` and `finished` are kept.
    pub fn apply(&mut self, data: BookPayload, now: DateTime<Utc>) {
        self.name = data.name.unwrap_or_default();
        self.year = data.year;
        self.author = data.author;
        self.summary = data.summary;
        self.publisher = data.publisher;
        self.page_count = data.page_count;
        self.read_page = data.read_page;
        self.reading = data.reading;
        self.updated_at = now;
    }
}

/// Short book representation for lists
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct BookShort {
    pub id: String,
    pub name: String,
    pub publisher: String,
}

impl From<&Book> for BookShort {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.clone(),
            name: book.name.clone(),
            publisher: book.publisher.clone(),
        }
    }
}

/// Create / update book request
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct BookPayload {
    /// Required; an absent or empty name is rejected
    pub name: Option<String>,
    pub year: i32,
    pub author: String,
    pub summary: String,
    pub publisher: String,
    pub page_count: i64,
    pub read_page: i64,
    pub reading: bool,
}

/// Book list filters
#[derive(Debug, Clone, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookQuery {
    /// Case-insensitive substring of the book name
    pub name: Option<String>,
    /// `1` for books being read, `0` for the others
    pub reading: Option<String>,
    /// `1` for finished books, `0` for the others
    pub finished: Option<String>,
}

impl BookQuery {
    /// Collect filters from raw query-string pairs.
    ///
    /// A repeated `reading` or `finished` key joins its values with commas
    /// (`reading=1&reading=0` becomes `"1,0"`), which never reads as a flag
    /// and so matches no book. A repeated `name` keeps its first value.
    /// Unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut query = BookQuery::default();
        for (key, value) in pairs {
            match key.as_str() {
                "name" => {
                    query.name.get_or_insert(value);
                }
                "reading" => append_value(&mut query.reading, value),
                "finished" => append_value(&mut query.finished, value),
                _ => {}
            }
        }
        query
    }
}

fn append_value(slot: &mut Option<String>, value: String) {
    match slot {
        Some(existing) => {
            existing.push(',');
            existing.push_str(&value);
        }
        None => *slot = Some(value),
    }
}

/// ISO 8601 with millisecond precision, e.g. `2024-05-01T09:30:00.000Z`
fn serialize_timestamp<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
}
