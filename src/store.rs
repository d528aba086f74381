//! SQLite persistence for scraped job records.
//!
//! One `job_records` table holds everything. List-valued fields are stored
//! as JSON text in TEXT columns; reading them back tolerates rows whose text
//! no longer parses as a JSON list.

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use sqlx::FromRow;

use crate::error::ScrapeError;
use crate::extractor::JobRecord;

/// A list column read back from the database.
///
/// `Raw` carries text that did not decode as a JSON string list, e.g. rows
/// written by hand or by an older run.
#[derive(Debug, Clone, PartialEq)]
pub enum ListColumn {
    Items(Vec<String>),
    Raw(String),
}

impl ListColumn {
    fn parse(text: String) -> Self {
        match serde_json::from_str::<Vec<String>>(&text) {
            Ok(items) => ListColumn::Items(items),
            Err(_) => ListColumn::Raw(text),
        }
    }
}

/// One persisted row, with list columns decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredJob {
    pub id: i64,
    pub url: Option<String>,
    pub title: Option<String>,
    pub work_location: Option<String>,
    pub validity: Option<String>,
    pub contract_type: Option<String>,
    pub employment_type: Option<String>,
    pub position: Option<String>,
    pub work_arrangement: Option<String>,
    pub start: Option<String>,
    pub recruitment_method: Option<String>,
    pub additional_info: Option<ListColumn>,
    pub technologies: Option<ListColumn>,
    pub responsibilities: Option<ListColumn>,
    pub requirements: Option<ListColumn>,
    pub application_link: Option<String>,
}

#[derive(Debug, FromRow)]
struct JobRow {
    id: i64,
    url: Option<String>,
    title: Option<String>,
    work_location: Option<String>,
    validity: Option<String>,
    contract_type: Option<String>,
    employment_type: Option<String>,
    position: Option<String>,
    work_arrangement: Option<String>,
    start: Option<String>,
    recruitment_method: Option<String>,
    additional_info: Option<String>,
    technologies: Option<String>,
    responsibilities: Option<String>,
    requirements: Option<String>,
    application_link: Option<String>,
}

impl JobRow {
    fn into_stored_job(self) -> StoredJob {
        StoredJob {
            id: self.id,
            url: self.url,
            title: self.title,
            work_location: self.work_location,
            validity: self.validity,
            contract_type: self.contract_type,
            employment_type: self.employment_type,
            position: self.position,
            work_arrangement: self.work_arrangement,
            start: self.start,
            recruitment_method: self.recruitment_method,
            additional_info: self.additional_info.map(ListColumn::parse),
            technologies: self.technologies.map(ListColumn::parse),
            responsibilities: self.responsibilities.map(ListColumn::parse),
            requirements: self.requirements.map(ListColumn::parse),
            application_link: self.application_link,
        }
    }
}

pub struct RecordStore {
    pool: SqlitePool,
}

impl RecordStore {
    /// Opens the database and makes sure the `job_records` table exists.
    ///
    /// The pool is capped at one connection; the run writes strictly
    /// sequentially and this keeps `sqlite::memory:` databases shared.
    pub async fn connect(database_url: &str) -> Result<Self, ScrapeError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(database_url)
            .await?;

        let store = RecordStore { pool };
        store.init().await?;
        Ok(store)
    }

    /// In-memory database, for tests.
    pub async fn in_memory() -> Result<Self, ScrapeError> {
        Self::connect("sqlite::memory:").await
    }

    async fn init(&self) -> Result<(), ScrapeError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS job_records (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                url TEXT,
                title TEXT,
                work_location TEXT,
                validity TEXT,
                contract_type TEXT,
                employment_type TEXT,
                position TEXT,
                work_arrangement TEXT,
                start TEXT,
                recruitment_method TEXT,
                additional_info TEXT,
                technologies TEXT,
                responsibilities TEXT,
                requirements TEXT,
                application_link TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn insert(&self, record: &JobRecord) -> Result<(), ScrapeError> {
        sqlx::query(
            r#"
            INSERT INTO job_records (
                url, title, work_location, validity, contract_type,
                employment_type, position, work_arrangement, start,
                recruitment_method, additional_info, technologies,
                responsibilities, requirements, application_link
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.url)
        .bind(&record.title)
        .bind(&record.work_location)
        .bind(&record.validity)
        .bind(&record.contract_type)
        .bind(&record.employment_type)
        .bind(&record.position)
        .bind(&record.work_arrangement)
        .bind(&record.start)
        .bind(&record.recruitment_method)
        .bind(encode_list(&record.additional_info)?)
        .bind(encode_list(&record.technologies)?)
        .bind(encode_list(&record.responsibilities)?)
        .bind(encode_list(&record.requirements)?)
        .bind(&record.application_link)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Removes repeated offers, keeping the earliest row of every
    /// (title, url, application_link) group. Returns how many rows went.
    pub async fn deduplicate(&self) -> Result<u64, ScrapeError> {
        let result = sqlx::query(
            r#"
            DELETE FROM job_records
            WHERE id NOT IN (
                SELECT MIN(id)
                FROM job_records
                GROUP BY title, url, application_link
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    pub async fn query_all(&self) -> Result<Vec<StoredJob>, ScrapeError> {
        let rows = sqlx::query_as::<_, JobRow>(
            r#"
            SELECT id, url, title, work_location, validity, contract_type,
                   employment_type, position, work_arrangement, start,
                   recruitment_method, additional_info, technologies,
                   responsibilities, requirements, application_link
            FROM job_records
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(JobRow::into_stored_job).collect())
    }

    pub async fn count(&self) -> Result<i64, ScrapeError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM job_records")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn encode_list(items: &Option<Vec<String>>) -> Result<Option<String>, ScrapeError> {
    Ok(items
        .as_ref()
        .map(|list| serde_json::to_string(list))
        .transpose()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_store() -> RecordStore {
        RecordStore::in_memory().await.unwrap()
    }

    fn record(title: &str, url: &str, application_link: &str) -> JobRecord {
        JobRecord {
            url: url.to_string(),
            title: Some(title.to_string()),
            application_link: Some(application_link.to_string()),
            ..JobRecord::default()
        }
    }

    #[tokio::test]
    async fn round_trips_a_full_record() {
        let store = test_store().await;
        let mut record = record(
            "Data Engineer",
            "https://it.pracuj.pl/praca/x,oferta,1",
            "https://system.pracuj.pl/apply/1",
        );
        record.work_location = Some("Warszawa".to_string());
        record.validity = Some("Ważna jeszcze 10 dni".to_string());
        record.contract_type = Some("Umowa o pracę".to_string());
        record.start = Some("od zaraz".to_string());
        record.technologies = Some(vec!["Python".to_string(), "Spark".to_string()]);
        record.requirements = Some(vec!["SQL".to_string()]);

        store.insert(&record).await.unwrap();
        let jobs = store.query_all().await.unwrap();

        assert_eq!(jobs.len(), 1);
        let job = &jobs[0];
        assert_eq!(job.id, 1);
        assert_eq!(job.title.as_deref(), Some("Data Engineer"));
        assert_eq!(
            job.url.as_deref(),
            Some("https://it.pracuj.pl/praca/x,oferta,1")
        );
        assert_eq!(job.work_location.as_deref(), Some("Warszawa"));
        assert_eq!(job.start.as_deref(), Some("od zaraz"));
        assert_eq!(
            job.technologies,
            Some(ListColumn::Items(vec![
                "Python".to_string(),
                "Spark".to_string()
            ]))
        );
        assert_eq!(
            job.requirements,
            Some(ListColumn::Items(vec!["SQL".to_string()]))
        );
        assert_eq!(job.additional_info, None);
        assert_eq!(job.responsibilities, None);
    }

    #[tokio::test]
    async fn absent_fields_stay_null() {
        let store = test_store().await;
        let record = JobRecord {
            url: "https://it.pracuj.pl/praca/y,oferta,2".to_string(),
            ..JobRecord::default()
        };

        store.insert(&record).await.unwrap();
        let jobs = store.query_all().await.unwrap();

        assert_eq!(jobs[0].title, None);
        assert_eq!(jobs[0].work_location, None);
        assert_eq!(jobs[0].technologies, None);
        assert_eq!(jobs[0].application_link, None);
    }

    #[tokio::test]
    async fn unparseable_list_column_comes_back_raw() {
        let store = test_store().await;
        store
            .insert(&record("A", "https://x/1", "https://apply/1"))
            .await
            .unwrap();

        sqlx::query("UPDATE job_records SET technologies = ?, requirements = ?")
            .bind("not json at all")
            .bind("[\"valid\"]")
            .execute(&store.pool)
            .await
            .unwrap();

        let jobs = store.query_all().await.unwrap();
        assert_eq!(
            jobs[0].technologies,
            Some(ListColumn::Raw("not json at all".to_string()))
        );
        assert_eq!(
            jobs[0].requirements,
            Some(ListColumn::Items(vec!["valid".to_string()]))
        );
    }

    #[tokio::test]
    async fn deduplicate_keeps_the_earliest_row_of_each_group() {
        let store = test_store().await;
        store
            .insert(&record("A", "https://x/1", "https://apply/1"))
            .await
            .unwrap();
        store
            .insert(&record("A", "https://x/1", "https://apply/1"))
            .await
            .unwrap();
        store
            .insert(&record("B", "https://x/2", "https://apply/2"))
            .await
            .unwrap();
        store
            .insert(&record("A", "https://x/1", "https://apply/1"))
            .await
            .unwrap();
        store
            .insert(&record("C", "https://x/3", "https://apply/3"))
            .await
            .unwrap();

        let removed = store.deduplicate().await.unwrap();
        assert_eq!(removed, 2);

        let jobs = store.query_all().await.unwrap();
        let ids: Vec<i64> = jobs.iter().map(|job| job.id).collect();
        assert_eq!(ids, vec![1, 3, 5]);
    }

    #[tokio::test]
    async fn duplicate_pair_loses_only_the_later_row() {
        let store = test_store().await;
        for r in [
            record("B", "https://x/2", "https://apply/2"),
            record("A", "https://x/1", "https://apply/1"),
            record("C", "https://x/3", "https://apply/3"),
            record("D", "https://x/4", "https://apply/4"),
            record("A", "https://x/1", "https://apply/1"),
        ] {
            store.insert(&r).await.unwrap();
        }

        assert_eq!(store.deduplicate().await.unwrap(), 1);
        let ids: Vec<i64> = store
            .query_all()
            .await
            .unwrap()
            .iter()
            .map(|job| job.id)
            .collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn deduplicate_ignores_columns_outside_the_key() {
        let store = test_store().await;
        let mut first = record("A", "https://x/1", "https://apply/1");
        first.work_location = Some("Warszawa".to_string());
        let mut second = record("A", "https://x/1", "https://apply/1");
        second.work_location = Some("Kraków".to_string());

        store.insert(&first).await.unwrap();
        store.insert(&second).await.unwrap();

        assert_eq!(store.deduplicate().await.unwrap(), 1);
        let jobs = store.query_all().await.unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].work_location.as_deref(), Some("Warszawa"));
    }

    #[tokio::test]
    async fn deduplicate_groups_null_keys_together() {
        let store = test_store().await;
        let bare = JobRecord {
            url: "https://x/1".to_string(),
            ..JobRecord::default()
        };
        store.insert(&bare).await.unwrap();
        store.insert(&bare).await.unwrap();

        assert_eq!(store.deduplicate().await.unwrap(), 1);
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn scraped_record_survives_storage() {
        let html = r#"
            <h1 data-test="text-positionName">BI Developer</h1>
            <ul data-test="sections-benefit-list">
                <li>Warszawa</li>
                <li>Umowa o pracę</li>
            </ul>
            <ul data-test="aggregate-open-dictionary-model">
                <li>Power BI</li>
            </ul>
            <a class="b14qiyz3" href="https://system.pracuj.pl/apply/7">Aplikuj</a>
        "#;
        let record = crate::extractor::DetailExtractor::new()
            .extract("https://it.pracuj.pl/praca/bi,oferta,7", html);

        let store = test_store().await;
        store.insert(&record).await.unwrap();
        let jobs = store.query_all().await.unwrap();

        assert_eq!(jobs.len(), 1);
        assert_eq!(
            jobs[0].url.as_deref(),
            Some("https://it.pracuj.pl/praca/bi,oferta,7")
        );
        assert_eq!(jobs[0].title.as_deref(), Some("BI Developer"));
        assert_eq!(jobs[0].work_location.as_deref(), Some("Warszawa"));
        assert_eq!(jobs[0].contract_type.as_deref(), Some("Umowa o pracę"));
        assert_eq!(
            jobs[0].technologies,
            Some(ListColumn::Items(vec!["Power BI".to_string()]))
        );
        assert_eq!(
            jobs[0].application_link.as_deref(),
            Some("https://system.pracuj.pl/apply/7")
        );
    }

    #[tokio::test]
    async fn deduplicate_is_idempotent() {
        let store = test_store().await;
        store
            .insert(&record("A", "https://x/1", "https://apply/1"))
            .await
            .unwrap();
        store
            .insert(&record("A", "https://x/1", "https://apply/1"))
            .await
            .unwrap();

        assert_eq!(store.deduplicate().await.unwrap(), 1);
        assert_eq!(store.deduplicate().await.unwrap(), 0);
        assert_eq!(store.count().await.unwrap(), 1);
    }
}
