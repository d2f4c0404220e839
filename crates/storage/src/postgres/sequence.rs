//! PostgreSQL sequence adapter.
//!
//! A [`PgSequence`] is a lazily built `SELECT` over one table. Slicing
//! becomes `LIMIT`/`OFFSET`, counting becomes `SELECT COUNT(*)`.

use std::marker::PhantomData;

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};
use tracing::trace;

use pagewise_core::error::{PaginationError, PaginationResult, StorageError, StorageResult};
use pagewise_core::ports::{OrderDirection, Sequence, SliceBounds, SortKey};

/// Static description of a paginated table.
///
/// SAFETY: table and column names are interpolated into SQL, so they must
/// come from this descriptor and never from user input. Sort fields are
/// checked against `sortable` before use.
#[derive(Debug)]
pub struct PgSource {
    pub table: &'static str,
    /// Columns selected for each row.
    pub columns: &'static [&'static str],
    /// Columns a client may order by.
    pub sortable: &'static [&'static str],
    /// Unique column used as natural order and as tie-breaker.
    pub key: &'static str,
}

/// [`Sequence`] over a PostgreSQL table.
pub struct PgSequence<R> {
    pool: PgPool,
    source: &'static PgSource,
    order: Option<SortKey>,
    _row: PhantomData<fn() -> R>,
}

impl<R> PgSequence<R> {
    pub fn new(pool: PgPool, source: &'static PgSource) -> Self {
        Self {
            pool,
            source,
            order: None,
            _row: PhantomData,
        }
    }

    /// `SELECT` for a window. Parameters: `$1` limit (NULL for all), `$2` offset.
    pub fn select_sql(&self) -> String {
        format!(
            "SELECT {} FROM {} ORDER BY {} LIMIT $1 OFFSET $2",
            self.source.columns.join(", "),
            self.source.table,
            self.order_clause()
        )
    }

    pub fn count_sql(&self) -> String {
        format!("SELECT COUNT(*) FROM {}", self.source.table)
    }

    fn order_clause(&self) -> String {
        let key = self.source.key;
        match &self.order {
            Some(order) if order.field == key => {
                format!("{} {}", key, direction_sql(order.direction))
            }
            Some(order) => format!(
                "{} {}, {} ASC",
                order.field,
                direction_sql(order.direction),
                key
            ),
            None => format!("{} ASC", key),
        }
    }
}

fn direction_sql(direction: OrderDirection) -> &'static str {
    match direction {
        OrderDirection::Asc => "ASC",
        OrderDirection::Desc => "DESC",
    }
}

#[async_trait]
impl<R> Sequence for PgSequence<R>
where
    R: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    type Item = R;

    async fn materialize(&self, bounds: SliceBounds) -> StorageResult<Vec<R>> {
        let sql = self.select_sql();
        trace!(sql = %sql, offset = bounds.offset, length = ?bounds.length, "Materializing window");

        let limit = bounds.length.map(to_i64).transpose()?;
        let offset = to_i64(bounds.offset)?;

        sqlx::query_as::<_, R>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StorageError::QueryError(e.to_string()))
    }

    async fn count(&self) -> StorageResult<u64> {
        let sql = self.count_sql();
        trace!(sql = %sql, "Counting rows");

        let (count,): (i64,) = sqlx::query_as(&sql)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StorageError::QueryError(e.to_string()))?;

        Ok(count as u64)
    }

    fn order_by(mut self, key: &SortKey) -> PaginationResult<Self> {
        if !self.source.sortable.contains(&key.field.as_str()) {
            return Err(PaginationError::UnknownOrderingField(key.field.clone()));
        }
        self.order = Some(key.clone());
        Ok(self)
    }
}

fn to_i64(value: u64) -> StorageResult<i64> {
    i64::try_from(value).map_err(|_| {
        StorageError::SerializationError(format!("{} does not fit a BIGINT", value))
    })
}
