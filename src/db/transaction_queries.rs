use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::Transaction;
use crate::store::TransactionFilter;

const SELECT_COLUMNS: &str =
    "SELECT id, title, description, price, date_of_sale, category, sold FROM transactions";

// Seven binds per row keeps each batch well under the Postgres bind limit.
const INSERT_BATCH_SIZE: usize = 1000;

fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &TransactionFilter) {
    qb.push(" WHERE EXTRACT(MONTH FROM date_of_sale AT TIME ZONE 'UTC') = ")
        .push_bind(filter.month.number() as i32);

    if let Some(search) = &filter.search {
        let pattern = search.like_pattern();
        qb.push(" AND (title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR description ILIKE ")
            .push_bind(pattern);
        if let Some(price) = search.price() {
            qb.push(" OR price = ").push_bind(price);
        }
        qb.push(")");
    }
}

pub async fn replace_all(pool: &PgPool, records: &[Transaction]) -> Result<u64, sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM transactions")
        .execute(&mut *tx)
        .await?;

    let mut inserted = 0;
    for batch in records.chunks(INSERT_BATCH_SIZE) {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(
            "INSERT INTO transactions (id, title, description, price, date_of_sale, category, sold) ",
        );
        qb.push_values(batch, |mut row, record| {
            row.push_bind(&record.id)
                .push_bind(&record.title)
                .push_bind(&record.description)
                .push_bind(record.price)
                .push_bind(record.date_of_sale)
                .push_bind(&record.category)
                .push_bind(record.sold);
        });
        inserted += qb.build().execute(&mut *tx).await?.rows_affected();
    }

    tx.commit().await?;
    Ok(inserted)
}

pub async fn count(pool: &PgPool, filter: &TransactionFilter) -> Result<i64, sqlx::Error> {
    let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("SELECT COUNT(*) FROM transactions");
    push_filter(&mut qb, filter);
    qb.build_query_scalar::<i64>().fetch_one(pool).await
}

pub async fn fetch_matching(
    pool: &PgPool,
    filter: &TransactionFilter,
) -> Result<Vec<Transaction>, sqlx::Error> {
    let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(SELECT_COLUMNS);
    push_filter(&mut qb, filter);
    qb.push(" ORDER BY seq");
    qb.build_query_as::<Transaction>().fetch_all(pool).await
}

pub async fn fetch_page(
    pool: &PgPool,
    filter: &TransactionFilter,
    offset: i64,
    limit: i64,
) -> Result<Vec<Transaction>, sqlx::Error> {
    let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(SELECT_COLUMNS);
    push_filter(&mut qb, filter);
    qb.push(" ORDER BY seq LIMIT ")
        .push_bind(limit)
        .push(" OFFSET ")
        .push_bind(offset);
    qb.build_query_as::<Transaction>().fetch_all(pool).await
}

pub async fn count_all(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM transactions")
        .fetch_one(pool)
        .await
}
