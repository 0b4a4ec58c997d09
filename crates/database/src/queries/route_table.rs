use sqlx::{postgres::PgQueryResult, Executor, Postgres};

pub const TABLE_NAME: &str = "bus_routes";

/// Declared schema for scraped listings. Nothing writes rows into it yet.
const CREATE_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS bus_routes (
        id SERIAL PRIMARY KEY,
        route_name TEXT,
        bus_name TEXT,
        bustype TEXT,
        departing_time TIME,
        duration TEXT,
        reaching_time TIME,
        star_rating REAL,
        price NUMERIC(10, 2),
        seats_available INTEGER,
        is_government BOOLEAN
    );
";

pub async fn create_if_missing<'c, E>(executor: E) -> Result<PgQueryResult, sqlx::Error>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query(CREATE_TABLE).execute(executor).await
}

/// Column names of the route table in declaration order.
pub async fn columns<'c, E>(executor: E) -> Result<Vec<String>, sqlx::Error>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_scalar(
        "
        SELECT
            column_name::TEXT
        FROM
            information_schema.columns
        WHERE
            table_schema = current_schema() AND table_name = $1
        ORDER BY
            ordinal_position;
        ",
    )
    .bind(TABLE_NAME)
    .fetch_all(executor)
    .await
}

pub async fn count_tables<'c, E>(executor: E) -> Result<i64, sqlx::Error>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_scalar(
        "
        SELECT
            COUNT(*)
        FROM
            information_schema.tables
        WHERE
            table_schema = current_schema() AND table_name = $1;
        ",
    )
    .bind(TABLE_NAME)
    .fetch_one(executor)
    .await
}
