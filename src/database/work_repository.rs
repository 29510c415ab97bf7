use chrono::NaiveDate;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::database::manager::DatabaseError;
use crate::database::models::{WorkFields, WorkSession, WorkSessionWithDriver};

const WORK_COLUMNS: &str = "id, driver_id, date, machine, start_time, end_time, odometer_start, \
                            odometer_end, description, location, total_hours, total_km";

/// Identifying tuple of a session. Description, location and derived totals do not count.
const DUPLICATE_QUERY: &str = "SELECT id FROM works \
     WHERE driver_id = $1 \
       AND date = $2 \
       AND machine IS NOT DISTINCT FROM $3 \
       AND start_time IS NOT DISTINCT FROM $4 \
       AND end_time IS NOT DISTINCT FROM $5 \
       AND odometer_start IS NOT DISTINCT FROM $6 \
       AND odometer_end IS NOT DISTINCT FROM $7 \
     LIMIT 1";

/// Full replace: every writable column is assigned, so omitted fields become null
fn update_query() -> String {
    format!(
        "UPDATE works SET driver_id = $1, date = $2, machine = $3, start_time = $4, \
         end_time = $5, odometer_start = $6, odometer_end = $7, description = $8, \
         location = $9, total_hours = $10, total_km = $11 \
         WHERE id = $12 RETURNING {WORK_COLUMNS}"
    )
}

/// Optional list filters, combined with AND. Date bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkFilter {
    pub driver_id: Option<i64>,
    pub machine: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl WorkFilter {
    /// Compose the joined list query with bound parameters only
    pub fn to_query(&self) -> QueryBuilder<'_, Postgres> {
        let mut qb = QueryBuilder::new(
            "SELECT w.id, w.driver_id, w.date, w.machine, w.start_time, w.end_time, \
             w.odometer_start, w.odometer_end, w.description, w.location, w.total_hours, \
             w.total_km, d.name AS driver_name \
             FROM works w JOIN drivers d ON w.driver_id = d.id",
        );

        let mut separator = " WHERE ";
        if let Some(driver_id) = self.driver_id {
            qb.push(separator).push("w.driver_id = ").push_bind(driver_id);
            separator = " AND ";
        }
        if let Some(machine) = &self.machine {
            qb.push(separator).push("w.machine = ").push_bind(machine);
            separator = " AND ";
        }
        if let Some(date_from) = self.date_from {
            qb.push(separator).push("w.date >= ").push_bind(date_from);
            separator = " AND ";
        }
        if let Some(date_to) = self.date_to {
            qb.push(separator).push("w.date <= ").push_bind(date_to);
        }

        qb.push(" ORDER BY w.date DESC, w.id DESC");
        qb
    }
}

pub struct WorkRepository {
    pool: PgPool,
}

impl WorkRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn select_any(&self, filter: &WorkFilter) -> Result<Vec<WorkSessionWithDriver>, DatabaseError> {
        let mut qb = filter.to_query();
        tracing::debug!("Work list query: {}", qb.sql());
        let rows = qb
            .build_query_as::<WorkSessionWithDriver>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn select_one(&self, id: i64) -> Result<Option<WorkSession>, DatabaseError> {
        let sql = format!("SELECT {WORK_COLUMNS} FROM works WHERE id = $1");
        let row = sqlx::query_as::<_, WorkSession>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn select_404(&self, id: i64) -> Result<WorkSession, DatabaseError> {
        self.select_one(id).await?.ok_or(DatabaseError::NotFound)
    }

    /// Look for a session with the same identifying tuple. Absent values compare equal.
    pub async fn find_duplicate(&self, fields: &WorkFields) -> Result<Option<i64>, DatabaseError> {
        let id = sqlx::query_scalar::<_, i64>(DUPLICATE_QUERY)
            .bind(fields.driver_id)
            .bind(fields.date)
            .bind(&fields.machine)
            .bind(&fields.start_time)
            .bind(&fields.end_time)
            .bind(fields.odometer_start)
            .bind(fields.odometer_end)
            .fetch_optional(&self.pool)
            .await?;
        Ok(id)
    }

    pub async fn insert(&self, fields: &WorkFields) -> Result<WorkSession, DatabaseError> {
        let sql = format!(
            "INSERT INTO works (driver_id, date, machine, start_time, end_time, odometer_start, \
             odometer_end, description, location, total_hours, total_km) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) RETURNING {WORK_COLUMNS}"
        );
        let work = bind_fields(sqlx::query_as::<_, WorkSession>(&sql), fields)
            .fetch_one(&self.pool)
            .await
            .map_err(DatabaseError::from_write)?;

        tracing::debug!("Inserted work session {} for driver {}", work.id, work.driver_id);
        Ok(work)
    }

    /// Overwrite every column of an existing session
    pub async fn update(&self, id: i64, fields: &WorkFields) -> Result<WorkSession, DatabaseError> {
        let sql = update_query();
        bind_fields(sqlx::query_as::<_, WorkSession>(&sql), fields)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::from_write)?
            .ok_or(DatabaseError::NotFound)
    }

    pub async fn delete(&self, id: i64) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM works WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound);
        }
        Ok(())
    }
}

type WorkQueryAs<'q> =
    sqlx::query::QueryAs<'q, Postgres, WorkSession, sqlx::postgres::PgArguments>;

fn bind_fields<'q>(query: WorkQueryAs<'q>, fields: &'q WorkFields) -> WorkQueryAs<'q> {
    query
        .bind(fields.driver_id)
        .bind(fields.date)
        .bind(&fields.machine)
        .bind(&fields.start_time)
        .bind(&fields.end_time)
        .bind(fields.odometer_start)
        .bind(fields.odometer_end)
        .bind(&fields.description)
        .bind(&fields.location)
        .bind(fields.total_hours)
        .bind(fields.total_km)
}
