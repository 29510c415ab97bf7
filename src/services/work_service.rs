use sqlx::PgPool;

use super::session_metrics::{total_hours, total_km};
use super::ServiceError;
use crate::api::{lenient, WorkPayload};
use crate::database::models::{WorkFields, WorkSession};
use crate::database::WorkRepository;

/// Write path of the work log: validation, duplicate guard and derived totals
pub struct WorkService {
    repo: WorkRepository,
}

impl WorkService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repo: WorkRepository::new(pool),
        }
    }

    /// Insert a session unless an identical one already exists.
    ///
    /// The duplicate check and the insert are separate statements, so two
    /// concurrent identical creates can both succeed.
    pub async fn create(&self, payload: WorkPayload) -> Result<WorkSession, ServiceError> {
        let fields = prepare(payload)?;

        if let Some(existing) = self.repo.find_duplicate(&fields).await? {
            tracing::info!("Rejected duplicate of work session {}", existing);
            return Err(ServiceError::Duplicate);
        }

        let work = self.repo.insert(&fields).await?;
        tracing::info!("Created work session {} for driver {}", work.id, work.driver_id);
        Ok(work)
    }

    /// Replace every field of a session; omitted optional fields become null.
    pub async fn update(&self, id: i64, payload: WorkPayload) -> Result<WorkSession, ServiceError> {
        let fields = prepare(payload)?;
        let work = self.repo.update(id, &fields).await?;
        tracing::info!("Updated work session {}", id);
        Ok(work)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        self.repo.delete(id).await?;
        tracing::info!("Deleted work session {}", id);
        Ok(())
    }
}

/// Validate required fields and compute the derived totals from this payload alone
pub fn prepare(payload: WorkPayload) -> Result<WorkFields, ServiceError> {
    const REQUIRED: &str = "driver_id & date required";

    let driver_id = payload.driver_id.ok_or(ServiceError::Validation(REQUIRED))?;
    let raw_date = payload.date.ok_or(ServiceError::Validation(REQUIRED))?;
    let date = lenient::parse_date(&raw_date)
        .ok_or(ServiceError::Validation("date must be a YYYY-MM-DD date"))?;

    let total_hours = total_hours(payload.start_time.as_deref(), payload.end_time.as_deref())?;
    let total_km = total_km(payload.odometer_start, payload.odometer_end);

    Ok(WorkFields {
        driver_id,
        date,
        machine: payload.machine,
        start_time: payload.start_time,
        end_time: payload.end_time,
        odometer_start: payload.odometer_start,
        odometer_end: payload.odometer_end,
        description: payload.description,
        location: payload.location,
        total_hours,
        total_km,
    })
}
