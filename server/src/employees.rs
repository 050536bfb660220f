//! `/employees` routes. Each handler is a single store call plus response
//! formatting; the only failure callers can distinguish is a missing id.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{delete, get},
};
use entity::{Employee, EmployeePatch, NewEmployee};
use platform_api::{ApiError, ApiJson, ApiPath, ApiResult};
use platform_db::DbError;
use sea_orm::{DbErr, IntoActiveModel};
use tracing::info;

use crate::http::AppState;

const ENTITY: &str = "employee";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/employees", get(list_employees).post(create_employee))
        .route("/employees/seed", get(seed_employees))
        .route("/employees/all", delete(delete_all_employees))
        .route(
            "/employees/{id}",
            get(get_employee)
                .put(update_employee)
                .delete(delete_employee),
        )
}

async fn seed_employees(State(state): State<AppState>) -> ApiResult<&'static str> {
    let seeded = platform_db::seed_employees(state.employees.as_ref()).await?;
    info!(count = seeded.len(), "employee roster seeded");
    Ok("Done")
}

async fn list_employees(State(state): State<AppState>) -> ApiResult<Json<Vec<Employee>>> {
    let employees = state.employees.find_all().await?;
    Ok(Json(employees))
}

async fn get_employee(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<Employee>> {
    let employee = load(&state, id).await?;
    Ok(Json(employee))
}

async fn create_employee(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<NewEmployee>,
) -> ApiResult<(StatusCode, Json<Employee>)> {
    let employee = state.employees.save(input.into_active_model()).await?;
    info!(employee_id = employee.id, "employee created");
    Ok((StatusCode::CREATED, Json(employee)))
}

async fn update_employee(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(patch): ApiJson<EmployeePatch>,
) -> ApiResult<Json<Employee>> {
    let current = load(&state, id).await?;
    if patch.is_empty() {
        return Ok(Json(current));
    }
    // The row can vanish between the load and the write.
    let employee = state
        .employees
        .save(patch.apply(current))
        .await
        .map_err(|err| match err {
            DbError::Query(DbErr::RecordNotUpdated) => ApiError::not_found(ENTITY, id),
            other => other.into(),
        })?;
    info!(employee_id = employee.id, "employee updated");
    Ok(Json(employee))
}

async fn delete_employee(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<String> {
    let employee = load(&state, id).await?;
    let message = deleted_message(&employee);
    state.employees.delete(employee).await?;
    info!(employee_id = id, "employee deleted");
    Ok(message)
}

async fn delete_all_employees(State(state): State<AppState>) -> ApiResult<&'static str> {
    let removed = state.employees.delete_all().await?;
    info!(removed, "employee repository cleared");
    Ok("Repository deleted")
}

async fn load(state: &AppState, id: i64) -> ApiResult<Employee> {
    state
        .employees
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found(ENTITY, id))
}

fn deleted_message(employee: &Employee) -> String {
    format!(
        "Employee {} {} deleted",
        employee.first_name.as_deref().unwrap_or("null"),
        employee.last_name.as_deref().unwrap_or("null"),
    )
}
