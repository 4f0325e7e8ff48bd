//! Entity CRUD routes: one collection path and one `/:id` path per table.

use crate::handlers::entity::{create, delete, list, update};
use crate::models::{Course, Enrollment, Resource, Student};
use crate::state::AppState;
use crate::store::{Repository, Store};
use axum::{
    routing::{get, put, MethodRouter},
    Router,
};

pub fn entity_routes(state: AppState, delete_enabled: bool) -> Router {
    Router::new()
        .route("/students", get(list::<Student>).post(create::<Student>))
        .route("/courses", get(list::<Course>).post(create::<Course>))
        .route("/enrollments", get(list::<Enrollment>).post(create::<Enrollment>))
        .route("/students/:id", item_route::<Student>(delete_enabled))
        .route("/courses/:id", item_route::<Course>(delete_enabled))
        .route("/enrollments/:id", item_route::<Enrollment>(delete_enabled))
        .with_state(state)
}

fn item_route<E>(delete_enabled: bool) -> MethodRouter<AppState>
where
    E: Resource,
    dyn Store: Repository<E>,
{
    let route = put(update::<E>);
    if delete_enabled {
        route.delete(delete::<E>)
    } else {
        route
    }
}
