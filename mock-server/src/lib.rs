use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
}

#[derive(Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
}

#[derive(Deserialize)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
}

pub struct Store {
    users: BTreeMap<u64, User>,
    next_id: u64,
}

impl Store {
    /// Users 1 to 3, next id 4.
    pub fn seeded() -> Self {
        let users = [(1, "Ada"), (2, "Grace"), (3, "Linus")]
            .into_iter()
            .map(|(id, name)| {
                let user = User {
                    id,
                    name: name.to_string(),
                    email: format!("{}@example.com", name.to_lowercase()),
                };
                (id, user)
            })
            .collect();
        Self { users, next_id: 4 }
    }
}

pub type Db = Arc<RwLock<Store>>;

type ApiResult<T> = Result<T, (StatusCode, Json<Value>)>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::seeded()));
    Router::new()
        .route("/valid_user", get(valid_user))
        .route("/invalid_user", get(invalid_user))
        .route("/whoami", get(whoami))
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", get(get_user).put(update_user).delete(delete_user))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "mock server listening");
    }
    axum::serve(listener, app()).await
}

fn user_not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({"error": "User not found"})))
}

async fn valid_user() -> Json<Value> {
    Json(json!({"user": "valid_user"}))
}

async fn invalid_user() -> (StatusCode, Json<Value>) {
    user_not_found()
}

async fn whoami(headers: HeaderMap) -> ApiResult<Json<Value>> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(|auth| Json(json!({"authorization": auth})))
        .ok_or((
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Missing Authorization header"})),
        ))
}

async fn list_users(
    State(db): State<Db>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Vec<User>> {
    let store = db.read().await;
    let name = params.get("name");
    Json(
        store
            .users
            .values()
            .filter(|u| name.map_or(true, |n| &u.name == n))
            .cloned()
            .collect(),
    )
}

async fn create_user(
    State(db): State<Db>,
    Json(input): Json<CreateUser>,
) -> (StatusCode, Json<User>) {
    let mut store = db.write().await;
    let user = User {
        id: store.next_id,
        name: input.name,
        email: input.email,
    };
    store.next_id += 1;
    store.users.insert(user.id, user.clone());
    (StatusCode::CREATED, Json(user))
}

async fn get_user(State(db): State<Db>, Path(id): Path<u64>) -> ApiResult<Json<User>> {
    let store = db.read().await;
    store.users.get(&id).cloned().map(Json).ok_or_else(user_not_found)
}

async fn update_user(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<UpdateUser>,
) -> ApiResult<Json<User>> {
    let mut store = db.write().await;
    let user = store.users.get_mut(&id).ok_or_else(user_not_found)?;
    if let Some(name) = input.name {
        user.name = name;
    }
    if let Some(email) = input.email {
        user.email = email;
    }
    Ok(Json(user.clone()))
}

async fn delete_user(State(db): State<Db>, Path(id): Path<u64>) -> ApiResult<StatusCode> {
    let mut store = db.write().await;
    store
        .users
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(user_not_found)
}
