//! Shared fixtures: canned GraphQL payloads and a local GraphQL server.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::Router;
use serde_json::{json, Value};

pub type Responder = Arc<dyn Fn(&Value) -> (StatusCode, String) + Send + Sync>;

#[derive(Clone)]
struct ServerState {
    responder: Responder,
    requests: Arc<Mutex<Vec<Value>>>,
}

/// Local GraphQL server on 127.0.0.1; records every request body.
pub struct TestServer {
    pub endpoint: String,
    requests: Arc<Mutex<Vec<Value>>>,
}

impl TestServer {
    pub fn requests(&self) -> Vec<Value> {
        self.requests.lock().unwrap().clone()
    }
}

async fn handle(State(state): State<ServerState>, body: String) -> (StatusCode, String) {
    let request: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
    state.requests.lock().unwrap().push(request.clone());
    (state.responder)(&request)
}

/// Spawns a server answering every POST /graphql with `responder(request)`.
pub async fn spawn_server(responder: Responder) -> TestServer {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let state = ServerState {
        responder,
        requests: Arc::clone(&requests),
    };
    let app = Router::new()
        .route("/graphql", post(handle))
        .with_state(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    TestServer {
        endpoint: format!("http://{}/graphql", addr),
        requests,
    }
}

/// Spawns a server that answers like the Rick & Morty API, choosing the payload
/// by the root field named in the query document.
pub async fn spawn_rick_and_morty_server() -> TestServer {
    spawn_server(Arc::new(|request: &Value| {
        let query = request["query"].as_str().unwrap_or_default();
        let data = if query.contains("characters(") {
            characters_data()
        } else if query.contains("episodes(") {
            episodes_data()
        } else {
            locations_data()
        };
        (StatusCode::OK, json!({ "data": data }).to_string())
    }))
    .await
}

fn info(count: u32) -> Value {
    json!({ "count": count, "pages": 1, "next": null, "prev": null })
}

pub fn characters_data() -> Value {
    json!({
        "characters": {
            "info": info(2),
            "results": [
                {
                    "id": "1",
                    "name": "Rick Sanchez",
                    "status": "Alive",
                    "species": "Human",
                    "type": "",
                    "gender": "Male",
                    "image": "https://rickandmortyapi.com/api/character/avatar/1.jpeg",
                    "origin": { "name": "Earth (C-137)" },
                    "location": { "name": "Citadel of Ricks" }
                },
                {
                    "id": "2",
                    "name": "Morty Smith",
                    "status": "Alive",
                    "species": "Human",
                    "type": "",
                    "gender": "Male",
                    "image": "https://rickandmortyapi.com/api/character/avatar/2.jpeg",
                    "origin": { "name": "unknown" },
                    "location": { "name": "Citadel of Ricks" }
                }
            ]
        }
    })
}

pub fn locations_data() -> Value {
    json!({
        "locations": {
            "info": info(3),
            "results": [
                {
                    "id": "1",
                    "name": "Earth (C-137)",
                    "type": "Planet",
                    "dimension": "Dimension C-137",
                    "residents": [{ "id": "38", "name": "Beth Smith" }]
                },
                {
                    "id": "5",
                    "name": "Anatomy Park",
                    "type": "Microverse",
                    "dimension": "Dimension C-137",
                    "residents": [{ "id": "12", "name": "Alexander" }]
                },
                {
                    "id": "9",
                    "name": "Purge Planet",
                    "type": "Planet",
                    "dimension": "Replacement Dimension",
                    "residents": [
                        { "id": "26", "name": "Arthricia" },
                        { "id": "138", "name": "General Store Owner" },
                        { "id": "202", "name": "Lighthouse Keeper" },
                        { "id": "276", "name": "Purge Planet Ruler" }
                    ]
                }
            ]
        }
    })
}

pub fn episodes_data() -> Value {
    json!({
        "episodes": {
            "info": info(2),
            "results": [
                {
                    "id": "1",
                    "name": "Pilot",
                    "air_date": "December 2, 2013",
                    "episode": "S01E01",
                    "characters": [{ "id": "1", "name": "Rick Sanchez" }]
                },
                {
                    "id": "5",
                    "name": "Meeseeks and Destroy",
                    "air_date": "January 20, 2014",
                    "episode": "S01E05",
                    "characters": [
                        { "id": "1", "name": "Rick Sanchez" },
                        { "id": "3", "name": "Summer Smith" }
                    ]
                }
            ]
        }
    })
}
