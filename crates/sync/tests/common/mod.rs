//! In-memory Grafana double for sync integration tests.
//!
//! Every route the sync runs touch is served from one shared state so a
//! download can read back what an upload wrote.
//!
//! # Invariants
//! - Folder and dashboard ids are allocated per instance, starting at 1
//! - Saves with a non-null dashboard `id` are rejected like a real server would

#![allow(dead_code)]

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use grafana_client::{AuthStrategy, GrafanaClient};
use grafana_sync::Confirm;
use secrecy::SecretString;
use serde_json::{Value, json};
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

#[derive(Debug, Clone)]
pub struct StoredFolder {
    pub id: i64,
    pub uid: String,
    pub title: String,
}

#[derive(Debug, Clone)]
pub struct StoredDashboard {
    pub id: i64,
    pub folder_id: i64,
    pub body: Value,
    pub starred: bool,
}

impl StoredDashboard {
    pub fn uid(&self) -> &str {
        self.body["uid"].as_str().unwrap_or_default()
    }

    pub fn title(&self) -> &str {
        self.body["title"].as_str().unwrap_or_default()
    }
}

#[derive(Debug, Default)]
pub struct State {
    pub folders: Vec<StoredFolder>,
    pub dashboards: Vec<StoredDashboard>,
    pub home_uid: Option<String>,
    next_folder_id: i64,
    next_dashboard_id: i64,
}

impl State {
    fn folder_by_id(&self, id: i64) -> Option<&StoredFolder> {
        self.folders.iter().find(|f| f.id == id)
    }

    fn allocate_folder_id(&mut self) -> i64 {
        self.next_folder_id += 1;
        self.next_folder_id
    }

    fn allocate_dashboard_id(&mut self) -> i64 {
        self.next_dashboard_id += 1;
        self.next_dashboard_id
    }
}

fn folder_json(folder: &StoredFolder) -> Value {
    json!({
        "id": folder.id,
        "uid": folder.uid,
        "title": folder.title,
        "url": format!("/dashboards/f/{}/", folder.uid),
    })
}

fn message(status: u16, text: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(json!({ "message": text }))
}

fn last_segment(request: &Request) -> String {
    request
        .url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or_default()
        .to_string()
}

#[derive(Clone, Copy)]
enum Route {
    ListFolders,
    CreateFolder,
    UpdateFolder,
    Search,
    GetDashboard,
    HomeDashboard,
    SaveDashboard,
    SetPreferences,
    Star,
}

struct Handler {
    route: Route,
    state: Arc<Mutex<State>>,
}

impl Respond for Handler {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let mut state = self.state.lock().unwrap();
        match self.route {
            Route::ListFolders => {
                let folders: Vec<Value> = state.folders.iter().map(folder_json).collect();
                ResponseTemplate::new(200).set_body_json(folders)
            }
            Route::CreateFolder => {
                let body: Value = serde_json::from_slice(&request.body).unwrap();
                let uid = body["uid"].as_str().unwrap().to_string();
                let title = body["title"].as_str().unwrap().to_string();
                if state.folders.iter().any(|f| f.uid == uid) {
                    return message(409, "a folder with the same uid already exists");
                }
                if state.folders.iter().any(|f| f.title == title) {
                    return message(409, "a folder with the same name already exists");
                }
                let folder = StoredFolder {
                    id: state.allocate_folder_id(),
                    uid,
                    title,
                };
                let response = folder_json(&folder);
                state.folders.push(folder);
                ResponseTemplate::new(200).set_body_json(response)
            }
            Route::UpdateFolder => {
                let uid = last_segment(request);
                let body: Value = serde_json::from_slice(&request.body).unwrap();
                match state.folders.iter_mut().find(|f| f.uid == uid) {
                    Some(folder) => {
                        folder.title = body["title"].as_str().unwrap().to_string();
                        ResponseTemplate::new(200).set_body_json(folder_json(folder))
                    }
                    None => message(404, "folder not found"),
                }
            }
            Route::Search => {
                let folder_id: Option<i64> = request
                    .url
                    .query_pairs()
                    .find(|(k, _)| k == "folderIds")
                    .and_then(|(_, v)| v.parse().ok());
                let results: Vec<Value> = state
                    .dashboards
                    .iter()
                    .filter(|d| folder_id.is_none_or(|id| d.folder_id == id))
                    .map(|d| {
                        let mut row = json!({
                            "id": d.id,
                            "uid": d.uid(),
                            "title": d.title(),
                            "type": "dash-db",
                            "tags": [],
                            "isStarred": d.starred,
                            "url": format!("/d/{}/", d.uid()),
                        });
                        if let Some(folder) = state.folder_by_id(d.folder_id) {
                            row["folderId"] = json!(folder.id);
                            row["folderUid"] = json!(folder.uid);
                            row["folderTitle"] = json!(folder.title);
                        }
                        row
                    })
                    .collect();
                ResponseTemplate::new(200).set_body_json(results)
            }
            Route::GetDashboard => {
                let uid = last_segment(request);
                match state.dashboards.iter().find(|d| d.uid() == uid) {
                    Some(d) => ResponseTemplate::new(200).set_body_json(json!({
                        "dashboard": d.body,
                        "meta": {"isStarred": d.starred, "folderId": d.folder_id},
                    })),
                    None => message(404, "Dashboard not found"),
                }
            }
            Route::HomeDashboard => match &state.home_uid {
                Some(uid) => ResponseTemplate::new(200)
                    .set_body_json(json!({ "redirectUri": format!("/d/{uid}/home") })),
                None => ResponseTemplate::new(200).set_body_json(json!({
                    "dashboard": {"title": "Home", "panels": []},
                    "meta": {},
                })),
            },
            Route::SaveDashboard => {
                let body: Value = serde_json::from_slice(&request.body).unwrap();
                let mut dashboard = body["dashboard"].clone();
                if !dashboard["id"].is_null() {
                    return message(400, "dashboard id must be null");
                }
                let folder_id = match body.get("folderUid").and_then(Value::as_str) {
                    None => 0,
                    Some(uid) => match state.folders.iter().find(|f| f.uid == uid) {
                        Some(folder) => folder.id,
                        None => return message(400, "folder not found"),
                    },
                };
                let uid = match dashboard["uid"].as_str() {
                    Some(uid) if !uid.is_empty() => uid.to_string(),
                    _ => format!("gen{}", state.next_dashboard_id + 1),
                };
                dashboard["uid"] = json!(uid);

                let id = match state.dashboards.iter_mut().find(|d| d.uid() == uid) {
                    Some(existing) => {
                        dashboard["id"] = json!(existing.id);
                        existing.body = dashboard;
                        existing.folder_id = folder_id;
                        existing.id
                    }
                    None => {
                        let id = state.allocate_dashboard_id();
                        dashboard["id"] = json!(id);
                        state.dashboards.push(StoredDashboard {
                            id,
                            folder_id,
                            body: dashboard,
                            starred: false,
                        });
                        id
                    }
                };
                ResponseTemplate::new(200).set_body_json(json!({
                    "id": id,
                    "uid": uid,
                    "status": "success",
                    "version": 1,
                    "url": format!("/d/{uid}/"),
                }))
            }
            Route::SetPreferences => {
                let body: Value = serde_json::from_slice(&request.body).unwrap();
                state.home_uid = body["homeDashboardUID"].as_str().map(str::to_string);
                message(200, "Preferences updated")
            }
            Route::Star => {
                let id: i64 = last_segment(request).parse().unwrap();
                match state.dashboards.iter_mut().find(|d| d.id == id) {
                    Some(d) => {
                        d.starred = true;
                        message(200, "Dashboard starred!")
                    }
                    None => message(404, "Dashboard not found"),
                }
            }
        }
    }
}

/// A mock Grafana instance backed by [`State`].
pub struct FakeGrafana {
    pub server: MockServer,
    pub state: Arc<Mutex<State>>,
}

impl FakeGrafana {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let state = Arc::new(Mutex::new(State::default()));

        let routes = [
            ("GET", None, Some("/api/folders"), Route::ListFolders),
            ("POST", None, Some("/api/folders"), Route::CreateFolder),
            ("PUT", Some(r"^/api/folders/[^/]+$"), None, Route::UpdateFolder),
            ("GET", None, Some("/api/search"), Route::Search),
            ("GET", None, Some("/api/dashboards/home"), Route::HomeDashboard),
            ("GET", Some(r"^/api/dashboards/uid/[^/]+$"), None, Route::GetDashboard),
            ("POST", None, Some("/api/dashboards/db"), Route::SaveDashboard),
            ("PATCH", None, Some("/api/org/preferences"), Route::SetPreferences),
            ("POST", Some(r"^/api/user/stars/dashboard/\d+$"), None, Route::Star),
        ];

        for (verb, regex, exact, route) in routes {
            let handler = Handler {
                route,
                state: Arc::clone(&state),
            };
            let mock = match (regex, exact) {
                (Some(regex), _) => Mock::given(method(verb)).and(path_regex(regex)),
                (None, Some(exact)) => Mock::given(method(verb)).and(path(exact)),
                (None, None) => unreachable!(),
            };
            mock.respond_with(handler).mount(&server).await;
        }

        Self { server, state }
    }

    pub fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    pub fn add_folder(&self, id: i64, uid: &str, title: &str) {
        let mut state = self.state();
        state.folders.push(StoredFolder {
            id,
            uid: uid.to_string(),
            title: title.to_string(),
        });
        state.next_folder_id = state.next_folder_id.max(id);
    }

    /// Store a dashboard body; its `id` is assigned here.
    pub fn add_dashboard(&self, folder_id: i64, mut body: Value) -> i64 {
        let mut state = self.state();
        let id = state.allocate_dashboard_id();
        body["id"] = json!(id);
        state.dashboards.push(StoredDashboard {
            id,
            folder_id,
            body,
            starred: false,
        });
        id
    }

    pub fn dashboard(&self, uid: &str) -> Option<StoredDashboard> {
        self.state()
            .dashboards
            .iter()
            .find(|d| d.uid() == uid)
            .cloned()
    }

    pub fn folder_uids(&self) -> Vec<String> {
        self.state().folders.iter().map(|f| f.uid.clone()).collect()
    }

    pub fn client(&self) -> GrafanaClient {
        self.client_with(token_auth())
    }

    pub fn basic_client(&self) -> GrafanaClient {
        self.client_with(basic_auth())
    }

    pub fn client_with(&self, auth: AuthStrategy) -> GrafanaClient {
        GrafanaClient::builder()
            .base_url(self.server.uri())
            .auth_strategy(auth)
            .max_retries(0)
            .build()
            .expect("client builds")
    }

    /// Requests received so far, as `(method, path)` pairs.
    pub async fn calls(&self) -> Vec<(String, String)> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .map(|r| (r.method.to_string(), r.url.path().to_string()))
            .collect()
    }

    /// JSON bodies of every `POST` to `path`.
    pub async fn bodies_posted_to(&self, target: &str) -> Vec<Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|r| r.method.as_str() == "POST" && r.url.path() == target)
            .map(|r| serde_json::from_slice(&r.body).unwrap())
            .collect()
    }
}

pub fn token_auth() -> AuthStrategy {
    AuthStrategy::Token {
        token: SecretString::new("test-token".to_string().into()),
    }
}

pub fn basic_auth() -> AuthStrategy {
    AuthStrategy::Basic {
        username: "admin".to_string(),
        password: SecretString::new("admin".to_string().into()),
    }
}

/// Seed the instance most tests start from.
///
/// - `Operations` (id 1, uid `ops`): `CPU Usage`, and `Ops Links` whose
///   dashlist panel titled `Team B` still points at a stale folder id
/// - `Team B` (id 2, uid `teamb`): `Team Overview`
/// - General: `Root Status`
pub fn seed_standard(fake: &FakeGrafana) {
    fake.add_folder(1, "ops", "Operations");
    fake.add_folder(2, "teamb", "Team B");
    fake.add_dashboard(
        1,
        json!({"uid": "cpu", "title": "CPU Usage", "panels": [{"type": "graph", "title": "CPU"}]}),
    );
    fake.add_dashboard(
        1,
        json!({
            "uid": "links",
            "title": "Ops Links",
            "panels": [{"type": "dashlist", "title": "Team B", "options": {"folderId": 99, "folderUID": "stale"}}]
        }),
    );
    fake.add_dashboard(
        2,
        json!({"uid": "overview", "title": "Team Overview", "rows": [{"panels": []}]}),
    );
    fake.add_dashboard(0, json!({"uid": "root", "title": "Root Status", "panels": []}));
}

/// Answers every prompt with a fixed value.
pub struct Answer(pub bool);

impl Confirm for Answer {
    fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}

pub fn read_json(path: &Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

/// Write `value` as a dashboard file, creating parent directories.
pub fn write_json(path: &Path, value: &Value) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

/// Drop the instance-local `id` so trees from two instances compare equal.
pub fn without_id(mut value: Value) -> Value {
    if let Some(map) = value.as_object_mut() {
        map.remove("id");
    }
    value
}
