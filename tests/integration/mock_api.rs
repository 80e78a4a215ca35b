//! In-memory stand-in for the Taakra backend.
//!
//! Implements just enough of the API for a full run: JWT-style bearer
//! tokens are opaque strings, records live in hash maps, and admin-only
//! routes answer 403 to regular users.

use serde_json::{json, Value};
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use taakra_smoke::config::{DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD};
use taakra_smoke::harness::{ApiRequest, Method, RawResponse, Transport, TransportError};

pub const ADMIN_ACCESS: &str = "admin-access";
pub const ADMIN_REFRESH: &str = "admin-refresh";

/// A request as seen by the mock, with the bearer token if any.
#[derive(Debug, Clone, PartialEq)]
pub struct Seen {
    pub method: Method,
    pub path: String,
    pub bearer: Option<String>,
    pub query: Vec<(String, String)>,
}

#[derive(Default)]
struct State {
    users: HashMap<String, String>,
    user_tokens: HashSet<String>,
    refresh_tokens: HashSet<String>,
    categories: HashSet<String>,
    competitions: HashSet<String>,
    registrations: HashSet<String>,
}

pub struct MockApi {
    state: RefCell<State>,
    seen: RefCell<Vec<Seen>>,
    counter: Cell<u32>,
    admin_enabled: bool,
    reachable: bool,
    signup_conflict: bool,
    user_can_create_categories: bool,
    registration_vanishes: bool,
    chatbot_status: u16,
    interrupt_after: Option<(usize, Arc<AtomicBool>)>,
}

impl Default for MockApi {
    fn default() -> Self {
        Self {
            state: RefCell::new(State::default()),
            seen: RefCell::new(Vec::new()),
            counter: Cell::new(0),
            admin_enabled: true,
            reachable: true,
            signup_conflict: false,
            user_can_create_categories: false,
            registration_vanishes: false,
            chatbot_status: 503,
            interrupt_after: None,
        }
    }
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Admin login answers 401.
    pub fn without_admin(mut self) -> Self {
        self.admin_enabled = false;
        self
    }

    /// Every request fails to connect.
    pub fn unreachable(mut self) -> Self {
        self.reachable = false;
        self
    }

    /// Every signup answers 409 as if the email were taken.
    pub fn signup_conflict(mut self) -> Self {
        self.signup_conflict = true;
        self
    }

    /// Broken authorization: regular users may create categories.
    pub fn user_can_create_categories(mut self) -> Self {
        self.user_can_create_categories = true;
        self
    }

    /// Registrations disappear right after approval, so cleanup gets a 404.
    pub fn registration_vanishes(mut self) -> Self {
        self.registration_vanishes = true;
        self
    }

    pub fn chatbot_status(mut self, status: u16) -> Self {
        self.chatbot_status = status;
        self
    }

    /// Raise `flag` once `count` requests have been answered.
    pub fn interrupt_after(mut self, count: usize, flag: Arc<AtomicBool>) -> Self {
        self.interrupt_after = Some((count, flag));
        self
    }

    pub fn seen(&self) -> Vec<Seen> {
        self.seen.borrow().clone()
    }

    /// `"METHOD /path"` for every request, in order.
    pub fn calls(&self) -> Vec<String> {
        self.seen
            .borrow()
            .iter()
            .map(|s| format!("{} {}", s.method, s.path))
            .collect()
    }

    fn next_id(&self, prefix: &str) -> String {
        let n = self.counter.get() + 1;
        self.counter.set(n);
        format!("{prefix}-{n}")
    }

    fn is_admin(request: &ApiRequest) -> bool {
        request.bearer.as_deref() == Some(ADMIN_ACCESS)
    }

    fn is_user(&self, request: &ApiRequest) -> bool {
        request
            .bearer
            .as_ref()
            .is_some_and(|t| self.state.borrow().user_tokens.contains(t))
    }

    /// 200 for admins, 403 for users, 401 otherwise.
    fn admin_only(&self, request: &ApiRequest, ok: Value) -> (u16, Value) {
        if Self::is_admin(request) {
            (200, ok)
        } else if self.is_user(request) {
            (403, json!({"success": false, "message": "Forbidden"}))
        } else {
            (401, json!({"success": false, "message": "Unauthorized"}))
        }
    }

    fn issue_user_tokens(&self) -> (String, String) {
        let access = self.next_id("user-access");
        let refresh = self.next_id("user-refresh");
        let mut state = self.state.borrow_mut();
        state.user_tokens.insert(access.clone());
        state.refresh_tokens.insert(refresh.clone());
        (access, refresh)
    }

    fn field<'b>(request: &'b ApiRequest, key: &str) -> Option<&'b str> {
        request.body.as_ref()?.get(key)?.as_str()
    }

    fn login(&self, request: &ApiRequest) -> (u16, Value) {
        let email = Self::field(request, "email").unwrap_or_default();
        let password = Self::field(request, "password").unwrap_or_default();

        if email == DEFAULT_ADMIN_EMAIL && password == DEFAULT_ADMIN_PASSWORD {
            if !self.admin_enabled {
                return (401, json!({"success": false, "message": "Invalid credentials"}));
            }
            return (
                200,
                json!({"success": true, "data": {"accessToken": ADMIN_ACCESS, "refreshToken": ADMIN_REFRESH}}),
            );
        }

        let known = self.state.borrow().users.get(email).map(String::as_str) == Some(password);
        if known {
            let (access, refresh) = self.issue_user_tokens();
            (
                200,
                json!({"success": true, "data": {"accessToken": access, "refreshToken": refresh}}),
            )
        } else {
            (401, json!({"success": false, "message": "Invalid credentials"}))
        }
    }

    fn signup(&self, request: &ApiRequest) -> (u16, Value) {
        let email = Self::field(request, "email").unwrap_or_default().to_string();
        let password = Self::field(request, "password").unwrap_or_default().to_string();

        if self.signup_conflict || self.state.borrow().users.contains_key(&email) {
            return (409, json!({"success": false, "message": "Email already registered"}));
        }

        self.state.borrow_mut().users.insert(email, password);
        let user_id = self.next_id("u");
        let (access, refresh) = self.issue_user_tokens();
        (
            201,
            json!({"success": true, "data": {"accessToken": access, "refreshToken": refresh, "user": {"_id": user_id}}}),
        )
    }

    fn refresh(&self, request: &ApiRequest) -> (u16, Value) {
        let token = Self::field(request, "refreshToken").unwrap_or_default();
        if !self.state.borrow().refresh_tokens.contains(token) {
            return (401, json!({"success": false, "message": "Invalid refresh token"}));
        }
        let access = self.next_id("user-access");
        self.state.borrow_mut().user_tokens.insert(access.clone());
        (200, json!({"success": true, "data": {"accessToken": access}}))
    }

    fn create_category(&self, request: &ApiRequest) -> (u16, Value) {
        if Self::is_admin(request) {
            let id = self.next_id("cat");
            self.state.borrow_mut().categories.insert(id.clone());
            (201, json!({"success": true, "data": {"_id": id}}))
        } else if self.is_user(request) && self.user_can_create_categories {
            (200, json!({"success": true, "data": {"_id": "rogue"}}))
        } else {
            self.admin_only(request, Value::Null)
        }
    }

    fn route(&self, request: &ApiRequest) -> (u16, Value) {
        let segments: Vec<&str> = request
            .path
            .trim_start_matches('/')
            .split('/')
            .collect();
        let ok = json!({"success": true, "data": []});

        match (request.method, segments.as_slice()) {
            (Method::Get, ["health"]) => (200, json!({"status": "ok"})),

            (Method::Post, ["api", "auth", "login"]) => self.login(request),
            (Method::Post, ["api", "auth", "signup"]) => self.signup(request),
            (Method::Post, ["api", "auth", "refresh"]) => self.refresh(request),
            (Method::Get, ["api", "auth", "me"]) => {
                if self.is_user(request) {
                    (200, json!({"success": true, "data": {"role": "user"}}))
                } else {
                    (401, json!({"success": false}))
                }
            }

            (Method::Get, ["api", "categories"]) => (200, ok),
            (Method::Post, ["api", "categories"]) => self.create_category(request),
            (Method::Get, ["api", "categories", id]) => {
                if self.state.borrow().categories.contains(*id) {
                    (200, json!({"success": true, "data": {"_id": id}}))
                } else {
                    (404, json!({"success": false, "message": "Category not found"}))
                }
            }
            (Method::Put, ["api", "categories", _]) => self.admin_only(request, ok),
            (Method::Delete, ["api", "categories", id]) => {
                let removed = self.state.borrow_mut().categories.remove(*id);
                self.deleted(request, removed)
            }

            (Method::Get, ["api", "competitions"]) => (200, ok),
            (Method::Get, ["api", "competitions", "calendar"]) => (200, ok),
            (Method::Post, ["api", "competitions"]) => {
                let category = Self::field(request, "category").unwrap_or_default();
                if !Self::is_admin(request) {
                    return self.admin_only(request, Value::Null);
                }
                if !self.state.borrow().categories.contains(category) {
                    return (400, json!({"success": false, "message": "Unknown category"}));
                }
                let id = self.next_id("comp");
                self.state.borrow_mut().competitions.insert(id.clone());
                (201, json!({"success": true, "data": {"_id": id}}))
            }
            (Method::Get, ["api", "competitions", id]) => {
                if self.state.borrow().competitions.contains(*id) {
                    (200, json!({"success": true, "data": {"_id": id}}))
                } else {
                    (404, json!({"success": false}))
                }
            }
            (Method::Put, ["api", "competitions", _]) => self.admin_only(request, ok),
            (Method::Delete, ["api", "competitions", id]) => {
                let removed = self.state.borrow_mut().competitions.remove(*id);
                self.deleted(request, removed)
            }

            (Method::Post, ["api", "registrations"]) => {
                if !self.is_user(request) {
                    return (401, json!({"success": false}));
                }
                let id = self.next_id("reg");
                self.state.borrow_mut().registrations.insert(id.clone());
                (201, json!({"success": true, "data": {"_id": id, "status": "pending"}}))
            }
            (Method::Get, ["api", "registrations", "my"]) => {
                if self.is_user(request) {
                    (200, ok)
                } else {
                    (401, json!({"success": false}))
                }
            }
            (Method::Get, ["api", "registrations"]) => self.admin_only(request, ok),
            (Method::Put, ["api", "registrations", id, "approve"]) => {
                if self.registration_vanishes {
                    self.state.borrow_mut().registrations.remove(*id);
                }
                self.admin_only(request, json!({"success": true, "data": {"status": "approved"}}))
            }
            (Method::Delete, ["api", "registrations", id]) => {
                let removed = self.state.borrow_mut().registrations.remove(*id);
                self.deleted(request, removed)
            }

            (Method::Get, ["api", "admin", "stats"]) => {
                self.admin_only(request, json!({"success": true, "data": {"users": 3}}))
            }
            (Method::Get, ["api", "admin", "users"]) => self.admin_only(request, ok),
            (Method::Post, ["api", "admin", "support"]) => {
                let email = Self::field(request, "email").unwrap_or_default();
                if Self::is_admin(request) && !self.state.borrow().users.contains_key(email) {
                    return (404, json!({"success": false, "message": "User not found"}));
                }
                self.admin_only(request, json!({"success": true, "data": {"role": "support"}}))
            }

            (Method::Get, ["api", "chat", _]) => {
                if self.is_user(request) {
                    (200, ok)
                } else {
                    (401, json!({"success": false}))
                }
            }

            (Method::Post, ["api", "chatbot"]) => (
                self.chatbot_status,
                json!({"success": false, "message": "Chatbot is disabled"}),
            ),

            _ => (404, json!({"success": false, "message": "Route not found"})),
        }
    }

    fn deleted(&self, request: &ApiRequest, removed: bool) -> (u16, Value) {
        if Self::is_admin(request) && !removed {
            return (404, json!({"success": false, "message": "Not found"}));
        }
        self.admin_only(request, json!({"success": true, "message": "Deleted"}))
    }
}

impl Transport for MockApi {
    fn send(&self, request: &ApiRequest) -> Result<RawResponse, TransportError> {
        self.seen.borrow_mut().push(Seen {
            method: request.method,
            path: request.path.clone(),
            bearer: request.bearer.clone(),
            query: request.query.clone(),
        });

        let result = if self.reachable {
            let (status, body) = self.route(request);
            Ok(RawResponse::new(status, body.to_string()))
        } else {
            Err(TransportError::Connection(
                "tcp connect error: Connection refused (os error 111)".to_string(),
            ))
        };

        if let Some((count, flag)) = &self.interrupt_after {
            if self.seen.borrow().len() >= *count {
                flag.store(true, Ordering::SeqCst);
            }
        }

        result
    }
}
