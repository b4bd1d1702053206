use super::identity::{password_auth_body, token_auth_body};
use super::role_token::registerpath_from_body;
use super::*;
use crate::api::{RequestDescriptor, ResponseDescriptor};
use crate::transport::Transport;
use serde_json::json;
use std::cell::RefCell;
use std::collections::VecDeque;

struct ScriptedTransport {
    responses: RefCell<VecDeque<ResponseDescriptor>>,
    sent: RefCell<Vec<RequestDescriptor>>,
}

impl ScriptedTransport {
    fn new(responses: Vec<ResponseDescriptor>) -> Self {
        Self {
            responses: RefCell::new(responses.into()),
            sent: RefCell::new(Vec::new()),
        }
    }
}

impl Transport for ScriptedTransport {
    fn send(&self, request: &RequestDescriptor) -> Result<ResponseDescriptor, Error> {
        self.sent.borrow_mut().push(request.clone());
        let response = self
            .responses
            .borrow_mut()
            .pop_front()
            .expect("scripted response left");
        Ok(response)
    }
}

fn identity_response(token: Option<&str>) -> ResponseDescriptor {
    let resp = ResponseDescriptor::new(201, "http://keystone:5000/v3/auth/tokens");
    match token {
        Some(token) => resp.with_header("X-Subject-Token", token),
        None => resp,
    }
}

#[test]
fn token_post_with_credentials_sends_password_body() {
    let api = TokenApi::with_credentials("demo").expect("api");
    let desc = api
        .create(Some("alice"), Some("secret"))
        .descriptor(HttpMethod::Post)
        .expect("post");

    assert_eq!(desc.path, "v1/user/tokens");
    assert_eq!(
        desc.body,
        Some(json!({
            "auth": {
                "tenantName": "demo",
                "passwordCredentials": { "username": "alice", "password": "secret" }
            }
        }))
    );
    assert!(desc.query.is_none());
    assert!(!desc.headers.contains_key("x-auth-token"));
}

#[test]
fn token_post_with_iaas_token_sends_tenant_only() {
    let api = TokenApi::new("demo", "openstack-token").expect("api");
    let desc = api
        .create(None, None)
        .descriptor(HttpMethod::Post)
        .expect("post");

    assert_eq!(desc.body, Some(json!({ "auth": { "tenantName": "demo" } })));
    assert_eq!(
        desc.headers.get("x-auth-token").map(String::as_str),
        Some("U=openstack-token")
    );
}

#[test]
fn token_create_ignores_partial_credentials() {
    let api = TokenApi::with_credentials("demo").expect("api");
    let token = api.create(Some("alice"), Some(""));
    assert_eq!(token.call(), &TokenCall::Create { credentials: None });
    let token = api.create(None, Some("secret"));
    assert_eq!(token.call(), &TokenCall::Create { credentials: None });
}

#[test]
fn token_put_sends_query() {
    let api = TokenApi::with_credentials("demo").expect("api");
    let desc = api
        .create(Some("alice"), Some("secret"))
        .descriptor(HttpMethod::Put)
        .expect("put");
    assert_eq!(desc.path, "v1/user/tokens");
    assert!(desc.body.is_none());
    assert_eq!(
        desc.query,
        Some(json!({ "user": "alice", "password": "secret", "tenantname": "demo" }))
    );

    let desc = api
        .create(None, None)
        .descriptor(HttpMethod::Put)
        .expect("put");
    assert_eq!(desc.query, Some(json!({ "tenantname": "demo" })));
}

#[test]
fn token_show_and_validate_routes() {
    let api = TokenApi::new("demo", "openstack-token").expect("api");

    let show = api.show();
    assert_eq!(show.supported_methods(), vec![HttpMethod::Get]);
    let desc = show.descriptor(HttpMethod::Get).expect("get");
    assert_eq!(desc.path, "v1/user/tokens");
    assert!(desc.body.is_none() && desc.query.is_none());

    let validate = api.validate();
    assert_eq!(validate.supported_methods(), vec![HttpMethod::Head]);
    assert!(validate.descriptor(HttpMethod::Get).is_none());

    let create = api.create(None, None);
    assert_eq!(
        create.supported_methods(),
        vec![HttpMethod::Post, HttpMethod::Put]
    );
}

#[test]
fn token_api_rejects_empty_inputs() {
    match TokenApi::new("", "openstack-token") {
        Err(Error::InvalidField { field, .. }) => assert_eq!(field, "tenant"),
        other => panic!("unexpected result: {other:?}"),
    }
    match TokenApi::new("demo", "") {
        Err(Error::InvalidField { field, .. }) => assert_eq!(field, "iaas_token"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn completed_token_reads_token_field() {
    let transport = ScriptedTransport::new(vec![ResponseDescriptor::new(
        201,
        "http://localhost:18080/v1/user/tokens",
    )
    .with_body(r#"{"result":true,"message":null,"scoped":true,"token":"r3token"}"#)]);
    let api = TokenApi::with_credentials("demo").expect("api");
    let completed = api
        .create(Some("alice"), Some("secret"))
        .send(&transport, HttpMethod::Post)
        .expect("send")
        .expect("route");
    assert_eq!(completed.token().expect("token"), Some("r3token".to_string()));
    assert_eq!(completed.request().tenant(), "demo");
}

#[test]
fn completed_token_without_token_field() {
    let transport = ScriptedTransport::new(vec![ResponseDescriptor::new(
        200,
        "http://localhost:18080/v1/user/tokens",
    )
    .with_body(r#"{"result":true,"message":"token is valid"}"#)]);
    let api = TokenApi::new("demo", "openstack-token").expect("api");
    let completed = api
        .show()
        .send(&transport, HttpMethod::Get)
        .expect("send")
        .expect("route");
    assert_eq!(completed.token().expect("token"), None);
}

#[test]
fn role_token_route_carries_expire() {
    let req = RoleToken::new("r3token", "demo_role", 3600).expect("role token");
    assert_eq!(req.supported_methods(), vec![HttpMethod::Get]);

    let desc = req.descriptor(HttpMethod::Get).expect("get");
    assert_eq!(desc.path, "v1/role/token/demo_role");
    assert_eq!(desc.query, Some(json!({ "expire": 3600 })));
    assert_eq!(desc.query_pairs(), vec![("expire".to_string(), "3600".to_string())]);
    assert_eq!(
        desc.headers.get("x-auth-token").map(String::as_str),
        Some("U=r3token")
    );
    assert!(req.descriptor(HttpMethod::Post).is_none());
}

#[test]
fn role_token_rejects_empty_role() {
    match RoleToken::new("r3token", "", 60) {
        Err(Error::InvalidField { field, .. }) => assert_eq!(field, "role"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn role_token_list_route_carries_expand() {
    let req = RoleTokenList::new("r3token", "demo_role", true)
        .expect("list")
        .version("v2");
    let desc = req.descriptor(HttpMethod::Get).expect("get");
    assert_eq!(desc.path, "v2/role/token/list/demo_role");
    assert_eq!(desc.query_pairs(), vec![("expand".to_string(), "true".to_string())]);
    assert_eq!(req.supported_methods(), vec![HttpMethod::Get]);
}

#[test]
fn registerpath_is_read_from_token_entry() {
    let body = json!({ "tokens": { "tok123": { "registerpath": "/role/x" } } });
    assert_eq!(
        registerpath_from_body(&body, "tok123").expect("registerpath"),
        "/role/x"
    );

    match registerpath_from_body(&body, "other") {
        Err(Error::MissingKey(key)) => assert_eq!(key, "tokens.other.registerpath"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn completed_role_token_list_exposes_tokens() {
    let transport = ScriptedTransport::new(vec![ResponseDescriptor::new(
        200,
        "http://localhost:18080/v1/role/token/list/demo_role",
    )
    .with_body(
        r#"{"result":true,"message":null,"tokens":{"tok123":{"registerpath":"/role/x","user":"alice","expire":1700000000}}}"#,
    )]);
    let completed = RoleTokenList::new("r3token", "demo_role", true)
        .expect("list")
        .send(&transport, HttpMethod::Get)
        .expect("send")
        .expect("route");

    assert_eq!(completed.registerpath("tok123").expect("path"), "/role/x");
    let listing = completed.role_tokens().expect("tokens");
    let entry = listing.tokens.get("tok123").expect("entry");
    assert_eq!(entry.registerpath.as_deref(), Some("/role/x"));
    assert_eq!(entry.attributes.get("user"), Some(&json!("alice")));
}

#[test]
fn identity_bodies_match_keystone_v3() {
    let body = password_auth_body("alice", "secret");
    assert_eq!(body["auth"]["identity"]["methods"], json!(["password"]));
    assert_eq!(
        body["auth"]["identity"]["password"]["user"],
        json!({ "name": "alice", "domain": { "name": "Default" }, "password": "secret" })
    );

    let body = token_auth_body("unscoped", "demo");
    assert_eq!(body["auth"]["identity"]["token"]["id"], json!("unscoped"));
    assert_eq!(
        body["auth"]["scope"]["project"],
        json!({ "domain": { "id": "default" }, "name": "demo" })
    );
}

#[test]
fn identity_exchange_runs_two_rounds() {
    let transport = ScriptedTransport::new(vec![
        identity_response(Some("unscoped-token")),
        identity_response(Some("scoped-token")),
    ]);
    let token = exchange_openstack_token(&transport, "alice", "secret", "demo").expect("exchange");
    assert_eq!(token, Some("scoped-token".to_string()));

    let sent = transport.sent.borrow();
    assert_eq!(sent.len(), 2);
    assert!(sent.iter().all(|r| r.method == HttpMethod::Post && r.path.is_empty()));
    assert_eq!(sent[0].body, Some(password_auth_body("alice", "secret")));
    assert_eq!(sent[1].body, Some(token_auth_body("unscoped-token", "demo")));
}

#[test]
fn identity_exchange_stops_without_unscoped_token() {
    let transport = ScriptedTransport::new(vec![identity_response(None)]);
    let token = exchange_openstack_token(&transport, "alice", "secret", "demo").expect("exchange");
    assert_eq!(token, None);
    assert_eq!(transport.sent.borrow().len(), 1);
}

#[test]
fn identity_exchange_without_scoped_token() {
    let transport = ScriptedTransport::new(vec![
        identity_response(Some("unscoped-token")),
        identity_response(Some("")),
    ]);
    let token = exchange_openstack_token(&transport, "alice", "secret", "demo").expect("exchange");
    assert_eq!(token, None);
    assert_eq!(transport.sent.borrow().len(), 2);
}

#[test]
fn token_response_serializes_without_absent_fields() {
    let body: TokenResponse =
        serde_json::from_str(r#"{"result":true,"message":null,"token":"abc"}"#).expect("parse");
    assert!(body.result);
    assert_eq!(body.scoped, None);
    let value = serde_json::to_value(&body).expect("serialize");
    assert_eq!(value, json!({ "result": true, "token": "abc" }));
}
