use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use jsonapi_core::{OAuthSettings, Parameters, Secret, Settings, TokenEncoding, ValueKind};
use jsonapi_exec::{
    AccessToken, ApiContext, Grant, HttpClient, HttpError, HttpMethod, HttpRequestParts,
    HttpResponseParts, StepError,
};

// Replays queued responses and records every request it receives.
#[derive(Default)]
struct ScriptedHttpClient {
    responses: Mutex<VecDeque<HttpResponseParts>>,
    requests: Mutex<Vec<HttpRequestParts>>,
}

impl ScriptedHttpClient {
    fn reply(&self, status: u16, body: &str) {
        let mut headers = BTreeMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());
        self.responses.lock().unwrap().push_back(HttpResponseParts {
            status,
            headers,
            body: body.as_bytes().to_vec(),
        });
    }

    fn requests(&self) -> Vec<HttpRequestParts> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpClient for ScriptedHttpClient {
    async fn send(
        &self,
        req: HttpRequestParts,
        _timeout: Duration,
        _max_response_bytes: usize,
    ) -> Result<HttpResponseParts, HttpError> {
        self.requests.lock().unwrap().push(req);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| HttpError::Other("no scripted response".to_string()))
    }
}

fn settings(oauth: Option<OAuthSettings>) -> Settings {
    Settings {
        base_url: "http://api.local/".to_string(),
        parameters: Parameters {
            access_token: Some(Secret::from("configured-token")),
            oauth,
        },
        ..Default::default()
    }
}

fn context(oauth: Option<OAuthSettings>) -> (Arc<ScriptedHttpClient>, ApiContext) {
    let http = Arc::new(ScriptedHttpClient::default());
    let ctx = ApiContext::from_settings(http.clone(), &settings(oauth));
    (http, ctx)
}

#[tokio::test]
async fn client_credentials_grant_then_bearer_requests() {
    let (http, mut ctx) = context(Some(OAuthSettings {
        use_bearer_token: true,
        ..Default::default()
    }));
    http.reply(200, r#"{"access_token":"abc123","token_type":"Bearer"}"#);
    http.reply(200, "{}");
    http.reply(200, "{}");

    ctx.oauth(Grant::client_credentials(), Some("view edit")).await.unwrap();
    assert_eq!(ctx.access_token(), Some(&AccessToken::Bearer("abc123".to_string())));

    ctx.request(HttpMethod::Get, "/v1/movies").await.unwrap();
    ctx.request(HttpMethod::Get, "/v1/movies/1").await.unwrap();

    let reqs = http.requests();
    let token_req = &reqs[0];
    assert_eq!(token_req.method, HttpMethod::Post);
    assert_eq!(token_req.url.as_str(), "http://api.local/v1/oauth/token");
    assert_eq!(
        String::from_utf8(token_req.body.clone()).unwrap(),
        "grant_type=client_credentials&client_id=testclient&client_secret=testsecret&scope=view+edit"
    );
    assert_eq!(
        token_req.headers.get("Content-Type").map(String::as_str),
        Some("application/x-www-form-urlencoded")
    );

    for req in &reqs[1..] {
        assert_eq!(req.headers.get("Authorization").map(String::as_str), Some("Bearer abc123"));
        assert_eq!(req.url.query(), None);
    }
}

#[tokio::test]
async fn json_token_request_sends_json_content_type() {
    let (http, mut ctx) = context(Some(OAuthSettings {
        token_request_encoding: TokenEncoding::Json,
        ..Default::default()
    }));
    http.reply(200, r#"{"access_token":"abc123"}"#);

    ctx.add_header("X-My-Header", "bacon");
    ctx.oauth(Grant::password("me@example.com", "p4ss"), Some("view")).await.unwrap();

    let token_req = &http.requests()[0];
    assert_eq!(
        token_req.headers.get("Content-Type").map(String::as_str),
        Some("application/json")
    );
    assert_eq!(token_req.headers.get("X-My-Header").map(String::as_str), Some("bacon"));
    assert_eq!(
        String::from_utf8(token_req.body.clone()).unwrap(),
        r#"{"grant_type":"password","username":"me@example.com","password":"p4ss","scope":"view"}"#
    );
    // The token request leaves the header set for the next request alone.
    assert_eq!(ctx.headers().get("X-My-Header"), Some("bacon"));
}

#[tokio::test]
async fn query_mode_appends_access_token() {
    let (http, mut ctx) = context(Some(OAuthSettings::default()));
    http.reply(200, r#"{"access_token":"abc123"}"#);
    http.reply(200, "{}");

    ctx.oauth(Grant::client_credentials(), None).await.unwrap();
    ctx.request(HttpMethod::Get, "/v1/movies").await.unwrap();

    let reqs = http.requests();
    assert_eq!(reqs[1].url.as_str(), "http://api.local/v1/movies?access_token=abc123");
    assert!(!reqs[1].headers.contains_key("Authorization"));
}

#[tokio::test]
async fn explicit_authorization_header_suppresses_query_token() {
    let (http, mut ctx) = context(None);
    http.reply(200, "{}");

    ctx.use_access_token("abc123");
    ctx.add_header("Authorization", "Basic Zm9vOmJhcg==");
    ctx.request(HttpMethod::Get, "/v1/movies?page=2").await.unwrap();

    let req = &http.requests()[0];
    assert_eq!(req.url.as_str(), "http://api.local/v1/movies?page=2");
    assert_eq!(req.headers.get("Authorization").map(String::as_str), Some("Basic Zm9vOmJhcg=="));
}

#[tokio::test]
async fn query_token_joins_existing_query() {
    let (http, mut ctx) = context(None);
    http.reply(200, "{}");

    ctx.use_configured_access_token().unwrap();
    ctx.request(HttpMethod::Get, "/v1/movies?page=2").await.unwrap();

    assert_eq!(
        http.requests()[0].url.as_str(),
        "http://api.local/v1/movies?page=2&access_token=configured-token"
    );
}

#[tokio::test]
async fn password_grant_failure_reports_description() {
    let (http, mut ctx) = context(Some(OAuthSettings {
        password_grant_requires_client_credentials: true,
        ..Default::default()
    }));
    http.reply(401, r#"{"error":"invalid_grant","error_description":"The user credentials were incorrect."}"#);

    let err = ctx
        .oauth(Grant::password("email@yourdomain.com", "wrong"), Some("view"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Authorization Error: The user credentials were incorrect.");
    assert!(ctx.access_token().is_none());

    // The rejected token response is still the current response.
    ctx.assert_status(401).unwrap();

    let body = String::from_utf8(http.requests()[0].body.clone()).unwrap();
    assert_eq!(
        body,
        "grant_type=password&username=email%40yourdomain.com&password=wrong&scope=view&client_id=testclient&client_secret=testsecret"
    );
}

#[tokio::test]
async fn grant_without_oauth_settings_is_configuration_error() {
    let (http, mut ctx) = context(None);
    let err = ctx.oauth(Grant::client_credentials_with("id", "secret"), None).await.unwrap_err();
    assert!(matches!(err, StepError::Configuration(_)));
    assert!(http.requests().is_empty());
}

#[tokio::test]
async fn missing_configured_access_token_is_configuration_error() {
    let http = Arc::new(ScriptedHttpClient::default());
    let mut ctx = ApiContext::new(http);
    assert!(matches!(
        ctx.use_configured_access_token(),
        Err(StepError::Configuration(_))
    ));
}

#[tokio::test]
async fn headers_reset_after_each_request() {
    let (http, mut ctx) = context(None);
    http.reply(200, "{}");
    http.reply(200, "{}");

    ctx.add_header("X-My-Header", "bacon");
    ctx.request(HttpMethod::Get, "/a").await.unwrap();
    assert_eq!(ctx.headers(), &jsonapi_exec::HeaderSet::new());
    ctx.request(HttpMethod::Get, "/b").await.unwrap();

    let reqs = http.requests();
    assert_eq!(reqs[0].headers.get("X-My-Header").map(String::as_str), Some("bacon"));
    assert!(!reqs[1].headers.contains_key("X-My-Header"));
    assert_eq!(reqs[1].headers.get("Content-Type").map(String::as_str), Some("application/json"));
}

#[tokio::test]
async fn payload_only_sent_with_write_methods() {
    let (http, mut ctx) = context(None);
    for _ in 0..3 {
        http.reply(200, "{}");
    }

    ctx.set_payload(r#"{ "comment": "This is a comment" }"#);
    ctx.request(HttpMethod::Post, "/v1/comments").await.unwrap();
    ctx.request(HttpMethod::Delete, "/v1/comments/1").await.unwrap();
    ctx.request(HttpMethod::Patch, "/v1/comments/1").await.unwrap();

    let reqs = http.requests();
    assert_eq!(reqs[0].body, br#"{ "comment": "This is a comment" }"#.to_vec());
    assert!(reqs[1].body.is_empty());
    assert_eq!(reqs[2].body, reqs[0].body);
}

#[tokio::test]
async fn scoped_assertions_on_movies_response() {
    let (http, mut ctx) = context(None);
    http.reply(
        200,
        r#"{"data":{"title":"Pulp Fiction","is_released":true,"id":17,"genres":["crime","drama"],"actors":[{"name":"John Travolta"}],"awards":[]}}"#,
    );

    ctx.request(HttpMethod::Get, "/v1/movies").await.unwrap();
    ctx.assert_status(200).unwrap();
    assert!(ctx.assert_status(201).is_err());

    ctx.scope_into_property("data");
    ctx.assert_structure(&["title", "is_released", "id", "genres", "actors", "awards"]).unwrap();
    ctx.assert_kind("genres", ValueKind::Array).unwrap();
    ctx.assert_array_len("genres", 2).unwrap();
    ctx.assert_empty_array("awards").unwrap();
    ctx.assert_integer_eq("id", 17).unwrap();
    ctx.assert_string_eq("title", "Pulp Fiction").unwrap();
    ctx.assert_boolean_eq("is_released", "true").unwrap();

    ctx.scope_into_first_element("actors");
    assert_eq!(ctx.scope().path(), Some("data.actors.0"));
    ctx.assert_kind("name", ValueKind::String).unwrap();
    ctx.assert_structure(&["name"]).unwrap();
}

#[tokio::test]
async fn boolean_usage_error_precedes_missing_response() {
    let (_http, ctx) = context(None);
    assert!(matches!(ctx.assert_boolean_eq("flag", "yes"), Err(StepError::Usage(_))));
    assert!(matches!(ctx.assert_boolean_eq("flag", "true"), Err(StepError::NoResponse)));
}

#[tokio::test]
async fn malformed_body_is_decode_error() {
    let (http, mut ctx) = context(None);
    http.reply(200, "<html>");
    ctx.request(HttpMethod::Get, "/").await.unwrap();
    assert!(matches!(ctx.assert_kind("x", ValueKind::Object), Err(StepError::Decode(_))));
}

#[tokio::test]
async fn echo_renders_last_exchange() {
    let (http, mut ctx) = context(None);
    assert!(matches!(ctx.echo_last_request(), Err(StepError::NoRequest)));
    assert!(matches!(ctx.echo_last_response(), Err(StepError::NoResponse)));

    http.reply(200, r#"{"ok":true}"#);
    ctx.set_payload("{}");
    ctx.request(HttpMethod::Put, "/v1/movies/1").await.unwrap();

    assert_eq!(
        ctx.echo_last_request().unwrap(),
        "PUT http://api.local/v1/movies/1 HTTP/1.1\nContent-Type: application/json\nContent: {}"
    );
    assert_eq!(
        ctx.echo_last_response().unwrap(),
        "HTTP/1.1 200\ncontent-type: application/json\nContent: {\"ok\":true}"
    );
}

#[tokio::test]
async fn invalid_url_is_reported() {
    let http = Arc::new(ScriptedHttpClient::default());
    let mut ctx = ApiContext::new(http);
    ctx.set_base_url("not a url");
    assert!(matches!(
        ctx.request(HttpMethod::Get, "/x").await,
        Err(StepError::InvalidUrl { .. })
    ));
}

#[tokio::test]
async fn scope_persists_across_requests() {
    let (http, mut ctx) = context(None);
    http.reply(200, r#"{"data":{"title":"Pulp Fiction"}}"#);
    http.reply(200, r#"{"data":{"title":"Jackie Brown"}}"#);

    ctx.request(HttpMethod::Get, "/v1/movies/1").await.unwrap();
    ctx.scope_into_property("data");
    ctx.assert_string_eq("title", "Pulp Fiction").unwrap();

    ctx.request(HttpMethod::Get, "/v1/movies/2").await.unwrap();
    assert_eq!(ctx.scope().path(), Some("data"));
    ctx.assert_string_eq("title", "Jackie Brown").unwrap();
}

#[tokio::test]
async fn response_item_count_reads_from_root() {
    let (http, mut ctx) = context(None);
    http.reply(200, r#"{"data":{"movies":[1,2,3]},"meta":{"page":1}}"#);

    ctx.request(HttpMethod::Get, "/v1/movies").await.unwrap();
    ctx.scope_into_property("data.movies");
    ctx.assert_response_item_count("data.movies", 3).unwrap();
    ctx.assert_response_item_count("meta", 1).unwrap();
    assert!(matches!(
        ctx.assert_response_item_count("data.movies", 2),
        Err(StepError::Assertion(_))
    ));
}
