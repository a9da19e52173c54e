//! End-to-end builder scenarios exercised through the public API only.

use reqforge::{
    accept_json, bearer_auth, json_content, Body, BodyMarshalerFn, BoxError, Builder,
    CancellationToken, Method, ParamsMarshalerFn, UrlValues,
};

fn token() -> CancellationToken {
    CancellationToken::new()
}

#[derive(serde::Serialize)]
struct SearchParams {
    param1: String,
    param2: i64,
    param3: Vec<String>,
}

#[derive(serde::Serialize)]
struct CreateUser<'a> {
    name: &'a str,
    admin: bool,
}

#[test]
fn full_post_request() {
    let request = Builder::new("https://api.example.com/")
        .with_method("POST")
        .with_path("/v1/users")
        .with_headers([json_content(), accept_json(), bearer_auth("tok-123").unwrap()])
        .with_body(Body::serialize(CreateUser { name: "ada", admin: true }))
        .build(token())
        .unwrap();

    assert_eq!(request.method(), Method::POST);
    assert_eq!(request.url().as_str(), "https://api.example.com/v1/users");
    assert_eq!(
        request.headers().get("content-type").unwrap(),
        "application/json"
    );
    assert_eq!(request.headers().get("accept").unwrap(), "application/json");
    assert_eq!(
        request.headers().get("authorization").unwrap(),
        "Bearer tok-123"
    );
    assert_eq!(
        request.body().as_bytes().unwrap(),
        br#"{"name":"ada","admin":true}"#
    );
}

#[test]
fn query_string_assembly() {
    let request = Builder::new("https://api.example.com")
        .with_path("search")
        .with_params(SearchParams {
            param1: "param1".to_owned(),
            param2: 100,
            param3: vec!["value1".to_owned(), "value2".to_owned()],
        })
        .build(token())
        .unwrap();

    assert_eq!(
        request.url().as_str(),
        "https://api.example.com/search?param1=param1&param2=100&param3=value1&param3=value2"
    );
}

#[test]
fn branching_builders_stay_independent() {
    let api = Builder::new("https://api.example.com").with_headers([accept_json()]);

    let list = api.with_path("/users");
    let create = api
        .with_method("POST")
        .with_path("/users")
        .with_headers([json_content()])
        .with_body(r#"{"name":"ada"}"#);

    let list_req = list.build(token()).unwrap();
    let create_req = create.build(token()).unwrap();

    // The shared ancestor's header appears on both branches.
    assert_eq!(list_req.headers().get("accept").unwrap(), "application/json");
    assert_eq!(create_req.headers().get("accept").unwrap(), "application/json");

    // The create branch's additions never leak into the list branch.
    assert_eq!(list_req.method(), Method::GET);
    assert!(list_req.headers().get("content-type").is_none());
    assert_eq!(list_req.body().as_bytes().unwrap(), b"");

    assert_eq!(create_req.method(), Method::POST);
    assert_eq!(create_req.body().as_bytes().unwrap(), br#"{"name":"ada"}"#);
}

#[test]
fn builder_survives_repeated_builds() {
    let builder = Builder::new("https://api.example.com")
        .with_path("/ping")
        .with_headers([accept_json()]);

    for _ in 0..3 {
        let request = builder.build(token()).unwrap();
        assert_eq!(request.url().as_str(), "https://api.example.com/ping");
        // Headers are installed fresh each build, not accumulated.
        assert_eq!(request.headers().get_all("accept").iter().count(), 1);
    }
}

#[test]
fn swapped_marshalers_apply_to_later_builds_only() {
    let base = Builder::new("https://api.example.com").with_body(Body::serialize(7));

    let default_req = base.build(token()).unwrap();
    assert_eq!(default_req.body().as_bytes().unwrap(), b"7");

    let custom = base.with_body_marshaler(BodyMarshalerFn(
        |value: &dyn erased_serde::Serialize| -> Result<Vec<u8>, BoxError> {
            let mut data = serde_json::to_vec(value)?;
            data.extend_from_slice(b"\n");
            Ok(data)
        },
    ));
    let custom_req = custom.build(token()).unwrap();
    assert_eq!(custom_req.body().as_bytes().unwrap(), b"7\n");

    // The already-built request is untouched by the swap.
    assert_eq!(default_req.body().as_bytes().unwrap(), b"7");
}

#[test]
fn error_stages_are_distinguishable() {
    let failing_params = ParamsMarshalerFn(
        |_: Option<&dyn erased_serde::Serialize>| -> Result<UrlValues, BoxError> {
            Err("always fails".into())
        },
    );

    // (label, error, check)
    let cases: Vec<(&str, reqforge::Error, fn(&reqforge::Error) -> bool)> = vec![
        (
            "params_marshal",
            Builder::new("https://api.example.com")
                .with_params_marshaler(failing_params)
                .build(token())
                .unwrap_err(),
            reqforge::Error::is_params_marshal,
        ),
        (
            "url",
            Builder::new("not a base url").build(token()).unwrap_err(),
            reqforge::Error::is_url,
        ),
        (
            "request",
            Builder::new("https://api.example.com")
                .with_method("BAD METHOD")
                .build(token())
                .unwrap_err(),
            reqforge::Error::is_request,
        ),
    ];

    for (label, err, check) in &cases {
        assert!(check(err), "{label}: expected stage-specific error, got {err}");
    }
}

#[test]
fn byte_bodies_do_not_touch_a_broken_marshaler() {
    let broken = BodyMarshalerFn(
        |_: &dyn erased_serde::Serialize| -> Result<Vec<u8>, BoxError> {
            Err("unusable".into())
        },
    );

    let request = Builder::new("https://api.example.com")
        .with_method("PUT")
        .with_body_marshaler(broken)
        .with_body(vec![1u8, 2, 3])
        .build(token())
        .unwrap();

    assert_eq!(request.body().as_bytes().unwrap(), &[1, 2, 3]);
}

#[test]
fn cancelled_token_fails_construction() {
    let cancelled = CancellationToken::new();
    cancelled.cancel();

    let err = Builder::new("https://api.example.com")
        .build(cancelled)
        .unwrap_err();
    assert!(err.is_request());
}

#[test]
fn token_is_carried_through() {
    let t = CancellationToken::new();
    let request = Builder::new("https://api.example.com").build(t.clone()).unwrap();

    assert!(!request.token().is_cancelled());
    t.cancel();
    assert!(request.token().is_cancelled());
}
