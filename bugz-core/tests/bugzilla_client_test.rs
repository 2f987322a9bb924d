use bugz_core::client::{BugzillaClient, CallError};
use bugz_core::entity::{Bug, BugEntity, Comment, EcsBug, Entity};
use bugz_core::method::{
    BugFields, BugSearch, CommentBug, GetBug, GetBugField, GetProduct, MethodError,
    SearchLimiter, UpdateBug,
};
use bugz_core::transport::TransportError;
use serde_json::json;
use stub_transport::StubTransport;


#[tokio::test]
async fn test_get_bug() {
    let stub = StubTransport::replying(json!({
        "bugs": [{
            "id": 42,
            "summary": "Crash on startup",
            "product": "Firefox",
            "component": "General",
            "version": "128",
            "priority": "P1"
        }]
    }));
    let mut client = BugzillaClient::new(stub);

    let mut method = GetBug::<Bug>::by_id(42);
    client.call(&mut method).await.unwrap();

    let bug = method.bug().unwrap().unwrap();
    assert_eq!(bug.id().unwrap(), Some(42));
    assert_eq!(bug.summary().unwrap().as_deref(), Some("Crash on startup"));
    // Unparseable priorities fall back to the default
    assert_eq!(bug.priority().unwrap(), Some(3));

    let (name, params) = &client.transport().calls[0];
    assert_eq!(name, "Bug.get");
    assert_eq!(params["ids"], 42);
}

#[tokio::test]
async fn test_get_bug_with_empty_response() {
    let mut client = BugzillaClient::new(StubTransport::replying(json!({})));

    let mut method = GetBug::<EcsBug>::by_alias("missing");
    client.call(&mut method).await.unwrap();

    assert!(method.bug().unwrap().is_none());
}

#[tokio::test]
async fn test_search() {
    let stub = StubTransport::replying(json!({
        "bugs": [
            { "id": 1, "status": "NEW" },
            { "id": 2, "status": "NEW" },
            { "id": 3, "status": "NEW" }
        ]
    }));
    let mut client = BugzillaClient::new(stub);

    let mut search = BugSearch::<Bug>::new();
    search.add_limiter(SearchLimiter::Status, "NEW");
    search.add_limiter(SearchLimiter::Product, "Firefox");
    client.call(&mut search).await.unwrap();

    let ids: Vec<_> = search
        .search_results()
        .unwrap()
        .iter()
        .map(|bug| bug.id().unwrap().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2, 3]);

    let (name, params) = &client.transport().calls[0];
    assert_eq!(name, "Bug.search");
    assert_eq!(
        serde_json::Value::Object(params.clone()),
        json!({ "status": "NEW", "product": "Firefox" })
    );
}

#[tokio::test]
async fn test_update_then_comment() {
    let mut stub = StubTransport::replying(json!({ "bugs": [{ "id": 7, "changes": {} }] }));
    stub.push_response(json!({ "id": 1001 }));
    let mut client = BugzillaClient::new(stub);

    let mut record = bugz_core::entity::EntityRecord::new();
    record.set("id", 7);
    record.set("status", "CLOSED");
    record.set("resolution", "FIXED");
    let bug = Bug::from_record(record);

    let mut update = UpdateBug::new(bug).unwrap().with_comment("Landed", false);
    client.call(&mut update).await.unwrap();

    let mut comment = CommentBug::for_bug(update.bug(), Comment::new("Verified").private()).unwrap();
    client.call(&mut comment).await.unwrap();
    assert_eq!(comment.comment_id().unwrap(), 1001);

    let calls = &client.transport().calls;
    assert_eq!(calls[0].0, "Bug.update");
    assert_eq!(calls[0].1["resolution"], "FIXED");
    assert_eq!(calls[0].1["comment"], json!({ "body": "Landed", "is_private": false }));
    assert_eq!(calls[1].0, "Bug.add_comment");
    assert_eq!(
        serde_json::Value::Object(calls[1].1.clone()),
        json!({ "id": 7, "comment": "Verified", "is_private": true })
    );
}

#[tokio::test]
async fn test_update_reporting_no_modified_bug() {
    let mut client = BugzillaClient::new(StubTransport::replying(json!({ "bugs": [] })));

    let mut record = bugz_core::entity::EntityRecord::new();
    record.set("id", 7);
    let mut update = UpdateBug::new(Bug::from_record(record)).unwrap();

    let err = client.call(&mut update).await.unwrap_err();

    assert!(matches!(
        err,
        CallError::Method(MethodError::UnexpectedUpdateCount(0))
    ));
}

#[tokio::test]
async fn test_get_product() {
    let stub = StubTransport::replying(json!({
        "products": [{
            "id": 1,
            "name": "Firefox",
            "components": [{ "name": "Toolbar", "description": "The toolbar" }],
            "versions": [{ "name": "128", "sort_key": 0, "is_active": true }]
        }]
    }));
    let mut client = BugzillaClient::new(stub);

    let mut method = GetProduct::by_name("Firefox");
    client.call(&mut method).await.unwrap();

    let product = method.product().unwrap().unwrap();
    assert_eq!(product.name().unwrap().as_deref(), Some("Firefox"));

    let components = product.components().unwrap().unwrap();
    assert_eq!(components[0].description().unwrap().as_deref(), Some("The toolbar"));
    assert_eq!(product.milestones().unwrap(), None);

    assert_eq!(client.transport().calls[0].1["names"], "Firefox");
}

#[tokio::test]
async fn test_bug_fields() {
    let response = json!({
        "fields": [
            { "id": 1, "name": "bug_status", "values": [{ "name": "NEW" }, { "name": "CLOSED" }] },
            { "id": 2, "name": "resolution" }
        ]
    });
    let mut stub = StubTransport::replying(response.clone());
    stub.push_response(response);
    let mut client = BugzillaClient::new(stub);

    let mut single = GetBugField::by_name("bug_status");
    let mut all = BugFields::by_name("bug_status");
    client.call(&mut single).await.unwrap();
    client.call(&mut all).await.unwrap();

    assert_eq!(single.bug_field().unwrap().unwrap().id().unwrap(), Some(2));
    assert_eq!(all.bug_fields().unwrap().len(), 2);
    assert!(client.transport().calls.iter().all(|(name, _)| name == "Bug.fields"));
}

#[tokio::test]
async fn test_transport_errors_are_propagated() {
    let stub = StubTransport::failing(TransportError::Fault {
        code: 101,
        message: "Bug #9 does not exist.".to_string(),
    });
    let mut client = BugzillaClient::new(stub);

    let mut method = GetBug::<Bug>::by_id(9);
    let err = client.call(&mut method).await.unwrap_err();

    match err {
        CallError::Transport(TransportError::Fault { code, .. }) => assert_eq!(code, 101),
        other => panic!("expected a fault, got {other:?}"),
    }
    // The descriptor never received a response
    assert!(method.bug().unwrap().is_none());
}
