mod common;

use common::{modified, tier, user, UserDto, BASE_API_URL, USER_URL};
use pocket_framework::mock::MockTransport;
use pocket_framework::{
    AccessLevel, ApiError, AppApi, CreateApi, CreateReadApi, CreateReadUpdateApi,
    CreateReadUpdateDeleteApi, DeleteApi, Method, Operation, ReadApi, ReadonlyApi, Tier,
    UpdateApi,
};
use serde_json::json;
use std::sync::Arc;

fn app_api(mock: &MockTransport, level: AccessLevel) -> AppApi<UserDto> {
    AppApi::build(Arc::new(mock.clone()), BASE_API_URL, "User", level).unwrap()
}

// --- Read tier ---

#[tokio::test]
async fn test_get_by_id_sends_get_with_id_query() {
    let mock = MockTransport::new();
    mock.expect(Method::Get).return_json(&user("u1", "Ann"));
    let api: ReadonlyApi<UserDto> = tier(&mock);

    let dto = api.get_by_id("u1").await.unwrap();

    assert_eq!(dto, user("u1", "Ann"));
    let requests = mock.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::Get);
    assert_eq!(requests[0].url.as_str(), USER_URL);
    assert_eq!(requests[0].query_value("id"), Some("u1"));
    assert!(requests[0].body.is_none());
    mock.verify();
}

#[tokio::test]
async fn test_get_by_id_missing_resource_is_not_found() {
    let mock = MockTransport::new();
    mock.expect(Method::Get).return_status(404, "");
    let api: ReadonlyApi<UserDto> = tier(&mock);

    let result = api.get_by_id("ghost").await;

    assert_eq!(
        result,
        Err(ApiError::NotFound {
            path: "User".into(),
            id: "ghost".into()
        })
    );
}

#[tokio::test]
async fn test_get_by_id_rejects_half_populated_modification_pair() {
    let mock = MockTransport::new();
    let mut broken = user("u1", "Ann");
    broken.last_modified_date_time = Some(2000);
    mock.expect(Method::Get).return_json(&broken);
    let api: ReadonlyApi<UserDto> = tier(&mock);

    let result = api.get_by_id("u1").await;

    assert!(matches!(result, Err(ApiError::InvalidShape { ref id, .. }) if id == "u1"));
}

#[tokio::test]
async fn test_get_all_by_ids_with_empty_list_sends_nothing() {
    let mock = MockTransport::new();
    let api: ReadonlyApi<UserDto> = tier(&mock);

    let dtos = api.get_all_by_ids(&[]).await.unwrap();

    assert!(dtos.is_empty());
    assert_eq!(mock.request_count(), 0);
}

#[tokio::test]
async fn test_get_all_by_ids_posts_id_list_and_keeps_order() {
    let mock = MockTransport::new();
    mock.expect(Method::Post).return_json(&vec![user("u2", "Bo"), user("u1", "Ann")]);
    let api: ReadonlyApi<UserDto> = tier(&mock);

    let ids = vec!["u2".to_string(), "u1".to_string()];
    let dtos = api.get_all_by_ids(&ids).await.unwrap();

    let names: Vec<&str> = dtos.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["Bo", "Ann"]);
    let requests = mock.requests();
    assert_eq!(requests[0].method, Method::Post);
    assert_eq!(requests[0].body, Some(json!(["u2", "u1"])));
    assert!(requests[0].query.is_empty());
}

#[tokio::test]
async fn test_get_all_by_ids_fails_as_a_unit() {
    let mock = MockTransport::new();
    mock.expect(Method::Post).return_status(500, "partial outage");
    let api: ReadonlyApi<UserDto> = tier(&mock);

    let result = api.get_all_by_ids(&["u1".to_string(), "u2".to_string()]).await;

    assert_eq!(
        result,
        Err(ApiError::Status {
            status: 500,
            body: "partial outage".into()
        })
    );
}

#[tokio::test]
async fn test_transport_failure_is_returned_not_raised() {
    let mock = MockTransport::new();
    mock.expect(Method::Get).return_err(ApiError::Transport("connection refused".into()));
    let api: ReadonlyApi<UserDto> = tier(&mock);

    let result = api.get_by_id("u1").await;

    assert_eq!(result, Err(ApiError::Transport("connection refused".into())));
}

// --- Create / Update tiers ---

#[tokio::test]
async fn test_create_posts_dto_and_returns_persisted_value() {
    let mock = MockTransport::new();
    let submitted = user("", "Cy");
    let persisted = UserDto {
        id: "u9".into(),
        created_date_time: 5000,
        ..submitted.clone()
    };
    mock.expect(Method::Post).return_json(&persisted);
    let api: CreateReadApi<UserDto> = tier(&mock);

    let result = api.create(submitted.clone()).await.unwrap();

    assert_eq!(result, persisted);
    let body = mock.requests()[0].body.clone().unwrap();
    assert_eq!(body["name"], "Cy");
    assert_eq!(body["createdByUserId"], "sys");
    assert_eq!(body["lastModifiedDateTime"], serde_json::Value::Null);
}

#[tokio::test]
async fn test_create_with_invalid_shape_fails_before_sending() {
    let mock = MockTransport::new();
    let mut broken = user("", "Cy");
    broken.last_modified_by_user_id = Some("u2".into());
    let api: CreateReadApi<UserDto> = tier(&mock);

    let result = api.create(broken).await;

    assert!(matches!(result, Err(ApiError::InvalidShape { .. })));
    assert_eq!(mock.request_count(), 0);
}

#[tokio::test]
async fn test_update_puts_full_object() {
    let mock = MockTransport::new();
    let edited = modified(&user("u1", "Annie"), 2000, "u7");
    mock.expect(Method::Put).return_json(&edited);
    let api: CreateReadUpdateApi<UserDto> = tier(&mock);

    let result = api.update(edited.clone()).await.unwrap();

    assert_eq!(result, edited);
    let request = &mock.requests()[0];
    assert_eq!(request.method, Method::Put);
    assert_eq!(request.url.as_str(), USER_URL);
    assert_eq!(request.body.as_ref().unwrap()["id"], "u1");
    assert_eq!(request.body.as_ref().unwrap()["lastModifiedByUserId"], "u7");
}

// --- Delete tier ---

#[tokio::test]
async fn test_delete_by_id_and_delete_object_target_same_resource() {
    let mock = MockTransport::new();
    mock.expect(Method::Delete).return_json(&true);
    mock.expect(Method::Delete).return_json(&true);
    let api: CreateReadUpdateDeleteApi<UserDto> = tier(&mock);

    let by_id = api.delete_by_id("u1").await;
    let by_object = api.delete_object(user("u1", "Ann")).await;

    assert_eq!(by_id, Ok(true));
    assert_eq!(by_object, by_id);
    let requests = mock.requests();
    assert_eq!(requests[0].url, requests[1].url);
    assert_eq!(requests[0].query_value("id"), Some("u1"));
    assert_eq!(requests[1].body.as_ref().unwrap()["id"], "u1");
}

#[tokio::test]
async fn test_delete_of_missing_resource_reports_nothing_removed() {
    let mock = MockTransport::new();
    mock.expect(Method::Delete).return_status(404, "");
    mock.expect(Method::Delete).return_json(&false);
    let api: CreateReadUpdateDeleteApi<UserDto> = tier(&mock);

    assert_eq!(api.delete_by_id("ghost").await, Ok(false));
    assert_eq!(api.delete_object(user("ghost", "?")).await, Ok(false));
}

#[tokio::test]
async fn test_delete_object_ignores_shape_of_submitted_object() {
    let mock = MockTransport::new();
    mock.expect(Method::Delete).return_json(&true);
    mock.expect(Method::Delete).return_json(&true);
    let api: CreateReadUpdateDeleteApi<UserDto> = tier(&mock);
    let mut half_modified = user("u1", "Ann");
    half_modified.last_modified_date_time = Some(2000);

    let by_object = api.delete_object(half_modified.clone()).await;
    let by_id = api.delete_by_id(&half_modified.id).await;

    assert_eq!(by_object, Ok(true));
    assert_eq!(by_object, by_id);
    mock.verify();
}

// --- Static tiers ---

fn reads<A: ReadApi<UserDto>>() {}
fn creates<A: CreateApi<UserDto>>() {}
fn updates<A: UpdateApi<UserDto>>() {}
fn deletes<A: DeleteApi<UserDto>>() {}

#[test]
fn test_tier_types_implement_their_traits() {
    reads::<ReadonlyApi<UserDto>>();

    reads::<CreateReadApi<UserDto>>();
    creates::<CreateReadApi<UserDto>>();

    creates::<CreateReadUpdateApi<UserDto>>();
    updates::<CreateReadUpdateApi<UserDto>>();

    updates::<CreateReadUpdateDeleteApi<UserDto>>();
    deletes::<CreateReadUpdateDeleteApi<UserDto>>();
}

#[test]
fn test_tier_levels_match_their_operation_sets() {
    assert_eq!(ReadonlyApi::<UserDto>::LEVEL, AccessLevel::Read);
    assert_eq!(CreateReadApi::<UserDto>::LEVEL, AccessLevel::Create);
    assert_eq!(CreateReadUpdateApi::<UserDto>::LEVEL, AccessLevel::Update);
    assert_eq!(CreateReadUpdateDeleteApi::<UserDto>::LEVEL, AccessLevel::Delete);
}

// --- Runtime tiers ---

#[test]
fn test_build_selects_the_variant_for_each_level() {
    let mock = MockTransport::new();

    assert!(matches!(app_api(&mock, AccessLevel::Read), AppApi::Read(_)));
    assert!(matches!(app_api(&mock, AccessLevel::Create), AppApi::Create(_)));
    assert!(matches!(app_api(&mock, AccessLevel::Update), AppApi::Update(_)));
    assert!(matches!(app_api(&mock, AccessLevel::Delete), AppApi::Delete(_)));

    for level in AccessLevel::ALL {
        let api = app_api(&mock, level);
        assert_eq!(api.level(), level);
        assert_eq!(api.operations(), level.operations());
        assert_eq!(api.endpoint().url().as_str(), USER_URL);
    }
}

#[test]
fn test_build_rejects_invalid_base_url() {
    let result = AppApi::<UserDto>::build(
        Arc::new(MockTransport::new()),
        "::not a url::",
        "User",
        AccessLevel::Read,
    );
    assert!(matches!(result, Err(ApiError::InvalidUrl(_))));
}

#[tokio::test]
async fn test_read_level_rejects_writes_without_network() {
    let mock = MockTransport::new();
    let api = app_api(&mock, AccessLevel::Read);

    let created = api.create(user("", "Cy")).await;
    let updated = api.update(user("u1", "Ann")).await;
    let deleted = api.delete_by_id("u1").await;
    let deleted_object = api.delete_object(user("u1", "Ann")).await;

    let unsupported = |operation| ApiError::Unsupported {
        operation,
        level: AccessLevel::Read,
    };
    assert_eq!(created, Err(unsupported(Operation::Create)));
    assert_eq!(updated, Err(unsupported(Operation::Update)));
    assert_eq!(deleted, Err(unsupported(Operation::DeleteById)));
    assert_eq!(deleted_object, Err(unsupported(Operation::DeleteObject)));
    assert!(!created.unwrap_err().is_transport());
    assert_eq!(mock.request_count(), 0);
}

#[tokio::test]
async fn test_update_level_allows_update_but_not_delete() {
    let mock = MockTransport::new();
    mock.expect(Method::Put).return_json(&user("u1", "Ann"));
    let api = app_api(&mock, AccessLevel::Update);

    assert!(api.update(user("u1", "Ann")).await.is_ok());
    assert!(matches!(
        api.delete_by_id("u1").await,
        Err(ApiError::Unsupported { .. })
    ));
    assert_eq!(mock.request_count(), 1);
    mock.verify();
}

#[tokio::test]
async fn test_delete_level_exposes_every_operation() {
    let mock = MockTransport::new();
    mock.expect(Method::Get).return_json(&user("u1", "Ann"));
    mock.expect(Method::Post).return_json(&vec![user("u1", "Ann")]);
    mock.expect(Method::Post).return_json(&user("u2", "Bo"));
    mock.expect(Method::Put).return_json(&user("u2", "Bob"));
    mock.expect(Method::Delete).return_json(&true);
    mock.expect(Method::Delete).return_json(&true);
    let api = app_api(&mock, AccessLevel::Delete);

    assert!(api.get_by_id("u1").await.is_ok());
    assert_eq!(api.get_all_by_ids(&["u1".to_string()]).await.unwrap().len(), 1);
    assert_eq!(api.create(user("", "Bo")).await.unwrap().id, "u2");
    assert_eq!(api.update(user("u2", "Bob")).await.unwrap().name, "Bob");
    assert_eq!(api.delete_by_id("u2").await, Ok(true));
    assert_eq!(api.delete_object(user("u2", "Bob")).await, Ok(true));
    mock.verify();
}

#[test]
fn test_typed_tier_converts_into_app_api() {
    let mock = MockTransport::new();
    let api: AppApi<UserDto> = tier::<CreateReadApi<UserDto>>(&mock).into();
    assert_eq!(api.level(), AccessLevel::Create);
    assert!(api.supports(Operation::Create));
    assert!(!api.supports(Operation::Update));
}
