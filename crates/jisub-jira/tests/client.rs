//! Client tests against a wiremock JIRA server.

use jisub_jira::{BearerAuth, Error, Issue, JiraClient, Mapping, StoryPoints};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "t0k3n";
const API: &str = "/rest/api/2";

fn mock_issue(key: &str) -> serde_json::Value {
    json!({
        "id": "10001",
        "key": key,
        "self": format!("https://jira.example.com/rest/api/2/issue/{}", key),
        "fields": {
            "summary": "Checkout flow",
            "subtasks": [],
            "status": {"name": "In Progress"},
            "issuetype": {"id": "7", "name": "Story", "subtask": false},
            "project": {"id": "10200"},
            "labels": ["backend"]
        }
    })
}

fn created(id: &str, key: &str) -> serde_json::Value {
    json!({
        "id": id,
        "key": key,
        "self": format!("https://jira.example.com/rest/api/2/issue/{}", id)
    })
}

async fn setup() -> (MockServer, JiraClient) {
    let server = MockServer::start().await;
    let client = JiraClient::new(
        format!("{}{}", server.uri(), API),
        Some(BearerAuth::new(TOKEN)),
    )
    .unwrap();
    (server, client)
}

async fn parent(server: &MockServer, client: &JiraClient) -> Issue {
    Mock::given(method("GET"))
        .and(path(format!("{}/issue/JIRA-39106", API)))
        .respond_with(ResponseTemplate::new(200).set_body_json(mock_issue("JIRA-39106")))
        .mount(server)
        .await;

    client.get_issue("JIRA-39106").await.unwrap()
}

#[tokio::test]
async fn test_get_issue() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(format!("{}/issue/JIRA-39106", API)))
        .and(header("Accept", "application/json"))
        .and(header("Authorization", "Bearer t0k3n"))
        .respond_with(ResponseTemplate::new(200).set_body_json(mock_issue("JIRA-39106")))
        .expect(1)
        .mount(&server)
        .await;

    let issue = client.get_issue("JIRA-39106").await.unwrap();
    assert_eq!(issue.key, "JIRA-39106");
    assert_eq!(issue.summary(), Some("Checkout flow"));
    assert_eq!(issue.status_name(), Some("In Progress"));
    assert_eq!(issue.project_id(), Some("10200"));
}

#[tokio::test]
async fn test_issue_key_stays_in_one_path_segment() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client.get_issue("JIRA-1/comment?expand=x#y").await.unwrap_err();
    assert_eq!(err.status(), Some(404));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].url.path(),
        "/rest/api/2/issue/JIRA-1%2Fcomment%3Fexpand=x%23y"
    );
    assert_eq!(requests[0].url.query(), None);
}

#[tokio::test]
async fn test_get_issue_not_found_is_remote_error() {
    let (server, client) = setup().await;
    let body = r#"{"errorMessages":["Issue Does Not Exist"],"errors":{}}"#;

    Mock::given(method("GET"))
        .and(path(format!("{}/issue/JIRA-404", API)))
        .respond_with(ResponseTemplate::new(404).set_body_string(body))
        .mount(&server)
        .await;

    let err = client.get_issue("JIRA-404").await.unwrap_err();
    assert!(err.is_remote());
    assert_eq!(err.status(), Some(404));
    let message = err.to_string();
    assert!(message.contains("404"));
    assert!(message.contains("Issue Does Not Exist"));
}

#[tokio::test]
async fn test_invalid_json_is_protocol_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(format!("{}/issue/JIRA-1", API)))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = client.get_issue("JIRA-1").await.unwrap_err();
    assert!(matches!(err, Error::Protocol(_)));
}

#[tokio::test]
async fn test_get_issue_empty_key_sends_nothing() {
    let (server, client) = setup().await;

    let err = client.get_issue("").await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_no_authorization_header_without_credentials() {
    let server = MockServer::start().await;
    let client = JiraClient::new(server.uri(), None).unwrap();

    Mock::given(method("GET"))
        .and(path("/issue/JIRA-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(mock_issue("JIRA-1")))
        .mount(&server)
        .await;

    client.get_issue("JIRA-1").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
    assert_eq!(
        requests[0].headers.get("accept").unwrap(),
        "application/json"
    );
}

#[tokio::test]
async fn test_create_sub_task() {
    let (server, client) = setup().await;
    let parent = parent(&server, &client).await;

    Mock::given(method("POST"))
        .and(path(format!("{}/issue", API)))
        .and(header("Content-Type", "application/json"))
        .and(header("Authorization", "Bearer t0k3n"))
        .and(body_json(json!({
            "fields": {
                "project": {"id": "10200"},
                "parent": {"key": "JIRA-39106"},
                "summary": "QA - Checkout flow",
                "issuetype": {"name": "Sub-task"},
                "customfield_10002": 2
            }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(created("10002", "JIRA-39107")))
        .expect(1)
        .mount(&server)
        .await;

    let issue = client
        .create_sub_task(&parent, "QA", StoryPoints::from(2))
        .await
        .unwrap();
    assert_eq!(issue.key, "JIRA-39107");
    assert!(issue.fields.is_none());
}

#[tokio::test]
async fn test_create_sub_tasks_bulk() {
    let (server, client) = setup().await;
    let parent = parent(&server, &client).await;
    let client = client.with_points_field("customfield_42");

    Mock::given(method("POST"))
        .and(path(format!("{}/issue/bulk", API)))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({
            "issueUpdates": [
                {"fields": {
                    "project": {"id": "10200"},
                    "parent": {"key": "JIRA-39106"},
                    "summary": "QA - Checkout flow",
                    "issuetype": {"name": "Sub-task"},
                    "customfield_42": 2
                }},
                {"fields": {
                    "project": {"id": "10200"},
                    "parent": {"key": "JIRA-39106"},
                    "summary": "BE - Checkout flow",
                    "issuetype": {"name": "Sub-task"},
                    "customfield_42": 3
                }}
            ]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "issues": [created("10002", "JIRA-39107"), created("10003", "JIRA-39108")],
            "errors": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let breakdown = Mapping::parse("QA:2 BE:3").unwrap();
    let issues = client.create_sub_tasks(&parent, &breakdown).await.unwrap();

    assert_eq!(issues.len(), 2);
    assert_eq!(
        issues.keys().collect::<Vec<_>>(),
        vec!["JIRA-39107", "JIRA-39108"]
    );
}

#[tokio::test]
async fn test_create_sub_tasks_empty_breakdown_sends_nothing() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let parent = Issue {
        key: "JIRA-39106".to_string(),
        ..Default::default()
    };
    let issues = client
        .create_sub_tasks(&parent, &Mapping::parse("").unwrap())
        .await
        .unwrap();

    assert!(issues.is_empty());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_sub_tasks_invalid_points_sends_nothing() {
    let (server, client) = setup().await;
    let parent = parent(&server, &client).await;

    let breakdown = Mapping::parse("QA:two").unwrap();
    let err = client.create_sub_tasks(&parent, &breakdown).await.unwrap_err();

    assert!(err.is_format());
    // only the GET used to fetch the parent
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_sub_tasks_remote_error() {
    let (server, client) = setup().await;
    let parent = parent(&server, &client).await;

    Mock::given(method("POST"))
        .and(path(format!("{}/issue/bulk", API)))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_string(r#"{"errors":{"customfield_10002":"Field cannot be set"}}"#),
        )
        .mount(&server)
        .await;

    let breakdown = Mapping::parse("QA:2").unwrap();
    let err = client.create_sub_tasks(&parent, &breakdown).await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert!(err.to_string().contains("Field cannot be set"));
}

#[tokio::test]
async fn test_update_issue_no_content() {
    let (server, client) = setup().await;
    let parent = parent(&server, &client).await;

    Mock::given(method("PUT"))
        .and(path(format!("{}/issue/JIRA-39106", API)))
        .and(header("Content-Type", "application/json"))
        .and(header("Authorization", "Bearer t0k3n"))
        .and(body_json(json!({
            "fields": {"storypoints": "4", "dealsize": "2,3,4"}
        })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let fields = Mapping::parse("storypoints:4 dealsize:2,3,4").unwrap();
    client.update_issue(&parent, &fields).await.unwrap();
}

#[tokio::test]
async fn test_update_issue_without_key_sends_nothing() {
    let (server, client) = setup().await;

    let fields = Mapping::parse("storypoints:4").unwrap();
    let err = client
        .update_issue(&Issue::default(), &fields)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "missing required issue key");
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_transport_error() {
    // nothing listens on port 1
    let client = JiraClient::new("http://127.0.0.1:1", Some(BearerAuth::new(TOKEN))).unwrap();
    let err = client.get_issue("JIRA-1").await.unwrap_err();
    assert!(matches!(err, Error::Http(_)));
}
