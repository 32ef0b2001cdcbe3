mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn ownership_scenario() -> Result<()> {
    let server = common::ensure_server().await?;
    let (_, a_jwt) = common::signup(server, "Alice", "password").await?;
    let (_, b_jwt) = common::signup(server, "Bob", "password").await?;

    // A creates T
    let created = common::rpc(server, "AddTask", Some(&a_jwt), json!({ "title": "x" })).await?;
    assert_eq!(created.status, StatusCode::CREATED, "{}", created.body);
    let task_id = created.data()["id"].as_str().unwrap().to_string();
    let a_jwt = created.jwt.expect("rotated credential");

    // A reads T, credential rotates
    let read = common::rpc(server, "GetTask", Some(&a_jwt), json!({ "id": task_id })).await?;
    assert_eq!(read.status, StatusCode::OK, "{}", read.body);
    assert_eq!(read.data()["task"]["title"], "x");
    assert_eq!(read.data()["task"]["status"], "INCOMPLETE");
    let a_jwt = read.jwt.expect("rotated credential");

    // B cannot see T; indistinguishable from a missing id
    let b_read = common::rpc(server, "GetTask", Some(&b_jwt), json!({ "id": task_id })).await?;
    let missing = common::rpc(server, "GetTask", Some(&b_jwt), json!({ "id": "does-not-exist" })).await?;
    assert_eq!(b_read.status, StatusCode::NOT_FOUND);
    assert!(b_read.jwt.is_none());
    assert_eq!(b_read.body["code"], missing.body["code"]);

    // A completes T
    let before = chrono::Utc::now().timestamp();
    let updated = common::rpc(
        server,
        "UpdateTask",
        Some(&a_jwt),
        json!({ "id": task_id, "fields": { "status": "COMPLETE" } }),
    )
    .await?;
    assert_eq!(updated.status, StatusCode::OK, "{}", updated.body);
    assert_eq!(updated.data()["task"]["status"], "COMPLETE");
    assert!(updated.data()["task"]["updated_at"].as_i64().unwrap() >= before);
    let a_jwt = updated.jwt.expect("rotated credential");

    // B cannot update T either, and gets the same answer as for a missing id
    let b_update = common::rpc(
        server,
        "UpdateTask",
        Some(&b_jwt),
        json!({ "id": task_id, "fields": { "status": "INCOMPLETE" } }),
    )
    .await?;
    let b_update_missing = common::rpc(
        server,
        "UpdateTask",
        Some(&b_jwt),
        json!({ "id": "does-not-exist", "fields": { "status": "INCOMPLETE" } }),
    )
    .await?;
    assert_eq!(b_update.status, StatusCode::NOT_FOUND);
    assert!(b_update.jwt.is_none());
    assert_eq!(b_update.body["code"], b_update_missing.body["code"]);

    let unchanged = common::rpc(server, "GetTask", Some(&a_jwt), json!({ "id": task_id })).await?;
    assert_eq!(unchanged.status, StatusCode::OK);
    assert_eq!(unchanged.data()["task"]["status"], "COMPLETE");
    let a_jwt = unchanged.jwt.expect("rotated credential");

    // B "deletes" T: reported as success, nothing happens
    let b_delete = common::rpc(server, "DeleteTask", Some(&b_jwt), json!({ "task_id": task_id })).await?;
    assert_eq!(b_delete.status, StatusCode::OK, "{}", b_delete.body);

    let still_there = common::rpc(server, "GetTask", Some(&a_jwt), json!({ "id": task_id })).await?;
    assert_eq!(still_there.status, StatusCode::OK);
    assert_eq!(still_there.data()["task"]["status"], "COMPLETE");
    Ok(())
}

#[tokio::test]
async fn update_rejects_identity_and_unknown_fields() -> Result<()> {
    let server = common::ensure_server().await?;
    let (_, jwt) = common::signup(server, "Carol", "password").await?;

    let created = common::rpc(server, "AddTask", Some(&jwt), json!({ "title": "keep" })).await?;
    let task_id = created.data()["id"].as_str().unwrap().to_string();

    for (fields, message) in [
        (json!({ "title": "ok", "user_id": "mallory" }), "not allowed to update user_id"),
        (json!({ "task_id": "other" }), "not allowed to update task_id"),
        (json!({ "title": "ok", "priority": 1 }), "unknown attribute: priority"),
    ] {
        let res = common::rpc(server, "UpdateTask", Some(&jwt), json!({ "id": task_id, "fields": fields })).await?;
        assert_eq!(res.status, StatusCode::BAD_REQUEST);
        assert_eq!(res.body["message"], message);
        assert!(res.jwt.is_none());
    }

    let wrong_type = common::rpc(
        server,
        "UpdateTask",
        Some(&jwt),
        json!({ "id": task_id, "fields": { "due_date": "tomorrow" } }),
    )
    .await?;
    assert_eq!(wrong_type.status, StatusCode::BAD_REQUEST);
    assert!(wrong_type.body["message"].as_str().unwrap().contains("due_date"));

    // Nothing was written by the rejected calls
    let read = common::rpc(server, "GetTask", Some(&jwt), json!({ "id": task_id })).await?;
    assert_eq!(read.data()["task"]["title"], "keep");
    Ok(())
}

#[tokio::test]
async fn add_task_validation() -> Result<()> {
    let server = common::ensure_server().await?;
    let (_, jwt) = common::signup(server, "Dan", "password").await?;

    let blank = common::rpc(server, "AddTask", Some(&jwt), json!({ "title": "   " })).await?;
    assert_eq!(blank.status, StatusCode::BAD_REQUEST);

    let bad_rule = common::rpc(
        server,
        "AddTask",
        Some(&jwt),
        json!({ "title": "standup", "recurring_rule": { "cron_expression": "whenever" } }),
    )
    .await?;
    assert_eq!(bad_rule.status, StatusCode::BAD_REQUEST);

    let good = common::rpc(
        server,
        "AddTask",
        Some(&jwt),
        json!({
            "title": "standup",
            "tags": ["work", "daily"],
            "due_date": 1_900_000_000,
            "recurring_rule": { "cron_expression": "30 9 * * MON-FRI", "start_date": 1_700_000_000, "end_date": 0 }
        }),
    )
    .await?;
    assert_eq!(good.status, StatusCode::CREATED, "{}", good.body);
    Ok(())
}

#[tokio::test]
async fn list_and_delete_are_owner_scoped() -> Result<()> {
    let server = common::ensure_server().await?;
    let (_, e_jwt) = common::signup(server, "Erin", "password").await?;
    let (_, f_jwt) = common::signup(server, "Frank", "password").await?;

    let mut ids = Vec::new();
    for title in ["one", "two"] {
        let res = common::rpc(server, "AddTask", Some(&e_jwt), json!({ "title": title })).await?;
        ids.push(res.data()["id"].as_str().unwrap().to_string());
    }
    common::rpc(server, "AddTask", Some(&f_jwt), json!({ "title": "frank's" })).await?;

    let listed = common::rpc(server, "GetAllTasks", Some(&e_jwt), json!({})).await?;
    let tasks = listed.data()["tasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 2);
    assert!(tasks.iter().all(|t| ids.contains(&t["id"].as_str().unwrap().to_string())));

    // Deleting twice, and deleting nothing, all succeed
    for _ in 0..2 {
        let res = common::rpc(server, "DeleteTask", Some(&e_jwt), json!({ "task_id": ids[0] })).await?;
        assert_eq!(res.status, StatusCode::OK);
    }
    let res = common::rpc(server, "DeleteTask", Some(&e_jwt), json!({ "task_id": "never-existed" })).await?;
    assert_eq!(res.status, StatusCode::OK);

    let gone = common::rpc(server, "GetTask", Some(&e_jwt), json!({ "id": ids[0] })).await?;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);

    let blank = common::rpc(server, "DeleteTask", Some(&e_jwt), json!({ "task_id": "" })).await?;
    assert_eq!(blank.status, StatusCode::BAD_REQUEST);
    Ok(())
}
