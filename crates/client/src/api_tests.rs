// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn pairs(q: &ProblemQuery) -> Vec<(String, String)> {
    q.to_pairs()
}

fn has(pairs: &[(String, String)], key: &str, value: &str) -> bool {
    pairs.iter().any(|(k, v)| k == key && v == value)
}

#[test]
fn default_query_sends_only_paging_and_sort() {
    let p = pairs(&ProblemQuery::default());
    assert_eq!(
        p,
        vec![
            ("page".to_owned(), "0".to_owned()),
            ("size".to_owned(), "12".to_owned()),
            ("sortType".to_owned(), "MOST_SOLVED".to_owned()),
        ]
    );
}

#[test]
fn filters_appear_when_set() {
    let q = ProblemQuery {
        page: 2,
        size: 24,
        category: Some("DEADLOCK".into()),
        difficulty: Some(Difficulty::Hard),
        problem_type: Some(ProblemType::MultipleChoice),
        sort: SortType::Latest,
        only_unsolved: true,
    };
    let p = pairs(&q);
    assert!(has(&p, "page", "2"));
    assert!(has(&p, "size", "24"));
    assert!(has(&p, "category", "DEADLOCK"));
    assert!(has(&p, "difficulty", "HARD"));
    assert!(has(&p, "type", "MULTIPLE_CHOICE"));
    assert!(has(&p, "sortType", "LATEST"));
    assert!(has(&p, "onlyUnsolved", "true"));
}

#[test]
fn empty_category_is_omitted() {
    let q = ProblemQuery { category: Some(String::new()), ..ProblemQuery::default() };
    assert!(!pairs(&q).iter().any(|(k, _)| k == "category"));
}

#[test]
fn filter_values_parse_loosely() -> anyhow::Result<()> {
    assert_eq!("easy".parse::<Difficulty>()?, Difficulty::Easy);
    assert_eq!("multiple-choice".parse::<ProblemType>()?, ProblemType::MultipleChoice);
    assert_eq!("least_solved".parse::<SortType>()?, SortType::LeastSolved);

    let err = "impossible".parse::<Difficulty>().err();
    assert_eq!(err.map(|e| e.to_string()), Some("unknown difficulty: impossible".to_owned()));
    Ok(())
}

#[test]
fn filter_serde_matches_wire_spelling() -> anyhow::Result<()> {
    assert_eq!(serde_json::to_value(ProblemType::MultipleChoice)?, "MULTIPLE_CHOICE");
    assert_eq!(serde_json::to_value(SortType::MostSolved)?, "MOST_SOLVED");
    Ok(())
}

#[test]
fn envelope_parses_platform_shape() -> anyhow::Result<()> {
    let body = serde_json::json!({
        "isSuccess": true,
        "statusCode": 200,
        "message": "ok",
        "data": { "problems": [], "currentPage": 0 }
    });
    let env: ApiResponse<serde_json::Value> = serde_json::from_value(body)?;
    assert!(env.is_success);
    assert_eq!(env.status_code, 200);
    assert_eq!(env.data["currentPage"], 0);
    Ok(())
}

#[test]
fn submission_body_shape() -> anyhow::Result<()> {
    let body = serde_json::to_value(SubmitAnswer { answer: "1,3".into(), duration: 42 })?;
    assert_eq!(body, serde_json::json!({ "answer": "1,3", "duration": 42 }));
    Ok(())
}

#[tokio::test]
async fn rejected_envelope_without_data_decodes() -> anyhow::Result<()> {
    use std::sync::Arc;

    use crate::store::MemoryTokenStore;

    let app = axum::Router::new().fallback(|| async {
        r#"{"isSuccess":false,"statusCode":404,"message":"no such problem"}"#
    });
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    let client = AuthClient::new(
        crate::client::ClientConfig::new(format!("http://{addr}")),
        Arc::new(MemoryTokenStore::new()),
        Arc::new(|_route: &str| {}),
    );
    let env = client.get_problem(404).await?;
    assert!(!env.is_success);
    assert_eq!(env.status_code, 404);
    assert_eq!(env.message, "no such problem");
    assert!(env.data.is_null());
    Ok(())
}
