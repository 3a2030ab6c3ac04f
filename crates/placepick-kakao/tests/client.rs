//! Integration tests for `KakaoClient` using wiremock HTTP mocks.

use placepick_core::{Coords, SortOrder};
use placepick_kakao::{CategorySearch, KakaoClient, KakaoError, KeywordSearch};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> KakaoClient {
    KakaoClient::with_base_url("test-key", 10, "placepick-test", base_url)
        .expect("client construction should not fail")
}

fn document(id: &str, name: &str, distance: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "place_name": name,
        "category_name": "음식점 > 카페",
        "category_group_code": "CE7",
        "category_group_name": "카페",
        "phone": "",
        "address_name": "서울 마포구 연남동 1-1",
        "road_address_name": "서울 마포구 동교로 1",
        "x": "126.92",
        "y": "37.56",
        "place_url": format!("http://place.map.kakao.com/{id}"),
        "distance": distance
    })
}

#[tokio::test]
async fn keyword_search_sends_key_and_parses_documents() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "meta": { "total_count": 120, "pageable_count": 45, "is_end": false },
        "documents": [document("1", "카페 하나", ""), document("2", "카페 둘", "")]
    });

    Mock::given(method("GET"))
        .and(path("/v2/local/search/keyword.json"))
        .and(header("Authorization", "KakaoAK test-key"))
        .and(query_param("query", "서울 감성카페"))
        .and(query_param("category_group_code", "CE7"))
        .and(query_param("page", "1"))
        .and(query_param("size", "3"))
        .and(query_param("sort", "accuracy"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let response = client
        .search_keyword(&KeywordSearch {
            query: "서울 감성카페",
            category_group_code: Some("CE7"),
            coords: None,
            radius: None,
            page: 1,
            size: 3,
            sort: SortOrder::Accuracy,
        })
        .await
        .expect("should parse keyword response");

    assert_eq!(response.meta.total_count, 120);
    assert_eq!(response.meta.pageable_count, 45);
    assert!(!response.meta.is_end);
    assert_eq!(response.documents.len(), 2);
    assert_eq!(response.documents[1].place_name, "카페 둘");
}

#[tokio::test]
async fn category_search_sends_coordinates_and_radius() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "meta": { "total_count": 1, "pageable_count": 1, "is_end": true },
        "documents": [document("9", "근처 카페", "230")]
    });

    Mock::given(method("GET"))
        .and(path("/v2/local/search/category.json"))
        .and(header("Authorization", "KakaoAK test-key"))
        .and(query_param("category_group_code", "CE7"))
        .and(query_param("x", "126.978"))
        .and(query_param("y", "37.5665"))
        .and(query_param("radius", "3000"))
        .and(query_param("sort", "distance"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let response = client
        .search_category(&CategorySearch {
            category_group_code: "CE7",
            coords: Coords::new(126.978, 37.5665),
            radius: 3_000,
            page: 1,
            size: 15,
            sort: SortOrder::Distance,
        })
        .await
        .expect("should parse category response");

    let page = response.into_search_response(1);
    assert!(page.is_end);
    assert_eq!(page.items[0].distance, Some(230));
}

#[tokio::test]
async fn non_success_status_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/local/search/keyword.json"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({"errorType": "AccessDeniedError"})),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .search_keyword(&KeywordSearch {
            query: "카페",
            category_group_code: None,
            coords: None,
            radius: None,
            page: 1,
            size: 3,
            sort: SortOrder::Accuracy,
        })
        .await
        .expect_err("401 should fail");

    assert_eq!(err.status(), Some(401));
    match err {
        KakaoError::Status { body, .. } => assert!(body.contains("AccessDeniedError")),
        other => panic!("expected Status, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_a_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/local/search/category.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .search_category(&CategorySearch {
            category_group_code: "AT4",
            coords: Coords::new(127.0, 37.0),
            radius: 500,
            page: 1,
            size: 3,
            sort: SortOrder::Distance,
        })
        .await
        .expect_err("garbage should fail");

    assert!(matches!(err, KakaoError::Deserialize { .. }));
}
