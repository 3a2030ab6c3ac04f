//! Integration tests for `SearchOrchestrator` against wiremock upstreams.

use placepick_core::{
    build_query, Category, Coords, FilterAction, FilterState, KeywordPicker, LocationMode,
};
use placepick_kakao::KakaoClient;
use placepick_naver::NaverClient;
use placepick_search::{Provider, SearchError, SearchOrchestrator};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct FixedPick(usize);

impl KeywordPicker for FixedPick {
    fn pick_index(&mut self, _len: usize) -> usize {
        self.0
    }
}

fn kakao_client(base_url: &str) -> KakaoClient {
    KakaoClient::with_base_url("test-key", 10, "placepick-test", base_url)
        .expect("kakao client construction should not fail")
}

fn naver_client(base_url: &str) -> NaverClient {
    NaverClient::with_base_url("test-id", "test-secret", 10, "placepick-test", base_url)
        .expect("naver client construction should not fail")
}

fn document(id: usize, name: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id.to_string(),
        "place_name": name,
        "category_name": "음식점 > 카페",
        "category_group_code": "CE7",
        "category_group_name": "카페",
        "phone": "",
        "address_name": "",
        "road_address_name": "",
        "x": "126.9",
        "y": "37.5",
        "place_url": "",
        "distance": ""
    })
}

fn kakao_body(names: &[&str], total: u32, is_end: bool) -> serde_json::Value {
    let documents: Vec<_> = names
        .iter()
        .enumerate()
        .map(|(i, name)| document(i, name))
        .collect();
    serde_json::json!({
        "meta": { "total_count": total, "pageable_count": total.min(45), "is_end": is_end },
        "documents": documents
    })
}

fn image_body(link: &str) -> serde_json::Value {
    serde_json::json!({
        "lastBuildDate": "",
        "total": 1,
        "start": 1,
        "display": 1,
        "items": [{ "title": "img", "link": link, "thumbnail": "", "sizeheight": "1", "sizewidth": "1" }]
    })
}

#[tokio::test]
async fn region_and_sub_filter_drive_keyword_search() {
    let kakao = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/local/search/keyword.json"))
        .and(header("Authorization", "KakaoAK test-key"))
        .and(query_param("query", "서울 감성카페"))
        .and(query_param("category_group_code", "CE7"))
        .and(query_param("page", "1"))
        .and(query_param("size", "3"))
        .and(query_param("sort", "accuracy"))
        .respond_with(ResponseTemplate::new(200).set_body_json(kakao_body(
            &["a", "b", "c"],
            30,
            false,
        )))
        .expect(1)
        .mount(&kakao)
        .await;

    let orchestrator = SearchOrchestrator::new(Some(kakao_client(&kakao.uri())), None);
    let state = FilterState::new(Category::Cafe)
        .with_region("서울")
        .apply(FilterAction::SetSubFilter(Some("감성카페".into())));
    let query = build_query(&state, 1, &mut FixedPick(0));

    let response = orchestrator.execute(&query, false).await.expect("search");
    assert_eq!(response.items.len(), 3);
    assert_eq!(response.start, 1);
    assert!(!response.is_end);
    assert!(response.items.iter().all(|p| p.thumbnail.is_none()));
}

#[tokio::test]
async fn device_location_uses_category_endpoint_with_default_radius() {
    let kakao = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/local/search/category.json"))
        .and(query_param("category_group_code", "FD6"))
        .and(query_param("x", "127.1"))
        .and(query_param("y", "37.5"))
        .and(query_param("radius", "3000"))
        .and(query_param("sort", "distance"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(kakao_body(&["near"], 4, true)))
        .expect(1)
        .mount(&kakao)
        .await;

    let orchestrator = SearchOrchestrator::new(Some(kakao_client(&kakao.uri())), None);
    let state = FilterState::new(Category::Restaurant)
        .apply(FilterAction::UseMyLocation(Coords::new(127.1, 37.5)));
    let query = build_query(&state, 2, &mut FixedPick(0));
    assert!(query.keyword.is_none());

    let response = orchestrator.execute(&query, false).await.expect("search");
    assert!(response.is_end);
    assert_eq!(response.start, 4);
}

#[tokio::test]
async fn failed_enrichments_only_degrade_their_items() {
    let kakao = MockServer::start().await;
    let naver = MockServer::start().await;
    let names = ["장소 0", "장소 1", "장소 2", "장소 3", "장소 4"];

    Mock::given(method("GET"))
        .and(path("/v2/local/search/keyword.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(kakao_body(&names, 50, false)))
        .mount(&kakao)
        .await;

    for (i, name) in names.iter().enumerate() {
        let response = if i == 1 || i == 3 {
            ResponseTemplate::new(500).set_body_string("boom")
        } else {
            ResponseTemplate::new(200).set_body_json(image_body(&format!("https://img.example/{i}.jpg")))
        };
        Mock::given(method("GET"))
            .and(path("/v1/search/image"))
            .and(query_param("query", *name))
            .respond_with(response)
            .expect(1)
            .mount(&naver)
            .await;
    }

    let orchestrator = SearchOrchestrator::new(
        Some(kakao_client(&kakao.uri())),
        Some(naver_client(&naver.uri())),
    );
    let state = FilterState::new(Category::Cafe).apply(FilterAction::SetSize(5));
    let query = build_query(&state, 1, &mut FixedPick(0));

    let response = orchestrator.execute(&query, true).await.expect("search");
    assert_eq!(response.items.len(), 5);
    for (i, place) in response.items.iter().enumerate() {
        assert_eq!(place.name, names[i], "order must be preserved");
        if i == 1 || i == 3 {
            assert_eq!(place.thumbnail, None);
        } else {
            assert_eq!(
                place.thumbnail.as_deref(),
                Some(format!("https://img.example/{i}.jpg").as_str())
            );
        }
    }
}

#[tokio::test]
async fn enrichment_without_naver_leaves_items_untouched() {
    let kakao = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/local/search/keyword.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(kakao_body(&["a", "b"], 2, true)))
        .mount(&kakao)
        .await;

    let orchestrator = SearchOrchestrator::new(Some(kakao_client(&kakao.uri())), None);
    let query = build_query(&FilterState::new(Category::Cafe), 1, &mut FixedPick(0));
    let response = orchestrator.execute(&query, true).await.expect("search");
    assert_eq!(response.items.len(), 2);
    assert!(response.items.iter().all(|p| p.thumbnail.is_none()));
}

#[tokio::test]
async fn primary_failure_aborts_the_request() {
    let kakao = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&kakao)
        .await;

    let orchestrator = SearchOrchestrator::new(Some(kakao_client(&kakao.uri())), None);
    let query = build_query(&FilterState::new(Category::Resort), 1, &mut FixedPick(0));
    let err = orchestrator
        .execute(&query, true)
        .await
        .expect_err("502 should fail");
    assert!(err.is_provider());
}

#[tokio::test]
async fn missing_credentials_are_configuration_errors() {
    let orchestrator = SearchOrchestrator::default();
    let query = build_query(&FilterState::new(Category::Cafe), 1, &mut FixedPick(0));

    let err = orchestrator.execute(&query, false).await.expect_err("no kakao");
    assert!(matches!(err, SearchError::Configuration(Provider::Kakao)));

    let err = orchestrator
        .detail(Category::Cafe, "카페 온더락", None)
        .await
        .expect_err("no naver");
    assert!(matches!(err, SearchError::Configuration(Provider::Naver)));
}

#[tokio::test]
async fn blank_text_query_is_a_validation_error() {
    let orchestrator = SearchOrchestrator::default();
    let err = orchestrator.search_text("   ", 1, 15).await.expect_err("blank q");
    assert!(matches!(err, SearchError::Validation(ref msg) if msg == "Missing query parameter: q"));
}

#[tokio::test]
async fn text_search_has_no_category_filter() {
    let kakao = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/local/search/keyword.json"))
        .and(query_param("query", "스타벅스"))
        .and(query_param("size", "15"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(kakao_body(&["s"], 20, true)))
        .expect(1)
        .mount(&kakao)
        .await;

    let orchestrator = SearchOrchestrator::new(Some(kakao_client(&kakao.uri())), None);
    let response = orchestrator.search_text("스타벅스", 2, 15).await.expect("search");
    assert_eq!(response.start, 16);
    assert!(response.is_end);

    let requests = kakao.received_requests().await.expect("recording enabled");
    assert!(!requests[0].url.query_pairs().any(|(k, _)| k == "category_group_code"));
}

#[tokio::test]
async fn featured_picks_from_results_or_reports_not_found() {
    let kakao = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/local/search/keyword.json"))
        .and(query_param("query", "제주 인기카페"))
        .and(query_param("size", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(kakao_body(&["one", "two"], 2, true)))
        .mount(&kakao)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/local/search/keyword.json"))
        .and(query_param("query", "부산 인기카페"))
        .respond_with(ResponseTemplate::new(200).set_body_json(kakao_body(&[], 0, true)))
        .mount(&kakao)
        .await;

    let orchestrator = SearchOrchestrator::new(Some(kakao_client(&kakao.uri())), None);

    let featured = orchestrator
        .featured(LocationMode::ByRegion("제주".into()), &mut FixedPick(0))
        .await
        .expect("featured");
    assert_eq!(featured.category, Category::Cafe);
    assert_eq!(featured.place.name, "one");

    let err = orchestrator
        .featured(LocationMode::ByRegion("부산".into()), &mut FixedPick(0))
        .await
        .expect_err("empty results");
    assert!(matches!(err, SearchError::NotFound(ref msg) if msg == "No places found"));
}

#[tokio::test]
async fn naver_featured_attaches_thumbnail() {
    let naver = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search/local.json"))
        .and(query_param("query", "서울 감성카페"))
        .and(query_param("display", "5"))
        .and(query_param("start", "1"))
        .and(query_param("sort", "random"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "lastBuildDate": "",
            "total": 1,
            "start": 1,
            "display": 1,
            "items": [{
                "title": "<b>감성</b> 카페",
                "link": "https://cafe.example",
                "category": "카페,디저트>카페",
                "description": "",
                "telephone": "",
                "address": "서울특별시 종로구",
                "roadAddress": "",
                "mapx": "1269780000",
                "mapy": "375665000"
            }]
        })))
        .expect(1)
        .mount(&naver)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/search/image"))
        .and(query_param("query", "감성 카페"))
        .respond_with(ResponseTemplate::new(200).set_body_json(image_body("https://img.example/hero.jpg")))
        .expect(1)
        .mount(&naver)
        .await;

    let orchestrator = SearchOrchestrator::new(None, Some(naver_client(&naver.uri())));
    let featured = orchestrator
        .naver_featured(Some("서울"), &mut FixedPick(0))
        .await
        .expect("naver featured");

    assert_eq!(featured.category, Category::Cafe);
    assert_eq!(featured.place.name, "감성 카페");
    assert_eq!(featured.place.id, "1269780000_375665000");
    assert_eq!(
        featured.place.thumbnail.as_deref(),
        Some("https://img.example/hero.jpg")
    );
}

#[tokio::test]
async fn detail_survives_a_failing_blog_lookup() {
    let naver = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search/blog.json"))
        .and(query_param("query", "카페 온더락 카페 후기"))
        .and(query_param("display", "10"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&naver)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/search/image"))
        .and(query_param("query", "카페 온더락 카페"))
        .and(query_param("display", "6"))
        .respond_with(ResponseTemplate::new(200).set_body_json(image_body("https://img.example/x.jpg")))
        .expect(1)
        .mount(&naver)
        .await;

    let orchestrator = SearchOrchestrator::new(None, Some(naver_client(&naver.uri())));
    let detail = orchestrator
        .detail(Category::Cafe, "카페 온더락", None)
        .await
        .expect("detail");

    assert!(detail.blogs.is_empty());
    assert_eq!(detail.images.len(), 1);
    assert_eq!(detail.hero_image, "https://img.example/x.jpg");
}

#[tokio::test]
async fn detail_joins_blog_and_image_lookups() {
    let naver = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search/blog.json"))
        .and(query_param("query", "설악 리조트 휴양지 후기"))
        .and(query_param("sort", "sim"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "lastBuildDate": "",
            "total": 1,
            "start": 1,
            "display": 1,
            "items": [{
                "title": "<b>설악</b> 리조트 다녀옴",
                "link": "https://blog.example/1",
                "description": "뷰가 &quot;최고&quot;",
                "bloggername": "traveler",
                "bloggerlink": "",
                "postdate": "20240520"
            }]
        })))
        .expect(1)
        .mount(&naver)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/search/image"))
        .and(query_param("query", "설악 리조트 휴양지"))
        .respond_with(ResponseTemplate::new(200).set_body_json(image_body("https://img.example/s.jpg")))
        .expect(1)
        .mount(&naver)
        .await;

    let orchestrator = SearchOrchestrator::new(None, Some(naver_client(&naver.uri())));
    let detail = orchestrator
        .detail(Category::Resort, "설악 리조트", Some("https://img.example/thumb.jpg"))
        .await
        .expect("detail");

    assert_eq!(detail.title, "설악 리조트");
    assert_eq!(detail.blogs.len(), 1);
    assert_eq!(detail.blogs[0].title, "설악 리조트 다녀옴");
    assert_eq!(detail.blogs[0].description, "뷰가 \"최고\"");
    assert_eq!(detail.blogs[0].postdate, "2024.05.20");
    assert_eq!(detail.hero_image, "https://img.example/s.jpg");
}
