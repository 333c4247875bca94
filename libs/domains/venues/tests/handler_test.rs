//! Handler tests for Venues domain
//!
//! These tests verify HTTP behavior of the venue endpoints, including the
//! admin gate on mutating routes and the geospatial /near route, against a
//! real MongoDB container.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::{Extension, Router};
use axum_helpers::{JwtAuth, JwtConfig};
use domain_venues::*;
use http_body_util::BodyExt;
use serde_json::json;
use test_utils::TestMongo;
use tower::ServiceExt; // For oneshot()
use uuid::Uuid;

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn test_jwt_auth() -> JwtAuth {
    JwtAuth::new(&JwtConfig::new("handler-test-secret-that-is-32-chars!"))
}

fn test_app(service: VenueService<MongoVenueRepository>, jwt_auth: &JwtAuth) -> Router {
    Router::new()
        .nest("/venues", handlers::router(service))
        .layer(Extension(jwt_auth.clone()))
}

fn token_with_role(jwt_auth: &JwtAuth, role: &str) -> String {
    jwt_auth
        .create_access_token(&Uuid::new_v4().to_string(), "tester", "tester@example.com", role)
        .unwrap()
}

fn venue_input(name: &str, city: &str, longitude: f64, latitude: f64) -> CreateVenue {
    CreateVenue {
        name: name.to_string(),
        address: format!("{name} street 1"),
        city: city.to_string(),
        country: "Portugal".to_string(),
        postal_code: None,
        description: None,
        capacity: Some(500),
        amenities: vec!["parking".to_string()],
        location: Some(GeoPoint::new(longitude, latitude)),
    }
}

#[tokio::test]
async fn test_create_venue_returns_201() {
    let mongo = TestMongo::new().await;
    let service = VenueService::new(MongoVenueRepository::new(mongo.database("create_201")));
    let jwt_auth = test_jwt_auth();
    let app = test_app(service, &jwt_auth);

    let request = Request::builder()
        .method("POST")
        .uri("/venues")
        .header("content-type", "application/json")
        .header(
            "authorization",
            format!("Bearer {}", token_with_role(&jwt_auth, "admin")),
        )
        .body(Body::from(
            serde_json::to_string(&json!({
                "name": "Riverside Hall",
                "address": "Quay 7",
                "city": "Lisbon",
                "country": "Portugal",
                "capacity": 1200,
                "amenities": ["parking", "wifi"],
                "location": { "type": "Point", "coordinates": [-9.14, 38.72] }
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let venue: VenueResponse = json_body(response.into_body()).await;
    assert_eq!(venue.name, "Riverside Hall");
    assert_eq!(venue.capacity, Some(1200));
    assert_eq!(venue.amenities, vec!["parking", "wifi"]);
    let location = venue.location.expect("location should round-trip");
    assert_eq!(location.longitude(), -9.14);
    assert_eq!(location.latitude(), 38.72);
}

#[tokio::test]
async fn test_create_venue_requires_admin() {
    let mongo = TestMongo::new().await;
    let service = VenueService::new(MongoVenueRepository::new(mongo.database("create_gate")));
    let jwt_auth = test_jwt_auth();
    let app = test_app(service, &jwt_auth);

    let body = serde_json::to_string(&json!({
        "name": "Riverside Hall",
        "address": "Quay 7",
        "city": "Lisbon",
        "country": "Portugal"
    }))
    .unwrap();

    // No token
    let request = Request::builder()
        .method("POST")
        .uri("/venues")
        .header("content-type", "application/json")
        .body(Body::from(body.clone()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Non-admin token
    let request = Request::builder()
        .method("POST")
        .uri("/venues")
        .header("content-type", "application/json")
        .header(
            "authorization",
            format!("Bearer {}", token_with_role(&jwt_auth, "user")),
        )
        .body(Body::from(body))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_create_venue_validates_input() {
    let mongo = TestMongo::new().await;
    let service = VenueService::new(MongoVenueRepository::new(mongo.database("create_invalid")));
    let jwt_auth = test_jwt_auth();
    let app = test_app(service, &jwt_auth);

    // Country below the two-character minimum
    let request = Request::builder()
        .method("POST")
        .uri("/venues")
        .header("content-type", "application/json")
        .header(
            "authorization",
            format!("Bearer {}", token_with_role(&jwt_auth, "admin")),
        )
        .body(Body::from(
            serde_json::to_string(&json!({
                "name": "Riverside Hall",
                "address": "Quay 7",
                "city": "Lisbon",
                "country": "P"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_venues_with_filters() {
    let mongo = TestMongo::new().await;
    let service = VenueService::new(MongoVenueRepository::new(mongo.database("list_filters")));
    let jwt_auth = test_jwt_auth();

    service
        .create_venue(venue_input("Riverside Hall", "Lisbon", -9.14, 38.72))
        .await
        .unwrap();
    service
        .create_venue(venue_input("Dockside Arena", "Porto", -8.61, 41.15))
        .await
        .unwrap();

    let app = test_app(service, &jwt_auth);

    // City filter is case-insensitive and the listing is public
    let request = Request::builder()
        .method("GET")
        .uri("/venues?city=lisbon")
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let page: VenueListResponse = json_body(response.into_body()).await;
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].name, "Riverside Hall");

    // Search spans name, description, and address
    let request = Request::builder()
        .method("GET")
        .uri("/venues?search=dockside")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let page: VenueListResponse = json_body(response.into_body()).await;
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].name, "Dockside Arena");
}

#[tokio::test]
async fn test_find_nearby_orders_by_distance() {
    let mongo = TestMongo::new().await;
    let repository = MongoVenueRepository::new(mongo.database("near"));
    // $near requires the 2dsphere index
    repository.ensure_indexes().await.unwrap();
    let service = VenueService::new(repository);
    let jwt_auth = test_jwt_auth();

    // Distances from (-9.1393, 38.7223): a few hundred meters, a few km, ~30 km
    service
        .create_venue(venue_input("Close Hall", "Lisbon", -9.14, 38.72))
        .await
        .unwrap();
    service
        .create_venue(venue_input("Mid Arena", "Lisbon", -9.16, 38.74))
        .await
        .unwrap();
    service
        .create_venue(venue_input("Far Stadium", "Mafra", -9.39, 38.90))
        .await
        .unwrap();

    let app = test_app(service, &jwt_auth);

    // Default 10 km radius excludes the far venue
    let request = Request::builder()
        .method("GET")
        .uri("/venues/near?longitude=-9.1393&latitude=38.7223")
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let venues: Vec<VenueResponse> = json_body(response.into_body()).await;
    let names: Vec<_> = venues.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["Close Hall", "Mid Arena"]);

    // A wider radius includes all three, still ordered by distance
    let request = Request::builder()
        .method("GET")
        .uri("/venues/near?longitude=-9.1393&latitude=38.7223&max_distance_m=50000")
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let venues: Vec<VenueResponse> = json_body(response.into_body()).await;
    let names: Vec<_> = venues.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["Close Hall", "Mid Arena", "Far Stadium"]);

    // Missing coordinates fail query extraction
    let request = Request::builder()
        .method("GET")
        .uri("/venues/near")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_venue_handler() {
    let mongo = TestMongo::new().await;
    let service = VenueService::new(MongoVenueRepository::new(mongo.database("get_one")));
    let jwt_auth = test_jwt_auth();

    let created = service
        .create_venue(venue_input("Riverside Hall", "Lisbon", -9.14, 38.72))
        .await
        .unwrap();

    let app = test_app(service, &jwt_auth);

    let request = Request::builder()
        .method("GET")
        .uri(format!("/venues/{}", created.id))
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let venue: VenueResponse = json_body(response.into_body()).await;
    assert_eq!(venue.id, created.id);

    // Missing ID is a 404
    let request = Request::builder()
        .method("GET")
        .uri(format!("/venues/{}", Uuid::new_v4()))
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Malformed ID is a 400
    let request = Request::builder()
        .method("GET")
        .uri("/venues/not-a-uuid")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_and_delete_venue_handlers() {
    let mongo = TestMongo::new().await;
    let service = VenueService::new(MongoVenueRepository::new(mongo.database("update_delete")));
    let jwt_auth = test_jwt_auth();

    let created = service
        .create_venue(venue_input("Riverside Hall", "Lisbon", -9.14, 38.72))
        .await
        .unwrap();

    let app = test_app(service, &jwt_auth);
    let token = token_with_role(&jwt_auth, "admin");

    let request = Request::builder()
        .method("PUT")
        .uri(format!("/venues/{}", created.id))
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(
            serde_json::to_string(&json!({
                "capacity": 2500,
                "amenities": ["parking", "wifi", "bar"]
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let venue: VenueResponse = json_body(response.into_body()).await;
    assert_eq!(venue.capacity, Some(2500));
    assert_eq!(venue.amenities.len(), 3);
    // Unset fields survive the update
    assert_eq!(venue.name, "Riverside Hall");

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/venues/{}", created.id))
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let request = Request::builder()
        .method("GET")
        .uri(format!("/venues/{}", created.id))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
