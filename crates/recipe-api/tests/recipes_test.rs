mod common;

use axum::http::StatusCode;
use common::*;
use serde_json::json;

fn pasta(is_public: bool) -> serde_json::Value {
    json!({
        "title": "Cacio e Pepe",
        "description": "Roman classic",
        "ingredients": [
            { "name": "Spaghetti", "quantity": 200, "unit": "g" },
            { "name": "Pecorino", "quantity": 60, "unit": "g" }
        ],
        "steps": ["Boil pasta", "Emulsify cheese"],
        "category": "Pasta",
        "tags": ["Italian", "quick"],
        "servings": 2,
        "is_public": is_public
    })
}

#[tokio::test]
async fn recipe_crud_under_both_mounts() {
    let app = app();
    let (token, user_id) = register(&app, "Cook", "cook@example.com").await;

    let created = post(&app, "/resource", Some(&token), pasta(false)).await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.data()["owner_id"], user_id.as_str());
    assert_eq!(created.data()["tags"], json!(["italian", "quick"]));
    assert_eq!(created.data()["is_public"], false);
    let id = created.data()["id"].as_str().unwrap().to_string();

    let fetched = get(&app, &format!("/api/recipes/{id}"), Some(&token)).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.data()["title"], "Cacio e Pepe");

    let updated = put(&app, &format!("/resource/{id}"), Some(&token), json!({ "title": "Cacio e Pepe (v2)", "description": "" })).await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.data()["title"], "Cacio e Pepe (v2)");
    assert!(updated.data()["description"].is_null());
    assert_eq!(updated.data()["ingredients"].as_array().unwrap().len(), 2);

    let list = get(&app, "/api/recipes?q=v2", Some(&token)).await;
    assert_eq!(list.data()["total"], 1);
    assert_eq!(list.data()["page"], 1);
    assert_eq!(list.data()["limit"], 20);

    let removed = delete(&app, &format!("/api/recipes/{id}"), Some(&token)).await;
    assert_eq!(removed.status, StatusCode::OK);
    assert!(removed.data().is_null());

    let gone = get(&app, &format!("/api/recipes/{id}"), Some(&token)).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_recipe_is_rejected() {
    let app = app();
    let (token, _) = register(&app, "Cook", "cook@example.com").await;

    let no_title = post(&app, "/api/recipes", Some(&token), json!({ "title": "" })).await;
    assert_eq!(no_title.status, StatusCode::BAD_REQUEST);

    let zero_servings = post(&app, "/api/recipes", Some(&token), json!({ "title": "Soup", "servings": 0 })).await;
    assert_eq!(zero_servings.status, StatusCode::BAD_REQUEST);

    let bad_id = get(&app, "/api/recipes/not-a-uuid", Some(&token)).await;
    assert_eq!(bad_id.status, StatusCode::BAD_REQUEST);
    assert_eq!(bad_id.error_code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn visibility_and_ownership_rules() {
    let app = app();
    let (owner, _) = register(&app, "Owner", "owner@example.com").await;
    let (stranger, _) = register(&app, "Stranger", "stranger@example.com").await;
    let (admin, _) = register(&app, "Admin", ADMIN_EMAIL).await;

    let private = create_recipe(&app, &owner, pasta(false)).await;
    let shared = create_recipe(&app, &owner, pasta(true)).await;

    assert_eq!(get(&app, &format!("/api/recipes/{private}"), Some(&stranger)).await.status, StatusCode::NOT_FOUND);
    assert_eq!(get(&app, &format!("/api/recipes/{private}"), Some(&admin)).await.status, StatusCode::OK);
    assert_eq!(get(&app, &format!("/api/recipes/{shared}"), Some(&stranger)).await.status, StatusCode::OK);

    let edit = put(&app, &format!("/api/recipes/{shared}"), Some(&stranger), json!({ "title": "Mine" })).await;
    assert_eq!(edit.status, StatusCode::FORBIDDEN);
    let delete_other = delete(&app, &format!("/api/recipes/{shared}"), Some(&stranger)).await;
    assert_eq!(delete_other.status, StatusCode::FORBIDDEN);

    let admin_edit = put(&app, &format!("/api/recipes/{shared}"), Some(&admin), json!({ "is_public": false })).await;
    assert_eq!(admin_edit.status, StatusCode::OK);

    // Own list never includes other users' recipes
    let strangers_list = get(&app, "/api/recipes", Some(&stranger)).await;
    assert_eq!(strangers_list.data()["total"], 0);
}

#[tokio::test]
async fn public_feed_shows_only_public_recipes_with_author() {
    let app = app();
    let (token, user_id) = register(&app, "Marcella Hazan", "marcella@example.com").await;
    let shared = create_recipe(&app, &token, pasta(true)).await;
    let private = create_recipe(&app, &token, pasta(false)).await;

    let feed = get(&app, "/public/recipes?tag=italian", None).await;
    assert_eq!(feed.status, StatusCode::OK);
    assert_eq!(feed.data()["total"], 1);
    let item = &feed.data()["items"][0];
    assert_eq!(item["id"], shared.as_str());
    assert_eq!(item["author"]["id"], user_id.as_str());
    assert_eq!(item["author"]["name"], "Marcella Hazan");

    let one = get(&app, &format!("/api/public/recipes/{shared}"), None).await;
    assert_eq!(one.status, StatusCode::OK);
    assert_eq!(one.data()["author"]["name"], "Marcella Hazan");

    let hidden = get(&app, &format!("/api/public/recipes/{private}"), None).await;
    assert_eq!(hidden.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn pagination_is_clamped() {
    let app = app();
    let (token, _) = register(&app, "Cook", "cook@example.com").await;
    for _ in 0..3 {
        create_recipe(&app, &token, pasta(true)).await;
    }

    let page = get(&app, "/api/public/recipes?page=2&limit=2", None).await;
    assert_eq!(page.data()["items"].as_array().unwrap().len(), 1);
    assert_eq!(page.data()["total"], 3);

    let clamped = get(&app, "/api/public/recipes?limit=1000&page=0", None).await;
    assert_eq!(clamped.data()["limit"], 100);
    assert_eq!(clamped.data()["page"], 1);

    let malformed = get(&app, "/api/public/recipes?page=abc", None).await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn deleting_a_recipe_cascades_to_references() {
    let app = app();
    let (owner, _) = register(&app, "Owner", "owner@example.com").await;
    let (fan, _) = register(&app, "Fan", "fan@example.com").await;
    let shared = create_recipe(&app, &owner, pasta(true)).await;

    assert_eq!(post(&app, &format!("/api/favorites/{shared}"), Some(&fan), json!({})).await.status, StatusCode::CREATED);
    let collection = post(&app, "/api/collections", Some(&fan), json!({ "name": "Borrowed" })).await;
    let collection_id = collection.data()["id"].as_str().unwrap().to_string();
    post(&app, &format!("/api/collections/{collection_id}/recipes/{shared}"), Some(&fan), json!({})).await;
    let planned = post(
        &app,
        "/api/meal-plan",
        Some(&fan),
        json!({ "date": "2026-10-14", "meal_type": "dinner", "recipe_id": shared }),
    )
    .await;
    assert_eq!(planned.status, StatusCode::CREATED);

    assert_eq!(delete(&app, &format!("/api/recipes/{shared}"), Some(&owner)).await.status, StatusCode::OK);

    let favorites = get(&app, "/api/favorites", Some(&fan)).await;
    assert_eq!(favorites.data(), &json!([]));
    let detail = get(&app, &format!("/api/collections/{collection_id}"), Some(&fan)).await;
    assert_eq!(detail.data()["recipe_ids"], json!([]));
    let plan = get(&app, "/api/meal-plan?from=2026-10-12&to=2026-10-18", Some(&fan)).await;
    assert_eq!(plan.data(), &json!([]));
}
