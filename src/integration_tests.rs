// ABOUTME: Integration tests for the HTTP API
// ABOUTME: Exercises user creation and validation, profile reads and uploads, links and cascades end to end

#[cfg(test)]
mod tests {
    use super::super::*;
    use axum::http::StatusCode;
    use axum_test::multipart::{MultipartForm, Part};
    use axum_test::TestServer;
    use serde_json::{json, Value};
    use tempfile::TempDir;

    async fn create_test_app() -> (TestServer, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_url = format!("sqlite:{}?mode=rwc", temp_dir.path().join("api.db").display());

        let storage = Arc::new(Storage::new(&db_url).await.unwrap());
        let media = MediaStore::new(temp_dir.path().join("media"));

        let server = TestServer::new(app(AppState { storage, media })).unwrap();
        (server, temp_dir)
    }

    async fn create_user(server: &TestServer, body: Value) -> Value {
        let response = server.post("/api/users").json(&body).await;
        response.assert_status(StatusCode::CREATED);
        response.json()
    }

    #[tokio::test]
    async fn test_create_host_returns_representation_and_profile() {
        let (server, _temp_dir) = create_test_app().await;

        let user = create_user(
            &server,
            json!({"email": "a@b.com", "first_name": "A", "last_name": "B", "role": "host"}),
        )
        .await;

        assert_eq!(user["role"], "host");
        assert_eq!(user["email"], "a@b.com");
        assert_eq!(user["username"], "a@b.com");
        assert_eq!(user["user_profile_links"], Value::Null);

        let id = user["id"].as_str().unwrap();
        let profile = server.get(&format!("/api/users/{}/host-profile", id)).await;
        profile.assert_status_ok();
        let profile: Value = profile.json();
        assert_eq!(profile["user"]["id"], user["id"]);
        assert_eq!(profile["company_name"], "");
        assert_eq!(profile["company_logo"], Value::Null);

        server
            .get(&format!("/api/users/{}/customer-profile", id))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_missing_email_is_reported_by_field() {
        let (server, _temp_dir) = create_test_app().await;

        let response = server
            .post("/api/users")
            .json(&json!({"first_name": "A", "last_name": "B", "role": "host"}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({"email": "Email is required"}));

        let users: Value = server.get("/api/users").await.json();
        assert_eq!(users, json!([]));
    }

    #[tokio::test]
    async fn test_all_missing_fields_reported_together() {
        let (server, _temp_dir) = create_test_app().await;

        let response = server
            .post("/api/users")
            .json(&json!({"username": "nobody", "first_name": ""}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({
            "email": "Email is required",
            "first_name": "First Name is required",
            "last_name": "Last Name is required",
            "role": "Role is required"
        }));
    }

    #[tokio::test]
    async fn test_unknown_role_is_rejected() {
        let (server, _temp_dir) = create_test_app().await;

        let response = server
            .post("/api/users")
            .json(&json!({"email": "x@y.com", "first_name": "X", "last_name": "Y", "role": "owner"}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({"role": "\"owner\" is not a valid choice."}));
    }

    #[tokio::test]
    async fn test_duplicate_username_conflicts() {
        let (server, _temp_dir) = create_test_app().await;
        let body = json!({
            "username": "same",
            "email": "one@example.com",
            "first_name": "One",
            "last_name": "User",
            "role": "customer"
        });

        create_user(&server, body.clone()).await;
        let response = server.post("/api/users").json(&body).await;
        response.assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_links_in_create_body_are_ignored() {
        let (server, _temp_dir) = create_test_app().await;

        let user = create_user(
            &server,
            json!({
                "email": "g@example.com",
                "first_name": "G",
                "last_name": "H",
                "role": "guest",
                "user_profile_links": {"facebook": "sneaky"}
            }),
        )
        .await;
        assert_eq!(user["user_profile_links"], Value::Null);

        let id = user["id"].as_str().unwrap();
        let fetched: Value = server.get(&format!("/api/users/{}", id)).await.json();
        assert_eq!(fetched["user_profile_links"], Value::Null);
        assert_eq!(fetched, user);

        let updated = server
            .put(&format!("/api/users/{}/links", id))
            .json(&json!({"facebook": "g.h", "instagram": "@gh"}))
            .await;
        updated.assert_status_ok();
        let updated: Value = updated.json();
        assert_eq!(
            updated["user_profile_links"],
            json!({"facebook": "g.h", "twitter": null, "instagram": "@gh"})
        );
    }

    #[tokio::test]
    async fn test_password_is_not_echoed_in_plaintext() {
        let (server, _temp_dir) = create_test_app().await;

        let user = create_user(
            &server,
            json!({
                "email": "p@example.com",
                "first_name": "P",
                "last_name": "Q",
                "password": "plain-secret",
                "role": "admin"
            }),
        )
        .await;

        let stored = user["password"].as_str().unwrap();
        assert!(stored.starts_with("$argon2"));
        assert!(!stored.contains("plain-secret"));
    }

    #[tokio::test]
    async fn test_customer_profile_upload() {
        let (server, temp_dir) = create_test_app().await;

        let user = create_user(
            &server,
            json!({"email": "c@example.com", "first_name": "C", "last_name": "D", "role": "customer"}),
        )
        .await;
        let id = user["id"].as_str().unwrap();

        let form = MultipartForm::new()
            .add_text("date_of_birth", "1990-04-01")
            .add_text("phone_number", "555-0101")
            .add_part(
                "avatar",
                Part::bytes(b"fake image".to_vec())
                    .file_name("me.jpg")
                    .mime_type("image/jpeg"),
            );

        let response = server
            .patch(&format!("/api/users/{}/customer-profile", id))
            .multipart(form)
            .await;
        response.assert_status_ok();

        let profile: Value = response.json();
        assert_eq!(profile["date_of_birth"], "1990-04-01");
        assert_eq!(profile["phone_number"], "555-0101");
        assert_eq!(profile["user"]["email"], "c@example.com");

        let avatar = profile["avatar"].as_str().unwrap();
        assert!(avatar.starts_with("/media/users_avatar/"));
        assert!(avatar.ends_with(".jpg"));

        let on_disk = temp_dir
            .path()
            .join("media")
            .join(avatar.trim_start_matches("/media/"));
        assert_eq!(std::fs::read(on_disk).unwrap(), b"fake image");

        let served = server.get(avatar).await;
        served.assert_status_ok();
        assert_eq!(served.as_bytes().as_ref(), b"fake image");
    }

    #[tokio::test]
    async fn test_profile_update_reports_field_errors() {
        let (server, _temp_dir) = create_test_app().await;

        let user = create_user(
            &server,
            json!({"email": "e@example.com", "first_name": "E", "last_name": "F", "role": "customer"}),
        )
        .await;
        let id = user["id"].as_str().unwrap();

        let form = MultipartForm::new()
            .add_text("date_of_birth", "01/04/1990")
            .add_text("phone_number", "1234567890123456");

        let response = server
            .patch(&format!("/api/users/{}/customer-profile", id))
            .multipart(form)
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({
            "date_of_birth": "Date has wrong format. Use one of these formats instead: YYYY-MM-DD.",
            "phone_number": "Ensure this field has no more than 15 characters."
        }));

        let profile: Value = server
            .get(&format!("/api/users/{}/customer-profile", id))
            .await
            .json();
        assert_eq!(profile["phone_number"], "");
    }

    #[tokio::test]
    async fn test_host_profile_logo_upload() {
        let (server, _temp_dir) = create_test_app().await;

        let user = create_user(
            &server,
            json!({"email": "h@example.com", "first_name": "H", "last_name": "I", "role": "host"}),
        )
        .await;
        let id = user["id"].as_str().unwrap();

        let form = MultipartForm::new()
            .add_text("company_name", "Harbour Homes")
            .add_part(
                "company_logo",
                Part::bytes(b"logo".to_vec())
                    .file_name("logo.png")
                    .mime_type("image/png"),
            );

        let response = server
            .patch(&format!("/api/users/{}/host-profile", id))
            .multipart(form)
            .await;
        response.assert_status_ok();

        let profile: Value = response.json();
        assert_eq!(profile["company_name"], "Harbour Homes");
        assert!(profile["company_logo"]
            .as_str()
            .unwrap()
            .starts_with("/media/company_logo/"));
    }

    #[tokio::test]
    async fn test_delete_host_cascades_to_packages() {
        let (server, _temp_dir) = create_test_app().await;

        let host = create_user(
            &server,
            json!({"email": "l@example.com", "first_name": "L", "last_name": "M", "role": "host"}),
        )
        .await;
        let id = host["id"].as_str().unwrap();

        let package = server
            .post("/api/packages")
            .json(&json!({"name": "Treehouse", "address": "Forest", "description": "Up high", "host_id": id}))
            .await;
        package.assert_status(StatusCode::CREATED);
        let package: Value = package.json();
        assert_eq!(package["host"], host["id"]);

        let listed: Value = server.get(&format!("/api/users/{}/packages", id)).await.json();
        assert_eq!(listed.as_array().unwrap().len(), 1);

        server
            .delete(&format!("/api/users/{}", id))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        server
            .get(&format!("/api/users/{}", id))
            .await
            .assert_status(StatusCode::NOT_FOUND);
        server
            .get(&format!("/api/users/{}/host-profile", id))
            .await
            .assert_status(StatusCode::NOT_FOUND);
        server
            .get(&format!("/api/users/{}/packages", id))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_package_requires_name_and_existing_host() {
        let (server, _temp_dir) = create_test_app().await;

        let response = server.post("/api/packages").json(&json!({})).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({"name": "Name is required"}));

        let response = server
            .post("/api/packages")
            .json(&json!({"name": "Ghost", "host_id": uuid::Uuid::new_v4()}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_user_is_not_found() {
        let (server, _temp_dir) = create_test_app().await;
        let id = uuid::Uuid::new_v4();

        server
            .get(&format!("/api/users/{}", id))
            .await
            .assert_status(StatusCode::NOT_FOUND);
        server
            .delete(&format!("/api/users/{}", id))
            .await
            .assert_status(StatusCode::NOT_FOUND);
        server
            .get("/api/users/not-a-uuid")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    fn files_under(dir: std::path::PathBuf) -> usize {
        std::fs::read_dir(dir).map(|entries| entries.count()).unwrap_or(0)
    }

    #[tokio::test]
    async fn test_rejected_profile_update_stores_no_image() {
        let (server, temp_dir) = create_test_app().await;

        let user = create_user(
            &server,
            json!({"email": "r@example.com", "first_name": "R", "last_name": "S", "role": "customer"}),
        )
        .await;
        let id = user["id"].as_str().unwrap();

        let form = MultipartForm::new()
            .add_part(
                "avatar",
                Part::bytes(b"fake image".to_vec())
                    .file_name("me.jpg")
                    .mime_type("image/jpeg"),
            )
            .add_text("date_of_birth", "bad");

        let response = server
            .patch(&format!("/api/users/{}/customer-profile", id))
            .multipart(form)
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        assert_eq!(files_under(temp_dir.path().join("media").join("users_avatar")), 0);
        let profile: Value = server
            .get(&format!("/api/users/{}/customer-profile", id))
            .await
            .json();
        assert_eq!(profile["avatar"], Value::Null);
    }

    #[tokio::test]
    async fn test_rejected_host_update_stores_no_logo() {
        let (server, temp_dir) = create_test_app().await;

        let user = create_user(
            &server,
            json!({"email": "t@example.com", "first_name": "T", "last_name": "U", "role": "host"}),
        )
        .await;
        let id = user["id"].as_str().unwrap();

        let form = MultipartForm::new()
            .add_part(
                "company_logo",
                Part::bytes(b"logo".to_vec())
                    .file_name("logo.png")
                    .mime_type("image/png"),
            )
            .add_text("company_name", "x".repeat(256));

        let response = server
            .patch(&format!("/api/users/{}/host-profile", id))
            .multipart(form)
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({
            "company_name": "Ensure this field has no more than 255 characters."
        }));

        assert_eq!(files_under(temp_dir.path().join("media").join("company_logo")), 0);
    }

    #[tokio::test]
    async fn test_wrongly_typed_field_is_reported_by_field() {
        let (server, _temp_dir) = create_test_app().await;

        let response = server
            .post("/api/users")
            .json(&json!({"email": 5, "first_name": "A", "last_name": "B", "role": "host"}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({"email": "Not a valid string."}));
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let (server, _temp_dir) = create_test_app().await;

        let response = server
            .post("/api/users")
            .content_type("application/json")
            .bytes("{\"email\":".into())
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let response = server
            .post("/api/packages")
            .json(&json!({"name": "Cabin", "host_id": "not-a-uuid"}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }
}
