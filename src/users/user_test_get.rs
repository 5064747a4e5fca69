#[cfg(all(test, feature = "mockdata"))]
mod tests {
    use actix_web::{
        body, dev,
        http::header::{HeaderValue, CONTENT_TYPE},
        http::StatusCode,
        test, App,
    };
    use serde_json::{self, json, Value};

    use crate::{
        error_kinds::{ErrorBody, MSG_RESOURCE_NOT_FOUND},
        users::{
            user_controller::get_user_by_id,
            user_models::UserDto,
            user_orm::tests::{UserOrmApp, UserOrmTest, USER1, USER2, USER2_ID, USER3_ID},
        },
    };

    const MSG_FAILED_DESER: &str = "Failed to deserialize response from JSON.";

    // ** get_user_by_id **

    #[actix_web::test]
    async fn test_get_user_by_id_invalid_id() {
        let user_orm_app = UserOrmApp::create(&UserOrmTest::users(&[USER1]));
        #[rustfmt::skip]
        let app = test::init_service(
            App::new().service(get_user_by_id).configure(UserOrmTest::cfg_user_orm(user_orm_app))
        ).await;
        let req = test::TestRequest::get().uri("/api/users/1100a").to_request();
        let resp: dev::ServiceResponse = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND); // 404

        #[rustfmt::skip]
        assert_eq!(resp.headers().get(CONTENT_TYPE).unwrap(), HeaderValue::from_static("application/json"));
        let body = body::to_bytes(resp.into_body()).await.unwrap();
        let error_body: ErrorBody = serde_json::from_slice(&body).expect(MSG_FAILED_DESER);
        assert_eq!(error_body, ErrorBody::new(MSG_RESOURCE_NOT_FOUND));
    }
    #[actix_web::test]
    async fn test_get_user_by_id_non_existent_id() {
        let user_orm_app = UserOrmApp::create(&UserOrmTest::users(&[USER1, USER2]));
        #[rustfmt::skip]
        let app = test::init_service(
            App::new().service(get_user_by_id).configure(UserOrmTest::cfg_user_orm(user_orm_app))
        ).await;
        let req = test::TestRequest::get().uri(&format!("/api/users/{}", USER3_ID)).to_request();
        let resp: dev::ServiceResponse = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND); // 404

        let body = body::to_bytes(resp.into_body()).await.unwrap();
        let value: Value = serde_json::from_slice(&body).expect(MSG_FAILED_DESER);
        assert_eq!(value, json!({ "error": { "message": "Resource not found." } }));
    }
    #[actix_web::test]
    async fn test_get_user_by_id_valid_id() {
        let users = UserOrmTest::users(&[USER1, USER2]);
        let user2_dto = UserDto::from(users.get(1).unwrap().clone());
        let user_orm_app = UserOrmApp::create(&users);
        #[rustfmt::skip]
        let app = test::init_service(
            App::new().service(get_user_by_id).configure(UserOrmTest::cfg_user_orm(user_orm_app))
        ).await;
        let req = test::TestRequest::get().uri(&format!("/api/users/{}", USER2_ID)).to_request();
        let resp: dev::ServiceResponse = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK); // 200

        #[rustfmt::skip]
        assert_eq!(resp.headers().get(CONTENT_TYPE).unwrap(), HeaderValue::from_static("application/json"));
        let body = body::to_bytes(resp.into_body()).await.unwrap();
        let value: Value = serde_json::from_slice(&body).expect(MSG_FAILED_DESER);
        assert!(value.get("password").is_none());
        let user_dto_res: UserDto = serde_json::from_value(value).expect(MSG_FAILED_DESER);
        assert_eq!(user_dto_res, user2_dto);
    }
}
