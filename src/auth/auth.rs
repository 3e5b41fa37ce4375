use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload, web::Data};
use futures::future::{Ready, ready};

use crate::auth::jwt::verify_token;
use crate::config::Config;
use crate::error::AppError;

/// Identity of the authenticated HR user, extracted from the bearer token.
#[derive(Clone)]
pub struct AuthUser {
    pub user_id: u64,
    pub email: String,
}

impl FromRequest for AuthUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        // the route guard already verified the token and stored the
        // identity; only verify here when no guard ran
        if let Some(user) = req.extensions().get::<AuthUser>() {
            return ready(Ok(user.clone()));
        }

        let token = match req
            .headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
        {
            Some(t) => t,
            None => {
                return ready(Err(
                    AppError::unauthorized("Missing or invalid Authorization header").into(),
                ));
            }
        };

        let config = match req.app_data::<Data<Config>>() {
            Some(c) => c,
            None => return ready(Err(AppError::internal().into())),
        };

        match verify_token(token, &config.jwt_secret) {
            Ok(claims) => ready(Ok(AuthUser {
                user_id: claims.sub,
                email: claims.email,
            })),
            Err(_) => ready(Err(
                AppError::unauthorized("Invalid or expired token").into()
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn extractor_reuses_identity_left_by_the_guard() {
        let req = TestRequest::default().to_http_request();
        req.extensions_mut().insert(AuthUser {
            user_id: 7,
            email: "hr@example.com".to_string(),
        });

        // no Authorization header, so a second verification would fail
        let user = AuthUser::from_request(&req, &mut Payload::None)
            .await
            .unwrap();
        assert_eq!(user.user_id, 7);
        assert_eq!(user.email, "hr@example.com");
    }

    #[actix_web::test]
    async fn bare_request_without_token_is_rejected() {
        let req = TestRequest::default().to_http_request();
        assert!(AuthUser::from_request(&req, &mut Payload::None).await.is_err());
    }
}
