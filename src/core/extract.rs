//! 请求体提取器

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, StatusCode},
    Form, Json,
};
use serde::de::DeserializeOwned;

use super::error::CoreError;

/// 同时接受 JSON 和表单编码的请求体
///
/// - `application/json`（含 `+json` 后缀）按 JSON 解析，语法错误返回 400
/// - `application/x-www-form-urlencoded` 按表单解析
/// - 缺少或其他 `Content-Type` 时忽略请求体，按空对象 `{}` 解析
#[derive(Debug)]
pub struct JsonOrForm<T>(pub T);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyKind {
    Json,
    Form,
    Ignored,
}

#[async_trait]
impl<T, S> FromRequest<S> for JsonOrForm<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = CoreError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match body_kind(&req) {
            BodyKind::Json => {
                let Json(value) = Json::<T>::from_request(req, state).await?;
                Ok(Self(value))
            }
            BodyKind::Form => {
                let Form(value) = Form::<T>::from_request(req, state).await?;
                Ok(Self(value))
            }
            BodyKind::Ignored => {
                let empty = serde_json::Value::Object(Default::default());
                serde_json::from_value(empty)
                    .map(Self)
                    .map_err(|e| CoreError::Rejected {
                        status: StatusCode::UNPROCESSABLE_ENTITY,
                        message: e.to_string(),
                    })
            }
        }
    }
}

fn body_kind(req: &Request) -> BodyKind {
    let Some(content_type) = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return BodyKind::Ignored;
    };

    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    let is_json = essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"));

    if is_json {
        BodyKind::Json
    } else if essence == "application/x-www-form-urlencoded" {
        BodyKind::Form
    } else {
        BodyKind::Ignored
    }
}
