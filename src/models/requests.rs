use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSessionRequest {
    pub user_id: String,
    #[schema(example = 720)]
    pub expires_in_hours: Option<i64>,
}
