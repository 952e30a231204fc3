use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ShareReceiptDto {
    pub sent: bool,
    pub to: String,
    pub subject: String,
}
