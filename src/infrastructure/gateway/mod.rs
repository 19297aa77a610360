pub mod http;

use std::sync::Arc;

use anyhow::Result;

use crate::domain::models::GatewayBox;

pub struct GatewayManager {}

impl GatewayManager {
    pub fn get() -> Result<GatewayBox> {
        return Ok(Arc::new(http::XceedHttp::from_config()?));
    }
}
