use serde::Deserialize;

use crate::server::response::ApiError;
use crate::server::validation::RequiredFields;
use crate::sync::ProgressUpdate;

#[derive(Debug, Default, Deserialize)]
pub struct CreateUserRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl CreateUserRequest {
    /// Returns `(username, password)` once both are present and non-empty.
    pub fn into_parts(self) -> Result<(String, String), ApiError> {
        let mut fields = RequiredFields::new();
        let username = fields.text("username", self.username);
        let password = fields.text("password", self.password);
        fields.finish()?;
        Ok((username, password))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateProgressRequest {
    pub document: Option<String>,
    pub progress: Option<String>,
    pub percentage: Option<f64>,
    pub device: Option<String>,
    pub device_id: Option<String>,
}

impl UpdateProgressRequest {
    pub fn into_update(self) -> Result<ProgressUpdate, ApiError> {
        let mut fields = RequiredFields::new();
        let update = ProgressUpdate {
            document: fields.text("document", self.document),
            progress: fields.text("progress", self.progress),
            percentage: fields.number("percentage", self.percentage),
            device: fields.text("device", self.device),
            device_id: fields.text("device_id", self.device_id),
        };
        fields.finish()?;
        Ok(update)
    }
}
