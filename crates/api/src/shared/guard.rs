use crate::error::InviteEngineError;
use invite_engine_domain::ID;

pub struct Guard {}

impl Guard {
    pub fn against_malformed_id(val: &str) -> Result<ID, InviteEngineError> {
        val.parse()
            .map_err(|e| InviteEngineError::BadClientData(format!("{}", e)))
    }
}
