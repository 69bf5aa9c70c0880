use serde::{Deserialize, Serialize};

/// Events not tied to a check run or an import
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GeneralEvent {
    /// Something the user should know about; never fatal
    Warning {
        message: String,
        context: Option<String>,
    },

    /// The overwrite prompt is about to be shown
    UserConfirmationRequired { prompt: String },

    /// Answer to the overwrite prompt; `false` also covers "could not ask"
    UserConfirmationReceived { response: bool },
}

impl GeneralEvent {
    pub fn warning_with_context(message: impl Into<String>, context: impl Into<String>) -> Self {
        Self::Warning {
            message: message.into(),
            context: Some(context.into()),
        }
    }
}
