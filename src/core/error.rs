use thiserror::Error;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Roster is full ({0} members max)")]
    RosterFull(usize),

    #[error("Ability not found: {0}")]
    AbilityNotFound(String),

    #[error("Duplicate ability id: {0}")]
    DuplicateAbility(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Incident script error in '{incident}': {message}")]
    Script { incident: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

impl RosterError {
    pub fn script(incident: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Script {
            incident: incident.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RosterError>;
