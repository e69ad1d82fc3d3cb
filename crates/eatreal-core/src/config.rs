/// Loads a service configuration struct from environment variables.
///
/// Field `database_url` reads `DATABASE_URL`, and so on. Fields with
/// `#[serde(default = ...)]` fall back when the variable is unset.
pub trait Config: Sized + serde::de::DeserializeOwned {
    fn try_from_env() -> Result<Self, envy::Error> {
        envy::from_env()
    }

    /// # Panics
    ///
    /// Panics if a required variable is missing or cannot be deserialized.
    fn from_env() -> Self {
        Self::try_from_env().expect("failed to load config from environment")
    }
}
