/// Input rejected before it reaches storage.
///
/// The `Display` text is shown to clients verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },
    #[error("Rating must be between 1 and 5")]
    RatingOutOfRange,
    #[error("Invalid price tier")]
    InvalidPriceTier,
    #[error("Invalid coordinates")]
    InvalidCoordinates,
    #[error("{field} is required")]
    Required { field: &'static str },
    #[error("Unknown companion")]
    UnknownCompanion,
}
