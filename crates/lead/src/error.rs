#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Validate(#[from] validator::ValidationErrors),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Names of the fields that failed validation, sorted.
    pub fn fields(&self) -> Vec<String> {
        match self {
            Error::Validate(errors) => {
                let mut fields = errors
                    .field_errors()
                    .keys()
                    .map(|k| k.to_string())
                    .collect::<Vec<_>>();
                fields.sort();
                fields
            }
        }
    }
}
