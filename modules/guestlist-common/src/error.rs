use thiserror::Error;

#[derive(Error, Debug)]
pub enum GuestlistError {
    #[error("Malformed submission: {0}")]
    Parse(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}
