pub type PromptpixResult<T> = Result<T, PromptpixError>;

#[derive(thiserror::Error, Debug)]
pub enum PromptpixError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("render failure: {0}")]
    Render(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PromptpixError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            PromptpixError::invalid_input("x")
                .to_string()
                .contains("invalid input:")
        );
        assert!(
            PromptpixError::render("x")
                .to_string()
                .contains("render failure:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = PromptpixError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
