//! User-facing result messages carried from the service layer to the views.
//!
//! Success messages travel across the POST-redirect-GET boundary as a flash
//! payload; error messages are rendered on the page directly.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultMessageType {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultMessage {
    pub text: String,
}

impl ResultMessage {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultMessages {
    pub message_type: ResultMessageType,
    pub list: Vec<ResultMessage>,
}

impl ResultMessages {
    pub fn success() -> Self {
        Self { message_type: ResultMessageType::Success, list: Vec::new() }
    }

    pub fn error() -> Self {
        Self { message_type: ResultMessageType::Error, list: Vec::new() }
    }

    pub fn add(mut self, text: impl Into<String>) -> Self {
        self.list.push(ResultMessage::from_text(text));
        self
    }
}

impl std::fmt::Display for ResultMessages {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, m) in self.list.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            f.write_str(&m.text)?;
        }
        Ok(())
    }
}
