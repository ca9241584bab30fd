use std::sync::RwLock;

/// Source of the bearer token attached to backend requests
pub trait TokenProvider: Send + Sync {
    /// Current ID token, or `None` when signed out
    fn bearer_token(&self) -> Option<String>;

    /// Forget the token on sign-out
    fn sign_out(&self);
}

/// Token supplied up front through configuration
#[derive(Debug, Default)]
pub struct StaticTokenProvider {
    token: RwLock<Option<String>>,
}

impl StaticTokenProvider {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: RwLock::new(token),
        }
    }

    /// Replace the token, e.g. after the user pastes a fresh one
    pub fn sign_in(&self, token: String) {
        if let Ok(mut current) = self.token.write() {
            *current = Some(token);
        }
    }
}

impl TokenProvider for StaticTokenProvider {
    fn bearer_token(&self) -> Option<String> {
        self.token.read().ok().and_then(|token| token.clone())
    }

    fn sign_out(&self) {
        if let Ok(mut token) = self.token.write() {
            *token = None;
        }
    }
}
