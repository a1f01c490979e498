use subtle::ConstantTimeEq;
use tracing::warn;

/// Constant-time string comparison to prevent timing attacks
/// Use this for comparing admin tokens and other sensitive values
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Checks the shared token on mutating host events.
///
/// Configured with no token, the guard lets everything through; hosts that
/// authenticate callers themselves run in that mode.
#[derive(Debug, Clone)]
pub struct EventGuard {
    token: Option<String>,
}

impl EventGuard {
    pub fn new(token: impl Into<String>) -> Self {
        EventGuard {
            token: Some(token.into()),
        }
    }

    /// A guard that accepts every credential, including none.
    pub fn disabled() -> Self {
        EventGuard { token: None }
    }

    pub fn verify(&self, supplied: Option<&str>) -> bool {
        let Some(expected) = &self.token else {
            return true;
        };
        match supplied {
            Some(value) => constant_time_compare(expected, value),
            None => {
                warn!("Event credential missing while a token is configured");
                false
            }
        }
    }
}
