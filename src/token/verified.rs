use crate::claims::Claims;

/// A token whose signature and claims passed every configured check
#[derive(Debug, Clone, PartialEq)]
pub struct VerifiedToken {
    header: Claims,
    payload: Claims,
}

impl VerifiedToken {
    pub(crate) fn new(header: Claims, payload: Claims) -> Self {
        Self { header, payload }
    }

    /// Get the token header
    pub fn header(&self) -> &Claims {
        &self.header
    }

    /// Get the token payload
    pub fn payload(&self) -> &Claims {
        &self.payload
    }

    /// Consume the token, returning `(header, payload)`
    pub fn into_parts(self) -> (Claims, Claims) {
        (self.header, self.payload)
    }
}
