use super::types::*;

/// The six user-editable fields of the form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    ClientId,
    SecretKey,
    RedirectUri,
    AccountId,
    Pin,
    TotpKey,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::ClientId,
        Field::SecretKey,
        Field::RedirectUri,
        Field::AccountId,
        Field::Pin,
        Field::TotpKey,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::ClientId => "Client ID",
            Self::SecretKey => "Secret Key",
            Self::RedirectUri => "Redirect URI",
            Self::AccountId => "Fyers ID",
            Self::Pin => "PIN",
            Self::TotpKey => "TOTP Key",
        }
    }

    pub fn is_masked(&self) -> bool {
        matches!(self, Self::Pin)
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A single authorization request as captured by the form.
///
/// The fixed constants are always the defaults; nothing in the form can
/// change them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthRequest {
    pub client_id: ClientId,
    pub secret_key: SecretKey,
    pub redirect_uri: RedirectUri,
    pub account_id: AccountId,
    pub pin: Pin,
    pub totp_key: TotpKey,
    pub response_type: ResponseType,
    pub grant_type: GrantType,
    pub state: State,
}

impl AuthRequest {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::ClientId => &self.client_id.0,
            Field::SecretKey => &self.secret_key.0,
            Field::RedirectUri => &self.redirect_uri.0,
            Field::AccountId => &self.account_id.0,
            Field::Pin => &self.pin.0,
            Field::TotpKey => &self.totp_key.0,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::ClientId => self.client_id = ClientId(value),
            Field::SecretKey => self.secret_key = SecretKey(value),
            Field::RedirectUri => self.redirect_uri = RedirectUri(value),
            Field::AccountId => self.account_id = AccountId(value),
            Field::Pin => self.pin = Pin(value),
            Field::TotpKey => self.totp_key = TotpKey(value),
        }
    }

    /// Empties every user field, leaving the fixed constants in place.
    pub fn clear_fields(&mut self) {
        for field in Field::ALL {
            self.set(field, String::new());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn clear_keeps_constants() {
        let mut req = AuthRequest::default();
        for field in Field::ALL {
            req.set(field, format!("{}-value", field.label()));
        }
        req.clear_fields();

        for field in Field::ALL {
            assert_eq!(req.get(field), "");
        }
        assert_eq!(req.response_type, ResponseType::Code);
        assert_eq!(req.grant_type, GrantType::AuthorizationCode);
        assert_eq!(req.state, State::default());
    }

    #[test]
    fn only_pin_is_masked() {
        let masked: Vec<Field> = Field::ALL.iter().copied().filter(Field::is_masked).collect();
        assert_eq!(masked, vec![Field::Pin]);
    }
}
