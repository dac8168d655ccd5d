use crate::core::models::{AuthRequest, Field};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("The following fields cannot be empty: {}", join_labels(.0))]
    EmptyFields(Vec<Field>),
    #[error("TOTP Key should only contain alphanumeric characters")]
    TotpNotAlphanumeric,
}

fn join_labels(fields: &[Field]) -> String {
    fields
        .iter()
        .map(Field::label)
        .collect::<Vec<&str>>()
        .join(", ")
}

/// Whitespace-only input counts as empty.
pub fn empty_fields(req: &AuthRequest) -> Vec<Field> {
    Field::ALL
        .iter()
        .copied()
        .filter(|f| req.get(*f).trim().is_empty())
        .collect()
}

pub fn is_alphanumeric(s: &str) -> bool {
    !s.is_empty() && s.chars().all(char::is_alphanumeric)
}

pub fn validate(req: &AuthRequest) -> Result<(), ValidationError> {
    let empty = empty_fields(req);
    if !empty.is_empty() {
        return Err(ValidationError::EmptyFields(empty));
    }

    // Checked untrimmed, so padding around the seed is rejected too.
    if !is_alphanumeric(&req.totp_key.0) {
        return Err(ValidationError::TotpNotAlphanumeric);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn filled() -> AuthRequest {
        let mut req = AuthRequest::default();
        req.set(Field::ClientId, "XA1234-100".to_string());
        req.set(Field::SecretKey, "S3CR3T".to_string());
        req.set(Field::RedirectUri, "https://127.0.0.1/cb".to_string());
        req.set(Field::AccountId, "XY01234".to_string());
        req.set(Field::Pin, "1234".to_string());
        req.set(Field::TotpKey, "JBSWY3DPEHPK3PXP".to_string());
        req
    }

    #[test]
    fn accepts_complete_request() {
        assert_eq!(validate(&filled()), Ok(()));
    }

    #[test]
    fn reports_every_empty_field_in_form_order() {
        let mut req = filled();
        req.set(Field::Pin, String::new());
        req.set(Field::ClientId, "   ".to_string());

        let err = validate(&req).unwrap_err();
        assert_eq!(err, ValidationError::EmptyFields(vec![Field::ClientId, Field::Pin]));
        assert_eq!(
            err.to_string(),
            "The following fields cannot be empty: Client ID, PIN"
        );
    }

    #[test]
    fn each_blank_field_is_rejected() {
        for field in Field::ALL {
            let mut req = filled();
            req.set(field, String::new());
            assert_eq!(
                validate(&req),
                Err(ValidationError::EmptyFields(vec![field]))
            );
        }
    }

    #[test]
    fn totp_seed_must_be_alphanumeric() {
        for seed in ["JBSW-Y3DP", "JBSW Y3DP", " JBSWY3DP", "abc=", "ab_c"] {
            let mut req = filled();
            req.set(Field::TotpKey, seed.to_string());
            assert_eq!(validate(&req), Err(ValidationError::TotpNotAlphanumeric), "{}", seed);
        }
    }

    #[test]
    fn unicode_letters_and_digits_are_accepted() {
        for seed in ["ÄBC123", "ＡＢ１２", "jbswy3dp"] {
            let mut req = filled();
            req.set(Field::TotpKey, seed.to_string());
            assert_eq!(validate(&req), Ok(()), "{}", seed);
        }
    }

    #[test]
    fn empty_check_wins_over_format_check() {
        let mut req = filled();
        req.set(Field::TotpKey, " ".to_string());
        assert_eq!(
            validate(&req),
            Err(ValidationError::EmptyFields(vec![Field::TotpKey]))
        );
    }
}
