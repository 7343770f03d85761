use actix_web::http::header::HeaderValue;

use super::error::AuthError;

/// Pull the token out of an `Authorization: Bearer <token>` header value.
///
/// An absent header is `MissingToken`; anything present but not of the form
/// `Bearer <token>` (scheme matched case-insensitively) is `MalformedToken`.
pub fn extract_bearer(header: Option<&HeaderValue>) -> Result<String, AuthError> {
    let header = header.ok_or(AuthError::MissingToken)?;
    let value = header.to_str().map_err(|_| AuthError::MalformedToken)?;

    let mut parts = value.split_whitespace();
    let scheme = parts.next().ok_or(AuthError::MalformedToken)?;
    let token = parts.next().ok_or(AuthError::MalformedToken)?;

    if !scheme.eq_ignore_ascii_case("bearer") || parts.next().is_some() {
        return Err(AuthError::MalformedToken);
    }

    Ok(token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(v: &str) -> HeaderValue {
        HeaderValue::from_str(v).unwrap()
    }

    #[test]
    fn absent_header_is_missing_token() {
        assert_eq!(extract_bearer(None), Err(AuthError::MissingToken));
    }

    #[test]
    fn extracts_token() {
        assert_eq!(extract_bearer(Some(&header("Bearer abc.def.ghi"))).unwrap(), "abc.def.ghi");
        assert_eq!(extract_bearer(Some(&header("bearer abc"))).unwrap(), "abc");
    }

    #[test]
    fn rejects_other_shapes() {
        for raw in ["", "Bearer", "Basic abc", "Bearer a b", "Token abc"] {
            assert_eq!(
                extract_bearer(Some(&header(raw))),
                Err(AuthError::MalformedToken),
                "header {raw:?}"
            );
        }
    }
}
