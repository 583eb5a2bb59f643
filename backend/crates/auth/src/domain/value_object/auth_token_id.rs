use kernel::id::Id;

pub struct AuthTokenMarker;
pub type AuthTokenId = Id<AuthTokenMarker>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_token_id_new() {
        let token_id = AuthTokenId::new();
        assert_eq!(token_id.as_uuid().get_version_num(), 4); // UUIDv4
    }

    #[test]
    fn test_parse_roundtrip() {
        let token_id = AuthTokenId::new();
        let parsed = AuthTokenId::parse_str(&token_id.to_string()).unwrap();
        assert_eq!(parsed, token_id);
    }
}
