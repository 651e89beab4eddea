const SHORT_ID_LEN: usize = 10;
const SHORT_CODE_LEN: usize = 6;

/// Random 10-character lowercase hex identifier, assigned to a user once
/// at first persist.
pub fn short_id() -> String {
    hex_code(SHORT_ID_LEN)
}

/// Random 6-character code for entities that carry a human-quotable
/// reference (fixtures, scoreboard games).
pub fn short_code() -> String {
    hex_code(SHORT_CODE_LEN).to_uppercase()
}

fn hex_code(len: usize) -> String {
    let value = rand::random::<u128>();
    let hex = format!("{:032x}", value);
    hex[..len].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_id_shape() {
        let id = short_id();
        assert_eq!(id.len(), 10);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_short_code_shape() {
        let code = short_code();
        assert_eq!(code.len(), 6);
        assert!(code.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_codes_vary() {
        // 128 random bits behind each call, collisions here would mean a broken generator
        let a = short_id();
        let b = short_id();
        assert_ne!(a, b);
    }
}
