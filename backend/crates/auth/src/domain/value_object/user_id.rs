pub use kernel::id::UserId;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_from_subject() {
        let user_id: UserId = "7".parse().unwrap();
        assert_eq!(user_id.get(), 7);
        assert_eq!(user_id.to_string(), "7");
    }

    #[test]
    fn test_user_id_rejects_non_numeric_subject() {
        assert!("admin".parse::<UserId>().is_err());
    }
}
