pub mod types;
pub mod utils;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health::healthy();
        assert_eq!(h.status, "Healthy");
        assert!(h.checks.is_empty());
    }
}
