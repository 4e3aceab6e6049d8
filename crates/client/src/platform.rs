/// Name of the platform the client was built for.
pub fn platform_name() -> &'static str {
    std::env::consts::OS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_name_is_stable() {
        assert!(!platform_name().is_empty());
        assert_eq!(platform_name(), platform_name());
    }
}
