pub fn run() -> anyhow::Result<()> {
    println!("chatstat {}", env!("CARGO_PKG_VERSION"));
    println!("Conversation analytics over anonymized chat exports");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_output() {
        let result = run();
        assert!(result.is_ok());
    }
}
