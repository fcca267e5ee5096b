use chatstat_queries::QueryRegistry;

fn render(registry: &QueryRegistry) -> String {
    registry
        .iter()
        .enumerate()
        .map(|(index, query)| {
            let note = if query.requires_root_user() {
                "  (needs --user-id)"
            } else {
                ""
            };
            format!("  {}  {}{}{}", index, query.id(), query.extension(), note)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn run() -> anyhow::Result<()> {
    let registry = QueryRegistry::default();
    println!("Registered queries\n==================");
    println!("{}", render(&registry));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_lists_indices() {
        let listing = render(&QueryRegistry::default());
        assert!(listing.contains("0  count_messages.csv"));
        assert!(listing.contains("5  top_senders.json"));
        assert!(listing.contains("2  time_to_respond.csv  (needs --user-id)"));
        assert!(!listing.contains("count_messages.csv  (needs"));
    }
}
