use std::fmt::Display;

/// Report a failure together with its context tags (`roundAddress`,
/// `projectID`, ...). Everything goes through the `log` facade, which the
/// browser build routes to the console.
pub fn report_error(message: &str, error: &dyn Display, tags: &[(&str, &str)]) {
    log::error!("{}", format_report(message, error, tags));
}

fn format_report(message: &str, error: &dyn Display, tags: &[(&str, &str)]) -> String {
    let mut line = format!("{}: {}", message, error);
    if !tags.is_empty() {
        let context: Vec<String> = tags.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        line.push_str(&format!(" [{}]", context.join(", ")));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_report_with_tags() {
        let line = format_report(
            "Failed to check application status",
            &"execution reverted",
            &[("roundAddress", "0xabc")],
        );
        assert_eq!(line, "Failed to check application status: execution reverted [roundAddress=0xabc]");
    }

    #[test]
    fn test_format_report_without_tags() {
        assert_eq!(format_report("Failed to load projects", &"boom", &[]), "Failed to load projects: boom");
    }
}
