use inferdoc_core::reference::{all_error_codes, lookup_error_code, ErrorCodeEntry};

/// Text block for one status code
pub fn describe(entry: &ErrorCodeEntry) -> String {
    let mut out = format!("HTTP {} {}\n\nCommon causes:\n", entry.code, entry.name);
    for cause in entry.causes {
        out.push_str(&format!("  • {}\n", cause));
    }
    out.push_str("\nSolutions:\n");
    for (i, solution) in entry.solutions.iter().enumerate() {
        out.push_str(&format!("  {}. {}\n", i + 1, solution));
    }
    out
}

pub fn run(code: u16) {
    match lookup_error_code(code) {
        Some(entry) => print!("{}", describe(entry)),
        None => {
            let known: Vec<String> = all_error_codes().iter().map(|e| e.code.to_string()).collect();
            println!(
                "⚠️  No reference entry for HTTP {}. Known codes: {}",
                code,
                known.join(", ")
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_numbers_solutions() {
        let text = describe(lookup_error_code(401).unwrap());
        assert!(text.starts_with("HTTP 401 Unauthorized"));
        assert!(text.contains("  • Invalid API key"));
        assert!(text.contains("  1. Verify API key at api.together.ai"));
    }
}
