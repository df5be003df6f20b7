use inferdoc_core::diagnose_issue;
use tracing::debug;

pub fn run(text: &str) {
    let found = diagnose_issue(text);
    debug!(pattern = found.pattern.id, keyword = ?found.matched_keyword, "issue matched");
    println!("{}", found.render());
}
