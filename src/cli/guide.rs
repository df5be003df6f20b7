//! `inferdoc guide`

use super::GuideSection;
use inferdoc_core::reference::{
    best_practices, diagnostic_questions, embedding_models, monitoring, performance_thresholds,
    popular_models, rate_limit_tiers, resources,
};
use std::fmt::Write;

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n{}\n{}", title, "-".repeat(title.chars().count()));
}

fn tiers(out: &mut String) {
    heading(out, "Rate-limit tiers");
    for tier in rate_limit_tiers() {
        let _ = writeln!(
            out,
            "  {:<14} {:>7} req/s  {:>10} tokens/s  {}",
            tier.name, tier.requests_per_second, tier.tokens_per_second, tier.description
        );
    }
}

fn models(out: &mut String) {
    heading(out, "Popular models");
    for model in popular_models() {
        let _ = writeln!(
            out,
            "  {} ({} {}, {} ctx, ~{}ms)\n    good for: {}",
            model.id,
            model.size,
            model.kind,
            model.context_length,
            model.typical_latency_ms,
            model.good_for.join(", ")
        );
    }
    heading(out, "Embedding models");
    for model in embedding_models() {
        let _ = writeln!(
            out,
            "  {} ({} dims, {} max input)\n    good for: {}",
            model.id,
            model.dimensions,
            model.max_input_length,
            model.good_for.join(", ")
        );
    }
}

fn thresholds(out: &mut String) {
    heading(out, "Performance thresholds");
    for t in performance_thresholds() {
        let _ = writeln!(
            out,
            "  {:<17} warn > {}ms, fail > {}ms  ({})",
            t.profile.as_str(),
            t.warning_latency_ms,
            t.max_latency_ms,
            t.description
        );
    }
}

fn monitoring_guide(out: &mut String) {
    let m = monitoring();
    heading(out, "Monitoring");
    out.push_str("  Essential metrics:\n");
    for metric in m.essential_metrics {
        let _ = writeln!(out, "    • {}", metric);
    }
    out.push_str("  Alerting:\n");
    for alert in m.alerting {
        let _ = writeln!(
            out,
            "    • {}: warning at {}{}, critical at {}{}",
            alert.metric, alert.warning, alert.unit, alert.critical, alert.unit
        );
    }
    out.push_str("  Tools:\n");
    for tool in m.recommended_tools {
        let _ = writeln!(out, "    • {}", tool);
    }
}

fn practices(out: &mut String) {
    heading(out, "Best practices");
    for group in best_practices() {
        let _ = writeln!(out, "  {}:", group.use_case.replace('_', " "));
        for practice in group.practices {
            let _ = writeln!(out, "    • {}", practice);
        }
    }
}

fn questions(out: &mut String) {
    heading(out, "Questions to ask first");
    for (i, q) in diagnostic_questions().iter().enumerate() {
        let _ = writeln!(out, "  {:>2}. {}", i + 1, q);
    }
}

fn links(out: &mut String) {
    heading(out, "Resources");
    for r in resources() {
        let _ = writeln!(out, "  {:<20} {}", r.name, r.url);
    }
}

/// Render one section, or all of them
pub fn render(section: GuideSection) -> String {
    let mut out = String::new();
    let all = section == GuideSection::All;
    if all || section == GuideSection::Tiers {
        tiers(&mut out);
    }
    if all || section == GuideSection::Models {
        models(&mut out);
    }
    if all || section == GuideSection::Thresholds {
        thresholds(&mut out);
    }
    if all || section == GuideSection::Monitoring {
        monitoring_guide(&mut out);
    }
    if all || section == GuideSection::Practices {
        practices(&mut out);
    }
    if all || section == GuideSection::Questions {
        questions(&mut out);
    }
    if all || section == GuideSection::Resources {
        links(&mut out);
    }
    out
}

pub fn run(section: GuideSection) {
    print!("{}", render(section));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_section() {
        let text = render(GuideSection::Resources);
        assert!(text.contains("https://status.together.ai/"));
        assert!(!text.contains("Popular models"));
    }

    #[test]
    fn test_all_sections() {
        let text = render(GuideSection::All);
        for title in ["Rate-limit tiers", "Popular models", "Performance thresholds", "Monitoring", "Best practices", "Questions to ask first", "Resources"] {
            assert!(text.contains(title), "missing {title}");
        }
        assert!(text.contains("rate_limit_usage: warning at 80%, critical at 95%"));
    }
}
