use crate::model::StrategyReport;

const MAX_ERROR_CHARS: usize = 120;

pub fn print_summary(reports: &[StrategyReport]) {
    eprintln!("\nStrategy summary:");
    for r in reports {
        let total = r.question_results.len();
        let errors = r.error_count();
        let icon = if errors == 0 { "✅" } else { "⚠️ " };
        eprintln!(
            "{} {:<28} {:>2}/{:<2} ok  {} errors",
            icon,
            r.strategy,
            total - errors,
            total,
            errors
        );
        for q in r.question_results.iter().filter(|q| !q.is_ok()) {
            eprintln!("    ✗ {}", q.question);
            eprintln!("      {}", truncate(&q.error, MAX_ERROR_CHARS));
        }
    }
}

fn truncate(s: &str, max: usize) -> String {
    let first_line = s.lines().next().unwrap_or("");
    if first_line.chars().count() > max {
        let cut: String = first_line.chars().take(max).collect();
        format!("{}...", cut)
    } else {
        first_line.to_string()
    }
}
