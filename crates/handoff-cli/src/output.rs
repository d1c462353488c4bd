use serde::Serialize;

pub const RULE_WIDTH: usize = 60;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Print a `=` rule the width of a report.
pub fn print_rule() {
    println!("{}", "=".repeat(RULE_WIDTH));
}

/// Blank line, rule, title, rule: the header every report opens with.
pub fn print_report_header(title: &str) {
    println!();
    print_rule();
    println!("{title}");
    print_rule();
}
