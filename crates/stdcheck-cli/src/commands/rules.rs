use stdcheck_enforce::types::RulesResult;
use stdcheck_output::OutputFormatter;

/// Run `stdcheck rules` -- print the rule catalogue.
pub fn run(formatter: &dyn OutputFormatter) -> i32 {
    let out = formatter.format_rules(&RulesResult::catalogue());
    println!("{}", out.trim_end());
    0
}
