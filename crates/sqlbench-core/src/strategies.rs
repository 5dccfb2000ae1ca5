//! Fixed prompt strategies and the question set they are scored against.

use crate::model::Strategy;

pub const ZERO_SHOT: &str = "zero_shot";
pub const SINGLE_DOMAIN_DOUBLE_SHOT: &str = "single_domain_double_shot";

const SQL_ONLY_REQUEST: &str = " Give me a sqlite select statement that answers the question. Only respond with sqlite syntax. If there is an error do not expalin it!";

const WORKED_EXAMPLE_QUESTION: &str = " Which users are in more than one group? ";
const WORKED_EXAMPLE_SQL: &str =
    "\nSELECT user_id FROM user_groups GROUP BY user_id HAVING COUNT(DISTINCT group_id) > 1;\n";

pub const QUESTIONS: [&str; 10] = [
    "Which users are in more than one group?",
    "Which groups have both members and admins?",
    "Are there any users who are not in any group?",
    "Which users own more than one goal?",
    "Which goals have daily reporting intervals?",
    "Which users have logged progress for goals they do not own?",
    "Which user has the highest streak length overall?",
    "Which goals currently have streaks shorter than 5 days?",
    "Which groups have a rule that allows zero missed reports?",
    "List all groups with 'custom' rules and their allowed misses.",
];

/// Builds the strategy table, in run order, around the schema script text.
pub fn default_strategies(schema_sql: &str) -> Vec<Strategy> {
    vec![
        Strategy::new(ZERO_SHOT, format!("{schema_sql}{SQL_ONLY_REQUEST}")),
        Strategy::new(
            SINGLE_DOMAIN_DOUBLE_SHOT,
            format!("{schema_sql}{WORKED_EXAMPLE_QUESTION}{WORKED_EXAMPLE_SQL}{SQL_ONLY_REQUEST}"),
        ),
    ]
}

/// Second-stage prompt asking the model to restate raw rows for a human.
pub fn friendly_prompt(question: &str, raw_rows: &str) -> String {
    format!(
        "I asked a question \"{question}\" and the response was \"{raw_rows}\" Please, just give a concise response in a more friendly way? Please do not give any other suggests or chatter."
    )
}
