//! Document title capture from repeated page header lines.

use crate::rules::TitleRule;

/// Returns the title carried by the last line that has one.
pub fn find_title<I, S>(rule: &TitleRule, lines: I) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .filter_map(|line| title_in_line(rule, line.as_ref()))
        .last()
}

fn title_in_line(rule: &TitleRule, line: &str) -> Option<String> {
    let start = line.find(rule.after.as_str())? + rule.after.len();
    let end = start + line[start..].find(rule.before.as_str())?;

    let title = line[start..end]
        .trim_matches(|c: char| c.is_whitespace() || c == '-' || c == '\u{2014}')
        .replace('\u{2014}', "-");

    (!title.is_empty()).then_some(title)
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;

    use super::*;

    fn rule() -> TitleRule {
        TitleRule::default()
    }

    #[gtest]
    fn captures_text_between_bounds() {
        let title = find_title(&rule(), ["Session Report  Spring Invitational  Page 1"]);
        expect_that!(title, some(eq("Spring Invitational")));
    }

    #[gtest]
    fn strips_dashes_and_normalises_em_dashes() {
        let title = find_title(
            &rule(),
            ["Session Report \u{2014} Valley Champs \u{2014} Day 2 \u{2014} Page 3"],
        );
        expect_that!(title, some(eq("Valley Champs - Day 2")));
    }

    #[gtest]
    fn last_matching_line_wins() {
        let title = find_title(
            &rule(),
            [
                "Session Report First Page 1",
                "1,100m Dash,12,2,09:00,09:05",
                "Session Report Second Page 2",
            ],
        );
        expect_that!(title, some(eq("Second")));
    }

    #[gtest]
    fn ignores_lines_with_bounds_out_of_order() {
        let title = find_title(&rule(), ["Page 1 Session Report"]);
        expect_that!(title, none());
    }

    #[gtest]
    fn ignores_empty_capture() {
        let title = find_title(&rule(), ["Session Report - Page 1", "no header here"]);
        expect_that!(title, none());
    }
}
