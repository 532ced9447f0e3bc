//! Line filtering of `llvm-cov report` output and slicing of `llvm-cov show`.

use tracing::warn;

use crate::cli::Invocation;

/// Table border rows in `llvm-cov report`.
pub const SEPARATOR: &str = "------";
/// Header row label.
pub const HEADER_LABEL: &str = "Filename";
/// Totals row label.
pub const TOTALS_LABEL: &str = "TOTAL";

/// Blank lines inserted between the filtered report and the show extract.
pub const SHOW_SEPARATOR: &str = "\n\n\n";

/// Keep the report rows relevant to `header` (e.g. `Deque/deque.h`).
///
/// Each line goes through two independent checks: border-or-header-file,
/// then header-label-or-totals. A line passing both is emitted twice.
pub fn filter_report(report: &str, header: &str) -> String {
    let mut result = String::new();
    for line in report.split('\n') {
        if line.contains(SEPARATOR) || line.contains(header) {
            result.push_str(line);
            result.push('\n');
        }
        if line.contains(HEADER_LABEL) || line.contains(TOTALS_LABEL) {
            result.push_str(line);
            result.push('\n');
        }
    }
    result
}

/// Slice of `show` starting at the first `/<name>/<name-lowercased>.h`.
///
/// Returns an empty slice when the header never appears.
pub fn extract_show<'a>(show: &'a str, invocation: &Invocation) -> &'a str {
    let needle = format!("/{}", invocation.header_path());
    match show.find(&needle) {
        Some(start) => &show[start..],
        None => {
            warn!(header = %needle, "header not found in llvm-cov show output");
            ""
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    const REPORT: &str = "\
Filename                      Regions    Missed Regions     Cover
-----------------------------------------------------------------
/src/Deque/deque.h                 42                 2    95.24%
/src/Deque/main.cpp                10                 0   100.00%
/src/common/util.h                  8                 8     0.00%
-----------------------------------------------------------------
TOTAL                              60                10    83.33%
";

    #[test]
    fn filter_report__typical_report__then_keeps_rows_in_order() {
        let filtered = filter_report(REPORT, "Deque/deque.h");

        let lines: Vec<&str> = filtered.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("Filename"));
        assert!(lines[1].starts_with("------"));
        assert!(lines[2].contains("Deque/deque.h"));
        assert!(lines[3].starts_with("------"));
        assert!(lines[4].starts_with("TOTAL"));
        assert!(!filtered.contains("main.cpp"));
        assert!(!filtered.contains("util.h"));
    }

    #[test]
    fn filter_report__every_kept_line__then_newline_terminated() {
        let filtered = filter_report("TOTAL 1\nnoise\n", "X/x.h");
        assert_eq!(filtered, "TOTAL 1\n");
    }

    #[test]
    fn filter_report__separator_and_totals_on_one_line__then_emitted_twice() {
        let filtered = filter_report("------ TOTAL ------\n", "Deque/deque.h");
        assert_eq!(filtered, "------ TOTAL ------\n------ TOTAL ------\n");
    }

    #[test]
    fn filter_report__header_file_named_total__then_emitted_twice() {
        let filtered = filter_report("/src/TOTAL/total.h  1  0  100%", "TOTAL/total.h");
        assert_eq!(filtered.lines().count(), 2);
    }

    #[test]
    fn filter_report__separator_and_header_file__then_emitted_once() {
        let filtered = filter_report("------ Deque/deque.h", "Deque/deque.h");
        assert_eq!(filtered, "------ Deque/deque.h\n");
    }

    #[test]
    fn filter_report__case_sensitive_labels__then_lowercase_ignored() {
        assert_eq!(filter_report("filename total\n", "Deque/deque.h"), "");
    }

    #[test]
    fn filter_report__empty_report__then_empty() {
        assert_eq!(filter_report("", "Deque/deque.h"), "");
    }

    #[test]
    fn filter_report__crlf_lines__then_carriage_return_kept() {
        let filtered = filter_report("TOTAL 3\r\n", "Deque/deque.h");
        assert_eq!(filtered, "TOTAL 3\r\n");
    }

    #[test]
    fn extract_show__header_present__then_slices_from_first_match() {
        let invocation = Invocation::new("build/Deque", true);
        let show = "/src/Deque/main.cpp:\n 1| int main\n/src/Deque/deque.h:\n 1| template\n";

        let extract = extract_show(show, &invocation);

        assert_eq!(extract, "/Deque/deque.h:\n 1| template\n");
    }

    #[test]
    fn extract_show__header_repeated__then_uses_first_occurrence() {
        let invocation = Invocation::new("Deque", true);
        let show = "a/Deque/deque.h one\nb/Deque/deque.h two\n";

        assert_eq!(
            extract_show(show, &invocation),
            "/Deque/deque.h one\nb/Deque/deque.h two\n"
        );
    }

    #[test]
    fn extract_show__header_absent__then_empty() {
        let invocation = Invocation::new("build/Deque", true);
        assert_eq!(extract_show("/src/Other/other.h:\n", &invocation), "");
    }

    #[test]
    fn extract_show__unprefixed_header__then_not_matched() {
        let invocation = Invocation::new("Deque", true);
        assert_eq!(extract_show("Deque/deque.h at start", &invocation), "");
    }
}
