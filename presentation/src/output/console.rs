//! Console output formatter

use colored::Colorize;
use lyricsmith_application::SessionSnapshot;
use lyricsmith_domain::{ConfigIssue, HistoryEntry, Severity, StyleAnalysis, StyleDescriptor, truncate};

/// Formats session output for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the current song with its derived style, if any
    pub fn format_song(snapshot: &SessionSnapshot) -> String {
        let mut output = String::new();

        let title = if snapshot.topic.is_empty() {
            snapshot.artist.clone()
        } else {
            format!("{} - {}", snapshot.artist, snapshot.topic)
        };
        output.push_str(&Self::header(&title));
        output.push_str("\n\n");
        output.push_str(snapshot.lyrics.trim_end());
        output.push('\n');

        if let Some(style) = &snapshot.style {
            output.push_str(&Self::format_style(style));
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format a derived style prompt
    pub fn format_style(style: &StyleDescriptor) -> String {
        format!("{}{}\n", Self::section_header("Style Prompt"), style)
    }

    /// Format a style analysis, one field per line plus the combined prompt
    pub fn format_analysis(subject: &str, analysis: &StyleAnalysis) -> String {
        let mut output = String::new();

        output.push_str(&Self::section_header(&format!("Sound of {}", subject)));
        for (label, value) in analysis.entries() {
            output.push_str(&format!("{} {}\n", format!("{}:", label).bold(), value));
        }

        output.push_str(&format!(
            "\n{}\n{}\n",
            "Combined:".green().bold(),
            Self::indent(&analysis.combined(), "  ")
        ));

        output
    }

    /// Format the session history, most recent first
    pub fn format_history(entries: &[HistoryEntry]) -> String {
        if entries.is_empty() {
            return format!("{}\n", "No history yet.".dimmed());
        }

        let mut output = Self::section_header("History");
        for entry in entries {
            let first_line = entry.lyrics.lines().find(|l| !l.trim().is_empty());
            output.push_str(&format!(
                "  {} {} {}\n",
                entry.id.to_string().cyan(),
                entry.label.bold(),
                format!("({})", entry.topic).dimmed()
            ));
            if let Some(line) = first_line {
                output.push_str(&format!("      {}\n", truncate(line.trim(), 60).dimmed()));
            }
        }
        output
    }

    pub fn format_error(message: &str) -> String {
        format!("{} {}", "Error:".red().bold(), message)
    }

    pub fn format_config_issue(issue: &ConfigIssue) -> String {
        match issue.severity {
            Severity::Error => format!("{} {}", "config error:".red().bold(), issue.message),
            Severity::Warning => format!("{} {}", "config warning:".yellow().bold(), issue.message),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
