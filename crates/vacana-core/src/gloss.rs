use std::fmt::Write as _;

use crate::dictionary::DictEntry;
use crate::language::Token;

/// Which source in the lookup chain resolved a token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Primary,
    Fallback,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Primary => "primary",
            SourceKind::Fallback => "fallback",
        }
    }
}

/// Per-token lookup outcome. Lives only long enough to render a report.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub token: Token,
    pub entry: Option<DictEntry>,
    pub source: Option<SourceKind>,
}

impl Analysis {
    pub fn resolved(token: Token, entry: DictEntry, source: SourceKind) -> Self {
        Self {
            token,
            entry: Some(entry),
            source: Some(source),
        }
    }

    pub fn missing(token: Token) -> Self {
        Self {
            token,
            entry: None,
            source: None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.entry.is_some()
    }
}

/// Ordered per-token analyses for one block of input text
#[derive(Debug, Clone, Default)]
pub struct Report {
    pub analyses: Vec<Analysis>,
}

impl Report {
    pub fn new(analyses: Vec<Analysis>) -> Self {
        Self { analyses }
    }

    pub fn total(&self) -> usize {
        self.analyses.len()
    }

    pub fn resolved(&self) -> usize {
        self.analyses.iter().filter(|a| a.is_resolved()).count()
    }

    /// Fraction of tokens resolved, in [0, 1]. 0 for an empty report.
    pub fn coverage(&self) -> f64 {
        if self.analyses.is_empty() {
            0.0
        } else {
            self.resolved() as f64 / self.total() as f64
        }
    }

    /// Surface forms that no source resolved, in input order
    pub fn missing(&self) -> Vec<&str> {
        self.analyses
            .iter()
            .filter(|a| !a.is_resolved())
            .map(|a| a.token.surface.as_str())
            .collect()
    }

    pub fn render(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Compact => render_compact(self),
            OutputFormat::Rich => render_rich(self),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Compact,
    Rich,
}

/// One line per token: `token (pos) (morphology): meaning`.
/// Unresolved tokens are flagged, never dropped, so the line count always
/// equals the token count.
pub fn render_compact(report: &Report) -> String {
    let mut lines = Vec::with_capacity(report.total());

    for analysis in &report.analyses {
        match &analysis.entry {
            Some(entry) => lines.push(format!(
                "{} ({}) ({}): {}",
                analysis.token.surface,
                entry.part_of_speech.as_str(),
                entry.morphology,
                entry.meaning,
            )),
            None => lines.push(format!("{} [not found]", analysis.token.surface)),
        }
    }

    lines.join("\n")
}

/// Token plus every present field on its own labelled line
pub fn render_rich(report: &Report) -> String {
    let mut blocks = Vec::with_capacity(report.total());

    for analysis in &report.analyses {
        let mut block = String::new();
        let _ = writeln!(block, "{}", analysis.token.surface);

        match &analysis.entry {
            Some(entry) => {
                let _ = writeln!(block, "  part of speech: {}", entry.part_of_speech.as_str());
                let _ = writeln!(block, "  morphology: {}", entry.morphology);
                let _ = writeln!(block, "  meaning: {}", entry.meaning);
                if let Some(translation) = &entry.translation {
                    let _ = writeln!(block, "  translation: {translation}");
                }
                if let Some(root) = &entry.root {
                    let _ = writeln!(block, "  root: {root}");
                }
                if let Some(sanskrit) = &entry.sanskrit {
                    let _ = writeln!(block, "  sanskrit: {sanskrit}");
                }
            }
            None => {
                let _ = writeln!(block, "  not found in dictionary");
            }
        }

        blocks.push(block);
    }

    blocks.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::PartOfSpeech;

    fn token(surface: &str) -> Token {
        Token {
            surface: surface.to_string(),
            normalized: surface.to_lowercase(),
            position: 0,
        }
    }

    fn entry(headword: &str, meaning: &str) -> DictEntry {
        DictEntry {
            headword: headword.to_string(),
            part_of_speech: PartOfSpeech::Noun,
            morphology: "masc. nom. sg.".to_string(),
            meaning: meaning.to_string(),
            translation: None,
            root: None,
            sanskrit: None,
        }
    }

    fn sample_report() -> Report {
        Report::new(vec![
            Analysis::resolved(
                token("dhammo"),
                entry("dhamma", "nature; teaching"),
                SourceKind::Primary,
            ),
            Analysis::missing(token("xyzzy")),
        ])
    }

    #[test]
    fn compact_line_count_equals_token_count() {
        let report = sample_report();
        let output = render_compact(&report);
        assert_eq!(output.lines().count(), report.total());
    }

    #[test]
    fn compact_shape_and_not_found_flag() {
        let output = sample_report().render(OutputFormat::Compact);
        let mut lines = output.lines();
        assert_eq!(
            lines.next(),
            Some("dhammo (noun) (masc. nom. sg.): nature; teaching")
        );
        assert_eq!(lines.next(), Some("xyzzy [not found]"));
    }

    #[test]
    fn rich_lists_present_fields_only() {
        let mut resolved = entry("mettā", "loving-kindness");
        resolved.translation = Some("benevolencia".to_string());
        let report = Report::new(vec![Analysis::resolved(
            token("mettā"),
            resolved,
            SourceKind::Fallback,
        )]);

        let output = report.render(OutputFormat::Rich);
        assert!(output.contains("  meaning: loving-kindness"));
        assert!(output.contains("  translation: benevolencia"));
        assert!(!output.contains("  root:"));
    }

    #[test]
    fn coverage_stays_in_unit_interval() {
        let report = sample_report();
        assert!(report.coverage() > 0.0 && report.coverage() < 1.0);
        assert_eq!(Report::default().coverage(), 0.0);

        let full = Report::new(vec![Analysis::resolved(
            token("buddho"),
            entry("buddha", "awakened one"),
            SourceKind::Primary,
        )]);
        assert_eq!(full.coverage(), 1.0);
    }

    #[test]
    fn missing_preserves_input_order() {
        let report = Report::new(vec![
            Analysis::missing(token("qqq")),
            Analysis::resolved(
                token("buddho"),
                entry("buddha", "awakened one"),
                SourceKind::Primary,
            ),
            Analysis::missing(token("zzz")),
        ]);
        assert_eq!(report.missing(), vec!["qqq", "zzz"]);
    }
}
