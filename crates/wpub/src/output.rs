//! Styled stderr reporting for publish runs.

use console::{Style, Term};
use wpub_wordpress::{PublishOutcome, PublishReport};

const RULE_WIDTH: usize = 40;

/// Publish run reporter.
pub(crate) struct Output {
    term: Term,
    ok: Style,
    warn: Style,
    fail: Style,
    link: Style,
}

impl Output {
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            ok: Style::new().green(),
            warn: Style::new().yellow(),
            fail: Style::new().red(),
            link: Style::new().cyan().bold(),
        }
    }

    fn line(&self, msg: &str) {
        let _ = self.term.write_line(msg);
    }

    fn styled(&self, style: &Style, msg: &str) {
        self.line(&style.apply_to(msg).to_string());
    }

    fn rule(&self) {
        self.line(&"=".repeat(RULE_WIDTH));
    }

    /// Opening banner of a run.
    pub(crate) fn start(&self) {
        self.rule();
        self.line("Uploading image to WordPress process started...");
    }

    /// Plain progress note.
    pub(crate) fn note(&self, msg: &str) {
        self.line(msg);
    }

    /// Fatal error raised before or outside the publish pipeline (red).
    pub(crate) fn error(&self, msg: &str) {
        self.styled(&self.fail, msg);
    }

    /// Print the result of a publish run and close the banner.
    pub(crate) fn outcome(&self, outcome: &PublishOutcome) {
        match outcome {
            PublishOutcome::Published(report) => self.report(report),
            PublishOutcome::Failed(err) => {
                self.styled(&self.fail, "Error publishing post!");
                self.line(&err.to_string());
            }
        }
        self.rule();
    }

    fn report(&self, report: &PublishReport) {
        self.styled(&self.ok, "Post published to WordPress.");
        self.line(&format!(
            "Media: {} (id={})",
            report.media.url, report.media.id
        ));
        if let Some(id) = report.post_id {
            self.line(&format!("Post ID: {id}"));
        }
        if let Some(link) = &report.link {
            self.styled(&self.link, link);
        }
        if !report.tag_ids.is_empty() {
            self.line(&format!("Tags: {:?}", report.tag_ids));
        }
        if !report.category_ids.is_empty() {
            self.line(&format!("Categories: {:?}", report.category_ids));
        }

        if !report.skipped_terms.is_empty() {
            self.styled(
                &self.warn,
                &format!(
                    "{} term(s) could not be attached:",
                    report.skipped_terms.len()
                ),
            );
            for err in &report.skipped_terms {
                self.line(&format!("  - {err}"));
            }
        }
    }
}
