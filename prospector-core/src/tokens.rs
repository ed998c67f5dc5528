//! Placeholder token resolution using Handlebars

use handlebars::Handlebars;
use prospector_config::{SiteConfig, UserConfig};
use prospector_interfaces::{Submission, TokenResolver};
use serde_json::{json, Value as JsonValue};
use tracing::debug;

/// Default [`TokenResolver`] rendering `{{...}}` markers.
///
/// Markers are resolved against this context:
///
/// - `submission.sid`, `submission.uuid`, `submission.webform_id`
/// - `data.<element id>`: element data
/// - `metadata.<key>`: submission metadata
/// - `site.name`, `site.url`, `site.mail`: configured site values
/// - `user.name`, `user.mail`: the account the relay acts for
///
/// Unknown variables render as an empty string. A template Handlebars cannot
/// parse is returned as literal text. Values are never HTML-escaped.
#[derive(Debug, Clone)]
pub struct TemplateTokenResolver {
    handlebars: Handlebars<'static>,
    site: SiteConfig,
    user: UserConfig,
}

impl TemplateTokenResolver {
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(false);
        handlebars.register_escape_fn(handlebars::no_escape);

        Self {
            handlebars,
            site: SiteConfig::default(),
            user: UserConfig::default(),
        }
    }

    /// Expose site values under `site.*`
    pub fn with_site(mut self, site: SiteConfig) -> Self {
        self.site = site;
        self
    }

    /// Expose acting user values under `user.*`
    pub fn with_user(mut self, user: UserConfig) -> Self {
        self.user = user;
        self
    }

    /// Check if a string contains any markers
    pub fn has_tokens(&self, value: &str) -> bool {
        value.contains("{{") && value.contains("}}")
    }

    fn context(&self, submission: &Submission) -> JsonValue {
        json!({
            "submission": {
                "sid": submission.id,
                "uuid": submission.uuid,
                "webform_id": submission.webform_id(),
            },
            "data": submission.data,
            "metadata": submission.metadata,
            "site": self.site,
            "user": self.user,
        })
    }
}

impl Default for TemplateTokenResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenResolver for TemplateTokenResolver {
    fn resolve(&self, value: &str, submission: &Submission) -> String {
        if !self.has_tokens(value) {
            return value.to_string();
        }

        match self.handlebars.render_template(value, &self.context(submission)) {
            Ok(rendered) => rendered,
            Err(e) => {
                debug!(
                    submission_id = submission.id,
                    "Leaving unparseable token text as-is: {}", e
                );
                value.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission() -> Submission {
        Submission::new(42)
            .with_data("name", "Jo")
            .with_data("question", "Tuition & fees?")
            .with_metadata("webform_id", "rfi")
            .with_metadata("remote_addr", "1.2.3.4")
    }

    #[test]
    fn test_plain_strings_are_unchanged() {
        let resolver = TemplateTokenResolver::new();
        let plain = [
            "",
            "a@b.com",
            "C:\\path\\file",
            "{single}",
            "[webform_submission:sid]",
            "}} {{",
        ];
        for value in plain {
            assert_eq!(resolver.resolve(value, &submission()), value);
        }
    }

    #[test]
    fn test_resolves_submission_context() {
        let resolver = TemplateTokenResolver::new();
        let template = "{{data.name}} submitted #{{submission.sid}} on {{submission.webform_id}} \
                        from {{metadata.remote_addr}}";
        let rendered = resolver.resolve(template, &submission());
        assert_eq!(rendered, "Jo submitted #42 on rfi from 1.2.3.4");
    }

    #[test]
    fn test_resolves_site_context() {
        let resolver = TemplateTokenResolver::new().with_site(SiteConfig {
            name: Some("Admissions".to_string()),
            url: Some("https://admissions.example.edu".to_string()),
            mail: None,
        });
        assert_eq!(
            resolver.resolve("{{site.name}} <{{site.url}}>", &submission()),
            "Admissions <https://admissions.example.edu>"
        );
    }

    #[test]
    fn test_resolves_user_context() {
        let resolver = TemplateTokenResolver::new().with_user(UserConfig {
            name: Some("rfi-relay".to_string()),
            mail: Some("relay@example.edu".to_string()),
        });
        assert_eq!(
            resolver.resolve("{{user.name}} <{{user.mail}}>", &submission()),
            "rfi-relay <relay@example.edu>"
        );
        assert_eq!(TemplateTokenResolver::new().resolve("{{user.name}}", &submission()), "");
    }

    #[test]
    fn test_values_are_not_html_escaped() {
        let resolver = TemplateTokenResolver::new();
        assert_eq!(resolver.resolve("{{data.question}}", &submission()), "Tuition & fees?");
    }

    #[test]
    fn test_missing_token_resolves_to_empty() {
        let resolver = TemplateTokenResolver::new();
        assert_eq!(resolver.resolve("[{{data.missing}}]", &submission()), "[]");
        assert_eq!(resolver.resolve("{{site.mail}}", &submission()), "");
    }

    #[test]
    fn test_malformed_template_is_left_literal() {
        let resolver = TemplateTokenResolver::new();
        assert_eq!(resolver.resolve("{{}}", &submission()), "{{}}");
        let unclosed = "{{#if data.name}}open";
        assert_eq!(resolver.resolve(unclosed, &submission()), unclosed);
    }

    #[test]
    fn test_has_tokens() {
        let resolver = TemplateTokenResolver::new();
        assert!(resolver.has_tokens("{{data.name}}"));
        assert!(resolver.has_tokens("prefix/{{var}}/suffix"));
        assert!(!resolver.has_tokens("no tokens here"));
        assert!(!resolver.has_tokens("{{unclosed"));
    }
}
