//! Section theming: header texts, warning banner, CSS color variables and
//! the footer contact block.

use catalog_core::catalog_api::{ContactDetails, section_config};
use catalog_core::section::SectionKind;
use serde::Serialize;

use crate::html::escape_html;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub section: SectionKind,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub page_title: &'static str,
    pub warning_html: &'static str,
    /// `(name, value)` pairs, names including the leading `--`.
    pub css_variables: Vec<(&'static str, &'static str)>,
    pub footer: ContactDetails,
}

pub fn theme_for(section: SectionKind) -> Theme {
    let config = section_config(section);
    let colors = &config.colors;
    Theme {
        section,
        title: config.title,
        subtitle: config.subtitle,
        page_title: config.page_title,
        warning_html: config.warning_html,
        css_variables: vec![
            ("--primary-color", colors.primary),
            ("--primary-shadow", colors.shadow),
            ("--primary-hover", colors.hover),
            ("--primary-gradient-start", colors.gradient_start),
            ("--primary-gradient-end", colors.gradient_end),
        ],
        footer: config.contact,
    }
}

impl Theme {
    /// `:root { ... }` rule setting every color variable.
    pub fn css_rule(&self) -> String {
        let declarations: Vec<String> = self
            .css_variables
            .iter()
            .map(|(name, value)| format!("{name}: {value};"))
            .collect();
        format!(":root {{ {} }}", declarations.join(" "))
    }

    pub fn header_html(&self) -> String {
        format!(
            r#"<h1 class="site-title">{}</h1><p class="site-subtitle">{}</p><div class="warning">{}</div>"#,
            escape_html(self.title),
            escape_html(self.subtitle),
            self.warning_html
        )
    }

    pub fn footer_html(&self) -> String {
        format!(
            r#"<div class="footer-contact"><p>📱 Discord: {}</p><p>💬 En jeu: {}</p><p>📍 {} - {}</p></div>"#,
            escape_html(self.footer.discord),
            escape_html(self.footer.ingame),
            escape_html(self.footer.location),
            escape_html(self.footer.description)
        )
    }
}

#[cfg(test)]
mod tests {
    use catalog_core::section::SectionKind;

    use super::theme_for;

    #[test]
    fn weapons_theme_is_blue() {
        let theme = theme_for(SectionKind::Weapons);
        assert_eq!(theme.page_title, "Shadow Armory - Arsenal Tactique");
        assert_eq!(theme.css_variables[0], ("--primary-color", "#4488ff"));
        assert!(theme.css_rule().starts_with(":root { --primary-color: #4488ff;"));
        assert!(theme.footer_html().contains("Discord: Shadow_Arms"));
    }

    #[test]
    fn warning_markup_is_kept() {
        let header = theme_for(SectionKind::Services).header_html();
        assert!(header.contains("<strong>BLANCHIMENT:</strong>"));
        assert!(header.contains("UNDERGROUND SERVICES"));
    }
}
