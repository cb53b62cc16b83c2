use catalog_core::catalog_api::section_config;
use catalog_core::section::SectionKind;
use serde::Serialize;

use crate::html::escape_html;

pub const FALLBACK_CONTACT: &str = "Gally";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactMessage {
    pub title: String,
    pub body: String,
}

/// Contact text for `item_name`, addressed to the seller of the active
/// section. With no active section the generic contact is used.
pub fn contact_message(item_name: &str, active: Option<SectionKind>) -> ContactMessage {
    let title = format!("Contact pour: {item_name}");
    let body = match active {
        Some(section) => {
            let config = section_config(section);
            let contact = &config.contact;
            format!(
                "Vous souhaitez contacter le {} pour: {item_name}\n\n📱 Discord: {}\n💬 En jeu: {}\n📍 {} - {}",
                config.seller_label,
                contact.discord,
                contact.ingame,
                contact.location,
                contact.description
            )
        }
        None => format!(
            "{title}\n\n📱 Discord: {FALLBACK_CONTACT}\n💬 En jeu: {FALLBACK_CONTACT}"
        ),
    };
    ContactMessage { title, body }
}

/// Open/closed state of the contact dialog.
#[derive(Debug, Clone, Default)]
pub struct ContactModal {
    current: Option<ContactMessage>,
}

impl ContactModal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows `message`, replacing whatever was open.
    pub fn open(&mut self, message: ContactMessage) -> &ContactMessage {
        self.current.insert(message)
    }

    pub fn close(&mut self) -> Option<ContactMessage> {
        self.current.take()
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Option<&ContactMessage> {
        self.current.as_ref()
    }

    /// Dialog markup while open. Line breaks in the body become `<br>`.
    pub fn to_html(&self) -> Option<String> {
        let message = self.current.as_ref()?;
        let body = escape_html(&message.body).replace('\n', "<br>");
        Some(format!(
            r#"<div class="modal" role="dialog"><div class="modal-content"><button class="modal-close" type="button">&times;</button><h2>{}</h2><p>{body}</p></div></div>"#,
            escape_html(&message.title)
        ))
    }
}
