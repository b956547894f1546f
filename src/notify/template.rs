//! Subject/body templates.

use crate::assign::Participant;

pub const DEFAULT_SUBJECT: &str = "Your Secret Santa match!";

pub const DEFAULT_BODY: &str = "Hi {giver_name},

You have been matched to give a gift to: {receiver_name}.
Recipient email: {receiver_email}

Happy gifting!
- Secret Santa Organizer";

/// Subject and body templates for giver notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MessageTemplate {
    pub subject: String,
    pub body: String,
}

impl Default for MessageTemplate {
    fn default() -> Self {
        Self {
            subject: DEFAULT_SUBJECT.to_string(),
            body: DEFAULT_BODY.to_string(),
        }
    }
}

impl MessageTemplate {
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }
}

/// Substitutes the known placeholders in `template`.
///
/// Unknown or unterminated placeholders are left as written.
///
/// ```
/// use u_santa::assign::Participant;
/// use u_santa::notify::render;
///
/// let giver = Participant::new("alice@example.com", "Alice");
/// let receiver = Participant::new("bob@example.com", "Bob");
/// assert_eq!(
///     render("{giver_name} -> {receiver_name} ({budget})", &giver, &receiver),
///     "Alice -> Bob ({budget})"
/// );
/// ```
pub fn render(template: &str, giver: &Participant, receiver: &Participant) -> String {
    let lookup = |name: &str| match name {
        "giver_name" => Some(giver.name.as_str()),
        "giver_email" => Some(giver.key.as_str()),
        "receiver_name" => Some(receiver.name.as_str()),
        "receiver_email" => Some(receiver.key.as_str()),
        _ => None,
    };

    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        match after.find('}').and_then(|close| Some((close, lookup(&after[..close])?))) {
            Some((close, value)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn people() -> (Participant, Participant) {
        (
            Participant::new("alice@example.com", "Alice"),
            Participant::new("bob@example.com", "Bob"),
        )
    }

    #[test]
    fn test_default_body_renders_all_fields() {
        let (giver, receiver) = people();
        let body = render(DEFAULT_BODY, &giver, &receiver);
        assert!(body.starts_with("Hi Alice,"));
        assert!(body.contains("give a gift to: Bob."));
        assert!(body.contains("Recipient email: bob@example.com"));
        assert!(!body.contains('{'));
    }

    #[test]
    fn test_all_placeholders() {
        let (giver, receiver) = people();
        assert_eq!(
            render("{giver_name}|{giver_email}|{receiver_name}|{receiver_email}", &giver, &receiver),
            "Alice|alice@example.com|Bob|bob@example.com"
        );
    }

    #[test]
    fn test_unknown_and_broken_placeholders_survive() {
        let (giver, receiver) = people();
        assert_eq!(render("{unknown} {giver_name}", &giver, &receiver), "{unknown} Alice");
        assert_eq!(render("oops {giver_name", &giver, &receiver), "oops {giver_name");
        assert_eq!(render("{{giver_name}}", &giver, &receiver), "{Alice}");
        assert_eq!(render("", &giver, &receiver), "");
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let giver = Participant::new("a@x.io", "{receiver_name}");
        let receiver = Participant::new("b@x.io", "Bob");
        assert_eq!(render("{giver_name}", &giver, &receiver), "{receiver_name}");
    }

    #[test]
    fn test_template_builder() {
        let t = MessageTemplate::default().with_subject("Hi {giver_name}");
        assert_eq!(t.subject, "Hi {giver_name}");
        assert_eq!(t.body, DEFAULT_BODY);
    }
}
