//! Semantic roles of layout placeholders.

use std::fmt;

/// The semantic category of a placeholder.
///
/// Template authors tag placeholders by giving them a name that starts with
/// one of the role prefixes (`"Main Text 2"`, `"Pic 1"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    Title,
    Subtitle,
    Date,
    SlideNum,
    Main,
    Margin,
    Footer,
    Picture,
    Table,
}

impl Role {
    /// Every role, in declaration order.
    pub const ALL: [Role; 9] = [
        Role::Title,
        Role::Subtitle,
        Role::Date,
        Role::SlideNum,
        Role::Main,
        Role::Margin,
        Role::Footer,
        Role::Picture,
        Role::Table,
    ];

    /// Name prefix identifying placeholders of this role.
    pub fn name_prefix(self) -> &'static str {
        match self {
            Role::Title => "Title",
            Role::Subtitle => "Subtitle",
            Role::Date => "Date",
            Role::SlideNum => "SlideNum",
            Role::Main => "Main",
            Role::Margin => "Margin",
            Role::Footer => "Footer",
            Role::Picture => "Pic",
            Role::Table => "Table",
        }
    }

    /// Classify a placeholder by its name. Matching is case-sensitive.
    pub fn classify(placeholder_name: &str) -> Option<Role> {
        Role::ALL
            .into_iter()
            .find(|role| placeholder_name.starts_with(role.name_prefix()))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Title => "title",
            Role::Subtitle => "subtitle",
            Role::Date => "date",
            Role::SlideNum => "slide number",
            Role::Main => "main text",
            Role::Margin => "margin text",
            Role::Footer => "footer",
            Role::Picture => "picture",
            Role::Table => "table",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_prefixes() {
        assert_eq!(Role::classify("Title 1"), Some(Role::Title));
        assert_eq!(Role::classify("Subtitle 2"), Some(Role::Subtitle));
        assert_eq!(Role::classify("Main Text"), Some(Role::Main));
        assert_eq!(Role::classify("Margin Notes"), Some(Role::Margin));
        assert_eq!(Role::classify("Picture Placeholder 3"), Some(Role::Picture));
        assert_eq!(Role::classify("Pic"), Some(Role::Picture));
        assert_eq!(Role::classify("SlideNum 4"), Some(Role::SlideNum));
        assert_eq!(Role::classify("Footer"), Some(Role::Footer));
        assert_eq!(Role::classify("Table 9"), Some(Role::Table));
        assert_eq!(Role::classify("Date Placeholder"), Some(Role::Date));
    }

    #[test]
    fn test_classify_unknown_and_case() {
        assert_eq!(Role::classify("Content Placeholder 2"), None);
        assert_eq!(Role::classify("title 1"), None);
        assert_eq!(Role::classify(""), None);
    }
}
