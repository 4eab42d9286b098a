//! Registration name rules.

/// Rule deciding which registration names are usable as dispatch targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NamePolicy {
    /// Identifier-shaped names: a letter or `_`, then letters, digits or `_`.
    #[default]
    Identifier,
    /// Any non-empty name without whitespace or control characters.
    NonEmpty,
}

impl NamePolicy {
    /// Check a registration name against this policy.
    pub fn accepts(self, name: &str) -> bool {
        match self {
            NamePolicy::Identifier => is_identifier(name),
            NamePolicy::NonEmpty => {
                !name.is_empty()
                    && !name
                        .chars()
                        .any(|c| c.is_whitespace() || c.is_control())
            }
        }
    }
}

/// Whether `name` is shaped like an identifier.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first == '_' || first.is_alphabetic() => {
            chars.all(|c| c == '_' || c.is_alphanumeric())
        }
        _ => false,
    }
}
