//! Form field descriptors

/// The editable fields of the admission form, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Name,
    Email,
    CountryCode,
    PhoneNumber,
    FreeText,
}

impl FieldKind {
    pub const ALL: [FieldKind; 5] = [
        FieldKind::Name,
        FieldKind::Email,
        FieldKind::CountryCode,
        FieldKind::PhoneNumber,
        FieldKind::FreeText,
    ];

    /// Field at a focus index, if the index points at an editable field
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email Address",
            Self::CountryCode => "Country Code",
            Self::PhoneNumber => "Phone Number",
            Self::FreeText => "Free Text Field (optional)",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::Name => "Enter your full name",
            Self::Email => "Enter your email address",
            Self::CountryCode => "Select Country Code",
            Self::PhoneNumber => "Enter your phone number",
            Self::FreeText => "Add any additional information (optional)",
        }
    }

    pub fn is_multiline(&self) -> bool {
        matches!(self, Self::FreeText)
    }

    /// Whether the field takes typed text (the country code is picked from a list)
    pub fn accepts_text(&self) -> bool {
        !matches!(self, Self::CountryCode)
    }
}
