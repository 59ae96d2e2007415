use serde::{Deserialize, Serialize};

/// Fixed width of ISA06/ISA08 interchange IDs.
pub const ISA_ID_WIDTH: usize = 15;

/// Default interchange ID qualifier (ISA05/ISA07) when none is present.
pub const DEFAULT_ID_QUALIFIER: &str = "ZZ";

/// Default usage indicator (ISA11).
pub const DEFAULT_USAGE_INDICATOR: &str = "U";

/// Default interchange control version (ISA12).
pub const DEFAULT_ISA_VERSION: &str = "00501";

/// Identity fields collected from the ISA/GS/BEG envelope during a scan.
/// The scan overwrites sequentially, so when a tag occurs more than once the
/// last occurrence wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeHeader {
    pub isa_sender_qualifier: String,
    pub isa_sender_id: String,
    pub isa_receiver_qualifier: String,
    pub isa_receiver_id: String,
    pub usage_indicator: String,
    pub isa_version: String,
    pub gs_sender_id: String,
    pub gs_receiver_id: String,
    pub po_number: String,
    pub po_date: String,
    /// Control numbers as found in the input. Regeneration always replaces
    /// them; they are kept for display.
    pub isa_control_number: String,
    pub gs_control_number: String,
    pub st_control_number: String,
}

impl Default for EnvelopeHeader {
    fn default() -> EnvelopeHeader {
        EnvelopeHeader {
            isa_sender_qualifier: DEFAULT_ID_QUALIFIER.to_string(),
            isa_sender_id: String::new(),
            isa_receiver_qualifier: DEFAULT_ID_QUALIFIER.to_string(),
            isa_receiver_id: String::new(),
            usage_indicator: DEFAULT_USAGE_INDICATOR.to_string(),
            isa_version: DEFAULT_ISA_VERSION.to_string(),
            gs_sender_id: String::new(),
            gs_receiver_id: String::new(),
            po_number: String::new(),
            po_date: String::new(),
            isa_control_number: String::new(),
            gs_control_number: String::new(),
            st_control_number: String::new(),
        }
    }
}

/// Caller-supplied envelope values. Every field is optional; `None` (or a
/// blank string) falls through to the parsed value, then to the value on the
/// segment being rewritten, then to the fixed default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeOverrides {
    #[serde(default)]
    pub isa_sender_qualifier: Option<String>,
    #[serde(default)]
    pub isa_sender_id: Option<String>,
    #[serde(default)]
    pub isa_receiver_qualifier: Option<String>,
    #[serde(default)]
    pub isa_receiver_id: Option<String>,
    #[serde(default)]
    pub gs_sender_id: Option<String>,
    #[serde(default)]
    pub gs_receiver_id: Option<String>,
    #[serde(default)]
    pub po_number: Option<String>,
    #[serde(default)]
    pub po_date: Option<String>,
}

impl EnvelopeOverrides {
    pub fn with_po_number(mut self, po_number: impl Into<String>) -> Self {
        self.po_number = Some(po_number.into());
        self
    }

    pub fn with_po_date(mut self, po_date: impl Into<String>) -> Self {
        self.po_date = Some(po_date.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.isa_sender_qualifier.is_none()
            && self.isa_sender_id.is_none()
            && self.isa_receiver_qualifier.is_none()
            && self.isa_receiver_id.is_none()
            && self.gs_sender_id.is_none()
            && self.gs_receiver_id.is_none()
            && self.po_number.is_none()
            && self.po_date.is_none()
    }
}

/// First candidate that is non-blank after trimming, else the default.
pub fn first_non_empty<'a>(candidates: &[Option<&'a str>], default: &'a str) -> &'a str {
    candidates
        .iter()
        .flatten()
        .map(|value| value.trim())
        .find(|value| !value.is_empty())
        .unwrap_or(default)
}

/// Right-pad an interchange ID with spaces to exactly [`ISA_ID_WIDTH`]
/// characters, truncating anything longer.
pub fn pad_isa_id(id: &str) -> String {
    let truncated: String = id.chars().take(ISA_ID_WIDTH).collect();
    format!("{truncated:<width$}", width = ISA_ID_WIDTH)
}
