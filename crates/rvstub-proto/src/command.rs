//! RSP command parsing.

/// Annex prefix for target description reads.
const TARGET_XML_PREFIX: &str = "qXfer:features:read:target.xml";

/// A debugger request recognized by the stub.
///
/// Parsed from the decoded payload by exact match or prefix, never from the
/// raw frame, so checksum digits cannot trigger a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `?`: report why the target stopped.
    HaltReason,
    /// `qSupported[:features]`: feature negotiation.
    QuerySupported {
        /// Features advertised by the client.
        features: Vec<String>,
    },
    /// `g`: read all general registers.
    ReadRegisters,
    /// `qXfer:features:read:target.xml:...`: fetch the target description.
    ReadTargetXml,
    /// `vCont?`: query supported vCont actions.
    VContQuery,
    /// `s`: single-step one instruction.
    Step,
    /// Anything else.
    Unknown(String),
}

impl Command {
    /// Parse a decoded packet payload.
    #[must_use]
    pub fn parse(payload: &str) -> Self {
        match payload {
            "?" => return Self::HaltReason,
            "g" => return Self::ReadRegisters,
            "vCont?" => return Self::VContQuery,
            "s" => return Self::Step,
            _ => {}
        }

        if let Some(rest) = payload.strip_prefix("qSupported") {
            if rest.is_empty() {
                return Self::QuerySupported {
                    features: Vec::new(),
                };
            }
            if let Some(list) = rest.strip_prefix(':') {
                let features = list
                    .split(';')
                    .filter(|f| !f.is_empty())
                    .map(str::to_string)
                    .collect();
                return Self::QuerySupported { features };
            }
        }

        if let Some(rest) = payload.strip_prefix(TARGET_XML_PREFIX) {
            if rest.is_empty() || rest.starts_with(':') {
                return Self::ReadTargetXml;
            }
        }

        Self::Unknown(payload.to_string())
    }

    /// Short label for logs and metrics.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::HaltReason => "halt_reason",
            Self::QuerySupported { .. } => "q_supported",
            Self::ReadRegisters => "read_registers",
            Self::ReadTargetXml => "read_target_xml",
            Self::VContQuery => "vcont_query",
            Self::Step => "step",
            Self::Unknown(_) => "unknown",
        }
    }
}
